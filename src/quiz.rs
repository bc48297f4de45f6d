//! Quiz play: picking the next unseen question for a round.
//!
//! A round carries no server-side state. The client resends every id it has
//! already been asked, and each request draws from whatever is left.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

/// Category id that stands for "every category".
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePool {
    All,
    Category(i64),
}

impl CandidatePool {
    pub fn from_category_id(id: i64) -> Self {
        if id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(id)
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::Category(id) => id.to_string(),
        }
    }
}

/// Draws uniformly among the candidates whose id is not in `asked`.
///
/// Returns `None` once every candidate has been asked. Ids in `asked` that
/// are not candidates have no effect.
pub fn select_question<R>(
    candidates: Vec<Question>,
    asked: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    candidates
        .into_iter()
        .filter(|question| !asked.contains(&question.id))
        .choose(rng)
}
