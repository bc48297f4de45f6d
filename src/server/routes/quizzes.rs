use std::collections::HashSet;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::{
    db::Question,
    quiz::{select_question, CandidatePool},
    server::{
        app::{AppState, Store},
        extractors::ApiJson,
    },
    telemetry::{QUIZ_EXHAUSTED, QUIZ_QUESTIONS_SERVED},
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize, Debug)]
struct QuizRequest {
    #[serde(default)]
    previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    quiz_category: Option<QuizCategory>,
}

// Clients echo back the whole category object; only the id matters here
#[derive(Deserialize, Debug)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    /// Absent once every question of the pool has been asked
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<Question>,
}

#[tracing::instrument(skip(store))]
async fn play_quiz(
    State(store): State<Store>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizResponse>> {
    let category = request
        .quiz_category
        .ok_or_else(|| ApiError::unprocessable("quiz_category is required"))?;
    let pool = CandidatePool::from_category_id(category.id);

    let candidates = match pool {
        CandidatePool::All => store.all_questions().await?,
        CandidatePool::Category(id) => store.questions_for_category(id).await?,
    };
    let asked: HashSet<i64> = request
        .previous_questions
        .unwrap_or_default()
        .into_iter()
        .collect();

    let question = select_question(candidates, &asked, &mut rand::thread_rng());
    let label = pool.label();
    match &question {
        Some(question) => {
            tracing::debug!(id = question.id, "Serving quiz question");
            QUIZ_QUESTIONS_SERVED
                .with_label_values(&[label.as_str()])
                .inc();
        }
        None => {
            tracing::debug!(asked = asked.len(), "Quiz pool exhausted");
            QUIZ_EXHAUSTED.with_label_values(&[label.as_str()]).inc();
        }
    }

    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
