use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{Category, NewQuestion, Question},
    server::{
        app::{AppState, PageSize, Store},
        deserializers::{deserialize_lenient_page, deserialize_search_term},
        extractors::{ApiJson, ApiPath, ApiQuery},
        pagination::Page,
    },
};

use super::{ApiError, ApiResponse};

#[derive(Deserialize, Debug)]
struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_lenient_page")]
    page: Option<u32>,
}

#[derive(Deserialize, Debug)]
struct SearchBody {
    #[serde(default, rename = "searchTerm", deserialize_with = "deserialize_search_term")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    /// Size of the whole collection, not of this page
    total_questions: i64,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct SearchResults {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
}

#[tracing::instrument(skip(store, page_size))]
async fn get_questions(
    State(store): State<Store>,
    State(page_size): State<PageSize>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let page = Page::new(query.page, page_size.0);
    let total_questions = store.question_count().await?;
    let questions = store.questions_page(page.offset(), page.limit()).await?;
    let categories = store.all_categories().await?;
    Ok(Json(QuestionsPage {
        success: true,
        questions,
        total_questions,
        categories,
    }))
}

#[tracing::instrument(skip(store, question), fields(category = question.category))]
async fn create_question(
    State(store): State<Store>,
    ApiJson(question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<Created>> {
    let id = store.insert_question(&question).await?;
    tracing::info!(id, "Question created");
    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

#[tracing::instrument(skip(store))]
async fn delete_question(
    State(store): State<Store>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    if !store.delete_question(id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "Question deleted");
    Ok(Json(Deleted {
        success: true,
        deleted: id,
    }))
}

#[tracing::instrument(skip(store))]
async fn search_questions(
    State(store): State<Store>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<SearchResults>> {
    let term = body
        .search_term
        .ok_or_else(|| ApiError::unprocessable("searchTerm is required"))?;
    let questions = store.search_questions(&term).await?;
    Ok(Json(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(get_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
