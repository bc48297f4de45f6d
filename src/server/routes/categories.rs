use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::{Category, Question},
    server::{
        app::{AppState, Store},
        extractors::ApiPath,
    },
};

use super::ApiResponse;

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct CategoryQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
}

// An empty category table is a valid, empty listing
#[tracing::instrument(skip_all)]
async fn get_categories(State(store): State<Store>) -> ApiResponse<Json<CategoriesResponse>> {
    let categories = store.all_categories().await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

// Unknown category ids yield an empty list, not a 404
#[tracing::instrument(skip(store))]
async fn questions_for_category(
    State(store): State<Store>,
    ApiPath(category_id): ApiPath<i64>,
) -> ApiResponse<Json<CategoryQuestionsResponse>> {
    let questions = store.questions_for_category(category_id).await?;
    Ok(Json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
