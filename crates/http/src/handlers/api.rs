use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use wortschatz_core::TopicTable;

use super::{load_table, load_topics};
use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::TopicListResponse;

pub async fn list_topics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TopicListResponse>, ApiError> {
    let topics = load_topics(&state).await?;
    Ok(Json(topics.into()))
}

pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Json<TopicTable>, ApiError> {
    load_table(&state, &topic).await.map(Json)
}
