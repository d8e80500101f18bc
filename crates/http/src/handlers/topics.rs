use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use wortschatz_core::{NewTopic, Topic};

use super::{load_table, load_topics};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;
use crate::pages::{self, NextAction};
use crate::query_types::NewTopicForm;

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let topics = load_topics(&state).await?;
    Ok(Html(pages::home(&topics)))
}

pub async fn new_topic_form() -> Html<String> {
    Html(pages::new_topic_form())
}

pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, ApiError> {
    let form = NewTopicForm::from_fields(fields);
    let new_topic =
        NewTopic::parse(&form.table_name, &form.translation, form.columns.iter().map(String::as_str))?;

    let storage = state.storage.clone();
    let translations = state.translations.clone();
    let created = new_topic.clone();
    blocking_result(move || {
        translations.set(created.name.as_str(), &created.translation)?;
        storage.create_topic(&created)
    })
    .await?;

    let mut echoed = vec![
        ("table_name".to_owned(), new_topic.name.to_string()),
        ("translation".to_owned(), new_topic.translation.clone()),
    ];
    echoed.extend(
        new_topic.columns.iter().enumerate().map(|(i, c)| (format!("column_{i}"), c.to_string())),
    );
    let topic = Topic { name: new_topic.name, label: new_topic.translation };
    Ok(Html(pages::confirmation(&topic, NextAction::NewTopic, &echoed)))
}

pub async fn show_topic(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Html<String>, ApiError> {
    let table = load_table(&state, &topic).await?;
    Ok(Html(pages::topic_table(&table)))
}
