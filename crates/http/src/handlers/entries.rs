use axum::{
    Form,
    extract::{Path, State},
    response::Html,
};
use std::sync::Arc;

use wortschatz_core::EntryEdit;

use super::{dump_after_write, parse_topic};
use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;
use crate::pages::{self, NextAction};
use crate::query_types::{EditForm, entry_values};

pub async fn add_form(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Html<String>, ApiError> {
    let name = parse_topic(&topic)?;
    let storage = state.storage.clone();
    let key = name.clone();
    let columns = blocking_result(move || storage.data_columns(&key)).await?;
    Ok(Html(pages::add_form(&state.topic(name), &columns)))
}

pub async fn add_entry(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, ApiError> {
    let name = parse_topic(&topic)?;
    let values = entry_values(fields);

    let storage = state.storage.clone();
    let dump_dir = state.dump_dir();
    let key = name.clone();
    let row = values.clone();
    blocking_result(move || {
        let id = storage.insert_entry(&key, &row)?;
        dump_after_write(&storage, dump_dir.as_deref(), &key);
        Ok(id)
    })
    .await?;

    Ok(Html(pages::confirmation(&state.topic(name), NextAction::Add, &values)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
) -> Result<Html<String>, ApiError> {
    let name = parse_topic(&topic)?;
    let storage = state.storage.clone();
    let key = name.clone();
    let columns = blocking_result(move || storage.data_columns(&key)).await?;
    Ok(Html(pages::edit_form(&state.topic(name), &columns)))
}

pub async fn edit_entry(
    State(state): State<Arc<AppState>>,
    Path(topic): Path<String>,
    Form(form): Form<EditForm>,
) -> Result<Html<String>, ApiError> {
    let name = parse_topic(&topic)?;
    let edit = EntryEdit::from(form);
    if edit.expression.is_empty() || edit.column.is_empty() {
        return Err(ApiError::BadRequest("expression and column are required".to_owned()));
    }

    let storage = state.storage.clone();
    let dump_dir = state.dump_dir();
    let key = name.clone();
    let change = edit.clone();
    blocking_result(move || {
        let id = storage.edit_entry(&key, &change)?;
        dump_after_write(&storage, dump_dir.as_deref(), &key);
        Ok(id)
    })
    .await?;

    let echoed = vec![
        ("expression".to_owned(), edit.expression),
        ("column".to_owned(), edit.column),
        ("value".to_owned(), edit.value),
    ];
    Ok(Html(pages::confirmation(&state.topic(name), NextAction::Edit, &echoed)))
}
