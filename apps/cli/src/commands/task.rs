//! # Task Commands
//!
//! New tasks go to the top of the list. Completing a task removes it; a
//! second `complete` with the same id reports `removed: false`.

use ayn_core::{NewTask, Task, TaskCategory};
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDto {
    pub id: String,
    pub removed: bool,
}

pub fn list(state: &AppState) -> AppResult<Vec<Task>> {
    let session = state.session()?;
    Ok(state.store.snapshot(&session)?.tasks().to_vec())
}

pub async fn add(
    state: &mut AppState,
    title: String,
    description: String,
    category: TaskCategory,
    is_urgent: bool,
) -> AppResult<Task> {
    let session = state.session()?;
    let fields = NewTask {
        title,
        description,
        category,
        is_urgent,
    };
    Ok(state.store.add_task(&session, fields).await?)
}

pub async fn complete(state: &mut AppState, id: &str) -> AppResult<CompleteDto> {
    let session = state.session()?;
    let removed = state.store.complete_task(&session, id).await?;
    Ok(CompleteDto {
        id: id.to_string(),
        removed,
    })
}
