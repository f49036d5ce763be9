//! # Backup Commands
//!
//! ## Export / Import
//! ```text
//! ayn export                         ayn import ayn_backup_2024-05-20.json
//!    │                                  │
//!    ▼                                  ▼
//! BackupDocument::from_inventory     BackupDocument::from_json
//!    │                                  │  (unparseable ──► INVALID_BACKUP,
//!    ▼                                  │   nothing replaced)
//! ayn_backup_<today>.json            ▼
//!                                    stock, recipes, tasks, waste replaced
//! ```
//!
//! Import replaces the collections; it does not merge.

use ayn_core::backup::{default_file_name, BackupDocument};
use chrono::{Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDto {
    pub path: PathBuf,
    pub stock: usize,
    pub recipes: usize,
    pub tasks: usize,
    pub waste: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDto {
    pub path: PathBuf,
    pub exported_at: String,
    pub stock: usize,
    pub recipes: usize,
    pub tasks: usize,
    pub waste: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetDto {
    pub reset: bool,
}

pub async fn export(state: &AppState, out: Option<PathBuf>) -> AppResult<ExportDto> {
    let session = state.session()?;
    let document = state.store.export_backup(&session, Utc::now())?;
    let path = out.unwrap_or_else(|| PathBuf::from(default_file_name(Local::now().date_naive())));

    tokio::fs::write(&path, document.to_pretty_json()?).await?;
    info!(?path, "Backup written");

    Ok(ExportDto {
        stock: document.stock.len(),
        recipes: document.recipes.len(),
        tasks: document.tasks.len(),
        waste: document.waste.len(),
        path,
    })
}

pub async fn import(state: &mut AppState, file: &Path) -> AppResult<ImportDto> {
    let session = state.session()?;
    let contents = tokio::fs::read_to_string(file).await?;
    let document = BackupDocument::from_json(&contents)?;

    let dto = ImportDto {
        path: file.to_path_buf(),
        exported_at: document.exported_at.to_rfc3339(),
        stock: document.stock.len(),
        recipes: document.recipes.len(),
        tasks: document.tasks.len(),
        waste: document.waste.len(),
    };

    state.store.import_backup(&session, document).await?;
    Ok(dto)
}

pub async fn reset(state: &mut AppState, yes: bool) -> AppResult<ResetDto> {
    let session = state.session()?;
    if !yes {
        return Err(AppError::validation("Reset erases all local data; pass --yes to confirm"));
    }

    warn!(operator = %session.name, "Resetting local data");
    state.store.reset(&session).await?;
    Ok(ResetDto { reset: true })
}
