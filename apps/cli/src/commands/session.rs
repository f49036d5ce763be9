//! # Session Commands
//!
//! ```text
//! ayn login 1234   ──► passphrase matches ──► ayn_user = {name, role}
//!                  └─► mismatch ──────────► NOT_AUTHENTICATED, nothing stored
//! ayn logout       ──► ayn_user = null
//! ```
//!
//! The session is persisted, so it survives between invocations until
//! `logout` or `reset`.

use ayn_core::Session;
use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub logged_in: bool,
    pub operator: Option<Session>,
}

impl SessionDto {
    fn of(state: &AppState) -> Self {
        let operator = state.store.session().cloned();
        SessionDto {
            logged_in: operator.is_some(),
            operator,
        }
    }
}

pub async fn login(state: &mut AppState, passphrase: &str) -> AppResult<SessionDto> {
    if !state.store.authenticate(passphrase).await? {
        return Err(AppError::new(ErrorCode::NotAuthenticated, "Incorrect passphrase"));
    }
    info!("Session started");
    Ok(SessionDto::of(state))
}

pub async fn logout(state: &mut AppState) -> AppResult<SessionDto> {
    state.store.end_session().await?;
    Ok(SessionDto::of(state))
}

pub fn whoami(state: &AppState) -> SessionDto {
    SessionDto::of(state)
}
