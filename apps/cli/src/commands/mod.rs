//! # Commands Module
//!
//! One function per `ayn` subcommand. Each takes the opened `AppState`
//! and returns a serializable result; `lib.rs` prints it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports, Ctrl-C view guard)
//! ├── session.rs    ◄─── login, logout, whoami
//! ├── stock.rs      ◄─── list, add, adjust
//! ├── recipe.rs     ◄─── list, add, sell, cost
//! ├── waste.rs      ◄─── list, record
//! ├── task.rs       ◄─── list, add, complete
//! ├── invoice.rs    ◄─── scan (+ apply)
//! ├── insights.rs   ◄─── AI tips
//! ├── dashboard.rs  ◄─── headline figures
//! └── backup.rs     ◄─── export, import, reset
//! ```
//!
//! ## Session Gate
//! Everything except `login` and `whoami` starts with `state.session()?`,
//! which fails with `NOT_AUTHENTICATED` when nobody is logged in.

pub mod backup;
pub mod dashboard;
pub mod insights;
pub mod invoice;
pub mod recipe;
pub mod session;
pub mod stock;
pub mod task;
pub mod waste;

use ayn_assist::ViewLease;
use std::future::Future;
use tracing::warn;

use crate::error::{AppError, AppResult};

/// Awaits an AI call as a view that Ctrl-C closes. Once closed, a result
/// that still arrives is discarded.
pub(crate) async fn await_in_view<F: Future>(work: F) -> AppResult<F::Output> {
    let lease = ViewLease::new();

    tokio::select! {
        output = lease.run(work) => output.ok_or_else(AppError::cancelled),
        _ = tokio::signal::ctrl_c() => {
            lease.release();
            warn!("Interrupted, discarding pending AI result");
            Err(AppError::cancelled())
        }
    }
}
