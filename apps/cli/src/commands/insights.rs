//! # Insights Command
//!
//! Three short tips from the current stock and waste. Without an API key,
//! or when the call fails, the three fixed tips are printed instead; the
//! command itself never fails for AI reasons.

use ayn_assist::insights_or_fallback;
use ayn_core::Insight;

use super::await_in_view;
use crate::error::AppResult;
use crate::state::AppState;

pub async fn insights(state: &AppState) -> AppResult<Vec<Insight>> {
    let session = state.session()?;
    let inventory = state.store.snapshot(&session)?;

    await_in_view(insights_or_fallback(&state.assist, inventory.stock(), inventory.waste())).await
}
