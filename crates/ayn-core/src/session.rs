//! # Session Transitions
//!
//! One shared passphrase opens the app. There is no user table, no hashing
//! and no lockout; a wrong passphrase simply leaves the session absent.
//!
//! ```text
//!   None ──login(ok)───► Some(Session) ──logout──► None
//!     │
//!     └──login(bad)──► None
//! ```
//!
//! Both transitions are pure. The store owns the current value and persists
//! it; operations that need an operator take `&Session` as an argument.

use crate::error::{CoreError, CoreResult};
use crate::types::Session;
use crate::{DEFAULT_OPERATOR_NAME, DEFAULT_OPERATOR_ROLE, DEFAULT_PASSPHRASE};

/// The passphrase and the operator identity it unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassphraseGate {
    passphrase: String,
    operator: Session,
}

impl PassphraseGate {
    pub fn new(passphrase: impl Into<String>, operator: Session) -> Self {
        PassphraseGate {
            passphrase: passphrase.into(),
            operator,
        }
    }

    pub fn operator(&self) -> &Session {
        &self.operator
    }
}

impl Default for PassphraseGate {
    fn default() -> Self {
        PassphraseGate::new(
            DEFAULT_PASSPHRASE,
            Session {
                name: DEFAULT_OPERATOR_NAME.to_string(),
                role: DEFAULT_OPERATOR_ROLE.to_string(),
            },
        )
    }
}

/// Returns a session when `secret` matches exactly, `None` otherwise.
pub fn login(gate: &PassphraseGate, secret: &str) -> Option<Session> {
    if secret == gate.passphrase {
        Some(gate.operator.clone())
    } else {
        None
    }
}

/// Always ends the session.
pub fn logout(_current: Option<Session>) -> Option<Session> {
    None
}

/// Turns an optional session into the explicit context an operation needs.
pub fn require(session: Option<&Session>) -> CoreResult<&Session> {
    session.ok_or(CoreError::NotAuthenticated)
}
