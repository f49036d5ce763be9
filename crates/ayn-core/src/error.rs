//! # Error Types
//!
//! Domain-specific error types for ayn-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ayn-core errors (this file)                                           │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ayn-db errors (separate crate)                                        │
//! │  ├── DbError          - Storage failures                               │
//! │  └── StoreError       - DbError | CoreError for store operations       │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the operator sees (JSON on stderr)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → AppError             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookups that miss (unknown stock id in an adjustment, unknown recipe in a
//! sale, unknown task on completion) are NOT errors. They are reported as
//! outcome values by the operations themselves. Only waste recording rejects
//! an unknown stock id, because a waste record must name what was lost.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Waste was recorded against a stock item that does not exist.
    ///
    /// ## When This Occurs
    /// ```text
    /// record_waste(stock_id: "99", qty: 2)
    ///      │
    ///      ▼
    /// lookup "99" → None
    ///      │
    ///      ▼
    /// StockItemNotFound("99")   (no record created, no stock touched)
    /// ```
    #[error("Stock item not found: {0}")]
    StockItemNotFound(String),

    /// An operation that needs an operator ran without a session.
    #[error("Not authenticated: log in first")]
    NotAuthenticated,

    /// A backup document could not be read.
    #[error("Invalid backup document: {0}")]
    InvalidBackup(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any mutation, so a rejected input never leaves a
/// half-applied change behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is above the largest accepted amount.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. not a number, not a date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
