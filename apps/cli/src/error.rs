//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in AYN                                    │
//! │                                                                         │
//! │  `ayn waste record 99 2`                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── DbError::QueryFailed("...") ──┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Domain Error? ─── CoreError::StockItemNotFound ── AppError ───► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─── JSON on stdout, exit 0                             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: {"code":"NOT_FOUND","message":"Stock item not found: 99"}     │
//! │  exit status 2                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ayn_assist::AssistError;
use ayn_core::{CoreError, ValidationError};
use ayn_db::{DbError, StoreError};
use serde::Serialize;

pub type AppResult<T> = Result<T, AppError>;

/// What a failed command prints on stderr.
///
/// ```json
/// {
///   "code": "NOT_AUTHENTICATED",
///   "message": "Not authenticated: log in first"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced entity does not exist
    NotFound,

    /// No session, or the passphrase was wrong
    NotAuthenticated,

    /// Input validation failed
    ValidationError,

    /// Storage operation failed
    DatabaseError,

    /// Backup file could not be read as a backup
    InvalidBackup,

    /// Configuration file or values are invalid
    ConfigError,

    /// Reading or writing a file failed
    IoError,

    /// The operator cancelled before the result arrived
    Cancelled,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::NotAuthenticated => 3,
            ErrorCode::ValidationError | ErrorCode::NotFound | ErrorCode::InvalidBackup => 2,
            ErrorCode::Cancelled => 130,
            _ => 1,
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn cancelled() -> Self {
        AppError::new(ErrorCode::Cancelled, "Cancelled before the result arrived")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// The JSON line written to stderr.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization { key, message } => {
                tracing::error!(key = %key, "Snapshot serialization failed: {}", message);
                AppError::new(ErrorCode::DatabaseError, format!("Could not save {}", key))
            }
            DbError::PoolExhausted => AppError::new(ErrorCode::DatabaseError, "Database pool exhausted"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::StockItemNotFound(id) => AppError::not_found("Stock item", &id),
            CoreError::NotAuthenticated => AppError::new(ErrorCode::NotAuthenticated, err.to_string()),
            CoreError::InvalidBackup(_) => AppError::new(ErrorCode::InvalidBackup, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Core(e) => e.into(),
            StoreError::Db(e) => e.into(),
        }
    }
}

/// Only configuration problems surface; service failures are absorbed by
/// the fallback wrappers before they get here.
impl From<AssistError> for AppError {
    fn from(err: AssistError) -> Self {
        if err.is_config_error() {
            AppError::config(err.to_string())
        } else {
            AppError::internal(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::config(format!("Invalid config file: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: AppError = CoreError::StockItemNotFound("99".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Stock item not found: 99");

        let err: AppError = StoreError::Core(CoreError::NotAuthenticated).into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert_eq!(err.code.exit_status(), 3);

        let err: AppError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_json_shape() {
        let json = AppError::not_found("Recipe", "r9").to_json();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"Recipe not found: r9"}"#);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err: AppError = DbError::QueryFailed("syntax error near kv_store".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("syntax"));
    }
}
