//! # ayn-assist: AI Assistance for AYN
//!
//! Inventory insights and invoice extraction through Gemini, with fixed
//! fallbacks so that a missing key or a failed call never blocks the
//! operator.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  `ayn insights`                        `ayn invoice scan photo.jpg`    │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  insights_or_fallback(&client, ..)     scan_or_empty(&client, ..)      │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ GeminiClient  (InsightProvider + InvoiceScanner)                │   │
//! │  │   no key  ──► MissingApiKey ──► fallback                        │   │
//! │  │   HTTP / decode error ────────► fallback                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                        │                        │
//! │       ▼                                        ▼                        │
//! │  Vec<Insight> (3 fixed on failure)     Vec<ScannedLine> (empty)        │
//! │                                                │                        │
//! │                                                ▼                        │
//! │                              ayn_core::reconcile::reconcile(..)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Key, model and endpoint
//! - [`provider`] - `InsightProvider` / `InvoiceScanner` traits
//! - [`gemini`] - The HTTP implementation
//! - [`fallback`] - Failure-to-default wrappers
//! - [`lease`] - Discarding results for views that are gone
//! - [`error`] - Error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod lease;
pub mod provider;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::AssistConfig;
pub use error::{AssistError, AssistResult};
pub use fallback::{fallback_insights, insights_or_fallback, scan_or_empty};
pub use gemini::GeminiClient;
pub use lease::ViewLease;
pub use provider::{InsightProvider, InvoiceScanner};
