//! # Gemini Client
//!
//! `InsightProvider` and `InvoiceScanner` over the Gemini `generateContent`
//! REST endpoint.
//!
//! ## Request Flow
//! ```text
//! insights(stock, waste)                    scan(image, mime)
//!      │                                          │
//!      ▼                                          ▼
//! prompt text + stock summary             inlineData (base64) + instruction
//!      │                                          │
//!      └──────────────┬───────────────────────────┘
//!                     ▼
//!   POST {base_url}/models/{model}:generateContent
//!   generationConfig: application/json + responseSchema
//!                     │
//!                     ▼
//!   candidates[0].content.parts[*].text  ──►  serde_json
//! ```
//!
//! A missing key fails before any request is built.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ayn_assist::{AssistConfig, GeminiClient, InsightProvider};
//!
//! let client = GeminiClient::new(AssistConfig::default());
//! let insights = client.insights(&stock, &waste).await?;
//! ```

use async_trait::async_trait;
use ayn_core::{Insight, Quantity, ScannedLine, StockItem, WasteItem};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::AssistConfig;
use crate::error::{AssistError, AssistResult};
use crate::provider::{InsightProvider, InvoiceScanner};

const INSIGHT_INSTRUCTION: &str = "Analiza este inventario y genera 3 consejos cortos:";
const SCAN_INSTRUCTION: &str =
    "Extrae: nombre producto, cantidad (num), precio unitario (num). Devuelve JSON Array.";

// =============================================================================
// Client
// =============================================================================

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: AssistConfig,
}

impl GeminiClient {
    pub fn new(config: AssistConfig) -> Self {
        GeminiClient {
            client: Client::new(),
            config,
        }
    }

    /// Uses a caller-built HTTP client (proxies, custom TLS).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Sends one request and returns the text of the first candidate.
    async fn generate(&self, body: &Value) -> AssistResult<String> {
        let api_key = self.config.require_api_key()?;

        debug!(model = %self.config.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "AI service returned an error status");
            return Err(AssistError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text()
    }
}

#[async_trait]
impl InsightProvider for GeminiClient {
    async fn insights(&self, stock: &[StockItem], waste: &[WasteItem]) -> AssistResult<Vec<Insight>> {
        let prompt = insight_prompt(stock, waste)?;
        let text = self.generate(&insight_request(&prompt)).await?;
        let insights: Vec<Insight> = serde_json::from_str(&text)?;

        info!(count = insights.len(), "AI insights received");
        Ok(insights)
    }
}

#[async_trait]
impl InvoiceScanner for GeminiClient {
    async fn scan(&self, image: &[u8], mime_type: &str) -> AssistResult<Vec<ScannedLine>> {
        let text = self.generate(&scan_request(image, mime_type)).await?;
        let lines = decode_scanned_lines(&text)?;

        info!(lines = lines.len(), bytes = image.len(), "Invoice scanned");
        Ok(lines)
    }
}

// =============================================================================
// Request Building
// =============================================================================

/// Compact stock line sent with the insight prompt.
#[derive(Debug, Serialize)]
struct StockSummary<'a> {
    n: &'a str,
    u: Quantity,
    m: Quantity,
}

/// The insight prompt: instruction, stock summary, full waste list.
pub fn insight_prompt(stock: &[StockItem], waste: &[WasteItem]) -> AssistResult<String> {
    let summary: Vec<StockSummary<'_>> = stock
        .iter()
        .map(|s| StockSummary {
            n: &s.name,
            u: s.units,
            m: s.min_stock,
        })
        .collect();

    Ok(format!(
        "{}\nStock: {}\nMermas: {}",
        INSIGHT_INSTRUCTION,
        serde_json::to_string(&summary)?,
        serde_json::to_string(waste)?
    ))
}

fn insight_request(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "content": { "type": "STRING" }
                    },
                    "required": ["title", "content"]
                }
            }
        }
    })
}

fn scan_request(image: &[u8], mime_type: &str) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "data": STANDARD.encode(image), "mimeType": mime_type } },
                { "text": SCAN_INSTRUCTION }
            ]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "quantity": { "type": "NUMBER" },
                        "price": { "type": "NUMBER" }
                    }
                }
            }
        }
    })
}

// =============================================================================
// Response Decoding
// =============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn first_text(self) -> AssistResult<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(text)
    }
}

/// One invoice line as the model returns it. Every field may be absent.
#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    quantity: Option<f64>,
    #[serde(default)]
    price: Option<f64>,
}

impl From<RawLine> for ScannedLine {
    fn from(raw: RawLine) -> Self {
        let price_cents = raw
            .price
            .filter(|p| p.is_finite())
            .map(|p| (p * 100.0).round() as i64)
            .unwrap_or(0);

        ScannedLine {
            name: raw.name.unwrap_or_default(),
            quantity: raw.quantity.and_then(Quantity::from_f64).unwrap_or_default(),
            price_cents,
        }
    }
}

/// Decodes the scan response text into candidate lines.
pub fn decode_scanned_lines(text: &str) -> AssistResult<Vec<ScannedLine>> {
    let raw: Vec<RawLine> = serde_json::from_str(text)?;
    Ok(raw.into_iter().map(ScannedLine::from).collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
