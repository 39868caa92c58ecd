//! HTTP client for the holdings API

use crate::domain::{Entity, Holding, Trade, TradeRow, TradesQuery, MAX_TRADES_LIMIT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Human readable description, the API's own message when it sent one
    pub fn description(&self) -> String {
        match self {
            ApiError::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Client for the holdings and trades endpoints
#[derive(Debug, Clone)]
pub struct DashboardApiClient {
    base_url: String,
    client: Client,
}

impl DashboardApiClient {
    /// Create a client for `base_url` with the given request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(4)
            .tcp_keepalive(Duration::from_secs(15))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Holdings for one entity, or across all entities for [`Entity::All`]
    pub async fn get_holdings(&self, entity: Entity) -> Result<Vec<Holding>> {
        let url = match entity.filter() {
            None => format!("{}/api/holdings", self.base_url),
            Some(entity) => format!("{}/api/holdings/{}", self.base_url, entity),
        };

        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let payload = Self::read_json(response).await?;

        let holdings: Vec<Holding> = match payload {
            Value::Array(_) => decode(payload)?,
            _ => Vec::new(),
        };

        debug!("Fetched {} holdings for {}", holdings.len(), entity);
        Ok(holdings)
    }

    /// Most recent trades, newest first
    pub async fn get_trades(&self, query: &TradesQuery) -> Result<Vec<Trade>> {
        if query.limit == 0 || query.limit > MAX_TRADES_LIMIT {
            return Err(ApiError::InvalidParameter(format!(
                "limit must be between 1 and {}",
                MAX_TRADES_LIMIT
            )));
        }

        let url = format!("{}/api/trades", self.base_url);
        let params = query.to_query_params();

        debug!("GET {} with {} params", url, params.len());
        let response = self.client.get(&url).query(&params).send().await?;
        let mut payload = Self::read_json(response).await?;

        let rows = match payload.get_mut("rows").map(Value::take) {
            Some(rows @ Value::Array(_)) => decode::<Vec<TradeRow>>(rows)?,
            _ => Vec::new(),
        };

        debug!("Fetched {} trades for {}", rows.len(), query.entity);
        Ok(rows.into_iter().map(Trade::from).collect())
    }

    /// Liveness probe, `true` when the API answers `{"ok": true}`
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let payload = Self::read_json(response).await?;

        Ok(payload.get("ok").and_then(Value::as_bool).unwrap_or(false))
    }

    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::DeserializeFailed(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::DeserializeFailed(e.to_string()))
}

/// API `message` when the body is an error object, else the body, else the status
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(code) = &error.code {
            debug!("API error code: {}", code);
        }
        if !error.message.trim().is_empty() {
            return error.message;
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"code":"bad_request","message":"invalid entity (use 'zurich' or 'new_york')"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "invalid entity (use 'zurich' or 'new_york')"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body_then_status() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, " upstream down\n"), "upstream down");
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, ""),
            "503 Service Unavailable"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = DashboardApiClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_description_uses_api_message() {
        let err = ApiError::ApiError {
            status: 500,
            message: "internal server error".to_string(),
        };
        assert_eq!(err.description(), "internal server error");
        assert_eq!(err.to_string(), "API error (500): internal server error");
    }
}
