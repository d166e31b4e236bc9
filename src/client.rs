//! 地址自动补全客户端

use crate::error::{Error, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 地址候选来源
pub trait SuggestionClient {
    /// 按服务排序返回候选描述，可能为空
    fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>>;
}

impl<T: SuggestionClient + ?Sized> SuggestionClient for &T {
    fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>> {
        (**self).fetch_suggestions(query)
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
}

/// 解析自动补全响应体，提取各候选的 `description`
///
/// `status` 缺省或为 `OK` / `ZERO_RESULTS` 时视为成功；
/// `INVALID_REQUEST`（如空查询）视为没有候选。
pub fn parse_predictions(body: &str) -> Result<Vec<String>> {
    let parsed: AutocompleteResponse = serde_json::from_str(body)
        .map_err(|e| Error::Network(format!("malformed autocomplete response: {e}")))?;

    match parsed.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some("INVALID_REQUEST") => return Ok(Vec::new()),
        Some(status) => {
            return Err(Error::Service {
                status: status.to_string(),
                message: parsed.error_message.unwrap_or_default(),
            })
        }
    }

    Ok(parsed
        .predictions
        .into_iter()
        .map(|p| p.description)
        .collect())
}

/// 基于 HTTP 的自动补全客户端
pub struct AutocompleteClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl AutocompleteClient {
    /// 创建客户端
    ///
    /// `timeout` 为 `None` 时请求会一直阻塞直到返回。
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build http client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// 请求端点
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SuggestionClient for AutocompleteClient {
    fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>> {
        debug!(query, "requesting autocomplete");
        let body = self
            .http
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("input", query)])
            .send()?
            .error_for_status()?
            .text()?;

        let predictions = parse_predictions(&body)?;
        debug!(query, count = predictions.len(), "autocomplete answered");
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predictions_in_order() {
        let body = r#"{
            "predictions": [
                {"description": "1 Higuera St, San Luis Obispo, CA, USA", "place_id": "a"},
                {"description": "1 Higuera Rd, Arroyo Grande, CA, USA", "place_id": "b"}
            ],
            "status": "OK"
        }"#;
        let predictions = parse_predictions(body).unwrap();
        assert_eq!(
            predictions,
            vec![
                "1 Higuera St, San Luis Obispo, CA, USA",
                "1 Higuera Rd, Arroyo Grande, CA, USA",
            ]
        );
    }

    #[test]
    fn test_parse_zero_results() {
        let body = r#"{"predictions": [], "status": "ZERO_RESULTS"}"#;
        assert!(parse_predictions(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_without_status() {
        let body = r#"{"predictions": [{"description": "x"}]}"#;
        assert_eq!(parse_predictions(body).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_parse_invalid_request_is_empty() {
        let body = r#"{"predictions": [], "status": "INVALID_REQUEST"}"#;
        assert!(parse_predictions(body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_denied() {
        let body = r#"{
            "error_message": "The provided API key is invalid.",
            "predictions": [],
            "status": "REQUEST_DENIED"
        }"#;
        match parse_predictions(body) {
            Err(Error::Service { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "The provided API key is invalid.");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_predictions("<html>502</html>"),
            Err(Error::Network(_))
        ));
        assert!(matches!(
            parse_predictions(r#"{"predictions": [{"place_id": "a"}]}"#),
            Err(Error::Network(_))
        ));
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = AutocompleteClient::new("http://localhost:9/auto", "k", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/auto");
    }
}
