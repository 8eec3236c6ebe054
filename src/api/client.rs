//! HTTP API Client
//!
//! Minimal JSON-fetch wrapper over `reqwest` (which compiles down to the
//! browser's `fetch` on wasm32). Every request carries the default JSON
//! headers; a non-2xx status becomes [`ApiError::Http`].

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::dto::{Alert, AlertQuery, DashboardStats, Page, School, SchoolQuery};
use super::error::{ApiError, ApiResult};
use crate::config::MonitorConfig;
use crate::refresh::StatsSource;

/// List endpoint for schools
pub const SCHOOLS_ENDPOINT: &str = "/escolas/api";
/// List endpoint for alerts
pub const ALERTS_ENDPOINT: &str = "/alertas/api";

/// JSON API client bound to the page origin
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    stats_endpoint: String,
}

impl ApiClient {
    /// Create a client for the given origin (e.g. `https://monitor.example.org`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            stats_endpoint: MonitorConfig::default().stats_endpoint,
        }
    }

    /// Create a client using the configured statistics endpoint
    pub fn from_config(base_url: impl Into<String>, config: &MonitorConfig) -> Self {
        let mut client = Self::new(base_url);
        client.stats_endpoint = config.stats_endpoint.clone();
        client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve an endpoint against the base URL; absolute URLs pass through
    pub fn url(&self, endpoint: &str) -> ApiResult<String> {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return Ok(endpoint.to_string());
        }
        if !endpoint.starts_with('/') {
            return Err(ApiError::InvalidUrl(endpoint.to_string()));
        }
        Ok(format!("{}{}", self.base_url, endpoint))
    }

    /// GET an endpoint and decode its JSON body
    pub async fn call<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let url = self.url(endpoint)?;

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch schools; parameters are passed through verbatim
    pub async fn get_schools<I, K, V>(&self, params: I) -> ApiResult<Page<School>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.call(&with_query(SCHOOLS_ENDPOINT, params)).await
    }

    /// Fetch alerts; parameters are passed through verbatim
    pub async fn get_alerts<I, K, V>(&self, params: I) -> ApiResult<Page<Alert>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.call(&with_query(ALERTS_ENDPOINT, params)).await
    }

    pub async fn search_schools(&self, query: &SchoolQuery) -> ApiResult<Page<School>> {
        self.get_schools(query.to_params()).await
    }

    pub async fn search_alerts(&self, query: &AlertQuery) -> ApiResult<Page<Alert>> {
        self.get_alerts(query.to_params()).await
    }

    /// Fetch the dashboard counters
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.call(&self.stats_endpoint).await
    }
}

#[async_trait(?Send)]
impl StatsSource for ApiClient {
    async fn fetch_stats(&self) -> ApiResult<DashboardStats> {
        self.dashboard_stats().await
    }
}

/// Append a URL-encoded query string to an endpoint
pub fn with_query<I, K, V>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = params
        .into_iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{}?{}", endpoint, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_with_query_encodes() {
        let url = with_query("/escolas/api", [("nome", "São Paulo"), ("page", "0")]);
        assert_eq!(url, "/escolas/api?nome=S%C3%A3o%20Paulo&page=0");
    }

    #[test]
    fn test_with_query_empty() {
        let params: Vec<(String, String)> = Vec::new();
        assert_eq!(with_query("/alertas/api", params), "/alertas/api");
    }

    #[test]
    fn test_url_resolution() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(
            client.url("/api/dashboard/stats").unwrap(),
            "http://localhost:8080/api/dashboard/stats"
        );
        assert_eq!(
            client.url("https://other.example/x").unwrap(),
            "https://other.example/x"
        );
        assert!(matches!(
            client.url("relative"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_call_sends_json_headers() {
        let router = Router::new().route(
            "/echo",
            get(|headers: HeaderMap| async move {
                Json(json!({
                    "contentType": headers.get("content-type").and_then(|v| v.to_str().ok()),
                    "requestedWith": headers.get("x-requested-with").and_then(|v| v.to_str().ok()),
                }))
            }),
        );
        let client = ApiClient::new(spawn_server(router).await);

        let body: serde_json::Value = client.call("/echo").await.unwrap();
        assert_eq!(body["contentType"], "application/json");
        assert_eq!(body["requestedWith"], "XMLHttpRequest");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let router = Router::new().route(
            "/api/dashboard/stats",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"totalEscolas": 1}))) }),
        );
        let client = ApiClient::new(spawn_server(router).await);

        let err = client.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 500 }));
    }

    #[tokio::test]
    async fn test_bad_json_is_parse_error() {
        let router = Router::new().route("/api/dashboard/stats", get(|| async { "not json" }));
        let client = ApiClient::new(spawn_server(router).await);

        let err = client.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_network_failure_propagates() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{}", addr));
        let err = client.dashboard_stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_get_schools_passes_params() {
        let router = Router::new().route(
            "/escolas/api",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let nome = params.get("nome").cloned().unwrap_or_default();
                Json(json!({
                    "content": [{"id": 1, "nome": nome, "cidade": "Campinas", "estado": "SP"}],
                    "totalElements": 1,
                    "totalPages": 1,
                    "number": 0,
                    "size": 10
                }))
            }),
        );
        let client = ApiClient::new(spawn_server(router).await);

        let page = client
            .search_schools(&SchoolQuery::new().name("Escola Estadual"))
            .await
            .unwrap();
        assert_eq!(page.content[0].nome, "Escola Estadual");
    }

    #[tokio::test]
    async fn test_get_alerts() {
        let router = Router::new().route(
            "/alertas/api",
            get(|| async {
                Json(json!({
                    "content": [{
                        "id": 3,
                        "tipo": "Umidade Baixa",
                        "mensagem": "Umidade em 18%",
                        "nivel": "Alto",
                        "status": "Resolvido"
                    }],
                    "totalElements": 1,
                    "totalPages": 1,
                    "number": 0,
                    "size": 10
                }))
            }),
        );
        let client = ApiClient::new(spawn_server(router).await);

        let page = client.get_alerts([("status", "Resolvido")]).await.unwrap();
        assert_eq!(page.content[0].status.to_string(), "Resolvido");
        assert!(!page.content[0].is_critical_active());
    }
}
