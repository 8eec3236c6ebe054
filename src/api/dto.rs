//! Data Transfer Objects
//!
//! JSON payloads served by the monitor's backend and the query parameter
//! builders for its list endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================
// DASHBOARD DTOs
// ============================================

/// Counters returned by `GET /api/dashboard/stats`.
///
/// Every field is optional; an absent counter is simply not rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_escolas: Option<f64>,
    #[serde(default)]
    pub sensores_ativos: Option<f64>,
    #[serde(default)]
    pub alertas_ativos: Option<f64>,
    #[serde(default)]
    pub alertas_criticos: Option<f64>,
}

// ============================================
// LIST DTOs
// ============================================

/// One page of a paged listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.total_pages == 0 || self.number + 1 >= self.total_pages
    }
}

/// A monitored school
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: i64,
    pub nome: String,
    pub cidade: String,
    /// Two-letter state code
    pub estado: String,
    #[serde(default = "default_true")]
    pub ativo: bool,
    #[serde(default)]
    pub data_criacao: Option<NaiveDateTime>,
    #[serde(default)]
    pub data_atualizacao: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

/// A climate alert raised for a sensor reading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub tipo: String,
    pub mensagem: String,
    pub nivel: AlertLevel,
    pub status: AlertStatus,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

impl Alert {
    /// Critical alerts that are not yet closed
    pub fn is_critical_active(&self) -> bool {
        self.nivel == AlertLevel::Critical && self.status.is_active()
    }
}

/// Alert severity, carried on the wire as its Portuguese label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
    Other(String),
}

impl From<String> for AlertLevel {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Baixo" => AlertLevel::Low,
            "Médio" => AlertLevel::Medium,
            "Alto" => AlertLevel::High,
            "Crítico" => AlertLevel::Critical,
            _ => AlertLevel::Other(label),
        }
    }
}

impl From<AlertLevel> for String {
    fn from(level: AlertLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Low => write!(f, "Baixo"),
            AlertLevel::Medium => write!(f, "Médio"),
            AlertLevel::High => write!(f, "Alto"),
            AlertLevel::Critical => write!(f, "Crítico"),
            AlertLevel::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Alert lifecycle status, carried on the wire as its Portuguese label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertStatus {
    Issued,
    Viewed,
    InProgress,
    Resolved,
    Cancelled,
    Other(String),
}

impl AlertStatus {
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AlertStatus::Issued | AlertStatus::Viewed | AlertStatus::InProgress
        )
    }
}

impl From<String> for AlertStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Emitido" => AlertStatus::Issued,
            "Visualizado" => AlertStatus::Viewed,
            "Em Andamento" => AlertStatus::InProgress,
            "Resolvido" => AlertStatus::Resolved,
            "Cancelado" => AlertStatus::Cancelled,
            _ => AlertStatus::Other(label),
        }
    }
}

impl From<AlertStatus> for String {
    fn from(status: AlertStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertStatus::Issued => write!(f, "Emitido"),
            AlertStatus::Viewed => write!(f, "Visualizado"),
            AlertStatus::InProgress => write!(f, "Em Andamento"),
            AlertStatus::Resolved => write!(f, "Resolvido"),
            AlertStatus::Cancelled => write!(f, "Cancelado"),
            AlertStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

// ============================================
// QUERY PARAMETERS
// ============================================

/// Sort direction for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Filters accepted by `/escolas/api`
#[derive(Debug, Clone, Default)]
pub struct SchoolQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub nome: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub ativo: Option<bool>,
}

impl SchoolQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(field.into());
        self.direction = Some(direction);
        self
    }

    pub fn name(mut self, nome: impl Into<String>) -> Self {
        self.nome = Some(nome.into());
        self
    }

    pub fn city(mut self, cidade: impl Into<String>) -> Self {
        self.cidade = Some(cidade.into());
        self
    }

    pub fn state(mut self, estado: impl Into<String>) -> Self {
        self.estado = Some(estado.into());
        self
    }

    pub fn active(mut self, ativo: bool) -> Self {
        self.ativo = Some(ativo);
        self
    }

    /// Parameters in a stable order, unset filters omitted
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "page", self.page);
        push_opt(&mut params, "size", self.size);
        push_opt(&mut params, "sort", self.sort.as_ref());
        push_opt(&mut params, "direction", self.direction.map(SortDirection::as_str));
        push_opt(&mut params, "nome", self.nome.as_ref());
        push_opt(&mut params, "cidade", self.cidade.as_ref());
        push_opt(&mut params, "estado", self.estado.as_ref());
        push_opt(&mut params, "ativo", self.ativo);
        params
    }
}

/// Filters accepted by `/alertas/api`
#[derive(Debug, Clone, Default)]
pub struct AlertQuery {
    pub tipo: Option<String>,
    pub nivel: Option<AlertLevel>,
    pub status: Option<AlertStatus>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl AlertQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, tipo: impl Into<String>) -> Self {
        self.tipo = Some(tipo.into());
        self
    }

    pub fn level(mut self, nivel: AlertLevel) -> Self {
        self.nivel = Some(nivel);
        self
    }

    pub fn status(mut self, status: AlertStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: u32, size: u32) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "tipo", self.tipo.as_ref());
        push_opt(&mut params, "nivel", self.nivel.as_ref());
        push_opt(&mut params, "status", self.status.as_ref());
        push_opt(&mut params, "page", self.page);
        push_opt(&mut params, "size", self.size);
        params
    }
}

fn push_opt<T: ToString>(params: &mut Vec<(String, String)>, key: &str, value: Option<T>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_partial_payload() {
        let stats: DashboardStats =
            serde_json::from_str(r#"{"totalEscolas": 12, "alertasCriticos": 1}"#).unwrap();
        assert_eq!(stats.total_escolas, Some(12.0));
        assert_eq!(stats.sensores_ativos, None);
        assert_eq!(stats.alertas_criticos, Some(1.0));
    }

    #[test]
    fn test_alert_labels() {
        let alert: Alert = serde_json::from_str(
            r#"{
                "id": 7,
                "tipo": "Calor Extremo",
                "mensagem": "Temperatura acima de 35°C",
                "nivel": "Crítico",
                "status": "Emitido",
                "timestamp": "2024-03-05T14:07:00"
            }"#,
        )
        .unwrap();

        assert_eq!(alert.nivel, AlertLevel::Critical);
        assert_eq!(alert.status, AlertStatus::Issued);
        assert!(alert.is_critical_active());
        assert!(alert.timestamp.is_some());
    }

    #[test]
    fn test_unknown_label_preserved() {
        let level = AlertLevel::from("Extremo".to_string());
        assert_eq!(level, AlertLevel::Other("Extremo".to_string()));
        assert_eq!(level.to_string(), "Extremo");
    }

    #[test]
    fn test_school_page() {
        let page: Page<School> = serde_json::from_str(
            r#"{
                "content": [{"id": 1, "nome": "EE Centro", "cidade": "Recife", "estado": "PE"}],
                "totalElements": 1,
                "totalPages": 1,
                "number": 0,
                "size": 10
            }"#,
        )
        .unwrap();

        assert_eq!(page.content.len(), 1);
        assert!(page.content[0].ativo);
        assert!(page.is_last());
    }

    #[test]
    fn test_school_query_params() {
        let params = SchoolQuery::new()
            .page(2, 20)
            .sort("cidade", SortDirection::Desc)
            .state("SP")
            .active(true)
            .to_params();

        assert_eq!(
            params,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "20".to_string()),
                ("sort".to_string(), "cidade".to_string()),
                ("direction".to_string(), "desc".to_string()),
                ("estado".to_string(), "SP".to_string()),
                ("ativo".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_alert_query_params() {
        let params = AlertQuery::new()
            .level(AlertLevel::Critical)
            .status(AlertStatus::InProgress)
            .to_params();

        assert_eq!(params[0], ("nivel".to_string(), "Crítico".to_string()));
        assert_eq!(params[1], ("status".to_string(), "Em Andamento".to_string()));
    }
}
