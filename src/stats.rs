//! Dashboard statistics
//!
//! The four live counters, the page elements they render into, and the
//! decision of which counters to animate after a fetch.

use std::fmt;

use crate::api::DashboardStats;
use crate::format::parse_int_prefix;

/// Attribute marking an element as a live counter
pub const STAT_ATTRIBUTE: &str = "data-stat";

/// A recognized dashboard counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKey {
    TotalSchools,
    ActiveSensors,
    ActiveAlerts,
    CriticalAlerts,
}

impl StatKey {
    pub const ALL: [StatKey; 4] = [
        StatKey::TotalSchools,
        StatKey::ActiveSensors,
        StatKey::ActiveAlerts,
        StatKey::CriticalAlerts,
    ];

    /// Value of the `data-stat` attribute in the markup
    pub fn attribute_value(self) -> &'static str {
        match self {
            StatKey::TotalSchools => "total-escolas",
            StatKey::ActiveSensors => "sensores-ativos",
            StatKey::ActiveAlerts => "alertas-ativos",
            StatKey::CriticalAlerts => "alertas-criticos",
        }
    }

    /// Field name in the stats JSON
    pub fn json_field(self) -> &'static str {
        match self {
            StatKey::TotalSchools => "totalEscolas",
            StatKey::ActiveSensors => "sensoresAtivos",
            StatKey::ActiveAlerts => "alertasAtivos",
            StatKey::CriticalAlerts => "alertasCriticos",
        }
    }

    /// CSS selector for the counter's element
    pub fn selector(self) -> String {
        format!("[{}=\"{}\"]", STAT_ATTRIBUTE, self.attribute_value())
    }

    pub fn from_attribute(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.attribute_value() == value)
    }

    /// Counter value in a snapshot, if the server sent it
    pub fn value_in(self, stats: &DashboardStats) -> Option<f64> {
        match self {
            StatKey::TotalSchools => stats.total_escolas,
            StatKey::ActiveSensors => stats.sensores_ativos,
            StatKey::ActiveAlerts => stats.alertas_ativos,
            StatKey::CriticalAlerts => stats.alertas_criticos,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_value())
    }
}

/// Read/write access to the rendered counters.
///
/// `stat_text` returns `None` when the page has no element for the key.
pub trait StatsView {
    fn stat_text(&self, key: StatKey) -> Option<String>;
    fn set_stat_text(&self, key: StatKey, text: &str);
}

/// One counter to tween from its displayed value to the fetched one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatUpdate {
    pub key: StatKey,
    pub from: f64,
    pub to: f64,
}

/// Decide which counters to animate.
///
/// A key is planned only when it is present in both the snapshot and the
/// page. A displayed text without a leading integer starts the tween at 0.
pub fn plan_updates<V: StatsView + ?Sized>(stats: &DashboardStats, view: &V) -> Vec<StatUpdate> {
    StatKey::ALL
        .into_iter()
        .filter_map(|key| {
            let to = key.value_in(stats).filter(|v| v.is_finite())?;
            let shown = view.stat_text(key)?;
            let from = parse_int_prefix(&shown).map(|v| v as f64).unwrap_or(0.0);
            Some(StatUpdate { key, from, to })
        })
        .collect()
}
