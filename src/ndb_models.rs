// Data model and error types for the Next Departure Board
//
// The bus endpoint returns a departure snapshot for one stop area:
//   { "timestamp": ..., "query": {...}, "stops": [...], "departures": [...] }
// Every fetch replaces the whole snapshot; nothing here is normalized or merged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub designation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportMode {
    Bus,
    Tram,
    #[serde(other)]
    Other,
}

impl TransportMode {
    pub fn icon(self) -> &'static str {
        match self {
            TransportMode::Bus => "🚌",
            TransportMode::Tram => "🚊",
            TransportMode::Other => "🚏",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub name: Option<String>,
    pub designation: String,
    pub transport_mode_code: i64,
    pub transport_mode: TransportMode,
    pub direction: String,
    pub origin: Place,
    pub destination: Place,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    pub start_date: String,
    pub technical_number: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: String,
    pub name: String,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub transport_modes: Vec<String>,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    pub scheduled: String,
    pub realtime: String,
    /// Seconds behind schedule; negative when running early.
    pub delay: i64,
    pub canceled: bool,
    pub route: Route,
    pub trip: Trip,
    pub agency: Agency,
    pub stop: Stop,
    pub scheduled_platform: Platform,
    pub realtime_platform: Platform,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
    #[serde(default)]
    pub is_realtime: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "queryTime")]
    pub query_time: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusApiResponse {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub query: Query,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub departures: Vec<Departure>,
}

// ============================================================================
// Error Handling
// ============================================================================

/// Which endpoint a fetch was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCategory {
    Bus,
    Weather,
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCategory::Bus => write!(f, "bus"),
            DataCategory::Weather => write!(f, "weather"),
        }
    }
}

#[derive(Debug, Error)]
pub enum NDBError {
    /// The endpoint answered with a non-success status. Status and body are dropped.
    #[error("Failed to fetch {0} data")]
    FetchFailed(DataCategory),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    #[error("Delay out of range: {0}s")]
    DelayOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, NDBError>;
