// Board state: the latest snapshot plus the values the board derives from it
//
// Four slots are written by the caller (snapshot, loading, error, clock).
// Four values are derived from them and recomputed inside the setters, so they
// are current as soon as a setter returns.

use crate::ndb_formatters::parse_timestamp;
use crate::ndb_models::{BusApiResponse, Departure};
use chrono::{DateTime, Utc};

pub const FALLBACK_STOP_NAME: &str = "Bus Stop";

// ============================================================================
// Derivations
// ============================================================================

/// Departures that still run, in API order.
pub fn derive_departures(data: Option<&BusApiResponse>) -> Vec<Departure> {
    data.map(|d| d.departures.iter().filter(|dep| !dep.canceled).cloned().collect())
        .unwrap_or_default()
}

pub fn derive_stop_name(data: Option<&BusApiResponse>) -> String {
    data.and_then(|d| d.stops.first())
        .map(|stop| stop.name.clone())
        .unwrap_or_else(|| FALLBACK_STOP_NAME.to_string())
}

pub fn derive_last_updated(data: Option<&BusApiResponse>) -> Option<DateTime<Utc>> {
    let timestamp = data?.timestamp.as_deref().filter(|t| !t.is_empty())?;

    match parse_timestamp(timestamp) {
        Ok(instant) => Some(instant),
        Err(e) => {
            log::warn!("Ignoring snapshot timestamp: {}", e);
            None
        }
    }
}

/// "never", "just now", "45s ago", "1m ago", "12m ago" or "3h ago".
pub fn time_since_last_update(last_updated: Option<DateTime<Utc>>, current_time_ms: i64) -> String {
    let Some(last_updated) = last_updated else {
        return "never".to_string();
    };

    let diff_ms = current_time_ms.saturating_sub(last_updated.timestamp_millis());
    let diff_seconds = diff_ms.div_euclid(1000);
    if diff_seconds < 1 {
        return "just now".to_string();
    }
    if diff_seconds < 60 {
        return format!("{}s ago", diff_seconds);
    }

    let diff_minutes = diff_ms.div_euclid(60_000);
    if diff_minutes == 1 {
        return "1m ago".to_string();
    }
    if diff_minutes < 60 {
        return format!("{}m ago", diff_minutes);
    }

    format!("{}h ago", diff_minutes / 60)
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone)]
pub struct DepartureStore {
    bus_data: Option<BusApiResponse>,
    loading: bool,
    error: Option<String>,
    current_time: i64,

    departures: Vec<Departure>,
    stop_name: String,
    last_updated: Option<DateTime<Utc>>,
    time_since_update: String,
}

impl Default for DepartureStore {
    fn default() -> Self {
        Self::new(Utc::now().timestamp_millis())
    }
}

impl DepartureStore {
    pub fn new(current_time_ms: i64) -> Self {
        let mut store = DepartureStore {
            bus_data: None,
            loading: false,
            error: None,
            current_time: current_time_ms,
            departures: Vec::new(),
            stop_name: String::new(),
            last_updated: None,
            time_since_update: String::new(),
        };
        store.recompute_from_data();
        store
    }

    // ------------------------------------------------------------------
    // Writable slots
    // ------------------------------------------------------------------

    pub fn set_bus_data(&mut self, data: Option<BusApiResponse>) {
        self.bus_data = data;
        self.recompute_from_data();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_current_time(&mut self, current_time_ms: i64) {
        self.current_time = current_time_ms;
        self.recompute_time_since_update();
    }

    pub fn bus_data(&self) -> Option<&BusApiResponse> {
        self.bus_data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    pub fn departures(&self) -> &[Departure] {
        &self.departures
    }

    pub fn stop_name(&self) -> &str {
        &self.stop_name
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn time_since_update(&self) -> &str {
        &self.time_since_update
    }

    fn recompute_from_data(&mut self) {
        let data = self.bus_data.as_ref();
        self.departures = derive_departures(data);
        self.stop_name = derive_stop_name(data);
        self.last_updated = derive_last_updated(data);
        self.recompute_time_since_update();
    }

    fn recompute_time_since_update(&mut self) {
        self.time_since_update = time_since_last_update(self.last_updated, self.current_time);
    }
}
