// Terminal rendering for the departure board
use crate::ndb_formatters::{
    DelayClass, departs_within_5_minutes_in, format_instant, format_time_in, get_actual_departure_time_in,
    get_delay, get_delay_class, get_minutes_until_departure_in,
};
use crate::ndb_models::Departure;
use crate::ndb_store::DepartureStore;
use chrono_tz::Tz;
use std::io::{self, Write};

const WIDTH: usize = 70;
const UNKNOWN_TIME: &str = "--:--";

pub struct NDBViews;

impl NDBViews {
    /// Clear the terminal and draw the whole board
    pub fn show_board(store: &DepartureStore, tz: Tz, max_departures: usize, weather: Option<&serde_json::Value>) {
        print!("\x1B[2J\x1B[1;1H");
        print!("{}", Self::render_board(store, tz, max_departures, weather));
        let _ = io::stdout().flush();
    }

    pub fn render_board(
        store: &DepartureStore,
        tz: Tz,
        max_departures: usize,
        weather: Option<&serde_json::Value>,
    ) -> String {
        let mut lines = Vec::new();

        lines.push("═".repeat(WIDTH));
        lines.push(format!("  🚏 {}", store.stop_name()));
        lines.push(format!("  🕐 Updated {}", store.time_since_update()));
        if let Some(summary) = weather.and_then(Self::weather_summary) {
            lines.push(format!("  🌡️  {}", summary));
        }
        lines.push("═".repeat(WIDTH));

        if store.loading() {
            lines.push("  🔄 Refreshing departures...".to_string());
        }
        if let Some(error) = store.error() {
            lines.push(format!("  ❌ {}", error));
        }

        let departures = store.departures();
        if departures.is_empty() {
            lines.push(String::new());
            lines.push("  ⚠️  No upcoming departures".to_string());
        }

        let now = store.current_time();
        for (i, departure) in departures.iter().take(max_departures).enumerate() {
            if i > 0 {
                lines.push(format!("  {}", "┄".repeat(WIDTH - 4)));
            }
            lines.extend(Self::render_departure(departure, now, tz));
        }

        if departures.len() > max_departures {
            lines.push(String::new());
            lines.push(format!("  ... and {} more departures", departures.len() - max_departures));
        }

        lines.push("═".repeat(WIDTH));
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_departure(departure: &Departure, now: i64, tz: Tz) -> Vec<String> {
        let route = &departure.route;
        let mut header = format!(
            "  {} {:<4} → {}",
            route.transport_mode.icon(),
            route.designation,
            route.destination.name
        );
        let platform = &departure.realtime_platform.designation;
        if !platform.is_empty() {
            header.push_str(&format!("  (Platform {})", platform));
        }

        let scheduled = format_time_in(&departure.scheduled, tz).unwrap_or_else(|e| {
            log::debug!("Unreadable departure time: {}", e);
            UNKNOWN_TIME.to_string()
        });

        let mut timing = format!("     ⏰ {}", scheduled);
        if departure.delay != 0 {
            let actual = get_actual_departure_time_in(&departure.scheduled, departure.delay, tz)
                .map(|t| format_instant(t, tz))
                .unwrap_or_else(|_| UNKNOWN_TIME.to_string());
            timing.push_str(&format!(" → {}", actual));
        }

        // the countdown runs off the realtime estimate
        if let Ok(countdown) = get_minutes_until_departure_in(&departure.realtime, now, tz) {
            timing.push_str(&format!("   in {}", countdown));
        }

        let class = get_delay_class(departure.delay);
        let mut status = format!(
            "     {} {}",
            Self::delay_marker(class),
            Self::colorize_delay(&get_delay(departure.delay), class)
        );
        if departs_within_5_minutes_in(&departure.realtime, now, tz).unwrap_or(false) {
            status.push_str("   ⚡ departing soon");
        }
        if !departure.is_realtime {
            status.push_str("   📅 scheduled");
        }

        vec![header, timing, status]
    }

    /// Temperature line for Open-Meteo shaped documents
    pub fn weather_summary(weather: &serde_json::Value) -> Option<String> {
        if let Some(temperature) = weather["current"]["temperature_2m"].as_f64() {
            let unit = weather["current_units"]["temperature_2m"].as_str().unwrap_or("°C");
            return Some(format!("{:.1}{}", temperature, unit));
        }

        weather["current_weather"]["temperature"]
            .as_f64()
            .map(|temperature| format!("{:.1}°C", temperature))
    }

    fn delay_marker(class: DelayClass) -> &'static str {
        match class {
            DelayClass::OnTime => "🟢",
            DelayClass::Delayed => "🔴",
            DelayClass::Early => "🟡",
        }
    }

    /// Colorize a delay label with ANSI colors keyed on its class
    fn colorize_delay(label: &str, class: DelayClass) -> String {
        let color = match class {
            DelayClass::OnTime => "32",
            DelayClass::Delayed => "31",
            DelayClass::Early => "33",
        };
        format!("\x1b[{}m{}\x1b[0m", color, label)
    }

    /// Network error message
    pub fn network_error(error: &str) {
        println!("\n{}", "═".repeat(60));
        println!("❌ NETWORK ERROR");
        println!("{}", "═".repeat(60));
        println!("\n{}", error);
        println!("\n💡 Troubleshooting:");
        println!("  • Check your internet connection");
        println!("  • Check the departure endpoint URL");
        println!("  • Try again in a few moments");
        println!("\n{}", "═".repeat(60));
    }

    pub fn goodbye_message() {
        println!("\n{}", "═".repeat(60));
        println!("       👋 Departure board stopped");
        println!("{}", "═".repeat(60));
        println!();
    }
}
