// Command line and environment configuration
use anyhow::{Context, bail};
use chrono_tz::Tz;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "ndb", version, about = "Real-time departure board for a bus or tram stop")]
pub struct NDBConfig {
    /// Departure endpoint returning a stop snapshot as JSON
    #[arg(long, env = "NDB_BUS_URL")]
    pub bus_url: String,

    /// Weather endpoint (Open-Meteo style JSON); weather is hidden when unset
    #[arg(long, env = "NDB_WEATHER_URL")]
    pub weather_url: Option<String>,

    /// Seconds between departure refreshes
    #[arg(long, env = "NDB_REFRESH_SECS", default_value_t = 30)]
    pub refresh_secs: u64,

    /// Milliseconds between clock ticks
    #[arg(long, env = "NDB_TICK_MILLIS", default_value_t = 1000)]
    pub tick_millis: u64,

    /// IANA time zone used for offset-less timestamps and for display
    #[arg(long, env = "NDB_TIMEZONE", default_value = "Europe/Stockholm")]
    pub timezone: String,

    /// Number of departure rows to render
    #[arg(long, env = "NDB_MAX_DEPARTURES", default_value_t = 10)]
    pub max_departures: usize,

    /// Give up on a refresh after this many seconds
    #[arg(long, env = "NDB_REQUEST_TIMEOUT_SECS", default_value_t = 15)]
    pub request_timeout_secs: u64,

    /// Render one snapshot and exit
    #[arg(long)]
    pub once: bool,
}

impl NDBConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.refresh_secs == 0 {
            bail!("refresh interval must be at least one second");
        }
        if self.tick_millis == 0 {
            bail!("tick interval must be at least one millisecond");
        }
        if self.request_timeout_secs == 0 {
            bail!("request timeout must be at least one second");
        }
        self.timezone()?;
        Ok(())
    }

    pub fn timezone(&self) -> anyhow::Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("unknown time zone '{}'", self.timezone))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
