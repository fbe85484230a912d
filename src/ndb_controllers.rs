// Controller for the Next Departure Board: polling, clock ticks and redraws
use crate::ndb_api::NDBApi;
use crate::ndb_config::NDBConfig;
use crate::ndb_models::{BusApiResponse, Result};
use crate::ndb_store::DepartureStore;
use crate::ndb_views::NDBViews;
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

pub struct NDBControllers;

impl NDBControllers {
    /// Main application loop
    pub async fn run(config: NDBConfig) -> anyhow::Result<()> {
        config.validate()?;
        let tz = config.timezone()?;
        let api = NDBApi::new()?;

        log::info!(
            "Departure board for {} (refresh every {}s, tz {})",
            config.bus_url,
            config.refresh_secs,
            tz
        );

        let mut store = DepartureStore::default();
        let mut weather: Option<serde_json::Value> = None;

        Self::refresh(&api, &config, &mut store, &mut weather, |_, _| {}).await;

        if config.once {
            if let Some(error) = store.error() {
                NDBViews::network_error(error);
                anyhow::bail!("{}", error);
            }
            print!("{}", NDBViews::render_board(&store, tz, config.max_departures, weather.as_ref()));
            return Ok(());
        }

        NDBViews::show_board(&store, tz, config.max_departures, weather.as_ref());

        let mut refresh = time::interval(config.refresh_interval());
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately and the board is already fresh
        refresh.tick().await;

        let mut tick = time::interval(config.tick_interval());
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = refresh.tick() => {
                    Self::refresh(&api, &config, &mut store, &mut weather, |store, weather| {
                        NDBViews::show_board(store, tz, config.max_departures, weather)
                    })
                    .await;
                }
                _ = tick.tick() => {
                    store.set_current_time(Utc::now().timestamp_millis());
                }
                result = &mut shutdown => {
                    if let Err(e) = result {
                        log::warn!("Could not listen for Ctrl-C: {}", e);
                    }
                    NDBViews::goodbye_message();
                    return Ok(());
                }
            }

            NDBViews::show_board(&store, tz, config.max_departures, weather.as_ref());
        }
    }

    /// One fetch cycle. Failures land in the store's error slot and the
    /// previous snapshot stays on screen.
    ///
    /// `on_loading` sees the store once `loading` is set, before any request
    /// is sent, so the board can show the refresh in progress.
    pub async fn refresh(
        api: &NDBApi,
        config: &NDBConfig,
        store: &mut DepartureStore,
        weather: &mut Option<serde_json::Value>,
        on_loading: impl FnOnce(&DepartureStore, Option<&serde_json::Value>),
    ) {
        store.set_loading(true);
        on_loading(store, weather.as_ref());

        let timeout = config.request_timeout();
        let bus_fetch = Self::with_timeout(timeout, api.fetch_bus_data(&config.bus_url));
        let weather_fetch = async {
            match &config.weather_url {
                Some(url) => Some(Self::with_timeout(timeout, api.fetch_weather_data(url)).await),
                None => None,
            }
        };

        let (bus_result, weather_result) = futures::join!(bus_fetch, weather_fetch);

        Self::apply_bus_result(store, bus_result);

        match weather_result {
            Some(Ok(document)) => *weather = Some(document),
            Some(Err(e)) => log::warn!("Weather refresh failed: {}", e),
            None => {}
        }

        store.set_loading(false);
        store.set_current_time(Utc::now().timestamp_millis());
    }

    fn apply_bus_result(store: &mut DepartureStore, result: anyhow::Result<BusApiResponse>) {
        match result {
            Ok(data) => {
                log::debug!(
                    "Loaded {} departures for {} stop(s)",
                    data.departures.len(),
                    data.stops.len()
                );
                store.set_bus_data(Some(data));
                store.set_error(None);
            }
            Err(e) => {
                log::warn!("Departure refresh failed: {}", e);
                store.set_error(Some(e.to_string()));
            }
        }
    }

    async fn with_timeout<T>(limit: Duration, fetch: impl Future<Output = Result<T>>) -> anyhow::Result<T> {
        match time::timeout(limit, fetch).await {
            Ok(result) => Ok(result?),
            Err(_) => anyhow::bail!("Request timed out after {}s", limit.as_secs()),
        }
    }
}
