// Next Departure Board: real-time departures for a single bus or tram stop
//
// Fetch a stop snapshot, push it into a `DepartureStore`, and read the derived
// rows and labels back out. The formatters can be used on their own.

pub mod ndb_api;
pub mod ndb_config;
pub mod ndb_controllers;
pub mod ndb_formatters;
pub mod ndb_models;
pub mod ndb_store;
pub mod ndb_views;

#[cfg(test)]
mod ndb_test_fixtures;

pub use ndb_api::NDBApi;
pub use ndb_models::{BusApiResponse, DataCategory, Departure, NDBError, Result};
pub use ndb_store::DepartureStore;
