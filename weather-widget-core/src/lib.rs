//! Core library for the city weather search widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client with typed error classification
//! - A bounded, deduplicated, persisted search history
//! - The controller state machine driving search, unit toggle and history
//!
//! Presentation lives behind the [`RenderSink`] trait; this crate never
//! produces visible output itself. It is used by `weather-widget-cli`,
//! but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod model;
pub mod storage;
pub mod units;

pub use client::{OpenWeatherClient, WeatherClient};
pub use config::Config;
pub use controller::{RenderSink, SearchTicket, ViewModel, ViewState, WeatherController};
pub use error::{ErrorKind, FetchError};
pub use history::HistoryStore;
pub use model::WeatherReading;
pub use storage::{FileStore, MemoryStore, StringStore};
pub use units::{TemperatureUnit, to_fahrenheit};
