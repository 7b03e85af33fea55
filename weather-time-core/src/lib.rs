//! Core library for the `weather-time` tools.
//!
//! This crate defines:
//! - Configuration of the upstream endpoints
//! - Geocoding of US city names (Open-Meteo)
//! - The `get_weather` and `get_current_time` tools behind the
//!   [`WeatherTimeProvider`] trait
//! - The manifest and dispatcher an agent host uses to call them
//!
//! It is used by `weather-time-cli`, but can also be embedded by any agent host.

pub mod agent;
pub mod config;
pub mod error;
pub mod geocode;
mod http;
pub mod local_time;
pub mod model;
pub mod provider;

pub use agent::{AgentManifest, ToolDeclaration, dispatch};
pub use config::Config;
pub use error::{LookupError, TransportError};
pub use geocode::Geocoder;
pub use model::{GeoResult, Report, ToolKind, WeatherCondition, WeatherSample};
pub use provider::{OpenMeteoProvider, WeatherTimeProvider};
