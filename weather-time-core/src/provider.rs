use crate::model::{Report, ToolKind};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Capability consumed by an agent host: both tools, always answering with a `Report`.
///
/// Implementations must never fail or panic; every error is folded into
/// `Report::Error`.
#[async_trait]
pub trait WeatherTimeProvider: Send + Sync + Debug {
    async fn get_weather(&self, city: &str) -> Report;

    async fn get_current_time(&self, city: &str) -> Report;

    /// Run the tool identified by `tool`.
    async fn invoke(&self, tool: ToolKind, city: &str) -> Report {
        match tool {
            ToolKind::Weather => self.get_weather(city).await,
            ToolKind::CurrentTime => self.get_current_time(city).await,
        }
    }
}
