use serde::{Deserialize, Serialize};

/// One of the two tools exposed to an agent host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Weather,
    CurrentTime,
}

impl ToolKind {
    /// Name the host uses to call the tool.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Weather => "get_weather",
            ToolKind::CurrentTime => "get_current_time",
        }
    }

    pub const fn all() -> &'static [ToolKind] {
        &[ToolKind::Weather, ToolKind::CurrentTime]
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Weather => "Retrieves the current weather report for a specified US city.",
            ToolKind::CurrentTime => "Returns the current time in a specified US city.",
        }
    }

    /// Noun used in "Failed to retrieve <subject> for ..." messages.
    pub fn subject(&self) -> &'static str {
        match self {
            ToolKind::Weather => "weather",
            ToolKind::CurrentTime => "time",
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "get_weather" => Ok(ToolKind::Weather),
            "get_current_time" => Ok(ToolKind::CurrentTime),
            _ => Err(anyhow::anyhow!(
                "Unknown tool '{value}'. Supported tools: get_weather, get_current_time."
            )),
        }
    }
}

/// First geocoding candidate for a city query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub resolved_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Only the time tool needs it, so a candidate without one still geocodes.
    pub timezone_id: Option<String>,
}

/// Coarse two-way mapping of WMO weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    CloudyOrPrecipitation,
}

impl WeatherCondition {
    /// Code 0 is clear sky; every other code (or none at all) is lumped together.
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Clear,
            _ => Self::CloudyOrPrecipitation,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::CloudyOrPrecipitation => "Cloudy or Precipitation",
        }
    }
}

/// Current reading at a resolved location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature_f: f64,
    pub temperature_c: f64,
    pub condition_code: Option<i64>,
    pub condition: WeatherCondition,
}

impl WeatherSample {
    pub fn from_fahrenheit(temperature_f: f64, condition_code: Option<i64>) -> Self {
        Self {
            temperature_f,
            temperature_c: fahrenheit_to_celsius(temperature_f),
            condition_code,
            condition: WeatherCondition::from_code(condition_code),
        }
    }

    pub fn describe(&self, resolved_name: &str) -> String {
        format!(
            "The weather in {resolved_name} is {} with a temperature of {:.1}°C ({}°F).",
            self.condition.label(),
            self.temperature_c,
            display_float(self.temperature_f),
        )
    }
}

/// Celsius rounded to one decimal place.
pub fn fahrenheit_to_celsius(temperature_f: f64) -> f64 {
    ((temperature_f - 32.0) * 5.0 / 9.0 * 10.0).round() / 10.0
}

/// Shortest float representation, keeping a trailing `.0` on whole numbers.
fn display_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Uniform result handed back to the agent host by every tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Success { report: String },
    Error { error_message: String },
}

impl Report {
    pub fn success(report: impl Into<String>) -> Self {
        Report::Success {
            report: report.into(),
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Report::Error {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Report::Success { .. })
    }

    pub fn report(&self) -> Option<&str> {
        match self {
            Report::Success { report } => Some(report),
            Report::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Report::Success { .. } => None,
            Report::Error { error_message } => Some(error_message),
        }
    }
}
