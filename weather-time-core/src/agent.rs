//! What an agent host needs to register and call the tools.
//!
//! The host owns the model and the conversation; this module only describes
//! the tools and routes a host's call to a [`WeatherTimeProvider`].

use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    model::{Report, ToolKind},
    provider::WeatherTimeProvider,
};

pub const AGENT_NAME: &str = "weather_time_agent";
pub const AGENT_MODEL: &str = "gemini-2.0-flash";
pub const AGENT_DESCRIPTION: &str =
    "Agent to answer questions about the time and weather in any US city.";
pub const AGENT_INSTRUCTION: &str =
    "You are a helpful agent who can answer user questions about the time and weather in any US city.";

/// Function declaration handed to the host for one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

impl From<ToolKind> for ToolDeclaration {
    fn from(tool: ToolKind) -> Self {
        Self {
            name: tool.as_str(),
            description: tool.description(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": format!(
                            "The name of the city for which to retrieve the {}.",
                            tool.subject()
                        )
                    }
                },
                "required": ["city"]
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentManifest {
    pub name: &'static str,
    pub model: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
    pub tools: Vec<ToolDeclaration>,
}

impl Default for AgentManifest {
    fn default() -> Self {
        Self {
            name: AGENT_NAME,
            model: AGENT_MODEL,
            description: AGENT_DESCRIPTION,
            instruction: AGENT_INSTRUCTION,
            tools: ToolKind::all().iter().copied().map(ToolDeclaration::from).collect(),
        }
    }
}

/// Route a host tool call to `provider`.
///
/// Bad tool names and bad arguments come back as error Reports, like any
/// other failure.
pub async fn dispatch(provider: &dyn WeatherTimeProvider, tool_name: &str, args: &Value) -> Report {
    let tool = match ToolKind::try_from(tool_name) {
        Ok(tool) => tool,
        Err(err) => return Report::failure(err.to_string()),
    };

    let city = match args.get("city").and_then(Value::as_str).map(str::trim) {
        Some(city) if !city.is_empty() => city,
        _ => {
            return Report::failure(format!(
                "Missing required string argument 'city' for tool '{tool}'."
            ));
        }
    };

    tracing::debug!(%tool, city, "dispatching tool call");
    provider.invoke(tool, city).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct EchoProvider;

    #[async_trait]
    impl WeatherTimeProvider for EchoProvider {
        async fn get_weather(&self, city: &str) -> Report {
            Report::success(format!("weather:{city}"))
        }

        async fn get_current_time(&self, city: &str) -> Report {
            Report::success(format!("time:{city}"))
        }
    }

    #[test]
    fn manifest_declares_both_tools() {
        let manifest = AgentManifest::default();

        assert_eq!(manifest.name, "weather_time_agent");
        let names: Vec<_> = manifest.tools.iter().map(|t| t.name).collect();
        assert_eq!(names, ["get_weather", "get_current_time"]);

        for tool in &manifest.tools {
            assert_eq!(tool.parameters["required"], json!(["city"]));
            assert_eq!(tool.parameters["properties"]["city"]["type"], "string");
        }
    }

    #[test]
    fn manifest_serializes_to_json() {
        let value = serde_json::to_value(AgentManifest::default()).unwrap();

        assert_eq!(value["model"], "gemini-2.0-flash");
        assert_eq!(value["tools"][1]["name"], "get_current_time");
    }

    #[tokio::test]
    async fn dispatch_routes_by_tool_name() {
        let weather = dispatch(&EchoProvider, "get_weather", &json!({ "city": "Austin" })).await;
        assert_eq!(weather.report(), Some("weather:Austin"));

        let time = dispatch(&EchoProvider, "get_current_time", &json!({ "city": " Austin " })).await;
        assert_eq!(time.report(), Some("time:Austin"));
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_tool() {
        let report = dispatch(&EchoProvider, "get_tides", &json!({ "city": "Austin" })).await;

        assert!(report.error_message().unwrap().contains("Unknown tool 'get_tides'"));
    }

    #[tokio::test]
    async fn dispatch_rejects_missing_or_blank_city() {
        for args in [json!({}), json!({ "city": 42 }), json!({ "city": "   " }), json!(null)] {
            let report = dispatch(&EchoProvider, "get_weather", &args).await;
            assert_eq!(
                report.error_message(),
                Some("Missing required string argument 'city' for tool 'get_weather'.")
            );
        }
    }
}
