use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::model::{Report, ToolKind};

/// Failure talking to one of the upstream HTTP services.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything that can go wrong while answering a single tool call.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Could not find location for '{city}'.")]
    NotFound { city: String },

    #[error("Weather information for '{city}' is not available.")]
    DataUnavailable { city: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unknown timezone identifier '{0}'")]
    InvalidTimezone(String),

    #[error("no timezone returned for '{resolved_name}'")]
    MissingTimezone { resolved_name: String },
}

impl LookupError {
    /// Collapse the error into the error Report returned by `tool`.
    ///
    /// `NotFound` and `DataUnavailable` already read as user-facing sentences;
    /// anything else is prefixed with the tool subject and the queried city.
    pub fn into_report(self, tool: ToolKind, city: &str) -> Report {
        match self {
            LookupError::NotFound { .. } | LookupError::DataUnavailable { .. } => {
                Report::failure(self.to_string())
            }
            other => Report::failure(format!(
                "Failed to retrieve {} for '{city}': {other}",
                tool.subject()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_own_message() {
        for tool in ToolKind::all() {
            let report = LookupError::NotFound {
                city: "Nonexistentville".into(),
            }
            .into_report(*tool, "Nonexistentville");

            assert_eq!(
                report.error_message(),
                Some("Could not find location for 'Nonexistentville'.")
            );
        }
    }

    #[test]
    fn data_unavailable_keeps_its_own_message() {
        let report = LookupError::DataUnavailable {
            city: "Boise".into(),
        }
        .into_report(ToolKind::Weather, "Boise");

        assert_eq!(
            report.error_message(),
            Some("Weather information for 'Boise' is not available.")
        );
    }

    #[test]
    fn transport_errors_are_prefixed_per_tool() {
        let timeout = || {
            LookupError::from(TransportError::Timeout {
                url: "http://geo.test/v1/search".into(),
                timeout: Duration::from_secs(5),
            })
        };

        let weather = timeout().into_report(ToolKind::Weather, "Seattle");
        assert_eq!(
            weather.error_message(),
            Some(
                "Failed to retrieve weather for 'Seattle': \
                 request to http://geo.test/v1/search timed out after 5s"
            )
        );

        let time = timeout().into_report(ToolKind::CurrentTime, "Seattle");
        assert!(
            time.error_message()
                .unwrap()
                .starts_with("Failed to retrieve time for 'Seattle': ")
        );
    }

    #[test]
    fn invalid_timezone_is_prefixed() {
        let report = LookupError::InvalidTimezone("Mars/Olympus_Mons".into())
            .into_report(ToolKind::CurrentTime, "Springfield");

        assert_eq!(
            report.error_message(),
            Some(
                "Failed to retrieve time for 'Springfield': \
                 unknown timezone identifier 'Mars/Olympus_Mons'"
            )
        );
    }

    #[test]
    fn missing_timezone_is_prefixed() {
        let report = LookupError::MissingTimezone {
            resolved_name: "Springfield".into(),
        }
        .into_report(ToolKind::CurrentTime, "springfield");

        assert_eq!(
            report.error_message(),
            Some("Failed to retrieve time for 'springfield': no timezone returned for 'Springfield'")
        );
    }
}
