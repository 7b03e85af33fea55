use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::TransportError;

/// Issue a single GET and decode the JSON body.
///
/// Non-2xx responses, timeouts and undecodable bodies all surface as
/// `TransportError`; nothing is retried.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, String)],
    timeout: Duration,
) -> Result<T, TransportError> {
    tracing::debug!(url, ?query, "sending request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| classify(url, timeout, e))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| classify(url, timeout, e))?;

    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status,
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body).map_err(|source| TransportError::Decode {
        url: url.to_string(),
        source,
    })
}

fn classify(url: &str, timeout: Duration, source: reqwest::Error) -> TransportError {
    if source.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            source,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept() {
        assert_eq!(truncate_body("bad gateway"), "bad gateway");
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundaries() {
        let body = "é".repeat(250);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }
}
