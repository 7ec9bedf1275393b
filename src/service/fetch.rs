//! Retryable JSON fetcher.
//!
//! Issues an HTTP GET through the gateway port, parses the body as a JSON
//! object, and retries a bounded number of times for communication-class
//! failures only. Transient infrastructure hiccups are worth a bounded
//! wait-and-retry; application-level contract violations must surface
//! immediately.

use serde_json::{Map, Value};
use tokio::time::sleep;
use tracing::warn;
use url::Url;

use crate::config::Timing;
use crate::error::FetchError;
use crate::port::{GatewayResponse, HttpGateway};

/// Appended to every request so nodes answer in JSON.
const JSON_FORMAT_PARAM: (&str, &str) = ("wt", "json");

/// GET `url` and parse the response body as a JSON object, making at most
/// `max_attempts` attempts.
///
/// Only communication-class transport failures consume the retry budget;
/// everything else propagates on the first attempt. Sleeps `retry_delay`
/// between attempts but never after the final one.
pub async fn fetch_json(
    gateway: &dyn HttpGateway,
    url: &str,
    max_attempts: u32,
    timing: &Timing,
) -> Result<Map<String, Value>, FetchError> {
    let mut request_url = Url::parse(url).map_err(|e| FetchError::Protocol {
        url: url.to_string(),
        reason: format!("invalid URL: {e}"),
    })?;
    request_url
        .query_pairs_mut()
        .append_pair(JSON_FORMAT_PARAM.0, JSON_FORMAT_PARAM.1);

    let max_attempts = max_attempts.max(1);
    let mut attempts_left = max_attempts;
    loop {
        match gateway.get(&request_url).await {
            Ok(response) => return decode(&request_url, &response),
            Err(source) => {
                if !source.is_communication() {
                    return Err(FetchError::Protocol {
                        url: request_url.to_string(),
                        reason: source.to_string(),
                    });
                }
                attempts_left -= 1;
                if attempts_left == 0 {
                    return Err(FetchError::Communication {
                        url: request_url.to_string(),
                        attempts: max_attempts,
                        source,
                    });
                }
                warn!(
                    url = %request_url,
                    error = %source,
                    delay_secs = timing.retry_delay.as_secs(),
                    "request failed, retrying"
                );
                sleep(timing.retry_delay).await;
            }
        }
    }
}

fn decode(url: &Url, response: &GatewayResponse) -> Result<Map<String, Value>, FetchError> {
    if !response.is_success() {
        return Err(FetchError::Protocol {
            url: url.to_string(),
            reason: format!("unexpected HTTP status {}", response.status),
        });
    }
    if response.body.is_empty() {
        return Err(FetchError::Protocol {
            url: url.to_string(),
            reason: format!("empty response body with HTTP status {}", response.status),
        });
    }
    let value: Value =
        serde_json::from_slice(&response.body).map_err(|e| FetchError::Protocol {
            url: url.to_string(),
            reason: format!("response body is not valid JSON: {e}"),
        })?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(FetchError::Protocol {
            url: url.to_string(),
            reason: format!("expected JSON object in response but received {other}"),
        }),
    }
}
