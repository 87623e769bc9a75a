//! Fetch client for the availability check.
//!
//! One endpoint, one call shape: `POST /check-availability` with a JSON
//! [`AvailabilityRequest`] body. The returned future is driven on the
//! browser event loop via `wasm_bindgen_futures`; the caller decides
//! whether a late response is still relevant.

use std::fmt;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::{AvailabilityRequest, AvailabilityResponse};

/// Path of the availability endpoint, relative to the page origin.
pub const CHECK_AVAILABILITY_PATH: &str = "/check-availability";

/// Failure of a single availability call. All variants render the same
/// error panel; the distinction exists for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be built or encoded.
    Request(String),
    /// The fetch itself rejected (offline, DNS, CORS).
    Network(String),
    /// The response body was not the expected JSON shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(msg) => write!(f, "failed to build request: {}", msg),
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "unexpected response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Readable message out of a JS exception value.
fn describe(err: JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// POST the identifier pair and decode the backend's answer.
///
/// The HTTP status is deliberately not inspected: the backend always
/// answers 200 with `success` in the body, and anything else fails JSON
/// decoding and surfaces as [`ApiError::Decode`].
pub async fn check_availability(
    req: &AvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let body =
        serde_json::to_string(req).map_err(|e| ApiError::Request(e.to_string()))?;
    debug!("checking availability: {}", body);

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(CHECK_AVAILABILITY_PATH, &opts)
        .map_err(|e| ApiError::Request(describe(e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| ApiError::Request(describe(e)))?;

    let window = gloo_utils::window();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(describe(e)))?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Decode("fetch did not yield a Response".to_string()))?;

    let json_promise = resp.json().map_err(|e| ApiError::Decode(describe(e)))?;
    let json = JsFuture::from(json_promise)
        .await
        .map_err(|e| ApiError::Decode(describe(e)))?;
    serde_wasm_bindgen::from_value(json).map_err(|e| ApiError::Decode(e.to_string()))
}
