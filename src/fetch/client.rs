//! Browser transport for generation requests.
//!
//! Uses web-sys fetch. The body is read as text so that non-JSON error
//! pages still reach `interpret_reply`.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::orchestrator::HttpReply;
use crate::error::TransportError;
use crate::payload::GenerateRequest;

/// POST `body` as JSON to `url` and return the raw reply.
pub async fn post_json(url: &str, body: &GenerateRequest) -> Result<HttpReply, TransportError> {
    let payload = serde_json::to_string(body).map_err(|e| network(format!("encode error: {e}")))?;

    let headers = Headers::new().map_err(|e| network(format!("headers error: {e:?}")))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| network(format!("headers error: {e:?}")))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_headers(&headers);
    opts.set_body(&JsValue::from_str(&payload));

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|e| network(format!("request error: {e:?}")))?;

    let window = web_sys::window().ok_or_else(|| network("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network(format!("fetch error: {e:?}")))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| network("response is not a Response"))?;

    let text = JsFuture::from(resp.text().map_err(|e| network(format!("text promise error: {e:?}")))?)
        .await
        .map_err(|e| network(format!("text error: {e:?}")))?;

    Ok(HttpReply::new(resp.status(), text.as_string().unwrap_or_default()))
}

fn network(message: impl Into<String>) -> TransportError {
    TransportError::Network(message.into())
}
