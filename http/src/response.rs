use bytes::Bytes;
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

pub type HttpResponse = Response<Full<Bytes>>;

fn with_content_type(status: StatusCode, content_type: &'static str, body: Bytes) -> HttpResponse {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    res.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    res
}

/// Create a text/plain response
pub fn text(status: StatusCode, body: impl Into<Bytes>) -> HttpResponse {
    with_content_type(status, "text/plain; charset=utf-8", body.into())
}

/// Create a text/html response
pub fn html(status: StatusCode, body: impl Into<Bytes>) -> HttpResponse {
    with_content_type(status, "text/html; charset=utf-8", body.into())
}

/// Create a JSON response. Serialization failures become a plain `500`.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(bytes) => with_content_type(status, "application/json", Bytes::from(bytes)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize JSON response");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// `303 See Other`, the answer to a successful form post.
pub fn see_other(location: &'static str) -> HttpResponse {
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::SEE_OTHER;
    res.headers_mut()
        .insert(LOCATION, HeaderValue::from_static(location));
    res
}
