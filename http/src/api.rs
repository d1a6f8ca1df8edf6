//! JSON view of the album store.
//!
//! - `GET /api/albums` - every album, in insertion order
//! - `GET /api/albums/{id}` - one album, or `404 {"error":"not_found","id":...}`

use bandroute_core::prelude::*;
use bandroute_core::route;
use http::StatusCode;
use serde::Serialize;

use crate::response::{HttpResponse, json};
use crate::routing::next_segment;

pub const API_ALBUMS_PATH: &str = "/api/albums";

#[derive(Debug, Serialize)]
struct ApiNotFound<'a> {
    error: &'static str,
    id: &'a str,
}

/// Answers `path` if it is [`API_ALBUMS_PATH`] or lies below it. Any other
/// path, `/api/albumsfoo` included, yields `None`.
pub fn albums(path: &str, session: &SharedSession) -> Option<HttpResponse> {
    let rest = match path.strip_prefix(API_ALBUMS_PATH)? {
        "" => return Some(list(session)),
        rest => rest.strip_prefix('/')?,
    };

    let res = match next_segment(rest) {
        ("", None) => list(session),
        (segment, None) => match route::decode_segment(segment) {
            Some(id) => detail(&id, session),
            None => not_found(segment),
        },
        _ => not_found(rest),
    };
    Some(res)
}

fn list(session: &SharedSession) -> HttpResponse {
    let albums = session.lock().store().as_slice().to_vec();
    json(StatusCode::OK, &albums)
}

fn detail(id: &str, session: &SharedSession) -> HttpResponse {
    let guard = session.lock();
    match guard.resolve(id) {
        Resolution::Found(album) => json(StatusCode::OK, album),
        Resolution::NotFound => not_found(id),
    }
}

fn not_found(id: &str) -> HttpResponse {
    json(
        StatusCode::NOT_FOUND,
        &ApiNotFound {
            error: "not_found",
            id,
        },
    )
}
