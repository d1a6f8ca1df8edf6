//! HTML rendering of [`View`]s.
//!
//! Templates live in `templates/` and are compiled in by askama, which
//! escapes every interpolated value.

use askama::Template;
use async_trait::async_trait;
use bandroute_core::prelude::*;
use http::StatusCode;

/// A rendered page, ready to become a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "member.html")]
struct MemberTemplate {
    name: &'static str,
    instrument: &'static str,
}

#[derive(Template)]
#[template(path = "albums.html")]
struct AlbumsTemplate<'a> {
    albums: &'a [Album],
    draft: &'a AlbumDraft,
}

#[derive(Template)]
#[template(path = "album.html")]
struct AlbumTemplate<'a> {
    album: &'a Album,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    path: &'a str,
}

/// Render `view`. The not-found view is the only one served as `404`.
pub fn render(view: &View) -> Result<Page, BandError> {
    let body = match view {
        View::Home => HomeTemplate.render(),
        View::Member(member) => MemberTemplate {
            name: member.name(),
            instrument: member.instrument(),
        }
        .render(),
        View::Albums { albums, draft } => AlbumsTemplate { albums, draft }.render(),
        View::AlbumDetail(album) => AlbumTemplate { album }.render(),
        View::NotFound { path } => NotFoundTemplate { path }.render(),
    }
    .map_err(|e| BandError::Render(e.to_string()))?;

    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    Ok(Page { status, body })
}

/// Last step of the page circuit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderPage;

#[async_trait]
impl Transition<View, Page> for RenderPage {
    type Error = BandError;

    async fn run(&self, view: View, _bus: &mut Bus) -> Outcome<Page, Self::Error> {
        tracing::debug!(view = view.name(), "Rendering view");
        render(&view).into()
    }
}
