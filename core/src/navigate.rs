//! # Navigation Transitions
//!
//! `PageRequest -> MatchRoute -> Route -> ResolveView -> View`
//!
//! `ResolveView` is the only place a path-derived id meets the album store.
//! An id that resolves to nothing yields `View::NotFound`; the chain keeps
//! going and the renderer shows the not-found page.

use async_trait::async_trait;
use std::sync::Arc;

use crate::bus::Bus;
use crate::error::BandError;
use crate::outcome::Outcome;
use crate::route::{Route, RouteTable};
use crate::session::SharedSession;
use crate::store::Resolution;
use crate::transition::Transition;
use crate::view::View;

/// A navigation to `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub path: String,
}

impl PageRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Clone)]
pub struct MatchRoute {
    table: Arc<RouteTable>,
}

impl MatchRoute {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }
}

#[async_trait]
impl Transition<PageRequest, Route> for MatchRoute {
    type Error = BandError;

    async fn run(&self, req: PageRequest, _bus: &mut Bus) -> Outcome<Route, Self::Error> {
        let route = self.table.resolve(&req.path);
        tracing::debug!(path = %req.path, ?route, "Route matched");
        Outcome::Next(route)
    }
}

/// Reads the [`SharedSession`] from the bus.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveView;

#[async_trait]
impl Transition<Route, View> for ResolveView {
    type Error = BandError;

    async fn run(&self, route: Route, bus: &mut Bus) -> Outcome<View, Self::Error> {
        let session = match bus.require::<SharedSession>() {
            Ok(session) => session,
            Err(e) => return Outcome::Fault(e),
        };

        let view = match route {
            Route::Home => View::Home,
            Route::Member(member) => View::Member(member),
            Route::Albums => {
                let guard = session.lock();
                View::Albums {
                    albums: guard.store().as_slice().to_vec(),
                    draft: guard.draft().clone(),
                }
            }
            Route::AlbumDetail { id } => {
                let guard = session.lock();
                match guard.resolve(&id) {
                    Resolution::Found(album) => View::AlbumDetail(album.clone()),
                    Resolution::NotFound => {
                        tracing::debug!(%id, "No album with this id");
                        View::NotFound {
                            path: crate::route::album_path(&id),
                        }
                    }
                }
            }
            Route::NotFound { path } => View::NotFound { path },
        };

        Outcome::Next(view)
    }
}
