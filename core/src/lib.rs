//! # bandroute-core
//!
//! The album model and everything that decides what a path shows:
//! the store and its resolver, the route table, and the navigation
//! transitions that connect them. Protocol-agnostic; HTTP lives in
//! `bandroute-http`.

pub mod album;
pub mod bus;
pub mod draft;
pub mod error;
pub mod navigate;
pub mod outcome;
pub mod route;
pub mod schematic;
pub mod session;
pub mod source;
pub mod store;
pub mod transition;
pub mod view;

pub mod prelude {
    pub use crate::album::Album;
    pub use crate::bus::{Bus, RequestId};
    pub use crate::draft::AlbumDraft;
    pub use crate::error::BandError;
    pub use crate::navigate::{MatchRoute, PageRequest, ResolveView};
    pub use crate::outcome::Outcome;
    pub use crate::route::{Member, Route, RouteTable, album_path};
    pub use crate::schematic::Schematic;
    pub use crate::session::{Session, SharedSession};
    pub use crate::source::{AlbumSource, FixtureSource, JsonFileSource};
    pub use crate::store::{AlbumStore, IdScheme, Resolution, resolve};
    pub use crate::transition::Transition;
    pub use crate::view::View;
}
