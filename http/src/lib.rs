//! # bandroute-http
//!
//! Serves the band site over HTTP/1.1 on Hyper 1.0. Every `GET` runs the
//! page circuit; the add-album form posts back to `/albums`.

pub mod api;
pub mod form;
pub mod ingress;
pub mod render;
pub mod response;
pub mod routing;

pub use ingress::{HttpIngress, IngressService, page_circuit};
pub use render::{Page, RenderPage};

pub mod prelude {
    pub use crate::form::{AlbumForm, FormError};
    pub use crate::ingress::{DEFAULT_ADDR, DEFAULT_BODY_LIMIT, HttpIngress, IngressService};
    pub use crate::render::{Page, RenderPage, render};
    pub use crate::response::{html, json, see_other, text};
    pub use crate::routing::next_segment;
}
