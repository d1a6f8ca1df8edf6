use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the album core.
///
/// A lookup that matches no album is deliberately absent here: that is
/// [`Resolution::NotFound`](crate::store::Resolution::NotFound), a normal value.
#[derive(Error, Debug)]
pub enum BandError {
    #[error("album store has already been populated")]
    AlreadyPopulated,
    #[error("failed to read album source {path}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("album source {path} is not a valid album list: {source}")]
    SourceFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("route table rejected a pattern: {0}")]
    RouteConflict(#[from] matchit::InsertError),
    #[error("resource `{0}` is missing from the bus")]
    MissingResource(&'static str),
    #[error("failed to render view: {0}")]
    Render(String),
}
