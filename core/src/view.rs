use crate::album::Album;
use crate::draft::AlbumDraft;
use crate::route::Member;

/// What a page shows once its route has been resolved against the session.
///
/// Views hold snapshots, so rendering never touches the session lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Member(Member),
    Albums {
        albums: Vec<Album>,
        draft: AlbumDraft,
    },
    AlbumDetail(Album),
    NotFound {
        path: String,
    },
}

impl View {
    pub fn is_not_found(&self) -> bool {
        matches!(self, View::NotFound { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Member(_) => "member",
            View::Albums { .. } => "albums",
            View::AlbumDetail(_) => "album-detail",
            View::NotFound { .. } => "not-found",
        }
    }
}
