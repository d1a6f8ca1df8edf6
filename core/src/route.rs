//! Route table
//!
//! | pattern                   | route                       |
//! |---------------------------|-----------------------------|
//! | `/`                       | [`Route::Home`]             |
//! | `/vocals` `/guitar` `/bass` `/drums` | [`Route::Member`] |
//! | `/albums`                 | [`Route::Albums`]           |
//! | `/albums/new-album/{id}`  | [`Route::AlbumDetail`]      |
//! | anything else             | [`Route::NotFound`]         |
//!
//! Matching is exact. Ids are percent-encoded into a single path segment
//! by [`album_path`] and decoded again when the `{id}` segment is matched,
//! so any string id survives the trip from the list to its detail page.

use serde::Serialize;

use crate::error::BandError;

/// Prefix of every album detail path.
pub const ALBUM_DETAIL_PREFIX: &str = "/albums/new-album/";

/// Path of the detail page for `id`, encoded as one path segment.
pub fn album_path(id: &str) -> String {
    format!("{ALBUM_DETAIL_PREFIX}{}", urlencoding::encode(id))
}

/// Inverse of the encoding in [`album_path`]. `None` if the decoded bytes
/// are not UTF-8.
pub fn decode_segment(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|id| id.into_owned())
}

/// The four band members, each with a page of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Member {
    Vocals,
    Guitar,
    Bass,
    Drums,
}

impl Member {
    pub const ALL: [Member; 4] = [Member::Vocals, Member::Guitar, Member::Bass, Member::Drums];

    pub fn path(&self) -> &'static str {
        match self {
            Member::Vocals => "/vocals",
            Member::Guitar => "/guitar",
            Member::Bass => "/bass",
            Member::Drums => "/drums",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Member::Vocals => "Ozzy Osbourne",
            Member::Guitar => "Tony Iommi",
            Member::Bass => "Geezer Butler",
            Member::Drums => "Bill Ward",
        }
    }

    /// Navigation bar label.
    pub fn instrument(&self) -> &'static str {
        match self {
            Member::Vocals => "Vocals",
            Member::Guitar => "Guitar",
            Member::Bass => "Bass",
            Member::Drums => "Drums",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Member(Member),
    Albums,
    AlbumDetail { id: String },
    NotFound { path: String },
}

#[derive(Debug, Clone, Copy)]
enum RouteKind {
    Home,
    Member(Member),
    Albums,
    AlbumDetail,
}

const ID_PARAM: &str = "id";

pub struct RouteTable {
    router: matchit::Router<RouteKind>,
}

impl RouteTable {
    /// The site's routes.
    pub fn standard() -> Result<Self, BandError> {
        let mut router = matchit::Router::new();
        router.insert("/", RouteKind::Home)?;
        for member in Member::ALL {
            router.insert(member.path(), RouteKind::Member(member))?;
        }
        router.insert("/albums", RouteKind::Albums)?;
        router.insert(
            format!("{ALBUM_DETAIL_PREFIX}{{{ID_PARAM}}}"),
            RouteKind::AlbumDetail,
        )?;
        Ok(Self { router })
    }

    /// Match `path`. Unmatched paths fall through to [`Route::NotFound`].
    pub fn resolve(&self, path: &str) -> Route {
        let Ok(matched) = self.router.at(path) else {
            return Route::NotFound {
                path: path.to_string(),
            };
        };

        match *matched.value {
            RouteKind::Home => Route::Home,
            RouteKind::Member(member) => Route::Member(member),
            RouteKind::Albums => Route::Albums,
            RouteKind::AlbumDetail => {
                match matched.params.get(ID_PARAM).and_then(decode_segment) {
                    Some(id) => Route::AlbumDetail { id },
                    None => Route::NotFound {
                        path: path.to_string(),
                    },
                }
            }
        }
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable").finish_non_exhaustive()
    }
}
