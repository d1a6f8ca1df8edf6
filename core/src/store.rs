//! # Album Store
//!
//! An insertion-ordered collection of [`Album`]s owned by one [`Session`].
//! Insertion order is display order. Appending is the only write.
//!
//! [`Session`]: crate::session::Session

use serde::{Deserialize, Serialize};

use crate::album::Album;
use crate::error::BandError;

/// Result of looking an identifier up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Found(&'a Album),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn found(self) -> Option<&'a Album> {
        match self {
            Resolution::Found(album) => Some(album),
            Resolution::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }
}

/// Find the first album whose id equals `candidate_id` exactly.
///
/// `candidate_id` comes straight from a path segment and is compared as-is:
/// no trimming, no case folding, no decoding. When ids collide the album
/// inserted first wins.
pub fn resolve<'a>(albums: &'a [Album], candidate_id: &str) -> Resolution<'a> {
    match albums.iter().find(|album| album.id == candidate_id) {
        Some(album) => Resolution::Found(album),
        None => Resolution::NotFound,
    }
}

/// How [`AlbumStore::create`] picks the id of a new album.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdScheme {
    /// `len + 1` as a decimal string. Only unique while nothing is ever removed.
    #[default]
    Sequential,
    /// A counter above every numeric id seen so far; never hands out an id
    /// twice. Once the counter reaches `u64::MAX` new albums get UUIDs.
    Monotonic,
    /// A random v4 UUID.
    Uuid,
}

impl std::str::FromStr for IdScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(IdScheme::Sequential),
            "monotonic" => Ok(IdScheme::Monotonic),
            "uuid" => Ok(IdScheme::Uuid),
            other => Err(format!(
                "unknown id scheme `{other}` (expected sequential, monotonic or uuid)"
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlbumStore {
    albums: Vec<Album>,
    scheme: IdScheme,
    populated: bool,
    /// Highest numeric id ever issued or observed.
    high_water: u64,
}

impl AlbumStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(scheme: IdScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Load the initial albums. Allowed once per store.
    pub fn populate(&mut self, albums: impl IntoIterator<Item = Album>) -> Result<usize, BandError> {
        if self.populated {
            return Err(BandError::AlreadyPopulated);
        }
        self.populated = true;

        let before = self.albums.len();
        for album in albums {
            self.push(album);
        }
        Ok(self.albums.len() - before)
    }

    pub fn resolve(&self, candidate_id: &str) -> Resolution<'_> {
        resolve(&self.albums, candidate_id)
    }

    /// Append a new album and return it. Title and year are taken verbatim.
    pub fn create(&mut self, title: impl Into<String>, year: impl Into<String>) -> &Album {
        let id = self.next_id();
        let index = self.push(Album::new(id, title, year));
        &self.albums[index]
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Album> {
        self.albums.iter()
    }

    pub fn as_slice(&self) -> &[Album] {
        &self.albums
    }

    fn push(&mut self, album: Album) -> usize {
        if let Ok(n) = album.id.parse::<u64>() {
            self.high_water = self.high_water.max(n);
        }
        self.albums.push(album);
        self.albums.len() - 1
    }

    fn next_id(&mut self) -> String {
        match self.scheme {
            IdScheme::Sequential => (self.albums.len() + 1).to_string(),
            IdScheme::Monotonic => {
                let floor = self.high_water.max(self.albums.len() as u64);
                match floor.checked_add(1) {
                    Some(next) => {
                        self.high_water = next;
                        next.to_string()
                    }
                    None => {
                        tracing::warn!("monotonic album ids exhausted, falling back to uuid");
                        uuid::Uuid::new_v4().to_string()
                    }
                }
            }
            IdScheme::Uuid => uuid::Uuid::new_v4().to_string(),
        }
    }
}

impl<'a> IntoIterator for &'a AlbumStore {
    type Item = &'a Album;
    type IntoIter = std::slice::Iter<'a, Album>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
