use serde::{Deserialize, Serialize};

use crate::route::album_path;

/// One album of the band.
///
/// All three fields are display text. `year` is kept as the string it
/// arrived as and is never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub year: String,
}

impl Album {
    pub fn new(id: impl Into<String>, title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
        }
    }

    /// Path of this album's detail page.
    pub fn detail_path(&self) -> String {
        album_path(&self.id)
    }
}
