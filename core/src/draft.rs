use serde::{Deserialize, Serialize};

/// The "add a new album" form as the user is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumDraft {
    pub title: String,
    pub year: String,
}

impl AlbumDraft {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_year(&mut self, year: impl Into<String>) {
        self.year = year.into();
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.year.is_empty()
    }

    /// Hand back the current values and leave the draft empty.
    pub fn take(&mut self) -> AlbumDraft {
        std::mem::take(self)
    }
}
