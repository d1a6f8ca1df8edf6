//! Session state
//!
//! A [`Session`] owns the album store and the add-album draft for the life of
//! the process. It is created once, wrapped in a [`SharedSession`] and handed
//! to the ingress; nothing reaches it through a global.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::album::Album;
use crate::draft::AlbumDraft;
use crate::error::BandError;
use crate::source::AlbumSource;
use crate::store::{AlbumStore, IdScheme, Resolution};

/// Handle shared by every request.
///
/// Guards are only held for synchronous reads and appends, never across an
/// `.await`, so requests observe the store one at a time.
pub type SharedSession = Arc<Mutex<Session>>;

#[derive(Debug, Default)]
pub struct Session {
    store: AlbumStore,
    draft: AlbumDraft,
}

impl Session {
    pub fn new(store: AlbumStore) -> Self {
        Self {
            store,
            draft: AlbumDraft::default(),
        }
    }

    /// Build a session whose store is populated from `source`.
    pub async fn bootstrap(source: &dyn AlbumSource, scheme: IdScheme) -> Result<Self, BandError> {
        let albums = source.fetch().await?;
        let mut store = AlbumStore::with_scheme(scheme);
        let loaded = store.populate(albums)?;
        tracing::info!(source = source.name(), loaded, ?scheme, "Album store populated");
        Ok(Self::new(store))
    }

    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn store(&self) -> &AlbumStore {
        &self.store
    }

    pub fn draft(&self) -> &AlbumDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut AlbumDraft {
        &mut self.draft
    }

    pub fn resolve(&self, candidate_id: &str) -> Resolution<'_> {
        self.store.resolve(candidate_id)
    }

    pub fn create_album(&mut self, title: impl Into<String>, year: impl Into<String>) -> &Album {
        self.store.create(title, year)
    }

    /// Turn the draft into an album and clear the form.
    pub fn submit_draft(&mut self) -> &Album {
        let AlbumDraft { title, year } = self.draft.take();
        let album = self.store.create(title, year);
        tracing::info!(id = %album.id, title = %album.title, "Album created");
        album
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;

    #[tokio::test]
    async fn bootstrap_populates_from_source() {
        let session = Session::bootstrap(&FixtureSource, IdScheme::Sequential)
            .await
            .unwrap();
        assert_eq!(session.store().len(), 4);
        assert!(session.draft().is_blank());
    }

    #[tokio::test]
    async fn submit_draft_appends_and_resets() {
        let mut session = Session::bootstrap(&FixtureSource, IdScheme::Sequential)
            .await
            .unwrap();
        session.draft_mut().set_title("Heaven and Hell");
        session.draft_mut().set_year("1980");

        let created = session.submit_draft().clone();

        assert_eq!(created, Album::new("5", "Heaven and Hell", "1980"));
        assert!(session.draft().is_blank());
        assert_eq!(session.resolve("5").found(), Some(&created));
    }

    #[test]
    fn shared_session_sees_appends() {
        let shared = Session::default().shared();
        shared.lock().create_album("Never Say Die!", "1978");

        let guard = shared.lock();
        assert_eq!(guard.store().len(), 1);
        assert_eq!(guard.resolve("1").found().map(|a| a.year.as_str()), Some("1978"));
    }
}
