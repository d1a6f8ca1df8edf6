//! The add-album form as posted by the browser.

use bandroute_core::draft::AlbumDraft;
use bytes::Bytes;
use http::StatusCode;
use http_body::Body;
use http_body_util::{BodyExt, LengthLimitError, Limited};
use serde::Deserialize;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fields missing from the body leave the draft untouched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct AlbumForm {
    pub title: Option<String>,
    pub year: Option<String>,
}

impl AlbumForm {
    pub fn apply(self, draft: &mut AlbumDraft) {
        if let Some(title) = self.title {
            draft.set_title(title);
        }
        if let Some(year) = self.year {
            draft.set_year(year);
        }
    }
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("request body exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("malformed form body: {0}")]
    Malformed(#[from] serde_urlencoded::de::Error),
}

impl FormError {
    pub fn status(&self) -> StatusCode {
        match self {
            FormError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            FormError::Body(_) | FormError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Collect at most `limit` bytes of `body` and decode them as a urlencoded form.
pub async fn read_form<B>(body: B, limit: usize) -> Result<AlbumForm, FormError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let collected = Limited::new(body, limit).collect().await.map_err(|e| {
        if e.downcast_ref::<LengthLimitError>().is_some() {
            FormError::TooLarge { limit }
        } else {
            FormError::Body(e.to_string())
        }
    })?;

    Ok(serde_urlencoded::from_bytes(&collected.to_bytes())?)
}
