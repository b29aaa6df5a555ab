//! Signed download URLs for songs.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::debug;

use super::connection::BlobConnection;
use super::sas::{one_month_after, BlobSas};
use crate::error::SigningError;

/// Container holding every audio file.
pub const MUSIC_CONTAINER: &str = "music";

/// A signed URL and the moment it stops working, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedUrl {
    pub url: String,
    pub expires_on: DateTime<Utc>,
}

/// Produces time-limited read-only URLs for blobs.
pub trait UrlSigner: Send + Sync {
    /// Sign `file_name` with an explicit expiry.
    fn sign_with_expiry(
        &self,
        file_name: &str,
        expires_on: DateTime<Utc>,
    ) -> Result<SignedUrl, SigningError>;

    /// Sign `file_name`, valid for one calendar month from now.
    fn sign(&self, file_name: &str) -> Result<SignedUrl, SigningError> {
        self.sign_with_expiry(file_name, one_month_after(Utc::now()))
    }
}

/// Signs URLs locally with the account key from a blob connection string.
#[derive(Debug, Clone)]
pub struct SasUrlSigner {
    connection: Arc<BlobConnection>,
    container: String,
}

impl SasUrlSigner {
    /// Create a signer for the `music` container.
    pub fn new(connection: Arc<BlobConnection>) -> Self {
        Self {
            connection,
            container: MUSIC_CONTAINER.to_string(),
        }
    }

    /// Parse a connection string and create a signer for it.
    pub fn from_connection_string(connection_string: &str) -> Result<Self, SigningError> {
        Ok(Self::new(Arc::new(BlobConnection::parse(connection_string)?)))
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Whether this signer holds a shared key.
    pub fn can_generate_sas(&self) -> bool {
        self.connection.can_generate_sas()
    }

    /// Unsigned URL of a blob. Each path segment is percent-encoded.
    pub fn blob_url(&self, file_name: &str) -> String {
        let path = file_name
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!("{}/{}/{}", self.connection.endpoint(), self.container, path)
    }
}

impl UrlSigner for SasUrlSigner {
    fn sign_with_expiry(
        &self,
        file_name: &str,
        expires_on: DateTime<Utc>,
    ) -> Result<SignedUrl, SigningError> {
        if file_name.is_empty() {
            return Err(SigningError::Record {
                file_name: String::new(),
                reason: "blob name is empty".to_string(),
            });
        }

        let credential = self
            .connection
            .credential()
            .ok_or(SigningError::Unavailable)?;

        // `se` carries whole seconds only
        let expires_on = expires_on.trunc_subsecs(0);
        let sas = BlobSas::read_only(&self.container, file_name, expires_on);
        let url = format!("{}?{}", self.blob_url(file_name), sas.to_query(credential));

        debug!(blob = file_name, expires_on = %sas.expiry(), "Signed blob URL");

        Ok(SignedUrl { url, expires_on })
    }
}
