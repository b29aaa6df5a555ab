//! Song listing service.
//!
//! Reads the full catalogue over one store connection, signs a download URL
//! for every song, and returns the public views. Signing happens one song at a
//! time in the order the store returned them. Any failure aborts the whole
//! listing; there are no partial results.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::blob::UrlSigner;
use crate::error::ListingError;
use crate::song::SongView;
use crate::store::{SongConnection, SongStore};

/// Assembles the song listing from a store and a URL signer.
pub struct SongListingService<St, Sg> {
    store: St,
    signer: Arc<Sg>,
}

impl<St, Sg> SongListingService<St, Sg>
where
    St: SongStore,
    Sg: UrlSigner,
{
    pub fn new(store: St, signer: Arc<Sg>) -> Self {
        Self { store, signer }
    }

    /// List every song with a freshly signed URL.
    ///
    /// The connection is released on every path once it has been acquired,
    /// including when signing fails part way through.
    pub async fn list_songs(&self) -> Result<Vec<SongView>, ListingError> {
        let mut conn = self.store.acquire().await?;

        let result = self.assemble(&mut conn).await;

        if let Err(e) = conn.release().await {
            warn!("Failed to release database connection: {}", e);
        }

        result
    }

    async fn assemble(&self, conn: &mut St::Connection) -> Result<Vec<SongView>, ListingError> {
        let records = conn.fetch_songs().await?;

        let mut views = Vec::with_capacity(records.len());
        for record in records {
            let signed = self.signer.sign(&record.file_name)?;
            views.push(SongView::from_record(record, signed.url));
        }

        debug!(count = views.len(), "Assembled song listing");
        Ok(views)
    }
}
