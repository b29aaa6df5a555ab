//! Relational song store.
//!
//! Every listing works on its own connection: [`SongStore::acquire`] opens it,
//! [`SongConnection::release`] closes it. Connections also close when dropped,
//! so an early return cannot leak one.
//!
//! # Usage
//!
//! ```ignore
//! use music_api::store::{PgSongStore, SongConnection, SongStore};
//!
//! let store = PgSongStore::from_connection_string("postgres://music@localhost/music")?;
//! let mut conn = store.acquire().await?;
//! let songs = conn.fetch_songs().await;
//! conn.release().await?;
//! ```

mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::song::SongRecord;

pub use postgres::{PgSongConnection, PgSongStore, SELECT_ALL_SONGS};

/// Opens connections to the song table.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Connection type handed out by this store.
    type Connection: SongConnection;

    /// Open a new connection.
    async fn acquire(&self) -> Result<Self::Connection, StoreError>;
}

/// One open connection to the song table.
#[async_trait]
pub trait SongConnection: Send {
    /// Read every song, in the order the database returns them.
    async fn fetch_songs(&mut self) -> Result<Vec<SongRecord>, StoreError>;

    /// Close the connection.
    async fn release(self) -> Result<(), StoreError>;
}
