//! Song data types.
//!
//! [`SongRecord`] is the row read from the `songs` table. [`SongView`] is what
//! the API hands out: the same metadata with the blob filename replaced by a
//! signed download URL.
//!
//! Title, artist and album may be NULL in the table (a single has no album).
//! They stay `None` and serialize as JSON `null`.

use serde::Serialize;
use sqlx::FromRow;

/// A row of the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SongRecord {
    pub id: i32,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,

    /// Length in seconds
    pub duration: i32,

    /// Object key of the audio file inside the `music` container
    #[sqlx(rename = "filename")]
    pub file_name: String,
}

/// Public projection of a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongView {
    pub id: i32,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: i32,

    /// Read-only signed URL for the audio file
    pub url: String,
}

impl SongView {
    /// Project a record into its public form, dropping the filename.
    pub fn from_record(record: SongRecord, url: String) -> Self {
        Self {
            id: record.id,
            title: record.title,
            artist: record.artist,
            album: record.album,
            duration: record.duration,
            url,
        }
    }
}
