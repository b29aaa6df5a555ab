//! Blob storage access.
//!
//! Audio files live in the `music` container of a blob storage account. The
//! API never proxies them; it hands out read-only SAS URLs that are computed
//! locally from the account key in the connection string.
//!
//! ```text
//! ┌──────────────────────────┐
//! │       SasUrlSigner       │  sign("a.mp3") → https://…/music/a.mp3?sv=…&sig=…
//! └────────────┬─────────────┘
//!              │
//!     ┌────────┴────────┐
//!     ▼                 ▼
//! ┌──────────────┐ ┌──────────────┐
//! │BlobConnection│ │   BlobSas    │
//! │ (endpoint,   │ │ (string to   │
//! │  shared key) │ │  sign, HMAC) │
//! └──────────────┘ └──────────────┘
//! ```

mod connection;
mod sas;
mod signer;

pub use connection::{
    BlobConnection, SharedKeyCredential, DEFAULT_ENDPOINT_SUFFIX, DEV_ACCOUNT_KEY,
    DEV_ACCOUNT_NAME, DEV_BLOB_ENDPOINT,
};
pub use sas::{one_month_after, BlobSas, BLOB_RESOURCE, READ_PERMISSION, SAS_VERSION};
pub use signer::{SasUrlSigner, SignedUrl, UrlSigner, MUSIC_CONTAINER};
