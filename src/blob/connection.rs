//! Blob storage connection strings.
//!
//! Parses the `Key=Value;Key=Value` connection strings issued by Azure Storage
//! into a blob endpoint and, when an account key is present, a shared-key
//! credential that can sign SAS URLs locally.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::SigningError;

// =============================================================================
// Constants
// =============================================================================

/// Endpoint suffix used when the connection string does not name one.
pub const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// Account name of the local storage emulator (Azurite).
pub const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";

/// Well-known, publicly documented account key of the local storage emulator.
pub const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";

/// Blob endpoint of the local storage emulator.
pub const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

// =============================================================================
// Shared Key Credential
// =============================================================================

/// Storage account name plus decoded account key.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedKeyCredential {
    account_name: String,
    key: Vec<u8>,
}

impl SharedKeyCredential {
    /// Build a credential from an account name and a base64 account key.
    pub fn new(
        account_name: impl Into<String>,
        account_key: &str,
    ) -> Result<Self, SigningError> {
        let key = STANDARD.decode(account_key.trim()).map_err(|e| {
            SigningError::InvalidConnectionString(format!("AccountKey is not valid base64: {}", e))
        })?;

        if key.is_empty() {
            return Err(SigningError::InvalidConnectionString(
                "AccountKey is empty".to_string(),
            ));
        }

        Ok(Self {
            account_name: account_name.into(),
            key,
        })
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub(crate) fn key(&self) -> &[u8] {
        &self.key
    }
}

impl fmt::Debug for SharedKeyCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedKeyCredential")
            .field("account_name", &self.account_name)
            .field("key", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Blob Connection
// =============================================================================

/// Parsed blob storage connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobConnection {
    /// Blob service endpoint without a trailing slash
    endpoint: String,

    /// Present only when the connection string carries an account key
    credential: Option<SharedKeyCredential>,
}

impl BlobConnection {
    /// Parse a connection string.
    pub fn parse(connection_string: &str) -> Result<Self, SigningError> {
        let settings = parse_settings(connection_string)?;

        if settings
            .get("usedevelopmentstorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(Self::development());
        }

        let account_name = settings.get("accountname").cloned();

        let endpoint = match (settings.get("blobendpoint"), &account_name) {
            (Some(endpoint), _) => endpoint.trim_end_matches('/').to_string(),
            (None, Some(account)) => {
                let protocol = settings
                    .get("defaultendpointsprotocol")
                    .map(String::as_str)
                    .unwrap_or("https");
                let suffix = settings
                    .get("endpointsuffix")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_ENDPOINT_SUFFIX);
                format!("{}://{}.blob.{}", protocol, account, suffix)
            }
            (None, None) => {
                return Err(SigningError::InvalidConnectionString(
                    "missing AccountName or BlobEndpoint".to_string(),
                ))
            }
        };

        let credential = match settings.get("accountkey") {
            Some(key) => {
                let account = account_name.ok_or_else(|| {
                    SigningError::InvalidConnectionString(
                        "AccountKey given without AccountName".to_string(),
                    )
                })?;
                Some(SharedKeyCredential::new(account, key)?)
            }
            None => None,
        };

        Ok(Self {
            endpoint,
            credential,
        })
    }

    /// Connection to the local storage emulator.
    pub fn development() -> Self {
        Self {
            endpoint: DEV_BLOB_ENDPOINT.to_string(),
            credential: SharedKeyCredential::new(DEV_ACCOUNT_NAME, DEV_ACCOUNT_KEY).ok(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credential(&self) -> Option<&SharedKeyCredential> {
        self.credential.as_ref()
    }

    /// Whether SAS URLs can be computed locally.
    pub fn can_generate_sas(&self) -> bool {
        self.credential.is_some()
    }
}

impl FromStr for BlobConnection {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split a connection string into lowercase keys and raw values.
fn parse_settings(connection_string: &str) -> Result<HashMap<String, String>, SigningError> {
    let mut settings = HashMap::new();

    for part in connection_string.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        // Values such as base64 keys contain '=', so only split on the first one.
        let (key, value) = part.split_once('=').ok_or_else(|| {
            SigningError::InvalidConnectionString(format!("expected Key=Value, got '{}'", part))
        })?;

        settings.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    if settings.is_empty() {
        return Err(SigningError::InvalidConnectionString(
            "connection string is empty".to_string(),
        ));
    }

    Ok(settings)
}
