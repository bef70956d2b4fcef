use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use keyring::{Entry, Error as KeyringError};
use zeroize::Zeroizing;

const KEYRING_ACCOUNT: &str = "token";
const KEYRING_SERVICE: &str = "com.alfred-jira.settings";

/// Opaque storage for the encoded tracker credential.
pub trait CredentialVault {
    fn save_token(&self, token: &str) -> Result<(), String>;
}

/// Encodes `user:password` as standard base64 of its UTF-8 bytes, the form
/// the tracker expects in a basic-auth header.
pub fn encode_credentials(user: &str, password: &str) -> Zeroizing<String> {
    let joined = Zeroizing::new(format!("{user}:{password}"));
    Zeroizing::new(BASE64_STANDARD.encode(joined.as_bytes()))
}

/// Vault backed by the platform keyring.
#[derive(Clone)]
pub struct KeyringVault {
    service: String,
}

impl KeyringVault {
    pub fn new(service: Option<&str>) -> Self {
        let service = service
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(KEYRING_SERVICE);
        Self {
            service: service.to_string(),
        }
    }

    /// Whether a token is currently stored.
    pub fn has_token(&self) -> Result<bool, String> {
        match self.entry()?.get_password() {
            Ok(_) => Ok(true),
            Err(KeyringError::NoEntry) => Ok(false),
            Err(err) => Err(format!("Failed to read token from keyring: {err}")),
        }
    }

    fn entry(&self) -> Result<Entry, String> {
        Entry::new(&self.service, KEYRING_ACCOUNT)
            .map_err(|err| format!("Failed to open keyring entry: {err}"))
    }
}

impl CredentialVault for KeyringVault {
    fn save_token(&self, token: &str) -> Result<(), String> {
        if token.trim().is_empty() {
            return Err("Token must not be empty".into());
        }
        self.entry()?
            .set_password(token)
            .map_err(|err| format!("Failed to store token in keyring: {err}"))
    }
}
