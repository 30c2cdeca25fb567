//! Signing key blocks attached to every published binary.
//!
//! A run signs its checksum lists with one GPG key. The key is resolved once
//! by the caller as a [`PgpSigningKey`] and attached to each binary's
//! [`SigningKeys`] block, which already holds a list so that key rotation can
//! add entries without touching the merge logic.

use serde::{Deserialize, Serialize};

/// The public half of the key that signed a run's checksum lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgpSigningKey {
    /// Key identifier (fingerprint) as passed to `gpg --export`.
    pub key_id: String,
    /// ASCII-armoured public key text.
    pub ascii_armor: String,
}

impl PgpSigningKey {
    /// Create a signing key from its identifier and armoured text.
    #[must_use]
    pub fn new(key_id: impl Into<String>, ascii_armor: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            ascii_armor: ascii_armor.into(),
        }
    }
}

/// One entry of `signing_keys.gpg_public_keys` in a download document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpgPublicKey {
    /// Key identifier.
    pub key_id: String,
    /// ASCII-armoured public key.
    pub ascii_armor: String,
    /// Optional trust signature; empty when unused.
    #[serde(default)]
    pub trust_signature: String,
    /// Optional name of the key's issuer; empty when unused.
    #[serde(default)]
    pub source: String,
    /// Optional URL describing the key's issuer.
    #[serde(default)]
    pub source_url: Option<String>,
}

impl From<&PgpSigningKey> for GpgPublicKey {
    fn from(key: &PgpSigningKey) -> Self {
        Self {
            key_id: key.key_id.clone(),
            ascii_armor: key.ascii_armor.clone(),
            ..Self::default()
        }
    }
}

/// The `signing_keys` block of a download document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningKeys {
    /// GPG keys that may have signed the checksum list.
    #[serde(default)]
    pub gpg_public_keys: Vec<GpgPublicKey>,
}

impl SigningKeys {
    /// Build a block containing exactly one key.
    #[must_use]
    pub fn single(key: &PgpSigningKey) -> Self {
        Self {
            gpg_public_keys: vec![GpgPublicKey::from(key)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn single_key_block_serialises_all_fields() {
        let keys = SigningKeys::single(&PgpSigningKey::new("ABCD1234", "-----BEGIN PGP"));
        let value = serde_json::to_value(&keys).expect("serialize");
        assert_eq!(
            value,
            json!({
                "gpg_public_keys": [{
                    "key_id": "ABCD1234",
                    "ascii_armor": "-----BEGIN PGP",
                    "trust_signature": "",
                    "source": "",
                    "source_url": Value::Null,
                }]
            })
        );
    }

    #[test]
    fn missing_optional_fields_deserialise_to_defaults() {
        let keys: SigningKeys = serde_json::from_str(
            r#"{"gpg_public_keys":[{"key_id":"K","ascii_armor":"A"}]}"#,
        )
        .expect("deserialize");
        assert_eq!(keys, SigningKeys::single(&PgpSigningKey::new("K", "A")));
    }
}
