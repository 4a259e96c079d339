//! Key configuration for the blackjack state-token channel.
//!
//! The key is resolved once at start-up and handed to
//! [`PublicStateCodec`](crate::blackjack::PublicStateCodec). Whether it came
//! from configuration or was generated for this process is part of the
//! resolved value, so the caller decides how loudly to report it.

use core::fmt;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::KeyError;

/// Environment variable read by [`StateKeyConfig::from_env`].
pub const STATE_KEY_ENV: &str = "BLACKJACK_STATE_KEY";

/// Length in bytes of a state-token key.
pub const KEY_LEN: usize = 32;

/// URL-safe base64 that accepts keys with or without `=` padding.
const KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Where a [`StateKey`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyOrigin {
    /// Supplied by configuration; tokens survive a restart.
    Configured,
    /// Generated for this process only; a restart invalidates every
    /// outstanding token, so the process must not restart mid-game.
    Ephemeral,
}

/// Unresolved key configuration.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StateKeyConfig {
    key: Option<String>,
}

impl fmt::Debug for StateKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateKeyConfig")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl StateKeyConfig {
    /// Reads the key from [`STATE_KEY_ENV`]; a blank value counts as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            key: std::env::var(STATE_KEY_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty()),
        }
    }

    /// Sets the key text explicitly.
    ///
    /// # Example
    ///
    /// ```
    /// use turnstate::{KeyOrigin, StateKeyConfig};
    ///
    /// let key = StateKeyConfig::default()
    ///     .with_key("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=")
    ///     .resolve()
    ///     .unwrap();
    /// assert_eq!(key.origin(), KeyOrigin::Configured);
    /// ```
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Returns whether a key was configured.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    /// Resolves the configured key, or generates an ephemeral one.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKey`] when a key is configured but is not
    /// base64url text for exactly 32 bytes.
    pub fn resolve(&self) -> Result<StateKey, KeyError> {
        match &self.key {
            Some(text) => StateKey::from_base64(text.trim()),
            None => Ok(StateKey::generate()),
        }
    }
}

/// Resolved symmetric key for state tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct StateKey {
    bytes: [u8; KEY_LEN],
    origin: KeyOrigin,
}

impl fmt::Debug for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateKey")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl StateKey {
    /// Decodes a configured key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKey`] for bad base64 or a wrong length.
    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        let decoded = KEY_ENGINE.decode(text).map_err(|_| KeyError::InvalidKey)?;
        let bytes: [u8; KEY_LEN] = decoded.try_into().map_err(|_| KeyError::InvalidKey)?;
        Ok(Self {
            bytes,
            origin: KeyOrigin::Configured,
        })
    }

    /// Generates a fresh process-local key.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            bytes: rand::random(),
            origin: KeyOrigin::Ephemeral,
        }
    }

    /// Returns where this key came from.
    #[must_use]
    pub const fn origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Encodes the key in the same form [`StateKey::from_base64`] accepts.
    #[must_use]
    pub fn to_base64(&self) -> String {
        KEY_ENGINE.encode(self.bytes)
    }

    pub(crate) const fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}
