//! Redacted blackjack state for untrusted callers.
//!
//! The public form shows what a player at the table could see: their hands,
//! the dealer's up card (every card once the dealer plays or the round
//! ends), the bankroll, and the round metadata. The complete canonical state
//! travels inside the `X` segment as an authenticated, encrypted token, so a
//! caller can neither read the shoe or hole card nor forge a state.
//!
//! Layout: `P:..|D:..|BK:..|B:..|T:..|H:..|ST:..|LA:..|R:..|X:<token>`.

use core::fmt;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{GameKind, Segments, Token, text_or_dash, write_list};
use crate::config::{KeyOrigin, StateKey};
use crate::error::{Error, TokenError};
use crate::outcome::Outcome;

use super::state::{BlackjackState, write_hands};
use super::{Blackjack, BlackjackAction, BlackjackTurn};

/// Version tag written into every token payload.
pub const STATE_TOKEN_VERSION: u32 = 1;

const NONCE_LEN: usize = 24;

/// URL-safe base64, written without padding and read either way.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    v: u32,
    canonical: String,
}

/// Encodes canonical blackjack state into its public form and back.
#[derive(Clone)]
pub struct PublicStateCodec {
    cipher: XChaCha20Poly1305,
    origin: KeyOrigin,
}

impl fmt::Debug for PublicStateCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicStateCodec")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl PublicStateCodec {
    /// Creates a codec sealing tokens with `key`.
    #[must_use]
    pub fn new(key: &StateKey) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(key.bytes())),
            origin: key.origin(),
        }
    }

    /// Returns where the codec's key came from.
    #[must_use]
    pub const fn key_origin(&self) -> KeyOrigin {
        self.origin
    }

    /// Builds the public form of a parsed round.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] if the payload cannot be sealed.
    pub fn encode_state(&self, state: &BlackjackState) -> Result<String, TokenError> {
        let token = self.seal(&state.to_string())?;
        let dealer = state.dealer.visible_cards(state.reveals_dealer());
        let (stack, bet) = state
            .wager
            .map_or((0, 0), |wager| (wager.stack, wager.bet));

        Ok(format!(
            "P:{}|D:{}|BK:{stack}|B:{bet}|T:{}|H:{}|ST:{}|LA:{}|R:{}|X:{token}",
            write_hands(&state.hands),
            write_list(dealer),
            state.turn.token(),
            state.hand_index,
            state.status.token(),
            text_or_dash(state.last_action.as_deref()),
            state.results_text(),
        ))
    }

    /// Re-parses a canonical state string and builds its public form.
    ///
    /// # Errors
    ///
    /// Returns a [`StateError`](crate::StateError) for malformed canonical input.
    pub fn encode_public_state(&self, canonical: &str) -> Result<String, Error> {
        let state = BlackjackState::parse(canonical)?;
        Ok(self.encode_state(&state)?)
    }

    /// Recovers the parsed round sealed in a public state string.
    ///
    /// Only the `X` segment is read; the visible segments are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] for a missing, tampered, foreign, or
    /// malformed token.
    pub fn decode_state(&self, public: &str) -> Result<BlackjackState, TokenError> {
        let segments =
            Segments::parse(GameKind::Blackjack, public).map_err(|_| TokenError::Invalid)?;
        let token = segments.get_non_empty("X").ok_or(TokenError::Invalid)?;

        let canonical = self.open(token)?;
        BlackjackState::parse(&canonical).map_err(|err| {
            debug!(error = %err, "sealed blackjack state failed to parse");
            TokenError::Invalid
        })
    }

    /// Recovers the canonical state string sealed in a public state string.
    ///
    /// The result is re-serialized, so it is always in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] as [`PublicStateCodec::decode_state`].
    pub fn decode_public_state(&self, public: &str) -> Result<String, TokenError> {
        self.decode_state(public).map(|state| state.to_string())
    }

    /// Decodes a public state, applies `action` on `table`, and re-encodes.
    ///
    /// The returned turn's `state` is the new public state. On any failure
    /// the caller's public string is echoed back unchanged.
    #[must_use]
    pub fn apply_public_action(
        &self,
        table: &Blackjack,
        public: &str,
        action: &str,
    ) -> Outcome<BlackjackTurn> {
        let state = match self.decode_state(public) {
            Ok(state) => state,
            Err(err) => {
                debug!(error = %err, "rejected blackjack state token");
                return Outcome::rejected(public, err);
            }
        };

        let next = match table.play(&state, action) {
            Ok(next) => next,
            Err(err) => {
                debug!(error = %err, action, "rejected public blackjack action");
                return Outcome::rejected(public, err);
            }
        };

        match self.encode_state(&next) {
            Ok(encoded) => Outcome::Applied(BlackjackTurn {
                state: encoded,
                ..BlackjackTurn::from(&next)
            }),
            Err(err) => Outcome::rejected(public, err),
        }
    }

    /// Returns the player's legal actions for a public state.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] if the token does not open.
    pub fn legal_public_actions(
        &self,
        table: &Blackjack,
        public: &str,
    ) -> Result<Vec<BlackjackAction>, TokenError> {
        let state = self.decode_state(public)?;
        Ok(table.legal_player_actions(&state))
    }

    /// Returns the dealer's forced action for a public state.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Invalid`] if the token does not open.
    pub fn dealer_public_actions(
        &self,
        table: &Blackjack,
        public: &str,
    ) -> Result<Vec<BlackjackAction>, TokenError> {
        let state = self.decode_state(public)?;
        Ok(table.legal_dealer_actions(&state))
    }

    fn seal(&self, canonical: &str) -> Result<String, TokenError> {
        let payload = serde_json::to_vec(&TokenPayload {
            v: STATE_TOKEN_VERSION,
            canonical: canonical.to_owned(),
        })
        .map_err(|_| TokenError::Invalid)?;

        let nonce_bytes: [u8; NONCE_LEN] = rand::random();
        let ciphertext = self
            .cipher
            .encrypt(XNonce::from_slice(&nonce_bytes), payload.as_slice())
            .map_err(|_| TokenError::Invalid)?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);
        Ok(TOKEN_ENGINE.encode(sealed))
    }

    fn open(&self, token: &str) -> Result<String, TokenError> {
        let sealed = TOKEN_ENGINE
            .decode(token.trim())
            .map_err(|_| TokenError::Invalid)?;
        if sealed.len() <= NONCE_LEN {
            return Err(TokenError::Invalid);
        }
        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| TokenError::Invalid)?;

        let payload: TokenPayload =
            serde_json::from_slice(&plaintext).map_err(|_| TokenError::Invalid)?;
        if payload.v != STATE_TOKEN_VERSION || payload.canonical.trim().is_empty() {
            return Err(TokenError::Invalid);
        }
        Ok(payload.canonical)
    }
}
