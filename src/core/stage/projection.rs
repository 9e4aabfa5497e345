//! Read projections of a stage's variables.

use tracing::debug;
use zeroize::Zeroizing;

use super::Stages;
use crate::core::constants::LISTING_PLACEHOLDER;
use crate::core::domain::{Projection, ViewContext};
use crate::core::key::StageKey;
use crate::core::mask::mask_vars;
use crate::core::types::Vars;
use crate::error::Result;

impl Stages {
    /// Project a stage's variables for a caller.
    ///
    /// * `Raw` returns the map unmodified.
    /// * `Listing` keeps every name and replaces each value with the
    ///   placeholder; the cipher is never invoked.
    /// * `Protected` encrypts the serialized map for the principal's public
    ///   key, or returns it unmodified when the principal has none.
    ///
    /// A stage with no blob projects as an empty map.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidPublicKey` if the principal's key cannot
    /// be parsed. Plaintext is never returned in place of a failed
    /// encryption.
    pub async fn get_envs_for_caller(
        &self,
        key: &StageKey,
        context: &ViewContext,
    ) -> Result<Projection> {
        let blob = self.load_blob(key).await?;

        match context {
            ViewContext::Raw => Ok(Projection::plain(blob.vars)),
            ViewContext::Listing => {
                let names: Vars = blob
                    .vars
                    .into_keys()
                    .map(|name| (name, LISTING_PLACEHOLDER.to_string()))
                    .collect();
                Ok(Projection::plain(names))
            }
            ViewContext::Protected(principal) => match principal.public_key() {
                None => {
                    debug!(key = %key, "principal has no public key, returning plaintext");
                    Ok(Projection::plain(blob.vars))
                }
                Some(public_key) => {
                    let plaintext = Zeroizing::new(serde_json::to_string(&blob.vars)?);
                    let armored = self.cipher.encrypt_for_recipient(&plaintext, public_key)?;
                    debug!(key = %key, cipher = self.cipher.name(), "encrypted projection");
                    Ok(Projection::ciphertext(armored))
                }
            },
        }
    }

    /// Masked view of a stage's variables for audit and debug display.
    pub async fn masked_envs(&self, key: &StageKey) -> Result<Vars> {
        let blob = self.load_blob(key).await?;
        Ok(mask_vars(&blob))
    }
}
