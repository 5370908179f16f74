/*!
Cryptographic operations on a live session.

Every call that produces data receives it in an engine allocation, which
is copied into owned storage and released before the call returns.
*/

use crate::core::constants::VERIFY_VALID;
use crate::core::engine::Engine;
use crate::core::error::{Error, Operation, Result};
use crate::core::memory::KeyMaterial;
use crate::core::stats::Statistics;
use crate::core::types::EntropyCoding;

use super::Session;

/// A signature re-encoded under another entropy coding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded {
    pub signature: Vec<u8>,
    /// Length of the signature vector, as reported by the engine
    pub vector_length: usize,
}

/// Output of a KEM encapsulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encapsulation {
    pub ciphertext: Vec<u8>,
    pub shared_key: KeyMaterial,
}

impl<E: Engine> Session<E> {
    /// Generate a key pair inside the session
    pub fn keygen(&self) -> Result<()> {
        let handle = self.live()?;
        let rc = self.engine.keygen(handle);
        self.check(handle, Operation::KeyGen, rc)
    }

    /// Encrypt with the session's public key
    pub fn encrypt_public(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        self.transfer(Operation::Encrypt, |handle, out| {
            self.engine.public_encrypt(handle, plaintext, out)
        })
    }

    /// Decrypt with the session's private key
    pub fn decrypt_private(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.transfer(Operation::Decrypt, |handle, out| {
            self.engine.private_decrypt(handle, ciphertext, out)
        })
    }

    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        self.transfer(Operation::Sign, |handle, out| self.engine.sign(handle, message, out))
    }

    /// Check a signature. An invalid signature is `Ok(false)`, not an error.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        let handle = self.live()?;
        let rc = self.engine.verify(handle, message, signature);
        if rc != VERIFY_VALID {
            log::debug!("{} signature rejected with code {}", self.scheme, rc);
        }
        Ok(rc == VERIFY_VALID)
    }

    /// Re-encode a signature from one entropy coding to another
    pub fn transcode_signature(
        &self,
        from: EntropyCoding,
        to: EntropyCoding,
        signature: &[u8],
    ) -> Result<Transcoded> {
        let mut vector_length = 0usize;
        let transcoded = self.transfer(Operation::Transcode, |handle, out| {
            self.engine.signature_transcode(
                handle,
                from.as_raw(),
                to.as_raw(),
                signature,
                out,
                &mut vector_length,
            )
        })?;
        Ok(Transcoded { signature: transcoded, vector_length })
    }

    /// Produce a ciphertext and the shared key it carries
    pub fn encapsulate(&self) -> Result<Encapsulation> {
        let handle = self.live()?;
        let mut ciphertext = self.buffer();
        let mut key = self.buffer();
        let rc = self.engine.encapsulation(handle, &mut ciphertext, &mut key);
        self.check(handle, Operation::Encapsulate, rc)?;
        log::debug!(
            "Encapsulation returned {} byte ciphertext, {} byte key",
            ciphertext.len(),
            key.len()
        );
        Ok(Encapsulation {
            ciphertext: ciphertext.copy_out(),
            shared_key: KeyMaterial::new(key.copy_out()),
        })
    }

    /// Recover the shared key from a ciphertext
    pub fn decapsulate(&self, ciphertext: &[u8]) -> Result<KeyMaterial> {
        self.transfer(Operation::Decapsulate, |handle, key| {
            self.engine.decapsulation(handle, ciphertext, key)
        })
        .map(KeyMaterial::new)
    }

    /// Snapshot of the session's usage statistics
    pub fn statistics(&self) -> Result<Statistics> {
        let handle = self.live()?;
        let record = self.engine.statistics(handle).ok_or(Error::StatisticsUnavailable)?;
        Statistics::from_bytes(&record)
    }
}
