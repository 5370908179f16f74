/*!
Key coding, encoding and loading.

The key coding is sticky session state: it applies to every later encode
and load until it is set again.
*/

use crate::core::engine::Engine;
use crate::core::error::{Operation, Result};
use crate::core::memory::KeyMaterial;
use crate::core::types::{EntropyCoding, KeyCoding};

use super::Session;

impl<E: Engine> Session<E> {
    /// Select the codings used for public and private keys
    pub fn set_key_coding(&self, public: EntropyCoding, private: EntropyCoding) -> Result<()> {
        let handle = self.live()?;
        let rc = self.engine.set_key_coding(handle, public.as_raw(), private.as_raw());
        self.check(handle, Operation::SetKeyCoding, rc)
    }

    /// Currently selected key codings
    pub fn key_coding(&self) -> Result<KeyCoding> {
        let handle = self.live()?;
        let (mut public, mut private) = (0u32, 0u32);
        let rc = self.engine.get_key_coding(handle, &mut public, &mut private);
        self.check_status(handle, Operation::GetKeyCoding, rc)?;
        Ok(KeyCoding {
            public: EntropyCoding::try_from(public)?,
            private: EntropyCoding::try_from(private)?,
        })
    }

    /// Serialize the session's public key under the current coding
    pub fn encode_public_key(&self) -> Result<KeyMaterial> {
        self.transfer(Operation::EncodePublicKey, |handle, key| {
            self.engine.public_key_encode(handle, key)
        })
        .map(KeyMaterial::new)
    }

    /// Serialize the session's private key under the current coding
    pub fn encode_private_key(&self) -> Result<KeyMaterial> {
        self.transfer(Operation::EncodePrivateKey, |handle, key| {
            self.engine.private_key_encode(handle, key)
        })
        .map(KeyMaterial::new)
    }

    pub fn load_public_key(&self, key: &[u8]) -> Result<()> {
        let handle = self.live()?;
        let rc = self.engine.public_key_load(handle, key);
        self.check(handle, Operation::LoadPublicKey, rc)
    }

    pub fn load_private_key(&self, key: &[u8]) -> Result<()> {
        let handle = self.live()?;
        let rc = self.engine.private_key_load(handle, key);
        self.check(handle, Operation::LoadPrivateKey, rc)
    }
}
