/*!
Owned key material copied out of the engine.
*/

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::error::Result;
use crate::core::hex;

/// Serialized key bytes, wiped when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode from the hex transport form
    pub fn from_hex(hex: &str) -> Result<Self> {
        hex::hex_to_bytes(hex).map(Self)
    }

    /// Render in the hex transport form
    pub fn to_hex(&self) -> String {
        hex::bytes_to_hex(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hand the bytes to the caller, who becomes responsible for wiping them
    pub fn into_vec(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for KeyMaterial {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        let key = KeyMaterial::new(vec![0xca, 0xfe]);
        assert_eq!(key.to_hex(), "CAFE");
        assert_eq!(KeyMaterial::from_hex("cafe").unwrap(), key);
    }

    #[test]
    fn test_debug_hides_bytes() {
        let key = KeyMaterial::new(vec![0x41; 16]);
        assert_eq!(format!("{:?}", key), "KeyMaterial(16 bytes)");
    }

    #[test]
    fn test_zeroize() {
        let mut key = KeyMaterial::new(vec![1, 2, 3]);
        key.zeroize();
        assert!(key.is_empty());
    }

    #[test]
    fn test_into_vec() {
        let key = KeyMaterial::from(&[5u8, 6][..]);
        assert_eq!(key.into_vec(), vec![5, 6]);
    }
}
