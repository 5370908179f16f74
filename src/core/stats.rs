/*!
Decoder for the engine's per-session statistics record.

The record is a packed C struct in native byte order:

- scheme (`int`)
- 17 `size_t` counters, starting with the parameter set
- `num_components[6]` (`size_t`)
- `components[6][5]`, each `{ size_t bits; size_t bits_coded; char name[32]; }`

Counters are exposed raw. Deriving compression ratios from the coding
descriptors is left to the caller.
*/

use byteorder::{ByteOrder, NativeEndian};

use crate::core::constants::sizes;
use crate::core::error::{Error, Result};
use crate::core::types::{Scheme, StatComponent};

/// Coding descriptor for one sub-component of produced data
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct CodingStats {
    /// Raw size in bits
    pub bits: usize,
    /// Size after entropy coding in bits
    pub bits_coded: usize,
    /// Name of the coder that produced it
    pub name: String,
}

/// Coding table for one component category
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentStats {
    /// Number of coded sub-components the engine reported
    pub count: usize,
    /// All descriptor slots, including unused ones
    pub codings: Vec<CodingStats>,
}

impl ComponentStats {
    /// Descriptors the engine marked as in use
    pub fn active(&self) -> &[CodingStats] {
        &self.codings[..self.count.min(self.codings.len())]
    }
}

impl Default for ComponentStats {
    fn default() -> Self {
        Self {
            count: 0,
            codings: vec![CodingStats::default(); sizes::STAT_CODINGS],
        }
    }
}

/// Snapshot of a session's usage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    pub scheme: Scheme,
    pub param_set: usize,
    pub keygen_num: usize,
    pub keygen_num_trials: usize,
    pub pub_keys_encoded: usize,
    pub pub_keys_loaded: usize,
    pub priv_keys_encoded: usize,
    pub priv_keys_loaded: usize,
    pub sig_num: usize,
    pub sig_num_trials: usize,
    pub sig_num_verified: usize,
    pub sig_num_unverified: usize,
    pub encrypt_num: usize,
    pub decrypt_num: usize,
    pub encapsulate_num: usize,
    pub decapsulate_num: usize,
    pub extract_num: usize,
    pub extract_keys_loaded: usize,
    /// One table per `StatComponent`, in component order
    pub components: Vec<ComponentStats>,
}

impl Statistics {
    /// Empty statistics for a scheme
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            param_set: 0,
            keygen_num: 0,
            keygen_num_trials: 0,
            pub_keys_encoded: 0,
            pub_keys_loaded: 0,
            priv_keys_encoded: 0,
            priv_keys_loaded: 0,
            sig_num: 0,
            sig_num_trials: 0,
            sig_num_verified: 0,
            sig_num_unverified: 0,
            encrypt_num: 0,
            decrypt_num: 0,
            encapsulate_num: 0,
            decapsulate_num: 0,
            extract_num: 0,
            extract_keys_loaded: 0,
            components: vec![ComponentStats::default(); sizes::STAT_COMPONENTS],
        }
    }

    /// Coding table for one component category, if present
    pub fn component(&self, component: StatComponent) -> Option<&ComponentStats> {
        self.components.get(component.index())
    }

    /// Decode a packed statistics record
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < sizes::STATISTICS_RECORD {
            return Err(Error::StatisticsFormat(format!(
                "record is {} bytes, expected {}",
                bytes.len(),
                sizes::STATISTICS_RECORD
            )));
        }

        let mut reader = RecordReader { bytes, pos: 0 };
        let scheme = Scheme::try_from(reader.int())?;

        let mut counters = [0usize; sizes::STAT_COUNTERS];
        for counter in counters.iter_mut() {
            *counter = reader.word();
        }
        let [
            param_set,
            keygen_num,
            keygen_num_trials,
            pub_keys_encoded,
            pub_keys_loaded,
            priv_keys_encoded,
            priv_keys_loaded,
            sig_num,
            sig_num_trials,
            sig_num_verified,
            sig_num_unverified,
            encrypt_num,
            decrypt_num,
            encapsulate_num,
            decapsulate_num,
            extract_num,
            extract_keys_loaded,
        ] = counters;

        let mut components = Vec::with_capacity(sizes::STAT_COMPONENTS);
        for _ in 0..sizes::STAT_COMPONENTS {
            components.push(ComponentStats {
                count: reader.word(),
                codings: Vec::with_capacity(sizes::STAT_CODINGS),
            });
        }
        for component in components.iter_mut() {
            for _ in 0..sizes::STAT_CODINGS {
                let bits = reader.word();
                let bits_coded = reader.word();
                let name = reader.name();
                component.codings.push(CodingStats { bits, bits_coded, name });
            }
        }

        Ok(Self {
            scheme,
            param_set,
            keygen_num,
            keygen_num_trials,
            pub_keys_encoded,
            pub_keys_loaded,
            priv_keys_encoded,
            priv_keys_loaded,
            sig_num,
            sig_num_trials,
            sig_num_verified,
            sig_num_unverified,
            encrypt_num,
            decrypt_num,
            encapsulate_num,
            decapsulate_num,
            extract_num,
            extract_keys_loaded,
            components,
        })
    }

    /// Encode into the packed record layout.
    ///
    /// Coder names longer than 31 bytes are truncated; missing tables and
    /// descriptor slots are written as zeros.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; sizes::STATISTICS_RECORD];
        let mut writer = RecordWriter { bytes: &mut out, pos: 0 };

        writer.int(self.scheme.as_raw());
        for counter in [
            self.param_set,
            self.keygen_num,
            self.keygen_num_trials,
            self.pub_keys_encoded,
            self.pub_keys_loaded,
            self.priv_keys_encoded,
            self.priv_keys_loaded,
            self.sig_num,
            self.sig_num_trials,
            self.sig_num_verified,
            self.sig_num_unverified,
            self.encrypt_num,
            self.decrypt_num,
            self.encapsulate_num,
            self.decapsulate_num,
            self.extract_num,
            self.extract_keys_loaded,
        ] {
            writer.word(counter);
        }

        for i in 0..sizes::STAT_COMPONENTS {
            writer.word(self.components.get(i).map_or(0, |c| c.count));
        }
        for i in 0..sizes::STAT_COMPONENTS {
            for j in 0..sizes::STAT_CODINGS {
                match self.components.get(i).and_then(|c| c.codings.get(j)) {
                    Some(coding) => {
                        writer.word(coding.bits);
                        writer.word(coding.bits_coded);
                        writer.name(&coding.name);
                    }
                    None => writer.skip(sizes::CODING_RECORD),
                }
            }
        }
        out
    }
}

/// Sequential reader over a record already checked for length
struct RecordReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl RecordReader<'_> {
    fn int(&mut self) -> u32 {
        let value = NativeEndian::read_u32(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        value
    }

    fn word(&mut self) -> usize {
        let value =
            NativeEndian::read_uint(&self.bytes[self.pos..self.pos + sizes::WORD], sizes::WORD);
        self.pos += sizes::WORD;
        value as usize
    }

    fn name(&mut self) -> String {
        let raw = &self.bytes[self.pos..self.pos + sizes::CODER_NAME_LEN];
        self.pos += sizes::CODER_NAME_LEN;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }
}

struct RecordWriter<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl RecordWriter<'_> {
    fn int(&mut self, value: u32) {
        NativeEndian::write_u32(&mut self.bytes[self.pos..self.pos + 4], value);
        self.pos += 4;
    }

    fn word(&mut self, value: usize) {
        NativeEndian::write_uint(
            &mut self.bytes[self.pos..self.pos + sizes::WORD],
            value as u64,
            sizes::WORD,
        );
        self.pos += sizes::WORD;
    }

    fn name(&mut self, name: &str) {
        let len = name.len().min(sizes::CODER_NAME_LEN - 1);
        self.bytes[self.pos..self.pos + len].copy_from_slice(&name.as_bytes()[..len]);
        self.pos += sizes::CODER_NAME_LEN;
    }

    fn skip(&mut self, len: usize) {
        self.pos += len;
    }
}
