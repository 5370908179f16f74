/*!
Configuration flags for session creation.

`Flags` is the structured form: one named field per mutually exclusive
group, so a later assignment to a field always replaces the earlier one.
It is only turned into the engine's one- or two-word wire format by
`Flags::encode`, which assigns every field with mask-clear-then-set on a
`FlagWords` accumulator.
*/

use std::fmt;
use std::str::FromStr;

use crate::config_err;
use crate::core::constants::flags::{word0, word1, MORE, NONE};
use crate::core::error::{Error, Result};

/// Location of a flag field inside the wire words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagBits {
    pub word: usize,
    pub mask: u32,
    pub value: u32,
}

impl FlagBits {
    const fn w0(mask: u32, value: u32) -> Self {
        Self { word: 0, mask, value }
    }

    const fn w1(mask: u32, value: u32) -> Self {
        Self { word: 1, mask, value }
    }
}

/// Entropy coder selected for the scheme's own encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum EntropyFlag {
    Bac,
    BacRle,
    StrongSwan,
    HuffmanStatic,
}

impl EntropyFlag {
    const ALL: [EntropyFlag; 4] = [
        EntropyFlag::Bac,
        EntropyFlag::BacRle,
        EntropyFlag::StrongSwan,
        EntropyFlag::HuffmanStatic,
    ];

    pub fn value(&self) -> u32 {
        match self {
            EntropyFlag::Bac => word0::ENTROPY_BAC,
            EntropyFlag::BacRle => word0::ENTROPY_BAC_RLE,
            EntropyFlag::StrongSwan => word0::ENTROPY_STRONGSWAN,
            EntropyFlag::HuffmanStatic => word0::ENTROPY_HUFFMAN_STATIC,
        }
    }
}

/// Gaussian sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Sampler {
    Cdf,
    KnuthYao,
    Ziggurat,
    Bac,
    Huffman,
    Bernoulli,
}

impl Sampler {
    const ALL: [Sampler; 6] = [
        Sampler::Cdf,
        Sampler::KnuthYao,
        Sampler::Ziggurat,
        Sampler::Bac,
        Sampler::Huffman,
        Sampler::Bernoulli,
    ];

    pub fn value(&self) -> u32 {
        match self {
            Sampler::Cdf => word0::SAMPLE_CDF,
            Sampler::KnuthYao => word0::SAMPLE_KNUTH_YAO,
            Sampler::Ziggurat => word0::SAMPLE_ZIGGURAT,
            Sampler::Bac => word0::SAMPLE_BAC,
            Sampler::Huffman => word0::SAMPLE_HUFFMAN,
            Sampler::Bernoulli => word0::SAMPLE_BERNOULLI,
        }
    }
}

/// Hash output length (2-bit field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum HashLength {
    #[default]
    Bits512,
    Bits384,
    Bits256,
    Bits224,
}

impl HashLength {
    const ALL: [HashLength; 4] =
        [HashLength::Bits512, HashLength::Bits384, HashLength::Bits256, HashLength::Bits224];

    pub fn value(&self) -> u32 {
        match self {
            HashLength::Bits512 => word0::HASH_LENGTH_512,
            HashLength::Bits384 => word0::HASH_LENGTH_384,
            HashLength::Bits256 => word0::HASH_LENGTH_256,
            HashLength::Bits224 => word0::HASH_LENGTH_224,
        }
    }
}

/// Hash function (3-bit field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum HashFunction {
    #[default]
    Default,
    Blake2,
    Sha2,
    Sha3,
    Whirlpool,
}

impl HashFunction {
    const ALL: [HashFunction; 5] = [
        HashFunction::Default,
        HashFunction::Blake2,
        HashFunction::Sha2,
        HashFunction::Sha3,
        HashFunction::Whirlpool,
    ];

    pub fn value(&self) -> u32 {
        match self {
            HashFunction::Default => word0::HASH_FUNCTION_DEFAULT,
            HashFunction::Blake2 => word0::HASH_BLAKE2,
            HashFunction::Sha2 => word0::HASH_SHA2,
            HashFunction::Sha3 => word0::HASH_SHA3,
            HashFunction::Whirlpool => word0::HASH_WHIRLPOOL,
        }
    }
}

/// Modular reduction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Reduction {
    #[default]
    Default,
    Reference,
    Barrett,
    FloatingPoint,
}

impl Reduction {
    const ALL: [Reduction; 4] =
        [Reduction::Default, Reduction::Reference, Reduction::Barrett, Reduction::FloatingPoint];

    pub fn value(&self) -> u32 {
        match self {
            Reduction::Default => word0::REDUCTION_DEFAULT,
            Reduction::Reference => word0::REDUCTION_REFERENCE,
            Reduction::Barrett => word0::REDUCTION_BARRETT,
            Reduction::FloatingPoint => word0::REDUCTION_FP,
        }
    }
}

/// Engine-internal multithreading hints. These bits do not make a session
/// safe to share between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Threading {
    pub keygen: bool,
    pub enc_sign: bool,
    pub dec_verify: bool,
}

impl Threading {
    pub fn value(&self) -> u32 {
        let mut v = NONE;
        if self.keygen {
            v |= word0::THREADING_KEYGEN;
        }
        if self.enc_sign {
            v |= word0::THREADING_ENC_SIGN;
        }
        if self.dec_verify {
            v |= word0::THREADING_DEC_VERIFY;
        }
        v
    }
}

/// CSPRNG selection, carried in word 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Csprng {
    AesCtrDrbg,
    ChaCha,
    Salsa,
    Isaac,
    Kiss,
    AesCtr,
    Sha3_512Drbg,
    Sha3_256Drbg,
    Sha2_512Drbg,
    Sha2_256Drbg,
    Blake2_512Drbg,
    Blake2_256Drbg,
    WhirlpoolDrbg,
}

impl Csprng {
    const ALL: [Csprng; 13] = [
        Csprng::AesCtrDrbg,
        Csprng::ChaCha,
        Csprng::Salsa,
        Csprng::Isaac,
        Csprng::Kiss,
        Csprng::AesCtr,
        Csprng::Sha3_512Drbg,
        Csprng::Sha3_256Drbg,
        Csprng::Sha2_512Drbg,
        Csprng::Sha2_256Drbg,
        Csprng::Blake2_512Drbg,
        Csprng::Blake2_256Drbg,
        Csprng::WhirlpoolDrbg,
    ];

    pub fn value(&self) -> u32 {
        match self {
            Csprng::AesCtrDrbg => word1::CSPRNG_AES_CTR_DRBG,
            Csprng::ChaCha => word1::CSPRNG_CHACHA,
            Csprng::Salsa => word1::CSPRNG_SALSA,
            Csprng::Isaac => word1::CSPRNG_ISAAC,
            Csprng::Kiss => word1::CSPRNG_KISS,
            Csprng::AesCtr => word1::CSPRNG_AES_CTR,
            Csprng::Sha3_512Drbg => word1::CSPRNG_SHA3_512_DRBG,
            Csprng::Sha3_256Drbg => word1::CSPRNG_SHA3_256_DRBG,
            Csprng::Sha2_512Drbg => word1::CSPRNG_SHA2_512_DRBG,
            Csprng::Sha2_256Drbg => word1::CSPRNG_SHA2_256_DRBG,
            Csprng::Blake2_512Drbg => word1::CSPRNG_BLAKE2_512_DRBG,
            Csprng::Blake2_256Drbg => word1::CSPRNG_BLAKE2_256_DRBG,
            Csprng::WhirlpoolDrbg => word1::CSPRNG_WHIRLPOOL_DRBG,
        }
    }
}

/// Entropy source feeding the CSPRNG, carried in word 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum EntropySource {
    DevRandom,
    DevUrandom,
    OsRandom,
    Callback,
}

impl EntropySource {
    const ALL: [EntropySource; 4] = [
        EntropySource::DevRandom,
        EntropySource::DevUrandom,
        EntropySource::OsRandom,
        EntropySource::Callback,
    ];

    pub fn value(&self) -> u32 {
        match self {
            EntropySource::DevRandom => word1::USE_DEV_RANDOM,
            EntropySource::DevUrandom => word1::USE_DEV_URANDOM,
            EntropySource::OsRandom => word1::USE_OS_RANDOM,
            EntropySource::Callback => word1::USE_CALLBACK_RANDOM,
        }
    }
}

/// A single named flag option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagOption {
    Entropy(EntropyFlag),
    Sampler(Sampler),
    Blinding,
    HashLength(HashLength),
    HashFunction(HashFunction),
    Reduction(Reduction),
    ThreadingKeygen,
    ThreadingEncSign,
    ThreadingDecVerify,
    Csprng(Csprng),
    EntropySource(EntropySource),
}

/// Stable names accepted by `FlagOption::from_str`
const NAMED_OPTIONS: &[(&str, FlagOption)] = &[
    ("entropy-bac", FlagOption::Entropy(EntropyFlag::Bac)),
    ("entropy-bac-rle", FlagOption::Entropy(EntropyFlag::BacRle)),
    ("entropy-strongswan", FlagOption::Entropy(EntropyFlag::StrongSwan)),
    ("entropy-huffman-static", FlagOption::Entropy(EntropyFlag::HuffmanStatic)),
    ("sample-blinding", FlagOption::Blinding),
    ("sample-cdf", FlagOption::Sampler(Sampler::Cdf)),
    ("sample-knuth-yao", FlagOption::Sampler(Sampler::KnuthYao)),
    ("sample-ziggurat", FlagOption::Sampler(Sampler::Ziggurat)),
    ("sample-bac", FlagOption::Sampler(Sampler::Bac)),
    ("sample-huffman", FlagOption::Sampler(Sampler::Huffman)),
    ("sample-bernoulli", FlagOption::Sampler(Sampler::Bernoulli)),
    ("hash-length-512", FlagOption::HashLength(HashLength::Bits512)),
    ("hash-length-384", FlagOption::HashLength(HashLength::Bits384)),
    ("hash-length-256", FlagOption::HashLength(HashLength::Bits256)),
    ("hash-length-224", FlagOption::HashLength(HashLength::Bits224)),
    ("hash-default", FlagOption::HashFunction(HashFunction::Default)),
    ("hash-blake2", FlagOption::HashFunction(HashFunction::Blake2)),
    ("hash-sha2", FlagOption::HashFunction(HashFunction::Sha2)),
    ("hash-sha3", FlagOption::HashFunction(HashFunction::Sha3)),
    ("hash-whirlpool", FlagOption::HashFunction(HashFunction::Whirlpool)),
    ("reduction-default", FlagOption::Reduction(Reduction::Default)),
    ("reduction-reference", FlagOption::Reduction(Reduction::Reference)),
    ("reduction-barrett", FlagOption::Reduction(Reduction::Barrett)),
    ("reduction-fp", FlagOption::Reduction(Reduction::FloatingPoint)),
    ("threading-keygen", FlagOption::ThreadingKeygen),
    ("threading-enc-sign", FlagOption::ThreadingEncSign),
    ("threading-dec-verify", FlagOption::ThreadingDecVerify),
    ("csprng-aes-ctr-drbg", FlagOption::Csprng(Csprng::AesCtrDrbg)),
    ("csprng-chacha", FlagOption::Csprng(Csprng::ChaCha)),
    ("csprng-salsa", FlagOption::Csprng(Csprng::Salsa)),
    ("csprng-isaac", FlagOption::Csprng(Csprng::Isaac)),
    ("csprng-kiss", FlagOption::Csprng(Csprng::Kiss)),
    ("csprng-aes-ctr", FlagOption::Csprng(Csprng::AesCtr)),
    ("csprng-sha3-512-drbg", FlagOption::Csprng(Csprng::Sha3_512Drbg)),
    ("csprng-sha3-256-drbg", FlagOption::Csprng(Csprng::Sha3_256Drbg)),
    ("csprng-sha2-512-drbg", FlagOption::Csprng(Csprng::Sha2_512Drbg)),
    ("csprng-sha2-256-drbg", FlagOption::Csprng(Csprng::Sha2_256Drbg)),
    ("csprng-blake2-512-drbg", FlagOption::Csprng(Csprng::Blake2_512Drbg)),
    ("csprng-blake2-256-drbg", FlagOption::Csprng(Csprng::Blake2_256Drbg)),
    ("csprng-whirlpool-drbg", FlagOption::Csprng(Csprng::WhirlpoolDrbg)),
    ("use-dev-random", FlagOption::EntropySource(EntropySource::DevRandom)),
    ("use-dev-urandom", FlagOption::EntropySource(EntropySource::DevUrandom)),
    ("use-os-random", FlagOption::EntropySource(EntropySource::OsRandom)),
    ("use-callback-random", FlagOption::EntropySource(EntropySource::Callback)),
];

impl FlagOption {
    /// Every named option
    pub fn all() -> impl Iterator<Item = FlagOption> {
        NAMED_OPTIONS.iter().map(|(_, opt)| *opt)
    }

    /// Wire location of this option. Independent bits use their own value
    /// as the mask.
    pub fn bits(&self) -> FlagBits {
        match self {
            FlagOption::Entropy(e) => FlagBits::w0(word0::ENTROPY_MASK, e.value()),
            FlagOption::Sampler(s) => FlagBits::w0(word0::SAMPLE_MASK, s.value()),
            FlagOption::Blinding => FlagBits::w0(word0::SAMPLE_BLINDING, word0::SAMPLE_BLINDING),
            FlagOption::HashLength(h) => FlagBits::w0(word0::HASH_LENGTH_MASK, h.value()),
            FlagOption::HashFunction(h) => FlagBits::w0(word0::HASH_FUNCTION_MASK, h.value()),
            FlagOption::Reduction(r) => FlagBits::w0(word0::REDUCTION_MASK, r.value()),
            FlagOption::ThreadingKeygen => {
                FlagBits::w0(word0::THREADING_KEYGEN, word0::THREADING_KEYGEN)
            }
            FlagOption::ThreadingEncSign => {
                FlagBits::w0(word0::THREADING_ENC_SIGN, word0::THREADING_ENC_SIGN)
            }
            FlagOption::ThreadingDecVerify => {
                FlagBits::w0(word0::THREADING_DEC_VERIFY, word0::THREADING_DEC_VERIFY)
            }
            FlagOption::Csprng(c) => FlagBits::w1(word1::CSPRNG_MASK, c.value()),
            FlagOption::EntropySource(s) => FlagBits::w1(word1::ENTROPY_SOURCE_MASK, s.value()),
        }
    }

    /// Whether the option lives in the second word
    pub fn is_extended(&self) -> bool {
        self.bits().word == 1
    }

    pub fn name(&self) -> &'static str {
        NAMED_OPTIONS
            .iter()
            .find(|(_, opt)| opt == self)
            .map(|(name, _)| *name)
            .unwrap_or("unnamed")
    }
}

impl fmt::Display for FlagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlagOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        match NAMED_OPTIONS.iter().find(|(name, _)| *name == wanted) {
            Some((_, opt)) => Ok(*opt),
            None => config_err!("unknown flag option '{}'", s),
        }
    }
}

/// Accumulator for the wire words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagWords {
    words: [u32; 2],
    extended: bool,
}

impl FlagWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign one field: clear its mask, then OR in the value
    pub fn assign(&mut self, bits: FlagBits) -> &mut Self {
        let word = &mut self.words[bits.word];
        *word = (*word & !bits.mask) | (bits.value & bits.mask);
        if bits.word == 1 {
            self.extended = true;
        }
        self
    }

    /// Assign a named option
    pub fn apply(&mut self, option: FlagOption) -> &mut Self {
        self.assign(option.bits())
    }

    /// Serialized words. Word 1 is emitted only when an extended option was
    /// assigned, in which case word 0 carries the continuation marker.
    pub fn to_vec(&self) -> Vec<u32> {
        if self.extended {
            vec![self.words[0] | MORE, self.words[1]]
        } else {
            vec![self.words[0] & !MORE]
        }
    }

    pub fn word0(&self) -> u32 {
        self.words[0]
    }

    pub fn word1(&self) -> Option<u32> {
        self.extended.then_some(self.words[1])
    }
}

/// Check the shape of raw wire words: one word, or two words when word 0
/// carries the continuation marker and word 1 does not.
///
/// The engine keeps reading words while the continuation bit is set, so a
/// slice ending in a marked word would be read past its end.
pub fn check_words(words: &[u32]) -> Result<()> {
    match words {
        [] => config_err!("no flag words"),
        [w0] if w0 & MORE != 0 => config_err!("continuation bit set but word 1 missing"),
        [_] => Ok(()),
        [w0, _] if w0 & MORE == 0 => config_err!("word 1 present without continuation bit"),
        [_, w1] if w1 & MORE != 0 => config_err!("continuation bit set on word 1"),
        [_, _] => Ok(()),
        _ => config_err!("{} flag words, at most 2 supported", words.len()),
    }
}

/// Structured configuration flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    pub entropy: Option<EntropyFlag>,
    pub sampler: Option<Sampler>,
    pub blinding: bool,
    pub hash_length: HashLength,
    pub hash_function: HashFunction,
    pub reduction: Reduction,
    pub threading: Threading,
    pub csprng: Option<Csprng>,
    pub entropy_source: Option<EntropySource>,
}

impl Flags {
    /// No flags set
    pub fn none() -> Self {
        Self::default()
    }

    /// Build flags from option names, later names overriding earlier ones
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::none();
        for name in names {
            flags.set(name.as_ref().parse()?);
        }
        Ok(flags)
    }

    /// Apply one option to its field
    pub fn set(&mut self, option: FlagOption) -> &mut Self {
        match option {
            FlagOption::Entropy(e) => self.entropy = Some(e),
            FlagOption::Sampler(s) => self.sampler = Some(s),
            FlagOption::Blinding => self.blinding = true,
            FlagOption::HashLength(h) => self.hash_length = h,
            FlagOption::HashFunction(h) => self.hash_function = h,
            FlagOption::Reduction(r) => self.reduction = r,
            FlagOption::ThreadingKeygen => self.threading.keygen = true,
            FlagOption::ThreadingEncSign => self.threading.enc_sign = true,
            FlagOption::ThreadingDecVerify => self.threading.dec_verify = true,
            FlagOption::Csprng(c) => self.csprng = Some(c),
            FlagOption::EntropySource(s) => self.entropy_source = Some(s),
        }
        self
    }

    /// Builder form of `set`
    pub fn with(mut self, option: FlagOption) -> Self {
        self.set(option);
        self
    }

    /// Whether a second word is required
    pub fn is_extended(&self) -> bool {
        self.csprng.is_some() || self.entropy_source.is_some()
    }

    /// Serialize to the engine's wire words
    pub fn encode(&self) -> Vec<u32> {
        let mut words = FlagWords::new();
        if let Some(e) = self.entropy {
            words.apply(FlagOption::Entropy(e));
        }
        if let Some(s) = self.sampler {
            words.apply(FlagOption::Sampler(s));
        }
        if self.blinding {
            words.apply(FlagOption::Blinding);
        }
        words
            .apply(FlagOption::HashLength(self.hash_length))
            .apply(FlagOption::HashFunction(self.hash_function))
            .apply(FlagOption::Reduction(self.reduction))
            .assign(FlagBits::w0(word0::THREADING_MASK, self.threading.value()));
        if let Some(c) = self.csprng {
            words.apply(FlagOption::Csprng(c));
        }
        if let Some(s) = self.entropy_source {
            words.apply(FlagOption::EntropySource(s));
        }
        let encoded = words.to_vec();
        log::trace!("Encoded configuration flags {:08x?}", encoded);
        encoded
    }

    /// Parse wire words back into named fields. Bit patterns that match no
    /// option of a group are rejected.
    pub fn decode(words: &[u32]) -> Result<Self> {
        if words.is_empty() {
            return Ok(Self::none());
        }
        check_words(words)?;
        let w0 = words[0];
        let w1 = words.get(1).copied();

        fn pick<T: Copy>(all: &[T], value: fn(&T) -> u32, bits: u32, group: &str) -> Result<Option<T>> {
            if bits == 0 {
                return Ok(None);
            }
            match all.iter().find(|v| value(v) == bits) {
                Some(v) => Ok(Some(*v)),
                None => config_err!("invalid {} bits {:#010x}", group, bits),
            }
        }

        let mut flags = Self::none();
        flags.entropy =
            pick(&EntropyFlag::ALL, EntropyFlag::value, w0 & word0::ENTROPY_MASK, "entropy")?;
        flags.sampler = pick(&Sampler::ALL, Sampler::value, w0 & word0::SAMPLE_MASK, "sampler")?;
        flags.blinding = w0 & word0::SAMPLE_BLINDING != 0;
        flags.hash_length = HashLength::ALL
            .iter()
            .copied()
            .find(|h| h.value() == w0 & word0::HASH_LENGTH_MASK)
            .unwrap_or_default();
        flags.hash_function = pick(
            &HashFunction::ALL,
            HashFunction::value,
            w0 & word0::HASH_FUNCTION_MASK,
            "hash function",
        )?
        .unwrap_or_default();
        flags.reduction =
            pick(&Reduction::ALL, Reduction::value, w0 & word0::REDUCTION_MASK, "reduction")?
                .unwrap_or_default();
        flags.threading = Threading {
            keygen: w0 & word0::THREADING_KEYGEN != 0,
            enc_sign: w0 & word0::THREADING_ENC_SIGN != 0,
            dec_verify: w0 & word0::THREADING_DEC_VERIFY != 0,
        };
        if let Some(w1) = w1 {
            flags.csprng = pick(&Csprng::ALL, Csprng::value, w1 & word1::CSPRNG_MASK, "csprng")?;
            flags.entropy_source = pick(
                &EntropySource::ALL,
                EntropySource::value,
                w1 & word1::ENTROPY_SOURCE_MASK,
                "entropy source",
            )?;
        }
        Ok(flags)
    }
}
