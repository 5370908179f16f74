/*!
Common enumerations shared by the engine seam and the session API.

The discriminants match the native engine's C enumerations, so every type
here converts losslessly to and from the raw integer passed across the
boundary.
*/

use std::fmt;

use crate::core::error::{Error, Result};

/// Scheme selected when a session is created
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    None = 0,
    SigHelloWorld = 1,
    SigBliss = 2,
    SigRingTesla = 3,
    EncRlwe = 4,
    KemEns = 5,
    SigEns = 6,
    SigEnsWithRecovery = 7,
    IbeDlp = 8,
    SigDlp = 9,
    SigDlpWithRecovery = 10,
    SigDilithium = 11,
    SigDilithiumG = 12,
    KemKyber = 13,
    EncKyberCpa = 14,
    EncKyberHybrid = 15,
    DhEcdh = 16,
    SigEcdsa = 17,
}

impl Scheme {
    /// All schemes known to the binding, in discriminant order
    pub const ALL: [Scheme; 18] = [
        Scheme::None,
        Scheme::SigHelloWorld,
        Scheme::SigBliss,
        Scheme::SigRingTesla,
        Scheme::EncRlwe,
        Scheme::KemEns,
        Scheme::SigEns,
        Scheme::SigEnsWithRecovery,
        Scheme::IbeDlp,
        Scheme::SigDlp,
        Scheme::SigDlpWithRecovery,
        Scheme::SigDilithium,
        Scheme::SigDilithiumG,
        Scheme::KemKyber,
        Scheme::EncKyberCpa,
        Scheme::EncKyberHybrid,
        Scheme::DhEcdh,
        Scheme::SigEcdsa,
    ];

    /// Convert a raw engine value to a Scheme
    pub fn from_raw(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the raw engine value of this Scheme
    pub fn as_raw(&self) -> u32 {
        *self as u32
    }

    /// Whether the scheme produces signatures
    pub fn is_signature(&self) -> bool {
        matches!(
            self,
            Scheme::SigHelloWorld
                | Scheme::SigBliss
                | Scheme::SigRingTesla
                | Scheme::SigEns
                | Scheme::SigEnsWithRecovery
                | Scheme::SigDlp
                | Scheme::SigDlpWithRecovery
                | Scheme::SigDilithium
                | Scheme::SigDilithiumG
                | Scheme::SigEcdsa
        )
    }

    /// Whether the scheme is a public-key encryption scheme
    pub fn is_encryption(&self) -> bool {
        matches!(
            self,
            Scheme::EncRlwe | Scheme::EncKyberCpa | Scheme::EncKyberHybrid
        )
    }

    /// Whether the scheme is a key encapsulation mechanism
    pub fn is_kem(&self) -> bool {
        matches!(self, Scheme::KemEns | Scheme::KemKyber)
    }

    /// Engine name of the scheme
    pub fn name(&self) -> &'static str {
        match self {
            Scheme::None => "SC_SCHEME_NONE",
            Scheme::SigHelloWorld => "SC_SCHEME_SIG_HELLO_WORLD",
            Scheme::SigBliss => "SC_SCHEME_SIG_BLISS",
            Scheme::SigRingTesla => "SC_SCHEME_SIG_RING_TESLA",
            Scheme::EncRlwe => "SC_SCHEME_ENC_RLWE",
            Scheme::KemEns => "SC_SCHEME_KEM_ENS",
            Scheme::SigEns => "SC_SCHEME_SIG_ENS",
            Scheme::SigEnsWithRecovery => "SC_SCHEME_SIG_ENS_WITH_RECOVERY",
            Scheme::IbeDlp => "SC_SCHEME_IBE_DLP",
            Scheme::SigDlp => "SC_SCHEME_SIG_DLP",
            Scheme::SigDlpWithRecovery => "SC_SCHEME_SIG_DLP_WITH_RECOVERY",
            Scheme::SigDilithium => "SC_SCHEME_SIG_DILITHIUM",
            Scheme::SigDilithiumG => "SC_SCHEME_SIG_DILITHIUM_G",
            Scheme::KemKyber => "SC_SCHEME_KEM_KYBER",
            Scheme::EncKyberCpa => "SC_SCHEME_ENC_KYBER_CPA",
            Scheme::EncKyberHybrid => "SC_SCHEME_ENC_KYBER_HYBRID",
            Scheme::DhEcdh => "SC_SCHEME_DH_ECDH",
            Scheme::SigEcdsa => "SC_SCHEME_SIG_ECDSA",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for Scheme {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_raw(value).ok_or(Error::UnknownValue { kind: "scheme", value: value as i64 })
    }
}

/// Entropy coding applied to serialized keys and signatures
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum EntropyCoding {
    #[default]
    None = 0,
    Bac = 1,
    BacRle = 2,
    HuffmanStatic = 3,
    StrongSwan = 4,
}

impl EntropyCoding {
    pub const ALL: [EntropyCoding; 5] = [
        EntropyCoding::None,
        EntropyCoding::Bac,
        EntropyCoding::BacRle,
        EntropyCoding::HuffmanStatic,
        EntropyCoding::StrongSwan,
    ];

    pub fn from_raw(value: u32) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_raw(&self) -> u32 {
        *self as u32
    }

    /// Engine name of the coding
    pub fn name(&self) -> &'static str {
        match self {
            EntropyCoding::None => "SC_ENTROPY_NONE",
            EntropyCoding::Bac => "SC_ENTROPY_BAC",
            EntropyCoding::BacRle => "SC_ENTROPY_BAC_RLE",
            EntropyCoding::HuffmanStatic => "SC_ENTROPY_HUFFMAN_STATIC",
            EntropyCoding::StrongSwan => "SC_ENTROPY_STRONGSWAN",
        }
    }
}

impl fmt::Display for EntropyCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for EntropyCoding {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_raw(value)
            .ok_or(Error::UnknownValue { kind: "entropy coding", value: value as i64 })
    }
}

/// Codings applied to the public and private key of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyCoding {
    pub public: EntropyCoding,
    pub private: EntropyCoding,
}

impl KeyCoding {
    pub fn new(public: EntropyCoding, private: EntropyCoding) -> Self {
        Self { public, private }
    }

    /// Same coding for both keys
    pub fn uniform(coding: EntropyCoding) -> Self {
        Self { public: coding, private: coding }
    }
}

/// Verbosity of the engine's internal logging
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugLevel {
    #[default]
    None = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
}

impl DebugLevel {
    pub fn from_raw(value: u32) -> Option<Self> {
        match value {
            0 => Some(DebugLevel::None),
            1 => Some(DebugLevel::Error),
            2 => Some(DebugLevel::Warning),
            3 => Some(DebugLevel::Info),
            4 => Some(DebugLevel::Debug),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> u32 {
        *self as u32
    }
}

impl TryFrom<u32> for DebugLevel {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::from_raw(value).ok_or(Error::UnknownValue { kind: "debug level", value: value as i64 })
    }
}

/// Component categories tracked by the engine statistics
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum StatComponent {
    PublicKey = 0,
    PrivateKey = 1,
    Signature = 2,
    Extract = 3,
    Encrypt = 4,
    Encapsulate = 5,
}

impl StatComponent {
    pub const ALL: [StatComponent; 6] = [
        StatComponent::PublicKey,
        StatComponent::PrivateKey,
        StatComponent::Signature,
        StatComponent::Extract,
        StatComponent::Encrypt,
        StatComponent::Encapsulate,
    ];

    /// Index of the component in the statistics tables
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Error codes recorded in a session's error queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// Queue is empty, or the call succeeded
    #[default]
    Ok,
    OutOfBounds,
    CreateError,
    NullPointer,
    Error,
    InvalidFunctionCall,
    GetErrNullPointer,
    InvalidFilePtr,
    QueueFull,
    QueueEmpty,
    FailedLock,
    ThreadError,
    ThreadExiting,
    DisabledAtCompile,
    /// A code outside the documented range
    Unknown(u32),
}

impl ErrorCode {
    /// Get the raw engine value of this code
    pub fn as_raw(&self) -> u32 {
        match self {
            ErrorCode::Ok => 0,
            ErrorCode::OutOfBounds => 1,
            ErrorCode::CreateError => 2,
            ErrorCode::NullPointer => 3,
            ErrorCode::Error => 4,
            ErrorCode::InvalidFunctionCall => 5,
            ErrorCode::GetErrNullPointer => 6,
            ErrorCode::InvalidFilePtr => 7,
            ErrorCode::QueueFull => 8,
            ErrorCode::QueueEmpty => 9,
            ErrorCode::FailedLock => 10,
            ErrorCode::ThreadError => 11,
            ErrorCode::ThreadExiting => 12,
            ErrorCode::DisabledAtCompile => 13,
            ErrorCode::Unknown(v) => *v,
        }
    }

    /// Whether this is the empty-queue sentinel
    pub fn is_ok(&self) -> bool {
        *self == ErrorCode::Ok
    }
}

impl From<u32> for ErrorCode {
    fn from(value: u32) -> Self {
        match value {
            0 => ErrorCode::Ok,
            1 => ErrorCode::OutOfBounds,
            2 => ErrorCode::CreateError,
            3 => ErrorCode::NullPointer,
            4 => ErrorCode::Error,
            5 => ErrorCode::InvalidFunctionCall,
            6 => ErrorCode::GetErrNullPointer,
            7 => ErrorCode::InvalidFilePtr,
            8 => ErrorCode::QueueFull,
            9 => ErrorCode::QueueEmpty,
            10 => ErrorCode::FailedLock,
            11 => ErrorCode::ThreadError,
            12 => ErrorCode::ThreadExiting,
            13 => ErrorCode::DisabledAtCompile,
            other => ErrorCode::Unknown(other),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Unknown(v) => write!(f, "unknown error code {}", v),
            other => write!(f, "{:?} ({})", other, other.as_raw()),
        }
    }
}

/// Packed engine version number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub patch: u8,
}

impl Version {
    /// Unpack `major << 24 | minor << 16 | build << 8 | patch`
    pub fn from_raw(raw: u32) -> Self {
        let [major, minor, build, patch] = raw.to_be_bytes();
        Self { major, minor, build, patch }
    }

    pub fn as_raw(&self) -> u32 {
        u32::from_be_bytes([self.major, self.minor, self.build, self.patch])
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.patch)
    }
}
