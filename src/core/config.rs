/*!
Session configuration.

A `SessionConfig` gathers everything needed to open a session and put it
into a usable state: scheme, parameter set, creation flags, debug level and
the sticky key coding applied straight after creation.
*/

use crate::config_err;
use crate::core::error::Result;
use crate::core::flags::{EntropyFlag, FlagOption, Flags};
use crate::core::types::{DebugLevel, EntropyCoding, KeyCoding, Scheme};

/// Configuration for a session
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    /// Scheme to instantiate
    pub scheme: Scheme,
    /// Parameter set index
    pub param_set: i32,
    /// Creation flags
    pub flags: Flags,
    /// Engine debug level
    pub debug_level: DebugLevel,
    /// Coding for encoded and loaded keys
    pub key_coding: KeyCoding,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::signature_default()
    }
}

impl SessionConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a scheme and parameter set, no flags
    pub fn for_scheme(scheme: Scheme, param_set: i32) -> Self {
        Self {
            scheme,
            param_set,
            flags: Flags::none(),
            debug_level: DebugLevel::None,
            key_coding: KeyCoding::default(),
        }
    }

    /// BLISS-B parameter set 4 with no flags and uncoded keys
    pub fn signature_default() -> Self {
        Self::for_scheme(Scheme::SigBliss, 4)
    }

    /// Smallest BLISS-B parameter set
    pub fn lightweight() -> Self {
        Self::for_scheme(Scheme::SigBliss, 0)
    }

    /// BLISS-B parameter set 4 with Huffman-coded signatures and keys
    pub fn compressed() -> Self {
        Self::signature_default()
            .with_flag(FlagOption::Entropy(EntropyFlag::HuffmanStatic))
            .with_key_coding(KeyCoding::uniform(EntropyCoding::HuffmanStatic))
    }

    pub fn with_param_set(mut self, param_set: i32) -> Self {
        self.param_set = param_set;
        self
    }

    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Add one flag option, replacing any earlier value of its field
    pub fn with_flag(mut self, option: FlagOption) -> Self {
        self.flags.set(option);
        self
    }

    pub fn with_debug_level(mut self, level: DebugLevel) -> Self {
        self.debug_level = level;
        self
    }

    pub fn with_key_coding(mut self, coding: KeyCoding) -> Self {
        self.key_coding = coding;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scheme == Scheme::None {
            return config_err!("no scheme selected");
        }
        if self.param_set < 0 {
            return config_err!("parameter set must not be negative, got {}", self.param_set);
        }
        Ok(())
    }
}
