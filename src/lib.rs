/*!
# SAFEcrypto Session

A safe Rust binding over the SAFEcrypto post-quantum cryptography engine.

## Overview

This library wraps one engine session per `Session` value and provides:

- Session creation from a scheme, a parameter set and structured flags
- Guarded single release of the engine session, explicit or on drop
- Key generation, key encoding and loading with selectable entropy coding
- Public-key encryption, signatures, signature transcoding and KEM
- Typed errors built from the engine's per-session error queue
- Decoding of the engine's usage statistics record
- Hex transport for keys and signatures

Engine output buffers are copied into owned storage and released exactly
once, on every path out of an operation. Key material is wiped on drop.

## Engines

All engine access goes through the `Engine` trait. With the `native`
feature, `NativeEngine` links against `libsafecrypto`.

```ignore
use safecrypto_session::{NativeEngine, Session, SessionConfig};

let session = Session::with_config(NativeEngine::new(), &SessionConfig::signature_default())?;
session.keygen()?;
let signature = session.sign(&[0u8; 64])?;
assert!(session.verify(&[0u8; 64], &signature)?);
```
*/

// Core binding components
pub mod core;

// Raw engine declarations
#[cfg(feature = "native")]
pub mod ffi;

// Re-export commonly used types for convenience
pub use crate::core::config::SessionConfig;
pub use crate::core::constants::{flags as flag_bits, sizes, MAX_ERROR_MESSAGES, VERIFY_VALID};
pub use crate::core::engine::{Engine, RawErrorLine, RawHandle};
pub use crate::core::error::{Error, Operation, Result};
pub use crate::core::flags::{
    Csprng, EntropyFlag, EntropySource, FlagOption, FlagWords, Flags, HashFunction, HashLength,
    Reduction, Sampler, Threading,
};
pub use crate::core::hex::{bytes_to_hex, hex_to_bytes};
pub use crate::core::memory::{KeyMaterial, NativeBuffer, ReleaseFn, libc_release};
pub use crate::core::session::{Encapsulation, ErrorLocation, ErrorRecord, Session, Transcoded};
pub use crate::core::stats::{CodingStats, ComponentStats, Statistics};
pub use crate::core::types::{
    DebugLevel, EntropyCoding, ErrorCode, KeyCoding, Scheme, StatComponent, Version,
};

#[cfg(feature = "native")]
pub use crate::core::engine::NativeEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
