/*!
Session management for the SAFEcrypto engine.

A `Session` owns exactly one engine session. The handle is released once,
either by an explicit `destroy` or when the session is dropped; every
other call first checks that the session is still live.

The operations are split by concern:

- `handle`: creation, destruction, debug level and version queries
- `error_queue`: reading the engine's per-session error queue
- `keys`: key coding, key encoding and loading
- `operations`: key generation, encryption, signatures, KEM and statistics
*/

pub mod error_queue;
pub mod handle;
pub mod keys;
pub mod operations;

use crate::core::engine::{Engine, RawHandle};
use crate::core::types::Scheme;

pub use self::error_queue::{ErrorLocation, ErrorRecord};
pub use self::operations::{Encapsulation, Transcoded};

/// A live engine session
pub struct Session<E: Engine> {
    engine: E,
    /// `None` once the session has been released
    handle: Option<RawHandle>,
    scheme: Scheme,
    param_set: i32,
    /// Flag words the session was created with
    flags: Vec<u32>,
}
