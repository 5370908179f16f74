/*!
The seam between the session layer and the native engine.

`Engine` mirrors the engine's C API call for call: integer return codes,
raw enumeration values and engine-allocated output buffers. The session
layer above it owns all interpretation (return-code checks, error-queue
consultation, copy-then-release), so a backend only forwards calls.
*/

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

use crate::core::memory::{libc_release, NativeBuffer, ReleaseFn};
use crate::core::types::Scheme;

#[cfg(feature = "native")]
pub mod native;

#[cfg(feature = "native")]
pub use native::NativeEngine;

/// Non-null pointer to an engine session.
///
/// A handle may move to another thread with its owner but is never shared:
/// the engine gives no guarantee for overlapping calls on one session.
pub struct RawHandle(NonNull<c_void>);

// A handle moves with its single owner and is never shared, so no Sync impl.
unsafe impl Send for RawHandle {}

impl RawHandle {
    /// Wrap a pointer returned by the engine, rejecting null
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live engine session owned by the caller, and
    /// must not be wrapped twice.
    pub unsafe fn new(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0.as_ptr()
    }
}

impl fmt::Debug for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawHandle({:p})", self.0)
    }
}

/// Raw result of an error-queue read that reports the source location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawErrorLine {
    pub code: u32,
    pub file: Option<String>,
    pub line: i32,
}

/// One-to-one view of the native engine API
pub trait Engine {
    /// Create a session, or `None` when the engine returns null
    fn create(&self, scheme: Scheme, param_set: i32, flags: &[u32]) -> Option<RawHandle>;

    /// Destroy a session. The handle is consumed and must not be reused.
    fn destroy(&self, handle: RawHandle) -> i32;

    /// Packed library version
    fn version(&self) -> u32;

    /// Human-readable build string
    fn version_string(&self) -> String;

    /// Function used to release buffers this engine allocates
    fn release_fn(&self) -> ReleaseFn {
        libc_release
    }

    fn set_debug_level(&self, handle: &RawHandle, level: u32) -> i32;
    fn debug_level(&self, handle: &RawHandle) -> u32;

    fn err_get_error(&self, handle: &RawHandle) -> u32;
    fn err_peek_error(&self, handle: &RawHandle) -> u32;
    fn err_get_error_line(&self, handle: &RawHandle) -> RawErrorLine;
    fn err_peek_error_line(&self, handle: &RawHandle) -> RawErrorLine;
    fn err_clear_error(&self, handle: &RawHandle);

    fn keygen(&self, handle: &RawHandle) -> i32;
    fn set_key_coding(&self, handle: &RawHandle, public: u32, private: u32) -> i32;
    fn get_key_coding(&self, handle: &RawHandle, public: &mut u32, private: &mut u32) -> i32;

    fn public_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32;
    fn private_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32;
    fn public_key_encode(&self, handle: &RawHandle, key: &mut NativeBuffer) -> i32;
    fn private_key_encode(&self, handle: &RawHandle, key: &mut NativeBuffer) -> i32;

    fn public_encrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32;
    fn private_decrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32;

    fn sign(&self, handle: &RawHandle, message: &[u8], signature: &mut NativeBuffer) -> i32;
    fn verify(&self, handle: &RawHandle, message: &[u8], signature: &[u8]) -> i32;

    fn signature_transcode(
        &self,
        handle: &RawHandle,
        from: u32,
        to: u32,
        signature: &[u8],
        transcoded: &mut NativeBuffer,
        vector_length: &mut usize,
    ) -> i32;

    fn encapsulation(
        &self,
        handle: &RawHandle,
        ciphertext: &mut NativeBuffer,
        key: &mut NativeBuffer,
    ) -> i32;
    fn decapsulation(&self, handle: &RawHandle, ciphertext: &[u8], key: &mut NativeBuffer) -> i32;

    /// Copy of the session's packed statistics record, if the engine has one
    fn statistics(&self, handle: &RawHandle) -> Option<Vec<u8>>;
}
