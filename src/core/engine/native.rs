/*!
`Engine` backend that calls the linked `libsafecrypto`.
*/

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr;
use std::slice;

use crate::core::constants::sizes;
use crate::core::engine::{Engine, RawErrorLine, RawHandle};
use crate::core::memory::NativeBuffer;
use crate::core::types::Scheme;
use crate::ffi::sys::{self, safecrypto_t};

/// The native SAFEcrypto engine
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }
}

fn sc(handle: &RawHandle) -> *mut safecrypto_t {
    handle.as_ptr().cast()
}

/// Convert a borrowed C string, treating null as absent
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that outlives the call.
unsafe fn c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

fn error_line(
    handle: &RawHandle,
    read: unsafe extern "C" fn(*mut safecrypto_t, *mut *const c_char, *mut c_int) -> u32,
) -> RawErrorLine {
    let mut file: *const c_char = ptr::null();
    let mut line: c_int = 0;
    let code = unsafe { read(sc(handle), &mut file, &mut line) };
    RawErrorLine {
        code,
        file: unsafe { c_string(file) },
        line,
    }
}

impl Engine for NativeEngine {
    fn create(&self, scheme: Scheme, param_set: i32, flags: &[u32]) -> Option<RawHandle> {
        // The session layer only passes word slices that end without a
        // continuation bit, so the engine never reads past `flags`.
        unsafe {
            let ptr = sys::safecrypto_create(scheme.as_raw(), param_set, flags.as_ptr());
            RawHandle::new(ptr.cast())
        }
    }

    fn destroy(&self, handle: RawHandle) -> i32 {
        unsafe { sys::safecrypto_destroy(sc(&handle)) }
    }

    fn version(&self) -> u32 {
        unsafe { sys::safecrypto_get_version() }
    }

    fn version_string(&self) -> String {
        unsafe { c_string(sys::safecrypto_get_version_string()) }.unwrap_or_default()
    }

    fn set_debug_level(&self, handle: &RawHandle, level: u32) -> i32 {
        unsafe { sys::safecrypto_set_debug_level(sc(handle), level) }
    }

    fn debug_level(&self, handle: &RawHandle) -> u32 {
        unsafe { sys::safecrypto_get_debug_level(sc(handle)) }
    }

    fn err_get_error(&self, handle: &RawHandle) -> u32 {
        unsafe { sys::safecrypto_err_get_error(sc(handle)) }
    }

    fn err_peek_error(&self, handle: &RawHandle) -> u32 {
        unsafe { sys::safecrypto_err_peek_error(sc(handle)) }
    }

    fn err_get_error_line(&self, handle: &RawHandle) -> RawErrorLine {
        error_line(handle, sys::safecrypto_err_get_error_line)
    }

    fn err_peek_error_line(&self, handle: &RawHandle) -> RawErrorLine {
        error_line(handle, sys::safecrypto_err_peek_error_line)
    }

    fn err_clear_error(&self, handle: &RawHandle) {
        unsafe { sys::safecrypto_err_clear_error(sc(handle)) }
    }

    fn keygen(&self, handle: &RawHandle) -> i32 {
        unsafe { sys::safecrypto_keygen(sc(handle)) }
    }

    fn set_key_coding(&self, handle: &RawHandle, public: u32, private: u32) -> i32 {
        unsafe { sys::safecrypto_set_key_coding(sc(handle), public, private) }
    }

    fn get_key_coding(&self, handle: &RawHandle, public: &mut u32, private: &mut u32) -> i32 {
        unsafe { sys::safecrypto_get_key_coding(sc(handle), public, private) }
    }

    fn public_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32 {
        unsafe { sys::safecrypto_public_key_load(sc(handle), key.as_ptr(), key.len()) }
    }

    fn private_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32 {
        unsafe { sys::safecrypto_private_key_load(sc(handle), key.as_ptr(), key.len()) }
    }

    fn public_key_encode(&self, handle: &RawHandle, key: &mut NativeBuffer) -> i32 {
        unsafe { sys::safecrypto_public_key_encode(sc(handle), key.ptr_out(), key.len_out()) }
    }

    fn private_key_encode(&self, handle: &RawHandle, key: &mut NativeBuffer) -> i32 {
        unsafe { sys::safecrypto_private_key_encode(sc(handle), key.ptr_out(), key.len_out()) }
    }

    fn public_encrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32 {
        unsafe {
            sys::safecrypto_public_encrypt(
                sc(handle),
                from.len(),
                from.as_ptr(),
                to.len_out(),
                to.ptr_out(),
            )
        }
    }

    fn private_decrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32 {
        unsafe {
            sys::safecrypto_private_decrypt(
                sc(handle),
                from.len(),
                from.as_ptr(),
                to.len_out(),
                to.ptr_out(),
            )
        }
    }

    fn sign(&self, handle: &RawHandle, message: &[u8], signature: &mut NativeBuffer) -> i32 {
        unsafe {
            sys::safecrypto_sign(
                sc(handle),
                message.as_ptr(),
                message.len(),
                signature.ptr_out(),
                signature.len_out(),
            )
        }
    }

    fn verify(&self, handle: &RawHandle, message: &[u8], signature: &[u8]) -> i32 {
        unsafe {
            sys::safecrypto_verify(
                sc(handle),
                message.as_ptr(),
                message.len(),
                signature.as_ptr(),
                signature.len(),
            )
        }
    }

    fn signature_transcode(
        &self,
        handle: &RawHandle,
        from: u32,
        to: u32,
        signature: &[u8],
        transcoded: &mut NativeBuffer,
        vector_length: &mut usize,
    ) -> i32 {
        unsafe {
            sys::safecrypto_signature_transcode(
                sc(handle),
                from,
                to,
                signature.as_ptr(),
                signature.len(),
                transcoded.ptr_out(),
                transcoded.len_out(),
                vector_length,
            )
        }
    }

    fn encapsulation(
        &self,
        handle: &RawHandle,
        ciphertext: &mut NativeBuffer,
        key: &mut NativeBuffer,
    ) -> i32 {
        unsafe {
            sys::safecrypto_encapsulation(
                sc(handle),
                ciphertext.ptr_out(),
                ciphertext.len_out(),
                key.ptr_out(),
                key.len_out(),
            )
        }
    }

    fn decapsulation(&self, handle: &RawHandle, ciphertext: &[u8], key: &mut NativeBuffer) -> i32 {
        unsafe {
            sys::safecrypto_decapsulation(
                sc(handle),
                ciphertext.as_ptr(),
                ciphertext.len(),
                key.ptr_out(),
                key.len_out(),
            )
        }
    }

    fn statistics(&self, handle: &RawHandle) -> Option<Vec<u8>> {
        let record = unsafe { sys::safecrypto_get_stats(sc(handle)) };
        if record.is_null() {
            return None;
        }
        // The record lives inside the session and is only borrowed here.
        Some(unsafe { slice::from_raw_parts(record, sizes::STATISTICS_RECORD) }.to_vec())
    }
}
