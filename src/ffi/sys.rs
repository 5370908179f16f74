/*!
Raw declarations of the `libsafecrypto` C API.

Only the calls used by the session layer are declared. Every output buffer
is allocated by the engine with the C allocator and must be released with
`free` by the caller.
*/

use std::os::raw::{c_char, c_int};

/// Opaque engine session (`safecrypto_t`)
#[allow(non_camel_case_types)]
#[repr(C)]
pub struct safecrypto_t {
    _private: [u8; 0],
}

#[link(name = "safecrypto")]
unsafe extern "C" {
    pub fn safecrypto_get_version() -> u32;
    pub fn safecrypto_get_version_string() -> *const c_char;

    pub fn safecrypto_create(scheme: u32, set: i32, flags: *const u32) -> *mut safecrypto_t;
    pub fn safecrypto_destroy(sc: *mut safecrypto_t) -> i32;

    pub fn safecrypto_set_debug_level(sc: *mut safecrypto_t, level: u32) -> i32;
    pub fn safecrypto_get_debug_level(sc: *mut safecrypto_t) -> u32;

    pub fn safecrypto_err_get_error(sc: *mut safecrypto_t) -> u32;
    pub fn safecrypto_err_peek_error(sc: *mut safecrypto_t) -> u32;
    pub fn safecrypto_err_get_error_line(
        sc: *mut safecrypto_t,
        file: *mut *const c_char,
        line: *mut c_int,
    ) -> u32;
    pub fn safecrypto_err_peek_error_line(
        sc: *mut safecrypto_t,
        file: *mut *const c_char,
        line: *mut c_int,
    ) -> u32;
    pub fn safecrypto_err_clear_error(sc: *mut safecrypto_t);

    pub fn safecrypto_keygen(sc: *mut safecrypto_t) -> i32;
    pub fn safecrypto_set_key_coding(sc: *mut safecrypto_t, public: u32, private: u32) -> i32;
    pub fn safecrypto_get_key_coding(
        sc: *mut safecrypto_t,
        public: *mut u32,
        private: *mut u32,
    ) -> i32;

    pub fn safecrypto_public_key_load(sc: *mut safecrypto_t, key: *const u8, keylen: usize) -> i32;
    pub fn safecrypto_private_key_load(sc: *mut safecrypto_t, key: *const u8, keylen: usize)
    -> i32;
    pub fn safecrypto_public_key_encode(
        sc: *mut safecrypto_t,
        key: *mut *mut u8,
        keylen: *mut usize,
    ) -> i32;
    pub fn safecrypto_private_key_encode(
        sc: *mut safecrypto_t,
        key: *mut *mut u8,
        keylen: *mut usize,
    ) -> i32;

    pub fn safecrypto_encapsulation(
        sc: *mut safecrypto_t,
        c: *mut *mut u8,
        c_len: *mut usize,
        k: *mut *mut u8,
        k_len: *mut usize,
    ) -> i32;
    pub fn safecrypto_decapsulation(
        sc: *mut safecrypto_t,
        c: *const u8,
        c_len: usize,
        k: *mut *mut u8,
        k_len: *mut usize,
    ) -> i32;

    pub fn safecrypto_public_encrypt(
        sc: *mut safecrypto_t,
        flen: usize,
        from: *const u8,
        tlen: *mut usize,
        to: *mut *mut u8,
    ) -> i32;
    pub fn safecrypto_private_decrypt(
        sc: *mut safecrypto_t,
        flen: usize,
        from: *const u8,
        tlen: *mut usize,
        to: *mut *mut u8,
    ) -> i32;

    pub fn safecrypto_sign(
        sc: *mut safecrypto_t,
        m: *const u8,
        mlen: usize,
        sigret: *mut *mut u8,
        siglen: *mut usize,
    ) -> i32;
    pub fn safecrypto_verify(
        sc: *mut safecrypto_t,
        m: *const u8,
        mlen: usize,
        sigbuf: *const u8,
        siglen: usize,
    ) -> i32;

    pub fn safecrypto_signature_transcode(
        sc: *mut safecrypto_t,
        from: u32,
        to: u32,
        sigbuf: *const u8,
        siglen: usize,
        sigtrans: *mut *mut u8,
        sigtranslen: *mut usize,
        length: *mut usize,
    ) -> i32;

    pub fn safecrypto_get_stats(sc: *mut safecrypto_t) -> *const u8;
}
