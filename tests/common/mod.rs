// tests/common/mod.rs
//
// In-process stand-in for the SAFEcrypto engine. It follows the engine's
// calling conventions (data and key calls return zero on failure, status
// calls return zero on success, per-session FIFO error queue of 8 records,
// malloc'd output buffers) and implements toy transforms on top of SHA-256
// so round trips can be checked.
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::ffi::c_void;
use std::ptr;
use std::sync::{Arc, Mutex, MutexGuard};

use safecrypto_session::{
    flag_bits, sizes, CodingStats, Engine, EntropyCoding, ErrorCode, NativeBuffer, RawErrorLine,
    RawHandle, ReleaseFn, Scheme, StatComponent, Statistics, MAX_ERROR_MESSAGES,
};
use sha2::{Digest, Sha256};

pub const MOCK_VERSION: u32 = 0x0203_0001;
pub const MOCK_FILE: &str = "mock_engine.c";

/// Largest plaintext the toy cipher accepts
pub const MAX_PLAINTEXT: usize = 256;

const CHECKSUM_LEN: usize = 8;

/// Status call results (`SC_FUNC_SUCCESS` / `SC_FUNC_FAILURE`)
const STATUS_OK: i32 = 0;
const STATUS_FAILED: i32 = 1;

/// Second header byte of every encoded key
const KEY_FORMAT: u8 = 0x01;

/// Strip the `[coding, format]` header of an encoded key
fn key_body(key: &[u8], coding: u32) -> Option<&[u8]> {
    match key {
        [tag, KEY_FORMAT, body @ ..] if *tag as u32 == coding && body.len() == 32 => Some(body),
        _ => None,
    }
}

thread_local! {
    static ALLOCATED: Cell<usize> = const { Cell::new(0) };
    static RELEASED: Cell<usize> = const { Cell::new(0) };
}

/// Buffers handed out by the mock on this thread and not yet released
pub fn outstanding_buffers() -> isize {
    ALLOCATED.with(|a| a.get()) as isize - RELEASED.with(|r| r.get()) as isize
}

pub fn released_buffers() -> usize {
    RELEASED.with(|r| r.get())
}

unsafe fn counting_free(ptr: *mut u8, _len: usize) {
    RELEASED.with(|r| r.set(r.get() + 1));
    unsafe { libc::free(ptr.cast()) }
}

/// Hand bytes to the caller the way the engine does
fn give(out: &mut NativeBuffer, bytes: &[u8]) {
    unsafe {
        let p = libc::malloc(bytes.len().max(1)) as *mut u8;
        assert!(!p.is_null(), "malloc failed");
        ptr::copy_nonoverlapping(bytes.as_ptr(), p, bytes.len());
        *out.ptr_out() = p;
        *out.len_out() = bytes.len();
    }
    ALLOCATED.with(|a| a.set(a.get() + 1));
}

fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

fn sha256_pair(a: &[u8], b: &[u8]) -> Vec<u8> {
    Sha256::new().chain_update(a).chain_update(b).finalize().to_vec()
}

fn keystream(public: &[u8], len: usize) -> Vec<u8> {
    let mut stream = Vec::with_capacity(len);
    let mut block = 0u32;
    while stream.len() < len {
        stream.extend(sha256_pair(public, &block.to_be_bytes()));
        block += 1;
    }
    stream.truncate(len);
    stream
}

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Coding the engine would pick for a scheme's signatures from word 0
fn signature_coding(word0: u32) -> EntropyCoding {
    match word0 & flag_bits::word0::ENTROPY_MASK {
        flag_bits::word0::ENTROPY_BAC => EntropyCoding::Bac,
        flag_bits::word0::ENTROPY_BAC_RLE => EntropyCoding::BacRle,
        flag_bits::word0::ENTROPY_STRONGSWAN => EntropyCoding::StrongSwan,
        flag_bits::word0::ENTROPY_HUFFMAN_STATIC => EntropyCoding::HuffmanStatic,
        _ => EntropyCoding::None,
    }
}

pub struct MockSession {
    pub scheme: Scheme,
    pub param_set: i32,
    pub flags: Vec<u32>,
    pub debug_level: u32,
    pub errors: VecDeque<(u32, i32)>,
    pub public_coding: u32,
    pub private_coding: u32,
    pub public_key: Option<Vec<u8>>,
    pub private_key: Option<Vec<u8>>,
    pub stats: Statistics,
}

impl MockSession {
    /// Queue an error, dropping it when the queue is full
    fn push_error(&mut self, code: ErrorCode, line: i32) -> i32 {
        if self.errors.len() < MAX_ERROR_MESSAGES {
            self.errors.push_back((code.as_raw(), line));
        }
        0
    }

    fn record_coding(&mut self, component: StatComponent, raw: usize, coded: usize, coding: u32) {
        let name = EntropyCoding::from_raw(coding)
            .map(|c| c.name().to_string())
            .unwrap_or_default();
        let table = &mut self.stats.components[component.index()];
        table.count = 1;
        table.codings[0] = CodingStats { bits: raw * 8, bits_coded: coded * 8, name };
    }
}

#[derive(Default)]
pub struct MockState {
    next_id: usize,
    pub sessions: HashMap<usize, MockSession>,
    pub created: usize,
    pub destroyed: usize,
    /// Destroy calls for a handle that was already destroyed
    pub double_destroys: usize,
    /// Forced return code for `verify`
    pub verify_override: Option<i32>,
    /// Report no statistics record
    pub stats_unavailable: bool,
    /// Make `destroy` report failure
    pub fail_destroy: bool,
    /// Make `keygen` fail without queueing an error
    pub fail_keygen_silently: bool,
    /// Make `set_debug_level` report failure
    pub reject_debug_level: bool,
    /// Behave like a scheme without a key coding hook
    pub key_coding_unsupported: bool,
}

/// Cloneable handle on the shared mock state
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<MockState>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn live_sessions(&self) -> usize {
        self.state().sessions.len()
    }

    /// Queue an error on every live session
    pub fn inject_error(&self, code: ErrorCode, line: i32) {
        for session in self.state().sessions.values_mut() {
            session.push_error(code, line);
        }
    }

    fn with_session<R>(&self, handle: &RawHandle, f: impl FnOnce(&mut MockSession) -> R) -> R {
        let mut state = self.state();
        let session = state
            .sessions
            .get_mut(&(handle.as_ptr() as usize))
            .expect("call on a destroyed mock session");
        f(session)
    }

    fn read_error(&self, handle: &RawHandle, consume: bool) -> RawErrorLine {
        self.with_session(handle, |s| {
            let head = if consume { s.errors.pop_front() } else { s.errors.front().copied() };
            match head {
                Some((code, line)) => RawErrorLine { code, file: Some(MOCK_FILE.into()), line },
                None => RawErrorLine::default(),
            }
        })
    }
}

/// Schemes and parameter sets the mock accepts
pub fn supported(scheme: Scheme, param_set: i32) -> bool {
    scheme != Scheme::None && (0..=4).contains(&param_set)
}

impl Engine for MockEngine {
    fn create(&self, scheme: Scheme, param_set: i32, flags: &[u32]) -> Option<RawHandle> {
        assert!(!flags.is_empty(), "engine reads at least one flag word");
        if !supported(scheme, param_set) {
            return None;
        }
        if flags[0] & flag_bits::MORE != 0 {
            assert!(flags.len() >= 2, "continuation bit without word 1");
        }
        let mut state = self.state();
        state.next_id += 1;
        let id = state.next_id;
        let mut stats = Statistics::new(scheme);
        stats.param_set = param_set as usize;
        state.sessions.insert(
            id,
            MockSession {
                scheme,
                param_set,
                flags: flags.to_vec(),
                debug_level: 0,
                errors: VecDeque::new(),
                public_coding: 0,
                private_coding: 0,
                public_key: None,
                private_key: None,
                stats,
            },
        );
        state.created += 1;
        // Ids are never dereferenced by the mock
        unsafe { RawHandle::new(id as *mut c_void) }
    }

    fn destroy(&self, handle: RawHandle) -> i32 {
        let mut state = self.state();
        if state.sessions.remove(&(handle.as_ptr() as usize)).is_none() {
            state.double_destroys += 1;
            return STATUS_FAILED;
        }
        state.destroyed += 1;
        if state.fail_destroy { STATUS_FAILED } else { STATUS_OK }
    }

    fn version(&self) -> u32 {
        MOCK_VERSION
    }

    fn version_string(&self) -> String {
        "SAFEcrypto mock 2.3.0.1".to_string()
    }

    fn release_fn(&self) -> ReleaseFn {
        counting_free
    }

    fn set_debug_level(&self, handle: &RawHandle, level: u32) -> i32 {
        let rejected = self.state().reject_debug_level;
        self.with_session(handle, |s| {
            if rejected || level > 4 {
                s.push_error(ErrorCode::OutOfBounds, 101);
                return STATUS_FAILED;
            }
            s.debug_level = level;
            STATUS_OK
        })
    }

    fn debug_level(&self, handle: &RawHandle) -> u32 {
        self.with_session(handle, |s| s.debug_level)
    }

    fn err_get_error(&self, handle: &RawHandle) -> u32 {
        self.read_error(handle, true).code
    }

    fn err_peek_error(&self, handle: &RawHandle) -> u32 {
        self.read_error(handle, false).code
    }

    fn err_get_error_line(&self, handle: &RawHandle) -> RawErrorLine {
        self.read_error(handle, true)
    }

    fn err_peek_error_line(&self, handle: &RawHandle) -> RawErrorLine {
        self.read_error(handle, false)
    }

    fn err_clear_error(&self, handle: &RawHandle) {
        self.with_session(handle, |s| s.errors.clear())
    }

    fn keygen(&self, handle: &RawHandle) -> i32 {
        if self.state().fail_keygen_silently {
            return 0;
        }
        self.with_session(handle, |s| {
            let private: [u8; 32] = rand::random();
            s.public_key = Some(sha256(&private));
            s.private_key = Some(private.to_vec());
            s.stats.keygen_num += 1;
            s.stats.keygen_num_trials += 1;
            1
        })
    }

    fn set_key_coding(&self, handle: &RawHandle, public: u32, private: u32) -> i32 {
        let unsupported = self.state().key_coding_unsupported;
        self.with_session(handle, |s| {
            if unsupported {
                return s.push_error(ErrorCode::InvalidFunctionCall, 145);
            }
            if EntropyCoding::from_raw(public).is_none() || EntropyCoding::from_raw(private).is_none()
            {
                return s.push_error(ErrorCode::OutOfBounds, 150);
            }
            s.public_coding = public;
            s.private_coding = private;
            1
        })
    }

    fn get_key_coding(&self, handle: &RawHandle, public: &mut u32, private: &mut u32) -> i32 {
        self.with_session(handle, |s| {
            *public = s.public_coding;
            *private = s.private_coding;
            STATUS_OK
        })
    }

    fn public_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32 {
        self.with_session(handle, |s| match key_body(key, s.public_coding) {
            Some(body) => {
                s.public_key = Some(body.to_vec());
                s.stats.pub_keys_loaded += 1;
                1
            }
            None => s.push_error(ErrorCode::OutOfBounds, 170),
        })
    }

    fn private_key_load(&self, handle: &RawHandle, key: &[u8]) -> i32 {
        self.with_session(handle, |s| match key_body(key, s.private_coding) {
            Some(body) => {
                s.private_key = Some(body.to_vec());
                s.stats.priv_keys_loaded += 1;
                1
            }
            None => s.push_error(ErrorCode::OutOfBounds, 182),
        })
    }

    fn public_key_encode(&self, handle: &RawHandle, out: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(key) = s.public_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 195);
            };
            let mut encoded = vec![s.public_coding as u8, KEY_FORMAT];
            encoded.extend_from_slice(&key);
            give(out, &encoded);
            let coding = s.public_coding;
            s.record_coding(StatComponent::PublicKey, key.len(), encoded.len(), coding);
            s.stats.pub_keys_encoded += 1;
            1
        })
    }

    fn private_key_encode(&self, handle: &RawHandle, out: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(key) = s.private_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 210);
            };
            let mut encoded = vec![s.private_coding as u8, KEY_FORMAT];
            encoded.extend_from_slice(&key);
            give(out, &encoded);
            let coding = s.private_coding;
            s.record_coding(StatComponent::PrivateKey, key.len(), encoded.len(), coding);
            s.stats.priv_keys_encoded += 1;
            1
        })
    }

    fn public_encrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(public) = s.public_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 230);
            };
            if from.len() > MAX_PLAINTEXT {
                return s.push_error(ErrorCode::OutOfBounds, 233);
            }
            let mut ciphertext = xor(from, &keystream(&public, from.len()));
            ciphertext.extend_from_slice(&sha256_pair(&public, from)[..CHECKSUM_LEN]);
            give(to, &ciphertext);
            s.stats.encrypt_num += 1;
            1
        })
    }

    fn private_decrypt(&self, handle: &RawHandle, from: &[u8], to: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(private) = s.private_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 250);
            };
            if from.len() < CHECKSUM_LEN {
                return s.push_error(ErrorCode::OutOfBounds, 253);
            }
            let public = sha256(&private);
            let (body, checksum) = from.split_at(from.len() - CHECKSUM_LEN);
            let plaintext = xor(body, &keystream(&public, body.len()));
            if sha256_pair(&public, &plaintext)[..CHECKSUM_LEN] != *checksum {
                return s.push_error(ErrorCode::Error, 259);
            }
            give(to, &plaintext);
            s.stats.decrypt_num += 1;
            1
        })
    }

    fn sign(&self, handle: &RawHandle, message: &[u8], signature: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(private) = s.private_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 270);
            };
            let public = sha256(&private);
            let coding = signature_coding(s.flags[0]);
            let mut sig = vec![coding.as_raw() as u8];
            sig.extend(sha256_pair(&public, message));
            give(signature, &sig);
            s.record_coding(StatComponent::Signature, sig.len() - 1, sig.len(), coding.as_raw());
            s.stats.sig_num += 1;
            s.stats.sig_num_trials += 1;
            1
        })
    }

    fn verify(&self, handle: &RawHandle, message: &[u8], signature: &[u8]) -> i32 {
        let forced = self.state().verify_override;
        self.with_session(handle, |s| {
            if let Some(rc) = forced {
                return rc;
            }
            let Some(public) = s.public_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 290);
            };
            let valid = match signature.split_first() {
                Some((&tag, digest)) => {
                    EntropyCoding::from_raw(tag as u32).is_some()
                        && digest == sha256_pair(&public, message).as_slice()
                }
                None => false,
            };
            if valid {
                s.stats.sig_num_verified += 1;
                1
            } else {
                s.stats.sig_num_unverified += 1;
                0
            }
        })
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
        self.with_session(handle, |s| match signature.split_first() {
            Some((&tag, body)) if tag as u32 == from && EntropyCoding::from_raw(to).is_some() => {
                let mut out = vec![to as u8];
                out.extend_from_slice(body);
                give(transcoded, &out);
                *vector_length = body.len();
                1
            }
            _ => s.push_error(ErrorCode::Error, 320),
        })
    }

    fn encapsulation(
        &self,
        handle: &RawHandle,
        ciphertext: &mut NativeBuffer,
        key: &mut NativeBuffer,
    ) -> i32 {
        self.with_session(handle, |s| {
            let Some(public) = s.public_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 335);
            };
            let seed: [u8; 32] = rand::random();
            give(ciphertext, &xor(&seed, &sha256(&public)));
            give(key, &sha256(&seed));
            s.stats.encapsulate_num += 1;
            1
        })
    }

    fn decapsulation(&self, handle: &RawHandle, ciphertext: &[u8], key: &mut NativeBuffer) -> i32 {
        self.with_session(handle, |s| {
            let Some(private) = s.private_key.clone() else {
                return s.push_error(ErrorCode::NullPointer, 350);
            };
            if ciphertext.len() != 32 {
                return s.push_error(ErrorCode::OutOfBounds, 353);
            }
            let public = sha256(&private);
            let seed = xor(ciphertext, &sha256(&public));
            give(key, &sha256(&seed));
            s.stats.decapsulate_num += 1;
            1
        })
    }

    fn statistics(&self, handle: &RawHandle) -> Option<Vec<u8>> {
        if self.state().stats_unavailable {
            return None;
        }
        let record = self.with_session(handle, |s| s.stats.to_bytes());
        assert_eq!(record.len(), sizes::STATISTICS_RECORD);
        Some(record)
    }
}
