/*!
Scoped ownership of engine-allocated output buffers.

Encode, encrypt, sign and transcode calls hand back memory allocated by the
engine. A `NativeBuffer` is created empty before the call, filled through
its out-pointers, copied into owned storage, and releases the engine
allocation exactly once when it goes out of scope, whichever path the
caller takes out of the operation.
*/

use std::fmt;
use std::ptr;
use std::slice;

/// Function that returns an engine allocation to the engine's allocator
pub type ReleaseFn = unsafe fn(*mut u8, usize);

/// Release an allocation made with the C allocator.
///
/// # Safety
///
/// `ptr` must be null or a pointer returned by `malloc` that has not been freed.
pub unsafe fn libc_release(ptr: *mut u8, _len: usize) {
    unsafe { libc::free(ptr.cast()) }
}

/// Guard around an engine-owned output buffer
pub struct NativeBuffer {
    ptr: *mut u8,
    len: usize,
    release: ReleaseFn,
}

impl NativeBuffer {
    /// Create an empty guard that will release with `release`
    pub fn new(release: ReleaseFn) -> Self {
        Self {
            ptr: ptr::null_mut(),
            len: 0,
            release,
        }
    }

    /// Out-pointer for the engine to store its allocation in
    pub fn ptr_out(&mut self) -> *mut *mut u8 {
        &mut self.ptr
    }

    /// Out-pointer for the engine to store the allocation length in
    pub fn len_out(&mut self) -> *mut usize {
        &mut self.len
    }

    /// Take ownership of an allocation, releasing any previous one.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or valid for reads of `len` bytes, and must be
    /// releasable by this guard's release function.
    pub unsafe fn adopt(&mut self, ptr: *mut u8, len: usize) {
        self.release_now();
        self.ptr = ptr;
        self.len = len;
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    pub fn len(&self) -> usize {
        if self.ptr.is_null() { 0 } else { self.len }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the engine bytes
    pub fn as_slice(&self) -> &[u8] {
        if self.ptr.is_null() || self.len == 0 {
            return &[];
        }
        // The engine reported `len` valid bytes at `ptr`, and the guard
        // keeps them alive until release.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }

    /// Copy the engine bytes into owned storage
    pub fn copy_out(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    fn release_now(&mut self) {
        if !self.ptr.is_null() {
            let ptr = std::mem::replace(&mut self.ptr, ptr::null_mut());
            let len = std::mem::take(&mut self.len);
            log::trace!("Releasing {} byte engine buffer", len);
            unsafe { (self.release)(ptr, len) };
        }
        self.len = 0;
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for NativeBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("null", &self.ptr.is_null())
            .field("len", &self.len())
            .finish()
    }
}
