/*!
Session lifecycle: creation, guarded single release, debug level and
version queries.
*/

use std::fmt;

use crate::core::config::SessionConfig;
use crate::core::constants::{flags, FUNC_FAILURE, FUNC_SUCCESS};
use crate::core::engine::{Engine, RawHandle};
use crate::core::error::{Error, Operation, Result};
use crate::core::flags::{self as flag_words, Flags};
use crate::core::memory::NativeBuffer;
use crate::core::types::{DebugLevel, ErrorCode, KeyCoding, Scheme, Version};
use crate::operation_err;

use super::Session;

impl<E: Engine> Session<E> {
    /// Create a session from structured flags
    pub fn create(engine: E, scheme: Scheme, param_set: i32, flags: &Flags) -> Result<Self> {
        Self::create_with_words(engine, scheme, param_set, &flags.encode())
    }

    /// Create a session from raw flag words. An empty slice is sent as a
    /// single empty word; any other slice must be one word, or two words
    /// joined by the continuation bit.
    pub fn create_with_words(
        engine: E,
        scheme: Scheme,
        param_set: i32,
        words: &[u32],
    ) -> Result<Self> {
        let words = if words.is_empty() {
            vec![flags::NONE]
        } else {
            words.to_vec()
        };
        flag_words::check_words(&words)?;

        match engine.create(scheme, param_set, &words) {
            Some(handle) => {
                log::debug!(
                    "Created {} session, parameter set {}, flags {:08x?}",
                    scheme,
                    param_set,
                    words
                );
                Ok(Self {
                    engine,
                    handle: Some(handle),
                    scheme,
                    param_set,
                    flags: words,
                })
            }
            None => {
                log::warn!("Engine refused {} parameter set {}", scheme, param_set);
                Err(Error::InvalidHandle { scheme, param_set })
            }
        }
    }

    /// Create a session and apply the configured debug level and key coding
    pub fn with_config(engine: E, config: &SessionConfig) -> Result<Self> {
        config.validate()?;
        let session = Self::create(engine, config.scheme, config.param_set, &config.flags)?;
        if config.debug_level != DebugLevel::None {
            session.set_debug_level(config.debug_level)?;
        }
        if config.key_coding != KeyCoding::default() {
            session.set_key_coding(config.key_coding.public, config.key_coding.private)?;
        }
        Ok(session)
    }

    /// Release the engine session. Calling this again is a no-op.
    pub fn destroy(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let rc = self.engine.destroy(handle);
        log::debug!("Destroyed {} session", self.scheme);
        if rc != FUNC_SUCCESS {
            // The handle is gone, so there is no queue left to consult.
            return operation_err!(Operation::Destroy, ErrorCode::Error);
        }
        Ok(())
    }

    /// Whether the session has not been released yet
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn param_set(&self) -> i32 {
        self.param_set
    }

    /// Flag words the session was created with
    pub fn flags(&self) -> &[u32] {
        &self.flags
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn set_debug_level(&self, level: DebugLevel) -> Result<()> {
        let handle = self.live()?;
        let rc = self.engine.set_debug_level(handle, level.as_raw());
        self.check_status(handle, Operation::SetDebugLevel, rc)
    }

    pub fn debug_level(&self) -> Result<DebugLevel> {
        let handle = self.live()?;
        DebugLevel::try_from(self.engine.debug_level(handle))
    }

    /// Version of the engine library
    pub fn version(&self) -> Version {
        Version::from_raw(self.engine.version())
    }

    /// Build description of the engine library
    pub fn version_string(&self) -> String {
        self.engine.version_string()
    }

    pub(crate) fn live(&self) -> Result<&RawHandle> {
        self.handle.as_ref().ok_or(Error::Disposed)
    }

    /// Empty guard for an engine output buffer
    pub(crate) fn buffer(&self) -> NativeBuffer {
        NativeBuffer::new(self.engine.release_fn())
    }

    /// Check a data or key call, which returns zero on failure
    pub(crate) fn check(&self, handle: &RawHandle, operation: Operation, rc: i32) -> Result<()> {
        if rc != FUNC_FAILURE {
            return Ok(());
        }
        self.failure(handle, operation)
    }

    /// Check a status call, which returns zero on success
    pub(crate) fn check_status(
        &self,
        handle: &RawHandle,
        operation: Operation,
        rc: i32,
    ) -> Result<()> {
        if rc == FUNC_SUCCESS {
            return Ok(());
        }
        self.failure(handle, operation)
    }

    /// Build a typed failure from the queue head, leaving the queue intact
    fn failure(&self, handle: &RawHandle, operation: Operation) -> Result<()> {
        let code = match ErrorCode::from(self.engine.err_peek_error(handle)) {
            ErrorCode::Ok => ErrorCode::Error,
            code => code,
        };
        log::warn!("{} failed on {} session: {}", operation, self.scheme, code);
        operation_err!(operation, code)
    }

    /// Run an engine call that hands back one buffer, copy the bytes out
    /// and release the engine allocation on every path
    pub(crate) fn transfer<F>(&self, operation: Operation, call: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&RawHandle, &mut NativeBuffer) -> i32,
    {
        let handle = self.live()?;
        let mut out = self.buffer();
        let rc = call(handle, &mut out);
        self.check(handle, operation, rc)?;
        log::debug!("{} returned {} bytes", operation, out.len());
        Ok(out.copy_out())
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        if let Err(e) = self.destroy() {
            log::warn!("Releasing {} session on drop: {}", self.scheme, e);
        }
    }
}

impl<E: Engine> fmt::Debug for Session<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("scheme", &self.scheme)
            .field("param_set", &self.param_set)
            .field("flags", &self.flags)
            .field("live", &self.is_live())
            .finish()
    }
}
