/*!
Error handling for the SAFEcrypto session binding.

Every failure reported by the engine through a zero return code is turned
into a typed `Error::Operation` carrying the call that failed and the code
found at the head of the session's error queue. Signature verification is
never an error: it is answered with a plain boolean.
*/

use std::fmt;
use thiserror::Error;

use crate::core::types::{ErrorCode, Scheme};

/// Result type for the session binding
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the session binding
#[derive(Error, Debug)]
pub enum Error {
    /// The engine refused to create a session
    #[error("Engine returned an invalid handle for {scheme} parameter set {param_set}")]
    InvalidHandle {
        scheme: Scheme,
        param_set: i32,
    },

    /// An engine call signalled failure
    #[error("{operation} failed: {code}")]
    Operation {
        operation: Operation,
        code: ErrorCode,
    },

    /// The session was already released
    #[error("Session has been released")]
    Disposed,

    /// Malformed hex transport string
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Configuration rejected before reaching the engine
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The engine has no statistics for this session
    #[error("Statistics unavailable")]
    StatisticsUnavailable,

    /// The statistics record could not be decoded
    #[error("Malformed statistics record: {0}")]
    StatisticsFormat(String),

    /// The engine returned a value outside a known enumeration
    #[error("Unknown {kind} value: {value}")]
    UnknownValue {
        kind: &'static str,
        value: i64,
    },
}

impl Error {
    /// The engine error code behind an operation failure, if any
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Operation { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The failed operation, if this is an operation failure
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Engine calls that can fail with a zero return code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Destroy,
    SetDebugLevel,
    KeyGen,
    SetKeyCoding,
    GetKeyCoding,
    EncodePublicKey,
    EncodePrivateKey,
    LoadPublicKey,
    LoadPrivateKey,
    Encrypt,
    Decrypt,
    Sign,
    Transcode,
    Encapsulate,
    Decapsulate,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Destroy => "Session destruction",
            Operation::SetDebugLevel => "Set debug level",
            Operation::KeyGen => "Key generation",
            Operation::SetKeyCoding => "Set key coding",
            Operation::GetKeyCoding => "Get key coding",
            Operation::EncodePublicKey => "Public key encoding",
            Operation::EncodePrivateKey => "Private key encoding",
            Operation::LoadPublicKey => "Public key load",
            Operation::LoadPrivateKey => "Private key load",
            Operation::Encrypt => "Encryption",
            Operation::Decrypt => "Decryption",
            Operation::Sign => "Signing",
            Operation::Transcode => "Signature transcoding",
            Operation::Encapsulate => "Encapsulation",
            Operation::Decapsulate => "Decapsulation",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create an operation failure
#[macro_export]
macro_rules! operation_err {
    ($op:expr, $code:expr) => {
        Err($crate::core::error::Error::Operation {
            operation: $op,
            code: $code,
        })
    };
}

/// Create a configuration error
#[macro_export]
macro_rules! config_err {
    ($msg:expr) => {
        Err($crate::core::error::Error::InvalidConfig($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        Err($crate::core::error::Error::InvalidConfig(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidHandle { scheme: Scheme::SigBliss, param_set: 9 };
        assert_eq!(
            format!("{}", err),
            "Engine returned an invalid handle for SC_SCHEME_SIG_BLISS parameter set 9"
        );

        let err = Error::Operation { operation: Operation::Sign, code: ErrorCode::NullPointer };
        assert_eq!(format!("{}", err), "Signing failed: NullPointer (3)");

        assert_eq!(format!("{}", Error::Disposed), "Session has been released");
    }

    #[test]
    fn test_operation_accessors() {
        let err = Error::Operation { operation: Operation::Encrypt, code: ErrorCode::OutOfBounds };
        assert_eq!(err.code(), Some(ErrorCode::OutOfBounds));
        assert_eq!(err.operation(), Some(Operation::Encrypt));
        assert_eq!(Error::Disposed.code(), None);
    }

    #[test]
    fn test_macros() {
        let r: Result<()> = operation_err!(Operation::KeyGen, ErrorCode::Error);
        assert!(matches!(r, Err(Error::Operation { operation: Operation::KeyGen, .. })));

        let r: Result<()> = config_err!("bad parameter set {}", -1);
        match r {
            Err(Error::InvalidConfig(msg)) => assert_eq!(msg, "bad parameter set -1"),
            _ => panic!("Expected InvalidConfig error"),
        }
    }
}
