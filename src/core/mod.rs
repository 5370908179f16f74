//! Core components for the SAFEcrypto session binding.
//!
//! This module contains the engine seam, the session handle and its
//! operations, the flag encoder, the statistics decoder and error handling.

// Engine seam and backends
pub mod engine;

// Session management
pub mod session;

// Configuration flags
pub mod flags;

// Session configuration
pub mod config;

// Engine buffers and key material
pub mod memory;

// Hex transport
pub mod hex;

// Statistics record
pub mod stats;

// Engine constants
pub mod constants;

// Engine enumerations
pub mod types;

// Error handling
pub mod error;

// Re-exports for convenience
pub use self::error::{Error, Operation, Result};
pub use self::session::Session;
pub use self::types::{EntropyCoding, ErrorCode, KeyCoding, Scheme};
