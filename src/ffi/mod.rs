/*!
Foreign Function Interface (FFI) module for the SAFEcrypto engine.

This module declares the C symbols exported by `libsafecrypto` that the
session layer drives through `NativeEngine`.
*/

pub mod sys;

pub use sys::*;
