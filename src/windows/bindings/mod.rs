//! Windows API bindings
//!
//! Low-level FFI wrappers over the system libraries the native platform
//! uses. Every `unsafe` call lives in this module.

pub mod advapi32;
pub mod kernel32;
pub mod ntdll;
pub mod user32;
