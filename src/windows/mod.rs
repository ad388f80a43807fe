//! Win32 implementation of the platform capabilities
//!
//! Safe wrappers around the user32, kernel32, advapi32 and ntdll calls the
//! monitor needs. All unsafe FFI is contained within this module.

pub mod bindings;
pub mod native;
pub mod types;
pub mod utils;

pub use native::NativeSystem;
pub use types::Handle;
