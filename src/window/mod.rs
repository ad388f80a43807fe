//! Top-level window discovery

pub mod enumerator;

pub use enumerator::{EnumerationFilter, WindowEnumerator, WindowIter};
