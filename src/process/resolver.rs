//! Process identity resolution
//!
//! Maps a process id to the base file name of its executable. Lookups are
//! never cached: process ids are reused by the OS, so a name resolved in
//! one scan says nothing about the next.

use crate::core::types::{ProcessId, ProcessName};
use crate::system::ProcessQuery;
use tracing::trace;

/// Resolves process ids to executable names
pub struct ProcessResolver<Q> {
    query: Q,
}

impl<Q: ProcessQuery> ProcessResolver<Q> {
    /// Create a new resolver over a process lookup service
    pub fn new(query: Q) -> Self {
        ProcessResolver { query }
    }

    /// Resolve `pid` to its executable base name
    ///
    /// Never fails: a process that is protected, has exited, or reports an
    /// empty path resolves to [`ProcessName::Unknown`].
    pub fn resolve(&self, pid: ProcessId) -> ProcessName {
        match self.query.image_path(pid) {
            Ok(path) => {
                let name = base_name(&path);
                if name.is_empty() {
                    ProcessName::Unknown
                } else {
                    ProcessName::Known(name.to_string())
                }
            }
            Err(e) => {
                trace!("Cannot resolve PID {}: {}", pid, e);
                ProcessName::Unknown
            }
        }
    }
}

/// Strip directory components, accepting both separator styles
pub fn base_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}
