use std::sync::atomic::{AtomicI32, Ordering};

use crate::resolver::{NameResolver, SystemResolver};

/// Per-embedder state for the POSIX module.
///
/// Every entry receives this mutably, the way engine syscalls receive
/// the world state. Each VM (or logical session) gets its own context,
/// so the recorded error code never leaks between embedders. The cell
/// is atomic: a host that shares one context across threads still gets
/// coherent reads, though the usual call pattern is single-threaded.
pub struct PosixContext {
    last_errno: AtomicI32,
    resolver: Box<dyn NameResolver + Send + Sync>,
}

impl PosixContext {
    pub fn new() -> Self {
        Self::with_resolver(Box::new(SystemResolver))
    }

    /// Swap in a different directory backend.
    pub fn with_resolver(resolver: Box<dyn NameResolver + Send + Sync>) -> Self {
        Self {
            last_errno: AtomicI32::new(0),
            resolver,
        }
    }

    /// Code of the most recent OS-level failure, zero before any
    /// failure occurred.
    pub fn last_errno(&self) -> i32 {
        self.last_errno.load(Ordering::Relaxed)
    }

    pub(crate) fn set_last_errno(&self, code: i32) {
        self.last_errno.store(code, Ordering::Relaxed);
    }

    pub(crate) fn resolver(&self) -> &(dyn NameResolver + Send + Sync) {
        &*self.resolver
    }
}

impl Default for PosixContext {
    fn default() -> Self {
        Self::new()
    }
}
