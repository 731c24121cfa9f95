//! Script-visible entries of the POSIX module.
//!
//! Layout mirrors the rest of ruva's native modules: plain functions
//! hold the behavior, thin [`Syscaller`] shims adapt them to the
//! dispatch table.

pub mod fs;

use ruva_script::{SyscallRegistry, Variant};

use crate::context::PosixContext;
use crate::error::FsError;

pub use fs::{Access, Chown, Errno, Link, Symlink};

/// Script-visible name of the module table.
pub const MODULE_NAME: &str = "posix";

/// Register every entry under its script-visible name.
pub fn register_module(registry: &mut SyscallRegistry<PosixContext>) {
    registry.register("access", Access);
    registry.register("chown", Chown);
    registry.register("errno", Errno);
    registry.register("link", Link);
    registry.register("symlink", Symlink);
}

/// Build the namespace table the embedder mounts once at load time.
pub fn module() -> SyscallRegistry<PosixContext> {
    let mut registry = SyscallRegistry::new();
    register_module(&mut registry);
    registry
}

/// Unpack a failure into the script-visible triple.
///
/// An OS-coded failure stores its code on the context and reports it;
/// anything else reports whatever code was recorded last.
pub(crate) fn error_results(ctx: &PosixContext, err: FsError) -> Vec<Variant> {
    let code = match err.os_code() {
        Some(code) => {
            ctx.set_last_errno(code);
            code
        }
        None => ctx.last_errno(),
    };
    vec![
        Variant::Nil,
        Variant::String(err.to_string()),
        Variant::Int(code),
    ]
}
