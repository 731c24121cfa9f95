//! Syscall integration points.
//!
//! The VM resolves a native entry by name and calls into module code
//! through a registry owned by the embedder. Modules register their
//! entries once at load time; each entry receives the call arguments in
//! order and returns the values the VM pushes back onto the operand
//! stack.

mod registry;

pub use registry::{SyscallRegistry, Syscaller, VmSyscall};

/// Fetch argument `$i`, defaulting to nil when the caller passed fewer
/// values.
#[macro_export]
macro_rules! get_var {
    ($args:expr, $i:expr) => {
        if let Some(variant) = $args.get($i) {
            variant
        } else {
            &$crate::variant::Variant::Nil
        }
    };
}
