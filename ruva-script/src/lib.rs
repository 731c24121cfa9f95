//! ruva-script
//!
//! Value types and syscall dispatch shared between the ruva VM and its
//! native modules. The VM owns the operand stack; a native module only
//! sees the argument values handed to it and returns the values the VM
//! pushes back.

pub mod syscall;
pub mod variant;

pub use syscall::{SyscallRegistry, Syscaller, VmSyscall};
pub use variant::Variant;
