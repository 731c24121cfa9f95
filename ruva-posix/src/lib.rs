//! POSIX filesystem entries for the ruva script VM.
//!
//! This crate is translation glue: each entry pulls its arguments off
//! the VM call, invokes the matching host primitive and hands the
//! result (or the error triple) back to the VM. It carries no
//! filesystem logic of its own.
//!
//! Fallible entries follow one reporting convention: success returns the
//! single integer `0`; failure returns `nil`, a diagnostic message and
//! the numeric OS error code. `errno` reads back the code of the most
//! recent OS-level failure recorded on the [`PosixContext`] the embedder
//! passes to every call.
//!
//! ```
//! use ruva_posix::{module, PosixContext};
//! use ruva_script::Variant;
//!
//! let registry = module();
//! let mut ctx = PosixContext::new();
//! let out = registry
//!     .call(&mut ctx, "access", vec![Variant::String("/tmp".into())])
//!     .unwrap();
//! assert_eq!(out, vec![Variant::Int(0)]);
//! ```

pub mod context;
pub mod error;
pub mod resolver;
pub mod syscalls;

pub use context::PosixContext;
pub use error::FsError;
pub use resolver::{NameResolver, SystemResolver};
pub use syscalls::{module, register_module, MODULE_NAME};
