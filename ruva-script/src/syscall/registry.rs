use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::variant::Variant;

/// A native entry callable from script code.
///
/// `C` is the embedder's context type, passed mutably to every call the
/// way the engine hands its world state to native code. An entry may
/// produce more than one result; the VM pushes them in order.
///
/// Returning `Err` aborts the call path in the VM. Reserve it for
/// malformed argument shapes, not for conditions the script is expected
/// to handle.
pub trait Syscaller<C> {
    fn call(&self, ctx: &mut C, args: Vec<Variant>) -> Result<Vec<Variant>>;
}

/// The runtime interface the VM expects from an embedder.
pub trait VmSyscall {
    fn do_syscall(&mut self, name: &str, args: Vec<Variant>) -> Result<Vec<Variant>>;
}

/// A name-keyed table of native entries sharing one context type.
///
/// An embedder owns one registry per module namespace and mounts it at
/// load time.
pub struct SyscallRegistry<C> {
    entries: HashMap<String, Box<dyn Syscaller<C> + Send + Sync>>,
}

impl<C> SyscallRegistry<C> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        entry: impl Syscaller<C> + Send + Sync + 'static,
    ) {
        self.entries.insert(name.into(), Box::new(entry));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn call(&self, ctx: &mut C, name: &str, args: Vec<Variant>) -> Result<Vec<Variant>> {
        match self.entries.get(name) {
            Some(entry) => entry.call(ctx, args),
            None => {
                log::error!("syscall {} not found", name);
                bail!("unknown syscall: {name}")
            }
        }
    }
}

impl<C> Default for SyscallRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::get_var;

    #[derive(Default)]
    struct Counter {
        calls: u32,
    }

    struct Bump;

    impl Syscaller<Counter> for Bump {
        fn call(&self, ctx: &mut Counter, args: Vec<Variant>) -> Result<Vec<Variant>> {
            ctx.calls += 1;
            let step = get_var!(args, 0).as_int().unwrap_or(1);
            Ok(vec![Variant::Int(step), Variant::Int(ctx.calls as i32)])
        }
    }

    struct Host {
        registry: SyscallRegistry<Counter>,
        counter: Counter,
    }

    impl VmSyscall for Host {
        fn do_syscall(&mut self, name: &str, args: Vec<Variant>) -> Result<Vec<Variant>> {
            self.registry.call(&mut self.counter, name, args)
        }
    }

    #[test]
    fn dispatches_by_name_and_returns_all_results() {
        let mut registry = SyscallRegistry::new();
        registry.register("bump", Bump);
        assert!(registry.contains("bump"));

        let mut ctx = Counter::default();
        let out = registry
            .call(&mut ctx, "bump", vec![Variant::Int(7)])
            .unwrap();
        assert_eq!(out, vec![Variant::Int(7), Variant::Int(1)]);
    }

    #[test]
    fn missing_argument_defaults_to_nil() {
        let mut registry = SyscallRegistry::new();
        registry.register("bump", Bump);

        let mut ctx = Counter::default();
        let out = registry.call(&mut ctx, "bump", vec![]).unwrap();
        // Bump substitutes 1 for a nil step argument.
        assert_eq!(out, vec![Variant::Int(1), Variant::Int(1)]);
    }

    #[test]
    fn unknown_name_aborts() {
        let registry: SyscallRegistry<Counter> = SyscallRegistry::new();
        let mut ctx = Counter::default();
        assert!(registry.call(&mut ctx, "nope", vec![]).is_err());
    }

    #[test]
    fn embedder_seam_routes_through_registry() {
        let mut registry = SyscallRegistry::new();
        registry.register("bump", Bump);
        let mut host = Host {
            registry,
            counter: Counter::default(),
        };

        host.do_syscall("bump", vec![]).unwrap();
        let out = host.do_syscall("bump", vec![]).unwrap();
        assert_eq!(out[1], Variant::Int(2));
    }
}
