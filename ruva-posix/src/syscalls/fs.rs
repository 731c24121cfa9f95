use std::ffi::CString;

use anyhow::{bail, Result};
use ruva_script::{get_var, Syscaller, Variant};

use super::error_results;
use crate::context::PosixContext;
use crate::error::FsError;

fn want_string<'a>(entry: &str, pos: usize, v: &'a Variant) -> Result<&'a str> {
    match v.as_string() {
        Some(s) => Ok(s.as_str()),
        None => bail!("{}: argument {} must be a string, got {}", entry, pos, v),
    }
}

fn path_cstr(path: &str) -> std::result::Result<CString, FsError> {
    CString::new(path).map_err(|_| FsError::InvalidPath)
}

fn access_mask(mode: &str) -> std::result::Result<libc::c_int, FsError> {
    // The existence check is always included; F_OK is the zero mask.
    let mut mask = libc::F_OK;
    for c in mode.chars() {
        match c {
            'f' => mask |= libc::F_OK,
            'r' => mask |= libc::R_OK,
            'w' => mask |= libc::W_OK,
            'x' => mask |= libc::X_OK,
            other => return Err(FsError::InvalidMode(other)),
        }
    }
    Ok(mask)
}

fn do_access(path: &str, mode: &str) -> std::result::Result<(), FsError> {
    let mask = access_mask(mode)?;
    let cpath = path_cstr(path)?;
    let rc = unsafe { libc::access(cpath.as_ptr(), mask) };
    if rc != 0 {
        return Err(FsError::last_os());
    }
    Ok(())
}

/// access(path, mode) -> 0 | nil, message, errno
///
/// `mode` is a string of `f`, `r`, `w`, `x` characters OR-combined into
/// the host access bitmask. A missing or nil mode checks existence
/// only. Mode characters are validated before the path is looked at.
pub fn access(ctx: &mut PosixContext, path: &Variant, mode: &Variant) -> Result<Vec<Variant>> {
    let path = want_string("access", 1, path)?;
    let mode = match mode {
        Variant::Nil => "f",
        _ => want_string("access", 2, mode)?,
    };

    match do_access(path, mode) {
        Ok(()) => Ok(vec![Variant::Int(0)]),
        Err(err) => Ok(error_results(ctx, err)),
    }
}

enum Account {
    User,
    Group,
}

fn resolve_id(
    ctx: &PosixContext,
    entry: &str,
    pos: usize,
    which: Account,
    v: &Variant,
) -> Result<std::result::Result<u32, FsError>> {
    match v {
        Variant::Int(id) => Ok(Ok(*id as u32)),
        Variant::String(name) => {
            let found = match which {
                Account::User => ctx.resolver().resolve_user(name),
                Account::Group => ctx.resolver().resolve_group(name),
            };
            Ok(match found {
                Some(text) => text.parse::<u32>().map_err(FsError::from),
                None => Err(FsError::NoSuchEntry),
            })
        }
        other => bail!(
            "{}: argument {} must be an integer id or a name string, got {}",
            entry,
            pos,
            other
        ),
    }
}

fn do_chown(path: &str, uid: libc::uid_t, gid: libc::gid_t) -> std::result::Result<(), FsError> {
    let cpath = path_cstr(path)?;
    let rc = unsafe { libc::chown(cpath.as_ptr(), uid, gid) };
    if rc != 0 {
        return Err(FsError::last_os());
    }
    Ok(())
}

/// chown(path, owner, group) -> 0 | nil, message, errno
///
/// Owner and group are numeric ids, or names looked up in the host
/// directory. Unknown names report as missing entries; a directory
/// record whose id field is not numeric surfaces the parse error
/// unchanged. A numeric id passes through as the unsigned host type,
/// so -1 keeps its conventional "leave unchanged" meaning.
pub fn chown(
    ctx: &mut PosixContext,
    path: &Variant,
    owner: &Variant,
    group: &Variant,
) -> Result<Vec<Variant>> {
    let path = want_string("chown", 1, path)?;
    let uid = match resolve_id(ctx, "chown", 2, Account::User, owner)? {
        Ok(id) => id,
        Err(err) => return Ok(error_results(ctx, err)),
    };
    let gid = match resolve_id(ctx, "chown", 3, Account::Group, group)? {
        Ok(id) => id,
        Err(err) => return Ok(error_results(ctx, err)),
    };

    match do_chown(path, uid, gid) {
        Ok(()) => Ok(vec![Variant::Int(0)]),
        Err(err) => Ok(error_results(ctx, err)),
    }
}

/// errno() -> integer
///
/// Reads the recorded code without touching it.
pub fn errno(ctx: &mut PosixContext) -> Result<Vec<Variant>> {
    Ok(vec![Variant::Int(ctx.last_errno())])
}

fn do_link(
    old: &str,
    new: &str,
    f: impl Fn(*const libc::c_char, *const libc::c_char) -> libc::c_int,
) -> std::result::Result<(), FsError> {
    let old = path_cstr(old)?;
    let new = path_cstr(new)?;
    let rc = f(old.as_ptr(), new.as_ptr());
    if rc != 0 {
        return Err(FsError::last_os());
    }
    Ok(())
}

fn link_entry(
    ctx: &mut PosixContext,
    entry: &str,
    old: &Variant,
    new: &Variant,
    f: impl Fn(*const libc::c_char, *const libc::c_char) -> libc::c_int,
) -> Result<Vec<Variant>> {
    let old = want_string(entry, 1, old)?;
    let new = want_string(entry, 2, new)?;
    match do_link(old, new, f) {
        Ok(()) => Ok(vec![Variant::Int(0)]),
        Err(err) => Ok(error_results(ctx, err)),
    }
}

/// link(oldpath, newpath) -> 0 | nil, message, errno
pub fn link(ctx: &mut PosixContext, old: &Variant, new: &Variant) -> Result<Vec<Variant>> {
    link_entry(ctx, "link", old, new, |o, n| unsafe { libc::link(o, n) })
}

/// symlink(oldpath, newpath) -> 0 | nil, message, errno
///
/// Same contract as `link`, creating a symbolic link instead.
pub fn symlink(ctx: &mut PosixContext, old: &Variant, new: &Variant) -> Result<Vec<Variant>> {
    link_entry(ctx, "symlink", old, new, |o, n| unsafe {
        libc::symlink(o, n)
    })
}

pub struct Access;
impl Syscaller<PosixContext> for Access {
    fn call(&self, ctx: &mut PosixContext, args: Vec<Variant>) -> Result<Vec<Variant>> {
        access(ctx, get_var!(args, 0), get_var!(args, 1))
    }
}

pub struct Chown;
impl Syscaller<PosixContext> for Chown {
    fn call(&self, ctx: &mut PosixContext, args: Vec<Variant>) -> Result<Vec<Variant>> {
        chown(ctx, get_var!(args, 0), get_var!(args, 1), get_var!(args, 2))
    }
}

pub struct Errno;
impl Syscaller<PosixContext> for Errno {
    fn call(&self, ctx: &mut PosixContext, _args: Vec<Variant>) -> Result<Vec<Variant>> {
        errno(ctx)
    }
}

pub struct Link;
impl Syscaller<PosixContext> for Link {
    fn call(&self, ctx: &mut PosixContext, args: Vec<Variant>) -> Result<Vec<Variant>> {
        link(ctx, get_var!(args, 0), get_var!(args, 1))
    }
}

pub struct Symlink;
impl Syscaller<PosixContext> for Symlink {
    fn call(&self, ctx: &mut PosixContext, args: Vec<Variant>) -> Result<Vec<Variant>> {
        symlink(ctx, get_var!(args, 0), get_var!(args, 1))
    }
}
