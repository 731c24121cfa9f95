//! User and group directory lookups.

use std::ffi::CString;
use std::mem;
use std::ptr;

/// Directory backend resolving account and group names.
///
/// Ids come back as the raw text recorded in the directory; the caller
/// parses them. `None` means the name has no entry, whatever the
/// backend's own reason was.
pub trait NameResolver {
    fn resolve_user(&self, name: &str) -> Option<String>;
    fn resolve_group(&self, name: &str) -> Option<String>;
}

/// Resolver backed by the host account database
/// (`getpwnam_r` / `getgrnam_r`).
pub struct SystemResolver;

// Reentrant lookups report a too-small record buffer through ERANGE.
const INITIAL_BUF: usize = 1024;
const MAX_BUF: usize = 1 << 20;

impl NameResolver for SystemResolver {
    fn resolve_user(&self, name: &str) -> Option<String> {
        let cname = CString::new(name).ok()?;
        let mut pwd: libc::passwd = unsafe { mem::zeroed() };
        let mut buf = vec![0 as libc::c_char; INITIAL_BUF];
        loop {
            let mut result: *mut libc::passwd = ptr::null_mut();
            let rc = unsafe {
                libc::getpwnam_r(
                    cname.as_ptr(),
                    &mut pwd,
                    buf.as_mut_ptr(),
                    buf.len(),
                    &mut result,
                )
            };
            if rc == libc::ERANGE && buf.len() < MAX_BUF {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() {
                if rc != 0 {
                    log::debug!("getpwnam_r({}) failed: rc={}", name, rc);
                }
                return None;
            }
            return Some(pwd.pw_uid.to_string());
        }
    }

    fn resolve_group(&self, name: &str) -> Option<String> {
        let cname = CString::new(name).ok()?;
        let mut grp: libc::group = unsafe { mem::zeroed() };
        let mut buf = vec![0 as libc::c_char; INITIAL_BUF];
        loop {
            let mut result: *mut libc::group = ptr::null_mut();
            let rc = unsafe {
                libc::getgrnam_r(
                    cname.as_ptr(),
                    &mut grp,
                    buf.as_mut_ptr(),
                    buf.len(),
                    &mut result,
                )
            };
            if rc == libc::ERANGE && buf.len() < MAX_BUF {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() {
                if rc != 0 {
                    log::debug!("getgrnam_r({}) failed: rc={}", name, rc);
                }
                return None;
            }
            return Some(grp.gr_gid.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_root_to_zero() {
        let resolver = SystemResolver;
        assert_eq!(resolver.resolve_user("root").as_deref(), Some("0"));
        assert_eq!(resolver.resolve_group("root").as_deref(), Some("0"));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let resolver = SystemResolver;
        assert_eq!(resolver.resolve_user("no-such-user-zzz"), None);
        assert_eq!(resolver.resolve_group("no-such-group-zzz"), None);
    }

    #[test]
    fn interior_nul_resolves_to_none() {
        let resolver = SystemResolver;
        assert_eq!(resolver.resolve_user("ro\0ot"), None);
    }
}
