//! Dynamic module access
//!
//! Everything platform specific about plugin libraries lives here. The loader
//! only sees [`Module`] and [`Opener`].

use crate::error::{PluginError, Result};
use crate::traits::PluginDeclaration;
use libloading::Library;
use std::path::Path;
use std::ptr;
use std::sync::Arc;

/// A declaration borrowed from a module, or why the symbol is not one
pub type DeclarationResult<'a> = std::result::Result<&'a PluginDeclaration, String>;

/// A loaded module that symbols can be looked up in
pub trait Module: Send + Sync {
    /// Value of an exported `&'static str`, or `None` if the symbol is absent
    fn string(&self, symbol: &str) -> Option<String>;

    /// The declaration exported under `symbol`, or `None` if the symbol is
    /// absent. `Err` carries the reason when the symbol is not a
    /// declaration; only the fixed-width tags are guaranteed to be checked.
    fn declaration(&self, symbol: &str) -> Option<DeclarationResult<'_>>;
}

/// Turns a path into a [`Module`]
pub trait Opener {
    /// Open `path` as a module
    fn open(&self, path: &Path) -> Result<Arc<dyn Module>>;
}

/// Opens shared libraries through the platform loader
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeOpener;

impl Opener for NativeOpener {
    fn open(&self, path: &Path) -> Result<Arc<dyn Module>> {
        Ok(Arc::new(NativeModule::open(path)?))
    }
}

/// A shared library opened with `libloading`
#[derive(Debug)]
pub struct NativeModule {
    library: Library,
}

impl NativeModule {
    /// Open a shared library
    pub fn open(path: &Path) -> Result<Self> {
        // SAFETY: loading a library runs its initialisers. Plugin directories
        // are trusted the same way the host binary is.
        let library = unsafe { Library::new(path) }.map_err(|e| PluginError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self { library })
    }
}

impl Module for NativeModule {
    fn string(&self, symbol: &str) -> Option<String> {
        // SAFETY: metadata symbols are `&'static str` statics by contract and
        // the library stays loaded for the duration of the borrow.
        unsafe {
            let sym = self
                .library
                .get::<*const &'static str>(symbol.as_bytes())
                .ok()?;
            let value: *const &'static str = *sym;
            value.as_ref().map(|s| s.to_string())
        }
    }

    fn declaration(&self, symbol: &str) -> Option<DeclarationResult<'_>> {
        // SAFETY: the library stays loaded for the returned borrow, which is
        // tied to `self`.
        unsafe {
            let sym = self
                .library
                .get::<*const PluginDeclaration>(symbol.as_bytes())
                .ok()?;
            let declaration: *const PluginDeclaration = *sym;
            if declaration.is_null() {
                return None;
            }
            Some(read_declaration(declaration))
        }
    }
}

/// Validate the tags behind an exported `Plugin` symbol before forming a
/// reference to it.
///
/// # Safety
///
/// `declaration` must be non-null and point to at least eight readable bytes
/// that stay valid for `'a`.
unsafe fn read_declaration<'a>(declaration: *const PluginDeclaration) -> DeclarationResult<'a> {
    // SAFETY: only the two leading `u32` tags are read, unaligned, until they
    // match; the caller guarantees those eight bytes are readable.
    let (magic, abi_version) = unsafe {
        (
            ptr::addr_of!((*declaration).magic).read_unaligned(),
            ptr::addr_of!((*declaration).abi_version).read_unaligned(),
        )
    };
    PluginDeclaration::check_tags(magic, abi_version)?;

    if !declaration.is_aligned() {
        return Err(format!("misaligned declaration at {:p}", declaration));
    }

    // SAFETY: tags match, so the symbol was written by `export_plugin!` and
    // is a full, aligned `PluginDeclaration`.
    Ok(unsafe { &*declaration })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_non_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        std::fs::write(&path, "definitely not an ELF file").unwrap();

        let err = NativeOpener.open(&path).err().unwrap();
        assert!(matches!(err, PluginError::Open { ref path, .. } if path.ends_with("readme.txt")));
    }

    #[repr(C, align(8))]
    struct Aligned([u8; 16]);

    /// Tags written one byte past an 8-aligned base, so never aligned
    fn unaligned_tags(magic: u32, abi_version: u32) -> Aligned {
        let mut buf = Aligned([0u8; 16]);
        buf.0[1..5].copy_from_slice(&magic.to_ne_bytes());
        buf.0[5..9].copy_from_slice(&abi_version.to_ne_bytes());
        buf
    }

    #[test]
    fn test_read_declaration_rejects_foreign_tags() {
        let buf = unaligned_tags(0x7f45_4c46, 3);
        let declaration = buf.0[1..].as_ptr() as *const PluginDeclaration;

        let reason = unsafe { read_declaration(declaration) }.unwrap_err();
        assert!(reason.contains("bad magic"), "{}", reason);
    }

    #[test]
    fn test_read_declaration_rejects_misaligned() {
        let buf = unaligned_tags(crate::PLUGIN_MAGIC, crate::ABI_VERSION);
        let declaration = buf.0[1..].as_ptr() as *const PluginDeclaration;
        assert!(!declaration.is_aligned());

        let reason = unsafe { read_declaration(declaration) }.unwrap_err();
        assert!(reason.contains("misaligned"), "{}", reason);
    }

    #[test]
    fn test_read_declaration_accepts_exported() {
        static DECLARATION: PluginDeclaration =
            PluginDeclaration::of::<crate::testing::Noop>();

        let declaration = unsafe { read_declaration(&DECLARATION) }.unwrap();
        assert!(declaration.check().is_ok());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = NativeModule::open(&dir.path().join("missing.so"));
        assert!(matches!(result, Err(PluginError::Open { .. })));
    }
}
