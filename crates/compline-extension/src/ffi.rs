//! Entry point shared by extension libraries and the dynamic resolver.
//!
//! A dynamic extension library exports one function:
//!
//! ```c
//! ExtensionModule *compline_extension_module(void);
//! ```
//!
//! The pointer is an owned, boxed [`ExtensionModule`]. Both sides must be
//! built with the same compiler and the same version of this crate.

use crate::module::ExtensionModule;

/// Symbol name looked up in extension libraries.
pub const MODULE_ENTRY_SYMBOL: &[u8] = b"compline_extension_module";

/// Signature of the exported entry point.
#[allow(improper_ctypes_definitions)]
pub type ModuleEntryFn = unsafe extern "C" fn() -> *mut ExtensionModule;

/// Hands ownership of `module` across the library boundary.
pub fn into_raw(module: ExtensionModule) -> *mut ExtensionModule {
    Box::into_raw(Box::new(module))
}

/// Takes back ownership of a module returned by an entry point.
///
/// Returns `None` if the pointer is null.
///
/// # Safety
/// `ptr` must be null or come from [`into_raw`], and must not be used again.
pub unsafe fn from_raw(ptr: *mut ExtensionModule) -> Option<ExtensionModule> {
    if ptr.is_null() {
        return None;
    }
    Some(*unsafe { Box::from_raw(ptr) })
}
