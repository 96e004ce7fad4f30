//! Convenience macros for extension development.

/// Implements [`Extension`](compline_extension::traits::Extension) for a
/// struct with a `name: String` field.
///
/// A second form also returns fixed default parameters:
///
/// ```rust,ignore
/// extension_name!(MatcherHead, params: serde_json::json!({ "ignore_case": true }));
/// ```
#[macro_export]
macro_rules! extension_name {
    ($ty:ty) => {
        impl $crate::prelude::Extension for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: String) {
                self.name = name;
            }
        }
    };
    ($ty:ty, params: $params:expr) => {
        impl $crate::prelude::Extension for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: String) {
                self.name = name;
            }

            fn params(&self) -> $crate::__private::Value {
                $params
            }
        }
    };
}

/// Exports the entry point the dynamic resolver looks up.
///
/// Use once per `cdylib` crate. The expression must evaluate to an
/// `ExtensionModule`.
#[macro_export]
macro_rules! export_extension_module {
    ($module:expr) => {
        #[unsafe(no_mangle)]
        #[allow(improper_ctypes_definitions)]
        pub extern "C" fn compline_extension_module() -> *mut $crate::__private::ExtensionModule {
            let module: $crate::__private::ExtensionModule = $module;
            $crate::__private::into_raw(module)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use compline_extension::ffi;

    #[derive(Debug, Default)]
    struct Echo {
        name: String,
    }

    crate::extension_name!(Echo, params: serde_json::json!({ "mark": "E" }));

    #[async_trait]
    impl Filter for Echo {
        async fn filter(
            &self,
            _context: &CompletionContext,
            items: Vec<Candidate>,
        ) -> AppResult<Vec<Candidate>> {
            Ok(items)
        }
    }

    crate::export_extension_module!(ExtensionModule::new().with_filter(|| Ok(Echo::default())));

    #[test]
    fn test_extension_name_macro() {
        let mut echo = Echo::default();
        echo.set_name("echo".to_string());
        assert_eq!(echo.name(), "echo");
        assert_eq!(echo.params()["mark"], "E");
    }

    #[test]
    fn test_exported_entry_point() {
        let module = unsafe { ffi::from_raw(compline_extension_module()) }.expect("module");
        assert!(module.exports(ExtensionKind::Filter));
        assert!(!module.exports(ExtensionKind::Source));
    }
}
