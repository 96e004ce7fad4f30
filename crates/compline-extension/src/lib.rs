//! # compline-extension
//!
//! Extension registry for Compline. Provides:
//!
//! - Three namespaces of named instances: UI, source and filter
//! - Alias declarations that give a base extension extra, independent
//!   instances under other names
//! - A load-once guard keyed by path, with all loads serialized
//! - Pluggable module resolvers (in-process table, shared libraries)
//! - Directory discovery and lazy autoload by name

pub mod candidate;
pub mod discovery;
pub mod ffi;
pub mod kind;
pub mod manager;
pub mod module;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod traits;

pub use candidate::{Candidate, CompletionContext};
pub use kind::ExtensionKind;
pub use manager::{ExtensionManager, LoadReport};
pub use module::ExtensionModule;
pub use registry::{Instance, LoadOutcome, Registry};
pub use resolver::{ChainResolver, DynamicResolver, ModuleResolver, StaticResolver};
pub use traits::{Extension, Filter, Source, Ui};
