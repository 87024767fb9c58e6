//! Application scope, naming policy, and hierarchical containers (Layer 3).
//!
//! An [`AppScope`](app::AppScope) is the explicit per-application context:
//! naming configuration, the memoized long-name shortening table, the
//! factory, and application-wide hooks. There are no process globals - two
//! scopes in one process never share state.
//!
//! A [`Container`](container::Container) owns named children. Adding a child
//! assigns a short name unique among its siblings, computes the shortened
//! hierarchical full name, and runs the child's one-time initialization.
//!
//! # Example
//!
//! ```
//! use armature_core::object::{Object, object_ref};
//! use armature_tree::app::AppScope;
//! use armature_tree::container::Container;
//!
//! struct Widget;
//!
//! impl Object for Widget {
//!     fn type_tag(&self) -> &'static str {
//!         "Widget"
//!     }
//! }
//!
//! let app = AppScope::new();
//! let root = Container::new(&app, "app");
//! let added = Container::add(&root, object_ref(Widget), None).unwrap();
//! assert!(root.borrow().has("widget"));
//! # let _ = added;
//! ```

/// The per-application scope and naming policy.
pub mod app;

/// Hierarchical containers and child lifecycle.
pub mod container;

pub use container::destroy;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::app::*;
    pub use crate::container::*;
}
