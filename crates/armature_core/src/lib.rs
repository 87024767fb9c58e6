//! The foundational object model for Armature (Layer 1).
//!
//! `armature_core` provides the core primitives for composing framework
//! objects:
//!
//! - [`value`] - Type-erased values flowing through seeds, injection and hooks
//! - [`object`] - The [`Object`](object::Object) trait and capability discovery
//! - [`inject`] - Dependency injection with declared-field whitelists
//! - [`track`] - Owner/application back-references and naming state
//! - [`init`] - Exactly-once initialization lifecycle
//! - [`methods`] - Explicit per-object dynamic method registry
//! - [`error`] - The unified error taxonomy
//!
//! # Architecture
//!
//! This crate is Layer 1 of the Armature architecture:
//!
//! - **Layer 1** (`armature_core`): value model and capability traits (this crate)
//! - **Layer 2** (`armature_factory`): seed merging and object construction
//! - **Layer 2** (`armature_hooks`): per-object hook dispatch
//! - **Layer 3** (`armature_tree`): application scope and hierarchical containers
//!
//! # Capabilities
//!
//! Every constructible type implements [`Object`](object::Object). Optional
//! capabilities are discovered through accessor methods rather than runtime
//! trait probing:
//!
//! ```
//! use armature_core::object::{Object, ObjectRef};
//! use armature_core::init::{InitState, Initializable};
//! use armature_core::error::CoreError;
//!
//! #[derive(Default)]
//! struct Widget {
//!     init: InitState,
//! }
//!
//! impl Object for Widget {
//!     fn type_tag(&self) -> &'static str {
//!         "Widget"
//!     }
//!
//!     fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
//!         Some(self)
//!     }
//! }
//!
//! impl Initializable for Widget {
//!     fn init_state(&self) -> &InitState {
//!         &self.init
//!     }
//!
//!     fn init_state_mut(&mut self) -> &mut InitState {
//!         &mut self.init
//!     }
//!
//!     fn init(&mut self) -> Result<(), CoreError> {
//!         self.init_state_mut().mark_initialized("Widget")
//!     }
//! }
//! ```

// Self-reference so `#[derive(Injectable)]`-generated code can use
// `armature_core::` paths within this crate.
extern crate self as armature_core;

/// Unified error taxonomy.
pub mod error;

/// Dependency injection with declared-field whitelists.
pub mod inject;

/// Exactly-once initialization lifecycle.
pub mod init;

/// Explicit per-object dynamic method registry.
pub mod methods;

/// The `Object` trait and capability discovery.
pub mod object;

/// Owner/application back-references and naming state.
pub mod track;

/// Type-erased values flowing through seeds, injection and hooks.
pub mod value;

/// Re-export the `#[derive(Injectable)]` macro.
pub use armature_core_macros::Injectable;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::Injectable;
    pub use crate::error::*;
    pub use crate::init::*;
    pub use crate::inject::*;
    pub use crate::methods::*;
    pub use crate::object::*;
    pub use crate::track::*;
    pub use crate::value::*;
}
