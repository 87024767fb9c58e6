//! Seed descriptors, seed merging, and the object factory (Layer 2).
//!
//! A [`Seed`](seed::Seed) describes *what to construct*: a type tag,
//! positional constructor arguments, and named properties to inject after
//! construction. Seeds layer: a caller's seed merges over injected defaults,
//! which merge over application-level defaults, with left-biased precedence
//! and a handful of carefully chosen exceptions (see [`seed::merge`]).
//!
//! The [`Factory`](factory::Factory) turns a merged seed into a live object
//! by looking up the type tag in its constructor [`Registry`](factory::Registry)
//! and injecting the remaining named properties.
//!
//! # Example
//!
//! ```
//! use armature_core::Injectable;
//! use armature_core::object::{Object, object_ref};
//! use armature_factory::factory::Factory;
//! use armature_factory::seed::Seed;
//!
//! #[derive(Default, Injectable)]
//! struct Label {
//!     #[inject]
//!     text: Option<String>,
//! }
//!
//! impl Object for Label {
//!     fn type_tag(&self) -> &'static str {
//!         "Label"
//!     }
//!
//!     fn as_injectable(&mut self) -> Option<&mut dyn armature_core::inject::Injectable> {
//!         Some(self)
//!     }
//! }
//!
//! let factory = Factory::new();
//! factory
//!     .registry()
//!     .register("Label", |_args| Ok(object_ref(Label::default())))
//!     .unwrap();
//!
//! let label = factory
//!     .build(Seed::new("Label").with("text", "Hi"), Seed::props([("text", "default")]))
//!     .unwrap();
//! let label = label.borrow();
//! let label = label.downcast_ref::<Label>().unwrap();
//! assert_eq!(label.text.as_deref(), Some("Hi"));
//! ```

/// The object factory and its constructor registry.
pub mod factory;

/// Seed descriptors and the merge rules.
pub mod seed;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::factory::*;
    pub use crate::seed::*;
}
