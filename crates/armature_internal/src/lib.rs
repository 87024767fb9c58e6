//! # Armature Internal Library
//!
//! Re-exports the core Armature crates for convenience.

/// Layer 1: value model, capability traits, and error taxonomy.
pub use armature_core;

/// Layer 2: seed descriptors, merging, and the object factory.
pub use armature_factory;

/// Layer 2: per-object hook registration and dispatch.
pub use armature_hooks;

/// Layer 3: application scope, naming policy, and containers.
pub use armature_tree;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use armature_core::prelude::*;
    pub use armature_factory::prelude::*;
    pub use armature_hooks::prelude::*;
    pub use armature_tree::prelude::*;
}
