//! Object-composition primitives for application frameworks.
//!

pub use armature_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use armature_internal::prelude::*;
}
