//! Per-object hook registration and dispatch (Layer 2).
//!
//! A [`HookRegistry`] maps *spot* names (plain strings like `"beforeInit"`)
//! to ordered callback tables. Firing a spot runs its callbacks in ascending
//! priority order and collects their return values; a callback can
//! short-circuit the pass by breaking with a value.
//!
//! # Ordering
//!
//! Within one priority, callbacks run in registration order - except for
//! priorities below zero, where ties run in *reverse* registration order.
//! The asymmetry is deliberate: registering at a negative priority means
//! "insert at the very front", and the most recent such registration should
//! land frontmost.
//!
//! # Reentrancy
//!
//! Dispatch snapshots the spot's table before invoking anything, so
//! callbacks may freely register or remove hooks (even on the spot currently
//! firing) without perturbing the in-flight pass, and may fire the same spot
//! recursively - each nested pass takes its own snapshot.
//!
//! # Breaks are not errors
//!
//! A break is ordinary control flow, expressed with
//! [`ControlFlow::Break`](core::ops::ControlFlow) from the callback and
//! [`FireOutcome::Broken`] from [`HookRegistry::fire`]. Errors
//! ([`CoreError`](armature_core::error::CoreError)) abort the pass and
//! propagate to the caller of `fire` instead.
//!
//! # Example
//!
//! ```
//! use core::ops::ControlFlow;
//! use armature_hooks::HookRegistry;
//! use armature_core::value::Value;
//!
//! let hooks = HookRegistry::new();
//! hooks.on("greet", |args| {
//!     let who = args[0].as_str().unwrap_or("world").to_owned();
//!     Ok(ControlFlow::Continue(Value::Str(format!("hello {who}"))))
//! });
//!
//! let outcome = hooks.fire("greet", &[Value::from("armature")]).unwrap();
//! assert!(!outcome.is_broken());
//! ```

mod registry;

pub use registry::{FireOutcome, HookHandler, HookRegistry, HookSelector, Hookable};

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::registry::*;
}
