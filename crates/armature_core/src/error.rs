//! The unified error taxonomy.
//!
//! Every condition raised by this workspace is a programmer or configuration
//! mistake, never an expected runtime state: detection is synchronous and
//! propagation is immediate via `Result`. There is no retry and no partial
//! recovery. Variants carry enough structured context (offending name,
//! container, type tag) for a caller-supplied renderer to produce a useful
//! message.
//!
//! A hook break is *not* an error: dispatch returns a tagged outcome instead
//! (see `armature_hooks`).

// ─────────────────────────────────────────────────────────────────────────────
// CoreError
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised across the Armature workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed seed, injection into an incompatible object, ambiguous
    /// merge, or any other misconfiguration detected at composition time.
    #[error("configuration error: {message}")]
    Configuration {
        /// Human-readable description of the misconfiguration.
        message: String,
    },

    /// An explicitly requested name collided inside a container.
    #[error("name '{name}' is already taken in container '{container}'")]
    DuplicateName {
        /// The colliding short name.
        name: String,
        /// Full name of the container where the collision happened.
        container: String,
    },

    /// Lookup of a non-existent child, method or hook registration.
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// What category of element was looked up.
        kind: NotFoundKind,
        /// The missing name or index.
        name: String,
    },

    /// `init()` was invoked a second time on the same object.
    #[error("object '{type_tag}' is already initialized")]
    AlreadyInitialized {
        /// Type tag of the offending object.
        type_tag: String,
    },

    /// An `init()` override returned without marking the object initialized.
    #[error("init() of '{type_tag}' returned without marking the object initialized")]
    InitializationContract {
        /// Type tag of the offending object.
        type_tag: String,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::Configuration`].
    pub fn config(message: impl Into<String>) -> Self {
        CoreError::Configuration {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NotFoundKind
// ─────────────────────────────────────────────────────────────────────────────

/// Category of element behind a [`CoreError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    /// A named child inside a container.
    Child,
    /// A dynamically registered method.
    Method,
    /// A hook registration (spot, priority or index).
    Hook,
}

impl core::fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NotFoundKind::Child => f.write_str("child"),
            NotFoundKind::Method => f.write_str("method"),
            NotFoundKind::Hook => f.write_str("hook"),
        }
    }
}
