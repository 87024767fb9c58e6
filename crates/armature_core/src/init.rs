//! Exactly-once initialization lifecycle.
//!
//! Initialization runs once, immediately after a container assigns names -
//! never earlier, never twice. The contract has two failure modes with
//! distinct errors:
//!
//! - calling `init()` a second time on the same object, through any path,
//!   raises [`CoreError::AlreadyInitialized`];
//! - an `init()` override that returns without marking its state (a
//!   forgotten delegation to [`InitState::mark_initialized`]) is detected by
//!   the container and surfaced as [`CoreError::InitializationContract`].

use crate::error::CoreError;

// ─────────────────────────────────────────────────────────────────────────────
// Initializable
// ─────────────────────────────────────────────────────────────────────────────

/// The initialization capability.
///
/// Implementors embed an [`InitState`]; `init()` must call
/// [`InitState::mark_initialized`] (directly or by delegating to another
/// `init()` that does).
pub trait Initializable {
    /// Borrows the embedded initialization state.
    fn init_state(&self) -> &InitState;

    /// Mutably borrows the embedded initialization state.
    fn init_state_mut(&mut self) -> &mut InitState;

    /// Runs one-time setup. Invoked by the container right after naming.
    fn init(&mut self) -> Result<(), CoreError>;

    /// Whether `init()` has completed.
    fn is_initialized(&self) -> bool {
        self.init_state().initialized
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InitState
// ─────────────────────────────────────────────────────────────────────────────

/// Embeddable storage behind [`Initializable`].
#[derive(Debug, Default, Clone)]
pub struct InitState {
    pub(crate) initialized: bool,
}

impl InitState {
    /// Creates uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the object initialized; the second call, ever, is an error.
    pub fn mark_initialized(&mut self, type_tag: &str) -> Result<(), CoreError> {
        if self.initialized {
            return Err(CoreError::AlreadyInitialized {
                type_tag: type_tag.to_owned(),
            });
        }
        self.initialized = true;
        Ok(())
    }
}
