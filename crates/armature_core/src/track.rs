//! Owner/application back-references and naming state.
//!
//! A *trackable* object knows where it lives: a weak back-reference to the
//! container that owns it, the application scope it was added under, its
//! short name (unique among siblings) and its full hierarchical name. The
//! back-references are weak or cleared on removal so a detached child never
//! keeps the rest of the object graph alive.

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use downcast_rs::{Downcast, impl_downcast};

use crate::error::CoreError;

// ─────────────────────────────────────────────────────────────────────────────
// Parent / App handles
// ─────────────────────────────────────────────────────────────────────────────

/// What a trackable child needs from whoever owns it.
///
/// `armature_tree::Container` is the implementation; the trait lives here so
/// the capability can be expressed without a dependency cycle.
pub trait Parent {
    /// Full hierarchical name of this parent.
    fn full_name(&self) -> String;

    /// Returns `true` when a child with this short name is registered.
    fn has_child(&self, name: &str) -> bool;

    /// Detaches the child registered under this short name.
    fn remove_child(&mut self, name: &str) -> Result<(), CoreError>;
}

/// Shared handle to an owning parent.
pub type ParentRef = Rc<RefCell<dyn Parent>>;

/// Weak handle to an owning parent; this is what children store.
pub type WeakParentRef = Weak<RefCell<dyn Parent>>;

/// Marker for the per-application root scope.
///
/// Downcast to the concrete scope type (`armature_tree::AppScope`) to reach
/// naming configuration, the factory, or application-wide hooks.
pub trait App: Downcast {}

impl_downcast!(App);

// ─────────────────────────────────────────────────────────────────────────────
// Trackable
// ─────────────────────────────────────────────────────────────────────────────

/// The ownership/naming capability.
///
/// Implementors embed a [`TrackState`] and expose it through the two state
/// accessors; every other method has a default built on top of them.
pub trait Trackable {
    /// Borrows the embedded tracking state.
    fn track_state(&self) -> &TrackState;

    /// Mutably borrows the embedded tracking state.
    fn track_state_mut(&mut self) -> &mut TrackState;

    /// The owning container, if this object is currently registered.
    fn owner(&self) -> Option<ParentRef> {
        self.track_state().owner()
    }

    /// Records the owning container. Set by `Container::add`.
    fn set_owner(&mut self, owner: WeakParentRef) {
        self.track_state_mut().owner = Some(owner);
    }

    /// Clears the owner back-reference.
    fn unset_owner(&mut self) {
        self.track_state_mut().owner = None;
    }

    /// The application scope this object was added under, if any.
    fn app(&self) -> Option<Rc<dyn App>> {
        self.track_state().app.clone()
    }

    /// Records the application scope. Set by `Container::add`.
    fn set_app(&mut self, app: Rc<dyn App>) {
        self.track_state_mut().app = Some(app);
    }

    /// Clears the application back-reference.
    fn unset_app(&mut self) {
        self.track_state_mut().app = None;
    }

    /// Short name, unique among siblings, once assigned.
    fn short_name(&self) -> Option<&str> {
        self.track_state().short_name.as_deref()
    }

    /// Assigns the short name. Set by `Container::add`.
    fn set_short_name(&mut self, name: String) {
        self.track_state_mut().short_name = Some(name);
    }

    /// Full hierarchical name, once assigned.
    fn name(&self) -> Option<&str> {
        self.track_state().name.as_deref()
    }

    /// Assigns the full hierarchical name. Set by `Container::add`.
    fn set_name(&mut self, name: String) {
        self.track_state_mut().name = Some(name);
    }

    /// The short name this object asks for when none is given explicitly.
    fn desired_name(&self) -> Option<&str> {
        self.track_state().desired_name.as_deref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TrackState
// ─────────────────────────────────────────────────────────────────────────────

/// Embeddable storage behind [`Trackable`].
#[derive(Default, Clone)]
pub struct TrackState {
    pub(crate) owner: Option<WeakParentRef>,
    pub(crate) app: Option<Rc<dyn App>>,
    pub(crate) short_name: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) desired_name: Option<String>,
}

impl TrackState {
    /// Creates empty tracking state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates tracking state that asks for a particular short name.
    #[must_use]
    pub fn with_desired_name(name: impl Into<String>) -> Self {
        Self {
            desired_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Upgraded owner handle, when the owner is still alive.
    #[must_use]
    pub fn owner(&self) -> Option<ParentRef> {
        self.owner.as_ref()?.upgrade()
    }
}

impl core::fmt::Debug for TrackState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackState")
            .field("short_name", &self.short_name)
            .field("name", &self.name)
            .field("desired_name", &self.desired_name)
            .field("owned", &self.owner().is_some())
            .field("has_app", &self.app.is_some())
            .finish()
    }
}
