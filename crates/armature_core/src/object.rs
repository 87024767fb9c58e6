//! The [`Object`] trait and capability discovery.
//!
//! Every constructible type implements [`Object`]. Optional behaviors -
//! property injection, ownership tracking, initialization - are separate
//! capability traits discovered through accessor methods that default to
//! `None`. A caller probes with `as_injectable()` and friends instead of
//! reflective trait checks, keeping the set of capabilities closed and
//! explicit.

use core::cell::RefCell;
use std::rc::{Rc, Weak};

use downcast_rs::{Downcast, impl_downcast};

use crate::init::Initializable;
use crate::inject::Injectable;
use crate::track::Trackable;

/// Shared handle to a constructed object.
pub type ObjectRef = Rc<RefCell<dyn Object>>;

/// Weak handle to a constructed object.
pub type WeakObjectRef = Weak<RefCell<dyn Object>>;

// ─────────────────────────────────────────────────────────────────────────────
// Object
// ─────────────────────────────────────────────────────────────────────────────

/// A constructible framework object.
///
/// The trait is intentionally small: a stable type tag (the identifier the
/// factory registry knows the type by) plus capability accessors. Types opt
/// into a capability by overriding the matching accessor to return `self`:
///
/// ```
/// use armature_core::object::Object;
/// use armature_core::track::{TrackState, Trackable};
///
/// #[derive(Default)]
/// struct Panel {
///     track: TrackState,
/// }
///
/// impl Object for Panel {
///     fn type_tag(&self) -> &'static str {
///         "Panel"
///     }
///
///     fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
///         Some(self)
///     }
/// }
///
/// impl Trackable for Panel {
///     fn track_state(&self) -> &TrackState {
///         &self.track
///     }
///
///     fn track_state_mut(&mut self) -> &mut TrackState {
///         &mut self.track
///     }
/// }
/// ```
pub trait Object: Downcast {
    /// The type identifier this object is registered and named under.
    fn type_tag(&self) -> &'static str;

    /// Property-injection capability, when supported.
    fn as_injectable(&mut self) -> Option<&mut dyn Injectable> {
        None
    }

    /// Ownership/naming capability, when supported.
    fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
        None
    }

    /// Initialization capability, when supported.
    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        None
    }

    /// Deep-clone capability, when supported.
    ///
    /// Containers use this to clone owned children; the default refuses.
    fn clone_object(&self) -> Option<ObjectRef> {
        None
    }
}

impl_downcast!(Object);

impl core::fmt::Debug for dyn Object {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Object({})", self.type_tag())
    }
}

/// Wraps a concrete object into a shared [`ObjectRef`] handle.
pub fn object_ref<T: Object>(object: T) -> ObjectRef {
    Rc::new(RefCell::new(object))
}
