//! Tests for container ownership, lifecycle and deep cloning.

use std::rc::Rc;

use armature_core::error::{CoreError, NotFoundKind};
use armature_core::init::{InitState, Initializable};
use armature_core::object::{Object, ObjectRef, object_ref};
use armature_core::track::{App, ParentRef, TrackState, Trackable};
use armature_tree::app::AppScope;
use armature_tree::container::Container;
use armature_tree::destroy;

// ─────────────────────────────────────────────────────────────────────────────
// Test Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default, Clone)]
struct Widget {
    track: TrackState,
    init: InitState,
}

impl Object for Widget {
    fn type_tag(&self) -> &'static str {
        "Widget"
    }

    fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }

    fn clone_object(&self) -> Option<ObjectRef> {
        Some(object_ref(self.clone()))
    }
}

impl Trackable for Widget {
    fn track_state(&self) -> &TrackState {
        &self.track
    }

    fn track_state_mut(&mut self) -> &mut TrackState {
        &mut self.track
    }
}

impl Initializable for Widget {
    fn init_state(&self) -> &InitState {
        &self.init
    }

    fn init_state_mut(&mut self) -> &mut InitState {
        &mut self.init
    }

    fn init(&mut self) -> Result<(), CoreError> {
        self.init_state_mut().mark_initialized("Widget")
    }
}

/// An `init()` that forgets to mark its state.
#[derive(Default)]
struct Sloppy {
    track: TrackState,
    init: InitState,
}

impl Object for Sloppy {
    fn type_tag(&self) -> &'static str {
        "Sloppy"
    }

    fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl Trackable for Sloppy {
    fn track_state(&self) -> &TrackState {
        &self.track
    }

    fn track_state_mut(&mut self) -> &mut TrackState {
        &mut self.track
    }
}

impl Initializable for Sloppy {
    fn init_state(&self) -> &InitState {
        &self.init
    }

    fn init_state_mut(&mut self) -> &mut InitState {
        &mut self.init
    }

    fn init(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// No tracking, no initialization; still containable.
#[derive(Clone)]
struct Plain;

impl Object for Plain {
    fn type_tag(&self) -> &'static str {
        "Plain"
    }

    fn clone_object(&self) -> Option<ObjectRef> {
        Some(object_ref(self.clone()))
    }
}

/// No clone capability.
#[derive(Default)]
struct Unique {
    track: TrackState,
}

impl Object for Unique {
    fn type_tag(&self) -> &'static str {
        "Unique"
    }

    fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
        Some(self)
    }
}

impl Trackable for Unique {
    fn track_state(&self) -> &TrackState {
        &self.track
    }

    fn track_state_mut(&mut self) -> &mut TrackState {
        &mut self.track
    }
}

fn widget() -> ObjectRef {
    object_ref(Widget::default())
}

fn owner_of(object: &ObjectRef) -> Option<ParentRef> {
    let mut borrowed = object.borrow_mut();
    borrowed.as_trackable().and_then(|track| track.owner())
}

// ─────────────────────────────────────────────────────────────────────────────
// Add / get / remove
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn added_children_are_retrievable_by_short_name() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), Some("sidebar")).unwrap();

    assert!(root.borrow().has("sidebar"));
    assert_eq!(root.borrow().len(), 1);
    let fetched = root.borrow().get("sidebar").unwrap();
    assert!(Rc::ptr_eq(&fetched, &child));
}

#[test]
fn missing_children_are_not_found() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let err = root.borrow().get("ghost").unwrap_err();
    assert!(matches!(
        err,
        CoreError::NotFound {
            kind: NotFoundKind::Child,
            ..
        }
    ));
    let err = root.borrow_mut().remove("ghost").unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
}

#[test]
fn untracked_objects_can_still_be_contained() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    Container::add(&root, object_ref(Plain), None).unwrap();
    assert!(root.borrow().has("plain"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Back-references
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn adding_wires_owner_and_app_back_references() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), None).unwrap();

    let owner = owner_of(&child).expect("owner is set");
    let root_as_parent: ParentRef = Rc::clone(&root) as ParentRef;
    assert!(Rc::ptr_eq(&owner, &root_as_parent));

    let mut borrowed = child.borrow_mut();
    let track = borrowed.as_trackable().unwrap();
    let child_app = track.app().expect("app is set");
    let app_as_dyn: Rc<dyn App> = Rc::clone(&app) as Rc<dyn App>;
    assert!(Rc::ptr_eq(&child_app, &app_as_dyn));
}

#[test]
fn removal_clears_the_back_references() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), Some("sidebar")).unwrap();
    root.borrow_mut().remove("sidebar").unwrap();

    assert!(!root.borrow().has("sidebar"));
    assert!(owner_of(&child).is_none());
    let mut borrowed = child.borrow_mut();
    assert!(borrowed.as_trackable().unwrap().app().is_none());
}

#[test]
fn an_owned_object_cannot_be_added_again() {
    let app = AppScope::new();
    let first = Container::new(&app, "first");
    let second = Container::new(&app, "second");
    let child = Container::add(&first, widget(), None).unwrap();
    let err = Container::add(&second, child, None).unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }));
}

#[test]
fn a_dropped_owner_reads_as_detached() {
    let app = AppScope::new();
    let child = {
        let root = Container::new(&app, "app");
        Container::add(&root, widget(), None).unwrap()
    };
    // The weak back-reference does not keep the container alive.
    assert!(owner_of(&child).is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Initialization
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn children_are_initialized_on_add() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), None).unwrap();
    let mut borrowed = child.borrow_mut();
    assert!(borrowed.as_initializable().unwrap().is_initialized());
}

#[test]
fn a_second_init_is_refused() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), None).unwrap();
    let mut borrowed = child.borrow_mut();
    let err = borrowed.as_initializable().unwrap().init().unwrap_err();
    assert!(matches!(err, CoreError::AlreadyInitialized { .. }));
}

#[test]
fn forgetting_to_mark_initialized_is_a_contract_violation() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let err = Container::add(&root, object_ref(Sloppy::default()), None).unwrap_err();
    match err {
        CoreError::InitializationContract { type_tag } => assert_eq!(type_tag, "Sloppy"),
        other => panic!("expected InitializationContract, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Destroy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn destroy_detaches_through_the_owner() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let child = Container::add(&root, widget(), Some("sidebar")).unwrap();

    destroy(&child).unwrap();
    assert!(!root.borrow().has("sidebar"));
    assert!(owner_of(&child).is_none());
}

#[test]
fn destroying_an_unowned_object_is_a_no_op() {
    destroy(&widget()).unwrap();
    destroy(&object_ref(Plain)).unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Deep clone
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn deep_clone_copies_children_and_repoints_owners() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    let original = Container::add(&root, widget(), Some("sidebar")).unwrap();

    let clone = Container::deep_clone(&root).unwrap();
    let copied = clone.borrow().get("sidebar").unwrap();
    assert!(!Rc::ptr_eq(&copied, &original));

    let owner = owner_of(&copied).expect("clone has an owner");
    let clone_as_parent: ParentRef = Rc::clone(&clone) as ParentRef;
    assert!(Rc::ptr_eq(&owner, &clone_as_parent));

    // The two trees are independent from here on.
    root.borrow_mut().remove("sidebar").unwrap();
    assert!(clone.borrow().has("sidebar"));
}

#[test]
fn deep_clone_keeps_the_name_counters() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    Container::add(&root, widget(), None).unwrap();

    let clone = Container::deep_clone(&root).unwrap();
    let next = Container::add(&clone, widget(), None).unwrap();
    let mut borrowed = next.borrow_mut();
    assert_eq!(
        borrowed.as_trackable().unwrap().short_name(),
        Some("widget_2")
    );
}

#[test]
fn a_child_without_clone_support_fails_the_whole_clone() {
    let app = AppScope::new();
    let root = Container::new(&app, "app");
    Container::add(&root, object_ref(Unique::default()), Some("lonely")).unwrap();
    let err = Container::deep_clone(&root).unwrap_err();
    assert!(err.to_string().contains("lonely"));
}
