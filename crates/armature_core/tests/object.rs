//! Tests for the `Object` trait surface.

use armature_core::object::{Object, object_ref};

struct Widget;

impl Object for Widget {
    fn type_tag(&self) -> &'static str {
        "Widget"
    }
}

#[test]
fn object_handles_are_debuggable() {
    // `ObjectRef` appears inside `Debug`-derived containers (seeds, merge
    // operands, `Result`s in tests), so the erased trait object must format.
    let object = object_ref(Widget);
    let rendered = format!("{object:?}");
    assert!(rendered.contains("Widget"), "unexpected rendering: {rendered}");
}

#[test]
fn capabilities_default_to_absent() {
    let object = object_ref(Widget);
    let mut borrowed = object.borrow_mut();
    assert!(borrowed.as_injectable().is_none());
    assert!(borrowed.as_trackable().is_none());
    assert!(borrowed.as_initializable().is_none());
    assert!(borrowed.clone_object().is_none());
}
