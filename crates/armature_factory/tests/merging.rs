//! Tests for the seed merge rules.
//!
//! These pin down the precedence table: left bias with null fall-through for
//! positional slots, list concatenation for named properties, object
//! operands winning outright, and the two-object ambiguity.

use std::rc::Rc;

use armature_core::Injectable;
use armature_core::error::CoreError;
use armature_core::object::{Object, ObjectRef, object_ref};
use armature_core::value::Value;
use armature_factory::seed::{Merged, Seed, SeedArg, merge, merge_all};

// ─────────────────────────────────────────────────────────────────────────────
// Test Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default, Injectable)]
struct Widget {
    #[inject]
    label: Option<String>,
    #[inject]
    color: Option<String>,
    #[inject]
    classes: Vec<Value>,
}

impl Object for Widget {
    fn type_tag(&self) -> &'static str {
        "Widget"
    }

    fn as_injectable(&mut self) -> Option<&mut dyn armature_core::inject::Injectable> {
        Some(self)
    }
}

/// No injection capability at all.
struct Opaque;

impl Object for Opaque {
    fn type_tag(&self) -> &'static str {
        "Opaque"
    }
}

fn widget() -> ObjectRef {
    object_ref(Widget::default())
}

fn spec(merged: Merged) -> Seed {
    match merged {
        Merged::Spec(seed) => seed,
        Merged::Object(_) => panic!("expected a descriptor"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity / absorption
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn merging_with_nothing_is_identity() {
    let seed = Seed::new("Widget").with("label", "Hi").with_arg(5);
    assert_eq!(spec(merge(seed.clone(), SeedArg::Unset).unwrap()), seed);
    assert_eq!(spec(merge(SeedArg::Unset, seed.clone()).unwrap()), seed);
}

#[test]
fn bare_scalars_normalize_to_positional_seeds() {
    let merged = spec(merge("Widget", SeedArg::Unset).unwrap());
    assert_eq!(merged.type_slot(), Some(&Value::from("Widget")));
}

// ─────────────────────────────────────────────────────────────────────────────
// Positional precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn left_null_falls_through_and_right_fills_gaps() {
    let primary = Seed::empty().with_arg("x"); // [null, "x"]
    let secondary = Seed::new("y").with_arg("z"); // ["y", "z"]
    let merged = spec(merge(primary, secondary).unwrap());
    assert_eq!(
        merged.positional(),
        &[Value::from("y"), Value::from("x")]
    );
}

#[test]
fn non_null_left_wins_everywhere_else() {
    let primary = Seed::new("A").with_arg(1);
    let secondary = Seed::new("B").with_arg(2).with_arg(3);
    let merged = spec(merge(primary, secondary).unwrap());
    assert_eq!(
        merged.positional(),
        &[Value::from("A"), Value::from(1), Value::from(3)]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Named properties
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn named_lists_concatenate_primary_first() {
    let primary = Seed::empty().with("foo", vec![Value::from(1)]);
    let secondary = Seed::empty().with("foo", vec![Value::from(2)]);
    let merged = spec(merge(primary, secondary).unwrap());
    assert_eq!(
        merged.properties()["foo"],
        Value::List(vec![Value::from(1), Value::from(2)])
    );
}

#[test]
fn named_scalars_follow_left_bias() {
    let primary = Seed::empty().with("a", "mine").with("b", Value::Null);
    let secondary = Seed::empty().with("a", "theirs").with("b", "fills").with("c", 3);
    let merged = spec(merge(primary, secondary).unwrap());
    assert_eq!(merged.properties()["a"], Value::from("mine"));
    assert_eq!(merged.properties()["b"], Value::from("fills"));
    assert_eq!(merged.properties()["c"], Value::from(3));
}

// ─────────────────────────────────────────────────────────────────────────────
// Object operands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn two_distinct_objects_are_ambiguous() {
    let err = merge(widget(), widget()).unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }));
}

#[test]
fn the_same_object_twice_is_not_ambiguous() {
    let object = widget();
    let merged = merge(object.clone(), object.clone()).unwrap();
    assert!(merged.as_object().is_some());
}

#[test]
fn primary_object_takes_secondary_properties_non_passively() {
    let object = widget();
    object
        .borrow_mut()
        .downcast_mut::<Widget>()
        .unwrap()
        .label = Some("old".to_owned());

    let merged = merge(object.clone(), Seed::props([("label", "new")])).unwrap();
    assert!(merged.as_object().is_some());
    let borrowed = object.borrow();
    let concrete = borrowed.downcast_ref::<Widget>().unwrap();
    assert_eq!(concrete.label.as_deref(), Some("new"));
}

#[test]
fn secondary_object_keeps_its_state_over_primary_defaults() {
    let object = widget();
    object
        .borrow_mut()
        .downcast_mut::<Widget>()
        .unwrap()
        .label = Some("configured".to_owned());

    merge(
        Seed::props([("label", "default"), ("color", "red")]),
        object.clone(),
    )
    .unwrap();
    let borrowed = object.borrow();
    let concrete = borrowed.downcast_ref::<Widget>().unwrap();
    assert_eq!(concrete.label.as_deref(), Some("configured"));
    assert_eq!(concrete.color.as_deref(), Some("red"));
}

#[test]
fn constructor_arguments_cannot_reach_an_instance() {
    let err = merge(widget(), Seed::new("Widget").with_arg(5)).unwrap_err();
    assert!(err.to_string().contains("constructor arguments"));
}

#[test]
fn injecting_into_a_non_injectable_object_fails() {
    let err = merge(object_ref(Opaque), Seed::props([("label", "x")])).unwrap_err();
    assert!(matches!(err, CoreError::Configuration { .. }));
}

#[test]
fn an_object_nested_in_a_list_is_just_data() {
    let primary = Seed::empty().with("items", vec![Value::from(widget())]);
    let secondary = Seed::empty().with("items", vec![Value::from(widget())]);
    // Neither nested object becomes "the" operand; the lists concatenate.
    let merged = spec(merge(primary, secondary).unwrap());
    assert_eq!(merged.properties()["items"].as_list().unwrap().len(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Embedded instances
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn two_embedded_instances_are_ambiguous() {
    let primary = Seed::instance(widget()).with("label", "a");
    let secondary = Seed::instance(widget()).with("label", "b");
    let err = merge(primary, secondary).unwrap_err();
    assert!(err.to_string().contains("ambiguous"));
}

#[test]
fn the_same_instance_embedded_on_both_sides_collapses() {
    let object = widget();
    let merged = merge(
        Seed::instance(object.clone()),
        Seed::instance(object.clone()),
    )
    .unwrap();
    assert!(Rc::ptr_eq(merged.as_object().unwrap(), &object));
}

#[test]
fn an_embedded_primary_instance_takes_the_secondary_as_overrides() {
    let object = widget();
    let primary = Seed::instance(object.clone()).with("label", "mine");
    let secondary = Seed::props([("label", "theirs"), ("color", "red")]);
    let merged = merge(primary, secondary).unwrap();
    assert!(Rc::ptr_eq(merged.as_object().unwrap(), &object));
    let borrowed = object.borrow();
    let concrete = borrowed.downcast_ref::<Widget>().unwrap();
    assert_eq!(concrete.label.as_deref(), Some("mine"));
    assert_eq!(concrete.color.as_deref(), Some("red"));
}

#[test]
fn an_embedded_secondary_instance_keeps_its_state_over_defaults() {
    let object = widget();
    object
        .borrow_mut()
        .downcast_mut::<Widget>()
        .unwrap()
        .label = Some("configured".to_owned());

    let merged = merge(
        Seed::props([("label", "default"), ("color", "red")]),
        Seed::instance(object.clone()),
    )
    .unwrap();
    assert!(Rc::ptr_eq(merged.as_object().unwrap(), &object));
    let borrowed = object.borrow();
    let concrete = borrowed.downcast_ref::<Widget>().unwrap();
    assert_eq!(concrete.label.as_deref(), Some("configured"));
    assert_eq!(concrete.color.as_deref(), Some("red"));
}

#[test]
fn constructor_arguments_cannot_ride_along_an_embedded_instance() {
    let err = merge(Seed::instance(widget()).with_arg(5), Seed::empty()).unwrap_err();
    assert!(err.to_string().contains("constructor arguments"));
}

#[test]
fn an_embedded_instance_rivals_a_direct_object_operand() {
    let err = merge(widget(), Seed::instance(widget())).unwrap_err();
    assert!(err.to_string().contains("ambiguous"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Folding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn extra_layers_fold_right_to_left() {
    let merged = spec(
        merge_all(
            Seed::empty().with("a", 1),
            vec![
                SeedArg::from(Seed::empty().with("a", 2).with("b", 2)),
                SeedArg::from(Seed::empty().with("a", 3).with("b", 3).with("c", 3)),
            ],
        )
        .unwrap(),
    );
    assert_eq!(merged.properties()["a"], Value::from(1));
    assert_eq!(merged.properties()["b"], Value::from(2));
    assert_eq!(merged.properties()["c"], Value::from(3));
}

#[test]
fn a_single_object_anywhere_in_the_chain_wins() {
    let object = widget();
    let merged = merge_all(
        Seed::props([("label", "default")]),
        vec![SeedArg::from(object.clone()), SeedArg::Unset],
    )
    .unwrap();
    assert!(merged.as_object().is_some());
    let borrowed = object.borrow();
    assert_eq!(
        borrowed.downcast_ref::<Widget>().unwrap().label.as_deref(),
        Some("default")
    );
}
