//! Seed descriptors and the merge rules.
//!
//! # Anatomy of a seed
//!
//! A [`Seed`] has an ordered positional slice and a named-property map.
//! Position 0 is reserved: it holds the type tag (or an already-built
//! instance), never an ordinary constructor argument. A
//! [`Value::Null`](armature_core::value::Value::Null) in a positional slot
//! is an explicit "unset" marker - during merging it means "no override
//! here", exactly like the slot being absent.
//!
//! # Merge precedence
//!
//! [`merge`] combines two layers with left bias:
//!
//! - positional: the primary's non-null value wins at every index; null or
//!   absent slots fall through to the secondary;
//! - named: same rule, except when *both* sides carry a list for the same
//!   key - then the lists concatenate, primary's entries first;
//! - a live object on either side wins outright and the merge degrades to
//!   property injection into it (non-passive when the object is primary,
//!   passive when it is secondary, so a pre-existing object keeps its
//!   configured state over later defaults). An instance sitting in a
//!   descriptor's position 0 counts as that side's object operand;
//! - two distinct live objects are ambiguous and refused. Only an object
//!   buried inside a list or map value is plain data, never an operand.
//!
//! [`merge_all`] folds additional layers right-to-left, so the effective
//! operation is always binary.

use hashbrown::HashMap;
use std::rc::Rc;

use armature_core::error::CoreError;
use armature_core::inject::inject;
use armature_core::object::ObjectRef;
use armature_core::value::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Seed
// ─────────────────────────────────────────────────────────────────────────────

/// A description of what to construct.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seed {
    #[cfg_attr(feature = "serde", serde(default))]
    positional: Vec<Value>,
    #[cfg_attr(feature = "serde", serde(default))]
    props: HashMap<String, Value>,
}

impl Seed {
    /// A seed whose position 0 names a type.
    #[must_use]
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            positional: vec![Value::Str(type_tag.into())],
            props: HashMap::new(),
        }
    }

    /// A seed with no positional slots and no properties.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A seed carrying only named properties (no type slot).
    ///
    /// This is the usual shape for a defaults layer.
    #[must_use]
    pub fn props<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            positional: Vec::new(),
            props: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// A seed whose position 0 carries an already-built instance.
    ///
    /// The factory returns the instance as-is; the constructor never runs.
    #[must_use]
    pub fn instance(object: ObjectRef) -> Self {
        Self {
            positional: vec![Value::Object(object)],
            props: HashMap::new(),
        }
    }

    /// Appends a positional constructor argument.
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        if self.positional.is_empty() {
            // Keep position 0 reserved for the type slot.
            self.positional.push(Value::Null);
        }
        self.positional.push(value.into());
        self
    }

    /// Appends an explicitly unset positional argument.
    #[must_use]
    pub fn with_unset_arg(self) -> Self {
        self.with_arg(Value::Null)
    }

    /// Sets a named property.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// The type slot (position 0), with an explicit null reading as absent.
    #[must_use]
    pub fn type_slot(&self) -> Option<&Value> {
        match self.positional.first() {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// The already-built instance in position 0, if any.
    ///
    /// Such a seed acts as an object operand during merging.
    fn embedded_instance(&self) -> Option<&ObjectRef> {
        match self.positional.first() {
            Some(Value::Object(object)) => Some(object),
            _ => None,
        }
    }

    /// Blanks the type slot; defaults layers never specify a type.
    pub fn clear_type_slot(&mut self) {
        if let Some(slot) = self.positional.first_mut() {
            *slot = Value::Null;
        }
    }

    /// All positional slots, type slot included.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Constructor arguments: every positional slot after the type slot.
    #[must_use]
    pub fn ctor_args(&self) -> &[Value] {
        self.positional.get(1..).unwrap_or_default()
    }

    /// Returns `true` when any slot past position 0 carries a real value.
    #[must_use]
    pub fn has_ctor_args(&self) -> bool {
        self.ctor_args().iter().any(|value| !value.is_null())
    }

    /// The named properties.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, Value> {
        &self.props
    }
}

impl From<&str> for Seed {
    /// A bare scalar normalizes to a one-element positional seed.
    fn from(type_tag: &str) -> Self {
        Seed::new(type_tag)
    }
}

impl From<String> for Seed {
    fn from(type_tag: String) -> Self {
        Seed::new(type_tag)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SeedArg / Merged
// ─────────────────────────────────────────────────────────────────────────────

/// A merge operand: nothing, a descriptor, or a live object.
#[derive(Debug, Clone, Default)]
pub enum SeedArg {
    /// No layer here; merging with it is the identity.
    #[default]
    Unset,
    /// A seed descriptor.
    Spec(Seed),
    /// An already-constructed object.
    Object(ObjectRef),
}

impl From<Seed> for SeedArg {
    fn from(seed: Seed) -> Self {
        SeedArg::Spec(seed)
    }
}

impl From<ObjectRef> for SeedArg {
    fn from(object: ObjectRef) -> Self {
        SeedArg::Object(object)
    }
}

impl From<&str> for SeedArg {
    fn from(type_tag: &str) -> Self {
        SeedArg::Spec(Seed::new(type_tag))
    }
}

impl From<String> for SeedArg {
    fn from(type_tag: String) -> Self {
        SeedArg::Spec(Seed::new(type_tag))
    }
}

impl<T> From<Option<T>> for SeedArg
where
    T: Into<SeedArg>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(SeedArg::Unset, Into::into)
    }
}

impl From<Merged> for SeedArg {
    fn from(merged: Merged) -> Self {
        match merged {
            Merged::Spec(seed) => SeedArg::Spec(seed),
            Merged::Object(object) => SeedArg::Object(object),
        }
    }
}

/// The product of a merge: a folded descriptor, or the winning object.
#[derive(Debug, Clone)]
pub enum Merged {
    /// A folded seed descriptor.
    Spec(Seed),
    /// The single live object that won the merge.
    Object(ObjectRef),
}

impl Merged {
    /// The descriptor, when the merge stayed in descriptor land.
    #[must_use]
    pub fn as_spec(&self) -> Option<&Seed> {
        match self {
            Merged::Spec(seed) => Some(seed),
            Merged::Object(_) => None,
        }
    }

    /// The object, when one won the merge.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Merged::Spec(_) => None,
            Merged::Object(object) => Some(object),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// merge
// ─────────────────────────────────────────────────────────────────────────────

/// Merges two seed layers with left-biased precedence.
///
/// See the module docs for the full rule set.
pub fn merge(
    primary: impl Into<SeedArg>,
    secondary: impl Into<SeedArg>,
) -> Result<Merged, CoreError> {
    match (primary.into(), secondary.into()) {
        (SeedArg::Unset, SeedArg::Unset) => Ok(Merged::Spec(Seed::empty())),
        (SeedArg::Unset, SeedArg::Spec(seed)) | (SeedArg::Spec(seed), SeedArg::Unset) => {
            Ok(Merged::Spec(seed))
        }
        (SeedArg::Unset, SeedArg::Object(object))
        | (SeedArg::Object(object), SeedArg::Unset) => Ok(Merged::Object(object)),

        (SeedArg::Object(a), SeedArg::Object(b)) => {
            if Rc::ptr_eq(&a, &b) {
                return Ok(Merged::Object(a));
            }
            Err(CoreError::config(
                "cannot merge two distinct object operands: ambiguous which one is authoritative",
            ))
        }

        // Primary object: the secondary's properties are offered as
        // overrides (non-passive).
        (SeedArg::Object(object), SeedArg::Spec(seed)) => {
            reject_rival_instance(&object, &seed)?;
            reject_ctor_args(&seed)?;
            inject_into_object(&object, seed.properties(), false)?;
            Ok(Merged::Object(object))
        }

        // Secondary object: the primary's properties are only defaults the
        // object may already satisfy (passive).
        (SeedArg::Spec(seed), SeedArg::Object(object)) => {
            reject_rival_instance(&object, &seed)?;
            reject_ctor_args(&seed)?;
            inject_into_object(&object, seed.properties(), true)?;
            Ok(Merged::Object(object))
        }

        (SeedArg::Spec(primary), SeedArg::Spec(secondary)) => {
            merge_spec_pair(primary, secondary)
        }
    }
}

/// Merges two descriptors, treating a position-0 instance on either side as
/// that side's object operand.
fn merge_spec_pair(primary: Seed, secondary: Seed) -> Result<Merged, CoreError> {
    let object = match (primary.embedded_instance(), secondary.embedded_instance()) {
        (None, None) => return Ok(Merged::Spec(merge_specs(primary, secondary))),
        (Some(a), Some(b)) if !Rc::ptr_eq(a, b) => {
            return Err(CoreError::config(
                "cannot merge two distinct object operands: ambiguous which one is authoritative",
            ));
        }
        (Some(object), _) | (None, Some(object)) => Rc::clone(object),
    };

    reject_ctor_args(&primary)?;
    reject_ctor_args(&secondary)?;

    // The secondary layer lands first; the primary layer follows, and is
    // only a passive offer when the object sits on the secondary side.
    let primary_passively = primary.embedded_instance().is_none();
    inject_into_object(&object, secondary.properties(), false)?;
    inject_into_object(&object, primary.properties(), primary_passively)?;
    Ok(Merged::Object(object))
}

/// Folds extra layers right-to-left, then merges the primary over the result.
///
/// `merge_all(a, [b, c])` is `merge(a, merge(b, c))`, so precedence reads
/// left to right across the whole chain.
pub fn merge_all(
    primary: impl Into<SeedArg>,
    rest: Vec<SeedArg>,
) -> Result<Merged, CoreError> {
    let mut rest = rest.into_iter();
    let secondary = match rest.next() {
        None => SeedArg::Unset,
        Some(first) => SeedArg::from(merge_all(first, rest.collect())?),
    };
    merge(primary, secondary)
}

fn merge_specs(primary: Seed, secondary: Seed) -> Seed {
    let len = primary.positional.len().max(secondary.positional.len());
    let mut positional = Vec::with_capacity(len);
    for index in 0..len {
        let first = primary.positional.get(index);
        let value = match first {
            Some(value) if !value.is_null() => value.clone(),
            _ => secondary
                .positional
                .get(index)
                .cloned()
                .unwrap_or(Value::Null),
        };
        positional.push(value);
    }

    let mut props = secondary.props;
    for (key, value) in primary.props {
        match (props.get_mut(&key), value) {
            // Both sides hold a list: concatenate, primary's entries first.
            (Some(Value::List(theirs)), Value::List(mut ours)) => {
                ours.append(theirs);
                *theirs = ours;
            }
            (Some(slot), value) if !value.is_null() => *slot = value,
            (Some(_), _) => {}
            (None, value) => {
                props.insert(key, value);
            }
        }
    }

    Seed { positional, props }
}

pub(crate) fn reject_ctor_args(seed: &Seed) -> Result<(), CoreError> {
    if seed.has_ctor_args() {
        return Err(CoreError::config(
            "cannot inject constructor arguments into an existing instance",
        ));
    }
    Ok(())
}

/// Refuses a descriptor that embeds a different instance than the direct
/// object operand on the other side.
fn reject_rival_instance(object: &ObjectRef, seed: &Seed) -> Result<(), CoreError> {
    match seed.embedded_instance() {
        Some(rival) if !Rc::ptr_eq(object, rival) => Err(CoreError::config(
            "cannot merge two distinct object operands: ambiguous which one is authoritative",
        )),
        _ => Ok(()),
    }
}

/// Injects named properties into a live object, if it supports injection.
pub(crate) fn inject_into_object(
    object: &ObjectRef,
    props: &HashMap<String, Value>,
    passively: bool,
) -> Result<(), CoreError> {
    if props.is_empty() {
        return Ok(());
    }
    let mut target = object.borrow_mut();
    let type_tag = target.type_tag();
    match target.as_injectable() {
        Some(injectable) => inject(injectable, props, passively),
        None => {
            let mut names: Vec<_> = props.keys().map(String::as_str).collect();
            names.sort_unstable();
            Err(CoreError::config(format!(
                "cannot set property '{}' on '{type_tag}': object is not injectable",
                names[0]
            )))
        }
    }
}
