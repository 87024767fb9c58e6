//! The object factory and its constructor registry.

use core::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use armature_core::error::CoreError;
use armature_core::object::ObjectRef;
use armature_core::value::Value;

use crate::seed::{Merged, SeedArg, inject_into_object, merge, reject_ctor_args};

/// A registered constructor: positional arguments in, live object out.
///
/// Explicitly null argument slots mean "use your default for this one".
pub type Ctor = Rc<dyn Fn(&[Value]) -> Result<ObjectRef, CoreError>>;

// ─────────────────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────────────────

/// Registry of constructible types, keyed by type tag.
///
/// Interior-mutable so plugins can register types through a shared
/// application scope during setup.
#[derive(Default)]
pub struct Registry {
    ctors: RefCell<HashMap<String, Ctor>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a constructor under a type tag.
    ///
    /// Registering the same tag twice is an error; replacing a constructor
    /// silently would make seeds mean different things over time.
    pub fn register(
        &self,
        type_tag: impl Into<String>,
        ctor: impl Fn(&[Value]) -> Result<ObjectRef, CoreError> + 'static,
    ) -> Result<(), CoreError> {
        let type_tag = type_tag.into();
        let mut ctors = self.ctors.borrow_mut();
        if ctors.contains_key(&type_tag) {
            return Err(CoreError::config(format!(
                "type '{type_tag}' is already registered"
            )));
        }
        ctors.insert(type_tag, Rc::new(ctor));
        Ok(())
    }

    /// Returns `true` when the tag names a registered type.
    #[must_use]
    pub fn contains(&self, type_tag: &str) -> bool {
        self.ctors.borrow().contains_key(type_tag)
    }

    /// All registered tags, unordered.
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.ctors.borrow().keys().cloned().collect()
    }

    fn get(&self, type_tag: &str) -> Option<Ctor> {
        self.ctors.borrow().get(type_tag).cloned()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry").field("tags", &self.tags()).finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Factory
// ─────────────────────────────────────────────────────────────────────────────

/// Builds objects from seed descriptors.
#[derive(Debug, Default)]
pub struct Factory {
    registry: Registry,
}

impl Factory {
    /// Creates a factory with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The constructor registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Builds an object from a seed merged over a defaults layer.
    ///
    /// The defaults layer never specifies a type: its position 0 is blanked
    /// before merging. After the merge, position 0 either short-circuits (an
    /// already-built instance) or names the constructor; remaining
    /// positional slots become constructor arguments and named properties
    /// are injected non-passively afterwards.
    pub fn build(
        &self,
        seed: impl Into<SeedArg>,
        defaults: impl Into<SeedArg>,
    ) -> Result<ObjectRef, CoreError> {
        let mut defaults = defaults.into();
        if let SeedArg::Spec(spec) = &mut defaults {
            spec.clear_type_slot();
        }

        let spec = match merge(seed, defaults)? {
            // The merge already routed properties into the winning object.
            Merged::Object(object) => return Ok(object),
            Merged::Spec(spec) => spec,
        };

        match spec.type_slot() {
            Some(Value::Object(object)) => {
                // An instance in the type slot: the constructor never runs,
                // so argument slots past it must all be unset.
                let object = Rc::clone(object);
                reject_ctor_args(&spec)?;
                inject_into_object(&object, spec.properties(), false)?;
                Ok(object)
            }
            Some(Value::Str(type_tag)) if !type_tag.is_empty() => {
                let ctor = self.registry.get(type_tag).ok_or_else(|| {
                    CoreError::config(format!(
                        "type '{type_tag}' is not a registered constructible"
                    ))
                })?;
                let object = ctor(spec.ctor_args())?;
                tracing::debug!(
                    type_tag,
                    args = spec.ctor_args().len(),
                    props = spec.properties().len(),
                    "built object from seed"
                );
                inject_into_object(&object, spec.properties(), false)?;
                Ok(object)
            }
            Some(Value::Str(_)) | None => {
                Err(CoreError::config("seed is missing a type identifier"))
            }
            Some(other) => Err(CoreError::config(format!(
                "seed type slot must be a type tag or an instance, got {}",
                other.kind()
            ))),
        }
    }
}
