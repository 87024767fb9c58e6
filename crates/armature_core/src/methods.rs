//! Explicit per-object dynamic method registry.
//!
//! Some frameworks let hooks bolt methods onto live objects through
//! magic-method interception. Here that becomes an explicit registry of
//! function values keyed by name: lookup, then call. Hook "method name
//! shortcuts" validate against this registry at registration time.

use core::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::error::{CoreError, NotFoundKind};
use crate::value::Value;

/// A dynamically registered method.
pub type Method = Rc<dyn Fn(&[Value]) -> Result<Value, CoreError>>;

// ─────────────────────────────────────────────────────────────────────────────
// MethodRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Name-keyed registry of function values.
///
/// Interior-mutable so it can be shared as `Rc<MethodRegistry>` between an
/// object and the hooks bound to it; a method may add or remove other
/// methods while being invoked.
#[derive(Default)]
pub struct MethodRegistry {
    methods: RefCell<HashMap<String, Method>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a method. Re-registering an existing name is an error.
    pub fn add_method(
        &self,
        name: impl Into<String>,
        method: impl Fn(&[Value]) -> Result<Value, CoreError> + 'static,
    ) -> Result<(), CoreError> {
        let name = name.into();
        let mut methods = self.methods.borrow_mut();
        if methods.contains_key(&name) {
            return Err(CoreError::config(format!(
                "method '{name}' is already registered"
            )));
        }
        methods.insert(name, Rc::new(method));
        Ok(())
    }

    /// Returns `true` when a method with this name is registered.
    #[must_use]
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }

    /// Removes a registered method.
    pub fn remove_method(&self, name: &str) -> Result<(), CoreError> {
        self.methods
            .borrow_mut()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| CoreError::NotFound {
                kind: NotFoundKind::Method,
                name: name.to_owned(),
            })
    }

    /// Looks up and invokes a method.
    ///
    /// The handle is cloned out before the call, so the method body may
    /// freely mutate the registry.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value, CoreError> {
        let method = self
            .methods
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                kind: NotFoundKind::Method,
                name: name.to_owned(),
            })?;
        method(args)
    }

    /// Names of all registered methods, unordered.
    #[must_use]
    pub fn method_names(&self) -> Vec<String> {
        self.methods.borrow().keys().cloned().collect()
    }
}

impl core::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}
