//! The hook registry and its dispatch loop.

use core::cell::RefCell;
use core::ops::ControlFlow;
use std::rc::Rc;

use hashbrown::HashMap;

use armature_core::error::{CoreError, NotFoundKind};
use armature_core::methods::MethodRegistry;
use armature_core::value::Value;

/// A registered hook callback.
///
/// Receives the fire arguments followed by the arguments bound at
/// registration time. `Continue(v)` records `v` as this callback's result;
/// `Break(v)` stops the pass and makes `v` the outcome of the whole fire.
pub type HookHandler = Rc<dyn Fn(&[Value]) -> Result<ControlFlow<Value, Value>, CoreError>>;

// ─────────────────────────────────────────────────────────────────────────────
// HookSelector
// ─────────────────────────────────────────────────────────────────────────────

/// Selects which registrations `off`/`has` act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookSelector {
    /// Every registration on the spot.
    All,
    /// Registrations with exactly this priority.
    Priority(i64),
    /// The single registration with this index.
    Index(u64),
}

// ─────────────────────────────────────────────────────────────────────────────
// FireOutcome
// ─────────────────────────────────────────────────────────────────────────────

/// Result of firing a spot.
#[derive(Debug)]
pub enum FireOutcome {
    /// Every callback ran; results are keyed by registration index.
    Completed(HashMap<u64, Value>),
    /// A callback broke out of the pass, carrying this value.
    Broken(Value),
}

impl FireOutcome {
    /// Returns `true` when a callback broke out of the pass.
    #[must_use]
    pub fn is_broken(&self) -> bool {
        matches!(self, FireOutcome::Broken(_))
    }

    /// The collected results, unless the pass was broken.
    #[must_use]
    pub fn results(&self) -> Option<&HashMap<u64, Value>> {
        match self {
            FireOutcome::Completed(results) => Some(results),
            FireOutcome::Broken(_) => None,
        }
    }

    /// The break value, when the pass was broken.
    #[must_use]
    pub fn break_value(&self) -> Option<&Value> {
        match self {
            FireOutcome::Completed(_) => None,
            FireOutcome::Broken(value) => Some(value),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookEntry / HookRegistry
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct HookEntry {
    index: u64,
    priority: i64,
    extra: Vec<Value>,
    handler: HookHandler,
}

#[derive(Default)]
struct HookState {
    spots: HashMap<String, Vec<HookEntry>>,
    next_index: u64,
}

/// Spot-keyed callback tables with priority ordering.
///
/// Interior-mutable: the registry is typically shared as
/// `Rc<HookRegistry>` between its host object and the callbacks themselves,
/// and every operation takes `&self`. Spots are fully independent tables -
/// registering one callback on several spots is just several registrations,
/// with no cross-spot ordering guarantees.
#[derive(Default)]
pub struct HookRegistry {
    state: RefCell<HookState>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback at priority 0 with no bound arguments.
    ///
    /// Returns the registration index, unique per registry and strictly
    /// increasing.
    pub fn on(
        &self,
        spot: &str,
        handler: impl Fn(&[Value]) -> Result<ControlFlow<Value, Value>, CoreError> + 'static,
    ) -> u64 {
        self.on_with(spot, 0, Vec::new(), handler)
    }

    /// Registers a callback with an explicit priority and bound arguments.
    ///
    /// Bound arguments are appended to the fire arguments on every
    /// invocation. Lower priorities fire first; ties fire in registration
    /// order, reversed for negative priorities.
    pub fn on_with(
        &self,
        spot: &str,
        priority: i64,
        extra: Vec<Value>,
        handler: impl Fn(&[Value]) -> Result<ControlFlow<Value, Value>, CoreError> + 'static,
    ) -> u64 {
        let mut state = self.state.borrow_mut();
        let index = state.next_index;
        state.next_index += 1;
        state.spots.entry(spot.to_owned()).or_default().push(HookEntry {
            index,
            priority,
            extra,
            handler: Rc::new(handler),
        });
        index
    }

    /// Registers a method-name shortcut.
    ///
    /// The name must already exist in `methods` - registering a shortcut to
    /// a method the target does not expose is a configuration error. At fire
    /// time the call goes through the registry, so a later re-registration
    /// of the same name is picked up.
    pub fn on_method(
        &self,
        spot: &str,
        method: &str,
        methods: &Rc<MethodRegistry>,
        priority: i64,
    ) -> Result<u64, CoreError> {
        if !methods.has_method(method) {
            return Err(CoreError::config(format!(
                "cannot register hook on '{spot}': method '{method}' does not exist"
            )));
        }
        let methods = Rc::clone(methods);
        let name = method.to_owned();
        Ok(self.on_with(spot, priority, Vec::new(), move |args| {
            methods.invoke(&name, args).map(ControlFlow::Continue)
        }))
    }

    /// Removes registrations matching the selector.
    ///
    /// Returns how many were removed; matching nothing (including an unknown
    /// spot) is a [`CoreError::NotFound`].
    pub fn off(&self, spot: &str, selector: HookSelector) -> Result<usize, CoreError> {
        let mut state = self.state.borrow_mut();
        let removed = if let Some(entries) = state.spots.get_mut(spot) {
            let before = entries.len();
            entries.retain(|entry| !selector_matches(selector, entry));
            let after = entries.len();
            if after == 0 {
                state.spots.remove(spot);
            }
            before - after
        } else {
            0
        };
        if removed == 0 {
            return Err(CoreError::NotFound {
                kind: NotFoundKind::Hook,
                name: format!("{spot} ({selector:?})"),
            });
        }
        Ok(removed)
    }

    /// Returns `true` when any registration matches the selector.
    #[must_use]
    pub fn has(&self, spot: &str, selector: HookSelector) -> bool {
        self.state
            .borrow()
            .spots
            .get(spot)
            .is_some_and(|entries| entries.iter().any(|entry| selector_matches(selector, entry)))
    }

    /// Returns `true` when the spot has any callbacks at all.
    #[must_use]
    pub fn has_callbacks(&self, spot: &str) -> bool {
        self.has(spot, HookSelector::All)
    }

    /// Fires a spot.
    ///
    /// Takes a snapshot of the spot's table, invokes each callback with the
    /// fire arguments followed by its bound arguments, and collects results
    /// keyed by registration index. Callbacks registered or removed during
    /// the pass affect only later fires; nested fires on the same spot each
    /// snapshot independently. A `ControlFlow::Break` stops the pass; an
    /// `Err` from a callback aborts it and propagates.
    pub fn fire(&self, spot: &str, args: &[Value]) -> Result<FireOutcome, CoreError> {
        let mut snapshot = self
            .state
            .borrow()
            .spots
            .get(spot)
            .cloned()
            .unwrap_or_default();
        snapshot.sort_by(|a, b| {
            a.priority.cmp(&b.priority).then_with(|| {
                if a.priority < 0 {
                    b.index.cmp(&a.index)
                } else {
                    a.index.cmp(&b.index)
                }
            })
        });
        tracing::trace!(spot, callbacks = snapshot.len(), "firing hook spot");

        let mut results = HashMap::new();
        for entry in snapshot {
            let mut call_args = args.to_vec();
            call_args.extend(entry.extra.iter().cloned());
            match (entry.handler)(&call_args)? {
                ControlFlow::Continue(value) => {
                    results.insert(entry.index, value);
                }
                ControlFlow::Break(value) => {
                    tracing::trace!(spot, index = entry.index, "hook pass broken");
                    return Ok(FireOutcome::Broken(value));
                }
            }
        }
        Ok(FireOutcome::Completed(results))
    }
}

impl core::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        let mut spots: Vec<_> = state
            .spots
            .iter()
            .map(|(spot, entries)| (spot.clone(), entries.len()))
            .collect();
        spots.sort();
        f.debug_struct("HookRegistry").field("spots", &spots).finish()
    }
}

fn selector_matches(selector: HookSelector, entry: &HookEntry) -> bool {
    match selector {
        HookSelector::All => true,
        HookSelector::Priority(priority) => entry.priority == priority,
        HookSelector::Index(index) => entry.index == index,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hookable
// ─────────────────────────────────────────────────────────────────────────────

/// Implemented by objects that host a hook registry.
///
/// The registry is handed out as a clone of the `Rc` so callers never hold a
/// borrow of the host while firing - callbacks are then free to borrow the
/// host themselves.
pub trait Hookable {
    /// The hook registry attached to this object.
    fn hooks(&self) -> Rc<HookRegistry>;
}
