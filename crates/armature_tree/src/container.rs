//! Hierarchical containers and child lifecycle.
//!
//! A container is the sole long-term owner of its children. Adding a child
//! resolves a short name (explicit, desired, or derived from the type tag
//! with a per-base counter), computes the shortened full name, wires the
//! owner/application back-references, and runs one-time initialization.
//! Removal detaches the child and clears those back-references so a removed
//! subtree cannot keep the application alive through a dangling pointer.

use core::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use armature_core::error::{CoreError, NotFoundKind};
use armature_core::object::ObjectRef;
use armature_core::track::{Parent, ParentRef};

use crate::app::AppScope;

/// Shared handle to a container.
pub type ContainerRef = Rc<RefCell<Container>>;

// ─────────────────────────────────────────────────────────────────────────────
// Container
// ─────────────────────────────────────────────────────────────────────────────

/// Owns a set of uniquely named children.
pub struct Container {
    name: String,
    app: Rc<AppScope>,
    children: HashMap<String, ObjectRef>,
    // Per-base auto-name counters. Never reset, even when a same-named
    // child is removed, so historically different objects never end up
    // with identical generated names within one process run.
    name_counters: HashMap<String, u64>,
}

impl Parent for Container {
    fn full_name(&self) -> String {
        self.name.clone()
    }

    fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    fn remove_child(&mut self, name: &str) -> Result<(), CoreError> {
        self.remove(name)
    }
}

impl Container {
    /// Creates an empty container under the given application scope.
    #[must_use]
    pub fn new(app: &Rc<AppScope>, name: impl Into<String>) -> ContainerRef {
        Rc::new(RefCell::new(Container {
            name: name.into(),
            app: Rc::clone(app),
            children: HashMap::new(),
            name_counters: HashMap::new(),
        }))
    }

    /// The container's full hierarchical name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The application scope this container belongs to.
    #[must_use]
    pub fn app(&self) -> Rc<AppScope> {
        Rc::clone(&self.app)
    }

    /// Adds a child, assigning a unique short name and initializing it.
    ///
    /// Name resolution order: the explicit `desired` argument, then a short
    /// name the child already carries, then the child's desired name, then a
    /// name derived from its type tag (lower-cased, `::` flattened to `_`)
    /// with `_2`, `_3`, ... suffixes on collision. An *explicitly* requested
    /// name that collides is a [`CoreError::DuplicateName`]; generated names
    /// cannot collide.
    ///
    /// After naming, an initializable child has `init()` invoked exactly
    /// once; an override that returns without marking itself initialized is
    /// a [`CoreError::InitializationContract`].
    pub fn add(
        parent: &ContainerRef,
        child: ObjectRef,
        desired: Option<&str>,
    ) -> Result<ObjectRef, CoreError> {
        let requested = {
            let mut target = child.borrow_mut();
            if let Some(track) = target.as_trackable() {
                if track.owner().is_some() {
                    return Err(CoreError::config(format!(
                        "object '{}' already has an owner",
                        track.short_name().unwrap_or("?")
                    )));
                }
            }
            desired.map(str::to_owned).or_else(|| {
                target.as_trackable().and_then(|track| {
                    track
                        .short_name()
                        .or_else(|| track.desired_name())
                        .map(str::to_owned)
                })
            })
        };

        let (short_name, full_name) = {
            let mut this = parent.borrow_mut();
            let short_name = match requested {
                Some(name) => {
                    if this.children.contains_key(&name) {
                        return Err(CoreError::DuplicateName {
                            name,
                            container: this.name.clone(),
                        });
                    }
                    name
                }
                None => {
                    let base = derived_base(child.borrow().type_tag());
                    this.generate_name(&base)
                }
            };

            let separator = this.app.name_separator();
            let full_name = this
                .app
                .shorten(&format!("{}{}{}", this.name, separator, short_name));

            this.children.insert(short_name.clone(), Rc::clone(&child));
            (short_name, full_name)
        };

        {
            let mut target = child.borrow_mut();
            if let Some(track) = target.as_trackable() {
                let owner: ParentRef = Rc::clone(parent) as ParentRef;
                track.set_owner(Rc::downgrade(&owner));
                track.set_app(parent.borrow().app());
                track.set_short_name(short_name.clone());
                track.set_name(full_name.clone());
            }
        }

        tracing::debug!(
            container = %parent.borrow().name,
            short_name,
            full_name,
            "added child"
        );

        // Parent is not borrowed here: init() may add further children.
        {
            let mut target = child.borrow_mut();
            let type_tag = target.type_tag();
            if let Some(initializable) = target.as_initializable() {
                initializable.init()?;
                if !initializable.is_initialized() {
                    return Err(CoreError::InitializationContract {
                        type_tag: type_tag.to_owned(),
                    });
                }
            }
        }

        Ok(child)
    }

    /// Looks up a child by short name.
    pub fn get(&self, name: &str) -> Result<ObjectRef, CoreError> {
        self.children
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                kind: NotFoundKind::Child,
                name: name.to_owned(),
            })
    }

    /// Returns `true` when a child with this short name exists.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Short names of all children, unordered.
    #[must_use]
    pub fn children_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` when the container has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Detaches a child, clearing its owner and application back-references.
    pub fn remove(&mut self, name: &str) -> Result<(), CoreError> {
        let child = self
            .children
            .remove(name)
            .ok_or_else(|| CoreError::NotFound {
                kind: NotFoundKind::Child,
                name: name.to_owned(),
            })?;
        let mut target = child.borrow_mut();
        if let Some(track) = target.as_trackable() {
            track.unset_owner();
            track.unset_app();
        }
        tracing::debug!(container = %self.name, child = name, "removed child");
        Ok(())
    }

    /// Clones the container and every owned child.
    ///
    /// Each child is cloned through its `clone_object` capability and the
    /// clone's owner back-reference is repointed at the new container - a
    /// shallow copy would leave two containers sharing children, violating
    /// exclusive ownership. A child without the capability fails the whole
    /// clone.
    pub fn deep_clone(this: &ContainerRef) -> Result<ContainerRef, CoreError> {
        let source = this.borrow();
        let clone = Container::new(&source.app, source.name.clone());
        clone.borrow_mut().name_counters = source.name_counters.clone();

        let owner: ParentRef = Rc::clone(&clone) as ParentRef;
        for (name, child) in &source.children {
            let cloned = child.borrow().clone_object().ok_or_else(|| {
                CoreError::config(format!(
                    "child '{name}' of '{}' does not support cloning",
                    source.name
                ))
            })?;
            if let Some(track) = cloned.borrow_mut().as_trackable() {
                track.set_owner(Rc::downgrade(&owner));
            }
            clone.borrow_mut().children.insert(name.clone(), cloned);
        }
        Ok(clone)
    }

    fn generate_name(&mut self, base: &str) -> String {
        loop {
            let counter = self
                .name_counters
                .entry(base.to_owned())
                .and_modify(|n| *n += 1)
                .or_insert(1);
            let candidate = if *counter == 1 {
                base.to_owned()
            } else {
                format!("{base}_{counter}")
            };
            // An explicitly named sibling may occupy the candidate; the
            // counter keeps advancing until a free slot turns up.
            if !self.children.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

impl core::fmt::Debug for Container {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut names = self.children_names();
        names.sort();
        f.debug_struct("Container")
            .field("name", &self.name)
            .field("children", &names)
            .finish()
    }
}

/// Derives an auto-name base from a type tag.
fn derived_base(type_tag: &str) -> String {
    type_tag.replace("::", "_").to_lowercase()
}

// ─────────────────────────────────────────────────────────────────────────────
// destroy
// ─────────────────────────────────────────────────────────────────────────────

/// Detaches an object from its owning container, if it has one.
///
/// This is the trackable "destroy" operation: the owner handle is read
/// under a short borrow, then the removal runs with the object released so
/// the container can clear its back-references. Destroying an un-owned
/// object is a no-op.
pub fn destroy(object: &ObjectRef) -> Result<(), CoreError> {
    let target = {
        let mut borrowed = object.borrow_mut();
        borrowed.as_trackable().and_then(|track| {
            let owner = track.owner()?;
            let name = track.short_name()?.to_owned();
            Some((owner, name))
        })
    };
    if let Some((owner, name)) = target {
        owner.borrow_mut().remove_child(&name)?;
    }
    Ok(())
}
