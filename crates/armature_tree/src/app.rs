//! The per-application scope and naming policy.
//!
//! Long hierarchical names are shortened with a stable hash so deeply nested
//! trees stay within a configured length without losing determinism: the
//! same prefix always collapses to the same tag within one scope, because
//! the tag table is memoized here rather than recomputed or kept in a
//! process-global.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use hashbrown::HashMap;
use xxhash_rust::xxh3::xxh3_64;

use armature_core::track::App;
use armature_factory::factory::{Factory, Registry};
use armature_hooks::{HookRegistry, Hookable};

/// Default ceiling for hierarchical name length.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 60;

/// Separator between a parent's full name and a child's short name.
pub const DEFAULT_NAME_SEPARATOR: char = '-';

// Width of the rendered hash tag; with the "__" joint, a shortening pass
// replaces `limit - 10` bytes of prefix.
const TAG_WIDTH: usize = 8;

// Below this limit a pass might not shrink the name, so the configured
// maximum is clamped.
const MIN_NAME_LENGTH_LIMIT: usize = 24;

// ─────────────────────────────────────────────────────────────────────────────
// AppScope
// ─────────────────────────────────────────────────────────────────────────────

/// The explicit per-application context object.
///
/// Holds naming configuration, the memoized shortening table, the object
/// [`Factory`], and application-wide hooks. Shared as `Rc<AppScope>`;
/// everything on it takes `&self`.
pub struct AppScope {
    max_name_length: Cell<Option<usize>>,
    name_separator: Cell<char>,
    name_hashes: RefCell<HashMap<String, String>>,
    factory: Factory,
    hooks: Rc<HookRegistry>,
}

impl App for AppScope {}

impl Hookable for AppScope {
    fn hooks(&self) -> Rc<HookRegistry> {
        Rc::clone(&self.hooks)
    }
}

impl Default for AppScope {
    fn default() -> Self {
        Self {
            max_name_length: Cell::new(Some(DEFAULT_MAX_NAME_LENGTH)),
            name_separator: Cell::new(DEFAULT_NAME_SEPARATOR),
            name_hashes: RefCell::new(HashMap::new()),
            factory: Factory::new(),
            hooks: Rc::new(HookRegistry::new()),
        }
    }
}

impl AppScope {
    /// Creates a scope with default naming policy and an empty factory.
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// The object factory for this application.
    #[must_use]
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// Shorthand for the factory's constructor registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.factory.registry()
    }

    /// The configured maximum name length; `None` disables shortening.
    #[must_use]
    pub fn max_name_length(&self) -> Option<usize> {
        self.max_name_length.get()
    }

    /// Reconfigures the maximum name length.
    pub fn set_max_name_length(&self, limit: Option<usize>) {
        self.max_name_length.set(limit);
    }

    /// The separator joining parent and child names.
    #[must_use]
    pub fn name_separator(&self) -> char {
        self.name_separator.get()
    }

    /// Reconfigures the name separator.
    pub fn set_name_separator(&self, separator: char) {
        self.name_separator.set(separator);
    }

    /// Shortens a hierarchical name to the configured maximum.
    ///
    /// While the name is over the limit, a prefix is replaced by an 8-digit
    /// hex tag of its `xxh3` hash; at least the trailing 5 characters always
    /// survive verbatim. The prefix-to-tag mapping is memoized per scope, so
    /// repeated shortenings of the same prefix are byte-identical and the
    /// transform is idempotent.
    #[must_use]
    pub fn shorten(&self, name: &str) -> String {
        let Some(limit) = self.max_name_length.get() else {
            return name.to_owned();
        };
        let limit = limit.max(MIN_NAME_LENGTH_LIMIT);

        let mut name = name.to_owned();
        while name.len() > limit {
            let mut cut = limit - TAG_WIDTH - 2;
            while !name.is_char_boundary(cut) {
                cut -= 1;
            }
            let (prefix, rest) = name.split_at(cut);
            let tag = self
                .name_hashes
                .borrow_mut()
                .entry(prefix.to_owned())
                .or_insert_with(|| format!("{:08x}", xxh3_64(prefix.as_bytes()) as u32))
                .clone();
            tracing::trace!(prefix, tag, "shortened name prefix");
            name = format!("{tag}__{rest}");
        }
        name
    }
}

impl core::fmt::Debug for AppScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppScope")
            .field("max_name_length", &self.max_name_length.get())
            .field("name_separator", &self.name_separator.get())
            .field("memoized_prefixes", &self.name_hashes.borrow().len())
            .finish()
    }
}
