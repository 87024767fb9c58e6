//! Example widget tree CLI.
//!
//! Registers a couple of widget types, builds them from layered seeds, adds
//! them to a container under an application scope, and pokes at hooks.
//!
//! # Usage
//!
//! ```bash
//! widgets
//! ```

use core::ops::ControlFlow;
use std::rc::Rc;

use armature_core::Injectable;
use armature_core::error::CoreError;
use armature_core::init::{InitState, Initializable};
use armature_core::object::{Object, object_ref};
use armature_core::track::{TrackState, Trackable};
use armature_core::value::Value;
use armature_factory::seed::Seed;
use armature_hooks::{HookRegistry, Hookable};
use armature_tree::app::AppScope;
use armature_tree::container::Container;

// ─────────────────────────────────────────────────────────────────────────────
// Widget types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default, Injectable)]
struct Button {
    #[inject]
    label: Option<String>,
    #[inject]
    color: Option<String>,
    track: TrackState,
    init: InitState,
    hooks: Rc<HookRegistry>,
}

impl Object for Button {
    fn type_tag(&self) -> &'static str {
        "Button"
    }

    fn as_injectable(&mut self) -> Option<&mut dyn armature_core::inject::Injectable> {
        Some(self)
    }

    fn as_trackable(&mut self) -> Option<&mut dyn Trackable> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl Trackable for Button {
    fn track_state(&self) -> &TrackState {
        &self.track
    }

    fn track_state_mut(&mut self) -> &mut TrackState {
        &mut self.track
    }
}

impl Initializable for Button {
    fn init_state(&self) -> &InitState {
        &self.init
    }

    fn init_state_mut(&mut self) -> &mut InitState {
        &mut self.init
    }

    fn init(&mut self) -> Result<(), CoreError> {
        tracing::info!(label = ?self.label, "button ready");
        self.init_state_mut().mark_initialized("Button")
    }
}

impl Hookable for Button {
    fn hooks(&self) -> Rc<HookRegistry> {
        Rc::clone(&self.hooks)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// main
// ─────────────────────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = AppScope::new();
    app.registry()
        .register("Button", |_args| Ok(object_ref(Button::default())))
        .expect("fresh registry");

    let root = Container::new(&app, "app");

    // A caller's seed layered over application defaults.
    let seed = Seed::new("Button").with("label", "Send");
    let defaults = Seed::props([("color", "red")]);
    let button = app.factory().build(seed, defaults).expect("buildable seed");
    let button = Container::add(&root, button, None).expect("fresh name");

    {
        let borrowed = button.borrow();
        let concrete = borrowed.downcast_ref::<Button>().expect("a Button");
        println!(
            "built '{}' (full name '{}'): label={:?} color={:?}",
            concrete.short_name().unwrap_or("?"),
            concrete.name().unwrap_or("?"),
            concrete.label,
            concrete.color,
        );
    }

    // Hooks: a logger at priority 0 and a gate that breaks the pass.
    let hooks = button.borrow().downcast_ref::<Button>().expect("a Button").hooks();
    hooks.on("click", |args| {
        println!("click observed with {} argument(s)", args.len());
        Ok(ControlFlow::Continue(Value::Null))
    });
    hooks.on_with("click", -5, Vec::new(), |_args| {
        Ok(ControlFlow::Break(Value::from("blocked by gate")))
    });

    let outcome = hooks.fire("click", &[Value::from(1)]).expect("hooks run");
    println!(
        "fire outcome: {}",
        outcome
            .break_value()
            .and_then(Value::as_str)
            .unwrap_or("completed")
    );
}
