//! Dependency injection with declared-field whitelists.
//!
//! "Set these named properties on that object" is the contract the factory
//! and the seed merger both lean on. An [`Injectable`] type declares exactly
//! which fields may be assigned; everything else routes through
//! [`Injectable::on_missing_field`], which is strict by default.
//!
//! The usual way to implement the trait is `#[derive(Injectable)]` from
//! `armature_core_macros`, marking assignable fields with `#[inject]`:
//!
//! ```
//! use armature_core::Injectable;
//! use armature_core::value::Value;
//!
//! #[derive(Default, Injectable)]
//! struct Button {
//!     #[inject]
//!     label: Option<String>,
//!     #[inject]
//!     color: Option<String>,
//!     clicks: u32,
//! }
//! ```
//!
//! # Merge semantics
//!
//! [`inject`] applies the property-merge rules shared by the whole
//! workspace:
//!
//! - a `Null` incoming value never overwrites anything;
//! - *passive* mode keeps existing non-null values (an already-configured
//!   object wins over defaults offered later);
//! - when both the existing and the incoming value are lists, the incoming
//!   entries are appended to the existing ones instead of replacing them.

use hashbrown::HashMap;

use crate::error::CoreError;
use crate::value::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Injectable
// ─────────────────────────────────────────────────────────────────────────────

/// The property-injection capability.
pub trait Injectable {
    /// Names of the fields that may be assigned through injection.
    fn declared_fields(&self) -> &'static [&'static str];

    /// Current value of a declared field.
    ///
    /// Returns `None` for undeclared names and `Value::Null` for declared
    /// but vacant fields.
    fn field(&self, name: &str) -> Option<Value>;

    /// Assigns a declared field. Undeclared names are a configuration error.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), CoreError>;

    /// Called when injection supplies an undeclared property.
    ///
    /// Strict by default; override for lenient handling (ignore, stash in a
    /// bag, etc.).
    fn on_missing_field(&mut self, name: &str, _value: Value) -> Result<(), CoreError> {
        Err(CoreError::config(format!(
            "attempt to set undeclared property '{name}'"
        )))
    }
}

/// Injects named properties into `target` using the shared merge rules.
///
/// See the module docs for the exact semantics of `passively`.
pub fn inject(
    target: &mut dyn Injectable,
    props: &HashMap<String, Value>,
    passively: bool,
) -> Result<(), CoreError> {
    for (name, incoming) in props {
        if incoming.is_null() {
            continue;
        }
        let Some(existing) = target.field(name) else {
            target.on_missing_field(name, incoming.clone())?;
            continue;
        };
        if passively && !existing.is_null() {
            continue;
        }
        let value = match (existing, incoming) {
            (Value::List(mut have), Value::List(add)) => {
                have.extend(add.iter().cloned());
                Value::List(have)
            }
            (_, v) => v.clone(),
        };
        target.set_field(name, value)?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// FieldValue
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion between a typed struct field and [`Value`].
///
/// Implemented for the field types `#[derive(Injectable)]` supports. A
/// vacant field reads back as `Value::Null`, which is what passive injection
/// keys off.
pub trait FieldValue {
    /// Reads the field as a [`Value`].
    fn to_value(&self) -> Value;

    /// Writes a [`Value`] into the field, failing on a type mismatch.
    fn assign(&mut self, value: Value) -> Result<(), CoreError>;
}

fn mismatch(expected: &str, got: &Value) -> CoreError {
    CoreError::config(format!(
        "cannot assign {} value to a field of type {expected}",
        got.kind()
    ))
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        *self = value;
        Ok(())
    }
}

impl FieldValue for Option<String> {
    fn to_value(&self) -> Value {
        self.as_deref().map_or(Value::Null, Value::from)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Null => *self = None,
            Value::Str(s) => *self = Some(s),
            other => return Err(mismatch("Option<String>", &other)),
        }
        Ok(())
    }
}

impl FieldValue for Option<i64> {
    fn to_value(&self) -> Value {
        self.map_or(Value::Null, Value::from)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Null => *self = None,
            Value::Int(i) => *self = Some(i),
            other => return Err(mismatch("Option<i64>", &other)),
        }
        Ok(())
    }
}

impl FieldValue for Option<f64> {
    fn to_value(&self) -> Value {
        self.map_or(Value::Null, Value::from)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Null => *self = None,
            Value::Float(f) => *self = Some(f),
            Value::Int(i) => *self = Some(i as f64),
            other => return Err(mismatch("Option<f64>", &other)),
        }
        Ok(())
    }
}

impl FieldValue for Option<bool> {
    fn to_value(&self) -> Value {
        self.map_or(Value::Null, Value::from)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Null => *self = None,
            Value::Bool(b) => *self = Some(b),
            other => return Err(mismatch("Option<bool>", &other)),
        }
        Ok(())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Str(s) => {
                *self = s;
                Ok(())
            }
            other => Err(mismatch("String", &other)),
        }
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Int(i) => {
                *self = i;
                Ok(())
            }
            other => Err(mismatch("i64", &other)),
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Float(f) => {
                *self = f;
                Ok(())
            }
            Value::Int(i) => {
                *self = i as f64;
                Ok(())
            }
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Bool(b) => {
                *self = b;
                Ok(())
            }
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl FieldValue for Vec<Value> {
    fn to_value(&self) -> Value {
        Value::List(self.clone())
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::List(l) => {
                *self = l;
                Ok(())
            }
            other => Err(mismatch("Vec<Value>", &other)),
        }
    }
}

impl FieldValue for HashMap<String, Value> {
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }

    fn assign(&mut self, value: Value) -> Result<(), CoreError> {
        match value {
            Value::Map(m) => {
                *self = m;
                Ok(())
            }
            other => Err(mismatch("HashMap<String, Value>", &other)),
        }
    }
}
