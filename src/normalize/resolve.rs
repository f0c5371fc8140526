use serde_json::{Map, Value};
use tracing::trace;

use crate::model::Money;

/// Synonym keys for one canonical field. `nested` applies inside a nested entity object,
/// `flat` applies when the entity is synthesized from prefixed top-level keys.
#[derive(Debug)]
pub(crate) struct FieldTable {
    pub nested: &'static [&'static str],
    pub flat: &'static [&'static str],
}

/// Candidate keys for one entity plus the fields whose flat keys can synthesize it.
#[derive(Debug)]
pub(crate) struct EntityTable {
    pub name: &'static str,
    pub nested: &'static [&'static str],
    pub fields: &'static [&'static FieldTable],
}

/// Outcome of entity resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Resolved<'a> {
    Nested(&'a Map<String, Value>),
    Flat(&'a Map<String, Value>),
    Absent,
}

impl<'a> Resolved<'a> {
    pub fn text(&self, field: &FieldTable) -> Option<String> {
        match self {
            Resolved::Nested(obj) => first_text(obj, field.nested),
            Resolved::Flat(obj) => first_text(obj, field.flat),
            Resolved::Absent => None,
        }
    }

    pub fn int(&self, field: &FieldTable) -> Option<i64> {
        match self {
            Resolved::Nested(obj) => first_int(obj, field.nested),
            Resolved::Flat(obj) => first_int(obj, field.flat),
            Resolved::Absent => None,
        }
    }

    /// The nested object, when the entity came from one.
    pub fn nested_object(&self) -> Option<&'a Map<String, Value>> {
        match self {
            Resolved::Nested(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool { matches!(self, Resolved::Absent) }

    fn origin(&self) -> &'static str {
        match self {
            Resolved::Nested(_) => "nested",
            Resolved::Flat(_) => "flat",
            Resolved::Absent => "absent",
        }
    }
}

/// Descend through `data` envelopes while they hold objects.
pub(crate) fn unwrap_envelope(raw: &Value) -> &Value {
    let mut cur = raw;
    while let Some(inner) = cur.get("data").filter(|v| v.is_object()) {
        cur = inner;
    }
    cur
}

/// Nested candidates first (first present object wins), then flat synthesis, else absent.
pub(crate) fn resolve_entity<'a>(root: &'a Value, table: &EntityTable) -> Resolved<'a> {
    match root.as_object() {
        Some(obj) => resolve_entity_in(obj, table),
        None => Resolved::Absent,
    }
}

pub(crate) fn resolve_entity_in<'a>(obj: &'a Map<String, Value>, table: &EntityTable) -> Resolved<'a> {
    let resolved = table
        .nested
        .iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_object))
        .map(Resolved::Nested)
        .unwrap_or_else(|| {
            let has_flat = table.fields.iter().any(|f| first_text(obj, f.flat).is_some());
            if has_flat { Resolved::Flat(obj) } else { Resolved::Absent }
        });
    trace!(target: "society::normalize", entity = table.name, origin = resolved.origin(), "entity resolved");
    resolved
}

/// Text form of a scalar. Strings are trimmed and blank counts as missing.
pub(crate) fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() { None } else { Some(t.to_string()) }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer form of a scalar: JSON integers, integral floats, numeric strings.
pub(crate) fn scalar_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub(crate) fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| obj.get(*k).and_then(scalar_text))
}

pub(crate) fn first_int(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|k| obj.get(*k).and_then(scalar_int))
}

pub(crate) fn first_money(obj: &Map<String, Value>, keys: &[&str]) -> Option<Money> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Money::from_json))
}

pub(crate) fn first_array<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_array))
}

pub(crate) fn first_object<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Map<String, Value>> {
    keys.iter().find_map(|k| obj.get(*k).and_then(Value::as_object))
}
