//! Structural normalization of response payloads.
//!
//! The backend wraps collections in one of several envelope shapes depending
//! on its version. The shapes form a closed set of tagged variants, each a
//! pure structural predicate plus extractor, checked in a fixed priority
//! order. Normalization never fails: an unrecognized payload degrades to an
//! empty sequence, and the matched shape (or its absence) is carried in the
//! result so callers can surface or drop the diagnostic.

use serde_json::Value;

/// The closed set of envelope shapes the backend is known to produce, in
/// priority order: the bare array first, then increasingly nested wrapper
/// forms, then the single-object fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `[ ... ]`
    BareArray,
    /// `{ "collection": [ ... ] }`
    Collection,
    /// `{ "data": [ ... ] }`
    Data,
    /// `{ "data": { "collection": [ ... ] } }`
    DataCollection,
    /// `{ "result": { "collection": [ ... ] } }`
    ResultCollection,
    /// `{ "results": { "collection": [ ... ] } }`
    ResultsCollection,
    /// A single entity object, identified by the presence of `_id`.
    BareEntity,
}

/// Wire field whose presence marks an object as an entity.
const ID_FIELD: &str = "_id";

/// All shapes in the order they are tried.
const PRIORITY: [Shape; 7] = [
    Shape::BareArray,
    Shape::Collection,
    Shape::Data,
    Shape::DataCollection,
    Shape::ResultCollection,
    Shape::ResultsCollection,
    Shape::BareEntity,
];

impl Shape {
    /// Stable name for logs and diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BareArray => "bare array",
            Self::Collection => "{collection: []}",
            Self::Data => "{data: []}",
            Self::DataCollection => "{data: {collection: []}}",
            Self::ResultCollection => "{result: {collection: []}}",
            Self::ResultsCollection => "{results: {collection: []}}",
            Self::BareEntity => "single entity object",
        }
    }

    /// Pure structural predicate: does `payload` match this shape?
    #[must_use]
    pub fn matches(self, payload: &Value) -> bool {
        match self {
            Self::BareArray => payload.is_array(),
            Self::Collection => nested_array(payload, &["collection"]).is_some(),
            Self::Data => nested_array(payload, &["data"]).is_some(),
            Self::DataCollection => nested_array(payload, &["data", "collection"]).is_some(),
            Self::ResultCollection => nested_array(payload, &["result", "collection"]).is_some(),
            Self::ResultsCollection => nested_array(payload, &["results", "collection"]).is_some(),
            Self::BareEntity => payload.as_object().is_some_and(|o| o.contains_key(ID_FIELD)),
        }
    }

    /// Extract the entity sequence from a payload known to match this shape.
    ///
    /// A bare entity is wrapped into a one-element sequence.
    #[must_use]
    fn extract(self, payload: Value) -> Vec<Value> {
        let keys: &[&str] = match self {
            Self::BareArray => &[],
            Self::Collection => &["collection"],
            Self::Data => &["data"],
            Self::DataCollection => &["data", "collection"],
            Self::ResultCollection => &["result", "collection"],
            Self::ResultsCollection => &["results", "collection"],
            Self::BareEntity => return vec![payload],
        };

        let mut current = payload;
        for key in keys {
            match current {
                Value::Object(mut map) => match map.remove(*key) {
                    Some(next) => current = next,
                    None => return Vec::new(),
                },
                _ => return Vec::new(),
            }
        }
        match current {
            Value::Array(records) => records,
            _ => Vec::new(),
        }
    }

    /// Detect the highest-priority shape matching `payload`.
    #[must_use]
    pub fn detect(payload: &Value) -> Option<Self> {
        PRIORITY.into_iter().find(|shape| shape.matches(payload))
    }
}

/// Walk `keys` into `payload` and return the array at the end, if any.
fn nested_array<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    let mut current = payload;
    for key in keys {
        current = current.as_object()?.get(*key)?;
    }
    current.as_array()
}

/// The result of normalizing a collection payload.
///
/// `shape` doubles as the diagnostic: `None` means no rule matched and the
/// empty `records` are a degradation, not the server's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The extracted entity records, in server order.
    pub records: Vec<Value>,
    /// The shape rule that matched, or `None` for an unrecognized payload.
    pub shape: Option<Shape>,
}

/// Extract the entity collection a successful payload represents.
///
/// Tries the shape rules in fixed priority order and returns the first
/// structural match. Never fails: an unrecognized shape yields an empty
/// sequence with `shape: None`, since a partially-broken backend must still
/// let the rest of the page render. Idempotent - a normalized sequence is a
/// bare array and matches the first rule unchanged.
#[must_use]
pub fn normalize_collection(payload: Value) -> Normalized {
    Shape::detect(&payload).map_or_else(
        || Normalized {
            records: Vec::new(),
            shape: None,
        },
        |shape| Normalized {
            records: shape.extract(payload),
            shape: Some(shape),
        },
    )
}

/// Extract the single entity a mutation response represents.
///
/// Create and update responses are wrapped as inconsistently as collections:
/// a bare entity object, `{"data": {...}}`, or `{"result": {...}}`. Returns
/// `None` when no recognizable entity is present.
#[must_use]
pub fn normalize_entity(payload: Value) -> Option<Value> {
    fn is_entity(value: &Value) -> bool {
        value.as_object().is_some_and(|o| o.contains_key(ID_FIELD))
    }

    if is_entity(&payload) {
        return Some(payload);
    }

    let Value::Object(mut map) = payload else {
        return None;
    };
    for key in ["data", "result"] {
        if let Some(inner) = map.remove(key)
            && is_entity(&inner)
        {
            return Some(inner);
        }
    }
    None
}
