// Copyright 2025 the RPAVER Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-store model: documents, writes, queries and live snapshots.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{StoreError, Subscription};

/// A stored document: its id within the collection plus its JSON fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id, unique within its collection.
    pub id: String,
    /// Top-level fields.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Looks up a field by dotted path (`"stats.height"`).
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut value = self.fields.get(segments.next()?)?;
        for segment in segments {
            value = value.as_object()?.get(segment)?;
        }
        Some(value)
    }

    /// Looks up a string field by dotted path.
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Decodes the fields into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the fields do not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(T::deserialize(Value::Object(self.fields.clone()))?)
    }
}

/// A single field write.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Store this value.
    Value(Value),
    /// Stamp the field with the backend's clock at write time.
    ServerTimestamp,
    /// Remove the field (meaningful for updates).
    Delete,
}

/// Returns the server-timestamp sentinel.
#[must_use]
pub const fn server_timestamp() -> FieldValue {
    FieldValue::ServerTimestamp
}

/// An ordered set of field writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    /// Creates an empty write set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value write.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, FieldValue::Value(value.into()));
        self
    }

    /// Adds a server-timestamp write.
    #[must_use]
    pub fn with_server_timestamp(mut self, name: impl Into<String>) -> Self {
        self.insert(name, FieldValue::ServerTimestamp);
        self
    }

    /// Adds a field deletion.
    #[must_use]
    pub fn with_delete(mut self, name: impl Into<String>) -> Self {
        self.insert(name, FieldValue::Delete);
        self
    }

    /// Inserts or replaces a write.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Iterates writes in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of writes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no writes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies the writes to `target`, stamping sentinels with `now`.
    pub fn apply_to(&self, target: &mut Map<String, Value>, now: &str) {
        for (name, value) in &self.0 {
            match value {
                FieldValue::Value(value) => {
                    target.insert(name.clone(), value.clone());
                }
                FieldValue::ServerTimestamp => {
                    target.insert(name.clone(), Value::String(now.to_owned()));
                }
                FieldValue::Delete => {
                    target.remove(name);
                }
            }
        }
    }
}

impl From<Map<String, Value>> for Fields {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name, FieldValue::Value(value)))
                .collect(),
        )
    }
}

/// Comparison applied by a [`Filter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Field equals the value.
    Eq,
    /// Field exists and differs from the value.
    Ne,
    /// Field is less than the value (same type only).
    Lt,
    /// Field is less than or equal to the value (same type only).
    Le,
    /// Field is greater than the value (same type only).
    Gt,
    /// Field is greater than or equal to the value (same type only).
    Ge,
    /// Field is an array containing the value.
    ArrayContains,
}

/// A field predicate.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// Dotted field path.
    pub field: String,
    /// Comparison.
    pub op: FilterOp,
    /// Operand.
    pub value: Value,
}

impl Filter {
    /// Returns `true` if `doc` satisfies the predicate.
    ///
    /// Documents without the field never match.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let Some(field) = doc.get(&self.field) else {
            return false;
        };
        match self.op {
            FilterOp::Eq => field == &self.value,
            FilterOp::Ne => field != &self.value,
            FilterOp::ArrayContains => field
                .as_array()
                .is_some_and(|items| items.contains(&self.value)),
            FilterOp::Lt | FilterOp::Le | FilterOp::Gt | FilterOp::Ge => {
                if type_rank(field) != type_rank(&self.value) {
                    return false;
                }
                let ord = compare_values(field, &self.value);
                match self.op {
                    FilterOp::Lt => ord == Ordering::Less,
                    FilterOp::Le => ord != Ordering::Greater,
                    FilterOp::Gt => ord == Ordering::Greater,
                    _ => ord != Ordering::Less,
                }
            }
        }
    }
}

/// Sort direction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Result ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    /// Dotted field path.
    pub field: String,
    /// Direction.
    pub direction: Direction,
}

/// A collection query.
///
/// Without an [`OrderBy`] results come back in document-id order. With one,
/// documents missing the ordered field are excluded and ties keep id order.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// Collection to read.
    pub collection: String,
    /// Predicates, all of which must hold.
    pub filters: Vec<Filter>,
    /// Optional ordering.
    pub order: Option<OrderBy>,
    /// Optional maximum result count.
    pub limit: Option<usize>,
}

impl Query {
    /// Selects every document of `collection`.
    #[must_use]
    pub fn collection(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Adds a predicate.
    #[must_use]
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns `true` if `doc` passes every filter and carries the ordered field.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        self.filters.iter().all(|filter| filter.matches(doc))
            && self
                .order
                .as_ref()
                .is_none_or(|order| doc.get(&order.field).is_some())
    }

    /// Runs the query over `docs`, which must be in document-id order.
    pub fn apply<'a>(&self, docs: impl IntoIterator<Item = &'a Document>) -> Vec<Document> {
        let mut out: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();
        if let Some(order) = &self.order {
            out.sort_by(|a, b| {
                let ord = match (a.get(&order.field), b.get(&order.field)) {
                    (Some(a), Some(b)) => compare_values(a, b),
                    _ => Ordering::Equal,
                };
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        out
    }
}

/// What a subscription watches.
#[derive(Clone, Debug, PartialEq)]
pub enum Watch {
    /// The live result set of a query.
    Query(Query),
    /// A single document.
    Document {
        /// Collection of the watched document.
        collection: String,
        /// Id of the watched document.
        id: String,
    },
}

impl Watch {
    /// Watches a single document.
    #[must_use]
    pub fn document(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Document {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Collection the watch reads from.
    #[must_use]
    pub fn collection(&self) -> &str {
        match self {
            Self::Query(query) => &query.collection,
            Self::Document { collection, .. } => collection,
        }
    }
}

/// State delivered to a listener.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot {
    /// Current result set of a [`Watch::Query`].
    Query(Vec<Document>),
    /// Current state of a [`Watch::Document`]; `None` once deleted.
    Document(Option<Document>),
}

/// Callback receiving live snapshots.
pub type Listener = Box<dyn FnMut(&Snapshot) + Send>;

/// A document database client.
///
/// Collection names and document ids must be non-empty and free of `/`.
pub trait DocumentStore: Send + Sync {
    /// Reads one document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed collection or id,
    /// or a backend error.
    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Runs a query.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed collection, or a
    /// backend error.
    fn query(&self, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// Creates or replaces a document. [`FieldValue::Delete`] writes are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed collection or id,
    /// or a backend error.
    fn set(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Merges writes into an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the document does not exist.
    fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Deletes a document. Deleting a missing document succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed collection or id,
    /// or a backend error.
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Creates a document with a backend-assigned id and returns the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed collection, or a
    /// backend error.
    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Registers `listener` for `watch`.
    ///
    /// The listener receives the current state immediately, then a fresh
    /// snapshot after every write to the watched collection, until the
    /// returned [`Subscription`] is released. Snapshots arrive in write order,
    /// including writes made by listeners; a listener is never re-entered, so
    /// a snapshot caused from inside a callback is delivered after that
    /// callback returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRequest`] for a malformed watch, or a
    /// backend error.
    fn subscribe(&self, watch: Watch, listener: Listener) -> Result<Subscription, StoreError>;
}

/// Checks a collection name or document id.
pub(crate) fn check_key(kind: &str, key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.contains('/') {
        return Err(StoreError::InvalidRequest(format!("{kind} {key:?}")));
    }
    Ok(())
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values: values of different types order by type,
/// then numbers numerically, strings and booleans naturally, arrays
/// element-wise.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a
            .iter()
            .zip(b)
            .map(|(a, b)| compare_values(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.len().cmp(&b.len())),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
