//! Recursive expansion of a schema into generated documents.

use super::descriptor::{Descriptor, Directive};
use super::list::generate_list;
use super::scalar::{generate_scalar, INVALID_TYPE};
use rand::Rng;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Reserved key turning a nested schema into an array of instances.
pub const REPEAT_KEY: &str = "_$amount";

/// A schema: field name to descriptor string or nested schema.
pub type Schema = Map<String, Value>;

/// A generated document: field name to generated value.
pub type Document = Map<String, Value>;

/// Upper bounds applied while expanding a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandLimits {
    /// Largest accepted `_$amount`.
    pub max_repeat: usize,
    /// Largest accepted `amount` of a `list-` directive.
    pub max_list_amount: usize,
    /// Largest accepted size parameter (`len`, `words`).
    pub max_len: usize,
    /// Repeated instances one expander may produce across all nesting
    /// levels. Repetitions past this budget are truncated.
    pub max_repeated_objects: usize,
}

impl Default for ExpandLimits {
    fn default() -> Self {
        Self {
            max_repeat: 100,
            max_list_amount: 100,
            max_len: 1000,
            max_repeated_objects: 10_000,
        }
    }
}

/// Walks a schema and generates values for every field.
///
/// Each field is generated on its own; nothing reads a sibling's value.
pub struct SchemaExpander<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    limits: ExpandLimits,
    invalid_fields: usize,
    repeat_budget: usize,
}

impl<'r, R: Rng + ?Sized> SchemaExpander<'r, R> {
    pub fn new(rng: &'r mut R, limits: ExpandLimits) -> Self {
        Self {
            rng,
            limits,
            invalid_fields: 0,
            repeat_budget: limits.max_repeated_objects,
        }
    }

    /// Number of fields that produced the invalid-type sentinel so far.
    pub fn invalid_fields(&self) -> usize {
        self.invalid_fields
    }

    /// Generate `count` independent documents. Counts below one yield one.
    pub fn expand_many(&mut self, schema: &Schema, count: usize) -> Vec<Document> {
        (0..count.max(1)).map(|_| self.expand_document(schema)).collect()
    }

    /// Generate one document from a schema. The repetition marker is never
    /// copied into the output.
    pub fn expand_document(&mut self, schema: &Schema) -> Document {
        let mut document = Document::new();
        for (name, spec) in schema {
            if name == REPEAT_KEY {
                continue;
            }
            let value = match spec {
                Value::Object(nested) => self.expand_nested(nested),
                other => self.expand_field(other),
            };
            document.insert(name.clone(), value);
        }
        document
    }

    fn expand_nested(&mut self, nested: &Schema) -> Value {
        match repeat_count(nested) {
            Some(n) => {
                let n = n.min(self.limits.max_repeat);
                let granted = n.min(self.repeat_budget);
                if granted < n {
                    tracing::warn!(requested = n, granted, "Repetition budget exhausted");
                }
                // Reserve before descending so nested repetitions share what is left.
                self.repeat_budget -= granted;

                let items = (0..granted)
                    .map(|_| Value::Object(self.expand_document(nested)))
                    .collect();
                Value::Array(items)
            }
            None => Value::Object(self.expand_document(nested)),
        }
    }

    fn expand_field(&mut self, spec: &Value) -> Value {
        let text: Cow<'_, str> = match spec {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        };

        match Directive::classify(&text) {
            Directive::Literal => spec.clone(),
            Directive::List(rest) => {
                Value::Array(generate_list(rest, &self.limits, self.rng))
            }
            Directive::Scalar(descriptor) => {
                let descriptor = Descriptor::parse(descriptor);
                generate_scalar(&descriptor, &self.limits, self.rng).unwrap_or_else(|| {
                    tracing::debug!(spec = %text, "Unknown field type");
                    self.invalid_fields += 1;
                    Value::String(INVALID_TYPE.to_string())
                })
            }
        }
    }
}

/// The repetition requested by a nested schema, if any.
///
/// Accepts a positive JSON integer or a string of digits.
pub fn repeat_count(nested: &Schema) -> Option<usize> {
    let count = match nested.get(REPEAT_KEY)? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    usize::try_from(count).ok().filter(|n| *n > 0)
}
