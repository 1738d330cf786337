//! Schema interpreter.
//!
//! A schema maps field names to descriptor strings (`"int(len=4)"`,
//! `"list-email(amount=2)"`, `"name"`) or to nested schemas. A nested schema
//! carrying the `_$amount` key is expanded into an array of that many
//! independently generated objects.
//!
//! ```rust
//! use flapi::generator::{ExpandLimits, MockGenerator};
//! use serde_json::json;
//!
//! let generator = MockGenerator::new(ExpandLimits::default(), None);
//! let schema = json!({"id": "int(len=4)", "tags": "list-str(amount=2)"});
//! let generation = generator.generate(schema.as_object().unwrap(), 3, Some(42));
//! assert_eq!(generation.documents.len(), 3);
//! ```
//!
//! Everything in here is synchronous and keeps no state between calls; the
//! random source is created per call from an optional seed.

pub mod descriptor;
pub mod expander;
pub mod list;
pub mod params;
pub mod scalar;

pub use descriptor::{Descriptor, Directive};
pub use expander::{Document, ExpandLimits, Schema, SchemaExpander, REPEAT_KEY};
pub use params::Params;
pub use scalar::{ScalarKind, INVALID_TYPE};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Output of one generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub documents: Vec<Document>,
    /// Fields that fell back to the invalid-type sentinel.
    pub invalid_fields: usize,
}

/// Entry point used by the transport layer.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    limits: ExpandLimits,
    seed: Option<u64>,
}

impl MockGenerator {
    /// `seed` makes every call deterministic unless the call passes its own.
    pub fn new(limits: ExpandLimits, seed: Option<u64>) -> Self {
        Self { limits, seed }
    }

    /// Generate `count` documents from `schema`.
    ///
    /// A per-call `seed` takes precedence over the configured one; without
    /// either, the generator is seeded from OS entropy.
    pub fn generate(&self, schema: &Schema, count: usize, seed: Option<u64>) -> Generation {
        let mut rng = match seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut expander = SchemaExpander::new(&mut rng, self.limits);
        let documents = expander.expand_many(schema, count);

        Generation {
            documents,
            invalid_fields: expander.invalid_fields(),
        }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(ExpandLimits::default(), None)
    }
}
