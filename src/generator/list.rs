//! `list-` directives: a sequence of values of a single element type.
//!
//! ```text
//! list-int(amount=5$min=1$max=10)
//! list-email(domain=corp.io)
//! list-str(len=4)
//! ```

use super::descriptor::Descriptor;
use super::expander::ExpandLimits;
use super::params::Params;
use super::scalar::{email, fake_string, lowercase_letters, ordered, DEFAULT_EMAIL_DOMAIN};
use fake::faker::name::en::Name;
use rand::Rng;
use serde_json::{json, Value};
use tracing::warn;

pub const DEFAULT_LIST_AMOUNT: usize = 3;
const DEFAULT_STR_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListElementKind {
    Int,
    Str,
    Name,
    Email,
}

impl ListElementKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(Self::Int),
            "str" => Some(Self::Str),
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            _ => None,
        }
    }
}

/// Generate the elements for a list descriptor (without its `list-` prefix).
///
/// `limits` caps the element count and the `str` element length.
/// Unsupported or unparsable element types produce an empty list.
pub fn generate_list<R: Rng + ?Sized>(
    descriptor: &str,
    limits: &ExpandLimits,
    rng: &mut R,
) -> Vec<Value> {
    let Descriptor::Typed { type_name, params } = Descriptor::parse(descriptor) else {
        return Vec::new();
    };
    let Some(kind) = ListElementKind::from_name(&type_name) else {
        tracing::debug!(element_type = %type_name, "Unsupported list element type");
        return Vec::new();
    };

    let amount = params
        .positive_or("amount", DEFAULT_LIST_AMOUNT)
        .min(limits.max_list_amount);

    match kind {
        ListElementKind::Int => {
            let (min, max) = int_bounds(&params);
            (0..amount).map(|_| json!(rng.gen_range(min..=max))).collect()
        }
        ListElementKind::Str => {
            let len = params.positive_or("len", DEFAULT_STR_LEN).min(limits.max_len);
            (0..amount).map(|_| json!(lowercase_letters(len, rng))).collect()
        }
        ListElementKind::Name => (0..amount).map(|_| json!(fake_string(Name(), rng))).collect(),
        ListElementKind::Email => {
            let domain = params.str_or("domain", DEFAULT_EMAIL_DOMAIN);
            (0..amount).map(|_| json!(email(domain, rng))).collect()
        }
    }
}

/// Bounds for `list-int`. Missing bounds fall back to 0, so a descriptor
/// without `min`/`max` yields only zeros.
fn int_bounds(params: &Params) -> (i64, i64) {
    let min = params.int("min");
    let max = params.int("max");
    if min.is_none() || max.is_none() {
        warn!(?min, ?max, "list-int without explicit bounds, missing bounds default to 0");
    }
    ordered(min.unwrap_or(0), max.unwrap_or(0))
}
