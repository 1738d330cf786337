//! Scalar value generators.

use super::descriptor::Descriptor;
use super::expander::ExpandLimits;
use super::params::Params;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::{Dummy, Fake};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

/// Value produced for a field whose type is unknown or unparsable.
pub const INVALID_TYPE: &str = "Invalid type";

pub const DEFAULT_EMAIL_DOMAIN: &str = "gmail.com";

/// Two-digit prefixes used for synthetic mobile numbers.
pub const PHONE_PREFIXES: [u8; 15] = [62, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96, 97, 98, 99];

const MAX_INT_LEN: i64 = 18;
const MIN_PASSWORD_LEN: usize = 4;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SPECIAL: &[u8] = b"!@#$%&*+-=?^_~";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Name,
    Email,
    Password,
    Text,
    Int,
    Time,
    Date,
    Address,
    Company,
    Phone,
    Bool,
    Float,
    Age,
    Description,
    Image,
}

impl ScalarKind {
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "name" => Self::Name,
            "email" => Self::Email,
            "password" => Self::Password,
            "text" | "str" => Self::Text,
            "int" => Self::Int,
            "time" => Self::Time,
            "date" => Self::Date,
            "address" => Self::Address,
            "company" => Self::Company,
            "phone" => Self::Phone,
            "bool" => Self::Bool,
            "float" => Self::Float,
            "age" => Self::Age,
            "description" => Self::Description,
            "image" => Self::Image,
            _ => return None,
        };
        Some(kind)
    }

    /// Size parameters (`len`, `words`) are clamped to `limits.max_len`.
    pub fn generate<R: Rng + ?Sized>(
        self,
        params: &Params,
        limits: &ExpandLimits,
        rng: &mut R,
    ) -> Value {
        let sized =
            |key: &str, default: usize| params.positive_or(key, default).min(limits.max_len);

        match self {
            Self::Name => json!(fake_string(Name(), rng)),
            Self::Email => json!(email(params.str_or("domain", DEFAULT_EMAIL_DOMAIN), rng)),
            Self::Password => json!(password(sized("len", 8), rng)),
            Self::Text => json!(lowercase_letters(sized("len", 5), rng)),
            Self::Int => {
                let len = params.int_or("len", 3);
                let len = if len < 1 { 3 } else { len.min(MAX_INT_LEN) };
                let (min, max) = digit_range(len as u32);
                json!(rng.gen_range(min..=max))
            }
            Self::Time => json!(chrono::Local::now().format("%H:%M:%S").to_string()),
            Self::Date => json!(chrono::Local::now().format("%Y-%m-%d").to_string()),
            Self::Address => json!(format!(
                "{} {}, {}, {} {}",
                fake_string(BuildingNumber(), rng),
                fake_string(StreetName(), rng),
                fake_string(CityName(), rng),
                fake_string(StateAbbr(), rng),
                fake_string(ZipCode(), rng),
            )),
            Self::Company => json!(fake_string(CompanyName(), rng)),
            Self::Phone => json!(mobile_number(params.int_or("code", 91), rng)),
            Self::Bool => json!(rng.gen_bool(0.5)),
            Self::Float => json!(rng.gen_range(0.0..100.0_f64)),
            Self::Age => {
                // Zero is a real bound here, not "use the default".
                let min = params.int("min").unwrap_or(1);
                let max = params.int("max").unwrap_or(100);
                let (min, max) = ordered(min, max);
                json!(rng.gen_range(min..=max))
            }
            Self::Description => {
                let words = sized("words", 4);
                json!(fake_string(Sentence(words..words.saturating_add(1)), rng))
            }
            Self::Image => json!(format!(
                "https://via.placeholder.com/{}x{}",
                params.int_or("width", 200),
                params.int_or("height", 200)
            )),
        }
    }
}

/// Generate the value for a parsed descriptor.
///
/// Returns `None` when the descriptor is unparsed or names an unknown type;
/// the caller substitutes [`INVALID_TYPE`].
pub fn generate_scalar<R: Rng + ?Sized>(
    descriptor: &Descriptor,
    limits: &ExpandLimits,
    rng: &mut R,
) -> Option<Value> {
    let Descriptor::Typed { type_name, params } = descriptor else {
        return None;
    };
    let kind = ScalarKind::from_name(type_name)?;
    Some(kind.generate(params, limits, rng))
}

/// Inclusive range of integers with exactly `len` decimal digits.
/// A single digit yields `1..=9`.
pub fn digit_range(len: u32) -> (i64, i64) {
    let min = 10_i64.pow(len - 1);
    let max = 10_i64.pow(len) - 1;
    (min, max)
}

pub(crate) fn ordered(a: i64, b: i64) -> (i64, i64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub(crate) fn fake_string<F, R>(faker: F, rng: &mut R) -> String
where
    F: Fake,
    String: Dummy<F>,
    R: Rng + ?Sized,
{
    faker.fake_with_rng(rng)
}

pub(crate) fn email<R: Rng + ?Sized>(domain: &str, rng: &mut R) -> String {
    let user = fake_string(Username(), rng);
    format!("{}@{}", user.to_lowercase(), domain)
}

pub(crate) fn lowercase_letters<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

fn password<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    let len = len.max(MIN_PASSWORD_LEN);
    let classes = [UPPER, LOWER, DIGITS, SPECIAL];
    let all: Vec<u8> = classes.concat();

    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    while chars.len() < len {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}

fn mobile_number<R: Rng + ?Sized>(country_code: i64, rng: &mut R) -> String {
    let prefix = PHONE_PREFIXES[rng.gen_range(0..PHONE_PREFIXES.len())];
    let number: u32 = rng.gen_range(10_000_000..=99_999_999);
    format!("+{}-{}{}", country_code, prefix, number)
}
