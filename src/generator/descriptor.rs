//! Field descriptor parsing.
//!
//! A descriptor is the compact per-field string a schema uses to say how a
//! value should be generated:
//!
//! ```text
//! int(len=4)
//! email(domain=example.com)
//! age(min=18$max=65)
//! bool
//! ```
//!
//! Parsing never fails loudly. Input that does not have the `type(...)` or
//! bare `type` shape comes back as [`Descriptor::Unparsed`] and is turned into
//! the invalid-type sentinel further down the line.

use super::params::Params;

/// Prefix that turns a descriptor into a list directive (`list-int(amount=5)`).
pub const LIST_PREFIX: &str = "list-";

/// Result of parsing a descriptor string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// A type name with its (possibly empty) parameters.
    Typed { type_name: String, params: Params },
    /// The input did not look like a descriptor at all.
    Unparsed,
}

impl Descriptor {
    /// Parse a descriptor string.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if !input.is_empty() && input.chars().all(is_word_char) {
            return Descriptor::Typed {
                type_name: input.to_string(),
                params: Params::default(),
            };
        }

        match split_call(input) {
            Some((type_name, payload)) => Descriptor::Typed {
                type_name: type_name.to_string(),
                params: parse_payload(payload),
            },
            None => Descriptor::Unparsed,
        }
    }
}

/// How a single literal field spec should be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// An integer literal, copied to the output as given.
    Literal,
    /// `list-...`: the remainder is handed to the list generator.
    List(&'a str),
    /// Anything else goes through the descriptor parser.
    Scalar(&'a str),
}

impl<'a> Directive<'a> {
    pub fn classify(spec: &'a str) -> Self {
        if is_integer_literal(spec) {
            Directive::Literal
        } else if let Some(rest) = spec.strip_prefix(LIST_PREFIX) {
            Directive::List(rest)
        } else {
            Directive::Scalar(spec)
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Locate the first `IDENT(` in the input and return the identifier with the
/// text up to the last closing parenthesis.
fn split_call(input: &str) -> Option<(&str, &str)> {
    let close = input.rfind(')')?;

    for (open, c) in input.char_indices() {
        if c != '(' || open >= close {
            continue;
        }
        let head = &input[..open];
        let ident_start = head
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map(|(i, _)| i);

        if let Some(start) = ident_start {
            return Some((&input[start..open], &input[open + 1..close]));
        }
    }

    None
}

fn parse_payload(payload: &str) -> Params {
    let cleaned = payload.replace('\\', "");
    let mut params = Params::default();

    for item in cleaned.split('$') {
        let mut parts = item.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };
        let key: String = key.chars().filter(|c| is_key_char(*c)).collect();
        params.insert(key, value.to_string());
    }

    params
}
