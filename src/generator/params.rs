use std::collections::BTreeMap;

/// Parameters of a descriptor, e.g. `{"len": "4"}` for `int(len=4)`.
///
/// Values stay as strings; generators read them through the typed accessors
/// which substitute the generator's default for anything unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn insert(&mut self, key: String, value: String) {
        self.0.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Integer parameter, or `default` when absent, unparsable or zero.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|v| *v != 0)
            .unwrap_or(default)
    }

    /// Like [`Params::int_or`] but only accepts strictly positive values.
    pub fn positive_or(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(default)
    }

    /// Integer parameter without default substitution.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse::<i64>().ok())
    }

    /// String parameter, or `default` when absent or blank.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key).map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => default,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
