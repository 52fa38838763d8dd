//! Flag values, ordered flag sets, and `-name value` rendering.

use std::fmt;

use crate::escape::Escaped;

/// A single option value.
///
/// Booleans render as `1`/`0`, numbers with their shortest decimal form and
/// escaped strings verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A raw string that has not been escaped.
    Str(String),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A boolean, rendered as `1` or `0`.
    Bool(bool),
    /// A string that already passed through [`crate::escape()`].
    Escaped(Escaped),
}

impl Value {
    /// The raw string, if this is an unescaped string value.
    pub fn as_raw_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value went through the escaper.
    pub fn is_escaped(&self) -> bool {
        matches!(self, Value::Escaped(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(true) => f.write_str("1"),
            Value::Bool(false) => f.write_str("0"),
            Value::Escaped(e) => f.write_str(e.as_str()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<Escaped> for Value {
    fn from(e: Escaped) -> Self {
        Value::Escaped(e)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i64)
                }
            }
        )*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Str(i.to_string()))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::from(i as u64)
    }
}

/// Ordered mapping of option names to values.
///
/// Insertion order decides the order of rendered tokens. Setting an existing
/// key replaces its value in place (last write wins). A key may hold an
/// absent value; absent keys are kept for ordering but never rendered.
///
/// ```
/// use ffcompose_args::FlagSet;
///
/// let flags = FlagSet::new()
///     .with("crf", 23)
///     .with_opt("tune", None::<&str>)
///     .with("preset", "fast");
///
/// assert_eq!(flags.to_args(), ["-crf", "23", "-preset", "fast"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagSet {
    entries: Vec<(String, Option<Value>)>,
}

impl FlagSet {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: String, value: Option<Value>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Set a present value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.put(key.into(), Some(value.into()));
        self
    }

    /// Set a value that may be absent.
    pub fn set_opt<V: Into<Value>>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        self.put(key.into(), value.map(Into::into));
        self
    }

    /// Builder form of [`FlagSet::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`FlagSet::set_opt`].
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set_opt(key, value);
        self
    }

    /// Merge `other` into this set, last write wins.
    pub fn extend(&mut self, other: FlagSet) {
        for (key, value) in other.entries {
            self.put(key, value);
        }
    }

    /// The value stored for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Whether `key` was set, absent or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// All entries in insertion order, including absent ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Entries with a present value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Number of keys, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as `-key value` pairs.
    pub fn to_args(&self) -> Vec<String> {
        render_flags(self, "-")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FlagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut flags = FlagSet::new();
        for (k, v) in iter {
            flags.set(k, v);
        }
        flags
    }
}

/// Render a flag set into `prefix+key`, `value` token pairs.
///
/// Absent values contribute no tokens.
pub fn render_flags(flags: &FlagSet, prefix: &str) -> Vec<String> {
    let mut args = Vec::with_capacity(flags.len() * 2);
    for (key, value) in flags.present() {
        args.push(format!("{prefix}{key}"));
        args.push(value.to_string());
    }
    args
}

#[cfg(feature = "serialize")]
mod de {
    use super::{FlagSet, Value};
    use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
    use std::fmt;

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct ValueVisitor;

            impl Visitor<'_> for ValueVisitor {
                type Value = Value;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a string, number or boolean")
                }

                fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
                    Ok(Value::Bool(v))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
                    Ok(Value::Int(v))
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
                    Ok(Value::from(v))
                }

                fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
                    Ok(Value::Float(v))
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
                    Ok(Value::Str(v.to_string()))
                }

                fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
                    Ok(Value::Str(v))
                }
            }

            deserializer.deserialize_any(ValueVisitor)
        }
    }

    impl<'de> Deserialize<'de> for FlagSet {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct FlagSetVisitor;

            impl<'de> Visitor<'de> for FlagSetVisitor {
                type Value = FlagSet;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a table of option names to values")
                }

                fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FlagSet, A::Error> {
                    let mut flags = FlagSet::new();
                    while let Some((key, value)) = map.next_entry::<String, Option<Value>>()? {
                        flags.put(key, value);
                    }
                    Ok(flags)
                }
            }

            deserializer.deserialize_map(FlagSetVisitor)
        }
    }
}
