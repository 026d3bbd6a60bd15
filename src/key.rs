//! Cache Key Module
//!
//! Turns a sequence of primitive values into a single backend-safe key.
//!
//! Every character outside `[A-Za-z0-9_-]` is replaced by the decimal string
//! of its code point, spaces become underscores, and the result never exceeds
//! [`MAX_KEY_LENGTH`] characters.

use std::fmt;

// == Public Constants ==
/// Maximum length of a normalized key, in characters
pub const MAX_KEY_LENGTH: usize = 250;

/// Placeholder used for null parts
const NULL_TOKEN: &str = "None";

// == Key Part ==
/// A single primitive component of a cache key.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyPart {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Missing value, rendered as `None`
    Null,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Text(s) => f.write_str(s),
            KeyPart::Int(n) => write!(f, "{}", n),
            KeyPart::UInt(n) => write!(f, "{}", n),
            KeyPart::Float(x) => write_float(f, *x),
            KeyPart::Bool(true) => f.write_str("True"),
            KeyPart::Bool(false) => f.write_str("False"),
            KeyPart::Null => f.write_str(NULL_TOKEN),
        }
    }
}

/// Shortest round-trip form. Integral values keep a trailing `.0` so `1.0`
/// and `1` stay distinct; decimal exponents below -4 or from 16 up switch to
/// scientific notation with a signed, two-digit exponent (`1e+16`, `1e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }

    let sci = format!("{:e}", x);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
    } else if x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

// == From Implementations ==
impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        KeyPart::Text(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        KeyPart::Text(value)
    }
}

impl From<&String> for KeyPart {
    fn from(value: &String) -> Self {
        KeyPart::Text(value.clone())
    }
}

impl From<char> for KeyPart {
    fn from(value: char) -> Self {
        KeyPart::Text(value.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for KeyPart {
            fn from(value: $t) -> Self {
                KeyPart::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for KeyPart {
            fn from(value: $t) -> Self {
                KeyPart::UInt(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for KeyPart {
    fn from(value: f32) -> Self {
        KeyPart::Float(value as f64)
    }
}

impl From<f64> for KeyPart {
    fn from(value: f64) -> Self {
        KeyPart::Float(value)
    }
}

impl From<bool> for KeyPart {
    fn from(value: bool) -> Self {
        KeyPart::Bool(value)
    }
}

impl From<()> for KeyPart {
    fn from(_: ()) -> Self {
        KeyPart::Null
    }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
    fn from(value: Option<T>) -> Self {
        value.map_or(KeyPart::Null, Into::into)
    }
}

// == Into Key Parts ==
/// Anything that can be used as a cache key: a single scalar or a sequence.
///
/// A single sequence argument is flattened into its elements, so
/// `["a", "b"]`, `vec!["a", "b"]` and `&["a", "b"][..]` all produce the same key.
pub trait IntoKeyParts {
    fn into_key_parts(self) -> Vec<KeyPart>;
}

macro_rules! impl_scalar_key {
    ($($t:ty),*) => {
        $(impl IntoKeyParts for $t {
            fn into_key_parts(self) -> Vec<KeyPart> {
                vec![KeyPart::from(self)]
            }
        })*
    };
}

impl_scalar_key!(
    &str, String, &String, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64,
    bool, (), KeyPart
);

impl<T: Into<KeyPart>> IntoKeyParts for Option<T> {
    fn into_key_parts(self) -> Vec<KeyPart> {
        vec![KeyPart::from(self)]
    }
}

impl<T: Into<KeyPart>> IntoKeyParts for Vec<T> {
    fn into_key_parts(self) -> Vec<KeyPart> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<KeyPart> + Clone> IntoKeyParts for &[T] {
    fn into_key_parts(self) -> Vec<KeyPart> {
        self.iter().cloned().map(Into::into).collect()
    }
}

impl<T: Into<KeyPart> + Clone> IntoKeyParts for &Vec<T> {
    fn into_key_parts(self) -> Vec<KeyPart> {
        self.as_slice().into_key_parts()
    }
}

impl<T: Into<KeyPart>, const N: usize> IntoKeyParts for [T; N] {
    fn into_key_parts(self) -> Vec<KeyPart> {
        self.into_iter().map(Into::into).collect()
    }
}

/// Builds a heterogeneous `Vec<KeyPart>`.
///
/// ```
/// use cache_utils::{cache_key, key_parts};
///
/// assert_eq!(cache_key(key_parts!["test", (), 1]), "testNone1");
/// ```
#[macro_export]
macro_rules! key_parts {
    ($($part:expr),* $(,)?) => {
        vec![$($crate::key::KeyPart::from($part)),*]
    };
}

// == Normalization ==
/// Normalizes any key argument into a backend-safe string.
pub fn cache_key(key: impl IntoKeyParts) -> String {
    normalize(&key.into_key_parts())
}

/// Joins key parts into a single safe token of at most [`MAX_KEY_LENGTH`] chars.
pub fn normalize(parts: &[KeyPart]) -> String {
    let mut key = String::new();
    for part in parts {
        push_sanitized(&mut key, &part.to_string());
    }

    // Output is pure ASCII, so byte length equals character count.
    if key.len() > MAX_KEY_LENGTH {
        key.retain(|c| c != '_');
    }
    key.truncate(MAX_KEY_LENGTH);
    key
}

fn push_sanitized(out: &mut String, raw: &str) {
    for c in raw.chars() {
        match c {
            ' ' => out.push('_'),
            c if is_safe(c) => out.push(c),
            c => out.push_str(&(c as u32).to_string()),
        }
    }
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
