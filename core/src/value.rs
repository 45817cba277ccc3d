//! Typed flag values and raw-string coercion.
//!
//! [`coerce`] turns a raw command-line string into a [`FlagValue`] of the
//! declared [`FlagType`]. Numeric conversion goes through [`str::parse`], so a
//! literal `0` and a malformed literal are always distinguishable.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use serde::Serialize;
use thiserror::Error;

use crate::FlagType;

/// Literals accepted as `true` (compared case-insensitively).
pub const TRUTHY_LITERALS: [&str; 5] = ["true", "t", "yes", "y", "1"];

/// Literals accepted as `false` (compared case-insensitively).
pub const FALSY_LITERALS: [&str; 5] = ["false", "f", "no", "n", "0"];

/// A coerced flag value.
///
/// String values borrow from the argument vector (or from the schema, for
/// defaults), so the whole enum is `Copy`.
///
/// # Examples
///
/// ```
/// use optly_core::{FlagType, FlagValue};
///
/// let v = FlagValue::I32(-7);
/// assert_eq!(v.flag_type(), FlagType::Int32);
/// assert_eq!(v.as_i64(), Some(-7));
/// assert_eq!(v.as_u64(), None);
/// assert_eq!(FlagValue::Str("Bob").as_str(), Some("Bob"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlagValue<'a> {
    Bool(bool),
    Char(char),
    Str(&'a str),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl<'a> FlagValue<'a> {
    /// Type tag this value was coerced to.
    pub fn flag_type(&self) -> FlagType {
        match self {
            FlagValue::Bool(_) => FlagType::Bool,
            FlagValue::Char(_) => FlagType::Char,
            FlagValue::Str(_) => FlagType::String,
            FlagValue::I8(_) => FlagType::Int8,
            FlagValue::I16(_) => FlagType::Int16,
            FlagValue::I32(_) => FlagType::Int32,
            FlagValue::I64(_) => FlagType::Int64,
            FlagValue::U8(_) => FlagType::Uint8,
            FlagValue::U16(_) => FlagType::Uint16,
            FlagValue::U32(_) => FlagType::Uint32,
            FlagValue::U64(_) => FlagType::Uint64,
            FlagValue::F32(_) => FlagType::Float,
            FlagValue::F64(_) => FlagType::Double,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            FlagValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match *self {
            FlagValue::Char(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            FlagValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any signed integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            FlagValue::I8(n) => Some(n.into()),
            FlagValue::I16(n) => Some(n.into()),
            FlagValue::I32(n) => Some(n.into()),
            FlagValue::I64(n) => Some(n),
            _ => None,
        }
    }

    /// Widens any unsigned integer value.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            FlagValue::U8(n) => Some(n.into()),
            FlagValue::U16(n) => Some(n.into()),
            FlagValue::U32(n) => Some(n.into()),
            FlagValue::U64(n) => Some(n),
            _ => None,
        }
    }

    /// Widens either floating point value.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            FlagValue::F32(n) => Some(n.into()),
            FlagValue::F64(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for FlagValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Char(c) => write!(f, "{c}"),
            FlagValue::Str(s) => f.write_str(s),
            FlagValue::I8(n) => write!(f, "{n}"),
            FlagValue::I16(n) => write!(f, "{n}"),
            FlagValue::I32(n) => write!(f, "{n}"),
            FlagValue::I64(n) => write!(f, "{n}"),
            FlagValue::U8(n) => write!(f, "{n}"),
            FlagValue::U16(n) => write!(f, "{n}"),
            FlagValue::U32(n) => write!(f, "{n}"),
            FlagValue::U64(n) => write!(f, "{n}"),
            FlagValue::F32(n) => write!(f, "{n}"),
            FlagValue::F64(n) => write!(f, "{n}"),
        }
    }
}

/// Why a raw string could not be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// A char value was empty.
    #[error("value is empty")]
    Empty,
    /// Not one of the truthy/falsy literals.
    #[error("not a boolean literal")]
    InvalidBoolean,
    /// Numeric conversion failed (malformed or out of range).
    #[error("not a valid {0} literal")]
    InvalidNumber(FlagType),
}

/// Matches a boolean literal case-insensitively.
///
/// # Examples
///
/// ```
/// use optly_core::parse_bool;
///
/// assert_eq!(parse_bool("YES"), Some(true));
/// assert_eq!(parse_bool("f"), Some(false));
/// assert_eq!(parse_bool("0"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
pub fn parse_bool(raw: &str) -> Option<bool> {
    if TRUTHY_LITERALS.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(true)
    } else if FALSY_LITERALS.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Some(false)
    } else {
        None
    }
}

/// Coerces a raw string into a value of `flag_type`.
///
/// Strings are borrowed, chars take the first character and ignore the rest,
/// numbers must parse completely.
///
/// # Examples
///
/// ```
/// use optly_core::{coerce, CoerceError, FlagType, FlagValue};
///
/// assert_eq!(coerce(FlagType::Int64, "0"), Ok(FlagValue::I64(0)));
/// assert_eq!(coerce(FlagType::Uint8, "256"), Err(CoerceError::InvalidNumber(FlagType::Uint8)));
/// assert_eq!(coerce(FlagType::Char, "xyz"), Ok(FlagValue::Char('x')));
/// assert_eq!(coerce(FlagType::Double, "1.5e3"), Ok(FlagValue::F64(1500.0)));
/// ```
pub fn coerce(flag_type: FlagType, raw: &str) -> Result<FlagValue<'_>, CoerceError> {
    let invalid = |_: ParseIntError| CoerceError::InvalidNumber(flag_type);
    let invalid_float = |_: ParseFloatError| CoerceError::InvalidNumber(flag_type);

    match flag_type {
        FlagType::Bool => parse_bool(raw)
            .map(FlagValue::Bool)
            .ok_or(CoerceError::InvalidBoolean),
        FlagType::Char => raw.chars().next().map(FlagValue::Char).ok_or(CoerceError::Empty),
        FlagType::String => Ok(FlagValue::Str(raw)),
        FlagType::Int8 => raw.parse().map(FlagValue::I8).map_err(invalid),
        FlagType::Int16 => raw.parse().map(FlagValue::I16).map_err(invalid),
        FlagType::Int32 => raw.parse().map(FlagValue::I32).map_err(invalid),
        FlagType::Int64 => raw.parse().map(FlagValue::I64).map_err(invalid),
        FlagType::Uint8 => raw.parse().map(FlagValue::U8).map_err(invalid),
        FlagType::Uint16 => raw.parse().map(FlagValue::U16).map_err(invalid),
        FlagType::Uint32 => raw.parse().map(FlagValue::U32).map_err(invalid),
        FlagType::Uint64 => raw.parse().map(FlagValue::U64).map_err(invalid),
        FlagType::Float => raw.parse().map(FlagValue::F32).map_err(invalid_float),
        FlagType::Double => raw.parse().map(FlagValue::F64).map_err(invalid_float),
    }
}
