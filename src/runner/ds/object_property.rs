use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::symbol::SymbolData;
use crate::runner::ds::value::JsValue;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
    Sym(SymbolData),
}
impl PropertyKey {
    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Sym(_))
    }
}
impl From<&str> for PropertyKey {
    /// Canonical array indices become `Int` keys so `"0"` and `0` address the same slot.
    fn from(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => PropertyKey::Int(i),
            None => PropertyKey::Str(s.to_string()),
        }
    }
}
impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::from(s.as_str())
    }
}
impl From<u32> for PropertyKey {
    fn from(i: u32) -> Self {
        PropertyKey::Int(i)
    }
}
impl From<usize> for PropertyKey {
    /// Element positions past the array-index range stay string keys instead of wrapping.
    fn from(idx: usize) -> Self {
        match u32::try_from(idx) {
            Ok(i) if i != u32::MAX => PropertyKey::Int(i),
            _ => PropertyKey::Str(idx.to_string()),
        }
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
            PropertyKey::Sym(s) => write!(f, "{}", s),
        }
    }
}

fn canonical_index(s: &str) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match s.parse::<u32>() {
        // 2^32 - 1 is not a valid array index.
        Ok(i) if i != u32::MAX => Some(i),
        _ => None,
    }
}

/// A data property. Accessor properties are not modelled.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub value: JsValue,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}
impl PropertyDescriptor {
    /// What a plain assignment creates.
    pub fn new_data(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Built-in methods and back links: writable, configurable, not enumerable.
    pub fn new_hidden(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// `name` and `length` of function objects.
    pub fn new_readonly(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: false,
            enumerable: false,
            configurable: true,
        }
    }

    pub fn new_frozen(value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }

    pub fn with_value(&self, value: JsValue) -> Self {
        PropertyDescriptor {
            value,
            writable: self.writable,
            enumerable: self.enumerable,
            configurable: self.configurable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_like_strings_become_int_keys() {
        assert_eq!(PropertyKey::from("0"), PropertyKey::Int(0));
        assert_eq!(PropertyKey::from("42"), PropertyKey::Int(42));
        assert_eq!(PropertyKey::from("042"), PropertyKey::Str("042".to_string()));
        assert_eq!(PropertyKey::from("-1"), PropertyKey::Str("-1".to_string()));
        assert_eq!(
            PropertyKey::from("4294967295"),
            PropertyKey::Str("4294967295".to_string())
        );
        assert_eq!(PropertyKey::from("name"), PropertyKey::Str("name".to_string()));
    }

    #[test]
    fn test_positions_past_index_range_stay_strings() {
        assert_eq!(PropertyKey::from(7usize), PropertyKey::Int(7));
        assert_eq!(
            PropertyKey::from(u32::MAX as usize),
            PropertyKey::Str("4294967295".to_string())
        );
        assert_eq!(
            PropertyKey::from(u32::MAX as usize + 1),
            PropertyKey::Str("4294967296".to_string())
        );
        assert_eq!(
            PropertyKey::from(u32::MAX as usize + 1),
            PropertyKey::from("4294967296")
        );
    }
}
