use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A symbol value. Identity is carried by `id`, so two symbols with the same description are
/// still distinct keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolData {
    description: String,
    id: String,
}

impl SymbolData {
    pub fn new(description: impl Into<String>) -> Self {
        SymbolData {
            description: description.into(),
            id: Uuid::new_v4().to_hyphenated().to_string(),
        }
    }

    fn well_known(name: &str) -> Self {
        SymbolData {
            description: name.to_string(),
            id: name.to_string(),
        }
    }
}
impl Display for SymbolData {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description)
    }
}

/* Well known symbols */
lazy_static! {
    pub static ref SYMBOL_HAS_INSTANCE: SymbolData = SymbolData::well_known("Symbol.hasInstance");
    pub static ref SYMBOL_TO_STRING_TAG: SymbolData =
        SymbolData::well_known("Symbol.toStringTag");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_with_same_description_differ() {
        let a = SymbolData::new("callee");
        let b = SymbolData::new("callee");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), "Symbol(callee)");
    }

    #[test]
    fn test_well_known_symbols_are_stable() {
        assert_eq!(*SYMBOL_HAS_INSTANCE, SymbolData::well_known("Symbol.hasInstance"));
        assert_ne!(*SYMBOL_HAS_INSTANCE, *SYMBOL_TO_STRING_TAG);
    }
}
