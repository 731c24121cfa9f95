use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a value that can be stored in the VM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Nil,
    True,
    Int(i32),
    Float(f32),
    String(String),
    Table(HashMap<i32, Variant>),
}

impl Variant {
    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Variant::True)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Variant::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Variant::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Variant::String(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Variant::Table(_))
    }

    /// Everything except nil counts as true in a conditional.
    pub fn canbe_true(&self) -> bool {
        !matches!(self, Variant::Nil)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Variant::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Variant::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&String> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&HashMap<i32, Variant>> {
        match self {
            Variant::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut HashMap<i32, Variant>> {
        match self {
            Variant::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn set_nil(&mut self) {
        *self = Variant::Nil;
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Nil => write!(f, "nil"),
            Variant::True => write!(f, "true"),
            Variant::Int(v) => write!(f, "{}", v),
            Variant::Float(v) => write!(f, "{}", v),
            Variant::String(s) => write!(f, "{s:?}"),
            Variant::Table(t) => write!(f, "table({})", t.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Variant::Int(42).as_int(), Some(42));
        assert_eq!(Variant::Float(1.5).as_int(), None);
        assert_eq!(
            Variant::String("abc".into()).as_string(),
            Some(&"abc".to_string())
        );
        assert!(Variant::Nil.is_nil());
        assert!(Variant::default().is_nil());
    }

    #[test]
    fn truthiness_only_excludes_nil() {
        assert!(!Variant::Nil.canbe_true());
        assert!(Variant::True.canbe_true());
        assert!(Variant::Int(0).canbe_true());
        assert!(Variant::String(String::new()).canbe_true());
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(Variant::Nil.to_string(), "nil");
        assert_eq!(Variant::Int(-3).to_string(), "-3");
        assert_eq!(Variant::String("a".into()).to_string(), "\"a\"");
    }
}
