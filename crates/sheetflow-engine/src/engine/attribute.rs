//! Attribute metadata and kind classification.
//!
//! An attribute is a named column of a sheet. Its kind is never stored; it is
//! classified from the optional fields by a fixed precedence:
//! `derived > linked > recurrent > independent`. Malformed data can carry
//! several of these fields at once, and the precedence decides which wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque sheet identity.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct SheetId(pub String);

impl SheetId {
    pub fn new(id: impl Into<String>) -> SheetId {
        SheetId(id.into())
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SheetId {
    fn from(id: &str) -> SheetId {
        SheetId(id.to_string())
    }
}

impl From<String> for SheetId {
    fn from(id: String) -> SheetId {
        SheetId(id)
    }
}

/// A derived column's formula: positional attribute indices to add and
/// subtract at the same time index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub addition: Vec<usize>,
    pub subtraction: Vec<usize>,
}

impl Formula {
    pub fn new(addition: Vec<usize>, subtraction: Vec<usize>) -> Formula {
        Formula {
            addition,
            subtraction,
        }
    }

    /// All referenced indices, additions first, in declaration order.
    pub fn references(&self) -> impl Iterator<Item = usize> + '_ {
        self.addition.iter().chain(self.subtraction.iter()).copied()
    }
}

/// A cross-sheet annotation: this column is sourced from another sheet's
/// attribute. Visual only; values are never pulled through the link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedFrom {
    pub sheet_id: SheetId,
    pub attribute_index: usize,
}

/// Recurrence marker: the column logically carries over from another
/// attribute representing the previous period (e.g. opening-stock recurs
/// from closing-stock).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub is_recurrent: bool,
    pub reference_index: Option<usize>,
    pub fed_status: bool,
}

/// A named column within a sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub formula: Option<Formula>,
    pub linked_from: Option<LinkedFrom>,
    pub recurrence: Option<Recurrence>,
}

/// Classified attribute kind. Derived from the optional fields, never stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    Independent,
    Derived,
    Linked,
    Recurrent,
}

impl Attribute {
    pub fn independent(name: impl Into<String>) -> Attribute {
        Attribute {
            name: name.into(),
            formula: None,
            linked_from: None,
            recurrence: None,
        }
    }

    pub fn derived(name: impl Into<String>, formula: Formula) -> Attribute {
        Attribute {
            formula: Some(formula),
            ..Attribute::independent(name)
        }
    }

    pub fn linked(name: impl Into<String>, linked_from: LinkedFrom) -> Attribute {
        Attribute {
            linked_from: Some(linked_from),
            ..Attribute::independent(name)
        }
    }

    pub fn recurrent(name: impl Into<String>, reference_index: usize) -> Attribute {
        Attribute {
            recurrence: Some(Recurrence {
                is_recurrent: true,
                reference_index: Some(reference_index),
                fed_status: false,
            }),
            ..Attribute::independent(name)
        }
    }

    /// Classify this attribute. Precedence is significant: a column carrying
    /// both a formula and a link classifies as derived.
    pub fn kind(&self) -> AttributeKind {
        if self.formula.is_some() {
            return AttributeKind::Derived;
        }
        if self.linked_from.is_some() {
            return AttributeKind::Linked;
        }
        if self.recurrence.as_ref().is_some_and(|r| r.is_recurrent) {
            return AttributeKind::Recurrent;
        }
        AttributeKind::Independent
    }

    pub fn is_derived(&self) -> bool {
        self.kind() == AttributeKind::Derived
    }
}

/// A sheet's metadata: identity, display name, owner info and its ordered
/// attribute sequence. Attributes are append-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetMeta {
    pub id: SheetId,
    pub name: String,
    pub department: Option<String>,
    pub attributes: Vec<Attribute>,
}

impl SheetMeta {
    pub fn new(id: impl Into<SheetId>, name: impl Into<String>) -> SheetMeta {
        SheetMeta {
            id: id.into(),
            name: name.into(),
            department: None,
            attributes: Vec::new(),
        }
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_fields() -> Attribute {
        Attribute {
            name: "mixed".to_string(),
            formula: Some(Formula::new(vec![1], vec![])),
            linked_from: Some(LinkedFrom {
                sheet_id: SheetId::from("other"),
                attribute_index: 0,
            }),
            recurrence: Some(Recurrence {
                is_recurrent: true,
                reference_index: Some(2),
                fed_status: false,
            }),
        }
    }

    #[test]
    fn test_classification_precedence_formula_wins() {
        assert_eq!(all_fields().kind(), AttributeKind::Derived);
    }

    #[test]
    fn test_classification_precedence_link_beats_recurrence() {
        let mut attr = all_fields();
        attr.formula = None;
        assert_eq!(attr.kind(), AttributeKind::Linked);
        attr.linked_from = None;
        assert_eq!(attr.kind(), AttributeKind::Recurrent);
        attr.recurrence = None;
        assert_eq!(attr.kind(), AttributeKind::Independent);
    }

    #[test]
    fn test_recurrence_flag_off_classifies_independent() {
        let attr = Attribute {
            recurrence: Some(Recurrence {
                is_recurrent: false,
                reference_index: Some(3),
                fed_status: true,
            }),
            ..Attribute::independent("opening-stock")
        };
        assert_eq!(attr.kind(), AttributeKind::Independent);
    }
}
