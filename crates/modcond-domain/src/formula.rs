//! Formula tree shared by both dialects.
//!
//! The host stores a formula as a structured document: an object whose `type`
//! field names the node kind. Parsing never fails. Nodes that cannot be
//! understood become [`Formula::Unsupported`] and simply never match.

use modcond_types::ids;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A dialect's closed set of leaf predicates.
pub trait Leaf: Serialize + DeserializeOwned {
    /// The canonical `type` tag of this leaf.
    fn kind(&self) -> &'static str;
}

/// One node of a formula. `L` is the dialect's leaf set.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula<L> {
    /// No `type` tag: the condition is not configured.
    Null,
    True,
    False,
    And(Vec<Formula<L>>),
    Or(Vec<Formula<L>>),
    Not(Box<Formula<L>>),
    Leaf(L),
    /// Unknown kind or a node whose fields do not fit its kind. Kept verbatim.
    Unsupported(Value),
}

impl<L> Default for Formula<L> {
    fn default() -> Self {
        Formula::Null
    }
}

impl<L: Leaf> Formula<L> {
    /// Build a formula tree from a stored document.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Formula::Unsupported(value.clone());
        };

        let kind = match obj.get("type") {
            None | Some(Value::Null) => return Formula::Null,
            Some(Value::String(kind)) => kind.as_str(),
            Some(_) => return Formula::Unsupported(value.clone()),
        };

        match kind {
            ids::KIND_TRUE => Formula::True,
            ids::KIND_FALSE => Formula::False,
            ids::KIND_AND | ids::KIND_OR => {
                let Some(values) = obj.get("values").and_then(Value::as_array) else {
                    return Formula::Unsupported(value.clone());
                };
                let children = values.iter().map(Formula::from_value).collect();
                if kind == ids::KIND_AND {
                    Formula::And(children)
                } else {
                    Formula::Or(children)
                }
            }
            ids::KIND_NOT => match obj.get("value") {
                Some(inner) => Formula::Not(Box::new(Formula::from_value(inner))),
                None => Formula::Unsupported(value.clone()),
            },
            _ => match serde_json::from_value::<L>(value.clone()) {
                Ok(leaf) => Formula::Leaf(leaf),
                Err(_) => Formula::Unsupported(value.clone()),
            },
        }
    }

    /// The `type` tag of this node, or `None` for the null formula.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Formula::Null => None,
            Formula::True => Some(ids::KIND_TRUE),
            Formula::False => Some(ids::KIND_FALSE),
            Formula::And(_) => Some(ids::KIND_AND),
            Formula::Or(_) => Some(ids::KIND_OR),
            Formula::Not(_) => Some(ids::KIND_NOT),
            Formula::Leaf(leaf) => Some(leaf.kind()),
            Formula::Unsupported(raw) => raw.get("type").and_then(Value::as_str),
        }
    }
}

impl<L> Formula<L> {
    pub fn is_null(&self) -> bool {
        matches!(self, Formula::Null)
    }

    /// Length of the longest root-to-leaf path. A single node has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Formula::And(children) | Formula::Or(children) => {
                1 + children.iter().map(Formula::depth).max().unwrap_or(0)
            }
            Formula::Not(inner) => 1 + inner.depth(),
            _ => 1,
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            Formula::And(children) | Formula::Or(children) => {
                1 + children.iter().map(Formula::node_count).sum::<usize>()
            }
            Formula::Not(inner) => 1 + inner.node_count(),
            _ => 1,
        }
    }

    /// Raw documents of every unsupported node, in document order.
    pub fn unsupported(&self) -> Vec<&Value> {
        let mut out = Vec::new();
        self.collect_unsupported(&mut out);
        out
    }

    fn collect_unsupported<'a>(&'a self, out: &mut Vec<&'a Value>) {
        match self {
            Formula::And(children) | Formula::Or(children) => {
                for child in children {
                    child.collect_unsupported(out);
                }
            }
            Formula::Not(inner) => inner.collect_unsupported(out),
            Formula::Unsupported(raw) => out.push(raw),
            _ => {}
        }
    }

    pub fn unsupported_count(&self) -> usize {
        match self {
            Formula::And(children) | Formula::Or(children) => {
                children.iter().map(Formula::unsupported_count).sum()
            }
            Formula::Not(inner) => inner.unsupported_count(),
            Formula::Unsupported(_) => 1,
            _ => 0,
        }
    }
}

impl<L: Serialize> Serialize for Formula<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Formula::Null => serializer.serialize_map(Some(0))?.end(),
            Formula::True | Formula::False => {
                let kind = if matches!(self, Formula::True) {
                    ids::KIND_TRUE
                } else {
                    ids::KIND_FALSE
                };
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", kind)?;
                map.end()
            }
            Formula::And(children) | Formula::Or(children) => {
                let kind = if matches!(self, Formula::And(_)) {
                    ids::KIND_AND
                } else {
                    ids::KIND_OR
                };
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", kind)?;
                map.serialize_entry("values", children)?;
                map.end()
            }
            Formula::Not(inner) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", ids::KIND_NOT)?;
                map.serialize_entry("value", inner)?;
                map.end()
            }
            Formula::Leaf(leaf) => leaf.serialize(serializer),
            Formula::Unsupported(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, L: Leaf> Deserialize<'de> for Formula<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Formula::from_value(&value))
    }
}
