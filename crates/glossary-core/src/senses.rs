//! Numbered attribute values and their normalization.
//!
//! Definitions, sources and references all share one shape: an ordered
//! mapping from a small positive integer to text. Raw input may arrive as a
//! single string, a sequence of strings or an already numbered mapping;
//! [`normalize`] folds all of them into [`Senses`].
//!
//! | input                 | result                       |
//! |-----------------------|------------------------------|
//! | `"text"`              | `{1: "text"}`                |
//! | `["a", "b"]`          | `{1: "a", 2: "b"}`           |
//! | `{1: "a", 3: "c"}`    | unchanged                    |
//! | absent / empty        | `None`                       |
//! | anything else         | [`GlossaryError::TypeMismatch`] |

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{GlossaryError, GlossaryResult};

// ============================================================================
// Senses
// ============================================================================

/// An ordered, numbered set of texts (definitions, sources or references).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Senses(BTreeMap<u32, String>);

impl Senses {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the text stored under `number`.
    pub fn get(&self, number: u32) -> Option<&str> {
        self.0.get(&number).map(String::as_str)
    }

    /// Number of senses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no sense is stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates senses in numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(number, text)| (*number, text.as_str()))
    }

    /// Iterates the texts in numeric order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Number that the next appended sense will receive.
    pub fn next_number(&self) -> u32 {
        self.0.last_key_value().map_or(1, |(number, _)| number + 1)
    }

    /// Appends `text` after the highest existing number and returns its number.
    pub fn push(&mut self, text: impl Into<String>) -> u32 {
        let number = self.next_number();
        self.0.insert(number, text.into());
        number
    }

    /// Consumes the set, returning the underlying mapping.
    pub fn into_inner(self) -> BTreeMap<u32, String> {
        self.0
    }
}

impl From<BTreeMap<u32, String>> for Senses {
    fn from(map: BTreeMap<u32, String>) -> Self {
        Self(map)
    }
}

impl<S: Into<String>> FromIterator<S> for Senses {
    /// Numbers the texts from 1 in iteration order.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self((1..).zip(iter.into_iter().map(Into::into)).collect())
    }
}

// ============================================================================
// Raw input
// ============================================================================

/// A raw attribute value before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenseInput {
    /// A single text, becomes sense 1.
    Text(String),
    /// Ordered texts, numbered from 1.
    List(Vec<String>),
    /// Already numbered texts, kept as is.
    Map(BTreeMap<u32, String>),
    /// A shape that cannot be normalized; carries a description of it.
    Unsupported(String),
}

impl From<&str> for SenseInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for SenseInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for SenseInput {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for SenseInput {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SenseInput {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

impl From<BTreeMap<u32, String>> for SenseInput {
    fn from(map: BTreeMap<u32, String>) -> Self {
        Self::Map(map)
    }
}

impl From<Senses> for SenseInput {
    fn from(senses: Senses) -> Self {
        Self::Map(senses.into_inner())
    }
}

/// Normalizes a raw attribute into numbered senses.
///
/// Returns `Ok(None)` for absent or empty input. `field` names the attribute
/// in the error when the input has an unsupported shape.
pub fn normalize(
    input: Option<SenseInput>,
    field: &'static str,
) -> GlossaryResult<Option<Senses>> {
    let senses: Senses = match input {
        None => return Ok(None),
        Some(SenseInput::Text(text)) if text.trim().is_empty() => Senses::new(),
        Some(SenseInput::Text(text)) => Senses::from_iter([text]),
        Some(SenseInput::List(items)) => Senses::from_iter(items),
        Some(SenseInput::Map(map)) => Senses::from(map),
        Some(SenseInput::Unsupported(found)) => {
            return Err(GlossaryError::TypeMismatch { field, found });
        }
    };

    Ok((!senses.is_empty()).then_some(senses))
}

// ============================================================================
// Deserialization
// ============================================================================

impl<'de> Deserialize<'de> for SenseInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SenseInputVisitor)
    }
}

struct SenseInputVisitor;

impl<'de> Visitor<'de> for SenseInputVisitor {
    type Value = SenseInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a sequence of strings or a numbered mapping")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(SenseInput::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(SenseInput::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(SenseInput::Unsupported(format!("boolean `{v}`")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SenseInput::Unsupported(format!("integer `{v}`")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SenseInput::Unsupported(format!("integer `{v}`")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(SenseInput::Unsupported(format!("float `{v}`")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(SenseInput::Unsupported("null".to_owned()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        let mut foreign = None;
        while let Some(item) = seq.next_element::<Item>()? {
            match item {
                Item::Text(text) => items.push(text),
                Item::Other(kind) => foreign = foreign.or(Some(kind)),
            }
        }

        Ok(match foreign {
            Some(kind) => SenseInput::Unsupported(format!("sequence containing {kind}")),
            None => SenseInput::List(items),
        })
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut senses = BTreeMap::new();
        let mut foreign = None;
        while let Some((SenseNumber(number), item)) = map.next_entry::<SenseNumber, Item>()? {
            match item {
                Item::Text(text) => {
                    senses.insert(number, text);
                }
                Item::Other(kind) => foreign = foreign.or(Some(kind)),
            }
        }

        Ok(match foreign {
            Some(kind) => SenseInput::Unsupported(format!("mapping containing {kind}")),
            None => SenseInput::Map(senses),
        })
    }
}

/// One element of a sequence or mapping value: text, or the kind of
/// whatever else was found.
enum Item {
    Text(String),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ItemVisitor)
    }
}

struct ItemVisitor;

impl<'de> Visitor<'de> for ItemVisitor {
    type Value = Item;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Item::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Item::Text(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Item::Other("boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Item::Other("integer"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Item::Other("integer"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Item::Other("float"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Item::Other("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Item::Other("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Item::Other("nested sequence"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Item::Other("nested mapping"))
    }
}

/// Mapping key: an integer in YAML, an integer string in JSON.
struct SenseNumber(u32);

impl<'de> Deserialize<'de> for SenseNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(SenseNumberVisitor)
    }
}

struct SenseNumberVisitor;

impl Visitor<'_> for SenseNumberVisitor {
    type Value = SenseNumber;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sense number")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(SenseNumber)
            .map_err(|_| E::custom(format!("sense number out of range: {v}")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(SenseNumber)
            .map_err(|_| E::custom(format!("sense number out of range: {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim()
            .parse()
            .map(SenseNumber)
            .map_err(|_| E::custom(format!("invalid sense number: '{v}'")))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(u32, &str)]) -> BTreeMap<u32, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_owned())).collect()
    }

    #[test]
    fn normalize_single_string() {
        let senses = normalize(Some("god".into()), "source").unwrap().unwrap();
        assert_eq!(senses.into_inner(), map(&[(1, "god")]));
    }

    #[test]
    fn normalize_sequence_is_one_based() {
        let senses = normalize(Some(["God", "Linneas"].into()), "source")
            .unwrap()
            .unwrap();
        assert_eq!(senses.into_inner(), map(&[(1, "God"), (2, "Linneas")]));
    }

    #[test]
    fn normalize_mapping_passes_through() {
        let input = map(&[(2, "second"), (5, "fifth")]);
        let senses = normalize(Some(input.clone().into()), "reference")
            .unwrap()
            .unwrap();
        assert_eq!(senses.into_inner(), input);
    }

    #[test]
    fn normalize_absent_and_empty() {
        assert!(normalize(None, "source").unwrap().is_none());
        assert!(normalize(Some("".into()), "source").unwrap().is_none());
        assert!(normalize(Some("   ".into()), "source").unwrap().is_none());
        assert!(normalize(Some(Vec::<String>::new().into()), "source").unwrap().is_none());
        assert!(normalize(Some(BTreeMap::<u32, String>::new().into()), "source").unwrap().is_none());
    }

    #[test]
    fn normalize_unsupported_names_field() {
        let err = normalize(Some(SenseInput::Unsupported("integer `3`".into())), "reference")
            .unwrap_err();
        assert!(matches!(
            err,
            GlossaryError::TypeMismatch { field: "reference", .. }
        ));
        assert!(err.to_string().contains("reference"));
        assert!(err.is_validation());
    }

    #[test]
    fn push_appends_after_highest_number() {
        let mut senses = Senses::from(map(&[(1, "a"), (4, "d")]));
        assert_eq!(senses.push("e"), 5);
        assert_eq!(senses.get(5), Some("e"));

        let mut empty = Senses::new();
        assert_eq!(empty.push("first"), 1);
    }

    #[test]
    fn deserialize_shapes_from_json() {
        let text: SenseInput = serde_json::from_str(r#""one""#).unwrap();
        assert_eq!(text, SenseInput::Text("one".into()));

        let list: SenseInput = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(list, SenseInput::List(vec!["a".into(), "b".into()]));

        let keyed: SenseInput = serde_json::from_str(r#"{"1": "a", "2": "b"}"#).unwrap();
        assert_eq!(keyed, SenseInput::Map(map(&[(1, "a"), (2, "b")])));
    }

    #[test]
    fn deserialize_shapes_from_yaml() {
        let keyed: SenseInput = serde_yaml::from_str("1: a\n2: b\n").unwrap();
        assert_eq!(keyed, SenseInput::Map(map(&[(1, "a"), (2, "b")])));

        let list: SenseInput = serde_yaml::from_str("- a\n- b\n").unwrap();
        assert_eq!(list, SenseInput::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn deserialize_foreign_shapes_as_unsupported() {
        let number: SenseInput = serde_json::from_str("42").unwrap();
        assert!(matches!(number, SenseInput::Unsupported(_)));

        let flag: SenseInput = serde_json::from_str("true").unwrap();
        assert!(matches!(flag, SenseInput::Unsupported(_)));

        let mixed: SenseInput = serde_json::from_str(r#"["a", 1]"#).unwrap();
        assert_eq!(
            mixed,
            SenseInput::Unsupported("sequence containing integer".into())
        );

        let nested: SenseInput = serde_json::from_str(r#"{"1": ["a"]}"#).unwrap();
        assert_eq!(
            nested,
            SenseInput::Unsupported("mapping containing nested sequence".into())
        );
    }

    #[test]
    fn invalid_sense_number_is_rejected() {
        let result: Result<SenseInput, _> = serde_json::from_str(r#"{"one": "a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn senses_serialize_with_integer_keys_in_yaml() {
        let senses = Senses::from_iter(["a", "b"]);
        assert_eq!(serde_yaml::to_string(&senses).unwrap(), "1: a\n2: b\n");
        assert_eq!(
            serde_json::to_string(&senses).unwrap(),
            r#"{"1":"a","2":"b"}"#
        );
    }
}
