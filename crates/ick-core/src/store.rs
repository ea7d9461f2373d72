//! Per-component attribute store.
//!
//! Attributes are grouped in five categories which also fix the rendering
//! order: id, tab index, class list, style, then every other attribute sorted
//! by name.

use crate::attribute::{AttrValue, Attribute};
use crate::errors::AttributeError;
use crate::names::is_valid_name;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use std::fmt;

/// Sort key of a store entry. Variant order is the rendering order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrKey {
    Id,
    TabIndex,
    Class,
    Style,
    Other(String),
}

impl AttrKey {
    /// Resolve the key for an attribute name. Comparison is case-insensitive.
    pub fn for_name(name: &str) -> Result<Self, AttributeError> {
        let name = name.trim();
        let lower = name.to_lowercase();
        let key = match lower.as_str() {
            "id" => AttrKey::Id,
            "tabindex" => AttrKey::TabIndex,
            "class" => AttrKey::Class,
            "style" => AttrKey::Style,
            _ if is_valid_name(name) => AttrKey::Other(lower),
            _ => {
                return Err(AttributeError::InvalidName {
                    name: name.to_string(),
                })
            }
        };
        Ok(key)
    }

    /// Precedence category, 1 (id) to 5 (other).
    pub fn category(&self) -> u8 {
        match self {
            AttrKey::Id => 1,
            AttrKey::TabIndex => 2,
            AttrKey::Class => 3,
            AttrKey::Style => 4,
            AttrKey::Other(_) => 5,
        }
    }

    /// Name used when rendering.
    pub fn name(&self) -> &str {
        match self {
            AttrKey::Id => "id",
            AttrKey::TabIndex => "tabIndex",
            AttrKey::Class => "class",
            AttrKey::Style => "style",
            AttrKey::Other(name) => name,
        }
    }
}

/// Attributes owned by one component instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    scalars: BTreeMap<AttrKey, AttrValue>,
    classes: IndexSet<String>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute.
    ///
    /// With `overwrite` unset an existing value is kept, except for `class`
    /// where new tokens are always appended.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<AttrValue>,
        overwrite: bool,
    ) -> Result<(), AttributeError> {
        let key = AttrKey::for_name(name)?;
        let value = value.into();
        match key {
            AttrKey::Class => {
                if overwrite {
                    self.reset_classes(&value.as_text());
                } else {
                    self.add_classes(&value.as_text());
                }
            }
            key if !overwrite && self.scalars.contains_key(&key) => {}
            AttrKey::TabIndex => {
                let index = parse_tab_index(&value)?;
                self.scalars.insert(AttrKey::TabIndex, AttrValue::from(index));
            }
            key => {
                self.scalars.insert(key, value);
            }
        }
        Ok(())
    }

    /// Apply parsed attributes without overwriting existing values.
    pub fn merge(&mut self, attributes: &[Attribute]) -> Result<(), AttributeError> {
        for attr in attributes {
            self.set(&attr.name, attr.to_value(), false)?;
        }
        Ok(())
    }

    /// Remove an attribute. Returns whether something was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        match AttrKey::for_name(name) {
            Ok(AttrKey::Class) => {
                let had = !self.classes.is_empty();
                self.classes.clear();
                had
            }
            Ok(key) => self.scalars.remove(&key).is_some(),
            Err(_) => false,
        }
    }

    /// Flip a boolean attribute. Returns whether it is now present.
    pub fn toggle(&mut self, name: &str) -> Result<bool, AttributeError> {
        if self.contains(name) {
            self.remove(name);
            Ok(false)
        } else {
            self.set(name, AttrValue::Flag, true)?;
            Ok(self.contains(name))
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match AttrKey::for_name(name) {
            Ok(AttrKey::Class) => !self.classes.is_empty(),
            Ok(key) => self.scalars.contains_key(&key),
            Err(_) => false,
        }
    }

    /// Value of a scalar attribute. Use [`classes`](Self::classes) for the class list.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        AttrKey::for_name(name)
            .ok()
            .and_then(|key| self.scalars.get(&key))
    }

    /// Replace the class list with the whitespace separated tokens of `list`.
    pub fn reset_classes(&mut self, list: &str) {
        self.classes.clear();
        self.add_classes(list);
    }

    /// Append the tokens of `list` that are not already present.
    pub fn add_classes(&mut self, list: &str) {
        for class in list.split_whitespace() {
            if !self.classes.contains(class) {
                self.classes.insert(class.to_string());
            }
        }
    }

    /// Remove one class token. Does nothing if it is absent.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.shift_remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Class tokens in first-seen order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        match self.scalars.get(&AttrKey::Id) {
            Some(AttrValue::Text(id)) if !id.is_empty() => Some(id),
            _ => None,
        }
    }

    /// Set or overwrite the id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.scalars.insert(AttrKey::Id, AttrValue::Text(id.into()));
    }

    pub fn tab_index(&self) -> Option<i64> {
        match self.scalars.get(&AttrKey::TabIndex) {
            Some(AttrValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn set_tab_index(&mut self, index: i64) {
        self.scalars.insert(AttrKey::TabIndex, AttrValue::from(index));
    }

    pub fn style(&self) -> Option<&str> {
        match self.scalars.get(&AttrKey::Style) {
            Some(AttrValue::Text(style)) => Some(style),
            _ => None,
        }
    }

    pub fn set_style(&mut self, style: impl Into<String>) {
        self.scalars.insert(AttrKey::Style, AttrValue::Text(style.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.classes.is_empty()
    }

    /// Entries in rendering order, the class list joined with spaces.
    pub fn iter(&self) -> impl Iterator<Item = (AttrKey, AttrValue)> + '_ {
        let mut entries: Vec<(AttrKey, AttrValue)> = self
            .scalars
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !self.classes.is_empty() {
            let joined = self.classes().collect::<Vec<_>>().join(" ");
            entries.push((AttrKey::Class, AttrValue::Text(joined)));
        }
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries.into_iter()
    }
}

impl fmt::Display for AttributeStore {
    /// The rendered attribute list, without leading or trailing space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(key.name())?;
            if let Some(rendered) = value.render() {
                write!(f, "={rendered}")?;
            }
        }
        Ok(())
    }
}

/// A bare `tabindex` or an empty value means index 0.
fn parse_tab_index(value: &AttrValue) -> Result<i64, AttributeError> {
    let invalid = || AttributeError::InvalidTabIndex {
        value: value.as_text(),
    };
    match value {
        AttrValue::Flag => Ok(0),
        AttrValue::Integer(n) => Ok(*n),
        AttrValue::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => Ok(*n as i64),
        AttrValue::Text(s) if s.trim().is_empty() => Ok(0),
        AttrValue::Text(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        AttrValue::Number(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_order() {
        let mut store = AttributeStore::new();
        store.set("zeta", "z", false).unwrap();
        store.set("alpha", AttrValue::Flag, false).unwrap();
        store.set("style", "color=red;", false).unwrap();
        store.set("class", "b a", false).unwrap();
        store.set("tabindex", "1", false).unwrap();
        store.set("id", "x1", false).unwrap();
        assert_eq!(
            store.to_string(),
            r#"id="x1" tabIndex=1 class="b a" style="color=red;" alpha zeta="z""#
        );
    }

    #[test]
    fn test_no_overwrite_keeps_first_value() {
        let mut store = AttributeStore::new();
        store.set("tabIndex", "1", false).unwrap();
        store.set("TABINDEX", "2", false).unwrap();
        store.set("style", "a", false).unwrap();
        store.set("style", "b", false).unwrap();
        store.set("d", "first", false).unwrap();
        store.set("d", "second", false).unwrap();
        assert_eq!(store.tab_index(), Some(1));
        assert_eq!(store.style(), Some("a"));
        assert_eq!(store.get("d"), Some(&AttrValue::from("first")));

        store.set("style", "b", true).unwrap();
        assert_eq!(store.style(), Some("b"));
    }

    #[test]
    fn test_classes_are_additive() {
        let mut store = AttributeStore::new();
        store.set("class", "text", false).unwrap();
        store.set("class", "ts2a ts2b text", false).unwrap();
        store.add_classes("ick-x");
        assert_eq!(store.classes().collect::<Vec<_>>(), ["text", "ts2a", "ts2b", "ick-x"]);

        store.set("class", "only", true).unwrap();
        assert_eq!(store.classes().collect::<Vec<_>>(), ["only"]);
    }

    #[test]
    fn test_remove_class_keeps_order() {
        let mut store = AttributeStore::new();
        store.reset_classes("ts2c ts2a ts2b");
        store.remove_class("ts2c");
        store.remove_class("missing");
        store.add_classes("ts2a ts2d");
        assert_eq!(store.to_string(), r#"class="ts2a ts2b ts2d""#);
        assert!(store.has_class("ts2d"));
    }

    #[test]
    fn test_remove_and_toggle() {
        let mut store = AttributeStore::new();
        assert!(store.toggle("hidden").unwrap());
        assert_eq!(store.to_string(), "hidden");
        assert!(!store.toggle("hidden").unwrap());
        assert!(store.is_empty());

        store.set("a3", AttrValue::Flag, false).unwrap();
        assert!(store.remove("A3"));
        assert!(!store.remove("a3"));
    }

    #[test]
    fn test_tab_index_round_trips() {
        let mut store = AttributeStore::new();
        store.set("tabindex", " 7 ", false).unwrap();
        assert_eq!(store.tab_index(), Some(7));
        assert_eq!(store.to_string(), "tabIndex=7");

        let err = store.set("tabindex", "x", true).unwrap_err();
        assert_eq!(err, AttributeError::InvalidTabIndex { value: "x".to_string() });

        store.set("tabindex", "9007199254740993", true).unwrap();
        assert_eq!(store.tab_index(), Some(9_007_199_254_740_993));
        assert_eq!(store.to_string(), "tabIndex=9007199254740993");
    }

    #[test]
    fn test_bare_tab_index_is_zero() {
        let mut store = AttributeStore::new();
        store.set("tabindex", AttrValue::Flag, false).unwrap();
        assert_eq!(store.tab_index(), Some(0));
        assert_eq!(store.to_string(), "tabIndex=0");

        let mut store = AttributeStore::new();
        assert!(store.toggle("tabindex").unwrap());
        assert_eq!(store.tab_index(), Some(0));
        assert!(!store.toggle("tabindex").unwrap());
    }

    #[test]
    fn test_invalid_name() {
        let mut store = AttributeStore::new();
        assert!(matches!(
            store.set("1a", "x", false),
            Err(AttributeError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_key_categories() {
        assert_eq!(AttrKey::for_name(" ID ").unwrap(), AttrKey::Id);
        assert_eq!(AttrKey::for_name("Data-X").unwrap(), AttrKey::Other("data-x".into()));
        assert!(AttrKey::Style < AttrKey::Other("a".into()));
        assert_eq!(AttrKey::Class.category(), 3);
    }

    #[test]
    fn test_merge_does_not_overwrite() {
        let mut store = AttributeStore::new();
        store.set_id("forced");
        store.merge(&[
            Attribute::with_value("id", "other"),
            Attribute::with_value("class", "a"),
            Attribute::flag("a2"),
        ])
        .unwrap();
        assert_eq!(store.id(), Some("forced"));
        assert_eq!(store.to_string(), r#"id="forced" class="a" a2"#);
    }
}
