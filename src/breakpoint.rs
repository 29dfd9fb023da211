//! Breakpoint definitions and ordered breakpoint sets.
//!
//! A [`BreakpointSet`] keeps the declaration order of its definitions. That
//! order is the precedence the tracker uses when more than one breakpoint
//! matches: the last matching definition wins.

use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One named responsive threshold.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointDefinition {
    pub id: String,
    pub media_query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub multipliers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl BreakpointDefinition {
    pub fn new(id: impl Into<String>, media_query: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            media_query: media_query.into(),
            ..Default::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn multipliers<I, S>(mut self, multipliers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multipliers = multipliers.into_iter().map(Into::into).collect();
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// An ordered sequence of breakpoint definitions, unique by id.
///
/// Entries are shared behind [`Rc`] so the tracker can hand out the exact
/// definition it holds instead of a copy.
#[derive(Clone, Debug, Default)]
pub struct BreakpointSet {
    entries: IndexMap<String, Rc<BreakpointDefinition>>,
}

impl BreakpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from definitions in declaration order.
    ///
    /// Fails on the first repeated id.
    pub fn try_from_definitions<I>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = BreakpointDefinition>,
    {
        let mut set = Self::new();
        for definition in definitions {
            if set.entries.contains_key(&definition.id) {
                return Err(Error::DuplicateBreakpoint { id: definition.id });
            }
            set.entries
                .insert(definition.id.clone(), Rc::new(definition));
        }
        Ok(set)
    }

    /// Inserts a definition, replacing any definition with the same id in place.
    ///
    /// Returns the replaced definition, if any. A replacement keeps the position
    /// of the replaced entry.
    pub fn insert(&mut self, definition: BreakpointDefinition) -> Option<Rc<BreakpointDefinition>> {
        self.entries
            .insert(definition.id.clone(), Rc::new(definition))
    }

    pub fn get(&self, id: &str) -> Option<&Rc<BreakpointDefinition>> {
        self.entries.get(id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Rc<BreakpointDefinition>> {
        self.entries.get_index(index).map(|(_, definition)| definition)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Rc<BreakpointDefinition>> {
        self.entries.values()
    }

    /// Clones the definitions out of the set, in order.
    pub fn to_definitions(&self) -> Vec<BreakpointDefinition> {
        self.iter().map(|definition| (**definition).clone()).collect()
    }
}

impl<'a> IntoIterator for &'a BreakpointSet {
    type Item = &'a Rc<BreakpointDefinition>;
    type IntoIter = indexmap::map::Values<'a, String, Rc<BreakpointDefinition>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

impl PartialEq for BreakpointSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| left == right)
    }
}

impl Eq for BreakpointSet {}
