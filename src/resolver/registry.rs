use std::rc::Rc;

use indexmap::IndexMap;
use serde::Deserialize;

use super::{BreakpointRegistry, Theme, ThemeRegistry};
use crate::{breakpoint::BreakpointDefinition, error::RegistryError};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ThemeEntry {
    base_theme: Option<String>,
}

/// In-memory theme and breakpoint registry.
///
/// Can be built in code or loaded from JSON:
///
/// ```
/// use theme_breakpoints::resolver::{BreakpointResolver, StaticRegistry};
/// use std::rc::Rc;
///
/// let registry = Rc::new(StaticRegistry::from_json(r#"{
///     "active": "sub",
///     "themes": { "base": {}, "sub": { "baseTheme": "base" } },
///     "breakpoints": {
///         "base": [
///             { "id": "base.mobile", "mediaQuery": "" },
///             { "id": "base.wide", "mediaQuery": "(min-width: 851px)" }
///         ]
///     }
/// }"#).unwrap());
///
/// let resolver = BreakpointResolver::new(registry.clone(), registry);
/// let set = resolver.breakpoints_for_active_theme().unwrap();
/// assert_eq!(set.ids().collect::<Vec<_>>(), ["mobile", "wide"]);
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaticRegistry {
    active: Option<String>,
    themes: IndexMap<String, ThemeEntry>,
    breakpoints: IndexMap<String, Vec<BreakpointDefinition>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_theme(mut self, name: impl Into<String>, base_theme: Option<&str>) -> Self {
        self.themes.insert(
            name.into(),
            ThemeEntry {
                base_theme: base_theme.map(str::to_string),
            },
        );
        self
    }

    pub fn with_active_theme(mut self, name: impl Into<String>) -> Self {
        self.active = Some(name.into());
        self
    }

    /// Registers a breakpoint group. Ids are expected to carry the
    /// `"<group>."` prefix.
    pub fn with_group(
        mut self,
        group: impl Into<String>,
        definitions: impl IntoIterator<Item = BreakpointDefinition>,
    ) -> Self {
        self.breakpoints
            .insert(group.into(), definitions.into_iter().collect());
        self
    }

    /// Walks the base theme chain of `name`, nearest ancestor first.
    fn ancestors(&self, name: &str) -> Result<Vec<String>, RegistryError> {
        let mut ancestors: Vec<String> = Vec::new();
        let mut current = name;
        while let Some(base) = self
            .themes
            .get(current)
            .and_then(|entry| entry.base_theme.as_deref())
        {
            if base == name || ancestors.iter().any(|seen| seen == base) {
                return Err(RegistryError::Other(format!(
                    "base theme cycle through `{base}`"
                )));
            }
            if !self.themes.contains_key(base) {
                return Err(RegistryError::UnknownTheme(base.to_string()));
            }
            ancestors.push(base.to_string());
            current = base;
        }
        Ok(ancestors)
    }
}

impl ThemeRegistry for StaticRegistry {
    fn active_theme(&self) -> Result<Rc<dyn Theme>, RegistryError> {
        let name = self.active.as_deref().ok_or(RegistryError::NoActiveTheme)?;
        self.theme_by_name(name)
    }

    fn theme_by_name(&self, name: &str) -> Result<Rc<dyn Theme>, RegistryError> {
        if !self.themes.contains_key(name) {
            return Err(RegistryError::UnknownTheme(name.to_string()));
        }
        Ok(Rc::new(StaticTheme {
            name: name.to_string(),
            base_themes: self.ancestors(name),
        }))
    }
}

impl BreakpointRegistry for StaticRegistry {
    /// Unknown groups are empty. Definitions come back sorted by weight; a
    /// missing weight counts as zero and ties keep registration order.
    fn breakpoints_by_group(&self, group: &str) -> Result<Vec<BreakpointDefinition>, RegistryError> {
        let mut definitions = self.breakpoints.get(group).cloned().unwrap_or_default();
        definitions.sort_by_key(|definition| definition.weight.unwrap_or(0));
        Ok(definitions)
    }
}

/// Theme handed out by [`StaticRegistry`].
#[derive(Clone, Debug)]
pub struct StaticTheme {
    name: String,
    base_themes: Result<Vec<String>, RegistryError>,
}

impl StaticTheme {
    pub fn new(name: impl Into<String>, base_themes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            base_themes: Ok(base_themes),
        }
    }
}

impl Theme for StaticTheme {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_themes(&self) -> Result<Vec<String>, RegistryError> {
        self.base_themes.clone()
    }
}
