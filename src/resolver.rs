//! Server-side lookup of the breakpoints that apply to a theme.
//!
//! A theme uses the breakpoint group registered under its own name. When that
//! group is empty the resolver falls back to the groups of its base themes,
//! nearest ancestor first, and takes the first non-empty group whole. Groups
//! are never merged.

mod registry;

use std::rc::Rc;

pub use registry::{StaticRegistry, StaticTheme};

use crate::{
    breakpoint::{BreakpointDefinition, BreakpointSet},
    error::{Error, RegistryError, Result},
};

/// A theme as the theme registry describes it.
pub trait Theme {
    fn name(&self) -> &str;

    /// Names of the themes this theme extends, nearest ancestor first.
    fn base_themes(&self) -> Result<Vec<String>, RegistryError>;
}

/// Resolves theme identities.
pub trait ThemeRegistry {
    fn active_theme(&self) -> Result<Rc<dyn Theme>, RegistryError>;

    fn theme_by_name(&self, name: &str) -> Result<Rc<dyn Theme>, RegistryError>;
}

/// Holds breakpoint groups, one per theme name.
pub trait BreakpointRegistry {
    /// Returns the breakpoints registered under `group`, ids prefixed with
    /// `"<group>."`.
    fn breakpoints_by_group(&self, group: &str) -> Result<Vec<BreakpointDefinition>, RegistryError>;
}

impl<T: ThemeRegistry + ?Sized> ThemeRegistry for Rc<T> {
    fn active_theme(&self) -> Result<Rc<dyn Theme>, RegistryError> {
        (**self).active_theme()
    }

    fn theme_by_name(&self, name: &str) -> Result<Rc<dyn Theme>, RegistryError> {
        (**self).theme_by_name(name)
    }
}

impl<T: ThemeRegistry + ?Sized> ThemeRegistry for &T {
    fn active_theme(&self) -> Result<Rc<dyn Theme>, RegistryError> {
        (**self).active_theme()
    }

    fn theme_by_name(&self, name: &str) -> Result<Rc<dyn Theme>, RegistryError> {
        (**self).theme_by_name(name)
    }
}

impl<B: BreakpointRegistry + ?Sized> BreakpointRegistry for Rc<B> {
    fn breakpoints_by_group(&self, group: &str) -> Result<Vec<BreakpointDefinition>, RegistryError> {
        (**self).breakpoints_by_group(group)
    }
}

impl<B: BreakpointRegistry + ?Sized> BreakpointRegistry for &B {
    fn breakpoints_by_group(&self, group: &str) -> Result<Vec<BreakpointDefinition>, RegistryError> {
        (**self).breakpoints_by_group(group)
    }
}

pub struct BreakpointResolver<T, B> {
    themes: T,
    breakpoints: B,
}

impl<T: ThemeRegistry, B: BreakpointRegistry> BreakpointResolver<T, B> {
    pub fn new(themes: T, breakpoints: B) -> Self {
        Self {
            themes,
            breakpoints,
        }
    }

    /// Breakpoints for the theme of the current request.
    pub fn breakpoints_for_active_theme(&self) -> Result<BreakpointSet> {
        let theme = self.themes.active_theme().map_err(|source| Error::Theme {
            name: "<active>".to_string(),
            source,
        })?;
        Ok(self.breakpoints_for_theme(theme.as_ref()))
    }

    pub fn breakpoints_for_theme_name(&self, name: &str) -> Result<BreakpointSet> {
        let theme = self
            .themes
            .theme_by_name(name)
            .map_err(|source| Error::Theme {
                name: name.to_string(),
                source,
            })?;
        Ok(self.breakpoints_for_theme(theme.as_ref()))
    }

    /// Breakpoints for `theme`, falling back to its base themes.
    ///
    /// Registry failures are logged and skipped; an empty set means no
    /// candidate had breakpoints.
    pub fn breakpoints_for_theme(&self, theme: &dyn Theme) -> BreakpointSet {
        let base_themes = theme.base_themes().unwrap_or_else(|err| {
            tracing::warn!(theme = theme.name(), %err, "base theme lookup failed; using the theme alone");
            Vec::new()
        });

        let candidates = std::iter::once(theme.name()).chain(base_themes.iter().map(String::as_str));
        for candidate in candidates {
            match self.breakpoints.breakpoints_by_group(candidate) {
                Ok(group) if !group.is_empty() => {
                    tracing::debug!(
                        theme = theme.name(),
                        group = candidate,
                        count = group.len(),
                        "resolved breakpoints"
                    );
                    return strip_group_prefix(candidate, group);
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(group = candidate, %err, "breakpoint group lookup failed; trying next theme");
                }
            }
        }

        BreakpointSet::new()
    }
}

fn strip_group_prefix(group: &str, definitions: Vec<BreakpointDefinition>) -> BreakpointSet {
    let prefix = format!("{group}.");
    let mut set = BreakpointSet::new();
    for mut definition in definitions {
        if let Some(id) = definition.id.strip_prefix(&prefix) {
            definition.id = id.to_string();
        }
        definition.group.get_or_insert_with(|| group.to_string());
        if let Some(replaced) = set.insert(definition) {
            tracing::warn!(group, id = %replaced.id, "breakpoint id repeats after prefix removal; keeping the later one");
        }
    }
    set
}
