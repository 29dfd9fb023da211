//! Tests for resolving a theme's breakpoints through its base themes.

use std::rc::Rc;

use theme_breakpoints_test::prelude::*;

fn resolver() -> BreakpointResolver<Rc<StaticRegistry>, Rc<StaticRegistry>> {
    let registry = Rc::new(nested_theme_registry());
    BreakpointResolver::new(registry.clone(), registry)
}

#[test]
fn test_sub_theme_uses_base_group_with_base_prefix_removed() {
    let registry = Rc::new(
        StaticRegistry::new()
            .with_theme("base", None)
            .with_theme("sub", Some("base"))
            .with_group(
                "base",
                [
                    BreakpointDefinition::new("base.mobile", ""),
                    BreakpointDefinition::new("base.desktop", "(min-width: 1024px)"),
                ],
            ),
    );
    let resolver = BreakpointResolver::new(registry.clone(), registry);

    let set = resolver.breakpoints_for_theme_name("sub").unwrap();

    assert_eq!(set.ids().collect::<Vec<_>>(), ["mobile", "desktop"]);
    assert_eq!(set.get("mobile").unwrap().media_query, "");
    assert_eq!(set.get("desktop").unwrap().media_query, "(min-width: 1024px)");
}

#[test]
fn test_theme_without_ancestors_or_breakpoints_is_empty() {
    let registry = Rc::new(StaticRegistry::new().with_theme("x", None));
    let resolver = BreakpointResolver::new(registry.clone(), registry);

    assert!(resolver.breakpoints_for_theme_name("x").unwrap().is_empty());
}

#[test]
fn test_two_levels_of_inheritance() {
    let set = resolver().breakpoints_for_theme_name("site").unwrap();

    assert_eq!(set.ids().collect::<Vec<_>>(), ["mobile", "narrow", "wide"]);
    let wide = set.get("wide").unwrap();
    assert_eq!(wide.label.as_deref(), Some("Wide"));
    assert_eq!(wide.multipliers, ["1x", "2x"]);
    assert_eq!(wide.group.as_deref(), Some("base"));
}

#[test]
fn test_active_theme_matches_name_lookup() {
    let resolver = resolver();

    assert_eq!(
        resolver.breakpoints_for_active_theme().unwrap(),
        resolver.breakpoints_for_theme_name("site").unwrap()
    );
}

#[test]
fn test_standalone_theme_uses_its_own_group() {
    let set = resolver().breakpoints_for_theme_name("admin").unwrap();

    assert_eq!(set.ids().collect::<Vec<_>>(), ["desk"]);
}

#[test]
fn test_bare_theme_has_no_breakpoints() {
    assert!(resolver().breakpoints_for_theme_name("bare").unwrap().is_empty());
}

#[test]
fn test_explicit_theme_object() {
    let theme = StaticTheme::new("custom", vec!["starter".to_string(), "base".to_string()]);

    let set = resolver().breakpoints_for_theme(&theme);

    assert_eq!(set.len(), 3);
}

#[test]
fn test_unknown_theme_name_is_reported() {
    let err = resolver().breakpoints_for_theme_name("nope").unwrap_err();

    assert!(matches!(err, Error::Theme { ref name, .. } if name == "nope"));
    assert_eq!(err.to_string(), "theme `nope` could not be resolved: unknown theme `nope`");
}
