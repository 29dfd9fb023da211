//! Tests for handing breakpoints from the resolver to the tracker through the
//! page settings payload.

use std::rc::Rc;

use serde_json::{Map, Value, json};
use theme_breakpoints_test::prelude::*;

fn resolved_settings() -> Map<String, Value> {
    let registry = Rc::new(nested_theme_registry());
    let resolver = BreakpointResolver::new(registry.clone(), registry);
    let mut settings = Map::new();
    resolver
        .breakpoints_for_active_theme()
        .unwrap()
        .attach_to_settings(&mut settings, "theme_breakpoints")
        .unwrap();
    settings
}

#[test]
fn test_payload_tracker_matches_direct_tracker() {
    let registry = Rc::new(nested_theme_registry());
    let resolver = BreakpointResolver::new(registry.clone(), registry);
    let set = resolver.breakpoints_for_theme_name("site").unwrap();

    for width in [0.0, 559.0, 560.0, 851.0, 2000.0] {
        let mut direct = TestHarness::new(width, 800.0);
        direct.track(set.clone());

        let mut decoded = TestHarness::new(width, 800.0);
        decoded.track_settings(&resolved_settings()).unwrap();

        assert_eq!(decoded.current_id(), direct.current_id(), "width {width}");
        assert_eq!(decoded.tracker().breakpoints(), direct.tracker().breakpoints());
    }
}

#[test]
fn test_payload_keeps_metadata() {
    let settings = resolved_settings();
    let payload = settings["theme_breakpoints"].as_str().unwrap();
    let raw: Value = serde_json::from_str(payload).unwrap();

    assert_eq!(
        raw[1],
        json!({
            "id": "narrow",
            "mediaQuery": "all and (min-width: 560px)",
            "label": "Narrow",
            "weight": 1,
            "multipliers": ["1x", "2x"],
            "group": "base"
        })
    );
}

#[test]
fn test_missing_payload_gives_permanent_none() {
    let mut harness = TestHarness::new(1000.0, 800.0);
    harness.track_settings(&Map::new()).unwrap();

    harness.resize_width(100.0);
    harness.resize_width(3000.0);

    assert_eq!(harness.current_id(), None);
    assert!(!harness.changes().changed());
}

#[test]
fn test_malformed_payload_is_fatal() {
    let mut harness = TestHarness::new(1000.0, 800.0);
    let mut settings = Map::new();
    settings.insert(
        "theme_breakpoints".to_string(),
        Value::String("[{\"id\": \"mobile\",".to_string()),
    );

    assert!(matches!(
        harness.track_settings(&settings),
        Err(Error::Payload(_))
    ));
}

#[test]
fn test_custom_settings_key() {
    let config = TrackerConfig::default()
        .with_settings_key("breakpoints")
        .with_query_policy(QueryPolicy::Verbatim);
    let mut settings = Map::new();
    definitions(&[("all", ""), ("big", "(min-width: 900px)")])
        .attach_to_settings(&mut settings, &config.settings_key)
        .unwrap();
    let mut harness = TestHarness::with_config(1000.0, 800.0, config);

    harness.track_settings(&settings).unwrap();

    assert_eq!(harness.current_id().as_deref(), Some("big"));
}
