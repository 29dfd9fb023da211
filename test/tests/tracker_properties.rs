//! Property tests for the tracker's precedence and notification rules.

use proptest::prelude::*;
use theme_breakpoints_test::prelude::*;

/// Breakpoints with arbitrary min/max widths, declared in arbitrary order.
fn breakpoint_set() -> impl Strategy<Value = BreakpointSet> {
    prop::collection::vec((any::<bool>(), 0u32..2000), 1..8).prop_map(|specs| {
        let definitions = specs.into_iter().enumerate().map(|(index, (min, px))| {
            let feature = if min { "min-width" } else { "max-width" };
            BreakpointDefinition::new(format!("bp{index}"), format!("({feature}: {px}px)"))
        });
        BreakpointSet::try_from_definitions(definitions).unwrap()
    })
}

/// Last definition in declaration order whose query matches `width`.
fn expected_winner(set: &BreakpointSet, width: f64) -> Option<String> {
    set.iter()
        .filter(|definition| {
            media_query::MediaQuery::parse(&definition.media_query)
                .unwrap()
                .matches(media_query::ViewportSize::new(width, 600.0))
        })
        .last()
        .map(|definition| definition.id.clone())
}

proptest! {
    #[test]
    fn initial_breakpoint_is_last_match(set in breakpoint_set(), width in 0u32..2500) {
        let width = f64::from(width);
        let mut harness = TestHarness::new(width, 600.0);
        let expected = expected_winner(&set, width);

        harness.track(set);

        prop_assert_eq!(harness.current_id(), expected);
        prop_assert!(!harness.changes().changed());
    }

    #[test]
    fn notifies_iff_winner_changes(
        set in breakpoint_set(),
        start in 0u32..2500,
        widths in prop::collection::vec(0u32..2500, 1..20),
    ) {
        let mut harness = TestHarness::new(f64::from(start), 600.0);
        let mut current = expected_winner(&set, f64::from(start));
        let mut expected_ids = Vec::new();
        harness.track(set.clone());

        for width in widths {
            let width = f64::from(width);
            harness.resize_width(width);
            if let Some(winner) = expected_winner(&set, width) {
                if current.as_ref() != Some(&winner) {
                    expected_ids.push(winner.clone());
                    current = Some(winner);
                }
            }
            prop_assert_eq!(harness.current_id(), current.clone());
        }

        let ids = harness.changes().ids();
        prop_assert_eq!(&ids, &expected_ids);
        prop_assert!(ids.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn empty_set_never_notifies(widths in prop::collection::vec(0u32..5000, 0..20)) {
        let mut harness = TestHarness::new(500.0, 600.0);
        harness.track(BreakpointSet::new());

        for width in widths {
            harness.resize_width(f64::from(width));
        }

        prop_assert_eq!(harness.current_id(), None);
        prop_assert!(!harness.changes().changed());
    }
}
