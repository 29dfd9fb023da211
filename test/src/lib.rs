//! Testing utilities for theme_breakpoints.
//!
//! This crate provides a harness that wires a [`BreakpointTracker`] to a
//! [`HeadlessViewport`] and records every change notification.
//!
//! # Example
//!
//! ```rust
//! use theme_breakpoints_test::prelude::*;
//!
//! let mut harness = TestHarness::new(400.0, 800.0);
//! harness.track(definitions(&[
//!     ("mobile", "(min-width: 0px)"),
//!     ("wide", "(min-width: 1024px)"),
//! ]));
//!
//! harness.resize_width(1280.0);
//!
//! assert_eq!(harness.changes().ids(), ["wide"]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use theme_breakpoints::headless::HeadlessViewport;
use theme_breakpoints::resolver::StaticRegistry;
use theme_breakpoints::{
    BreakpointChanged, BreakpointDefinition, BreakpointSet, BreakpointTracker, EventBus,
    QueryPolicy, TrackerConfig,
};

/// Prelude module for convenient imports in tests.
pub mod prelude {
    pub use super::{ChangeTracker, TestHarness, definitions, nested_theme_registry};
    pub use theme_breakpoints::headless::HeadlessViewport;
    pub use theme_breakpoints::resolver::{BreakpointResolver, StaticRegistry, StaticTheme};
    pub use theme_breakpoints::*;
}

/// Records breakpoint change notifications.
///
/// # Example
///
/// ```rust
/// use theme_breakpoints::{BreakpointChanged, EventBus};
/// use theme_breakpoints_test::ChangeTracker;
///
/// let bus = EventBus::<BreakpointChanged>::new();
/// let changes = ChangeTracker::new();
/// changes.listen(&bus, "themeBreakpoint:changed");
/// assert!(!changes.changed());
/// ```
#[derive(Clone, Default)]
pub struct ChangeTracker {
    events: Rc<RefCell<Vec<BreakpointChanged>>>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `topic` on `bus`.
    pub fn listen(&self, bus: &EventBus<BreakpointChanged>, topic: &str) {
        let events = self.events.clone();
        bus.subscribe(topic, move |event: &BreakpointChanged| {
            events.borrow_mut().push(event.clone());
        });
    }

    pub fn changed(&self) -> bool {
        !self.events.borrow().is_empty()
    }

    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Ids of the breakpoints that became current, in order.
    pub fn ids(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .map(|event| event.id().to_string())
            .collect()
    }

    pub fn events(&self) -> Vec<BreakpointChanged> {
        self.events.borrow().clone()
    }

    pub fn reset(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Headless viewport, event bus and tracker wired together.
pub struct TestHarness {
    viewport: HeadlessViewport,
    bus: EventBus<BreakpointChanged>,
    changes: ChangeTracker,
    config: TrackerConfig,
    tracker: Option<BreakpointTracker>,
}

impl TestHarness {
    /// A harness that watches queries verbatim.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_config(
            width,
            height,
            TrackerConfig::default().with_query_policy(QueryPolicy::Verbatim),
        )
    }

    pub fn with_config(width: f64, height: f64, config: TrackerConfig) -> Self {
        let bus = EventBus::new();
        let changes = ChangeTracker::new();
        changes.listen(&bus, &config.event_name);
        Self {
            viewport: HeadlessViewport::new(width, height),
            bus,
            changes,
            config,
            tracker: None,
        }
    }

    /// Start tracking `breakpoints`, replacing any previous tracker.
    ///
    /// # Panics
    ///
    /// Panics if the viewport refuses a query.
    pub fn track(&mut self, breakpoints: BreakpointSet) -> &BreakpointTracker {
        let tracker = BreakpointTracker::new(
            breakpoints,
            &self.viewport,
            Rc::new(self.bus.clone()),
            &self.config,
        )
        .expect("tracker construction");
        self.tracker.insert(tracker)
    }

    /// Start tracking from page settings.
    pub fn track_settings(
        &mut self,
        settings: &serde_json::Map<String, serde_json::Value>,
    ) -> theme_breakpoints::Result<&BreakpointTracker> {
        let tracker = BreakpointTracker::from_settings(
            settings,
            &self.viewport,
            Rc::new(self.bus.clone()),
            &self.config,
        )?;
        Ok(&*self.tracker.insert(tracker))
    }

    /// # Panics
    ///
    /// Panics if nothing is being tracked yet.
    pub fn tracker(&self) -> &BreakpointTracker {
        self.tracker.as_ref().expect("call track() first")
    }

    pub fn current_id(&self) -> Option<String> {
        self.tracker().current_breakpoint_id()
    }

    pub fn viewport(&self) -> &HeadlessViewport {
        &self.viewport
    }

    pub fn bus(&self) -> &EventBus<BreakpointChanged> {
        &self.bus
    }

    pub fn changes(&self) -> &ChangeTracker {
        &self.changes
    }

    pub fn resize(&self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn resize_width(&self, width: f64) {
        let height = self.viewport.size().height;
        self.viewport.resize(width, height);
    }

    /// Drop the tracker, releasing its watchers.
    pub fn stop(&mut self) {
        self.tracker = None;
    }
}

/// Build a set from `(id, media query)` pairs.
///
/// # Panics
///
/// Panics on repeated ids.
pub fn definitions(pairs: &[(&str, &str)]) -> BreakpointSet {
    BreakpointSet::try_from_definitions(
        pairs
            .iter()
            .map(|(id, query)| BreakpointDefinition::new(*id, *query)),
    )
    .expect("unique breakpoint ids")
}

/// Registry with a three-level theme chain. Only `base` declares breakpoints.
///
/// `site` extends `starter`, which extends `base`; `admin` stands alone with
/// its own group, and `bare` has no breakpoints anywhere.
pub fn nested_theme_registry() -> StaticRegistry {
    StaticRegistry::new()
        .with_theme("base", None)
        .with_theme("starter", Some("base"))
        .with_theme("site", Some("starter"))
        .with_theme("admin", None)
        .with_theme("bare", None)
        .with_active_theme("site")
        .with_group(
            "base",
            [
                BreakpointDefinition::new("base.mobile", "all and (min-width: 0px)")
                    .label("Mobile")
                    .weight(0)
                    .multipliers(["1x"]),
                BreakpointDefinition::new("base.narrow", "all and (min-width: 560px)")
                    .label("Narrow")
                    .weight(1)
                    .multipliers(["1x", "2x"]),
                BreakpointDefinition::new("base.wide", "all and (min-width: 851px)")
                    .label("Wide")
                    .weight(2)
                    .multipliers(["1x", "2x"]),
            ],
        )
        .with_group(
            "admin",
            [BreakpointDefinition::new("admin.desk", "screen and (min-width: 1024px)")],
        )
}
