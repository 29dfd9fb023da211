//! Tracks which breakpoint is active as the viewport changes.
//!
//! The tracker keeps one watcher per breakpoint. Whenever any watcher flips,
//! it scans the breakpoints in declaration order and the *last* one whose
//! watcher matches becomes the candidate. A notification goes out only when
//! the candidate differs from the current breakpoint; a scan with no match
//! leaves the current breakpoint in place.
//!
//! # Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use theme_breakpoints::{
//!     BreakpointChanged, BreakpointDefinition, BreakpointSet, BreakpointTracker, EventBus,
//!     QueryPolicy, TrackerConfig, headless::HeadlessViewport,
//! };
//!
//! let set = BreakpointSet::try_from_definitions([
//!     BreakpointDefinition::new("mobile", "(min-width: 0px)"),
//!     BreakpointDefinition::new("wide", "(min-width: 1024px)"),
//! ])
//! .unwrap();
//!
//! let viewport = HeadlessViewport::new(400.0, 800.0);
//! let bus = EventBus::<BreakpointChanged>::new();
//! let config = TrackerConfig::default().with_query_policy(QueryPolicy::Verbatim);
//! let tracker = BreakpointTracker::new(set, &viewport, Rc::new(bus.clone()), &config).unwrap();
//! assert_eq!(tracker.current_breakpoint_id().as_deref(), Some("mobile"));
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! bus.subscribe(tracker.event_name(), {
//!     let seen = seen.clone();
//!     move |event: &BreakpointChanged| seen.borrow_mut().push(event.id().to_string())
//! });
//!
//! viewport.resize(1280.0, 800.0);
//! assert_eq!(*seen.borrow(), ["wide"]);
//! ```

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::{
    breakpoint::{BreakpointDefinition, BreakpointSet},
    config::TrackerConfig,
    error::Result,
    event::{BreakpointChanged, NotificationChannel},
    viewport::{ListenerId, MatchMedia, MediaQueryList, MediaQueryListener},
};

struct Watcher {
    list: Rc<dyn MediaQueryList>,
    listener: ListenerId,
}

struct TrackerState {
    breakpoints: BreakpointSet,
    /// Parallel to `breakpoints`. Emptied on teardown.
    watchers: RefCell<SmallVec<[Watcher; 8]>>,
    current: RefCell<Option<Rc<BreakpointDefinition>>>,
    channel: Rc<dyn NotificationChannel>,
    event_name: String,
}

impl TrackerState {
    /// Last matching breakpoint in declaration order.
    fn evaluate(&self) -> Option<Rc<BreakpointDefinition>> {
        let watchers = self.watchers.borrow();
        let mut candidate = None;
        for (watcher, definition) in watchers.iter().zip(self.breakpoints.iter()) {
            if watcher.list.matches() {
                candidate = Some(definition);
            }
        }
        candidate.cloned()
    }

    fn handle_change(&self) {
        let Some(candidate) = self.evaluate() else {
            tracing::trace!("no breakpoint matches; keeping the current one");
            return;
        };

        let previous = {
            let mut current = self.current.borrow_mut();
            if current
                .as_ref()
                .is_some_and(|current| Rc::ptr_eq(current, &candidate))
            {
                tracing::trace!(breakpoint = %candidate.id, "breakpoint unchanged");
                return;
            }
            current.replace(candidate.clone())
        };

        tracing::debug!(
            breakpoint = %candidate.id,
            previous = previous.as_ref().map(|previous| previous.id.as_str()),
            "breakpoint changed"
        );
        self.channel.trigger(
            &self.event_name,
            &BreakpointChanged {
                breakpoint: candidate,
                previous,
            },
        );
    }

    fn release_watchers(&self) {
        let watchers = std::mem::take(&mut *self.watchers.borrow_mut());
        for watcher in watchers {
            watcher.list.remove_listener(watcher.listener);
        }
    }
}

/// Owns the live breakpoint watchers and the current breakpoint.
///
/// Watchers are released when the tracker is torn down or dropped.
pub struct BreakpointTracker {
    state: Rc<TrackerState>,
    /// The callback registered on every watcher.
    handler: MediaQueryListener,
}

impl BreakpointTracker {
    /// Registers one watcher per breakpoint and computes the initial
    /// breakpoint. No notification is sent for the initial value.
    ///
    /// Fails if the viewport refuses any query; watchers registered before the
    /// failure are released.
    pub fn new(
        breakpoints: BreakpointSet,
        viewport: &dyn MatchMedia,
        channel: Rc<dyn NotificationChannel>,
        config: &TrackerConfig,
    ) -> Result<Self> {
        let state = Rc::new(TrackerState {
            breakpoints,
            watchers: RefCell::new(SmallVec::new()),
            current: RefCell::new(None),
            channel,
            event_name: config.event_name.clone(),
        });

        let handler: MediaQueryListener = {
            let state: Weak<TrackerState> = Rc::downgrade(&state);
            Rc::new(move |_matches: bool| {
                if let Some(state) = state.upgrade() {
                    state.handle_change();
                }
            })
        };

        let tracker = Self { state, handler };

        for definition in tracker.state.breakpoints.iter() {
            let query = config.query_policy.normalize(&definition.media_query);
            let list = viewport.match_media(query)?;
            let listener = list.add_listener(tracker.handler.clone());
            tracker
                .state
                .watchers
                .borrow_mut()
                .push(Watcher { list, listener });
        }

        let initial = tracker.state.evaluate();
        tracing::debug!(
            breakpoints = tracker.state.breakpoints.len(),
            initial = initial.as_ref().map(|initial| initial.id.as_str()),
            "breakpoint tracker started"
        );
        *tracker.state.current.borrow_mut() = initial;

        Ok(tracker)
    }

    /// Builds a tracker from a JSON payload string.
    pub fn from_payload(
        payload: &str,
        viewport: &dyn MatchMedia,
        channel: Rc<dyn NotificationChannel>,
        config: &TrackerConfig,
    ) -> Result<Self> {
        Self::new(BreakpointSet::from_payload(payload)?, viewport, channel, config)
    }

    /// Builds a tracker from the page settings entry named by
    /// [`TrackerConfig::settings_key`].
    ///
    /// An absent entry gives a tracker with no breakpoints, which stays at
    /// `None` forever.
    pub fn from_settings(
        settings: &Map<String, Value>,
        viewport: &dyn MatchMedia,
        channel: Rc<dyn NotificationChannel>,
        config: &TrackerConfig,
    ) -> Result<Self> {
        let breakpoints = BreakpointSet::from_settings(settings, &config.settings_key)?
            .unwrap_or_else(|| {
                tracing::debug!(key = %config.settings_key, "no breakpoint payload in settings");
                BreakpointSet::new()
            });
        Self::new(breakpoints, viewport, channel, config)
    }

    /// The breakpoint currently considered active.
    ///
    /// The returned definition is the one held in [`Self::breakpoints`].
    pub fn current_breakpoint(&self) -> Option<Rc<BreakpointDefinition>> {
        self.state.current.borrow().clone()
    }

    pub fn current_breakpoint_id(&self) -> Option<String> {
        self.state
            .current
            .borrow()
            .as_ref()
            .map(|current| current.id.clone())
    }

    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.state.breakpoints
    }

    pub fn event_name(&self) -> &str {
        &self.state.event_name
    }

    /// Number of registered watchers; zero after teardown.
    pub fn watcher_count(&self) -> usize {
        self.state.watchers.borrow().len()
    }

    /// Unregisters every watcher. The current breakpoint is kept but never
    /// changes again. Calling this more than once is harmless.
    pub fn teardown(&self) {
        if self.watcher_count() > 0 {
            tracing::debug!(watchers = self.watcher_count(), "breakpoint tracker torn down");
        }
        self.state.release_watchers();
    }
}

impl Drop for BreakpointTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for BreakpointTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BreakpointTracker")
            .field("breakpoints", &self.state.breakpoints.ids().collect::<Vec<_>>())
            .field("current", &self.current_breakpoint_id())
            .field("watchers", &self.watcher_count())
            .field("event_name", &self.state.event_name)
            .finish()
    }
}
