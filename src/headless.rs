//! A viewport that lives entirely in process.
//!
//! [`HeadlessViewport`] implements [`MatchMedia`] against a width and height
//! the host sets with [`HeadlessViewport::resize`]. It lets native hosts and
//! tests drive a [`BreakpointTracker`](crate::BreakpointTracker) without a
//! browser.
//!
//! # Example
//!
//! ```
//! use theme_breakpoints::headless::HeadlessViewport;
//! use theme_breakpoints::viewport::MatchMedia;
//!
//! let viewport = HeadlessViewport::new(400.0, 800.0);
//! let wide = viewport.match_media("(min-width: 1024px)").unwrap();
//! assert!(!wide.matches());
//!
//! viewport.resize(1280.0, 800.0);
//! assert!(wide.matches());
//! ```

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    error::{Error, Result},
    media_query::{MediaQuery, ViewportSize},
    viewport::{ListenerId, MatchMedia, MediaQueryList, MediaQueryListener},
};

struct ViewportState {
    size: Cell<ViewportSize>,
    lists: RefCell<Vec<Weak<HeadlessQueryList>>>,
    refused: RefCell<FxHashSet<String>>,
}

/// In-process viewport. Clones share the same state.
#[derive(Clone)]
pub struct HeadlessViewport {
    state: Rc<ViewportState>,
}

impl HeadlessViewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            state: Rc::new(ViewportState {
                size: Cell::new(ViewportSize::new(width, height)),
                lists: RefCell::new(Vec::new()),
                refused: RefCell::new(FxHashSet::default()),
            }),
        }
    }

    pub fn size(&self) -> ViewportSize {
        self.state.size.get()
    }

    /// Makes later [`MatchMedia::match_media`] calls for `query` fail.
    pub fn refuse_query(&self, query: impl Into<String>) {
        self.state.refused.borrow_mut().insert(query.into());
    }

    /// Changes the viewport size and notifies every watcher whose match status
    /// flipped.
    ///
    /// All watchers are re-evaluated before the first callback runs, so a
    /// callback sees the new status of every query. Callbacks run one at a
    /// time, watchers in creation order, with no internal borrow held.
    pub fn resize(&self, width: f64, height: f64) {
        let size = ViewportSize::new(width, height);
        self.state.size.set(size);

        let lists: SmallVec<[Rc<HeadlessQueryList>; 8]> = {
            let mut lists = self.state.lists.borrow_mut();
            lists.retain(|list| list.strong_count() > 0);
            lists.iter().filter_map(Weak::upgrade).collect()
        };

        let changed: SmallVec<[(Rc<HeadlessQueryList>, bool); 8]> = lists
            .into_iter()
            .filter_map(|list| {
                let matches = list.evaluate(size);
                (list.matches.replace(matches) != matches).then_some((list, matches))
            })
            .collect();

        for (list, matches) in changed {
            let listeners: SmallVec<[MediaQueryListener; 4]> =
                list.listeners.borrow().values().cloned().collect();
            for listener in listeners {
                listener(matches);
            }
        }
    }

    /// Number of live watchers created by this viewport.
    pub fn watcher_count(&self) -> usize {
        self.state
            .lists
            .borrow()
            .iter()
            .filter(|list| list.strong_count() > 0)
            .count()
    }

    /// Number of callbacks registered across all live watchers.
    pub fn listener_count(&self) -> usize {
        self.state
            .lists
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .map(|list| list.listeners.borrow().len())
            .sum()
    }
}

impl Default for HeadlessViewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl MatchMedia for HeadlessViewport {
    fn match_media(&self, query: &str) -> Result<Rc<dyn MediaQueryList>> {
        if self.state.refused.borrow().contains(query) {
            return Err(Error::Viewport {
                query: query.to_string(),
                reason: "query refused by viewport".to_string(),
            });
        }

        let parsed = match MediaQuery::parse(query) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                tracing::warn!(query, %err, "unsupported media query never matches");
                None
            }
        };

        let list = Rc::new(HeadlessQueryList {
            media: query.to_string(),
            query: parsed,
            matches: Cell::new(false),
            listeners: RefCell::new(SlotMap::with_key()),
        });
        list.matches.set(list.evaluate(self.size()));

        self.state.lists.borrow_mut().push(Rc::downgrade(&list));
        Ok(list)
    }
}

/// Watcher handed out by [`HeadlessViewport`].
pub struct HeadlessQueryList {
    media: String,
    query: Option<MediaQuery>,
    matches: Cell<bool>,
    listeners: RefCell<SlotMap<ListenerId, MediaQueryListener>>,
}

impl HeadlessQueryList {
    fn evaluate(&self, size: ViewportSize) -> bool {
        self.query.as_ref().is_some_and(|query| query.matches(size))
    }
}

impl MediaQueryList for HeadlessQueryList {
    fn media(&self) -> &str {
        &self.media
    }

    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_listener(&self, listener: MediaQueryListener) -> ListenerId {
        self.listeners.borrow_mut().insert(listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(id);
    }
}
