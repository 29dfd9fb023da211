//! The seam to whatever evaluates media queries against a live viewport.
//!
//! A browser host backs these traits with `window.matchMedia`; native hosts
//! and tests use [`HeadlessViewport`](crate::headless::HeadlessViewport).

use std::rc::Rc;

use crate::error::Result;

slotmap::new_key_type! {
    /// Handle for a change callback registered on a [`MediaQueryList`].
    pub struct ListenerId;
}

/// Callback invoked with the new match status after it changes.
pub type MediaQueryListener = Rc<dyn Fn(bool)>;

/// Evaluates a media query and keeps it live.
pub trait MatchMedia {
    /// Creates a watcher for `query`.
    ///
    /// Hosts return [`Error::Viewport`](crate::Error::Viewport) when they cannot
    /// register the query at all. A query the host merely does not understand
    /// should produce a watcher that never matches.
    fn match_media(&self, query: &str) -> Result<Rc<dyn MediaQueryList>>;
}

/// A live watcher for one media query.
pub trait MediaQueryList {
    fn media(&self) -> &str;

    fn matches(&self) -> bool;

    fn add_listener(&self, listener: MediaQueryListener) -> ListenerId;

    /// Unregisters a callback. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

impl<T: MatchMedia + ?Sized> MatchMedia for Rc<T> {
    fn match_media(&self, query: &str) -> Result<Rc<dyn MediaQueryList>> {
        (**self).match_media(query)
    }
}

impl<T: MatchMedia + ?Sized> MatchMedia for &T {
    fn match_media(&self, query: &str) -> Result<Rc<dyn MediaQueryList>> {
        (**self).match_media(query)
    }
}
