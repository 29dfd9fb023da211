//! # theme_breakpoints
//! Exposes the responsive breakpoints a CMS theme declares to client code and
//! tracks which one is active as the viewport changes.
//!
//! Two pieces meet through a plain data contract, the [`BreakpointSet`]:
//!
//! - [`BreakpointResolver`] runs where themes live. It picks the breakpoint
//!   group of a theme, or of its nearest base theme that has one, and strips
//!   the `"<theme>."` prefix from each id.
//! - [`BreakpointTracker`] runs where the viewport lives. It watches one media
//!   query per breakpoint and publishes a change notification only when the
//!   active breakpoint actually changes.
//!
//! The set travels between them as a JSON payload inside the page settings
//! (see [`BreakpointSet::attach_to_settings`] and
//! [`BreakpointTracker::from_settings`]).
//!
//! ## Example
//! ```rust
//! use std::rc::Rc;
//!
//! use serde_json::Map;
//! use theme_breakpoints::{
//!     BreakpointChanged, BreakpointTracker, EventBus, QueryPolicy, TrackerConfig,
//!     headless::HeadlessViewport,
//!     resolver::{BreakpointResolver, StaticRegistry},
//! };
//!
//! // Server side: resolve and serialize.
//! let registry = Rc::new(StaticRegistry::from_json(r#"{
//!     "active": "site",
//!     "themes": { "base": {}, "site": { "baseTheme": "base" } },
//!     "breakpoints": { "base": [
//!         { "id": "base.mobile", "mediaQuery": "(min-width: 0px)" },
//!         { "id": "base.wide", "mediaQuery": "(min-width: 1024px)" }
//!     ] }
//! }"#).unwrap());
//! let resolver = BreakpointResolver::new(registry.clone(), registry);
//! let config = TrackerConfig::default().with_query_policy(QueryPolicy::Verbatim);
//! let mut settings = Map::new();
//! resolver
//!     .breakpoints_for_active_theme()
//!     .unwrap()
//!     .attach_to_settings(&mut settings, &config.settings_key)
//!     .unwrap();
//!
//! // Client side: track.
//! let viewport = HeadlessViewport::new(1280.0, 720.0);
//! let bus = EventBus::<BreakpointChanged>::new();
//! let tracker =
//!     BreakpointTracker::from_settings(&settings, &viewport, Rc::new(bus.clone()), &config)
//!         .unwrap();
//! assert_eq!(tracker.current_breakpoint_id().as_deref(), Some("wide"));
//! ```
//!
//! ## Logging
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod breakpoint;
pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod headless;
pub mod media_query;
mod payload;
pub mod policy;
pub mod resolver;
pub mod tracker;
pub mod viewport;

pub use breakpoint::{BreakpointDefinition, BreakpointSet};
pub use config::TrackerConfig;
pub use error::{Error, RegistryError, Result};
pub use event::{BreakpointChanged, EventBus, NotificationChannel, SubscriptionId};
pub use policy::QueryPolicy;
pub use resolver::BreakpointResolver;
pub use tracker::BreakpointTracker;
pub use viewport::{ListenerId, MatchMedia, MediaQueryList};
