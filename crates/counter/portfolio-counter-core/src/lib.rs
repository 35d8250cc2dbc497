//! Portfolio Counter Core (engine-agnostic)
//!
//! Animated statistics counters for the portfolio page: a target string such as
//! `"2.5K"` or `"120+"` is parsed once, interpolated over a fixed number of ticks
//! and always lands on the exact original text. A one-shot visibility trigger
//! starts every counter of a container the first time it scrolls into view.
//!
//! Nothing here touches the browser. Hosts supply a [`Scheduler`], a
//! [`TextSink`] per counter element and a [`CounterContainer`]; the wasm adapter
//! does that against the DOM, tests do it with [`VirtualScheduler`].

pub mod animator;
pub mod config;
pub mod error;
pub mod format;
pub mod ids;
pub mod scheduler;
pub mod session;
pub mod target;
pub mod trigger;
pub mod watcher;

// Re-exports for consumers (adapters)
pub use animator::CounterAnimator;
pub use config::Config;
pub use error::ConfigError;
pub use format::render;
pub use ids::{SessionId, TaskId};
pub use scheduler::{IntervalTask, Scheduler, VirtualScheduler};
pub use session::{next_frame, AnimationSession, Frame, RecordingSink, TextSink};
pub use target::{FormatTag, TargetSpec};
pub use trigger::{Intersection, TriggerState, VisibilityTrigger};
pub use watcher::{CounterContainer, CounterElement, StatsWatcher};
