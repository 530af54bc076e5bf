//! Overlay scrollbar fade and thinning animation.
//!
//! A [`ScrollbarAnimationController`] decides when the overlay scrollbars of
//! one scrollable element fade in or out, and (in the thinning variant)
//! widens the thumb as the mouse approaches it. The host drives it with
//! scroll/mouse events and animation ticks, and provides the
//! [`ScrollbarAnimationClient`] capabilities it calls back into.

pub mod client;
pub mod controller;
pub mod geometry;
pub mod scheduler;
pub mod scrollbar;
pub mod settings;
pub mod thinning;

pub use client::ScrollbarAnimationClient;
pub use controller::{AnimationChange, ScrollbarAnimationController};
pub use geometry::{PointF, RectF};
pub use scheduler::{DelayedAnimationTask, DelayedTaskQueue};
pub use scrollbar::{ElementId, ScrollbarLayer, ScrollbarOrientation};
pub use settings::{CommitOpacityPolicy, ScrollbarAnimationSettings, ScrollbarAnimator, SettingsError};
pub use thinning::SingleScrollbarAnimationControllerThinning;
