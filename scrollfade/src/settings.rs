//! Scrollbar animation configuration.

use std::time::Duration;

use thiserror::Error;

use crate::controller::ScrollbarAnimationController;
use crate::scrollbar::ElementId;

/// Which overlay scrollbar behavior a host wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollbarAnimator {
    /// Scrollbars are not animated; no controller is created.
    NoAnimator,
    /// Fade only: scrollbars appear on scroll and fade out afterwards.
    AndroidOverlay,
    /// Fade plus per-axis thumb thinning driven by mouse proximity.
    #[default]
    AuraOverlay,
}

/// What happens to the controller's own opacity when it is applied to the
/// scrollbar layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitOpacityPolicy {
    /// Layers and controller agree on the opacity.
    #[default]
    Commit,
    /// Layers receive the opacity but the controller keeps its previous
    /// value. Used by hosts that drive native scrollbars themselves; such
    /// hosts end fades early with
    /// [`set_should_stop_animation`](ScrollbarAnimationController::set_should_stop_animation).
    LayersOnly,
}

/// Errors raised when settings cannot produce a working controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("initial opacity {0} is outside 0.0..=1.0")]
    InvalidOpacity(f32),

    #[error("fade duration must be greater than zero")]
    ZeroFadeDuration,

    #[error("thinning duration must be greater than zero")]
    ZeroThinningDuration,
}

/// Overlay scrollbar animation settings for a layer tree.
#[derive(Debug, Clone)]
pub struct ScrollbarAnimationSettings {
    pub animator: ScrollbarAnimator,

    /// Wait after the last triggering event before a fade starts.
    pub fade_delay: Duration,

    pub fade_duration: Duration,

    /// Only used by [`ScrollbarAnimator::AuraOverlay`].
    pub thinning_duration: Duration,

    /// Opacity new controllers start at. 0.0 starts hidden.
    pub initial_opacity: f32,

    pub commit_policy: CommitOpacityPolicy,
}

impl Default for ScrollbarAnimationSettings {
    fn default() -> Self {
        Self::aura_overlay()
    }
}

impl ScrollbarAnimationSettings {
    /// Fade-only overlay scrollbars.
    pub fn android_overlay() -> Self {
        Self {
            animator: ScrollbarAnimator::AndroidOverlay,
            fade_delay: Duration::from_millis(300),
            fade_duration: Duration::from_millis(300),
            thinning_duration: Duration::ZERO,
            initial_opacity: 0.0,
            commit_policy: CommitOpacityPolicy::Commit,
        }
    }

    /// Fading overlay scrollbars whose thumbs thin out away from the mouse.
    pub fn aura_overlay() -> Self {
        Self {
            animator: ScrollbarAnimator::AuraOverlay,
            fade_delay: Duration::from_millis(500),
            fade_duration: Duration::from_millis(200),
            thinning_duration: Duration::from_millis(200),
            initial_opacity: 0.0,
            commit_policy: CommitOpacityPolicy::Commit,
        }
    }

    /// Settings that never create a controller.
    pub fn disabled() -> Self {
        Self {
            animator: ScrollbarAnimator::NoAnimator,
            ..Self::android_overlay()
        }
    }

    pub fn fade_delay(mut self, delay: Duration) -> Self {
        self.fade_delay = delay;
        self
    }

    pub fn fade_duration(mut self, duration: Duration) -> Self {
        self.fade_duration = duration;
        self
    }

    pub fn thinning_duration(mut self, duration: Duration) -> Self {
        self.thinning_duration = duration;
        self
    }

    pub fn initial_opacity(mut self, opacity: f32) -> Self {
        self.initial_opacity = opacity;
        self
    }

    pub fn commit_policy(mut self, policy: CommitOpacityPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.animator == ScrollbarAnimator::NoAnimator {
            return Ok(());
        }

        if !(0.0..=1.0).contains(&self.initial_opacity) {
            return Err(SettingsError::InvalidOpacity(self.initial_opacity));
        }

        if self.fade_duration.is_zero() {
            return Err(SettingsError::ZeroFadeDuration);
        }

        if self.animator == ScrollbarAnimator::AuraOverlay && self.thinning_duration.is_zero() {
            return Err(SettingsError::ZeroThinningDuration);
        }

        Ok(())
    }

    /// Build the controller for one scrollable element, or `None` when
    /// scrollbars are not animated.
    pub fn create_controller(
        &self,
        scroll_element_id: ElementId,
    ) -> Result<Option<ScrollbarAnimationController>, SettingsError> {
        self.validate()?;

        let controller = match self.animator {
            ScrollbarAnimator::NoAnimator => return Ok(None),
            ScrollbarAnimator::AndroidOverlay => ScrollbarAnimationController::fade_only(
                scroll_element_id,
                self.fade_delay,
                self.fade_duration,
                self.initial_opacity,
            ),
            ScrollbarAnimator::AuraOverlay => ScrollbarAnimationController::fade_with_thinning(
                scroll_element_id,
                self.fade_delay,
                self.fade_duration,
                self.thinning_duration,
                self.initial_opacity,
            ),
        };

        log::debug!(
            "[scrollbar] created {:?} controller for {}",
            self.animator,
            scroll_element_id
        );
        Ok(Some(controller.with_commit_policy(self.commit_policy)))
    }
}
