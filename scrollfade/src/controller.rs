//! Overlay scrollbar fade state machine.
//!
//! Scroll updates show the scrollbars and schedule a delayed fade-out. In
//! the thinning variant, mouse proximity additionally fades hidden
//! scrollbars in, keeps visible ones from fading out, and is forwarded to
//! one [`SingleScrollbarAnimationControllerThinning`] per orientation.
//!
//! Fades move opacity towards their target with `max`/`min` against the
//! current opacity, so reversing a fade midway continues from whatever is
//! on screen instead of jumping.

use std::time::{Duration, Instant};

use crate::client::ScrollbarAnimationClient;
use crate::geometry::PointF;
use crate::scheduler::{DelayedAnimation, DelayedAnimationTask};
use crate::scrollbar::{ElementId, ScrollbarOrientation};
use crate::settings::CommitOpacityPolicy;
use crate::thinning::SingleScrollbarAnimationControllerThinning;

/// Opacity kept on fast-scrollbar layers.
pub const FAST_SCROLLBAR_OPACITY: f32 = 0.001;

/// Direction of the scheduled or running fade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationChange {
    #[default]
    None,
    FadeIn,
    FadeOut,
}

#[derive(Debug)]
struct ThinningControllers {
    vertical: SingleScrollbarAnimationControllerThinning,
    horizontal: SingleScrollbarAnimationControllerThinning,
}

impl ThinningControllers {
    fn new(scroll_element_id: ElementId, thinning_duration: Duration) -> Self {
        Self {
            vertical: SingleScrollbarAnimationControllerThinning::new(
                scroll_element_id,
                ScrollbarOrientation::Vertical,
                thinning_duration,
            ),
            horizontal: SingleScrollbarAnimationControllerThinning::new(
                scroll_element_id,
                ScrollbarOrientation::Horizontal,
                thinning_duration,
            ),
        }
    }

    fn get(&self, orientation: ScrollbarOrientation) -> &SingleScrollbarAnimationControllerThinning {
        match orientation {
            ScrollbarOrientation::Vertical => &self.vertical,
            ScrollbarOrientation::Horizontal => &self.horizontal,
        }
    }

    fn both_mut(&mut self) -> [&mut SingleScrollbarAnimationControllerThinning; 2] {
        [&mut self.vertical, &mut self.horizontal]
    }

    fn captured(&self) -> bool {
        self.vertical.captured() || self.horizontal.captured()
    }

    fn mouse_is_near_any_scrollbar(&self) -> bool {
        self.vertical.mouse_is_near_scrollbar_track() || self.horizontal.mouse_is_near_scrollbar_track()
    }
}

/// Fade (and optionally thinning) animation for the overlay scrollbars of
/// one scrollable element.
#[derive(Debug)]
pub struct ScrollbarAnimationController {
    scroll_element_id: ElementId,
    fade_delay: Duration,
    fade_duration: Duration,
    need_trigger_scrollbar_fade_in: bool,
    is_animating: bool,
    animation_change: AnimationChange,
    /// Time of the first frame of the current fade.
    last_awaken_time: Option<Instant>,
    currently_scrolling: bool,
    show_in_fast_scroll: bool,
    opacity: f32,
    show_scrollbars_on_scroll_gesture: bool,
    is_mouse_down: bool,
    commit_policy: CommitOpacityPolicy,
    should_stop_animation: bool,
    delayed_animation: DelayedAnimation,
    /// Present exactly when the thinning variant was constructed.
    thinning: Option<ThinningControllers>,
}

impl ScrollbarAnimationController {
    /// Fade-only controller. Scroll gestures do not show the scrollbars and
    /// mouse events are ignored.
    pub fn fade_only(
        scroll_element_id: ElementId,
        fade_delay: Duration,
        fade_duration: Duration,
        initial_opacity: f32,
    ) -> Self {
        Self {
            scroll_element_id,
            fade_delay,
            fade_duration,
            need_trigger_scrollbar_fade_in: false,
            is_animating: false,
            animation_change: AnimationChange::None,
            last_awaken_time: None,
            currently_scrolling: false,
            show_in_fast_scroll: false,
            opacity: initial_opacity,
            show_scrollbars_on_scroll_gesture: false,
            is_mouse_down: false,
            commit_policy: CommitOpacityPolicy::Commit,
            should_stop_animation: false,
            delayed_animation: DelayedAnimation::default(),
            thinning: None,
        }
    }

    /// Fade controller with per-orientation thinning and mouse-driven
    /// visibility.
    pub fn fade_with_thinning(
        scroll_element_id: ElementId,
        fade_delay: Duration,
        fade_duration: Duration,
        thinning_duration: Duration,
        initial_opacity: f32,
    ) -> Self {
        Self {
            show_scrollbars_on_scroll_gesture: true,
            thinning: Some(ThinningControllers::new(scroll_element_id, thinning_duration)),
            ..Self::fade_only(scroll_element_id, fade_delay, fade_duration, initial_opacity)
        }
    }

    pub fn with_commit_policy(mut self, policy: CommitOpacityPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    pub fn scroll_element_id(&self) -> ElementId {
        self.scroll_element_id
    }

    pub fn need_thinning_animation(&self) -> bool {
        self.thinning.is_some()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn animation_change(&self) -> AnimationChange {
        self.animation_change
    }

    pub fn has_pending_delayed_animation(&self) -> bool {
        self.delayed_animation.is_pending()
    }

    /// True while a mouse move over hidden scrollbars has scheduled a
    /// fade-in that has not started yet.
    pub fn need_trigger_scrollbar_fade_in(&self) -> bool {
        self.need_trigger_scrollbar_fade_in
    }

    /// End the running fade at its next frame. Only meaningful for hosts
    /// using [`CommitOpacityPolicy::LayersOnly`].
    pub fn set_should_stop_animation(&mut self, should_stop_animation: bool) {
        self.should_stop_animation = should_stop_animation;
    }

    fn thinning(&self) -> &ThinningControllers {
        match &self.thinning {
            Some(thinning) => thinning,
            None => panic!(
                "scrollbar thinning query on fade-only controller {}",
                self.scroll_element_id
            ),
        }
    }

    pub(crate) fn start_animation(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        debug_assert_ne!(self.animation_change, AnimationChange::None);
        self.delayed_animation.cancel();
        self.need_trigger_scrollbar_fade_in = false;
        self.is_animating = true;
        self.last_awaken_time = None;
        log::debug!(
            "[scrollbar] {} start {:?} from opacity {:.3}",
            self.scroll_element_id,
            self.animation_change,
            self.opacity
        );
        client.set_needs_animate_for_scrollbar_animation();
    }

    pub(crate) fn stop_animation(&mut self) {
        if self.is_animating {
            log::debug!(
                "[scrollbar] {} stop {:?} at opacity {:.3}",
                self.scroll_element_id,
                self.animation_change,
                self.opacity
            );
        }
        self.delayed_animation.cancel();
        self.need_trigger_scrollbar_fade_in = false;
        self.is_animating = false;
        self.animation_change = AnimationChange::None;
    }

    /// Schedule `animation_change` to start after the fade delay, replacing
    /// any start that is still waiting.
    pub(crate) fn post_delayed_animation(
        &mut self,
        client: &mut dyn ScrollbarAnimationClient,
        animation_change: AnimationChange,
    ) {
        self.animation_change = animation_change;
        self.delayed_animation.cancel();
        let task = self.delayed_animation.reset(self.scroll_element_id);
        log::trace!(
            "[scrollbar] {} post {:?} in {:?}",
            self.scroll_element_id,
            animation_change,
            self.fade_delay
        );
        client.post_delayed_scrollbar_animation_task(task, self.fade_delay);
    }

    /// Host entry point for a task posted through
    /// [`ScrollbarAnimationClient::post_delayed_scrollbar_animation_task`].
    /// Returns false, doing nothing, for tasks that were cancelled or
    /// superseded.
    pub fn run_delayed_animation(
        &mut self,
        client: &mut dyn ScrollbarAnimationClient,
        task: DelayedAnimationTask,
    ) -> bool {
        if task.scroll_element_id() != self.scroll_element_id || !self.delayed_animation.take(task) {
            return false;
        }
        self.start_animation(client);
        true
    }

    /// Advance fade and thinning animations. Returns true when anything
    /// animated this frame.
    pub fn animate(&mut self, client: &mut dyn ScrollbarAnimationClient, now: Instant) -> bool {
        let mut animated = false;

        if self.is_animating {
            debug_assert_ne!(self.animation_change, AnimationChange::None);
            let start = *self.last_awaken_time.get_or_insert(now);

            let progress = self.animation_progress_at_time(start, now);
            self.run_animation_frame(client, progress);

            if self.is_animating {
                client.set_needs_animate_for_scrollbar_animation();
            }
            animated = true;
        }

        if let Some(thinning) = &mut self.thinning {
            for controller in thinning.both_mut() {
                animated |= controller.animate(client, now);
            }
        }

        animated
    }

    fn animation_progress_at_time(&self, start: Instant, now: Instant) -> f32 {
        if self.fade_duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.fade_duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub(crate) fn run_animation_frame(&mut self, client: &mut dyn ScrollbarAnimationClient, progress: f32) {
        debug_assert_ne!(self.animation_change, AnimationChange::None);
        let opacity = match self.animation_change {
            AnimationChange::FadeIn => progress.max(self.opacity),
            AnimationChange::FadeOut => (1.0 - progress).min(self.opacity),
            AnimationChange::None => return,
        };
        log::trace!(
            "[scrollbar] {} {:?} progress {:.3} opacity {:.3}",
            self.scroll_element_id,
            self.animation_change,
            progress,
            opacity
        );

        self.apply_opacity_to_scrollbars(client, opacity);

        if progress == 1.0 || self.should_stop_animation {
            self.stop_animation();
        }
    }

    pub fn did_scroll_begin(&mut self) {
        self.currently_scrolling = true;
    }

    pub fn did_scroll_end(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        let has_scrolled = self.show_in_fast_scroll;
        self.show_in_fast_scroll = false;
        self.currently_scrolling = false;

        // Stay visible while the mouse is near a thinning scrollbar
        if self.thinning.as_ref().is_some_and(ThinningControllers::mouse_is_near_any_scrollbar) {
            return;
        }

        if has_scrolled {
            self.post_delayed_animation(client, AnimationChange::FadeOut);
        }
    }

    pub fn did_scroll_update(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if self.thinning.as_ref().is_some_and(ThinningControllers::captured) {
            return;
        }

        self.stop_animation();
        self.show(client);

        // During a gesture the fade-out is posted once, at scroll end
        if self.currently_scrolling {
            self.show_in_fast_scroll = true;
        } else if !self.thinning.as_ref().is_some_and(ThinningControllers::mouse_is_near_any_scrollbar) {
            self.post_delayed_animation(client, AnimationChange::FadeOut);
        }

        if let Some(thinning) = &mut self.thinning {
            for controller in thinning.both_mut() {
                controller.update_thumb_thickness_scale(client);
            }
        }
    }

    pub fn will_update_scroll(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if self.show_scrollbars_on_scroll_gesture {
            self.did_scroll_update(client);
        }
    }

    pub fn did_request_show_from_main_thread(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        self.did_scroll_update(client);
    }

    pub fn did_mouse_down(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if self.thinning.is_none() {
            return;
        }

        self.is_mouse_down = true;

        // Pressing on hidden scrollbars does not reveal them
        if self.scrollbars_hidden() {
            if self.need_trigger_scrollbar_fade_in {
                self.delayed_animation.cancel();
                self.need_trigger_scrollbar_fade_in = false;
            }
            return;
        }

        if let Some(thinning) = &mut self.thinning {
            for controller in thinning.both_mut() {
                controller.did_mouse_down(client);
            }
        }
    }

    pub fn did_mouse_up(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if self.thinning.is_none() {
            return;
        }

        self.is_mouse_down = false;

        if !self.captured() {
            if self.mouse_is_near_any_scrollbar() && self.scrollbars_hidden() {
                self.post_delayed_animation(client, AnimationChange::FadeIn);
                self.need_trigger_scrollbar_fade_in = true;
            }
            return;
        }

        if let Some(thinning) = &mut self.thinning {
            for controller in thinning.both_mut() {
                controller.did_mouse_up(client);
            }
        }

        if !self.mouse_is_near_any_scrollbar() && !self.scrollbars_hidden() {
            self.post_delayed_animation(client, AnimationChange::FadeOut);
        }
    }

    pub fn did_mouse_leave(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        let Some(thinning) = &mut self.thinning else {
            return;
        };

        for controller in thinning.both_mut() {
            controller.did_mouse_leave(client);
        }

        self.delayed_animation.cancel();
        self.need_trigger_scrollbar_fade_in = false;

        if self.scrollbars_hidden() || self.captured() {
            return;
        }

        self.post_delayed_animation(client, AnimationChange::FadeOut);
    }

    pub fn did_mouse_move(&mut self, client: &mut dyn ScrollbarAnimationClient, point: PointF) {
        let Some(thinning) = &mut self.thinning else {
            return;
        };

        let need_trigger_scrollbar_fade_in_before = self.need_trigger_scrollbar_fade_in;

        for controller in thinning.both_mut() {
            controller.did_mouse_move(client, point);
        }

        if self.captured() {
            debug_assert!(!self.scrollbars_hidden());
            return;
        }

        if self.scrollbars_hidden() {
            // Pointer is interacting with the content under the scrollbar
            if self.is_mouse_down {
                return;
            }

            self.need_trigger_scrollbar_fade_in = self.mouse_is_near_any_scrollbar();
            if need_trigger_scrollbar_fade_in_before != self.need_trigger_scrollbar_fade_in {
                if self.need_trigger_scrollbar_fade_in {
                    self.post_delayed_animation(client, AnimationChange::FadeIn);
                } else {
                    self.delayed_animation.cancel();
                }
            }
        } else if self.mouse_is_near_any_scrollbar() {
            self.show(client);
            self.stop_animation();
        } else if !self.is_animating {
            self.post_delayed_animation(client, AnimationChange::FadeOut);
        }
    }

    /// # Panics
    ///
    /// Panics on a fade-only controller.
    pub fn mouse_is_over_scrollbar_thumb(&self, orientation: ScrollbarOrientation) -> bool {
        self.thinning().get(orientation).mouse_is_over_scrollbar_thumb()
    }

    /// # Panics
    ///
    /// Panics on a fade-only controller.
    pub fn mouse_is_near_scrollbar_thumb(&self, orientation: ScrollbarOrientation) -> bool {
        self.thinning().get(orientation).mouse_is_near_scrollbar_thumb()
    }

    /// # Panics
    ///
    /// Panics on a fade-only controller.
    pub fn mouse_is_near_scrollbar(&self, orientation: ScrollbarOrientation) -> bool {
        self.thinning().get(orientation).mouse_is_near_scrollbar_track()
    }

    /// # Panics
    ///
    /// Panics on a fade-only controller.
    pub fn mouse_is_near_any_scrollbar(&self) -> bool {
        self.thinning().mouse_is_near_any_scrollbar()
    }

    pub fn scrollbars_hidden(&self) -> bool {
        self.opacity == 0.0
    }

    /// Whether a thumb of either orientation is being dragged. Always false
    /// for fade-only controllers.
    pub fn captured(&self) -> bool {
        self.thinning.as_ref().is_some_and(ThinningControllers::captured)
    }

    fn show(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        self.delayed_animation.cancel();
        self.apply_opacity_to_scrollbars(client, 1.0);
    }

    pub(crate) fn apply_opacity_to_scrollbars(
        &mut self,
        client: &mut dyn ScrollbarAnimationClient,
        opacity: f32,
    ) {
        for scrollbar in client.scrollbars_for(self.scroll_element_id) {
            debug_assert!(scrollbar.is_overlay_scrollbar());
            let effective_opacity = if scrollbar.uses_fast_scrollbar()
                && scrollbar.orientation() == ScrollbarOrientation::Vertical
            {
                FAST_SCROLLBAR_OPACITY
            } else if scrollbar.can_scroll_orientation() {
                opacity
            } else {
                0.0
            };
            scrollbar.set_overlay_scrollbar_opacity(effective_opacity);
        }

        let previously_visible = self.opacity > 0.0;
        let currently_visible = opacity > 0.0;

        if self.opacity != opacity {
            client.set_needs_redraw_for_scrollbar_animation();
        }

        if self.commit_policy == CommitOpacityPolicy::Commit {
            self.opacity = opacity;
        }

        if previously_visible != currently_visible {
            log::debug!(
                "[scrollbar] {} {}",
                self.scroll_element_id,
                if currently_visible { "shown" } else { "hidden" }
            );
            client.did_change_scrollbar_visibility();
        }
    }
}
