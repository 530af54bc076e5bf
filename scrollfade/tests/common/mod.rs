#![allow(dead_code)]

use std::time::{Duration, Instant};

use scrollfade::{
    DelayedAnimationTask, DelayedTaskQueue, ElementId, PointF, RectF, ScrollbarAnimationClient,
    ScrollbarAnimationController, ScrollbarLayer, ScrollbarOrientation,
};

pub const ELEMENT: ElementId = ElementId(42);

/// A 200x200 viewport with a 10px vertical scrollbar on the right edge and a
/// 10px horizontal one along the bottom.
#[derive(Debug, Clone)]
pub struct FakeScrollbar {
    pub element_id: ElementId,
    pub orientation: ScrollbarOrientation,
    pub overlay: bool,
    pub can_scroll: bool,
    pub fast: bool,
    pub scale_factor: f32,
    pub opacity: f32,
    pub thickness_scale: f32,
    pub track: RectF,
    pub thumb: RectF,
}

impl FakeScrollbar {
    pub fn vertical() -> Self {
        Self {
            element_id: ELEMENT,
            orientation: ScrollbarOrientation::Vertical,
            overlay: true,
            can_scroll: true,
            fast: false,
            scale_factor: 1.0,
            opacity: 0.0,
            thickness_scale: 0.4,
            track: RectF::new(190.0, 0.0, 10.0, 190.0),
            thumb: RectF::new(190.0, 0.0, 10.0, 50.0),
        }
    }

    pub fn horizontal() -> Self {
        Self {
            orientation: ScrollbarOrientation::Horizontal,
            track: RectF::new(0.0, 190.0, 190.0, 10.0),
            thumb: RectF::new(0.0, 190.0, 50.0, 10.0),
            ..Self::vertical()
        }
    }
}

impl ScrollbarLayer for FakeScrollbar {
    fn orientation(&self) -> ScrollbarOrientation {
        self.orientation
    }

    fn is_overlay_scrollbar(&self) -> bool {
        self.overlay
    }

    fn can_scroll_orientation(&self) -> bool {
        self.can_scroll
    }

    fn set_overlay_scrollbar_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn thumb_thickness_scale_factor(&self) -> f32 {
        self.thickness_scale
    }

    fn set_thumb_thickness_scale_factor(&mut self, scale: f32) {
        self.thickness_scale = scale;
    }

    fn track_rect(&self) -> RectF {
        self.track
    }

    fn thumb_rect(&self) -> RectF {
        self.thumb
    }

    fn device_scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn uses_fast_scrollbar(&self) -> bool {
        self.fast
    }
}

/// Records every callback and keeps posted tasks on a fake clock.
#[derive(Debug)]
pub struct FakeHost {
    pub scrollbars: Vec<FakeScrollbar>,
    pub now: Instant,
    pub queue: DelayedTaskQueue,
    pub posted: Vec<(DelayedAnimationTask, Duration)>,
    pub animate_requests: usize,
    pub redraw_requests: usize,
    pub visibility_changes: usize,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::with_scrollbars(vec![FakeScrollbar::vertical(), FakeScrollbar::horizontal()])
    }

    pub fn with_scrollbars(scrollbars: Vec<FakeScrollbar>) -> Self {
        Self {
            scrollbars,
            now: Instant::now(),
            queue: DelayedTaskQueue::new(),
            posted: Vec::new(),
            animate_requests: 0,
            redraw_requests: 0,
            visibility_changes: 0,
        }
    }

    pub fn scrollbar(&self, orientation: ScrollbarOrientation) -> &FakeScrollbar {
        self.scrollbars
            .iter()
            .find(|scrollbar| scrollbar.orientation == orientation)
            .expect("scrollbar for orientation")
    }

    /// Move the clock forward and deliver every task that became due.
    pub fn advance(&mut self, controller: &mut ScrollbarAnimationController, by: Duration) {
        self.now += by;
        for task in self.queue.take_due(self.now) {
            controller.run_delayed_animation(self, task);
        }
    }

    /// Tick the controller at the current clock.
    pub fn animate(&mut self, controller: &mut ScrollbarAnimationController) -> bool {
        let now = self.now;
        controller.animate(self, now)
    }
}

impl ScrollbarAnimationClient for FakeHost {
    fn scrollbars_for(&mut self, scroll_element_id: ElementId) -> Vec<&mut dyn ScrollbarLayer> {
        self.scrollbars
            .iter_mut()
            .filter(|scrollbar| scrollbar.element_id == scroll_element_id)
            .map(|scrollbar| scrollbar as &mut dyn ScrollbarLayer)
            .collect()
    }

    fn set_needs_animate_for_scrollbar_animation(&mut self) {
        self.animate_requests += 1;
    }

    fn set_needs_redraw_for_scrollbar_animation(&mut self) {
        self.redraw_requests += 1;
    }

    fn did_change_scrollbar_visibility(&mut self) {
        self.visibility_changes += 1;
    }

    fn post_delayed_scrollbar_animation_task(&mut self, task: DelayedAnimationTask, delay: Duration) {
        self.posted.push((task, delay));
        self.queue.post(task, self.now, delay);
    }
}

pub const FADE_DELAY: Duration = Duration::from_millis(500);
pub const FADE_DURATION: Duration = Duration::from_millis(300);
pub const THINNING_DURATION: Duration = Duration::from_millis(200);

pub fn fade_only(initial_opacity: f32) -> ScrollbarAnimationController {
    ScrollbarAnimationController::fade_only(ELEMENT, FADE_DELAY, FADE_DURATION, initial_opacity)
}

pub fn with_thinning(initial_opacity: f32) -> ScrollbarAnimationController {
    ScrollbarAnimationController::fade_with_thinning(
        ELEMENT,
        FADE_DELAY,
        FADE_DURATION,
        THINNING_DURATION,
        initial_opacity,
    )
}

/// Over the vertical thumb.
pub const OVER_VERTICAL_THUMB: PointF = PointF::new(195.0, 10.0);
/// Within the fade-in distance of the vertical track, away from the thumb.
pub const NEAR_VERTICAL_TRACK: PointF = PointF::new(175.0, 120.0);
/// Far from both scrollbars.
pub const FAR_AWAY: PointF = PointF::new(60.0, 60.0);
