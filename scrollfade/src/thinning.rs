//! Per-orientation thumb thinning.
//!
//! An overlay thumb idles at a reduced thickness and grows to full thickness
//! while the mouse is near it or dragging it.

use std::time::{Duration, Instant};

use crate::client::ScrollbarAnimationClient;
use crate::geometry::PointF;
use crate::scrollbar::{ElementId, ScrollbarLayer, ScrollbarOrientation};

/// Thumb thickness scale while the mouse is away from the thumb.
pub const IDLE_THICKNESS_SCALE: f32 = 0.4;

/// Distance in DIPs from the thumb within which it expands.
pub const MOUSE_MOVE_DISTANCE_TO_TRIGGER_EXPAND: f32 = 25.0;

/// Distance in DIPs from the track within which hidden scrollbars fade in.
pub const MOUSE_MOVE_DISTANCE_TO_TRIGGER_FADE_IN: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThicknessChange {
    None,
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollbarPart {
    Thumb,
    Track,
}

fn distance_to_scrollbar_part(
    point: PointF,
    scrollbar: &dyn ScrollbarLayer,
    part: ScrollbarPart,
) -> f32 {
    let rect = match part {
        ScrollbarPart::Thumb => scrollbar.thumb_rect(),
        ScrollbarPart::Track => scrollbar.track_rect(),
    };
    rect.manhattan_distance_to_point(point) / scrollbar.device_scale_factor()
}

/// Clamp `new_value` so that an increase never shrinks and a decrease never
/// grows `current_value`.
fn adjust_scale(
    new_value: f32,
    current_value: f32,
    change: ThicknessChange,
    min_value: f32,
    max_value: f32,
) -> f32 {
    let result = match change {
        ThicknessChange::Increase if new_value < current_value => current_value,
        ThicknessChange::Decrease if new_value > current_value => current_value,
        _ => new_value,
    };
    result.clamp(min_value, max_value)
}

/// Hover and capture tracking plus thickness animation for the scrollbar of
/// one orientation.
#[derive(Debug)]
pub struct SingleScrollbarAnimationControllerThinning {
    scroll_element_id: ElementId,
    orientation: ScrollbarOrientation,
    thinning_duration: Duration,
    is_animating: bool,
    last_awaken_time: Option<Instant>,
    captured: bool,
    mouse_is_over_scrollbar_thumb: bool,
    mouse_is_near_scrollbar_thumb: bool,
    mouse_is_near_scrollbar_track: bool,
    thickness_change: ThicknessChange,
}

impl SingleScrollbarAnimationControllerThinning {
    pub fn new(
        scroll_element_id: ElementId,
        orientation: ScrollbarOrientation,
        thinning_duration: Duration,
    ) -> Self {
        Self {
            scroll_element_id,
            orientation,
            thinning_duration,
            is_animating: false,
            last_awaken_time: None,
            captured: false,
            mouse_is_over_scrollbar_thumb: false,
            mouse_is_near_scrollbar_thumb: false,
            mouse_is_near_scrollbar_track: false,
            thickness_change: ThicknessChange::None,
        }
    }

    pub fn orientation(&self) -> ScrollbarOrientation {
        self.orientation
    }

    pub fn mouse_is_over_scrollbar_thumb(&self) -> bool {
        self.mouse_is_over_scrollbar_thumb
    }

    pub fn mouse_is_near_scrollbar_thumb(&self) -> bool {
        self.mouse_is_near_scrollbar_thumb
    }

    pub fn mouse_is_near_scrollbar_track(&self) -> bool {
        self.mouse_is_near_scrollbar_track
    }

    pub fn captured(&self) -> bool {
        self.captured
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    fn has_scrollbar(&self, client: &mut dyn ScrollbarAnimationClient) -> bool {
        client
            .scrollbars_for(self.scroll_element_id)
            .iter()
            .any(|scrollbar| scrollbar.orientation() == self.orientation)
    }

    pub fn animate(&mut self, client: &mut dyn ScrollbarAnimationClient, now: Instant) -> bool {
        if !self.is_animating {
            return false;
        }

        if !self.has_scrollbar(client) {
            self.stop_animation();
            return false;
        }

        let start = *self.last_awaken_time.get_or_insert(now);
        let progress = self.animation_progress_at_time(start, now);
        self.run_animation_frame(client, progress);

        if self.is_animating {
            client.set_needs_animate_for_scrollbar_animation();
        }
        true
    }

    fn animation_progress_at_time(&self, start: Instant, now: Instant) -> f32 {
        if self.thinning_duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f32() / self.thinning_duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn run_animation_frame(&mut self, client: &mut dyn ScrollbarAnimationClient, progress: f32) {
        if self.captured {
            return;
        }

        self.apply_thumb_thickness_scale(client, self.thumb_thickness_scale_at(progress));
        client.set_needs_redraw_for_scrollbar_animation();

        if progress == 1.0 {
            self.stop_animation();
            self.thickness_change = ThicknessChange::None;
        }
    }

    fn start_animation(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        self.is_animating = true;
        self.last_awaken_time = None;
        client.set_needs_animate_for_scrollbar_animation();
    }

    fn stop_animation(&mut self) {
        self.is_animating = false;
    }

    pub fn did_mouse_down(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if !self.mouse_is_over_scrollbar_thumb {
            return;
        }

        self.stop_animation();
        self.captured = true;
        log::debug!(
            "[thinning] {} {:?} thumb captured",
            self.scroll_element_id,
            self.orientation
        );
        self.apply_thumb_thickness_scale(client, 1.0);
    }

    pub fn did_mouse_up(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        if !self.captured {
            return;
        }

        self.captured = false;
        self.stop_animation();
        log::debug!(
            "[thinning] {} {:?} thumb released",
            self.scroll_element_id,
            self.orientation
        );

        if self.mouse_is_near_scrollbar_thumb {
            self.thickness_change = ThicknessChange::None;
        } else {
            self.thickness_change = ThicknessChange::Decrease;
            self.start_animation(client);
        }
    }

    pub fn did_mouse_leave(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        self.mouse_is_near_scrollbar_track = false;

        if !self.mouse_is_over_scrollbar_thumb && !self.mouse_is_near_scrollbar_thumb {
            return;
        }

        self.mouse_is_over_scrollbar_thumb = false;
        self.mouse_is_near_scrollbar_thumb = false;

        if self.captured {
            return;
        }

        self.thickness_change = ThicknessChange::Decrease;
        self.start_animation(client);
    }

    pub fn did_mouse_move(&mut self, client: &mut dyn ScrollbarAnimationClient, point: PointF) {
        let distances = client
            .scrollbars_for(self.scroll_element_id)
            .into_iter()
            .find(|scrollbar| scrollbar.orientation() == self.orientation)
            .map(|scrollbar| {
                (
                    distance_to_scrollbar_part(point, &*scrollbar, ScrollbarPart::Track),
                    distance_to_scrollbar_part(point, &*scrollbar, ScrollbarPart::Thumb),
                )
            });
        let Some((distance_to_track, distance_to_thumb)) = distances else {
            return;
        };

        self.mouse_is_near_scrollbar_track = distance_to_track < MOUSE_MOVE_DISTANCE_TO_TRIGGER_FADE_IN;

        let mouse_is_over_scrollbar_thumb = distance_to_thumb == 0.0;
        let mouse_is_near_scrollbar_thumb = distance_to_thumb < MOUSE_MOVE_DISTANCE_TO_TRIGGER_EXPAND;

        if !self.captured && mouse_is_near_scrollbar_thumb != self.mouse_is_near_scrollbar_thumb {
            self.thickness_change = if mouse_is_near_scrollbar_thumb {
                ThicknessChange::Increase
            } else {
                ThicknessChange::Decrease
            };
            self.start_animation(client);
        }

        self.mouse_is_near_scrollbar_thumb = mouse_is_near_scrollbar_thumb;
        self.mouse_is_over_scrollbar_thumb = mouse_is_over_scrollbar_thumb;
    }

    fn thumb_thickness_scale_at(&self, progress: f32) -> f32 {
        let factor = match self.thickness_change {
            ThicknessChange::None => {
                return if self.mouse_is_near_scrollbar_thumb {
                    1.0
                } else {
                    IDLE_THICKNESS_SCALE
                };
            }
            ThicknessChange::Increase => progress,
            ThicknessChange::Decrease => 1.0 - progress,
        };
        (1.0 - IDLE_THICKNESS_SCALE) * factor + IDLE_THICKNESS_SCALE
    }

    /// Snap the thumb to the thickness matching the current hover state.
    pub fn update_thumb_thickness_scale(&mut self, client: &mut dyn ScrollbarAnimationClient) {
        self.stop_animation();
        let scale = if self.mouse_is_near_scrollbar_thumb {
            1.0
        } else {
            IDLE_THICKNESS_SCALE
        };
        self.apply_thumb_thickness_scale(client, scale);
    }

    fn apply_thumb_thickness_scale(
        &self,
        client: &mut dyn ScrollbarAnimationClient,
        thumb_thickness_scale: f32,
    ) {
        for scrollbar in client.scrollbars_for(self.scroll_element_id) {
            if scrollbar.orientation() != self.orientation || !scrollbar.is_overlay_scrollbar() {
                continue;
            }

            let scale = adjust_scale(
                thumb_thickness_scale,
                scrollbar.thumb_thickness_scale_factor(),
                self.thickness_change,
                IDLE_THICKNESS_SCALE,
                1.0,
            );
            scrollbar.set_thumb_thickness_scale_factor(scale);
        }
    }
}
