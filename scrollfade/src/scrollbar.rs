use crate::geometry::RectF;

/// Identifies the scrollable element a set of scrollbars belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollbarOrientation {
    Vertical,
    Horizontal,
}

/// A scrollbar layer owned by the host.
///
/// Controllers only look layers up through
/// [`ScrollbarAnimationClient::scrollbars_for`](crate::ScrollbarAnimationClient::scrollbars_for)
/// and never hold on to them between calls.
pub trait ScrollbarLayer {
    fn orientation(&self) -> ScrollbarOrientation;

    fn is_overlay_scrollbar(&self) -> bool;

    /// False when the element cannot scroll along this scrollbar's axis.
    /// Such scrollbars are always kept fully transparent.
    fn can_scroll_orientation(&self) -> bool;

    fn set_overlay_scrollbar_opacity(&mut self, opacity: f32);

    fn thumb_thickness_scale_factor(&self) -> f32;

    fn set_thumb_thickness_scale_factor(&mut self, scale: f32);

    /// Track bounds in device viewport space.
    fn track_rect(&self) -> RectF;

    /// Thumb bounds at full thickness, in device viewport space.
    fn thumb_rect(&self) -> RectF;

    fn device_scale_factor(&self) -> f32 {
        1.0
    }

    /// Fast scrollbar mode: a vertical scrollbar stays nearly transparent
    /// while the host renders its own fast-scroll affordance.
    fn uses_fast_scrollbar(&self) -> bool {
        false
    }
}
