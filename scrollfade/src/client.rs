use std::time::Duration;

use crate::scheduler::DelayedAnimationTask;
use crate::scrollbar::{ElementId, ScrollbarLayer};

/// Capabilities a host provides to scrollbar animation controllers.
///
/// The host passes itself into every controller call that may call back, so
/// all calls stay on the host's sequence and nothing is shared.
pub trait ScrollbarAnimationClient {
    /// The scrollbar layers currently attached to `scroll_element_id`.
    fn scrollbars_for(&mut self, scroll_element_id: ElementId) -> Vec<&mut dyn ScrollbarLayer>;

    /// Request another `animate` tick.
    fn set_needs_animate_for_scrollbar_animation(&mut self);

    /// Request a redraw without necessarily requesting another tick.
    fn set_needs_redraw_for_scrollbar_animation(&mut self);

    /// Scrollbars went from hidden to visible or back.
    fn did_change_scrollbar_visibility(&mut self);

    /// Deliver `task` back to the controller through
    /// [`run_delayed_animation`](crate::ScrollbarAnimationController::run_delayed_animation)
    /// once `delay` has elapsed. Tasks the controller has since cancelled are
    /// ignored when delivered, so the host never needs to drop them itself.
    fn post_delayed_scrollbar_animation_task(&mut self, task: DelayedAnimationTask, delay: Duration);
}
