use std::time::{Duration, Instant};

use crate::scrollbar::ElementId;

/// Token for a posted delayed animation start.
///
/// Only the most recently posted token of a controller is live; delivering
/// an older one is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DelayedAnimationTask {
    scroll_element_id: ElementId,
    generation: u64,
}

impl DelayedAnimationTask {
    pub fn scroll_element_id(&self) -> ElementId {
        self.scroll_element_id
    }
}

/// Single-slot cancellable delayed callback, owned by a controller.
#[derive(Debug, Default)]
pub(crate) struct DelayedAnimation {
    generation: u64,
    pending: bool,
}

impl DelayedAnimation {
    pub(crate) fn cancel(&mut self) {
        self.pending = false;
    }

    /// Invalidate any previous task and hand out a fresh one.
    pub(crate) fn reset(&mut self, scroll_element_id: ElementId) -> DelayedAnimationTask {
        self.generation = self.generation.wrapping_add(1);
        self.pending = true;
        DelayedAnimationTask {
            scroll_element_id,
            generation: self.generation,
        }
    }

    /// Consume the pending slot if `task` is the live one.
    pub(crate) fn take(&mut self, task: DelayedAnimationTask) -> bool {
        if self.pending && self.generation == task.generation {
            self.pending = false;
            true
        } else {
            false
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    due: Instant,
    task: DelayedAnimationTask,
}

/// Host-side store for posted tasks, drained as their delays elapse.
#[derive(Debug, Default)]
pub struct DelayedTaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl DelayedTaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&mut self, task: DelayedAnimationTask, now: Instant, delay: Duration) {
        self.tasks.push(ScheduledTask {
            due: now + delay,
            task,
        });
    }

    /// Earliest due time, if anything is queued.
    pub fn next_due(&self) -> Option<Instant> {
        self.tasks.iter().map(|scheduled| scheduled.due).min()
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<DelayedAnimationTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|scheduled| scheduled.due <= now);
        self.tasks = pending;
        due.sort_by_key(|scheduled| scheduled.due);
        due.into_iter().map(|scheduled| scheduled.task).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_invalidates_previous_task() {
        let mut delayed = DelayedAnimation::default();
        let first = delayed.reset(ElementId(1));
        let second = delayed.reset(ElementId(1));

        assert_ne!(first, second);
        assert!(!delayed.take(first));
        assert!(delayed.is_pending());
        assert!(delayed.take(second));
        assert!(!delayed.is_pending());
        // A live task fires at most once
        assert!(!delayed.take(second));
    }

    #[test]
    fn test_cancel_drops_pending_task() {
        let mut delayed = DelayedAnimation::default();
        let task = delayed.reset(ElementId(7));
        delayed.cancel();

        assert!(!delayed.is_pending());
        assert!(!delayed.take(task));
        assert_eq!(task.scroll_element_id(), ElementId(7));
    }

    #[test]
    fn test_queue_take_due_in_order() {
        let mut delayed = DelayedAnimation::default();
        let mut queue = DelayedTaskQueue::new();
        let now = Instant::now();

        let late = delayed.reset(ElementId(1));
        queue.post(late, now, Duration::from_millis(300));
        let early = delayed.reset(ElementId(2));
        queue.post(early, now, Duration::from_millis(100));
        let later = delayed.reset(ElementId(3));
        queue.post(later, now, Duration::from_millis(900));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.next_due(), Some(now + Duration::from_millis(100)));

        assert!(queue.take_due(now + Duration::from_millis(50)).is_empty());
        assert_eq!(queue.take_due(now + Duration::from_millis(300)), vec![early, late]);
        assert_eq!(queue.len(), 1);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_due(), None);
    }
}
