//=========================================================================
// Round Scheduler
//=========================================================================
//
// Virtual-time queue for the delayed round transitions (celebration and
// auto-advance).
//
// The host owns the clock: it reports elapsed time through `advance()`,
// which hands back every task that has come due. Each task carries the
// round token it was scheduled for, so the flow controller can drop
// tasks that outlived their round.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::debug;

//=== RoundId =============================================================

/// Identity of one round. Bumped on every load and on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RoundId(pub u64);

impl RoundId {
    pub fn next(self) -> Self {
        RoundId(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== ScheduledTask =======================================================

/// Delayed transitions of a solved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Enter the celebration phase.
    Celebrate(RoundId),

    /// Load the next word.
    Advance(RoundId),
}

impl ScheduledTask {
    pub fn round(&self) -> RoundId {
        match *self {
            ScheduledTask::Celebrate(round) | ScheduledTask::Advance(round) => round,
        }
    }
}

//=== TaskHandle ==========================================================

/// Cancellation handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

//=== Scheduler ===========================================================

#[derive(Debug)]
struct Pending {
    handle: TaskHandle,
    due: Duration,
    task: ScheduledTask,
}

/// Cancellable, virtual-time task queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<Pending>,
}

impl Scheduler {
    /// Creates an empty scheduler with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since construction, as reported by the host.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `task` to come due `delay` from now.
    pub fn schedule(&mut self, delay: Duration, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;

        let due = self.now.saturating_add(delay);
        debug!("Scheduled {:?} at {:?}", task, due);
        self.pending.push(Pending { handle, due, task });
        handle
    }

    /// Cancels a pending task. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        before != self.pending.len()
    }

    /// Cancels every pending task, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Moves the clock forward and returns due tasks in due order.
    ///
    /// Tasks due at the same instant come back in scheduling order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ScheduledTask> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;

        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            std::mem::take(&mut self.pending)
                .into_iter()
                .partition(|p| p.due <= now);
        self.pending = waiting;

        due.sort_by_key(|p| (p.due, p.handle.0));
        due.into_iter().map(|p| p.task).collect()
    }

    //--- Query API --------------------------------------------------------

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const ROUND: RoundId = RoundId(1);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn round_ids_increase() {
        assert_eq!(RoundId::default().next(), RoundId(1));
        assert_eq!(RoundId(7).to_string(), "#7");
    }

    #[test]
    fn tasks_fire_only_once_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), ScheduledTask::Celebrate(ROUND));

        assert!(scheduler.advance(ms(499)).is_empty());
        assert_eq!(
            scheduler.advance(ms(1)),
            vec![ScheduledTask::Celebrate(ROUND)]
        );
        assert!(scheduler.is_empty());
        assert!(scheduler.advance(ms(1000)).is_empty());
    }

    #[test]
    fn due_tasks_come_back_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), ScheduledTask::Advance(ROUND));
        scheduler.schedule(ms(100), ScheduledTask::Celebrate(ROUND));
        scheduler.schedule(ms(300), ScheduledTask::Celebrate(RoundId(2)));

        assert_eq!(
            scheduler.advance(ms(300)),
            vec![
                ScheduledTask::Celebrate(ROUND),
                ScheduledTask::Advance(ROUND),
                ScheduledTask::Celebrate(RoundId(2)),
            ]
        );
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(ms(10), ScheduledTask::Advance(ROUND));

        assert!(scheduler.is_pending(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance(ms(50)).is_empty());
    }

    #[test]
    fn cancel_all_reports_dropped_count() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), ScheduledTask::Celebrate(ROUND));
        scheduler.schedule(ms(20), ScheduledTask::Advance(ROUND));

        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.len(), 0);
    }

    #[test]
    fn delays_are_relative_to_the_current_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance(ms(1000));
        scheduler.schedule(ms(200), ScheduledTask::Advance(ROUND));

        assert!(scheduler.advance(ms(199)).is_empty());
        assert_eq!(scheduler.advance(ms(1)).len(), 1);
        assert_eq!(scheduler.now(), ms(1200));
    }

    #[test]
    fn clock_saturates_instead_of_overflowing() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(500), ScheduledTask::Celebrate(ROUND));

        assert_eq!(scheduler.advance(Duration::MAX).len(), 1);
        assert!(scheduler.advance(ms(1)).is_empty());
        assert_eq!(scheduler.now(), Duration::MAX);

        // Anything scheduled at the end of time is due immediately.
        scheduler.schedule(ms(10), ScheduledTask::Advance(ROUND));
        assert_eq!(
            scheduler.advance(Duration::ZERO),
            vec![ScheduledTask::Advance(ROUND)]
        );
    }

    #[test]
    fn task_reports_its_round() {
        assert_eq!(ScheduledTask::Advance(RoundId(4)).round(), RoundId(4));
    }
}
