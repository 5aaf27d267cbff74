//=========================================================================
// Gesture Collector
//=========================================================================
//
// Drains gestures sent by the external input layer with bounded polling.
//
// Architecture:
//   Sender<GestureEvent> (input layer) → Receiver → collect() → gestures
//
// Bounded draining keeps one pump from starving the rest of the frame
// when the input layer floods the channel.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::GestureEvent;

//=== CollectStatus =======================================================

/// Channel state after a collection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CollectStatus {
    Continue,
    /// Every sender is gone; no further gestures will arrive.
    Disconnected,
}

//=== GestureCollector ====================================================

/// Collects pending gestures, at most `batch_limit` per pass.
pub(crate) struct GestureCollector {
    receiver: Receiver<GestureEvent>,
    gestures: Vec<GestureEvent>,
    batch_limit: usize,
}

impl GestureCollector {
    pub fn new(receiver: Receiver<GestureEvent>, batch_limit: usize) -> Self {
        Self {
            receiver,
            gestures: Vec::with_capacity(8),
            batch_limit: batch_limit.max(1),
        }
    }

    /// Collects pending gestures, replacing the previous batch.
    ///
    /// Gestures received before a disconnect are still kept for this pass.
    pub fn collect(&mut self) -> CollectStatus {
        self.gestures.clear();

        while self.gestures.len() < self.batch_limit {
            match self.receiver.try_recv() {
                Ok(gesture) => self.gestures.push(gesture),
                Err(TryRecvError::Empty) => return CollectStatus::Continue,
                Err(TryRecvError::Disconnected) => return CollectStatus::Disconnected,
            }
        }

        warn!(
            "Gesture backlog: drained {} gestures this pass, {} still queued",
            self.gestures.len(),
            self.receiver.len()
        );
        CollectStatus::Continue
    }

    /// Returns gestures collected by the last pass.
    #[cfg(test)]
    pub fn gestures(&self) -> &[GestureEvent] {
        &self.gestures
    }

    /// Takes ownership of the collected gestures, leaving an empty batch.
    pub fn take_gestures(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.gestures)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::TileId;
    use crossbeam_channel::unbounded;

    fn drop_on(slot: usize) -> GestureEvent {
        GestureEvent::DropOnSlot {
            tile: TileId(0),
            slot,
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<GestureEvent>();
        let mut collector = GestureCollector::new(rx, 100);

        assert_eq!(collector.collect(), CollectStatus::Continue);
        assert!(collector.gestures().is_empty());
    }

    #[test]
    fn collect_keeps_arrival_order() {
        let (tx, rx) = unbounded();
        let mut collector = GestureCollector::new(rx, 100);

        tx.send(drop_on(0)).unwrap();
        tx.send(GestureEvent::ReturnToTray { slot: 0 }).unwrap();
        tx.send(drop_on(1)).unwrap();

        collector.collect();
        assert_eq!(
            collector.gestures(),
            &[drop_on(0), GestureEvent::ReturnToTray { slot: 0 }, drop_on(1)]
        );
    }

    #[test]
    fn collect_is_bounded_per_pass() {
        let (tx, rx) = unbounded();
        let mut collector = GestureCollector::new(rx, 2);

        for slot in 0..5 {
            tx.send(drop_on(slot)).unwrap();
        }

        assert_eq!(collector.collect(), CollectStatus::Continue);
        assert_eq!(collector.gestures().len(), 2);

        collector.collect();
        assert_eq!(collector.gestures(), &[drop_on(2), drop_on(3)]);

        collector.collect();
        assert_eq!(collector.gestures(), &[drop_on(4)]);
    }

    #[test]
    fn collect_clears_previous_batch() {
        let (tx, rx) = unbounded();
        let mut collector = GestureCollector::new(rx, 10);

        tx.send(drop_on(0)).unwrap();
        collector.collect();
        assert_eq!(collector.gestures().len(), 1);

        collector.collect();
        assert!(collector.gestures().is_empty());
    }

    #[test]
    fn collect_reports_disconnect_after_draining() {
        let (tx, rx) = unbounded();
        let mut collector = GestureCollector::new(rx, 10);

        tx.send(drop_on(1)).unwrap();
        drop(tx);

        assert_eq!(collector.collect(), CollectStatus::Disconnected);
        assert_eq!(collector.take_gestures(), vec![drop_on(1)]);
        assert!(collector.gestures().is_empty());
    }
}
