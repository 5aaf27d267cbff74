//=========================================================================
// Gesture Types
//
// Normalized drag/drop gestures as delivered by the external pointer and
// touch layer. Geometry, hit-testing and drag visuals stay on that side;
// the core only sees which tile ended up where.
//
//=========================================================================

//=== TileId ==============================================================
// Index of a letter tile in the order the scrambled word was dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub usize);

//=== TilePosition ========================================================
// Where a tile currently sits: the tray it was dealt into, or a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilePosition {
    Tray,
    Slot(usize),
}

//=== GestureEvent ========================================================
// Completed gestures. Drag-in-progress feedback is not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// A tile was dropped onto a slot. An occupied slot swaps its tile
    /// into the dragged tile's previous position.
    DropOnSlot { tile: TileId, slot: usize },

    /// The tile in `slot` was dragged back to the tray.
    ReturnToTray { slot: usize },

    /// The contents of two slots were exchanged.
    SwapSlots { a: usize, b: usize },
}

//=========================================================================
// Unit Tests
//=========================================================================
