//=========================================================================
// Input Adapter
//
// Core-side half of the drag/drop layer. Raw pointer and touch handling
// lives outside the crate and reports completed gestures over a channel;
// this module turns them into board state and fill notifications.
//
// Responsibilities:
// - Define the normalized gesture vocabulary
// - Drain gestures from the input layer in bounded batches
// - Track slot occupancy and detect new full arrangements
//
//=========================================================================

//=== Submodules ==========================================================

mod gesture;
mod gesture_collector;
mod letter_board;

//=== Public API ==========================================================

pub use gesture::{GestureEvent, TileId, TilePosition};
pub(crate) use gesture_collector::{CollectStatus, GestureCollector};
pub use letter_board::{BoardOutcome, LetterBoard, TileMove};
