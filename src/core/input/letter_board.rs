//=========================================================================
// Letter Board
//=========================================================================
//
// Slot/tile occupancy model behind the drag/drop surface.
//
// Architecture:
//   GestureEvent → apply() → tiles[] + slots[] → BoardOutcome
//                                                  ├─ moves (letterMoved)
//                                                  └─ filled (allSlotsFilled)
//
// Fill reporting: `filled` is raised once per distinct full arrangement.
// Re-arranging a full board reports again; re-applying a gesture that
// leaves the arrangement as it was does not. Emptying any slot forgets
// the last reported arrangement.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{GestureEvent, TileId, TilePosition};

//=== BoardOutcome ========================================================

/// One tile changing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub tile: TileId,
    pub from: TilePosition,
    pub to: TilePosition,
}

/// Result of applying one gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardOutcome {
    pub moves: Vec<TileMove>,
    /// True when this gesture produced a new full arrangement.
    pub filled: bool,
}

//=== LetterBoard =========================================================

#[derive(Debug, Clone)]
struct Tile {
    letter: char,
    position: TilePosition,
}

/// Tracks which tile sits in which slot.
#[derive(Debug, Default)]
pub struct LetterBoard {
    tiles: Vec<Tile>,
    slots: Vec<Option<TileId>>,
    last_reported: Option<String>,
}

impl LetterBoard {
    /// Creates an empty board with no tiles and no slots.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Round Setup ------------------------------------------------------

    /// Deals one tile per char of `scrambled` into the tray and opens
    /// `slot_count` empty slots.
    pub fn load(&mut self, scrambled: &str, slot_count: usize) {
        self.tiles = scrambled
            .chars()
            .map(|letter| Tile {
                letter,
                position: TilePosition::Tray,
            })
            .collect();
        self.slots = vec![None; slot_count];
        self.last_reported = None;
        debug!("Board loaded: {} tiles, {} slots", self.tiles.len(), slot_count);
    }

    /// Removes all tiles and slots.
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.slots.clear();
        self.last_reported = None;
    }

    //--- Gestures ---------------------------------------------------------

    /// Applies a gesture from the input layer.
    ///
    /// Gestures naming unknown tiles or slots are logged and ignored.
    pub fn apply(&mut self, gesture: GestureEvent) -> BoardOutcome {
        let moves = match gesture {
            GestureEvent::DropOnSlot { tile, slot } => self.drop_on_slot(tile, slot),
            GestureEvent::ReturnToTray { slot } => self.return_to_tray(slot),
            GestureEvent::SwapSlots { a, b } => self.swap_slots(a, b),
        };

        let Some(moves) = moves else {
            warn!("Ignoring gesture outside the board: {:?}", gesture);
            return BoardOutcome::default();
        };

        let filled = self.check_filled();
        BoardOutcome { moves, filled }
    }

    /// Moves a tile carrying `letter` into `slot`, preferring tray tiles
    /// over tiles already placed elsewhere.
    ///
    /// Returns `None` if no such tile exists or `slot` is out of range.
    /// When `slot` already holds that letter nothing moves.
    pub fn place_letter(&mut self, letter: char, slot: usize) -> Option<BoardOutcome> {
        if slot >= self.slots.len() {
            return None;
        }
        if self.slot(slot).map(|tile| self.tiles[tile.0].letter) == Some(letter) {
            return Some(BoardOutcome::default());
        }

        let candidates = || {
            self.tiles
                .iter()
                .enumerate()
                .filter(move |(_, t)| t.letter == letter)
        };
        let tile = candidates()
            .find(|(_, t)| t.position == TilePosition::Tray)
            .or_else(|| candidates().next())
            .map(|(index, _)| TileId(index))?;

        Some(self.apply(GestureEvent::DropOnSlot { tile, slot }))
    }

    //--- Query API --------------------------------------------------------

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the tile occupying `slot`, if any.
    pub fn slot(&self, slot: usize) -> Option<TileId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn letter(&self, tile: TileId) -> Option<char> {
        self.tiles.get(tile.0).map(|t| t.letter)
    }

    pub fn position(&self, tile: TileId) -> Option<TilePosition> {
        self.tiles.get(tile.0).map(|t| t.position)
    }

    /// True when there is at least one slot and every slot is occupied.
    pub fn is_full(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// Letters in slot order; empty slots are skipped.
    pub fn assembled_answer(&self) -> String {
        self.slots
            .iter()
            .flatten()
            .map(|tile| self.tiles[tile.0].letter)
            .collect()
    }

    //--- Internal Helpers -------------------------------------------------

    fn drop_on_slot(&mut self, tile: TileId, slot: usize) -> Option<Vec<TileMove>> {
        let from = self.position(tile)?;
        if slot >= self.slots.len() {
            return None;
        }

        let to = TilePosition::Slot(slot);
        if from == to {
            return Some(Vec::new());
        }

        let mut moves = vec![TileMove { tile, from, to }];
        let displaced = self.slots[slot];

        if let TilePosition::Slot(previous) = from {
            self.slots[previous] = None;
        }
        if let Some(other) = displaced {
            // The displaced tile takes the dragged tile's old place.
            if let TilePosition::Slot(previous) = from {
                self.slots[previous] = Some(other);
            }
            self.tiles[other.0].position = from;
            moves.push(TileMove {
                tile: other,
                from: to,
                to: from,
            });
        }

        self.slots[slot] = Some(tile);
        self.tiles[tile.0].position = to;
        Some(moves)
    }

    fn return_to_tray(&mut self, slot: usize) -> Option<Vec<TileMove>> {
        let occupant = *self.slots.get(slot)?;
        let Some(tile) = occupant else {
            return Some(Vec::new());
        };

        self.slots[slot] = None;
        self.tiles[tile.0].position = TilePosition::Tray;
        Some(vec![TileMove {
            tile,
            from: TilePosition::Slot(slot),
            to: TilePosition::Tray,
        }])
    }

    fn swap_slots(&mut self, a: usize, b: usize) -> Option<Vec<TileMove>> {
        if a >= self.slots.len() || b >= self.slots.len() {
            return None;
        }
        if a == b {
            return Some(Vec::new());
        }

        self.slots.swap(a, b);
        let mut moves = Vec::with_capacity(2);
        for (slot, from) in [(a, b), (b, a)] {
            if let Some(tile) = self.slots[slot] {
                self.tiles[tile.0].position = TilePosition::Slot(slot);
                moves.push(TileMove {
                    tile,
                    from: TilePosition::Slot(from),
                    to: TilePosition::Slot(slot),
                });
            }
        }
        Some(moves)
    }

    fn check_filled(&mut self) -> bool {
        if !self.is_full() {
            self.last_reported = None;
            return false;
        }

        let arrangement = self.assembled_answer();
        if self.last_reported.as_deref() == Some(arrangement.as_str()) {
            return false;
        }

        debug!("All slots filled: '{}'", arrangement);
        self.last_reported = Some(arrangement);
        true
    }
}

//=========================================================================
// Tests
//=========================================================================
