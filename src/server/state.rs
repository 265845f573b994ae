//! Server state management for the stitching server

use crate::board::Board;
use crate::stitch::{ItemId, PlacementResult, RemovalResult, StitchContext};

/// A plan waiting for an Apply request
#[derive(Clone, Debug)]
pub enum PendingPlan {
    Fill {
        zone_id: ItemId,
        plan: PlacementResult,
    },
    Clear {
        zone_id: ItemId,
        plan: RemovalResult,
    },
}

/// In-memory state: the loaded board and the last plan
pub struct ServerState {
    pub board_path: Option<String>,
    pub board: Option<Board>,
    pub context: StitchContext,
    pub pending: Option<PendingPlan>,
    /// Board changed since the last Load or Save
    pub dirty: bool,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            board_path: None,
            board: None,
            context: StitchContext::default(),
            pending: None,
            dirty: false,
        }
    }

    /// Check if a board is loaded
    pub fn is_file_loaded(&self) -> bool {
        self.board.is_some()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
