use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::board_actor::{BoardError, BoardRequest, BoardSnapshot};
use crate::filter::BranchSelection;

/// Client for interacting with the [`BoardActor`](crate::board_actor::BoardActor).
///
/// Cheap to clone; the actor stops once every clone is dropped.
#[derive(Clone)]
pub struct BoardClient {
    sender: mpsc::Sender<BoardRequest>,
    updates: watch::Receiver<Option<BoardSnapshot>>,
}

impl BoardClient {
    pub fn new(sender: mpsc::Sender<BoardRequest>, updates: watch::Receiver<Option<BoardSnapshot>>) -> Self {
        Self { sender, updates }
    }

    /// Receiver that wakes on every board the actor builds.
    ///
    /// The board current at subscription time counts as already seen;
    /// `changed()` returns an error once the actor has stopped.
    pub fn subscribe(&self) -> watch::Receiver<Option<BoardSnapshot>> {
        let mut updates = self.updates.clone();
        updates.mark_unchanged();
        updates
    }

    /// The latest board, or `None` before the first successful refresh.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Option<BoardSnapshot>, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.send(BoardRequest::Snapshot { respond_to }).await?;
        response.await.map_err(|_| BoardError::ActorDropped)?
    }

    /// Fetches and classifies immediately.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<BoardSnapshot, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.send(BoardRequest::Refresh { respond_to }).await?;
        response.await.map_err(|_| BoardError::ActorDropped)?
    }

    /// Switches the branch selection; the returned board already reflects it.
    #[instrument(skip(self))]
    pub async fn select_branches(&self, branches: BranchSelection) -> Result<BoardSnapshot, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.send(BoardRequest::SelectBranches { branches, respond_to }).await?;
        response.await.map_err(|_| BoardError::ActorDropped)?
    }

    /// Branches seen in the last fetched snapshot, sorted.
    #[instrument(skip(self))]
    pub async fn branches(&self) -> Result<Vec<String>, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.send(BoardRequest::Branches { respond_to }).await?;
        response.await.map_err(|_| BoardError::ActorDropped)?
    }

    async fn send(&self, request: BoardRequest) -> Result<(), BoardError> {
        debug!("Sending request");
        self.sender.send(request).await.map_err(|_| BoardError::ActorClosed)
    }
}
