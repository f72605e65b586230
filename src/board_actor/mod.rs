//! # Board Actor
//!
//! Owns everything that changes between refreshes: the last fetched records,
//! the branch selection, and the last generated board. It runs in its own
//! Tokio task and processes requests sequentially, so none of that state needs
//! a lock.
//!
//! ## Refresh cycle
//!
//! The actor refreshes once before serving any request, then again on every
//! tick of its interval. A refresh:
//! 1. fetches rows from its [`OrderSource`],
//! 2. converts them into [`OrderRecord`]s in the operating timezone,
//! 3. applies the [`SnapshotFilter`],
//! 4. runs [`classify`] against the clock's current instant,
//! 5. publishes the result to every [`BoardClient::subscribe`] receiver.
//!
//! Each pass works on its own copy of the records and produces an independent
//! board. A failed fetch keeps the previous board on display.
//!
//! Stage timings cover every fetched record, not only the visible ones, so
//! the operations averages describe the whole view.
//!
//! ## Shutdown
//!
//! The loop exits once every [`BoardClient`] has been dropped.

pub mod error;

pub use error::*;

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::classifier::{classify, ClassifierConfig};
use crate::clients::BoardClient;
use crate::domain::{Board, OrderRecord};
use crate::filter::{available_branches, BranchSelection, SnapshotFilter};
use crate::metrics::{stage_timings, StageTiming};
use crate::source::OrderSource;

const MIN_REFRESH_INTERVAL: StdDuration = StdDuration::from_secs(1);

/// One-shot channel used to answer a request.
pub type Response<T> = oneshot::Sender<Result<T, BoardError>>;

/// What the renderer receives: the classified board and the stage timings of
/// the same records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub board: Board,
    pub timings: Vec<StageTiming>,
}

/// Requests served by the [`BoardActor`].
#[derive(Debug)]
pub enum BoardRequest {
    /// Latest board, or `None` if no refresh has succeeded yet.
    Snapshot { respond_to: Response<Option<BoardSnapshot>> },
    /// Fetch and classify now.
    Refresh { respond_to: Response<BoardSnapshot> },
    /// Change the branch selection and re-classify the cached records.
    SelectBranches {
        branches: BranchSelection,
        respond_to: Response<BoardSnapshot>,
    },
    /// Branches present in the last fetched snapshot.
    Branches { respond_to: Response<Vec<String>> },
}

/// The actor that keeps a board fresh.
pub struct BoardActor {
    receiver: mpsc::Receiver<BoardRequest>,
    source: Arc<dyn OrderSource>,
    config: ClassifierConfig,
    filter: SnapshotFilter,
    refresh_every: StdDuration,
    now_fn: Box<dyn Fn() -> DateTime<Utc> + Send + Sync>,
    records: Vec<OrderRecord>,
    latest: Option<BoardSnapshot>,
    updates: watch::Sender<Option<BoardSnapshot>>,
    refreshes: u64,
}

impl BoardActor {
    /// Creates the actor and its client.
    ///
    /// `now_fn` is the clock used for every pass; production code passes
    /// `Utc::now`, tests pass a fixed instant.
    pub fn new(
        buffer_size: usize,
        source: Arc<dyn OrderSource>,
        config: ClassifierConfig,
        filter: SnapshotFilter,
        refresh_every: StdDuration,
        now_fn: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> (Self, BoardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (updates, board_updates) = watch::channel(None);
        let actor = Self {
            receiver,
            source,
            config,
            filter,
            refresh_every: refresh_every.max(MIN_REFRESH_INTERVAL),
            now_fn: Box::new(now_fn),
            records: Vec::new(),
            latest: None,
            updates,
            refreshes: 0,
        };
        (actor, BoardClient::new(sender, board_updates))
    }

    /// Runs the refresh loop until every client is gone.
    pub async fn run(mut self) {
        info!(layout = ?self.config.layout(), every = ?self.refresh_every, "Board actor started");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Initial refresh failed, no board yet");
        }

        let mut ticker = tokio::time::interval_at(Instant::now() + self.refresh_every, self.refresh_every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = ticker.tick() => {
                    if let Err(e) = self.refresh().await {
                        warn!(error = %e, "Scheduled refresh failed, keeping previous board");
                    }
                }
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    self.handle(msg).await;
                }
            }
        }

        info!(refreshes = self.refreshes, "Board actor shutdown");
    }

    async fn handle(&mut self, msg: BoardRequest) {
        match msg {
            BoardRequest::Snapshot { respond_to } => {
                debug!(ready = self.latest.is_some(), "Snapshot");
                let _ = respond_to.send(Ok(self.latest.clone()));
            }
            BoardRequest::Refresh { respond_to } => {
                debug!("Refresh requested");
                let result = self.refresh().await;
                if let Err(e) = &result {
                    warn!(error = %e, "Requested refresh failed");
                }
                let _ = respond_to.send(result);
            }
            BoardRequest::SelectBranches { branches, respond_to } => {
                debug!(?branches, "Select branches");
                self.filter.branches = branches;
                let _ = respond_to.send(Ok(self.rebuild()));
            }
            BoardRequest::Branches { respond_to } => {
                let _ = respond_to.send(Ok(available_branches(&self.records)));
            }
        }
    }

    async fn refresh(&mut self) -> Result<BoardSnapshot, BoardError> {
        let rows = self.source.fetch().await?;
        let tz = self.config.timezone();
        self.records = rows.into_iter().map(|row| row.into_record(&tz)).collect();
        self.refreshes += 1;
        Ok(self.rebuild())
    }

    /// Re-classifies the cached records against the current instant.
    fn rebuild(&mut self) -> BoardSnapshot {
        let now: DateTime<Tz> = (self.now_fn)().with_timezone(&self.config.timezone());
        let visible = self.filter.apply(self.records.clone(), &now);

        let snapshot = BoardSnapshot {
            timings: stage_timings(&self.records),
            board: classify(&visible, now, &self.config),
        };
        info!(
            fetched = self.records.len(),
            visible = visible.len(),
            placed = snapshot.board.total(),
            "Board refreshed"
        );
        self.latest = Some(snapshot.clone());
        self.updates.send_replace(self.latest.clone());
        snapshot
    }
}
