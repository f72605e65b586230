use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::board_actor::BoardActor;
use crate::clients::BoardClient;
use crate::runtime::{BoardSettings, SettingsError};
use crate::source::OrderSource;

const REQUEST_BUFFER: usize = 32;

/// Runtime orchestrator for a single board.
///
/// `BoardSystem` is responsible for:
/// - **Validation**: Rejecting bad settings before anything is spawned
/// - **Lifecycle Management**: Starting the board actor and stopping it again
/// - **Clock Injection**: Handing the actor the clock every pass is judged against
///
/// # Example
///
/// ```ignore
/// let source = Arc::new(JsonFileSource::new("snapshot.json"));
/// let system = BoardSystem::new(source, &BoardSettings::default())?;
///
/// let snapshot = system.board_client.refresh().await?;
/// println!("{}", render_board(&snapshot.board, &snapshot.timings));
///
/// system.shutdown().await?;
/// ```
pub struct BoardSystem {
    /// Client for the running board actor.
    pub board_client: BoardClient,

    handle: tokio::task::JoinHandle<()>,
}

impl BoardSystem {
    /// Starts a board driven by the wall clock.
    ///
    /// See [`with_clock`](Self::with_clock) for what happens on startup.
    pub fn new(source: Arc<dyn OrderSource>, settings: &BoardSettings) -> Result<Self, SettingsError> {
        Self::with_clock(source, settings, Utc::now)
    }

    /// Starts a board driven by `now_fn`.
    ///
    /// This method:
    /// 1. Validates the settings into a classifier config and a refresh interval
    /// 2. Creates the [`BoardActor`] and its client
    /// 3. Spawns the actor in its own Tokio task, where it refreshes once
    ///    before serving any request
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// A running `BoardSystem`, or the [`SettingsError`] that stopped it from
    /// starting. Nothing is spawned when the settings are invalid.
    pub fn with_clock(
        source: Arc<dyn OrderSource>,
        settings: &BoardSettings,
        now_fn: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Result<Self, SettingsError> {
        // 1. Validate everything up front
        let config = settings.classifier_config()?;
        let refresh_every = settings.refresh_interval()?;

        // 2. Create the actor; the request buffer bounds queued client calls
        let (actor, board_client) = BoardActor::new(
            REQUEST_BUFFER,
            source,
            config,
            settings.snapshot_filter(),
            refresh_every,
            now_fn,
        );

        // 3. Run it in the background
        let handle = tokio::spawn(actor.run());

        Ok(Self { board_client, handle })
    }

    /// Gracefully shuts down the board.
    ///
    /// # Shutdown Process
    ///
    /// 1. Drops this system's [`BoardClient`], closing the request channel
    /// 2. The actor finishes the request or refresh in progress and exits its loop
    /// 3. Subscribers see the update channel close
    /// 4. Waits for the actor task to complete
    ///
    /// Any other clones of the client must be dropped first, otherwise this
    /// waits for them.
    ///
    /// # Returns
    ///
    /// `Ok(())` once the actor has stopped, or an error describing a panicked
    /// or cancelled actor task.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down board...");

        // Closing the last sender ends the actor's receive loop
        drop(self.board_client);

        if let Err(e) = self.handle.await {
            error!("Board task failed: {:?}", e);
            return Err(format!("Board task failed: {:?}", e));
        }

        info!("Board shutdown complete.");
        Ok(())
    }
}
