//! Timed forward stepping on a background task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::playback::{PlaybackSpeed, PlaybackState, PlaybackStatus};
use crate::session::{Session, Tick};

/// Session handle shared by the server and the autoplay task.
pub type SharedSession = Arc<RwLock<Session>>;

/// Drives `step_forward` on a fixed interval until the trace runs out.
///
/// At most one task runs at a time. Stopping aborts the task; ticks that are
/// already waiting on the session lock are dropped by the session's epoch
/// check.
pub struct Autoplay {
    session: SharedSession,
    base_interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Autoplay {
    pub fn new(session: SharedSession, base_interval: Duration) -> Self {
        Self {
            session,
            base_interval,
            task: Mutex::new(None),
        }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Start playing, replacing any running task.
    pub async fn play(&self) -> Result<PlaybackStatus> {
        let mut task = self.task.lock().await;
        let mut session = self.session.write().await;
        self.launch(&mut task, &mut session)
    }

    /// Spawn a fresh task for the session. Callers hold both locks.
    fn launch(
        &self,
        task: &mut Option<JoinHandle<()>>,
        session: &mut Session,
    ) -> Result<PlaybackStatus> {
        if let Some(handle) = task.take() {
            handle.abort();
        }

        let epoch = session.begin_play()?;
        let period = session.speed().interval(self.base_interval);
        let status = session.status();

        tracing::info!(
            "Autoplay started at step {}/{} every {:?}",
            status.position,
            status.total_steps,
            period
        );
        *task = Some(tokio::spawn(run(Arc::clone(&self.session), epoch, period)));
        Ok(status)
    }

    /// Stop playing, keeping the position.
    pub async fn pause(&self) -> PlaybackStatus {
        self.cancel().await;
        let mut session = self.session.write().await;
        session.pause();
        session.status()
    }

    /// Abort the running task, if any.
    pub async fn cancel(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
            tracing::debug!("Autoplay task aborted");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Change speed; a running playback continues from where it is.
    ///
    /// The state check and the restart share one hold of both locks.
    pub async fn set_speed(&self, speed: PlaybackSpeed) -> Result<PlaybackStatus> {
        let mut task = self.task.lock().await;
        let mut session = self.session.write().await;
        session.set_speed(speed);
        if session.state() == PlaybackState::Playing {
            self.launch(&mut task, &mut session)
        } else {
            Ok(session.status())
        }
    }
}

async fn run(session: SharedSession, epoch: u64, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let tick = session.write().await.tick(epoch);
        match tick {
            Tick::Applied => {}
            Tick::Finished => {
                tracing::info!("Autoplay finished");
                break;
            }
            Tick::Stale => {
                tracing::debug!("Autoplay epoch {} superseded", epoch);
                break;
            }
        }
    }
}
