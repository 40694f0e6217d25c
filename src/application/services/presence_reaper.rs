//! Presence Reaper
//!
//! Background task that evicts participants who stopped sending heartbeats
//! and records their departure in the message log.
//!
//! Each sweep:
//! 1. selects participants idle at the sweep's start time,
//! 2. appends one departure notice per idle participant (a failed notice is
//!    logged and does not stop the others),
//! 3. removes idle participants in one bulk delete, re-evaluating the idle
//!    predicate at that moment.
//!
//! A heartbeat landing between steps 1 and 3 can go either way; such a
//! participant may get a departure notice and stay registered.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::message_service::{MessageService, MessageServiceImpl};
use crate::domain::{idle_cutoff, MessageKind, ParticipantRepository, BROADCAST, LEAVE_TEXT};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Outcome of a single sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReapReport {
    /// Participants found idle at the start of the sweep
    pub idle: Vec<String>,
    /// Departure notices that could not be appended
    pub failed_notices: usize,
    /// Participants actually removed by the bulk delete
    pub removed: u64,
}

/// Evicts idle participants on a fixed period.
#[derive(Clone)]
pub struct PresenceReaper {
    participant_repo: Arc<dyn ParticipantRepository>,
    message_log: MessageServiceImpl,
    idle_threshold: chrono::Duration,
    period: Duration,
}

impl PresenceReaper {
    pub fn new(
        participant_repo: Arc<dyn ParticipantRepository>,
        message_log: MessageServiceImpl,
        idle_threshold: chrono::Duration,
        period: Duration,
    ) -> Self {
        Self {
            participant_repo,
            message_log,
            idle_threshold,
            period,
        }
    }

    /// Run one sweep.
    ///
    /// Errors only when the directory itself cannot be read or cleaned;
    /// notice failures are counted in the report instead.
    pub async fn run_once(&self) -> Result<ReapReport, AppError> {
        let snapshot = Utc::now();
        let idle = self
            .participant_repo
            .find_idle(idle_cutoff(snapshot, self.idle_threshold))
            .await?;

        if idle.is_empty() {
            return Ok(ReapReport::default());
        }

        let mut failed_notices = 0;
        for participant in &idle {
            if let Err(e) = self
                .message_log
                .append(&participant.name, BROADCAST, LEAVE_TEXT, MessageKind::Status)
                .await
            {
                failed_notices += 1;
                tracing::warn!(
                    name = %participant.name,
                    error = %e,
                    "Failed to append departure notice"
                );
            }
        }

        let removed = self
            .participant_repo
            .delete_idle(idle_cutoff(Utc::now(), self.idle_threshold))
            .await?;

        let idle: Vec<String> = idle.into_iter().map(|p| p.name).collect();
        tracing::info!(
            idle = idle.len(),
            removed,
            failed_notices,
            "Reaped idle participants"
        );

        Ok(ReapReport {
            idle,
            failed_notices,
            removed,
        })
    }

    /// Spawn the recurring sweep on the current runtime.
    ///
    /// The first sweep happens one full period after start.
    pub fn start(self) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // Skip first immediate tick

            tracing::info!(
                period_secs = self.period.as_secs_f64(),
                idle_threshold_secs = self.idle_threshold.num_seconds(),
                "Presence reaper started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.run_once().await {
                            Ok(report) => metrics::record_reaper_run(Some(report.removed)),
                            Err(e) => {
                                metrics::record_reaper_run(None);
                                tracing::error!(error = %e, "Presence sweep failed, retrying next tick");
                            }
                        }
                    }
                    // Fires on stop() and when the handle is dropped.
                    _ = &mut shutdown_rx => break,
                }
            }

            tracing::info!("Presence reaper stopped");
        });

        ReaperHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Running reaper. Dropping the handle also stops the task.
pub struct ReaperHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signal the task and wait for the in-flight sweep, if any, to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::error!(error = %e, "Presence reaper task panicked");
        }
    }

    /// Whether the background task is still alive.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}
