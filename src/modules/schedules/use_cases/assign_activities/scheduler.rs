use crate::modules::schedules::use_cases::assign_activities::handler::AssignActivitiesHandler;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Triggers the activity assignment every `every` until `shutdown` is cancelled.
/// The first trigger happens one period after start.
pub fn spawn_assignment_scheduler(
    handler: Arc<AssignActivitiesHandler>,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(every_secs = every.as_secs(), "assignment scheduler started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(error) = handler.trigger() {
                        tracing::error!(%error, "cannot enqueue activity assignment");
                        break;
                    }
                }
            }
        }
        tracing::info!("assignment scheduler stopped");
    })
}
