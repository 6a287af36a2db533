use crate::modules::schedules::adapters::outbound::activity_assigner::ActivityAssigner;
use crate::modules::schedules::use_cases::assign_activities::handler::AssignActivitiesHandler;
use crate::modules::schedules::use_cases::assign_activities::scheduler::spawn_assignment_scheduler;
use crate::shared::infrastructure::job_queue::JobQueue;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct Workers {
    pub job_queue: JoinHandle<()>,
    pub scheduler: JoinHandle<()>,
}

impl Workers {
    /// Starts the job queue worker and the periodic assignment trigger.
    pub fn start(
        assigner: Arc<dyn ActivityAssigner>,
        assignment_interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        let (queue, job_queue) = JobQueue::start(shutdown.clone());
        let handler = Arc::new(AssignActivitiesHandler::new(queue, assigner));
        let scheduler = spawn_assignment_scheduler(handler, assignment_interval, shutdown);
        Self {
            job_queue,
            scheduler,
        }
    }

    pub async fn join(self) {
        if let Err(error) = self.scheduler.await {
            tracing::error!(%error, "assignment scheduler ended abnormally");
        }
        if let Err(error) = self.job_queue.await {
            tracing::error!(%error, "job queue worker ended abnormally");
        }
    }
}
