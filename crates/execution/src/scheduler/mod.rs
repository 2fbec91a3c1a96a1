//! Scheduler for periodic refresh.
//!
//! Tasks fire [`TaskEvent`]s on a channel; the consumer decides what a tick
//! means (re-reading the pool price, reloading balances, ...).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, interval};
use tracing::{debug, info, warn};

/// Refresh interval used when none is configured.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// How often the scheduler checks for due tasks unless told otherwise.
const DEFAULT_RESOLUTION: Duration = Duration::from_secs(1);

/// Schedule type for task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run at fixed intervals.
    Interval(Duration),
    /// Run once after delay.
    Once(Duration),
}

/// A named schedule plus its run bookkeeping. `Once` tasks disable
/// themselves after firing.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    /// Task name, echoed in every [`TaskEvent`].
    pub name: String,
    /// When the task fires.
    pub schedule: Schedule,
    /// Disabled tasks are skipped.
    pub enabled: bool,
    /// Fire on the first check instead of after one period.
    pub run_immediately: bool,
    /// Last time the task fired.
    pub last_run: Option<Instant>,
    /// Next due time; `None` once a `Once` task has fired.
    pub next_run: Option<Instant>,
}

impl ScheduledTask {
    /// Creates a new scheduled task.
    pub fn new(name: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            name: name.into(),
            schedule,
            enabled: true,
            run_immediately: false,
            last_run: None,
            next_run: None,
        }
    }

    /// Disables the task.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Fires the task as soon as the scheduler starts.
    #[must_use]
    pub fn immediately(mut self) -> Self {
        self.run_immediately = true;
        self
    }
}

/// Event sent when a task should run.
#[derive(Debug, Clone)]
pub struct TaskEvent {
    /// Task name.
    pub task_name: String,
    /// Scheduled time.
    pub scheduled_at: Instant,
    /// Actual trigger time.
    pub triggered_at: Instant,
}

/// Stops a running scheduler from another task.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Polls its tasks every `resolution` and emits an event for each due one.
pub struct Scheduler {
    /// Scheduled tasks.
    tasks: Vec<ScheduledTask>,
    /// Event sender.
    event_tx: mpsc::Sender<TaskEvent>,
    /// Event receiver, until taken by the consumer.
    event_rx: Option<mpsc::Receiver<TaskEvent>>,
    /// Running flag, shared with every [`StopHandle`].
    running: Arc<AtomicBool>,
    /// How often due tasks are checked.
    resolution: Duration,
}

impl Scheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            tasks: Vec::new(),
            event_tx: tx,
            event_rx: Some(rx),
            running: Arc::new(AtomicBool::new(false)),
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Sets how often due tasks are checked.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Duration) -> Self {
        self.resolution = resolution.max(Duration::from_millis(1));
        self
    }

    /// Adds a task to the scheduler.
    pub fn add_task(&mut self, task: ScheduledTask) {
        info!(task = %task.name, schedule = ?task.schedule, "Adding task to scheduler");
        self.tasks.push(task);
    }

    /// Takes the event receiver for processing events.
    pub fn take_receiver(&mut self) -> Option<mpsc::Receiver<TaskEvent>> {
        self.event_rx.take()
    }

    /// Handle that stops [`Self::start`] at its next check.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(self.running.clone())
    }

    /// Runs the scheduler until stopped or until the receiver is dropped.
    pub async fn start(&mut self) {
        self.running.store(true, Ordering::SeqCst);

        info!(tasks = self.tasks.len(), "Starting scheduler");

        let now = Instant::now();
        for task in &mut self.tasks {
            task.next_run = Some(if task.run_immediately {
                now
            } else {
                Self::next_run(&task.schedule, now)
            });
        }

        let mut check_interval = interval(self.resolution);

        while self.running.load(Ordering::SeqCst) {
            check_interval.tick().await;
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            let now = Instant::now();
            let mut events_to_send = Vec::new();

            for task in &mut self.tasks {
                if !task.enabled {
                    continue;
                }

                if let Some(next_run) = task.next_run
                    && now >= next_run
                {
                    events_to_send.push(TaskEvent {
                        task_name: task.name.clone(),
                        scheduled_at: next_run,
                        triggered_at: now,
                    });

                    task.last_run = Some(now);
                    match task.schedule {
                        Schedule::Interval(_) => {
                            task.next_run = Some(Self::next_run(&task.schedule, now));
                        }
                        Schedule::Once(_) => {
                            task.next_run = None;
                            task.enabled = false;
                        }
                    }

                    debug!(
                        task = %task.name,
                        next_run = ?task.next_run,
                        "Task triggered"
                    );
                }
            }

            for event in events_to_send {
                let task_name = event.task_name.clone();
                if let Err(e) = self.event_tx.send(event).await {
                    warn!(task = %task_name, error = %e, "Failed to send task event");
                    self.running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }

        info!("Scheduler stopped");
    }

    /// Stops the scheduler.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn next_run(schedule: &Schedule, from: Instant) -> Instant {
        match schedule {
            Schedule::Interval(duration) | Schedule::Once(duration) => from + *duration,
        }
    }

    /// Gets all tasks.
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Checks if the scheduler is running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating common schedules.
pub struct ScheduleBuilder;

impl ScheduleBuilder {
    /// Creates an interval schedule.
    pub fn every(duration: Duration) -> Schedule {
        Schedule::Interval(duration)
    }

    /// Creates a schedule that runs every N seconds.
    pub fn every_secs(secs: u64) -> Schedule {
        Schedule::Interval(Duration::from_secs(secs))
    }

    /// Creates the default price refresh schedule.
    pub fn refresh() -> Schedule {
        Schedule::Interval(DEFAULT_REFRESH_INTERVAL)
    }

    /// Creates a one-time schedule.
    pub fn once_after(delay: Duration) -> Schedule {
        Schedule::Once(delay)
    }
}
