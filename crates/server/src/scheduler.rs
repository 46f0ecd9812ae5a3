// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Periodic lifecycle checks.
//!
//! The loop runs the scheduled checks once at startup and then on a fixed
//! period. Ticks missed while a check was running are skipped, not
//! replayed.

use std::sync::Arc;
use std::time::Duration;

use rinkside::SignupStore;
use rinkside_api::{ScheduledCheckReport, SignupService};
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Period in production.
pub const DEFAULT_TICK: Duration = Duration::from_secs(30);

/// Period with `--dev`.
pub const DEV_TICK: Duration = Duration::from_secs(5);

/// Scheduler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time between checks.
    pub period: Duration,
}

impl SchedulerConfig {
    /// Picks the period from the command line.
    ///
    /// An explicit `tick_seconds` wins over `dev`.
    #[must_use]
    pub fn from_args(tick_seconds: Option<u64>, dev: bool) -> Self {
        let period: Duration = match tick_seconds {
            Some(seconds) => Duration::from_secs(seconds.max(1)),
            None if dev => DEV_TICK,
            None => DEFAULT_TICK,
        };
        Self { period }
    }
}

/// Starts the scheduler loop on the tokio runtime.
pub fn spawn<S>(service: Arc<SignupService<S>>, config: SchedulerConfig) -> JoinHandle<()>
where
    S: SignupStore + Send + 'static,
{
    info!(period_secs = config.period.as_secs(), "Starting scheduler");
    tokio::spawn(run(service, config))
}

async fn run<S>(service: Arc<SignupService<S>>, config: SchedulerConfig)
where
    S: SignupStore + Send + 'static,
{
    let mut interval: Interval = tokio::time::interval(config.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // The first tick completes immediately
        interval.tick().await;
        let report: ScheduledCheckReport = service.run_scheduled_checks().await;
        log_report(&report);
    }
}

fn log_report(report: &ScheduledCheckReport) {
    if report.reset || report.released || report.gate_changed {
        info!(
            reset = report.reset,
            released = report.released,
            gate_changed = report.gate_changed,
            "Scheduled check applied changes"
        );
    } else {
        debug!("Scheduled check, no changes");
    }
    if report.failed_writes > 0 {
        warn!(
            failed_writes = report.failed_writes,
            "Scheduled check could not persist every change"
        );
    }
}
