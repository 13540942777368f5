// src/startup.rs
// DOCUMENTATION: Ordered startup protocol for the database layer
// PURPOSE: Decide whether the process may begin serving traffic

use crate::config::{connect_pool, Config};
use crate::db::schema::{apply_schema, SCHEMA_SCRIPT};
use crate::errors::ApiError;
use sqlx::PgPool;
use std::time::Duration;

/// Bounded-attempt, fixed-delay retry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        RetryPolicy {
            attempts: config.db_connect_attempts,
            delay: Duration::from_secs(config.db_connect_delay_secs),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }
}

/// Startup state machine phases
/// DOCUMENTATION: Connecting -> Initializing -> Probing -> Ready, with Failed
/// as the single terminal failure state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    Connecting,
    Initializing,
    Probing,
    Ready,
    Failed,
}

/// Operations the sequencer drives
/// DOCUMENTATION: Production wires this to the real pool; tests inject
/// scripted outcomes and a recording pause so no wall-clock waits happen
pub trait StartupOps {
    async fn connect(&mut self) -> Result<(), String>;
    async fn initialize(&mut self) -> Result<(), String>;
    async fn probe(&mut self) -> Result<(), String>;
    async fn pause(&mut self, delay: Duration);
}

enum RetriedStep {
    Connect,
    Probe,
}

impl RetriedStep {
    fn label(&self) -> &'static str {
        match self {
            RetriedStep::Connect => "database connection",
            RetriedStep::Probe => "connectivity probe",
        }
    }
}

/// Startup sequencer
/// DOCUMENTATION: Records every phase transition so the path taken is
/// observable after the fact
pub struct StartupSequencer {
    policy: RetryPolicy,
    phases: Vec<StartupPhase>,
}

impl StartupSequencer {
    pub fn new(policy: RetryPolicy) -> Self {
        StartupSequencer {
            policy,
            phases: Vec::new(),
        }
    }

    pub fn phases(&self) -> &[StartupPhase] {
        &self.phases
    }

    fn enter(&mut self, phase: StartupPhase) {
        self.phases.push(phase);
    }

    /// Run a step under the retry policy
    async fn with_retries<O: StartupOps>(
        &mut self,
        ops: &mut O,
        step: RetriedStep,
    ) -> Result<(), ApiError> {
        let attempts = self.policy.attempts;
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            log::info!("Attempting {} ({}/{})...", step.label(), attempt, attempts);

            let result = match step {
                RetriedStep::Connect => ops.connect().await,
                RetriedStep::Probe => ops.probe().await,
            };

            match result {
                Ok(()) => {
                    log::info!("{} established", step.label());
                    return Ok(());
                }
                Err(err) => {
                    log::error!("Attempt {}/{} failed: {}", attempt, attempts, err);
                    last_error = err;
                    if attempt < attempts {
                        log::info!("Retrying in {} seconds...", self.policy.delay.as_secs());
                        ops.pause(self.policy.delay).await;
                    }
                }
            }
        }

        Err(ApiError::InitializationFailed(format!(
            "{} failed after {} attempts: {}",
            step.label(),
            attempts,
            last_error
        )))
    }

    /// Drive the full startup protocol
    /// DOCUMENTATION: Connecting and Probing carry the retry budget;
    /// Initializing is fatal on error without retries (the schema script is
    /// already failure-tolerant per statement)
    pub async fn run<O: StartupOps>(&mut self, ops: &mut O) -> Result<(), ApiError> {
        self.enter(StartupPhase::Connecting);
        if let Err(err) = self.with_retries(ops, RetriedStep::Connect).await {
            self.enter(StartupPhase::Failed);
            return Err(err);
        }

        self.enter(StartupPhase::Initializing);
        if let Err(err) = ops.initialize().await {
            self.enter(StartupPhase::Failed);
            return Err(ApiError::InitializationFailed(err));
        }

        self.enter(StartupPhase::Probing);
        if let Err(err) = self.with_retries(ops, RetriedStep::Probe).await {
            self.enter(StartupPhase::Failed);
            return Err(err);
        }

        self.enter(StartupPhase::Ready);
        Ok(())
    }
}

/// Production wiring of the startup protocol
/// DOCUMENTATION: Owns the pool once Connecting succeeds; the schema script
/// and probe run against that same pool
pub struct DatabaseStartup<'a> {
    config: &'a Config,
    pool: Option<PgPool>,
}

impl<'a> DatabaseStartup<'a> {
    pub fn new(config: &'a Config) -> Self {
        DatabaseStartup { config, pool: None }
    }

    pub fn into_pool(self) -> Option<PgPool> {
        self.pool
    }
}

impl StartupOps for DatabaseStartup<'_> {
    async fn connect(&mut self) -> Result<(), String> {
        let pool = connect_pool(self.config).await.map_err(|e| e.to_string())?;
        self.pool = Some(pool);
        Ok(())
    }

    async fn initialize(&mut self) -> Result<(), String> {
        let pool = self.pool.as_ref().ok_or("no connection established")?;
        let report = apply_schema(pool, SCHEMA_SCRIPT)
            .await
            .map_err(|e| e.to_string())?;
        if !report.fully_applied() {
            // Non-fatal by design; the warnings are already in the log
            log::warn!(
                "Schema initialization completed with {} warning(s)",
                report.warnings().len()
            );
        }
        Ok(())
    }

    async fn probe(&mut self) -> Result<(), String> {
        let pool = self.pool.as_ref().ok_or("no connection established")?;
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn pause(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Connect, initialize and verify the database, retrying per the policy
/// DOCUMENTATION: The single entry point main() calls before binding the
/// HTTP listener
pub async fn initialize_database(config: &Config) -> Result<PgPool, ApiError> {
    let policy = RetryPolicy::from_config(config);
    let mut sequencer = StartupSequencer::new(policy);
    let mut ops = DatabaseStartup::new(config);

    sequencer.run(&mut ops).await?;

    ops.into_pool()
        .ok_or_else(|| ApiError::InitializationFailed("connection was never established".into()))
}

/// Log operator guidance when startup ends in the Failed state
pub fn log_failure_guidance(config: &Config) {
    log::error!("Could not start the server: database unavailable");
    if config.on_managed_platform() {
        log::error!("Deployment checklist:");
        log::error!("- If the error mentions \"localhost\", DB_HOST is not set on the platform");
        log::error!("- Verify the database service is attached and running");
        log::error!("- Verify the DB_* environment variables in the service settings");
    } else {
        log::error!("Local checklist:");
        log::error!("- Verify PostgreSQL is installed and running");
        log::error!("- Check the credentials in the .env file");
        log::error!("- Create the database if missing: createdb {}", config.db_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted startup operations with a recording pause
    struct FakeOps {
        connect_failures: u32,
        connect_calls: u32,
        initialize_result: Result<(), String>,
        probe_failures: u32,
        probe_calls: u32,
        pauses: Vec<Duration>,
    }

    impl FakeOps {
        fn healthy() -> Self {
            FakeOps {
                connect_failures: 0,
                connect_calls: 0,
                initialize_result: Ok(()),
                probe_failures: 0,
                probe_calls: 0,
                pauses: Vec::new(),
            }
        }
    }

    impl StartupOps for FakeOps {
        async fn connect(&mut self) -> Result<(), String> {
            self.connect_calls += 1;
            if self.connect_calls <= self.connect_failures {
                Err("connection refused".to_string())
            } else {
                Ok(())
            }
        }

        async fn initialize(&mut self) -> Result<(), String> {
            self.initialize_result.clone()
        }

        async fn probe(&mut self) -> Result<(), String> {
            self.probe_calls += 1;
            if self.probe_calls <= self.probe_failures {
                Err("connection reset".to_string())
            } else {
                Ok(())
            }
        }

        async fn pause(&mut self, delay: Duration) {
            self.pauses.push(delay);
        }
    }

    fn test_policy() -> RetryPolicy {
        RetryPolicy {
            attempts: 5,
            delay: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn clean_startup_reaches_ready() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();

        sequencer.run(&mut ops).await.unwrap();

        assert_eq!(
            sequencer.phases(),
            &[
                StartupPhase::Connecting,
                StartupPhase::Initializing,
                StartupPhase::Probing,
                StartupPhase::Ready
            ]
        );
        assert!(ops.pauses.is_empty());
    }

    #[tokio::test]
    async fn reachable_on_third_attempt_proceeds_after_two_waits() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();
        ops.connect_failures = 2;

        sequencer.run(&mut ops).await.unwrap();

        assert_eq!(ops.connect_calls, 3);
        assert_eq!(
            ops.pauses,
            vec![Duration::from_secs(5), Duration::from_secs(5)]
        );
        assert_eq!(sequencer.phases().last(), Some(&StartupPhase::Ready));
    }

    #[tokio::test]
    async fn exhausted_retry_budget_fails() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();
        ops.connect_failures = 5;

        let err = sequencer.run(&mut ops).await.unwrap_err();

        assert!(matches!(err, ApiError::InitializationFailed(_)));
        assert_eq!(ops.connect_calls, 5);
        // No pause after the final attempt
        assert_eq!(ops.pauses.len(), 4);
        assert_eq!(
            sequencer.phases(),
            &[StartupPhase::Connecting, StartupPhase::Failed]
        );
    }

    #[tokio::test]
    async fn fatal_initialization_error_skips_probing() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();
        ops.initialize_result = Err("schema script unreadable".to_string());

        let err = sequencer.run(&mut ops).await.unwrap_err();

        assert!(matches!(err, ApiError::InitializationFailed(_)));
        assert_eq!(
            sequencer.phases(),
            &[
                StartupPhase::Connecting,
                StartupPhase::Initializing,
                StartupPhase::Failed
            ]
        );
        assert_eq!(ops.probe_calls, 0);
    }

    #[tokio::test]
    async fn probe_carries_its_own_retry_budget() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();
        ops.probe_failures = 4;

        sequencer.run(&mut ops).await.unwrap();

        assert_eq!(ops.probe_calls, 5);
        assert_eq!(ops.pauses.len(), 4);
        assert_eq!(sequencer.phases().last(), Some(&StartupPhase::Ready));
    }

    #[tokio::test]
    async fn probe_exhaustion_fails_startup() {
        let mut sequencer = StartupSequencer::new(test_policy());
        let mut ops = FakeOps::healthy();
        ops.probe_failures = 5;

        let err = sequencer.run(&mut ops).await.unwrap_err();

        assert!(matches!(err, ApiError::InitializationFailed(_)));
        assert_eq!(sequencer.phases().last(), Some(&StartupPhase::Failed));
    }

    #[test]
    fn default_policy_is_five_attempts_five_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }
}
