//! Check lifecycle runner
//!
//! `Checker` is the extension point: a check implements `execute` and nothing
//! else. `CheckRunner` wraps the hook with the shared lifecycle — the
//! activation gate, started/finished traces, the operator-facing summary line,
//! and outcome persistence. Checks must not insert outcome rows or emit
//! lifecycle traces themselves.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use crate::checker::{CheckOutcome, CheckParams, CheckerError};
use crate::schema::{CheckRecord, CheckerRegistration};
use crate::storage::MetadataStore;

/// A pluggable validation unit
#[async_trait]
pub trait Checker: Send + Sync + std::fmt::Debug {
    /// Declared name; must match the metadata store registration row
    fn name(&self) -> &'static str;

    /// Domain hook. Parameters arrive verbatim from the invocation surface;
    /// validating them is the check's own responsibility. Errors propagate
    /// out of the runner uncaught.
    async fn execute(&self, params: &CheckParams) -> Result<CheckOutcome, CheckerError>;
}

/// How a `run` invocation ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunDisposition {
    /// The registration is inactive; nothing executed, nothing was persisted
    Skipped,
    /// The check executed and its outcome was persisted
    Completed(CheckOutcome),
}

impl RunDisposition {
    pub fn is_skipped(&self) -> bool {
        matches!(self, RunDisposition::Skipped)
    }
}

/// Shared lifecycle wrapper around a check's domain hook.
///
/// Binding resolves the check's registration row by exact name; a missing row
/// is fatal. One runner serves one invocation.
pub struct CheckRunner {
    store: Arc<dyn MetadataStore>,
    registration: CheckerRegistration,
}

impl std::fmt::Debug for CheckRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRunner")
            .field("registration", &self.registration)
            .finish_non_exhaustive()
    }
}

impl CheckRunner {
    /// Resolve the registration for `name` and bind a runner to it.
    ///
    /// Returns `CheckerError::Unregistered` when no row exists; the
    /// registration is administrative and is never auto-created here.
    pub async fn bind(store: Arc<dyn MetadataStore>, name: &str) -> Result<Self, CheckerError> {
        let registration = store
            .registration(name)
            .await?
            .ok_or_else(|| CheckerError::Unregistered(name.to_string()))?;

        Ok(Self {
            store,
            registration,
        })
    }

    /// The registration this runner is bound to
    pub fn registration(&self) -> &CheckerRegistration {
        &self.registration
    }

    /// Execute one check run.
    ///
    /// Inactive registrations short-circuit to `Skipped` with no further
    /// effect. Active runs invoke the hook, print the one-line summary, and
    /// persist exactly one outcome row stamped with the registration id and
    /// the current UTC time. Hook and store errors propagate unrecovered.
    pub async fn run(
        &self,
        checker: &dyn Checker,
        params: &CheckParams,
    ) -> Result<RunDisposition, CheckerError> {
        if !self.registration.active {
            debug!(checker = checker.name(), "checker is not active, skipping");
            return Ok(RunDisposition::Skipped);
        }

        info!(checker = checker.name(), "check started");

        let outcome = checker.execute(params).await?;

        println!(
            "{}: Check result -> {} {}",
            checker.name(),
            outcome.status,
            outcome.message
        );

        let record = CheckRecord {
            checker_type_id: self.registration.id,
            status: outcome.status,
            message: outcome.message.clone(),
            checked_at: Utc::now(),
        };
        self.store.insert_check(&record).await?;

        info!(checker = checker.name(), status = %outcome.status, "check finished");

        Ok(RunDisposition::Completed(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::CheckStatus;
    use crate::storage::MemoryMetadataStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test check that counts hook invocations and returns a fixed outcome
    #[derive(Debug)]
    struct FixedCheck {
        outcome: CheckOutcome,
        invocations: AtomicUsize,
    }

    impl FixedCheck {
        fn new(outcome: CheckOutcome) -> Self {
            Self {
                outcome,
                invocations: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Checker for FixedCheck {
        fn name(&self) -> &'static str {
            "fixed_check"
        }

        async fn execute(&self, _params: &CheckParams) -> Result<CheckOutcome, CheckerError> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome.clone())
        }
    }

    #[tokio::test]
    async fn test_bind_fails_without_registration() {
        let store = Arc::new(MemoryMetadataStore::new());

        let err = CheckRunner::bind(store, "fixed_check").await.unwrap_err();
        assert!(matches!(err, CheckerError::Unregistered(name) if name == "fixed_check"));
    }

    #[tokio::test]
    async fn test_inactive_registration_skips_hook_and_persistence() {
        let store = Arc::new(MemoryMetadataStore::new().with_registration("fixed_check", false));
        let check = FixedCheck::new(CheckOutcome::ok());

        let runner = CheckRunner::bind(store.clone(), "fixed_check")
            .await
            .unwrap();
        let disposition = runner.run(&check, &CheckParams::new()).await.unwrap();

        assert!(disposition.is_skipped());
        assert_eq!(check.invocations.load(Ordering::SeqCst), 0);
        assert!(store.inserted_checks().is_empty());
    }

    #[tokio::test]
    async fn test_active_run_persists_exactly_one_record() {
        let store = Arc::new(MemoryMetadataStore::new().with_registration("fixed_check", true));
        let check = FixedCheck::new(CheckOutcome::ko("boom"));

        let runner = CheckRunner::bind(store.clone(), "fixed_check")
            .await
            .unwrap();
        let disposition = runner.run(&check, &CheckParams::new()).await.unwrap();

        assert_eq!(
            disposition,
            RunDisposition::Completed(CheckOutcome::ko("boom"))
        );
        assert_eq!(check.invocations.load(Ordering::SeqCst), 1);

        let records = store.inserted_checks();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, CheckStatus::Ko);
        assert_eq!(records[0].message, "boom");
        assert_eq!(records[0].checker_type_id, runner.registration().id);
    }

    #[tokio::test]
    async fn test_hook_error_persists_nothing() {
        #[derive(Debug)]
        struct FailingCheck;

        #[async_trait]
        impl Checker for FailingCheck {
            fn name(&self) -> &'static str {
                "failing_check"
            }

            async fn execute(
                &self,
                _params: &CheckParams,
            ) -> Result<CheckOutcome, CheckerError> {
                Err(CheckerError::IncompleteInterval)
            }
        }

        let store = Arc::new(MemoryMetadataStore::new().with_registration("failing_check", true));

        let runner = CheckRunner::bind(store.clone(), "failing_check")
            .await
            .unwrap();
        let err = runner
            .run(&FailingCheck, &CheckParams::new())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckerError::IncompleteInterval));
        assert!(store.inserted_checks().is_empty());
    }
}
