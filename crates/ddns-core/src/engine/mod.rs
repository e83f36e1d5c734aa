//! Core DDNS engine
//!
//! The DdnsEngine is responsible for:
//! - Resolving the public address for each configured family
//! - Skipping families whose address has not changed since the last cycle
//! - Reconciling the A/AAAA record via the DnsProvider
//! - Reporting every outcome to the diagnostics sink
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ AddressResolver │─── Address ───┐
//! └─────────────────┘               │
//!                                   ▼
//!                          ┌──────────────┐        ┌──────────┐
//!                          │  DdnsEngine  │◄──────►│ LastSeen │
//!                          └──────────────┘        └──────────┘
//!                                   │
//!                 ┌─────────────────┴─────────────────┐
//!                 ▼                                   ▼
//!         ┌──────────────┐                    ┌──────────────┐
//!         │ DnsProvider  │                    │ Diagnostics  │
//!         │ (reconcile)  │                    │ (console+log)│
//!         └──────────────┘                    └──────────────┘
//! ```
//!
//! ## Run Modes
//!
//! - [`DdnsEngine::run_once`]: reconcile every family once, stop at the first
//!   failure
//! - [`DdnsEngine::run`]: poll forever; failures are logged and the next
//!   cycle is the only retry

mod reconciler;

pub use reconciler::{ReconcileOutcome, reconcile};

use std::time::Duration;

use tracing::{debug, info};

use crate::config::{FamilySelection, UpdaterConfig};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::state::LastSeen;
use crate::traits::{Address, AddressFamily, AddressResolver, DnsProvider};

/// Core DDNS engine
///
/// Owns one resolver, one provider and one record name. All work runs
/// sequentially on the calling task.
pub struct DdnsEngine {
    /// Address resolver (echo services)
    resolver: Box<dyn AddressResolver>,

    /// DNS provider for lookups and writes
    provider: Box<dyn DnsProvider>,

    /// Console + log file sink
    diagnostics: Diagnostics,

    /// Record maintained for every family
    record_name: String,

    /// Families to maintain
    families: FamilySelection,

    /// Sleep between polling cycles
    interval: Duration,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `resolver`: Address resolver implementation
    /// - `provider`: DNS provider implementation
    /// - `diagnostics`: Where status and error lines go
    /// - `config`: Updater configuration (validated here)
    pub fn new(
        resolver: Box<dyn AddressResolver>,
        provider: Box<dyn DnsProvider>,
        diagnostics: Diagnostics,
        config: &UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            resolver,
            provider,
            diagnostics,
            record_name: config.record_name.clone(),
            families: config.families,
            interval: config.interval(),
        })
    }

    /// Reconcile every configured family once
    ///
    /// Stops at the first failure, which is logged and returned.
    pub async fn run_once(&self) -> Result<Vec<ReconcileOutcome>> {
        let mut outcomes = Vec::with_capacity(self.families.families().len());

        for &family in self.families.families() {
            let address = match self.resolver.resolve(family).await {
                Ok(address) => address,
                Err(e) => {
                    self.diagnostics
                        .error(&format!("Error getting {} address: {}", family, e));
                    return Err(e);
                }
            };

            match self.apply(&address).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    self.report_failure(family, &e);
                    return Err(e);
                }
            }
        }

        Ok(outcomes)
    }

    /// Run one polling cycle
    ///
    /// The resolver is called for every family. A family whose address equals
    /// the last applied one is skipped without any provider call. `LastSeen`
    /// only advances for families that reconciled successfully, so a failure
    /// is retried on the next cycle. Nothing here returns an error.
    pub async fn cycle(&self, state: LastSeen) -> LastSeen {
        let mut state = state;

        for &family in self.families.families() {
            let address = match self.resolver.resolve(family).await {
                Ok(address) => address,
                Err(e) => {
                    self.diagnostics
                        .error(&format!("Error getting {} address: {}", family, e));
                    continue;
                }
            };

            if state.is_current(&address) {
                debug!("{} address {} unchanged since last cycle", family, address);
                continue;
            }

            match self.apply(&address).await {
                Ok(_) => state = state.with(address),
                Err(e) => self.report_failure(family, &e),
            }
        }

        self.diagnostics.info(&state.summary());
        state
    }

    /// Run the polling loop
    ///
    /// Runs a cycle, sleeps for the configured interval, and repeats forever.
    pub async fn run(&self) -> Result<()> {
        self.run_internal(None).await
    }

    /// Internal run implementation that accepts an optional shutdown signal
    ///
    /// # Parameters
    ///
    /// - `shutdown_rx`: Optional oneshot receiver that ends the loop while it
    ///   sleeps (for testing)
    async fn run_internal(
        &self,
        mut shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        info!(
            "Maintaining {} for {:?} every {} minute(s)",
            self.record_name,
            self.families,
            self.interval.as_secs() / 60
        );

        let mut state = LastSeen::new();

        loop {
            state = self.cycle(state).await;
            self.diagnostics.info(&format!(
                "Check {} again in {} minute(s)",
                self.family_labels(),
                self.interval.as_secs() / 60
            ));

            match shutdown_rx.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        _ = tokio::time::sleep(self.interval) => {}
                        _ = rx => {
                            info!("Shutdown signal received");
                            break;
                        }
                    }
                }
                None => tokio::time::sleep(self.interval).await,
            }
        }

        Ok(())
    }

    /// Reconcile one resolved address and report the outcome
    async fn apply(&self, address: &Address) -> Result<ReconcileOutcome> {
        let outcome = reconcile(self.provider.as_ref(), &self.record_name, address).await?;
        self.diagnostics.info(&outcome.message());
        Ok(outcome)
    }

    fn report_failure(&self, family: AddressFamily, error: &crate::Error) {
        self.diagnostics.error(&format!(
            "Error reconciling {} record {} via {}: {}",
            family,
            self.record_name,
            self.provider.provider_name(),
            error
        ));
    }

    /// "IPv6 and IPv4", newest family first
    fn family_labels(&self) -> String {
        self.families
            .families()
            .iter()
            .rev()
            .map(|family| family.label())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Test-only helper to run the polling loop with a controlled shutdown signal
    ///
    /// **TESTING ONLY**: Production code should use `run()`, which polls
    /// until the process is terminated.
    pub async fn run_with_shutdown(
        &self,
        shutdown_rx: Option<tokio::sync::oneshot::Receiver<()>>,
    ) -> Result<()> {
        self.run_internal(shutdown_rx).await
    }
}
