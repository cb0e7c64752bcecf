//! Round controller
//!
//! Drives the allocate -> filter -> validate -> persist loop until the kept
//! set reaches the target total (or the configured round cap is hit).

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use super::blocklist::Blocklist;
use crate::config::HarvestConfig;
use crate::error::{KeeperError, Result};
use crate::models::{Candidate, Prefix, RunState};
use crate::provider::ResourceAllocator;
use crate::proxy::health::HealthCheck;
use crate::repository::StateStore;

/// What happened during one round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based round number within this invocation
    pub round: u32,
    /// Addresses the provider handed out
    pub allocated: Vec<String>,
    /// Addresses that passed the probe
    pub kept: Vec<String>,
    /// Addresses given back (blocklisted or failed)
    pub released: Vec<String>,
    /// Addresses dropped after a failed association, still held at the provider
    pub abandoned: Vec<String>,
    /// Prefixes learned this round
    pub blocklisted: Vec<Prefix>,
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub state: RunState,
    pub rounds: u32,
    /// False when the round cap stopped the run early
    pub converged: bool,
}

pub struct RoundController {
    config: HarvestConfig,
    allocator: ResourceAllocator,
    checker: Arc<dyn HealthCheck>,
    blocklist: Blocklist,
    state_store: Arc<dyn StateStore>,
}

impl RoundController {
    pub fn new(
        config: HarvestConfig,
        allocator: ResourceAllocator,
        checker: Arc<dyn HealthCheck>,
        blocklist: Blocklist,
        state_store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            config,
            allocator,
            checker,
            blocklist,
            state_store,
        }
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    /// Resume from the state store, or ask for a target on a fresh start
    ///
    /// `prompt` is only called when there is nothing to resume. It runs on the
    /// blocking pool, so dropping the returned future stops waiting on it.
    pub async fn plan<F>(&self, prompt: F) -> Result<RunState>
    where
        F: FnOnce() -> Result<u32> + Send + 'static,
    {
        match self.state_store.load().await? {
            Some(state) => {
                info!(
                    "Resuming with {} addresses to allocate and {} already kept",
                    state.remaining_demand,
                    state.kept.len()
                );
                Ok(state)
            }
            None => {
                let target_total = tokio::task::spawn_blocking(prompt)
                    .await
                    .map_err(|e| KeeperError::Io(std::io::Error::other(e)))??;
                info!("Starting fresh run for {} kept addresses", target_total);
                Ok(RunState::fresh(target_total))
            }
        }
    }

    /// Run rounds until the target is reached or the round cap is hit
    pub async fn run(&mut self, mut state: RunState) -> Result<RunSummary> {
        let target_total = state.target_total();
        let mut rounds = 0u32;

        while state.kept_count() < target_total {
            if self.round_cap_reached(rounds) {
                warn!(
                    "Stopping after {} rounds with {} of {} addresses kept",
                    rounds,
                    state.kept.len(),
                    target_total
                );
                return Ok(RunSummary {
                    state,
                    rounds,
                    converged: false,
                });
            }

            rounds += 1;
            self.run_round(rounds, &mut state).await?;

            if state.remaining_demand > 0 && !self.round_cap_reached(rounds) {
                countdown(self.config.round_delay).await;
            }
        }

        Ok(RunSummary {
            state,
            rounds,
            converged: true,
        })
    }

    fn round_cap_reached(&self, rounds: u32) -> bool {
        self.config.max_rounds.is_some_and(|max| rounds >= max)
    }

    /// One allocate -> filter -> validate -> persist cycle
    ///
    /// Only an exhausted address quota is returned as an error; it aborts the
    /// round before anything is saved.
    #[instrument(skip(self, state), fields(remaining = state.remaining_demand))]
    pub async fn run_round(&mut self, round: u32, state: &mut RunState) -> Result<RoundReport> {
        let target_total = state.target_total();
        let mut report = RoundReport {
            round,
            ..Default::default()
        };

        let candidates = self.allocator.allocate(state.remaining_demand).await?;
        report.allocated = candidates.iter().map(|c| c.address.clone()).collect();
        info!("Allocated addresses: {:?}", report.allocated);

        let (blocked, fresh): (Vec<Candidate>, Vec<Candidate>) = candidates
            .into_iter()
            .partition(|c| self.blocklist.contains(&c.address));

        for candidate in blocked {
            info!(
                "Address {} is in blocklisted range {}, releasing without a check",
                candidate.address,
                candidate.prefix()
            );
            self.allocator.release(&candidate).await;
            report.released.push(candidate.address);
        }

        for mut candidate in fresh {
            if !self
                .allocator
                .associate(&mut candidate, &self.config.target_instance_id)
                .await
            {
                if self.config.release_on_associate_failure {
                    self.allocator.release(&candidate).await;
                    report.released.push(candidate.address);
                } else {
                    warn!(
                        "Abandoning address {} ({}) after failed association",
                        candidate.address, candidate.allocation_id
                    );
                    report.abandoned.push(candidate.address);
                }
                continue;
            }

            if !self.config.settle_delay.is_zero() {
                tokio::time::sleep(self.config.settle_delay).await;
            }

            if self.checker.check(&candidate.address).await.is_pass() {
                info!("Kept address {}", candidate.address);
                report.kept.push(candidate.address.clone());
                state.kept.push(candidate.into_kept());
            } else {
                self.allocator.disassociate(&mut candidate).await;
                self.allocator.release(&candidate).await;
                let prefix = self.blocklist.record(&candidate.address).await;
                report.released.push(candidate.address);
                report.blocklisted.push(prefix);
            }
        }

        state.settle(target_total);

        if let Err(e) = self.state_store.save(state).await {
            error!("Failed to save run state: {}", e);
        }

        info!(
            kept = report.kept.len(),
            released = report.released.len(),
            abandoned = report.abandoned.len(),
            "Round {} complete: {} kept so far, {} to allocate next round",
            round,
            state.kept.len(),
            state.remaining_demand
        );

        Ok(report)
    }
}

/// Visible wait between rounds
async fn countdown(total: Duration) {
    let seconds = total.as_secs();
    if seconds == 0 {
        tokio::time::sleep(total).await;
        return;
    }

    let mut stdout = std::io::stdout();
    for remaining in (1..=seconds).rev() {
        let _ = write!(stdout, "\rWaiting for {} seconds...", remaining);
        let _ = stdout.flush();
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    let _ = writeln!(stdout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KeptAddress;
    use crate::provider::{AddressProvider, ElasticAddress};
    use crate::proxy::health::ProbeOutcome;
    use crate::repository::{MemoryBlocklistStore, MemoryStateStore};
    use crate::services::publisher::NoopPublisher;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashSet, VecDeque};

    /// Provider replaying scripted allocations and logging every call
    #[derive(Default)]
    struct FakeProvider {
        allocations: Mutex<VecDeque<Result<ElasticAddress>>>,
        failing_associations: HashSet<String>,
        events: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(addresses: &[(&str, &str)]) -> Self {
            Self {
                allocations: Mutex::new(
                    addresses
                        .iter()
                        .map(|(ip, id)| {
                            Ok(ElasticAddress {
                                public_ip: ip.to_string(),
                                allocation_id: id.to_string(),
                            })
                        })
                        .collect(),
                ),
                ..Default::default()
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().clone()
        }

        fn count(&self, kind: &str) -> usize {
            self.events
                .lock()
                .iter()
                .filter(|e| e.starts_with(kind))
                .count()
        }
    }

    #[async_trait]
    impl AddressProvider for FakeProvider {
        async fn allocate_address(&self) -> Result<ElasticAddress> {
            self.events.lock().push("allocate".to_string());
            self.allocations
                .lock()
                .pop_front()
                .unwrap_or(Err(KeeperError::Provider {
                    code: "Unavailable".to_string(),
                    message: "no scripted address".to_string(),
                }))
        }

        async fn release_address(&self, allocation_id: &str) -> Result<()> {
            self.events.lock().push(format!("release {}", allocation_id));
            Ok(())
        }

        async fn associate_address(&self, allocation_id: &str, instance_id: &str) -> Result<String> {
            self.events
                .lock()
                .push(format!("associate {} {}", allocation_id, instance_id));
            if self.failing_associations.contains(allocation_id) {
                return Err(KeeperError::Provider {
                    code: "InvalidInstanceID".to_string(),
                    message: "instance not running".to_string(),
                });
            }
            Ok(format!("assoc-{}", allocation_id))
        }

        async fn disassociate_address(&self, association_id: &str) -> Result<()> {
            self.events
                .lock()
                .push(format!("disassociate {}", association_id));
            Ok(())
        }
    }

    /// Checker passing a fixed set of addresses
    #[derive(Default)]
    struct FakeChecker {
        passing: HashSet<String>,
        checked: Mutex<Vec<String>>,
    }

    impl FakeChecker {
        fn passing(addresses: &[&str]) -> Self {
            Self {
                passing: addresses.iter().map(|a| a.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl HealthCheck for FakeChecker {
        async fn check(&self, address: &str) -> ProbeOutcome {
            self.checked.lock().push(address.to_string());
            if self.passing.contains(address) {
                ProbeOutcome::Pass
            } else {
                ProbeOutcome::Fail("status code 403".to_string())
            }
        }
    }

    fn timed_config() -> HarvestConfig {
        HarvestConfig {
            settle_delay: Duration::from_secs(10),
            round_delay: Duration::from_secs(60),
            ..HarvestConfig::for_instance("i-target")
        }
    }

    fn assert_elapsed(start: tokio::time::Instant, secs: u64) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_secs(secs) && elapsed < Duration::from_secs(secs + 1),
            "expected {}s, waited {:?}",
            secs,
            elapsed
        );
    }

    fn quick_config() -> HarvestConfig {
        HarvestConfig {
            settle_delay: Duration::ZERO,
            round_delay: Duration::ZERO,
            ..HarvestConfig::for_instance("i-target")
        }
    }

    struct Harness {
        controller: RoundController,
        provider: Arc<FakeProvider>,
        checker: Arc<FakeChecker>,
        blocklist_store: Arc<MemoryBlocklistStore>,
        state_store: Arc<MemoryStateStore>,
    }

    async fn harness(
        config: HarvestConfig,
        provider: FakeProvider,
        checker: FakeChecker,
        blocklisted: &[&str],
        state_store: MemoryStateStore,
    ) -> Harness {
        let provider = Arc::new(provider);
        let checker = Arc::new(checker);
        let blocklist_store = Arc::new(MemoryBlocklistStore::with_prefixes(blocklisted));
        let state_store = Arc::new(state_store);

        let blocklist = Blocklist::load(blocklist_store.clone(), Arc::new(NoopPublisher))
            .await
            .unwrap();
        let controller = RoundController::new(
            config,
            ResourceAllocator::new(provider.clone()),
            checker.clone(),
            blocklist,
            state_store.clone(),
        );

        Harness {
            controller,
            provider,
            checker,
            blocklist_store,
            state_store,
        }
    }

    fn assert_invariant(state: &RunState, target_total: u32) {
        assert_eq!(
            state.remaining_demand as usize + state.kept.len(),
            target_total as usize
        );
    }

    #[tokio::test]
    async fn test_round_keeps_passing_releases_rest() {
        let mut h = harness(
            quick_config(),
            FakeProvider::new(&[
                ("198.51.100.10", "eipalloc-a"),
                ("203.0.113.20", "eipalloc-b"),
                ("192.0.2.30", "eipalloc-c"),
            ]),
            FakeChecker::passing(&["198.51.100.10"]),
            &["203.0.113"],
            MemoryStateStore::new(),
        )
        .await;

        let mut state = RunState::fresh(3);
        let report = h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(report.kept, vec!["198.51.100.10".to_string()]);
        assert_eq!(
            report.released,
            vec!["203.0.113.20".to_string(), "192.0.2.30".to_string()]
        );
        assert_eq!(report.blocklisted, vec![Prefix::of("192.0.2.30")]);
        assert_eq!(state.kept, vec![KeptAddress::new("198.51.100.10", "eipalloc-a")]);
        assert_eq!(state.remaining_demand, 2);
        assert_invariant(&state, 3);

        // The blocklisted candidate is never probed.
        assert_eq!(
            *h.checker.checked.lock(),
            vec!["198.51.100.10".to_string(), "192.0.2.30".to_string()]
        );
        assert!(h.controller.blocklist().contains("192.0.2.99"));
        assert_eq!(h.blocklist_store.lines().last(), Some(&Prefix::of("192.0.2.1")));

        let events = h.provider.events();
        assert!(events.contains(&"release eipalloc-b".to_string()));
        assert!(!events.contains(&"associate eipalloc-b i-target".to_string()));
        let failed: Vec<&String> = events
            .iter()
            .filter(|e| e.ends_with("eipalloc-c") || e.contains("eipalloc-c "))
            .collect();
        assert_eq!(
            failed,
            vec![
                "associate eipalloc-c i-target",
                "disassociate assoc-eipalloc-c",
                "release eipalloc-c",
            ]
        );
    }

    #[tokio::test]
    async fn test_round_from_two_allocated_candidates() {
        // target_total = 2 with no kept addresses asks for exactly two candidates.
        let mut h = harness(
            quick_config(),
            FakeProvider::new(&[
                ("198.51.100.10", "eipalloc-a"),
                ("203.0.113.20", "eipalloc-b"),
            ]),
            FakeChecker::passing(&["198.51.100.10"]),
            &["203.0.113"],
            MemoryStateStore::new(),
        )
        .await;

        let mut state = RunState::fresh(2);
        h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(h.provider.count("allocate"), 2);
        assert_eq!(state.remaining_demand, 1);
        assert_invariant(&state, 2);
        assert_eq!(h.state_store.history(), vec![state.clone()]);
    }

    #[tokio::test]
    async fn test_plan_resumes_without_prompt() {
        let saved = RunState {
            remaining_demand: 3,
            kept: vec![
                KeptAddress::new("198.51.100.1", "eipalloc-x"),
                KeptAddress::new("198.51.100.2", "eipalloc-y"),
            ],
        };
        let h = harness(
            quick_config(),
            FakeProvider::default(),
            FakeChecker::default(),
            &[],
            MemoryStateStore::with_state(saved.clone()),
        )
        .await;

        let state = h
            .controller
            .plan(|| panic!("prompt must not run when resuming"))
            .await
            .unwrap();

        assert_eq!(state, saved);
        assert_eq!(state.target_total(), 5);
    }

    #[tokio::test]
    async fn test_plan_fresh_start_prompts() {
        let h = harness(
            quick_config(),
            FakeProvider::default(),
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let state = h.controller.plan(|| Ok(4)).await.unwrap();
        assert_eq!(state, RunState::fresh(4));

        let err = h
            .controller
            .plan(|| Err(KeeperError::InvalidInput("abc".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, KeeperError::InvalidInput(_)));
        assert!(h.provider.events().is_empty());
    }

    #[tokio::test]
    async fn test_limit_exceeded_stops_everything() {
        let provider = FakeProvider::new(&[("198.51.100.10", "eipalloc-a")]);
        provider
            .allocations
            .lock()
            .push_back(Err(KeeperError::AddressLimitExceeded));
        provider.allocations.lock().push_back(Ok(ElasticAddress {
            public_ip: "198.51.100.11".to_string(),
            allocation_id: "eipalloc-b".to_string(),
        }));

        let mut h = harness(
            quick_config(),
            provider,
            FakeChecker::passing(&["198.51.100.10", "198.51.100.11"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let err = h.controller.run(RunState::fresh(3)).await.unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(h.provider.events(), vec!["allocate", "allocate"]);
        assert!(h.checker.checked.lock().is_empty());
        assert!(h.state_store.history().is_empty());
    }

    #[tokio::test]
    async fn test_run_converges_over_rounds() {
        let mut h = harness(
            quick_config(),
            FakeProvider::new(&[
                ("198.51.100.10", "eipalloc-a"),
                ("192.0.2.30", "eipalloc-c"),
                ("192.0.2.31", "eipalloc-d"),
                ("198.51.100.11", "eipalloc-e"),
            ]),
            FakeChecker::passing(&["198.51.100.10", "198.51.100.11"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let summary = h.controller.run(RunState::fresh(2)).await.unwrap();

        assert!(summary.converged);
        assert_eq!(summary.rounds, 3);
        assert_eq!(summary.state.kept.len(), 2);
        assert!(summary.state.is_complete());

        // Round 2 drew 192.0.2.31, which shares the prefix learned in round 1.
        assert_eq!(
            *h.checker.checked.lock(),
            vec!["198.51.100.10", "192.0.2.30", "198.51.100.11"]
        );
        assert!(h
            .provider
            .events()
            .contains(&"release eipalloc-d".to_string()));

        let history = h.state_store.history();
        assert_eq!(history.len(), 3);
        for saved in &history {
            assert_invariant(saved, 2);
        }
    }

    #[tokio::test]
    async fn test_run_with_zero_target_does_nothing() {
        let mut h = harness(
            quick_config(),
            FakeProvider::default(),
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let summary = h.controller.run(RunState::fresh(0)).await.unwrap();

        assert!(summary.converged);
        assert_eq!(summary.rounds, 0);
        assert!(h.provider.events().is_empty());
    }

    #[tokio::test]
    async fn test_round_cap_stops_non_converging_run() {
        let mut h = harness(
            HarvestConfig {
                max_rounds: Some(2),
                ..quick_config()
            },
            FakeProvider::new(&[("192.0.2.30", "eipalloc-c"), ("198.51.100.5", "eipalloc-d")]),
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let summary = h.controller.run(RunState::fresh(1)).await.unwrap();

        assert!(!summary.converged);
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.state, RunState::fresh(1));
        assert_eq!(h.controller.blocklist().len(), 2);
    }

    #[tokio::test]
    async fn test_partial_allocation_failure() {
        // Only one of the two requested allocations succeeds.
        let mut h = harness(
            quick_config(),
            FakeProvider::new(&[("198.51.100.10", "eipalloc-a")]),
            FakeChecker::passing(&["198.51.100.10"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let mut state = RunState::fresh(2);
        let report = h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(report.allocated, vec!["198.51.100.10".to_string()]);
        assert_eq!(state.remaining_demand, 1);
        assert_invariant(&state, 2);
    }

    #[tokio::test]
    async fn test_association_failure_abandons_by_default() {
        let provider = FakeProvider {
            failing_associations: ["eipalloc-a".to_string()].into_iter().collect(),
            ..FakeProvider::new(&[("198.51.100.10", "eipalloc-a")])
        };
        let mut h = harness(
            quick_config(),
            provider,
            FakeChecker::passing(&["198.51.100.10"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let mut state = RunState::fresh(1);
        let report = h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(report.abandoned, vec!["198.51.100.10".to_string()]);
        assert!(report.released.is_empty());
        assert!(h.checker.checked.lock().is_empty());
        assert_eq!(h.provider.count("release"), 0);
        assert!(h.controller.blocklist().is_empty());
        assert_eq!(state.remaining_demand, 1);
    }

    #[tokio::test]
    async fn test_association_failure_can_release() {
        let provider = FakeProvider {
            failing_associations: ["eipalloc-a".to_string()].into_iter().collect(),
            ..FakeProvider::new(&[("198.51.100.10", "eipalloc-a")])
        };
        let mut h = harness(
            HarvestConfig {
                release_on_associate_failure: true,
                ..quick_config()
            },
            provider,
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let mut state = RunState::fresh(1);
        let report = h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(report.released, vec!["198.51.100.10".to_string()]);
        assert!(report.abandoned.is_empty());
        assert!(h
            .provider
            .events()
            .contains(&"release eipalloc-a".to_string()));
        assert!(h.controller.blocklist().is_empty());
    }

    #[tokio::test]
    async fn test_plan_prompt_leaves_caller_cancellable() {
        let h = harness(
            quick_config(),
            FakeProvider::default(),
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        // The prompt blocks until `answer` is dropped.
        let (answer, wait) = std::sync::mpsc::channel::<u32>();
        let winner = tokio::select! {
            _ = h.controller.plan(move || {
                wait.recv()
                    .map_err(|_| KeeperError::InvalidInput("no input".to_string()))
            }) => "plan",
            _ = tokio::time::sleep(Duration::from_millis(50)) => "shutdown",
        };
        drop(answer);

        assert_eq!(winner, "shutdown");
        assert!(h.provider.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_waits_for_association_to_settle() {
        let mut h = harness(
            timed_config(),
            FakeProvider::new(&[("198.51.100.10", "eipalloc-a")]),
            FakeChecker::passing(&["198.51.100.10"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let start = tokio::time::Instant::now();
        let mut state = RunState::fresh(1);
        h.controller.run_round(1, &mut state).await.unwrap();

        assert_elapsed(start, 10);
        assert!(state.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocklisted_candidate_released_without_waiting() {
        let mut h = harness(
            timed_config(),
            FakeProvider::new(&[("203.0.113.20", "eipalloc-b")]),
            FakeChecker::default(),
            &["203.0.113"],
            MemoryStateStore::new(),
        )
        .await;

        let start = tokio::time::Instant::now();
        let mut state = RunState::fresh(1);
        h.controller.run_round(1, &mut state).await.unwrap();

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_between_rounds_only() {
        let mut h = harness(
            timed_config(),
            FakeProvider::new(&[("192.0.2.30", "eipalloc-c"), ("198.51.100.10", "eipalloc-a")]),
            FakeChecker::passing(&["198.51.100.10"]),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let start = tokio::time::Instant::now();
        let summary = h.controller.run(RunState::fresh(1)).await.unwrap();

        // Two settle waits and one countdown; none after the final round.
        assert!(summary.converged);
        assert_eq!(summary.rounds, 2);
        assert_elapsed(start, 80);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_cap_skips_final_countdown() {
        let mut h = harness(
            HarvestConfig {
                max_rounds: Some(1),
                ..timed_config()
            },
            FakeProvider::new(&[("192.0.2.30", "eipalloc-c")]),
            FakeChecker::default(),
            &[],
            MemoryStateStore::new(),
        )
        .await;

        let start = tokio::time::Instant::now();
        let summary = h.controller.run(RunState::fresh(1)).await.unwrap();

        assert!(!summary.converged);
        assert_elapsed(start, 10);
    }
}
