use serde::{Deserialize, Serialize};

use super::address::KeptAddress;
use crate::error::{KeeperError, Result};

/// Progress of a run, persisted after every round
///
/// `kept.len() + remaining_demand` is the run's target total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunState {
    /// Addresses still to be acquired
    pub remaining_demand: u32,
    /// Validated addresses, in the order they were kept
    pub kept: Vec<KeptAddress>,
}

impl RunState {
    /// State for a fresh run aiming at `target_total` addresses
    pub fn fresh(target_total: u32) -> Self {
        Self {
            remaining_demand: target_total,
            kept: Vec::new(),
        }
    }

    pub fn target_total(&self) -> u32 {
        self.remaining_demand.saturating_add(self.kept_count())
    }

    pub fn kept_count(&self) -> u32 {
        u32::try_from(self.kept.len()).unwrap_or(u32::MAX)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_demand == 0
    }

    /// Recompute the demand after the kept set changed
    pub fn settle(&mut self, target_total: u32) {
        self.remaining_demand = target_total.saturating_sub(self.kept_count());
    }
}

/// On-disk layout of the run-state file
///
/// Field names are part of the file contract and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
    #[serde(default)]
    pub num_ips_to_allocate: Option<u32>,
    #[serde(default)]
    pub kept_ips: Vec<String>,
    #[serde(default)]
    pub kept_allocation_ids: Vec<String>,
}

impl StateFile {
    /// Convert back into a run state; `None` means nothing to resume
    pub fn into_run_state(self) -> Result<Option<RunState>> {
        let Some(remaining_demand) = self.num_ips_to_allocate else {
            return Ok(None);
        };

        if self.kept_ips.len() != self.kept_allocation_ids.len() {
            return Err(KeeperError::InvalidState(format!(
                "{} kept addresses but {} allocation ids",
                self.kept_ips.len(),
                self.kept_allocation_ids.len()
            )));
        }

        let target_total = u32::try_from(self.kept_ips.len())
            .ok()
            .and_then(|kept| kept.checked_add(remaining_demand));
        if target_total.is_none() {
            return Err(KeeperError::InvalidState(format!(
                "{} to allocate plus {} kept exceeds the largest target",
                remaining_demand,
                self.kept_ips.len()
            )));
        }

        let kept = self
            .kept_ips
            .into_iter()
            .zip(self.kept_allocation_ids)
            .map(|(address, allocation_id)| KeptAddress {
                address,
                allocation_id,
            })
            .collect();

        Ok(Some(RunState {
            remaining_demand,
            kept,
        }))
    }
}

impl From<&RunState> for StateFile {
    fn from(state: &RunState) -> Self {
        Self {
            num_ips_to_allocate: Some(state.remaining_demand),
            kept_ips: state.kept.iter().map(|k| k.address.clone()).collect(),
            kept_allocation_ids: state.kept.iter().map(|k| k.allocation_id.clone()).collect(),
        }
    }
}
