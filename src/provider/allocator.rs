use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use super::AddressProvider;
use crate::error::{KeeperError, Result};
use crate::models::Candidate;

/// Provider wrapper that decides which failures matter
///
/// Only an exhausted quota escapes `allocate`; release, associate and
/// disassociate failures are logged and reported as plain outcomes.
#[derive(Clone)]
pub struct ResourceAllocator {
    provider: Arc<dyn AddressProvider>,
}

impl ResourceAllocator {
    pub fn new(provider: Arc<dyn AddressProvider>) -> Self {
        Self { provider }
    }

    /// Allocate up to `count` candidates
    ///
    /// Individual failures shrink the result. An exhausted quota stops
    /// immediately with `KeeperError::AddressLimitExceeded`.
    #[instrument(skip(self))]
    pub async fn allocate(&self, count: u32) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::with_capacity(count as usize);

        for _ in 0..count {
            match self.provider.allocate_address().await {
                Ok(address) => {
                    info!(
                        address = %address.public_ip,
                        allocation_id = %address.allocation_id,
                        "Allocated address"
                    );
                    candidates.push(Candidate::new(address.public_ip, address.allocation_id));
                }
                Err(KeeperError::AddressLimitExceeded) => {
                    error!("Address limit exceeded. No more addresses can be allocated");
                    return Err(KeeperError::AddressLimitExceeded);
                }
                Err(e) => {
                    warn!("Failed to allocate address: {}", e);
                }
            }
        }

        Ok(candidates)
    }

    /// Release a candidate; returns whether the provider accepted it
    #[instrument(skip(self, candidate), fields(address = %candidate.address))]
    pub async fn release(&self, candidate: &Candidate) -> bool {
        match self.provider.release_address(&candidate.allocation_id).await {
            Ok(()) => {
                info!("Released address {}", candidate.address);
                true
            }
            Err(e) => {
                warn!("Failed to release address {}: {}", candidate.address, e);
                false
            }
        }
    }

    /// Attach a candidate to the target instance
    ///
    /// On success the association id is recorded on the candidate.
    #[instrument(skip(self, candidate), fields(address = %candidate.address))]
    pub async fn associate(&self, candidate: &mut Candidate, instance_id: &str) -> bool {
        match self
            .provider
            .associate_address(&candidate.allocation_id, instance_id)
            .await
        {
            Ok(association_id) => {
                info!(
                    "Associated address {} with instance {}",
                    candidate.address, instance_id
                );
                candidate.association_id = Some(association_id);
                true
            }
            Err(e) => {
                warn!(
                    "Failed to associate address {} with instance {}: {}",
                    candidate.address, instance_id, e
                );
                false
            }
        }
    }

    /// Detach a candidate, best effort
    #[instrument(skip(self, candidate), fields(address = %candidate.address))]
    pub async fn disassociate(&self, candidate: &mut Candidate) -> bool {
        let Some(association_id) = candidate.association_id.take() else {
            warn!("Address {} has no association to remove", candidate.address);
            return false;
        };

        match self.provider.disassociate_address(&association_id).await {
            Ok(()) => {
                info!(
                    "Disassociated address {} (association {})",
                    candidate.address, association_id
                );
                true
            }
            Err(e) => {
                warn!(
                    "Failed to disassociate address {} (association {}): {}",
                    candidate.address, association_id, e
                );
                false
            }
        }
    }
}
