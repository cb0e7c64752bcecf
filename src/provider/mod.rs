//! Cloud address provider
//!
//! This module provides:
//! - The `AddressProvider` trait the round controller allocates through
//! - `ResourceAllocator`, which applies the keeper's failure policy on top
//! - `Ec2Client`, the EC2 Query API implementation

pub mod allocator;
pub mod ec2;
pub mod sigv4;

pub use allocator::ResourceAllocator;
pub use ec2::Ec2Client;

use async_trait::async_trait;

use crate::error::Result;

/// Address returned by a successful allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticAddress {
    pub public_ip: String,
    pub allocation_id: String,
}

/// Raw provider operations
///
/// Implementations report an exhausted address quota as
/// `KeeperError::AddressLimitExceeded`; every other failure is an ordinary
/// error the allocator logs and absorbs.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Allocate one new public address
    async fn allocate_address(&self) -> Result<ElasticAddress>;

    /// Give an address back to the provider
    async fn release_address(&self, allocation_id: &str) -> Result<()>;

    /// Attach an address to an instance, returning the association id
    async fn associate_address(&self, allocation_id: &str, instance_id: &str) -> Result<String>;

    /// Detach an address
    async fn disassociate_address(&self, association_id: &str) -> Result<()>;
}
