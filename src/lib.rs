//! EIP Keeper - elastic IP proxy acquisition
//!
//! Allocates public addresses, validates each one as a working proxy and keeps
//! only the ones that pass, until a target number of addresses is kept.
//!
//! ## Features
//!
//! - Round-based allocate / filter / validate / persist loop
//! - Learned blocklist of failing /24 prefixes, published through git
//! - Resumable run state
//! - EC2 Query API provider with Signature Version 4 signing

pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod proxy;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{KeeperError, Result};
