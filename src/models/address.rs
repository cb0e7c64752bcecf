use std::fmt;

/// Blocklist granularity: the first three dot-separated components of an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(String);

impl Prefix {
    /// Derive the prefix of an address ("203.0.113.42" -> "203.0.113")
    ///
    /// Addresses with fewer than three components map to themselves.
    pub fn of(address: &str) -> Self {
        let prefix: Vec<&str> = address.trim().split('.').take(3).collect();
        Prefix(prefix.join("."))
    }

    /// Wrap a prefix read back from storage
    pub fn from_stored(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(Prefix(line.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Freshly allocated address owned by the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Public address
    pub address: String,
    /// Provider allocation handle
    pub allocation_id: String,
    /// Set once the address is attached to the target instance
    pub association_id: Option<String>,
}

impl Candidate {
    pub fn new(address: impl Into<String>, allocation_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            allocation_id: allocation_id.into(),
            association_id: None,
        }
    }

    pub fn prefix(&self) -> Prefix {
        Prefix::of(&self.address)
    }

    /// Hand the candidate over to the kept set
    pub fn into_kept(self) -> KeptAddress {
        KeptAddress {
            address: self.address,
            allocation_id: self.allocation_id,
        }
    }
}

/// Address that passed validation and counts towards the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptAddress {
    pub address: String,
    pub allocation_id: String,
}

impl KeptAddress {
    pub fn new(address: impl Into<String>, allocation_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            allocation_id: allocation_id.into(),
        }
    }
}

impl fmt::Display for KeptAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.allocation_id)
    }
}
