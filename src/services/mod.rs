//! Round controller and the blocklist it learns from

pub mod blocklist;
pub mod publisher;
pub mod round;

pub use blocklist::Blocklist;
pub use publisher::{create_publisher, GitPublisher, NoopPublisher, Publisher};
pub use round::{RoundController, RoundReport, RunSummary};
