//! Stock agents

pub mod advisor;
pub mod reviewer;

pub use advisor::StockAdvisorAgent;
pub use reviewer::StockReviewerAgent;
