//! Matching infrastructure - pool, engine, and expiry sweeper

pub mod engine;
pub mod pool;
pub mod sweeper;

pub use engine::{AssemblyOrder, EngineConfig, MatchingEngine};
pub use pool::WaitingPool;
pub use sweeper::ExpirationSweeper;
