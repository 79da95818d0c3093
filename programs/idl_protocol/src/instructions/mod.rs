//! Instruction handlers, grouped by component:
//! - `staking` - stake, unstake, reward funding and claims
//! - `vote_escrow` - lock, extend and unlock governance weight
//! - `market` - market creation, cancellation and refunds
//! - `betting` - commit-reveal bets and winning claims
//! - `oracle` - bonds and commit-reveal resolution with disputes
//! - `badge` - volume-backed reputation badges
//! - `governance` - authority transfer, pause, TVL cap, insurance

pub mod badge;
pub mod betting;
pub mod governance;
pub mod initialize;
pub mod market;
pub mod oracle;
pub mod staking;
pub mod vote_escrow;

pub use badge::*;
pub use betting::*;
pub use governance::*;
pub use initialize::*;
pub use market::*;
pub use oracle::*;
pub use staking::*;
pub use vote_escrow::*;
