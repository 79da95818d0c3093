pub mod claim_rewards;
pub mod fund_rewards;
pub mod stake;
pub mod unstake;

pub use claim_rewards::*;
pub use fund_rewards::*;
pub use stake::*;
pub use unstake::*;
