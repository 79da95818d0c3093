pub mod claim_winnings;
pub mod commit_bet;
pub mod place_bet;
pub mod reveal_bet;

pub use claim_winnings::*;
pub use commit_bet::*;
pub use place_bet::*;
pub use reveal_bet::*;
