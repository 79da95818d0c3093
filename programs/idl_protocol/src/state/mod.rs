pub mod badge;
pub mod bet;
pub mod market;
pub mod oracle;
pub mod protocol;
pub mod staker;
pub mod ve_position;

pub use badge::*;
pub use bet::*;
pub use market::*;
pub use oracle::*;
pub use protocol::*;
pub use staker::*;
pub use ve_position::*;
