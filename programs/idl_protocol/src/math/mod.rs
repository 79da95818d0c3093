//! # Protocol Math
//!
//! Pure, runtime-free arithmetic used by the instruction handlers:
//!
//! - `checkpoint` - reward-per-token accumulator for staker rewards
//! - `decay` - vote-escrow weight and its linear decay
//! - `payout` - pro-rata winnings, fee split and imbalance caps
//! - `commitment` - SHA-256 commitments for bets and resolutions
//!
//! Every function widens to `u128` before multiplying and narrows back
//! with a checked conversion, so an overflow aborts the instruction
//! instead of wrapping.

pub mod checkpoint;
pub mod commitment;
pub mod decay;
pub mod payout;

pub use checkpoint::*;
pub use commitment::*;
pub use decay::*;
pub use payout::*;
