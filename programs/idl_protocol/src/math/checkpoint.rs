//! # Reward Checkpoint Accumulator
//!
//! Staker rewards are tracked with a single monotonic counter:
//!
//! ```text
//! reward_per_token_stored += reward * PRECISION / total_staked
//! owed(staker)             = staked * (stored - paid) / PRECISION
//! ```
//!
//! A staker's `paid` value is advanced to `stored` every time their balance
//! changes or they claim, so each unit of reward is counted exactly once no
//! matter how many stakers claim, or in which order. Both divisions floor,
//! so the sum of everything owed never exceeds what was distributed.

use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::errors::ProtocolError;

/// Accumulator increase for spreading `reward` over `total_staked`.
///
/// Returns zero when nothing is staked; the caller is expected to queue
/// the reward until there is stake to credit it to.
pub fn reward_per_token_increment(reward: u64, total_staked: u64) -> Result<u128> {
    if total_staked == 0 {
        return Ok(0);
    }
    (reward as u128)
        .checked_mul(REWARD_PRECISION)
        .and_then(|v| v.checked_div(total_staked as u128))
        .ok_or_else(|| error!(ProtocolError::MathOverflow))
}

/// Reward earned by `staked` tokens since the staker's last checkpoint
pub fn pending_reward(staked: u64, reward_per_token_stored: u128, reward_per_token_paid: u128) -> Result<u64> {
    let delta = reward_per_token_stored
        .checked_sub(reward_per_token_paid)
        .ok_or(ProtocolError::MathOverflow)?;

    let owed = (staked as u128)
        .checked_mul(delta)
        .ok_or(ProtocolError::MathOverflow)?
        / REWARD_PRECISION;

    u64::try_from(owed).map_err(|_| error!(ProtocolError::MathOverflow))
}

// ============================================================================
// TESTS
// ============================================================================
