//! # Vote-Escrow Weight
//!
//! ```text
//! ve_amount        = locked_stake * duration / MAX_LOCK_DURATION
//! weight(t)        = ve_amount * (lock_end - t) / (lock_end - lock_start)
//! ```
//!
//! Weight decays linearly to zero at `lock_end` and is zero anywhere
//! outside `[lock_start, lock_end]`.

use anchor_lang::prelude::*;

use crate::constants::{MAX_LOCK_DURATION, MIN_LOCK_DURATION};
use crate::errors::ProtocolError;

/// Reject durations outside `[MIN_LOCK_DURATION, MAX_LOCK_DURATION]`
pub fn validate_lock_duration(duration: i64) -> Result<()> {
    require!(
        (MIN_LOCK_DURATION..=MAX_LOCK_DURATION).contains(&duration),
        ProtocolError::InvalidLockDuration
    );
    Ok(())
}

/// Nominal ve amount for locking `locked_stake` for `duration` seconds
pub fn ve_amount_for(locked_stake: u64, duration: i64) -> Result<u64> {
    validate_lock_duration(duration)?;

    (locked_stake as u128)
        .checked_mul(duration as u128)
        .and_then(|v| v.checked_div(MAX_LOCK_DURATION as u128))
        .and_then(|v| u64::try_from(v).ok())
        .ok_or_else(|| error!(ProtocolError::MathOverflow))
}

/// Decayed governance weight at `now`
pub fn effective_weight(ve_amount: u64, lock_start: i64, lock_end: i64, now: i64) -> u64 {
    if now < lock_start || now >= lock_end || lock_end <= lock_start {
        return 0;
    }
    let remaining = (lock_end - now) as u128;
    let span = (lock_end - lock_start) as u128;
    // remaining < span, so the quotient is below ve_amount
    ((ve_amount as u128) * remaining / span) as u64
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_protocol_err;

    #[test]
    fn test_max_lock_grants_full_weight() {
        assert_eq!(ve_amount_for(1_000, MAX_LOCK_DURATION).unwrap(), 1_000);
    }

    #[test]
    fn test_min_lock_is_proportional() {
        let ve = ve_amount_for(MAX_LOCK_DURATION as u64, MIN_LOCK_DURATION).unwrap();
        assert_eq!(ve, MIN_LOCK_DURATION as u64);
    }

    #[test]
    fn test_duration_bounds() {
        assert_protocol_err(ve_amount_for(1, MIN_LOCK_DURATION - 1), ProtocolError::InvalidLockDuration);
        assert_protocol_err(ve_amount_for(1, MAX_LOCK_DURATION + 1), ProtocolError::InvalidLockDuration);
    }

    #[test]
    fn test_linear_decay() {
        let (start, end) = (1_000, 1_000 + MIN_LOCK_DURATION);
        let ve = 10_000;

        assert_eq!(effective_weight(ve, start, end, start), ve);
        assert_eq!(effective_weight(ve, start, end, start + MIN_LOCK_DURATION / 2), ve / 2);
        assert_eq!(effective_weight(ve, start, end, start + MIN_LOCK_DURATION / 4), ve * 3 / 4);
        assert_eq!(effective_weight(ve, start, end, end), 0);
    }

    #[test]
    fn test_weight_clamped_outside_lock() {
        assert_eq!(effective_weight(10_000, 100, 200, 99), 0);
        assert_eq!(effective_weight(10_000, 100, 200, 201), 0);
        assert_eq!(effective_weight(10_000, 100, 100, 100), 0);
    }

    #[test]
    fn test_weight_matches_formula_at_arbitrary_points() {
        let (start, end, ve) = (50_000i64, 50_000 + 3 * MIN_LOCK_DURATION, 987_654_321u64);
        for t in [start, start + 1, start + 12_345, end - 1] {
            let expected = (ve as u128 * (end - t) as u128 / (end - start) as u128) as u64;
            assert_eq!(effective_weight(ve, start, end, t), expected);
        }
    }
}
