//! Vote-Escrow Positions
//!
//! A position snapshots the owner's stake at lock time. Stake added later is
//! not picked up until the owner calls `extend_lock`, which re-snapshots.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::math::{effective_weight, validate_lock_duration, ve_amount_for};

/// Seeds: ["ve_position", owner]
#[account]
#[derive(InitSpace, Default)]
pub struct VePosition {
    pub owner: Pubkey,

    /// Stake snapshot taken at lock (or last extension)
    pub locked_stake: u64,

    /// Nominal weight before decay
    pub ve_amount: u64,

    pub lock_start: i64,
    pub lock_end: i64,

    /// Cleared by `unlock_ve`; the record itself is kept for re-locking
    pub active: bool,

    pub bump: u8,
}

impl VePosition {
    pub const SEED: &'static [u8] = b"ve_position";

    /// Open a new lock over `staked` tokens. Returns the granted ve amount.
    pub fn lock(&mut self, owner: Pubkey, staked: u64, duration: i64, now: i64) -> Result<u64> {
        require!(!self.active, ProtocolError::LockAlreadyActive);
        require!(staked > 0, ProtocolError::InsufficientStake);

        let ve_amount = ve_amount_for(staked, duration)?;

        self.owner = owner;
        self.locked_stake = staked;
        self.ve_amount = ve_amount;
        self.lock_start = now;
        self.lock_end = now.checked_add(duration).ok_or(ProtocolError::MathOverflow)?;
        self.active = true;
        Ok(ve_amount)
    }

    /// Restart the lock at `now` for `new_duration`, re-snapshotting stake.
    ///
    /// Returns `(old_ve, new_ve)` so the caller can adjust the global supply.
    pub fn extend(&mut self, staked: u64, new_duration: i64, now: i64) -> Result<(u64, u64)> {
        require!(self.active, ProtocolError::NoActiveLock);
        validate_lock_duration(new_duration)?;

        let new_end = now.checked_add(new_duration).ok_or(ProtocolError::MathOverflow)?;
        require!(new_end >= self.lock_end, ProtocolError::LockShortened);

        let old_ve = self.ve_amount;
        let new_ve = ve_amount_for(staked, new_duration)?;

        self.locked_stake = staked;
        self.ve_amount = new_ve;
        self.lock_start = now;
        self.lock_end = new_end;
        Ok((old_ve, new_ve))
    }

    /// Release an expired position. Returns the ve amount removed.
    pub fn unlock(&mut self, now: i64) -> Result<u64> {
        require!(self.active, ProtocolError::NoActiveLock);
        require!(now >= self.lock_end, ProtocolError::LockNotExpired);

        let released = self.ve_amount;
        self.active = false;
        self.ve_amount = 0;
        self.locked_stake = 0;
        Ok(released)
    }

    /// Decayed governance weight at `now`
    pub fn weight_at(&self, now: i64) -> u64 {
        if !self.active {
            return 0;
        }
        effective_weight(self.ve_amount, self.lock_start, self.lock_end, now)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_LOCK_DURATION, MIN_LOCK_DURATION};
    use crate::errors::assert_protocol_err;

    const T0: i64 = 1_700_000_000;

    #[test]
    fn test_lock_snapshots_stake() {
        let mut ve = VePosition::default();
        let granted = ve.lock(Pubkey::new_unique(), 4_000, MAX_LOCK_DURATION / 4, T0).unwrap();

        assert_eq!(granted, 1_000);
        assert_eq!(ve.locked_stake, 4_000);
        assert_eq!(ve.lock_end, T0 + MAX_LOCK_DURATION / 4);
        assert_eq!(ve.weight_at(T0), 1_000);
        assert_eq!(ve.weight_at(ve.lock_end), 0);
    }

    #[test]
    fn test_double_lock_rejected() {
        let mut ve = VePosition::default();
        ve.lock(Pubkey::new_unique(), 1_000, MIN_LOCK_DURATION, T0).unwrap();
        assert_protocol_err(
            ve.lock(ve.owner, 1_000, MIN_LOCK_DURATION, T0),
            ProtocolError::LockAlreadyActive,
        );
    }

    #[test]
    fn test_lock_requires_stake() {
        let mut ve = VePosition::default();
        assert_protocol_err(
            ve.lock(Pubkey::new_unique(), 0, MIN_LOCK_DURATION, T0),
            ProtocolError::InsufficientStake,
        );
    }

    #[test]
    fn test_extend_cannot_shorten() {
        let mut ve = VePosition::default();
        ve.lock(Pubkey::new_unique(), 1_000, 4 * MIN_LOCK_DURATION, T0).unwrap();

        // One week later, asking for two weeks would end before the current lock
        let now = T0 + MIN_LOCK_DURATION;
        assert_protocol_err(ve.extend(1_000, 2 * MIN_LOCK_DURATION, now), ProtocolError::LockShortened);

        // A quarter of the way through, the old lock has decayed by a quarter
        let granted = ve.ve_amount;
        assert_eq!(ve.weight_at(now), granted * 3 / 4);

        // Exactly the remaining duration is allowed
        ve.extend(1_000, 3 * MIN_LOCK_DURATION, now).unwrap();
        assert_eq!(ve.lock_end, T0 + 4 * MIN_LOCK_DURATION);
        assert_eq!(ve.weight_at(now), ve.ve_amount);
    }

    #[test]
    fn test_extend_resnapshots_stake() {
        let mut ve = VePosition::default();
        ve.lock(Pubkey::new_unique(), 1_000, MAX_LOCK_DURATION / 2, T0).unwrap();

        let (old_ve, new_ve) = ve.extend(3_000, MAX_LOCK_DURATION, T0 + 10).unwrap();
        assert_eq!(old_ve, 500);
        assert_eq!(new_ve, 3_000);
        assert_eq!(ve.locked_stake, 3_000);
        assert_eq!(ve.lock_start, T0 + 10);
    }

    #[test]
    fn test_unlock_only_after_expiry() {
        let mut ve = VePosition::default();
        ve.lock(Pubkey::new_unique(), 1_000, MIN_LOCK_DURATION, T0).unwrap();

        assert_protocol_err(ve.unlock(T0 + MIN_LOCK_DURATION - 1), ProtocolError::LockNotExpired);
        let released = ve.unlock(T0 + MIN_LOCK_DURATION).unwrap();
        assert_eq!(released, ve_amount_for(1_000, MIN_LOCK_DURATION).unwrap());
        assert!(!ve.active);
        assert_eq!(ve.weight_at(T0), 0);

        // Position can be reused
        ve.lock(ve.owner, 500, MIN_LOCK_DURATION, T0 + MIN_LOCK_DURATION).unwrap();
    }
}
