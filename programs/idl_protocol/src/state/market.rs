//! Prediction Market State
//!
//! Each market asks whether a protocol metric will reach `target_value` by
//! `resolution_ts`. Bets are pooled in the market's own token account and
//! the bonded oracle resolves the outcome through commit-reveal.
//!
//! ```text
//! Active ──(resolution_ts - BETTING_CLOSE_WINDOW)──▶ BettingClosed
//!        ──commit_resolution──▶ ResolutionCommitted ──finalize──▶ Resolved
//!                                       │
//!                                    dispute ──▶ BettingClosed (re-commit)
//! any non-final state ──cancel──▶ Cancelled
//! ```

use anchor_lang::prelude::*;

use crate::constants::{
    BETTING_CLOSE_WINDOW, CLAIM_DELAY_AFTER_RESOLVE, MAX_BET_AMOUNT, MAX_DESCRIPTION_LEN,
    MAX_PROTOCOL_ID_LEN, MIN_RESOLUTION_DELAY, MIN_TARGET_VALUE, ORACLE_DISPUTE_WINDOW,
    RESOLUTION_REVEAL_WINDOW,
};
use crate::errors::ProtocolError;
use crate::math::{capped_totals, resolution_commitment};
use crate::state::Side;

/// Individual prediction market account
///
/// Seeds: ["market", protocol_id, resolution_ts.to_le_bytes()]
#[account]
#[derive(InitSpace, Default)]
pub struct PredictionMarket {
    pub creator: Pubkey,

    /// Bonded oracle that reports the metric
    pub oracle: Pubkey,

    /// Protocol whose metric is being predicted
    /// e.g. "jupiter", "marinade"
    #[max_len(32)]
    pub protocol_id: String,

    pub metric_type: MetricType,

    #[max_len(200)]
    pub description: String,

    /// YES wins iff the reported value reaches this
    pub target_value: u64,

    pub resolution_ts: i64,
    pub created_at: i64,

    /// Persisted status; see `effective_status` for the implicit close
    pub status: MarketStatus,

    /// Raw principal per side
    pub total_yes_actual: u64,
    pub total_no_actual: u64,

    /// Imbalance-capped totals
    pub total_yes_amount: u64,
    pub total_no_amount: u64,

    /// Gross amount paid out of the pool so far (winnings and refunds)
    pub total_claimed: u64,

    pub bet_count: u64,

    pub resolution_commitment: Option<[u8; 32]>,
    pub resolution_commit_ts: i64,
    pub revealed_at: Option<i64>,
    pub actual_value: Option<u64>,
    pub outcome: Option<Side>,
    pub resolved_at: Option<i64>,

    pub dispute_count: u32,

    /// Market pool token account
    pub pool: Pubkey,

    pub bump: u8,
    pub pool_bump: u8,
}

/// Market lifecycle status
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketStatus {
    /// Accepting bet commitments
    #[default]
    Active,
    /// Betting over, awaiting a resolution commitment
    BettingClosed,
    /// Oracle has committed (and possibly revealed) a value
    ResolutionCommitted,
    /// Outcome final, winners may claim
    Resolved,
    /// Voided, bettors may reclaim principal
    Cancelled,
}

/// Metric a market is predicting
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MetricType {
    #[default]
    Tvl,
    Volume24h,
    Users,
    Transactions,
    Price,
    MarketCap,
    Custom,
}

impl MetricType {
    /// Winning side for a reported value
    pub fn outcome(self, actual: u64, target: u64) -> Side {
        let reached = match self {
            MetricType::Tvl
            | MetricType::Volume24h
            | MetricType::Users
            | MetricType::Transactions
            | MetricType::Price
            | MetricType::MarketCap
            | MetricType::Custom => actual >= target,
        };
        if reached {
            Side::Yes
        } else {
            Side::No
        }
    }
}

impl PredictionMarket {
    pub const SEED: &'static [u8] = b"market";
    pub const POOL_SEED: &'static [u8] = b"market_pool";

    /// Creation-time checks that don't depend on other accounts
    pub fn validate_new(
        creator: &Pubkey,
        oracle: &Pubkey,
        protocol_id: &str,
        description: &str,
        target_value: u64,
        resolution_ts: i64,
        now: i64,
    ) -> Result<()> {
        require!(
            !protocol_id.is_empty() && protocol_id.len() <= MAX_PROTOCOL_ID_LEN,
            ProtocolError::InvalidInput
        );
        require!(description.len() <= MAX_DESCRIPTION_LEN, ProtocolError::InvalidInput);
        require_keys_neq!(*creator, *oracle, ProtocolError::OracleIsCreator);
        require!(target_value >= MIN_TARGET_VALUE, ProtocolError::TargetTooLow);

        let earliest = now.checked_add(MIN_RESOLUTION_DELAY).ok_or(ProtocolError::MathOverflow)?;
        require!(resolution_ts >= earliest, ProtocolError::ResolutionTooSoon);
        Ok(())
    }

    /// Status with the time-based betting close applied
    pub fn effective_status(&self, now: i64) -> MarketStatus {
        let closes_at = self.resolution_ts.saturating_sub(BETTING_CLOSE_WINDOW);
        if self.status == MarketStatus::Active && now >= closes_at {
            MarketStatus::BettingClosed
        } else {
            self.status
        }
    }

    fn assert_not_final(&self) -> Result<()> {
        match self.status {
            MarketStatus::Resolved => err!(ProtocolError::MarketResolved),
            MarketStatus::Cancelled => err!(ProtocolError::MarketCancelled),
            _ => Ok(()),
        }
    }

    pub fn assert_accepting_commits(&self, now: i64) -> Result<()> {
        self.assert_not_final()?;
        require!(
            self.effective_status(now) == MarketStatus::Active,
            ProtocolError::BettingClosed
        );
        Ok(())
    }

    /// Reveals may land inside the close window, but never at or after
    /// `resolution_ts` or once the oracle has acted
    pub fn assert_accepting_reveals(&self, now: i64) -> Result<()> {
        self.assert_not_final()?;
        require!(
            self.status == MarketStatus::Active && now < self.resolution_ts,
            ProtocolError::BettingClosed
        );
        Ok(())
    }

    /// The creator and the oracle may not bet on their own market
    pub fn assert_not_participant(&self, bettor: &Pubkey) -> Result<()> {
        require!(
            *bettor != self.creator && *bettor != self.oracle,
            ProtocolError::ForbiddenBettor
        );
        Ok(())
    }

    pub fn record_bet(&mut self, amount: u64, side: Side) -> Result<()> {
        require!(amount > 0, ProtocolError::InvalidAmount);
        require!(amount <= MAX_BET_AMOUNT, ProtocolError::BetTooLarge);

        match side {
            Side::Yes => {
                self.total_yes_actual = self.total_yes_actual.checked_add(amount).ok_or(ProtocolError::MathOverflow)?
            }
            Side::No => {
                self.total_no_actual = self.total_no_actual.checked_add(amount).ok_or(ProtocolError::MathOverflow)?
            }
        }
        (self.total_yes_amount, self.total_no_amount) = capped_totals(self.total_yes_actual, self.total_no_actual);
        self.bet_count = self.bet_count.checked_add(1).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    /// Principal held by the pool
    pub fn pool_principal(&self) -> Result<u64> {
        self.total_yes_actual
            .checked_add(self.total_no_actual)
            .ok_or_else(|| error!(ProtocolError::MathOverflow))
    }

    // -------------------------------------------------------------------------
    // Resolution
    // -------------------------------------------------------------------------

    /// A commitment is outstanding while it is revealed (pending finalize)
    /// or still inside its reveal window
    fn has_outstanding_resolution(&self, now: i64) -> Result<bool> {
        if self.resolution_commitment.is_none() {
            return Ok(false);
        }
        if self.revealed_at.is_some() {
            return Ok(true);
        }
        let expires_at = self
            .resolution_commit_ts
            .checked_add(RESOLUTION_REVEAL_WINDOW)
            .ok_or(ProtocolError::MathOverflow)?;
        Ok(now <= expires_at)
    }

    pub fn commit_resolution(&mut self, commitment: [u8; 32], now: i64) -> Result<()> {
        self.assert_not_final()?;
        require!(now >= self.resolution_ts, ProtocolError::ResolutionTooEarly);
        require!(!self.has_outstanding_resolution(now)?, ProtocolError::ResolutionOutstanding);

        self.resolution_commitment = Some(commitment);
        self.resolution_commit_ts = now;
        self.revealed_at = None;
        self.actual_value = None;
        self.outcome = None;
        self.status = MarketStatus::ResolutionCommitted;
        Ok(())
    }

    /// Open the committed value; returns the winning side
    pub fn reveal_resolution(&mut self, actual_value: u64, nonce: u64, now: i64) -> Result<Side> {
        self.assert_not_final()?;
        let commitment = self.resolution_commitment.ok_or(ProtocolError::NoResolutionCommitted)?;
        require!(self.revealed_at.is_none(), ProtocolError::CommitmentAlreadyRevealed);

        let expires_at = self
            .resolution_commit_ts
            .checked_add(RESOLUTION_REVEAL_WINDOW)
            .ok_or(ProtocolError::MathOverflow)?;
        require!(now <= expires_at, ProtocolError::ResolutionRevealExpired);
        require!(
            resolution_commitment(actual_value, nonce) == commitment,
            ProtocolError::CommitmentMismatch
        );

        let outcome = self.metric_type.outcome(actual_value, self.target_value);
        self.actual_value = Some(actual_value);
        self.outcome = Some(outcome);
        self.revealed_at = Some(now);
        Ok(outcome)
    }

    fn dispute_closes_at(&self) -> Result<i64> {
        let revealed_at = self.revealed_at.ok_or(ProtocolError::ResolutionNotRevealed)?;
        revealed_at
            .checked_add(ORACLE_DISPUTE_WINDOW)
            .ok_or_else(|| error!(ProtocolError::MathOverflow))
    }

    /// Throw out the revealed value and wait for a fresh commitment
    pub fn dispute(&mut self, now: i64) -> Result<()> {
        self.assert_not_final()?;
        require!(now < self.dispute_closes_at()?, ProtocolError::DisputeWindowClosed);

        self.resolution_commitment = None;
        self.resolution_commit_ts = 0;
        self.revealed_at = None;
        self.actual_value = None;
        self.outcome = None;
        self.status = MarketStatus::BettingClosed;
        self.dispute_count = self.dispute_count.checked_add(1).ok_or(ProtocolError::MathOverflow)?;
        Ok(())
    }

    /// Lock in an undisputed outcome
    pub fn finalize(&mut self, now: i64) -> Result<()> {
        self.assert_not_final()?;
        require!(now >= self.dispute_closes_at()?, ProtocolError::DisputeWindowOpen);

        self.status = MarketStatus::Resolved;
        self.resolved_at = Some(now);
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.assert_not_final()?;
        self.status = MarketStatus::Cancelled;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Payouts
    // -------------------------------------------------------------------------

    pub fn assert_claimable(&self, now: i64) -> Result<()> {
        require!(self.status != MarketStatus::Cancelled, ProtocolError::MarketCancelled);
        require!(self.status == MarketStatus::Resolved, ProtocolError::MarketNotResolved);

        let resolved_at = self.resolved_at.ok_or(ProtocolError::MarketNotResolved)?;
        let opens_at = resolved_at
            .checked_add(CLAIM_DELAY_AFTER_RESOLVE)
            .ok_or(ProtocolError::MathOverflow)?;
        require!(now >= opens_at, ProtocolError::ClaimTooEarly);
        Ok(())
    }

    /// Principal comes back on a cancelled market, or on a resolved one
    /// where nobody backed the winning side
    pub fn assert_refundable(&self) -> Result<()> {
        let unclaimable = self.status == MarketStatus::Resolved && self.winning_pools()?.1 == 0;
        require!(
            self.status == MarketStatus::Cancelled || unclaimable,
            ProtocolError::MarketNotCancelled
        );
        Ok(())
    }

    /// Winning side with its raw total and the losing raw total
    pub fn winning_pools(&self) -> Result<(Side, u64, u64)> {
        let outcome = self.outcome.ok_or(ProtocolError::MarketNotResolved)?;
        Ok(match outcome {
            Side::Yes => (outcome, self.total_yes_actual, self.total_no_actual),
            Side::No => (outcome, self.total_no_actual, self.total_yes_actual),
        })
    }

    /// Account for `gross` leaving the pool
    pub fn record_payout(&mut self, gross: u64) -> Result<()> {
        let claimed = self.total_claimed.checked_add(gross).ok_or(ProtocolError::MathOverflow)?;
        require!(claimed <= self.pool_principal()?, ProtocolError::PoolInsolvent);
        self.total_claimed = claimed;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_protocol_err;
    use crate::math::winning_payout;

    const T0: i64 = 1_700_000_000;
    const HOUR: i64 = 3_600;

    fn market(resolution_ts: i64) -> PredictionMarket {
        PredictionMarket {
            creator: Pubkey::new_unique(),
            oracle: Pubkey::new_unique(),
            protocol_id: "jupiter".to_string(),
            metric_type: MetricType::Tvl,
            target_value: 1_000,
            resolution_ts,
            created_at: T0,
            ..Default::default()
        }
    }

    /// Commit, reveal and finalize `actual` with no dispute
    fn resolve(market: &mut PredictionMarket, actual: u64) -> i64 {
        let commit_at = market.resolution_ts;
        market.commit_resolution(resolution_commitment(actual, 99), commit_at).unwrap();
        market.reveal_resolution(actual, 99, commit_at + 60).unwrap();
        let finalized_at = commit_at + 60 + ORACLE_DISPUTE_WINDOW;
        market.finalize(finalized_at).unwrap();
        finalized_at
    }

    #[test]
    fn test_resolution_delay_boundary() {
        let creator = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();

        assert_protocol_err(
            PredictionMarket::validate_new(&creator, &oracle, "jup", "", 1_000, T0 + MIN_RESOLUTION_DELAY - 1, T0),
            ProtocolError::ResolutionTooSoon,
        );
        PredictionMarket::validate_new(&creator, &oracle, "jup", "", 1_000, T0 + MIN_RESOLUTION_DELAY, T0).unwrap();
    }

    #[test]
    fn test_creation_rejects_bad_inputs() {
        let creator = Pubkey::new_unique();
        let oracle = Pubkey::new_unique();
        let ts = T0 + 2 * HOUR;

        assert_protocol_err(
            PredictionMarket::validate_new(&creator, &creator, "jup", "", 1_000, ts, T0),
            ProtocolError::OracleIsCreator,
        );
        assert_protocol_err(
            PredictionMarket::validate_new(&creator, &oracle, "jup", "", 0, ts, T0),
            ProtocolError::TargetTooLow,
        );
        assert_protocol_err(
            PredictionMarket::validate_new(&creator, &oracle, &"x".repeat(33), "", 1_000, ts, T0),
            ProtocolError::InvalidInput,
        );
        assert_protocol_err(
            PredictionMarket::validate_new(&creator, &oracle, "jup", &"d".repeat(201), 1_000, ts, T0),
            ProtocolError::InvalidInput,
        );
    }

    #[test]
    fn test_betting_closes_before_resolution() {
        let m = market(T0 + 25 * HOUR);
        let closes_at = m.resolution_ts - BETTING_CLOSE_WINDOW;

        m.assert_accepting_commits(closes_at - 1).unwrap();
        assert_eq!(m.effective_status(closes_at), MarketStatus::BettingClosed);
        assert_protocol_err(m.assert_accepting_commits(closes_at), ProtocolError::BettingClosed);

        // A reveal for an earlier commit still lands inside the close window
        m.assert_accepting_reveals(closes_at + 1).unwrap();
        assert_protocol_err(m.assert_accepting_reveals(m.resolution_ts), ProtocolError::BettingClosed);
    }

    #[test]
    fn test_creator_and_oracle_cannot_bet() {
        let m = market(T0 + 25 * HOUR);
        assert_protocol_err(m.assert_not_participant(&m.creator), ProtocolError::ForbiddenBettor);
        assert_protocol_err(m.assert_not_participant(&m.oracle), ProtocolError::ForbiddenBettor);
        m.assert_not_participant(&Pubkey::new_unique()).unwrap();
    }

    #[test]
    fn test_record_bet_caps_imbalance() {
        let mut m = market(T0 + 25 * HOUR);
        m.record_bet(5_000, Side::Yes).unwrap();
        assert_eq!((m.total_yes_amount, m.total_no_amount), (5_000, 0));

        m.record_bet(100, Side::No).unwrap();
        assert_eq!((m.total_yes_actual, m.total_no_actual), (5_000, 100));
        assert_eq!((m.total_yes_amount, m.total_no_amount), (1_000, 100));

        assert_protocol_err(m.record_bet(0, Side::No), ProtocolError::InvalidAmount);
        assert_protocol_err(m.record_bet(MAX_BET_AMOUNT + 1, Side::No), ProtocolError::BetTooLarge);
        assert_eq!(m.bet_count, 2);
    }

    #[test]
    fn test_two_bettor_market_resolves_and_pays_exactly() {
        let mut m = market(T0 + 25 * HOUR);
        m.record_bet(100, Side::Yes).unwrap();
        m.record_bet(50, Side::No).unwrap();

        let finalized_at = resolve(&mut m, 1_500);
        assert_eq!(m.status, MarketStatus::Resolved);
        assert_eq!(m.outcome, Some(Side::Yes));

        assert_protocol_err(
            m.assert_claimable(finalized_at + CLAIM_DELAY_AFTER_RESOLVE - 1),
            ProtocolError::ClaimTooEarly,
        );
        m.assert_claimable(finalized_at + CLAIM_DELAY_AFTER_RESOLVE).unwrap();

        let (side, winning, losing) = m.winning_pools().unwrap();
        assert_eq!((side, winning, losing), (Side::Yes, 100, 50));

        let payout = winning_payout(100, winning, losing, 0).unwrap();
        m.record_payout(payout.gross).unwrap();
        assert_eq!(payout.net + payout.split.total(), 150);
        assert_eq!(m.total_claimed, m.pool_principal().unwrap());
        assert_protocol_err(m.record_payout(1), ProtocolError::PoolInsolvent);
    }

    #[test]
    fn test_target_not_reached_resolves_no() {
        let mut m = market(T0 + 25 * HOUR);
        resolve(&mut m, 999);
        assert_eq!(m.outcome, Some(Side::No));
    }

    #[test]
    fn test_cancelled_market_refunds_principal() {
        let mut m = market(T0 + 25 * HOUR);
        m.record_bet(100, Side::Yes).unwrap();
        m.record_bet(50, Side::No).unwrap();

        assert_protocol_err(m.assert_refundable(), ProtocolError::MarketNotCancelled);
        m.cancel().unwrap();
        m.assert_refundable().unwrap();

        for amount in [100, 50] {
            m.record_payout(amount).unwrap();
        }
        assert_eq!(m.total_claimed, 150);
        assert_protocol_err(m.assert_claimable(T0 + 100 * HOUR), ProtocolError::MarketCancelled);
        assert_protocol_err(m.cancel(), ProtocolError::MarketCancelled);
    }

    #[test]
    fn test_empty_winning_side_refunds_losers() {
        let mut m = market(T0 + 25 * HOUR);
        m.record_bet(100, Side::No).unwrap();
        m.record_bet(40, Side::No).unwrap();

        resolve(&mut m, 5_000);
        assert_eq!(m.outcome, Some(Side::Yes));
        m.assert_refundable().unwrap();

        for amount in [100, 40] {
            m.record_payout(amount).unwrap();
        }
        assert_eq!(m.total_claimed, m.pool_principal().unwrap());

        // With a winner present the losing stake pays out instead
        let mut m = market(T0 + 25 * HOUR);
        m.record_bet(100, Side::No).unwrap();
        m.record_bet(10, Side::Yes).unwrap();
        resolve(&mut m, 5_000);
        assert_protocol_err(m.assert_refundable(), ProtocolError::MarketNotCancelled);
    }

    #[test]
    fn test_resolution_commit_and_reveal_rules() {
        let mut m = market(T0 + 25 * HOUR);
        let ts = m.resolution_ts;

        assert_protocol_err(
            m.commit_resolution(resolution_commitment(1, 1), ts - 1),
            ProtocolError::ResolutionTooEarly,
        );
        m.commit_resolution(resolution_commitment(1_500, 7), ts).unwrap();
        assert_protocol_err(
            m.commit_resolution(resolution_commitment(1_500, 8), ts + 1),
            ProtocolError::ResolutionOutstanding,
        );

        assert_protocol_err(m.reveal_resolution(1_501, 7, ts + 1), ProtocolError::CommitmentMismatch);
        assert_protocol_err(m.reveal_resolution(1_500, 8, ts + 1), ProtocolError::CommitmentMismatch);
        assert_protocol_err(
            m.reveal_resolution(1_500, 7, ts + RESOLUTION_REVEAL_WINDOW + 1),
            ProtocolError::ResolutionRevealExpired,
        );
        assert_eq!(m.reveal_resolution(1_500, 7, ts + RESOLUTION_REVEAL_WINDOW).unwrap(), Side::Yes);
    }

    #[test]
    fn test_lapsed_resolution_commitment_can_be_replaced() {
        let mut m = market(T0 + 25 * HOUR);
        let ts = m.resolution_ts;
        m.commit_resolution(resolution_commitment(1_500, 7), ts).unwrap();

        let lapsed = ts + RESOLUTION_REVEAL_WINDOW + 1;
        m.commit_resolution(resolution_commitment(900, 3), lapsed).unwrap();
        assert_eq!(m.reveal_resolution(900, 3, lapsed + 1).unwrap(), Side::No);
    }

    #[test]
    fn test_dispute_reopens_resolution() {
        let mut m = market(T0 + 25 * HOUR);
        let ts = m.resolution_ts;
        m.commit_resolution(resolution_commitment(1_500, 7), ts).unwrap();

        assert_protocol_err(m.dispute(ts + 1), ProtocolError::ResolutionNotRevealed);
        m.reveal_resolution(1_500, 7, ts + 10).unwrap();

        assert_protocol_err(m.finalize(ts + 10 + ORACLE_DISPUTE_WINDOW - 1), ProtocolError::DisputeWindowOpen);
        m.dispute(ts + 20).unwrap();

        assert_eq!(m.status, MarketStatus::BettingClosed);
        assert_eq!(m.outcome, None);
        assert_eq!(m.dispute_count, 1);
        assert_protocol_err(m.finalize(ts + 2 * ORACLE_DISPUTE_WINDOW), ProtocolError::ResolutionNotRevealed);

        // Re-resolution with the corrected value
        m.commit_resolution(resolution_commitment(800, 1), ts + 30).unwrap();
        m.reveal_resolution(800, 1, ts + 40).unwrap();
        assert_protocol_err(m.dispute(ts + 40 + ORACLE_DISPUTE_WINDOW), ProtocolError::DisputeWindowClosed);
        m.finalize(ts + 40 + ORACLE_DISPUTE_WINDOW).unwrap();
        assert_eq!(m.outcome, Some(Side::No));
    }

    #[test]
    fn test_every_metric_uses_threshold() {
        for metric in [
            MetricType::Tvl,
            MetricType::Volume24h,
            MetricType::Users,
            MetricType::Transactions,
            MetricType::Price,
            MetricType::MarketCap,
            MetricType::Custom,
        ] {
            assert_eq!(metric.outcome(10, 10), Side::Yes);
            assert_eq!(metric.outcome(9, 10), Side::No);
        }
    }
}
