//! Protocol Errors
//!
//! One enum so every failure carries a stable code (Anchor offset 6000+).
//! New variants are appended; existing ones are never reordered.

use anchor_lang::prelude::*;

#[error_code]
pub enum ProtocolError {
    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------
    #[msg("Invalid amount")]
    InvalidAmount,
    #[msg("Invalid lock duration (min 1 week, max 4 years)")]
    InvalidLockDuration,
    #[msg("Lock extension cannot shorten the remaining duration")]
    LockShortened,
    #[msg("Insufficient stake")]
    InsufficientStake,
    #[msg("Invalid input")]
    InvalidInput,
    #[msg("Target value below minimum")]
    TargetTooLow,
    #[msg("Bet amount exceeds maximum")]
    BetTooLarge,
    #[msg("TVL cap exceeded")]
    TvlCapExceeded,
    #[msg("TVL cap can only increase, up to the hard maximum")]
    InvalidTvlCap,
    #[msg("Insufficient trading volume for this badge tier")]
    InsufficientVolume,
    #[msg("Invalid token mint")]
    InvalidMint,
    #[msg("No rewards to claim")]
    NoRewardsToClaim,
    #[msg("Insufficient insurance balance")]
    InsufficientInsurance,
    #[msg("An active vote-escrow lock already exists")]
    LockAlreadyActive,
    #[msg("No active vote-escrow lock")]
    NoActiveLock,
    #[msg("A live bet commitment already exists for this market")]
    CommitmentOutstanding,
    #[msg("No bet has been committed")]
    NoBetCommitted,
    #[msg("Commitment already revealed")]
    CommitmentAlreadyRevealed,
    #[msg("Market has an outstanding resolution")]
    ResolutionOutstanding,
    #[msg("No resolution has been committed")]
    NoResolutionCommitted,
    #[msg("Resolution has not been revealed")]
    ResolutionNotRevealed,
    #[msg("Oracle bond is already fully posted")]
    BondAlreadyPosted,
    #[msg("Oracle bond is below the required amount")]
    OracleNotBonded,
    #[msg("Oracle still backs active markets")]
    OracleHasActiveMarkets,
    #[msg("No authority transfer is pending")]
    NoPendingAuthority,

    // -------------------------------------------------------------------------
    // Market state
    // -------------------------------------------------------------------------
    #[msg("Market is not accepting bets")]
    BettingClosed,
    #[msg("Market already resolved")]
    MarketResolved,
    #[msg("Market not resolved")]
    MarketNotResolved,
    #[msg("Market is cancelled")]
    MarketCancelled,
    #[msg("Market is not cancelled")]
    MarketNotCancelled,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Bet is on the losing side")]
    BetLost,
    #[msg("Direct bets are disabled; use commit_bet and reveal_bet")]
    DirectBetDisabled,

    // -------------------------------------------------------------------------
    // Authorization
    // -------------------------------------------------------------------------
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Oracle and creator may not be the same account")]
    OracleIsCreator,
    #[msg("Market oracle and creator may not bet")]
    ForbiddenBettor,
    #[msg("Badge tiers cannot be lowered through issue_badge")]
    BadgeDowngrade,
    #[msg("Protocol is paused")]
    ProtocolPaused,

    // -------------------------------------------------------------------------
    // Timing
    // -------------------------------------------------------------------------
    #[msg("Resolution timestamp too close")]
    ResolutionTooSoon,
    #[msg("Minimum stake duration not reached")]
    StakeTooRecent,
    #[msg("Tokens are locked for veIDL")]
    TokensLocked,
    #[msg("Lock not expired")]
    LockNotExpired,
    #[msg("Reward claim cooldown active")]
    ClaimCooldown,
    #[msg("Bet reveal window has not opened")]
    RevealTooEarly,
    #[msg("Bet reveal window has closed")]
    RevealTooLate,
    #[msg("Resolution too early")]
    ResolutionTooEarly,
    #[msg("Resolution reveal window has closed")]
    ResolutionRevealExpired,
    #[msg("Dispute window is still open")]
    DisputeWindowOpen,
    #[msg("Dispute window has closed")]
    DisputeWindowClosed,
    #[msg("Claim delay after resolution not elapsed")]
    ClaimTooEarly,
    #[msg("Authority timelock not elapsed")]
    TimelockActive,

    // -------------------------------------------------------------------------
    // Arithmetic
    // -------------------------------------------------------------------------
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Claim would exceed the market pool balance")]
    PoolInsolvent,

    // -------------------------------------------------------------------------
    // Commitments
    // -------------------------------------------------------------------------
    #[msg("Revealed values do not match the commitment")]
    CommitmentMismatch,
}

#[cfg(test)]
pub(crate) fn assert_protocol_err<T: std::fmt::Debug>(result: Result<T>, expected: ProtocolError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(e.error_code_number, u32::from(expected), "got {}", e.error_name)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
