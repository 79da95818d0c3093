//! Market Creation
//!
//! Opens a market on a protocol metric and allocates its pool token
//! account. The oracle co-signs and must be fully bonded; the market counts
//! against that bond until it is resolved or cancelled.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::errors::ProtocolError;
use crate::state::{MarketStatus, MetricType, OracleBond, PredictionMarket, ProtocolOp, ProtocolState};

/// Event emitted when a market is created
#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub creator: Pubkey,
    pub oracle: Pubkey,
    pub protocol_id: String,
    pub metric_type: MetricType,
    pub target_value: u64,
    pub resolution_ts: i64,
}

#[derive(Accounts)]
#[instruction(protocol_id: String, metric_type: MetricType, target_value: u64, resolution_ts: i64)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Accepts the market; it holds this oracle's bond until resolution
    pub oracle: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        seeds = [OracleBond::SEED, oracle.key().as_ref()],
        bump = oracle_bond.bump,
    )]
    pub oracle_bond: Box<Account<'info, OracleBond>>,

    #[account(
        init,
        payer = creator,
        space = 8 + PredictionMarket::INIT_SPACE,
        seeds = [PredictionMarket::SEED, protocol_id.as_bytes(), resolution_ts.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, PredictionMarket>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        token::mint = idl_mint,
        token::authority = market,
        token::token_program = token_program,
        seeds = [PredictionMarket::POOL_SEED, market.key().as_ref()],
        bump,
    )]
    pub market_pool: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        protocol_id: String,
        metric_type: MetricType,
        target_value: u64,
        resolution_ts: i64,
        description: String,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::CreateMarket)?;

        let oracle = self.oracle.key();
        PredictionMarket::validate_new(
            &self.creator.key(),
            &oracle,
            &protocol_id,
            &description,
            target_value,
            resolution_ts,
            now,
        )?;
        self.oracle_bond.attach_market(&oracle)?;

        self.market.set_inner(PredictionMarket {
            creator: self.creator.key(),
            oracle,
            protocol_id: protocol_id.clone(),
            metric_type,
            description,
            target_value,
            resolution_ts,
            created_at: now,
            status: MarketStatus::Active,
            pool: self.market_pool.key(),
            bump: bumps.market,
            pool_bump: bumps.market_pool,
            ..Default::default()
        });

        self.state.market_count = self.state.market_count.checked_add(1).ok_or(ProtocolError::MathOverflow)?;

        emit!(MarketCreated {
            market: self.market.key(),
            creator: self.creator.key(),
            oracle,
            protocol_id,
            metric_type,
            target_value,
            resolution_ts,
        });

        Ok(())
    }
}
