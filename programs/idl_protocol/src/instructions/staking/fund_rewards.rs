//! Fund the staker reward pool.
//!
//! Anyone may contribute. Funds arriving while nothing is staked are queued
//! and folded in by the first checkpoint that sees stake.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_in;
use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState};

#[event]
pub struct RewardsFunded {
    pub funder: Pubkey,
    pub amount: u64,
    pub reward_per_token_stored: u128,
}

#[derive(Accounts)]
pub struct FundRewards<'info> {
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = idl_mint,
        token::authority = funder,
    )]
    pub funder_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [ProtocolState::VAULT_SEED],
        bump = state.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> FundRewards<'info> {
    pub fn fund_rewards(&mut self, amount: u64) -> Result<()> {
        self.state.assert_allowed(ProtocolOp::FundRewards)?;
        require!(amount > 0, ProtocolError::InvalidAmount);

        self.state.distribute_rewards(amount)?;

        transfer_in(
            &self.token_program,
            &self.idl_mint,
            self.funder_tokens.to_account_info(),
            self.vault.to_account_info(),
            self.funder.to_account_info(),
            amount,
        )?;

        emit!(RewardsFunded {
            funder: self.funder.key(),
            amount,
            reward_per_token_stored: self.state.reward_per_token_stored,
        });

        Ok(())
    }
}
