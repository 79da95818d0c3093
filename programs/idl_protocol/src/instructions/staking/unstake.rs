//! Withdraw stake from the vault.
//!
//! Not gated by pause. The minimum stake duration and any live
//! vote-escrow lock still apply.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount};

#[event]
pub struct Unstaked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_staked: u64,
}

#[derive(Accounts)]
pub struct Unstake<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        mut,
        seeds = [StakerAccount::SEED, owner.key().as_ref()],
        bump = staker.bump,
        has_one = owner @ ProtocolError::Unauthorized,
    )]
    pub staker: Box<Account<'info, StakerAccount>>,

    #[account(address = state.idl_mint @ ProtocolError::InvalidMint)]
    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = idl_mint,
        token::authority = owner,
    )]
    pub owner_tokens: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [ProtocolState::VAULT_SEED],
        bump = state.vault_bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Unstake<'info> {
    pub fn unstake(&mut self, amount: u64) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::Unstake)?;

        let reward_per_token = self.state.checkpoint()?;
        self.staker.settle(reward_per_token)?;
        self.staker.withdraw(amount, now)?;
        self.state.remove_stake(amount)?;

        let state_seeds: &[&[u8]] = &[ProtocolState::SEED, &[self.state.bump]];
        transfer_out(
            &self.token_program,
            &self.idl_mint,
            self.vault.to_account_info(),
            self.owner_tokens.to_account_info(),
            self.state.to_account_info(),
            &[state_seeds],
            amount,
        )?;

        emit!(Unstaked {
            owner: self.owner.key(),
            amount,
            staked_amount: self.staker.staked_amount,
            total_staked: self.state.total_staked,
        });

        Ok(())
    }
}
