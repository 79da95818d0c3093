//! Stake IDL into the vault.
//!
//! The global checkpoint is folded and the staker's pending reward settled
//! before `staked_amount` changes, so new stake never earns rewards that
//! were distributed before it arrived.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_in;
use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount};

#[event]
pub struct Staked {
    pub owner: Pubkey,
    pub amount: u64,
    pub staked_amount: u64,
    pub total_staked: u64,
}

#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [ProtocolState::SEED],
        bump = state.bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    #[account(
        init_if_needed,
        payer = owner,
        space = 8 + StakerAccount::INIT_SPACE,
        seeds = [StakerAccount::SEED, owner.key().as_ref()],
        bump,
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
    pub system_program: Program<'info, System>,
}

impl<'info> Stake<'info> {
    pub fn stake(&mut self, amount: u64, bumps: &StakeBumps) -> Result<()> {
        let now = Clock::get()?.unix_timestamp;

        self.state.assert_allowed(ProtocolOp::Stake)?;
        require!(amount > 0, ProtocolError::InvalidAmount);

        if self.staker.owner == Pubkey::default() {
            self.staker.owner = self.owner.key();
            self.staker.bump = bumps.staker;
        }

        let reward_per_token = self.state.checkpoint()?;
        self.staker.settle(reward_per_token)?;
        self.state.add_stake(amount)?;
        self.staker.deposit(amount, now)?;

        transfer_in(
            &self.token_program,
            &self.idl_mint,
            self.owner_tokens.to_account_info(),
            self.vault.to_account_info(),
            self.owner.to_account_info(),
            amount,
        )?;

        emit!(Staked {
            owner: self.owner.key(),
            amount,
            staked_amount: self.staker.staked_amount,
            total_staked: self.state.total_staked,
        });

        Ok(())
    }
}
