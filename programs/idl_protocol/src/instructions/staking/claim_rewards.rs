//! Claim settled staking rewards from the vault.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::custody::transfer_out;
use crate::errors::ProtocolError;
use crate::state::{ProtocolOp, ProtocolState, StakerAccount};

#[event]
pub struct StakingRewardsClaimed {
    pub owner: Pubkey,
    pub amount: u64,
    pub reward_pool: u64,
}

#[derive(Accounts)]
pub struct ClaimStakingRewards<'info> {
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

impl<'info> ClaimStakingRewards<'info> {
    pub fn claim_staking_rewards(&mut self) -> Result<u64> {
        let now = Clock::get()?.unix_timestamp;
        self.state.assert_allowed(ProtocolOp::ClaimStakingRewards)?;

        let reward_per_token = self.state.checkpoint()?;
        self.staker.settle(reward_per_token)?;
        let owed = self.staker.take_rewards(now)?;
        self.state.pay_rewards(owed)?;

        let state_seeds: &[&[u8]] = &[ProtocolState::SEED, &[self.state.bump]];
        transfer_out(
            &self.token_program,
            &self.idl_mint,
            self.vault.to_account_info(),
            self.owner_tokens.to_account_info(),
            self.state.to_account_info(),
            &[state_seeds],
            owed,
        )?;

        emit!(StakingRewardsClaimed {
            owner: self.owner.key(),
            amount: owed,
            reward_pool: self.state.reward_pool,
        });

        msg!("Claimed {} in staking rewards", owed);

        Ok(owed)
    }
}
