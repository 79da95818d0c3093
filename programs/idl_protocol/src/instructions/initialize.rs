//! Protocol Initialization
//!
//! Creates the global state together with the two program-owned token
//! accounts: the vault (stake, rewards, oracle bonds, insurance) and the
//! burn vault. Called once at deployment.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::MAX_TVL_CAP;
use crate::errors::ProtocolError;
use crate::state::ProtocolState;

/// Event emitted when the protocol is initialized
#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub idl_mint: Pubkey,
    pub treasury: Pubkey,
    pub tvl_cap: u64,
}

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer, becomes the governance authority
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + ProtocolState::INIT_SPACE,
        seeds = [ProtocolState::SEED],
        bump,
    )]
    pub state: Box<Account<'info, ProtocolState>>,

    pub idl_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        token::mint = idl_mint,
        token::authority = state,
        token::token_program = token_program,
        seeds = [ProtocolState::VAULT_SEED],
        bump,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        token::mint = idl_mint,
        token::authority = state,
        token::token_program = token_program,
        seeds = [ProtocolState::BURN_VAULT_SEED],
        bump,
    )]
    pub burn_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Receives the treasury fee share and insurance withdrawals
    #[account(token::mint = idl_mint)]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, tvl_cap: u64, bumps: &InitializeBumps) -> Result<()> {
        require!(tvl_cap > 0 && tvl_cap <= MAX_TVL_CAP, ProtocolError::InvalidTvlCap);

        self.state.set_inner(ProtocolState {
            authority: self.authority.key(),
            idl_mint: self.idl_mint.key(),
            treasury: self.treasury.key(),
            vault: self.vault.key(),
            burn_vault: self.burn_vault.key(),
            tvl_cap,
            bump: bumps.state,
            vault_bump: bumps.vault,
            burn_vault_bump: bumps.burn_vault,
            ..Default::default()
        });

        emit!(ProtocolInitialized {
            authority: self.authority.key(),
            idl_mint: self.idl_mint.key(),
            treasury: self.treasury.key(),
            tvl_cap,
        });

        msg!("Protocol initialized!");
        msg!("Authority: {}", self.authority.key());
        msg!("TVL cap: {}", tvl_cap);

        Ok(())
    }
}
