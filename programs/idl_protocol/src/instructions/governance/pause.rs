//! Emergency pause switch.

use anchor_lang::prelude::*;

use crate::instructions::governance::AuthorityAction;
use crate::state::ProtocolOp;

#[event]
pub struct PauseChanged {
    pub authority: Pubkey,
    pub paused: bool,
}

impl<'info> AuthorityAction<'info> {
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::Governance)?;
        self.state.paused = paused;

        emit!(PauseChanged {
            authority: self.authority.key(),
            paused,
        });

        msg!("Protocol paused: {}", paused);

        Ok(())
    }
}
