//! Raise the staking TVL cap. The cap never decreases.

use anchor_lang::prelude::*;

use crate::instructions::governance::AuthorityAction;
use crate::state::ProtocolOp;

#[event]
pub struct TvlCapRaised {
    pub old_cap: u64,
    pub new_cap: u64,
}

impl<'info> AuthorityAction<'info> {
    pub fn raise_tvl_cap(&mut self, new_cap: u64) -> Result<()> {
        self.state.assert_authority(&self.authority.key())?;
        self.state.assert_allowed(ProtocolOp::Governance)?;

        let old_cap = self.state.tvl_cap;
        self.state.raise_tvl_cap(new_cap)?;

        emit!(TvlCapRaised { old_cap, new_cap });

        Ok(())
    }
}
