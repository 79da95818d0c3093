//! Direct (single-step) betting is disabled; bets go through
//! `commit_bet` followed by `reveal_bet`.

use anchor_lang::prelude::*;

use crate::errors::ProtocolError;
use crate::state::{PredictionMarket, Side};

#[derive(Accounts)]
pub struct PlaceBet<'info> {
    pub bettor: Signer<'info>,

    pub market: Box<Account<'info, PredictionMarket>>,
}

impl<'info> PlaceBet<'info> {
    pub fn place_bet(&mut self, _amount: u64, _side: Side) -> Result<()> {
        err!(ProtocolError::DirectBetDisabled)
    }
}
