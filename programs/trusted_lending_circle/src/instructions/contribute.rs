use anchor_lang::prelude::*;

use crate::engine::ledger::{self, RoundRef};
use crate::errors::TlcError;
use crate::events::ContributionRecorded;
use crate::instructions::custody::{CircleRail, LamportRail, TokenParty, TokenRail};
use crate::state::PaymentMedium;
use crate::Contribute;

pub fn contribute(ctx: Context<Contribute>, round_index: u8, amount: u64) -> Result<()> {
    let clock = Clock::get()?;
    let member = ctx.accounts.member.key();
    let key = ctx.accounts.circle.key();

    let mut rail = match ctx.accounts.circle.config.medium {
        PaymentMedium::Native => {
            let vault = ctx.accounts.vault.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            CircleRail::Lamports(LamportRail::new(
                &ctx.accounts.circle,
                vault.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                vec![ctx.accounts.member.to_account_info()],
            )?)
        }
        PaymentMedium::Token { mint } => {
            let vault = ctx.accounts.token_vault.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let source = ctx.accounts.member_token.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let token_program = ctx.accounts.token_program.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let payer = TokenParty::checked(
                &mint,
                member,
                source,
                Some(ctx.accounts.member.to_account_info()),
            )?;
            CircleRail::Tokens(TokenRail::new(
                &ctx.accounts.circle,
                vault,
                token_program.to_account_info(),
                vec![payer],
            )?)
        }
    };

    let at = RoundRef {
        circle: key,
        index: round_index,
        bump: ctx.bumps.round,
    };
    let receipt = ledger::record_contribution(
        &mut ctx.accounts.circle,
        &mut ctx.accounts.round,
        at,
        &mut rail,
        &member,
        amount,
        clock.unix_timestamp,
        clock.slot,
    )?;

    emit!(ContributionRecorded {
        circle: key,
        round_index,
        member,
        amount,
        round_total: receipt.round_total,
    });
    msg!(
        "round {} of {}: {} paid {} (total {})",
        round_index,
        key,
        member,
        amount,
        receipt.round_total
    );
    if receipt.fully_funded {
        msg!("round {} of {} fully funded", round_index, key);
    }

    Ok(())
}
