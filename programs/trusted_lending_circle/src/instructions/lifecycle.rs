use anchor_lang::prelude::*;

use crate::engine::ledger::RoundRef;
use crate::engine::{gate, scheduler};
use crate::errors::TlcError;
use crate::events::{CircleCompleted, PayoutClaimed, RoundDisbursed};
use crate::instructions::custody::{CircleRail, LamportRail, TokenParty, TokenRail};
use crate::state::PaymentMedium;
use crate::{AdvanceRound, ClaimPayout};

pub fn advance_round(ctx: Context<AdvanceRound>, round_index: u8) -> Result<()> {
    let clock = Clock::get()?;
    let now = clock.unix_timestamp;
    let caller = ctx.accounts.caller.key();
    let key = ctx.accounts.circle.key();

    gate::require_member_or_admin(&ctx.accounts.circle, &caller)?;

    let (mut rail, recipient_account) = match ctx.accounts.circle.config.medium {
        PaymentMedium::Native => {
            let vault = ctx.accounts.vault.as_ref().ok_or(TlcError::UnsupportedMedium)?;

            let mut parties = Vec::with_capacity(2);
            if let Some(creator) = &ctx.accounts.creator {
                parties.push(creator.to_account_info());
            }
            let recipient = ctx.accounts.recipient.as_ref().map(|r| r.key());
            if let Some(r) = &ctx.accounts.recipient {
                parties.push(r.to_account_info());
            }

            let rail = LamportRail::new(
                &ctx.accounts.circle,
                vault.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                parties,
            )?;
            (CircleRail::Lamports(rail), recipient)
        }
        PaymentMedium::Token { mint } => {
            let vault = ctx.accounts.token_vault.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let token_program = ctx.accounts.token_program.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let creator = ctx.accounts.circle.config.creator;

            let mut parties = Vec::with_capacity(2);
            if let Some(t) = &ctx.accounts.creator_token {
                parties.push(TokenParty::checked(&mint, creator, t, None)?);
            }
            // The wallet behind the supplied token account is the claimed recipient.
            let recipient = ctx.accounts.recipient_token.as_ref().map(|t| t.owner);
            if let Some(t) = &ctx.accounts.recipient_token {
                parties.push(TokenParty::checked(&mint, t.owner, t, None)?);
            }

            let rail = TokenRail::new(
                &ctx.accounts.circle,
                vault,
                token_program.to_account_info(),
                parties,
            )?;
            (CircleRail::Tokens(rail), recipient)
        }
    };

    let at = RoundRef {
        circle: key,
        index: round_index,
        bump: ctx.bumps.round,
    };
    let settlement = scheduler::advance_round(
        &mut ctx.accounts.circle,
        &mut ctx.accounts.round,
        at,
        &mut rail,
        recipient_account,
        now,
        clock.slot,
    )?;

    let payout = &settlement.payout;
    emit!(RoundDisbursed {
        circle: key,
        round_index,
        recipient: settlement.recipient,
        gross: payout.gross,
        benefit: payout.benefit,
        earnings: payout.earnings,
        net: payout.net,
        forced: settlement.forced,
        defaulters: settlement.defaulters.clone(),
    });
    msg!(
        "round {} of {} disbursed to {}: gross={} net={} pushed={} forced={}",
        round_index,
        key,
        settlement.recipient,
        payout.gross,
        payout.net,
        payout.pushed,
        settlement.forced
    );
    if !settlement.defaulters.is_empty() {
        msg!("round {} of {}: {} member(s) missed payment", round_index, key, settlement.defaulters.len());
    }

    match settlement.next_round {
        Some(next) => msg!("round {} of {} open", next, key),
        None => {
            emit!(CircleCompleted {
                circle: key,
                completed_at: now,
            });
            msg!("circle {} completed", key);
        }
    }

    Ok(())
}

pub fn claim_payout(ctx: Context<ClaimPayout>) -> Result<()> {
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
            let dest = ctx.accounts.member_token.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            let token_program = ctx.accounts.token_program.as_ref().ok_or(TlcError::UnsupportedMedium)?;
            CircleRail::Tokens(TokenRail::new(
                &ctx.accounts.circle,
                vault,
                token_program.to_account_info(),
                vec![TokenParty::checked(&mint, member, dest, None)?],
            )?)
        }
    };

    let amount = scheduler::claim_payout(&mut ctx.accounts.circle, &mut rail, &member)?;

    emit!(PayoutClaimed {
        circle: key,
        member,
        amount,
    });
    msg!("member {} claimed {} from circle {}", member, amount, key);

    Ok(())
}
