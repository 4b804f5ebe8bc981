use anchor_lang::prelude::*;

use crate::engine::fees::{self, FeeSplit};
use crate::engine::ledger::{self, RoundRef};
use crate::engine::membership;
use crate::engine::selector;
use crate::engine::treasury::CustodyRail;
use crate::errors::TlcError;
use crate::state::{Circle, CircleStatus, PayoutRecord, RoundLedger, RoundStatus};
use crate::utils::fold_settlement_entropy;

/// Seals membership and opens round 0.
pub fn activate(circle: &mut Circle, now: i64) {
    circle.status = CircleStatus::Active;
    circle.seats = membership::active_count(circle) as u8;
    circle.current_round = 0;
    circle.round_opened_at = now;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Every seated member paid.
    Funded,
    /// Deadline passed with partial funding; settle what was collected.
    Forced,
}

/// Evaluates the round against `now`. Deadlines are only observed here; a
/// round never advances on its own.
pub fn readiness(round: &RoundLedger, now: i64) -> Result<Readiness> {
    match round.status {
        RoundStatus::ReadyToDisburse => Ok(Readiness::Funded),
        RoundStatus::Open | RoundStatus::Collecting => {
            require!(now >= round.deadline, TlcError::RoundNotReady);
            Ok(Readiness::Forced)
        }
        RoundStatus::Disbursed | RoundStatus::Closed => err!(TlcError::AlreadyDisbursed),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub round_index: u8,
    pub recipient: Pubkey,
    pub split: FeeSplit,
    pub payout: PayoutRecord,
    pub forced: bool,
    /// Active members who had not paid when a forced settlement ran.
    pub defaulters: Vec<Pubkey>,
    /// Round opened next, `None` when this payout completed the circle.
    pub next_round: Option<u8>,
}

/// Settles the current round: pick the recipient, split the pot, pay the
/// creator, pay or credit the recipient, then open the next round or complete
/// the circle. Works on copies and writes back only when every step succeeded.
///
/// `recipient_account` is the wallet the caller supplied for an immediate
/// push; when absent the recipient's share becomes claimable. `slot` is only
/// read by forced settlements, which mix it into the draw entropy.
#[allow(clippy::too_many_arguments)]
pub fn advance_round<R: CustodyRail>(
    circle: &mut Circle,
    round: &mut RoundLedger,
    at: RoundRef,
    rail: &mut R,
    recipient_account: Option<Pubkey>,
    now: i64,
    slot: u64,
) -> Result<Settlement> {
    require!(!circle.paused, TlcError::CirclePaused);
    match circle.status {
        CircleStatus::Forming => return err!(TlcError::InvalidState),
        CircleStatus::Completed => return err!(TlcError::AlreadyDisbursed),
        CircleStatus::Active => {}
    }
    require!(at.index <= circle.current_round, TlcError::RoundNotReady);
    require!(at.index == circle.current_round, TlcError::AlreadyDisbursed);

    let mut r = round.clone();
    ledger::open_if_fresh(&mut r, circle, at)?;
    let forced = readiness(&r, now)? == Readiness::Forced;
    if forced {
        // Contributions alone may leave the draw predictable (or all zero).
        r.entropy = fold_settlement_entropy(&r.entropy, now, slot);
    }

    let mut c = circle.clone();
    let winner = selector::select_recipient(&c, &at.circle, at.index, &r.entropy)?;
    let recipient = c.members[winner].identity;
    if let Some(account) = recipient_account {
        require_keys_eq!(account, recipient, TlcError::RecipientMismatch);
    }

    let gross = r.total_collected;
    debug_assert_eq!(gross, r.contributions.iter().map(|x| x.amount).sum::<u64>());
    let mut split = fees::split(
        gross,
        c.config.patience_benefit_x10000,
        c.config.creator_earnings_x10000,
    )?;

    // Patience benefit accrues to everyone still waiting; with nobody left
    // to wait it is part of this payout's net.
    let waiting: Vec<usize> = selector::eligible(&c)
        .into_iter()
        .filter(|&i| i != winner)
        .collect();
    if waiting.is_empty() {
        split.net = split.net.checked_add(split.benefit).ok_or(TlcError::MathOverflow)?;
        split.benefit = 0;
    } else {
        for (&i, share) in waiting.iter().zip(fees::pro_rata(split.benefit, waiting.len())) {
            let m = &mut c.members[i];
            m.benefit_accrued = m.benefit_accrued.checked_add(share).ok_or(TlcError::MathOverflow)?;
        }
    }

    let accrued = c.members[winner].benefit_accrued;
    let owed = split.net.checked_add(accrued).ok_or(TlcError::MathOverflow)?;
    c.members[winner].benefit_accrued = 0;

    let mut defaulters = Vec::new();
    if forced {
        for m in c.members.iter_mut().filter(|m| m.active) {
            if !ledger::has_contributed(&r, &m.identity) {
                m.rounds_missed = m.rounds_missed.saturating_add(1);
                defaulters.push(m.identity);
            }
        }
    }

    let medium = c.config.medium;
    let creator = c.config.creator;
    let pushed = recipient_account.is_some();

    // Every payee is checked before the first transfer goes out.
    if split.earnings > 0 {
        rail.check_payee(&creator)?;
    }
    if pushed && owed > 0 {
        rail.check_payee(&recipient)?;
    }

    c.treasury.release(&medium, rail, &creator, split.earnings)?;
    if pushed {
        c.treasury.release(&medium, rail, &recipient, owed)?;
    } else {
        let m = &mut c.members[winner];
        m.claimable = m.claimable.checked_add(owed).ok_or(TlcError::MathOverflow)?;
    }

    c.members[winner].paid_out = true;
    c.members[winner].payout_round = at.index;

    let payout = PayoutRecord {
        recipient,
        gross,
        benefit: split.benefit,
        earnings: split.earnings,
        net: split.net,
        accrued_benefit_paid: accrued,
        pushed,
        paid_at: now,
    };
    r.payout = Some(payout.clone());
    r.forced = forced;
    r.status = RoundStatus::Disbursed;
    close_round(&mut r, now)?;

    let next_round = if selector::eligible(&c).is_empty() {
        c.status = CircleStatus::Completed;
        c.completed_at = now;
        None
    } else {
        c.current_round = c.current_round.checked_add(1).ok_or(TlcError::MathOverflow)?;
        c.round_opened_at = now;
        Some(c.current_round)
    };

    *circle = c;
    *round = r;

    Ok(Settlement {
        round_index: at.index,
        recipient,
        split,
        payout,
        forced,
        defaulters,
        next_round,
    })
}

/// Disbursed rounds become immutable history.
fn close_round(round: &mut RoundLedger, now: i64) -> Result<()> {
    require!(round.status == RoundStatus::Disbursed, TlcError::InvalidState);
    round.status = RoundStatus::Closed;
    round.closed_at = now;
    Ok(())
}

/// Withdraws everything credited to `member`.
pub fn claim_payout<R: CustodyRail>(circle: &mut Circle, rail: &mut R, member: &Pubkey) -> Result<u64> {
    require!(!circle.paused, TlcError::CirclePaused);

    let idx = circle
        .members
        .iter()
        .position(|m| m.identity == *member)
        .ok_or(TlcError::NotMember)?;
    let amount = circle.members[idx].claimable;
    require!(amount > 0, TlcError::NothingToClaim);

    let medium = circle.config.medium;
    circle.treasury.release(&medium, rail, member, amount)?;
    circle.members[idx].claimable = 0;
    Ok(amount)
}
