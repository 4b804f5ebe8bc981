use anchor_lang::prelude::*;

use crate::constants::INITIAL_VERSION;
use crate::engine::membership;
use crate::engine::treasury::CustodyRail;
use crate::errors::TlcError;
use crate::state::{Circle, CircleStatus, Contribution, RoundLedger, RoundStatus};
use crate::utils::fold_entropy;

/// Identifies the round ledger account a call operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRef {
    pub circle: Pubkey,
    pub index: u8,
    pub bump: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContributionReceipt {
    pub round_total: u64,
    pub fully_funded: bool,
}

/// End of the current round's window. Pauses push `round_opened_at` back, so
/// this moves with them.
pub fn current_deadline(circle: &Circle) -> Result<i64> {
    Ok(circle
        .round_opened_at
        .checked_add(circle.config.round_seconds())
        .ok_or(TlcError::MathOverflow)?)
}

/// Fills in a ledger created lazily by `init_if_needed`; an existing ledger
/// must belong to the same circle and round. A still-collecting ledger of the
/// current round picks up any deadline shift from a pause.
pub fn open_if_fresh(round: &mut RoundLedger, circle: &Circle, at: RoundRef) -> Result<()> {
    if round.circle == Pubkey::default() {
        require!(at.index == circle.current_round, TlcError::InvalidState);

        round.circle = at.circle;
        round.round_index = at.index;
        round.bump = at.bump;
        round.status = RoundStatus::Open;
        round.opened_at = circle.round_opened_at;
        round.deadline = current_deadline(circle)?;
        round.total_collected = 0;
        round.contributions = Vec::new();
        round.entropy = [0u8; 32];
        round.forced = false;
        round.payout = None;
        round.closed_at = 0;
        round.version = INITIAL_VERSION;
        return Ok(());
    }

    require_keys_eq!(round.circle, at.circle, TlcError::WrongCircle);
    require!(round.round_index == at.index, TlcError::WrongCircle);

    let collecting = matches!(round.status, RoundStatus::Open | RoundStatus::Collecting);
    if collecting && at.index == circle.current_round {
        round.deadline = current_deadline(circle)?;
    }
    Ok(())
}

/// Records one member's payment for the current round. Custody confirms
/// receipt before the ledger entry is written.
#[allow(clippy::too_many_arguments)]
pub fn record_contribution<R: CustodyRail>(
    circle: &mut Circle,
    round: &mut RoundLedger,
    at: RoundRef,
    rail: &mut R,
    member: &Pubkey,
    amount: u64,
    now: i64,
    slot: u64,
) -> Result<ContributionReceipt> {
    require!(!circle.paused, TlcError::CirclePaused);
    match circle.status {
        CircleStatus::Forming => return err!(TlcError::InvalidState),
        CircleStatus::Completed => return err!(TlcError::RoundClosed),
        CircleStatus::Active => {}
    }
    require!(at.index <= circle.current_round, TlcError::InvalidState);
    require!(at.index == circle.current_round, TlcError::RoundClosed);

    let mut next = round.clone();
    open_if_fresh(&mut next, circle, at)?;

    require!(
        matches!(next.status, RoundStatus::Open | RoundStatus::Collecting),
        TlcError::RoundClosed
    );
    require!(now < next.deadline, TlcError::RoundClosed);
    require!(membership::is_active(circle, member), TlcError::NotMember);
    require!(!has_contributed(&next, member), TlcError::AlreadyContributed);
    require!(
        amount == circle.config.contribution_amount,
        TlcError::WrongAmount
    );

    let round_total = next
        .total_collected
        .checked_add(amount)
        .ok_or(TlcError::MathOverflow)?;
    let member_idx = circle
        .members
        .iter()
        .position(|m| m.active && m.identity == *member)
        .ok_or(TlcError::NotMember)?;
    let member_total = circle.members[member_idx]
        .contributed
        .checked_add(amount)
        .ok_or(TlcError::MathOverflow)?;

    // Custody first.
    let medium = circle.config.medium;
    circle.treasury.deposit(&medium, rail, member, amount)?;

    circle.members[member_idx].contributed = member_total;

    next.contributions.push(Contribution {
        member: *member,
        amount,
        paid_at: now,
    });
    next.total_collected = round_total;
    next.entropy = fold_entropy(&next.entropy, member, now, slot);

    let fully_funded = is_round_fully_funded(circle, &next);
    next.status = if fully_funded {
        RoundStatus::ReadyToDisburse
    } else {
        RoundStatus::Collecting
    };

    *round = next;
    Ok(ContributionReceipt {
        round_total,
        fully_funded,
    })
}

pub fn has_contributed(round: &RoundLedger, member: &Pubkey) -> bool {
    round.contributions.iter().any(|c| c.member == *member)
}

/// True iff every active member paid into `round`.
pub fn is_round_fully_funded(circle: &Circle, round: &RoundLedger) -> bool {
    let mut seated = circle.members.iter().filter(|m| m.active).peekable();
    seated.peek().is_some() && seated.all(|m| has_contributed(round, &m.identity))
}
