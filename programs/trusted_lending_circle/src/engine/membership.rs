use anchor_lang::prelude::*;

use crate::constants::{MAX_MEMBER_RECORDS, MAX_TRUSTED};
use crate::engine::{gate, scheduler};
use crate::errors::TlcError;
use crate::state::{Admission, Circle, CircleStatus, Member, TrustList};

/// Decides whether an identity may join a circle.
pub trait AdmissionPolicy {
    fn admits(&self, identity: &Pubkey) -> bool;
}

/// Anyone may join.
pub struct OpenAdmission;

impl AdmissionPolicy for OpenAdmission {
    fn admits(&self, _identity: &Pubkey) -> bool {
        true
    }
}

impl AdmissionPolicy for TrustList {
    fn admits(&self, identity: &Pubkey) -> bool {
        self.entries.contains(identity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JoinOutcome {
    pub join_seq: u16,
    /// Filling the last seat sealed the registry and opened round 0.
    pub activated: bool,
}

pub fn join<P: AdmissionPolicy + ?Sized>(
    circle: &mut Circle,
    identity: Pubkey,
    policy: &P,
    now: i64,
) -> Result<JoinOutcome> {
    require!(!circle.paused, TlcError::CirclePaused);
    require!(circle.status == CircleStatus::Forming, TlcError::InvalidState);
    require!(!is_active(circle, &identity), TlcError::AlreadyMember);
    require!(policy.admits(&identity), TlcError::NotWhitelisted);
    require!(
        active_count(circle) < circle.config.circle_size as usize,
        TlcError::CircleFull
    );

    let join_seq = circle.next_join_seq;
    let next_seq = join_seq.checked_add(1).ok_or(TlcError::MathOverflow)?;

    let existing = circle.members.iter().position(|m| m.identity == identity);
    match existing {
        // Left earlier: reactivate the same record.
        Some(i) => {
            let record = &mut circle.members[i];
            record.active = true;
            record.join_seq = join_seq;
        }
        None => {
            require!(circle.members.len() < MAX_MEMBER_RECORDS, TlcError::CircleFull);
            circle.members.push(Member {
                identity,
                join_seq,
                active: true,
                contributed: 0,
                rounds_missed: 0,
                paid_out: false,
                payout_round: 0,
                benefit_accrued: 0,
                claimable: 0,
            });
        }
    }
    circle.next_join_seq = next_seq;

    let activated = active_count(circle) == circle.config.circle_size as usize;
    if activated {
        scheduler::activate(circle, now);
    }

    Ok(JoinOutcome { join_seq, activated })
}

/// Leaving is only possible before any round opened. The record stays for audit.
pub fn leave(circle: &mut Circle, identity: &Pubkey) -> Result<()> {
    require!(!circle.paused, TlcError::CirclePaused);
    require!(circle.status == CircleStatus::Forming, TlcError::InvalidState);

    let record = find_active_mut(circle, identity).ok_or(TlcError::NotMember)?;
    record.active = false;
    Ok(())
}

/// Admin activation of a circle that did not fill every seat.
pub fn seal(circle: &mut Circle, authority: &Pubkey, now: i64) -> Result<()> {
    gate::require_admin(circle, authority)?;
    require!(!circle.paused, TlcError::CirclePaused);
    require!(circle.status == CircleStatus::Forming, TlcError::InvalidState);
    require!(circle.config.allow_partial_seal, TlcError::InvalidState);
    require!(active_count(circle) >= 2, TlcError::InvalidState);

    scheduler::activate(circle, now);
    Ok(())
}

/// Trust list edits: curator only, trust-gated circles only, before activation.
pub fn require_trust_list_editable(circle: &Circle, authority: &Pubkey) -> Result<()> {
    gate::require_curator(circle, authority)?;
    require!(circle.config.admission == Admission::TrustList, TlcError::InvalidState);
    require!(circle.status == CircleStatus::Forming, TlcError::InvalidState);
    Ok(())
}

/// Validates a full trust list: bounded, no default key, no duplicates.
pub fn seed_trust_list(list: &mut TrustList, initial: Vec<Pubkey>) -> Result<()> {
    require!(initial.len() <= MAX_TRUSTED, TlcError::TrustListFull);
    let mut seen: Vec<Pubkey> = Vec::with_capacity(initial.len());
    for pk in initial.iter() {
        require!(*pk != Pubkey::default(), TlcError::NotTrusted);
        require!(!seen.contains(pk), TlcError::AlreadyTrusted);
        seen.push(*pk);
    }
    list.entries = initial;
    Ok(())
}

pub fn trust(list: &mut TrustList, identity: Pubkey) -> Result<()> {
    require!(identity != Pubkey::default(), TlcError::NotTrusted);
    require!(list.entries.len() < MAX_TRUSTED, TlcError::TrustListFull);
    require!(!list.entries.contains(&identity), TlcError::AlreadyTrusted);
    list.entries.push(identity);
    Ok(())
}

/// Removing an identity does not unseat a member who already joined.
pub fn distrust(list: &mut TrustList, identity: &Pubkey) -> Result<()> {
    let pos = list
        .entries
        .iter()
        .position(|x| x == identity)
        .ok_or(TlcError::NotTrusted)?;
    list.entries.remove(pos);
    Ok(())
}

pub fn is_active(circle: &Circle, identity: &Pubkey) -> bool {
    circle
        .members
        .iter()
        .any(|m| m.active && m.identity == *identity)
}

pub fn active_count(circle: &Circle) -> usize {
    circle.members.iter().filter(|m| m.active).count()
}

pub fn find_active_mut<'a>(circle: &'a mut Circle, identity: &Pubkey) -> Option<&'a mut Member> {
    circle
        .members
        .iter_mut()
        .find(|m| m.active && m.identity == *identity)
}
