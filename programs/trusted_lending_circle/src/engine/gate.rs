use anchor_lang::prelude::*;

use crate::constants::MAX_DISPUTE_REASON_LEN;
use crate::engine::membership;
use crate::errors::TlcError;
use crate::state::{Circle, CircleStatus, Dispute};

/// Fails unless the circle has a service admin and `authority` is it.
pub fn require_admin(circle: &Circle, authority: &Pubkey) -> Result<()> {
    require!(circle.config.has_service_admin(), TlcError::Unauthorized);
    require_keys_eq!(circle.config.service_admin, *authority, TlcError::Unauthorized);
    Ok(())
}

/// Creator or service admin; used for trust list upkeep.
pub fn require_curator(circle: &Circle, authority: &Pubkey) -> Result<()> {
    if circle.config.creator == *authority {
        return Ok(());
    }
    require_admin(circle, authority)
}

/// Round advances are open to seated members and the service admin.
pub fn require_member_or_admin(circle: &Circle, caller: &Pubkey) -> Result<()> {
    if membership::is_active(circle, caller) {
        return Ok(());
    }
    require_admin(circle, caller)
}

pub fn pause(circle: &mut Circle, authority: &Pubkey, now: i64) -> Result<()> {
    require_admin(circle, authority)?;
    require!(circle.status != CircleStatus::Completed, TlcError::InvalidState);
    freeze(circle, now);
    Ok(())
}

pub fn resume(circle: &mut Circle, authority: &Pubkey, now: i64) -> Result<()> {
    require_admin(circle, authority)?;
    require!(circle.dispute.is_none(), TlcError::DisputeActive);
    require!(circle.paused, TlcError::InvalidState);
    thaw(circle, now)
}

fn freeze(circle: &mut Circle, now: i64) {
    if !circle.paused {
        circle.paused = true;
        circle.paused_at = now;
    }
}

/// Lifts the pause. The open round's clock stood still while paused, so its
/// window is pushed back by the paused time.
fn thaw(circle: &mut Circle, now: i64) -> Result<()> {
    if circle.status == CircleStatus::Active {
        let frozen = now.saturating_sub(circle.paused_at).max(0);
        circle.round_opened_at = circle
            .round_opened_at
            .checked_add(frozen)
            .ok_or(TlcError::MathOverflow)?;
    }
    circle.paused = false;
    circle.paused_at = 0;
    Ok(())
}

/// Freezes the circle until the admin resolves the dispute.
pub fn raise_dispute(circle: &mut Circle, member: &Pubkey, reason: String, now: i64) -> Result<()> {
    // Without an admin nobody could ever resolve it.
    require!(circle.config.has_service_admin(), TlcError::Unauthorized);
    require!(circle.status == CircleStatus::Active, TlcError::InvalidState);
    require!(membership::is_active(circle, member), TlcError::NotMember);
    require!(circle.dispute.is_none(), TlcError::DisputeActive);
    require!(reason.len() <= MAX_DISPUTE_REASON_LEN, TlcError::TextTooLong);

    circle.dispute = Some(Dispute {
        raised_by: *member,
        raised_at: now,
        reason,
    });
    freeze(circle, now);
    Ok(())
}

pub fn resolve_dispute(circle: &mut Circle, authority: &Pubkey, now: i64) -> Result<()> {
    require_admin(circle, authority)?;
    require!(circle.dispute.is_some(), TlcError::NoDispute);
    circle.dispute = None;
    thaw(circle, now)
}
