use anchor_lang::prelude::*;

use crate::engine::membership::{self, OpenAdmission};
use crate::errors::TlcError;
use crate::events::{CircleActivated, MemberJoined, MemberLeft};
use crate::state::Admission;
use crate::{JoinCircle, LeaveCircle};

pub fn join_circle(ctx: Context<JoinCircle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let member = ctx.accounts.member.key();
    let key = ctx.accounts.circle.key();

    let circle = &mut ctx.accounts.circle;
    let outcome = match circle.config.admission {
        Admission::Open => membership::join(circle, member, &OpenAdmission, now)?,
        Admission::TrustList => {
            // Without the list nobody is pre-approved.
            let list = ctx
                .accounts
                .trust_list
                .as_ref()
                .ok_or(TlcError::NotWhitelisted)?;
            membership::join(circle, member, &**list, now)?
        }
    };

    emit!(MemberJoined {
        circle: key,
        member,
        join_seq: outcome.join_seq,
    });
    msg!("member {} joined circle {} (seq {})", member, key, outcome.join_seq);

    if outcome.activated {
        emit!(CircleActivated {
            circle: key,
            seats: circle.seats,
            opened_at: circle.round_opened_at,
        });
        msg!("circle {} is full; round 0 open", key);
    }

    Ok(())
}

pub fn leave_circle(ctx: Context<LeaveCircle>) -> Result<()> {
    let member = ctx.accounts.member.key();
    let key = ctx.accounts.circle.key();

    membership::leave(&mut ctx.accounts.circle, &member)?;

    emit!(MemberLeft { circle: key, member });
    msg!("member {} left circle {}", member, key);

    Ok(())
}
