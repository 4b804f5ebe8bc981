use anchor_lang::prelude::*;

use crate::engine::gate;
use crate::events::{DisputeRaised, DisputeResolved, PauseChanged};
use crate::{CircleAdmin, RaiseDispute};

pub fn pause_circle(ctx: Context<CircleAdmin>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let key = ctx.accounts.circle.key();
    gate::pause(&mut ctx.accounts.circle, &ctx.accounts.authority.key(), now)?;

    emit!(PauseChanged { circle: key, paused: true });
    msg!("circle {} paused", key);
    Ok(())
}

pub fn resume_circle(ctx: Context<CircleAdmin>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let key = ctx.accounts.circle.key();
    gate::resume(&mut ctx.accounts.circle, &ctx.accounts.authority.key(), now)?;

    emit!(PauseChanged { circle: key, paused: false });
    msg!(
        "circle {} resumed; round window now opens at {}",
        key,
        ctx.accounts.circle.round_opened_at
    );
    Ok(())
}

pub fn raise_dispute(ctx: Context<RaiseDispute>, reason: String) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let key = ctx.accounts.circle.key();
    let member = ctx.accounts.member.key();

    gate::raise_dispute(&mut ctx.accounts.circle, &member, reason, now)?;

    emit!(DisputeRaised { circle: key, raised_by: member });
    msg!("dispute raised on {} by {}; circle paused", key, member);
    Ok(())
}

pub fn resolve_dispute(ctx: Context<CircleAdmin>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let key = ctx.accounts.circle.key();
    gate::resolve_dispute(&mut ctx.accounts.circle, &ctx.accounts.authority.key(), now)?;

    emit!(DisputeResolved { circle: key });
    msg!("dispute on {} resolved; circle resumed", key);
    Ok(())
}
