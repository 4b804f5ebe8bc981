//! Read-only instructions. Results travel back as Anchor return data.

use anchor_lang::prelude::*;

use crate::engine::{membership, views};
use crate::state::{CircleConstantsView, CircleStatusView, MemberView};
use crate::{PreviewRecipient, ViewCircle};

pub fn get_status(ctx: Context<ViewCircle>) -> Result<CircleStatusView> {
    views::status(&ctx.accounts.circle)
}

pub fn get_constants(ctx: Context<ViewCircle>) -> Result<CircleConstantsView> {
    Ok(views::constants(&ctx.accounts.circle))
}

pub fn is_active_member(ctx: Context<ViewCircle>, identity: Pubkey) -> Result<bool> {
    Ok(membership::is_active(&ctx.accounts.circle, &identity))
}

pub fn get_member(ctx: Context<ViewCircle>, identity: Pubkey) -> Result<MemberView> {
    views::member(&ctx.accounts.circle, &identity)
}

pub fn preview_recipient(ctx: Context<PreviewRecipient>) -> Result<Pubkey> {
    let key = ctx.accounts.circle.key();
    let round = ctx.accounts.round.as_ref().map(|r| &**r);
    views::preview_recipient(&ctx.accounts.circle, &key, round)
}
