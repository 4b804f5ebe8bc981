use anchor_lang::prelude::*;

use crate::constants::INITIAL_VERSION;
use crate::engine::membership;
use crate::{InitTrustList, ManageTrustList};

pub fn init_trust_list(ctx: Context<InitTrustList>, initial: Vec<Pubkey>) -> Result<()> {
    membership::require_trust_list_editable(&ctx.accounts.circle, &ctx.accounts.authority.key())?;

    let list = &mut ctx.accounts.trust_list;
    membership::seed_trust_list(list, initial)?;
    list.circle = ctx.accounts.circle.key();
    list.bump = ctx.bumps.trust_list;
    list.version = INITIAL_VERSION;

    msg!("trust list for {}: {} entries", list.circle, list.entries.len());
    Ok(())
}

pub fn add_trusted(ctx: Context<ManageTrustList>, identity: Pubkey) -> Result<()> {
    membership::require_trust_list_editable(&ctx.accounts.circle, &ctx.accounts.authority.key())?;
    membership::trust(&mut ctx.accounts.trust_list, identity)
}

pub fn remove_trusted(ctx: Context<ManageTrustList>, identity: Pubkey) -> Result<()> {
    membership::require_trust_list_editable(&ctx.accounts.circle, &ctx.accounts.authority.key())?;
    membership::distrust(&mut ctx.accounts.trust_list, &identity)
}
