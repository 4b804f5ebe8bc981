use anchor_lang::prelude::*;

use crate::constants::*;
use crate::engine::{config, membership};
use crate::errors::TlcError;
use crate::events::{CircleActivated, CircleCreated};
use crate::state::{CircleRegistry, PaymentMedium};
use crate::utils::CircleParams;
use crate::{CircleAdmin, CreateCircle, CreateTokenCircle, InitializeRegistry};

pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
    let reg = &mut ctx.accounts.registry;
    reg.admin = ctx.accounts.admin.key();
    reg.bump = ctx.bumps.registry;
    reg.next_circle_id = INITIAL_CIRCLE_ID;
    reg.version = INITIAL_VERSION;

    Ok(())
}

/// Hands out the id the circle PDA was derived from.
fn take_circle_id(registry: &mut CircleRegistry) -> Result<u64> {
    let id = registry.next_circle_id;
    registry.next_circle_id = id.checked_add(1).ok_or(TlcError::MathOverflow)?;
    Ok(id)
}

pub fn create_circle(ctx: Context<CreateCircle>, params: CircleParams) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let creator = ctx.accounts.creator.key();

    let cfg = config::build_config(&params, creator, PaymentMedium::Native)?;
    let circle_id = take_circle_id(&mut ctx.accounts.registry)?;

    let vault = ctx.accounts.vault.key();
    config::init_circle(
        &mut ctx.accounts.circle,
        circle_id,
        ctx.bumps.circle,
        vault,
        ctx.bumps.vault,
        cfg,
        now,
    );

    let circle = ctx.accounts.circle.key();
    emit!(CircleCreated { circle, circle_id, creator });
    msg!("circle {} created: id={} medium=native", circle, circle_id);

    Ok(circle_id)
}

pub fn create_token_circle(ctx: Context<CreateTokenCircle>, params: CircleParams) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let creator = ctx.accounts.creator.key();
    let mint = ctx.accounts.mint.key();

    let cfg = config::build_config(&params, creator, PaymentMedium::Token { mint })?;
    let circle_id = take_circle_id(&mut ctx.accounts.registry)?;

    let vault = ctx.accounts.token_vault.key();
    config::init_circle(
        &mut ctx.accounts.circle,
        circle_id,
        ctx.bumps.circle,
        vault,
        ctx.bumps.token_vault,
        cfg,
        now,
    );

    let circle = ctx.accounts.circle.key();
    emit!(CircleCreated { circle, circle_id, creator });
    msg!("circle {} created: id={} mint={}", circle, circle_id, mint);

    Ok(circle_id)
}

pub fn seal_circle(ctx: Context<CircleAdmin>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let authority = ctx.accounts.authority.key();
    let key = ctx.accounts.circle.key();

    let circle = &mut ctx.accounts.circle;
    membership::seal(circle, &authority, now)?;

    emit!(CircleActivated {
        circle: key,
        seats: circle.seats,
        opened_at: circle.round_opened_at,
    });
    msg!("circle {} sealed with {} seats", key, circle.seats);

    Ok(())
}
