// programs/trusted_lending_circle/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::state::{Circle, CircleRegistry, RoundLedger, TrustList};

// -----------------
// Registry / creation
// -----------------

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + CircleRegistry::INIT_SPACE,
        seeds = [crate::REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, CircleRegistry>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateCircle<'info> {
    #[account(
        mut,
        seeds = [crate::REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, CircleRegistry>,

    #[account(
        init,
        payer = creator,
        space = 8 + Circle::INIT_SPACE,
        seeds = [crate::CIRCLE_SEED, registry.next_circle_id.to_le_bytes().as_ref()],
        bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = creator,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, circle.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct CreateTokenCircle<'info> {
    #[account(
        mut,
        seeds = [crate::REGISTRY_SEED],
        bump = registry.bump,
    )]
    pub registry: Account<'info, CircleRegistry>,

    #[account(
        init,
        payer = creator,
        space = 8 + Circle::INIT_SPACE,
        seeds = [crate::CIRCLE_SEED, registry.next_circle_id.to_le_bytes().as_ref()],
        bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        token::mint = mint,
        token::authority = circle,
        seeds = [crate::TOKEN_VAULT_SEED, circle.key().as_ref()],
        bump
    )]
    pub token_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub creator: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

// -----------------
// Trust list
// -----------------

#[derive(Accounts)]
pub struct InitTrustList<'info> {
    #[account(
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    #[account(
        init,
        payer = authority,
        space = 8 + TrustList::INIT_SPACE,
        seeds = [crate::TRUST_LIST_SEED, circle.key().as_ref()],
        bump
    )]
    pub trust_list: Account<'info, TrustList>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ManageTrustList<'info> {
    #[account(
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    #[account(
        mut,
        seeds = [crate::TRUST_LIST_SEED, circle.key().as_ref()],
        bump = trust_list.bump
    )]
    pub trust_list: Account<'info, TrustList>,

    pub authority: Signer<'info>,
}

// -----------------
// Membership
// -----------------

#[derive(Accounts)]
pub struct JoinCircle<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    /// Required for trust-gated circles.
    #[account(
        seeds = [crate::TRUST_LIST_SEED, circle.key().as_ref()],
        bump = trust_list.bump
    )]
    pub trust_list: Option<Account<'info, TrustList>>,

    pub member: Signer<'info>,
}

#[derive(Accounts)]
pub struct LeaveCircle<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    pub member: Signer<'info>,
}

// -----------------
// Rounds
// -----------------

#[derive(Accounts)]
#[instruction(round_index: u8)]
pub struct Contribute<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    #[account(
        init_if_needed,
        payer = member,
        space = 8 + RoundLedger::INIT_SPACE,
        seeds = [crate::ROUND_SEED, circle.key().as_ref(), round_index.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, RoundLedger>>,

    /// Native circles.
    /// CHECK: lamport vault PDA, address checked against `circle.vault`
    #[account(mut)]
    pub vault: Option<UncheckedAccount<'info>>,

    /// Token circles: vault and the member's source account.
    #[account(mut)]
    pub token_vault: Option<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub member_token: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(round_index: u8)]
pub struct AdvanceRound<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    // A round nobody paid into has no ledger yet; settling it after the
    // deadline creates one.
    #[account(
        init_if_needed,
        payer = caller,
        space = 8 + RoundLedger::INIT_SPACE,
        seeds = [crate::ROUND_SEED, circle.key().as_ref(), round_index.to_le_bytes().as_ref()],
        bump
    )]
    pub round: Box<Account<'info, RoundLedger>>,

    /// CHECK: lamport vault PDA, address checked against `circle.vault`
    #[account(mut)]
    pub vault: Option<UncheckedAccount<'info>>,
    #[account(mut)]
    pub token_vault: Option<Account<'info, TokenAccount>>,

    /// CHECK: creator wallet receiving native earnings
    #[account(mut, address = circle.config.creator)]
    pub creator: Option<UncheckedAccount<'info>>,
    #[account(mut)]
    pub creator_token: Option<Account<'info, TokenAccount>>,

    /// Supplying the recipient pushes the payout; otherwise it becomes claimable.
    /// CHECK: matched against the selected member by the engine
    #[account(mut)]
    pub recipient: Option<UncheckedAccount<'info>>,
    #[account(mut)]
    pub recipient_token: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub caller: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimPayout<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    /// CHECK: lamport vault PDA, address checked against `circle.vault`
    #[account(mut)]
    pub vault: Option<UncheckedAccount<'info>>,
    #[account(mut)]
    pub token_vault: Option<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub member_token: Option<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub member: Signer<'info>,

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}

// -----------------
// Admin / disputes
// -----------------

/// Shared by seal, pause, resume and dispute resolution.
#[derive(Accounts)]
pub struct CircleAdmin<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct RaiseDispute<'info> {
    #[account(
        mut,
        seeds = [crate::CIRCLE_SEED, circle.circle_id.to_le_bytes().as_ref()],
        bump = circle.bump
    )]
    pub circle: Box<Account<'info, Circle>>,

    pub member: Signer<'info>,
}

// -----------------
// Views
// -----------------

#[derive(Accounts)]
pub struct ViewCircle<'info> {
    pub circle: Box<Account<'info, Circle>>,
}

#[derive(Accounts)]
pub struct PreviewRecipient<'info> {
    pub circle: Box<Account<'info, Circle>>,

    /// Current round ledger, once it exists.
    pub round: Option<Account<'info, RoundLedger>>,
}
