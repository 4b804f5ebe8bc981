use anchor_lang::prelude::*;

pub mod engine;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;

declare_id!("5Hb7jBdiZ6sLuewJn3GNKpXdVFZBvd4YTWqLtJnerjHz");

#[program]
pub mod trusted_lending_circle {
    use super::*;
    use crate::instructions::{admin, circle, contribute, lifecycle, membership, trust_list, view};

    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        circle::initialize_registry(ctx)
    }

    // ----------------------------
    // Creation
    // ----------------------------
    pub fn create_circle(ctx: Context<CreateCircle>, params: CircleParams) -> Result<u64> {
        circle::create_circle(ctx, params)
    }

    pub fn create_token_circle(
        ctx: Context<CreateTokenCircle>,
        params: CircleParams,
    ) -> Result<u64> {
        circle::create_token_circle(ctx, params)
    }

    // ----------------------------
    // Trust list
    // ----------------------------
    pub fn init_trust_list(ctx: Context<InitTrustList>, initial: Vec<Pubkey>) -> Result<()> {
        trust_list::init_trust_list(ctx, initial)
    }

    pub fn add_trusted(ctx: Context<ManageTrustList>, identity: Pubkey) -> Result<()> {
        trust_list::add_trusted(ctx, identity)
    }

    pub fn remove_trusted(ctx: Context<ManageTrustList>, identity: Pubkey) -> Result<()> {
        trust_list::remove_trusted(ctx, identity)
    }

    // ----------------------------
    // Membership
    // ----------------------------
    pub fn join_circle(ctx: Context<JoinCircle>) -> Result<()> {
        membership::join_circle(ctx)
    }

    pub fn leave_circle(ctx: Context<LeaveCircle>) -> Result<()> {
        membership::leave_circle(ctx)
    }

    pub fn seal_circle(ctx: Context<CircleAdmin>) -> Result<()> {
        circle::seal_circle(ctx)
    }

    // ----------------------------
    // Rounds
    // ----------------------------
    pub fn contribute(ctx: Context<Contribute>, round_index: u8, amount: u64) -> Result<()> {
        contribute::contribute(ctx, round_index, amount)
    }

    pub fn advance_round(ctx: Context<AdvanceRound>, round_index: u8) -> Result<()> {
        lifecycle::advance_round(ctx, round_index)
    }

    pub fn claim_payout(ctx: Context<ClaimPayout>) -> Result<()> {
        lifecycle::claim_payout(ctx)
    }

    // ----------------------------
    // Admin gate
    // ----------------------------
    pub fn pause_circle(ctx: Context<CircleAdmin>) -> Result<()> {
        admin::pause_circle(ctx)
    }

    pub fn resume_circle(ctx: Context<CircleAdmin>) -> Result<()> {
        admin::resume_circle(ctx)
    }

    pub fn raise_dispute(ctx: Context<RaiseDispute>, reason: String) -> Result<()> {
        admin::raise_dispute(ctx, reason)
    }

    pub fn resolve_dispute(ctx: Context<CircleAdmin>) -> Result<()> {
        admin::resolve_dispute(ctx)
    }

    // views
    pub fn get_status(ctx: Context<ViewCircle>) -> Result<CircleStatusView> {
        view::get_status(ctx)
    }

    pub fn get_constants(ctx: Context<ViewCircle>) -> Result<CircleConstantsView> {
        view::get_constants(ctx)
    }

    pub fn is_active_member(ctx: Context<ViewCircle>, identity: Pubkey) -> Result<bool> {
        view::is_active_member(ctx, identity)
    }

    pub fn get_member(ctx: Context<ViewCircle>, identity: Pubkey) -> Result<MemberView> {
        view::get_member(ctx, identity)
    }

    pub fn preview_recipient(ctx: Context<PreviewRecipient>) -> Result<Pubkey> {
        view::preview_recipient(ctx)
    }
}
