use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::TlcError;
use crate::state::{
    Circle, CircleConfig, CircleStatus, PaymentMedium, TreasuryState, WinnersOrder,
};
use crate::utils::CircleParams;

/// Validates creation parameters and freezes them into a `CircleConfig`.
pub fn build_config(
    params: &CircleParams,
    creator: Pubkey,
    medium: PaymentMedium,
) -> Result<CircleConfig> {
    require!(params.name.len() <= MAX_NAME_LEN, TlcError::TextTooLong);
    require!(params.contribution_amount > 0, TlcError::InvalidConfiguration);
    require!(
        params.circle_size >= 2 && params.circle_size <= MAX_CIRCLE_SIZE,
        TlcError::InvalidConfiguration
    );
    require!(params.round_days > 0, TlcError::InvalidConfiguration);

    let benefit = params.patience_benefit_x10000 as u64;
    let earnings = params.creator_earnings_x10000 as u64;
    require!(benefit <= BPS_DENOMINATOR, TlcError::InvalidConfiguration);
    require!(earnings <= BPS_DENOMINATOR, TlcError::InvalidConfiguration);
    // Both shares come out of the same gross.
    require!(benefit + earnings <= BPS_DENOMINATOR, TlcError::InvalidConfiguration);

    if let PaymentMedium::Token { mint } = medium {
        require!(mint != Pubkey::default(), TlcError::InvalidConfiguration);
    }

    let winners_order = WinnersOrder::try_from(params.winners_order)?;

    // The full pot must be representable.
    params
        .contribution_amount
        .checked_mul(params.circle_size as u64)
        .ok_or(TlcError::InvalidConfiguration)?;

    Ok(CircleConfig {
        name: params.name.clone(),
        medium,
        contribution_amount: params.contribution_amount,
        circle_size: params.circle_size,
        round_days: params.round_days,
        winners_order,
        patience_benefit_x10000: params.patience_benefit_x10000,
        creator_earnings_x10000: params.creator_earnings_x10000,
        creator,
        service_admin: params.service_admin,
        admission: params.admission,
        allow_partial_seal: params.allow_partial_seal,
    })
}

impl CircleConfig {
    pub fn round_seconds(&self) -> i64 {
        self.round_days as i64 * SECONDS_PER_DAY
    }

    pub fn has_service_admin(&self) -> bool {
        self.service_admin != Pubkey::default()
    }

    /// Pot paid out each round when `seats` members contribute.
    pub fn loan_amount(&self, seats: u8) -> Result<u64> {
        Ok(self
            .contribution_amount
            .checked_mul(seats as u64)
            .ok_or(TlcError::MathOverflow)?)
    }
}

/// Writes a freshly created circle.
pub fn init_circle(
    circle: &mut Circle,
    circle_id: u64,
    bump: u8,
    vault: Pubkey,
    vault_bump: u8,
    config: CircleConfig,
    now: i64,
) {
    circle.circle_id = circle_id;
    circle.bump = bump;
    circle.vault = vault;
    circle.vault_bump = vault_bump;
    circle.config = config;

    circle.status = CircleStatus::Forming;
    circle.paused = false;
    circle.paused_at = 0;
    circle.seats = 0;
    circle.next_join_seq = 0;
    circle.members = Vec::new();

    circle.current_round = 0;
    circle.round_opened_at = 0;

    circle.treasury = TreasuryState::default();
    circle.dispute = None;

    circle.created_at = now;
    circle.completed_at = 0;
    circle.version = INITIAL_VERSION;
}
