//! Fixtures shared by the engine tests.

use anchor_lang::prelude::*;

use crate::engine::config::{build_config, init_circle};
use crate::engine::ledger::{record_contribution, RoundRef};
use crate::engine::membership::{join, OpenAdmission};
use crate::engine::treasury::CustodyRail;
use crate::errors::TlcError;
use crate::state::{
    Admission, Circle, CircleConfig, CircleStatus, PaymentMedium, RoundLedger, RoundStatus,
    TreasuryState, TrustList, WinnersOrder,
};
use crate::utils::CircleParams;

/// Timestamp the fixture circles activate at.
pub const T0: i64 = 1_000;

pub fn expect_err<T: std::fmt::Debug>(res: Result<T>, want: TlcError) {
    match res {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                want as u32 + anchor_lang::error::ERROR_CODE_OFFSET,
                "unexpected error: {}",
                e.error_msg
            );
        }
        other => panic!("expected {:?}, got {:?}", want, other),
    }
}

/// In-memory custody. Tracks what crossed the vault boundary.
pub struct MockRail {
    pub medium: PaymentMedium,
    pub vault: u64,
    pub received: Vec<(Pubkey, u64)>,
    pub sent: Vec<(Pubkey, u64)>,
    pub fail_receives: bool,
    pub fail_sends: bool,
    /// Wallets that cannot be paid, e.g. an account the caller left out.
    pub unpayable: Vec<Pubkey>,
}

impl MockRail {
    fn with(medium: PaymentMedium) -> Self {
        Self {
            medium,
            vault: 0,
            received: Vec::new(),
            sent: Vec::new(),
            fail_receives: false,
            fail_sends: false,
            unpayable: Vec::new(),
        }
    }

    pub fn native() -> Self {
        Self::with(PaymentMedium::Native)
    }

    pub fn token(mint: Pubkey) -> Self {
        Self::with(PaymentMedium::Token { mint })
    }

    pub fn sent_to(&self, to: &Pubkey) -> u64 {
        self.sent.iter().filter(|(k, _)| k == to).map(|(_, a)| a).sum()
    }
}

impl CustodyRail for MockRail {
    fn medium(&self) -> PaymentMedium {
        self.medium
    }

    fn receive(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.fail_receives, TlcError::TransferFailed);
        self.vault += amount;
        self.received.push((*from, amount));
        Ok(())
    }

    fn send(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require!(!self.fail_sends, TlcError::TransferFailed);
        self.check_payee(to)?;
        require!(amount <= self.vault, TlcError::TransferFailed);
        self.vault -= amount;
        self.sent.push((*to, amount));
        Ok(())
    }

    fn check_payee(&self, to: &Pubkey) -> Result<()> {
        require!(!self.unpayable.contains(to), TlcError::TransferFailed);
        Ok(())
    }
}

/// Five seats of 10 every 30 days, sequential, no fees, with a service admin.
pub fn params() -> CircleParams {
    CircleParams {
        name: "Mock TLCC".to_string(),
        contribution_amount: 10,
        circle_size: 5,
        round_days: 30,
        winners_order: 0,
        patience_benefit_x10000: 0,
        creator_earnings_x10000: 0,
        service_admin: Pubkey::new_unique(),
        admission: Admission::Open,
        allow_partial_seal: false,
    }
}

fn blank_circle() -> Circle {
    Circle {
        circle_id: 0,
        bump: 0,
        vault: Pubkey::default(),
        vault_bump: 0,
        config: CircleConfig {
            name: String::new(),
            medium: PaymentMedium::Native,
            contribution_amount: 0,
            circle_size: 0,
            round_days: 0,
            winners_order: WinnersOrder::Sequential,
            patience_benefit_x10000: 0,
            creator_earnings_x10000: 0,
            creator: Pubkey::default(),
            service_admin: Pubkey::default(),
            admission: Admission::Open,
            allow_partial_seal: false,
        },
        status: CircleStatus::Forming,
        paused: false,
        paused_at: 0,
        seats: 0,
        next_join_seq: 0,
        members: Vec::new(),
        current_round: 0,
        round_opened_at: 0,
        treasury: TreasuryState::default(),
        dispute: None,
        created_at: 0,
        completed_at: 0,
        version: 0,
    }
}

/// A freshly created native circle and its address.
pub fn forming_circle(params: CircleParams) -> (Circle, Pubkey) {
    let config = build_config(&params, Pubkey::new_unique(), PaymentMedium::Native).unwrap();
    let mut circle = blank_circle();
    init_circle(&mut circle, 7, 254, Pubkey::new_unique(), 253, config, 0);
    (circle, Pubkey::new_unique())
}

/// A circle whose every seat was filled at `T0`, with members in join order.
pub fn active_circle(params: CircleParams) -> (Circle, Vec<Pubkey>, Pubkey) {
    let (mut circle, key) = forming_circle(params);
    let members: Vec<Pubkey> = (0..circle.config.circle_size)
        .map(|_| Pubkey::new_unique())
        .collect();
    for m in &members {
        join(&mut circle, *m, &OpenAdmission, T0).unwrap();
    }
    assert_eq!(circle.status, CircleStatus::Active);
    (circle, members, key)
}

pub fn trust_list(circle: Pubkey, entries: Vec<Pubkey>) -> TrustList {
    TrustList {
        circle,
        bump: 0,
        entries,
        version: 1,
    }
}

/// Ledger as `init_if_needed` leaves it: zeroed.
pub fn fresh_round() -> RoundLedger {
    RoundLedger {
        circle: Pubkey::default(),
        round_index: 0,
        bump: 0,
        status: RoundStatus::Open,
        opened_at: 0,
        deadline: 0,
        total_collected: 0,
        contributions: Vec::new(),
        entropy: [0u8; 32],
        forced: false,
        payout: None,
        closed_at: 0,
        version: 0,
    }
}

pub fn round_ref(circle: Pubkey, index: u8) -> RoundRef {
    RoundRef {
        circle,
        index,
        bump: 255,
    }
}

/// Every listed member pays the current round at `now`.
pub fn fund_round<R: CustodyRail>(
    circle: &mut Circle,
    round: &mut RoundLedger,
    key: Pubkey,
    rail: &mut R,
    payers: &[Pubkey],
    now: i64,
) {
    let at = round_ref(key, circle.current_round);
    let amount = circle.config.contribution_amount;
    for (slot, m) in payers.iter().enumerate() {
        record_contribution(circle, round, at, rail, m, amount, now, slot as u64).unwrap();
    }
}
