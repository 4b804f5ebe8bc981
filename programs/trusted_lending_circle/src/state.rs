use anchor_lang::prelude::*;

// -----------------
// Configuration
// -----------------

/// Medium the circle custodies. Fixed at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PaymentMedium {
    /// Lamports held by a system-owned vault PDA.
    Native,
    /// SPL tokens of `mint` held by a token account owned by the circle PDA.
    Token { mint: Pubkey },
}

impl PaymentMedium {
    /// Address reported as `paymentToken`; the default key stands for native value.
    pub fn token_address(&self) -> Pubkey {
        match self {
            PaymentMedium::Native => Pubkey::default(),
            PaymentMedium::Token { mint } => *mint,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum WinnersOrder {
    /// Round k pays the k-th seated member in join order.
    Sequential,
    /// Uniform draw among unpaid members, seeded by the funded round's entropy.
    Random,
}

impl TryFrom<u8> for WinnersOrder {
    type Error = crate::errors::TlcError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(WinnersOrder::Sequential),
            1 => Ok(WinnersOrder::Random),
            _ => Err(crate::errors::TlcError::InvalidConfiguration),
        }
    }
}

impl From<WinnersOrder> for u8 {
    fn from(order: WinnersOrder) -> u8 {
        match order {
            WinnersOrder::Sequential => 0,
            WinnersOrder::Random => 1,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum Admission {
    Open,
    TrustList,
}

/// Immutable parameters of a circle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct CircleConfig {
    #[max_len(32)] // MAX_NAME_LEN
    pub name: String,
    pub medium: PaymentMedium,
    pub contribution_amount: u64,
    pub circle_size: u8,
    pub round_days: u16,
    pub winners_order: WinnersOrder,
    pub patience_benefit_x10000: u16,
    pub creator_earnings_x10000: u16,
    pub creator: Pubkey,
    /// `Pubkey::default()` means the circle has no service admin.
    pub service_admin: Pubkey,
    pub admission: Admission,
    pub allow_partial_seal: bool,
}

// -----------------
// Circle
// -----------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum CircleStatus {
    Forming,
    Active,
    Completed,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Member {
    pub identity: Pubkey,
    pub join_seq: u16,
    /// Soft-removal flag; records are never deleted.
    pub active: bool,
    /// Cumulative amount contributed across rounds.
    pub contributed: u64,
    pub rounds_missed: u8,
    pub paid_out: bool,
    pub payout_round: u8,
    /// Patience benefit credited while waiting, paid with the member's own payout.
    pub benefit_accrued: u64,
    /// Assigned to the member but still in custody until `claim_payout`.
    pub claimable: u64,
}

/// Running custody balance. `balance == total_deposited - total_released` always.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct TreasuryState {
    pub balance: u64,
    pub total_deposited: u64,
    pub total_released: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Dispute {
    pub raised_by: Pubkey,
    pub raised_at: i64,
    #[max_len(64)] // MAX_DISPUTE_REASON_LEN
    pub reason: String,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct Circle {
    pub circle_id: u64,
    pub bump: u8,

    /// Lamport vault PDA for native circles, token account PDA for token circles.
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub config: CircleConfig,

    pub status: CircleStatus,
    pub paused: bool,
    /// When the current pause began; 0 while running.
    pub paused_at: i64,

    /// Members seated when the circle became active; also the number of rounds.
    pub seats: u8,
    pub next_join_seq: u16,

    #[max_len(48)] // MAX_MEMBER_RECORDS
    pub members: Vec<Member>,

    pub current_round: u8,
    pub round_opened_at: i64,

    pub treasury: TreasuryState,

    pub dispute: Option<Dispute>,

    pub created_at: i64,
    pub completed_at: i64,
    pub version: u16,
}

// -----------------
// Rounds
// -----------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum RoundStatus {
    Open,
    Collecting,
    ReadyToDisburse,
    Disbursed,
    Closed,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct Contribution {
    pub member: Pubkey,
    pub amount: u64,
    pub paid_at: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct PayoutRecord {
    pub recipient: Pubkey,
    pub gross: u64,
    pub benefit: u64,
    pub earnings: u64,
    pub net: u64,
    /// Patience benefit the recipient had accrued in earlier rounds, paid on top of `net`.
    pub accrued_benefit_paid: u64,
    /// True when the net went straight to the recipient, false when it was credited as claimable.
    pub pushed: bool,
    pub paid_at: i64,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct RoundLedger {
    pub circle: Pubkey,
    pub round_index: u8,
    pub bump: u8,

    pub status: RoundStatus,
    pub opened_at: i64,
    pub deadline: i64,

    pub total_collected: u64,

    #[max_len(24)] // MAX_CIRCLE_SIZE
    pub contributions: Vec<Contribution>,

    /// Folded from every contribution; unknown until the round is funded.
    pub entropy: [u8; 32],

    /// Settled after the deadline without full funding.
    pub forced: bool,
    pub payout: Option<PayoutRecord>,
    pub closed_at: i64,
    pub version: u16,
}

// -----------------
// Registry / trust list
// -----------------

#[account]
#[derive(InitSpace)]
pub struct CircleRegistry {
    pub admin: Pubkey,
    pub bump: u8,
    pub next_circle_id: u64,
    pub version: u16,
}

#[account]
#[derive(InitSpace, Debug)]
pub struct TrustList {
    pub circle: Pubkey,
    pub bump: u8,

    /// Pre-approved identities.
    /// NOTE: fixed max_len to keep account size deterministic.
    #[max_len(64)] // MAX_TRUSTED
    pub entries: Vec<Pubkey>,

    pub version: u16,
}

// -----------------
// Return data
// -----------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CircleStatusView {
    pub circle_name: String,
    pub circle_status: CircleStatus,
    pub contribution_size: u64,
    pub loan_amount: u64,
    pub payment_token: Pubkey,
    pub current_round: u8,
    pub service_admin: Pubkey,
    pub seats: u8,
    pub paused: bool,
    pub treasury_balance: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MemberView {
    pub identity: Pubkey,
    pub active: bool,
    pub contributed: u64,
    /// Rounds force-settled without this member's payment.
    pub rounds_missed: u8,
    pub paid_out: bool,
    pub payout_round: u8,
    pub benefit_accrued: u64,
    pub claimable: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CircleConstantsView {
    pub circle_id: u64,
    pub circle_name: String,
    pub payment_token: Pubkey,
    pub circle_size: u8,
    pub round_days: u16,
    pub round_payments: u64,
    pub winners_order: u8,
    pub patience_benefit_x10000: u16,
    pub creator_earnings_x10000: u16,
    pub creator: Pubkey,
    pub service_admin: Pubkey,
}
