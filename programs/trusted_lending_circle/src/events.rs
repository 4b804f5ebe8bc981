use anchor_lang::prelude::*;

#[event]
pub struct CircleCreated {
    pub circle: Pubkey,
    pub circle_id: u64,
    pub creator: Pubkey,
}

#[event]
pub struct MemberJoined {
    pub circle: Pubkey,
    pub member: Pubkey,
    pub join_seq: u16,
}

#[event]
pub struct MemberLeft {
    pub circle: Pubkey,
    pub member: Pubkey,
}

#[event]
pub struct CircleActivated {
    pub circle: Pubkey,
    pub seats: u8,
    pub opened_at: i64,
}

#[event]
pub struct ContributionRecorded {
    pub circle: Pubkey,
    pub round_index: u8,
    pub member: Pubkey,
    pub amount: u64,
    pub round_total: u64,
}

#[event]
pub struct RoundDisbursed {
    pub circle: Pubkey,
    pub round_index: u8,
    pub recipient: Pubkey,
    pub gross: u64,
    pub benefit: u64,
    pub earnings: u64,
    pub net: u64,
    pub forced: bool,
    /// Members who had not paid when a forced settlement ran.
    pub defaulters: Vec<Pubkey>,
}

#[event]
pub struct CircleCompleted {
    pub circle: Pubkey,
    pub completed_at: i64,
}

#[event]
pub struct PayoutClaimed {
    pub circle: Pubkey,
    pub member: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PauseChanged {
    pub circle: Pubkey,
    pub paused: bool,
}

#[event]
pub struct DisputeRaised {
    pub circle: Pubkey,
    pub raised_by: Pubkey,
}

#[event]
pub struct DisputeResolved {
    pub circle: Pubkey,
}
