use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::state::Admission;

// -----------------
// Seeds / constants
// -----------------
pub const REGISTRY_SEED: &[u8] = b"tlc_registry_v1";
pub const CIRCLE_SEED: &[u8] = b"tlc_circle_v1";
pub const VAULT_SEED: &[u8] = b"tlc_vault_v1";
pub const TOKEN_VAULT_SEED: &[u8] = b"tlc_token_vault_v1";
pub const ROUND_SEED: &[u8] = b"tlc_round_v1";
pub const TRUST_LIST_SEED: &[u8] = b"tlc_trust_v1";

const ENTROPY_DOMAIN: &[u8] = b"tlc:entropy";
const DRAW_DOMAIN: &[u8] = b"tlc:draw";
const SETTLE_DOMAIN: &[u8] = b"tlc:settle";

// ---------------
// Instruction payloads
// ---------------
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CircleParams {
    pub name: String,
    pub contribution_amount: u64,
    pub circle_size: u8,
    pub round_days: u16,
    /// 0 = sequential, 1 = random.
    pub winners_order: u8,
    pub patience_benefit_x10000: u16,
    pub creator_earnings_x10000: u16,
    /// `Pubkey::default()` for a circle without a service admin.
    pub service_admin: Pubkey,
    pub admission: Admission,
    pub allow_partial_seal: bool,
}

// -------------------------
// Round entropy
// -------------------------

/// Folds one contribution into the round entropy. The final value depends on
/// every contribution, so it is only known once the round is funded.
pub fn fold_entropy(prev: &[u8; 32], member: &Pubkey, paid_at: i64, slot: u64) -> [u8; 32] {
    hashv(&[
        ENTROPY_DOMAIN,
        prev.as_ref(),
        member.as_ref(),
        paid_at.to_le_bytes().as_ref(),
        slot.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

/// Mixes the settling slot and time into a round that closed without full
/// funding, so its draw is not fixed before someone settles it.
pub fn fold_settlement_entropy(prev: &[u8; 32], now: i64, slot: u64) -> [u8; 32] {
    hashv(&[
        SETTLE_DOMAIN,
        prev.as_ref(),
        now.to_le_bytes().as_ref(),
        slot.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

/// Seed for the random recipient draw of `round_index`.
pub fn draw_seed(circle: &Pubkey, round_index: u8, entropy: &[u8; 32]) -> [u8; 32] {
    hashv(&[
        DRAW_DOMAIN,
        circle.as_ref(),
        &[round_index],
        entropy.as_ref(),
    ])
    .to_bytes()
}

/// Index into a candidate list of length `len` (> 0) taken from the seed.
pub fn draw_index(seed: &[u8; 32], len: usize) -> usize {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&seed[..8]);
    (u64::from_le_bytes(prefix) % len as u64) as usize
}
