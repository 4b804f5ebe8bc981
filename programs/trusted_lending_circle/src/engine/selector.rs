use anchor_lang::prelude::*;

use crate::errors::TlcError;
use crate::state::{Circle, WinnersOrder};
use crate::utils::{draw_index, draw_seed};

/// Indices of members still waiting for their payout, in join order.
pub fn eligible(circle: &Circle) -> Vec<usize> {
    let mut waiting: Vec<usize> = circle
        .members
        .iter()
        .enumerate()
        .filter(|(_, m)| m.active && !m.paid_out)
        .map(|(i, _)| i)
        .collect();
    waiting.sort_by_key(|&i| circle.members[i].join_seq);
    waiting
}

/// Picks the member index paid in `round_index`. Deterministic for a given
/// circle state and round entropy, and never returns a member already paid.
pub fn select_recipient(
    circle: &Circle,
    circle_key: &Pubkey,
    round_index: u8,
    entropy: &[u8; 32],
) -> Result<usize> {
    let candidates = eligible(circle);
    require!(!candidates.is_empty(), TlcError::NoEligibleRecipient);

    let pick = match circle.config.winners_order {
        WinnersOrder::Sequential => 0,
        WinnersOrder::Random => {
            let seed = draw_seed(circle_key, round_index, entropy);
            draw_index(&seed, candidates.len())
        }
    };
    Ok(candidates[pick])
}
