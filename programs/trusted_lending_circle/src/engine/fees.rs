use anchor_lang::prelude::*;

use crate::constants::BPS_DENOMINATOR;
use crate::errors::TlcError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub benefit: u64,
    pub earnings: u64,
    pub net: u64,
}

/// Splits a round's gross into patience benefit, creator earnings and net.
/// Both shares round down; the division remainder stays in `net`, so
/// `net + benefit + earnings == gross` exactly.
pub fn split(gross: u64, patience_benefit_x10000: u16, creator_earnings_x10000: u16) -> Result<FeeSplit> {
    require!(
        patience_benefit_x10000 as u64 + creator_earnings_x10000 as u64 <= BPS_DENOMINATOR,
        TlcError::InvalidConfiguration
    );

    let benefit = bps_of(gross, patience_benefit_x10000)?;
    let earnings = bps_of(gross, creator_earnings_x10000)?;
    // Combined rate is at most 100%, so this never underflows.
    let net = gross
        .checked_sub(benefit)
        .and_then(|v| v.checked_sub(earnings))
        .ok_or(TlcError::MathOverflow)?;

    Ok(FeeSplit { benefit, earnings, net })
}

fn bps_of(amount: u64, bps: u16) -> Result<u64> {
    // u128 keeps `amount * bps` exact for any u64 amount.
    let scaled = (amount as u128) * (bps as u128) / (BPS_DENOMINATOR as u128);
    Ok(u64::try_from(scaled).map_err(|_| TlcError::MathOverflow)?)
}

/// Equal shares of `amount` over `count` recipients. The first `amount % count`
/// recipients get one extra unit.
pub fn pro_rata(amount: u64, count: usize) -> Vec<u64> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as u64;
    let base = amount / n;
    let extra = (amount % n) as usize;
    (0..count)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}
