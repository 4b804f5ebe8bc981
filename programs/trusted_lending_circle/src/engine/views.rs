use anchor_lang::prelude::*;

use crate::engine::selector;
use crate::errors::TlcError;
use crate::state::{
    Circle, CircleConstantsView, CircleStatus, CircleStatusView, MemberView, RoundLedger,
};

pub fn status(circle: &Circle) -> Result<CircleStatusView> {
    // Before activation the pot is quoted for a full circle.
    let seats = match circle.status {
        CircleStatus::Forming => circle.config.circle_size,
        CircleStatus::Active | CircleStatus::Completed => circle.seats,
    };

    Ok(CircleStatusView {
        circle_name: circle.config.name.clone(),
        circle_status: circle.status,
        contribution_size: circle.config.contribution_amount,
        loan_amount: circle.config.loan_amount(seats)?,
        payment_token: circle.config.medium.token_address(),
        current_round: circle.current_round,
        service_admin: circle.config.service_admin,
        seats: circle.seats,
        paused: circle.paused,
        treasury_balance: circle.treasury.balance,
    })
}

pub fn constants(circle: &Circle) -> CircleConstantsView {
    let cfg = &circle.config;
    CircleConstantsView {
        circle_id: circle.circle_id,
        circle_name: cfg.name.clone(),
        payment_token: cfg.medium.token_address(),
        circle_size: cfg.circle_size,
        round_days: cfg.round_days,
        round_payments: cfg.contribution_amount,
        winners_order: cfg.winners_order.into(),
        patience_benefit_x10000: cfg.patience_benefit_x10000,
        creator_earnings_x10000: cfg.creator_earnings_x10000,
        creator: cfg.creator,
        service_admin: cfg.service_admin,
    }
}

/// Standing of one member record, left members included.
pub fn member(circle: &Circle, identity: &Pubkey) -> Result<MemberView> {
    let m = circle
        .members
        .iter()
        .find(|m| m.identity == *identity)
        .ok_or(TlcError::NotMember)?;
    Ok(MemberView {
        identity: m.identity,
        active: m.active,
        contributed: m.contributed,
        rounds_missed: m.rounds_missed,
        paid_out: m.paid_out,
        payout_round: m.payout_round,
        benefit_accrued: m.benefit_accrued,
        claimable: m.claimable,
    })
}

/// Who `advance_round` would pay given the current state. Clients use it to
/// pass the recipient wallet and get an immediate push instead of a claim.
/// A random draw is only final once the round is funded; a forced settlement
/// also mixes in its slot, so it cannot be previewed.
pub fn preview_recipient(
    circle: &Circle,
    circle_key: &Pubkey,
    round: Option<&RoundLedger>,
) -> Result<Pubkey> {
    require!(circle.status == CircleStatus::Active, TlcError::InvalidState);

    let entropy = match round {
        Some(r) if r.circle == *circle_key && r.round_index == circle.current_round => r.entropy,
        _ => [0u8; 32],
    };
    let idx = selector::select_recipient(circle, circle_key, circle.current_round, &entropy)?;
    Ok(circle.members[idx].identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::membership::{join, seal, OpenAdmission};
    use crate::engine::scheduler::advance_round;
    use crate::engine::testkit::{
        active_circle, expect_err, forming_circle, fresh_round, fund_round, params, round_ref,
        MockRail, T0,
    };

    #[test]
    fn forming_circle_quotes_full_pot() {
        let (circle, _) = forming_circle(params());
        let v = status(&circle).unwrap();
        assert_eq!(v.circle_status, CircleStatus::Forming);
        assert_eq!(v.loan_amount, 50);
        assert_eq!(v.contribution_size, 10);
        assert_eq!(v.payment_token, Pubkey::default());
        assert_eq!(v.seats, 0);
    }

    #[test]
    fn partially_sealed_circle_quotes_seated_pot() {
        let mut p = params();
        p.allow_partial_seal = true;
        let (mut circle, _) = forming_circle(p);
        let admin = circle.config.service_admin;
        for _ in 0..3 {
            join(&mut circle, Pubkey::new_unique(), &OpenAdmission, T0).unwrap();
        }
        seal(&mut circle, &admin, T0).unwrap();
        assert_eq!(status(&circle).unwrap().loan_amount, 30);
    }

    #[test]
    fn constants_report_configuration() {
        let mut p = params();
        p.winners_order = 1;
        p.creator_earnings_x10000 = 250;
        let (circle, _, _) = active_circle(p);
        let c = constants(&circle);
        assert_eq!(c.circle_name, "Mock TLCC");
        assert_eq!(c.circle_size, 5);
        assert_eq!(c.round_days, 30);
        assert_eq!(c.round_payments, 10);
        assert_eq!(c.winners_order, 1);
        assert_eq!(c.creator_earnings_x10000, 250);
    }

    #[test]
    fn preview_matches_settlement() {
        let mut p = params();
        p.winners_order = 1;
        let (mut circle, members, key) = active_circle(p);
        let mut round = fresh_round();
        let mut rail = MockRail::native();
        fund_round(&mut circle, &mut round, key, &mut rail, &members, T0 + 1);

        let previewed = preview_recipient(&circle, &key, Some(&round)).unwrap();
        let s = advance_round(
            &mut circle, &mut round, round_ref(key, 0), &mut rail, Some(previewed), T0 + 2, 0,
        )
        .unwrap();
        assert_eq!(s.recipient, previewed);
    }

    #[test]
    fn member_view_reports_missed_rounds() {
        let (mut circle, members, key) = active_circle(params());
        let mut round = fresh_round();
        let mut rail = MockRail::native();
        fund_round(&mut circle, &mut round, key, &mut rail, &members[..3], T0 + 1);
        advance_round(&mut circle, &mut round, round_ref(key, 0), &mut rail, None, T0 + 30 * 86_400, 0)
            .unwrap();

        let late = member(&circle, &members[4]).unwrap();
        assert_eq!(late.rounds_missed, 1);
        assert_eq!(late.contributed, 0);
        assert!(late.active);

        let winner = member(&circle, &members[0]).unwrap();
        assert_eq!(winner.rounds_missed, 0);
        assert!(winner.paid_out);
        assert_eq!(winner.claimable, 30);

        expect_err(member(&circle, &Pubkey::new_unique()), TlcError::NotMember);
    }

    #[test]
    fn preview_needs_an_active_circle() {
        let (circle, key) = forming_circle(params());
        expect_err(preview_recipient(&circle, &key, None), TlcError::InvalidState);
    }
}
