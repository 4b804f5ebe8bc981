//! Whole-circle runs through the engine, checking custody after every step.

use anchor_lang::prelude::*;

use crate::engine::ledger::record_contribution;
use crate::engine::membership::{join, OpenAdmission};
use crate::engine::scheduler::{advance_round, claim_payout};
use crate::engine::testkit::{
    active_circle, expect_err, fresh_round, fund_round, params, round_ref, MockRail, T0,
};
use crate::errors::TlcError;
use crate::state::{Circle, CircleStatus, RoundStatus};

const DAY: i64 = 86_400;

/// Ledger balance matches both the running totals and the vault.
fn assert_custody(circle: &Circle, rail: &MockRail) {
    assert!(circle.treasury.reconciles());
    assert_eq!(circle.treasury.balance, rail.vault);
}

#[test]
fn scenario_a_full_round_pays_first_joiner() {
    let (mut circle, members, key) = active_circle(params());
    let mut round = fresh_round();
    let mut rail = MockRail::native();

    fund_round(&mut circle, &mut round, key, &mut rail, &members, T0 + DAY);
    assert_custody(&circle, &rail);
    assert_eq!(round.total_collected, 50);

    let s = advance_round(
        &mut circle, &mut round, round_ref(key, 0), &mut rail, Some(members[0]), T0 + 2 * DAY, 0,
    )
    .unwrap();
    assert_custody(&circle, &rail);

    assert_eq!(s.recipient, members[0]);
    assert_eq!((s.split.benefit, s.split.earnings, s.payout.net), (0, 0, 50));
    assert_eq!(circle.current_round, 1);
    assert_eq!(rail.sent, vec![(members[0], 50)]);
}

#[test]
fn scenario_b_partial_round_waits_for_deadline() {
    let (mut circle, members, key) = active_circle(params());
    let mut round = fresh_round();
    let mut rail = MockRail::native();
    fund_round(&mut circle, &mut round, key, &mut rail, &members[..4], T0 + DAY);

    expect_err(
        advance_round(&mut circle, &mut round, round_ref(key, 0), &mut rail, None, T0 + 29 * DAY, 0),
        TlcError::RoundNotReady,
    );

    // The straggler cannot pay once the window closed.
    expect_err(
        record_contribution(
            &mut circle, &mut round, round_ref(key, 0), &mut rail, &members[4], 10, T0 + 30 * DAY, 1,
        ),
        TlcError::RoundClosed,
    );

    let s = advance_round(
        &mut circle, &mut round, round_ref(key, 0), &mut rail, Some(members[0]), T0 + 30 * DAY, 0,
    )
    .unwrap();
    assert!(s.forced);
    assert_eq!(s.payout.net, 40);
    assert_eq!(circle.members[4].rounds_missed, 1);
    assert_eq!(circle.current_round, 1);
    assert_custody(&circle, &rail);
}

#[test]
fn scenario_c_creator_earnings_on_gross_of_100() {
    let mut p = params();
    p.circle_size = 10;
    p.creator_earnings_x10000 = 500;
    let (mut circle, members, key) = active_circle(p);
    let creator = circle.config.creator;
    let mut round = fresh_round();
    let mut rail = MockRail::native();
    fund_round(&mut circle, &mut round, key, &mut rail, &members, T0 + 1);

    let s = advance_round(
        &mut circle, &mut round, round_ref(key, 0), &mut rail, Some(members[0]), T0 + 2, 0,
    )
    .unwrap();
    assert_eq!(s.payout.gross, 100);
    assert_eq!(s.split.earnings, 5);
    assert_eq!(s.payout.net, 95);
    assert_eq!(s.payout.net + s.split.earnings + s.split.benefit, s.payout.gross);
    assert_eq!(rail.sent_to(&creator), 5);
    assert_custody(&circle, &rail);
}

#[test]
fn scenario_d_join_after_activation_fails() {
    let (mut circle, _, _) = active_circle(params());
    expect_err(
        join(&mut circle, Pubkey::new_unique(), &OpenAdmission, T0 + 1),
        TlcError::InvalidState,
    );
    assert_eq!(circle.members.len(), 5);
}

#[test]
fn full_circle_pays_everyone_once_and_drains_custody() {
    let mut p = params();
    p.winners_order = 1;
    p.patience_benefit_x10000 = 700;
    p.creator_earnings_x10000 = 300;
    let (mut circle, members, key) = active_circle(p);
    let mut rail = MockRail::native();
    let mut now = T0;

    for index in 0..5u8 {
        let mut round = fresh_round();
        now += DAY;
        fund_round(&mut circle, &mut round, key, &mut rail, &members, now);
        assert_custody(&circle, &rail);

        now += 1;
        let s = advance_round(&mut circle, &mut round, round_ref(key, index), &mut rail, None, now, 0)
            .unwrap();
        assert_eq!(s.round_index, index);
        assert_eq!(round.status, RoundStatus::Closed);
        assert_custody(&circle, &rail);

        // Replaying the settled round changes nothing.
        let snapshot = circle.clone();
        expect_err(
            advance_round(&mut circle, &mut round, round_ref(key, index), &mut rail, None, now, 0),
            TlcError::AlreadyDisbursed,
        );
        assert_eq!(circle.members, snapshot.members);
        assert_eq!(circle.treasury, snapshot.treasury);
    }

    assert_eq!(circle.status, CircleStatus::Completed);
    assert!(circle.members.iter().all(|m| m.paid_out));
    let mut rounds: Vec<u8> = circle.members.iter().map(|m| m.payout_round).collect();
    rounds.sort_unstable();
    assert_eq!(rounds, vec![0, 1, 2, 3, 4]);
    assert!(circle.members.iter().all(|m| m.benefit_accrued == 0));

    // Completed circles still release what members are owed.
    for m in &members {
        claim_payout(&mut circle, &mut rail, m).unwrap();
        assert_custody(&circle, &rail);
    }
    assert_eq!(circle.treasury.balance, 0);
    assert_eq!(rail.vault, 0);

    let paid_in = 5 * 50;
    let paid_out: u64 = rail.sent.iter().map(|(_, a)| a).sum();
    assert_eq!(paid_out, paid_in);

    expect_err(
        advance_round(&mut circle, &mut fresh_round(), round_ref(key, 5), &mut rail, None, now, 0),
        TlcError::AlreadyDisbursed,
    );
}

#[test]
fn payout_records_add_up_to_gross_in_every_round() {
    let mut p = params();
    p.patience_benefit_x10000 = 1_000;
    let (mut circle, members, key) = active_circle(p);
    let mut rail = MockRail::native();
    let mut now = T0;
    let mut delivered = Vec::new();

    for index in 0..5u8 {
        let mut round = fresh_round();
        now += DAY;
        fund_round(&mut circle, &mut round, key, &mut rail, &members, now);

        let recipient = members[index as usize];
        let s = advance_round(
            &mut circle, &mut round, round_ref(key, index), &mut rail, Some(recipient), now + 1, 0,
        )
        .unwrap();
        let stored = round.payout.clone().unwrap();
        assert_eq!(stored, s.payout);
        assert_eq!(stored.net + stored.benefit + stored.earnings, stored.gross, "round {}", index);
        assert_eq!(s.split.net, stored.net);
        assert_eq!(s.split.benefit, stored.benefit);
        delivered.push(stored.net + stored.accrued_benefit_paid);
        assert_custody(&circle, &rail);
    }

    // Final round has nobody left waiting, so its benefit is paid as net.
    let last = &circle.members[4];
    assert_eq!(last.benefit_accrued, 0);
    assert_eq!(delivered, vec![45, 47, 48, 51, 59]);
    assert_eq!(delivered.iter().sum::<u64>(), 250);
    assert_eq!(circle.treasury.balance, 0);
    assert_eq!(circle.status, CircleStatus::Completed);
}

#[test]
fn dispute_near_deadline_does_not_force_settlement() {
    let (mut circle, members, key) = active_circle(params());
    let admin = circle.config.service_admin;
    let mut round = fresh_round();
    let mut rail = MockRail::native();
    fund_round(&mut circle, &mut round, key, &mut rail, &members[..1], T0 + 1);

    crate::engine::gate::raise_dispute(&mut circle, &members[0], "stalling".into(), T0 + 2)
        .unwrap();
    crate::engine::gate::resolve_dispute(&mut circle, &admin, T0 + 30 * DAY).unwrap();

    // Wall-clock deadline has passed, the round window has not.
    expect_err(
        advance_round(&mut circle, &mut round, round_ref(key, 0), &mut rail, None, T0 + 30 * DAY + 1, 0),
        TlcError::RoundNotReady,
    );
    for (slot, m) in members[1..].iter().enumerate() {
        record_contribution(
            &mut circle, &mut round, round_ref(key, 0), &mut rail, m, 10, T0 + 30 * DAY + 1, slot as u64,
        )
        .unwrap();
    }
    let s = advance_round(&mut circle, &mut round, round_ref(key, 0), &mut rail, None, T0 + 30 * DAY + 2, 0)
        .unwrap();
    assert!(!s.forced);
    assert_eq!(s.payout.gross, 50);
    assert!(s.defaulters.is_empty());
    assert!(circle.members.iter().all(|m| m.rounds_missed == 0));
    assert_custody(&circle, &rail);
}

#[test]
fn dispute_freezes_money_movement() {
    let (mut circle, members, key) = active_circle(params());
    let admin = circle.config.service_admin;
    let mut round = fresh_round();
    let mut rail = MockRail::native();
    fund_round(&mut circle, &mut round, key, &mut rail, &members[..2], T0 + 1);

    crate::engine::gate::raise_dispute(&mut circle, &members[3], "collusion".into(), T0 + 2)
        .unwrap();
    expect_err(
        record_contribution(
            &mut circle, &mut round, round_ref(key, 0), &mut rail, &members[2], 10, T0 + 3, 0,
        ),
        TlcError::CirclePaused,
    );

    crate::engine::gate::resolve_dispute(&mut circle, &admin, T0 + 4).unwrap();
    fund_round(&mut circle, &mut round, key, &mut rail, &members[2..], T0 + 4);
    assert_eq!(round.status, RoundStatus::ReadyToDisburse);
    assert_custody(&circle, &rail);
}
