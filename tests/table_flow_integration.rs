/// Integration tests for full table flows
///
/// These tests drive the public API end-to-end: wager placement, multi-roll
/// rounds, come-bet migration, and detector-driven settlement.
use casino_craps::{
    DiceTable, Motion, OddsTarget, Phase, Roll, Session, SettleDetector, Wager,
};

/// Scripted physics stand-in for detector-driven flows.
struct RestingDice(u8, u8);

impl DiceTable for RestingDice {
    fn motion(&self, _die: usize) -> Motion {
        Motion::default()
    }

    fn up_face(&self, die: usize) -> u8 {
        if die == 0 { self.0 } else { self.1 }
    }
}

#[test]
fn test_full_pass_line_round_with_odds() {
    let mut session = Session::new();
    session.place_wager(Wager::PassLine, 10).unwrap();
    assert_eq!(session.account.balance, 490);

    // Come-out establishes the point; the line wager stays up.
    let settlement = session.resolve_roll(Roll(3, 3)).unwrap();
    assert_eq!(settlement.table.phase, Phase::Point(6));
    assert_eq!(settlement.message, "Point is 6.");
    assert_eq!(session.account.pass_line, 10);

    // Odds open up behind the line once the point is on.
    session.place_wager(Wager::Odds(OddsTarget::Line), 25).unwrap();
    assert_eq!(session.account.balance, 465);
    assert_eq!(session.total_outstanding(), 35);

    // Point made: 2x line, 6:5 odds winnings, odds stake back.
    let settlement = session.resolve_roll(Roll(4, 2)).unwrap();
    assert_eq!(settlement.message, "Pass line wins!");
    assert_eq!(session.account.balance, 465 + 20 + 30 + 25);
    assert_eq!(session.account.pass_line, 0);
    assert_eq!(session.account.line_odds, 0);
    assert_eq!(session.table.phase, Phase::ComeOut);
    assert_eq!(session.total_outstanding(), 0);
}

#[test]
fn test_seven_out_sweeps_the_board() {
    let mut session = Session::new();
    session.place_wager(Wager::PassLine, 10).unwrap();
    session.resolve_roll(Roll(4, 5)).unwrap();
    assert_eq!(session.table.phase, Phase::Point(9));

    session.place_wager(Wager::Place(6), 12).unwrap();
    session.place_wager(Wager::Hardway(8), 5).unwrap();
    session.place_wager(Wager::DontCome, 10).unwrap();
    session.resolve_roll(Roll(2, 2)).unwrap();
    assert_eq!(session.account.dont_come_bets[0].point, Some(4));

    let balance = session.account.balance;
    let settlement = session.resolve_roll(Roll(3, 4)).unwrap();

    // Place and hardway wagers die, the pass line dies, the working
    // don't come collects double.
    assert_eq!(session.account.place_amount(6), 0);
    assert_eq!(session.account.hardway_amount(8), 0);
    assert_eq!(session.account.pass_line, 0);
    assert!(session.account.dont_come_bets.is_empty());
    assert_eq!(session.account.balance, balance + 20);
    assert_eq!(session.table.phase, Phase::ComeOut);
    assert_eq!(session.total_outstanding(), 0);
    assert_eq!(
        settlement.message,
        "Hard 8 loses. Place 6 loses. Don't come on 4 wins. Pass line loses."
    );
}

#[test]
fn test_come_bets_ride_across_rounds() {
    let mut session = Session::new();
    session.resolve_roll(Roll(5, 5)).unwrap();
    assert_eq!(session.table.phase, Phase::Point(10));

    session.place_wager(Wager::Come, 5).unwrap();
    session.resolve_roll(Roll(2, 3)).unwrap();
    assert_eq!(session.account.come_bets[0].point, Some(5));

    // The point is made; the come bet keeps working into the new
    // come-out.
    session.resolve_roll(Roll(5, 5)).unwrap();
    assert_eq!(session.table.phase, Phase::ComeOut);
    assert_eq!(session.account.come_bets.len(), 1);

    let balance = session.account.balance;
    let settlement = session.resolve_roll(Roll(2, 3)).unwrap();
    assert!(session.account.come_bets.is_empty());
    assert_eq!(session.account.balance, balance + 10);
    assert!(settlement.message.contains("Come bet on 5 wins."));
}

#[test]
fn test_multiple_come_bets_resolve_in_creation_order() {
    let mut session = Session::new();
    session.resolve_roll(Roll(4, 4)).unwrap();

    session.place_wager(Wager::Come, 5).unwrap();
    session.resolve_roll(Roll(2, 2)).unwrap(); // first rides 4
    session.place_wager(Wager::Come, 10).unwrap();
    session.resolve_roll(Roll(3, 2)).unwrap(); // second rides 5
    session.place_wager(Wager::Come, 15).unwrap(); // third in the box

    // A seven clears both working entries and pays the boxed one, in
    // creation order.
    let balance = session.account.balance;
    let settlement = session.resolve_roll(Roll(3, 4)).unwrap();
    assert!(session.account.come_bets.is_empty());
    assert_eq!(session.account.balance, balance + 30);
    assert_eq!(
        settlement.message,
        "Come bet on 4 loses. Come bet on 5 loses. Come bet wins on 7."
    );
}

#[test]
fn test_field_resolves_every_roll_regardless_of_phase() {
    let mut session = Session::new();

    session.place_wager(Wager::Field, 10).unwrap();
    session.resolve_roll(Roll(5, 6)).unwrap(); // come-out, field single
    assert_eq!(session.account.balance, 510);
    assert_eq!(session.account.field, 0);

    session.resolve_roll(Roll(4, 4)).unwrap();
    session.place_wager(Wager::Field, 10).unwrap();
    session.resolve_roll(Roll(3, 3)).unwrap(); // point phase, field loss
    assert_eq!(session.account.balance, 500);
    assert_eq!(session.account.field, 0);
}

#[test]
fn test_detector_driven_session() {
    let mut session = Session::new();
    let mut detector = SettleDetector::new();
    session.place_wager(Wager::PassLine, 10).unwrap();

    // First throw: the dice tumble in, sit still, and settle the
    // come-out on hard eight.
    let dice = RestingDice(4, 4);
    let mut settlement = None;
    for _ in 0..100 {
        if let Some(result) = detector.tick(&dice, 1.0 / 60.0, &mut session).unwrap() {
            settlement = Some(result);
            break;
        }
    }
    let settlement = settlement.expect("throw should settle within 100 ticks");
    assert_eq!(settlement.message, "Point is 8.");
    assert!(!detector.is_armed());

    // A fresh pair of dice re-arms the detector; the point is made.
    detector.arm();
    let dice = RestingDice(6, 2);
    let mut settlement = None;
    for _ in 0..100 {
        if let Some(result) = detector.tick(&dice, 1.0 / 60.0, &mut session).unwrap() {
            settlement = Some(result);
            break;
        }
    }
    let settlement = settlement.expect("throw should settle within 100 ticks");
    assert_eq!(settlement.message, "Pass line wins!");
    assert_eq!(session.account.balance, 490 + 20);
    assert_eq!(session.table.phase, Phase::ComeOut);
}

#[test]
fn test_settlement_serializes_for_the_ui() {
    let mut session = Session::new();
    session.place_wager(Wager::Field, 10).unwrap();
    let settlement = session.resolve_roll(Roll(6, 6)).unwrap();

    let json = settlement.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total"], 12);
    assert_eq!(value["message"], "Field bet pays double on 12!");
    assert_eq!(value["account"]["balance"], 520);
    assert_eq!(value["table"]["last_roll"], 12);
}

#[test]
fn test_session_round_trips_through_serde() {
    let mut session = Session::new();
    session.resolve_roll(Roll(3, 3)).unwrap();
    session.place_wager(Wager::Come, 5).unwrap();
    session.place_wager(Wager::Place(8), 6).unwrap();

    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.account, session.account);
    assert_eq!(restored.table, session.table);
}

#[test]
fn test_bankroll_drains_to_exactly_zero() {
    let mut session = Session::with_bankroll(15);
    session.place_wager(Wager::Field, 15).unwrap();
    assert_eq!(session.account.balance, 0);

    // Broke players can watch but not bet.
    let err = session.place_wager(Wager::Field, 1).unwrap_err();
    assert_eq!(err.to_string(), "need $1 but only $0 remains");

    session.resolve_roll(Roll(3, 4)).unwrap();
    assert_eq!(session.account.balance, 0);
    assert_eq!(session.total_outstanding(), 0);
}
