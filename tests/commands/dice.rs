//! roll command tests with seeded dice.

use docbot_commands::builtin::Roll;
use docbot_commands::grammar::branch;
use docbot_commands::{Command, DiceRoll, RollOutcome, SheetBackend, TOTAL_TOO_LARGE};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{fixture, run};

/// Pulls the `__total__` out of a roll reply.
fn total(reply: &str) -> i64 {
    reply
        .rsplit("__")
        .nth(1)
        .and_then(|n| n.parse().ok())
        .unwrap_or_else(|| panic!("no total in {reply}"))
}

#[test]
fn custom_roll_matches_direct_roll() {
    let reply = run("roll 2d8 - 1").unwrap();

    let value = Roll.arguments().unwrap().parse_str("2d8 - 1").unwrap().value;
    let roll = DiceRoll::from_value(branch(&value).unwrap().1).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let expected: RollOutcome = roll.roll(&mut rng).unwrap();

    assert_eq!(reply, expected.render());
    assert!(reply.starts_with("roll (2d8 - 1): `["), "{reply}");
    assert_eq!(total(&reply), expected.total());
}

#[test]
fn same_seed_same_rolls() {
    assert_eq!(run("roll 10d6 + 2").unwrap(), run("roll 10d6 + 2").unwrap());
}

#[test]
fn many_modifiers() {
    let reply = run("roll 1d4 + 10 - 3 + 1").unwrap();
    assert!(reply.starts_with("roll (1d4 + 10 - 3 + 1): "), "{reply}");
    let value = total(&reply);
    assert!((9..=12).contains(&value), "{value}");
}

#[test]
fn long_rolls_are_chunked() {
    let reply = run("roll 25d6").unwrap();
    assert!(reply.starts_with("roll (25d6):```[\n"), "{reply}");
    assert_eq!(reply.matches('\n').count(), 4);
}

#[test]
fn too_many_dice() {
    assert_eq!(
        run("roll 201d6").unwrap_err().to_string(),
        "That's a lot of dice. Are you trying to kill me?"
    );
    assert!(run("roll 200d1").is_ok());
}

#[test]
fn zero_dice_is_a_parse_error() {
    let err = run("roll 0d6").unwrap_err();
    assert!(err.as_parse_failure().is_some());
}

#[test]
fn trait_roll() {
    let (dispatcher, mut context) = fixture(3);
    let reply = dispatcher.dispatch("roll dave str", &mut context).unwrap();
    assert!(reply.starts_with("roll (1d20 + str): "), "{reply}");
    assert!(reply.contains(" + 1 = __"), "{reply}");
    let value = total(&reply);
    assert!((2..=21).contains(&value), "{value}");

    let reply = dispatcher.dispatch("roll dave fortitude", &mut context).unwrap();
    assert!(reply.contains(" - 1 = __"), "{reply}");
}

#[test]
fn trait_roll_on_moon() {
    let reply = run("roll dave prospit STR").unwrap();
    assert!(reply.contains(" + 2 = __"), "{reply}");
}

#[test]
fn trait_roll_errors() {
    assert_eq!(run("roll dave luck").unwrap_err().to_string(), "Unknown trait: luck");
    assert_eq!(
        run("roll dave agl").unwrap_err().to_string(),
        "The sheet has invalid modifier for agl: ????"
    );
}

#[test]
fn inline_rolls_are_quoted() {
    let reply = run("roll 3d6").unwrap();
    let listed = reply
        .strip_prefix("roll (3d6): `[")
        .and_then(|rest| rest.split_once("]` = __"))
        .map(|(listed, _)| listed)
        .unwrap_or_else(|| panic!("{reply}"));
    assert_eq!(listed.split(" + ").count(), 3);
}

#[test]
fn huge_dice_totals_are_refused() {
    assert_eq!(
        run("roll 200d999999999999999999").unwrap_err().to_string(),
        TOTAL_TOO_LARGE
    );

    let modifiers = " + 999999999999999999".repeat(10);
    let err = run(&format!("roll 1d6{modifiers}")).unwrap_err();
    assert_eq!(err.to_string(), TOTAL_TOO_LARGE);
}

#[test]
fn extreme_trait_modifiers() {
    let (dispatcher, mut context) = fixture(1);
    let agility = [("CHARACTER SHEET!E16".to_string(), i64::MAX.to_string())];
    context.sheets.batch_set("dave-doc", &agility).unwrap();
    let err = dispatcher.dispatch("roll dave agl", &mut context).unwrap_err();
    assert_eq!(err.to_string(), TOTAL_TOO_LARGE);

    let agility = [("CHARACTER SHEET!E16".to_string(), i64::MIN.to_string())];
    context.sheets.batch_set("dave-doc", &agility).unwrap();
    let reply = dispatcher.dispatch("roll dave agl", &mut context).unwrap();
    assert!(reply.contains(" - 9223372036854775808 = __"), "{reply}");
}
