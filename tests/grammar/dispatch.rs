//! Dispatcher tests with a toy command table.

use docbot_foundation::{Error, ErrorKind, Value};
use docbot_grammar::{Dispatcher, Rule, Sequence, prefix_words};

#[derive(Default)]
struct Tally {
    total: i64,
    calls: Vec<&'static str>,
}

fn amount() -> Rule {
    Sequence::new()
        .interleave_spaces()
        .with(
            Rule::token("[0-9]+")
                .unwrap()
                .map(|v| v.as_str().and_then(|s| s.parse::<i64>().ok()).into())
                .expect_hint("an amount"),
        )
        .build()
        .named(&["amount"])
        .unwrap()
}

fn dispatcher() -> Dispatcher<Tally> {
    Dispatcher::new()
        .with_address(Rule::token(r"<@\d+>\s*").unwrap())
        .bind("add all", prefix_words(&["add", "all"]), amount(), |args, tally: &mut Tally| {
            tally.calls.push("add all");
            tally.total += 100 * args.field("amount").and_then(Value::as_int).unwrap_or(0);
            Ok(tally.total.to_string())
        })
        .bind("add", prefix_words(&["add"]), amount(), |args, tally: &mut Tally| {
            tally.calls.push("add");
            tally.total += args.field("amount").and_then(Value::as_int).unwrap_or(0);
            Ok(tally.total.to_string())
        })
        .bind(
            "reset",
            prefix_words(&["reset"]),
            Sequence::new().interleave_spaces().build(),
            |_, tally: &mut Tally| {
                if tally.total == 0 {
                    return Err(Error::domain("nothing to reset"));
                }
                tally.calls.push("reset");
                tally.total = 0;
                Ok("reset".to_string())
            },
        )
}

#[test]
fn first_matching_prefix_wins() {
    let dispatcher = dispatcher();
    let mut tally = Tally::default();
    assert_eq!(dispatcher.dispatch("add all 2", &mut tally).unwrap(), "200");
    assert_eq!(dispatcher.dispatch("add 3", &mut tally).unwrap(), "203");
    assert_eq!(tally.calls, vec!["add all", "add"]);
}

#[test]
fn argument_failure_stops_dispatch() {
    let dispatcher = dispatcher();
    let mut tally = Tally::default();
    // "add all" matches its prefix, so "add" is never tried.
    let err = dispatcher.dispatch("add all x", &mut tally).unwrap_err();
    assert_eq!(err.to_string(), "at 8 expected an amount got x");
    let context = err.context.unwrap();
    assert_eq!(context.command.as_deref(), Some("add all"));
    assert_eq!(context.input.as_deref(), Some("add all x"));
    assert!(tally.calls.is_empty());
}

#[test]
fn leftover_input_expects_end() {
    let dispatcher = dispatcher();
    let err = dispatcher.dispatch("add 1 2", &mut Tally::default()).unwrap_err();
    assert_eq!(err.to_string(), "at 6 expected end of input got 2");
}

#[test]
fn trailing_whitespace_is_fine() {
    let dispatcher = dispatcher();
    assert_eq!(dispatcher.dispatch("add 1 \n", &mut Tally::default()).unwrap(), "1");
}

#[test]
fn unknown_command() {
    let err = dispatcher().dispatch("multiply 2", &mut Tally::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCommand));
    assert_eq!(err.to_string(), "Unknown command");
}

#[test]
fn address_is_optional_and_offsets_count_it() {
    let dispatcher = dispatcher();
    let mut tally = Tally::default();
    assert_eq!(dispatcher.dispatch("<@42> add 5", &mut tally).unwrap(), "5");
    let err = dispatcher.dispatch("<@42> add five", &mut tally).unwrap_err();
    assert_eq!(err.as_parse_failure().map(|f| f.offset), Some(10));
}

#[test]
fn handler_errors_pass_through() {
    let err = dispatcher().dispatch("reset", &mut Tally::default()).unwrap_err();
    assert!(err.is_domain());
    assert_eq!(err.to_string(), "nothing to reset");
    assert!(err.context.is_none());
}

#[test]
fn resolve_without_running() {
    let dispatcher = dispatcher();
    let matched = dispatcher.resolve("add 9").unwrap();
    assert_eq!(matched.binding.name(), "add");
    assert_eq!(matched.arguments.field("amount"), Some(&Value::Int(9)));
    assert_eq!(dispatcher.len(), 3);
}
