//! Sequence, repetition, choice and transform tests.

use docbot_foundation::Value;
use docbot_grammar::{Choice, Repeat, Rule, Sequence};

fn digits() -> Rule {
    Rule::token(r"\d+").unwrap()
}

fn number() -> Rule {
    digits().map(|v| v.as_str().and_then(|s| s.parse::<i64>().ok()).into())
}

#[test]
fn hidden_member_is_dropped() {
    let rule = Sequence::new().with_hidden("x").with(digits()).build();
    assert_eq!(rule.parse_str("x42").unwrap().value, Value::from(vec!["42"]));
}

#[test]
fn named_binding() {
    let rule = Sequence::new()
        .with(Rule::literal("a"))
        .with(number())
        .build()
        .named(&["p", "q"])
        .unwrap();
    let value = rule.parse_str("a7").unwrap().value;
    assert_eq!(value.field("p"), Some(&Value::from("a")));
    assert_eq!(value.field("q"), Some(&Value::Int(7)));
}

#[test]
fn named_binding_construction_errors() {
    let pair = || Sequence::new().with("a").with("b").build();
    assert!(pair().named(&["p"]).is_err());
    assert!(pair().named(&["p", "p"]).is_err());
    assert!(Rule::literal("a").named(&["p"]).is_err());
    assert!(Sequence::new().with("a").with_hidden("b").build().named(&["p"]).is_ok());
}

#[test]
fn sequence_failure_expectation_lists_visible_members() {
    let rule = Sequence::new().with_hidden("x").with("y").with(digits()).build();
    assert_eq!(rule.expects(), "chain ['y', pattern \\d+]");
}

#[test]
fn repetition_below_minimum_fails_after_last_match() {
    let item = Sequence::new().with(digits()).with_hidden(";").build();
    let rule = Repeat::new(item).at_least(2).build();
    let failure = rule.parse_str("12;ab").unwrap_err();
    assert_eq!(failure.offset, 3);
    assert_eq!(failure.got, Some('a'));
}

#[test]
fn repetition_override_wins() {
    let rule = Repeat::new(digits()).at_least(1).build().expect_hint("numbers");
    let failure = rule.parse_str("x").unwrap_err();
    assert_eq!(failure.to_string(), "at 0 expected numbers got x");
}

#[test]
fn repetition_expectation_text() {
    let rule = Repeat::new(Rule::literal("a")).at_least(1).at_most(3).build();
    assert_eq!(rule.expects(), "at least 1 and at most 3 'a'");
    let hidden = Repeat::new(Rule::literal("a").hide()).build();
    assert_eq!(hidden.expects(), "");
}

#[test]
fn repetition_respects_maximum() {
    let rule = Repeat::new(Rule::literal("a")).at_most(2).build();
    let parsed = rule.parse_str("aaaa").unwrap();
    assert_eq!(parsed.value, Value::from(vec!["a", "a"]));
    assert_eq!(parsed.rest.remaining(), "aa");

    let none = Repeat::new(Rule::literal("a")).at_most(0).build();
    assert_eq!(none.parse_str("aaa").unwrap().rest.offset(), 0);
}

#[test]
fn zero_width_repetition_stops() {
    let rule = Repeat::new(Rule::spaces().map(|_| Value::from("gap"))).build();
    let parsed = rule.parse_str("abc").unwrap();
    assert_eq!(parsed.value, Value::from(vec!["gap"]));
    assert_eq!(parsed.rest.offset(), 0);
}

#[test]
fn choice_first_success_wins() {
    let rule = Choice::new().with("ab").with("a").build().unwrap();
    assert_eq!(rule.parse_str("abc").unwrap().value, Value::from("ab"));
    assert_eq!(rule.parse_str("ac").unwrap().value, Value::from("a"));
}

#[test]
fn choice_failure_reports_original_cursor() {
    let rule = Choice::new()
        .with(Sequence::new().with("roll").with(digits()).build())
        .with("help")
        .with_hidden("halp")
        .build()
        .unwrap();
    let failure = rule.parse_str("rollx").unwrap_err();
    assert_eq!(failure.offset, 0);
    assert_eq!(failure.expected, "one of (chain ['roll', pattern \\d+] | 'help')");
}

#[test]
fn empty_choice_is_grammar_error() {
    assert!(Choice::new().build().is_err());
}

#[test]
fn optional_value() {
    let rule = Sequence::new()
        .with(Rule::literal("-").opt())
        .with(number())
        .build()
        .named(&["sign", "n"])
        .unwrap();
    assert_eq!(rule.parse_str("5").unwrap().value.field("sign"), Some(&Value::Nil));
    assert_eq!(rule.parse_str("-5").unwrap().value.field("sign"), Some(&Value::from("-")));
}

#[test]
fn branch_tags_alternatives() {
    let rule = Choice::new()
        .with(number().branch("number"))
        .with(Rule::token("[a-z]+").unwrap().branch("word"))
        .build()
        .unwrap();
    assert_eq!(
        rule.parse_str("12").unwrap().value.as_branch(),
        Some(("number", &Value::Int(12)))
    );
    assert_eq!(
        rule.parse_str("ab").unwrap().value.as_branch(),
        Some(("word", &Value::from("ab")))
    );
}

#[test]
fn transform_does_not_change_failure() {
    let plain = digits();
    let mapped = digits().map(|_| Value::Nil);
    assert_eq!(plain.parse_str("x").unwrap_err(), mapped.parse_str("x").unwrap_err());
}

#[test]
fn dice_grammar_round_trip() {
    let modifier = Sequence::new()
        .interleave_spaces()
        .with(Choice::new().with("+").with("-").build().unwrap())
        .with(number())
        .build()
        .named(&["op", "mod"])
        .unwrap();
    let dice = Sequence::new()
        .with(number())
        .with_hidden("d")
        .with(number())
        .with_spaces()
        .with(Repeat::new(modifier))
        .build()
        .named(&["num", "size", "mods"])
        .unwrap();

    let value = dice.parse_str("2d8 - 1").unwrap().value;
    assert_eq!(value.field("num"), Some(&Value::Int(2)));
    assert_eq!(value.field("size"), Some(&Value::Int(8)));
    let first = value.field("mods").and_then(|m| m.index(0)).unwrap();
    assert_eq!(first.field("op"), Some(&Value::from("-")));
    assert_eq!(first.field("mod"), Some(&Value::Int(1)));

    let rendered = format!(
        "{}d{}{}",
        value.field("num").unwrap(),
        value.field("size").unwrap(),
        value
            .field("mods")
            .and_then(Value::as_list)
            .map(|mods| mods
                .iter()
                .map(|m| format!(" {} {}", m.field("op").unwrap(), m.field("mod").unwrap()))
                .collect::<String>())
            .unwrap_or_default()
    );
    assert_eq!(rendered, "2d8 - 1");
}
