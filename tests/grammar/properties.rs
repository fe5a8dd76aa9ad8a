//! Property tests for the grammar engine.

use docbot_foundation::Value;
use docbot_grammar::{Choice, Cursor, Repeat, Rule, Sequence};
use proptest::prelude::*;

proptest! {
    #[test]
    fn literal_consumes_exactly_its_word(word in "[a-z]{1,10}", tail in "[ a-z0-9]{0,10}") {
        let input = format!("{word}{tail}");
        let parsed = Rule::literal(word.as_str()).parse_str(&input).unwrap();
        prop_assert_eq!(parsed.rest.offset(), word.len());
        prop_assert_eq!(parsed.rest.remaining(), tail.as_str());
        prop_assert_eq!(parsed.value, Value::from(word.as_str()));
    }

    #[test]
    fn literal_offset_follows_cursor(skip in 0usize..8, word in "[a-z]{1,6}") {
        let input = format!("{}{word}", " ".repeat(skip));
        let cursor = Cursor::new(&input).advance(skip);
        let parsed = Rule::literal(word.as_str()).parse(cursor).unwrap();
        prop_assert_eq!(parsed.rest.offset(), skip + word.len());
    }

    #[test]
    fn single_match_below_minimum_fails_after_it(n in 1u32..100_000, tail in "[a-z ]{0,6}") {
        let input = format!("{n}{tail}");
        let rule = Repeat::new(Rule::token("[0-9]+").unwrap()).at_least(2).build();
        let failure = rule.parse_str(&input).unwrap_err();
        prop_assert_eq!(failure.offset, n.to_string().len());
    }

    #[test]
    fn zero_width_repetition_terminates(input in "[a-z ]{0,20}") {
        let rule = Repeat::new(Rule::spaces().map(|_| Value::Nil)).build();
        let parsed = rule.parse_str(&input).unwrap();
        let len = parsed.value.as_list().map_or(0, |l| l.len());
        prop_assert!(len <= 2);
        prop_assert!(parsed.rest.remaining().trim_start() == parsed.rest.remaining());
    }

    #[test]
    fn failed_candidates_leave_no_trace(word in "[a-z]{1,8}") {
        // Candidates that consume part of the input before failing.
        let rule = Choice::new()
            .with(Sequence::new().with(Rule::token("[a-z]").unwrap()).with("!").build())
            .with(Sequence::new().with(Rule::token("[a-z]+").unwrap()).with("?").build())
            .with(Rule::token("[a-z]+").unwrap())
            .build()
            .unwrap();
        let parsed = rule.parse_str(&word).unwrap();
        prop_assert_eq!(parsed.value, Value::from(word.as_str()));
        prop_assert_eq!(parsed.rest.offset(), word.len());

        // Re-running gives the same answer: nothing was left behind.
        let again = rule.parse_str(&word).unwrap();
        prop_assert_eq!(again.rest.offset(), word.len());
    }

    #[test]
    fn total_choice_failure_is_at_start(prefix in "[a-z]{0,4}", digit in "[0-9]") {
        let input = format!("{prefix}{digit}");
        let rule = Choice::new()
            .with(Sequence::new().with(Rule::token("[a-z]*").unwrap()).with("!").build())
            .with("?")
            .build()
            .unwrap();
        let failure = rule.parse_str(&input).unwrap_err();
        prop_assert_eq!(failure.offset, 0);
    }

    #[test]
    fn hidden_prefix_then_digits(n in 0u64..1_000_000) {
        let input = format!("x{n}");
        let rule = Sequence::new().with_hidden("x").with(Rule::token(r"\d+").unwrap()).build();
        let value = rule.parse_str(&input).unwrap().value;
        prop_assert_eq!(value, Value::from(vec![n.to_string()]));
    }

    #[test]
    fn named_pair(a in "[a-z]{1,5}", b in "[0-9]{1,5}") {
        let rule = Sequence::new()
            .with(Rule::token("[a-z]+").unwrap())
            .with(Rule::token("[0-9]+").unwrap())
            .build()
            .named(&["p", "q"])
            .unwrap();
        let value = rule.parse_str(&format!("{a}{b}")).unwrap().value;
        prop_assert_eq!(value.field("p"), Some(&Value::from(a.as_str())));
        prop_assert_eq!(value.field("q"), Some(&Value::from(b.as_str())));
    }
}
