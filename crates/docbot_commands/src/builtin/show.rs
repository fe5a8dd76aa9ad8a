use docbot_foundation::{Error, ErrorKind, Result, Value};
use docbot_grammar::{Choice, Repeat, Rule, Sequence};

use crate::command::Command;
use crate::context::Context;
use crate::grammar::{branch, moon, moon_of, name, text};
use crate::layout::CHARACTER_SHEET;

/// Gap between the two grist columns.
const COLUMN_GAP: usize = 5;

/// `show <NAME> grist | [moon] traits | [moon] {<STAT>}`
#[derive(Debug, Clone, Copy)]
pub struct Show;

impl Command for Show {
    fn name(&self) -> &'static str {
        "show"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["show"]
    }

    fn arguments(&self) -> Result<Rule> {
        let stat = Sequence::new()
            .with_spaces()
            .with(Rule::token(r"\w+")?)
            .build()
            .pluck(0);
        let stats = Repeat::new(stat)
            .at_least(1)
            .build()
            .expect_hint("a space-separated list of stats");

        let traits = Sequence::new()
            .interleave_spaces()
            .with(moon()?)
            .with_hidden("traits")
            .build()
            .named(&["moon"])?
            .branch("traits");
        let other = Sequence::new()
            .interleave_spaces()
            .with(moon()?)
            .with(stats)
            .build()
            .named(&["moon", "stats"])?
            .branch("stats");

        Sequence::new()
            .interleave_spaces()
            .with(name()?)
            .with(
                Choice::new()
                    .with(Rule::literal("grist").branch("grist"))
                    .with(traits)
                    .with(other)
                    .build()?,
            )
            .build()
            .named(&["name", "args"])
    }

    fn execute(&self, args: &Value, context: &mut Context) -> Result<String> {
        let name = text(args, "name")?;
        let (kind, request) = branch(args.field("args").unwrap_or(&Value::Nil))?;
        match kind {
            "grist" => show_grist(context, name),
            "traits" => show_traits(context, name, moon_of(request)),
            _ => show_stats(context, name, moon_of(request), request),
        }
    }

    fn help(&self) -> &'static str {
        "show <NAME> grist
show <NAME> [prospit|derse] traits
show <NAME> [prospit|derse] {<STAT>}:
    show specified stats
    the list is space-separated
    example:
        show Name vitality luck"
    }
}

fn title(moon: Option<&str>, name: &str) -> String {
    moon.map_or_else(|| name.to_string(), |moon| format!("{moon} {name}"))
}

fn show_grist(context: &mut Context, name: &str) -> Result<String> {
    let grist = context.sheet(name)?.grist(&[])?;
    let (left, right) = grist.split_at(grist.len().div_ceil(2));
    let left = pad_pairs(left);
    let right = pad_pairs(right);

    let width = left.iter().map(String::len).max().unwrap_or(0);
    let rows = left
        .iter()
        .zip(right.iter().map(String::as_str).chain(std::iter::repeat("")))
        .map(|(l, r)| format!("{l:<width$}{}{r}", " ".repeat(COLUMN_GAP)).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("\n{name} grist:\n```{rows}```"))
}

/// Renders `type: value` lines with values aligned.
fn pad_pairs(pairs: &[(String, String)]) -> Vec<String> {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<w$}{v}", format!("{k}:"), w = width + 2))
        .collect()
}

fn show_traits(context: &mut Context, name: &str, moon: Option<&str>) -> Result<String> {
    let subsheet = moon.unwrap_or(CHARACTER_SHEET);
    let traits = context.sheet(name)?.traits(subsheet)?;
    let lines = traits
        .iter()
        .map(|t| format!("{}: {} ({})", t.name, t.rating, t.modifier))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("\n{} traits:\n```{lines}```", title(moon, name)))
}

fn show_stats(context: &mut Context, name: &str, moon: Option<&str>, request: &Value) -> Result<String> {
    let subsheet = moon.unwrap_or(CHARACTER_SHEET);
    let stats: Vec<&str> = request
        .field("stats")
        .and_then(Value::as_list)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .ok_or_else(|| Error::new(ErrorKind::Internal("malformed arguments: stats".to_string())))?;
    let data = context.sheet(name)?.data(subsheet, &stats)?;
    let lines = data
        .iter()
        .map(|(stat, value)| format!("{stat}: {value}"))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("\n{}:\n```{lines}```", title(moon, name)))
}
