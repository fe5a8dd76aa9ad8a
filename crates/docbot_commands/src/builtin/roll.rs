use docbot_foundation::{Error, Result, Value};
use docbot_grammar::{Choice, Repeat, Rule, Sequence};
use tracing::debug;

use crate::command::Command;
use crate::context::Context;
use crate::dice::{DiceRoll, TOTAL_TOO_LARGE, decorate_d20};
use crate::grammar::{branch, moon, moon_of, name, positive_integer, text};
use crate::layout::CHARACTER_SHEET;

/// `roll <NAME> [moon] <TRAIT>` or `roll <NUM>d<SIZE> {+|- <MOD>}`
#[derive(Debug, Clone, Copy)]
pub struct Roll;

impl Command for Roll {
    fn name(&self) -> &'static str {
        "roll"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["roll"]
    }

    fn arguments(&self) -> Result<Rule> {
        let by_trait = Sequence::new()
            .interleave_spaces()
            .with(name()?)
            .with(moon()?)
            .with(Rule::token(r"\w+")?.expect_hint("a trait"))
            .build()
            .named(&["name", "moon", "trait"])?
            .branch("trait");

        let modifier = Sequence::new()
            .interleave_spaces()
            .with(
                Choice::new()
                    .with("+")
                    .with("-")
                    .build()?
                    .expect_hint("an operation (+|-)"),
            )
            .with(positive_integer()?.expect_hint("an integer (dice modifier)"))
            .build()
            .named(&["op", "mod"])?;
        let custom = Sequence::new()
            .with_spaces()
            .with(positive_integer()?)
            .with_hidden("d")
            .with(positive_integer()?)
            .with_spaces()
            .with(Repeat::new(modifier))
            .build()
            .named(&["num", "size", "mods"])?
            .branch("custom");

        Ok(Choice::new()
            .with(by_trait)
            .with(custom)
            .build()?
            .expect_hint("roll description"))
    }

    fn execute(&self, args: &Value, context: &mut Context) -> Result<String> {
        let (kind, request) = branch(args)?;
        match kind {
            "trait" => roll_trait(context, request),
            _ => {
                let roll = DiceRoll::from_value(request)?;
                debug!(%roll, "rolling dice");
                Ok(roll.roll(&mut context.rng)?.render())
            }
        }
    }

    fn help(&self) -> &'static str {
        "roll <NUM>d<SIZE> {+|- <MODIFIER>}:
    rolls dice
    example:
        roll 1d20
        roll 10d4 + 5 - 1
        roll 2d8 - 1

roll <NAME> [prospit|derse] <TRAIT>:
    rolls 1d20 using specified trait as a modifier
    example:
        roll Name str"
    }
}

fn roll_trait(context: &mut Context, request: &Value) -> Result<String> {
    let name = text(request, "name")?;
    let trait_name = text(request, "trait")?;
    let subsheet = moon_of(request).unwrap_or(CHARACTER_SHEET);

    let cell = context.sheet(name)?.trait_modifier(subsheet, trait_name)?;
    let modifier: i64 = cell.trim().parse().map_err(|_| {
        Error::domain(format!(
            "The sheet has invalid modifier for {trait_name}: {cell}"
        ))
    })?;

    let outcome = DiceRoll::new(1, 20).roll(&mut context.rng)?;
    let result = outcome.rolls.first().copied().unwrap_or_default();
    let total = result
        .checked_add(modifier)
        .ok_or_else(|| Error::domain(TOTAL_TOO_LARGE))?;
    let sign = if modifier < 0 { '-' } else { '+' };
    Ok(format!(
        "roll (1d20 + {trait_name}): {} {sign} {} = __{total}__",
        decorate_d20(result),
        modifier.unsigned_abs(),
    ))
}
