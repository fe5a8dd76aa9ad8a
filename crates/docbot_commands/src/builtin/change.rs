use std::collections::HashSet;

use docbot_foundation::{Error, Result, Value};
use docbot_grammar::{Choice, Repeat, Rule, Sequence};
use tracing::info;

use crate::command::Command;
use crate::context::Context;
use crate::grammar::{branch, int, integer, moon, moon_of, name, operation, synonyms, text};
use crate::layout::CHARACTER_SHEET;

/// `change <NAME> vitality | experience | grist ...`
#[derive(Debug, Clone, Copy)]
pub struct Change;

/// An `add`/`sub`/`set` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Sub,
    Set,
}

impl Operation {
    fn parse(op: &str) -> Result<Self> {
        match op {
            "add" => Ok(Self::Add),
            "sub" => Ok(Self::Sub),
            "set" => Ok(Self::Set),
            other => Err(Error::domain(format!("Unknown operation: {other}"))),
        }
    }

    const fn apply(self, current: i64, amount: i64) -> i64 {
        match self {
            Self::Add => current.saturating_add(amount),
            Self::Sub => current.saturating_sub(amount),
            Self::Set => amount,
        }
    }
}

/// Reads a sheet cell as a number; anything else counts as zero.
fn numeric(cell: &str) -> i64 {
    cell.trim().parse().unwrap_or(0)
}

fn grist_item() -> Result<Rule> {
    let grist_type = Rule::token(r"\w+")?
        .map(|value| value.as_str().map_or(Value::Nil, |s| Value::from(s.to_lowercase())))
        .expect_hint("grist type");
    // Separator whitespace must not swallow the newline it is looking for.
    let separator = Rule::pattern(r"[ \t\r]*(?:;|\n|\z)")?
        .expect_hint("a separator (a semicolon or a new line)");

    Sequence::new()
        .with_spaces()
        .with(grist_type)
        .with_spaces()
        .with(operation()?)
        .with_spaces()
        .with(integer()?.expect_hint("an integer"))
        .with_hidden(separator)
        .with_spaces()
        .build()
        .named(&["type", "op", "amount"])
}

impl Command for Change {
    fn name(&self) -> &'static str {
        "change"
    }

    fn prefix(&self) -> &'static [&'static str] {
        &["change"]
    }

    fn arguments(&self) -> Result<Rule> {
        let vitality = Sequence::new()
            .interleave_spaces()
            .with(moon()?)
            .with_hidden(synonyms(&["hp", "health", "vitality"])?)
            .with(operation()?)
            .with(
                Choice::new()
                    .with(integer()?)
                    .with("max")
                    .build()?
                    .expect_hint("an integer or 'max'"),
            )
            .build()
            .named(&["moon", "op", "amount"])?
            .branch("hp")
            .expect_hint("vitality change");

        let experience = Sequence::new()
            .interleave_spaces()
            .with_hidden(synonyms(&["xp", "experience", "exp"])?)
            .with(operation()?)
            .with(integer()?.expect_hint("an integer"))
            .build()
            .named(&["op", "amount"])?
            .branch("xp")
            .expect_hint("experience change");

        let grist = Sequence::new()
            .interleave_spaces()
            .with_hidden(synonyms(&["grist"])?)
            .with(Repeat::new(grist_item()?).at_least(1))
            .build()
            .pluck(0)
            .branch("grist")
            .expect_hint("grist change");

        Sequence::new()
            .interleave_spaces()
            .with(name()?)
            .with(
                Choice::new()
                    .with(vitality)
                    .with(experience)
                    .with(grist)
                    .build()?,
            )
            .build()
            .named(&["name", "args"])
    }

    fn execute(&self, args: &Value, context: &mut Context) -> Result<String> {
        let name = text(args, "name")?;
        let (kind, request) = branch(args.field("args").unwrap_or(&Value::Nil))?;
        match kind {
            "hp" => change_vitality(context, name, request),
            "xp" => change_experience(context, name, request),
            _ => change_grist(context, name, request),
        }
    }

    fn help(&self) -> &'static str {
        "change <NAME> grist {<GRIST-TYPE> <OPERATION> <AMOUNT>;}
    change grist values
    allowed operations: add, sub, set
    the list is separated either by semicolons or by newlines
    example:
        change Name grist build add 5; shale sub 5; artifact set 5
        OR
        change Name grist
        build add 5
        shale sub 5
        artifact set 5

change <NAME> experience|xp|exp <OPERATION> <AMOUNT>:
    pretty much the same as above but for xp
    allowed operations: add, sub, set

change <NAME> [prospit|derse] vitality|hp|health <OPERATION> <AMOUNT>|max:
    change health"
    }
}

/// Outcome of [`change_value`].
struct ValueChange {
    old: String,
    new: i64,
    clamped: bool,
}

/// Applies `op` to one field, clamping the result into `[min, max]`.
fn change_value(
    context: &mut Context,
    name: &str,
    subsheet: &str,
    field: &str,
    op: Operation,
    amount: i64,
    bounds: (Option<i64>, Option<i64>),
) -> Result<ValueChange> {
    let mut sheet = context.sheet(name)?;
    let current = sheet.data(subsheet, &[field])?;
    let current = current.first().map_or(0, |(_, v)| numeric(v));

    let mut new = op.apply(current, amount);
    let mut clamped = false;
    if let Some(max) = bounds.1.filter(|max| new > *max) {
        new = max;
        clamped = true;
    }
    if let Some(min) = bounds.0.filter(|min| new < *min) {
        new = min;
        clamped = true;
    }

    let change = sheet.set_data(subsheet, &[(field, new.to_string())])?;
    info!(name, field, old = %current, new, "sheet value changed");
    Ok(ValueChange {
        old: change.into_iter().next().map(|c| c.old).unwrap_or_default(),
        new,
        clamped,
    })
}

fn change_vitality(context: &mut Context, name: &str, request: &Value) -> Result<String> {
    let subsheet = moon_of(request).unwrap_or(CHARACTER_SHEET).to_string();
    let viscosity = context.sheet(name)?.data(&subsheet, &["viscosity"])?;
    let viscosity = viscosity.first().map(|(_, v)| v.as_str()).unwrap_or_default();
    let maximum: i64 = viscosity.trim().parse().map_err(|_| {
        Error::domain(format!(
            "The sheet has invalid *gel viscosity* value: {viscosity}"
        ))
    })?;

    let op = Operation::parse(text(request, "op")?)?;
    let amount = match request.field("amount") {
        Some(Value::Int(n)) => *n,
        _ => maximum,
    };

    let change = change_value(
        context,
        name,
        &subsheet,
        "vitality",
        op,
        amount,
        (None, Some(maximum)),
    )?;
    let mut reply = format!(
        "Vitality changes for {name}: was {}, became {}",
        change.old, change.new
    );
    if change.clamped {
        reply.push_str(&format!(
            "\nTried to make vitality higher than maximum value. Value set to {maximum}"
        ));
    }
    if change.new < 0 {
        reply.push_str("\nYour vitality is below zero. Good luck.");
    }
    Ok(reply)
}

fn change_experience(context: &mut Context, name: &str, request: &Value) -> Result<String> {
    let op = Operation::parse(text(request, "op")?)?;
    let amount = int(request, "amount")?;
    let change = change_value(context, name, CHARACTER_SHEET, "xp", op, amount, (Some(0), None))?;

    let mut reply = format!(
        "Xp changes for {name}: was {}, became {}",
        change.old, change.new
    );
    if change.clamped {
        reply.push_str("\nTried to subtract more xp than you have. Value set to 0");
    }
    Ok(reply)
}

struct GristChange<'v> {
    grist: &'v str,
    op: Operation,
    amount: i64,
}

fn change_grist(context: &mut Context, name: &str, request: &Value) -> Result<String> {
    let changes = request
        .as_list()
        .map(|list| {
            list.iter()
                .map(|item| {
                    Ok(GristChange {
                        grist: text(item, "type")?,
                        op: Operation::parse(text(item, "op")?)?,
                        amount: int(item, "amount")?,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let mut seen = HashSet::new();
    if !changes.iter().all(|c| seen.insert(c.grist)) {
        return Err(Error::domain("You can only change each grist type once"));
    }

    let mut sheet = context.sheet(name)?;
    let types: Vec<&str> = changes.iter().map(|c| c.grist).collect();
    let current = sheet.grist(&types)?;

    let overdrawn: Vec<String> = changes
        .iter()
        .zip(&current)
        .filter(|(c, (_, held))| c.op == Operation::Sub && c.amount > numeric(held))
        .map(|(c, (_, held))| format!("{}: current {held}, tried to subtract {}", c.grist, c.amount))
        .collect();
    if !overdrawn.is_empty() {
        return Err(Error::domain(format!(
            "Tried to subtract more grist than you have:\n```{}```",
            overdrawn.join("\n")
        )));
    }

    let updates: Vec<(String, i64)> = changes
        .iter()
        .zip(&current)
        .map(|(c, (_, held))| (c.grist.to_string(), c.op.apply(numeric(held), c.amount)))
        .collect();
    let written = sheet.set_grist(&updates)?;
    info!(name, count = written.len(), "grist changed");

    let lines = written
        .iter()
        .map(|c| format!("{}: was {} became {}", c.field, c.old, c.new))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("Grist changes for {name}:\n```{lines}```"))
}
