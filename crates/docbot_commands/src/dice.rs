//! Dice rolls.
//!
//! A [`DiceRoll`] is built from the value produced by the `roll` grammar
//! and renders back to the notation it was written in, e.g. `2d8 - 1`.

use std::fmt;

use docbot_foundation::{Error, Result, Value};
use rand::Rng;

use crate::grammar::{int, text};

/// Most dice a single roll may throw.
pub const MAX_DICE: i64 = 200;

/// Reply when a total does not fit in an `i64`.
pub const TOTAL_TOO_LARGE: &str = "That total is too large to add up.";

/// Rolls rendered inline before switching to a block of rows.
const INLINE_LIMIT: usize = 10;

/// Sign of a modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plus => "+",
            Self::Minus => "-",
        })
    }
}

/// A constant added to or subtracted from a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modifier {
    /// Whether the amount is added or subtracted.
    pub sign: Sign,
    /// Magnitude of the modifier.
    pub amount: i64,
}

impl Modifier {
    /// The signed amount.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self.sign {
            Sign::Plus => self.amount,
            Sign::Minus => -self.amount,
        }
    }
}

/// `<num>d<size>` followed by any number of modifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    /// Number of dice.
    pub num: i64,
    /// Faces per die.
    pub size: i64,
    /// Modifiers in the order written.
    pub mods: Vec<Modifier>,
}

impl DiceRoll {
    /// Creates a roll with no modifiers.
    #[must_use]
    pub const fn new(num: i64, size: i64) -> Self {
        Self {
            num,
            size,
            mods: Vec::new(),
        }
    }

    /// Adds a modifier.
    #[must_use]
    pub fn with_modifier(mut self, sign: Sign, amount: i64) -> Self {
        self.mods.push(Modifier { sign, amount });
        self
    }

    /// Reads a `{num, size, mods: [{op, mod}]}` record.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the record does not have that shape.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mods = value
            .field("mods")
            .and_then(Value::as_list)
            .map(|list| {
                list.iter()
                    .map(|m| {
                        let sign = if text(m, "op")? == "-" {
                            Sign::Minus
                        } else {
                            Sign::Plus
                        };
                        Ok(Modifier {
                            sign,
                            amount: int(m, "mod")?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            num: int(value, "num")?,
            size: int(value, "size")?,
            mods,
        })
    }

    /// Sum of all modifiers, or `None` if it overflows.
    #[must_use]
    pub fn modifier_total(&self) -> Option<i64> {
        self.mods
            .iter()
            .try_fold(0_i64, |sum, m| sum.checked_add(m.value()))
    }

    fn modifier_text(&self) -> String {
        self.mods
            .iter()
            .map(|m| format!(" {} {}", m.sign, m.amount))
            .collect()
    }

    /// Throws the dice.
    ///
    /// # Errors
    ///
    /// Returns a domain error for more than [`MAX_DICE`] dice, for a die
    /// with fewer than one face, or when the total overflows.
    pub fn roll(&self, rng: &mut impl Rng) -> Result<RollOutcome> {
        if self.num > MAX_DICE {
            return Err(Error::domain(
                "That's a lot of dice. Are you trying to kill me?",
            ));
        }
        if self.size < 1 {
            return Err(Error::domain(format!("A die needs at least one face, got {}", self.size)));
        }
        let rolls = (0..self.num).map(|_| rng.gen_range(1..=self.size)).collect();
        RollOutcome::new(self.clone(), rolls)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}{}", self.num, self.size, self.modifier_text())
    }
}

/// Bolds natural 1s and 20s.
#[must_use]
pub fn decorate_d20(roll: i64) -> String {
    if roll == 1 || roll == 20 {
        format!("**{roll}**")
    } else {
        roll.to_string()
    }
}

/// The dice thrown for a [`DiceRoll`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    /// What was rolled.
    pub roll: DiceRoll,
    /// Each die's result.
    pub rolls: Vec<i64>,
    total: i64,
}

impl RollOutcome {
    /// Pairs a roll with the dice thrown for it.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the dice plus modifiers overflow an `i64`.
    pub fn new(roll: DiceRoll, rolls: Vec<i64>) -> Result<Self> {
        let total = rolls
            .iter()
            .try_fold(0_i64, |sum, r| sum.checked_add(*r))
            .zip(roll.modifier_total())
            .and_then(|(dice, mods)| dice.checked_add(mods))
            .ok_or_else(|| Error::domain(TOTAL_TOO_LARGE))?;
        Ok(Self { roll, rolls, total })
    }

    /// Sum of the dice plus modifiers.
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.total
    }

    /// Renders the outcome as a chat reply.
    ///
    /// A single die is shown bare (bolded on a natural 1 or 20 of a d20),
    /// up to ten dice inline, and more as rows of ten.
    #[must_use]
    pub fn render(&self) -> String {
        let mods = self.roll.modifier_text();
        let total = self.total();
        match self.rolls.as_slice() {
            [single] => {
                let shown = if self.roll.size == 20 {
                    decorate_d20(*single)
                } else {
                    single.to_string()
                };
                format!("roll ({}): {shown}{mods} = __{total}__", self.roll)
            }
            rolls if rolls.len() <= INLINE_LIMIT => {
                let listed = rolls
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" + ");
                format!("roll ({}): `[{listed}]`{mods} = __{total}__", self.roll)
            }
            rolls => {
                let width = rolls
                    .iter()
                    .map(|r| r.to_string().len())
                    .max()
                    .unwrap_or(0);
                let rows = rolls
                    .chunks(INLINE_LIMIT)
                    .map(|chunk| {
                        let cells = chunk
                            .iter()
                            .map(|r| format!("{r:<width$}"))
                            .collect::<Vec<_>>()
                            .join(" + ");
                        format!("    {cells}")
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "roll ({}):```[\n{rows}\n]```{mods} = __{total}__",
                    self.roll
                )
            }
        }
    }
}
