use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::dispatch::{DamageRoll, DamageRoller, PartRoll, RollRequest};
use crate::item::Item;

/// Deterministic dice source.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn die(&mut self, sides: u32) -> u32 {
        self.rng.gen_range(1..=sides.max(1))
    }
}

/// Seeded stand-in for the host's damage computation.
///
/// Understands formulas of the shape `NdX + NdX + M`; a `[type]` tag on a
/// term is ignored for evaluation. Unparseable terms contribute zero rather
/// than failing, since the formulas come from user-entered item data.
pub struct DemoRoller {
    dice: Dice,
}

impl DemoRoller {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            dice: Dice::from_seed(seed),
        }
    }

    fn eval(&mut self, formula: &str, critical: bool) -> i32 {
        let mut total = 0i32;
        for term in strip_tags(formula).split('+') {
            let term = term.trim();
            if term.is_empty() {
                continue;
            }
            if let Some((count, sides)) = term.split_once('d') {
                let count: u32 = count.trim().parse().unwrap_or(0);
                let sides: u32 = sides.trim().parse().unwrap_or(0);
                if count == 0 || sides == 0 {
                    continue;
                }
                // crit doubles the dice, not the flat modifiers
                let count = if critical { count * 2 } else { count };
                for _ in 0..count {
                    total += self.dice.die(sides) as i32;
                }
            } else {
                total += term.parse::<i32>().unwrap_or(0);
            }
        }
        total
    }
}

impl DamageRoller for DemoRoller {
    fn roll_damage(&mut self, item: &Item, request: &RollRequest) -> Option<DamageRoll> {
        let mut parts = item.valid_parts();

        // The versatile variant swaps the first formula for the item's
        // versatile profile, the way the host's damage roll does.
        if request.versatile
            && let Some(versatile) = item.damage.versatile.as_deref()
            && let Some(first) = parts.first_mut()
        {
            first.0 = versatile.to_string();
        }

        let mut rolls: Vec<PartRoll> = parts
            .iter()
            .map(|part| PartRoll {
                formula: part.formula().to_string(),
                damage_type: part.damage_type().map(str::to_string),
                total: self.eval(part.formula(), request.critical),
            })
            .collect();

        for extra in &request.extra_parts {
            rolls.push(PartRoll {
                formula: extra.clone(),
                damage_type: parse_tag(extra),
                total: self.eval(extra, request.critical),
            });
        }

        let total = rolls.iter().map(|roll| roll.total).sum();
        Some(DamageRoll {
            title: request.title.clone(),
            flavor: request.flavor.clone(),
            rolls,
            total,
        })
    }
}

fn strip_tags(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len());
    let mut depth = 0usize;
    for c in formula.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

fn parse_tag(formula: &str) -> Option<String> {
    let start = formula.find('[')?;
    let end = formula[start..].find(']')? + start;
    Some(formula[start + 1..end].to_string())
}
