use crate::buttons::damage_buttons;
use crate::item::{Actor, Item, ItemType};
use crate::system::{I18n, SystemConfig};

/// Which roll a blade-cantrip control asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CantripAction {
    Attack,
    Damage,
}

/// What the weapon-picker flow should do for one blade-cantrip click.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerOutcome<'a> {
    /// Nothing to pick from; the user gets a localized warning.
    NoWeapons { warning: String },
    /// Several candidates, or one that still needs a group/versatile choice.
    Choose(Vec<&'a Item>),
    /// One weapon, attack requested.
    Attack(&'a Item),
    /// One weapon with a single profile: roll its damage directly, with the
    /// scaled cantrip formula appended.
    RollDamage {
        weapon: &'a Item,
        extra_parts: Vec<String>,
    },
}

/// Weapons the picker offers: weapon-type items with both an attack and
/// damage, equipped unless the actor is an NPC.
pub fn equipped_weapons(actor: &Actor) -> Vec<&Item> {
    actor
        .items
        .iter()
        .filter(|item| {
            item.kind == ItemType::Weapon
                && (actor.is_npc() || item.equipped)
                && item.has_attack
                && item.has_damage()
        })
        .collect()
}

/// Decide how a blade-cantrip click plays out against an actor's equipped
/// weapons.
pub fn pick_equipped_weapon<'a>(
    actor: &'a Actor,
    cantrip: &Item,
    action: CantripAction,
    system: &SystemConfig,
    i18n: &I18n,
) -> PickerOutcome<'a> {
    let weapons = equipped_weapons(actor);

    if weapons.is_empty() {
        return PickerOutcome::NoWeapons {
            warning: i18n.format("ROLLGROUPS.NoEquippedWeapons", &[("actor", &actor.name)]),
        };
    }
    if weapons.len() > 1 {
        return PickerOutcome::Choose(weapons);
    }

    let weapon = weapons[0];
    if action == CantripAction::Attack {
        return PickerOutcome::Attack(weapon);
    }
    // One weapon, but it still offers a choice of profile.
    if weapon.is_versatile() || damage_buttons(weapon, system, i18n).is_some() {
        return PickerOutcome::Choose(vec![weapon]);
    }
    PickerOutcome::RollDamage {
        weapon,
        extra_parts: scale_cantrip_damage(cantrip, actor),
    }
}

/// The cantrip's first formula, scaled for the wielder's level and tagged
/// with its damage type, ready to append to a weapon's damage roll. Cantrip
/// dice step up every sixth level starting at 5.
pub fn scale_cantrip_damage(cantrip: &Item, actor: &Actor) -> Vec<String> {
    let parts = cantrip.valid_parts();
    let Some(part) = parts.first() else {
        return Vec::new();
    };
    let extra = ((actor.caster_level() + 1) / 6).max(0) as u32;
    let formula = alter_dice(part.formula(), extra);
    match part.damage_type() {
        Some(damage_type) => vec![format!("{formula}[{damage_type}]")],
        None => vec![formula],
    }
}

/// Bump the leading dice count of a formula: `"1d8 + 2"` with one extra die
/// becomes `"2d8 + 2"`. Formulas that do not open with a dice term pass
/// through unchanged.
fn alter_dice(formula: &str, extra: u32) -> String {
    if extra == 0 {
        return formula.to_string();
    }
    let Some((count, rest)) = formula.split_once('d') else {
        return formula.to_string();
    };
    match count.trim().parse::<u32>() {
        Ok(count) => format!("{}d{}", count + extra, rest),
        Err(_) => formula.to_string(),
    }
}
