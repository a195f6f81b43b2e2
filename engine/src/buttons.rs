use serde::{Deserialize, Serialize};

use crate::config::classify;
use crate::item::Item;
use crate::system::{I18n, SystemConfig};

/// What a chat-card control does when clicked. Serialized, these become the
/// dataset attributes the host's renderer writes onto each button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ButtonAction {
    #[serde(rename = "rollgroup-damage")]
    RollGroupDamage { group: usize },
    #[serde(rename = "rollgroup-damage-versatile")]
    RollGroupVersatile { group: usize },
    #[serde(rename = "rollgroup-bladecantrip-attack")]
    BladeCantripAttack,
    #[serde(rename = "rollgroup-bladecantrip-damage")]
    BladeCantripDamage,
    #[serde(rename = "save")]
    SavingThrow { ability: String, dc: i32 },
}

impl ButtonAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RollGroupDamage { .. } => "rollgroup-damage",
            Self::RollGroupVersatile { .. } => "rollgroup-damage-versatile",
            Self::BladeCantripAttack => "rollgroup-bladecantrip-attack",
            Self::BladeCantripDamage => "rollgroup-bladecantrip-damage",
            Self::SavingThrow { .. } => "save",
        }
    }
}

/// One control to render on a chat card. Rendering itself is the host's
/// concern; this is only the what, not the how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    #[serde(flatten)]
    pub action: ButtonAction,
    pub label: String,
    pub item: Option<String>,
    pub actor: Option<String>,
}

/// Everything this module contributes to one chat card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardButtons {
    /// Replace the stock damage button when non-empty.
    pub damage: Vec<ButtonSpec>,
    /// Rewire the stock versatile button to this when present.
    pub versatile: Option<ButtonSpec>,
    /// Appended at the end of the card.
    pub blade_cantrip: Vec<ButtonSpec>,
    /// Appended after the stock saving-throw button.
    pub saves: Vec<ButtonSpec>,
}

impl CardButtons {
    pub fn is_empty(&self) -> bool {
        self.damage.is_empty()
            && self.versatile.is_none()
            && self.blade_cantrip.is_empty()
            && self.saves.is_empty()
    }
}

/// One damage button per configured group, labeled by what the group
/// resolves to, e.g. `Damage (Flames)`. None when the item has no grouping
/// configured or fewer than two valid formulas to split.
pub fn damage_buttons(item: &Item, system: &SystemConfig, i18n: &I18n) -> Option<Vec<ButtonSpec>> {
    let config = item.group_config();
    let parts = item.valid_parts();
    if config.groups.is_empty() || parts.len() < 2 {
        return None;
    }

    let buttons = config
        .groups
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let kind = classify(group, &parts, system);
            ButtonSpec {
                action: ButtonAction::RollGroupDamage { group: index },
                label: format!(
                    "{} ({})",
                    i18n.localize(kind.i18n_key()),
                    group.display_label(i18n)
                ),
                item: Some(item.id.clone()),
                actor: item.actor.clone(),
            }
        })
        .collect();
    Some(buttons)
}

/// Extra saving-throw buttons for the configured abilities, skipping the
/// item's own save ability and anything the active system does not know.
pub fn save_buttons(item: &Item, system: &SystemConfig, i18n: &I18n) -> Option<Vec<ButtonSpec>> {
    if !item.has_save() {
        return None;
    }
    let dc = item.save.dc?;
    let primary = item.save.ability.as_deref();

    let config = item.group_config();
    let buttons: Vec<ButtonSpec> = config
        .saves
        .iter()
        .filter(|ability| Some(ability.as_str()) != primary && system.is_ability(ability))
        .map(|ability| {
            let label = i18n.format(
                "ROLLGROUPS.SavingThrowDC",
                &[
                    ("dc", &dc.to_string()),
                    ("ability", system.ability_label(ability).unwrap_or(ability)),
                ],
            );
            ButtonSpec {
                action: ButtonAction::SavingThrow {
                    ability: ability.clone(),
                    dc,
                },
                label,
                item: Some(item.id.clone()),
                actor: item.actor.clone(),
            }
        })
        .collect();

    if buttons.is_empty() { None } else { Some(buttons) }
}

/// Assemble the full contribution for one card: grouped damage buttons, the
/// versatile rewiring, blade-cantrip controls, and extra save buttons.
pub fn card_buttons(item: &Item, system: &SystemConfig, i18n: &I18n) -> CardButtons {
    let config = item.group_config();
    let damage = damage_buttons(item, system, i18n).unwrap_or_default();

    let versatile = if !damage.is_empty() && item.is_versatile() {
        config.versatile_group().map(|group| ButtonSpec {
            action: ButtonAction::RollGroupVersatile { group },
            label: i18n.localize("ROLLGROUPS.Versatile"),
            item: Some(item.id.clone()),
            actor: item.actor.clone(),
        })
    } else {
        None
    };

    let blade_cantrip = if config.blade_cantrip == Some(true) && item.eligible_blade_cantrip() {
        vec![
            ButtonSpec {
                action: ButtonAction::BladeCantripAttack,
                label: i18n.localize("ROLLGROUPS.BladeCantripAttack"),
                item: Some(item.id.clone()),
                actor: item.actor.clone(),
            },
            ButtonSpec {
                action: ButtonAction::BladeCantripDamage,
                label: i18n.localize("ROLLGROUPS.BladeCantripDamage"),
                item: Some(item.id.clone()),
                actor: item.actor.clone(),
            },
        ]
    } else {
        Vec::new()
    };

    let saves = save_buttons(item, system, i18n).unwrap_or_default();

    CardButtons {
        damage,
        versatile,
        blade_cantrip,
        saves,
    }
}
