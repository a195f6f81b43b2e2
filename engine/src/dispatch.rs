use serde::{Deserialize, Serialize};

use crate::item::{CardEvent, Item, World};
use crate::resolve::construct_parts;
use crate::system::{I18n, SystemConfig};
use crate::{RollGroupError, RollSelector};

/// Everything handed to the damage computation alongside the item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollRequest {
    pub critical: bool,
    pub spell_level: Option<i32>,
    /// Whether the triggering control was a versatile variant. Carried from
    /// the control's own metadata, never recomputed here.
    pub versatile: bool,
    /// Extra formulas appended to the roll, e.g. scaled cantrip damage.
    pub extra_parts: Vec<String>,
    pub title: String,
    pub flavor: String,
}

/// What the damage computation reports back for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRoll {
    pub title: String,
    pub flavor: String,
    pub rolls: Vec<PartRoll>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartRoll {
    pub formula: String,
    pub damage_type: Option<String>,
    pub total: i32,
}

/// The external damage-computation collaborator. The host implements this
/// against its dice engine; [`crate::roller::DemoRoller`] is the seeded
/// in-repo stand-in.
pub trait DamageRoller {
    /// Perform the roll. `None` means the user cancelled the roll dialog.
    fn roll_damage(&mut self, item: &Item, request: &RollRequest) -> Option<DamageRoll>;
}

/// Title and flavor for a damage roll, after the types are narrowed: pure
/// healing reads as a healing roll, a lone temporary-HP formula is marked
/// as such, and anything else lists its damage types.
pub fn damage_flavor(item: &Item, system: &SystemConfig, i18n: &I18n) -> (String, String) {
    let parts = item.valid_parts();
    let mut types: Vec<Option<&str>> = Vec::new();
    for part in &parts {
        let damage_type = part.damage_type();
        if !types.contains(&damage_type) {
            types.push(damage_type);
        }
    }

    let is_temp = types.len() == 1 && types[0] == Some("temphp");
    let all_healing = !types.is_empty()
        && types
            .iter()
            .all(|t| t.is_some_and(|key| system.is_healing(key)));

    let action = i18n.localize(if all_healing {
        "ROLLGROUPS.Healing"
    } else {
        "ROLLGROUPS.DamageRoll"
    });
    let title = format!("{} - {}", item.name, action);

    let labels: Vec<&str> = types
        .iter()
        .filter_map(|t| t.and_then(|key| system.type_label(key)))
        .collect();

    let flavor = if is_temp {
        format!("{} ({})", title, i18n.localize("ROLLGROUPS.Temp"))
    } else if labels.is_empty() {
        title.clone()
    } else {
        format!("{} ({})", title, labels.join(", "))
    };

    (title, flavor)
}

/// Find or reconstruct the item a card control points at.
///
/// A snapshot embedded in the originating message wins over the live item,
/// so the roll reflects the formulas as they were when the card was posted.
/// A snapshot whose owning actor is gone is an error; a dangling live
/// reference is a quiet miss.
pub fn find_item(event: &CardEvent, world: &World) -> Result<Option<Item>, RollGroupError> {
    let snapshot = event
        .message
        .as_deref()
        .and_then(|id| world.message(id))
        .and_then(|message| message.item_data.clone());

    if let Some(mut item) = snapshot {
        let Some(actor) = event.actor.as_deref().and_then(|id| world.actor(id)) else {
            return Err(RollGroupError::ItemOwnerMissing);
        };
        item.actor = Some(actor.id.clone());
        return Ok(Some(item));
    }

    Ok(event
        .item
        .as_deref()
        .and_then(|id| world.item(id))
        .cloned())
}

/// Dispatch one chat-card click end to end: locate the item, resolve the
/// selected group, narrow the item to that subset and hand it to the damage
/// computation. `Ok(None)` means nothing happened (missing item or a
/// cancelled roll); every error aborts the roll with no partial outcome.
pub fn roll_from_card<R: DamageRoller>(
    event: &CardEvent,
    world: &World,
    system: &SystemConfig,
    i18n: &I18n,
    roller: &mut R,
) -> Result<Option<DamageRoll>, RollGroupError> {
    let Some(item) = find_item(event, world)? else {
        tracing::debug!(action = %event.action, "card control points at no item");
        return Ok(None);
    };

    let spell_level = event.spell_level.or(item.level);
    let config = item.group_config();

    // Grouping is opt-in: an unconfigured item rolls all formulas at once.
    if !config.is_configured() {
        let (title, flavor) = damage_flavor(&item, system, i18n);
        let request = RollRequest {
            critical: event.critical,
            spell_level,
            versatile: event.is_versatile(),
            extra_parts: Vec::new(),
            title,
            flavor,
        };
        return Ok(roller.roll_damage(&item, &request));
    }

    let selector = event.selector().ok_or(RollGroupError::EmptyGroup)?;
    let parts = construct_parts(&item, &config, &selector)?;
    let derived = item.with_parts(parts);

    let (title, flavor) = damage_flavor(&derived, system, i18n);
    let request = RollRequest {
        critical: event.critical,
        spell_level,
        versatile: event.is_versatile(),
        extra_parts: Vec::new(),
        title,
        flavor,
    };
    Ok(roller.roll_damage(&derived, &request))
}

/// Roll one group of an item directly, the programmatic twin of the card
/// button. Falls back to an ordinary unsplit roll when no grouping is
/// configured.
pub fn roll_damage_group<R: DamageRoller>(
    item: &Item,
    group: usize,
    mut request: RollRequest,
    system: &SystemConfig,
    i18n: &I18n,
    roller: &mut R,
) -> Result<Option<DamageRoll>, RollGroupError> {
    let config = item.group_config();

    let target = if config.is_configured() {
        let parts = construct_parts(item, &config, &RollSelector::Group(group))?;
        item.with_parts(parts)
    } else {
        item.clone()
    };

    let (title, flavor) = damage_flavor(&target, system, i18n);
    request.title = title;
    request.flavor = flavor;
    if request.spell_level.is_none() {
        request.spell_level = target.level;
    }
    Ok(roller.roll_damage(&target, &request))
}
