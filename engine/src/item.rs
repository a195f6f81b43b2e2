use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GroupConfig;
use crate::resolve::RollSelector;
use crate::{DamagePart, valid_parts};

/// The host document types this module reads. Only the fields the roll-group
/// logic consumes are modeled; everything else stays with the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Spell,
    #[default]
    #[serde(other)]
    Other,
}

/// The damage block of an item: ordered `[formula, type]` pairs plus the
/// optional versatile formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDamage {
    pub parts: Vec<DamagePart>,
    pub versatile: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSave {
    pub ability: Option<String>,
    pub dc: Option<i32>,
}

/// Module flags carried on an item document. The `rollgroups.config` subtree
/// is kept as raw JSON so payloads from older schema versions survive a
/// round trip untouched until the next save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFlags {
    pub rollgroups: Option<ModuleFlag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleFlag {
    pub config: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    /// Spell level; 0 is a cantrip.
    pub level: Option<i32>,
    /// Owning actor reference, when known.
    pub actor: Option<String>,
    pub equipped: bool,
    pub has_attack: bool,
    pub damage: ItemDamage,
    pub save: ItemSave,
    pub flags: ItemFlags,
}

impl Item {
    /// The rollable damage parts, in source order.
    pub fn valid_parts(&self) -> Vec<DamagePart> {
        valid_parts(&self.damage.parts)
    }

    pub fn has_damage(&self) -> bool {
        self.damage.parts.iter().any(DamagePart::is_valid)
    }

    pub fn has_save(&self) -> bool {
        self.save.ability.is_some()
    }

    pub fn is_versatile(&self) -> bool {
        self.damage.versatile.is_some()
    }

    /// Grouping only means anything with two or more formulas to split.
    pub fn supports_groups(&self) -> bool {
        self.valid_parts().len() >= 2
    }

    /// A level-0 spell with damage can ride on a weapon's profile.
    pub fn eligible_blade_cantrip(&self) -> bool {
        self.kind == ItemType::Spell && self.level == Some(0) && self.has_damage()
    }

    /// The raw flag payload carried on this document, if any.
    pub fn raw_config(&self) -> Option<&Value> {
        self.flags.rollgroups.as_ref().map(|flag| &flag.config)
    }

    /// Decode the roll-group configuration carried on this document. A card
    /// snapshot keeps the configuration it was created with.
    pub fn group_config(&self) -> GroupConfig {
        self.raw_config().map(GroupConfig::decode).unwrap_or_default()
    }

    /// A copy of this item with its damage parts replaced. The id is kept so
    /// the damage computation treats it as the same item, narrowed.
    pub fn with_parts(&self, parts: Vec<DamagePart>) -> Item {
        let mut clone = self.clone();
        clone.damage.parts = parts;
        clone
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Character,
    Npc,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActorType,
    pub level: Option<i32>,
    /// Challenge rating, the level stand-in for NPCs.
    pub cr: Option<f64>,
    pub items: Vec<Item>,
}

impl Actor {
    pub fn is_npc(&self) -> bool {
        self.kind == ActorType::Npc
    }

    /// Character level, or the floor of the challenge rating for NPCs.
    pub fn caster_level(&self) -> i32 {
        self.level
            .or_else(|| self.cr.map(|cr| cr.floor() as i32))
            .unwrap_or(0)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// The slice of a chat message dispatch reads: an optional item snapshot
/// taken when the card was created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    pub id: String,
    /// Snapshot of the item as it was when the card was posted. A roll from
    /// this card uses these formulas, not the item's current state.
    pub item_data: Option<Item>,
}

/// A chat-card click, as read off the control's dataset attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardEvent {
    /// The control's action string, e.g. `rollgroup-damage-versatile`.
    pub action: String,
    /// The control's group payload: an index, or a `;`-joined position list
    /// on cards from older versions.
    pub group: Option<String>,
    pub item: Option<String>,
    pub actor: Option<String>,
    pub message: Option<String>,
    pub spell_level: Option<i32>,
    pub critical: bool,
}

impl CardEvent {
    pub fn selector(&self) -> Option<RollSelector> {
        self.group.as_deref().and_then(RollSelector::parse)
    }

    /// Versatile rolls are marked by the control itself, never recomputed.
    pub fn is_versatile(&self) -> bool {
        self.action.ends_with("versatile")
    }
}

/// The documents one dispatch can reach: world-level items, actors with
/// their inventories, and chat messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub actors: Vec<Actor>,
    pub items: Vec<Item>,
    pub messages: Vec<ChatMessage>,
}

impl World {
    pub fn actor(&self, id: &str) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    /// Resolve an item reference: world items first, then actor inventories.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .or_else(|| self.actors.iter().find_map(|actor| actor.item(id)))
    }

    pub fn message(&self, id: &str) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| message.id == id)
    }
}
