use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::FlagStore;
use crate::system::{I18n, SystemConfig};
use crate::{DamagePart, RollGroupError};

/// A named subset of an item's damage formulas.
///
/// `parts` holds positions into the item's valid damage parts with set
/// semantics: duplicates carry no meaning and resolution order is always the
/// source order of the formulas, never the order positions were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollGroup {
    pub label: String,
    pub parts: Vec<usize>,
}

impl RollGroup {
    pub fn new(label: impl Into<String>, parts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            label: label.into(),
            parts: parts.into_iter().collect(),
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        self.parts.contains(&position)
    }

    /// Display text, falling back to the localized placeholder when blank.
    pub fn display_label(&self, i18n: &I18n) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            i18n.localize("ROLLGROUPS.GroupPlaceholder")
        } else {
            label.to_string()
        }
    }
}

/// What a group's formulas amount to, judged by their damage types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Damage,
    Healing,
    Mixed,
}

impl GroupKind {
    pub fn i18n_key(self) -> &'static str {
        match self {
            Self::Damage => "ROLLGROUPS.Damage",
            Self::Healing => "ROLLGROUPS.Healing",
            Self::Mixed => "ROLLGROUPS.Mixed",
        }
    }
}

/// Inspect the damage type of every part a group references.
///
/// All types in the damage table → Damage; all in the healing table →
/// Healing; anything else, including untyped parts and a group whose
/// positions all fell off the end of the list, → Mixed.
pub fn classify(group: &RollGroup, parts: &[DamagePart], system: &SystemConfig) -> GroupKind {
    let types: Vec<Option<&str>> = group
        .parts
        .iter()
        .filter_map(|&position| parts.get(position))
        .map(DamagePart::damage_type)
        .collect();
    if types.is_empty() {
        return GroupKind::Mixed;
    }
    if types
        .iter()
        .all(|t| t.is_some_and(|key| system.is_damage(key)))
    {
        GroupKind::Damage
    } else if types
        .iter()
        .all(|t| t.is_some_and(|key| system.is_healing(key)))
    {
        GroupKind::Healing
    } else {
        GroupKind::Mixed
    }
}

/// The persisted roll-group configuration of one item.
///
/// Wire shape of the flag payload:
/// `{"groups":[{"label":..,"parts":[..]}],"versatile":..,"bladeCantrip":..,"saves":[..]}`.
/// Absent keys decode to their defaults so payloads written by older schema
/// versions stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupConfig {
    pub groups: Vec<RollGroup>,
    /// Index of the group rolled by the card's versatile control.
    pub versatile: Option<usize>,
    pub blade_cantrip: Option<bool>,
    /// Abilities to offer extra saving-throw buttons for.
    pub saves: Vec<String>,
}

impl GroupConfig {
    /// Whether the user has configured any grouping at all. Absent grouping
    /// means the card keeps its ordinary unsplit damage button.
    pub fn is_configured(&self) -> bool {
        !self.groups.is_empty()
    }

    /// The versatile group index, dropped when it no longer references an
    /// existing group.
    pub fn versatile_group(&self) -> Option<usize> {
        self.versatile.filter(|&index| index < self.groups.len())
    }

    /// Decode a persisted flag payload, tolerating older schema variants:
    /// positions as integers or numeric strings, `versatile` as an integer,
    /// a numeric string, or a group label, and missing keys throughout.
    pub fn decode(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let groups: Vec<RollGroup> = object
            .get("groups")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(decode_group).collect())
            .unwrap_or_default();

        let versatile = match object.get("versatile") {
            Some(Value::Number(n)) => n.as_u64().map(|n| n as usize),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<usize>().ok().or_else(|| {
                    groups
                        .iter()
                        .position(|g| g.label.eq_ignore_ascii_case(s))
                })
            }
            _ => None,
        };

        let blade_cantrip = object.get("bladeCantrip").and_then(Value::as_bool);

        let saves = object
            .get("saves")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            groups,
            versatile,
            blade_cantrip,
            saves,
        }
    }

    /// The form that gets persisted: duplicate positions collapsed, empty
    /// groups dropped, blank labels coerced to the localized placeholder,
    /// and the versatile index re-pointed across the removals (cleared when
    /// its group was dropped). Normalizing a normalized config is a no-op.
    pub fn normalized(&self, i18n: &I18n) -> Self {
        let mut groups = Vec::new();
        let mut remapped = vec![None; self.groups.len()];
        for (index, group) in self.groups.iter().enumerate() {
            let mut parts = Vec::new();
            for &position in &group.parts {
                if !parts.contains(&position) {
                    parts.push(position);
                }
            }
            if parts.is_empty() {
                continue;
            }
            remapped[index] = Some(groups.len());
            groups.push(RollGroup {
                label: group.display_label(i18n),
                parts,
            });
        }

        let versatile = self
            .versatile
            .and_then(|index| remapped.get(index).copied().flatten());

        let mut saves = Vec::new();
        for ability in &self.saves {
            if !saves.contains(ability) {
                saves.push(ability.clone());
            }
        }

        Self {
            groups,
            versatile,
            blade_cantrip: self.blade_cantrip,
            saves,
        }
    }

    /// Read the flag for `item_id`; an absent or unreadable flag is an
    /// unconfigured (empty) config.
    pub fn load(store: &dyn FlagStore, item_id: &str) -> Self {
        store
            .get_flag(item_id)
            .map(|value| Self::decode(&value))
            .unwrap_or_default()
    }

    /// Like [`GroupConfig::load`], but an unconfigured item with at least one
    /// valid formula comes back as a single default group covering every
    /// part, the way the editor first presents it.
    pub fn load_or_default(
        store: &dyn FlagStore,
        item_id: &str,
        part_count: usize,
        i18n: &I18n,
    ) -> Self {
        let config = Self::load(store, item_id);
        if config.groups.is_empty() && part_count > 0 {
            return Self {
                groups: vec![RollGroup::new(
                    i18n.localize("ROLLGROUPS.Damage"),
                    0..part_count,
                )],
                ..config
            };
        }
        config
    }

    /// Normalize and persist. Saving an already-normalized config writes a
    /// byte-identical payload.
    pub fn save(
        &self,
        store: &mut dyn FlagStore,
        item_id: &str,
        i18n: &I18n,
    ) -> Result<Self, RollGroupError> {
        let normalized = self.normalized(i18n);
        let payload =
            serde_json::to_value(&normalized).map_err(|e| RollGroupError::Persistence(e.to_string()))?;
        store
            .set_flag(item_id, payload)
            .map_err(|e| RollGroupError::Persistence(e.to_string()))?;
        tracing::debug!(item = item_id, groups = normalized.groups.len(), "saved roll groups");
        Ok(normalized)
    }
}

fn decode_group(value: &Value) -> Option<RollGroup> {
    let object = value.as_object()?;
    let label = object
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let parts = object
        .get("parts")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::Number(n) => n.as_u64().map(|n| n as usize),
                    Value::String(s) => s.trim().parse::<usize>().ok(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();
    Some(RollGroup { label, parts })
}
