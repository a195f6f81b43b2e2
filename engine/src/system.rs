use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lookup tables supplied by the active game system.
///
/// The host populates these per world; nothing here is fixed at build time.
/// Keys are the system's type identifiers, values are display labels.
/// Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SystemConfig {
    pub damage_types: IndexMap<String, String>,
    pub healing_types: IndexMap<String, String>,
    pub abilities: IndexMap<String, String>,
}

impl SystemConfig {
    pub fn is_damage(&self, key: &str) -> bool {
        self.damage_types.contains_key(key)
    }

    pub fn is_healing(&self, key: &str) -> bool {
        self.healing_types.contains_key(key)
    }

    pub fn is_ability(&self, key: &str) -> bool {
        self.abilities.contains_key(key)
    }

    /// Display label for a damage or healing type, damage table first.
    pub fn type_label(&self, key: &str) -> Option<&str> {
        self.damage_types
            .get(key)
            .or_else(|| self.healing_types.get(key))
            .map(String::as_str)
    }

    pub fn ability_label(&self, key: &str) -> Option<&str> {
        self.abilities.get(key).map(String::as_str)
    }

    /// The 5e tables, as the reference system.
    pub fn dnd5e() -> Self {
        fn table(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }
        Self {
            damage_types: table(&[
                ("acid", "Acid"),
                ("bludgeoning", "Bludgeoning"),
                ("cold", "Cold"),
                ("fire", "Fire"),
                ("force", "Force"),
                ("lightning", "Lightning"),
                ("necrotic", "Necrotic"),
                ("piercing", "Piercing"),
                ("poison", "Poison"),
                ("psychic", "Psychic"),
                ("radiant", "Radiant"),
                ("slashing", "Slashing"),
                ("thunder", "Thunder"),
            ]),
            healing_types: table(&[("healing", "Healing"), ("temphp", "Healing (Temporary)")]),
            abilities: table(&[
                ("str", "Strength"),
                ("dex", "Dexterity"),
                ("con", "Constitution"),
                ("int", "Intelligence"),
                ("wis", "Wisdom"),
                ("cha", "Charisma"),
            ]),
        }
    }
}

/// Localization lookup with key fallback.
///
/// The host owns the real string tables; this mirrors its `localize`/`format`
/// calls. Unknown keys come back verbatim so a missing translation never
/// breaks an interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct I18n {
    strings: IndexMap<String, String>,
}

impl I18n {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn localize(&self, key: &str) -> String {
        self.strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Localize `key` and substitute `{name}` placeholders.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut out = self.localize(key);
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }

    /// English strings for every key this module emits.
    pub fn en() -> Self {
        let mut table = Self::new();
        for (key, value) in [
            ("ROLLGROUPS.Damage", "Damage"),
            ("ROLLGROUPS.Healing", "Healing"),
            ("ROLLGROUPS.Mixed", "Mixed"),
            ("ROLLGROUPS.DamageRoll", "Damage Roll"),
            ("ROLLGROUPS.Temp", "Temp"),
            ("ROLLGROUPS.Versatile", "Versatile"),
            ("ROLLGROUPS.GroupPlaceholder", "New Group"),
            ("ROLLGROUPS.SavingThrowDC", "Saving Throw DC {dc} {ability}"),
            ("ROLLGROUPS.BladeCantripAttack", "Blade Cantrip: Attack"),
            ("ROLLGROUPS.BladeCantripDamage", "Blade Cantrip: Damage"),
            (
                "ROLLGROUPS.RollGroupEmpty",
                "The selected roll group has no damage formulas.",
            ),
            (
                "ROLLGROUPS.ItemOwnerMissing",
                "The owner of the embedded item could not be found.",
            ),
            (
                "ROLLGROUPS.PersistenceFailed",
                "The roll group configuration could not be saved.",
            ),
            (
                "ROLLGROUPS.NoEquippedWeapons",
                "{actor} has no equipped weapons.",
            ),
            ("ROLLGROUPS.PickWeapon", "Pick a weapon for {name}"),
            ("None", "None"),
        ] {
            table.insert(key, value);
        }
        table
    }
}
