use serde::{Deserialize, Serialize};

pub mod buttons;
pub mod cantrip;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod editor;
pub mod item;
pub mod resolve;
pub mod roller;
pub mod store;
pub mod system;

pub use buttons::{ButtonAction, ButtonSpec, CardButtons, card_buttons};
pub use config::{GroupConfig, GroupKind, RollGroup, classify};
pub use dispatch::{DamageRoll, DamageRoller, RollRequest, roll_damage_group, roll_from_card};
pub use editor::GroupEditor;
pub use item::{Actor, CardEvent, ChatMessage, Item, World};
pub use resolve::{RollSelector, construct_parts};
pub use store::{FlagStore, MemoryStore, StoreError};
pub use system::{I18n, SystemConfig};

/// One `[formula, type]` pair of an item's damage specification.
///
/// Serializes as a two-element array to match the host's item data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamagePart(pub String, pub Option<String>);

impl DamagePart {
    pub fn new(formula: impl Into<String>, damage_type: Option<&str>) -> Self {
        Self(formula.into(), damage_type.map(str::to_string))
    }

    pub fn formula(&self) -> &str {
        &self.0
    }

    pub fn damage_type(&self) -> Option<&str> {
        self.1.as_deref()
    }

    /// A part is only rollable when it carries an actual formula.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

/// Filter damage parts to those with a non-empty formula, preserving order.
///
/// Group positions index this filtered sequence; it is derived on demand and
/// never persisted.
pub fn valid_parts(parts: &[DamagePart]) -> Vec<DamagePart> {
    parts.iter().filter(|p| p.is_valid()).cloned().collect()
}

/// Why a roll-group interaction produced no roll.
///
/// Every variant is terminal for the current interaction: the failure is
/// surfaced once through [`RollGroupError::i18n_key`] and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollGroupError {
    /// The selected group resolves to zero formulas.
    #[error("the selected roll group has no damage formulas")]
    EmptyGroup,
    /// A control references a group that no longer exists.
    #[error("no roll group exists at index {0}")]
    InvalidSelector(usize),
    /// A chat-card item snapshot's owning actor could not be found.
    #[error("the owning actor of the embedded item could not be found")]
    ItemOwnerMissing,
    /// The flag write was rejected by the host's document storage.
    #[error("failed to persist the roll group configuration: {0}")]
    Persistence(String),
}

impl RollGroupError {
    /// Localization key for the user-facing notification. A stale selector
    /// reads the same as an empty group to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Self::EmptyGroup | Self::InvalidSelector(_) => "ROLLGROUPS.RollGroupEmpty",
            Self::ItemOwnerMissing => "ROLLGROUPS.ItemOwnerMissing",
            Self::Persistence(_) => "ROLLGROUPS.PersistenceFailed",
        }
    }
}
