use crate::config::{GroupConfig, RollGroup};
use crate::item::Item;
use crate::store::FlagStore;
use crate::system::I18n;
use crate::RollGroupError;

/// An editing session over one item's roll-group configuration.
///
/// All mutations apply to a working copy; nothing reaches storage until
/// [`GroupEditor::commit`]. Index arguments that point at nothing are silent
/// no-ops, matching how the form treats stale interactions. When a commit is
/// rejected the working copy survives, so the user can retry without
/// re-entering anything.
#[derive(Debug, Clone)]
pub struct GroupEditor {
    item_id: String,
    part_count: usize,
    config: GroupConfig,
}

impl GroupEditor {
    /// Open a session for `item`, seeding the working copy from storage. An
    /// unconfigured item starts with one default group covering every
    /// formula.
    pub fn open(item: &Item, store: &dyn FlagStore, i18n: &I18n) -> Self {
        let part_count = item.valid_parts().len();
        let config = GroupConfig::load_or_default(store, &item.id, part_count, i18n);
        Self {
            item_id: item.id.clone(),
            part_count,
            config,
        }
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Append a fresh group: blank label, no formulas selected.
    pub fn add_group(&mut self) {
        self.config.groups.push(RollGroup::default());
    }

    /// Remove the group at `index`, re-pointing the versatile reference:
    /// cleared when it named the deleted group, shifted down when it named a
    /// later one.
    pub fn delete_group(&mut self, index: usize) {
        if index >= self.config.groups.len() {
            return;
        }
        self.config.groups.remove(index);
        self.config.versatile = match self.config.versatile {
            Some(v) if v == index => None,
            Some(v) if v > index => Some(v - 1),
            other => other,
        };
    }

    /// Flip membership of `position` in the group's part set.
    pub fn toggle_member(&mut self, group: usize, position: usize) {
        if position >= self.part_count {
            return;
        }
        let Some(group) = self.config.groups.get_mut(group) else {
            return;
        };
        if let Some(found) = group.parts.iter().position(|&p| p == position) {
            group.parts.remove(found);
        } else {
            group.parts.push(position);
        }
    }

    /// Set the label as typed; blank labels display as the placeholder and
    /// are only coerced when the config is saved.
    pub fn rename_group(&mut self, index: usize, label: impl Into<String>) {
        let Some(group) = self.config.groups.get_mut(index) else {
            return;
        };
        group.label = label.into();
    }

    pub fn set_versatile(&mut self, group: Option<usize>) {
        match group {
            Some(index) if index >= self.config.groups.len() => {}
            other => self.config.versatile = other,
        }
    }

    pub fn set_blade_cantrip(&mut self, enabled: Option<bool>) {
        self.config.blade_cantrip = enabled;
    }

    pub fn set_saves(&mut self, abilities: Vec<String>) {
        self.config.saves = abilities;
    }

    /// The versatile select's option list, re-derived from the current
    /// groups: index paired with display label.
    pub fn versatile_choices(&self, i18n: &I18n) -> Vec<(usize, String)> {
        self.config
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| (index, group.display_label(i18n)))
            .collect()
    }

    /// Normalize and persist the working copy. On success the working copy
    /// becomes the normalized form; on failure it is left untouched.
    pub fn commit(
        &mut self,
        store: &mut dyn FlagStore,
        i18n: &I18n,
    ) -> Result<(), RollGroupError> {
        match self.config.save(store, &self.item_id, i18n) {
            Ok(normalized) => {
                self.config = normalized;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(item = %self.item_id, %error, "roll group commit rejected");
                Err(error)
            }
        }
    }
}
