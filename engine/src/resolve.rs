use crate::config::GroupConfig;
use crate::item::Item;
use crate::{DamagePart, RollGroupError};

/// Which subset of formulas a chat-card control rolls. Lives only for the
/// duration of one click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollSelector {
    /// Index into the configured groups.
    Group(usize),
    /// Literal part positions, the encoding older cards carry.
    Positions(Vec<usize>),
}

impl RollSelector {
    /// Parse a control's group payload: a bare index like `"2"`, or a
    /// `;`-joined position list like `"0;2"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(index) = raw.parse::<usize>() {
            return Some(Self::Group(index));
        }
        let positions: Vec<usize> = raw
            .split(';')
            .filter_map(|part| part.trim().parse::<usize>().ok())
            .collect();
        if positions.is_empty() {
            None
        } else {
            Some(Self::Positions(positions))
        }
    }
}

/// Collect the damage parts a selector names, in source order.
///
/// The walk is a membership test over the item's valid parts, so the output
/// order matches the formula list no matter how the position set was
/// populated. A group that no longer exists fails as a stale selector; a
/// group whose positions resolve to nothing fails as empty.
pub fn construct_parts(
    item: &Item,
    config: &GroupConfig,
    selector: &RollSelector,
) -> Result<Vec<DamagePart>, RollGroupError> {
    let positions: &[usize] = match selector {
        RollSelector::Group(index) => {
            let group = config
                .groups
                .get(*index)
                .ok_or(RollGroupError::InvalidSelector(*index))?;
            if group.parts.is_empty() {
                return Err(RollGroupError::EmptyGroup);
            }
            &group.parts
        }
        RollSelector::Positions(positions) => positions,
    };

    let parts: Vec<DamagePart> = item
        .valid_parts()
        .into_iter()
        .enumerate()
        .filter(|(position, _)| positions.contains(position))
        .map(|(_, part)| part)
        .collect();

    if parts.is_empty() {
        return Err(RollGroupError::EmptyGroup);
    }
    Ok(parts)
}
