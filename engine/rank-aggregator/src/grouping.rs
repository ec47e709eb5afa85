//! Position grouping
//!
//! Positions are always reported in the same order: the six canonical
//! fantasy positions first (even when empty), then any other position found
//! in the roster in first-seen order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::player::Player;

/// Canonical position order
pub const POSITION_ORDER: [&str; 6] = ["QB", "WR", "RB", "TE", "K", "DEF"];

/// Ordered mapping from position to the items of that position
///
/// Serializes as a JSON object whose keys keep this order.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionGroups<T> {
    groups: Vec<(String, Vec<T>)>,
}

impl<T> PositionGroups<T> {
    /// Empty mapping with every canonical position present
    pub fn canonical() -> Self {
        Self { groups: POSITION_ORDER.iter().map(|pos| (pos.to_string(), Vec::new())).collect() }
    }

    /// Group items by the position `position_of` reports, keeping input order
    pub fn from_items<I, F>(items: I, position_of: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let mut groups = Self::canonical();
        for item in items {
            let position = position_of(&item).to_string();
            groups.push(&position, item);
        }
        groups
    }

    /// Append an item to its position, adding the position at the end if new
    pub fn push(&mut self, position: &str, item: T) {
        match self.groups.iter_mut().find(|(pos, _)| pos == position) {
            Some((_, items)) => items.push(item),
            None => self.groups.push((position.to_string(), vec![item])),
        }
    }

    pub fn get(&self, position: &str) -> Option<&[T]> {
        self.groups.iter().find(|(pos, _)| pos == position).map(|(_, items)| items.as_slice())
    }

    pub fn positions(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(pos, _)| pos.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups.iter().map(|(pos, items)| (pos.as_str(), items.as_slice()))
    }

    /// Number of positions, including empty ones
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of items across all positions
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    /// Transform every group, keeping position order
    pub fn map<U, F>(self, mut f: F) -> PositionGroups<U>
    where
        F: FnMut(&str, Vec<T>) -> Vec<U>,
    {
        let groups = self
            .groups
            .into_iter()
            .map(|(pos, items)| {
                let mapped = f(&pos, items);
                (pos, mapped)
            })
            .collect();
        PositionGroups { groups }
    }
}

impl<T> IntoIterator for PositionGroups<T> {
    type Item = (String, Vec<T>);
    type IntoIter = std::vec::IntoIter<(String, Vec<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<T> FromIterator<(String, Vec<T>)> for PositionGroups<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        Self { groups: iter.into_iter().collect() }
    }
}

impl<T: Serialize> Serialize for PositionGroups<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (position, items) in &self.groups {
            map.serialize_entry(position, items)?;
        }
        map.end()
    }
}

/// Partition players by position, keeping roster order inside each group.
///
/// No deduplication happens here; identical names stay separate entries.
pub fn group_by_position<I>(players: I) -> PositionGroups<Player>
where
    I: IntoIterator<Item = Player>,
{
    PositionGroups::from_items(players, |player| player.position.as_str())
}
