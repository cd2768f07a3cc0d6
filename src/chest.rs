//! Chests are containers placed in the world, holding references to items from the [`ItemCatalog`].

use bevy::ecs::component::Component;
use serde::{Deserialize, Serialize};

use crate::{catalog::ItemCatalog, identifier::Id, item::Item};

/// A container of items.
///
/// Chests only store the [`Id`] of each item, never the item itself:
/// the same item may be in many chests, or in the same chest several times.
/// Ids are not validated when added, and ids whose item has since been deleted are kept as-is;
/// they simply fail to [`resolve`](Chest::resolve).
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    contents: Vec<Id<Item>>,
}

impl Chest {
    /// Creates an empty chest.
    pub fn new() -> Self {
        Self::default()
    }

    /// The items in this chest, in the order they were added.
    pub fn contents(&self) -> &[Id<Item>] {
        &self.contents
    }

    /// The number of entries, counting duplicates and missing items.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns true if the chest holds nothing.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Removes every item from this chest.
    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// Appends an item to this chest.
    pub fn add(&mut self, item: Id<Item>) {
        self.contents.push(item);
    }

    /// Appends several items, optionally emptying the chest first.
    pub fn fill(&mut self, items: impl IntoIterator<Item = Id<Item>>, clear_first: bool) {
        if clear_first {
            self.clear();
        }

        self.contents.extend(items);
    }

    /// Looks up each item in the catalog.
    ///
    /// Entries whose item no longer exists yield [`None`].
    pub fn resolve<'a>(
        &'a self,
        catalog: &'a ItemCatalog,
    ) -> impl Iterator<Item = Option<&'a Item>> + 'a {
        self.contents.iter().map(|&id| catalog.get(id))
    }

    /// Describes every item in this chest, one after the other.
    pub fn describe(&self, catalog: &ItemCatalog) -> String {
        if self.is_empty() {
            return "The chest is empty.\n".to_string();
        }

        self.contents
            .iter()
            .zip(self.resolve(catalog))
            .map(|(id, item)| match item {
                Some(item) => item.describe(),
                None => format!("Missing item {id:?}\n\n"),
            })
            .collect()
    }
}

impl FromIterator<Id<Item>> for Chest {
    fn from_iter<I: IntoIterator<Item = Id<Item>>>(iter: I) -> Self {
        Chest {
            contents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeKind;

    #[test]
    fn clear_then_add() {
        let first = Id::from_name("Apple");
        let second = Id::from_name("Pear");
        let mut chest: Chest = [Id::from_name("Rotten Egg")].into_iter().collect();

        chest.clear();
        chest.add(first);
        chest.add(second);

        assert_eq!(chest.contents(), &[first, second]);
    }

    #[test]
    fn fill_appends_unless_cleared() {
        let coin = Id::from_name("Coin");
        let mut chest = Chest::new();

        chest.fill([coin, coin], false);
        chest.fill([coin], false);
        assert_eq!(chest.len(), 3);

        chest.fill([coin], true);
        assert_eq!(chest.contents(), &[coin]);
    }

    #[test]
    fn dangling_items_resolve_to_none() {
        let lamp = Item::new("Lamp", &[AttributeKind::Weight]).unwrap();
        let catalog = ItemCatalog::from_items([lamp.clone()]).unwrap();
        let chest: Chest = [lamp.id(), Id::from_name("Deleted")].into_iter().collect();

        let resolved: Vec<Option<&Item>> = chest.resolve(&catalog).collect();

        assert_eq!(resolved, vec![Some(&lamp), None]);
    }

    #[test]
    fn description_mentions_missing_items() {
        let catalog = ItemCatalog::from_items(Vec::new()).unwrap();
        let chest: Chest = [Id::from_name("Deleted")].into_iter().collect();

        assert!(chest.describe(&catalog).starts_with("Missing item"));
        assert_eq!(Chest::new().describe(&catalog), "The chest is empty.\n");
    }
}
