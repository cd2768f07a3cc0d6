//! The [`ItemCatalog`] is the in-memory view of every item known to the game.
//!
//! It is a cache over an [`ItemStore`] or a [`RawItemManifest`], and is never modified in place:
//! each rebuild constructs a fresh catalog and swaps it in, so stale items can never linger.

use bevy::{ecs::system::Resource, log::debug, utils::HashMap};
use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

use crate::{
    attribute::AttributeKind,
    identifier::Id,
    item::{InvalidNameError, Item},
    manifest::RawItemManifest,
    store::ItemStore,
};

/// Every item known to the game, in storage order, along with an [`Id`] lookup table.
///
/// A freshly constructed catalog has not been built yet; this is distinct from a built catalog that happens to be empty.
#[derive(Resource, Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<Id<Item>, usize>,
    built: bool,
}

impl PartialEq for ItemCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.built == other.built && self.items == other.items
    }
}

impl ItemCatalog {
    /// Creates a catalog that has not been built yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of items.
    ///
    /// Fails if two items share an [`Id`].
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut catalog = ItemCatalog {
            built: true,
            ..Default::default()
        };

        for item in items {
            let id = item.id();
            if catalog.index.contains_key(&id) {
                return Err(InvalidNameError::Duplicate(item.name().to_string()).into());
            }

            catalog.index.insert(id, catalog.items.len());
            catalog.items.push(item);
        }

        Ok(catalog)
    }

    /// Converts a raw manifest into a catalog, validating every item along the way.
    pub fn from_raw_manifest(raw_manifest: &RawItemManifest) -> Result<Self, CatalogError> {
        let items = raw_manifest
            .items
            .iter()
            .cloned()
            .map(Item::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_items(items)
    }

    /// Replaces the contents of this catalog with every item currently in `store`.
    ///
    /// Items that disappear between being listed and being loaded are skipped.
    pub fn rebuild<S: ItemStore + ?Sized>(&mut self, store: &S) {
        let mut items = Vec::new();
        let mut index = HashMap::default();

        for id in store.ids() {
            if index.contains_key(&id) {
                continue;
            }

            if let Some(item) = store.load(id) {
                index.insert(id, items.len());
                items.push(item);
            }
        }

        debug!("Rebuilt the item catalog with {} items.", items.len());

        *self = ItemCatalog {
            items,
            index,
            built: true,
        };
    }

    /// Swaps in a freshly built catalog.
    pub fn replace_with(&mut self, catalog: ItemCatalog) {
        *self = catalog;
    }

    /// Returns true once this catalog has been built, even if it turned out to be empty.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// The number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog holds no items, whether or not it has been built.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all items, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Gets an item by its unique identifier.
    ///
    /// Returns [`None`] if no item with the given ID is found.
    pub fn get(&self, id: Id<Item>) -> Option<&Item> {
        self.index.get(&id).map(|&position| &self.items[position])
    }

    /// Gets the unique identifier of an item by its name.
    ///
    /// Returns [`None`] if no item with the given name is found.
    pub fn id_of(&self, name: &str) -> Option<Id<Item>> {
        let id = Id::from_name(name);

        self.index.contains_key(&id).then_some(id)
    }

    /// Gets an item by its name.
    ///
    /// Returns [`None`] if no item with the given name is found.
    pub fn get_by_name(&self, name: &str) -> Option<&Item> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    /// Every item with at least one attribute of the given kind, in storage order.
    pub fn find_by_attribute(&self, kind: AttributeKind) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.has_attribute(kind))
            .collect()
    }

    /// Picks one of the items with an attribute of the given kind, uniformly at random.
    pub fn random_matching<R: Rng + ?Sized>(
        &self,
        kind: AttributeKind,
        rng: &mut R,
    ) -> Result<Id<Item>, NoMatchError> {
        self.find_by_attribute(kind)
            .choose(rng)
            .map(|item| item.id())
            .ok_or(NoMatchError(kind))
    }
}

/// No item in the catalog has the requested kind of attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No item in the catalog has a {0} attribute.")]
pub struct NoMatchError(pub AttributeKind);

/// An error that can occur when building an [`ItemCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An item was unnamed, or shared its name with another item.
    #[error("Invalid item in manifest: {0}")]
    InvalidName(#[from] InvalidNameError),
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{manifest::RawItem, store::MemoryItemStore};

    fn sample_store() -> MemoryItemStore {
        let mut store = MemoryItemStore::new();
        store
            .create_item("Sword", &[AttributeKind::Damage, AttributeKind::Weight])
            .unwrap();
        store.create_item("Shield", &[AttributeKind::Armor]).unwrap();
        store.create_item("Coin", &[AttributeKind::Weight]).unwrap();
        store
    }

    #[test]
    fn new_catalogs_are_unbuilt() {
        let catalog = ItemCatalog::new();

        assert!(!catalog.is_built());
        assert!(catalog.is_empty());
    }

    #[test]
    fn rebuilding_from_an_empty_store_is_fine() {
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&MemoryItemStore::new());

        assert!(catalog.is_built());
        assert!(catalog.is_empty());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let store = sample_store();
        let mut catalog = ItemCatalog::new();

        catalog.rebuild(&store);
        let first = catalog.clone();
        catalog.rebuild(&store);

        assert_eq!(catalog, first);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn rebuild_drops_removed_items() {
        let mut store = sample_store();
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&store);

        store.remove(Id::from_name("Shield")).unwrap();
        catalog.rebuild(&store);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_by_name("Shield").is_none());
    }

    #[test]
    fn lookups() {
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&sample_store());

        let sword = catalog.get_by_name("Sword").unwrap();
        assert_eq!(catalog.get(sword.id()), Some(sword));
        assert_eq!(catalog.id_of("Coin"), Some(Id::from_name("Coin")));
        assert_eq!(catalog.id_of("Pie"), None);
    }

    #[test]
    fn find_by_attribute_lists_each_item_once() {
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&sample_store());
        let mut heavy = Item::new("Anvil", &[AttributeKind::Weight, AttributeKind::Weight]).unwrap();
        heavy.add_attribute(AttributeKind::Weight);
        let catalog = ItemCatalog::from_items(catalog.iter().cloned().chain([heavy])).unwrap();

        let names: Vec<&str> = catalog
            .find_by_attribute(AttributeKind::Weight)
            .into_iter()
            .map(Item::name)
            .collect();

        assert_eq!(names, vec!["Sword", "Coin", "Anvil"]);
    }

    #[test]
    fn random_matching_without_candidates_fails() {
        let catalog =
            ItemCatalog::from_items([Item::new("Coin", &[AttributeKind::Weight]).unwrap()])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(
            catalog.random_matching(AttributeKind::Armor, &mut rng),
            Err(NoMatchError(AttributeKind::Armor))
        );
    }

    #[test]
    fn random_matching_with_one_candidate_always_returns_it() {
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&sample_store());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..32 {
            assert_eq!(
                catalog.random_matching(AttributeKind::Armor, &mut rng),
                Ok(Id::from_name("Shield"))
            );
        }
    }

    #[test]
    fn random_matching_only_returns_candidates() {
        let mut catalog = ItemCatalog::new();
        catalog.rebuild(&sample_store());
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = [Id::from_name("Sword"), Id::from_name("Coin")];

        for _ in 0..32 {
            let picked = catalog
                .random_matching(AttributeKind::Weight, &mut rng)
                .unwrap();
            assert!(candidates.contains(&picked));
        }
    }

    #[test]
    fn duplicate_names_in_raw_manifests_are_rejected() {
        let raw_manifest = RawItemManifest {
            items: vec![
                RawItem {
                    name: "Key".to_string(),
                    attributes: Vec::new(),
                },
                RawItem {
                    name: "Key".to_string(),
                    attributes: Vec::new(),
                },
            ],
        };

        assert_eq!(
            ItemCatalog::from_raw_manifest(&raw_manifest),
            Err(CatalogError::InvalidName(InvalidNameError::Duplicate(
                "Key".to_string()
            )))
        );
    }
}
