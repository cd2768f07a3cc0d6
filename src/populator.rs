//! Filling chests with loot.
//!
//! A [`ChestPopulator`] describes *what* should go into a chest:
//! either an explicit list of items, or one random item per requested [`AttributeKind`].
//! Deciding *which* chests to fill is up to the caller; see [`ChestSelectionMethod`]
//! and the [`ChestPlugin`](crate::plugin::ChestPlugin) for the ECS-driven workflow.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    attribute::AttributeKind,
    catalog::{ItemCatalog, NoMatchError},
    chest::Chest,
    identifier::Id,
    item::Item,
};

/// Which chests in the world a request applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChestSelectionMethod {
    /// Only chests marked with [`SelectedChest`](crate::plugin::SelectedChest).
    #[default]
    Selected,
    /// Every chest.
    All,
}

impl ChestSelectionMethod {
    /// Returns true if a chest with the given selection status is targeted.
    pub fn includes(self, is_selected: bool) -> bool {
        match self {
            ChestSelectionMethod::Selected => is_selected,
            ChestSelectionMethod::All => true,
        }
    }
}

/// The items to put into each chest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemSelection {
    /// Exactly these items, in this order.
    ///
    /// Ids are not checked against the catalog.
    Manual(Vec<Id<Item>>),
    /// One random item per slot, drawn from the items that have the slot's kind of attribute.
    ///
    /// Every chest gets its own draws.
    ByAttribute(Vec<AttributeKind>),
}

/// Fills chests according to an [`ItemSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestPopulator {
    /// What goes into each chest.
    pub selection: ItemSelection,
    /// Whether each chest is emptied before the new items are added.
    pub clear_on_add: bool,
}

impl ChestPopulator {
    /// Adds exactly the given items to each chest.
    pub fn manual(items: impl IntoIterator<Item = Id<Item>>) -> Self {
        Self {
            selection: ItemSelection::Manual(items.into_iter().collect()),
            clear_on_add: false,
        }
    }

    /// Adds one random item per requested kind to each chest.
    pub fn by_attribute(kinds: impl IntoIterator<Item = AttributeKind>) -> Self {
        Self {
            selection: ItemSelection::ByAttribute(kinds.into_iter().collect()),
            clear_on_add: false,
        }
    }

    /// Sets whether chests are emptied before being filled.
    pub fn clear_on_add(mut self, clear_on_add: bool) -> Self {
        self.clear_on_add = clear_on_add;
        self
    }

    /// Decides which items the next chest will receive.
    ///
    /// For [`ItemSelection::ByAttribute`], this consumes randomness from `rng`.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        catalog: &ItemCatalog,
        rng: &mut R,
    ) -> Result<Vec<Id<Item>>, NoMatchError> {
        match &self.selection {
            ItemSelection::Manual(items) => Ok(items.clone()),
            ItemSelection::ByAttribute(kinds) => kinds
                .iter()
                .map(|&kind| catalog.random_matching(kind, &mut *rng))
                .collect(),
        }
    }

    /// Fills a single chest.
    ///
    /// Items are drawn before the chest is touched, so a failed draw leaves the chest unchanged.
    pub fn populate<R: Rng + ?Sized>(
        &self,
        chest: &mut Chest,
        catalog: &ItemCatalog,
        rng: &mut R,
    ) -> Result<(), NoMatchError> {
        let items = self.draw(catalog, rng)?;
        chest.fill(items, self.clear_on_add);

        Ok(())
    }

    /// Fills each chest in turn, stopping at the first failure.
    ///
    /// Chests filled before the failure stay filled.
    /// On success, returns the number of chests filled.
    pub fn populate_all<'a, R: Rng + ?Sized>(
        &self,
        chests: impl IntoIterator<Item = &'a mut Chest>,
        catalog: &ItemCatalog,
        rng: &mut R,
    ) -> Result<usize, PopulateError> {
        let mut filled = 0;

        for chest in chests {
            self.populate(chest, catalog, rng)
                .map_err(|source| PopulateError { filled, source })?;
            filled += 1;
        }

        Ok(filled)
    }
}

/// Filling a batch of chests stopped partway through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Stopped after filling {filled} chests: {source}")]
pub struct PopulateError {
    /// How many chests were filled before the failure.
    pub filled: usize,
    /// Why the next chest could not be filled.
    pub source: NoMatchError,
}
