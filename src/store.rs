//! Persistent storage for items.
//!
//! The [`ItemStore`] trait is the source of truth that the [`ItemCatalog`](crate::catalog::ItemCatalog) is rebuilt from.
//! Two implementations are provided:
//!
//! - [`MemoryItemStore`], which keeps items in memory and is handy for tests and procedural content.
//! - [`RonItemStore`], which persists items to a single RON manifest file,
//!   in the same format the [`ItemCatalogPlugin`](crate::plugin::ItemCatalogPlugin) loads.
//!
//! Editing tools should write through a store, then rebuild the catalog.

#[cfg(feature = "ron")]
use std::{
    fs,
    path::{Path, PathBuf},
};

use bevy::log::debug;
use thiserror::Error;

use crate::{
    attribute::AttributeKind,
    identifier::Id,
    item::{InvalidNameError, Item},
};

/// A place where items are persisted.
pub trait ItemStore {
    /// Lists the ids of every stored item, in storage order.
    fn ids(&self) -> Vec<Id<Item>>;

    /// Loads a copy of a stored item.
    ///
    /// Returns [`None`] if no item with the given ID is stored.
    fn load(&self, id: Id<Item>) -> Option<Item>;

    /// Stores a new item.
    ///
    /// Fails with [`InvalidNameError::Duplicate`] if an item with the same [`Id`] is already stored.
    /// Changes are not guaranteed to be durable until [`save`](ItemStore::save) is called.
    fn insert(&mut self, item: Item) -> Result<Id<Item>, StoreError>;

    /// Overwrites a stored item, which may be renamed in the process.
    fn replace(&mut self, id: Id<Item>, item: Item) -> Result<Id<Item>, StoreError>;

    /// Removes a stored item, returning it.
    ///
    /// Chests referring to the item are left untouched: their entries simply stop resolving.
    fn remove(&mut self, id: Id<Item>) -> Result<Item, StoreError>;

    /// Makes all previous changes durable.
    fn save(&mut self) -> Result<(), StoreError>;

    /// Creates a new item with default-valued attributes of the requested kinds, then stores and saves it.
    fn create_item(&mut self, name: &str, kinds: &[AttributeKind]) -> Result<Id<Item>, StoreError> {
        let item = Item::new(name, kinds)?;
        let id = self.insert(item)?;
        if let Err(err) = self.save() {
            // Keep the store in line with what was last saved.
            self.remove(id)?;
            return Err(err);
        }

        debug!("Created item {name} with {} attributes.", kinds.len());
        Ok(id)
    }
}

/// An error that can occur when reading or writing an [`ItemStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The item name was empty or already in use.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),
    /// The item with the given ID was not found.
    #[error("The item with ID {0:?} was not found.")]
    NotFound(Id<Item>),
    /// The backing file could not be read or written.
    #[error("Could not access {}: {source}", .path.display())]
    #[cfg(feature = "ron")]
    Io {
        /// The file or folder being accessed.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
    /// The backing file is not a valid item manifest.
    #[error("Could not parse {}: {source}", .path.display())]
    #[cfg(feature = "ron")]
    Parse {
        /// The malformed file.
        path: PathBuf,
        /// Where and why parsing failed.
        source: ron::error::SpannedError,
    },
    /// The items could not be serialized.
    #[error("Could not serialize the item manifest: {0}")]
    #[cfg(feature = "ron")]
    Serialize(#[from] ron::Error),
}

/// An [`ItemStore`] that only lives in memory.
///
/// [`save`](ItemStore::save) is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryItemStore {
    items: Vec<Item>,
}

impl MemoryItemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored items, in storage order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, id: Id<Item>) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

impl ItemStore for MemoryItemStore {
    fn ids(&self) -> Vec<Id<Item>> {
        self.items.iter().map(Item::id).collect()
    }

    fn load(&self, id: Id<Item>) -> Option<Item> {
        self.position(id).map(|index| self.items[index].clone())
    }

    fn insert(&mut self, item: Item) -> Result<Id<Item>, StoreError> {
        let id = item.id();

        if self.position(id).is_some() {
            Err(InvalidNameError::Duplicate(item.name().to_string()).into())
        } else {
            self.items.push(item);
            Ok(id)
        }
    }

    fn replace(&mut self, id: Id<Item>, item: Item) -> Result<Id<Item>, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let new_id = item.id();

        if new_id != id && self.position(new_id).is_some() {
            return Err(InvalidNameError::Duplicate(item.name().to_string()).into());
        }

        self.items[index] = item;
        Ok(new_id)
    }

    fn remove(&mut self, id: Id<Item>) -> Result<Item, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;

        Ok(self.items.remove(index))
    }

    fn save(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// An [`ItemStore`] backed by a single RON manifest file.
///
/// The whole file is read on [`open`](RonItemStore::open) and rewritten on every [`save`](ItemStore::save).
#[cfg(feature = "ron")]
#[derive(Debug, Clone, PartialEq)]
pub struct RonItemStore {
    path: PathBuf,
    items: MemoryItemStore,
}

#[cfg(feature = "ron")]
impl RonItemStore {
    /// Opens the manifest at `path`.
    ///
    /// A missing file is treated as an empty store, and will be created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut items = MemoryItemStore::new();

        if path.exists() {
            let serialized = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            let raw_manifest: crate::manifest::RawItemManifest = ron::de::from_str(&serialized)
                .map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?;

            for raw_item in raw_manifest.items {
                items.insert(Item::try_from(raw_item)?)?;
            }
        }

        debug!("Opened {} with {} items.", path.display(), items.len());
        Ok(Self { path, items })
    }

    /// The manifest file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored items, in storage order.
    pub fn items(&self) -> &[Item] {
        self.items.items()
    }
}

#[cfg(feature = "ron")]
impl ItemStore for RonItemStore {
    fn ids(&self) -> Vec<Id<Item>> {
        self.items.ids()
    }

    fn load(&self, id: Id<Item>) -> Option<Item> {
        self.items.load(id)
    }

    fn insert(&mut self, item: Item) -> Result<Id<Item>, StoreError> {
        self.items.insert(item)
    }

    fn replace(&mut self, id: Id<Item>, item: Item) -> Result<Id<Item>, StoreError> {
        self.items.replace(id, item)
    }

    fn remove(&mut self, id: Id<Item>) -> Result<Item, StoreError> {
        self.items.remove(id)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        let raw_manifest: crate::manifest::RawItemManifest = self.items.items().iter().collect();
        let serialized = ron::ser::to_string_pretty(&raw_manifest, Default::default())?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, serialized).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Saved {} items to {}.", self.items.len(), self.path.display());
        Ok(())
    }
}
