//! Items are keyed by `Id<T>`, a small hash of their human-readable name.
//!
//! Chests store these ids rather than the items themselves,
//! so an item can be shared between any number of chests and looked up again in the [`ItemCatalog`](crate::catalog::ItemCatalog).

use serde::{Deserialize, Serialize};
use std::{fmt::Debug, hash::Hash, marker::PhantomData};

/// The stable identifier of an object of type `T`.
///
/// Ids are produced by hashing names with [`Id::from_name`], so the same name always yields the same id,
/// across runs and across machines.
/// An id is only a reference: it may outlive the object it names,
/// in which case lookups simply return [`None`].
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    /// The polynomial hash of the name.
    value: u64,

    #[serde(skip)]
    _phantom: PhantomData<T>,
}

/// Base of the polynomial rolling hash.
///
/// A small prime, close to the size of the alphabet commonly used in names.
const HASH_BASE: u64 = 53;

/// Modulus of the polynomial rolling hash.
///
/// A large prime keeps the odds of two names colliding low.
const HASH_MODULUS: u64 = 1_000_000_009;

impl<T> Id<T> {
    /// Hashes a name into an id.
    ///
    /// # Example
    ///
    /// ```
    /// use loot_manifest::identifier::Id;
    ///
    /// struct Potion;
    ///
    /// const HEALING: Id<Potion> = Id::from_name("Healing Draught");
    ///
    /// assert_eq!(HEALING, Id::from_name("Healing Draught"));
    /// assert_ne!(HEALING, Id::from_name("Mana Draught"));
    /// ```
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut value = 0;
        let mut power = 1;

        // `for` loops are not allowed in const fns.
        let mut index = 0;
        while index < bytes.len() {
            value = (value + (bytes[index] as u64 + 1) * power) % HASH_MODULUS;
            power = (power * HASH_BASE) % HASH_MODULUS;
            index += 1;
        }

        Id {
            value,
            _phantom: PhantomData,
        }
    }

    /// The raw hash value.
    pub const fn value(&self) -> u64 {
        self.value
    }
}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}
