//! The [`AttributeRegistry`] lists which kinds of attributes are available to item authoring tools.
//!
//! Kinds are known at compile time via [`AttributeKind::ALL`],
//! so "scanning" is simply copying that list into a fresh registry.

use bevy::ecs::system::Resource;
use thiserror::Error;

use crate::attribute::{Attribute, AttributeKind};

/// The set of attribute kinds that can be attached to items.
///
/// Stored as a [`Resource`], and rebuilt only when [`rescan`](AttributeRegistry::rescan) is called.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct AttributeRegistry {
    kinds: Vec<AttributeKind>,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::scan()
    }
}

impl AttributeRegistry {
    /// Builds a registry containing every known attribute kind.
    pub fn scan() -> Self {
        Self {
            kinds: AttributeKind::ALL.to_vec(),
        }
    }

    /// Builds a registry restricted to the given kinds.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn with_kinds(kinds: impl IntoIterator<Item = AttributeKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }

        Self { kinds: unique }
    }

    /// Replaces the contents of this registry with a fresh [`scan`](Self::scan).
    pub fn rescan(&mut self) {
        *self = Self::scan();
    }

    /// The registered kinds, in registration order.
    pub fn kinds(&self) -> &[AttributeKind] {
        &self.kinds
    }

    /// The display names of the registered kinds, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.iter().map(|kind| kind.name())
    }

    /// Returns true if `kind` is registered.
    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Finds a registered kind by its name, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> Result<AttributeKind, AttributeNotFound> {
        self.kinds
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AttributeNotFound::Name(name.to_string()))
    }

    /// Creates a default-valued attribute of a registered kind.
    pub fn instantiate(&self, kind: AttributeKind) -> Result<Attribute, AttributeNotFound> {
        if self.contains(kind) {
            Ok(Attribute::new(kind))
        } else {
            Err(AttributeNotFound::Kind(kind))
        }
    }
}

/// A requested attribute kind is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeNotFound {
    /// No registered kind has this name.
    #[error("No attribute named {0} is registered.")]
    Name(String),
    /// The kind exists, but was left out of this registry.
    #[error("The {0} attribute is not registered.")]
    Kind(AttributeKind),
}
