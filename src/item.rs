//! Items are named bundles of [`Attribute`]s.

use thiserror::Error;

use crate::{
    attribute::{Attribute, AttributeKind},
    identifier::Id,
    manifest::RawItem,
};

/// A single kind of item that can be placed into chests, such as "Iron Sword".
///
/// An item exclusively owns its attributes.
/// Attributes of the same kind may appear more than once.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    attributes: Vec<Attribute>,
}

impl Item {
    /// Creates a new item with one default-valued attribute per requested kind, in the order requested.
    ///
    /// Names must not be empty.
    /// Checking the name against other items is left to the [`ItemStore`](crate::store::ItemStore) that persists it.
    pub fn new(name: impl Into<String>, kinds: &[AttributeKind]) -> Result<Self, InvalidNameError> {
        let attributes = kinds.iter().copied().map(Attribute::new).collect();

        Self::with_attributes(name, attributes)
    }

    /// Creates a new item from fully specified attributes.
    pub fn with_attributes(
        name: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Result<Self, InvalidNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidNameError::Empty);
        }

        Ok(Self { name, attributes })
    }

    /// The identifier of this item, derived from its name.
    pub fn id(&self) -> Id<Item> {
        Id::from_name(&self.name)
    }

    /// The unique, human-readable name of this item.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attributes of this item, in the order they were added.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Mutable access to the attribute values, for editing tools.
    ///
    /// The kind of an existing attribute should not be changed through this:
    /// remove it and add a new one instead.
    pub fn attributes_mut(&mut self) -> &mut [Attribute] {
        &mut self.attributes
    }

    /// Returns true if at least one attribute has the given kind.
    pub fn has_attribute(&self, kind: AttributeKind) -> bool {
        self.attributes
            .iter()
            .any(|attribute| attribute.kind() == kind)
    }

    /// Appends a default-valued attribute of the given kind.
    pub fn add_attribute(&mut self, kind: AttributeKind) {
        self.attributes.push(Attribute::new(kind));
    }

    /// Appends an attribute.
    pub fn push_attribute(&mut self, attribute: impl Into<Attribute>) {
        self.attributes.push(attribute.into());
    }

    /// Removes and returns the attribute at `index`, if there is one.
    pub fn remove_attribute(&mut self, index: usize) -> Option<Attribute> {
        if index < self.attributes.len() {
            Some(self.attributes.remove(index))
        } else {
            None
        }
    }

    /// A multi-line, human-readable summary of this item.
    ///
    /// The name is underlined with `=`, followed by a blank line and each attribute's description,
    /// with a blank line after each attribute.
    pub fn describe(&self) -> String {
        let mut description = String::new();
        description.push_str(&self.name);
        description.push('\n');
        description.push_str(&"=".repeat(self.name.chars().count()));
        description.push_str("\n\n");

        for attribute in &self.attributes {
            description.push_str(&attribute.describe());
            description.push('\n');
        }

        description
    }
}

impl TryFrom<RawItem> for Item {
    type Error = InvalidNameError;

    fn try_from(raw_item: RawItem) -> Result<Self, Self::Error> {
        Item::with_attributes(raw_item.name, raw_item.attributes)
    }
}

/// An item name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNameError {
    /// Items must have a name.
    #[error("Item names must not be empty.")]
    Empty,
    /// Another item already uses this name, or one that hashes to the same [`Id`].
    #[error("The name {0} is already in use.")]
    Duplicate(String),
}
