//! The on-disk form of the item catalog.
//!
//! Items are stored as a flat list of [`RawItem`]s inside a [`RawItemManifest`].
//! This is easy to hand-author and diff:
//!
//! ```ron
//! (
//!     items: [
//!         (
//!             name: "Iron Sword",
//!             attributes: [
//!                 Damage((damage: 8.0, damage_types: "PIERCING")),
//!                 Weight((weight: 3.0)),
//!             ],
//!         ),
//!     ],
//! )
//! ```
//!
//! The raw manifest is converted into an [`ItemCatalog`](crate::catalog::ItemCatalog) once loaded,
//! which validates names and builds the id lookup table.

use bevy::{asset::Asset, reflect::TypePath};
use serde::{Deserialize, Serialize};

use crate::{attribute::Attribute, item::Item};

/// The serialization-friendly form of an [`Item`].
///
/// Unlike [`Item`], nothing here is validated:
/// conversion is done via [`TryFrom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// The name of the item, which must be unique within the manifest.
    pub name: String,
    /// May be omitted for items without attributes.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl From<&Item> for RawItem {
    fn from(item: &Item) -> Self {
        RawItem {
            name: item.name().to_string(),
            attributes: item.attributes().to_vec(),
        }
    }
}

/// Every item known to a project, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Asset, TypePath, Serialize, Deserialize)]
pub struct RawItemManifest {
    /// Every item, in storage order.
    #[serde(default)]
    pub items: Vec<RawItem>,
}

impl<'a> FromIterator<&'a Item> for RawItemManifest {
    fn from_iter<I: IntoIterator<Item = &'a Item>>(iter: I) -> Self {
        RawItemManifest {
            items: iter.into_iter().map(RawItem::from).collect(),
        }
    }
}

/// The file format of the raw item manifest loaded by the [`ItemCatalogPlugin`](crate::plugin::ItemCatalogPlugin).
///
/// All of the corresponding features except `ron` are off by default, and must be enabled with feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    #[cfg(feature = "ron")]
    /// A Rust-specific configuration format that is easy for both humans and machines to read and write.
    Ron,
    #[cfg(feature = "json")]
    /// A standard configuration format that is easy for both humans and machines to read and write.
    Json,
    /// Your own custom format.
    ///
    /// If this is selected, you will need to register your own [`bevy::asset::AssetLoader`] for [`RawItemManifest`].
    Custom,
}

impl Default for ManifestFormat {
    #[cfg(feature = "ron")]
    fn default() -> Self {
        ManifestFormat::Ron
    }

    #[cfg(not(feature = "ron"))]
    fn default() -> Self {
        ManifestFormat::Custom
    }
}
