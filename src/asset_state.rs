//! Ties the loading of the item catalog into your app's [`States`].

use bevy::state::state::{FreelyMutableState, States};

/// Maps your own [`States`] enum onto the stages of getting the [`ItemCatalog`](crate::catalog::ItemCatalog) ready.
///
/// Using this trait is optional: the systems in [`plugin`](crate::plugin) can be scheduled by hand instead.
pub trait CatalogLoadingState: States + FreelyMutableState {
    /// The raw item manifest is being read from disk.
    const LOADING: Self;
    /// The raw item manifest has been read, and is being converted into an item catalog.
    const BUILDING: Self;
    /// The item catalog is available as a resource.
    const READY: Self;
    /// The manifest could not be loaded or converted.
    ///
    /// The logs explain why.
    const FAILED: Self;
}

/// A ready-made [`CatalogLoadingState`] for apps that do nothing else until their items are loaded.
#[derive(PartialEq, Eq, Debug, Hash, Clone, Copy, Default, States)]
pub enum SimpleCatalogState {
    /// See [`CatalogLoadingState::LOADING`].
    #[default]
    Loading,
    /// See [`CatalogLoadingState::BUILDING`].
    Building,
    /// See [`CatalogLoadingState::READY`].
    Ready,
    /// See [`CatalogLoadingState::FAILED`].
    Failed,
}

impl CatalogLoadingState for SimpleCatalogState {
    const LOADING: Self = SimpleCatalogState::Loading;
    const BUILDING: Self = SimpleCatalogState::Building;
    const READY: Self = SimpleCatalogState::Ready;
    const FAILED: Self = SimpleCatalogState::Failed;
}
