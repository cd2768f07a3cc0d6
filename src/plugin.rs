//! Bevy plugins that load the [`ItemCatalog`] and manage [`Chest`] components.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use bevy::app::{App, Plugin, PreUpdate, Update};
use bevy::asset::{AssetApp, AssetLoadFailedEvent, AssetServer, Assets, Handle, LoadState};
use bevy::ecs::prelude::*;
use bevy::log::{debug, error, error_once, info, warn};
use bevy::state::app::AppExtStates;
use bevy::state::condition::in_state;
use bevy::state::state::NextState;
use rand::{rngs::StdRng, SeedableRng};

use crate::asset_state::CatalogLoadingState;
use crate::catalog::ItemCatalog;
use crate::chest::Chest;
use crate::manifest::{ManifestFormat, RawItemManifest};
use crate::populator::{ChestPopulator, ChestSelectionMethod};
use crate::registry::AttributeRegistry;

/// Loads the raw item manifest through Bevy's asset pipeline and turns it into the [`ItemCatalog`] resource.
///
/// The app moves through the states of `S`: it starts in [`CatalogLoadingState::LOADING`],
/// moves to [`CatalogLoadingState::BUILDING`] once the file is read,
/// and ends up in [`CatalogLoadingState::READY`] (or [`CatalogLoadingState::FAILED`]).
///
/// [`AssetPlugin`](bevy::asset::AssetPlugin) and [`StatesPlugin`](bevy::state::app::StatesPlugin)
/// **must** be added before this plugin.
///
/// The [`AttributeRegistry`] resource is initialized as well.
/// Send [`RebuildItemCatalog`] to rebuild the catalog after the manifest changes.
#[derive(Debug)]
pub struct ItemCatalogPlugin<S: CatalogLoadingState> {
    /// Path to the raw item manifest, relative to the asset folder.
    ///
    /// Defaults to `items.ron`.
    pub manifest_path: PathBuf,
    /// The file format of the raw item manifest.
    ///
    /// Defaults to [`ManifestFormat::Ron`] when the `ron` feature is enabled.
    pub format: ManifestFormat,
    /// If true, the app will automatically transition between catalog loading states.
    /// If false, you must manually transition between states using the [`NextState`] resource.
    ///
    /// Defaults to `true`.
    pub automatically_advance_states: bool,
    /// Whether the plugin should set the initial state to `S::LOADING`.
    ///
    /// Defaults to `true`.
    pub set_initial_state: bool,
    /// A phantom data field to satisfy the type system.
    pub _phantom: PhantomData<S>,
}

impl<S: CatalogLoadingState> ItemCatalogPlugin<S> {
    /// Loads the raw item manifest at `manifest_path`, keeping every other setting at its default.
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            ..Default::default()
        }
    }
}

impl<S: CatalogLoadingState> Default for ItemCatalogPlugin<S> {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("items.ron"),
            format: ManifestFormat::default(),
            automatically_advance_states: true,
            set_initial_state: true,
            _phantom: PhantomData,
        }
    }
}

impl<S: CatalogLoadingState> Plugin for ItemCatalogPlugin<S> {
    fn build(&self, app: &mut App) {
        if self.set_initial_state {
            app.insert_state(S::LOADING);
        }

        app.init_asset::<RawItemManifest>()
            .init_resource::<AttributeRegistry>()
            .add_event::<RebuildItemCatalog>()
            .add_systems(
                PreUpdate,
                build_item_catalog
                    .run_if(in_state(S::BUILDING))
                    .run_if(not(resource_exists::<ItemCatalog>)),
            )
            .add_systems(
                Update,
                (
                    report_failed_manifest_loading,
                    rebuild_item_catalog.run_if(resource_exists::<ItemCatalog>),
                ),
            );

        if self.automatically_advance_states {
            app.add_systems(
                Update,
                check_if_manifest_has_loaded::<S>.run_if(in_state(S::LOADING)),
            )
            .add_systems(
                Update,
                check_if_catalog_is_built::<S>.run_if(in_state(S::BUILDING)),
            );
        }

        // The asset type is always known when loading, so no extensions are needed to pick the loader.
        match self.format {
            #[cfg(feature = "ron")]
            ManifestFormat::Ron => {
                app.add_plugins(bevy_common_assets::ron::RonAssetPlugin::<RawItemManifest>::new(&[]));
            }
            #[cfg(feature = "json")]
            ManifestFormat::Json => {
                app.add_plugins(
                    bevy_common_assets::json::JsonAssetPlugin::<RawItemManifest>::new(&[]),
                );
            }
            ManifestFormat::Custom => (), // Users must register their own asset loader for custom formats.
        }

        let handle: Handle<RawItemManifest> = app
            .world()
            .resource::<AssetServer>()
            .load(self.manifest_path.clone());

        app.insert_resource(ItemManifestTracker::new(self.manifest_path.clone(), handle));
    }
}

/// Asks for the [`ItemCatalog`] to be rebuilt from the currently loaded raw item manifest.
///
/// If the manifest no longer converts cleanly, the previous catalog is kept.
#[derive(Event, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildItemCatalog;

/// Keeps track of the raw item manifest, and of its conversion into an [`ItemCatalog`].
#[derive(Resource, Debug, Clone)]
pub struct ItemManifestTracker {
    path: PathBuf,
    handle: Handle<RawItemManifest>,
    load_status: ManifestLoadStatus,
    processing_status: ProcessingStatus,
}

/// How far along the asset server is with reading the raw item manifest.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ManifestLoadStatus {
    /// The file is still being read.
    #[default]
    Loading,
    /// The raw manifest is available in [`Assets`].
    Loaded,
    /// The file is missing or malformed.
    Failed,
}

/// The current processing status of the raw item manifest into an [`ItemCatalog`].
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ProcessingStatus {
    /// The catalog has not been built yet.
    #[default]
    Processing,
    /// The catalog is available as a resource.
    Ready,
    /// The raw manifest could not be converted.
    Failed,
}

impl ItemManifestTracker {
    /// Tracks the raw item manifest loaded from `path` through `handle`.
    pub fn new(path: impl Into<PathBuf>, handle: Handle<RawItemManifest>) -> Self {
        Self {
            path: path.into(),
            handle,
            load_status: ManifestLoadStatus::default(),
            processing_status: ProcessingStatus::default(),
        }
    }

    /// The path the raw item manifest is loaded from, relative to the asset folder.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A strong handle to the raw item manifest.
    pub fn handle(&self) -> &Handle<RawItemManifest> {
        &self.handle
    }

    /// The load status as of the last [`update_load_status`](Self::update_load_status).
    pub fn load_status(&self) -> ManifestLoadStatus {
        self.load_status
    }

    /// Polls the asset server for the load state of the raw item manifest.
    pub fn update_load_status(&mut self, asset_server: &AssetServer) -> ManifestLoadStatus {
        self.load_status = match asset_server.get_load_state(self.handle.id()) {
            Some(LoadState::Loaded) => ManifestLoadStatus::Loaded,
            Some(LoadState::Failed(_)) => ManifestLoadStatus::Failed,
            _ => ManifestLoadStatus::Loading,
        };

        self.load_status
    }

    /// How far along the conversion into an [`ItemCatalog`] is.
    pub fn processing_status(&self) -> ProcessingStatus {
        self.processing_status
    }

    /// Records the outcome of converting the raw item manifest.
    pub fn set_processing_status(&mut self, status: ProcessingStatus) {
        self.processing_status = status;
    }
}

/// Moves to [`CatalogLoadingState::BUILDING`] once the raw item manifest has loaded,
/// or to [`CatalogLoadingState::FAILED`] if it could not be loaded.
pub fn check_if_manifest_has_loaded<S: CatalogLoadingState>(
    asset_server: Res<AssetServer>,
    mut tracker: ResMut<ItemManifestTracker>,
    mut next_state: ResMut<NextState<S>>,
) {
    match tracker.update_load_status(asset_server.as_ref()) {
        ManifestLoadStatus::Loaded => {
            info!("The item manifest at {} has loaded.", tracker.path().display());
            next_state.set(S::BUILDING);
        }
        ManifestLoadStatus::Failed => {
            error!("The item manifest at {} failed to load.", tracker.path().display());
            next_state.set(S::FAILED);
        }
        ManifestLoadStatus::Loading => (),
    }
}

/// Moves to [`CatalogLoadingState::READY`] once the [`ItemCatalog`] is built,
/// or to [`CatalogLoadingState::FAILED`] if it could not be built.
pub fn check_if_catalog_is_built<S: CatalogLoadingState>(
    tracker: Res<ItemManifestTracker>,
    mut next_state: ResMut<NextState<S>>,
) {
    match tracker.processing_status() {
        ProcessingStatus::Ready => {
            info!("The item catalog is ready.");
            next_state.set(S::READY);
        }
        ProcessingStatus::Failed => {
            error!("The item catalog could not be built.");
            next_state.set(S::FAILED);
        }
        ProcessingStatus::Processing => (),
    }
}

/// Reports why the raw item manifest failed to load.
///
/// [`LoadState::Failed`] is polled separately, so this only exists to surface the error itself.
pub fn report_failed_manifest_loading(
    mut events: EventReader<AssetLoadFailedEvent<RawItemManifest>>,
) {
    for event in events.read() {
        error_once!(
            "Failed to load the item manifest at {} due to {:?}",
            event.path,
            event.error
        );
    }
}

/// Converts the loaded raw item manifest into the [`ItemCatalog`] resource.
///
/// The raw manifest is kept in [`Assets`], so that the catalog can later be rebuilt from it.
pub fn build_item_catalog(
    mut commands: Commands,
    mut tracker: ResMut<ItemManifestTracker>,
    raw_manifests: Res<Assets<RawItemManifest>>,
) {
    if tracker.processing_status() != ProcessingStatus::Processing {
        return;
    }

    let Some(raw_manifest) = raw_manifests.get(tracker.handle()) else {
        error_once!(
            "The item manifest at {} is not in the asset server.",
            tracker.path().display()
        );
        return;
    };

    match ItemCatalog::from_raw_manifest(raw_manifest) {
        Ok(catalog) => {
            debug!("Built an item catalog with {} items.", catalog.len());
            commands.insert_resource(catalog);
            tracker.set_processing_status(ProcessingStatus::Ready);
        }
        Err(err) => {
            error!("Failed to build the item catalog: {err}");
            tracker.set_processing_status(ProcessingStatus::Failed);
        }
    }
}

/// Rebuilds the [`ItemCatalog`] from the current raw item manifest whenever [`RebuildItemCatalog`] is sent.
pub fn rebuild_item_catalog(
    mut requests: EventReader<RebuildItemCatalog>,
    tracker: Res<ItemManifestTracker>,
    raw_manifests: Res<Assets<RawItemManifest>>,
    mut catalog: ResMut<ItemCatalog>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let Some(raw_manifest) = raw_manifests.get(tracker.handle()) else {
        error!(
            "Cannot rebuild the item catalog: the item manifest at {} is not loaded.",
            tracker.path().display()
        );
        return;
    };

    match ItemCatalog::from_raw_manifest(raw_manifest) {
        Ok(rebuilt) => {
            info!("Rebuilt the item catalog with {} items.", rebuilt.len());
            catalog.replace_with(rebuilt);
        }
        Err(err) => error!("Keeping the previous item catalog, as the rebuild failed: {err}"),
    }
}

/// Handles requests to fill, empty and inspect [`Chest`]s.
///
/// Every change made to a chest is announced with a [`ChestModified`] event,
/// so that editors and save systems can record it.
#[derive(Debug, Clone, Default)]
pub struct ChestPlugin {
    /// Seed for the random number generator used by [`ItemSelection::ByAttribute`](crate::populator::ItemSelection::ByAttribute).
    ///
    /// If [`None`], the generator is seeded from the operating system.
    pub rng_seed: Option<u64>,
}

impl Plugin for ChestPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        app.insert_resource(ChestRng(rng))
            .add_event::<PopulateChests>()
            .add_event::<ClearChests>()
            .add_event::<InspectChest>()
            .add_event::<ChestModified>()
            .add_systems(Update, (clear_chests, populate_chests, inspect_chests).chain());
    }
}

/// Marks a chest as part of the current selection, for [`ChestSelectionMethod::Selected`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedChest;

/// The random number generator used to draw loot.
#[derive(Resource, Debug, Clone)]
pub struct ChestRng(pub StdRng);

/// Fills the targeted chests using `populator`.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PopulateChests {
    /// Which chests to fill.
    pub method: ChestSelectionMethod,
    /// What to fill them with.
    pub populator: ChestPopulator,
}

/// Empties the targeted chests.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearChests {
    /// Which chests to empty.
    pub method: ChestSelectionMethod,
}

/// Logs the contents of a chest.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectChest {
    /// The chest to describe.
    pub entity: Entity,
}

/// Sent after the contents of a chest have changed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChestModified {
    /// The chest that changed.
    pub entity: Entity,
}

/// Handles [`PopulateChests`] requests.
///
/// Chests are filled one at a time; if a chest cannot be filled, it is left untouched and the rest of the request is abandoned.
/// Chests filled before the failure stay filled.
pub fn populate_chests(
    mut requests: EventReader<PopulateChests>,
    catalog: Option<Res<ItemCatalog>>,
    mut rng: ResMut<ChestRng>,
    mut chests: Query<(Entity, &mut Chest, Has<SelectedChest>)>,
    mut modified: EventWriter<ChestModified>,
) {
    // Manual selections don't need a catalog, and random ones fail cleanly against an empty one.
    let unbuilt = ItemCatalog::new();
    let catalog = catalog.as_deref().unwrap_or(&unbuilt);

    for request in requests.read() {
        let mut filled = 0;

        for (entity, mut chest, is_selected) in chests.iter_mut() {
            if !request.method.includes(is_selected) {
                continue;
            }

            match request.populator.populate(&mut chest, catalog, &mut rng.0) {
                Ok(()) => {
                    modified.send(ChestModified { entity });
                    filled += 1;
                }
                Err(err) => {
                    error!("Could not populate chest {entity:?}, stopping after {filled} chests: {err}");
                    break;
                }
            }
        }

        debug!("Populated {filled} chests.");
    }
}

/// Handles [`ClearChests`] requests.
pub fn clear_chests(
    mut requests: EventReader<ClearChests>,
    mut chests: Query<(Entity, &mut Chest, Has<SelectedChest>)>,
    mut modified: EventWriter<ChestModified>,
) {
    for request in requests.read() {
        for (entity, mut chest, is_selected) in chests.iter_mut() {
            if request.method.includes(is_selected) {
                chest.clear();
                modified.send(ChestModified { entity });
            }
        }
    }
}

/// Handles [`InspectChest`] requests, logging a description of each item in the chest.
pub fn inspect_chests(
    mut requests: EventReader<InspectChest>,
    catalog: Option<Res<ItemCatalog>>,
    chests: Query<&Chest>,
) {
    let unbuilt = ItemCatalog::new();
    let catalog = catalog.as_deref().unwrap_or(&unbuilt);

    for InspectChest { entity } in requests.read() {
        match chests.get(*entity) {
            Ok(chest) => info!("Chest {entity:?}:\n{}", chest.describe(catalog)),
            Err(_) => warn!("Cannot inspect {entity:?}, as it is not a chest."),
        }
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "ron")]
    use std::time::Duration;

    #[cfg(feature = "ron")]
    use bevy::{
        asset::AssetPlugin,
        state::{app::StatesPlugin, state::State},
        MinimalPlugins,
    };
    use bevy::ecs::event::Events;

    use super::*;
    #[cfg(feature = "ron")]
    use crate::asset_state::SimpleCatalogState;
    use crate::{attribute::AttributeKind, identifier::Id, item::Item, manifest::RawItem};

    fn chest_app() -> App {
        let mut app = App::new();
        app.add_plugins(ChestPlugin { rng_seed: Some(11) });
        app.insert_resource(
            ItemCatalog::from_items([
                Item::new("Feather", &[AttributeKind::Weight]).unwrap(),
                Item::new("Spear", &[AttributeKind::Damage]).unwrap(),
            ])
            .unwrap(),
        );
        app
    }

    fn modified_chests(app: &App) -> Vec<Entity> {
        let events = app.world().resource::<Events<ChestModified>>();
        let mut reader = events.get_reader();
        reader.read(events).map(|event| event.entity).collect()
    }

    fn contents(app: &App, entity: Entity) -> Vec<Id<Item>> {
        app.world().get::<Chest>(entity).unwrap().contents().to_vec()
    }

    #[test]
    fn manual_population_only_touches_selected_chests() {
        let mut app = chest_app();
        let a = Id::from_name("A");
        let b = Id::from_name("B");
        let selected = app.world_mut().spawn((Chest::new(), SelectedChest)).id();
        let unselected = app.world_mut().spawn(Chest::new()).id();

        app.world_mut().send_event(PopulateChests {
            method: ChestSelectionMethod::Selected,
            populator: ChestPopulator::manual([a, b]).clear_on_add(true),
        });
        app.update();

        assert_eq!(contents(&app, selected), vec![a, b]);
        assert!(contents(&app, unselected).is_empty());
        assert_eq!(modified_chests(&app), vec![selected]);
    }

    #[test]
    fn populating_all_chests_by_attribute() {
        let mut app = chest_app();
        let feather = Id::from_name("Feather");
        let first = app.world_mut().spawn(Chest::new()).id();
        let second = app.world_mut().spawn((Chest::new(), SelectedChest)).id();

        app.world_mut().send_event(PopulateChests {
            method: ChestSelectionMethod::All,
            populator: ChestPopulator::by_attribute([AttributeKind::Weight, AttributeKind::Weight]),
        });
        app.update();

        assert_eq!(contents(&app, first), vec![feather, feather]);
        assert_eq!(contents(&app, second), vec![feather, feather]);
        assert_eq!(modified_chests(&app).len(), 2);
    }

    #[test]
    fn failed_population_leaves_chests_alone() {
        let mut app = chest_app();
        let old = Id::from_name("Old");
        let chest = app
            .world_mut()
            .spawn(([old].into_iter().collect::<Chest>(), SelectedChest))
            .id();

        app.world_mut().send_event(PopulateChests {
            method: ChestSelectionMethod::Selected,
            populator: ChestPopulator::by_attribute([AttributeKind::Armor]).clear_on_add(true),
        });
        app.update();

        assert_eq!(contents(&app, chest), vec![old]);
        assert!(modified_chests(&app).is_empty());
    }

    #[test]
    fn manual_population_works_without_a_catalog() {
        let mut app = App::new();
        app.add_plugins(ChestPlugin::default());
        let key = Id::from_name("Key");
        let chest = app.world_mut().spawn(Chest::new()).id();

        app.world_mut().send_event(PopulateChests {
            method: ChestSelectionMethod::All,
            populator: ChestPopulator::manual([key]),
        });
        app.update();

        assert_eq!(contents(&app, chest), vec![key]);
    }

    #[test]
    fn clearing_all_chests() {
        let mut app = chest_app();
        let coin = Id::from_name("Coin");
        let first = app.world_mut().spawn([coin].into_iter().collect::<Chest>()).id();
        let second = app
            .world_mut()
            .spawn(([coin, coin].into_iter().collect::<Chest>(), SelectedChest))
            .id();

        app.world_mut().send_event(ClearChests {
            method: ChestSelectionMethod::All,
        });
        app.update();

        assert!(contents(&app, first).is_empty());
        assert!(contents(&app, second).is_empty());
        assert_eq!(modified_chests(&app).len(), 2);
    }

    #[test]
    fn clearing_only_selected_chests() {
        let mut app = chest_app();
        let coin = Id::from_name("Coin");
        let selected = app
            .world_mut()
            .spawn(([coin].into_iter().collect::<Chest>(), SelectedChest))
            .id();
        let unselected = app.world_mut().spawn([coin].into_iter().collect::<Chest>()).id();

        app.world_mut().send_event(ClearChests {
            method: ChestSelectionMethod::Selected,
        });
        app.update();

        assert!(contents(&app, selected).is_empty());
        assert_eq!(contents(&app, unselected), vec![coin]);
        assert_eq!(modified_chests(&app), vec![selected]);
    }

    #[test]
    fn inspecting_leaves_chests_alone() {
        let mut app = chest_app();
        let feather = Id::from_name("Feather");
        let chest = app.world_mut().spawn([feather].into_iter().collect::<Chest>()).id();
        let not_a_chest = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(InspectChest { entity: chest });
        app.world_mut().send_event(InspectChest {
            entity: not_a_chest,
        });
        app.update();

        assert_eq!(contents(&app, chest), vec![feather]);
        assert!(app.world().get::<Chest>(not_a_chest).is_none());
        assert!(modified_chests(&app).is_empty());
    }

    /// Runs the app until the item catalog is either ready or has failed to load.
    #[cfg(feature = "ron")]
    fn load_catalog(manifest_path: &str) -> (App, SimpleCatalogState) {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default(), StatesPlugin))
            .add_plugins(ItemCatalogPlugin::<SimpleCatalogState>::new(manifest_path));
        app.finish();
        app.cleanup();

        for _ in 0..500 {
            app.update();

            let state = *app.world().resource::<State<SimpleCatalogState>>().get();
            if matches!(state, SimpleCatalogState::Ready | SimpleCatalogState::Failed) {
                return (app, state);
            }

            std::thread::sleep(Duration::from_millis(10));
        }

        panic!("The item catalog was still loading after 5 seconds.");
    }

    #[cfg(feature = "ron")]
    #[test]
    fn sample_manifest_reaches_ready() {
        let (app, state) = load_catalog("items.ron");

        assert_eq!(state, SimpleCatalogState::Ready);

        let catalog = app.world().resource::<ItemCatalog>();
        assert!(catalog.is_built());
        assert_eq!(catalog.len(), 6);
        assert!(catalog.get_by_name("Tower Shield").is_some());
        assert!(app.world().contains_resource::<AttributeRegistry>());
    }

    #[cfg(feature = "ron")]
    #[test]
    fn missing_manifest_reaches_failed() {
        let (app, state) = load_catalog("no_such_items.ron");

        assert_eq!(state, SimpleCatalogState::Failed);
        assert!(app.world().get_resource::<ItemCatalog>().is_none());
    }

    fn catalog_app(raw_manifest: RawItemManifest) -> (App, Handle<RawItemManifest>) {
        let mut app = App::new();
        app.init_resource::<Assets<RawItemManifest>>()
            .add_event::<RebuildItemCatalog>()
            .add_systems(
                Update,
                (
                    build_item_catalog,
                    rebuild_item_catalog.run_if(resource_exists::<ItemCatalog>),
                ),
            );

        let handle = app
            .world_mut()
            .resource_mut::<Assets<RawItemManifest>>()
            .add(raw_manifest);
        app.insert_resource(ItemManifestTracker::new("items.ron", handle.clone()));

        (app, handle)
    }

    fn raw_item(name: &str, kinds: &[AttributeKind]) -> RawItem {
        RawItem::from(&Item::new(name, kinds).unwrap())
    }

    #[test]
    fn raw_manifests_are_built_into_catalogs() {
        let (mut app, _handle) = catalog_app(RawItemManifest {
            items: vec![
                raw_item("Helm", &[AttributeKind::Armor]),
                raw_item("Mace", &[AttributeKind::Damage]),
            ],
        });

        app.update();

        let catalog = app.world().resource::<ItemCatalog>();
        assert!(catalog.is_built());
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            app.world().resource::<ItemManifestTracker>().processing_status(),
            ProcessingStatus::Ready
        );
    }

    #[test]
    fn invalid_raw_manifests_fail_to_build() {
        let (mut app, _handle) = catalog_app(RawItemManifest {
            items: vec![raw_item("Helm", &[]), raw_item("Helm", &[])],
        });

        app.update();

        assert!(app.world().get_resource::<ItemCatalog>().is_none());
        assert_eq!(
            app.world().resource::<ItemManifestTracker>().processing_status(),
            ProcessingStatus::Failed
        );
    }

    #[test]
    fn rebuilding_picks_up_manifest_changes() {
        let (mut app, handle) = catalog_app(RawItemManifest {
            items: vec![raw_item("Helm", &[AttributeKind::Armor])],
        });
        app.update();

        app.world_mut()
            .resource_mut::<Assets<RawItemManifest>>()
            .get_mut(&handle)
            .unwrap()
            .items
            .push(raw_item("Boots", &[AttributeKind::Armor]));

        // Without a request, the catalog is left alone.
        app.update();
        assert_eq!(app.world().resource::<ItemCatalog>().len(), 1);

        app.world_mut().send_event(RebuildItemCatalog);
        app.update();

        let catalog = app.world().resource::<ItemCatalog>();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get_by_name("Boots").is_some());
    }
}
