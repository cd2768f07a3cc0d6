//! Loads `assets/items.ron`, fills a few chests, and prints what ended up inside them.
//!
//! Only the selected chests receive a weapon, a piece of armor and something to carry;
//! every chest gets a gold coin.

use bevy::{app::AppExit, log::LogPlugin, prelude::*, state::app::StatesPlugin};
use loot_manifest::{
    asset_state::SimpleCatalogState,
    attribute::AttributeKind,
    catalog::ItemCatalog,
    chest::Chest,
    plugin::{ChestModified, ChestPlugin, ItemCatalogPlugin, PopulateChests, SelectedChest},
    populator::{ChestPopulator, ChestSelectionMethod},
};

fn main() {
    App::new()
        // `ItemCatalogPlugin` requires `AssetPlugin` and `StatesPlugin` to function.
        .add_plugins((
            MinimalPlugins,
            AssetPlugin::default(),
            LogPlugin::default(),
            StatesPlugin,
        ))
        // Loads `items.ron` and starts in `SimpleCatalogState::Loading`.
        .add_plugins(ItemCatalogPlugin::<SimpleCatalogState>::default())
        // A fixed seed gives the same loot on every run.
        .add_plugins(ChestPlugin { rng_seed: Some(42) })
        .add_systems(OnEnter(SimpleCatalogState::Ready), spawn_chests)
        .add_systems(OnEnter(SimpleCatalogState::Failed), give_up)
        .add_systems(
            PostUpdate,
            describe_modified_chests.run_if(in_state(SimpleCatalogState::Ready)),
        )
        .run();
}

fn spawn_chests(
    mut commands: Commands,
    catalog: Res<ItemCatalog>,
    mut requests: EventWriter<PopulateChests>,
) {
    info!("The item catalog holds {} items.", catalog.len());

    commands.spawn((Chest::new(), SelectedChest));
    commands.spawn((Chest::new(), SelectedChest));
    commands.spawn(Chest::new());

    requests.send(PopulateChests {
        method: ChestSelectionMethod::Selected,
        populator: ChestPopulator::by_attribute([
            AttributeKind::Damage,
            AttributeKind::Armor,
            AttributeKind::Weight,
        ])
        .clear_on_add(true),
    });

    if let Some(coin) = catalog.id_of("Gold Coin") {
        requests.send(PopulateChests {
            method: ChestSelectionMethod::All,
            populator: ChestPopulator::manual([coin]),
        });
    }
}

fn describe_modified_chests(
    mut modified: EventReader<ChestModified>,
    chests: Query<&Chest>,
    catalog: Res<ItemCatalog>,
    mut app_exit_events: EventWriter<AppExit>,
) {
    if modified.is_empty() {
        return;
    }

    let mut seen = Vec::new();
    for ChestModified { entity } in modified.read() {
        if seen.contains(entity) {
            continue;
        }
        seen.push(*entity);

        if let Ok(chest) = chests.get(*entity) {
            info!("Chest {entity:?} now holds:\n{}", chest.describe(&catalog));
        }
    }

    app_exit_events.send_default();
}

fn give_up(mut app_exit_events: EventWriter<AppExit>) {
    error!("The item catalog could not be loaded.");
    app_exit_events.send(AppExit::error());
}
