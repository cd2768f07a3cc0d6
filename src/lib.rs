#![doc = include_str!("../README.md")]

pub mod asset_state;
pub mod attribute;
pub mod catalog;
pub mod chest;
pub mod identifier;
pub mod item;
pub mod manifest;
pub mod plugin;
pub mod populator;
pub mod registry;
pub mod store;
