//! Attributes are the building blocks of items: an item is little more than a name and a list of attributes.
//!
//! Each kind of attribute is its own struct implementing [`DescribeAttribute`],
//! and the closed [`Attribute`] enum ties them together so they can be stored, serialized and matched on.
//! [`AttributeKind`] is the matching fieldless tag, used whenever a kind needs to be requested or queried
//! without any attribute data attached.

use std::fmt::{self, Display};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Shared behavior of the concrete attribute structs.
///
/// Implementing this trait is all that is needed for a new attribute struct to produce a description.
pub trait DescribeAttribute {
    /// The heading of the description, e.g. "Weight Attribute".
    const TITLE: &'static str;

    /// The labelled fields of this attribute, in declaration order.
    fn fields(&self) -> Vec<(&'static str, String)>;

    /// A multi-line, human-readable summary of this attribute.
    ///
    /// The title is underlined with dashes, followed by one `Label: value` line per field.
    fn describe(&self) -> String {
        let mut description = String::new();
        description.push_str(Self::TITLE);
        description.push('\n');
        description.push_str(&"-".repeat(Self::TITLE.chars().count()));
        description.push('\n');

        for (label, value) in self.fields() {
            description.push_str(&format!("{label}: {value}\n"));
        }

        description
    }
}

/// How much an item weighs in the inventory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightAttribute {
    /// In kilograms.
    pub weight: f32,
}

impl DescribeAttribute for WeightAttribute {
    const TITLE: &'static str = "Weight Attribute";

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![("Weight", self.weight.to_string())]
    }
}

/// The weight class of a piece of armor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorType {
    /// Little protection, no hindrance.
    #[default]
    Light,
    /// Mail and the like.
    Medium,
    /// Plate, and the heaviest shields.
    Heavy,
}

impl Display for ArmorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArmorType::Light => "Light",
            ArmorType::Medium => "Medium",
            ArmorType::Heavy => "Heavy",
        };

        f.write_str(label)
    }
}

/// Where a piece of armor is worn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    /// Helmets, hoods and hats.
    #[default]
    Head,
    /// Gauntlets and bracers.
    Arms,
    /// Body armor.
    Chest,
    /// Greaves and leggings.
    Legs,
    /// Boots.
    Feet,
    /// Held in the off hand.
    Shield,
}

impl Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BodyPart::Head => "Head",
            BodyPart::Arms => "Arms",
            BodyPart::Chest => "Chest",
            BodyPart::Legs => "Legs",
            BodyPart::Feet => "Feet",
            BodyPart::Shield => "Shield",
        };

        f.write_str(label)
    }
}

/// Marks an item as armor, granting some amount of defense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorAttribute {
    /// The weight class of this armor.
    pub armor_type: ArmorType,
    /// Where this armor is worn.
    pub body_part: BodyPart,
    /// How much damage this armor absorbs.
    pub defense: f32,
}

impl DescribeAttribute for ArmorAttribute {
    const TITLE: &'static str = "Armor Attribute";

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Armor Type", self.armor_type.to_string()),
            ("Body Part", self.body_part.to_string()),
            ("Defense", self.defense.to_string()),
        ]
    }
}

bitflags! {
    /// Special kinds of damage a weapon deals on top of its base damage.
    ///
    /// Any combination of flags is valid.
    /// In human-readable formats these are written as `"PIERCING | POISON"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DamageTypes: u8 {
        /// Ignores part of the target's armor.
        const PIERCING = 1 << 0;
        /// Sets the target on fire.
        const BURNING = 1 << 1;
        /// Slows the target down.
        const FREEZING = 1 << 2;
        /// Deals damage over time.
        const POISON = 1 << 3;
    }
}

impl Default for DamageTypes {
    fn default() -> Self {
        DamageTypes::empty()
    }
}

impl DamageTypes {
    const LABELS: [(DamageTypes, &'static str); 4] = [
        (DamageTypes::PIERCING, "Piercing"),
        (DamageTypes::BURNING, "Burning"),
        (DamageTypes::FREEZING, "Freezing"),
        (DamageTypes::POISON, "Poison"),
    ];
}

impl Display for DamageTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }

        let labels: Vec<&str> = Self::LABELS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, label)| *label)
            .collect();

        f.write_str(&labels.join(", "))
    }
}

/// Lets an item deal damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageAttribute {
    /// Base damage per hit.
    pub damage: f32,
    /// Extra effects applied on hit.
    pub damage_types: DamageTypes,
}

impl DescribeAttribute for DamageAttribute {
    const TITLE: &'static str = "Damage Attribute";

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Damage", self.damage.to_string()),
            ("Special Damage Types", self.damage_types.to_string()),
        ]
    }
}

/// The kind of an [`Attribute`], without any of its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeKind {
    /// See [`WeightAttribute`].
    Weight,
    /// See [`ArmorAttribute`].
    Armor,
    /// See [`DamageAttribute`].
    Damage,
}

impl AttributeKind {
    /// Every kind of attribute, in declaration order.
    pub const ALL: [AttributeKind; 3] = [
        AttributeKind::Weight,
        AttributeKind::Armor,
        AttributeKind::Damage,
    ];

    /// The short name of this kind, as shown in selection lists.
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::Weight => "Weight",
            AttributeKind::Armor => "Armor",
            AttributeKind::Damage => "Damage",
        }
    }

    /// The heading used when describing attributes of this kind.
    pub const fn title(self) -> &'static str {
        match self {
            AttributeKind::Weight => WeightAttribute::TITLE,
            AttributeKind::Armor => ArmorAttribute::TITLE,
            AttributeKind::Damage => DamageAttribute::TITLE,
        }
    }
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single attribute attached to an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Attribute {
    /// How heavy the item is.
    Weight(WeightAttribute),
    /// The item can be worn as armor.
    Armor(ArmorAttribute),
    /// The item can be used as a weapon.
    Damage(DamageAttribute),
}

impl Attribute {
    /// Creates a default-valued attribute of the given kind.
    pub fn new(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Weight => Attribute::Weight(WeightAttribute::default()),
            AttributeKind::Armor => Attribute::Armor(ArmorAttribute::default()),
            AttributeKind::Damage => Attribute::Damage(DamageAttribute::default()),
        }
    }

    /// The kind of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            Attribute::Weight(_) => AttributeKind::Weight,
            Attribute::Armor(_) => AttributeKind::Armor,
            Attribute::Damage(_) => AttributeKind::Damage,
        }
    }

    /// A multi-line, human-readable summary of this attribute.
    ///
    /// See [`DescribeAttribute::describe`] for the layout.
    pub fn describe(&self) -> String {
        match self {
            Attribute::Weight(weight) => weight.describe(),
            Attribute::Armor(armor) => armor.describe(),
            Attribute::Damage(damage) => damage.describe(),
        }
    }
}

impl From<WeightAttribute> for Attribute {
    fn from(attribute: WeightAttribute) -> Self {
        Attribute::Weight(attribute)
    }
}

impl From<ArmorAttribute> for Attribute {
    fn from(attribute: ArmorAttribute) -> Self {
        Attribute::Armor(attribute)
    }
}

impl From<DamageAttribute> for Attribute {
    fn from(attribute: DamageAttribute) -> Self {
        Attribute::Damage(attribute)
    }
}
