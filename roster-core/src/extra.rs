//! Weapons, upgrades and perks attached to a vehicle.
use serde::{Deserialize, Serialize};

use crate::error::Category;

/// The three extra categories a vehicle can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtraKind {
    Weapons,
    Upgrades,
    Perks,
}

impl ExtraKind {
    pub const ALL: [Self; 3] = [Self::Weapons, Self::Upgrades, Self::Perks];

    /// Field name used for this category in the dehydrated tree.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Weapons => "weapons",
            Self::Upgrades => "upgrades",
            Self::Perks => "perks",
        }
    }

    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Weapons => Category::Weapon,
            Self::Upgrades => Category::Upgrade,
            Self::Perks => Category::Perk,
        }
    }
}

/// Mounting orientation of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    #[default]
    Front,
    Side,
    Rear,
    Turret,
}

impl Facing {
    pub const ALL: [Self; 4] = [Self::Front, Self::Side, Self::Rear, Self::Turret];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Side => "side",
            Self::Rear => "rear",
            Self::Turret => "turret",
        }
    }

    /// Exact match against the allowed facing tokens.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|facing| facing.as_str() == token)
    }
}

/// Segment of an articulated vehicle a weapon is mounted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Tractor,
    Trailer,
}

impl Location {
    pub const ALL: [Self; 2] = [Self::Tractor, Self::Trailer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tractor => "tractor",
            Self::Trailer => "trailer",
        }
    }

    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == token)
    }
}

/// Catalog record for a weapon, upgrade or perk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDef {
    pub slug: String,
    pub name: String,
    pub cost: u32,
    #[serde(default)]
    pub build_slots: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_dice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<u32>,
    #[serde(default)]
    pub crew_fired: bool,
    #[serde(default)]
    pub dropped: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perk_class: Option<String>,
    #[serde(default)]
    pub special: Vec<String>,
}

/// An extra instance owned by a single vehicle.
///
/// `def.cost` is the instance cost: zero marks an extra the vehicle came
/// with, anything else one the user added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extra {
    #[serde(flatten)]
    pub def: ExtraDef,
    #[serde(default)]
    pub removable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facing: Option<Facing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Extra {
    /// Wrap a catalog record; weapons start front-facing with no location.
    #[must_use]
    pub fn new(kind: ExtraKind, def: ExtraDef) -> Self {
        let facing = matches!(kind, ExtraKind::Weapons).then_some(Facing::Front);
        Self {
            def,
            removable: false,
            facing,
            location: None,
        }
    }

    /// Wrap a record as part of a vehicle's stock loadout.
    #[must_use]
    pub fn built_in(kind: ExtraKind, def: ExtraDef) -> Self {
        let mut extra = Self::new(kind, def);
        extra.def.cost = 0;
        extra
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.def.slug
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.def.cost
    }

    #[must_use]
    pub const fn is_user_added(&self) -> bool {
        self.def.cost != 0
    }

    #[must_use]
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = Some(facing);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// One list per extra category, indexed by [`ExtraKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Loadout<T> {
    #[serde(default)]
    pub weapons: Vec<T>,
    #[serde(default)]
    pub upgrades: Vec<T>,
    #[serde(default)]
    pub perks: Vec<T>,
}

impl<T> Default for Loadout<T> {
    fn default() -> Self {
        Self {
            weapons: Vec::new(),
            upgrades: Vec::new(),
            perks: Vec::new(),
        }
    }
}

impl<T> Loadout<T> {
    #[must_use]
    pub fn get(&self, kind: ExtraKind) -> &[T] {
        match kind {
            ExtraKind::Weapons => &self.weapons,
            ExtraKind::Upgrades => &self.upgrades,
            ExtraKind::Perks => &self.perks,
        }
    }

    pub fn get_mut(&mut self, kind: ExtraKind) -> &mut Vec<T> {
        match kind {
            ExtraKind::Weapons => &mut self.weapons,
            ExtraKind::Upgrades => &mut self.upgrades,
            ExtraKind::Perks => &mut self.perks,
        }
    }

    /// Every entry paired with its category, weapons first.
    pub fn iter(&self) -> impl Iterator<Item = (ExtraKind, &T)> {
        ExtraKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |item| (kind, item)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.upgrades.is_empty() && self.perks.is_empty()
    }
}
