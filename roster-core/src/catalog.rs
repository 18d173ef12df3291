//! Read-only reference tables the team data layer resolves slugs against.
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{Category, RosterError};
use crate::extra::{Extra, ExtraDef, ExtraKind, Loadout};

const BUNDLED_VEHICLES: &str = include_str!("../data/vehicles.json");
const BUNDLED_SPONSORS: &str = include_str!("../data/sponsors.json");
const BUNDLED_WEAPONS: &str = include_str!("../data/weapons.json");
const BUNDLED_UPGRADES: &str = include_str!("../data/upgrades.json");
const BUNDLED_PERKS: &str = include_str!("../data/perks.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    Light,
    Middle,
    Heavy,
}

/// Stat line of a vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleProfile {
    pub slug: String,
    pub name: String,
    pub weight: WeightClass,
    pub hull: u32,
    pub handling: u32,
    pub max_gear: u32,
    pub crew: u32,
    pub build_slots: u32,
    pub cost: u32,
    /// Tractor/trailer vehicle; weapons may carry a location.
    #[serde(default)]
    pub articulated: bool,
    #[serde(default)]
    pub special: Vec<String>,
}

/// Catalog record for a vehicle type and its stock loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDef {
    #[serde(flatten)]
    pub profile: VehicleProfile,
    #[serde(flatten)]
    pub loadout: Loadout<ExtraDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorDef {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub perk_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Raw JSON for each of the five tables.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub vehicles: &'a str,
    pub sponsors: &'a str,
    pub weapons: &'a str,
    pub upgrades: &'a str,
    pub perks: &'a str,
}

impl CatalogSources<'static> {
    /// Tables compiled into the crate.
    #[must_use]
    pub const fn bundled() -> Self {
        Self {
            vehicles: BUNDLED_VEHICLES,
            sponsors: BUNDLED_SPONSORS,
            weapons: BUNDLED_WEAPONS,
            upgrades: BUNDLED_UPGRADES,
            perks: BUNDLED_PERKS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    vehicles: Vec<VehicleDef>,
    sponsors: Vec<SponsorDef>,
    extras: Loadout<ExtraDef>,
}

impl Catalog {
    /// Parse all five tables.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::CatalogData`] if any table is not valid JSON
    /// for its record type.
    pub fn from_json(sources: &CatalogSources<'_>) -> Result<Self, RosterError> {
        Ok(Self {
            vehicles: serde_json::from_str(sources.vehicles)?,
            sponsors: serde_json::from_str(sources.sponsors)?,
            extras: Loadout {
                weapons: serde_json::from_str(sources.weapons)?,
                upgrades: serde_json::from_str(sources.upgrades)?,
                perks: serde_json::from_str(sources.perks)?,
            },
        })
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(&CatalogSources::bundled()).unwrap_or_else(|err| {
            log::error!("bundled catalog failed to parse: {err}");
            Self::default()
        })
    }

    #[must_use]
    pub fn vehicles(&self) -> &[VehicleDef] {
        &self.vehicles
    }

    #[must_use]
    pub fn sponsors(&self) -> &[SponsorDef] {
        &self.sponsors
    }

    #[must_use]
    pub fn extras(&self, kind: ExtraKind) -> &[ExtraDef] {
        self.extras.get(kind)
    }

    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no vehicle has this slug.
    pub fn vehicle(&self, slug: &str) -> Result<&VehicleDef, RosterError> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.profile.slug == slug)
            .ok_or_else(|| RosterError::not_found(Category::Vehicle, slug))
    }

    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when no sponsor has this slug.
    pub fn sponsor(&self, slug: &str) -> Result<&SponsorDef, RosterError> {
        self.sponsors
            .iter()
            .find(|sponsor| sponsor.slug == slug)
            .ok_or_else(|| RosterError::not_found(Category::Sponsor, slug))
    }

    /// Borrow the canonical record for an extra.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when the category has no such slug.
    pub fn extra_def(&self, kind: ExtraKind, slug: &str) -> Result<&ExtraDef, RosterError> {
        self.extras(kind)
            .iter()
            .find(|extra| extra.slug == slug)
            .ok_or_else(|| RosterError::not_found(kind.category(), slug))
    }

    /// Owned copy of an extra, free for the caller to mutate.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] when the category has no such slug.
    pub fn extra(&self, kind: ExtraKind, slug: &str) -> Result<Extra, RosterError> {
        self.extra_def(kind, slug)
            .map(|def| Extra::new(kind, def.clone()))
    }

    /// Fresh instances of every extra in a category, ready to offer for selection.
    #[must_use]
    pub fn extra_options(&self, kind: ExtraKind) -> Vec<Extra> {
        self.extras(kind)
            .iter()
            .map(|def| Extra::new(kind, def.clone()))
            .collect()
    }
}

/// Process-wide bundled catalog.
#[must_use]
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::load_from_static)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extra::Facing;

    #[test]
    fn bundled_tables_parse() {
        let catalog = Catalog::from_json(&CatalogSources::bundled()).unwrap();
        assert!(!catalog.vehicles().is_empty());
        assert!(!catalog.sponsors().is_empty());
        for kind in ExtraKind::ALL {
            assert!(!catalog.extras(kind).is_empty(), "{kind:?} table empty");
        }
    }

    #[test]
    fn lookups_match_slug_exactly() {
        let catalog = catalog();
        assert_eq!(catalog.vehicle("car").unwrap().profile.name, "Car");
        assert_eq!(catalog.sponsor("idris").unwrap().name, "Idris");
        assert!(catalog.vehicle("Car").is_err());
        assert!(catalog.vehicle("ca").is_err());
    }

    #[test]
    fn missing_slug_reports_category() {
        let err = catalog().extra(ExtraKind::Upgrades, "laser").unwrap_err();
        assert!(matches!(
            err,
            RosterError::NotFound {
                category: Category::Upgrade,
                ref slug
            } if slug == "laser"
        ));
        let err = catalog().sponsor("nobody").unwrap_err();
        assert_eq!(err.to_string(), "Sponsor (\"nobody\") not recognised");
    }

    #[test]
    fn extra_copies_never_touch_the_catalog() {
        let catalog = catalog();
        let mut first = catalog.extra(ExtraKind::Weapons, "ram").unwrap();
        first.def.cost = 99;
        first.facing = Some(Facing::Turret);
        first.removable = true;

        let second = catalog.extra(ExtraKind::Weapons, "ram").unwrap();
        assert_eq!(second.cost(), 4);
        assert_eq!(second.facing, Some(Facing::Front));
        assert!(!second.removable);
        assert_eq!(catalog.extra_def(ExtraKind::Weapons, "ram").unwrap().cost, 4);
    }

    #[test]
    fn extra_options_cover_the_category() {
        let catalog = catalog();
        let weapons = catalog.extra_options(ExtraKind::Weapons);
        assert_eq!(weapons.len(), catalog.extras(ExtraKind::Weapons).len());
        assert!(weapons.iter().all(|w| w.facing == Some(Facing::Front)));
        assert!(weapons.iter().all(|w| w.location.is_none()));
        let perks = catalog.extra_options(ExtraKind::Perks);
        assert!(perks.iter().all(|p| p.facing.is_none()));
    }

    #[test]
    fn malformed_table_is_a_catalog_error() {
        let sources = CatalogSources {
            vehicles: "{",
            ..CatalogSources::bundled()
        };
        assert!(matches!(
            Catalog::from_json(&sources),
            Err(RosterError::CatalogData(_))
        ));
    }

    #[test]
    fn stock_loadouts_parse_from_vehicle_records() {
        let tank = catalog().vehicle("tank").unwrap();
        assert_eq!(tank.loadout.weapons.len(), 1);
        assert_eq!(tank.loadout.weapons[0].slug, "cannon");
        assert!(catalog().vehicle("war_rig").unwrap().profile.articulated);
    }
}
