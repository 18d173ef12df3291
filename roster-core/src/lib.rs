//! Roster Core
//!
//! Data layer for a vehicular combat team builder. Converts between the
//! runtime team (vehicles, extras, sponsor, colours), a sparse dehydrated
//! tree for persistence, and a compact share string for links. This crate
//! holds no UI or transport code.

pub mod catalog;
pub mod constants;
pub mod cost;
pub mod dehydrate;
pub mod error;
pub mod extra;
pub mod hydrate;
pub mod share;
pub mod team;
pub mod vehicle;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogSources, SponsorDef, VehicleDef, VehicleProfile, WeightClass, catalog,
};
pub use cost::{extra_cost, team_cost, vehicle_cost};
pub use dehydrate::{dehydrate, dehydrate_extra, dehydrate_vehicle};
pub use error::{Category, RosterError};
pub use extra::{Extra, ExtraDef, ExtraKind, Facing, Loadout, Location};
pub use hydrate::{WeaponSlug, hydrate, hydrate_extra, hydrate_with_rng, parse_weapon_slug};
pub use share::{
    Field, deserialize, full_key, parse_share_string, serialize, serialize_partial, short_key,
};
pub use team::{PartialTeam, PartialVehicle, Team, base_team_data};
pub use vehicle::{Colours, Vehicle, generate_uid, instantiate, instantiate_with_rng};

/// Trait for abstracting where the reference catalogs come from
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load all five reference tables
    ///
    /// # Errors
    ///
    /// Returns an error if any table cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Loads the tables compiled into this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogLoader;

impl CatalogLoader for StaticCatalogLoader {
    type Error = RosterError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Catalog::from_json(&CatalogSources::bundled())
    }
}

/// Trait for abstracting where dehydrated teams are kept
/// Platform-specific implementations should provide this
pub trait TeamStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save a dehydrated team
    ///
    /// # Errors
    ///
    /// Returns an error if the team cannot be saved.
    fn save_team(&self, slot: &str, team: &PartialTeam) -> Result<(), Self::Error>;

    /// Load a dehydrated team
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    fn load_team(&self, slot: &str) -> Result<Option<PartialTeam>, Self::Error>;

    /// Delete a saved team
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be deleted.
    fn delete_team(&self, slot: &str) -> Result<(), Self::Error>;
}

/// Ties a loaded catalog to a storage backend.
pub struct RosterEngine<S>
where
    S: TeamStorage,
{
    catalog: Catalog,
    storage: S,
}

impl<S> RosterEngine<S>
where
    S: TeamStorage,
{
    /// Load the catalog once and keep it for the engine's lifetime
    ///
    /// # Errors
    ///
    /// Returns an error if the loader cannot produce a catalog.
    pub fn new<L: CatalogLoader>(loader: &L, storage: S) -> Result<Self, L::Error> {
        Ok(Self {
            catalog: loader.load_catalog()?,
            storage,
        })
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Instantiate a vehicle type and append it to the team
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::NotFound`] if the vehicle slug is unknown.
    pub fn add_vehicle<'t>(
        &self,
        team: &'t mut Team,
        slug: &str,
    ) -> Result<&'t mut Vehicle, RosterError> {
        let vehicle = instantiate(self.catalog.vehicle(slug)?);
        team.vehicles.push(vehicle);
        let index = team.vehicles.len() - 1;
        Ok(&mut team.vehicles[index])
    }

    /// Save a team in dehydrated form
    ///
    /// # Errors
    ///
    /// Returns an error if the team cannot be saved.
    pub fn save_team(&self, slot: &str, team: &Team) -> Result<(), S::Error> {
        self.storage.save_team(slot, &dehydrate(team))
    }

    /// Load and hydrate a saved team
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or references slugs the
    /// catalog no longer has.
    pub fn load_team(&self, slot: &str) -> anyhow::Result<Option<Team>> {
        if let Some(partial) = self.storage.load_team(slot)? {
            Ok(Some(hydrate(&self.catalog, partial)?))
        } else {
            Ok(None)
        }
    }

    /// Delete a saved team
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be deleted.
    pub fn delete_team(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.delete_team(slot)
    }

    #[must_use]
    pub fn share_string(&self, team: &Team) -> String {
        serialize(team)
    }

    /// Decode a share link, falling back to `None` on any failure.
    #[must_use]
    pub fn open_share_string(&self, uri: &str) -> Option<Team> {
        deserialize(&self.catalog, uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        saves: Rc<RefCell<HashMap<String, PartialTeam>>>,
    }

    impl TeamStorage for MemoryStorage {
        type Error = Infallible;

        fn save_team(&self, slot: &str, team: &PartialTeam) -> Result<(), Self::Error> {
            self.saves
                .borrow_mut()
                .insert(slot.to_string(), team.clone());
            Ok(())
        }

        fn load_team(&self, slot: &str) -> Result<Option<PartialTeam>, Self::Error> {
            Ok(self.saves.borrow().get(slot).cloned())
        }

        fn delete_team(&self, slot: &str) -> Result<(), Self::Error> {
            self.saves.borrow_mut().remove(slot);
            Ok(())
        }
    }

    fn engine() -> (RosterEngine<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::default();
        let engine = RosterEngine::new(&StaticCatalogLoader, storage.clone()).unwrap();
        (engine, storage)
    }

    #[test]
    fn engine_saves_dehydrated_and_loads_hydrated() {
        let (engine, storage) = engine();
        let mut team = base_team_data();
        team.name = "Wasteland Wheels".to_string();
        let car = engine.add_vehicle(&mut team, "car").unwrap();
        car.label = "Old Faithful".to_string();

        engine.save_team("slot-one", &team).unwrap();
        let stored = storage.saves.borrow().get("slot-one").cloned().unwrap();
        assert_eq!(stored.name.as_deref(), Some("Wasteland Wheels"));
        assert_eq!(stored.vehicles.as_ref().unwrap()[0].slug, "car");

        let loaded = engine.load_team("slot-one").unwrap().expect("save exists");
        assert_eq!(loaded.name, "Wasteland Wheels");
        assert_eq!(loaded.vehicles[0].label, "Old Faithful");
        assert!(engine.load_team("missing-slot").unwrap().is_none());

        engine.delete_team("slot-one").unwrap();
        assert!(engine.load_team("slot-one").unwrap().is_none());
    }

    #[test]
    fn engine_load_propagates_stale_slugs() {
        let (engine, storage) = engine();
        storage.saves.borrow_mut().insert(
            "stale".to_string(),
            PartialTeam {
                vehicles: Some(vec![PartialVehicle::new("hovercraft")]),
                ..PartialTeam::default()
            },
        );
        let err = engine.load_team("stale").unwrap_err();
        assert!(err.to_string().contains("hovercraft"));
    }

    #[test]
    fn engine_share_strings_round_trip() {
        let (engine, _) = engine();
        let mut team = base_team_data();
        engine.add_vehicle(&mut team, "buggy").unwrap();
        assert!(engine.add_vehicle(&mut team, "zeppelin").is_err());

        let link = engine.share_string(&team);
        assert_eq!(link, "v=s:buggy");
        let reopened = engine.open_share_string(&link).unwrap();
        assert_eq!(reopened.vehicles.len(), 1);
        assert!(engine.open_share_string("v=s:zeppelin").is_none());
    }
}
