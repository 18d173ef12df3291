//! Reduce a runtime team to the sparse tree needed to rebuild it.
use serde_json::Value;

use crate::constants::{COLOUR_PREFIX, DEFAULT_MAX_COST, DEFAULT_TEAM_NAME, SUFFIX_DELIMITER};
use crate::extra::{Extra, ExtraKind, Facing, Location};
use crate::team::{PartialTeam, PartialVehicle, Team};
use crate::vehicle::Vehicle;

#[must_use]
pub fn dehydrate(team: &Team) -> PartialTeam {
    let mut partial = PartialTeam::default();

    if team.name != DEFAULT_TEAM_NAME {
        partial.name = Some(team.name.clone());
    }
    if let Some(slug) = team.sponsor_slug() {
        partial.sponsor = Some(slug.to_string());
    }
    if team.allow_all_perks {
        partial.allow_all_perks = Some(Value::Bool(true));
    }
    if team.max_cost != DEFAULT_MAX_COST {
        partial.max_cost = Some(team.max_cost);
    }

    let vehicles: Vec<_> = team.vehicles.iter().map(dehydrate_vehicle).collect();
    if !vehicles.is_empty() {
        partial.vehicles = Some(vehicles);
    }

    partial
}

#[must_use]
pub fn dehydrate_vehicle(vehicle: &Vehicle) -> PartialVehicle {
    let mut partial = PartialVehicle::new(vehicle.slug());

    if vehicle.is_relabelled() {
        partial.label = Some(vehicle.label.clone());
    }

    if let Some((fg, bg)) = vehicle.colours.as_pair() {
        partial.foreground_colour = Some(fg.trim_start_matches(COLOUR_PREFIX).to_string());
        partial.background_colour = Some(bg.trim_start_matches(COLOUR_PREFIX).to_string());
    }

    for kind in ExtraKind::ALL {
        // Zero cost marks stock equipment, which the vehicle type restores.
        let added: Vec<String> = vehicle
            .extras
            .get(kind)
            .iter()
            .filter(|extra| extra.is_user_added())
            .map(|extra| dehydrate_extra(kind, extra))
            .collect();
        if !added.is_empty() {
            partial.set_extras(kind, added);
        }
    }

    partial
}

/// Slug of an extra, with `!facing` / `!location` for weapons off their defaults.
#[must_use]
pub fn dehydrate_extra(kind: ExtraKind, extra: &Extra) -> String {
    let mut slug = extra.slug().to_string();
    if kind != ExtraKind::Weapons {
        return slug;
    }

    if let Some(facing) = extra.facing.filter(|facing| *facing != Facing::Front) {
        slug.push(SUFFIX_DELIMITER);
        slug.push_str(facing.as_str());
    }
    if let Some(location) = extra
        .location
        .filter(|location| *location != Location::Tractor)
    {
        slug.push(SUFFIX_DELIMITER);
        slug.push_str(location.as_str());
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;
    use crate::team::base_team_data;
    use crate::vehicle::{Colours, instantiate};

    #[test]
    fn base_team_dehydrates_to_nothing() {
        let partial = dehydrate(&base_team_data());
        assert!(partial.is_empty());
        assert_eq!(serde_json::to_string(&partial).unwrap(), "{}");
    }

    #[test]
    fn team_fields_emit_only_when_changed() {
        let mut team = base_team_data();
        team.name = "Rust Buckets".to_string();
        team.sponsor = Some(catalog().sponsor("slime").unwrap().clone());
        team.allow_all_perks = true;
        team.max_cost = 80;
        team.id = Some("local-1".to_string());

        let partial = dehydrate(&team);
        assert_eq!(partial.name.as_deref(), Some("Rust Buckets"));
        assert_eq!(partial.sponsor.as_deref(), Some("slime"));
        assert_eq!(partial.allow_all_perks, Some(Value::Bool(true)));
        assert_eq!(partial.max_cost, Some(80));
        assert!(partial.id.is_none());
        assert!(partial.vehicles.is_none());
    }

    #[test]
    fn vehicle_emits_slug_label_and_colours() {
        let mut vehicle = instantiate(catalog().vehicle("buggy").unwrap());
        let plain = dehydrate_vehicle(&vehicle);
        assert_eq!(plain, PartialVehicle::new("buggy"));

        vehicle.label = "Dune Rat".to_string();
        vehicle.colours = Colours::pair("#00ff00".to_string(), "#222222".to_string());
        let partial = dehydrate_vehicle(&vehicle);
        assert_eq!(partial.label.as_deref(), Some("Dune Rat"));
        assert_eq!(partial.foreground_colour.as_deref(), Some("00ff00"));
        assert_eq!(partial.background_colour.as_deref(), Some("222222"));
    }

    #[test]
    fn only_user_added_extras_are_recorded() {
        let mut tank = instantiate(catalog().vehicle("tank").unwrap());
        let partial = dehydrate_vehicle(&tank);
        assert!(partial.weapons.is_none());

        let ram = catalog()
            .extra(ExtraKind::Weapons, "ram")
            .unwrap()
            .with_facing(Facing::Turret);
        tank.add_extra(ExtraKind::Weapons, ram);
        let partial = dehydrate_vehicle(&tank);
        assert_eq!(partial.weapons, Some(vec!["ram!turret".to_string()]));
        assert!(partial.upgrades.is_none());
        assert!(partial.perks.is_none());
    }

    #[test]
    fn weapon_suffixes_follow_fixed_order() {
        let base = catalog().extra(ExtraKind::Weapons, "harpoon").unwrap();
        assert_eq!(dehydrate_extra(ExtraKind::Weapons, &base), "harpoon");

        let trailer = base.clone().with_location(Location::Trailer);
        assert_eq!(
            dehydrate_extra(ExtraKind::Weapons, &trailer),
            "harpoon!trailer"
        );

        let both = trailer.with_facing(Facing::Rear);
        assert_eq!(
            dehydrate_extra(ExtraKind::Weapons, &both),
            "harpoon!rear!trailer"
        );

        let tractor = base.with_location(Location::Tractor);
        assert_eq!(dehydrate_extra(ExtraKind::Weapons, &tractor), "harpoon");
    }

    #[test]
    fn non_weapons_never_carry_suffixes() {
        let mut nitro = catalog().extra(ExtraKind::Upgrades, "nitro").unwrap();
        nitro.facing = Some(Facing::Turret);
        assert_eq!(dehydrate_extra(ExtraKind::Upgrades, &nitro), "nitro");
    }
}
