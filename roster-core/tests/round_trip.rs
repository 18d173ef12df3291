use roster_core::{
    Colours, ExtraKind, Facing, Location, PartialTeam, PartialVehicle, Team, base_team_data,
    catalog, dehydrate, hydrate, instantiate,
};

fn without_uids(mut team: Team) -> Team {
    for vehicle in &mut team.vehicles {
        vehicle.uid.clear();
    }
    team
}

fn extra(kind: ExtraKind, slug: &str) -> roster_core::Extra {
    catalog().extra(kind, slug).unwrap()
}

fn sample_team() -> Team {
    let catalog = catalog();
    let mut team = base_team_data();
    team.name = "Fury Road Rejects".to_string();
    team.max_cost = 150;
    team.allow_all_perks = true;
    team.sponsor = Some(catalog.sponsor("idris").unwrap().clone());

    let mut rig = instantiate(catalog.vehicle("war_rig").unwrap());
    rig.label = "Big Mother".to_string();
    rig.colours = Colours::pair("#ff8800".to_string(), "#101010".to_string());
    rig.add_extra(
        ExtraKind::Weapons,
        extra(ExtraKind::Weapons, "harpoon")
            .with_facing(Facing::Rear)
            .with_location(Location::Trailer),
    );
    rig.add_extra(
        ExtraKind::Weapons,
        extra(ExtraKind::Weapons, "mines").with_location(Location::Trailer),
    );
    team.vehicles.push(rig);

    let mut tank = instantiate(catalog.vehicle("tank").unwrap());
    tank.add_extra(
        ExtraKind::Weapons,
        extra(ExtraKind::Weapons, "ram").with_facing(Facing::Turret),
    );
    team.vehicles.push(tank);

    let mut car = instantiate(catalog.vehicle("car").unwrap());
    car.add_extra(ExtraKind::Upgrades, extra(ExtraKind::Upgrades, "nitro"));
    car.add_extra(ExtraKind::Upgrades, extra(ExtraKind::Upgrades, "crew"));
    car.add_extra(ExtraKind::Perks, extra(ExtraKind::Perks, "evasive"));
    team.vehicles.push(car);

    team
}

#[test]
fn hydrate_inverts_dehydrate() {
    let team = sample_team();
    let restored = hydrate(catalog(), dehydrate(&team)).unwrap();
    assert_eq!(without_uids(restored), without_uids(team));
}

#[test]
fn base_team_round_trips_through_empty_tree() {
    let partial = dehydrate(&base_team_data());
    assert_eq!(partial, PartialTeam::default());
    assert_eq!(hydrate(catalog(), partial).unwrap(), base_team_data());
}

#[test]
fn rehydration_issues_fresh_uids() {
    let team = sample_team();
    let first = hydrate(catalog(), dehydrate(&team)).unwrap();
    let second = hydrate(catalog(), dehydrate(&team)).unwrap();
    assert_eq!(first.vehicles.len(), second.vehicles.len());
    assert!(first.vehicles.iter().all(|v| v.uid.len() == 9));
}

#[test]
fn dehydrated_tree_persists_as_json() {
    let team = sample_team();
    let json = serde_json::to_string(&dehydrate(&team)).unwrap();
    let parsed: PartialTeam = serde_json::from_str(&json).unwrap();
    let restored = hydrate(catalog(), parsed).unwrap();
    assert_eq!(without_uids(restored), without_uids(team));
}

#[test]
fn dehydrated_tree_is_minimal() {
    let partial = dehydrate(&sample_team());
    let vehicles = partial.vehicles.unwrap();
    assert_eq!(
        vehicles[0],
        PartialVehicle {
            label: Some("Big Mother".to_string()),
            foreground_colour: Some("ff8800".to_string()),
            background_colour: Some("101010".to_string()),
            weapons: Some(vec![
                "harpoon!rear!trailer".to_string(),
                "mines!trailer".to_string()
            ]),
            ..PartialVehicle::new("war_rig")
        }
    );
    assert_eq!(vehicles[1].weapons, Some(vec!["ram!turret".to_string()]));
    assert_eq!(
        vehicles[2].upgrades,
        Some(vec!["nitro".to_string(), "crew".to_string()])
    );
    assert_eq!(vehicles[2].perks, Some(vec!["evasive".to_string()]));
}

#[test]
fn unknown_slug_in_tree_is_not_found() {
    let partial = PartialTeam {
        vehicles: Some(vec![PartialVehicle::new("nope")]),
        ..PartialTeam::default()
    };
    let err = hydrate(catalog(), partial).unwrap_err();
    assert!(err.is_not_found());
}
