//! Point costs for vehicles and their extras.
use crate::constants::{
    CREW_DISCOUNT_SPONSOR, CREW_UPGRADE_SLUG, NITRO_DISCOUNT_SPONSOR, NITRO_UPGRADE_SLUG,
    TURRET_COST_MULTIPLIER,
};
use crate::extra::{Extra, ExtraKind, Facing};
use crate::team::Team;
use crate::vehicle::Vehicle;

/// Half price, rounded up.
const fn halved(cost: u32) -> u32 {
    cost.div_ceil(2)
}

/// Cost of one extra. At most one rule applies, checked in order:
/// turret weapons cost triple, then the sponsor halvings.
#[must_use]
pub fn extra_cost(kind: ExtraKind, extra: &Extra, sponsor_slug: Option<&str>) -> u32 {
    if kind == ExtraKind::Weapons && extra.facing == Some(Facing::Turret) {
        return extra.cost().saturating_mul(TURRET_COST_MULTIPLIER);
    }

    if sponsor_slug == Some(NITRO_DISCOUNT_SPONSOR)
        && kind == ExtraKind::Upgrades
        && extra.slug() == NITRO_UPGRADE_SLUG
    {
        return halved(extra.cost());
    }

    if sponsor_slug == Some(CREW_DISCOUNT_SPONSOR)
        && kind == ExtraKind::Upgrades
        && extra.slug() == CREW_UPGRADE_SLUG
    {
        return halved(extra.cost());
    }

    extra.cost()
}

/// Base cost plus every extra on the vehicle.
#[must_use]
pub fn vehicle_cost(vehicle: &Vehicle, sponsor_slug: Option<&str>) -> u32 {
    vehicle
        .extras
        .iter()
        .map(|(kind, extra)| extra_cost(kind, extra, sponsor_slug))
        .fold(vehicle.base_cost(), u32::saturating_add)
}

/// Every vehicle costed with the team's sponsor.
#[must_use]
pub fn team_cost(team: &Team) -> u32 {
    let sponsor = team.sponsor_slug();
    team.vehicles
        .iter()
        .map(|vehicle| vehicle_cost(vehicle, sponsor))
        .fold(0, u32::saturating_add)
}
