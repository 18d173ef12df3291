//! Expand a dehydrated team into a full runtime team.
use rand::Rng;

use crate::catalog::Catalog;
use crate::constants::{COLOUR_PREFIX, SUFFIX_DELIMITER};
use crate::error::RosterError;
use crate::extra::{Extra, ExtraKind, Facing, Location};
use crate::team::{PartialTeam, PartialVehicle, Team};
use crate::vehicle::{Colours, Vehicle, instantiate_with_rng};

/// A weapon slug split from its facing/location suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSlug<'a> {
    pub slug: &'a str,
    pub facing: Option<Facing>,
    pub location: Option<Location>,
}

/// Split `slug[!facing][!location]`.
///
/// With a single suffix the token is a location only when it reads
/// `trailer`; anything else is taken as a facing. Tokens outside the
/// allowed sets are dropped without error.
#[must_use]
pub fn parse_weapon_slug(raw: &str) -> WeaponSlug<'_> {
    let mut parts = raw.split(SUFFIX_DELIMITER);
    let slug = parts.next().unwrap_or(raw);
    let (facing_token, location_token) = match raw.matches(SUFFIX_DELIMITER).count() {
        0 => (None, None),
        2 => (parts.next(), parts.next()),
        _ => match parts.next() {
            Some(token) if token == Location::Trailer.as_str() => (None, Some(token)),
            token => (token, None),
        },
    };

    let facing = facing_token.and_then(Facing::from_token);
    let location = location_token.and_then(Location::from_token);
    if (facing_token.is_some() && facing.is_none())
        || (location_token.is_some() && location.is_none())
    {
        log::debug!("dropped unrecognised suffix on weapon slug {raw:?}");
    }

    WeaponSlug {
        slug,
        facing,
        location,
    }
}

/// Hydrate with the thread-local rng supplying vehicle uids.
///
/// Each vehicle keeps the stock loadout of its type, and the recorded
/// extras are appended after it rather than replacing it. A tank saved
/// with `weapons: ["ram"]` comes back armed with `cannon` then `ram`.
/// Trees written by tools that stored the full weapon list, stock items
/// included, therefore hydrate with those stock items twice.
///
/// # Errors
///
/// Returns [`RosterError::NotFound`] when a vehicle, sponsor or extra slug
/// is not in the catalog.
pub fn hydrate(catalog: &Catalog, partial: PartialTeam) -> Result<Team, RosterError> {
    hydrate_with_rng(catalog, partial, &mut rand::thread_rng())
}

/// # Errors
///
/// Returns [`RosterError::NotFound`] when a vehicle, sponsor or extra slug
/// is not in the catalog.
pub fn hydrate_with_rng<R>(
    catalog: &Catalog,
    partial: PartialTeam,
    rng: &mut R,
) -> Result<Team, RosterError>
where
    R: Rng + ?Sized,
{
    let mut team = Team::default();
    if partial.id.is_some() {
        team.id = partial.id;
    }
    if let Some(name) = partial.name {
        team.name = name;
    }
    if let Some(max_cost) = partial.max_cost {
        team.max_cost = max_cost;
    }

    team.vehicles = partial
        .vehicles
        .unwrap_or_default()
        .into_iter()
        .map(|entry| hydrate_vehicle(catalog, entry, rng))
        .collect::<Result<_, _>>()?;
    log::debug!("hydrated {} vehicle(s)", team.vehicles.len());

    if let Some(slug) = partial.sponsor.filter(|slug| !slug.is_empty()) {
        team.sponsor = Some(catalog.sponsor(&slug)?.clone());
    }

    team.allow_all_perks = partial.allow_all_perks.is_some();
    Ok(team)
}

/// Resolve one serialized extra into an owned, removable instance.
///
/// # Errors
///
/// Returns [`RosterError::NotFound`] when the (suffix-stripped) slug is not
/// in the category's catalog.
pub fn hydrate_extra(
    catalog: &Catalog,
    kind: ExtraKind,
    serialized: &str,
) -> Result<Extra, RosterError> {
    if kind == ExtraKind::Weapons && serialized.contains(SUFFIX_DELIMITER) {
        let parsed = parse_weapon_slug(serialized);
        let mut extra = catalog.extra(kind, parsed.slug)?;
        extra.removable = true;
        if let Some(facing) = parsed.facing {
            extra.facing = Some(facing);
        }
        if let Some(location) = parsed.location {
            extra.location = Some(location);
        }
        return Ok(extra);
    }

    let mut extra = catalog.extra(kind, serialized)?;
    extra.removable = true;
    Ok(extra)
}

fn hydrate_vehicle<R>(
    catalog: &Catalog,
    entry: PartialVehicle,
    rng: &mut R,
) -> Result<Vehicle, RosterError>
where
    R: Rng + ?Sized,
{
    let mut added: Vec<(ExtraKind, Vec<Extra>)> = Vec::new();
    for kind in ExtraKind::ALL {
        if let Some(slugs) = entry.extras(kind) {
            let extras = slugs
                .iter()
                .map(|slug| hydrate_extra(catalog, kind, slug))
                .collect::<Result<Vec<_>, _>>()?;
            added.push((kind, extras));
        }
    }

    let colours = match (entry.foreground_colour, entry.background_colour) {
        (Some(fg), Some(bg)) if !fg.is_empty() && !bg.is_empty() => Some(Colours::pair(
            format!("{COLOUR_PREFIX}{fg}"),
            format!("{COLOUR_PREFIX}{bg}"),
        )),
        _ => None,
    };

    let def = catalog.vehicle(&entry.slug)?;
    let mut vehicle = instantiate_with_rng(def, rng);
    if let Some(label) = entry.label {
        vehicle.label = label;
    }
    if let Some(colours) = colours {
        vehicle.colours = colours;
    }
    // Stock extras stay; the dehydrated tree only records what was added.
    for (kind, mut extras) in added {
        vehicle.extras.get_mut(kind).append(&mut extras);
    }
    Ok(vehicle)
}
