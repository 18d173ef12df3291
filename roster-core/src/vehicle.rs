//! Runtime vehicles built from catalog definitions.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{VehicleDef, VehicleProfile};
use crate::constants::{CREW_CAPACITY_MULTIPLIER, UID_LENGTH, UID_RADIX};
use crate::extra::{Extra, ExtraKind, Loadout};

/// Livery colours, `#`-prefixed hex strings. Either both are set or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colours {
    pub foreground: Option<String>,
    pub background: Option<String>,
}

impl Colours {
    #[must_use]
    pub const fn pair(foreground: String, background: String) -> Self {
        Self {
            foreground: Some(foreground),
            background: Some(background),
        }
    }

    /// Both colours, or `None` unless both are set.
    #[must_use]
    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match (&self.foreground, &self.background) {
            (Some(fg), Some(bg)) => Some((fg.as_str(), bg.as_str())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Locally unique handle; regenerated on every hydration.
    pub uid: String,
    pub label: String,
    pub max_crew: u32,
    #[serde(flatten)]
    pub profile: VehicleProfile,
    #[serde(flatten)]
    pub extras: Loadout<Extra>,
    #[serde(default)]
    pub colours: Colours,
}

impl Vehicle {
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.profile.slug
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    #[must_use]
    pub const fn base_cost(&self) -> u32 {
        self.profile.cost
    }

    /// True once the label no longer matches the vehicle type's name.
    #[must_use]
    pub fn is_relabelled(&self) -> bool {
        self.label != self.profile.name
    }

    /// Attach a user-chosen extra; it can later be removed again.
    pub fn add_extra(&mut self, kind: ExtraKind, mut extra: Extra) {
        extra.removable = true;
        self.extras.get_mut(kind).push(extra);
    }

    /// Remove a user-added extra by position. Stock extras stay put.
    pub fn remove_extra(&mut self, kind: ExtraKind, index: usize) -> Option<Extra> {
        let list = self.extras.get_mut(kind);
        if list.get(index).is_some_and(|extra| extra.removable) {
            Some(list.remove(index))
        } else {
            None
        }
    }
}

/// Random base-36 token of [`UID_LENGTH`] characters.
pub fn generate_uid<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    (0..UID_LENGTH)
        .map(|_| char::from_digit(rng.gen_range(0..UID_RADIX), UID_RADIX).unwrap_or('0'))
        .collect()
}

/// Build a fresh vehicle from its catalog definition.
#[must_use]
pub fn instantiate(def: &VehicleDef) -> Vehicle {
    instantiate_with_rng(def, &mut rand::thread_rng())
}

/// [`instantiate`] with an explicit uid source.
pub fn instantiate_with_rng<R>(def: &VehicleDef, rng: &mut R) -> Vehicle
where
    R: Rng + ?Sized,
{
    let mut extras = Loadout::default();
    for kind in ExtraKind::ALL {
        *extras.get_mut(kind) = def
            .loadout
            .get(kind)
            .iter()
            .map(|stock| Extra::built_in(kind, stock.clone()))
            .collect();
    }

    Vehicle {
        uid: generate_uid(rng),
        label: def.profile.name.clone(),
        max_crew: def.profile.crew * CREW_CAPACITY_MULTIPLIER,
        profile: def.profile.clone(),
        extras,
        colours: Colours::default(),
    }
}
