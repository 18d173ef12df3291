//! Runtime team and its dehydrated (persisted) counterpart.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::SponsorDef;
use crate::constants::{DEFAULT_MAX_COST, DEFAULT_TEAM_NAME};
use crate::extra::ExtraKind;
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Option<String>,
    pub name: String,
    pub max_cost: u32,
    pub sponsor: Option<SponsorDef>,
    pub allow_all_perks: bool,
    pub vehicles: Vec<Vehicle>,
}

impl Default for Team {
    fn default() -> Self {
        Self {
            id: None,
            name: DEFAULT_TEAM_NAME.to_string(),
            max_cost: DEFAULT_MAX_COST,
            sponsor: None,
            allow_all_perks: false,
            vehicles: Vec::new(),
        }
    }
}

impl Team {
    #[must_use]
    pub fn sponsor_slug(&self) -> Option<&str> {
        self.sponsor.as_ref().map(|sponsor| sponsor.slug.as_str())
    }

    /// Points left under the cap; negative once over budget.
    #[must_use]
    pub fn remaining_budget(&self) -> i64 {
        i64::from(self.max_cost) - i64::from(crate::cost::team_cost(self))
    }

    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget() < 0
    }
}

/// A new, empty team.
#[must_use]
pub fn base_team_data() -> Team {
    Team::default()
}

/// Keeps an explicit JSON `null` distinct from a missing key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Sparse team tree: only fields that differ from the defaults are set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTeam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sponsor: Option<String>,
    /// Any value at all, `false` and `null` included, switches the flag on.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_all_perks: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<PartialVehicle>>,
}

impl PartialTeam {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Sparse vehicle tree: the slug plus user changes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialVehicle {
    #[serde(default)]
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Hex colour without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_colour: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrades: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perks: Option<Vec<String>>,
}

impl PartialVehicle {
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    /// Serialized slugs for a category, if the category was recorded.
    #[must_use]
    pub fn extras(&self, kind: ExtraKind) -> Option<&[String]> {
        match kind {
            ExtraKind::Weapons => self.weapons.as_deref(),
            ExtraKind::Upgrades => self.upgrades.as_deref(),
            ExtraKind::Perks => self.perks.as_deref(),
        }
    }

    pub fn set_extras(&mut self, kind: ExtraKind, slugs: Vec<String>) {
        let slot = match kind {
            ExtraKind::Weapons => &mut self.weapons,
            ExtraKind::Upgrades => &mut self.upgrades,
            ExtraKind::Perks => &mut self.perks,
        };
        *slot = Some(slugs);
    }
}
