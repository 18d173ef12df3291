//! Compact, link-safe share strings.
//!
//! Grammar (short keys from [`Field`]):
//!
//! ```text
//! team       := field ('&' field)*
//! field      := shortKey '=' encodedScalar | 'v' '=' vehicle
//! vehicle    := vfield (',' vfield)*
//! vfield     := shortKey ':' (encodedScalar | slug ('-' slug)*)
//! ```
//!
//! Scalars are percent-encoded with the `encodeURI` character set, except
//! that the grammar delimiters `&`, `=`, `,` and `:` are escaped too so free
//! text such as team names survives the trip. Extra slug lists are written
//! raw; catalog slugs must therefore avoid `-`, `,`, `:`, `&`, `=` and `!`.
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde_json::Value;

use crate::catalog::Catalog;
use crate::constants::{
    ARRAY_DELIMITER, TEAM_FIELD_DELIMITER, TEAM_VALUE_DELIMITER, VEHICLE_FIELD_DELIMITER,
    VEHICLE_SHORT_KEY, VEHICLE_VALUE_DELIMITER,
};
use crate::dehydrate::dehydrate;
use crate::error::RosterError;
use crate::extra::ExtraKind;
use crate::hydrate::hydrate;
use crate::team::{PartialTeam, PartialVehicle, Team};

/// Bytes left unescaped by `encodeURI`, minus the share grammar delimiters.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b'@')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Dehydrated field names that have a short key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Slug,
    Name,
    Sponsor,
    AllowAllPerks,
    MaxCost,
    Label,
    Weapons,
    Upgrades,
    Perks,
    ForegroundColour,
    BackgroundColour,
}

impl Field {
    pub const ALL: [Self; 11] = [
        Self::Slug,
        Self::Name,
        Self::Sponsor,
        Self::AllowAllPerks,
        Self::MaxCost,
        Self::Label,
        Self::Weapons,
        Self::Upgrades,
        Self::Perks,
        Self::ForegroundColour,
        Self::BackgroundColour,
    ];

    #[must_use]
    pub const fn short(self) -> &'static str {
        match self {
            Self::Slug => "s",
            Self::Name => "n",
            Self::Sponsor => "o",
            Self::AllowAllPerks => "a",
            Self::MaxCost => "m",
            Self::Label => "l",
            Self::Weapons => "w",
            Self::Upgrades => "u",
            Self::Perks => "p",
            Self::ForegroundColour => "c1",
            Self::BackgroundColour => "c2",
        }
    }

    #[must_use]
    pub const fn full(self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Name => "name",
            Self::Sponsor => "sponsor",
            Self::AllowAllPerks => "allowAllPerks",
            Self::MaxCost => "maxCost",
            Self::Label => "label",
            Self::Weapons => "weapons",
            Self::Upgrades => "upgrades",
            Self::Perks => "perks",
            Self::ForegroundColour => "foregroundColour",
            Self::BackgroundColour => "backgroundColour",
        }
    }

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownShortKey`] for keys outside the table.
    pub fn from_short(short: &str) -> Result<Self, RosterError> {
        Self::ALL
            .into_iter()
            .find(|field| field.short() == short)
            .ok_or_else(|| RosterError::UnknownShortKey(short.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`RosterError::UnknownField`] for names outside the table.
    pub fn from_full(full: &str) -> Result<Self, RosterError> {
        Self::ALL
            .into_iter()
            .find(|field| field.full() == full)
            .ok_or_else(|| RosterError::UnknownField(full.to_string()))
    }

    /// The extra category whose slug list this field holds, if any.
    #[must_use]
    pub const fn extra_kind(self) -> Option<ExtraKind> {
        match self {
            Self::Weapons => Some(ExtraKind::Weapons),
            Self::Upgrades => Some(ExtraKind::Upgrades),
            Self::Perks => Some(ExtraKind::Perks),
            _ => None,
        }
    }
}

/// Full field name to short key.
///
/// # Errors
///
/// Returns [`RosterError::UnknownField`] for names outside the table.
pub fn short_key(full: &str) -> Result<&'static str, RosterError> {
    Field::from_full(full).map(Field::short)
}

/// Short key to full field name.
///
/// # Errors
///
/// Returns [`RosterError::UnknownShortKey`] for keys outside the table.
pub fn full_key(short: &str) -> Result<&'static str, RosterError> {
    Field::from_short(short).map(Field::full)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE_SET).to_string()
}

fn decode(value: &str) -> Result<String, RosterError> {
    Ok(percent_decode_str(value).decode_utf8()?.into_owned())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Dehydrate a team and render it as a share string.
#[must_use]
pub fn serialize(team: &Team) -> String {
    render(&dehydrate(team))
}

/// Render an already dehydrated tree.
///
/// # Errors
///
/// Returns [`RosterError::UnknownField`] if the tree carries an `id`, which
/// has no short key.
pub fn serialize_partial(partial: &PartialTeam) -> Result<String, RosterError> {
    if partial.id.is_some() {
        return Err(RosterError::UnknownField("id".to_string()));
    }
    Ok(render(partial))
}

fn render(partial: &PartialTeam) -> String {
    let mut tokens: Vec<String> = Vec::new();
    let mut push_scalar = |field: Field, value: &str| {
        tokens.push(format!(
            "{}{TEAM_VALUE_DELIMITER}{}",
            field.short(),
            encode(value)
        ));
    };

    if let Some(name) = &partial.name {
        push_scalar(Field::Name, name);
    }
    if let Some(sponsor) = &partial.sponsor {
        push_scalar(Field::Sponsor, sponsor);
    }
    if let Some(flag) = &partial.allow_all_perks {
        push_scalar(Field::AllowAllPerks, &value_text(flag));
    }
    if let Some(max_cost) = partial.max_cost {
        push_scalar(Field::MaxCost, &max_cost.to_string());
    }

    for vehicle in partial.vehicles.iter().flatten() {
        tokens.push(format!(
            "{VEHICLE_SHORT_KEY}{TEAM_VALUE_DELIMITER}{}",
            render_vehicle(vehicle)
        ));
    }

    tokens.join(TEAM_FIELD_DELIMITER.to_string().as_str())
}

fn render_vehicle(vehicle: &PartialVehicle) -> String {
    let mut fields: Vec<String> = Vec::new();
    let mut push_scalar = |field: Field, value: &str| {
        fields.push(format!(
            "{}{VEHICLE_VALUE_DELIMITER}{}",
            field.short(),
            encode(value)
        ));
    };

    push_scalar(Field::Slug, &vehicle.slug);
    if let Some(label) = &vehicle.label {
        push_scalar(Field::Label, label);
    }
    if let Some(fg) = &vehicle.foreground_colour {
        push_scalar(Field::ForegroundColour, fg);
    }
    if let Some(bg) = &vehicle.background_colour {
        push_scalar(Field::BackgroundColour, bg);
    }

    for field in [Field::Weapons, Field::Upgrades, Field::Perks] {
        let Some(kind) = field.extra_kind() else {
            continue;
        };
        if let Some(slugs) = vehicle.extras(kind) {
            fields.push(format!(
                "{}{VEHICLE_VALUE_DELIMITER}{}",
                field.short(),
                slugs.join(ARRAY_DELIMITER.to_string().as_str())
            ));
        }
    }

    fields.join(VEHICLE_FIELD_DELIMITER.to_string().as_str())
}

/// Split `key<delimiter>value`, keeping only the first value segment.
fn split_pair(token: &str, delimiter: char) -> (&str, &str) {
    let mut pieces = token.split(delimiter);
    let key = pieces.next().unwrap_or_default();
    let value = pieces.next().unwrap_or_default();
    (key, value)
}

/// Parse a share string back into a dehydrated tree without hydrating it.
///
/// # Errors
///
/// Returns [`RosterError::UnknownShortKey`] for unrecognised keys,
/// [`RosterError::InvalidValue`] for a non-numeric `maxCost` and
/// [`RosterError::Encoding`] when a decoded value is not UTF-8.
pub fn parse_share_string(uri: &str) -> Result<PartialTeam, RosterError> {
    let mut partial = PartialTeam::default();

    for part in uri.split(TEAM_FIELD_DELIMITER) {
        let (key, value) = split_pair(part, TEAM_VALUE_DELIMITER);

        if key == VEHICLE_SHORT_KEY {
            partial
                .vehicles
                .get_or_insert_with(Vec::new)
                .push(parse_vehicle(value)?);
            continue;
        }

        let field = Field::from_short(key)?;
        let value = decode(value)?;
        match field {
            Field::Name => partial.name = Some(value),
            Field::Sponsor => partial.sponsor = Some(value),
            Field::AllowAllPerks => partial.allow_all_perks = Some(Value::String(value)),
            Field::MaxCost => {
                let max_cost = value.parse().map_err(|_| RosterError::InvalidValue {
                    field: Field::MaxCost.full(),
                    value: value.clone(),
                })?;
                partial.max_cost = Some(max_cost);
            }
            other => log::warn!("ignoring vehicle field {} at team level", other.full()),
        }
    }

    Ok(partial)
}

fn parse_vehicle(value: &str) -> Result<PartialVehicle, RosterError> {
    let mut vehicle = PartialVehicle::default();

    for part in value.split(VEHICLE_FIELD_DELIMITER) {
        let (key, value) = split_pair(part, VEHICLE_VALUE_DELIMITER);
        let field = Field::from_short(key)?;

        if let Some(kind) = field.extra_kind() {
            let slugs = value.split(ARRAY_DELIMITER).map(str::to_string).collect();
            vehicle.set_extras(kind, slugs);
            continue;
        }

        let value = decode(value)?;
        match field {
            Field::Slug => vehicle.slug = value,
            Field::Label => vehicle.label = Some(value),
            Field::ForegroundColour => vehicle.foreground_colour = Some(value),
            Field::BackgroundColour => vehicle.background_colour = Some(value),
            other => log::warn!("ignoring team field {} inside a vehicle", other.full()),
        }
    }

    Ok(vehicle)
}

/// Rebuild a team from a share string.
///
/// Every failure, from an unknown short key to a stale slug, is logged and
/// reported as `None` so callers can fall back to a new team.
#[must_use]
pub fn deserialize(catalog: &Catalog, uri: &str) -> Option<Team> {
    match parse_share_string(uri).and_then(|partial| hydrate(catalog, partial)) {
        Ok(team) => Some(team),
        Err(err) => {
            log::error!("share link rejected: {err}");
            None
        }
    }
}
