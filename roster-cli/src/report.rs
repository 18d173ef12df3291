use colored::Colorize;
use roster_core::{Catalog, ExtraKind, Team, Vehicle, extra_cost, team_cost, vehicle_cost};
use serde::Serialize;
use std::io::{self, Write};

/// Catalog table selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Table {
    Vehicles,
    Sponsors,
    Weapons,
    Upgrades,
    Perks,
}

impl Table {
    const fn extra_kind(self) -> Option<ExtraKind> {
        match self {
            Self::Weapons => Some(ExtraKind::Weapons),
            Self::Upgrades => Some(ExtraKind::Upgrades),
            Self::Perks => Some(ExtraKind::Perks),
            Self::Vehicles | Self::Sponsors => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
}

#[must_use]
pub fn catalog_rows(catalog: &Catalog, table: Table) -> Vec<CatalogRow> {
    if let Some(kind) = table.extra_kind() {
        return catalog
            .extras(kind)
            .iter()
            .map(|def| CatalogRow {
                slug: def.slug.clone(),
                name: def.name.clone(),
                cost: Some(def.cost),
            })
            .collect();
    }

    match table {
        Table::Vehicles => catalog
            .vehicles()
            .iter()
            .map(|def| CatalogRow {
                slug: def.profile.slug.clone(),
                name: def.profile.name.clone(),
                cost: Some(def.profile.cost),
            })
            .collect(),
        _ => catalog
            .sponsors()
            .iter()
            .map(|def| CatalogRow {
                slug: def.slug.clone(),
                name: def.name.clone(),
                cost: None,
            })
            .collect(),
    }
}

pub fn write_catalog(out: &mut dyn Write, rows: &[CatalogRow]) -> io::Result<()> {
    for row in rows {
        match row.cost {
            Some(cost) => writeln!(out, "  {:20} {:28} {cost:>3}", row.slug, row.name)?,
            None => writeln!(out, "  {:20} {}", row.slug, row.name)?,
        }
    }
    Ok(())
}

fn extra_line(vehicle: &Vehicle, kind: ExtraKind, sponsor: Option<&str>) -> Option<String> {
    let extras = vehicle.extras.get(kind);
    if extras.is_empty() {
        return None;
    }
    let items: Vec<String> = extras
        .iter()
        .map(|extra| {
            let mut item = extra.def.name.clone();
            if kind == ExtraKind::Weapons {
                if let Some(facing) = extra.facing {
                    item.push_str(&format!(" [{}]", facing.as_str()));
                }
                if let Some(location) = extra.location {
                    item.push_str(&format!(" [{}]", location.as_str()));
                }
            }
            if extra.is_user_added() {
                item.push_str(&format!(" ({})", extra_cost(kind, extra, sponsor)));
            } else {
                item.push_str(" (stock)");
            }
            item
        })
        .collect();
    Some(format!("{}: {}", kind.key(), items.join(", ")))
}

pub fn write_team(out: &mut dyn Write, team: &Team) -> io::Result<()> {
    let sponsor = team.sponsor_slug();
    let total = team_cost(team);
    writeln!(out, "{}", format!("🏁 {}", team.name).bright_cyan().bold())?;
    if let Some(def) = &team.sponsor {
        writeln!(out, "Sponsor: {}", def.name)?;
    }
    if team.allow_all_perks {
        writeln!(out, "All perk classes allowed")?;
    }

    let budget = format!("Cost: {total} / {}", team.max_cost);
    if team.is_over_budget() {
        writeln!(out, "{}", budget.red())?;
    } else {
        writeln!(out, "{}", budget.green())?;
    }

    for vehicle in &team.vehicles {
        writeln!(
            out,
            "  {} ({}) - {} pts",
            vehicle.label.bold(),
            vehicle.name(),
            vehicle_cost(vehicle, sponsor)
        )?;
        if let Some((fg, bg)) = vehicle.colours.as_pair() {
            writeln!(out, "    colours: {fg} on {bg}")?;
        }
        for kind in ExtraKind::ALL {
            if let Some(line) = extra_line(vehicle, kind, sponsor) {
                writeln!(out, "    {line}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::{catalog, deserialize};

    fn render(team: &Team) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_team(&mut buf, team).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn team_summary_lists_vehicles_and_costs() {
        let team = deserialize(
            catalog(),
            "n=Road%20Hogs&o=idris&v=s:car,l:Red,w:machine_gun!turret,u:nitro&v=s:tank",
        )
        .unwrap();
        let text = render(&team);
        assert!(text.contains("Road Hogs"));
        assert!(text.contains("Sponsor: Idris"));
        assert!(text.contains("Cost: 61 / 50"));
        assert!(text.contains("Red (Car) - 21 pts"));
        assert!(text.contains("Machine Gun [turret] (6)"));
        assert!(text.contains("Nitro Booster (3)"));
        assert!(text.contains("125mm Cannon [front] (stock)"));
    }

    #[test]
    fn catalog_rows_cover_each_table() {
        let catalog = catalog();
        let vehicles = catalog_rows(catalog, Table::Vehicles);
        assert_eq!(vehicles.len(), catalog.vehicles().len());
        let sponsors = catalog_rows(catalog, Table::Sponsors);
        assert!(sponsors.iter().all(|row| row.cost.is_none()));
        let perks = catalog_rows(catalog, Table::Perks);
        assert!(perks.iter().any(|row| row.slug == "evasive"));

        let mut buf = Vec::new();
        write_catalog(&mut buf, &perks).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("Evasive"));
    }
}
