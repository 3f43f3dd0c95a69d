mod render;
mod store;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use solcal_core::{
    build_month, build_year, from_solar, parse_gregorian, to_solar, AnchorPreset, DateIdentifier,
    FlagRules, PresetManager, PresetPatch, SolarPosition, DAYS_PER_YEAR,
};
use store::TomlPresetStore;

#[derive(Parser)]
#[command(name = "solcal")]
#[command(about = "Track dates in the anchored 364-day solar calendar (13 months × 28 days)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Gregorian date to its solar position under the active anchor
    Convert {
        /// Gregorian date (YYYY-MM-DD)
        date: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a date identifier back to its Gregorian date
    Lookup {
        /// Identifier as produced by `convert` (e.g. "500004-05-21")
        identifier: String,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert today's date
    Today {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a 28-day month grid (defaults to the current solar month)
    Month {
        /// Solar year (0 at the anchor; negative before it)
        year: Option<i32>,

        /// Solar month (1-13)
        month: Option<u8>,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show all 13 months of a solar year
    Year {
        /// Solar year (0 at the anchor; negative before it)
        year: i32,
    },
    /// Manage anchor presets
    Preset {
        #[command(subcommand)]
        command: PresetCommands,
    },
}

#[derive(Subcommand)]
enum PresetCommands {
    /// Save a new anchor preset
    Add {
        name: String,

        /// Gregorian start date of month 1, day 1, year 0 (YYYY-MM-DD)
        start_date: String,
    },
    /// List saved presets
    List,
    /// Make a preset the active anchor
    Use { name: String },
    /// Rename a preset
    Rename { name: String, new_name: String },
    /// Delete a preset (deleting the active one falls back to the default)
    Remove { name: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut manager, rules) = load_manager()?;

    match cli.command {
        Commands::Convert { date, json } => {
            let date = parse_gregorian(&date)?;
            cmd_report(date, manager.active(), json)
        }
        Commands::Lookup { identifier, json } => cmd_lookup(&identifier, manager.active(), json),
        Commands::Today { json } => {
            let today = chrono::Local::now().date_naive();
            cmd_report(today, manager.active(), json)
        }
        Commands::Month { year, month, json } => {
            cmd_month(year, month, manager.active(), &rules, json)
        }
        Commands::Year { year } => cmd_year(year, manager.active(), &rules),
        Commands::Preset { command } => match command {
            PresetCommands::Add { name, start_date } => {
                cmd_preset_add(&mut manager, &name, &start_date)
            }
            PresetCommands::List => cmd_preset_list(&manager),
            PresetCommands::Use { name } => cmd_preset_use(&mut manager, &name),
            PresetCommands::Rename { name, new_name } => {
                cmd_preset_rename(&mut manager, &name, &new_name)
            }
            PresetCommands::Remove { name } => cmd_preset_remove(&mut manager, &name),
        },
    }
}

fn load_manager() -> Result<(PresetManager<TomlPresetStore>, FlagRules)> {
    let store = TomlPresetStore::open_default()?;
    let rules = store.rules()?;
    let saved_active = store.active_id();

    let mut manager = PresetManager::load(store)?;
    if let Some(id) = saved_active {
        if manager.select(&id).is_err() {
            // Hand-edited or stale selection: fall back to the default.
            eprintln!(
                "warning: saved active preset no longer exists; using '{}'",
                manager.active().name
            );
        }
    }
    Ok((manager, rules))
}

/// One converted day, as printed by convert/lookup/today.
#[derive(Serialize)]
struct DayReport<'a> {
    gregorian: NaiveDate,
    position: SolarPosition,
    identifier: DateIdentifier,
    anchor_name: &'a str,
    anchor_start_date: NaiveDate,
}

fn cmd_report(date: NaiveDate, anchor: &AnchorPreset, json: bool) -> Result<()> {
    let position = to_solar(date, anchor)?;
    let identifier = DateIdentifier::encode(&position);

    if json {
        let report = DayReport {
            gregorian: date,
            position,
            identifier,
            anchor_name: &anchor.name,
            anchor_start_date: anchor.start_date,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{date} → year {}, month {}, day {} (day {} of {DAYS_PER_YEAR})",
        position.year(),
        position.month(),
        position.day(),
        position.doy()
    );
    println!("identifier: {identifier}");
    println!("anchor: {} ({})", anchor.name, anchor.start_date);
    Ok(())
}

fn cmd_lookup(identifier: &str, anchor: &AnchorPreset, json: bool) -> Result<()> {
    let position = DateIdentifier::decode(identifier)?;
    let date = from_solar(&position, anchor)?;
    cmd_report(date, anchor, json)
}

fn cmd_month(
    year: Option<i32>,
    month: Option<u8>,
    anchor: &AnchorPreset,
    rules: &FlagRules,
    json: bool,
) -> Result<()> {
    let (year, month) = match (year, month) {
        (Some(y), Some(m)) => (y, m),
        (None, None) => {
            let today = chrono::Local::now().date_naive();
            let position = to_solar(today, anchor)?;
            (position.year(), position.month())
        }
        _ => anyhow::bail!("specify both <year> and <month>, or neither for the current month"),
    };

    let days = build_month(year, month, anchor, rules)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else {
        print!("{}", render::render_month(year, month, &days));
        println!("\n* sabbath  + feast  o new moon");
    }
    Ok(())
}

fn cmd_year(year: i32, anchor: &AnchorPreset, rules: &FlagRules) -> Result<()> {
    let months = build_year(year, anchor, rules)?;
    print!("{}", render::render_year(year, &months));
    Ok(())
}

fn cmd_preset_add(
    manager: &mut PresetManager<TomlPresetStore>,
    name: &str,
    start_date: &str,
) -> Result<()> {
    let start_date = parse_gregorian(start_date)?;
    let preset = manager.create(name, start_date)?;
    println!("Saved preset '{}' anchored at {}", preset.name, preset.start_date);
    println!("Activate it with: solcal preset use {}", preset.name);
    Ok(())
}

fn cmd_preset_list(manager: &PresetManager<TomlPresetStore>) -> Result<()> {
    let active_id = manager.active().id.clone();
    for preset in manager.presets() {
        let marker = if preset.id == active_id { "*" } else { " " };
        println!("{marker} {}  {}", preset.name, preset.start_date);
    }
    Ok(())
}

fn cmd_preset_use(manager: &mut PresetManager<TomlPresetStore>, name: &str) -> Result<()> {
    let id = resolve_preset(manager, name)?;
    manager.select(&id)?;
    manager.store_mut().set_active(&id)?;

    let active = manager.active();
    println!("Active anchor: {} ({})", active.name, active.start_date);
    println!("Note: day identifiers minted under other anchors are now stale.");
    Ok(())
}

fn cmd_preset_rename(
    manager: &mut PresetManager<TomlPresetStore>,
    name: &str,
    new_name: &str,
) -> Result<()> {
    let id = resolve_preset(manager, name)?;
    manager.update(
        &id,
        PresetPatch {
            name: Some(new_name.to_string()),
            ..PresetPatch::default()
        },
    )?;
    println!("Renamed '{name}' to '{new_name}'");
    Ok(())
}

fn cmd_preset_remove(manager: &mut PresetManager<TomlPresetStore>, name: &str) -> Result<()> {
    let id = resolve_preset(manager, name)?;
    let was_active = manager.active().id == id;

    manager.delete(&id)?;
    println!("Removed preset '{name}'");

    if was_active {
        let active = manager.active();
        let active_id = active.id.clone();
        println!(
            "It was the active anchor; fell back to '{}' ({})",
            active.name, active.start_date
        );
        manager.store_mut().set_active(&active_id)?;
    }
    Ok(())
}

fn resolve_preset(manager: &PresetManager<TomlPresetStore>, name: &str) -> Result<String> {
    match manager.find_by_name(name) {
        Some(preset) => Ok(preset.id.clone()),
        None => {
            let available: Vec<_> = manager.presets().iter().map(|p| p.name.as_str()).collect();
            anyhow::bail!(
                "Preset '{}' not found. Available: {}",
                name,
                available.join(", ")
            )
        }
    }
}
