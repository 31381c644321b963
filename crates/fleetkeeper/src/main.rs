//! `fleetctl` - CLI for fleetkeeper
//!
//! This binary loads a fleet manifest into memory and prints reports about it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::Parser;

use fleetkeeper::cli::{
    Cli, Command, ConfigCommand, DueCommand, EfficiencyCommand, HistoryCommand, InsuranceCommand,
    SearchCommand, StatsCommand,
};
use fleetkeeper::manifest::ManifestVehicle;
use fleetkeeper::{init_logging, Config, FleetManager, FleetManifest, MaintenancePolicy, Vehicle};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    let fleet = if cli.command.needs_fleet() {
        load_fleet(&cli, &config)?
    } else {
        FleetManager::with_config(&config)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Details => fleet.fleet_details_report().write_to(&mut out)?,
        Command::History(cmd) => handle_history(&fleet, &cmd, &mut out)?,
        Command::Due(cmd) => handle_due(&fleet, &cmd, &mut out)?,
        Command::Search(cmd) => handle_search(&fleet, &cmd, &mut out)?,
        Command::Efficiency(cmd) => handle_efficiency(&fleet, &cmd, &mut out)?,
        Command::Insurance(cmd) => handle_insurance(&fleet, &cmd, &mut out)?,
        Command::Stats(cmd) => handle_stats(&fleet, &cmd, &mut out)?,
        Command::Config(cmd) => handle_config(&config, cmd, &mut out)?,
    }
    Ok(())
}

fn load_fleet(cli: &Cli, config: &Config) -> anyhow::Result<FleetManager> {
    let Some(path) = cli.manifest_path(config) else {
        bail!("no fleet manifest given; pass --manifest or set manifest.path in the config");
    };
    let manifest = FleetManifest::from_path(&path)?;
    let fleet = manifest
        .into_fleet(MaintenancePolicy::from(config))
        .with_context(|| format!("building fleet from {}", path.display()))?;
    Ok(fleet)
}

fn vehicle_json(vehicle: &Vehicle) -> serde_json::Value {
    serde_json::json!({
        "id": vehicle.id(),
        "vehicle": ManifestVehicle::from(vehicle),
    })
}

fn write_vehicles(out: &mut impl Write, vehicles: &[&Vehicle], json: bool) -> anyhow::Result<()> {
    if json {
        let values: Vec<_> = vehicles.iter().map(|v| vehicle_json(v)).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
    } else {
        for vehicle in vehicles {
            writeln!(out, "{:>4}  {}", vehicle.id(), vehicle)?;
        }
    }
    Ok(())
}

fn handle_history(
    fleet: &FleetManager,
    cmd: &HistoryCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let matches = fleet.find_vehicle_by_model(&cmd.model);
    if matches.is_empty() {
        writeln!(out, "No vehicles with model \"{}\".", cmd.model)?;
        return Ok(());
    }
    for vehicle in matches {
        fleet
            .maintenance_history_report(vehicle.id())?
            .write_to(out)?;
    }
    Ok(())
}

fn handle_due(fleet: &FleetManager, cmd: &DueCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let due = fleet
        .fleet_maintenance_due()
        .context("checking maintenance dates")?;
    if due.is_empty() && !cmd.json {
        writeln!(out, "No vehicles due for maintenance.")?;
        return Ok(());
    }
    write_vehicles(out, &due, cmd.json)
}

fn handle_search(
    fleet: &FleetManager,
    cmd: &SearchCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let candidates = match (&cmd.model, &cmd.make) {
        (Some(model), _) => fleet.find_vehicle_by_model(model),
        (None, Some(make)) => fleet.find_vehicles_by_make(make),
        (None, None) => fleet.find_vehicles_by_year_range(
            cmd.from_year.unwrap_or(i32::MIN),
            cmd.to_year.unwrap_or(i32::MAX),
        ),
    };
    let hits: Vec<_> = candidates.into_iter().filter(|v| cmd.matches(v)).collect();
    write_vehicles(out, &hits, cmd.json)
}

fn handle_efficiency(
    fleet: &FleetManager,
    cmd: &EfficiencyCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    // The calculation does not look at the vehicle, so any handle will do.
    let vehicle = fleet
        .vehicles()
        .first()
        .map_or(fleetkeeper::VehicleId::new(0), Vehicle::id);
    let efficiency = fleet.calculate_fuel_efficiency(vehicle, cmd.start, cmd.end, cmd.fuel)?;
    writeln!(out, "{efficiency:.2} miles per unit of fuel")?;
    Ok(())
}

fn handle_insurance(
    fleet: &FleetManager,
    cmd: &InsuranceCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let info = fleet.fleet_insurance_info();
    if cmd.json {
        let entries: Vec<_> = info
            .iter()
            .map(|(id, insurance)| serde_json::json!({ "id": id, "insurance": insurance }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }
    for (id, insurance) in &info {
        let Some(vehicle) = fleet.vehicle(*id) else {
            continue;
        };
        match insurance {
            Some(ins) => writeln!(
                out,
                "{:>4}  {}: {} (policy {})",
                id, vehicle, ins.provider, ins.policy_number
            )?,
            None => writeln!(out, "{id:>4}  {vehicle}: uninsured")?,
        }
    }
    Ok(())
}

fn handle_stats(
    fleet: &FleetManager,
    cmd: &StatsCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let stats = fleet.stats().context("computing fleet statistics")?;
    if cmd.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        writeln!(out, "Fleet statistics")?;
        writeln!(out, "----------------")?;
        writeln!(out, "Vehicles:            {}", stats.total_vehicles)?;
        writeln!(out, "Due for maintenance: {}", stats.vehicles_due)?;
        writeln!(out, "Insured:             {}", stats.insured_vehicles)?;
        writeln!(out, "Maintenance records: {}", stats.maintenance_records)?;
        writeln!(out, "Fuel logged:         {:.2}", stats.total_fuel_used)?;
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand, out: &mut impl Write) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
            } else {
                writeln!(out, "Current Configuration")?;
                writeln!(out, "=====================")?;
                writeln!(out)?;
                writeln!(out, "[Maintenance]")?;
                writeln!(
                    out,
                    "  Due after (days):   {}",
                    config.maintenance.due_after_days
                )?;
                writeln!(out)?;
                writeln!(out, "[Manifest]")?;
                match &config.manifest.path {
                    Some(path) => writeln!(out, "  Path:               {}", path.display())?,
                    None => writeln!(out, "  Path:               (not set)")?,
                }
            }
        }
        ConfigCommand::Path => {
            writeln!(out, "{}", Config::default_config_path().display())?;
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            match Config::load_from(Some(path)) {
                Ok(_) => writeln!(out, "Configuration is valid.")?,
                Err(e) => writeln!(out, "Configuration error: {e}")?,
            }
        }
    }
    Ok(())
}
