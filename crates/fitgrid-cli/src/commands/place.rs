use std::path::Path;

use anyhow::Context;
use fitgrid_core::InventoryConfig;
use fitgrid_placement::{
    EventLog, PlacementEvent, PlacementObserver, PlacementOutcome, TracingObserver,
    inventory_to_inputs, place_with_observer,
};
use tracing::info;

use crate::Format;
use crate::report;

pub fn run(inventory: &Path, format: Format, trace: bool) -> anyhow::Result<()> {
    let config = InventoryConfig::from_file(inventory)
        .with_context(|| format!("failed to load inventory {}", inventory.display()))?;
    info!(path = %inventory.display(), "loaded inventory");
    execute(&config, format, trace)
}

pub fn demo(format: Format, trace: bool) -> anyhow::Result<()> {
    execute(&InventoryConfig::demo(), format, trace)
}

fn execute(config: &InventoryConfig, format: Format, trace: bool) -> anyhow::Result<()> {
    let (outcome, log) = run_placement(config)?;
    let events = trace.then(|| log.into_events());

    match format {
        Format::Json => {
            let json = report::json_report(&outcome, events.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Format::Text => {
            print!("{}", report::format_report(&outcome, events.as_deref()));
        }
    }

    Ok(())
}

fn run_placement(config: &InventoryConfig) -> anyhow::Result<(PlacementOutcome, EventLog)> {
    let (services, pool) = inventory_to_inputs(config).context("invalid inventory")?;
    info!(services = services.len(), servers = pool.len(), "placing services");

    let mut log = EventLog::new();
    let mut tracer = TracingObserver;
    let outcome = place_with_observer(&services, pool, &mut |event: &PlacementEvent| {
        tracer.on_event(event);
        log.on_event(event);
    })
    .context("invalid inventory")?;
    Ok((outcome, log))
}
