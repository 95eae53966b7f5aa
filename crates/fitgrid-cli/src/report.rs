//! Human-readable and JSON placement reports.

use fitgrid_placement::{Assignment, PlacementEvent, PlacementOutcome, ResourceVector, Server};

/// Render an outcome as text. With `events`, the report starts with a
/// step-by-step narration of every candidate check.
pub fn format_report(outcome: &PlacementOutcome, events: Option<&[PlacementEvent]>) -> String {
    let resources = outcome.pool.resources();
    let mut out = String::new();

    if let Some(events) = events {
        out.push_str("--- Placement trace (best fit by cosine similarity) ---\n\n");
        for event in events {
            out.push_str(&narrate(event, resources));
        }
    }

    out.push_str("--- Final placement ---\n");
    for (service, assignment) in outcome.result.iter() {
        match assignment {
            Assignment::Placed { server, .. } => {
                out.push_str(&format!("{service} --> {server}\n"));
            }
            Assignment::Unplaced => {
                out.push_str(&format!("{service} --> unplaced\n"));
            }
        }
    }

    out.push_str("\n--- Remaining resources ---\n");
    for server in outcome.pool.iter() {
        out.push_str(&format!(
            "{}: {} (used {})\n",
            server.id(),
            labeled(server.available(), resources, "="),
            used_percent(server, resources),
        ));
    }

    let unplaced = outcome.result.len() - outcome.result.placed_count();
    if unplaced > 0 {
        out.push_str(&format!("\n⚠ {unplaced} service(s) could not be placed\n"));
    }

    out
}

fn narrate(event: &PlacementEvent, resources: &[String]) -> String {
    match event {
        PlacementEvent::ServiceStarted { service, demand } => {
            format!("Searching server for: {service} ({})\n", labeled(demand, resources, ": "))
        }
        PlacementEvent::CandidateRejected { server, .. } => {
            format!("  -> {server}: insufficient resources\n")
        }
        PlacementEvent::CandidateScored {
            server,
            available,
            score,
            ..
        } => format!(
            "  -> checking {server}: available [{}] -> score: {score:.4}\n",
            labeled(available, resources, ":")
        ),
        PlacementEvent::ServicePlaced { server, score, .. } => {
            format!("  ==> selected: {server} (score: {score:.4})\n\n")
        }
        PlacementEvent::ServiceUnplaced { .. } => {
            "  ==> failed: no suitable server found\n\n".to_string()
        }
    }
}

/// `cpu=2, ram=4` style rendering of a vector.
fn labeled(vector: &ResourceVector, resources: &[String], sep: &str) -> String {
    vector
        .components()
        .iter()
        .zip(resources)
        .map(|(value, name)| format!("{name}{sep}{value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `cpu 50%, ram 25%` style rendering of a server's utilization.
fn used_percent(server: &Server, resources: &[String]) -> String {
    server
        .utilization()
        .iter()
        .zip(resources)
        .map(|(used, name)| format!("{name} {:.0}%", used * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON document for `--format json`: the serialized outcome (`result`,
/// `pool`) plus per-server `utilization`, and `events` when given.
pub fn json_report(
    outcome: &PlacementOutcome,
    events: Option<&[PlacementEvent]>,
) -> serde_json::Result<serde_json::Value> {
    let mut report = serde_json::to_value(outcome)?;

    let resources = outcome.pool.resources();
    let utilization: serde_json::Map<String, serde_json::Value> = outcome
        .pool
        .iter()
        .map(|server| {
            let per_resource: serde_json::Map<String, serde_json::Value> = resources
                .iter()
                .cloned()
                .zip(server.utilization().into_iter().map(serde_json::Value::from))
                .collect();
            (server.id().to_string(), serde_json::Value::Object(per_resource))
        })
        .collect();
    report["utilization"] = serde_json::Value::Object(utilization);

    if let Some(events) = events {
        report["events"] = serde_json::to_value(events)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitgrid_core::InventoryConfig;
    use fitgrid_placement::{EventLog, Server, ServerPool, Service, inventory_to_inputs, place, place_with_observer};

    fn demo() -> (PlacementOutcome, EventLog) {
        let (services, pool) = inventory_to_inputs(&InventoryConfig::demo()).unwrap();
        let mut log = EventLog::new();
        let outcome = place_with_observer(&services, pool, &mut log).unwrap();
        (outcome, log)
    }

    #[test]
    fn lists_final_placement_and_remaining() {
        let (outcome, _) = demo();
        let text = format_report(&outcome, None);

        assert!(text.contains("web-server --> server-1-small"));
        assert!(text.contains("database --> server-2-medium"));
        assert!(text.contains("server-2-medium: cpu=0, ram=1"));
        assert!(text.contains("server-1-small: cpu=2, ram=2 (used cpu 50%, ram 50%)"));
        assert!(text.contains("server-3-large: cpu=8, ram=16 (used cpu 0%, ram 0%)"));
        assert!(!text.contains("Placement trace"));
        assert!(!text.contains("could not be placed"));
    }

    #[test]
    fn trace_narrates_candidates() {
        let (outcome, log) = demo();
        let text = format_report(&outcome, Some(log.events()));

        assert!(text.contains("Searching server for: web-server (cpu: 2, ram: 2)"));
        assert!(text.contains("  -> checking server-1-small: available [cpu:4, ram:4] -> score: 1.0000"));
        assert!(text.contains("  -> server-1-small: insufficient resources"));
        assert!(text.contains("  ==> selected: server-2-medium"));
    }

    #[test]
    fn reports_unplaced_services() {
        let pool = ServerPool::default()
            .with_server(Server::new("tiny", vec![1.0, 1.0]))
            .unwrap();
        let outcome = place(&[Service::new("big", vec![2.0, 2.0])], pool).unwrap();

        let text = format_report(&outcome, None);
        assert!(text.contains("big --> unplaced"));
        assert!(text.contains("1 service(s) could not be placed"));
    }

    #[test]
    fn json_report_shape() {
        let (outcome, log) = demo();

        let without = json_report(&outcome, None).unwrap();
        assert_eq!(without["result"]["backend-api"]["status"], "placed");
        assert_eq!(without["result"]["backend-api"]["server"], "server-2-medium");
        assert_eq!(
            without["pool"]["servers"]["server-1-small"]["available"],
            serde_json::json!([2.0, 2.0])
        );
        assert_eq!(without["utilization"]["server-1-small"]["cpu"], 0.5);
        assert_eq!(without["utilization"]["server-3-large"]["ram"], 0.0);
        assert!(without.get("events").is_none());

        let with = json_report(&outcome, Some(log.events())).unwrap();
        assert_eq!(with["events"][0]["event"], "service_started");
    }
}
