use crate::*;
use std::path::PathBuf;

pub fn handle_runtime_commands(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Merge {
            annotations,
            output,
            write,
            no_create,
        } => {
            let config = load_config()?;
            let mut catalog = load_catalog(&cli.catalog)?;
            let annotations = load_annotations(annotations)?;
            let policy = MergePolicy {
                auto_create_zones: config.merge.auto_create_zones && !*no_create,
            };
            let mut report = merge(&mut catalog, &annotations, policy)?;

            let target: Option<PathBuf> = if *write {
                Some(cli.catalog.clone())
            } else {
                output.clone()
            };
            if let Some(path) = &target {
                save_catalog(&catalog, path)?;
                report.written_to = Some(path.display().to_string());
                audit(
                    "merge",
                    serde_json::json!({
                        "catalog": path.display().to_string(),
                        "zones_updated": report.zones_updated.len(),
                        "zones_created": report.zones_created.len(),
                        "warnings": report.warnings.len()
                    }),
                );
            }

            print_warnings(cli.json, &report.warnings);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!(
                    "merged {} zones ({} updated, {} created)",
                    report.zones_updated.len() + report.zones_created.len(),
                    report.zones_updated.len(),
                    report.zones_created.len()
                );
                println!(
                    "pois: {} added, {} overwritten; steps replaced: {}; town visits replaced: {}",
                    report.pois_added,
                    report.pois_overwritten,
                    report.steps_replaced,
                    report.visits_replaced
                );
                match &report.written_to {
                    Some(path) => println!("wrote {}", path),
                    None => println!("dry run: catalog not written (use --write or --output)"),
                }
            }
        }
        Commands::Validate => {
            let catalog = load_catalog(&cli.catalog)?;
            print_one(cli.json, catalog.zones.len(), |n| {
                format!("catalog valid ({} zones)", n)
            })?;
        }
        Commands::Show { zone } => {
            let catalog = load_catalog(&cli.catalog)?;
            let Some(entry) = catalog.zones.get(zone) else {
                anyhow::bail!("zone not found: {}", zone);
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: entry
                    })?
                );
            } else {
                println!("zone: {}", zone);
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
        }
        Commands::List => {
            let catalog = load_catalog(&cli.catalog)?;
            let rows: Vec<ZoneSummary> = catalog
                .zones
                .iter()
                .map(|(zone, entry)| ZoneSummary {
                    zone: zone.clone(),
                    has_notes: entry.get("notes").is_some(),
                    pois: field_len(entry, "pois"),
                    steps: field_len(entry, "walkthrough_steps"),
                    town_visits: field_len(entry, "town_visits"),
                })
                .collect();
            print_out(cli.json, &rows, |r| {
                format!(
                    "{}\t{} pois\t{} steps\t{} town visits",
                    r.zone, r.pois, r.steps, r.town_visits
                )
            })?;
        }
    }

    Ok(())
}

fn field_len(entry: &serde_json::Value, field: &str) -> usize {
    match entry.get(field) {
        Some(serde_json::Value::Array(items)) => items.len(),
        Some(serde_json::Value::Object(map)) => map.len(),
        _ => 0,
    }
}
