use colored::*;
use comfy_table::Table;
use kube::Client;

use crate::error::Result;
use crate::k8s::Settings;
use crate::models::{SyncStatus, WorkloadSummary};
use crate::report::{Report, build_report};
use crate::table::to_table;
use crate::utils;

pub async fn run(
    client: Client,
    settings: &Settings,
    namespace_arg: Option<Option<String>>,
    markdown: bool,
) -> anyhow::Result<()> {
    let namespace = utils::resolve_target_namespace(client.clone(), settings, namespace_arg).await?;

    let pb = utils::create_spinner("Building report...");
    let report = build_report(client, settings, &namespace).await;
    pb.finish_and_clear();

    if markdown {
        print_markdown(&report);
    } else {
        print_terminal(&report);
    }
    Ok(())
}

fn print_terminal(report: &Report) {
    match &report.apps {
        Ok(section) => {
            println!("\n{}", "--- APPLICATIONS ---".bold().bright_white());
            if section.synced.is_empty() && section.unsynced.is_empty() {
                println!("   (No applications in {})", report.argo_namespace);
            } else {
                let mut table = Table::new();
                table.set_header(vec!["Name", "Destination", "Status"]);
                for app in section.synced.iter().chain(&section.unsynced) {
                    let status = if app.sync_status == SyncStatus::Synced {
                        app.sync_status.to_string().green()
                    } else {
                        app.sync_status.to_string().red()
                    };
                    table.add_row(vec![
                        app.name.clone(),
                        app.destination_namespace.clone(),
                        status.to_string(),
                    ]);
                }
                println!("{table}");
            }
            if section.skipped > 0 {
                println!(
                    "{}",
                    format!("   ({} malformed application(s) skipped)", section.skipped).yellow()
                );
            }

            println!("\n{}", "--- REPLICAS PER NAMESPACE ---".bold().bright_white());
            if section.totals.is_empty() {
                println!("   (No synced destination namespaces)");
            } else {
                let mut totals = Table::new();
                totals.set_header(vec!["Namespace", "Replicas"]);
                for total in &section.totals {
                    let cell = match &total.replicas {
                        Ok(n) => n.to_string(),
                        Err(e) => e.to_string().red().to_string(),
                    };
                    totals.add_row(vec![total.namespace.clone(), cell]);
                }
                println!("{totals}");
            }
        }
        Err(e) => {
            println!("\n{}", "--- APPLICATIONS ---".bold().bright_white());
            println!("{}", e.to_string().red());
        }
    }

    print_workload_section("DEPLOYMENTS", &report.deployments);
    print_workload_section("STATEFULSETS", &report.statefulsets);
}

fn print_workload_section(title: &str, section: &Result<Vec<WorkloadSummary>>) {
    println!("\n{}", format!("--- {title} ---").bold().bright_white());
    match section {
        Ok(items) if items.is_empty() => println!("   (none)"),
        Ok(items) => {
            let mut table = Table::new();
            table.set_header(vec!["Name", "Replicas"]);
            for workload in items {
                table.add_row(vec![workload.name.clone(), workload.replicas.to_string()]);
            }
            println!("{table}");
        }
        Err(e) => println!("{}", e.to_string().red()),
    }
}

// Pipe tables, embeddable in any markdown surface.
fn print_markdown(report: &Report) {
    match &report.apps {
        Ok(section) => {
            let synced: Vec<_> = section
                .synced
                .iter()
                .map(|a| (a.name.clone(), a.destination_namespace.clone()))
                .collect();
            println!("Synced Applications\n");
            println!("{}", to_table(["Name", "Destination"], &synced));

            let unsynced: Vec<_> = section
                .unsynced
                .iter()
                .map(|a| (a.name.clone(), a.sync_status.to_string()))
                .collect();
            println!("\nUnsynced Applications\n");
            println!("{}", to_table(["Name", "Status"], &unsynced));

            let totals: Vec<_> = section
                .totals
                .iter()
                .map(|t| {
                    let cell = match &t.replicas {
                        Ok(n) => n.to_string(),
                        Err(_) => "unavailable".to_string(),
                    };
                    (t.namespace.clone(), cell)
                })
                .collect();
            println!("\nReplicas per Namespace\n");
            println!("{}", to_table(["Namespace", "Replicas"], &totals));

            if section.skipped > 0 {
                println!("\n{} malformed application(s) skipped", section.skipped);
            }
        }
        Err(e) => println!("Applications unavailable: {e}"),
    }

    print_markdown_workloads("Deployments", &report.deployments);
    print_markdown_workloads("StatefulSets", &report.statefulsets);
}

fn print_markdown_workloads(title: &str, section: &Result<Vec<WorkloadSummary>>) {
    println!("\n{title}\n");
    match section {
        Ok(items) => {
            let rows: Vec<_> = items
                .iter()
                .map(|w| (w.name.clone(), w.replicas.to_string()))
                .collect();
            println!("{}", to_table(["Name", "Replicas"], &rows));
        }
        Err(e) => println!("unavailable: {e}"),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::report::AppsSection;

    // One unreachable resource class degrades its own section only.
    #[test]
    fn failed_section_still_renders_the_rest() {
        let report = Report {
            namespace: "team-a".to_string(),
            argo_namespace: "argo-cd".to_string(),
            apps: Ok(AppsSection {
                synced: vec![],
                unsynced: vec![],
                skipped: 1,
                totals: vec![],
            }),
            deployments: Ok(vec![WorkloadSummary {
                name: "x".to_string(),
                replicas: 3,
            }]),
            statefulsets: Err(Error::ResourceUnavailable {
                resource: "StatefulSet",
                namespace: "team-a".to_string(),
                reason: "connection refused".to_string(),
            }),
        };

        print_terminal(&report);
        print_markdown(&report);
    }
}
