use colored::*;
use kube::Client;

use crate::k8s::{self, Settings};
use crate::report::classify;
use crate::utils;

/// Prints application names grouped by sync state, one per line.
pub async fn run(client: Client, settings: &Settings) -> anyhow::Result<()> {
    let pb = utils::create_spinner("Fetching applications...");
    let list =
        k8s::list_applications(client, &settings.argo_namespace, settings.request_timeout).await?;
    pb.finish_and_clear();

    let skipped = list.skipped;
    let mut classified = classify(list.items);
    classified.synced.sort_by(|a, b| a.name.cmp(&b.name));
    classified.unsynced.sort_by(|a, b| a.name.cmp(&b.name));

    println!("{}", "Synced:".bold().green());
    for app in &classified.synced {
        println!("{app}");
    }

    println!("\n{}", "Unsynced:".bold().red());
    for app in &classified.unsynced {
        println!("{app}");
    }

    if skipped > 0 {
        eprintln!(
            "{}",
            format!("{skipped} malformed application(s) skipped").yellow()
        );
    }
    Ok(())
}
