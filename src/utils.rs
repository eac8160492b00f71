use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Select;
use kube::Client;

use crate::k8s::{self, Settings};

// --- SHARED SPINNER ---
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}").unwrap());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb
}

// --- SHARED NAMESPACE LOGIC ---
// -n missing -> kube-context default; -n bare -> interactive pick from the
// live namespace list; -n foo -> foo (empty string meaning unset).
pub async fn resolve_target_namespace(
    client: Client,
    settings: &Settings,
    arg: Option<Option<String>>,
) -> anyhow::Result<String> {
    match arg {
        None => {
            let ns = settings.default_namespace.clone();
            println!("Using context namespace: {}", ns.cyan());
            Ok(ns)
        }
        Some(None) => {
            let pb = create_spinner("Fetching namespaces...");
            let names = k8s::list_namespaces(client, settings.request_timeout).await?;
            pb.finish_and_clear();
            Ok(Select::new("Select namespace:", names).prompt()?)
        }
        Some(Some(ns)) => Ok(k8s::or_default(&ns, &settings.default_namespace).to_string()),
    }
}
