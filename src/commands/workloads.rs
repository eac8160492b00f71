use kube::Client;

use crate::k8s::{self, Settings};
use crate::models::WorkloadKind;
use crate::utils;

/// Prints `name:replicas` lines for one workload kind in a namespace.
pub async fn run(
    client: Client,
    settings: &Settings,
    kind: WorkloadKind,
    namespace_arg: Option<Option<String>>,
) -> anyhow::Result<()> {
    let namespace = utils::resolve_target_namespace(client.clone(), settings, namespace_arg).await?;

    let pb = utils::create_spinner(&format!("Fetching {kind} resources..."));
    let items = k8s::list_workloads(client, kind, &namespace, settings.request_timeout).await?;
    pb.finish_and_clear();

    if items.is_empty() {
        println!("(No {kind} resources in {namespace})");
    }
    for workload in &items {
        println!("{workload}");
    }
    Ok(())
}
