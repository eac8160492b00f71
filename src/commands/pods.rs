use kube::Client;

use crate::k8s::{self, Settings};
use crate::utils;

/// Prints pod names in a namespace, one per line.
pub async fn run(
    client: Client,
    settings: &Settings,
    namespace_arg: Option<Option<String>>,
) -> anyhow::Result<()> {
    let namespace = utils::resolve_target_namespace(client.clone(), settings, namespace_arg).await?;

    let pb = utils::create_spinner("Fetching pods...");
    let names = k8s::list_pods(client, &namespace, settings.request_timeout).await?;
    pb.finish_and_clear();

    if names.is_empty() {
        println!("(No pods in {namespace})");
    }
    for name in &names {
        println!("{name}");
    }
    Ok(())
}
