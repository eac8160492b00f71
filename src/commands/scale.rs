use colored::*;
use inquire::Confirm;
use kube::Client;

use crate::k8s::{self, Settings};
use crate::models::WorkloadKind;
use crate::utils;

/// Scales every deployment and statefulset in a namespace to zero replicas.
/// Destructive and non-atomic: each replace is independent, so a partial
/// failure leaves the namespace in a mixed state. Refuses to run without
/// confirmation unless `--yes` was passed.
pub async fn run(
    client: Client,
    settings: &Settings,
    namespace_arg: Option<Option<String>>,
    yes: bool,
) -> anyhow::Result<()> {
    let namespace = utils::resolve_target_namespace(client.clone(), settings, namespace_arg).await?;

    if !yes {
        let prompt = format!(
            "Scale every deployment and statefulset in {namespace} to 0 replicas?"
        );
        let confirmed = Confirm::new(&prompt)
            .with_default(false)
            .with_help_message("Previous replica counts are not recorded; there is no undo")
            .prompt()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    for kind in [WorkloadKind::Deployment, WorkloadKind::StatefulSet] {
        match k8s::scale_to_zero(client.clone(), kind, &namespace, settings.request_timeout).await {
            Ok(outcomes) if outcomes.is_empty() => {
                println!("(No {kind} resources in {namespace})");
            }
            Ok(outcomes) => {
                for outcome in outcomes {
                    match outcome.result {
                        Ok(replicas) => println!(
                            "{} {} scaled down to {} replicas",
                            outcome.kind,
                            outcome.name.green(),
                            replicas
                        ),
                        Err(e) => eprintln!("{}", e.to_string().red()),
                    }
                }
            }
            // One resource class failing to list must not stop the other.
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }
    Ok(())
}
