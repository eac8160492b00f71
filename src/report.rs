//! The reporting core: correlates Argo CD Application sync state with
//! workload replica counts. Pure computations are kept free of I/O so the
//! partition/dedup/sum invariants hold without a cluster.

use futures::future::join_all;
use kube::Client;

use crate::error::Result;
use crate::k8s::{self, Settings};
use crate::models::{
    Application, ApplicationList, NamespaceReplicaTotal, SyncStatus, WorkloadKind, WorkloadSummary,
};

pub struct Classified {
    pub synced: Vec<Application>,
    pub unsynced: Vec<Application>,
}

/// Partitions applications on sync state. Every input lands in exactly one
/// side; only the exact "Synced" status counts as synced.
pub fn classify(apps: Vec<Application>) -> Classified {
    let (synced, unsynced) = apps
        .into_iter()
        .partition(|app| app.sync_status == SyncStatus::Synced);
    Classified { synced, unsynced }
}

/// The distinct destination namespaces owned by synced applications, sorted
/// ascending by lowercased value. Duplicates are detected case-insensitively
/// and the first-seen casing is kept as the representative.
pub fn resolve_destination_namespaces(synced: &[Application]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut namespaces = Vec::new();
    for app in synced {
        if seen.insert(app.destination_namespace.to_lowercase()) {
            namespaces.push(app.destination_namespace.clone());
        }
    }
    namespaces.sort_by_key(|ns| ns.to_lowercase());
    namespaces
}

pub fn sum_replicas(workloads: &[WorkloadSummary]) -> i32 {
    workloads.iter().map(|w| w.replicas).sum()
}

/// Deployment replicas plus statefulset replicas in a namespace. Zero
/// workloads sum to zero; a failed listing propagates so it cannot be
/// mistaken for an empty namespace.
pub async fn total_replicas(client: Client, settings: &Settings, namespace: &str) -> Result<i32> {
    let deployments = k8s::list_workloads(
        client.clone(),
        WorkloadKind::Deployment,
        namespace,
        settings.request_timeout,
    )
    .await?;
    let statefulsets = k8s::list_workloads(
        client,
        WorkloadKind::StatefulSet,
        namespace,
        settings.request_timeout,
    )
    .await?;
    Ok(sum_replicas(&deployments) + sum_replicas(&statefulsets))
}

/// The applications half of a report: classified apps plus the replica
/// totals of their synced destination namespaces.
pub struct AppsSection {
    pub synced: Vec<Application>,
    pub unsynced: Vec<Application>,
    pub skipped: usize,
    pub totals: Vec<NamespaceReplicaTotal>,
}

/// One report cycle. Each section is fetched independently and holds its own
/// error, so a single unreachable resource class empties that section while
/// the rest of the report is still populated.
pub struct Report {
    pub namespace: String,
    pub argo_namespace: String,
    pub apps: Result<AppsSection>,
    pub deployments: Result<Vec<WorkloadSummary>>,
    pub statefulsets: Result<Vec<WorkloadSummary>>,
}

/// Rebuilds everything from live state; nothing is carried over between
/// cycles, so overlapping refreshes cannot corrupt each other.
pub async fn build_report(client: Client, settings: &Settings, namespace: &str) -> Report {
    let apps = match k8s::list_applications(
        client.clone(),
        &settings.argo_namespace,
        settings.request_timeout,
    )
    .await
    {
        Ok(list) => Ok(build_apps_section(client.clone(), settings, list).await),
        Err(e) => Err(e),
    };

    let deployments = k8s::list_workloads(
        client.clone(),
        WorkloadKind::Deployment,
        namespace,
        settings.request_timeout,
    )
    .await;
    let statefulsets = k8s::list_workloads(
        client,
        WorkloadKind::StatefulSet,
        namespace,
        settings.request_timeout,
    )
    .await;

    Report {
        namespace: namespace.to_string(),
        argo_namespace: settings.argo_namespace.clone(),
        apps,
        deployments,
        statefulsets,
    }
}

async fn build_apps_section(
    client: Client,
    settings: &Settings,
    list: ApplicationList,
) -> AppsSection {
    let skipped = list.skipped;
    let Classified {
        mut synced,
        mut unsynced,
    } = classify(list.items);
    synced.sort_by(|a, b| a.name.cmp(&b.name));
    unsynced.sort_by(|a, b| a.name.cmp(&b.name));

    // Totals are independent per namespace, so they are fetched in parallel;
    // join_all keeps the resolver's sorted order.
    let totals = join_all(resolve_destination_namespaces(&synced).into_iter().map(
        |namespace| {
            let client = client.clone();
            async move {
                let replicas = total_replicas(client, settings, &namespace).await;
                NamespaceReplicaTotal {
                    namespace,
                    replicas,
                }
            }
        },
    ))
    .await;

    AppsSection {
        synced,
        unsynced,
        skipped,
        totals,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn app(name: &str, status: SyncStatus, destination: &str) -> Application {
        Application {
            name: name.to_string(),
            sync_status: status,
            destination_namespace: destination.to_string(),
        }
    }

    #[test]
    fn classify_partitions_exactly() {
        let apps = vec![
            app("app1", SyncStatus::Synced, "team-a"),
            app("app2", SyncStatus::OutOfSync, "team-b"),
            app("app3", SyncStatus::Synced, "team-a"),
            app("app4", SyncStatus::Unknown, "team-c"),
        ];
        let total = apps.len();

        let classified = classify(apps);
        assert_eq!(classified.synced.len() + classified.unsynced.len(), total);
        let synced: Vec<&str> = classified.synced.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(synced, ["app1", "app3"]);
        assert!(
            classified
                .unsynced
                .iter()
                .all(|a| a.sync_status != SyncStatus::Synced)
        );
    }

    #[test]
    fn resolves_deduplicated_sorted_namespaces() {
        let synced = vec![
            app("app1", SyncStatus::Synced, "team-b"),
            app("app2", SyncStatus::Synced, "team-a"),
            app("app3", SyncStatus::Synced, "team-b"),
        ];
        assert_eq!(
            resolve_destination_namespaces(&synced),
            ["team-a", "team-b"]
        );
    }

    #[test]
    fn dedup_is_case_insensitive_first_seen_wins() {
        let synced = vec![
            app("app1", SyncStatus::Synced, "Team-B"),
            app("app2", SyncStatus::Synced, "team-b"),
            app("app3", SyncStatus::Synced, "team-A"),
        ];
        assert_eq!(
            resolve_destination_namespaces(&synced),
            ["team-A", "Team-B"]
        );
    }

    #[test]
    fn unsynced_destinations_are_excluded() {
        // Same scenario as the dashboard shows: two synced apps sharing one
        // destination, one out-of-sync app targeting another.
        let apps = vec![
            app("app1", SyncStatus::Synced, "team-a"),
            app("app2", SyncStatus::OutOfSync, "team-b"),
            app("app3", SyncStatus::Synced, "team-a"),
        ];
        let classified = classify(apps);
        assert_eq!(resolve_destination_namespaces(&classified.synced), ["team-a"]);
    }

    #[test]
    fn no_synced_apps_resolves_to_nothing() {
        assert!(resolve_destination_namespaces(&[]).is_empty());
    }

    #[test]
    fn replicas_sum_across_workloads() {
        let deployments = vec![WorkloadSummary {
            name: "x".to_string(),
            replicas: 3,
        }];
        let statefulsets = vec![WorkloadSummary {
            name: "y".to_string(),
            replicas: 2,
        }];
        assert_eq!(sum_replicas(&deployments) + sum_replicas(&statefulsets), 5);
        assert_eq!(sum_replicas(&[]), 0);
    }
}
