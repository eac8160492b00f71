use std::future::Future;
use std::time::Duration;

use k8s_openapi::api::apps::v1::{Deployment, StatefulSet};
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind, ListParams, PostParams};
use kube::Client;

use crate::error::{Error, Result};
use crate::models::{Application, ApplicationList, ScaleOutcome, WorkloadKind, WorkloadSummary};

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_ARGO_NAMESPACE: &str = "argo-cd";

const ARGO_GROUP: &str = "argoproj.io";
const ARGO_VERSION: &str = "v1alpha1";
const ARGO_PLURAL: &str = "applications";

/// Resolved configuration, built once in `main` and passed into every call.
#[derive(Clone, Debug)]
pub struct Settings {
    pub default_namespace: String,
    pub argo_namespace: String,
    pub request_timeout: Duration,
}

impl Settings {
    /// Takes the workload fallback namespace from the kube context, the way
    /// `kubectl` would, falling back to "default" when the context has none.
    pub async fn infer(argo_namespace: String, timeout_secs: u64) -> Self {
        let context_namespace = match kube::Config::infer().await {
            Ok(config) => config.default_namespace,
            Err(_) => String::new(),
        };
        Self {
            default_namespace: or_default(&context_namespace, DEFAULT_NAMESPACE).to_string(),
            argo_namespace: or_default(&argo_namespace, DEFAULT_ARGO_NAMESPACE).to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// An absent or empty namespace argument means "use the fallback".
pub fn or_default<'a>(namespace: &'a str, fallback: &'a str) -> &'a str {
    if namespace.trim().is_empty() {
        fallback
    } else {
        namespace
    }
}

/// Bounds a kube API call; both transport errors and timeouts degrade to
/// `ResourceUnavailable` for the affected resource class.
async fn bounded<T>(
    call: impl Future<Output = std::result::Result<T, kube::Error>>,
    resource: &'static str,
    namespace: &str,
    timeout: Duration,
) -> Result<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::ResourceUnavailable {
            resource,
            namespace: namespace.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Err(Error::ResourceUnavailable {
            resource,
            namespace: namespace.to_string(),
            reason: format!("request timed out after {}s", timeout.as_secs()),
        }),
    }
}

/// Lists deployments or statefulsets in a namespace as name/replica pairs.
/// An unset `spec.replicas` counts as zero.
pub async fn list_workloads(
    client: Client,
    kind: WorkloadKind,
    namespace: &str,
    timeout: Duration,
) -> Result<Vec<WorkloadSummary>> {
    match kind {
        WorkloadKind::Deployment => {
            let api: Api<Deployment> = Api::namespaced(client, namespace);
            let list = bounded(api.list(&ListParams::default()), kind.as_str(), namespace, timeout).await?;
            Ok(list
                .items
                .into_iter()
                .filter_map(|d| {
                    let name = d.metadata.name?;
                    let replicas = d.spec.and_then(|s| s.replicas).unwrap_or(0);
                    Some(WorkloadSummary { name, replicas })
                })
                .collect())
        }
        WorkloadKind::StatefulSet => {
            let api: Api<StatefulSet> = Api::namespaced(client, namespace);
            let list = bounded(api.list(&ListParams::default()), kind.as_str(), namespace, timeout).await?;
            Ok(list
                .items
                .into_iter()
                .filter_map(|set| {
                    let name = set.metadata.name?;
                    let replicas = set.spec.and_then(|s| s.replicas).unwrap_or(0);
                    Some(WorkloadSummary { name, replicas })
                })
                .collect())
        }
    }
}

pub async fn list_pods(client: Client, namespace: &str, timeout: Duration) -> Result<Vec<String>> {
    let api: Api<Pod> = Api::namespaced(client, namespace);
    let list = bounded(api.list(&ListParams::default()), "Pod", namespace, timeout).await?;
    Ok(list
        .items
        .into_iter()
        .filter_map(|p| p.metadata.name)
        .collect())
}

pub async fn list_namespaces(client: Client, timeout: Duration) -> Result<Vec<String>> {
    let api: Api<Namespace> = Api::all(client);
    let list = bounded(api.list(&ListParams::default()), "Namespace", "", timeout).await?;
    Ok(list
        .items
        .into_iter()
        .filter_map(|n| n.metadata.name)
        .collect())
}

fn argo_application_resource() -> ApiResource {
    let gvk = GroupVersionKind::gvk(ARGO_GROUP, ARGO_VERSION, "Application");
    ApiResource::from_gvk_with_plural(&gvk, ARGO_PLURAL)
}

/// Lists Argo CD Applications in a namespace. Malformed items are skipped
/// and counted rather than failing the whole list.
pub async fn list_applications(
    client: Client,
    namespace: &str,
    timeout: Duration,
) -> Result<ApplicationList> {
    let resource = argo_application_resource();
    let api: Api<DynamicObject> = Api::namespaced_with(client, namespace, &resource);
    let list = bounded(api.list(&ListParams::default()), "Application", namespace, timeout).await?;

    let mut result = ApplicationList::default();
    for obj in &list.items {
        match Application::from_dynamic(obj, namespace) {
            Ok(app) => result.items.push(app),
            Err(_) => result.skipped += 1,
        }
    }
    Ok(result)
}

/// Sets every workload of `kind` in the namespace to zero replicas via a
/// full-object replace. The replaced object carries the resourceVersion it
/// was listed with, so a concurrent change makes the API server reject that
/// replace; the failure is recorded and the remaining resources are still
/// processed.
pub async fn scale_to_zero(
    client: Client,
    kind: WorkloadKind,
    namespace: &str,
    timeout: Duration,
) -> Result<Vec<ScaleOutcome>> {
    let params = PostParams::default();
    let mut outcomes = Vec::new();

    match kind {
        WorkloadKind::Deployment => {
            let api: Api<Deployment> = Api::namespaced(client, namespace);
            let list = bounded(api.list(&ListParams::default()), kind.as_str(), namespace, timeout).await?;
            for mut deploy in list.items {
                let Some(name) = deploy.metadata.name.clone() else {
                    continue;
                };
                if let Some(spec) = deploy.spec.as_mut() {
                    spec.replicas = Some(0);
                }
                let result = replace_outcome(
                    tokio::time::timeout(timeout, api.replace(&name, &params, &deploy)).await,
                    kind,
                    &name,
                    namespace,
                    timeout,
                );
                outcomes.push(ScaleOutcome { kind, name, result });
            }
        }
        WorkloadKind::StatefulSet => {
            let api: Api<StatefulSet> = Api::namespaced(client, namespace);
            let list = bounded(api.list(&ListParams::default()), kind.as_str(), namespace, timeout).await?;
            for mut set in list.items {
                let Some(name) = set.metadata.name.clone() else {
                    continue;
                };
                if let Some(spec) = set.spec.as_mut() {
                    spec.replicas = Some(0);
                }
                let result = replace_outcome(
                    tokio::time::timeout(timeout, api.replace(&name, &params, &set)).await,
                    kind,
                    &name,
                    namespace,
                    timeout,
                );
                outcomes.push(ScaleOutcome { kind, name, result });
            }
        }
    }

    Ok(outcomes)
}

fn replace_outcome<T>(
    replaced: std::result::Result<std::result::Result<T, kube::Error>, tokio::time::error::Elapsed>,
    kind: WorkloadKind,
    name: &str,
    namespace: &str,
    timeout: Duration,
) -> Result<i32> {
    match replaced {
        Ok(Ok(_)) => Ok(0),
        Ok(Err(e)) => Err(Error::WriteFailed {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Err(Error::WriteFailed {
            kind,
            name: name.to_string(),
            namespace: namespace.to_string(),
            reason: format!("replace timed out after {}s", timeout.as_secs()),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_namespace_takes_the_fallback() {
        assert_eq!(or_default("", DEFAULT_NAMESPACE), "default");
        assert_eq!(or_default("   ", DEFAULT_ARGO_NAMESPACE), "argo-cd");
        assert_eq!(or_default("team-a", DEFAULT_NAMESPACE), "team-a");
    }

    #[test]
    fn argo_resource_targets_the_applications_plural() {
        let resource = argo_application_resource();
        assert_eq!(resource.group, "argoproj.io");
        assert_eq!(resource.version, "v1alpha1");
        assert_eq!(resource.plural, "applications");
    }
}
