use std::fmt;

use kube::api::DynamicObject;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadKind {
    Deployment,
    StatefulSet,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::StatefulSet => "StatefulSet",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One deployment or statefulset as observed at query time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadSummary {
    pub name: String,
    pub replicas: i32,
}

impl fmt::Display for WorkloadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.replicas)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    Synced,
    OutOfSync,
    Unknown,
}

impl SyncStatus {
    /// Argo CD treats "Synced" as a reserved literal; only an exact match
    /// counts, everything else (including an absent status) is not synced.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Synced") => SyncStatus::Synced,
            Some("OutOfSync") => SyncStatus::OutOfSync,
            _ => SyncStatus::Unknown,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncStatus::Synced => "Synced",
            SyncStatus::OutOfSync => "OutOfSync",
            SyncStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// An Argo CD Application, decoded from the dynamic custom resource.
#[derive(Clone, Debug)]
pub struct Application {
    pub name: String,
    pub sync_status: SyncStatus,
    pub destination_namespace: String,
}

impl Application {
    /// Decodes `applications.argoproj.io/v1alpha1` fields out of the untyped
    /// object. A missing name or destination namespace makes the item
    /// malformed; a missing sync status is a valid `Unknown`.
    pub fn from_dynamic(obj: &DynamicObject, namespace: &str) -> Result<Self> {
        let name = obj
            .metadata
            .name
            .clone()
            .ok_or_else(|| Error::MalformedResource {
                resource: "Application",
                namespace: namespace.to_string(),
                reason: "metadata.name is missing".to_string(),
            })?;

        let destination_namespace = obj.data["spec"]["destination"]["namespace"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::MalformedResource {
                resource: "Application",
                namespace: namespace.to_string(),
                reason: format!("spec.destination.namespace is missing on {name}"),
            })?;

        let sync_status = SyncStatus::parse(obj.data["status"]["sync"]["status"].as_str());

        Ok(Self {
            name,
            sync_status,
            destination_namespace,
        })
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Result of one applications list call; `skipped` counts malformed items.
#[derive(Debug, Default)]
pub struct ApplicationList {
    pub items: Vec<Application>,
    pub skipped: usize,
}

/// Replica total for one destination namespace. A fetch failure stays in the
/// row so it can be shown as such, never as a zero.
#[derive(Debug)]
pub struct NamespaceReplicaTotal {
    pub namespace: String,
    pub replicas: Result<i32>,
}

impl fmt::Display for NamespaceReplicaTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.replicas {
            Ok(n) => write!(f, "{}:{}", self.namespace, n),
            Err(_) => write!(f, "{}:unavailable", self.namespace),
        }
    }
}

/// Per-resource outcome of a scale-down pass.
#[derive(Debug)]
pub struct ScaleOutcome {
    pub kind: WorkloadKind,
    pub name: String,
    pub result: Result<i32>,
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    fn application(value: serde_json::Value) -> DynamicObject {
        serde_json::from_value(value).expect("valid dynamic object")
    }

    #[test]
    fn sync_status_only_matches_exact_literal() {
        assert_eq!(SyncStatus::parse(Some("Synced")), SyncStatus::Synced);
        assert_eq!(SyncStatus::parse(Some("OutOfSync")), SyncStatus::OutOfSync);
        assert_eq!(SyncStatus::parse(Some("synced")), SyncStatus::Unknown);
        assert_eq!(SyncStatus::parse(Some("SYNCED")), SyncStatus::Unknown);
        assert_eq!(SyncStatus::parse(Some("Synced ")), SyncStatus::Unknown);
        assert_eq!(SyncStatus::parse(Some("")), SyncStatus::Unknown);
        assert_eq!(SyncStatus::parse(None), SyncStatus::Unknown);
    }

    #[test]
    fn decodes_application_fields() {
        let obj = application(json!({
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": "Application",
            "metadata": { "name": "app1", "namespace": "argo-cd" },
            "spec": { "destination": { "namespace": "team-a" } },
            "status": { "sync": { "status": "Synced" } },
        }));

        let app = Application::from_dynamic(&obj, "argo-cd").unwrap();
        assert_eq!(app.name, "app1");
        assert_eq!(app.sync_status, SyncStatus::Synced);
        assert_eq!(app.destination_namespace, "team-a");
    }

    #[test]
    fn missing_status_decodes_as_unknown() {
        let obj = application(json!({
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": "Application",
            "metadata": { "name": "app1" },
            "spec": { "destination": { "namespace": "team-a" } },
        }));

        let app = Application::from_dynamic(&obj, "argo-cd").unwrap();
        assert_eq!(app.sync_status, SyncStatus::Unknown);
    }

    #[test]
    fn missing_destination_is_malformed() {
        let obj = application(json!({
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": "Application",
            "metadata": { "name": "app1" },
            "spec": { "destination": {} },
            "status": { "sync": { "status": "Synced" } },
        }));

        let err = Application::from_dynamic(&obj, "argo-cd").unwrap_err();
        assert!(matches!(err, Error::MalformedResource { .. }));
    }

    #[test]
    fn mistyped_destination_is_malformed() {
        let obj = application(json!({
            "apiVersion": "argoproj.io/v1alpha1",
            "kind": "Application",
            "metadata": { "name": "app1" },
            "spec": { "destination": { "namespace": 42 } },
        }));

        let err = Application::from_dynamic(&obj, "argo-cd").unwrap_err();
        assert!(matches!(err, Error::MalformedResource { .. }));
    }

    #[test]
    fn workload_summary_renders_name_and_replicas() {
        let w = WorkloadSummary {
            name: "web".to_string(),
            replicas: 3,
        };
        assert_eq!(w.to_string(), "web:3");
    }
}
