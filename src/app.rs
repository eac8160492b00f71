use kube::Client;

use crate::k8s::Settings;
use crate::report::{self, Report};

pub struct App {
    pub client: Client,
    pub settings: Settings,
    pub namespace: String,
    pub should_quit: bool,
    pub report: Report,
}

impl App {
    pub async fn new(client: Client, settings: Settings, namespace: String) -> Self {
        let report = report::build_report(client.clone(), &settings, &namespace).await;
        Self {
            client,
            settings,
            namespace,
            should_quit: false,
            report,
        }
    }

    /// Rebuilds the report from live cluster state.
    pub async fn refresh(&mut self) {
        self.report = report::build_report(self.client.clone(), &self.settings, &self.namespace).await;
    }
}
