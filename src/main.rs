mod app;
mod commands;
mod error;
mod k8s;
mod models;
mod report;
mod table;
mod tui;
mod ui;
pub mod utils;

use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use kube::Client;

use crate::k8s::Settings;
use crate::models::WorkloadKind;

#[derive(Parser)]
#[command(name = "argoscope", about = "Argo CD sync and workload reporter", author, version, long_about = None)]
struct Cli {
    /// Namespace holding the Argo CD Application resources
    #[arg(long, default_value = k8s::DEFAULT_ARGO_NAMESPACE, global = true)]
    argo_namespace: String,

    /// Per-request timeout against the API server, in seconds
    #[arg(long, default_value_t = 10, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full report: sync state, workloads, replica totals per destination namespace
    Report {
        /// Target namespace for the workload sections.
        /// If -n is passed without a value, shows interactive menu.
        /// If -n is missing, uses current context.
        #[arg(short, long, num_args = 0..=1, default_missing_value = None)]
        namespace: Option<Option<String>>,
        /// Emit pipe tables for embedding in markdown instead of terminal tables
        #[arg(short, long, default_value_t = false)]
        markdown: bool,
    },
    /// Live dashboard that re-queries the cluster on an interval
    Watch {
        /// Target namespace for the workload sections.
        /// If -n is passed without a value, shows interactive menu.
        /// If -n is missing, uses current context.
        #[arg(short, long, num_args = 0..=1, default_missing_value = None)]
        namespace: Option<Option<String>>,
        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = 5)]
        interval: u64,
    },
    /// List Argo CD applications grouped by sync state
    Apps,
    /// List deployments or statefulsets with their replica counts
    Workloads {
        /// Workload kind to list
        #[arg(short, long, value_enum, default_value = "deployment")]
        kind: KindArg,
        /// Target namespace.
        /// If -n is passed without a value, shows interactive menu.
        /// If -n is missing, uses current context.
        #[arg(short, long, num_args = 0..=1, default_missing_value = None)]
        namespace: Option<Option<String>>,
    },
    /// List pod names in a namespace
    Pods {
        /// Target namespace.
        /// If -n is passed without a value, shows interactive menu.
        /// If -n is missing, uses current context.
        #[arg(short, long, num_args = 0..=1, default_missing_value = None)]
        namespace: Option<Option<String>>,
    },
    /// Scale every deployment and statefulset in a namespace to zero replicas
    ScaleDown {
        /// Target namespace.
        /// If -n is passed without a value, shows interactive menu.
        /// If -n is missing, uses current context.
        #[arg(short, long, num_args = 0..=1, default_missing_value = None)]
        namespace: Option<Option<String>>,
        /// Skip the confirmation prompt
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Deployment,
    Statefulset,
}

impl From<KindArg> for WorkloadKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Deployment => WorkloadKind::Deployment,
            KindArg::Statefulset => WorkloadKind::StatefulSet,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // 1. Initialize Crypto
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // 2. Start Spinner for Initialization
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Initializing Kubernetes client...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    // 3. Initialize Client ONCE
    let client = Client::try_default().await?;
    let settings = Settings::infer(cli.argo_namespace, cli.timeout).await;
    pb.finish_and_clear();

    match cli.command {
        Commands::Report { namespace, markdown } => {
            commands::report::run(client, &settings, namespace, markdown).await?;
        }
        Commands::Watch { namespace, interval } => {
            let ns = utils::resolve_target_namespace(client.clone(), &settings, namespace).await?;
            let dashboard = app::App::new(client, settings.clone(), ns).await;
            tui::run(dashboard, Duration::from_secs(interval.max(1))).await?;
        }
        Commands::Apps => {
            commands::apps::run(client, &settings).await?;
        }
        Commands::Workloads { kind, namespace } => {
            commands::workloads::run(client, &settings, kind.into(), namespace).await?;
        }
        Commands::Pods { namespace } => {
            commands::pods::run(client, &settings, namespace).await?;
        }
        Commands::ScaleDown { namespace, yes } => {
            commands::scale::run(client, &settings, namespace, yes).await?;
        }
    }
    Ok(())
}
