//! hostq CLI - Query host network state through whichever tool is installed

mod logging;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::debug;

use hostq_core::application::NetworkService;
use hostq_core::domain::{BackendSelector, DeviceId, NetBackend};
use hostq_infra_system::{PathProbe, SubprocessRunner};

#[derive(Parser)]
#[command(name = "hostq")]
#[command(about = "Query host network interfaces via nmcli or ip", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use only this backend instead of trying each in priority order
    #[arg(short, long, global = true, env = "HOSTQ_BACKEND")]
    backend: Option<NetBackend>,

    /// Emit JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all network interfaces
    #[command(alias = "ls")]
    List,

    /// Show a single interface by device name
    Show {
        /// Device name (e.g. eth0, wlan0)
        device: String,
    },

    /// Show the preferred interface that is up
    Up,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging()?;

    let selector = BackendSelector::default().merge(cli.backend.into());
    debug!(?selector, "Backend selection resolved");

    let service = NetworkService::new(
        Arc::new(SubprocessRunner::default()),
        Arc::new(PathProbe),
    );

    match cli.command {
        Commands::List => {
            let interfaces = service.query_all(selector)?;
            render::print_interfaces(&interfaces, cli.json)?;
        }

        Commands::Show { device } => {
            let iface = service.query_one(&DeviceId::new(device), selector)?;
            render::print_interface(&iface, cli.json)?;
        }

        Commands::Up => {
            let interfaces = service.query_all(selector)?;
            match interfaces.find_up() {
                Some(iface) => render::print_interface(iface, cli.json)?,
                None => {
                    eprintln!("{}", "No interface is up".yellow().bold());
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
