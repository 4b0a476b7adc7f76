use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use zonestore_dns_domain::{CliOverrides, RecordType};
use zonestore_dns_infrastructure::dns::DnsServerHandler;
use zonestore_dns_jobs::{JobRunner, ZoneRefreshJob};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "zonestore-dns")]
#[command(version)]
#[command(about = "Zonestore DNS - authoritative DNS server backed by a record store")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer DNS queries (default)
    Serve,

    /// Manage zones
    Zone {
        #[command(subcommand)]
        action: ZoneCommand,
    },

    /// Manage records
    Record {
        #[command(subcommand)]
        action: RecordCommand,
    },
}

#[derive(Subcommand)]
enum ZoneCommand {
    /// Create a zone with a default SOA
    Create { name: String },

    /// List zones
    List,
}

#[derive(Subcommand)]
enum RecordCommand {
    /// Insert one record from a JSON payload
    Insert {
        #[arg(long)]
        zone: String,

        /// Owner name, relative to the zone or fully qualified
        #[arg(long)]
        name: String,

        #[arg(long = "type", value_name = "TYPE")]
        record_type: String,

        /// JSON payload, e.g. '{"ip":"192.0.2.1"}'
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let repos = di::Repositories::new(&config.storage).await?;
    let dns_services = di::DnsServices::new(&config, &repos);
    let use_cases = di::UseCases::new(&repos, &dns_services);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, dns_services).await,
        Command::Zone { action } => match action {
            ZoneCommand::Create { name } => {
                let zone = use_cases.create_zone.execute(&name).await?;
                println!("{}", zone);
                Ok(())
            }
            ZoneCommand::List => {
                for zone in use_cases.list_zones.execute().await? {
                    println!("{}", zone);
                }
                Ok(())
            }
        },
        Command::Record { action } => match action {
            RecordCommand::Insert {
                zone,
                name,
                record_type,
                data,
            } => {
                let record_type: RecordType = record_type.parse()?;
                let (id, record) = use_cases
                    .insert_record
                    .execute(&zone, &name, record_type, &data)
                    .await?;
                println!("{}\t{}\t{}\t{}", id, record.name, record.record_type, record.rdata);
                Ok(())
            }
        },
    }
}

async fn serve(config: &zonestore_dns_domain::Config, dns_services: di::DnsServices) -> anyhow::Result<()> {
    info!("Starting Zonestore DNS Server v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    if config.dns.background_refresh {
        JobRunner::new()
            .with_zone_refresh(ZoneRefreshJob::new(
                dns_services.zone_cache.clone(),
                config.dns.zone_refresh_interval(),
            ))
            .with_shutdown_token(shutdown.clone())
            .start()
            .await;
    }

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        signal_token.cancel();
    });

    let handler = DnsServerHandler::new(Arc::clone(&dns_services.handler_use_case));
    server::start_dns_server(
        config.server.dns_addr(),
        handler,
        Duration::from_secs(config.server.tcp_timeout_secs),
        shutdown,
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}
