use actix::prelude::*;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use clap::Parser;

mod actors;
mod catalog;
mod classify;
mod config;
mod dto;
mod errors;
mod logger;
mod render;
mod report;
mod routing;
mod wizard;

use actors::analysis_client::AnalysisClientActor;
use actors::health::HealthActor;
use actors::report_renderer::ReportRendererActor;
use actors::session_registry::SessionRegistryActor;

#[derive(Parser)]
#[command(name = "nyaya-intake")]
#[command(about = "Legal case intake wizard and analysis report service.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Runs the development server (debug logging)
    Dev,
    /// Runs the production server
    Serve,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let dev_mode = !matches!(cli.command, Some(Commands::Serve));

    let log_level = config::CONFIG
        .log_level
        .as_deref()
        .unwrap_or(if dev_mode { "debug" } else { "info" });
    logger::init_logger(log_level);

    log::debug!("Question catalog loaded: {} questions.", catalog::len());

    // --- Core Allocation ---
    // Report rendering is CPU-bound templating and runs in its own
    // SyncArbiter; the remaining cores serve I/O.
    let total_cores = num_cpus::get();
    let report_renderer_threads = (total_cores / 2).max(1);
    let actix_web_threads = (total_cores - report_renderer_threads).max(1);
    log::debug!(
        "Core allocation: Total={}, Actix Web={}, Report Renderer={}.",
        total_cores,
        actix_web_threads,
        report_renderer_threads
    );

    // --- Actor Initialization ---

    let health_actor_addr = HealthActor::new().start();

    let health_for_renderer = health_actor_addr.clone();
    let report_renderer_addr = SyncArbiter::start(report_renderer_threads, move || {
        ReportRendererActor::new(health_for_renderer.clone())
    });

    let analysis_client_addr = AnalysisClientActor::new(
        &config::CONFIG.analysis_base_url(),
        config::CONFIG.analysis_timeout(),
        health_actor_addr.clone(),
    )
    .start();
    log::debug!(
        "Analysis endpoint: {}/api/v1/case/analyze",
        config::CONFIG.analysis_base_url()
    );

    let registry_addr = SessionRegistryActor::new(analysis_client_addr).start();

    let host = config::CONFIG.bind_host();
    let port = config::CONFIG.bind_port();

    let server = HttpServer::new(move || {
        let mut app = App::new()
            .wrap(actix_web::middleware::Compress::default())
            .app_data(web::Data::new(registry_addr.clone()))
            .app_data(web::Data::new(report_renderer_addr.clone()))
            .app_data(web::Data::new(health_actor_addr.clone()))
            .configure(routing::configure);

        if let Some(static_path) = &config::CONFIG.static_path {
            let url_prefix = config::CONFIG
                .static_url_prefix
                .as_deref()
                .unwrap_or("/static");
            app = app.service(Files::new(url_prefix, static_path));
        }

        app
    })
    .workers(actix_web_threads)
    .keep_alive(std::time::Duration::from_secs(30))
    .bind((host.as_str(), port))
    .map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            println!("Error: The port {} is already in use.", port);
            println!("Another application is likely running on this port.");
            println!("Please stop the other application or choose a different port.");
            std::process::exit(1);
        }
        e
    })?;

    logger::print_banner(&host, port, dev_mode);

    server.run().await
}
