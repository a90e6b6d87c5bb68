//! Icon Genie - AI icon generator.

mod adapters;
mod asset;
mod cassette;
mod cli;
mod client;
mod config;
mod context;
mod dispatch;
mod error;
mod form;
mod output;
mod params;
mod ports;
mod prompt;
mod request;
mod server;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, GenerateArgs, ServeArgs};
use crate::client::IconClient;
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::dispatch::Dispatcher;
use crate::error::ImageError;
use crate::form::IconForm;
use crate::output::{resolve_output_path, save_icon};
use crate::params::OutputFormat;
use crate::server::AppState;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "icon_genie=debug" } else { "icon_genie=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), ImageError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;

    match cli.command {
        Command::Serve(args) => serve(args, &config).await,
        Command::Generate(args) => generate(args, &config).await,
    }
}

async fn serve(args: ServeArgs, config: &Config) -> Result<(), ImageError> {
    let (state, recording_session) = match ServiceContext::from_env(config) {
        Ok((ctx, session)) => (AppState::new(Some(Dispatcher::new(ctx.model))), session),
        Err(e @ ImageError::MissingApiKey { .. }) => {
            warn!("{e}; generation requests will fail until it is configured");
            (AppState::new(None), None)
        }
        Err(e) => return Err(e),
    };

    let listen = args.listen.as_deref().unwrap_or(&config.server.listen);
    let listener = tokio::net::TcpListener::bind(listen).await?;

    server::serve(listener, state, config.server.max_body_bytes, shutdown_signal()).await?;
    info!("Server stopped");

    finish_recording(recording_session);
    Ok(())
}

async fn generate(args: GenerateArgs, config: &Config) -> Result<(), ImageError> {
    let prompt = args.resolve_prompt()?;
    let format: OutputFormat = args.format.parse().map_err(ImageError::InvalidArgument)?;

    let mut form = IconForm::default();
    form.set_mode(args.mode);
    form.prompt = prompt;
    form.colors = args.colors.clone();
    form.reference = args.reference.as_deref().map(PathBuf::from);
    form.logo = args.logo.as_deref().map(PathBuf::from);
    debug!(mode = ?form.mode(), "Submitting icon form");
    let request = form.submit().await?;

    let image_url = if args.direct {
        let (ctx, recording_session) = ServiceContext::from_env(config)?;
        let result = Dispatcher::new(ctx.model).generate_icon(&request).await;
        finish_recording(recording_session);
        result?.image_url
    } else {
        let endpoint = args.server.as_deref().unwrap_or(&config.client.endpoint);
        info!("Requesting icon from {endpoint}");
        IconClient::new(endpoint).generate_icon(&request).await?
    };

    let output_path = resolve_output_path(args.output.as_deref(), &request.prompt, format);
    save_icon(&image_url, format, &output_path)?;
    eprintln!("Saved: {}", output_path.display());

    Ok(())
}

fn finish_recording(session: Option<RecordingSession>) {
    if let Some(session) = session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
