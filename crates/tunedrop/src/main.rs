use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use clap::{Parser, Subcommand};
use console::style;
use log::{error, info, warn};
use tunedrop_api::{Mp3Converter, RapidApiClient};
use tunedrop_config::{Settings, config_path, load_config, mask_secret, resolve_settings};

mod handlers;
mod pages;
mod state;

use crate::state::AppState;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the default config file location
    Path,
    /// Print the resolved settings
    List,
}

#[derive(Debug, Parser)]
#[command(name = "tunedrop")]
#[command(version, about = "YouTube to MP3 web converter", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.tunedrop/config.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long)]
    bind: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    std::panic::set_hook(Box::new(|info| error!("unexpected panic: {info}")));

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).unwrap_or_else(|err| {
        eprintln!("{} {err}", style("Error:").red());
        std::process::exit(1);
    });
    let mut settings = resolve_settings(&config).unwrap_or_else(|err| {
        eprintln!("{} {err}", style("Error:").red());
        std::process::exit(1);
    });
    if let Some(bind) = cli.bind {
        settings.bind = bind;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }

    if let Some(Commands::Config { action }) = cli.command {
        print!("{}", render_config_command(action, &settings, config_path().as_deref()));
        return Ok(());
    }

    if settings.credentials.is_none() {
        warn!("API_KEY is not set; conversions will fail until it is configured");
    }

    let http = reqwest::Client::builder()
        .user_agent(concat!("tunedrop/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(std::io::Error::other)?;
    let converter = Mp3Converter::new(Arc::new(RapidApiClient::new(http)));
    let bind_addr = settings.listen_addr();
    let state = web::Data::new(AppState::new(converter, settings));

    print_banner(&bind_addr);
    info!("server is running on port {}", state.settings.port);
    info!("api key configured: {}", state.settings.api_key_set);
    info!("api host configured: {}", state.settings.api_host);

    HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandlers::new().default_handler_server(handlers::server_error))
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}

fn print_banner(bind_addr: &str) {
    println!("========================================");
    println!("  {}", style("tunedrop").bold().cyan());
    println!("  http://{bind_addr}");
    println!("========================================");
    println!();
}

fn render_config_command(
    action: ConfigAction,
    settings: &Settings,
    default_path: Option<&Path>,
) -> String {
    match action {
        ConfigAction::Path => match default_path {
            Some(path) => format!("{}\n", path.display()),
            None => "<no home directory>\n".to_string(),
        },
        ConfigAction::List => {
            let key = settings
                .credentials
                .as_ref()
                .map(|credentials| mask_secret(&credentials.key))
                .unwrap_or_else(|| "<null>".to_string());
            format!(
                "Resolved settings:\n\n[api]\nkey = {key}\nhost = {}\n\n[server]\nbind = {}\nport = {}\nenvironment = {}\n",
                settings.api_host,
                settings.bind,
                settings.port,
                settings.environment.as_deref().unwrap_or("<null>")
            )
        }
    }
}
