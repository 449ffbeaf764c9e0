use std::net::SocketAddr;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use lbw::api::{set_silent, ApiContext};
use lbw::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use lbw::models::{region_catalog, AppState};
use lbw::routes::build_router;

fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);
    match ApiContext::from_env() {
        Ok(api) => AppState::new(api),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build API client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to build API client"), e.user_message());
            process::exit(1);
        }
    }
}

async fn start_server(state: AppState, host: &str, port: u16) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let backend = state.api.api_base_url.clone();
    let app = build_router(state);
    tracing::info!(%addr, %backend, "Starting load balancer wizard");
    println!(
        "{} {}",
        yansi::Paint::new("Wizard running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    println!(
        "{} {}",
        yansi::Paint::new("Provisioning backend:").dim(),
        yansi::Paint::new(&backend).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn print_regions() {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(vec!["Code", "Region"]);
    for option in region_catalog() {
        table.add_row(vec![option.code, option.label]);
    }
    println!("\n{table}\n");
}

fn check_config(env_file: Option<&str>) -> bool {
    config::load_env_file(env_file);
    let mut ok = true;

    if config::api_base_url_configured() {
        let base = config::get_api_base_url();
        match reqwest::Url::parse(&base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                println!("{} {}", yansi::Paint::new("API_BASE_URL:").green(), base);
            }
            Ok(url) => {
                eprintln!(
                    "{}: unsupported scheme '{}'",
                    yansi::Paint::new("API_BASE_URL is invalid").red(),
                    url.scheme()
                );
                ok = false;
            }
            Err(e) => {
                eprintln!("{}: {}", yansi::Paint::new("API_BASE_URL is invalid").red(), e);
                ok = false;
            }
        }
    } else {
        println!(
            "{} {}",
            yansi::Paint::new("API_BASE_URL is not set, using").yellow(),
            config::get_api_base_url()
        );
    }

    println!(
        "{} {}s",
        yansi::Paint::new("Request timeout:").green(),
        config::get_request_timeout().as_secs()
    );
    println!("{} {}", yansi::Paint::new("Project id:").green(), config::get_project_id());
    ok
}

#[derive(Parser)]
#[command(
    name = "lbw",
    author,
    version,
    about = "Load balancer provisioning wizard",
    long_about = r#"lbw walks an operator through creating a cloud load balancer: credentials and region, instance name, network type, then network and subnet selection before submitting.

The wizard is served over HTTP as a small JSON API. Networks, subnets and the final creation request go through the provisioning backend configured with API_BASE_URL.

Examples:
  1) Run the wizard server (dev):
      cargo run -- serve --host 127.0.0.1 --port 4000
  2) List supported regions:
      lbw regions
  3) Validate configuration:
      lbw check-config --env-file .env
"#,
    after_help = "Use `lbw <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the wizard server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
    /// List the regions a load balancer can be created in
    Regions,
    /// Validate configuration (env vars)
    #[command(
        about = "Validate configuration.",
        long_about = "Check API_BASE_URL, REQUEST_TIMEOUT_SECS and PROJECT_ID as the server would read them."
    )]
    CheckConfig {
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        set_silent(true);
    }

    match cli.command {
        None => {
            let state = build_state_from_env(None);
            start_server(state, DEFAULT_HOST, DEFAULT_PORT).await;
        }
        Some(Commands::Serve { host, port, env_file }) => {
            let state = build_state_from_env(env_file.as_deref());
            start_server(state, &host, port).await;
        }
        Some(Commands::Regions) => print_regions(),
        Some(Commands::CheckConfig { env_file }) => {
            if check_config(env_file.as_deref()) {
                println!("{}", yansi::Paint::new("Configuration looks valid").green());
            } else {
                process::exit(1);
            }
        }
    }
}
