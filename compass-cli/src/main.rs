//! Compass CLI - terminal shell for Campus Compass
//!
//! Drives the same access core as the web server: one session per process,
//! logins checked against the directory, portal paths gated by role.

mod shell;

use anyhow::Context;
use clap::{Parser, Subcommand};
use compass_access::{CompassApplication, LoginRequest};
use compass_core::{init_logging, CompassConfig, CompassError, CompassResult, Role};
use shell::ShellCommand;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

#[derive(Parser)]
#[command(name = "compass")]
#[command(about = "Campus Compass from the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the accounts of the directory
    Accounts {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Sign in once, then visit paths with that session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Role to sign in as (student, faculty, admin)
        #[arg(short, long)]
        role: Role,

        /// Password (any non-empty value)
        #[arg(short, long)]
        password: String,

        /// Paths to navigate after signing in
        #[arg(long = "visit")]
        visits: Vec<String>,
    },

    /// Interactive session
    Shell,

    /// Configuration management
    Config {
        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Show the effective configuration
        #[arg(long)]
        show: bool,

        /// Validate the effective configuration
        #[arg(long)]
        validate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let mut config = load_config(cli.config.as_deref())?;

    // Terminal output stays readable unless asked otherwise
    config.logging.filter_directives.clear();
    config.logging.level = if cli.verbose { "debug" } else { "warn" }.to_string();
    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting Compass CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Accounts { json } => {
            let app = build_application(&config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&app.demo_credentials())?);
            } else {
                println!("{}", shell::accounts_table(&app));
            }
        }
        Commands::Login {
            email,
            role,
            password,
            visits,
        } => {
            let app = build_application(&config).await?;
            handle_login(&app, LoginRequest::new(email, password, role), &visits).await?;
        }
        Commands::Shell => {
            let app = build_application(&config).await?;
            run_shell(&app).await?;
        }
        Commands::Config {
            init,
            show,
            validate,
        } => handle_config(&config, init, show, validate)?,
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> CompassResult<CompassConfig> {
    let mut config = CompassConfig::load(path)?;
    config.apply_env_overrides()?;
    Ok(config)
}

async fn build_application(config: &CompassConfig) -> anyhow::Result<CompassApplication> {
    config.validate().inspect_err(CompassError::log)?;
    CompassApplication::from_config(&config.auth)
        .await
        .inspect_err(CompassError::log)
        .context("Failed to load the user directory")
}

async fn handle_login(
    app: &CompassApplication,
    request: LoginRequest,
    visits: &[String],
) -> anyhow::Result<()> {
    println!("{}", shell::login(app, &request).await);
    if !app.snapshot().await.session.is_authenticated() {
        anyhow::bail!("login failed");
    }

    for path in visits {
        println!("{}", shell::describe(path, &app.navigate(path).await));
    }
    Ok(())
}

async fn run_shell(app: &CompassApplication) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Campus Compass shell. Type 'help' for commands.\n")
        .await?;

    loop {
        stdout.write_all(b"compass> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match ShellCommand::parse(&line) {
            Ok(command) => match shell::execute(app, command).await {
                ControlFlow::Continue(output) => output,
                ControlFlow::Break(()) => break,
            },
            Err(message) => message,
        };

        if !output.is_empty() {
            stdout.write_all(output.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
    }

    app.logout().await;
    Ok(())
}

fn handle_config(
    config: &CompassConfig,
    init: bool,
    show: bool,
    validate: bool,
) -> anyhow::Result<()> {
    if init {
        let config_path = CompassConfig::user_config_path()?;
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        CompassConfig::default().save_to_file(&config_path)?;
        println!("Configuration initialized at: {}", config_path.display());
    }

    if show {
        println!("Current configuration:");
        println!("{}", toml::to_string_pretty(config)?);
    }

    if validate {
        match config.validate() {
            Ok(()) => println!("Configuration is valid"),
            Err(e) => {
                println!("Configuration validation failed: {}", e);
                return Err(e.into());
            }
        }
    }

    if !(init || show || validate) {
        println!("Nothing to do. Use --init, --show or --validate.");
    }

    Ok(())
}
