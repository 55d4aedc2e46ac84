use std::path::Path;

use clap::{Parser, Subcommand};
use color_eyre::{
    Result,
    eyre::{Context, eyre},
};
use serde_json::json;
use switchyard::{
    ControllerContext, FactoryError, ServiceBinder,
    config::{ConfigValidator, SwitchyardConfig, load_config, load_config_or_default},
    tracing_setup,
};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Commands,

    #[clap(short, long, default_value = "switchyard.toml", global = true)]
    config: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate configuration file
    Validate,
    /// Initialize a new configuration file
    Init,
    /// List every registered controller
    Routes {
        /// Print JSON instead of a table
        #[clap(long)]
        json: bool,
    },
    /// Create a controller, run one action and release it
    Resolve {
        /// Area of the controller (root when omitted)
        #[clap(short, long)]
        area: Option<String>,
        /// Controller name
        #[clap(short, long)]
        name: String,
        /// Action to process
        #[clap(long, default_value = "index")]
        action: String,
        /// Action parameter as key=value, may be repeated
        #[clap(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    match args.command {
        Commands::Validate => validate_config_command(&args.config),
        Commands::Init => init_config_command(&args.config),
        Commands::Routes { json } => {
            let config = load_checked(&args.config)?;
            routes_command(&config, json)
        }
        Commands::Resolve {
            area,
            name,
            action,
            params,
        } => {
            let config = load_checked(&args.config)?;
            resolve_command(&config, area.as_deref(), &name, &action, params)
        }
    }
}

fn load_checked(config_path: &str) -> Result<SwitchyardConfig> {
    let config = load_config_or_default(config_path)?;
    ConfigValidator::validate(&config).context("Invalid configuration")?;
    tracing_setup::init_tracing(&config.logging)
        .map_err(|e| eyre!("Failed to initialize tracing: {}", e))?;
    Ok(config)
}

fn routes_command(config: &SwitchyardConfig, as_json: bool) -> Result<()> {
    let factory = ServiceBinder::build(config).context("Failed to bind controller factory")?;
    let descriptors = factory.tree()?.descriptors();

    if as_json {
        let entries: Vec<_> = descriptors
            .iter()
            .map(|d| {
                json!({
                    "area": d.area,
                    "name": d.name,
                    "type": d.controller_type.type_name(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{:<20} {:<20} TYPE", "AREA", "NAME");
    for d in &descriptors {
        let area = if d.area.is_empty() { "(root)" } else { &d.area };
        println!("{:<20} {:<20} {}", area, d.name, d.controller_type);
    }
    println!();
    println!("{} controller(s) registered", descriptors.len());
    Ok(())
}

fn resolve_command(
    config: &SwitchyardConfig,
    area: Option<&str>,
    name: &str,
    action: &str,
    params: Vec<(String, String)>,
) -> Result<()> {
    let factory = ServiceBinder::build(config).context("Failed to bind controller factory")?;

    let mut controller = match factory.create_controller(area, name) {
        Ok(controller) => controller,
        Err(e @ FactoryError::ControllerNotFound { .. }) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to create controller"),
    };

    let span = tracing_setup::create_controller_span(area.unwrap_or_default(), name, action);
    let _entered = span.enter();

    let mut context = ControllerContext::new(area.unwrap_or_default(), name, action);
    context.params.extend(params);
    let outcome = controller.process(&mut context);
    span.record("response.status", context.response.status);
    factory.release(controller);
    outcome.context("Controller action failed")?;

    println!("Status: {}", context.response.status);
    if let Some(content_type) = &context.response.content_type {
        println!("Content-Type: {content_type}");
    }
    println!();
    println!("{}", String::from_utf8_lossy(&context.response.body));
    Ok(())
}

/// Validate configuration file and exit
fn validate_config_command(config_path: &str) -> Result<()> {
    println!("🔍 Validating configuration file: {config_path}");

    if !Path::new(config_path).exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' not found");
        std::process::exit(1);
    }

    let config = match load_config(config_path) {
        Ok(config) => {
            println!("✅ Configuration parsing: OK");
            config
        }
        Err(e) => {
            eprintln!("❌ Configuration parsing failed:");
            eprintln!("   {e:#}");
            std::process::exit(1);
        }
    };

    match ConfigValidator::validate(&config) {
        Ok(()) => {
            println!("✅ Configuration validation: OK");
            println!();
            println!("📋 Configuration Summary:");
            println!("   • Built-in controllers: {}", config.factory.register_builtins);
            println!("   • Built-in area: {}", config.factory.builtin_area);
            println!("   • Case-sensitive names: {}", config.tree.case_sensitive);
            println!("   • Duplicate registrations: {:?}", config.tree.on_duplicate);
            println!("   • Log level: {}", config.logging.level);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

/// Initialize a new configuration file
fn init_config_command(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' already exists");
        std::process::exit(1);
    }

    let default_config = r#"# Switchyard Configuration

[factory]
# Register the built-in static-file controller during initialization
register_builtins = true
# Area the built-in controllers live under
builtin_area = "builtin"

[tree]
# Compare area and controller names case-sensitively
case_sensitive = false
# What to do when a controller is registered twice: "replace" or "reject"
on_duplicate = "replace"

[logging]
# EnvFilter directive, e.g. "info" or "switchyard=debug"; RUST_LOG overrides it
level = "info"
json = false
include_spans = false
"#;

    std::fs::write(path, default_config).context("Failed to write config file")?;
    println!("✅ Created default configuration at: {config_path}");
    println!("   Run 'switchyard routes --config {config_path}' to list controllers");
    Ok(())
}
