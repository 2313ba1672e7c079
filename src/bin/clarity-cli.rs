use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clarity_web::{ConfigCache, ConfigSections, HandlerRegistry, ProjectPaths, RouteRegistry};

#[derive(Parser)]
#[command(name = "clarity-cli")]
#[command(about = "Cache management for clarity-web applications", long_about = None)]
struct Cli {
    /// Project root containing bootstrap/cache
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove the config and route cache files
    CacheClear,
    /// Print the persisted route table
    Routes,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let paths = ProjectPaths::new(cli.root);

    match cli.command {
        Commands::CacheClear => {
            let config = ConfigCache::new(&paths, ConfigSections::default());
            let removed = config.destroy()?;
            println!(
                "config cache: {}",
                if removed { "removed" } else { "absent" }
            );

            let registry = RouteRegistry::new(&paths, HandlerRegistry::new());
            let existed = registry.path().exists();
            registry.clear()?;
            println!(
                "route cache:  {}",
                if existed { "removed" } else { "absent" }
            );
        }
        Commands::Routes => {
            let registry = RouteRegistry::new(&paths, HandlerRegistry::new());
            let routes = registry.load()?;

            if routes.is_empty() {
                println!("no routes registered");
                return Ok(());
            }

            for route in routes {
                let middleware = route
                    .middleware_ref()
                    .map(|m| format!("  [{m}]"))
                    .unwrap_or_default();
                println!(
                    "{:<7} {:<40} {}{}",
                    route.verb,
                    route.uri,
                    route.handler_ref(),
                    middleware
                );
            }
        }
    }

    Ok(())
}
