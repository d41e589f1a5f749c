use card_gallery::{config, output, scan, server};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "card-gallery")]
#[command(about = "Read-only gallery server for daily and weekly image collections")]
#[command(long_about = "\
Read-only gallery server for daily and weekly image collections

The filesystem is the data source. Drop images into the content root and
they appear on the next request; nothing is cached.

Site structure:

  site/
  ├── config.toml              # Site config (optional)
  ├── static/                  # Served at /static/
  └── images/                  # Content root (served at /images/)
      ├── daily/
      │   ├── 2024-06-01/      # Daily collection (any [A-Za-z0-9._-] name)
      │   │   ├── card-01.jpg
      │   │   └── card-02.png
      │   └── trip/
      └── weekly/              # Weekly collection (flat)
          └── a.webp

Supported images: png, jpg, jpeg, gif, webp (any case).

Run 'card-gallery gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory (holds config.toml and the content root)
    #[arg(long, default_value = ".", global = true)]
    site_dir: PathBuf,

    /// Log at info level regardless of RUST_LOG
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the gallery over HTTP
    Serve(ServeArgs),
    /// Print the collections and images the server would show
    Check {
        /// Print the inventory as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose forces info, otherwise RUST_LOG or the default (warn)
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Serve(args) => {
            let site_config = config::load_config(&cli.site_dir)?;
            let host = args.host.unwrap_or_else(|| site_config.server.host.clone());
            let port = args.port.unwrap_or(site_config.server.port);
            let state = Arc::new(server::AppState::new(&cli.site_dir, site_config));

            println!("==> Serving {} on http://{}:{}", cli.site_dir.display(), host, port);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::run_server(state, &host, port))?;
        }
        Command::Check { json } => {
            let site_config = config::load_config(&cli.site_dir)?;
            let library = scan::Library::new(&cli.site_dir, site_config.content_root.clone());
            if !json {
                println!("==> Checking {}", cli.site_dir.display());
            }
            output::print_inventory(&library, &site_config, json)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
