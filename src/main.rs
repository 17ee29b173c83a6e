//! CLI entry point for portfolio-rs

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_rs::commands::estimate::EstimateOptions;
use portfolio_rs::estimator::{Additional, BasePolicy, Builder, DesignComplexity, Feature};
use portfolio_rs::Portfolio;

#[derive(Parser)]
#[command(name = "portfolio-rs")]
#[command(version)]
#[command(about = "Portfolio site generator with a WordPress project estimator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new portfolio site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or work item
    New {
        /// Layout to use (post, work)
        #[arg(short, long, default_value = "post")]
        layout: String,

        /// Title of the new document
        title: String,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, work, slug, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Estimate hours for a WordPress project
    Estimate(EstimateArgs),

    /// Display version information
    Version,
}

#[derive(Args)]
struct EstimateArgs {
    /// Number of pages (1-50); non-numeric input counts as 1
    #[arg(long, default_value = "5", allow_hyphen_values = true)]
    pages: String,

    /// Design complexity (simple, medium, complex)
    #[arg(long, default_value = "medium")]
    design: DesignComplexity,

    /// Page builder (elementor, bricks, beaver, divi, gutenberg, custom)
    #[arg(long, default_value = "elementor")]
    builder: Builder,

    /// Special functionality, repeatable (forms, ecommerce, membership, multilingual, booking, custom)
    #[arg(long = "feature")]
    features: Vec<Feature>,

    /// Additional service, repeatable (migration, seo, optimization)
    #[arg(long = "additional")]
    additionals: Vec<Additional>,

    /// Contingency buffer percentage (10-50, steps of 5)
    #[arg(long, default_value = "20", allow_hyphen_values = true)]
    buffer: i64,

    /// Base-hours policy (weighted, flat); defaults to the site config
    #[arg(long)]
    policy: Option<BasePolicy>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

impl From<EstimateArgs> for EstimateOptions {
    fn from(args: EstimateArgs) -> Self {
        Self {
            pages: args.pages,
            design: args.design,
            builder: args.builder,
            features: args.features,
            additionals: args.additionals,
            buffer: args.buffer,
            policy: args.policy,
            json: args.json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "portfolio_rs=debug,info"
    } else {
        "portfolio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            portfolio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized portfolio site in {:?}", target_dir);
        }

        Commands::New { layout, title } => {
            let site = Portfolio::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", layout, title);
            let path = site.new_document(&title, &layout).await?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = Portfolio::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.generate().await?;
            println!("Generated successfully!");

            if watch {
                portfolio_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            r#static,
        } => {
            let site = Portfolio::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            portfolio_rs::server::start(&site, &ip, port, !r#static).await?;
        }

        Commands::Clean => {
            let site = Portfolio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = Portfolio::new(&base_dir)?;
            portfolio_rs::commands::list::run(&site, &r#type).await?;
        }

        Commands::Estimate(args) => {
            let site = Portfolio::new(&base_dir)?;
            portfolio_rs::commands::estimate::run(&site, &args.into())?;
        }

        Commands::Version => {
            println!("portfolio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
