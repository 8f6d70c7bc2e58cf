mod create;
mod seed;
mod show;


use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "skuforge-cli")]
#[command(about = "skuforge catalog administration CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed the reference catalog (categories, subcategories, brands)
    Seed {
        /// Path to the catalog YAML file
        #[arg(long, default_value = "./config/catalog.yaml")]
        catalog: PathBuf,
    },
    /// Create a product from a JSON submission file
    Create {
        /// Path to the submission JSON file
        #[arg(long)]
        file: PathBuf,

        /// Validate and report the variant count without writing to the
        /// database
        #[arg(long)]
        dry_run: bool,
    },
    /// Show one product with its axes, colors, and variants
    Show {
        /// Product id
        product_id: i64,
    },
    /// List the newest products
    List {
        /// Maximum number of products to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Seed { catalog }) => seed::run_seed(&catalog).await,
        Some(Commands::Create { file, dry_run }) => create::run_create(&file, dry_run).await,
        Some(Commands::Show { product_id }) => show::run_show(product_id).await,
        Some(Commands::List { limit }) => show::run_list(limit).await,
        None => {
            println!("skuforge-cli: use --help to list commands");
            Ok(())
        }
    }
}
