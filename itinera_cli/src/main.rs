use clap::{CommandFactory, Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{
    catalog::CatalogArgs, config::Config, generate::GenerateSubcommands,
    optimize::OptimizeArgs,
};

mod catalog;
mod config;
mod generate;
mod optimize;
mod output;
mod parsers;
mod trip;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the destinations
    Catalog {
        #[command(flatten)]
        args: CatalogArgs,
    },
    /// List the destination categories
    Categories,
    /// Details of a destination
    Show { id: u64 },
    /// Add a destination to the trip
    Add { id: u64 },
    /// Remove a destination from the trip
    Remove { id: u64 },
    /// The trip in its current order
    Trip,
    /// Remove every destination from the trip
    Clear,
    /// Reorder the trip for the shortest route, keeping the first and last stops
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    /// Generate files derived from the catalog types
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = Config::load()?;

    match cli.command {
        Some(Commands::Catalog { args }) => catalog::list(args, &config).await?,
        Some(Commands::Categories) => catalog::categories(&config).await?,
        Some(Commands::Show { id }) => catalog::show(id, &config).await?,
        Some(Commands::Add { id }) => trip::add(id, &config).await?,
        Some(Commands::Remove { id }) => trip::remove(id, &config)?,
        Some(Commands::Trip) => trip::show(&config).await?,
        Some(Commands::Clear) => trip::clear(&config)?,
        Some(Commands::Optimize { args }) => optimize::run(args, &config).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
