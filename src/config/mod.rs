pub mod lambda;
pub mod seed;

#[cfg(feature = "cli")]
pub use cli::{CliCommand, CliConfig};

#[cfg(feature = "cli")]
pub mod cli {
    use clap::{Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "catalog")]
    #[command(about = "Local tooling for the product catalog services")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: CliCommand,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum CliCommand {
        /// Run the CSV import pipeline against a local directory; rows are printed as queue messages
        Import {
            /// Root directory; each bucket is a sub-directory
            #[arg(long, default_value = "./storage")]
            dir: PathBuf,

            #[arg(long, default_value = "import-bucket")]
            bucket: String,

            /// Object key, e.g. uploaded/products.csv
            #[arg(long)]
            key: String,

            #[arg(long, default_value = "uploaded")]
            upload_folder: String,

            #[arg(long, default_value = "parsed")]
            copy_folder: String,
        },
        /// Write the products of a TOML seed file to the product and stock tables
        Seed {
            #[arg(long, default_value = "seed.toml")]
            file: PathBuf,

            /// Print the products instead of writing them
            #[arg(long)]
            dry_run: bool,
        },
    }
}
