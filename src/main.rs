use anyhow::Context;
use catalog_services::adapters::{LocalObjectStore, StdoutQueue};
use catalog_services::app;
use catalog_services::config::lambda::{ImportConfig, ProductConfig};
use catalog_services::config::seed::SeedFile;
use catalog_services::config::{CliCommand, CliConfig};
use catalog_services::core::import_file_parser::{ImportFileParser, RecordOutcome};
use catalog_services::domain::model::ObjectLocation;
use catalog_services::utils::{logger, validation::Validate};
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    match config.command {
        CliCommand::Import {
            dir,
            bucket,
            key,
            upload_folder,
            copy_folder,
        } => run_import(dir, bucket, key, upload_folder, copy_folder).await,
        CliCommand::Seed { file, dry_run } => run_seed(file, dry_run).await,
    }
}

async fn run_import(
    dir: PathBuf,
    bucket: String,
    key: String,
    upload_folder: String,
    copy_folder: String,
) -> anyhow::Result<()> {
    let config = ImportConfig {
        bucket_name: bucket.clone(),
        upload_folder,
        copy_folder,
        signed_url_expires_in: 60,
        region: None,
        queue_url: None,
    };
    config.validate().context("invalid import options")?;

    let parser = ImportFileParser::new(LocalObjectStore::new(dir), StdoutQueue::new(), &config);
    let outcome = parser
        .process_record(&ObjectLocation { bucket, key })
        .await;

    match outcome {
        RecordOutcome::Completed {
            rows_sent,
            rows_failed,
        } => {
            tracing::info!(rows_sent, rows_failed, "Import finished");
            Ok(())
        }
        other => anyhow::bail!("import did not complete: {:?}", other),
    }
}

async fn run_seed(file: PathBuf, dry_run: bool) -> anyhow::Result<()> {
    let seed = SeedFile::from_file(&file)
        .with_context(|| format!("failed to load seed file {}", file.display()))?;
    seed.validate()?;
    tracing::info!(seed = seed.name(), products = seed.products.len(), "Loaded seed file");

    if dry_run {
        for product in &seed.products {
            println!("{}", serde_json::to_string(product)?);
        }
        return Ok(());
    }

    let config = ProductConfig {
        topic_arn: None,
        ..ProductConfig::from_env()?
    };
    config.validate()?;
    let service = app::product_service(&config).await?;

    for dto in seed.products {
        let product = service.create_product(dto).await?;
        println!("{}", serde_json::to_string(&product)?);
    }

    tracing::info!("Seeding finished");
    Ok(())
}
