//! CLI for loading curriculum CSV files into the database.
//!
//! Usage: import-curriculum <csv_filepath>

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cbc_curriculum_server::{
    config::Config,
    db::Database,
    repositories::{CurriculumRepository, MongoCurriculumRepository},
    services::ImportService,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: import-curriculum <csv_filepath>");
        return ExitCode::from(2);
    };

    let config = Config::from_env();

    let database = match Database::connect(&config).await {
        Ok(database) => database,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let repository = Arc::new(MongoCurriculumRepository::new(&database));
    if let Err(e) = repository.ensure_indexes().await {
        eprintln!("Failed to ensure indexes: {}", e);
        return ExitCode::FAILURE;
    }

    println!("Starting curriculum import from: {}", path.display());

    let service = ImportService::new(repository);
    match service.import_file(&path).await {
        Ok(summary) => {
            println!("{}", summary);
            if summary.errors > 0 {
                println!("Import completed with errors.");
            } else {
                println!("Import completed successfully!");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Import aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}
