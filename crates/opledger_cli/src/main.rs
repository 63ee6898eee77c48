//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `opledger_core` linkage and store bootstrap from the shell.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Reads `OPLEDGER_DB`, `OPLEDGER_LOG_LEVEL` and `OPLEDGER_LOG_DIR`, also
//! from a `.env` file in the working directory.

use log::error;
use opledger_core::{
    CoreConfig, Repository, Session, SqliteOperationRepository, SqliteOperationTypeRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let config = CoreConfig::from_env();

    if let Err(err) = config.init_logging() {
        eprintln!("opledger logging disabled: {err}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("opledger error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = config.open_session()?;
    let (type_count, operation_count) = count_records(&session)?;
    session.close()?;

    println!("opledger_core version={}", opledger_core::core_version());
    println!(
        "opledger store={}",
        config
            .db_path
            .as_ref()
            .map_or_else(|| "memory".to_string(), |path| path.display().to_string())
    );
    println!("opledger operation_types={type_count}");
    println!("opledger operations={operation_count}");
    Ok(())
}

fn count_records(session: &Session) -> opledger_core::RepoResult<(usize, usize)> {
    let types = SqliteOperationTypeRepository::new(session.clone());
    let operations = SqliteOperationRepository::new(session.clone());
    Ok((types.get_all()?.len(), operations.get_all()?.len()))
}
