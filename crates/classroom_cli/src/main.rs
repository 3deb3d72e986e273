//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `classroom_core` linkage and configuration end to end.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Reads `CLASSROOM_*` variables (optionally from `.env`), starts file
//! logging when a log directory is set, opens the store and reports its
//! schema version. An optional first argument names a teacher whose class
//! count is printed.

use classroom_core::db::migrations::current_user_version;
use classroom_core::db::{open_db, open_db_in_memory};
use classroom_core::{
    core_version, init_logging, ping, ClassListReq, ClassService, SqliteClassStore, StoreConfig,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("classroom error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    // A missing .env file is fine; the process environment still applies.
    dotenv::dotenv().ok();
    let config = StoreConfig::from_env()?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)?;
    }

    println!("classroom_core ping={}", ping());
    println!("classroom_core version={}", core_version());

    let mut conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    println!("classroom_core schema_version={}", current_user_version(&conn)?);

    if let Some(teacher_id) = std::env::args().nth(1) {
        let store = SqliteClassStore::try_new(&mut conn)?;
        let service = ClassService::new(store);
        let page = service.list_classes(&teacher_id, &ClassListReq::new(1, 1))?;
        log::info!(
            "event=cli_probe module=cli status=ok teacher_id={} total={}",
            teacher_id,
            page.total
        );
        println!("classroom_core teacher={teacher_id} classes={}", page.total);
    }
    Ok(())
}
