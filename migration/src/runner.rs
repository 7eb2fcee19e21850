use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

/// Applies every migration in order, printing one progress line each.
pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    let manager = SchemaManager::new(&db);
    let steps = <migration::Migrator as MigratorTrait>::migrations();
    let total = steps.len();
    println!("Applying {total} migrations");

    for (idx, step) in steps.into_iter().enumerate() {
        apply_step(&manager, step, idx + 1, total).await;
    }
    println!("{}", "Schema up to date".green());
}

async fn apply_step(
    manager: &SchemaManager<'_>,
    step: Box<dyn MigrationTrait>,
    idx: usize,
    total: usize,
) {
    print!("  [{idx}/{total}] {} ... ", step.name().bold());
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(step.up(manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(_)) => {
            let elapsed = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "ok".green(), elapsed);
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
