use crate::core::summary::{distinct_months, grand_total_pay};
use crate::db::pool::DbPool;
use crate::db::{migrate, storage};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::money;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COLLECTIONS
    //
    println!("{}• Collections:{}", CYAN, RESET);
    for (key, items, updated_at) in storage::describe(&pool.conn)? {
        println!(
            "    {:<10} {}{:>6}{}  {}updated {}{}",
            key, GREEN, items, RESET, GREY, updated_at, RESET
        );
    }

    //
    // 3) MONTH RANGE + PAY
    //
    let state = storage::load_state(&pool.conn)?;
    let months = distinct_months(&state.records);

    let fmt_first = months
        .last()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    let fmt_last = months
        .first()
        .cloned()
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Month range:{}", CYAN, RESET);
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);
    println!(
        "{}• Total pay:{} {}",
        CYAN,
        RESET,
        money(grand_total_pay(&state.records))
    );

    //
    // 4) MIGRATIONS
    //
    let applied = migrate::applied_migrations(&pool.conn)?;
    println!("{}• Migrations applied:{} {}", CYAN, RESET, applied.len());

    println!();
    Ok(())
}
