use bookstore_api::app::database_service::MANAGED_TABLES;
use bookstore_api::infra::config;
use bookstore_api::DatabaseService;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--apply-schema]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let apply_schema = args.iter().any(|a| a == "--apply-schema");

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let max_connections = config::db_max_connections()?;

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  DB_MAX_CONNECTIONS={}", max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Database is unreachable: {}", e))?;

    let version: String = sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(&pool)
        .await?;
    println!("  Postgres: {}", version);

    let db_service = DatabaseService::from_pool(pool.clone());
    if apply_schema {
        println!("  --apply-schema -> creating missing tables...");
        db_service.ensure_schema().await?;
    }

    let mut missing = Vec::new();
    for table_name in MANAGED_TABLES {
        let col_rows = sqlx::query(
            "SELECT column_name::text AS column_name, data_type::text AS data_type,
                    is_nullable::text AS is_nullable
             FROM information_schema.columns
             WHERE table_schema = 'public' AND table_name = $1
             ORDER BY ordinal_position",
        )
        .bind(*table_name)
        .fetch_all(&pool)
        .await?;

        if col_rows.is_empty() {
            println!("  Table '{}' is missing.", table_name);
            missing.push(*table_name);
            continue;
        }

        println!("  Table '{}':", table_name);
        for cr in col_rows {
            let name: String = cr.try_get("column_name")?;
            let data_type: String = cr.try_get("data_type")?;
            let is_nullable: String = cr.try_get("is_nullable")?;
            println!(
                "    {} {}{}",
                name,
                data_type,
                if is_nullable.eq_ignore_ascii_case("YES") { "" } else { " NOT NULL" }
            );
        }
    }

    if !missing.is_empty() {
        return Err(anyhow::anyhow!(
            "Missing tables: {}. Re-run with --apply-schema (or start api_server once).",
            missing.join(", ")
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
