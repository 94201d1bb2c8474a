use cat_breeds_api::infra::telemetry;
use cat_breeds_api::storage::postgres::PgBreedStore;
use cat_breeds_api::{Config, StoreConfig};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-table-if-missing]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL (BREED_STORE must be unset or `postgres`)\n\
         Optional:\n\
           DATABASE_MAX_CONNECTIONS, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_if_missing = args.iter().any(|a| a == "--create-table-if-missing");

    let config = Config::from_env()?;
    let (database_url, max_connections) = match &config.store {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => (database_url.clone(), *max_connections),
        StoreConfig::Memory => {
            return Err(anyhow::anyhow!(
                "BREED_STORE=memory has nothing to check; preflight targets PostgreSQL"
            ));
        }
    };

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  DATABASE_MAX_CONNECTIONS={}", max_connections);

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot connect to DATABASE_URL: {}", e))?;

    let version: String = sqlx::query_scalar("SHOW server_version")
        .fetch_one(&pool)
        .await?;
    println!("  PostgreSQL version: {}", version);

    let table_exists: bool = sqlx::query_scalar("SELECT to_regclass('public.breed') IS NOT NULL")
        .fetch_one(&pool)
        .await?;
    if table_exists {
        println!("  Table `breed` exists.");
    } else if create_if_missing {
        println!("  Table `breed` missing -> creating...");
        PgBreedStore::new(pool.clone()).ensure_schema().await?;
        println!("  Table `breed` created.");
    } else {
        return Err(anyhow::anyhow!(
            "Table `breed` does not exist. Re-run with --create-table-if-missing"
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
