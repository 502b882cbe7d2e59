use pet_appointments_api::domain::model::COLLECTIONS;
use pet_appointments_api::infra::{self, logging};
use pet_appointments_api::Config;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--create-collections]\n\
         \n\
         Reads env vars:\n\
           STORE_BACKEND (postgres|memory), DATABASE_URL, STORE_TIMEOUT_SECS, SERVER_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let create_collections = args.iter().any(|a| a == "--create-collections");

    // Force-read config (nice error messages if missing)
    let config = Config::from_env()?;
    logging::init(&config.log_level);

    println!("> Preflight:");
    println!("  STORE_BACKEND={:?}", config.store_backend);
    println!("  SERVER_ADDR={}", config.server_addr);
    println!("  STORE_TIMEOUT={:?}", config.store_timeout);

    let store = infra::connect_store(&config).await?;
    tokio::time::timeout(config.store_timeout, store.ping())
        .await
        .map_err(|_| anyhow::anyhow!("Store ping timed out after {:?}", config.store_timeout))??;
    println!("  Store is reachable.");

    let mut missing = Vec::new();
    for collection in COLLECTIONS {
        if store.collection_exists(collection).await? {
            println!("  Collection '{}' exists.", collection);
        } else if create_collections {
            store.ensure_collection(collection).await?;
            println!("  Collection '{}' created.", collection);
        } else {
            missing.push(collection);
        }
    }

    if !missing.is_empty() {
        return Err(anyhow::anyhow!(
            "Missing collections {:?}. Re-run with --create-collections",
            missing
        ));
    }

    println!("> Preflight OK.");
    Ok(())
}
