use clap::Parser;
use ndb::ndb_config::NDBConfig;
use ndb::ndb_controllers::NDBControllers;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Set up panic hook for better error messages
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("\n{}", "═".repeat(70));
        eprintln!("❌ APPLICATION PANIC");
        eprintln!("{}", "═".repeat(70));
        eprintln!("\n{}", panic_info);
        eprintln!("\n💡 Please restart the board and report this issue if it persists");
        eprintln!("\n{}", "═".repeat(70));
    }));

    let config = NDBConfig::parse();

    if let Err(e) = NDBControllers::run(config).await {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
