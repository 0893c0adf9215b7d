use timetable_engine::config::Config;
use timetable_engine::server;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter)).init();

    if let Err(e) = server::run_server(config).await {
        log::error!("server stopped: {}", e);
        std::process::exit(1);
    }
}
