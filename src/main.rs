use clap::Parser;
use clipchat::BackendKind;
use clipchat::core::config;
use clipchat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "clipchat", about = "Chat-style agent for turning videos into clips")]
struct Args {
    /// Backend to use (overrides config file and env)
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to clipchat.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("clipchat.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("clipchat: {e}");
            return Ok(());
        }
    };
    let resolved = config::resolve(&file_config, args.backend.as_ref().map(BackendKind::as_str));

    log::info!("Clipchat starting up with backend: {}", resolved.backend);

    tui::run(resolved)
}
