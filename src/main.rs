mod api;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "chirp", about = "Terminal client for a chirp feed service")]
struct Args {
    /// Feed service root, e.g. http://localhost:3000
    #[arg(long)]
    base_url: Option<String>,

    /// Display name to sign in as (enables posting and commenting)
    #[arg(long)]
    display_name: Option<String>,

    /// Avatar url for the signed-in identity
    #[arg(long)]
    avatar_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to chirp.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("chirp.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("chirp: {e}");
            std::process::exit(1);
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            display_name: args.display_name,
            avatar_url: args.avatar_url,
        },
    );

    log::info!(
        "Chirp starting up against {} ({})",
        resolved.base_url,
        match &resolved.session {
            Some(s) => format!("signed in as {}", s.display_name),
            None => "signed out".to_string(),
        }
    );

    tui::run(resolved)
}
