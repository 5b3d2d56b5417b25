//! Serve command - run the viewer over HTTP.

use std::path::PathBuf;

use colored::Colorize;
use tabview::Session;

use super::gateway_for;
use crate::server::{app, state::AppState};

pub fn run(
    file: Option<PathBuf>,
    port: u16,
    prefs: Option<PathBuf>,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async {
        let mut session = Session::new(gateway_for(file.as_deref(), prefs));
        if let Some(file) = &file {
            session.load_file(file).await?;
        }

        let url = format!("http://localhost:{}", port);
        println!();
        println!(
            "{} {}",
            "Starting tabview server at".cyan().bold(),
            url.white().bold()
        );
        if let Some(file) = &file {
            println!("  File: {}", file.display());
        }
        println!();
        println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
        println!();

        app::run_server(AppState::new(session), port).await
    })
}
