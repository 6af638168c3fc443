pub mod acquire;
pub mod app;
pub mod client;
pub mod clipboard;
mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod notification;
pub mod preview;
pub mod report;
pub mod state;

pub use error::{AppError, AppResult};

/// Entrypoint used by the CLI binary and higher-level integrations.
pub async fn run(command: app::Command) -> AppResult<()> {
    logging::init();
    tracing::info!("starting textlift");

    match command {
        app::Command::Help => {
            println!("{}", app::usage());
            Ok(())
        }
        app::Command::Run(options) => {
            let mut app = app::App::new(options);
            app.start().await?;
            tracing::info!("finished with state={:?}", app.phase());
            Ok(())
        }
    }
}
