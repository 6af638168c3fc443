use std::path::PathBuf;

use crate::acquire;
use crate::client::ExtractionClient;
use crate::clipboard::WlCopyBackend;
use crate::config;
use crate::controller::SubmissionController;
use crate::error::{AppError, AppResult};
use crate::notification;
use crate::preview;
use crate::report::ResultReport;
use crate::state::{SubmissionPhase, SubmissionState};

const USAGE: &str = "usage: textlift [--endpoint <url>] [--copy] [--health] <image-path>";

pub fn usage() -> &'static str {
    USAGE
}

/// Command-line options; few enough to parse by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub image_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub copy_refined: bool,
    pub check_health: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(AppOptions),
    Help,
}

impl Command {
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = AppOptions::default();
        let mut args = args.into_iter();
        let _ = args.next(); // argv[0]

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Self::Help),
                "--copy" => options.copy_refined = true,
                "--health" => options.check_health = true,
                "--endpoint" => {
                    let value = args.next().ok_or_else(|| {
                        AppError::Usage(format!("--endpoint requires a value\n{USAGE}"))
                    })?;
                    options.endpoint = Some(value.as_ref().to_string());
                }
                flag if flag.starts_with('-') => {
                    return Err(AppError::Usage(format!("unknown flag {flag}\n{USAGE}")));
                }
                path => {
                    if options.image_path.is_some() {
                        return Err(AppError::Usage(format!(
                            "only one image may be submitted at a time\n{USAGE}"
                        )));
                    }
                    options.image_path = Some(PathBuf::from(path));
                }
            }
        }

        Ok(Self::Run(options))
    }
}

/// One-shot submission flow: acquire, preview, submit, report.
pub struct App {
    options: AppOptions,
    controller: SubmissionController,
    client: ExtractionClient,
    copy_refined: bool,
}

impl App {
    pub fn new(options: AppOptions) -> Self {
        let config = config::load_app_config();
        let endpoint = config::resolve_endpoint(&config, options.endpoint.as_deref());
        let copy_refined = options.copy_refined || config.copy_refined.unwrap_or(false);
        tracing::info!(endpoint = %endpoint, "configured extraction backend");

        Self {
            controller: SubmissionController::new(),
            client: ExtractionClient::new(endpoint),
            copy_refined,
            options,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.controller.phase()
    }

    pub async fn start(&mut self) -> AppResult<()> {
        if self.options.check_health {
            self.report_backend_health().await;
        }

        let Some(path) = self.options.image_path.clone() else {
            return Err(AppError::Usage(USAGE.to_string()));
        };

        let file = acquire::load_from_path(&path).await?;
        let preview_source = file.clone();
        let ticket = self.controller.select_from_picker(file);

        // The preview renders concurrently with the network round trip and
        // never gates it.
        let (preview_outcome, state) = tokio::join!(
            preview::render_preview(&preview_source),
            self.controller.submit(&self.client),
        );
        let state = state.clone();

        match preview_outcome {
            Ok(rendered) => {
                if self.controller.publish_preview(ticket, rendered) {
                    tracing::debug!("preview representation ready");
                }
            }
            Err(err) => tracing::warn!(?err, "preview rendering failed"),
        }

        self.render_outcome(&state)
    }

    async fn report_backend_health(&self) {
        match self.client.health().await {
            Ok(health) => {
                tracing::info!(status = %health.status, message = %health.message, "backend reachable");
            }
            Err(err) => {
                tracing::warn!("backend health check failed: {}", err.user_message());
            }
        }
    }

    /// Terminal states are user-visible outcomes, not process failures;
    /// only ambient errors (clipboard I/O) propagate.
    fn render_outcome(&self, state: &SubmissionState) -> AppResult<()> {
        match state {
            SubmissionState::Success(result) => {
                let report = ResultReport::new(result);
                println!("Raw OCR output:\n{}\n", report.raw_display());
                println!("Refined text:\n{}\n", report.refined_display());
                println!("Characters (raw): {}", report.raw_char_count());
                println!("Characters (refined): {}", report.refined_char_count());

                notification::send("Text extraction complete");

                if self.copy_refined {
                    let backend = WlCopyBackend;
                    if report.copy_refined(&backend)? {
                        notification::send_with_summary("Clipboard", "Copied refined text");
                    }
                }
                Ok(())
            }
            SubmissionState::Error(message) => {
                eprintln!("error: {message}");
                Ok(())
            }
            SubmissionState::Idle | SubmissionState::Loading => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppResult<Command> {
        Command::parse(args.iter().copied())
    }

    #[test]
    fn parse_accepts_a_bare_image_path() {
        let command = parse(&["textlift", "scan.png"]).expect("should parse");
        assert_eq!(
            command,
            Command::Run(AppOptions {
                image_path: Some(PathBuf::from("scan.png")),
                ..AppOptions::default()
            })
        );
    }

    #[test]
    fn parse_collects_flags_in_any_order() {
        let command = parse(&[
            "textlift",
            "--copy",
            "--endpoint",
            "http://ocr.local:8080",
            "scan.png",
            "--health",
        ])
        .expect("should parse");
        assert_eq!(
            command,
            Command::Run(AppOptions {
                image_path: Some(PathBuf::from("scan.png")),
                endpoint: Some("http://ocr.local:8080".to_string()),
                copy_refined: true,
                check_health: true,
            })
        );
    }

    #[test]
    fn parse_returns_help_for_the_help_flags() {
        assert!(matches!(parse(&["textlift", "--help"]), Ok(Command::Help)));
        assert!(matches!(
            parse(&["textlift", "-h", "scan.png"]),
            Ok(Command::Help)
        ));
    }

    #[test]
    fn parse_rejects_an_endpoint_flag_without_a_value() {
        let err = parse(&["textlift", "--endpoint"]).expect_err("should fail");
        assert!(matches!(err, AppError::Usage(_)));
        assert!(format!("{err}").contains("--endpoint requires a value"));
    }

    #[test]
    fn parse_rejects_unknown_flags() {
        let err = parse(&["textlift", "--retry"]).expect_err("should fail");
        assert!(format!("{err}").contains("unknown flag --retry"));
    }

    #[test]
    fn parse_rejects_multiple_image_paths() {
        let err = parse(&["textlift", "a.png", "b.png"]).expect_err("should fail");
        assert!(format!("{err}").contains("only one image"));
    }
}
