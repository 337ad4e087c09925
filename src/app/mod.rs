// Command-line flow: resolve settings, fire one submission per form, wait for all.

use crate::config::form::{parse_form_line, StaticForm, DEFAULT_FORM_ID};
use crate::config::{cli::LocalStorage, CliConfig, Settings};
use crate::core::handler::{Submission, SubmitEvent, SubmitHandler};
use crate::core::service::HttpLayoutService;
use crate::core::{DownloadRecord, LayoutService};
use crate::domain::model::{BREADTH_FIELD, HEIGHT_FIELD, LENGTH_FIELD};
use crate::utils::error::{BoxLayoutError, Result};
use crate::utils::validation::Validate;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Default)]
pub struct RunSummary {
    pub submitted: usize,
    pub downloads: Vec<DownloadRecord>,
}

/// 0 when the run got as far as submitting, even if every download failed
/// silently; 1 when it stopped before that.
pub fn exit_code(result: &Result<RunSummary>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// The form built from `--length/--breadth/--height`. All three or none.
pub fn dimension_form(config: &CliConfig) -> Result<Option<StaticForm>> {
    let flags = [
        (LENGTH_FIELD, &config.length),
        (BREADTH_FIELD, &config.breadth),
        (HEIGHT_FIELD, &config.height),
    ];

    let missing: Vec<String> = flags
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(id, _)| format!("--{}", id))
        .collect();

    match missing.len() {
        3 => Ok(None),
        0 => Ok(Some(flags.iter().fold(StaticForm::new(), |form, (id, value)| {
            form.with_field(*id, value.as_deref().unwrap_or_default())
        }))),
        _ => Err(BoxLayoutError::ConfigError {
            message: format!("incomplete dimensions, missing {}", missing.join(", ")),
        }),
    }
}

fn fire(
    form: StaticForm,
    service: &Arc<dyn LayoutService>,
    storage: &LocalStorage,
    settings: &Settings,
) -> Submission {
    let handler = SubmitHandler::from_config(form, Arc::clone(service), storage.clone(), settings);
    let mut event = SubmitEvent::new(DEFAULT_FORM_ID);
    handler.on_submit(&mut event)
}

/// Runs the CLI. `input` is only read with `--stdin`; each non-blank line is
/// submitted as soon as it is read.
pub async fn run<R>(config: &CliConfig, input: R) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let settings = config.resolve()?;
    settings.validate()?;

    let form = dimension_form(config)?;
    if form.is_none() && !config.stdin {
        return Err(BoxLayoutError::ConfigError {
            message: "nothing to submit: pass --length/--breadth/--height or --stdin".to_string(),
        });
    }

    let http = HttpLayoutService::from_config(&settings)?;
    tracing::info!("Layout endpoint: {}", http.url());
    let service: Arc<dyn LayoutService> = Arc::new(http);
    let storage = LocalStorage::new(&settings.output_dir);

    let mut submissions = Vec::new();
    if let Some(form) = form {
        submissions.push(fire(form, &service, &storage, &settings));
    }

    if config.stdin {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(form) = parse_form_line(&line) {
                submissions.push(fire(form, &service, &storage, &settings));
            }
        }
    }

    // 保持執行直到所有下載結束
    let mut summary = RunSummary {
        submitted: submissions.len(),
        downloads: Vec::new(),
    };
    for submission in submissions {
        if let Some(record) = submission.settled().await {
            summary.downloads.push(record);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_dimension_form_all_or_nothing() {
        let none = CliConfig::parse_from(["box-layout"]);
        assert_eq!(dimension_form(&none).unwrap(), None);

        let all = CliConfig::parse_from([
            "box-layout", "--length", "10", "--breadth", "5", "--height", "3",
        ]);
        assert_eq!(
            dimension_form(&all).unwrap(),
            Some(StaticForm::dimensions("10", "5", "3"))
        );
    }

    #[test]
    fn test_partial_dimensions_rejected() {
        let partial = CliConfig::parse_from(["box-layout", "--length", "10"]);

        match dimension_form(&partial) {
            Err(BoxLayoutError::ConfigError { message }) => {
                assert!(message.contains("--breadth"));
                assert!(message.contains("--height"));
                assert!(!message.contains("--length"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&Ok(RunSummary::default())), 0);
        let err = Err(BoxLayoutError::ConfigError {
            message: "bad".to_string(),
        });
        assert_eq!(exit_code(&err), 1);
    }
}
