#![cfg(feature = "cli")]

use anyhow::Result;
use box_layout_client::app::{self, RunSummary};
use box_layout_client::utils::error::ErrorCategory;
use box_layout_client::CliConfig;
use clap::Parser;
use httpmock::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn cli(server: &MockServer, output_dir: &Path, extra: &[&str]) -> CliConfig {
    let base_url = server.base_url();
    let output_dir = output_dir.to_str().unwrap().to_string();
    let mut args = vec![
        "box-layout",
        "--base-url",
        base_url.as_str(),
        "--output-dir",
        output_dir.as_str(),
    ];
    args.extend_from_slice(extra);
    CliConfig::parse_from(args)
}

fn downloaded_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_run_with_dimension_flags() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/generate-box-layout")
            .body(r#"{"length":"10","breadth":"5","height":"3"}"#);
        then.status(200).body("<svg/>");
    });

    let config = cli(
        &server,
        temp_dir.path(),
        &["--length", "10", "--breadth", "5", "--height", "3"],
    );
    let result = app::run(&config, &b""[..]).await;

    api_mock.assert();
    assert_eq!(app::exit_code(&result), 0);
    let summary = result?;
    assert_eq!(summary.submitted, 1);
    assert_eq!(summary.downloads.len(), 1);
    assert_eq!(std::fs::read(temp_dir.path().join("box_layout.svg"))?, b"<svg/>");
    Ok(())
}

#[tokio::test]
async fn test_run_exits_zero_when_download_fails_silently() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/generate-box-layout");
        then.status(500);
    });

    let config = cli(
        &server,
        temp_dir.path(),
        &["--length", "10", "--breadth", "5", "--height", "3"],
    );
    let result = app::run(&config, &b""[..]).await;

    api_mock.assert();
    assert_eq!(app::exit_code(&result), 0);
    let RunSummary {
        submitted,
        downloads,
    } = result?;
    assert_eq!(submitted, 1);
    assert!(downloads.is_empty());
    assert!(downloaded_names(temp_dir.path()).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_stdin_submits_each_line() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/generate-box-layout")
            .body(r#"{"length":"10","breadth":"5","height":"3"}"#);
        then.status(200).body("<svg>first</svg>");
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/generate-box-layout")
            .body(r#"{"length":"7","breadth":"7","height":"2"}"#);
        then.status(200).body("<svg>second</svg>");
    });

    let config = cli(&server, temp_dir.path(), &["--stdin"]);
    let input: &[u8] = b"10 5 3\n\n7,7,2\n";
    let summary = app::run(&config, input).await?;

    first.assert();
    second.assert();
    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.downloads.len(), 2);
    assert_eq!(
        downloaded_names(temp_dir.path()),
        vec!["box_layout (1).svg", "box_layout.svg"]
    );
    Ok(())
}

#[tokio::test]
async fn test_run_nothing_to_submit_is_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let config = cli(&server, temp_dir.path(), &[]);
    let result = app::run(&config, &b"10 5 3\n"[..]).await;

    assert_eq!(app::exit_code(&result), 1);
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_run_partial_dimensions_is_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.any_request();
        then.status(200);
    });

    let config = cli(&server, temp_dir.path(), &["--length", "10", "--height", "3"]);
    let result = app::run(&config, &b""[..]).await;

    assert_eq!(app::exit_code(&result), 1);
    assert_eq!(
        result.unwrap_err().category(),
        ErrorCategory::Configuration
    );
    api_mock.assert_hits(0);
    assert!(downloaded_names(temp_dir.path()).is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_invalid_settings_is_config_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let config = cli(
        &server,
        temp_dir.path(),
        &["--endpoint", "no-slash", "--length", "1", "--breadth", "2", "--height", "3"],
    );
    let result = app::run(&config, &b""[..]).await;

    assert_eq!(app::exit_code(&result), 1);
    Ok(())
}
