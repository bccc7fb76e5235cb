use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use deepshield_lib::api::{analyze_batch, analyze_text, ApiError};
use deepshield_lib::models::{AnalyzeTextRequest, BatchAnalyzeRequest, SettingsOverrides};
use deepshield_lib::services::{load_config_file, AppConfig, ConfigStore, ScoringEngine};
use serde::Serialize;
use tracing::info;

const USAGE: &str = "Usage:\n  analyze_text <path|-> [--sensitivity <0-100>] [--config <config.json>] [--batch] [--out <json_path>]\n\nNotes:\n  - `-` reads from stdin.\n  - `--batch` expects a JSON body: {\"texts\": [...], \"settings\": {...}}.\n  - DEEPSHIELD_ENV=development shows internal error details.";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

const VALUE_FLAGS: &[&str] = &["--sensitivity", "--config", "--out"];

/// First argument that is neither a flag nor a flag's value. `-` counts as input.
fn input_arg(args: &[String]) -> Option<&str> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if arg.starts_with("--") {
            continue;
        } else {
            return Some(arg.as_str());
        }
    }
    None
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin failed")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {} failed", path))
}

fn load_config(args: &[String]) -> Result<AppConfig> {
    let config = match parse_arg_value(args, "--config") {
        Some(path) => load_config_file(&PathBuf::from(path))?,
        None => match ConfigStore::default_config_dir() {
            Some(dir) => ConfigStore::new(dir).load()?,
            None => AppConfig::default(),
        },
    };
    Ok(config.with_env_overrides())
}

fn emit<T: Serialize>(value: &T, out_path: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match out_path {
        Some(path) => {
            std::fs::write(path, &json).with_context(|| format!("write {} failed", path))?;
            info!("Wrote JSON: {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let input_path = match input_arg(&args) {
        Some(path) if !has_flag(&args, "--help") => path.to_string(),
        _ => {
            eprintln!("{}", USAGE);
            return Ok(());
        }
    };

    deepshield_lib::init_logging();

    let input = read_input(&input_path)?;
    let config = load_config(&args)?;
    let out_path = parse_arg_value(&args, "--out");

    let sensitivity = match parse_arg_value(&args, "--sensitivity") {
        Some(raw) => Some(
            raw.parse::<i64>()
                .with_context(|| format!("invalid --sensitivity: {}", raw))?,
        ),
        None => None,
    };

    let engine = ScoringEngine::new();

    let outcome: Result<(), ApiError> = if has_flag(&args, "--batch") {
        let mut request: BatchAnalyzeRequest =
            serde_json::from_str(&input).context("batch input is not a valid batch request")?;
        if sensitivity.is_some() {
            request.settings.get_or_insert_with(SettingsOverrides::default).sensitivity = sensitivity;
        }
        match analyze_batch(&engine, request, &config).await {
            Ok(response) => {
                emit(&response, out_path.as_deref())?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    } else {
        let request = AnalyzeTextRequest {
            text: input,
            settings: sensitivity.map(|s| SettingsOverrides {
                sensitivity: Some(s),
                ..SettingsOverrides::default()
            }),
        };
        match analyze_text(&engine, &request, &config) {
            Ok(response) => {
                emit(&response, out_path.as_deref())?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    };

    if let Err(e) = outcome {
        emit(&e.to_response(config.development), None)?;
        bail!("request failed with status {}", e.status_code());
    }

    Ok(())
}
