use std::path::{Path, PathBuf};

use seatplan_lib::command::execute_json_batch;
use seatplan_lib::harness::TestHarness;
use seatplan_lib::state::LayoutSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seatplan=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args();
    let Some(script) = args.script else {
        eprintln!("usage: seatplan --script <commands.json> [--settings <settings.json>]");
        std::process::exit(2);
    };

    let settings = match &args.settings {
        Some(path) => LayoutSettings::load_from(path),
        None => LayoutSettings::load(),
    };
    let mut harness = TestHarness::with_settings(settings);

    if let Err(e) = run_script(&mut harness, &script) {
        tracing::error!("{e}");
        std::process::exit(1);
    }

    match serde_json::to_string_pretty(&harness.export_layout()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to serialize layout: {e}");
            std::process::exit(1);
        }
    }
}

#[derive(Default)]
struct Args {
    script: Option<PathBuf>,
    settings: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--script" => args.script = iter.next().map(PathBuf::from),
            "--settings" => args.settings = iter.next().map(PathBuf::from),
            other => tracing::warn!("Ignoring unknown argument {other}"),
        }
    }
    args
}

fn run_script(harness: &mut TestHarness, path: &Path) -> Result<(), String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read script {}: {e}", path.display()))?;
    let responses = execute_json_batch(harness, &json)?;

    let mut failed = 0;
    for (index, response) in responses.iter().enumerate() {
        if !response.success {
            failed += 1;
            tracing::error!(
                "Command #{index} failed: {}",
                response.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
    tracing::info!(
        "Replayed {} command(s) from {} ({failed} failed)",
        responses.len(),
        path.display()
    );
    Ok(())
}
