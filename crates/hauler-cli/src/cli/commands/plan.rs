//! `hauler plan <url>` – assemble a download task and print the plan.

use anyhow::{bail, Context, Result};
use hauler_core::config::HaulerConfig;
use hauler_core::naming;
use hauler_core::task::TaskBuilder;

use crate::cli::PlanArgs;

pub fn run_plan(cfg: &HaulerConfig, args: &PlanArgs) -> Result<()> {
    let builder = if args.hls {
        TaskBuilder::hls(&args.url)?
    } else {
        TaskBuilder::http(&args.url)?
    };
    let mut builder = builder.use_server_file_name(args.server_name || cfg.use_server_file_name);

    // Config defaults first, per-task flags after; per-name last write wins.
    for (name, value) in &cfg.default_headers {
        builder.http_options().header(name, value)?;
    }
    if let Some(agent) = &cfg.user_agent {
        builder.http_options().header("User-Agent", agent)?;
    }
    for raw in &args.headers {
        let (name, value) = raw
            .split_once(':')
            .with_context(|| format!("malformed --header {raw:?}, expected NAME:VALUE"))?;
        builder.http_options().header(name, value)?;
    }
    for raw in &args.params {
        let (name, value) = raw
            .split_once('=')
            .with_context(|| format!("malformed --param {raw:?}, expected NAME=VALUE"))?;
        builder.http_options().param(name, value)?;
    }

    if let Some(bits) = args.bandwidth {
        builder.stream_options().bandwidth(bits)?;
    }
    if args.ignore_failed_parts {
        builder.stream_options().ignore_failed_parts(true)?;
    }

    match destination(cfg, args) {
        Some(dest) => builder = builder.file_path_force(&dest, args.force)?,
        None if args.force => {
            bail!("--force needs a destination: pass --path or set download_dir in the config")
        }
        None => {}
    }

    let task = builder.finish();
    tracing::info!(url = task.url(), "task plan assembled");
    println!("{}", serde_json::to_string_pretty(&task.snapshot())?);
    Ok(())
}

/// Explicit `--path` wins; otherwise a name derived from the URL lands in
/// the configured download directory, when one is set.
fn destination(cfg: &HaulerConfig, args: &PlanArgs) -> Option<String> {
    if let Some(path) = &args.path {
        return Some(path.clone());
    }
    let dir = cfg.download_dir.as_ref()?;
    let name = naming::file_name_from_url(&args.url)
        .map(|n| naming::sanitize_file_name(&n))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| naming::FALLBACK_FILE_NAME.to_string());
    Some(dir.join(name).to_string_lossy().into_owned())
}
