//! Account subscription engine entry point.
//!
//! Loads accounts, tasks and chain snapshots from a configuration directory,
//! replays recorded subscription values through the callbacks and writes every
//! emitted event as one JSON line.
//!
//! # Flow
//! 1. Loads configurations from the configuration directory
//! 2. Initializes the cache, the account repository and the chain clients
//! 3. Dispatches each observation to the callback of its task
//! 4. Writes emitted events to stdout or to the output file

use account_monitor::{
	bootstrap::{initialize_services, replay, Result},
	services::notification::JsonLinesEventSink,
	utils::{logging::setup_logging, metrics::gather_metrics},
};

use clap::{Arg, Command};
use dotenvy::dotenv;
use std::{
	fs::File,
	io::{self, BufReader, BufWriter, Write},
	path::PathBuf,
	sync::Arc,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
	let matches = Command::new("account-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Replays chain subscription values for imported accounts and emits an event for \
			 every change.",
		)
		.arg(
			Arg::new("config-dir")
				.long("config-dir")
				.help("Directory holding accounts, tasks and snapshots (default: config/)")
				.value_name("PATH")
				.default_value("config"),
		)
		.arg(
			Arg::new("observations")
				.long("observations")
				.help("JSON lines file of subscription values to replay")
				.value_name("FILE")
				.required(true),
		)
		.arg(
			Arg::new("output")
				.long("output")
				.help("Write emitted events to a file instead of stdout")
				.value_name("FILE"),
		)
		.arg(
			Arg::new("silence-os-notifications")
				.long("silence-os-notifications")
				.help("Never attach native notifications to emitted events")
				.action(clap::ArgAction::SetTrue),
		)
		.arg(
			Arg::new("print-metrics")
				.long("print-metrics")
				.help("Print the collected metrics to stderr when the replay ends")
				.action(clap::ArgAction::SetTrue),
		)
		.get_matches();

	dotenv().ok();

	setup_logging().unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config_dir = matches
		.get_one::<String>("config-dir")
		.map(PathBuf::from)
		.ok_or_else(|| anyhow::anyhow!("config-dir has no value"))?;
	let observations = matches
		.get_one::<String>("observations")
		.map(PathBuf::from)
		.ok_or_else(|| anyhow::anyhow!("observations file is required"))?;

	let writer: Box<dyn Write + Send> = match matches.get_one::<String>("output") {
		Some(path) => Box::new(BufWriter::new(File::create(path)?)),
		None => Box::new(io::stdout()),
	};
	let sink = Arc::new(JsonLinesEventSink::new(writer));

	let services = initialize_services(&config_dir, sink)
		.await
		.map_err(|e| anyhow::anyhow!("Failed to initialize services: {}", e))?;
	if matches.get_flag("silence-os-notifications") {
		services.context.settings.set_silenced(true);
	}

	let reader = BufReader::new(File::open(&observations).map_err(|e| {
		anyhow::anyhow!("Failed to open {}: {}", observations.display(), e)
	})?);
	let summary = replay(&services, reader).await?;

	info!(
		handled = summary.handled,
		failed = summary.failed,
		invalid = summary.invalid,
		"Replay finished"
	);
	for (action, count) in &summary.per_action {
		info!(%action, count, "Handled observations");
	}

	if matches.get_flag("print-metrics") {
		let metrics = gather_metrics()?;
		io::stderr().write_all(&metrics)?;
	}

	Ok(())
}
