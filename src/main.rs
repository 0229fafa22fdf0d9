// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use progress_forwarder::config::load_and_validate_config;
use progress_forwarder::engine::{BuildPlan, SimulatedBuildExecutor};
use progress_forwarder::events::ProgressEvent;
use progress_forwarder::forwarding::ForwardingChain;
use progress_forwarder::observability::init_tracing;
use progress_forwarder::report::{describe_event, BuildReport, EventLog, FanoutSink};
use progress_forwarder::tracking::{CompositeResultPostProcessor, ResultAttachments};
use progress_forwarder::traits::{BuildExecutor, OperationListener};

struct Args {
    config: PathBuf,
    json: Option<PathBuf>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <build.yaml|build.toml> [--json <report.json>]", program);
    eprintln!("Example: {} configs/java-library.yaml", program);
    eprintln!("Example: {} configs/failing-tests.toml --json target/build.json", program);
    std::process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("progress-forwarder");

    let mut config = None;
    let mut json = None;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => match rest.next() {
                Some(path) => json = Some(PathBuf::from(path)),
                None => usage(program),
            },
            "-h" | "--help" => usage(program),
            _ if config.is_none() => config = Some(PathBuf::from(arg)),
            _ => usage(program),
        }
    }

    match config {
        Some(config) => Args { config, json },
        None => usage(program),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let args = parse_args();

    let config = load_and_validate_config(&args.config)
        .with_context(|| format!("Failed to load build definition {}", args.config.display()))?;
    let plan = Arc::new(BuildPlan::from_config(&config)?);

    println!("🚀 Running {}", args.config.display());
    println!("Units: {}, transforms: {}", plan.units().len(), plan.transforms().len());
    println!();

    // Live progress is printed from its own task so publishing never blocks.
    let (live_tx, mut live_rx) = mpsc::unbounded_channel::<ProgressEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = live_rx.recv().await {
            println!("{}", describe_event(&event));
        }
    });

    let log = Arc::new(EventLog::new());
    let sink = FanoutSink::new().with(log.clone()).with(Arc::new(live_tx));
    // The engine attaches companion values; the chain merges them into results.
    let attachments = Arc::new(ResultAttachments::new());
    let post_processor = CompositeResultPostProcessor::new().with(attachments.clone());

    let chain: Arc<dyn OperationListener> = Arc::new(
        ForwardingChain::builder(config.subscriptions.clone(), Arc::new(sink))
            .execution_graph(plan.execution_graph())
            .origin_plugins(plan.origins())
            .post_processor(Arc::new(post_processor))
            .build(),
    );

    let executor =
        SimulatedBuildExecutor::from_options(plan.options()).with_attachments(attachments);
    let summary = executor.execute(plan, chain).await?;
    // The chain, and with it the live sender, is gone once the build returns.
    printer.await?;

    let report = BuildReport::from_events(&log.events());
    if config.reports.console {
        println!();
        report.render_console(&mut io::stdout().lock())?;
    }
    if let Some(destination) = args.json.or(config.reports.json) {
        report.write_json(&destination)?;
        println!("📄 Report written to {}", destination.display());
    }

    if summary.is_success() {
        println!("\n✅ Build succeeded");
        Ok(())
    } else {
        println!(
            "\n❌ Build failed: {} failed, {} not started, {} failed transforms",
            summary.failed.len(),
            summary.blocked.len(),
            summary.failed_transforms.len()
        );
        std::process::exit(1);
    }
}
