//! Test job simulator - command line entry point.
//!
//! Usage:
//!   cargo run --bin testjob-sim -- --name "Smoke Tests"
//!   cargo run --bin testjob-sim -- --list --filter api

use std::env;

use chrono::Utc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use testjob_core::config::Config;
use testjob_core::format::{format_duration, pass_rate, time_ago};
use testjob_core::models::{JobEvent, TestJob};
use testjob_core::services::Dashboard;

const DEFAULT_JOB_NAME: &str = "Demo Run";

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    name: Option<String>,
    filter: Option<String>,
    list: bool,
    help: bool,
}

/// Parse arguments after the program name.
fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--name" | "-n" => parsed.name = Some(flag_value(arg, iter.next())?),
            "--filter" | "-f" => parsed.filter = Some(flag_value(arg, iter.next())?),
            "--list" | "-l" => parsed.list = true,
            "--help" | "-h" => parsed.help = true,
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(parsed)
}

fn flag_value(flag: &str, value: Option<&String>) -> Result<String, String> {
    match value {
        Some(v) if !v.starts_with('-') => Ok(v.clone()),
        _ => Err(format!("Missing value for {}", flag)),
    }
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let CliArgs {
        name,
        filter,
        list,
        help,
    } = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if help {
        print_usage();
        return;
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        environment = %config.environment,
        seed_demo_data = config.seed_demo_data,
        "Starting test job simulator"
    );

    let dashboard = Dashboard::new(&config).await;

    if list {
        let jobs = dashboard.list_jobs(filter.as_deref()).await;
        match serde_json::to_string_pretty(&jobs) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize jobs: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let name = name.unwrap_or_else(|| DEFAULT_JOB_NAME.to_string());
    let mut events = dashboard.subscribe();

    let job = match dashboard.create_job_from_selection(&name).await {
        Ok(job) => job,
        Err(e) => {
            error!("Failed to create job: {}", e);
            std::process::exit(1);
        }
    };

    loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(message) => {
                    if let JobEvent::JobUpdated(update) = &message.event
                        && update.job_id == job.id
                    {
                        info!(job_id = %update.job_id, status = %update.status, "Status changed");
                        if update.status.is_terminal() {
                            break;
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event receiver lagged"),
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                break;
            }
        }
    }

    dashboard.shutdown().await;

    if let Some(finished) = dashboard.get_job(&job.id).await {
        print_summary(&finished);
    }
}

fn print_summary(job: &TestJob) {
    println!();
    println!("Job:      {} ({})", job.name, job.id);
    println!("Status:   {}", job.status);
    println!("Started:  {}", time_ago(job.start_time, Utc::now()));
    if let Some(ms) = job.duration_ms {
        println!("Duration: {}", format_duration(ms));
    }
    println!(
        "Tests:    {} total, {} passed, {} failed, {} skipped",
        job.test_count, job.passed_tests, job.failed_tests, job.skipped_tests
    );
    if let Some(rate) = pass_rate(job) {
        println!("Pass rate: {:.1}%", rate);
    }
    for result in job.test_results.iter().filter(|r| r.error_message.is_some()) {
        println!(
            "  FAILED {}: {}",
            result.name,
            result.error_message.as_deref().unwrap_or_default()
        );
    }
}

fn print_usage() {
    eprintln!(
        r#"
Run a simulated test job and follow it to completion.

Usage:
  testjob-sim [--name <NAME>]
  testjob-sim --list [--filter <TEXT>]

Options:
  -n, --name <NAME>     Job name (default: "{}")
  -l, --list            Print jobs as JSON and exit
  -f, --filter <TEXT>   Case-insensitive name filter for --list
  -h, --help            Show this help message

Environment:
  RUST_ENV                       development (default) or production
  TJS_SEED_DEMO_DATA             Load demo jobs, test cases and devices
  TJS_RUNNING_DELAY_MS           Delay before a new job starts (default: 2000)
  TJS_COMPLETION_DELAY_MS        Delay before a started job finishes (default: 6000)
  TJS_RERUN_COMPLETION_DELAY_MS  Delay before a rerun finishes (default: 5000)
  TJS_SUCCESS_PROBABILITY        Chance a run succeeds (default: 0.7)
"#,
        DEFAULT_JOB_NAME
    );
}
