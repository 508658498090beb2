// SPDX-License-Identifier: MPL-2.0
//! `toast-demo`: drives a notification store from the command line.
//!
//! Inserts the requested toasts, plays the part of a UI observer that
//! removes notifications once they are flagged for removal, waits, and
//! prints what is left.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use toast_store::config::{self, StoreConfig};
use toast_store::diagnostics::DiagnosticsCollector;
use toast_store::notifications::{Kind, Notification, Position, Store, ToastOptions};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELP: &str = "\
toast-demo

USAGE:
  toast-demo [OPTIONS] [KIND MESSAGE]...

KIND is one of: success, error, warning, info

OPTIONS:
  --position <ANCHOR>   top-left, top-center, top-right,
                        bottom-left, bottom-center, bottom-right
  --timeout <MS>        default auto-dismiss delay (0 disables)
  --max <N>             per-position cap
  --config <PATH>       settings.toml to load (and save with --save)
  --wait <MS>           how long to run before printing [default: 0]
  --save                persist the effective configuration
  --json                print the final snapshot as JSON
  -h, --help            print this help

Set RUST_LOG (e.g. RUST_LOG=toast_store=debug) for lifecycle logs.
";

struct Flags {
    position: Option<Position>,
    timeout_ms: Option<u64>,
    max: Option<usize>,
    config_path: Option<PathBuf>,
    wait_ms: u64,
    save: bool,
    json: bool,
    toasts: Vec<(Kind, String)>,
}

fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    let position = args.opt_value_from_str("--position")?;
    let timeout_ms = args.opt_value_from_str("--timeout")?;
    let max = args.opt_value_from_str("--max")?;
    let config_path = args.opt_value_from_str("--config")?;
    let wait_ms: u64 = args.opt_value_from_str("--wait")?.unwrap_or(0);
    let save = args.contains("--save");
    let json = args.contains("--json");

    let free: Vec<String> = args
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    if free.len() % 2 != 0 {
        return Err(pico_args::Error::ArgumentParsingFailed {
            cause: "toasts must be given as KIND MESSAGE pairs".to_string(),
        });
    }
    let toasts = free
        .chunks_exact(2)
        .map(|pair| {
            pair[0]
                .parse::<Kind>()
                .map(|kind| (kind, pair[1].clone()))
                .map_err(|err| pico_args::Error::ArgumentParsingFailed {
                    cause: err.to_string(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Flags {
        position,
        timeout_ms,
        max,
        config_path,
        wait_ms,
        save,
        json,
        toasts,
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&PathBuf>) -> StoreConfig {
    let (config, warning) = match path {
        Some(path) if path.exists() => match config::load_from_path(path) {
            Ok(result) => result,
            Err(err) => (StoreConfig::default(), Some(err.to_string())),
        },
        Some(_) => (StoreConfig::default(), None),
        None => config::load(),
    };
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
    config
}

fn print_line(notification: &Notification) {
    let state = if notification.should_remove() {
        "expiring"
    } else if notification.is_persistent() {
        "persistent"
    } else {
        "active"
    };
    println!(
        "{:<13} {:<8} {:<10} {}",
        notification.position(),
        notification.kind(),
        state,
        notification.primary_message()
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let store = Store::new(load_config(flags.config_path.as_ref()));
    let mut collector = DiagnosticsCollector::default();
    store.set_diagnostics(collector.handle());

    if let Some(position) = flags.position {
        store.set_position(position);
    }
    if let Some(timeout_ms) = flags.timeout_ms {
        store.set_default_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(max) = flags.max {
        store.set_max_notifications(Some(max));
    }

    if flags.save {
        let config = store.snapshot().config().clone();
        let saved = match &flags.config_path {
            Some(path) => config::save_to_path(&config, path),
            None => config::save(&config),
        };
        if let Err(err) = saved {
            tracing::error!(error = %err, "failed to save configuration");
            return ExitCode::FAILURE;
        }
    }

    // Stand-in for a rendering surface: removes flagged toasts right away.
    let observer = store.clone();
    let _subscription = store.subscribe(move || {
        let snapshot = observer.snapshot();
        tracing::info!(
            revision = snapshot.revision(),
            active = snapshot.len(),
            "store updated"
        );
        let expiring: Vec<_> = snapshot.pending_removal().map(Notification::id).collect();
        for id in expiring {
            observer.remove(id);
        }
    });

    for (kind, message) in flags.toasts {
        let options = ToastOptions::new(message);
        let inserted = match kind {
            Kind::Success => store.success(options),
            Kind::Error => store.error(options),
            Kind::Warning => store.warning(options),
            Kind::Info => store.info(options),
        };
        if inserted.is_none() {
            tracing::warn!(%kind, "skipped toast with an empty message");
        }
    }

    if flags.wait_ms > 0 {
        tokio::time::sleep(Duration::from_millis(flags.wait_ms)).await;
    }

    let snapshot = store.snapshot();
    if flags.json {
        match serde_json::to_string_pretty(&*snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize snapshot");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for notification in snapshot.notifications() {
            print_line(notification);
        }
    }

    collector.process_pending();
    let totals = collector.totals();
    tracing::debug!(
        inserted = totals.inserted,
        evicted = totals.evicted,
        expired = totals.expired,
        removed = totals.removed,
        "diagnostic events recorded"
    );
    ExitCode::SUCCESS
}
