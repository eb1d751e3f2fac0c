// fieldsync-cli: drive the service spine from a terminal
//
// Every command builds a ServiceContext over simulated platform
// adapters and a sled database in the data directory, so state
// (barcode history, saved printers, posts, the push token) persists
// across runs the way it would on a device.

mod sim;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use fieldsync_core::app::state::{reduce_scanner, ScanPhase, ScannerAction, ScannerState};
use fieldsync_core::platform::background::FETCH_TASK_ID;
use fieldsync_core::platform::messaging::{PushMessage, PushNotificationBody};
use fieldsync_core::store::barcodes::BarcodeRecord;
use fieldsync_core::{AppInitializer, MessageDelegate, PlatformAdapters, ServiceContext};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "fieldsync-cli")]
#[command(about = "Background sync, push, printing and scanning from the terminal")]
struct Cli {
    /// Directory for the on-disk database. Defaults to the platform
    /// data dir.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full startup sequence and report the outcome
    Init,
    /// Trigger one background-fetch wake and list the records it made
    Sync {
        /// Keep running, waking on an interval until ctrl-c
        #[arg(long)]
        watch: bool,
        /// Seconds between wakes in watch mode
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Feed simulated detections through a scanning session
    Scan {
        /// Barcode values to detect
        #[arg(default_values_t = vec!["123456789012".to_string()])]
        values: Vec<String>,
        /// Symbology reported for each detection
        #[arg(long, default_value = "ean-13")]
        symbology: String,
    },
    /// Discover printers and persist them to the device registry
    Devices,
    /// Connect to a printer by address
    Connect { address: String },
    /// Send a print job to the connected printer
    Print {
        #[command(subcommand)]
        job: PrintJob,
    },
    /// Show a test notification and simulate an incoming push
    Notify,
    /// Join or leave a push broadcast topic
    Topic {
        #[command(subcommand)]
        action: TopicAction,
    },
    /// Show the persisted barcode history
    History {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Clear the history instead of showing it
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum TopicAction {
    /// Subscribe to a topic
    Subscribe { name: String },
    /// Unsubscribe from a topic
    Unsubscribe { name: String },
}

#[derive(Subcommand)]
enum PrintJob {
    /// Plain text
    Text { text: String },
    /// The built-in test receipt
    Receipt,
    /// A QR-code receipt for the given content
    Qr { content: String },
}

struct PrintingDelegate;

impl MessageDelegate for PrintingDelegate {
    fn on_message(&self, message: PushMessage) {
        tracing::info!(message_id = message.message_id.as_deref(), "push delivered");
        let title = message
            .notification
            .and_then(|n| n.title)
            .unwrap_or_else(|| "(no title)".to_string());
        println!("{} message: {}", "[push]".green(), title);
    }

    fn on_token_refresh(&self, _token: String) {
        tracing::info!("push token refreshed");
        println!("{} token refreshed", "[push]".green());
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    let base = dirs::data_dir().context("no platform data directory")?;
    Ok(base.join("fieldsync"))
}

fn build_context(cli: &Cli) -> Result<(sim::SimPlatform, Arc<ServiceContext>)> {
    let (platform, adapters): (sim::SimPlatform, PlatformAdapters) = sim::SimPlatform::new();
    let dir = data_dir(cli)?;
    let path = dir.to_string_lossy().to_string();
    tracing::debug!(path = %path, "opening database");
    let context =
        ServiceContext::with_storage(adapters, &path).context("failed to open database")?;
    Ok((platform, Arc::new(context)))
}

fn format_time(secs: u64) -> String {
    DateTime::<Utc>::from_timestamp(secs as i64, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn print_history_table(records: &[BarcodeRecord]) {
    if records.is_empty() {
        println!("{}", "no scans recorded".dimmed());
        return;
    }
    for record in records {
        println!(
            "{}  {}  {}",
            format_time(record.scanned_at).dimmed(),
            record.symbology.yellow(),
            record.value.bold()
        );
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Init => {
            let (_platform, context) = build_context(&cli)?;
            let initializer = AppInitializer::new(context);
            let outcome = initializer.initialize_all().await?;
            println!("{}", "initialized".green().bold());
            match outcome.push_token {
                Some(token) => println!("push token: {token}"),
                None => println!("push token: {}", "none".dimmed()),
            }
            if let Some(status) = outcome.permission_status {
                println!(
                    "notifications: {}",
                    status.to_string().color(match status.status_color() {
                        "#4CAF50" => "green",
                        "#F44336" => "red",
                        "#FF9800" => "yellow",
                        _ => "white",
                    })
                );
            }
        }

        Command::Sync { watch, interval } => {
            let (platform, context) = build_context(&cli)?;
            context.background_sync.clone().configure().await?;

            tracing::info!(task_id = FETCH_TASK_ID, "simulating background wake");
            platform.scheduler.trigger(FETCH_TASK_ID).await?;

            if *watch {
                println!(
                    "{} waking every {interval}s, ctrl-c to stop",
                    "[fetch]".dimmed()
                );
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep(Duration::from_secs(*interval)) => {
                            platform.scheduler.trigger(FETCH_TASK_ID).await?;
                        }
                        _ = tokio::signal::ctrl_c() => break,
                    }
                }
            }

            let posts = context.posts.all()?;
            println!("{} record(s):", posts.len());
            for post in posts {
                println!(
                    "  {}  {}",
                    format_time(post.created_at).dimmed(),
                    post.title
                );
            }
        }

        Command::Scan { values, symbology } => {
            let (platform, context) = build_context(&cli)?;
            let (available, permission) =
                context.scanner.check_availability_and_permission().await?;
            anyhow::ensure!(available, "camera not available");
            anyhow::ensure!(permission.is_granted(), "camera permission {permission}");

            // Mirror the screen's reducer so the phase transitions are
            // visible in the output.
            let ready = reduce_scanner(
                ScannerState::default(),
                ScannerAction::InitSucceeded {
                    available,
                    permission,
                },
            );
            let state = Arc::new(Mutex::new(reduce_scanner(ready, ScannerAction::ScanStarted)));

            let reducer_state = Arc::clone(&state);
            let session = context
                .scanner
                .start_session(Arc::new(move |record: BarcodeRecord| {
                    println!(
                        "{} {} ({})",
                        "[scan]".cyan(),
                        record.value.bold(),
                        record.symbology
                    );
                    // detect → dialog → dismiss → resume, per scan
                    let mut state = reducer_state.lock().unwrap();
                    *state = reduce_scanner(
                        state.clone(),
                        ScannerAction::CodeDetected(record),
                    );
                    *state = reduce_scanner(state.clone(), ScannerAction::DialogDismissed);
                    *state = reduce_scanner(state.clone(), ScannerAction::ScanStarted);
                }))
                .await?;

            for value in values {
                platform.scanner.emit(value, symbology);
            }

            session.stop().await?;
            let state = state.lock().unwrap();
            let snapshot = reduce_scanner(state.clone(), ScannerAction::ScanStopped);
            debug_assert_eq!(snapshot.phase, ScanPhase::Idle);
            println!("{} scan(s) this session", snapshot.scanned.len());
        }

        Command::Devices => {
            let (_platform, context) = build_context(&cli)?;
            let found = context.printer.scan_and_save_devices().await?;
            println!("{} device(s) found:", found.len());
            for device in found {
                println!(
                    "  {}  {}  {}",
                    device.address.yellow(),
                    device.name.bold(),
                    if device.paired { "paired" } else { "unpaired" }.dimmed()
                );
            }
        }

        Command::Connect { address } => {
            let (_platform, context) = build_context(&cli)?;
            if context.printer.connect(address).await? {
                println!("{} {address}", "connected".green().bold());
            } else {
                println!("{} {address} not found in scan", "failed:".red());
            }
        }

        Command::Print { job } => {
            let (_platform, context) = build_context(&cli)?;
            // Connection state is per-process; pick up the simulator's
            // printer before printing.
            if !context.printer.connect(sim::SIM_PRINTER_ADDRESS).await? {
                anyhow::bail!("printer {} not found", sim::SIM_PRINTER_ADDRESS);
            }
            match job {
                PrintJob::Text { text } => context.printer.print_text(text).await?,
                PrintJob::Receipt => context.printer.print_test_receipt().await?,
                PrintJob::Qr { content } => context.printer.print_qr_receipt(content).await?,
            }
            println!("{}", "printed".green().bold());
        }

        Command::Notify => {
            let (platform, context) = build_context(&cli)?;
            context.messages.attach(Arc::new(PrintingDelegate));
            context.notifications.send_test_notification().await?;

            platform.messaging.emit_message(PushMessage {
                message_id: Some(uuid::Uuid::new_v4().to_string()),
                notification: Some(PushNotificationBody {
                    title: Some("Simulated Push".to_string()),
                    body: Some("Hello from the simulator".to_string()),
                    image_url: None,
                }),
                ..Default::default()
            });

            // Let the spawned notification mirror run before exit.
            tokio::time::sleep(Duration::from_millis(50)).await;
            context.messages.detach();
        }

        Command::Topic { action } => {
            let (_platform, context) = build_context(&cli)?;
            match action {
                TopicAction::Subscribe { name } => {
                    context.messages.subscribe_topic(name).await?;
                    println!("{} {name}", "subscribed".green().bold());
                }
                TopicAction::Unsubscribe { name } => {
                    context.messages.unsubscribe_topic(name).await?;
                    println!("{} {name}", "unsubscribed".green().bold());
                }
            }
        }

        Command::History { json, clear } => {
            let (_platform, context) = build_context(&cli)?;
            if *clear {
                context.scanner.clear_history()?;
                println!("{}", "history cleared".green());
                return Ok(());
            }
            let records = context.scanner.history();
            if *json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_history_table(&records);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    run(cli).await
}
