//! CLI for notibus
//!
//! Subcommands:
//! - `channels`: two channels, two subscribers, one upload each
//! - `singleton`: fetch the process-wide bus twice and compare
//! - `vending`: walk a vending machine through its states

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use notibus::bus::{Notification, NotificationBus, SinkSubscriber, global};
use notibus::config::{Settings, load_config};
use notibus::sink::{LoggingSink, SinkKind};
use notibus::utils::logging;
use notibus::vending::{VendingMachine, VendingState};
use notibus::BusError;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "notibus")]
struct Cli {
    /// Override the configured sink (tracing, console, memory, none)
    #[arg(long)]
    sink: Option<SinkKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Subscribe two subscribers to two channels and upload content
    Channels,
    /// Show that the process-wide bus is a single instance
    Singleton,
    /// Step a vending machine through every state
    Vending,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let settings = match load_config() {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&settings.logging.level);

    let sink = cli.sink.unwrap_or(settings.logging.sink).build();

    let result = match cli.command {
        Command::Channels => run_channels(&settings, sink),
        Command::Singleton => run_singleton(&settings, sink),
        Command::Vending => {
            run_vending(sink);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(label = e.as_label(), "{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_channels(settings: &Settings, sink: Arc<dyn LoggingSink>) -> Result<(), BusError> {
    let mut bus = NotificationBus::with_settings(sink.clone(), settings.bus);

    bus.create_topic("1", "Channel 1")?;
    bus.create_topic("2", "Channel 2")?;

    let subscriber1 = Arc::new(SinkSubscriber::new("101", "Subscriber 1", sink.clone()));
    let subscriber2 = Arc::new(SinkSubscriber::new("102", "Subscriber 2", sink));

    bus.subscribe("1", subscriber1.clone())?;
    bus.subscribe("2", subscriber1)?;
    bus.subscribe("2", subscriber2)?;

    bus.publish("1", Notification::new("New video on Channel 1"))?;
    bus.publish("2", Notification::new("New video on Channel 2"))?;
    Ok(())
}

fn run_singleton(settings: &Settings, sink: Arc<dyn LoggingSink>) -> Result<(), BusError> {
    global::install(NotificationBus::with_settings(sink.clone(), settings.bus));

    let first = global::bus();
    let second = global::bus();
    let same = std::ptr::eq(first, second);
    info!(same_instance = same, "fetched the process-wide bus twice");
    sink.log(&format!("Same instance: {same}"));

    let topics = global::with_bus(|bus| bus.topic_count())?;
    sink.log(&format!("Process-wide bus holds {topics} topic(s)"));
    Ok(())
}

fn run_vending(sink: Arc<dyn LoggingSink>) {
    let mut machine = VendingMachine::new(sink);
    for state in VendingState::ALL {
        machine.set_state(state);
        machine.request();
    }
}
