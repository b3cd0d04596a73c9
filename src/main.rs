use clap::{Parser, Subcommand};
use dues::application::store::PaymentStore;
use dues::config::SimulationConfig;
use dues::domain::filter::FilterField;
use dues::domain::payment::{PaymentId, PaymentStatus};
use dues::domain::ports::ReminderChannel;
use dues::domain::stats::PaymentStats;
use dues::infrastructure::seed;
use dues::interfaces::csv::payment_writer::PaymentWriter;
use dues::interfaces::json::seed_reader::SeedReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with the payments to start from. Defaults to built-in demo data.
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Simulated backend latency in milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Log store activity to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print payments as CSV, optionally filtered.
    List {
        /// Case-insensitive substring of the member name.
        #[arg(long)]
        name: Option<String>,
        /// pending, paid, overdue or all.
        #[arg(long)]
        status: Option<String>,
        /// Calendar day, YYYY-MM-DD.
        #[arg(long)]
        due_date: Option<String>,
        /// Exact payment type.
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Print the statistics snapshot as JSON.
    Stats {
        /// Compute the figures from the payment list instead of fetching them.
        #[arg(long)]
        derive: bool,
    },
    /// Change a payment's status and print the resulting list.
    Mark { id: String, status: String },
    /// Send a payment reminder.
    Remind {
        id: String,
        #[arg(long, default_value = "email")]
        channel: String,
        /// Make the simulated gateway reject the reminder.
        #[arg(long)]
        fail: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let payments = match &cli.seed {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            SeedReader::new(file).payments()?
        }
        None => seed::payments(),
    };

    let mut config = SimulationConfig::default().with_delay(Duration::from_millis(cli.delay_ms));
    if let Command::Remind { fail, .. } = &cli.command {
        config = config.with_failing_reminders(*fail);
    }
    let store = PaymentStore::simulated(config, payments);

    match cli.command {
        Command::List {
            name,
            status,
            due_date,
            kind,
        } => {
            store.fetch_payments().await;
            let filters = [
                (FilterField::MemberName, name),
                (FilterField::Status, status),
                (FilterField::DueDate, due_date),
                (FilterField::Type, kind),
            ];
            for (field, value) in filters {
                if let Some(value) = value {
                    store.set_filter(field, &value)?;
                }
            }
            write_csv(&store)?;
        }
        Command::Stats { derive } => {
            let stats = if derive {
                store.fetch_payments().await;
                Some(PaymentStats::summarize(&store.payments()))
            } else {
                store.fetch_payment_stats().await;
                store.stats()
            };
            let stats = serde_json::to_string_pretty(&stats).into_diagnostic()?;
            println!("{stats}");
        }
        Command::Mark { id, status } => {
            let status: PaymentStatus = status.parse()?;
            store.update_payment_status(&PaymentId::new(id), status).await;
            write_csv(&store)?;
        }
        Command::Remind { id, channel, .. } => {
            let channel: ReminderChannel = channel.parse()?;
            store.send_reminder(&PaymentId::new(id), channel).await?;
            println!("Reminder sent via {channel}");
        }
    }

    Ok(())
}

fn write_csv(store: &PaymentStore) -> Result<()> {
    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(&store.filtered_payments())?;
    Ok(())
}
