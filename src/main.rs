use clap::Parser;
use donation_flow::application::adapter::AdapterState;
use donation_flow::application::replay::replay_all;
use donation_flow::application::session::DonationSession;
use donation_flow::config::DonationConfig;
use donation_flow::domain::ports::{CardProviderBox, ProcessingBackendBox};
use donation_flow::infrastructure::recording::RecordingSurface;
use donation_flow::infrastructure::simulated::{
    CardScript, MissingSdk, ScriptedCardProvider, SimulatedBackend,
};
use donation_flow::interfaces::csv::attempt_reader::AttemptReader;
use donation_flow::interfaces::csv::outcome_writer::OutcomeWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input donation attempts CSV file
    input: PathBuf,

    /// JSON config overriding limits, presets, SDK and contact details
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulate a payment SDK that failed to load
    #[arg(long)]
    sdk_unavailable: bool,

    /// Override the simulated processing delay, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DonationConfig::from_path(path).into_diagnostic()?,
        None => DonationConfig::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.processing_delay_ms = delay_ms;
    }

    let (card, script): (CardProviderBox, CardScript) = if cli.sdk_unavailable {
        (Box::new(MissingSdk) as CardProviderBox, CardScript::default())
    } else {
        let (card, script) = ScriptedCardProvider::new();
        (Box::new(card) as CardProviderBox, script)
    };
    let backend: ProcessingBackendBox = Box::new(SimulatedBackend::new(config.processing_delay()));

    let mut session = DonationSession::new(&config, card, backend, RecordingSurface::new());
    if session.initialize().await == AdapterState::Fallback
        && let Some(lines) = &session.surface().fallback
    {
        eprintln!("WARNING: Payment system unavailable. Alternative donation methods:");
        for line in lines {
            eprintln!("  - {line}");
        }
    }

    // Unreadable rows are logged and skipped
    let file = File::open(&cli.input).into_diagnostic()?;
    let attempts = AttemptReader::new(file)
        .attempts()
        .filter_map(|attempt| match attempt {
            Ok(attempt) => Some(attempt),
            Err(e) => {
                tracing::error!(error = %e, "Error reading donation attempt");
                None
            }
        })
        .collect::<Vec<_>>();

    let outcomes = replay_all(&mut session, &script, attempts).await;

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());
    writer.write_outcomes(outcomes).into_diagnostic()?;

    Ok(())
}
