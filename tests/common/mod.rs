#![allow(dead_code)]

use donation_flow::application::session::DonationSession;
use donation_flow::config::DonationConfig;
use donation_flow::domain::ports::CardProviderBox;
use donation_flow::infrastructure::recording::RecordingSurface;
use donation_flow::infrastructure::simulated::{
    CardScript, MissingSdk, ScriptedCardProvider, SimulatedBackend,
};
use std::io::Write;
use std::time::Duration;

pub type Session = DonationSession<RecordingSurface>;

pub fn config() -> DonationConfig {
    DonationConfig {
        processing_delay_ms: 0,
        ..DonationConfig::default()
    }
}

/// A session backed by the scripted card widget and an instant backend.
pub fn sandbox_session() -> (Session, CardScript) {
    let (card, script) = ScriptedCardProvider::new();
    let session = DonationSession::new(
        &config(),
        Box::new(card),
        Box::new(SimulatedBackend::new(Duration::ZERO)),
        RecordingSurface::new(),
    );
    (session, script)
}

pub fn session_with(card: CardProviderBox, backend: SimulatedBackend) -> Session {
    DonationSession::new(&config(), card, Box::new(backend), RecordingSurface::new())
}

pub fn missing_sdk_session() -> Session {
    session_with(Box::new(MissingSdk), SimulatedBackend::new(Duration::ZERO))
}

pub fn write_attempts(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "amount, frequency, name, email, anonymous, newsletter, card").unwrap();
    for row in rows {
        writeln!(csv, "{row}").unwrap();
    }
    csv.flush().unwrap();
    csv
}
