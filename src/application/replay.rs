use super::session::{DonationSession, SubmissionResult};
use crate::domain::amount::format_dollars;
use crate::domain::ports::PaymentSurface;
use crate::infrastructure::recording::RecordingSurface;
use crate::infrastructure::simulated::CardScript;
use crate::interfaces::csv::attempt_reader::DonationAttempt;
use crate::interfaces::csv::outcome_writer::AttemptOutcome;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Drives a session the way a donor would for one scripted attempt: pick the
/// amount, pick the frequency, fill in the form, submit.
pub async fn replay_attempt<S: PaymentSurface>(
    session: &mut DonationSession<S>,
    script: &CardScript,
    attempt: &DonationAttempt,
) -> SubmissionResult {
    match Decimal::from_str(attempt.amount.trim()) {
        Ok(amount) if session.selector().catalog().contains(&amount) => {
            session.select_preset(amount)
        }
        _ => {
            session.select_custom_mode();
            session.enter_custom_amount(&attempt.amount);
        }
    }
    session.set_frequency(attempt.frequency.unwrap_or_default());
    session.set_donor(attempt.donor());

    if let Some(token) = attempt.scripted_token() {
        script.push(token).await;
    }
    session.submit().await
}

/// Replays every attempt in order on one session and summarizes each.
pub async fn replay_all(
    session: &mut DonationSession<RecordingSurface>,
    script: &CardScript,
    attempts: impl IntoIterator<Item = DonationAttempt>,
) -> Vec<AttemptOutcome> {
    let mut outcomes = Vec::new();
    for (index, attempt) in attempts.into_iter().enumerate() {
        let result = replay_attempt(session, script, &attempt).await;
        let selection = session.selection();
        // A completed attempt resets the form, so report what was submitted.
        let (amount, frequency) = match &result {
            SubmissionResult::Completed { .. } => (
                Decimal::from_str(attempt.amount.trim()).unwrap_or_default(),
                attempt.frequency.unwrap_or_default(),
            ),
            _ => (selection.amount, selection.frequency),
        };
        let transaction_id = match &result {
            SubmissionResult::Completed { transaction_id } => transaction_id.clone(),
            _ => None,
        };
        let message = session
            .surface()
            .last_notification()
            .map(|n| n.message.clone())
            .unwrap_or_default();

        outcomes.push(AttemptOutcome {
            attempt: index + 1,
            status: result.status(),
            amount: format_dollars(amount),
            frequency,
            transaction_id,
            message,
        });
    }
    outcomes
}
