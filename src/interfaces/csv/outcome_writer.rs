use crate::domain::amount::Frequency;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Summary row for one replayed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptOutcome {
    pub attempt: usize,
    pub status: &'static str,
    pub amount: String,
    pub frequency: Frequency,
    pub transaction_id: Option<String>,
    /// Last message shown to the donor.
    pub message: String,
}

pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcomes(&mut self, outcomes: impl IntoIterator<Item = AttemptOutcome>) -> Result<()> {
        for outcome in outcomes {
            self.writer.serialize(outcome)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rows() {
        let mut buf = Vec::new();
        {
            let mut writer = OutcomeWriter::new(&mut buf);
            writer
                .write_outcomes(vec![
                    AttemptOutcome {
                        attempt: 1,
                        status: "completed",
                        amount: "$50".to_string(),
                        frequency: Frequency::Monthly,
                        transaction_id: Some("txn_abc".to_string()),
                        message: "Thank you!".to_string(),
                    },
                    AttemptOutcome {
                        attempt: 2,
                        status: "rejected",
                        amount: "$0".to_string(),
                        frequency: Frequency::OneTime,
                        transaction_id: None,
                        message: "Please select a donation amount.".to_string(),
                    },
                ])
                .unwrap();
        }
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "attempt,status,amount,frequency,transaction_id,message");
        assert_eq!(lines[1], "1,completed,$50,monthly,txn_abc,Thank you!");
        assert_eq!(lines[2], "2,rejected,$0,one-time,,Please select a donation amount.");
    }
}
