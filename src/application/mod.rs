//! Application layer: the payment adapter state machine and the donation
//! session that orchestrates a submission.

pub mod adapter;
pub mod replay;
pub mod session;
