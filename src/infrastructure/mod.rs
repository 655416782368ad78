pub mod recording;
pub mod simulated;
