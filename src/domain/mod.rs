//! Domain types and the ports the donation flow talks through.

pub mod amount;
pub mod calendar;
pub mod forms;
pub mod notification;
pub mod ports;
pub mod record;
pub mod selection;
pub mod validation;
