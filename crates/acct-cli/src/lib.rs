#![doc = "Command line front end for ledger account keys."]

pub mod commands;
pub mod settings;
pub mod telemetry;
