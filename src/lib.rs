// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod aspects;
pub mod chart;
pub mod console;
pub mod file;
pub mod progress;
pub mod query;
pub mod runner;
pub mod smooth;
pub mod sourcing;
pub mod table;
pub mod teams;
