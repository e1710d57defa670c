//! Core library for the deposit-planner project.
//!
//! Given an amount of quote currency to withdraw, works out how much of a
//! base asset must be sold into a venue's bids to realise it after taker and
//! withdrawal fees, and how much must therefore be deposited.

pub mod cex;
pub mod chain;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod planner;
pub mod report;
pub mod utils;
