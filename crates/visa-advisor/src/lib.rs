//! Core library for the visa advisory lead funnel: static question
//! catalogs, the eligibility wizard state machine, the score
//! calculator, and the outbound lead submission adapter.

pub mod config;
pub mod error;
pub mod funnel;
pub mod telemetry;
