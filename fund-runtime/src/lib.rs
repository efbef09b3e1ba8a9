pub mod error;
pub mod config;
pub mod contracts;
pub mod transactor;
pub mod chain;
pub mod adapters;
pub mod integration;
pub mod executor;
pub mod erc20;
pub mod policy;
pub mod participation;

pub use error::FundError;
pub use transactor::{FundTransactor, TransactionOutcome};
