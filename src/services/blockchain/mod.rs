//! Blockchain client interfaces and implementations.
//!
//! Provides the abstractions and the concrete implementation used to talk to an
//! EVM-compatible node. Includes:
//!
//! - Generic blockchain client trait
//! - EVM JSON-RPC client
//! - HTTP transport implementation
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::EvmClient;
pub use error::BlockChainError;
pub use transports::{BlockchainTransport, HttpTransportClient};
