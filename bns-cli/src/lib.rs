//! Library side of the `bns` binary: commands, configuration and the node
//! API client they share.

/// Stacks node API client
pub mod client;
/// Subcommands of the binary
pub mod commands;
/// Configuration file handling
pub mod config;
