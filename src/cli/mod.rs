//! CLI module for tokmerge - command-line interface and subcommands.
//!
//! A bare invocation merges extracted colors using configured paths.

pub mod commands;

pub use commands::Cli;
