//! # Command line interface for aurora-tools
//! [aurora-tools command line interface, subcommands, and options.](cli::Commands)
//! # README for aurora-tools
#![doc = include_str!("../README.md")]
/// Command line interface for aurora-tools.
pub mod cli;
/// Column counting and splitting for tab-delimited tables.
pub mod column;
/// Concatenation of text files and directory trees.
pub mod combine;
/// Duplicate flagging and removal for checksum-sorted tables.
pub mod dedup;
/// Filtering of SRA map tables by sample directory.
pub mod extract;
/// Protein family definition table rewriting.
pub mod family;
/// Cleanup and tallying of genome JSON dumps.
pub mod jsondump;
/// Token totals from numbered aurora log files.
pub mod logcalc;
/// Module for automatically reading and writing compressed or uncompressed files.
pub mod myio;
/// Consolidation of SRA test roles reports.
pub mod report;
