// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # e521
//!
//! Entry point for the `e521` binary. Parses CLI arguments, initializes
//! logging, and runs one command:
//!
//! - `hash`, `mac`: KMACXOF256 digest or tag of a file or string
//! - `encrypt`, `decrypt`: passphrase encryption
//! - `keygen`: public key for a passphrase
//! - `pk-encrypt`, `pk-decrypt`: encryption to an E521 public key
//! - `sign`, `verify`: Schnorr signatures
//! - `version`: build version information
//!
//! Failed decryption or verification exits non-zero.

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, E521Cli};
use logging::LogFormat;

fn main() -> Result<()> {
    let mut cli = E521Cli::parse();
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match &mut cli.command {
        Commands::Hash(args) => commands::hash(args),
        Commands::Mac(args) => commands::mac_tag(args),
        Commands::Encrypt(args) => commands::encrypt(args),
        Commands::Decrypt(args) => commands::decrypt(args),
        Commands::Keygen(args) => commands::keygen(args),
        Commands::PkEncrypt(args) => commands::pk_encrypt(args),
        Commands::PkDecrypt(args) => commands::pk_decrypt(args),
        Commands::Sign(args) => commands::sign_message(args),
        Commands::Verify(args) => commands::verify_message(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("e521      {}", env!("CARGO_PKG_VERSION"));
    println!("protocol  {}", e521_crypto::config::PROTOCOL_VERSION);
    println!("rustc     {}", rustc_version());
}

/// Returns the Rust compiler version used to build this binary.
fn rustc_version() -> &'static str {
    option_env!("RUSTC_VERSION").unwrap_or("unknown")
}
