//! # CLI Interface
//!
//! Argument structure for the `e521` binary, `clap` derive. One subcommand
//! per service; every command reads from `--input <file>` or `--text` and
//! writes to `--output <file>` or stdout.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// KMACXOF256 and E521 from the command line.
///
/// Hashes and MACs files, encrypts under a passphrase or a public key,
/// and signs and verifies messages. Keys, cryptograms and signatures are
/// persisted as upper-case hex, one component per line.
#[derive(Parser, Debug)]
#[command(
    name = "e521",
    about = "KMACXOF256 / E521 toolkit: hash, MAC, encrypt, sign",
    version,
    propagate_version = true
)]
pub struct E521Cli {
    /// Log format on stderr: "pretty" or "json".
    #[arg(long, global = true, env = "E521_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plain KMACXOF256 digest of the input.
    Hash(HashArgs),
    /// Authentication tag of the input under a passphrase.
    Mac(MacArgs),
    /// Encrypt the input under a passphrase.
    Encrypt(EncryptArgs),
    /// Decrypt a passphrase cryptogram.
    Decrypt(DecryptArgs),
    /// Derive the public key for a passphrase.
    Keygen(KeygenArgs),
    /// Encrypt the input to a public key.
    PkEncrypt(PkEncryptArgs),
    /// Decrypt a public-key cryptogram with the recipient's passphrase.
    PkDecrypt(DecryptArgs),
    /// Sign the input with the key derived from a passphrase.
    Sign(SignArgs),
    /// Verify a signature against a public key.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Where the bytes to process come from.
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Read the input from this file.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Use this string (UTF-8 bytes) as the input.
    #[arg(long, short = 't')]
    pub text: Option<String>,
}

/// Where the result goes.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Write the result to this file instead of stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// The passphrase every keyed command needs.
#[derive(Args, Debug, Clone, Default)]
pub struct PassphraseArgs {
    /// Passphrase. Prefer the environment variable over the flag so it stays
    /// out of shell history.
    #[arg(long, short = 'p', env = "E521_PASSPHRASE", hide_env_values = true)]
    pub passphrase: String,
}

/// Arguments for `hash`.
#[derive(Args, Debug, Clone, Default)]
pub struct HashArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print a JSON object instead of the bare hex line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `mac`.
#[derive(Args, Debug, Clone, Default)]
pub struct MacArgs {
    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print a JSON object instead of the bare hex line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `encrypt`.
#[derive(Args, Debug, Clone, Default)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `decrypt` and `pk-decrypt`. The input is the cryptogram
/// text; the output is the raw plaintext.
#[derive(Args, Debug, Clone, Default)]
pub struct DecryptArgs {
    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `keygen`.
#[derive(Args, Debug, Clone, Default)]
pub struct KeygenArgs {
    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print a JSON object instead of the two-line key file.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `pk-encrypt`.
#[derive(Args, Debug, Clone, Default)]
pub struct PkEncryptArgs {
    /// Recipient's public key file, as written by `keygen`.
    #[arg(long, short = 'k')]
    pub public_key: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `sign`.
#[derive(Args, Debug, Clone, Default)]
pub struct SignArgs {
    #[command(flatten)]
    pub passphrase: PassphraseArgs,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `verify`.
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    /// Signer's public key file.
    #[arg(long, short = 'k')]
    pub public_key: PathBuf,

    /// Signature file, as written by `sign`.
    #[arg(long, short = 's')]
    pub signature: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,
}
