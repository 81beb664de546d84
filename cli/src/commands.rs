//! # Command Handlers
//!
//! One function per subcommand. Each reads its input, calls into
//! `e521_crypto`, and writes the persisted layout (or raw plaintext for the
//! decrypt commands) to the chosen output.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::mem;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use zeroize::Zeroizing;

use e521_crypto::config::{CUSTOM_DIGEST, CUSTOM_TAG, TAG_BITS, TAG_BYTES};
use e521_crypto::crypto::{
    digest, digest_reader, ecies, encryption, mac, sign, signatures, E521Keypair,
    EllipticCryptogram, PublicKey, Signature, SymmetricCryptogram,
};
use e521_crypto::format::{tag_to_hex, HexLines};

use crate::cli::{
    DecryptArgs, EncryptArgs, HashArgs, InputArgs, KeygenArgs, MacArgs, OutputArgs,
    PassphraseArgs, PkEncryptArgs, SignArgs, VerifyArgs,
};

// ---------------------------------------------------------------------------
// JSON reports
// ---------------------------------------------------------------------------

/// `--json` output of `hash` and `mac`.
#[derive(Debug, Serialize)]
struct TagReport {
    function: &'static str,
    customization: String,
    bits: usize,
    input_bytes: u64,
    tag: String,
}

/// `--json` output of `keygen`.
#[derive(Debug, Serialize)]
struct PublicKeyReport {
    curve: &'static str,
    x: String,
    y: String,
}

// ---------------------------------------------------------------------------
// I/O helpers
// ---------------------------------------------------------------------------

fn read_input(input: &InputArgs) -> Result<Vec<u8>> {
    match (&input.input, &input.text) {
        (Some(path), _) => {
            fs::read(path).with_context(|| format!("failed to read input {}", path.display()))
        }
        (None, Some(text)) => Ok(text.clone().into_bytes()),
        (None, None) => bail!("no input given: pass --input <file> or --text <string>"),
    }
}

fn read_text(input: &InputArgs) -> Result<String> {
    String::from_utf8(read_input(input)?).context("input is not valid UTF-8 text")
}

fn read_text_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {what} {}", path.display()))
}

fn write_output(output: &OutputArgs, bytes: &[u8]) -> Result<()> {
    match &output.output {
        Some(path) => {
            fs::write(path, bytes)
                .with_context(|| format!("failed to write output {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Moves the passphrase out of the parsed arguments. The buffer itself is
/// handed over, not copied, and is wiped when the returned value drops.
fn passphrase_bytes(args: &mut PassphraseArgs) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(mem::take(&mut args.passphrase).into_bytes())
}

fn tag_output(
    tag: &[u8; TAG_BYTES],
    custom: &[u8],
    input_bytes: u64,
    json: bool,
) -> Result<String> {
    if !json {
        return Ok(tag_to_hex(tag));
    }
    let report = TagReport {
        function: "KMACXOF256",
        customization: String::from_utf8_lossy(custom).into_owned(),
        bits: TAG_BITS,
        input_bytes,
        tag: hex::encode_upper(tag),
    };
    let mut json = serde_json::to_string_pretty(&report).context("failed to encode JSON")?;
    json.push('\n');
    Ok(json)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `hash`: files are streamed, text is hashed in one call.
pub fn hash(args: &HashArgs) -> Result<()> {
    let (tag, len) = match &args.input.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            let len = file.metadata().map(|m| m.len()).unwrap_or_default();
            let tag = digest_reader(BufReader::new(file))
                .with_context(|| format!("failed to read input {}", path.display()))?;
            (tag, len)
        }
        None => {
            let message = read_input(&args.input)?;
            (digest(&message), message.len() as u64)
        }
    };
    tracing::info!(input_bytes = len, "computed digest");
    write_output(&args.output, tag_output(&tag, CUSTOM_DIGEST, len, args.json)?.as_bytes())
}

/// `mac`
pub fn mac_tag(args: &mut MacArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let message = read_input(&args.input)?;
    let tag = mac(&pw, &message);
    tracing::info!(input_bytes = message.len(), "computed MAC");
    let len = message.len() as u64;
    write_output(&args.output, tag_output(&tag, CUSTOM_TAG, len, args.json)?.as_bytes())
}

/// `encrypt`
pub fn encrypt(args: &mut EncryptArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let message = Zeroizing::new(read_input(&args.input)?);
    let cryptogram = encryption::encrypt(&pw, &message);
    tracing::info!(input_bytes = message.len(), "encrypted under passphrase");
    write_output(&args.output, cryptogram.to_hex_lines().as_bytes())
}

/// `decrypt`. A wrong passphrase or a tampered file is an error, and
/// nothing is written.
pub fn decrypt(args: &mut DecryptArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let cryptogram = SymmetricCryptogram::from_hex_lines(&read_text(&args.input)?)
        .context("input is not a symmetric cryptogram")?;
    let plaintext = Zeroizing::new(
        encryption::decrypt(&pw, &cryptogram).context("decryption failed")?,
    );
    tracing::info!(output_bytes = plaintext.len(), "decrypted");
    write_output(&args.output, &plaintext)
}

/// `keygen`
pub fn keygen(args: &mut KeygenArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let keypair = E521Keypair::from_passphrase(&pw);
    let public_key = keypair.public_key();
    tracing::info!(public_key = ?public_key, "derived key pair");

    let text = if args.json {
        let point = public_key.point();
        let report = PublicKeyReport {
            curve: "E521",
            x: point.x().to_str_radix(16).to_uppercase(),
            y: point.y().to_str_radix(16).to_uppercase(),
        };
        let mut json = serde_json::to_string_pretty(&report).context("failed to encode JSON")?;
        json.push('\n');
        json
    } else {
        public_key.to_hex_lines()
    };
    write_output(&args.output, text.as_bytes())
}

fn load_public_key(path: &Path) -> Result<PublicKey> {
    PublicKey::from_hex_lines(&read_text_file(path, "public key")?)
        .with_context(|| format!("{} is not a valid public key", path.display()))
}

/// `pk-encrypt`
pub fn pk_encrypt(args: &PkEncryptArgs) -> Result<()> {
    let recipient = load_public_key(&args.public_key)?;
    let message = Zeroizing::new(read_input(&args.input)?);
    let cryptogram = ecies::encrypt(&recipient, &message);
    tracing::info!(input_bytes = message.len(), "encrypted to public key");
    write_output(&args.output, cryptogram.to_hex_lines().as_bytes())
}

/// `pk-decrypt`
pub fn pk_decrypt(args: &mut DecryptArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let cryptogram = EllipticCryptogram::from_hex_lines(&read_text(&args.input)?)
        .context("input is not a public-key cryptogram")?;
    let plaintext =
        Zeroizing::new(ecies::decrypt(&pw, &cryptogram).context("decryption failed")?);
    tracing::info!(output_bytes = plaintext.len(), "decrypted");
    write_output(&args.output, &plaintext)
}

/// `sign`
pub fn sign_message(args: &mut SignArgs) -> Result<()> {
    let pw = passphrase_bytes(&mut args.passphrase);
    let message = read_input(&args.input)?;
    let signature = sign(&pw, &message);
    tracing::info!(input_bytes = message.len(), "signed");
    write_output(&args.output, signature.to_hex_lines().as_bytes())
}

/// `verify`. An invalid signature is an error, so the exit status tells
/// the caller.
pub fn verify_message(args: &VerifyArgs) -> Result<()> {
    let public_key = load_public_key(&args.public_key)?;
    let signature = Signature::from_hex_lines(&read_text_file(&args.signature, "signature")?)
        .with_context(|| format!("{} is not a valid signature", args.signature.display()))?;
    let message = read_input(&args.input)?;

    signatures::verify_strict(&public_key, &message, &signature)
        .context("signature does not match this message and public key")?;
    tracing::info!(input_bytes = message.len(), "signature verified");
    println!("signature valid");
    Ok(())
}
