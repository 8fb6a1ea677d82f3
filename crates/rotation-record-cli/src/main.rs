//! RotationRecord CLI — `rrec` command.
//!
//! Generates authorizing keys and builds signed block-signing key
//! rotation entries ready for ledger submission.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use zeroize::Zeroizing;

use rotation_record::crypto::keys::Ed25519KeyPair;
use rotation_record::{DerivationMode, KeyRotationBuilder};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// RotationRecord CLI — build signed block-signing key rotations for
/// identity root chains.
#[derive(Parser, Debug)]
#[command(
    name = "rrec",
    about = "RotationRecord CLI",
    version,
    long_about = "rrec — RotationRecord CLI\n\nGenerate authorizing keys and build signed block-signing key\nrotation entries for identity root chains."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new authorizing key pair
    Keygen {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Build and sign a block-signing key rotation entry
    Rotate {
        /// Identity root chain ID (hex)
        #[arg(long)]
        root_chain: String,

        /// Chain the entry is written to
        #[arg(long)]
        chain: String,

        /// Authorizing key pair, 64 bytes hex (seed ‖ public)
        #[arg(long, conflicts_with = "key_file")]
        key: Option<String>,

        /// File holding the authorizing key pair in hex
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// How the new key pair is obtained
        #[arg(long, value_enum, default_value_t = Mode::Deterministic)]
        mode: Mode,

        /// New key pair for explicit mode, 64 bytes hex (seed ‖ public)
        #[arg(long)]
        new_key: Option<String>,

        /// Record timestamp in seconds (default: now)
        #[arg(long)]
        timestamp: Option<u64>,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Deterministic,
    Explicit,
    Random,
}

// ── Output shapes ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct KeygenOutput {
    keypair: String,
    public_key: String,
}

#[derive(Serialize)]
struct RotateOutput {
    chain_id: String,
    content: String,
    ext_ids: Vec<String>,
    new_public_key: String,
    new_secret: String,
    timestamp: u64,
    timestamp_rfc3339: Option<String>,
}

// ── Key helpers ───────────────────────────────────────────────────────────────

fn parse_keypair_hex(label: &str, text: &str) -> Result<Zeroizing<[u8; 64]>> {
    let bytes = Zeroizing::new(
        hex::decode(text.trim()).with_context(|| format!("{label} is not valid hex"))?,
    );
    let mut key = Zeroizing::new([0u8; 64]);
    if bytes.len() != key.len() {
        return Err(anyhow!("{label} must be 64 bytes, got {}", bytes.len()));
    }
    key.copy_from_slice(&bytes);
    Ok(key)
}

fn load_authorizing_key(
    key: Option<&str>,
    key_file: Option<&PathBuf>,
) -> Result<Zeroizing<[u8; 64]>> {
    match (key, key_file) {
        (Some(text), _) => parse_keypair_hex("--key", text),
        (None, Some(path)) => {
            let text = Zeroizing::new(
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
            );
            parse_keypair_hex("key file", &text)
        }
        (None, None) => Err(anyhow!("one of --key or --key-file is required")),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_keygen(json: bool, verbose: bool) -> Result<()> {
    let pair = Ed25519KeyPair::generate().context("key generation failed")?;
    let output = KeygenOutput {
        keypair: hex::encode(&pair.keypair_bytes()[..]),
        public_key: hex::encode(pair.verifying_key_bytes()),
    };
    if verbose {
        log::info!("generated authorizing key {}", output.public_key);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("keypair:    {}", output.keypair);
        println!("public key: {}", output.public_key);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_rotate(
    root_chain: &str,
    chain: &str,
    key: Option<&str>,
    key_file: Option<&PathBuf>,
    mode: Mode,
    new_key: Option<&str>,
    timestamp: Option<u64>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let authorizing_key = load_authorizing_key(key, key_file)?;

    let derivation = match (mode, new_key) {
        (Mode::Explicit, Some(text)) => {
            DerivationMode::Explicit(parse_keypair_hex("--new-key", text)?)
        }
        (Mode::Explicit, None) => return Err(anyhow!("--mode explicit requires --new-key")),
        (_, Some(_)) => return Err(anyhow!("--new-key is only used with --mode explicit")),
        (Mode::Deterministic, None) => DerivationMode::Deterministic,
        (Mode::Random, None) => DerivationMode::Random,
    };

    let mut builder = KeyRotationBuilder::new(root_chain, chain).derivation(derivation);
    if let Some(ts) = timestamp {
        builder = builder.timestamp(ts);
    }
    let (record, new_secret) = builder
        .sign(&authorizing_key)
        .context("failed to build rotation record")?;

    if verbose {
        log::info!(
            "rotation for {} signed with identity key hash {}",
            record.root_chain_id(),
            hex::encode(record.authorizing_key_hash())
        );
    }

    let entry = record.to_external_entry();
    let output = RotateOutput {
        chain_id: entry.chain_id.clone(),
        content: hex::encode(&entry.content),
        ext_ids: entry.ext_ids_hex(),
        new_public_key: hex::encode(record.new_public_key()),
        new_secret: hex::encode(&new_secret[..]),
        timestamp: record.timestamp(),
        timestamp_rfc3339: rotation_record::time::secs_to_rfc3339(record.timestamp()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("chain:      {}", output.chain_id);
        match &output.timestamp_rfc3339 {
            Some(rfc3339) => println!("timestamp:  {} ({rfc3339})", output.timestamp),
            None => println!("timestamp:  {}", output.timestamp),
        }
        println!("new key:    {}", output.new_public_key);
        println!("new secret: {}", output.new_secret);
        for (i, ext_id) in output.ext_ids.iter().enumerate() {
            println!("ext-id[{i}]:  {ext_id}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Keygen { json } => cmd_keygen(json, verbose),
        Commands::Rotate {
            root_chain,
            chain,
            key,
            key_file,
            mode,
            new_key,
            timestamp,
            json,
        } => cmd_rotate(
            &root_chain,
            &chain,
            key.as_deref(),
            key_file.as_ref(),
            mode,
            new_key.as_deref(),
            timestamp,
            json,
            verbose,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
