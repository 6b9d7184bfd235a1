//! # CLI Interface
//!
//! Defines the command-line argument structure for `rbac-txn` using
//! `clap` derive. Supports four subcommands: `keygen`, `create-user`,
//! `inspect`, and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rbac_protocol::crypto::SignatureScheme;

/// RBAC transaction assembly tool.
///
/// Generates signing keys, builds signed create-user batches ready for
/// submission to the ledger, and verifies batches produced elsewhere.
#[derive(Parser, Debug)]
#[command(
    name = "rbac-txn",
    about = "Assemble and inspect signed RBAC create-user batches",
    version,
    propagate_version = true
)]
pub struct RbacTxnCli {
    /// Log output format: `pretty` or `json`. Logs go to stderr.
    #[arg(long, global = true, env = "RBAC_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `rbac-txn` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a private key and print its public key.
    Keygen(KeygenArgs),
    /// Build a signed batch creating one user.
    CreateUser(CreateUserArgs),
    /// Decode and verify a batch list, printing a JSON summary.
    Inspect(InspectArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `keygen` subcommand.
#[derive(Parser, Debug)]
pub struct KeygenArgs {
    /// Signature scheme of the new key.
    #[arg(long, short = 'a', default_value_t = SignatureScheme::Secp256k1)]
    pub algorithm: SignatureScheme,

    /// File to write the hex private key to (mode 0600).
    ///
    /// When omitted the private key is printed to stdout.
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the `create-user` subcommand.
#[derive(Parser, Debug)]
pub struct CreateUserArgs {
    /// File holding the hex private key that signs the transaction.
    #[arg(long, env = "RBAC_TXN_KEY")]
    pub txn_key: PathBuf,

    /// Signature scheme of the transaction key.
    #[arg(long, default_value_t = SignatureScheme::Secp256k1)]
    pub txn_algorithm: SignatureScheme,

    /// File holding the hex private key that signs the batch.
    #[arg(long, env = "RBAC_BATCH_KEY")]
    pub batch_key: PathBuf,

    /// Signature scheme of the batch key.
    #[arg(long, default_value_t = SignatureScheme::Secp256k1)]
    pub batch_algorithm: SignatureScheme,

    /// Display name of the new user.
    #[arg(long)]
    pub name: String,

    /// Identifier of the new user, normally their public key.
    #[arg(long)]
    pub user_id: String,

    /// Free-form metadata stored with the user.
    #[arg(long, default_value = "")]
    pub metadata: String,

    /// Manager identifier. Repeatable; only the first is recorded as the
    /// user's manager, but every one is declared as a state address.
    #[arg(long = "manager")]
    pub managers: Vec<String>,

    /// Pin the header nonce instead of generating a random one.
    #[arg(long)]
    pub nonce: Option<String>,

    /// File to write the encoded batch list to.
    #[arg(long, short = 'o')]
    pub out: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// File holding an encoded batch list.
    pub file: PathBuf,
}
