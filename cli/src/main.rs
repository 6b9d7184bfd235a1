// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RBAC Transaction Tool
//!
//! Entry point for the `rbac-txn` binary. Parses CLI arguments, initializes
//! logging, and dispatches to a subcommand:
//!
//! - `keygen`      — generate a signing key
//! - `create-user` — build a signed create-user batch and write it to disk
//! - `inspect`     — verify a batch list and print a JSON summary
//! - `version`     — print build version information
//!
//! Submitting the batch to a ledger is left to the caller; the file
//! `create-user` writes is the exact body the ledger's batch endpoint takes.

mod cli;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use prost::Message;
use std::path::Path;

use rbac_protocol::crypto::{KeyPair, SignatureScheme, Signer};
use rbac_protocol::messages::BatchList;
use rbac_protocol::transaction::{CreateUserPipeline, NewUser, Nonce};

use cli::{Commands, RbacTxnCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = RbacTxnCli::parse();

    if !matches!(cli.command, Commands::Version) {
        logging::init_logging(
            "rbac_cli=info,rbac_protocol=info",
            LogFormat::from_str_lossy(&cli.log_format),
        );
    }

    match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::CreateUser(args) => create_user(args),
        Commands::Inspect(args) => inspect(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Generates a key and either writes it to a file or prints it.
fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let keypair = KeyPair::generate(args.algorithm);
    let public_key = keypair.public_key_hex();

    match &args.out {
        Some(path) => {
            write_secret_key(path, &keypair)?;
            tracing::info!(
                algorithm = %args.algorithm,
                public_key = %public_key,
                key_path = %path.display(),
                "keypair generated"
            );
        }
        None => println!("private key : {}", keypair.secret_key_hex()),
    }
    println!("public key  : {}", public_key);

    Ok(())
}

/// Builds the create-user batch, writes the encoded batch list, and prints
/// the batch id.
fn create_user(args: cli::CreateUserArgs) -> Result<()> {
    let (list, batch_id) = build_batch_list(&args)?;

    std::fs::write(&args.out, list.encode_to_vec())
        .with_context(|| format!("failed to write batch list to {}", args.out.display()))?;

    tracing::info!(
        batch_id = %batch_id,
        user_id = %args.user_id,
        managers = args.managers.len(),
        out = %args.out.display(),
        "create-user batch written"
    );
    println!("{}", batch_id);

    Ok(())
}

/// Runs the pipeline for `args` and wraps the batch for submission.
fn build_batch_list(args: &cli::CreateUserArgs) -> Result<(BatchList, String)> {
    let txn_key = load_key(&args.txn_key, args.txn_algorithm)?;
    let batch_key = load_key(&args.batch_key, args.batch_algorithm)?;

    let user = NewUser::new(&args.name, &args.user_id, &args.metadata).managers(&args.managers);
    let nonce = args.nonce.clone().map(Nonce::Fixed).unwrap_or_default();

    let (batch, batch_id) = CreateUserPipeline::new()
        .nonce(nonce)
        .create_user(&txn_key, &batch_key, &user)
        .context("failed to assemble create-user batch")?;

    Ok((batch.into_batch_list(), batch_id))
}

/// Verifies a batch list file and prints its JSON summary.
fn inspect(args: cli::InspectArgs) -> Result<()> {
    let bytes = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let list = BatchList::decode(bytes.as_slice())
        .with_context(|| format!("{} is not an encoded batch list", args.file.display()))?;

    let summary = report::summarize(&list)?;
    tracing::info!(batches = summary.len(), "batch list verified");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Reads a hex private key file for `scheme`.
fn load_key(path: &Path, scheme: SignatureScheme) -> Result<KeyPair> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    KeyPair::from_hex(scheme, &contents)
        .with_context(|| format!("{} does not hold a {} private key", path.display(), scheme))
}

/// Writes the hex secret key, readable only by the owner on Unix.
fn write_secret_key(path: &Path, keypair: &KeyPair) -> Result<()> {
    std::fs::write(path, keypair.secret_key_hex())
        .with_context(|| format!("failed to write key to {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("rbac-txn {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", rbac_protocol::config::PROTOCOL_VERSION);
    println!(
        "family   {} {}",
        rbac_protocol::config::FAMILY_NAME,
        rbac_protocol::config::FAMILY_VERSION
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key_file(dir: &Path, name: &str, scheme: SignatureScheme) -> (PathBuf, KeyPair) {
        let keypair = KeyPair::generate(scheme);
        let path = dir.join(name);
        write_secret_key(&path, &keypair).unwrap();
        (path, keypair)
    }

    fn create_user_args(dir: &Path, txn_key: PathBuf, batch_key: PathBuf) -> cli::CreateUserArgs {
        cli::CreateUserArgs {
            txn_key,
            txn_algorithm: SignatureScheme::Secp256k1,
            batch_key,
            batch_algorithm: SignatureScheme::Ed25519,
            name: "alice".to_string(),
            user_id: "02ab".to_string(),
            metadata: "{}".to_string(),
            managers: vec!["03m1".to_string(), "03m2".to_string()],
            nonce: Some("fixed".to_string()),
            out: dir.join("batch.bin"),
        }
    }

    #[test]
    fn key_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (path, keypair) = key_file(dir.path(), "txn.key", SignatureScheme::Ed25519);

        let loaded = load_key(&path, SignatureScheme::Ed25519).unwrap();
        assert_eq!(loaded.public_key_hex(), keypair.public_key_hex());
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let (path, _) = key_file(dir.path(), "txn.key", SignatureScheme::Secp256k1);
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn garbage_key_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.key");
        std::fs::write(&path, "not hex").unwrap();

        let err = load_key(&path, SignatureScheme::Secp256k1).unwrap_err();
        assert!(err.to_string().contains("does not hold a secp256k1 private key"));
    }

    #[test]
    fn written_batch_list_inspects_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let (txn_path, txn_key) = key_file(dir.path(), "txn.key", SignatureScheme::Secp256k1);
        let (batch_path, batch_key) = key_file(dir.path(), "batch.key", SignatureScheme::Ed25519);
        let args = create_user_args(dir.path(), txn_path, batch_path);

        create_user(args).unwrap();

        let bytes = std::fs::read(dir.path().join("batch.bin")).unwrap();
        let list = BatchList::decode(bytes.as_slice()).unwrap();
        let summary = report::summarize(&list).unwrap();

        assert_eq!(summary[0].signer_public_key, batch_key.public_key_hex());
        let txn = &summary[0].transactions[0];
        assert_eq!(txn.signer_public_key, txn_key.public_key_hex());
        assert_eq!(txn.nonce, "fixed");
        assert_eq!(txn.inputs.len(), 3);
        assert_eq!(
            txn.create_user.as_ref().unwrap().manager_id.as_deref(),
            Some("03m1")
        );
    }

    #[test]
    fn fixed_nonce_reproduces_batch_id() {
        let dir = tempfile::tempdir().unwrap();
        let (txn_path, _) = key_file(dir.path(), "txn.key", SignatureScheme::Secp256k1);
        let (batch_path, _) = key_file(dir.path(), "batch.key", SignatureScheme::Ed25519);
        let args = create_user_args(dir.path(), txn_path, batch_path);

        let (_, first) = build_batch_list(&args).unwrap();
        let (_, second) = build_batch_list(&args).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_key_file_fails_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let args = create_user_args(dir.path(), dir.path().join("nope.key"), dir.path().join("nope.key"));

        assert!(create_user(args).is_err());
        assert!(!dir.path().join("batch.bin").exists());
    }
}
