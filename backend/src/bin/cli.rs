#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Args, Parser, Subcommand};
use num_bigint::BigUint;
use serde::Serialize;

use distributor_backend::apis::audit::{audit_files, load_distribution};
use distributor_backend::apis::config::{SnapshotConfig, DEFAULT_TOLERANCE};
use distributor_backend::apis::snapshot::Snapshot;
use distributor_backend::logging::{self, LogLevel};
use merkle_distributor::merkle_tree::{checksum, parse_address, parse_amount, to_hex_string};
use merkle_distributor::{verify_strict, Claim, H256};

#[derive(Parser, Debug)]
#[command(name = "distributor")]
#[command(about = "Build and verify Merkle reward distributions", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a distribution from an entry list and write it as JSON
    Build(BuildArgs),
    /// Re-verify published distribution files
    Verify(VerifyArgs),
    /// Print and check the claim of one address
    Proof(ProofArgs),
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Entry list: `.csv` (address,amount[,metadata]) or JSON balance map
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the distribution
    #[arg(short, long)]
    output: PathBuf,

    /// TOML file with expected_total / tolerance / allocation_ceiling
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reward pool the distribution must reconcile with
    #[arg(long, value_parser = amount_arg)]
    expected_total: Option<BigUint>,

    /// Allowed under-allocation against the expected total
    #[arg(long, value_parser = amount_arg)]
    tolerance: Option<BigUint>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Distribution files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Pool that all given files split between them
    #[arg(long, value_parser = amount_arg)]
    expected_total: Option<BigUint>,

    /// Allowed under-allocation against the expected total
    #[arg(long, value_parser = amount_arg)]
    tolerance: Option<BigUint>,
}

#[derive(Args, Debug)]
struct ProofArgs {
    /// Distribution file
    #[arg(short, long)]
    distribution: PathBuf,

    /// Claimant address, any casing
    #[arg(short, long)]
    address: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimOutput<'a> {
    address: String,
    merkle_root: H256,
    #[serde(flatten)]
    claim: &'a Claim,
}

fn amount_arg(value: &str) -> Result<BigUint, String> {
    parse_amount(value).map_err(|e| e.to_string())
}

fn build(args: BuildArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => SnapshotConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => SnapshotConfig::default(),
    }
    .with_overrides(args.expected_total, args.tolerance);

    let distribution = Snapshot::run(config, &args.input, &args.output)
        .with_context(|| format!("failed to build distribution from {}", args.input.display()))?;

    println!("Merkle root: {:?}", distribution.merkle_root());
    println!("Token total: {}", to_hex_string(distribution.token_total()));
    println!("Claims: {}", distribution.len());
    println!("Written to {}", args.output.display());
    Ok(())
}

fn verify(args: VerifyArgs) -> anyhow::Result<()> {
    let tolerance = args
        .tolerance
        .unwrap_or_else(|| BigUint::from(DEFAULT_TOLERANCE));

    let report = audit_files(&args.files, args.expected_total.as_ref(), &tolerance)
        .context("distribution verification failed")?;

    for audited in &report.distributions {
        println!(
            "{}: root {:?}, {} claims, total {}",
            audited.path.display(),
            audited.merkle_root,
            audited.claims,
            to_hex_string(&audited.token_total)
        );
    }
    println!("Aggregate total: {}", to_hex_string(&report.aggregate_total));
    Ok(())
}

fn proof(args: ProofArgs) -> anyhow::Result<()> {
    let distribution = load_distribution(&args.distribution)
        .with_context(|| format!("failed to load {}", args.distribution.display()))?;
    let address = parse_address(&args.address)?;

    let Some(claim) = distribution.claim(&address) else {
        bail!("no claim for {} in {}", checksum(&address), args.distribution.display());
    };

    verify_strict(
        claim.index,
        &address,
        &claim.amount,
        &claim.proof,
        distribution.merkle_root(),
    )?;

    let output = ClaimOutput {
        address: checksum(&address),
        merkle_root: *distribution.merkle_root(),
        claim,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(err) = logging::try_init(LogLevel::from_verbosity(cli.verbose)) {
        eprintln!("logging disabled: {err}");
    }

    match cli.command {
        Commands::Build(args) => build(args)?,
        Commands::Verify(args) => verify(args)?,
        Commands::Proof(args) => proof(args)?,
    }

    Ok(())
}
