//! Command-line surface for the threshold credential committee.
//!
//! Each subcommand reads positional hex arguments, writes a single JSON
//! object to stdout and reports failures as `{"error": ...}` on stderr.
//! Exit codes: 0 on success, 1 on usage or parse errors, 2 on
//! cryptographic failures. Diagnostics go to stderr through `tracing`
//! (`RUST_LOG` controls verbosity), so stdout stays machine-readable.
//!
//! Group elements are hex-encoded canonical compressed bytes; scalars are
//! fixed-width big-endian hex.

use std::{fmt, fs, path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context, Result};
use ark_bls12_381::Bls12_381;
use ark_ec::pairing::Pairing;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tiac::{
    dkg::{
        Commitments, MasterVerificationKey, ParticipantId, Polynomials, Share, SigningKeyShare,
        VerificationKeyShare,
    },
    DkgError, SignatureParams,
};

type Fr = <Bls12_381 as Pairing>::ScalarField;
type G1 = <Bls12_381 as Pairing>::G1Affine;
type G2 = <Bls12_381 as Pairing>::G2Affine;

const CURVE_ID: &str = "bls12-381";

#[derive(Parser)]
#[command(name = "tiac-dkg")]
#[command(about = "Parameter setup and per-authority DKG steps for the threshold credential scheme")]
struct Cli {
    /// Shared parameters file
    #[arg(long, default_value = "crypto_params.json", global = true)]
    params: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fresh pairing generators and write the parameters file
    SetupParams,

    /// Sample this authority's polynomial pair and coefficient commitments
    GeneratePolynomials { threshold: ParticipantId },

    /// Evaluate own polynomials at another participant's index
    EvaluatePolynomial {
        threshold: ParticipantId,
        receiver: ParticipantId,
        /// F coefficients then G coefficients, `threshold + 1` each
        coefficients: Vec<String>,
    },

    /// Check a received share against the sender's commitments
    VerifyShare {
        threshold: ParticipantId,
        my_index: ParticipantId,
        f_share: String,
        g_share: String,
        /// V_x, V_y, V_y_prime columns, `threshold + 1` each
        commitments: Vec<String>,
    },

    /// Aggregate the qualified set's commitments into the master key
    AggregateMvk {
        threshold: ParticipantId,
        num_qualified: usize,
        /// Qualified indices, then each member's commitment columns
        args: Vec<String>,
    },

    /// Sum the qualified shares into this authority's signing key
    ComputeSigningKey {
        threshold: ParticipantId,
        num_qualified: usize,
        my_index: ParticipantId,
        /// `(F_share, G_share)` pairs, one per qualified member
        shares: Vec<String>,
    },

    /// Derive this authority's verification key from the qualified
    /// commitments
    ComputeVerificationKeys {
        threshold: ParticipantId,
        num_qualified: usize,
        my_index: ParticipantId,
        /// Each qualified member's commitment columns
        commitments: Vec<String>,
    },
}

/// Marker attached to errors that must exit with code 2.
#[derive(Debug)]
struct CryptoFailure;

impl fmt::Display for CryptoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cryptographic failure")
    }
}

fn crypto(e: DkgError) -> anyhow::Error {
    anyhow!("{e:?}").context(CryptoFailure)
}

#[derive(Serialize, Deserialize)]
struct ParamsFile {
    curve: String,
    prime_order: String,
    g1: String,
    g2: String,
    h1: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", json!({ "error": e.to_string() }));
            return ExitCode::from(1);
        }
        // --help and --version
        Err(e) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
    };

    match run(cli) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output).expect("valid json"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", json!({ "error": format!("{e:#}") }));
            if e.downcast_ref::<CryptoFailure>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(cli: Cli) -> Result<Value> {
    match cli.command {
        Commands::SetupParams => setup_params(&cli.params),
        Commands::GeneratePolynomials { threshold } => {
            generate_polynomials(&cli.params, threshold)
        }
        Commands::EvaluatePolynomial {
            threshold,
            receiver,
            coefficients,
        } => evaluate_polynomial(threshold, receiver, &coefficients),
        Commands::VerifyShare {
            threshold,
            my_index,
            f_share,
            g_share,
            commitments,
        } => verify_share(&cli.params, threshold, my_index, &f_share, &g_share, &commitments),
        Commands::AggregateMvk {
            threshold,
            num_qualified,
            args,
        } => aggregate_mvk(threshold, num_qualified, &args),
        Commands::ComputeSigningKey {
            threshold,
            num_qualified,
            my_index,
            shares,
        } => compute_signing_key(threshold, num_qualified, my_index, &shares),
        Commands::ComputeVerificationKeys {
            threshold,
            num_qualified,
            my_index,
            commitments,
        } => compute_verification_keys(threshold, num_qualified, my_index, &commitments),
    }
}

fn setup_params(path: &PathBuf) -> Result<Value> {
    let params = SignatureParams::<Bls12_381>::generate(&mut OsRng);
    let file = ParamsFile {
        curve: CURVE_ID.into(),
        prime_order: hex::encode(Fr::MODULUS.to_bytes_be()),
        g1: point_to_hex(&params.g1)?,
        g2: point_to_hex(&params.g2)?,
        h1: point_to_hex(&params.h1)?,
    };
    let rendered = serde_json::to_value(&file)?;
    fs::write(path, serde_json::to_string_pretty(&file)?)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "wrote shared parameters");
    Ok(rendered)
}

fn load_params(path: &PathBuf) -> Result<SignatureParams<Bls12_381>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading {}; run setup-params first", path.display()))?;
    let file: ParamsFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;

    if file.curve != CURVE_ID {
        bail!("unsupported curve {:?} in parameters file", file.curve);
    }
    if file.prime_order != hex::encode(Fr::MODULUS.to_bytes_be()) {
        bail!("prime order in parameters file does not match the curve");
    }
    let params = SignatureParams::<Bls12_381> {
        g1: point_from_hex(&file.g1).context("g1")?,
        h1: point_from_hex(&file.h1).context("h1")?,
        g2: point_from_hex(&file.g2).context("g2")?,
    };
    if !params.is_valid() {
        bail!("degenerate generators in parameters file");
    }
    info!(path = %path.display(), "loaded shared parameters");
    Ok(params)
}

fn generate_polynomials(params_path: &PathBuf, threshold: ParticipantId) -> Result<Value> {
    if threshold == 0 {
        bail!("threshold must be at least 1");
    }
    let params = load_params(params_path)?;
    let polynomials = Polynomials::<Fr>::rand(&mut OsRng, threshold);
    let commitments = Commitments::new(&polynomials, &params);

    Ok(json!({
        "F_coeffs": scalars_to_hex(polynomials.f_coefficients()),
        "G_coeffs": scalars_to_hex(polynomials.g_coefficients()),
        "commitments": commitments_to_json(&commitments)?,
    }))
}

fn evaluate_polynomial(
    threshold: ParticipantId,
    receiver: ParticipantId,
    coefficients: &[String],
) -> Result<Value> {
    let len = threshold as usize + 1;
    if coefficients.len() != 2 * len {
        bail!(
            "expected {} coefficients ({} per polynomial), got {}",
            2 * len,
            len,
            coefficients.len()
        );
    }
    let f = scalars_from_hex(&coefficients[..len])?;
    let g = scalars_from_hex(&coefficients[len..])?;

    let polynomials = Polynomials::from_coefficients(f, g);
    let share = polynomials.share_for(receiver, threshold).map_err(crypto)?;

    Ok(json!({
        "F": scalar_to_hex(&share.f),
        "G": scalar_to_hex(&share.g),
    }))
}

fn verify_share(
    params_path: &PathBuf,
    threshold: ParticipantId,
    my_index: ParticipantId,
    f_share: &str,
    g_share: &str,
    commitments: &[String],
) -> Result<Value> {
    let params = load_params(params_path)?;
    let all = parse_commitments(commitments, threshold, 1)?;
    let share = Share {
        id: my_index,
        threshold,
        f: scalar_from_hex(f_share).context("F_share")?,
        g: scalar_from_hex(g_share).context("G_share")?,
    };

    let valid = match share.verify(&all[0], &params) {
        Ok(()) => true,
        Err(DkgError::InvalidShare) => false,
        Err(e) => return Err(crypto(e)),
    };
    Ok(json!({ "valid": valid }))
}

fn aggregate_mvk(
    threshold: ParticipantId,
    num_qualified: usize,
    args: &[String],
) -> Result<Value> {
    if num_qualified < threshold as usize + 1 {
        return Err(anyhow!(
            "{num_qualified} qualified contributors, need at least {}",
            threshold + 1
        )
        .context(CryptoFailure));
    }
    if args.len() < num_qualified {
        bail!("missing qualified indices");
    }
    let (indices, commitment_args) = args.split_at(num_qualified);
    let indices = indices
        .iter()
        .map(|i| i.parse::<ParticipantId>())
        .collect::<Result<Vec<_>, _>>()
        .context("qualified indices")?;
    info!(?indices, "aggregating master verification key");

    let all = parse_commitments(commitment_args, threshold, num_qualified)?;
    let mvk = MasterVerificationKey::new(&all).map_err(crypto)?;

    Ok(json!({
        "alpha2": point_to_hex(&mvk.alpha2)?,
        "beta2": point_to_hex(&mvk.beta2)?,
        "beta1": point_to_hex(&mvk.beta1)?,
    }))
}

fn compute_signing_key(
    threshold: ParticipantId,
    num_qualified: usize,
    my_index: ParticipantId,
    shares: &[String],
) -> Result<Value> {
    if shares.len() != 2 * num_qualified {
        bail!(
            "expected {} share values ({} (F, G) pairs), got {}",
            2 * num_qualified,
            num_qualified,
            shares.len()
        );
    }
    let received = shares
        .chunks_exact(2)
        .map(|pair| {
            Ok(Share {
                id: my_index,
                threshold,
                f: scalar_from_hex(&pair[0])?,
                g: scalar_from_hex(&pair[1])?,
            })
        })
        .collect::<Result<Vec<Share<Fr>>>>()?;

    let signing = SigningKeyShare::new(my_index, &received).map_err(crypto)?;
    Ok(json!({
        "sgk1": scalar_to_hex(&signing.x),
        "sgk2": scalar_to_hex(&signing.y),
    }))
}

fn compute_verification_keys(
    threshold: ParticipantId,
    num_qualified: usize,
    my_index: ParticipantId,
    commitments: &[String],
) -> Result<Value> {
    let all = parse_commitments(commitments, threshold, num_qualified)?;
    let vk = VerificationKeyShare::new(my_index, &all, threshold).map_err(crypto)?;

    Ok(json!({
        "vk1": point_to_hex(&vk.vk1)?,
        "vk2": point_to_hex(&vk.vk2)?,
        "vk3": point_to_hex(&vk.vk3)?,
    }))
}

/// Parses `count` commitment blocks of `3 * (threshold + 1)` hex points:
/// the V_x and V_y columns in G2, then V_y_prime in G1.
fn parse_commitments(
    args: &[String],
    threshold: ParticipantId,
    count: usize,
) -> Result<Vec<Commitments<Bls12_381>>> {
    let len = threshold as usize + 1;
    if args.len() != count * 3 * len {
        bail!(
            "expected {} commitment values ({} blocks of {}), got {}",
            count * 3 * len,
            count,
            3 * len,
            args.len()
        );
    }

    args.chunks_exact(3 * len)
        .map(|block| {
            Ok(Commitments {
                v_x: points_from_hex::<G2>(&block[..len]).context("V_x")?,
                v_y: points_from_hex::<G2>(&block[len..2 * len]).context("V_y")?,
                v_y_prime: points_from_hex::<G1>(&block[2 * len..]).context("V_y_prime")?,
            })
        })
        .collect()
}

fn commitments_to_json(commitments: &Commitments<Bls12_381>) -> Result<Value> {
    Ok(json!({
        "V_x": points_to_hex(&commitments.v_x)?,
        "V_y": points_to_hex(&commitments.v_y)?,
        "V_y_prime": points_to_hex(&commitments.v_y_prime)?,
    }))
}

fn scalar_from_hex(hex_str: &str) -> Result<Fr> {
    let bytes = hex::decode(hex_str).map_err(|e| anyhow!("invalid hex: {e}"))?;
    Ok(Fr::from_be_bytes_mod_order(&bytes))
}

fn scalar_to_hex(scalar: &Fr) -> String {
    hex::encode(scalar.into_bigint().to_bytes_be())
}

fn scalars_from_hex(hex_strs: &[String]) -> Result<Vec<Fr>> {
    hex_strs.iter().map(|s| scalar_from_hex(s)).collect()
}

fn scalars_to_hex(scalars: &[Fr]) -> Vec<String> {
    scalars.iter().map(scalar_to_hex).collect()
}

fn point_from_hex<T: CanonicalDeserialize>(hex_str: &str) -> Result<T> {
    let bytes = hex::decode(hex_str).map_err(|e| anyhow!("invalid hex: {e}"))?;
    T::deserialize_compressed(bytes.as_slice()).map_err(|e| anyhow!("bad encoding: {e}"))
}

fn point_to_hex<T: CanonicalSerialize>(point: &T) -> Result<String> {
    let mut bytes = Vec::new();
    point
        .serialize_compressed(&mut bytes)
        .map_err(|e| anyhow!("serialization: {e}"))?;
    Ok(hex::encode(bytes))
}

fn points_from_hex<T: CanonicalDeserialize>(hex_strs: &[String]) -> Result<Vec<T>> {
    hex_strs.iter().map(|s| point_from_hex(s)).collect()
}

fn points_to_hex<T: CanonicalSerialize>(points: &[T]) -> Result<Vec<String>> {
    points.iter().map(point_to_hex).collect()
}
