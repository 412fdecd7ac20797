//! `mab`: select arms from the command line.

use clap::{Args, Parser, Subcommand, ValueEnum};
use mab_common::SCHEMA_VERSION;
use mab_config::{resolve_config, BanditConfig, ResolvedConfig, WireFamily};
use mab_core::exit_codes::ExitCode;
use mab_core::logging::{init_logging, LogFormat};
use mab_core::reward::{BanditContext, FileRewardSource, RequestContext, RewardSource, RewardStub};
use mab_core::{Bandit, Decision, RewardParser, SelectError, Sha1Sampler, Stage};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

#[derive(Parser)]
#[command(name = "mab", about = "Deterministic multi-armed bandit arm selection")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML or JSON); overrides MAB_CONFIG and the XDG default
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log line encoding on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch rewards, compute probabilities, and pick an arm for a unit
    Select(SelectArgs),
    /// Fetch rewards and print selection probabilities only
    Probs(SourceArgs),
    /// Print the hash bucket of a unit
    Bucket(BucketArgs),
    /// Inspect the resolved configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
struct SourceArgs {
    /// Reward payload file, or - for stdin
    #[arg(short, long)]
    rewards: Option<PathBuf>,

    /// Wire format of the reward payload (defaults to the configured family)
    #[arg(long, value_enum)]
    family: Option<Family>,

    /// Reward service URL (requires the http feature)
    #[arg(long)]
    url: Option<String>,

    /// Bandit context as JSON; anything that is not JSON is passed as a string
    #[arg(long)]
    context: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Args)]
struct SelectArgs {
    /// Unit identity to hash (user id, request id, ...)
    #[arg(short, long)]
    unit: String,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct BucketArgs {
    #[arg(short, long)]
    unit: String,

    /// Bucket count (defaults to the configured count)
    #[arg(long)]
    buckets: Option<u64>,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the resolved configuration, its source, and fingerprint
    Show,
    /// Validate the resolved configuration
    Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum Family {
    Beta,
    Normal,
    Point,
}

impl From<Family> for WireFamily {
    fn from(f: Family) -> Self {
        match f {
            Family::Beta => WireFamily::Beta,
            Family::Normal => WireFamily::Normal,
            Family::Point => WireFamily::Point,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

// ── Output ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorOutput {
    code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<Stage>,
    message: String,
}

#[derive(Serialize)]
struct DecisionOutput<'a> {
    schema_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    config_fingerprint: String,
    #[serde(flatten)]
    decision: &'a Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorOutput>,
}

fn print_decision(format: OutputFormat, out: &DecisionOutput<'_>) -> Result<(), mab_common::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(out)?),
        OutputFormat::Text => {
            let rewards: Vec<String> = out.decision.rewards.iter().map(|d| d.to_string()).collect();
            println!("rewards: [{}]", rewards.join(", "));
            let probs: Vec<String> = out.decision.probs.iter().map(|p| format!("{p:.6}")).collect();
            println!("probs:   [{}]", probs.join(", "));
            if out.unit.is_some() {
                println!("arm:     {}", out.decision.arm_index());
            }
            if let Some(e) = &out.error {
                println!("error:   {} (code {})", e.message, e.code);
            }
        }
    }
    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn reward_source(
    args: &SourceArgs,
    cfg: &BanditConfig,
) -> Result<Box<dyn RewardSource>, mab_common::Error> {
    let family: WireFamily = args.family.map(Into::into).unwrap_or(cfg.reward.family);

    if let Some(path) = &args.rewards {
        if path.as_os_str() == "-" {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            let rewards = family
                .parse(&body)
                .map_err(|e| mab_common::Error::InvalidReward(e.to_string()))?;
            return Ok(Box::new(RewardStub::new(rewards)));
        }
        return Ok(Box::new(FileRewardSource::new(path, family)));
    }

    match args.url.as_ref().or(cfg.reward.url.as_ref()) {
        Some(url) => http_source(url, family),
        None => Err(mab_common::Error::Config(
            "no reward source: pass --rewards <FILE|-> or --url, or set reward.url".to_string(),
        )),
    }
}

#[cfg(feature = "http")]
fn http_source(url: &str, family: WireFamily) -> Result<Box<dyn RewardSource>, mab_common::Error> {
    use mab_core::reward::{HttpRewardSource, UreqClient};
    Ok(Box::new(HttpRewardSource::new(UreqClient::new(), url, family)))
}

#[cfg(not(feature = "http"))]
fn http_source(url: &str, _family: WireFamily) -> Result<Box<dyn RewardSource>, mab_common::Error> {
    Err(mab_common::Error::Config(format!(
        "cannot fetch {url}: mab was built without the http feature"
    )))
}

fn bandit_context(raw: Option<&str>) -> Option<BanditContext> {
    raw.map(|s| serde_json::from_str(s).unwrap_or_else(|_| BanditContext::String(s.to_string())))
}

fn run_decision(
    resolved: &ResolvedConfig,
    args: &SourceArgs,
    unit: Option<&str>,
) -> Result<ExitCode, mab_common::Error> {
    let cfg = &resolved.config;
    let source = reward_source(args, cfg)?;
    let bandit = Bandit::from_config(cfg, source)?;
    let ctx = RequestContext::with_timeout(Duration::from_millis(cfg.reward.timeout_ms));
    let context = bandit_context(args.context.as_deref());
    debug!(source = %resolved.source, policy = %cfg.policy, "running decision");

    let result = match unit {
        Some(unit) => bandit.select_arm(&ctx, unit, context.as_ref()),
        None => bandit.compute_probs(&ctx, context.as_ref()),
    };

    let (decision, error, code) = match result {
        Ok(decision) => (decision, None, ExitCode::Ok),
        Err(SelectError {
            stage,
            partial,
            source,
        }) => {
            let message = format!("{stage} stage failed: {source}");
            let common: mab_common::Error = source.into();
            let code = ExitCode::from(&common);
            let error = ErrorOutput {
                code: common.code(),
                stage: Some(stage),
                message,
            };
            (partial, Some(error), code)
        }
    };

    if let Some(e) = &error {
        eprintln!("error: {}", e.message);
    }
    print_decision(
        args.format,
        &DecisionOutput {
            schema_version: SCHEMA_VERSION,
            unit,
            config_fingerprint: cfg.fingerprint(),
            decision: &decision,
            error,
        },
    )?;
    Ok(code)
}

fn run_bucket(resolved: &ResolvedConfig, args: &BucketArgs) -> Result<ExitCode, mab_common::Error> {
    let buckets = args.buckets.unwrap_or(resolved.config.sampler.buckets);
    let sampler = Sha1Sampler::with_buckets(buckets)?;
    let out = serde_json::json!({
        "unit": args.unit,
        "sha1": Sha1Sampler::digest_hex(&args.unit),
        "buckets": buckets,
        "bucket": sampler.bucket(&args.unit),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(ExitCode::Ok)
}

fn run_config(resolved: &ResolvedConfig, cmd: &ConfigCommand) -> Result<ExitCode, mab_common::Error> {
    match cmd {
        ConfigCommand::Show => {
            let out = serde_json::json!({
                "source": resolved.source.to_string(),
                "fingerprint": resolved.config.fingerprint(),
                "config": resolved.config,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        ConfigCommand::Validate => {
            // resolve_config rejects invalid files before we get here.
            println!(
                "ok: {} (fingerprint {})",
                resolved.source,
                resolved.config.fingerprint()
            );
        }
    }
    Ok(ExitCode::Ok)
}

fn run(cli: &Cli) -> Result<ExitCode, mab_common::Error> {
    let resolved = resolve_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Select(args) => run_decision(&resolved, &args.source, Some(&args.unit)),
        Commands::Probs(args) => run_decision(&resolved, args, None),
        Commands::Bucket(args) => run_bucket(&resolved, args),
        Commands::Config(cmd) => run_config(&resolved, cmd),
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed.
            let code = if e.use_stderr() {
                ExitCode::Usage
            } else {
                ExitCode::Ok
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    if let Err(e) = init_logging(cli.log_format, cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    };
    std::process::exit(code.as_i32());
}
