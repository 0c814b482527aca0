/*
[INPUT]:  CLI arguments, YAML configuration file, private key from environment
[OUTPUT]: Response of one authenticated request, printed to stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the request flow
*/

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use siwe_fetch::{AuthContext, AuthOrchestrator, EvmWalletSigner, FetchClient, WalletSigner};
use siwe_fetch_cli::{FetchConfig, FileTokenStore};

#[derive(Parser, Debug)]
#[command(name = "siwe-fetch", version, about = "Fetch a SIWE-protected resource")]
struct Cli {
    /// Resource URL
    url: String,
    #[arg(long = "config", value_name = "PATH")]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    #[arg(short = 'X', long = "method", default_value = "GET")]
    method: String,
    /// Extra request header, `Name: value`
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    headers: Vec<String>,
    /// Request body
    #[arg(short = 'd', long = "data")]
    data: Option<String>,
    /// Ignore any persisted token
    #[arg(long = "fresh")]
    fresh: bool,
    #[arg(long = "dry-run")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let config = load_config(args.config_path.as_ref())?;
    let signer = EvmWalletSigner::new(&config.private_key()?).context("load signer")?;
    let store = FileTokenStore::new(config.token_path()?);
    info!(
        address = signer.address(),
        chain_id = config.chain_id,
        token_file = %store.path().display(),
        "configuration loaded"
    );

    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| anyhow!("invalid HTTP method {}", args.method))?;
    let headers = args
        .headers
        .iter()
        .map(|raw| parse_header(raw))
        .collect::<Result<Vec<_>>>()?;

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(ExitCode::SUCCESS);
    }

    let stored = if args.fresh {
        None
    } else {
        store.load_valid().unwrap_or_else(|err| {
            warn!(error = %err, "ignoring unreadable token file");
            None
        })
    };

    let client = FetchClient::with_config(config.client_config()).context("build http client")?;
    let orchestrator = AuthOrchestrator::new(client);

    let mut builder = orchestrator.client().http_client().request(method, &args.url);
    for (name, value) in headers {
        builder = builder.header(name, value);
    }
    if let Some(data) = args.data {
        builder = builder.body(data);
    }
    let request = builder.build().context("build request")?;

    let auth = AuthContext::new(&signer)
        .with_token(stored.as_ref().map(|token| token.access_token.as_str()))
        .with_token_sink(&store)
        .with_chain_id(config.chain_id);

    let response = orchestrator
        .fetch(request, &auth)
        .await
        .context("authenticated fetch")?;

    let status = response.status();
    info!(%status, "response received");
    let body = response.text().await.context("read response body")?;
    println!("{body}");

    if status.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("request failed with status {status}");
        Ok(ExitCode::FAILURE)
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<FetchConfig> {
    let Some(path) = path else {
        return Ok(FetchConfig::default());
    };
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    FetchConfig::from_file(path_str).context("load config")
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("header must look like `Name: value`, got {raw:?}");
    };
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .with_context(|| format!("invalid header name in {raw:?}"))?;
    let value = HeaderValue::from_str(value.trim())
        .with_context(|| format!("invalid header value in {raw:?}"))?;
    Ok((name, value))
}
