use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cpop_query::config::{self, Overrides};
use cpop_query::{run_queries, QueryReport, Session, SetupError, TokenBinding};

#[derive(Debug, Parser)]
#[command(
    name = "cpop-query",
    version,
    about = "Read the name, symbol and total supply of a CPOP token"
)]
struct Args {
    /// JSON-RPC endpoint: http(s)://, ws(s)://, or a path to a .ipc socket [env: RPC_URL]
    #[arg(long)]
    rpc: Option<String>,

    /// Token contract address [env: CPOP_TOKEN_ADDRESS]
    #[arg(long)]
    token: Option<String>,

    /// Block to query at: a number or latest/pending/earliest/safe/finalized
    #[arg(long)]
    block: Option<String>,

    /// Caller address for the read calls
    #[arg(long)]
    from: Option<String>,

    /// Config file (defaults to $CPOP_CONFIG or ~/.config/cpop-query/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            rpc: self.rpc.clone(),
            token: self.token.clone(),
            block: self.block.clone(),
            from: self.from.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging() {
        eprintln!("failed to initialise logging: {err:#}");
    }

    match run(&args).await {
        Ok(report) => {
            debug!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                "Query run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Setup failures come back as `Err` and end the process; query failures are
/// handled inside `run_queries` and only show up in the report.
async fn run(args: &Args) -> Result<QueryReport, SetupError> {
    let file = config::load(args.config.as_deref())?;
    let settings = config::resolve(&args.overrides(), |key| std::env::var(key).ok(), &file)?;

    let session = Session::open(settings.endpoint).await?;
    let token = TokenBinding::new(&session, settings.token);
    info!(address = %token.address(), chain_id = session.chain_id(), "Bound CPOP token contract");

    Ok(run_queries(&token, &settings.call).await)
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
