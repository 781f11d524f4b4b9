use anyhow::Context;
use clap::{Parser, ValueEnum};
use httpnorm::config::Config;
use httpnorm::{DocumentWriter, FeedHandle, FileFeed, LogFormat, Pipeline, StdinFeed};
use std::io::BufWriter;
use std::path::PathBuf;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "httpnorm",
    about = "Normalize a network monitor's HTTP log into store documents"
)]
struct Cli {
    /// Log files to read. Reads standard input when none are given.
    paths: Vec<PathBuf>,

    /// Input format. Detected from the first line when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Host substring to allow-list, added to the configured list. Repeatable.
    #[arg(long = "allow", value_name = "HOST")]
    allow: Vec<String>,

    /// Write allow-listed entries instead of dropping them.
    #[arg(long)]
    keep_allowed: bool,

    /// Configuration file (default: $XDG_CONFIG_HOME/httpnorm/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Tsv,
    Json,
}

impl From<FormatArg> for LogFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Tsv => LogFormat::Tsv,
            FormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    for host in cli.allow {
        config.filter.allow_list.push(host);
    }
    if cli.keep_allowed {
        config.filter.drop_allowed = false;
    }

    let format = cli.format.map(LogFormat::from);
    let feeds: Vec<Box<dyn FeedHandle>> = if cli.paths.is_empty() {
        let feed = format.map_or_else(StdinFeed::new, |f| StdinFeed::new().with_format(f));
        vec![Box::new(feed)]
    } else {
        cli.paths
            .into_iter()
            .map(|path| {
                let feed = FileFeed::new(path);
                let feed = match format {
                    Some(f) => feed.with_format(f),
                    None => feed,
                };
                Box::new(feed) as Box<dyn FeedHandle>
            })
            .collect()
    };

    let (tx, rx) = mpsc::channel(config.feed.channel_capacity.max(1));
    let handles: Vec<_> = feeds
        .into_iter()
        .map(|feed| {
            let name = feed.name().to_string();
            (name, feed.spawn(tx.clone()))
        })
        .collect();
    drop(tx);

    let pipeline = Pipeline::from_config(&config.filter);
    let mut writer = DocumentWriter::new(BufWriter::new(std::io::stdout().lock()));
    let stats = pipeline.run(rx, &mut writer).await?;

    let mut failed = 0;
    for (name, handle) in handles {
        if let Err(err) = handle.await.context("feed task panicked")? {
            tracing::error!(feed = %name, error = %err, "feed stopped");
            failed += 1;
        }
    }

    tracing::info!(
        read = stats.read,
        written = stats.written,
        dropped = stats.dropped,
        malformed = stats.malformed,
        "done"
    );
    if failed > 0 {
        anyhow::bail!("{failed} feed(s) stopped on an error");
    }
    Ok(())
}
