use adapter_route::config::RouteConfigSection;
use adapter_route::logic::{RouteFinder, RouteMode, RouteQuery};
use adapter_route::utils::RouteConfigLoader;
use clap::Parser;
use eyre::{Result, eyre};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adapter-route")]
#[command(about = "Find the adapters and pools that connect two tokens", long_about = None)]
struct Cli {
    /// Pool dataset (JSON list of adapter entries)
    #[arg(long, short = 'd')]
    data: Option<PathBuf>,

    /// TOML config file with a [route] section
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Token to convert from (address or symbol)
    #[arg(long = "token-in", short = 'i')]
    token_in: Option<String>,

    /// Token to convert to (address or symbol)
    #[arg(long = "token-out", short = 'o')]
    token_out: Option<String>,

    /// Maximum number of paths, 0 for all
    #[arg(short = 'k')]
    k: Option<usize>,

    /// Maximum number of hops
    #[arg(long = "max-depth", short = 'm')]
    max_depth: Option<usize>,

    /// Query mode (paths or union), defaults to union when k is 0 and to paths otherwise
    #[arg(long)]
    mode: Option<RouteMode>,

    /// Stop searching after this many expansions
    #[arg(long = "max-expansions")]
    max_expansions: Option<usize>,

    /// Print every token of the dataset and exit
    #[arg(long = "list-tokens")]
    list_tokens: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut section = match &cli.config {
        Some(config) => RouteConfigSection::load_section_from_file(config)?,
        None => RouteConfigSection::default(),
    };
    section.override_with(cli.max_depth, cli.k, cli.mode, cli.max_expansions);

    let dataset = cli.data.clone().or_else(|| section.dataset.clone()).ok_or_else(|| eyre!("no dataset given, use --data or set route.dataset"))?;
    let finder = RouteFinder::from_dataset_file(&dataset)?;

    if cli.list_tokens {
        let tokens = finder.list_tokens();
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        } else {
            for token in tokens {
                println!("{token}");
            }
        }
        return Ok(());
    }

    let query = RouteQuery::try_new(cli.token_in.as_deref(), cli.token_out.as_deref(), section.k, section.max_depth, section.mode)?
        .with_limits(section.limits());
    info!(token_in = %query.token_in, token_out = %query.token_out, mode = %query.mode, k = query.k, max_depth = query.max_depth, "Running query");

    let report = finder.run(&query)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}
