use std::cmp::Ordering;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use maven_version_resolver::artifact::Coordinate;
use maven_version_resolver::config::{self, Config};
use maven_version_resolver::logging::init_logging;
use maven_version_resolver::repository::{Cache, MavenRepository, Registry};
use maven_version_resolver::resolver::{ArtifactResolver, ResolvedArtifact};
use maven_version_resolver::version::{ParsedVersion, Token, compare, to_semantic};

#[derive(Parser)]
#[command(name = "mvr")]
#[command(version, about = "Maven-compatible version ordering and artifact resolution")]
struct Cli {
    /// Repository base URL, tried in the order given (replaces configured ones)
    #[arg(long = "repository", value_name = "URL", global = true)]
    repositories: Vec<String>,

    /// Always fetch version lists from the repositories
    #[arg(long, global = true)]
    no_cache: bool,

    /// Log filter, e.g. `debug` or `maven_version_resolver=trace`
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show how a version string is tokenized
    Parse { version: String },
    /// Compare two versions, printing `<`, `=` or `>`
    Compare { left: String, right: String },
    /// Resolve `group:name:version` (wildcards allowed) to a concrete version
    Resolve { coordinate: String },
    /// Latest published version of `group:name`
    Latest { artifact: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&config::log_path(), cli.log_level.as_deref(), cli.verbose)?;

    match &cli.command {
        Command::Parse { version } => print_parsed(&ParsedVersion::parse(version)?),
        Command::Compare { left, right } => {
            let ordering = compare(&ParsedVersion::parse(left)?, &ParsedVersion::parse(right)?);
            println!(
                "{}",
                match ordering {
                    Ordering::Less => "<",
                    Ordering::Equal => "=",
                    Ordering::Greater => ">",
                }
            );
        }
        Command::Resolve { coordinate } => {
            let coordinate = Coordinate::parse(coordinate)?;
            let resolver = build_resolver(&cli)?;
            let resolved = runtime()?.block_on(resolver.resolve(&coordinate))?;
            print_resolved(&resolved);
        }
        Command::Latest { artifact } => {
            let coordinate = Coordinate::parse(artifact)?;
            let resolver = build_resolver(&cli)?;
            let resolved = runtime()?.block_on(resolver.latest(&coordinate))?;
            print_resolved(&resolved);
        }
    }

    Ok(())
}

fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

fn build_resolver(cli: &Cli) -> anyhow::Result<ArtifactResolver> {
    let mut config = config::load_config()?.with_repositories(&cli.repositories);
    if cli.no_cache {
        config = config.without_cache();
    }

    let registries = config
        .repositories
        .enabled_urls()
        .into_iter()
        .map(|url| Arc::new(MavenRepository::new(url)) as Arc<dyn Registry>)
        .collect();
    let resolver = ArtifactResolver::new(registries);

    if !config.cache.enabled {
        return Ok(resolver);
    }

    std::fs::create_dir_all(config::data_dir())?;
    let cache = Cache::new(&config::db_path(), cache_interval(&config))?;
    Ok(resolver.with_storer(Arc::new(cache)))
}

fn cache_interval(config: &Config) -> i64 {
    config.cache.refresh_interval.max(0)
}

fn print_parsed(version: &ParsedVersion) {
    println!("canonical: {}", version.canonical());
    println!("semantic:  {}", to_semantic(version));
    println!("tokens:");
    for item in version.items() {
        print_token(item, 1);
    }
}

fn print_token(token: &Token, depth: usize) {
    let indent = "  ".repeat(depth);
    match token {
        Token::Integer(value) => println!("{}int {}", indent, value),
        Token::String(value) => println!("{}str {:?}", indent, value),
        Token::List(items) => {
            println!("{}list", indent);
            for item in items {
                print_token(item, depth + 1);
            }
        }
    }
}

fn print_resolved(resolved: &ResolvedArtifact) {
    println!("{}", resolved);
    if let Some(url) = resolved.url() {
        println!("{}", url);
    }
}
