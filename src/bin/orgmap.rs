use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use orgmap::config::{ConfigLoader, ResolvedConfig};
use orgmap::domain::OrganismCode;
use orgmap::error::OrgmapError;
use orgmap::factory::OrganismFactory;
use orgmap::go::GoTaxonomyMapper;
use orgmap::kegg::KeggCodeMapper;
use orgmap::output::{ClearResult, ContigsResult, JsonOutput, OrganismReport};
use orgmap::rsat::{RsatClient, RsatHttpClient, RsatOrganismMapper, SpeciesInfoResolver};
use orgmap::store::Store;
use orgmap::table::DelimitedTable;

#[derive(Parser)]
#[command(name = "orgmap")]
#[command(about = "Resolve organism metadata from KEGG, RSAT and GO sources")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Resolve an organism code into a full organism record")]
    Resolve(ResolveArgs),
    #[command(about = "Cache the raw contig sequences for an organism")]
    Contigs(ContigsArgs),
    #[command(about = "Clear the local RSAT cache")]
    Clear,
}

#[derive(Args)]
struct ResolveArgs {
    code: String,

    #[arg(long)]
    rsat_url: Option<String>,
}

#[derive(Args)]
struct ContigsArgs {
    code: String,

    #[arg(long)]
    rsat_url: Option<String>,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(orgmap) = report.downcast_ref::<OrgmapError>() {
            return ExitCode::from(map_exit_code(orgmap));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &OrgmapError) -> u8 {
    match error {
        OrgmapError::OrganismNotFound(_) | OrgmapError::MissingConfig => 2,
        OrgmapError::RsatHttp(_) | OrgmapError::RsatStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve(args) => run_resolve(cli.config.as_deref(), args),
        Commands::Contigs(args) => run_contigs(cli.config.as_deref(), args),
        Commands::Clear => run_clear(cli.config.as_deref()),
    }
}

fn build_store(config: &ResolvedConfig) -> Result<Store, OrgmapError> {
    match &config.cache_dir {
        Some(dir) => Ok(Store::new_with_root(dir.clone())),
        None => Store::new(),
    }
}

fn run_resolve(config_path: Option<&str>, args: ResolveArgs) -> miette::Result<()> {
    let config = ConfigLoader::resolve(config_path)?;
    let code: OrganismCode = args.code.parse()?;

    let kegg_table = DelimitedTable::read(&config.kegg_taxonomy, '\t', true, Some("#"))?;
    let go_table = DelimitedTable::read(&config.proteome2taxid, '\t', false, None)?;

    let store = build_store(&config)?;
    let base_url = args.rsat_url.unwrap_or(config.rsat_base_url);
    let rsat_client = RsatHttpClient::new(base_url, store)?;

    let factory = OrganismFactory::new(
        KeggCodeMapper::new(&kegg_table),
        RsatOrganismMapper::new(rsat_client),
        GoTaxonomyMapper::new(&go_table),
    );
    let organism = factory.create(&code)?;
    JsonOutput::print_organism(&OrganismReport::from_organism(&organism)).into_diagnostic()?;
    Ok(())
}

fn run_contigs(config_path: Option<&str>, args: ContigsArgs) -> miette::Result<()> {
    let config = ConfigLoader::resolve(config_path)?;
    let code: OrganismCode = args.code.parse()?;

    let store = build_store(&config)?;
    let base_url = args.rsat_url.unwrap_or(config.rsat_base_url);
    let mapper = RsatOrganismMapper::new(RsatHttpClient::new(base_url, store)?);

    let info = mapper.resolve(&code)?;
    let mut cached = Vec::new();
    for contig in &info.contigs {
        let path = mapper.client().cache_contig_sequence(&code, contig)?;
        cached.push(path.to_string());
    }
    JsonOutput::print_contigs(&ContigsResult {
        code: code.as_str().to_string(),
        cached,
    })
    .into_diagnostic()?;
    Ok(())
}

fn run_clear(config_path: Option<&str>) -> miette::Result<()> {
    let store = match ConfigLoader::resolve(config_path) {
        Ok(config) => build_store(&config),
        Err(OrgmapError::MissingConfig) => Store::new(),
        Err(err) => Err(err),
    }?;
    store.clear()?;
    JsonOutput::print_clear(&ClearResult { cleared: true }).into_diagnostic()?;
    Ok(())
}
