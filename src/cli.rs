use anyhow::Result;
use beachfront::algorithm::AlgorithmClient;
use beachfront::catalog::CatalogClient;
use beachfront::coastline::CoastlineClient;
use beachfront::config::Config;
use beachfront::job::JobClient;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "beachfront", version, about = "access the Beachfront services")]
pub struct Cli {
    /// Credentials file [default: ~/.beachfrontrc]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log more detail to stderr (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// access catalog (imagery feed) services
    #[command(visible_alias = "cat")]
    Catalog(CatalogArgs),

    /// access job services
    Job(JobArgs),

    /// access coastline data
    #[command(visible_alias = "coast")]
    Coastline(CoastlineArgs),

    /// access the algorithm services
    #[command(visible_alias = "alg")]
    Algorithm(AlgorithmArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["info", "download"])))]
pub struct CatalogArgs {
    /// get information about a scene, a catalog, or all catalogs
    #[arg(short, long)]
    pub info: bool,

    /// download a scene from a catalog
    #[arg(short, long, requires = "id")]
    pub download: bool,

    /// `<catalog>:<scene>` for a scene, otherwise a catalog name
    pub id: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["info", "submit", "delete"])))]
pub struct JobArgs {
    /// get information about a job or all jobs
    #[arg(short, long)]
    pub info: bool,

    /// submit a new job for execution
    #[arg(short, long)]
    pub submit: bool,

    /// delete a job
    #[arg(short, long, requires = "id")]
    pub delete: bool,

    pub id: Option<String>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["download"])))]
pub struct CoastlineArgs {
    /// download the geojson coastline file
    #[arg(short, long)]
    pub download: bool,

    /// Id of the job that produced the coastline
    pub id: String,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("mode").required(true).args(["info"])))]
pub struct AlgorithmArgs {
    /// get information about an algorithm or all algorithms
    #[arg(short, long)]
    pub info: bool,

    pub id: Option<String>,
}

pub async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    match cli.command {
        Command::Catalog(args) => run_catalog(&config_path, args).await,
        Command::Job(args) => run_job(&config_path, args).await,
        Command::Coastline(args) => run_coastline(&config_path, args).await,
        Command::Algorithm(args) => run_algorithm(&config_path, args).await,
    }
}

async fn run_catalog(config_path: &Path, args: CatalogArgs) -> Result<()> {
    let client = CatalogClient::load(config_path)?;

    if args.download {
        let id = args.id.unwrap_or_default();
        let files = client.download_scene(&id, Path::new(".")).await?;
        for (name, size) in files {
            println!("{}: {} bytes", name, size);
        }
        return Ok(());
    }

    let body = match args.id.as_deref() {
        None => client.info_for_catalogs().await?,
        Some(id) if id.contains(':') => client.info_for_scene(id).await?,
        Some(name) => client.info_for_catalog(name).await?,
    };
    print!("{}", body);
    Ok(())
}

async fn run_job(config_path: &Path, args: JobArgs) -> Result<()> {
    let client = JobClient::load(config_path)?;

    if args.submit {
        client.submit().await?;
    } else if args.delete {
        client.delete(&args.id.unwrap_or_default()).await?;
    } else {
        let body = match args.id.as_deref() {
            None => client.info_for_jobs().await?,
            Some(id) => client.info_for_job(id).await?,
        };
        print!("{}", body);
    }
    Ok(())
}

async fn run_coastline(config_path: &Path, args: CoastlineArgs) -> Result<()> {
    let client = CoastlineClient::load(config_path)?;
    let written = client.download(&args.id, Path::new(".")).await?;
    println!("Wrote {} bytes of geojson", written);
    Ok(())
}

async fn run_algorithm(config_path: &Path, args: AlgorithmArgs) -> Result<()> {
    let client = AlgorithmClient::load(config_path)?;
    match args.id.as_deref() {
        None => {
            for algorithm in client.info_for_all().await? {
                println!("{}", algorithm);
            }
        }
        Some(id) => println!("{}", client.info_for_one(id).await?),
    }
    Ok(())
}
