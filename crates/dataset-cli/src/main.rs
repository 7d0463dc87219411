//! Domo Dataset CLI
//!
//! Command-line interface for listing, reading, uploading and creating Domo
//! datasets. Connection settings come from the `DOMO_*` environment variables.

use clap::{Parser, Subcommand};
use domo_dataset_client::config::{ENV_API_URL, ENV_PROXY_URL};
use domo_dataset_client::{ClientConfig, DatasetDescriptor, DomoClient, UpdateMethod};
use std::io::Read;
use tracing_subscriber::EnvFilter;

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "domo")]
#[command(version, about = "Domo dataset CLI", long_about = None)]
struct Cli {
    /// API base URL (overrides DOMO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Forward proxy URL (overrides DOMO_PROXY_URL)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Use this access token instead of requesting one
    #[arg(long, env = "DOMO_ACCESS_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request an access token and print it as JSON
    Token,

    /// List all datasets
    List {
        /// Print the raw JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Show detailed information
        #[arg(short = 'l', long)]
        long: bool,
    },

    /// Print the ids of datasets with the given name
    Ids {
        /// Exact dataset name
        name: String,
    },

    /// Download a dataset as CSV to stdout
    Get {
        /// Dataset id
        id: String,

        /// Include the header row
        #[arg(long)]
        header: bool,
    },

    /// Upload CSV rows from a file ("-" for stdin)
    Put {
        /// Dataset id
        id: String,

        /// CSV file
        file: String,

        /// Replace existing rows instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Create a dataset from a JSON descriptor file
    Create {
        /// File with {"name", "description", "schema": {"columns": [...]}}
        descriptor: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

async fn run(cli: Cli) -> CliResult {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Token => print_token(&client).await,
        Commands::List { json, long } => {
            let token = access_token(&client, cli.token).await?;
            list_datasets(&client, &token, json, long).await
        }
        Commands::Ids { name } => {
            let token = access_token(&client, cli.token).await?;
            for id in client.dataset_ids_by_name(&name, &token).await? {
                println!("{}", id);
            }
            Ok(())
        }
        Commands::Get { id, header } => {
            let token = access_token(&client, cli.token).await?;
            let csv = client.dataset_data(&token, &id, header).await?;
            print!("{}", csv);
            Ok(())
        }
        Commands::Put { id, file, replace } => {
            let token = access_token(&client, cli.token).await?;
            upload(&client, &token, &id, &file, replace).await
        }
        Commands::Create { descriptor } => {
            let token = access_token(&client, cli.token).await?;
            create_dataset(&client, &token, &descriptor).await
        }
    }
}

fn build_client(cli: &Cli) -> Result<DomoClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_lookup(|key| {
        let flag = match key {
            ENV_API_URL => cli.api_url.clone(),
            ENV_PROXY_URL => cli.proxy.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    })?;

    tracing::debug!(?config, "Using configuration");
    Ok(DomoClient::new(config)?)
}

async fn access_token(
    client: &DomoClient,
    explicit: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    match explicit.filter(|t| !t.is_empty()) {
        Some(token) => Ok(token),
        None => Ok(client.create_access_token().await?.access_token),
    }
}

async fn print_token(client: &DomoClient) -> CliResult {
    let token = client.create_access_token().await?;
    println!("{}", serde_json::to_string_pretty(&token)?);
    Ok(())
}

async fn list_datasets(client: &DomoClient, token: &str, json: bool, long: bool) -> CliResult {
    let datasets = client.list_datasets(token).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&datasets)?);
        return Ok(());
    }

    println!("Datasets:");
    println!();

    for dataset in &datasets {
        if long {
            println!("  Name: {}", dataset.name());
            println!("  Id: {}", dataset.id());
            if let Some(ref desc) = dataset.description {
                if !desc.is_empty() {
                    println!("  Description: {}", desc);
                }
            }
            if let Some(ref owner) = dataset.owner {
                println!("  Owner: {} ({})", owner.name, owner.id);
            }
            if let Some(rows) = dataset.row_count {
                println!("  Rows: {}", format_number(rows));
            }
            if let Some(columns) = dataset.column_count {
                println!("  Columns: {}", columns);
            }
            if let Some(updated) = dataset.updated_at {
                println!("  Last Updated: {}", updated);
            }
            println!();
        } else {
            print!("  {} ({})", dataset.name(), dataset.id());
            if let Some(rows) = dataset.row_count {
                print!(" [{} rows]", format_number(rows));
            }
            println!();
        }
    }

    println!();
    println!("{} dataset(s)", datasets.len());
    Ok(())
}

async fn upload(
    client: &DomoClient,
    token: &str,
    id: &str,
    file: &str,
    replace: bool,
) -> CliResult {
    let csv = if file == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(file)?
    };

    let method = UpdateMethod::from_replace(replace);
    let size = csv.len();
    client.add_data_to_dataset(id, csv, method, token).await?;
    println!("{} {} bytes to dataset {}", method, size, id);
    Ok(())
}

async fn create_dataset(client: &DomoClient, token: &str, path: &str) -> CliResult {
    let raw = std::fs::read_to_string(path)?;
    let descriptor: DatasetDescriptor = serde_json::from_str(&raw)?;

    let dataset = client.create_dataset(&descriptor, token).await?;
    println!("{}", serde_json::to_string_pretty(&dataset)?);
    Ok(())
}

fn format_number(n: i64) -> String {
    let negative = n.is_negative();
    let mut digits = n.unsigned_abs().to_string();
    let mut parts = Vec::new();

    while digits.len() > 3 {
        let chunk = digits.split_off(digits.len() - 3);
        parts.push(chunk);
    }
    parts.push(digits);
    parts.reverse();

    let mut formatted = parts.join(",");
    if negative {
        formatted.insert(0, '-');
    }
    formatted
}
