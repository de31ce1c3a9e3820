use clap::{Parser, Subcommand, ValueEnum};
use genomic_search::{
    config::Config,
    elastic::{ElasticClient, Search},
    loader::LoaderOptions,
    mapping::{Dataset, GenomicFeatures, IndexManager, RsMerge, SnpMarkers},
    query::{ElasticQuery, Highlight, Query, Region},
};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "genomic-search")]
#[command(about = "Load and query genomic data in a document-index service", long_about = None)]
#[command(version)]
struct Cli {
    /// Index service URL (overrides configuration)
    #[arg(short, long, env = "GENOMIC_SEARCH_URL")]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum DatasetKind {
    /// dbSNP VCF markers
    Snp,
    /// dbSNP rs merge history
    RsMerge,
    /// GFF3 features
    Gff,
    /// GTF features
    Gtf,
}

impl DatasetKind {
    fn dataset(self) -> Box<dyn Dataset> {
        match self {
            DatasetKind::Snp => Box::new(SnpMarkers),
            DatasetKind::RsMerge => Box::new(RsMerge),
            DatasetKind::Gff => Box::new(GenomicFeatures::gff()),
            DatasetKind::Gtf => Box::new(GenomicFeatures::gtf()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an index schema and bulk load a file into it
    Index {
        #[arg(value_enum)]
        dataset: DatasetKind,

        #[arg(short, long)]
        file: PathBuf,

        /// Index name (default: the dataset name)
        #[arg(short, long)]
        index: Option<String>,

        #[arg(short, long)]
        delimiter: Option<String>,

        #[arg(short, long)]
        batch_size: Option<usize>,
    },

    /// Search an index
    Search {
        #[arg(short, long)]
        index: Option<String>,

        /// Query-string expression, e.g. `rs3733*`
        #[arg(short, long, conflicts_with = "region")]
        query: Option<String>,

        /// Region such as chr4:10000-10050
        #[arg(short, long)]
        region: Option<String>,

        /// Fields searched by --query and returned in results
        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,

        #[arg(short, long, default_value = "20")]
        size: usize,

        /// Highlight matches in the searched fields
        #[arg(long)]
        highlight: bool,
    },

    /// Count documents, optionally matching a query-string expression
    Count {
        #[arg(short, long)]
        index: Option<String>,

        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, value_delimiter = ',')]
        fields: Vec<String>,
    },

    /// Show an index mapping
    Mapping {
        #[arg(short, long)]
        index: Option<String>,

        /// Index type
        #[arg(short = 't', long)]
        mapping_type: Option<String>,
    },

    /// Check whether an index exists
    Exists {
        #[arg(value_name = "INDEX")]
        index: String,
    },
}

fn build_query(
    query: Option<String>,
    region: Option<String>,
    fields: &[String],
) -> Result<Option<ElasticQuery>, Box<dyn Error>> {
    if let Some(region) = region {
        let region: Region = region.parse()?;
        return Ok(Some(ElasticQuery::new(region.to_query())));
    }
    Ok(query.map(|q| ElasticQuery::new(Query::query_string(q, fields.iter().cloned()))))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });
    if let Some(url) = cli.url {
        config.elastic.url = url;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("genomic_search={}", config.observability.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.observability.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    let client = ElasticClient::from_config(&config.elastic)?;
    let default_index = config.elastic.default_index.clone();

    match cli.command {
        Commands::Index {
            dataset,
            file,
            index,
            delimiter,
            batch_size,
        } => {
            let mut options = LoaderOptions::new(file);
            options.index_name = index;
            options.delimiter = delimiter.unwrap_or(config.loader.delimiter);
            options.batch_size = batch_size.or(config.loader.batch_size);

            let stats = IndexManager::new(&client)
                .create_load_index(dataset.dataset().as_ref(), &options)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }

        Commands::Search {
            index,
            query,
            region,
            fields,
            size,
            highlight,
        } => {
            let mut query = build_query(query, region, &fields)?
                .unwrap_or_else(|| ElasticQuery::new(Query::match_all()));
            if !fields.is_empty() {
                query = query.sources(fields.iter().cloned());
                if highlight {
                    query = query.highlight(Highlight::fields(fields.iter().cloned()));
                }
            }

            let result = Search::new(&client, index.unwrap_or(default_index))
                .query(query)
                .size(size)
                .get_result()?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Count { index, query, fields } => {
            let mut search = Search::new(&client, index.unwrap_or(default_index));
            if let Some(query) = build_query(query, None, &fields)? {
                search = search.query(query);
            }
            let count = search.get_count()?;
            println!("{}", serde_json::to_string_pretty(&count)?);
        }

        Commands::Mapping { index, mapping_type } => {
            let mapping = Search::new(&client, index.unwrap_or(default_index))
                .get_mapping(mapping_type.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }

        Commands::Exists { index } => {
            let exists = Search::index_exists(&client, &index)?;
            println!("{}", exists);
            if !exists {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
