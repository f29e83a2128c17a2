use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use wordlit::acquire::{self, ReaderRegistry};
use wordlit::http::HttpServer;
use wordlit::{build_flowchart, list_entities, Config, RemoteAnnotator};

#[derive(Parser, Debug)]
#[command(name = "wordlit")]
#[command(about = "Turn natural-language text into a relation flowchart")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Read input from a file (txt, docx, or pdf)
    #[arg(long, conflicts_with_all = ["url", "text"])]
    file: Option<PathBuf>,

    /// Fetch input from a website URL
    #[arg(long, conflicts_with = "text")]
    url: Option<String>,

    /// Use the given text directly
    #[arg(long)]
    text: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract relations and print the flowchart as Graphviz DOT
    Graph(InputArgs),
    /// List named entities recognized in the input
    Entities(InputArgs),
    /// Run the HTTP API server
    Serve,
}

/// Resolve the input text from whichever source flag was given.
async fn resolve_input(args: &InputArgs, config: &Config) -> Result<String> {
    if let Some(path) = &args.file {
        let registry = ReaderRegistry::new();
        return Ok(registry.read_file(path)?);
    }
    if let Some(url) = &args.url {
        let client = acquire::build_fetch_client(&config.fetch);
        return Ok(acquire::fetch_url(&client, url).await?);
    }
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    anyhow::bail!("No input given: use --file, --url, or --text");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    match cli.command {
        Command::Graph(input) => {
            let text = resolve_input(&input, &config).await?;
            let annotator = RemoteAnnotator::new(&config.annotator);

            let flowchart = build_flowchart(&annotator, &text).await?;
            log::info!(
                "Extracted {} nodes, {} edges",
                flowchart.graph.node_count(),
                flowchart.graph.edge_count()
            );

            println!("{}", flowchart.graph.to_dot());
            println!("Processing Time: {:.2} seconds", flowchart.elapsed_seconds());
        }
        Command::Entities(input) => {
            let text = resolve_input(&input, &config).await?;
            let annotator = RemoteAnnotator::new(&config.annotator);

            let entities =
                list_entities(&annotator, &text, config.annotator.entity_window_chars).await?;

            if entities.is_empty() {
                println!("No entities found.");
            } else {
                for entity in &entities {
                    println!("{}\t{}", entity.text, entity.label);
                }
            }
        }
        Command::Serve => {
            log::info!("Starting Wordlit v{}", env!("CARGO_PKG_VERSION"));
            let port = config.http_server.port;
            let annotator = Arc::new(RemoteAnnotator::new(&config.annotator));
            let server = HttpServer::new(annotator, config);
            server.run(port).await?;
        }
    }

    Ok(())
}
