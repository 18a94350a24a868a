use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;
use arango_graph_client::common::utils::pretty_json;
use arango_graph_client::{
    ConnectionConfig, Document, DocumentRevision, Edge, FetchOptions, GraphCommand, GraphDescriptor,
    GraphHandler, HttpConnection, Policy, RemoveOptions, UpdateOptions,
};

/// Graph client for ArangoDB-style graph servers
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (TOML or JSON); ARANGO_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server endpoint, e.g. http://127.0.0.1:8529
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Database name
    #[arg(short, long)]
    database: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Graph management commands
    Graph(GraphArgs),
    /// Vertex commands
    Vertex(VertexArgs),
    /// Edge commands
    Edge(EdgeArgs),
    /// Start an interactive shell
    Shell,
}

#[derive(Args)]
struct GraphArgs {
    #[command(subcommand)]
    action: GraphAction,
}

#[derive(Subcommand)]
enum GraphAction {
    /// Create a graph
    Create {
        name: String,
        /// Vertex collection name
        vertices: String,
        /// Edge collection name
        edges: String,
    },
    /// Drop a graph and its collections
    Drop { name: String },
    /// Show graph properties
    Properties { name: String },
}

#[derive(Args)]
struct WriteFlags {
    /// Conflict policy: error or last
    #[arg(long)]
    policy: Option<Policy>,
    /// Wait until the change is synced to disk
    #[arg(long)]
    wait_for_sync: Option<bool>,
}

#[derive(Args)]
struct VertexArgs {
    /// Graph name
    #[arg(short, long)]
    graph: String,

    #[command(subcommand)]
    action: VertexAction,
}

#[derive(Subcommand)]
enum VertexAction {
    /// Save a new vertex
    Save {
        /// Vertex data as JSON
        data: String,
    },
    /// Fetch a vertex
    Get {
        id: String,
        /// Show _id, _key and _rev as attributes
        #[arg(long)]
        internals: bool,
    },
    /// Replace a vertex
    Replace {
        id: String,
        data: String,
        #[command(flatten)]
        flags: WriteFlags,
    },
    /// Partially update a vertex
    Update {
        id: String,
        data: String,
        #[command(flatten)]
        flags: WriteFlags,
        /// Keep null-valued attributes instead of removing them
        #[arg(long)]
        keep_null: Option<bool>,
    },
    /// Remove a vertex
    Remove {
        id: String,
        /// Only remove if the stored revision matches
        #[arg(long)]
        rev: Option<String>,
        #[command(flatten)]
        flags: WriteFlags,
    },
}

#[derive(Args)]
struct EdgeArgs {
    /// Graph name
    #[arg(short, long)]
    graph: String,

    #[command(subcommand)]
    action: EdgeAction,
}

#[derive(Subcommand)]
enum EdgeAction {
    /// Save a new edge
    Save {
        /// Source vertex ID (collection/key format)
        from: String,
        /// Target vertex ID (collection/key format)
        to: String,
        /// Edge data as JSON
        #[arg(default_value = "{}")]
        data: String,
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Fetch an edge
    Get {
        id: String,
        #[arg(long)]
        internals: bool,
    },
    /// Replace an edge
    Replace {
        id: String,
        data: String,
        #[arg(short, long)]
        label: Option<String>,
        #[command(flatten)]
        flags: WriteFlags,
    },
    /// Partially update an edge
    Update {
        id: String,
        data: String,
        #[arg(short, long)]
        label: Option<String>,
        #[command(flatten)]
        flags: WriteFlags,
        #[arg(long)]
        keep_null: Option<bool>,
    },
    /// Remove an edge
    Remove {
        id: String,
        #[arg(long)]
        rev: Option<String>,
        #[command(flatten)]
        flags: WriteFlags,
    },
}

impl WriteFlags {
    fn update_options(&self, keep_null: Option<bool>) -> UpdateOptions {
        UpdateOptions {
            policy: self.policy,
            wait_for_sync: self.wait_for_sync,
            keep_null,
        }
    }

    fn remove_options(&self) -> RemoveOptions {
        RemoveOptions {
            policy: self.policy,
            wait_for_sync: self.wait_for_sync,
        }
    }
}

fn parse_object(data: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(data).context("invalid JSON")? {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("data must be a JSON object"),
    }
}

fn fetch_options(internals: bool) -> FetchOptions {
    FetchOptions {
        include_internals: internals,
        ..FetchOptions::default()
    }
}

fn graph_command(action: GraphAction) -> anyhow::Result<GraphCommand> {
    Ok(match action {
        GraphAction::Create { name, vertices, edges } => {
            GraphCommand::CreateGraph(GraphDescriptor::new(name, vertices, edges)?)
        }
        GraphAction::Drop { name } => GraphCommand::DropGraph { graph: name },
        GraphAction::Properties { name } => GraphCommand::Properties { graph: name },
    })
}

fn vertex_command(args: VertexArgs) -> anyhow::Result<GraphCommand> {
    let graph = args.graph;
    Ok(match args.action {
        VertexAction::Save { data } => GraphCommand::SaveVertex {
            graph,
            vertex: Document::from_map(parse_object(&data)?)?,
        },
        VertexAction::Get { id, internals } => GraphCommand::GetVertex {
            graph,
            id,
            options: fetch_options(internals),
        },
        VertexAction::Replace { id, data, flags } => GraphCommand::ReplaceVertex {
            graph,
            id,
            vertex: Document::from_map(parse_object(&data)?)?,
            options: flags.update_options(None),
        },
        VertexAction::Update { id, data, flags, keep_null } => GraphCommand::UpdateVertex {
            graph,
            id,
            vertex: Document::from_map(parse_object(&data)?)?,
            options: flags.update_options(keep_null),
        },
        VertexAction::Remove { id, rev, flags } => GraphCommand::RemoveVertex {
            graph,
            id,
            revision: rev.map(DocumentRevision::new),
            options: flags.remove_options(),
        },
    })
}

fn edge_command(args: EdgeArgs) -> anyhow::Result<GraphCommand> {
    let graph = args.graph;
    Ok(match args.action {
        EdgeAction::Save { from, to, data, label } => GraphCommand::SaveEdge {
            graph,
            from,
            to,
            label,
            edge: Edge::from_map(parse_object(&data)?)?,
        },
        EdgeAction::Get { id, internals } => GraphCommand::GetEdge {
            graph,
            id,
            options: fetch_options(internals),
        },
        EdgeAction::Replace { id, data, label, flags } => GraphCommand::ReplaceEdge {
            graph,
            id,
            label,
            edge: Edge::from_map(parse_object(&data)?)?,
            options: flags.update_options(None),
        },
        EdgeAction::Update { id, data, label, flags, keep_null } => GraphCommand::UpdateEdge {
            graph,
            id,
            label,
            edge: Edge::from_map(parse_object(&data)?)?,
            options: flags.update_options(keep_null),
        },
        EdgeAction::Remove { id, rev, flags } => GraphCommand::RemoveEdge {
            graph,
            id,
            revision: rev.map(DocumentRevision::new),
            options: flags.remove_options(),
        },
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ConnectionConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(database) = cli.database {
        config = config.with_database(database);
    }
    let connection = HttpConnection::new(config).context("cannot set up connection")?;
    let handler = GraphHandler::new(Arc::new(connection));

    let command = match cli.command {
        Commands::Graph(args) => graph_command(args.action)?,
        Commands::Vertex(args) => vertex_command(args)?,
        Commands::Edge(args) => edge_command(args)?,
        Commands::Shell => return run_interactive_shell(&handler).await,
    };

    let output = command.execute(&handler).await?;
    println!("{}", pretty_json(&output)?);
    Ok(())
}

async fn run_interactive_shell(handler: &GraphHandler) -> anyhow::Result<()> {
    println!("Arango graph shell");
    println!("Type 'help' for available commands, 'exit' to quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("graph> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" => print_shell_help(),
            _ => {
                let result = match GraphCommand::parse(input) {
                    Ok(command) => command.execute(handler).await,
                    Err(e) => Err(e),
                };
                match result.and_then(|output| pretty_json(&output)) {
                    Ok(text) => println!("{}", text),
                    Err(e) => println!("Error: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn print_shell_help() {
    println!("Graphs:");
    println!("  createGraph <name> <vertices> <edges>");
    println!("  dropGraph <name>");
    println!("  properties <name>");
    println!("Vertices:");
    println!("  saveVertex <graph> <json>");
    println!("  getVertex <graph> <id> [{{\"includeInternals\": true}}]");
    println!("  replaceVertex <graph> <id> <json> [options]");
    println!("  updateVertex <graph> <id> <json> [options]");
    println!("  removeVertex <graph> <id> [{{\"rev\": \"...\", \"policy\": \"error\"}}]");
    println!("Edges:");
    println!("  saveEdge <graph> <from> <to> [label] [json]");
    println!("  getEdge <graph> <id> [fetch options]");
    println!("  replaceEdge <graph> <id> [label] <json> [options]");
    println!("  updateEdge <graph> <id> [label] <json> [options]");
    println!("  removeEdge <graph> <id> [options]");
    println!("Options: {{\"policy\": \"error\"|\"last\", \"waitForSync\": bool, \"keepNull\": bool}}, \"last\" or true");
}
