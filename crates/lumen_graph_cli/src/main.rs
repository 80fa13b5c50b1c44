// SPDX-License-Identifier: MIT OR Apache-2.0
//! `lumen-graph` - headless tooling for saved `Lumen` graphs.
//!
//! Loads graph files with the built-in node registry and reports what the
//! editor would: records dropped on load and connection validation issues.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lumen_editor_graph::{
    validate, Graph, GraphState, LoadReport, NodeCategory, NodeRegistry, NodeType,
    ParsePortTypeError, PortType,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen-graph", version, about = "Inspect and validate Lumen event graphs")]
struct Cli {
    /// Log debug output from the graph library
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a graph and report dropped records and validation issues
    Validate {
        /// Graph file (.json or .ron)
        file: PathBuf,
    },
    /// List the nodes and connections of a graph
    Inspect {
        /// Graph file (.json or .ron)
        file: PathBuf,
    },
    /// List registered node types and their ports
    Types {
        /// Only show one category
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
        /// Only show types with a port of this data type
        /// (flow, number, string, boolean, any)
        #[arg(long, value_parser = parse_port_type)]
        port_type: Option<PortType>,
    },
    /// Load a graph and save it again, possibly in another format
    Convert {
        /// Source file
        input: PathBuf,
        /// Destination file; `.ron` selects RON, anything else JSON
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Event,
    Action,
    Data,
    ControlFlow,
}

fn parse_port_type(s: &str) -> Result<PortType, ParsePortTypeError> {
    s.parse()
}

impl From<CategoryArg> for NodeCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Event => NodeCategory::Event,
            CategoryArg::Action => NodeCategory::Action,
            CategoryArg::Data => NodeCategory::Data,
            CategoryArg::ControlFlow => NodeCategory::ControlFlow,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "lumen_editor_graph=debug,lumen_graph_cli=debug"
    } else {
        "lumen_editor_graph=info,lumen_graph_cli=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(false)` when the command ran but found problems.
fn run(command: Command) -> Result<bool> {
    let registry = NodeRegistry::with_builtins();
    match command {
        Command::Validate { file } => {
            let (graph, report) = load(&file, &registry)?;
            print_report(&report);
            let issues = validate(&graph);
            for issue in &issues {
                println!("{issue}");
            }
            println!(
                "{}: {} nodes, {} connections, {} issues",
                file.display(),
                graph.node_count(),
                graph.connection_count(),
                issues.len()
            );
            Ok(issues.is_empty() && report.is_complete())
        }
        Command::Inspect { file } => {
            let (graph, report) = load(&file, &registry)?;
            print_report(&report);
            print_graph(&graph);
            Ok(true)
        }
        Command::Types { category, port_type } => {
            let category = category.map(NodeCategory::from);
            for ty in registry.types().filter(|ty| {
                category.map_or(true, |c| ty.category == c)
                    && port_type.map_or(true, |p| has_port_type(ty, p))
            }) {
                println!("{} [{}] - {}", ty.type_name, ty.category, ty.description);
                for port in &ty.inputs {
                    println!("    in  {}: {} ({})", port.id, port.port_type, port.name);
                }
                for port in &ty.outputs {
                    println!("    out {}: {} ({})", port.id, port.port_type, port.name);
                }
            }
            Ok(true)
        }
        Command::Convert { input, output } => {
            let (graph, report) = load(&input, &registry)?;
            print_report(&report);
            graph
                .serialize()
                .save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!("Wrote {}", output.display());
            Ok(true)
        }
    }
}

fn has_port_type(ty: &NodeType, port_type: PortType) -> bool {
    ty.inputs
        .iter()
        .chain(&ty.outputs)
        .any(|port| port.port_type == port_type)
}

fn load(path: &Path, registry: &NodeRegistry) -> Result<(Graph, LoadReport)> {
    let state =
        GraphState::load(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_stem()
        .map_or_else(|| "Untitled".to_string(), |s| s.to_string_lossy().into_owned());
    let mut graph = Graph::new(name);
    let report = graph.deserialize(&state, registry);
    Ok((graph, report))
}

fn print_report(report: &LoadReport) {
    if report.is_complete() {
        return;
    }
    println!(
        "dropped {} nodes and {} connections while loading",
        report.nodes_dropped, report.connections_dropped
    );
    for type_name in &report.unknown_types {
        println!("unknown node type: {type_name}");
    }
}

fn print_graph(graph: &Graph) {
    println!(
        "{} ({} nodes, {} connections)",
        graph.name,
        graph.node_count(),
        graph.connection_count()
    );
    for node in graph.nodes() {
        let (x, y) = node.position();
        println!("  node {} {} at ({x}, {y})", node.id(), node.node_type());
    }
    for c in graph.connections() {
        println!(
            "  connection {}: {}.{} -> {}.{}",
            c.id(),
            c.from_node,
            c.from_port,
            c.to_node,
            c.to_port
        );
    }
}
