//! Command-line front end: loads a CSV graph, runs Suurballe's algorithm
//! and reports the two paths, optionally drawing every stage.

pub mod cli;
pub mod loader;

use anyhow::{Context, bail};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use suurballe::{DisjointPaths, Weight, WeightedDigraph, WeightedPath, try_find_2disjoint_path};
use suurballe_view::SvgStageSink;

pub use cli::{Cli, View};

/// What a successful run prints.
#[derive(Debug, Serialize)]
pub struct Report {
    pub graph: PathBuf,
    pub start: String,
    pub end: String,
    pub first: WeightedPath<String>,
    pub second: WeightedPath<String>,
    pub total_cost: Weight,
    pub drawings: Vec<PathBuf>,
}

impl Report {
    fn new(cli: &Cli, paths: DisjointPaths<String>, drawings: Vec<PathBuf>) -> Self {
        Self {
            graph: cli.graph.clone(),
            start: cli.start.clone(),
            end: cli.end.clone(),
            total_cost: paths.total_cost(),
            first: paths.first,
            second: paths.second,
            drawings,
        }
    }

    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Disjoint paths from {} to {}", self.start, self.end)?;
        writeln!(out, "  P1: {} (cost {})", self.first.nodes.join(" -> "), self.first.cost())?;
        writeln!(out, "  P2: {} (cost {})", self.second.nodes.join(" -> "), self.second.cost())?;
        writeln!(out, "  Total cost: {}", self.total_cost)?;
        for drawing in &self.drawings {
            writeln!(out, "  Drawing: {}", drawing.display())?;
        }
        Ok(())
    }
}

/// Runs one query and writes the result to `out`. Finding no pair is an
/// error.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<Report> {
    let edges = loader::load_edges(&cli.graph)
        .with_context(|| format!("failed to load graph from {}", cli.graph.display()))?;
    let graph: WeightedDigraph<String> = edges.into_iter().collect();
    tracing::info!(
        "graph {}: {} nodes, {} edges",
        cli.graph.display(),
        graph.node_count(),
        graph.edge_count()
    );

    let mut sink = SvgStageSink::new(cli.view_dir(), cli.view.into()).with_terminals(&cli.start, &cli.end);
    let outcome = try_find_2disjoint_path(&graph, &cli.start, &cli.end, &mut sink);
    let drawings = sink
        .finish()
        .with_context(|| format!("failed to write drawings to {}", cli.view_dir().display()))?;

    let paths = match outcome {
        Ok(paths) => paths,
        Err(err) => bail!("no two disjoint paths from {} to {}: {}", cli.start, cli.end, err),
    };

    let report = Report::new(cli, paths, drawings);
    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(report)
}
