use crate::svg::{SvgOptions, generate_svg};
use crate::types::{LayoutConfig, LayoutResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use suurballe::{NodeId, Snapshot, Stage, StageSink, WeightedDigraph};

/// Which stages get drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    All,
    Final,
    #[default]
    None,
}

impl ViewMode {
    pub fn includes(self, stage: Stage) -> bool {
        match self {
            ViewMode::All => true,
            ViewMode::Final => stage == Stage::FinalGraph,
            ViewMode::None => false,
        }
    }
}

/// Renders stage snapshots to SVG, one file per stage.
///
/// The main graph is laid out once; later snapshots reuse its node positions
/// and canvas so the pictures can be compared side by side. Nothing touches
/// the disk before [`SvgStageSink::finish`].
pub struct SvgStageSink {
    dir: PathBuf,
    mode: ViewMode,
    config: LayoutConfig,
    start: Option<String>,
    end: Option<String>,
    base: Option<LayoutResult>,
    rendered: Vec<(Stage, String)>,
}

impl SvgStageSink {
    pub fn new(dir: impl Into<PathBuf>, mode: ViewMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
            config: LayoutConfig::default(),
            start: None,
            end: None,
            base: None,
            rendered: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Highlights `start` and `end` in every picture.
    pub fn with_terminals(mut self, start: impl fmt::Display, end: impl fmt::Display) -> Self {
        self.start = Some(start.to_string());
        self.end = Some(end.to_string());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stages rendered so far.
    pub fn stages(&self) -> Vec<Stage> {
        self.rendered.iter().map(|(stage, _)| *stage).collect()
    }

    /// Writes `<dir>/<stage file stem>.svg` for every rendered stage and
    /// returns the paths in stage order.
    pub fn finish(self) -> io::Result<Vec<PathBuf>> {
        if self.rendered.is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.dir)?;
        let mut written = Vec::with_capacity(self.rendered.len());
        for (stage, svg) in self.rendered {
            let filename = self.dir.join(format!("{}.svg", stage.file_stem()));
            fs::write(&filename, svg)?;
            tracing::debug!("{} saved to {}", stage, filename.display());
            written.push(filename);
        }
        tracing::info!("{} SVG file(s) written to {}", written.len(), self.dir.display());
        Ok(written)
    }

    fn graph_layout<N: NodeId + fmt::Display>(&self, graph: &WeightedDigraph<N>) -> LayoutResult {
        let (nodes, edges, labels) = self.config.graph_parts(graph, true);
        let ids = nodes.into_iter().map(|node| node.id).collect();
        let edges = edges
            .into_iter()
            .zip(labels)
            .map(|((s, t), label)| (s, t, label))
            .collect();
        self.place(ids, edges)
    }

    fn path_layout<N: fmt::Display>(&self, path: &[N]) -> LayoutResult {
        let ids = path.iter().map(|node| node.to_string()).collect();
        let edges = (1..path.len()).map(|i| (i - 1, i, None)).collect();
        self.place(ids, edges)
    }

    fn place(&self, ids: Vec<String>, edges: Vec<(usize, usize, Option<String>)>) -> LayoutResult {
        self.config.arrange(self.base.as_ref(), ids, edges)
    }
}

impl<N: NodeId + fmt::Display> StageSink<N> for SvgStageSink {
    fn record(&mut self, stage: Stage, snapshot: Snapshot<'_, N>) {
        if self.mode == ViewMode::None {
            return;
        }

        if stage == Stage::MainGraph {
            if let Snapshot::Graph(graph) = snapshot {
                self.base = Some(self.config.layout_graph(graph));
            }
        }

        if !self.mode.includes(stage) {
            return;
        }

        let (result, show_weights) = match snapshot {
            Snapshot::Graph(graph) => (self.graph_layout(graph), true),
            Snapshot::Path(path) => (self.path_layout(path), false),
        };
        let options = SvgOptions {
            title: Some(stage.label().to_string()),
            start: self.start.clone(),
            end: self.end.clone(),
            show_weights,
        };
        self.rendered.push((stage, generate_svg(&result, &options)));
    }
}
