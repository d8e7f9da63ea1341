use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use suurballe_view::ViewMode;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Finds two disjoint shortest paths with Suurballe's algorithm.", long_about = None)]
pub struct Cli {
    /// CSV edge list, one `tail,head,weight` per line
    pub graph: PathBuf,

    /// Start node
    #[clap(short, long)]
    pub start: String,

    /// End node
    #[clap(short, long)]
    pub end: String,

    /// Which algorithm stages to draw as SVG
    #[clap(long, value_enum, default_value_t = View::None)]
    pub view: View,

    /// Directory for the drawings; each graph gets a subdirectory named after its file
    #[clap(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Print the result as JSON
    #[clap(long)]
    pub json: bool,

    /// Only log errors.
    #[clap(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every stage
    All,
    /// Only the final pair of paths
    Final,
    None,
}

impl From<View> for ViewMode {
    fn from(view: View) -> Self {
        match view {
            View::All => ViewMode::All,
            View::Final => ViewMode::Final,
            View::None => ViewMode::None,
        }
    }
}

impl Cli {
    /// `<output>/<graph file stem>`
    pub fn view_dir(&self) -> PathBuf {
        let stem = self
            .graph
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "graph".to_string());
        self.output.join(stem)
    }
}
