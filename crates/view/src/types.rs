use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: String,
    pub size: Size,
    pub position: Position, // top-left corner
}

impl Node {
    pub fn center(&self) -> Position {
        Position {
            x: self.position.x + self.size.width / 2.0,
            y: self.position.y + self.size.height / 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub path: Vec<Position>, // waypoints, border to border
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

/// Force-directed layout parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub iterations: usize,
    pub repulsion_strength: f64,
    pub attraction_strength: f64,
    pub min_spacing: f64,
    pub node_diameter: f64,
    /// Sideways offset applied to each of two antiparallel edges.
    pub edge_separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            repulsion_strength: 1000.0,
            attraction_strength: 0.1,
            min_spacing: 60.0,
            node_diameter: 40.0,
            edge_separation: 8.0,
        }
    }
}
