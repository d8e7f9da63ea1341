//! Edge lists stored as CSV, one `tail,head,weight` triple per line.

use std::fs;
use std::io;
use std::path::Path;
use suurballe::Weight;
use thiserror::Error;

pub type Edge = (String, String, Weight);

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: expected `tail,head,weight`, got {content:?}")]
    MalformedLine { line: usize, content: String },
    #[error("line {line}: weight {value:?} is not an integer")]
    InvalidWeight { line: usize, value: String },
    #[error("line {line}: negative weights are not supported")]
    NegativeWeight { line: usize },
}

pub fn load_edges(path: impl AsRef<Path>) -> Result<Vec<Edge>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let edges = parse_edges(&content)?;
    tracing::debug!("loaded {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

/// Blank lines and `#` comments are skipped. Line numbers in errors are
/// 1-based.
pub fn parse_edges(content: &str) -> Result<Vec<Edge>, LoadError> {
    let mut edges = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        let [tail, head, weight] = fields[..] else {
            return Err(LoadError::MalformedLine {
                line,
                content: raw.to_string(),
            });
        };
        if tail.is_empty() || head.is_empty() {
            return Err(LoadError::MalformedLine {
                line,
                content: raw.to_string(),
            });
        }

        let weight: Weight = weight.parse().map_err(|_| LoadError::InvalidWeight {
            line,
            value: weight.to_string(),
        })?;
        if weight < 0 {
            return Err(LoadError::NegativeWeight { line });
        }

        edges.push((tail.to_string(), head.to_string(), weight));
    }

    Ok(edges)
}
