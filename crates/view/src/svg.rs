use crate::types::*;
use std::fs;
use std::io;
use std::path::Path;

/// What to draw on top of a [`LayoutResult`].
#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    pub title: Option<String>,
    /// Id of the node drawn as the start terminal.
    pub start: Option<String>,
    /// Id of the node drawn as the end terminal.
    pub end: Option<String>,
    pub show_weights: bool,
}

const TITLE_HEIGHT: f64 = 30.0;

pub fn generate_svg(result: &LayoutResult, options: &SvgOptions) -> String {
    let top = if options.title.is_some() { TITLE_HEIGHT } else { 0.0 };

    let mut svg = format!(
        r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">
<defs>
<marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">
<path d="M 0 0 L 10 5 L 0 10 z" fill="black"/>
</marker>
</defs>
<rect width="100%" height="100%" fill="white"/>
"#,
        result.canvas_width,
        result.canvas_height + top
    );

    if let Some(title) = &options.title {
        svg.push_str(&format!(
            r#"<text x="{}" y="20" font-family="Arial" font-size="16" text-anchor="middle">{}</text>
"#,
            result.canvas_width / 2.0,
            escape(title)
        ));
    }

    svg.push_str(&format!(
        r#"<g transform="translate(0,{})">
"#,
        top
    ));

    for edge in &result.edges {
        if edge.path.len() < 2 {
            continue;
        }

        let points: Vec<String> = edge.path.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
        svg.push_str(&format!(
            r#"<polyline points="{}" fill="none" stroke="black" stroke-width="1.5" marker-end="url(#arrow)"/>
"#,
            points.join(" ")
        ));

        if let (true, Some(label)) = (options.show_weights, &edge.label) {
            let mid = label_anchor(&edge.path);
            svg.push_str(&format!(
                r#"<text x="{}" y="{}" font-family="Arial" font-size="11" fill="darkred" text-anchor="middle">{}</text>
"#,
                mid.x,
                mid.y - 4.0,
                escape(label)
            ));
        }
    }

    for node in &result.nodes {
        let center = node.center();
        let radius = node.size.width / 2.0;
        let ring = if options.start.as_deref() == Some(node.id.as_str()) {
            Some("green")
        } else if options.end.as_deref() == Some(node.id.as_str()) {
            Some("orange")
        } else {
            None
        };

        if let Some(color) = ring {
            svg.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="3"/>
"#,
                center.x,
                center.y,
                radius + 5.0,
                color
            ));
        }

        svg.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="black"/>
<text x="{}" y="{}" font-family="Arial" font-size="12" text-anchor="middle">{}</text>
"#,
            center.x,
            center.y,
            radius,
            ring.unwrap_or("lightblue"),
            center.x,
            center.y + 4.0,
            escape(&node.id)
        ));
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

pub fn write_svg(result: &LayoutResult, options: &SvgOptions, filename: &Path) -> io::Result<()> {
    fs::write(filename, generate_svg(result, options))?;
    tracing::debug!("SVG saved to {}", filename.display());
    Ok(())
}

/// Midpoint of the middle segment.
fn label_anchor(path: &[Position]) -> Position {
    let i = (path.len() - 1) / 2;
    Position {
        x: (path[i].x + path[i + 1].x) / 2.0,
        y: (path[i].y + path[i + 1].y) / 2.0,
    }
}

/// Escapes text content. Never used inside attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
