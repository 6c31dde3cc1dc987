//! Lynx CLI
//!
//! Lays out a single text element and prints its bounds and drawable rows.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lynx_fonts::FontdueMetrics;
use lynx_layout::{
    Bounds, Dimension, Document, EdgeInsets, Element, LayoutSpec, NodeId, Size, TextContent,
};
use lynx_text::{ApproximateMetrics, BreakMode, OverflowMode, TextAlignment, TextMetrics, TextStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Lynx: inspect how text is wrapped and cut inside a box
#[derive(Parser, Debug)]
#[command(name = "lynx")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Wrap text into a 120px wide box
    lynx --wrap --width 120px --height 40px 'The quick brown fox'

    # Clip instead of ellipsis, centered rows
    lynx --wrap --overflow clip --align center --width 50% 'Some long text'

    # Let the box grow to fit every row, measured with a real font
    lynx --wrap --auto-expand --font ./DejaVuSans.ttf 'Some long text'

    # Machine-readable output
    lynx --json --file notes.txt
"#)]
struct Cli {
    /// Text to lay out
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Read the text from a file instead
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Box width (dp, px, %, vw or vh)
    #[arg(long, default_value = "100%")]
    width: Dimension,

    /// Box height (dp, px, %, vw or vh)
    #[arg(long, default_value = "100%")]
    height: Dimension,

    /// Padding around the box on every side
    #[arg(long, value_name = "DIM")]
    padding: Option<Dimension>,

    /// Viewport width in pixels
    #[arg(long, default_value = "800")]
    viewport_width: f32,

    /// Viewport height in pixels
    #[arg(long, default_value = "600")]
    viewport_height: f32,

    /// Density-independent pixel scale
    #[arg(long, default_value = "1")]
    scale: f32,

    /// Wrap rows to the box width
    #[arg(long)]
    wrap: bool,

    /// Break policy: no-break, soft-break or hard-break
    #[arg(long, value_parser = BreakMode::parse, default_value = "soft-break")]
    break_mode: BreakMode,

    /// Height overflow policy: ellipsis, clip or overflow
    #[arg(long, value_parser = OverflowMode::parse, default_value = "ellipsis")]
    overflow: OverflowMode,

    /// Row alignment: left, center, right or justify
    #[arg(long, value_parser = TextAlignment::parse, default_value = "left")]
    align: TextAlignment,

    /// Row pitch as a multiple of the font size
    #[arg(long)]
    line_height: Option<f32>,

    /// Font size (dp, px, %, vw or vh)
    #[arg(long)]
    font_size: Option<Dimension>,

    /// Grow the box height to fit every row
    #[arg(long)]
    auto_expand: bool,

    /// Measure with this TrueType/OpenType font instead of fixed advances
    #[arg(long, value_name = "FILE")]
    font: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// A row as it would be drawn.
#[derive(Serialize)]
struct PlacedRow<'a> {
    x: f32,
    baseline: f32,
    width: f32,
    text: &'a str,
}

#[derive(Serialize)]
struct Report<'a> {
    viewport: Size,
    bounds: Bounds,
    font_size: f32,
    truncated: bool,
    rows: Vec<PlacedRow<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let text = load_text(&cli)?;
    let metrics = load_metrics(&cli)?;
    let (doc, id) = build_document(&cli, text, metrics)?;

    let report = report(&doc, id, cli.align)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Text from the positional argument or `--file`.
fn load_text(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref text) = cli.text {
        Ok(text.clone())
    } else if let Some(ref path) = cli.file {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("nothing to lay out: pass TEXT or --file")
    }
}

fn load_metrics(cli: &Cli) -> anyhow::Result<Box<dyn TextMetrics>> {
    match cli.font {
        Some(ref path) => {
            let metrics = FontdueMetrics::from_path(path)
                .with_context(|| format!("failed to load font {}", path.display()))?;
            Ok(Box::new(metrics))
        }
        None => Ok(Box::new(ApproximateMetrics)),
    }
}

/// Build a document holding one text element, optionally inside a padding
/// element, and return it with the text element's id.
fn build_document(
    cli: &Cli,
    text: String,
    metrics: Box<dyn TextMetrics>,
) -> anyhow::Result<(Document, NodeId)> {
    let mut style = TextStyle {
        word_wrap: cli.wrap,
        break_mode: cli.break_mode,
        overflow_mode: cli.overflow,
        alignment: cli.align,
        ..TextStyle::default()
    };
    if let Some(line_height) = cli.line_height {
        style.set_line_height(line_height);
    }

    let mut content = TextContent::new(text)
        .with_style(style)
        .with_auto_expand(cli.auto_expand);
    if let Some(font_size) = cli.font_size {
        content = content.with_font_size(font_size);
    }

    let viewport = Size::new(cli.viewport_width, cli.viewport_height);
    let mut doc = Document::new(viewport, metrics).with_content_scale(cli.scale);
    let root = doc.root();
    let parent = match cli.padding {
        Some(inset) => {
            let padding = doc.create_element(Element::padding(EdgeInsets::all(inset)));
            doc.append_child(root, padding)?;
            padding
        }
        None => root,
    };

    let id = doc.create_element(Element::text(
        LayoutSpec::fixed(cli.width, cli.height),
        content,
    ));
    doc.append_child(parent, id)?;
    Ok((doc, id))
}

fn report(doc: &Document, id: NodeId, align: TextAlignment) -> anyhow::Result<Report<'_>> {
    let bounds = doc
        .bounds(id)
        .with_context(|| format!("element {id:?} has no bounds"))?;
    let shaped = doc
        .shaped_text(id)
        .with_context(|| format!("element {id:?} was never shaped"))?;

    let rows = shaped
        .placements(bounds.x(), bounds.y(), bounds.width(), align)
        .map(|(x, baseline, row)| PlacedRow {
            x,
            baseline,
            width: row.width,
            text: &row.text,
        })
        .collect();

    Ok(Report {
        viewport: doc.viewport(),
        bounds,
        font_size: shaped.font_size,
        truncated: shaped.truncated,
        rows,
    })
}

fn print_report(report: &Report<'_>) {
    let Report {
        viewport, bounds, ..
    } = report;

    println!(
        "{}",
        format!(
            "=== Text Layout (viewport: {}x{}) ===",
            viewport.width, viewport.height
        )
        .bold()
    );
    println!(
        "bounds: x={:.1} y={:.1} w={:.1} h={:.1}",
        bounds.x(),
        bounds.y(),
        bounds.width(),
        bounds.height()
    );
    println!("font size: {:.1}", report.font_size);

    let summary = format!("{} row(s)", report.rows.len());
    if report.truncated {
        println!("{summary} {}", "(truncated)".yellow());
    } else {
        println!("{summary}");
    }
    println!();

    for row in &report.rows {
        println!(
            "  {} {:?} {}",
            format!("[x={:.1} y={:.1}]", row.x, row.baseline).dimmed(),
            row.text,
            format!("w={:.1}", row.width).dimmed()
        );
    }
}
