use crate::config::{Direction, load_config};
use crate::document::parse_document;
use crate::graph::build_graph;
use crate::layout::compute_layout;
use crate::page::{DataSource, render_page};
use crate::render::{render_svg, write_output_svg, write_output_text};
use crate::scene::{Scene, write_scene_json};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dgs", version, about = "Dataflow graph viewer: JSON documents to SVG/HTML/PNG")]
pub struct Args {
    /// Input document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for svg/html/json if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, layout, render, interaction overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Viewport height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Rank direction (TD/TB, BT, LR, RL)
    #[arg(short = 'd', long = "direction")]
    pub direction: Option<String>,

    /// Title of the generated HTML page
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Make the HTML page fetch scene JSON from this URL instead of
    /// embedding it
    #[arg(long = "data-url")]
    pub data_url: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Html,
    Json,
    #[cfg(feature = "png")]
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    run_with(args)
}

fn run_with(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    if let Some(token) = args.direction.as_deref() {
        config.layout.direction = Direction::from_token(token)
            .ok_or_else(|| anyhow::anyhow!("unknown direction `{token}` (TD/TB, BT, LR, RL)"))?;
    }

    let input = read_input(args.input.as_deref())?;
    let document = parse_document(&input)?;
    let graph = build_graph(&document, &config.theme, &config.interaction)?;
    let layout = compute_layout(&graph, &config.theme, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &graph, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Html => {
            let scene = Scene::from_layout(&layout, &graph, &config);
            let source = match args.data_url {
                Some(url) => DataSource::Remote(url),
                None => DataSource::Inline(scene),
            };
            let title = args.title.as_deref().unwrap_or("dagscope");
            let page = render_page(&source, &config, title)?;
            write_output_text(&page, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let scene = Scene::from_layout(&layout, &graph, &config);
            write_scene_json(&scene, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_svg(&layout, &graph, &config.theme, &config.render);
            let output = ensure_output(&args.output, "png")?;
            crate::render::write_output_png(&svg, &output, &config.render)?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
