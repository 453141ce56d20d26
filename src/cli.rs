use crate::config::load_config;
use crate::hierarchy::build_hierarchy;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_payload;
use crate::render::{render_svg, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dtsvg",
    version,
    about = "Render a classifier decision tree to SVG"
)]
pub struct Args {
    /// Serialized payload (JSON object with branches, leaves, edges, highlights)
    #[arg(value_name = "PAYLOAD", conflicts_with = "input", required_unless_present = "input")]
    pub payload: Option<String>,

    /// Read the payload from a file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON or JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// PNG width; overrides the config file
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// PNG height; overrides the config file
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed layout as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    execute(&args)
}

fn execute(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    let raw = read_payload(args.payload.as_deref(), args.input.as_deref())?;

    let payload = parse_payload(&raw)?;
    let hierarchy = build_hierarchy(&payload)?;
    let layout = compute_layout(&hierarchy, &payload, &config.layout);
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &layout)?;
    }
    let svg = render_svg(&layout, &config.theme, &config.layout);

    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render)?;
        }
    }
    Ok(())
}

fn read_payload(payload: Option<&str>, input: Option<&Path>) -> Result<String> {
    if let Some(payload) = payload {
        return Ok(payload.to_string());
    }
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
