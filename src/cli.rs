use crate::config::load_config;
use crate::engine::RoutingEngine;
use crate::protocol::RoutingRequest;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_scene_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "wirepath",
    version,
    about = "Collision-free connector routing for diagram scenes"
)]
pub struct Args {
    /// Scene request file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (engine/render/theme settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let mut request = parse_request(&input)?;
    if !(request.grid_size > 0.0) {
        request.grid_size = config.engine.grid_size;
    }
    for connector in &mut request.connector_descriptors {
        if connector.curvature_px == 0.0 {
            connector.curvature_px = config.engine.curvature_px;
        }
    }

    let mut engine = RoutingEngine::new();
    let reply = engine.process_request(request.clone())?;

    match args.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&reply)?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        OutputFormat::Svg => {
            let svg = render_scene_svg(&request, &reply, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_scene_svg(&request, &reply, &config.theme, &config.render);
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render)?;
        }
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => {
            return Err(anyhow::anyhow!(
                "PNG output requires building with the 'png' feature"
            ));
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Strict JSON first, JSON5 fallback for hand-written scene files.
fn parse_request(input: &str) -> Result<RoutingRequest> {
    match serde_json::from_str::<RoutingRequest>(input) {
        Ok(request) => Ok(request),
        Err(json_err) => match json5::from_str::<RoutingRequest>(input) {
            Ok(request) => Ok(request),
            Err(_) => Err(json_err.into()),
        },
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_from_json5_with_comments() {
        let request = parse_request(
            r#"{
                // a bare scene
                gridSize: 12.0,
                connectorDescriptors: [],
                entityDescriptors: [],
            }"#,
        )
        .unwrap();
        assert_eq!(request.grid_size, 12.0);
    }

    #[test]
    fn invalid_request_reports_the_json_error() {
        assert!(parse_request("{").is_err());
    }
}
