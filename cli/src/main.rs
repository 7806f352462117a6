use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stl_oxide::prelude::*;

#[derive(Parser)]
#[command(name = "stl-cli")]
#[command(about = "A CLI tool for binary STL meshes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the corners of the mesh bounding box
    Bbox {
        /// Input STL file
        file: PathBuf,

        /// Print the bounding box as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the header comment and the triangle count
    Info {
        /// Input STL file
        file: PathBuf,
    },
    /// Write a uniformly scaled copy of a mesh
    Scale {
        /// Input STL file
        #[arg(short, long)]
        input: PathBuf,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,

        /// Scale factor applied to every vertex
        #[arg(short, long)]
        factor: f64,
    },
    /// Convert an OBJ file to binary STL
    Convert {
        /// Input OBJ file
        #[arg(short, long)]
        input: PathBuf,

        /// Output STL file
        #[arg(short, long)]
        output: PathBuf,

        /// Comment stored in the STL header
        #[arg(long, default_value = "converted by stl-cli")]
        comment: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("stl-cli: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Bbox { file, json } => print_bounding_box(&file, json),
        Command::Info { file } => print_info(&file),
        Command::Scale { input, output, factor } => scale(&input, &output, factor),
        Command::Convert { input, output, comment } => {
            convert_obj_to_stl(&input, &output, &comment)
        }
    }
}

fn print_bounding_box(path: &Path, json: bool) -> Result<()> {
    let mesh = stl_oxide::io::stl::load_stl(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let Some(bbox) = mesh.bounding_box() else {
        anyhow::bail!("{} has no faces", path.display());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&bbox)?);
    } else {
        let Vertex { x, y, z } = bbox.min;
        println!("min-corner ({:.6},{:.6},{:.6})", x, y, z);
        let Vertex { x, y, z } = bbox.max;
        println!("max-corner ({:.6},{:.6},{:.6})", x, y, z);
    }
    Ok(())
}

fn print_info(path: &Path) -> Result<()> {
    let mesh = stl_oxide::io::stl::load_stl(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let header = mesh.get_header();
    println!("comment: {}", header);
    println!("triangles: {}", header.triangle_count);
    Ok(())
}

fn scale(input: &Path, output: &Path, factor: f64) -> Result<()> {
    let mesh = stl_oxide::io::stl::load_stl(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    stl_oxide::io::stl::save_stl(output, &mesh.scale(factor))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

fn convert_obj_to_stl(input: &Path, output: &Path, comment: &str) -> Result<()> {
    let mesh = stl_oxide::io::obj::load_obj(input, comment)
        .with_context(|| format!("Failed to load OBJ file {}", input.display()))?;

    // The face count is patched in once every face has been written.
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut encoder = Encoder::open(
        BufWriter::new(file),
        comment,
        FaceCount::Deferred,
        encode::Config::default(),
    )?;
    encoder.write_faces(mesh.get_faces())?;
    encoder.close()
        .with_context(|| format!("Failed to finish {}", output.display()))?;

    tracing::info!(triangles = encoder.faces_written(), "converted {}", input.display());
    Ok(())
}
