// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Meshedit CLI

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use meshedit::cli::{parse_vec3, MeshSummary, Reporter};
use meshedit::geometry::split_triangles;
use meshedit::{io, Editor, EditorConfig, IndexedMesh, Primitive, TriangleTransform};
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "meshedit")]
#[command(about = "Generate, inspect and edit triangle meshes stored as STL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./meshedit.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write binary STL instead of ASCII
    #[arg(long, global = true)]
    binary: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Output {
    /// Output STL file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Shape origin as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    origin: Option<Vector3<f32>>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a cube
    Cube {
        /// Edge length
        #[arg(short = 'L', long)]
        size: f32,
        #[command(flatten)]
        out: Output,
    },

    /// Generate a square pyramid
    Pyramid {
        /// Base edge length
        #[arg(long)]
        base: f32,
        /// Apex height
        #[arg(long)]
        height: f32,
        #[command(flatten)]
        out: Output,
    },

    /// Generate a capped cylinder
    Cylinder {
        #[arg(short = 'R', long)]
        radius: f32,
        #[arg(long)]
        height: f32,
        /// Number of sectors around the axis
        #[arg(long)]
        sectors: Option<u32>,
        #[command(flatten)]
        out: Output,
    },

    /// Generate a latitude/longitude sphere
    Sphere {
        #[arg(short = 'R', long)]
        radius: f32,
        /// Tessellation level
        #[arg(short = 'N', long)]
        level: Option<u32>,
        #[command(flatten)]
        out: Output,
    },

    /// Split every triangle of an STL in two
    Split {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show mesh statistics
    Info {
        input: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete faces and transform a triangle of an STL
    Edit {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        /// Face to delete (repeatable)
        #[arg(long = "delete", value_name = "FACE")]
        delete: Vec<usize>,
        /// Face to transform
        #[arg(long)]
        face: Option<usize>,
        /// Translation as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        translate: Option<Vector3<f32>>,
        /// Euler rotation in degrees as rx,ry,rz
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        rotate: Option<Vector3<f32>>,
        /// Scale factors as sx,sy,sz
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        scale: Option<Vector3<f32>>,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "meshedit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EditorConfig::load(cli.config.as_deref())?;
    config.binary_output |= cli.binary;
    let origin = |out: &Output| {
        out.origin
            .map(Point3::from)
            .unwrap_or_else(|| Point3::from(config.origin))
    };

    match cli.command {
        Commands::Cube { size, out } => {
            generate(&Primitive::cube(size, origin(&out)), &out.output, &config)
        }
        Commands::Pyramid { base, height, out } => generate(
            &Primitive::pyramid(base, height, origin(&out)),
            &out.output,
            &config,
        ),
        Commands::Cylinder {
            radius,
            height,
            sectors,
            out,
        } => generate(
            &Primitive::cylinder(
                radius,
                height,
                sectors.unwrap_or(config.cylinder_sectors),
                origin(&out),
            ),
            &out.output,
            &config,
        ),
        Commands::Sphere { radius, level, out } => generate(
            &Primitive::sphere(
                radius,
                level.unwrap_or(config.sphere_level),
                origin(&out),
            ),
            &out.output,
            &config,
        ),
        Commands::Split { input, output } => {
            let mesh = load(&input)?;
            let start = Instant::now();
            let split = split_triangles(&mesh)?;
            write(&split, &output, &config, start)
        }
        Commands::Info { input, json } => info_command(&input, json),
        Commands::Edit {
            input,
            output,
            delete,
            face,
            translate,
            rotate,
            scale,
        } => {
            let transform = TriangleTransform {
                translation: translate,
                rotation: rotate,
                scale,
            };
            edit_command(&input, &output, &delete, face, &transform, &config, cli.verbose)
        }
        Commands::Version => {
            println!("meshedit v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn generate(primitive: &Primitive, output: &Path, config: &EditorConfig) -> Result<()> {
    let start = Instant::now();
    let mesh = primitive.tessellate()?;
    write(&mesh, output, config, start)
}

fn load(input: &Path) -> Result<IndexedMesh> {
    io::load_stl(input).with_context(|| format!("Failed to read STL file: {}", input.display()))
}

fn write(mesh: &IndexedMesh, output: &Path, config: &EditorConfig, start: Instant) -> Result<()> {
    io::save_stl(output, mesh, config.binary_output, &config.solid_name)
        .with_context(|| format!("Failed to write STL file: {}", output.display()))?;
    Reporter::report_written(
        &output.display().to_string(),
        mesh.vertex_count(),
        mesh.face_count(),
        start.elapsed(),
    );
    Ok(())
}

fn info_command(input: &Path, json: bool) -> Result<()> {
    let mesh = load(input)?;
    let summary = MeshSummary::from_mesh(&mesh)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        Reporter::report_summary(&input.display().to_string(), &summary);
        if mesh.is_empty() {
            Reporter::report_warning("no facets found");
        }
    }
    Ok(())
}

fn edit_command(
    input: &Path,
    output: &Path,
    delete: &[usize],
    face: Option<usize>,
    transform: &TriangleTransform,
    config: &EditorConfig,
    verbose: bool,
) -> Result<()> {
    let start = Instant::now();
    let mut editor = Editor::new(&load(input)?)?;

    for &f in delete {
        if !editor.delete_face(f) {
            Reporter::report_warning(&format!("face {} does not exist or is already deleted", f));
        }
    }

    match face {
        Some(f) if !transform.is_identity() => {
            if !editor.transform_triangle(f, transform) {
                Reporter::report_warning(&format!("face {} cannot be transformed", f));
            }
        }
        Some(_) => Reporter::report_warning("--face given without --translate, --rotate or --scale"),
        None if !transform.is_identity() => {
            Reporter::report_warning("transform given without --face, ignoring")
        }
        None => {}
    }

    if verbose {
        Reporter::report_info(&format!("{} edits applied", editor.edit_count()));
    }

    write(&editor.get_vertices_faces(), output, config, start)
}
