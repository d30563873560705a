//! Weft CLI - check, inspect and normalize scene description files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use interchange::Format;
use node::{Group, Node, Scene};
use std::path::{Path, PathBuf};
use weft_core::Vertices;

/// Weft CLI - work with scene description files
#[derive(Parser)]
#[command(name = "weft")]
#[command(about = "Command-line tools for Weft scene descriptions")]
struct Cli {
    /// Log decoding progress (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a scene file and report whether it is valid
    Check {
        /// Scene file to read
        file: PathBuf,
    },

    /// Print the canvas and an outline of the node tree
    Inspect {
        /// Scene file to read
        file: PathBuf,
    },

    /// Rewrite a scene file in canonical form
    Normalize {
        /// Scene file to read
        file: PathBuf,

        /// Where to write the result (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write everything on one line
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Inspect { file } => inspect(&file),
        Commands::Normalize {
            file,
            output,
            compact,
        } => normalize(&file, output.as_deref(), compact),
    }
}

fn init_logger(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn load(path: &Path) -> Result<Scene> {
    interchange::load_scene(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn check(path: &Path) -> Result<()> {
    let scene = load(path)?;
    println!("{}: ok, {} nodes", path.display(), scene.node_count());
    Ok(())
}

fn inspect(path: &Path) -> Result<()> {
    let scene = load(path)?;
    let canvas = &scene.canvas;
    println!(
        "Canvas {}x{} background {}",
        canvas.width(),
        canvas.height(),
        canvas.color.to_hex()
    );

    println!("{}", describe_group(&scene.top));
    scene.top.walk(&mut |node, depth| {
        println!("{}{}", "  ".repeat(depth), describe(node));
    });
    Ok(())
}

fn describe_group(group: &Group) -> String {
    let transformed = if group.transformation.is_some() {
        ", transformed"
    } else {
        ""
    };
    format!("Group ({} children{transformed})", group.children.len())
}

fn describe(node: &Node) -> String {
    match node {
        Node::Group(group) => describe_group(group),
        Node::Circle(circle) => format!(
            "Circle at ({}, {}) r={} {}",
            circle.center.x,
            circle.center.y,
            circle.radius,
            circle.color.to_hex()
        ),
        Node::ConvexPolygon(polygon) => {
            format!("ConvexPolygon ({} vertices)", polygon.vertices.len())
        }
        Node::LinePath(path) => format!("LinePath ({} vertices)", path.vertices.len()),
        Node::CubicHermitePath(path) => {
            format!("CubicHermitePath ({} vertices)", path.vertices.len())
        }
        Node::MicropolygonMesh(mesh) => match &mesh.vertices {
            Vertices::Grid(grid) => format!("MicropolygonMesh ({}x{} grid)", grid.rows(), grid.cols()),
            Vertices::List(list) => format!("MicropolygonMesh ({} vertices)", list.len()),
        },
        Node::Scene(_) => "Scene".to_string(),
    }
}

/// The output file's extension decides the format; stdout gets the input's.
fn output_format(input: &Path, output: Option<&Path>) -> Format {
    Format::from_path(output.unwrap_or(input))
}

fn normalize(path: &Path, output: Option<&Path>, compact: bool) -> Result<()> {
    let scene = load(path)?;
    let format = output_format(path, output);
    let text = interchange::scene_to_string(&scene, format, !compact)
        .context("Failed to encode scene")?;
    let text = text.trim_end();

    match output {
        Some(out) => {
            std::fs::write(out, format!("{text}\n"))
                .with_context(|| format!("Failed to write {}", out.display()))?;
            log::info!("wrote {}", out.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use node::{Circle, MicropolygonMesh};
    use weft_core::{Color, Transformation, Vertex, VertexGrid};

    #[test]
    fn test_describe_group() {
        let group = Group::new().with_child(Group::new());
        assert_eq!(describe_group(&group), "Group (1 children)");

        let group = group.with_transformation(Transformation::identity());
        assert_eq!(describe_group(&group), "Group (1 children, transformed)");
    }

    #[test]
    fn test_describe_primitives() {
        let circle = Circle::new(Vec4::new(3.0, 4.0, 0.0, 1.0), 2.0);
        assert_eq!(
            describe(&circle.into()),
            "Circle at (3, 4) r=2 #ffffffff"
        );

        let vertex = Vertex::new(Vec4::W, Color::BLACK);
        let grid = VertexGrid::new(2, 2, vec![vertex; 4]).unwrap();
        let mesh = MicropolygonMesh::new(Vertices::Grid(grid));
        assert_eq!(describe(&mesh.into()), "MicropolygonMesh (2x2 grid)");
    }

    #[test]
    fn test_output_format() {
        let input = Path::new("scene.yaml");
        assert_eq!(output_format(input, None), Format::Yaml);
        assert_eq!(output_format(input, Some(Path::new("out.json"))), Format::Json);
    }
}
