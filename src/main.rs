//! Elbow Router CLI
//!
//! Usage:
//!   elbow-router [OPTIONS] [SCENE]
//!
//! Options:
//!   -a, --arrow <ID>      Route only the arrow with this id
//!   --svg                 Print the debug SVG overlay of the routed arrow
//!   --no-simplify         Keep collinear points in the output
//!   -c, --config <FILE>   Router configuration file (TOML format)
//!   -h, --help            Print help
//!
//! Set `RUST_LOG=elbow_router=debug` to see routing diagnostics on stderr.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use elbow_router::{
    route_elbow_arrow, route_elbow_arrow_with_observer, Arrow, Point, RouterConfig, SceneSnapshot,
    SvgDebugConfig, SvgRecorder,
};

#[derive(Parser)]
#[command(name = "elbow-router")]
#[command(about = "Route elbow arrows between the shapes of a TOML scene")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    scene: Option<PathBuf>,

    /// Route only the arrow with this id
    #[arg(short, long)]
    arrow: Option<String>,

    /// Print the debug SVG overlay of the routed arrow (the first one unless
    /// --arrow is given)
    #[arg(long)]
    svg: bool,

    /// Keep collinear points in the output
    #[arg(long)]
    no_simplify: bool,

    /// Router configuration file (TOML format); overrides the scene's
    /// [router] table
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Read scene
    let source = match &cli.scene {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading scene '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let scene = match SceneSnapshot::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // An explicit config file wins over the scene's own settings
    let mut config = match &cli.config {
        Some(path) => match RouterConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => scene.router.clone().unwrap_or_default(),
    };
    if cli.no_simplify {
        config = config.with_simplify(false);
    }

    let arrows: Vec<&Arrow> = match &cli.arrow {
        Some(id) => match scene.arrow(id) {
            Ok(arrow) => vec![arrow],
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => scene.arrows().iter().collect(),
    };

    if cli.svg {
        let Some(arrow) = arrows.first() else {
            eprintln!("Error: scene has no arrows");
            std::process::exit(1);
        };
        let mut recorder = SvgRecorder::new();
        let route = route_elbow_arrow_with_observer(arrow, Some(&scene), &config, &mut recorder);
        let world: Vec<Point> = route.iter().map(|&p| arrow.to_world(p)).collect();
        recorder.set_route(&world);
        print!("{}", recorder.to_svg(&SvgDebugConfig::default()));
        return;
    }

    for arrow in arrows {
        let route = route_elbow_arrow(arrow, Some(&scene), &config);
        println!("{}: {}", arrow.id, format_route(&route));
    }
}

fn format_route(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
