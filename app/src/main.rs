mod session;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use glob::glob;
use log::LevelFilter;

use pcv_exporter::{HtmlRenderer, PlyRenderer, Renderer};
use session::VisualizerSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RendererKind {
    /// Binary PLY for GPU point cloud viewers
    Ply,
    /// Standalone HTML document with a 3D scatter
    Html,
}

#[derive(Parser, Debug)]
#[command(
    name = "Point Viewer",
    about = "A tool for visualizing classified point cloud data",
    version = "0.0.1"
)]
struct Cli {
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    input: Vec<String>,

    #[arg(short, long, required = true, value_name = "FILE")]
    output: String,

    #[arg(short, long, value_enum, default_value_t = RendererKind::Ply)]
    renderer: RendererKind,
}

fn expand_globs(input_patterns: Vec<String>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in input_patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob(&pattern).expect("Failed to read glob pattern") {
                match entry {
                    Ok(path) => paths.push(path),
                    Err(e) => eprintln!("Error: {:?}", e),
                }
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }
    paths
}

fn main() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .init();

    let args = Cli::parse();

    log::info!("input files: {:?}", args.input);
    log::info!("output file: {}", args.output);
    log::info!("renderer: {:?}", args.renderer);

    let start = std::time::Instant::now();

    log::info!("start processing...");
    let input_files = expand_globs(args.input);
    log::info!("Expanded input files: {:?}", input_files);

    let output_path = PathBuf::from(args.output);

    let mut session = match VisualizerSession::new(input_files) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("start parsing...");
    let start_local = std::time::Instant::now();
    if let Err(e) = session.load() {
        log::error!("Failed to load point cloud: {}", e);
        std::process::exit(1);
    }
    log::info!("finish parsing in {:?}", start_local.elapsed());

    let cloud = session.cloud().unwrap();
    let volume = &cloud.metadata.bounding_volume;
    log::info!("loaded {} points", cloud.metadata.point_count);
    log::info!("x range: [{}, {}]", volume.min[0], volume.max[0]);
    log::info!("y range: [{}, {}]", volume.min[1], volume.max[1]);
    log::info!("z range: [{}, {}]", volume.min[2], volume.max[2]);

    log::info!("start colorizing...");
    let start_local = std::time::Instant::now();
    let (palette, _colors) = session.colorize().unwrap();

    let mut class_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for code in cloud.classifications() {
        *class_counts.entry(code).or_default() += 1;
    }
    for entry in palette.legend() {
        let count = class_counts.get(&entry.code).copied().unwrap_or(0);
        log::info!("Class {} ({}): {} points", entry.code, entry.label, count);
    }
    log::info!("finish colorizing in {:?}", start_local.elapsed());

    log::info!("start rendering...");
    let start_local = std::time::Instant::now();
    let renderer: Box<dyn Renderer> = match args.renderer {
        RendererKind::Ply => Box::new(PlyRenderer {
            output: output_path.clone(),
        }),
        RendererKind::Html => Box::new(HtmlRenderer {
            output: output_path.clone(),
        }),
    };
    if let Err(e) = session.visualize(renderer.as_ref()) {
        log::error!("Failed to render point cloud: {}", e);
        std::process::exit(1);
    }
    log::info!("finish rendering in {:?}", start_local.elapsed());
    log::info!("output written to: {:?}", output_path);

    log::info!("Elapsed: {:?}", start.elapsed());
    log::info!("Finish processing");
}
