use ecg_screener::config::{load_config, ScreenToolConfig};
use ecg_screener::edges::detect_edges;
use ecg_screener::image::{write_json_file, Frame};
use ecg_screener::TraceFilter;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let image_path = args.next().ok_or_else(usage)?;
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => ScreenToolConfig::default(),
    };

    let frame = Frame::open(Path::new(&image_path)).map_err(|e| {
        format!("Failed to decode {image_path}: {e}")
    })?;

    let filter = TraceFilter::new(config.filter);
    let report = filter.screen(frame.gray());

    match &report.reject {
        None => println!(
            "{image_path}: plausible trace ({}x{}, density {:.4}, {} horizontal segments)",
            report.width,
            report.height,
            report.edge_density.unwrap_or(0.0),
            report.horizontal_segments.unwrap_or(0),
        ),
        Some(reason) => println!("{image_path}: rejected ({reason:?})"),
    }

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)
            .map_err(|e| format!("Failed to write report {}: {e}", path.display()))?;
        println!("Saved screen report to {}", path.display());
    }

    if let Some(path) = &config.output.edge_image {
        let edges = detect_edges(frame.gray(), &filter.options().canny);
        edges
            .to_luma8()
            .save(path)
            .map_err(|e| format!("Failed to save edge map {}: {e}", path.display()))?;
        println!("Saved edge map to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: screen <image> [config.json]".to_string()
}
