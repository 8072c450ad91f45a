//! Minimal SVG viewer with keyboard pan and zoom
#![deny(warnings)]

use std::{env, path::PathBuf, process};
use svgview::*;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use winit::event_loop::{ControlFlow, EventLoop};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    input_file: PathBuf,
    zoom: Scalar,
    mode: FitMode,
    bg: Rgb,
    verbose: bool,
    debug: bool,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            input_file: PathBuf::new(),
            zoom: 1.0,
            mode: FitMode::Fit,
            bg: DEFAULT_BG,
            verbose: false,
            debug: false,
        };
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap();
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-z" => {
                    let zoom = args.next().ok_or("-z requires argument")?;
                    let zoom: Scalar = zoom.parse()?;
                    if !zoom.is_finite() || zoom <= 0.0 {
                        return Err("zoom must be finite and positive".into());
                    }
                    result.zoom = zoom;
                }
                "-stretch" => {
                    result.mode = FitMode::Stretch;
                }
                "-bg" => {
                    let bg = args.next().ok_or("-bg requires color #rrggbb argument")?;
                    result.bg = bg.parse()?;
                }
                "-v" => {
                    result.verbose = true;
                }
                "-d" => {
                    result.debug = true;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = PathBuf::from(arg),
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Minimal SVG viewer with keyboard pan and zoom");
            eprintln!("\nUSAGE:");
            eprintln!(
                "    {} [-z <zoom>] [-stretch] [-bg <color>] [-v] [-d] <file.svg>",
                cmd
            );
            eprintln!("\nARGS:");
            eprintln!("    -z <zoom>    initial zoom multiplier (default: 1, the fitted size)");
            eprintln!("    -stretch     fill the window exactly instead of preserving aspect ratio");
            eprintln!(
                "    -bg <color>  background color in #rrggbb format (default: {})",
                DEFAULT_BG
            );
            eprintln!("    -v           verbose logging");
            eprintln!("    -d           debug logging, overrides -v (RUST_LOG overrides both)");
            eprintln!("    <file.svg>   SVG document to display");
            eprintln!("\nKEYS:");
            eprintln!("    arrows       pan");
            eprintln!("    a / z        zoom in / out");
            eprintln!("    m            toggle fit/stretch");
            eprintln!("    0            reset the view");
            eprintln!("    q, escape    quit");
            process::exit(1);
        }
        Ok(result)
    }
}

fn main() -> Result<(), Error> {
    let args = Args::parse()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if args.debug => EnvFilter::new("debug"),
        Err(_) if args.verbose => EnvFilter::new("info"),
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let document = tracing::debug_span!("[load]").in_scope(|| Document::open(&args.input_file))?;
    tracing::info!(
        "[document] {} ({}x{})",
        args.input_file.display(),
        document.width(),
        document.height()
    );

    let title = match args.input_file.file_name().and_then(|name| name.to_str()) {
        Some(name) => format!("svgview: {}", name),
        None => "svgview".to_string(),
    };
    // the viewport is sized from the window by the first resize event
    let view = View::new(Size::new(0, 0))
        .with_zoom(args.zoom)
        .with_mode(args.mode);
    let mut app = App::new(document, view, args.bg, title);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut app)?;

    Ok(())
}
