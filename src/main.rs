//! Race Track dump tool
//!
//! Generates the track for a seed and prints it as JSON, for checking that
//! a server render and the browser agree.
//!
//! Usage: `race-track <seed> [width] [height] [--svg] [--settings <file>]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use race_track::{Canvas, CornerScan, GeneratorSettings, Track, generate_with};
    use serde::Serialize;

    const USAGE: &str = "usage: race-track <seed> [width] [height] [--svg] [--settings <file>]";

    #[derive(Debug)]
    struct Args {
        seed: String,
        width: f64,
        height: f64,
        svg: bool,
        settings_path: Option<String>,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut positional = Vec::new();
        let mut svg = false;
        let mut settings_path = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--svg" => svg = true,
                "--settings" => {
                    settings_path = Some(args.next().ok_or("--settings needs a file path")?);
                }
                "-h" | "--help" => return Err(USAGE.to_string()),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let seed = positional.next().ok_or(USAGE)?;
        let mut dimension = |name: &str, default: f64| -> Result<f64, String> {
            match positional.next() {
                Some(v) => v.parse().map_err(|_| format!("{} must be a number, got {:?}", name, v)),
                None => Ok(default),
            }
        };
        let width = dimension("width", race_track::consts::OG_WIDTH)?;
        let height = dimension("height", race_track::consts::OG_HEIGHT)?;

        Ok(Args {
            seed,
            width,
            height,
            svg,
            settings_path,
        })
    }

    #[derive(Serialize)]
    struct Summary<'a> {
        seed: &'a str,
        width: f64,
        height: f64,
        control_points: usize,
        samples: usize,
        total_length: f64,
        bounds: [[f64; 2]; 2],
        start: [f64; 2],
        start_tangent: [f64; 2],
        corners: Vec<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        svg_path: Option<String>,
    }

    fn summarize<'a>(args: &'a Args, track: &Track) -> Summary<'a> {
        let (lo, hi) = track.bounds();
        Summary {
            seed: &args.seed,
            width: args.width,
            height: args.height,
            control_points: track.control_points(),
            samples: track.points().len(),
            total_length: track.total_length(),
            bounds: [lo.to_array(), hi.to_array()],
            start: track.point_at(0.0).to_array(),
            start_tangent: track.tangent_at(0.0).to_array(),
            corners: track
                .corners(&CornerScan::LABELS)
                .iter()
                .map(|c| c.t)
                .collect(),
            svg_path: args.svg.then(|| track.svg_path()),
        }
    }

    fn run() -> Result<(), String> {
        let args = parse_args(std::env::args().skip(1))?;
        log::debug!("{:?}", args);

        let canvas = Canvas::new(args.width, args.height).map_err(|e| e.to_string())?;
        let settings = match &args.settings_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {}: {}", path, e))?;
                GeneratorSettings::from_json(&json).map_err(|e| e.to_string())?
            }
            None => GeneratorSettings::default(),
        };

        let track = generate_with(&args.seed, &canvas, &settings);
        let json =
            serde_json::to_string_pretty(&summarize(&args, &track)).map_err(|e| e.to_string())?;
        println!("{}", json);
        Ok(())
    }

    pub fn main() -> ExitCode {
        env_logger::init();
        match run() {
            Ok(()) => ExitCode::SUCCESS,
            Err(msg) => {
                eprintln!("{}", msg);
                ExitCode::FAILURE
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is race_track::wasm::wasm_init, this is just to satisfy the compiler
}
