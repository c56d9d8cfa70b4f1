//! Example: extract one à trous detail band from a grayscale PNG.
//!
//! The input is loaded as 16-bit luma when the file carries more than 8 bits
//! per channel and as 8-bit luma otherwise. The detail band is written as a
//! PNG of the same depth, and a JSON summary is written next to it.
//!
//! Parameters for the integer pipeline may come from a JSON file
//! (`--params`), shaped like
//!   {"level": 2, "kernel": [1, 4, 6, 4, 1], "mode": "squared_magnitude"}
//! with any field optional. Flags given on the command line win.
//!
//! Run from the workspace root:
//!   cargo run -p atwt --features serde,tracing --example detail_band -- --help
//!   RUST_LOG=debug cargo run -p atwt --features serde,tracing --example detail_band -- \
//!       --input data/plane.png --level 3 --pipeline float

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use atwt::{
    DetailMode, Image, PlaneBuf, PlaneRef, TAPS, TransformParams, extract_frequency_plane,
    transform_plane,
};
use clap::{Parser, ValueEnum};
use image::{ImageBuffer, ImageReader, Luma};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Pipeline {
    /// User kernel, clamp border, 16-bit intermediates
    Int,
    /// B3 spline, reflect-101 border, f64 intermediates
    Float,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Centered,
    Squared,
}

impl From<ModeArg> for DetailMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Centered => DetailMode::SignedCentered,
            ModeArg::Squared => DetailMode::SquaredMagnitude,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Extract an a trous wavelet detail band from a grayscale PNG")]
struct Args {
    /// Path to the input PNG
    #[arg(long, default_value = "data/plane.png")]
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = Pipeline::Int)]
    pipeline: Pipeline,

    /// JSON file with integer pipeline parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Decomposition level (>= 1)
    #[arg(long)]
    level: Option<u32>,

    /// Detail display mode (integer pipeline only)
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Five comma-separated kernel weights (integer pipeline only)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    kernel: Option<Vec<i32>>,

    /// Output PNG path (default: <input stem>_detail.png next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Summary {
    input: String,
    output: String,
    pipeline: Pipeline,
    width: usize,
    height: usize,
    bits: u32,
    params: TransformParams,
    elapsed_ms: f64,
    min: u16,
    max: u16,
    mean: f64,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_params(args: &Args) -> Result<TransformParams> {
    let mut params = match &args.params {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing parameters from {}", path.display()))?
        }
        None => TransformParams::default(),
    };

    if let Some(level) = args.level {
        params.level = level;
    }
    if let Some(mode) = args.mode {
        params.mode = mode.into();
    }
    if let Some(kernel) = &args.kernel {
        let weights: [i32; TAPS] = kernel
            .as_slice()
            .try_into()
            .with_context(|| format!("--kernel needs {TAPS} weights, got {}", kernel.len()))?;
        params.kernel = Some(weights);
    }
    Ok(params)
}

fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_{suffix}"))
}

fn stats<T: Copy + Into<u16>>(data: &[T]) -> (u16, u16, f64) {
    let mut min = u16::MAX;
    let mut max = 0u16;
    let mut sum = 0u64;
    for &v in data {
        let v: u16 = v.into();
        min = min.min(v);
        max = max.max(v);
        sum += u64::from(v);
    }
    let mean = if data.is_empty() {
        0.0
    } else {
        sum as f64 / data.len() as f64
    };
    (min, max, mean)
}

fn save_plane(out: PlaneBuf, path: &Path) -> Result<()> {
    match out {
        PlaneBuf::U8(img) => {
            let buf = to_buffer::<u8>(img)?;
            buf.save(path)
        }
        PlaneBuf::U16(img) => {
            let buf = to_buffer::<u16>(img)?;
            buf.save(path)
        }
    }
    .with_context(|| format!("writing {}", path.display()))
}

fn to_buffer<T>(img: Image<T>) -> Result<ImageBuffer<Luma<T>, Vec<T>>>
where
    T: Copy,
    Luma<T>: image::Pixel<Subpixel = T>,
{
    let (w, h) = (u32::try_from(img.width())?, u32::try_from(img.height())?);
    ImageBuffer::from_raw(w, h, img.into_vec()).context("building output buffer")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let params = load_params(&args)?;

    let in_path = &args.input;
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| sibling_path(in_path, "detail.png"));
    let json_path = sibling_path(&out_path, "summary.json");

    let decoded = ImageReader::open(in_path)
        .with_context(|| format!("opening {}", in_path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", in_path.display()))?;
    let color = decoded.color();
    let wide = color.bytes_per_pixel() / color.channel_count() > 1;

    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    info!(
        path = %in_path.display(),
        width,
        height,
        bits = if wide { 16 } else { 8 },
        "loaded input"
    );

    let input8: Image<u8>;
    let input16: Image<u16>;
    let plane: PlaneRef<'_> = if wide {
        input16 = Image::from_vec(width, height, decoded.into_luma16().into_raw())
            .context("building input plane")?;
        input16.as_view().into()
    } else {
        input8 = Image::from_vec(width, height, decoded.into_luma8().into_raw())
            .context("building input plane")?;
        input8.as_view().into()
    };
    let bits = plane.format().bits;

    let t0 = Instant::now();
    let out = match args.pipeline {
        Pipeline::Int => transform_plane(&plane, &params),
        Pipeline::Float => extract_frequency_plane(&plane, params.level),
    }
    .with_context(|| format!("{:?} pipeline at level {}", args.pipeline, params.level))?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let (min, max, mean) = match &out {
        PlaneBuf::U8(img) => stats(img.data()),
        PlaneBuf::U16(img) => stats(img.data()),
    };
    info!(elapsed_ms, min, max, mean, "detail band computed");

    save_plane(out, &out_path)?;

    let summary = Summary {
        input: in_path.display().to_string(),
        output: out_path.display().to_string(),
        pipeline: args.pipeline,
        width,
        height,
        bits,
        params,
        elapsed_ms,
        min,
        max,
        mean,
    };
    let out_file = std::fs::File::create(&json_path)
        .with_context(|| format!("creating {}", json_path.display()))?;
    serde_json::to_writer_pretty(out_file, &summary)
        .with_context(|| format!("writing JSON to {}", json_path.display()))?;

    info!(png = %out_path.display(), json = %json_path.display(), "results written");
    Ok(())
}
