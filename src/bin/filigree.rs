use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "filigree", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of the sketch as a PNG.
    Frame(FrameArgs),
    /// Print the FR-121 preset parameter JSON to stdout.
    Params,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Sketch parameter JSON (defaults to the FR-121 preset).
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Draw node boundary/center guides on top of the sketch.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Params => cmd_params(),
    }
}

fn read_params_json(path: &Path) -> anyhow::Result<filigree::SketchParams> {
    let f = File::open(path).with_context(|| format!("open params '{}'", path.display()))?;
    let r = BufReader::new(f);
    let params: filigree::SketchParams =
        serde_json::from_reader(r).with_context(|| "parse params JSON")?;
    Ok(params)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut params = match &args.params {
        Some(path) => read_params_json(path)?,
        None => filigree::SketchParams::fr121(),
    };
    if args.debug {
        params.lines.debug_overlay = true;
    }

    let mut surface = filigree::PixelSurface::new(args.width, args.height)?;
    filigree::render_frame(&mut surface, &params)?;
    let frame = surface.into_frame();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_params() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&filigree::SketchParams::fr121())?;
    println!("{json}");
    Ok(())
}
