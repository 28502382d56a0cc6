use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "quadblit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON draw script and write the destination as PNG.
    Run(RunArgs),
    /// Draw one PNG onto another (or onto a blank canvas) with an affine placement.
    Draw(DrawArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Image binding `key=path.png`; relative paths resolve against the script directory.
    #[arg(long = "image", value_parser = parse_binding)]
    images: Vec<(String, PathBuf)>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Source PNG.
    #[arg(long)]
    src: PathBuf,

    /// Destination PNG to draw onto. A transparent canvas is used when absent.
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Canvas width when no destination is given (defaults to the source width).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height when no destination is given (defaults to the source height).
    #[arg(long)]
    height: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    offset_y: f64,

    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    zoom: f64,

    #[arg(long, default_value_t = 1.0)]
    alpha: f64,

    /// Rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotation: f64,

    /// Blend mode display name (e.g. "Multiply", "NOT IMPLICATION").
    #[arg(long, default_value = "Normal")]
    blend: String,

    /// Composite operator id (0-12).
    #[arg(long, default_value_t = 3)]
    composite: i64,

    #[arg(long, value_enum, default_value_t = ResampleChoice::Bilinear)]
    resample: ResampleChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResampleChoice {
    Nearest,
    Bilinear,
}

impl From<ResampleChoice> for quadblit::Resample {
    fn from(c: ResampleChoice) -> Self {
        match c {
            ResampleChoice::Nearest => Self::Nearest,
            ResampleChoice::Bilinear => Self::Bilinear,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Draw(args) => cmd_draw(args),
    }
}

fn parse_binding(s: &str) -> Result<(String, PathBuf), String> {
    let (key, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=path, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty image key in '{s}'"));
    }
    Ok((key.to_owned(), PathBuf::from(path)))
}

fn read_png(path: &Path) -> anyhow::Result<quadblit::Image> {
    let img = image::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .to_rgba8();
    Ok(quadblit::Image::from_rgba_image(&img))
}

fn write_png(path: &Path, img: &quadblit::Image) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.to_rgba_image()
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read script '{}'", args.in_path.display()))?;
    let script = quadblit::Script::from_json(&text).with_context(|| "parse script JSON")?;

    let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let mut images = BTreeMap::new();
    for (key, path) in &args.images {
        images.insert(key.clone(), read_png(&root.join(path))?);
    }
    // Keys without an explicit binding load `<key>.png` next to the script.
    for key in script.image_keys() {
        if !images.contains_key(key) {
            images.insert(key.to_owned(), read_png(&root.join(format!("{key}.png")))?);
        }
    }

    let mut engine = quadblit::Engine::new();
    let stats = script.run(&mut engine, &images)?;
    eprintln!(
        "visited {} pixels, wrote {}",
        stats.pixels_visited, stats.pixels_written
    );
    write_png(&args.out, engine.destination())
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let src = read_png(&args.src)?;
    let dest = match &args.dest {
        Some(path) => read_png(path)?,
        None => quadblit::Image::try_new(
            args.width.unwrap_or(src.width()),
            args.height.unwrap_or(src.height()),
        )
        .context("create canvas")?,
    };

    let mut engine = quadblit::Engine::new();
    engine.install_image(dest);
    engine.set_composite_mode_id(args.composite);
    engine.set_blend_mode_name(&args.blend);
    engine.set_resample_mode(args.resample.into());

    let params = quadblit::DrawParams::default()
        .with_offset(args.offset_x, args.offset_y)
        .with_zoom(args.zoom)
        .with_alpha(args.alpha)
        .with_rotation_deg(args.rotation);
    engine.draw(&src.view(), &params);
    write_png(&args.out, engine.destination())
}
