use std::time::{Duration, Instant};

use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    src_size: u32,
    warmup: u32,
    repeats: u32,
    draws: u32,
    resample: quadblit::Resample,
    blend: String,
    composite: i64,
    zoom: f64,
    rotation: f64,
    json: bool,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    clear: Duration,
    affine_total: Duration,
    perspective_total: Duration,
    wall_total: Duration,
    pixels_written: u64,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.width == 0 || args.height == 0 || args.src_size == 0 {
        anyhow::bail!("--width/--height/--src-size must be > 0");
    }
    if args.draws == 0 {
        anyhow::bail!("--draws must be >= 1");
    }

    let src = checkerboard(args.src_size);

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for _ in 0..args.warmup {
            let _ = run_once(&args, &src)?;
        }
    }

    eprintln!(
        "bench: {repeats} run(s) ({profile} build), dest={w}x{h}, src={s}x{s}, draws/run={draws}, resample={resample:?}, blend={blend}, composite={composite}",
        repeats = args.repeats,
        profile = if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        w = args.width,
        h = args.height,
        s = args.src_size,
        draws = args.draws,
        resample = args.resample,
        blend = args.blend,
        composite = args.composite,
    );

    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    let mut digest: Option<String> = None;
    for i in 0..args.repeats {
        let (metrics, out) = run_once(&args, &src)?;
        let sha = sha256_hex(&out.to_bgra_bytes());
        match &digest {
            None => {
                eprintln!("output sha256: {sha}");
                digest = Some(sha);
            }
            Some(first) if *first != sha => {
                anyhow::bail!("run {i} produced a different image ({sha} != {first})");
            }
            Some(_) => {}
        }
        runs.push(metrics);
    }

    report_percentiles(&runs);
    if args.json {
        print_json(&args, &runs, digest.as_deref().unwrap_or_default());
    }
    Ok(())
}

fn checkerboard(size: u32) -> quadblit::Image {
    let mut img = quadblit::Image::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / 8) + (y / 8)) % 2 == 0;
            let px = if on {
                quadblit::Bgra8::new((x % 256) as u8, (y % 256) as u8, 200, 255)
            } else {
                quadblit::Bgra8::new(30, 60, 90, 160)
            };
            img.set_pixel(x, y, px);
        }
    }
    img
}

fn run_once(
    args: &BenchArgs,
    src: &quadblit::Image,
) -> anyhow::Result<(RunMetrics, quadblit::Image)> {
    let wall = Instant::now();
    let mut m = RunMetrics::default();

    let mut engine = quadblit::Engine::with_opts(
        quadblit::EngineOpts::default().with_resample(args.resample),
    );
    engine.set_blend_mode_name(&args.blend);
    engine.set_composite_mode_id(args.composite);

    let t0 = Instant::now();
    engine.clear_to(args.width, args.height);
    engine
        .destination_mut()
        .fill(quadblit::Bgra8::opaque(18, 20, 28));
    m.clear = t0.elapsed();

    let view = src.view();
    let t0 = Instant::now();
    for i in 0..args.draws {
        let step = f64::from(i) / f64::from(args.draws);
        let params = quadblit::DrawParams::default()
            .with_offset(
                (step - 0.5) * f64::from(args.width) * 0.5,
                (0.5 - step) * f64::from(args.height) * 0.5,
            )
            .with_zoom(args.zoom)
            .with_alpha(0.8)
            .with_rotation_deg(args.rotation + 360.0 * step);
        m.pixels_written += engine.draw(&view, &params).pixels_written;
    }
    m.affine_total = t0.elapsed();

    let (hw, hh) = (f64::from(args.width) * 0.4, f64::from(args.height) * 0.4);
    let s = f64::from(args.src_size);
    let xy = quadblit::Quad::new([
        quadblit::Point::new(-hw * 0.6, -hh),
        quadblit::Point::new(hw * 0.6, -hh),
        quadblit::Point::new(hw, hh),
        quadblit::Point::new(-hw, hh),
    ]);
    let uv = quadblit::Quad::new([
        quadblit::Point::new(0.0, 0.0),
        quadblit::Point::new(s, 0.0),
        quadblit::Point::new(s, s),
        quadblit::Point::new(0.0, s),
    ]);
    let t0 = Instant::now();
    for _ in 0..args.draws {
        let params = quadblit::PerspectiveParams::new(xy, uv).with_alpha(0.5);
        m.pixels_written += engine.draw_perspective(&view, &params).pixels_written;
    }
    m.perspective_total = t0.elapsed();

    m.wall_total = wall.elapsed();
    Ok((m, engine.into_destination()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 1280,
        height: 720,
        src_size: 256,
        warmup: 1,
        repeats: 20,
        draws: 8,
        resample: quadblit::Resample::Bilinear,
        blend: "Normal".to_string(),
        composite: 3,
        zoom: 1.5,
        rotation: 0.0,
        json: false,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--src-size" => out.src_size = parse_u32(args.next(), "--src-size")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--draws" => out.draws = parse_u32(args.next(), "--draws")?,
            "--zoom" => out.zoom = parse_f64(args.next(), "--zoom")?,
            "--rotation" => out.rotation = parse_f64(args.next(), "--rotation")?,
            "--composite" => {
                out.composite = i64::from(parse_u32(args.next(), "--composite")?);
            }
            "--blend" => {
                out.blend = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --blend (display name)"))?
            }
            "--resample" => {
                let v = args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --resample (nearest|bilinear)")
                })?;
                out.resample = match v.as_str() {
                    "nearest" => quadblit::Resample::Nearest,
                    "bilinear" => quadblit::Resample::Bilinear,
                    _ => anyhow::bail!("unknown --resample '{v}' (expected nearest|bilinear)"),
                };
            }
            "--json" => out.json = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"quadblit-bench

Draws a checkerboard source repeatedly (affine + perspective) and reports p50/p90/p99 per stage.
Every run must produce the same output digest.

Usage:
  cargo run -q --release
  cargo run -q --release -- --repeats 50 --draws 16 --resample nearest
  cargo run -q --release -- --blend Multiply --composite 9

Args:
  --width N        (default 1280)
  --height N       (default 720)
  --src-size N     (default 256; square source)
  --warmup N       (default 1)
  --repeats N      (default 20)
  --draws N        (default 8; per stage per run)
  --zoom F         (default 1.5)
  --rotation DEG   (default 0; each draw adds a fraction of a full turn)
  --blend NAME     (default Normal)
  --composite ID   (default 3, source-over)
  --resample M     (nearest|bilinear, default bilinear)
  --json           print a JSON summary on stdout
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .map_err(|e| anyhow::anyhow!("invalid {flag} '{v}': {e}"))
}

fn parse_f64(v: Option<String>, flag: &str) -> anyhow::Result<f64> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<f64>()
        .map_err(|e| anyhow::anyhow!("invalid {flag} '{v}': {e}"))
}

type Getter = fn(&RunMetrics) -> Duration;

fn fields() -> [(&'static str, Getter); 4] {
    [
        ("clear", |m| m.clear),
        ("affine_total", |m| m.affine_total),
        ("perspective_total", |m| m.perspective_total),
        ("wall_total", |m| m.wall_total),
    ]
}

fn collect(runs: &[RunMetrics], f: Getter) -> Vec<Duration> {
    let mut v = runs.iter().map(f).collect::<Vec<_>>();
    v.sort_by_key(|d| d.as_nanos());
    v
}

fn percentile(v: &[Duration], p: f64) -> Duration {
    if v.is_empty() {
        return Duration::ZERO;
    }
    let n = v.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    v[rank - 1]
}

fn report_percentiles(runs: &[RunMetrics]) {
    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields() {
        let v = collect(runs, getter);
        eprintln!(
            "  {name:18} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = name,
            p50 = fmt_ms(percentile(&v, 0.50)),
            p90 = fmt_ms(percentile(&v, 0.90)),
            p99 = fmt_ms(percentile(&v, 0.99))
        );
    }
    if let Some(first) = runs.first() {
        eprintln!("  pixels written per run: {}", first.pixels_written);
    }
}

fn print_json(args: &BenchArgs, runs: &[RunMetrics], digest: &str) {
    let mut stages = serde_json::Map::new();
    for (name, getter) in fields() {
        let v = collect(runs, getter);
        stages.insert(
            name.to_string(),
            serde_json::json!({
                "p50_ms": percentile(&v, 0.50).as_secs_f64() * 1000.0,
                "p90_ms": percentile(&v, 0.90).as_secs_f64() * 1000.0,
                "p99_ms": percentile(&v, 0.99).as_secs_f64() * 1000.0,
            }),
        );
    }
    let summary = serde_json::json!({
        "width": args.width,
        "height": args.height,
        "src_size": args.src_size,
        "draws": args.draws,
        "repeats": args.repeats,
        "sha256": digest,
        "stages": stages,
    });
    println!("{summary}");
}
