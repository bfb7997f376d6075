//! Command line front end: encodes text and writes a styled PNG or SVG.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use qrstyle::{
    BodyShape, Color, EcLevel, EyeBallShape, EyeFrameShape, OverlayClip, OverlaySource,
    QrCodeEncoder, QrCompositor, RenderConfig, ShapePolicy,
};

#[derive(Debug, Parser)]
#[command(name = "qr-render", version, about = "Render a styled QR code")]
struct Args {
    /// Text to encode.
    text: String,

    /// Output file; the extension selects PNG or SVG.
    #[arg(short, long, default_value = "qr.png")]
    output: PathBuf,

    /// JSON render config used as the base for the other options.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    body: Option<BodyShape>,

    #[arg(long)]
    frame: Option<EyeFrameShape>,

    #[arg(long)]
    ball: Option<EyeBallShape>,

    #[arg(long, value_enum)]
    policy: Option<ShapePolicy>,

    /// Foreground color as hex or a CSS color name.
    #[arg(long)]
    fg: Option<Color>,

    /// Background color as hex or a CSS color name.
    #[arg(long)]
    bg: Option<Color>,

    /// Module edge in pixels.
    #[arg(long)]
    module_size: Option<f32>,

    /// Quiet zone in modules.
    #[arg(long)]
    quiet_zone: Option<usize>,

    /// Center logo (any raster format, or .svg).
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo edge as a share of the symbol edge.
    #[arg(long)]
    logo_fraction: Option<f32>,

    #[arg(long, value_enum)]
    logo_clip: Option<OverlayClip>,

    #[arg(long, value_enum, default_value = "h")]
    ec_level: EcLevel,
}

enum Format {
    Png,
    Svg,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let format = match args.output.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Format::Png,
        Some(ext) if ext.eq_ignore_ascii_case("svg") => Format::Svg,
        _ => bail!("output must end in .png or .svg: {}", args.output.display()),
    };

    let config = build_config(&args)?;
    let compositor = QrCompositor::new(config);
    let encoder = QrCodeEncoder::new(args.ec_level);

    // warnings are already logged by the compositor
    let partial = match format {
        Format::Png => {
            let rendered = compositor.render_text::<qrstyle::PixmapSurface>(&encoder, &args.text)?;
            rendered
                .output
                .save(&args.output)
                .with_context(|| format!("writing {}", args.output.display()))?;
            rendered.is_partial()
        }
        Format::Svg => {
            let rendered = compositor.render_text::<qrstyle::SvgSurface>(&encoder, &args.text)?;
            std::fs::write(&args.output, rendered.output.as_str())
                .with_context(|| format!("writing {}", args.output.display()))?;
            rendered.is_partial()
        }
    };

    info!(path = %args.output.display(), partial, "Wrote QR code");
    println!("Saved to: {}", args.output.display());
    Ok(())
}

fn build_config(args: &Args) -> Result<RenderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            RenderConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RenderConfig::new(),
    };

    if let Some(shape) = args.body {
        config.body_shape = shape;
    }
    if let Some(shape) = args.frame {
        config.eye_frame_shape = shape;
    }
    if let Some(shape) = args.ball {
        config.eye_ball_shape = shape;
    }
    if let Some(policy) = args.policy {
        config.shape_policy = policy;
    }
    if let Some(color) = args.fg {
        config.foreground_color = color;
    }
    if let Some(color) = args.bg {
        config.background_color = color;
    }
    if let Some(px) = args.module_size {
        config.module_size_px = px;
    }
    if let Some(modules) = args.quiet_zone {
        config.quiet_zone_modules = modules;
    }
    if let Some(fraction) = args.logo_fraction {
        config.overlay_fraction = fraction;
    }
    if let Some(clip) = args.logo_clip {
        config.overlay_clip = clip;
    }

    if let Some(path) = &args.logo {
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let source = if is_svg {
            OverlaySource::from_svg(
                std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
            )
        } else {
            OverlaySource::from_bytes(
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?,
            )
        };
        config.overlay = Some(source);
    }

    Ok(config)
}
