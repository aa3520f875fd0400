//! Shimmer demo driver
//!
//! Headless stand-in for a UI host: renders a placeholder card (avatar circle
//! and text rows), runs the shimmer effect over it and writes each frame as a
//! PNG. Useful for eyeballing configurations without wiring up a toolkit.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use shimmer::render::surface::{AlphaMask, ContentSource, Pixmap};
use shimmer::{ShimmerConfig, ShimmerEffect};

/// Shimmer sweep frame dumper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Container width in pixels
    #[arg(long, default_value_t = 360)]
    width: u32,

    /// Container height in pixels
    #[arg(long, default_value_t = 120)]
    height: u32,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 90)]
    frames: u32,

    /// Animation clock rate in frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Output directory for frame PNGs
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// Path to a shimmer config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// Placeholder card: an avatar circle and three text rows, the usual
/// skeleton-screen shape a shimmer runs over.
struct PlaceholderCard {
    width: u32,
    height: u32,
}

impl ContentSource for PlaceholderCard {
    fn draw_content(&self, mask: &mut AlphaMask, translate_x: i32) {
        let pad = (self.height / 8) as i32;
        let avatar = self.height as i32 - 2 * pad;

        // Avatar block
        mask.fill_rect(translate_x + pad, pad, avatar as u32, avatar as u32, 255);

        // Text rows to the right of the avatar
        let text_x = translate_x + pad * 2 + avatar;
        let text_w = (self.width as i32 - pad * 3 - avatar).max(0) as u32;
        let row_h = (self.height / 8).max(1);
        for row in 0..3 {
            let y = pad + row * (row_h as i32 * 2);
            let w = if row == 2 { text_w / 2 } else { text_w };
            mask.fill_rect(text_x, y, w, row_h, 255);
        }
    }
}

/// The card as the host would have drawn it: light gray blocks on white.
fn draw_base(card: &PlaceholderCard, base: &mut Pixmap) -> Result<()> {
    base.fill((255, 255, 255, 255));

    let mut mask = AlphaMask::try_allocate(base.width(), base.height())
        .context("base mask allocation")?;
    card.draw_content(&mut mask, 0);

    for y in 0..base.height() {
        for x in 0..base.width() {
            if mask.coverage(x, y) > 0 {
                base.set_pixel(x, y, (224, 224, 224, 255));
            }
        }
    }

    Ok(())
}

/// Milliseconds of animation clock per frame, never zero so the clock
/// always advances.
fn frame_interval_ms(fps: u32) -> u64 {
    (1000 / fps.max(1) as u64).max(1)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => {
            info!("Loading config from: {:?}", path);
            ShimmerConfig::load_from_file(path)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => ShimmerConfig::default(),
    };

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let card = PlaceholderCard {
        width: args.width,
        height: args.height,
    };

    let mut effect = ShimmerEffect::new(config)?;
    effect.set_layout(args.width, args.height);
    effect.start();

    let frame_ms = frame_interval_ms(args.fps);
    info!(
        width = args.width,
        height = args.height,
        frames = args.frames,
        "rendering shimmer frames"
    );

    for frame in 0..args.frames {
        let now_ms = frame as u64 * frame_ms;
        effect.tick(now_ms);

        let mut base = Pixmap::new(args.width, args.height);
        draw_base(&card, &mut base)?;
        effect.compose_overlay(&mut base, &card);

        let image = image::RgbaImage::from_raw(args.width, args.height, base.data().to_vec())
            .context("building frame image")?;
        let path = args.out.join(format!("frame_{frame:04}.png"));
        image.save(&path).with_context(|| format!("writing {}", path.display()))?;
    }

    effect.stop();
    info!("done, frames written to {:?}", args.out);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_never_zero() {
        assert_eq!(frame_interval_ms(60), 16);
        assert_eq!(frame_interval_ms(0), 1000);
        assert_eq!(frame_interval_ms(2000), 1);
    }
}
