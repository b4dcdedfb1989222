//! Convert an image into the `R;G;B` text grid the planet renderer reads.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use image::imageops::FilterType;
use image::GenericImageView;

#[derive(Parser)]
#[command(name = "texgen", about = "Generate a texture map from an image")]
struct Args {
    /// Source image (png or jpeg)
    input: PathBuf,

    /// Output text file
    output: PathBuf,

    /// Width of the generated map in cells
    #[arg(long, default_value_t = 360)]
    width: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let image = image::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let (width, height) = image.dimensions();

    let out_width = args.width.min(width).max(1);
    let aspect = width as f32 / height as f32;
    let out_height = ((out_width as f32 / aspect) as u32).max(1);
    let image = image.resize_exact(out_width, out_height, FilterType::Gaussian);

    let mut output = String::with_capacity((out_width * out_height * 12) as usize);
    for y in 0..image.height() {
        for x in 0..image.width() {
            let pixel = image.get_pixel(x, y);
            if x > 0 {
                output.push(' ');
            }
            output.push_str(&format!("{};{};{}", pixel[0], pixel[1], pixel[2]));
        }
        output.push('\n');
    }

    fs::write(&args.output, output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!(
        "wrote {}x{} map to {}",
        out_width,
        out_height,
        args.output.display()
    );
    Ok(())
}
