use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use spot_glyph::{
    puzzle_rng, save, AspectRatio, FontSet, HeaderSize, ImageFormat, ProblemSet, Puzzle,
    PuzzleConfig, Rgba8,
};

#[derive(Clone, Copy, ValueEnum)]
enum Ratio {
    /// 1:1, 1080x1080
    Square,
    /// 9:16, 1080x1920
    Tall,
}

#[derive(Parser)]
#[command(name = "spot-glyph")]
#[command(about = "Generate a spot-the-difference glyph puzzle (question and answer images)")]
struct Cli {
    /// Print the built-in problem sets and exit
    #[arg(long)]
    list_presets: bool,
    /// Problem set by name or as WRONG/TARGET, e.g. 6/9
    #[arg(long)]
    preset: Option<String>,
    /// JSON file with a base configuration; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glyph repeated across the grid
    #[arg(long)]
    wrong: Option<String>,
    /// Glyph hidden in one cell
    #[arg(long)]
    target: Option<String>,
    #[arg(long)]
    header_text: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(100..=600))]
    header_height: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(30..=200))]
    header_font_size: Option<u32>,
    /// Vertical nudge of the header text; negative moves it up
    #[arg(long, allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-150..=150))]
    header_offset: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=20))]
    rows: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(5..=20))]
    cols: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(20..=150))]
    grid_font_size: Option<u32>,
    #[arg(long, value_enum)]
    ratio: Option<Ratio>,

    /// Canvas background, #RRGGBB
    #[arg(long)]
    background: Option<Rgba8>,
    #[arg(long)]
    grid_color: Option<Rgba8>,
    #[arg(long)]
    header_background: Option<Rgba8>,
    #[arg(long)]
    header_color: Option<Rgba8>,

    /// Seed for the target position; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// TrueType/OpenType font; the built-in face is used if it cannot be loaded
    #[arg(long, default_value = "NanumGothic-ExtraBold.ttf")]
    font: PathBuf,
    /// jpeg or png
    #[arg(long, default_value = "jpeg")]
    format: ImageFormat,
    /// JPEG quality
    #[arg(long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
    #[arg(long, default_value = "saved_images")]
    out_dir: PathBuf,
}

impl Cli {
    fn build_config(&self) -> Result<PuzzleConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => PuzzleConfig::default(),
        };

        if let Some(key) = &self.preset {
            let Some(set) = ProblemSet::find(key) else {
                bail!("unknown preset {key:?}; see --list-presets");
            };
            config.wrong_glyph = set.wrong.to_owned();
            config.target_glyph = set.target.to_owned();
            config.header_text = set.default_header_text();
        }

        macro_rules! apply {
            ($($flag:ident => $field:ident),* $(,)?) => {
                $(if let Some(v) = self.$flag.clone() {
                    config.$field = v;
                })*
            };
        }
        apply! {
            wrong => wrong_glyph,
            target => target_glyph,
            header_text => header_text,
            header_font_size => header_font_size,
            header_offset => header_text_y_offset,
            rows => grid_rows,
            cols => grid_cols,
            grid_font_size => grid_font_size,
            background => background,
            grid_color => grid_text_color,
            header_background => header_background,
            header_color => header_text_color,
        }
        if let Some(h) = self.header_height {
            config.header = HeaderSize::Fixed(h);
        }
        if let Some(ratio) = self.ratio {
            config.aspect = match ratio {
                Ratio::Square => AspectRatio::Square,
                Ratio::Tall => AspectRatio::Tall,
            };
        }
        Ok(config)
    }

    fn image_format(&self) -> ImageFormat {
        match self.format {
            ImageFormat::Jpeg { .. } => ImageFormat::Jpeg {
                quality: self.quality,
            },
            ImageFormat::Png => ImageFormat::Png,
        }
    }
}

fn list_presets() {
    println!("Available presets:");
    for set in ProblemSet::ALL {
        println!(
            "  {}/{}  {}  \"{}\"",
            set.wrong,
            set.target,
            set.name,
            set.default_header_text()
        );
    }
}

fn write_image(dir: &Path, stem: &str, canvas: &spot_glyph::Canvas, format: ImageFormat) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.{}", format.extension()));
    save(canvas, &path, format).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.list_presets {
        list_presets();
        return Ok(());
    }

    let config = cli.build_config()?;
    let fonts = FontSet::load(Some(cli.font.as_path()), &config);
    let mut rng = puzzle_rng(cli.seed);
    let pair = Puzzle::generate(&config, &fonts, &mut rng).context("rendering puzzle")?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let format = cli.image_format();
    let question = write_image(&cli.out_dir, "puzzle_question", &pair.question, format)?;
    let answer = write_image(&cli.out_dir, "puzzle_answer", &pair.answer, format)?;
    info!("wrote {} and {}", question.display(), answer.display());

    println!(
        "target: row {}, col {} ({} at row {}, col {} counting from 1)",
        pair.target.row,
        pair.target.col,
        config.target_glyph,
        pair.target.row + 1,
        pair.target.col + 1
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_then_flags() {
        let cli = Cli::parse_from([
            "spot-glyph",
            "--preset",
            "6/9",
            "--rows",
            "12",
            "--header-offset",
            "-150",
            "--grid-color",
            "#112233",
        ]);
        let config = cli.build_config().unwrap();
        assert_eq!(config.wrong_glyph, "6");
        assert_eq!(config.target_glyph, "9");
        assert_eq!(config.header_text, "3초 안에 숫자 '9' 찾기");
        assert_eq!(config.grid_rows, 12);
        assert_eq!(config.grid_cols, 10);
        assert_eq!(config.header_text_y_offset, -150);
        assert_eq!(config.grid_text_color, Rgba8::opaque(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_ranges_enforced() {
        assert!(Cli::try_parse_from(["spot-glyph", "--rows", "4"]).is_err());
        assert!(Cli::try_parse_from(["spot-glyph", "--header-height", "601"]).is_err());
        assert!(Cli::try_parse_from(["spot-glyph", "--header-offset", "-151"]).is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let cli = Cli::parse_from(["spot-glyph", "--preset", "1/2"]);
        assert!(cli.build_config().is_err());
    }

    #[test]
    fn test_quality_applies_to_jpeg_only() {
        let cli = Cli::parse_from(["spot-glyph", "--quality", "80"]);
        assert_eq!(cli.image_format(), ImageFormat::Jpeg { quality: 80 });
        let cli = Cli::parse_from(["spot-glyph", "--format", "png"]);
        assert_eq!(cli.image_format(), ImageFormat::Png);
    }
}
