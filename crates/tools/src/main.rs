use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use levelgen::mapgen::{LevelDescriptor, LevelGenerator, SeedInput, Special, TileKind};
use levelgen::{GeneratorConfig, Pos};
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed text; numeric values are used as-is. Omit for a fresh runtime seed
    #[arg(short, long)]
    seed: Option<String>,
    #[arg(long, default_value_t = 41)]
    width: usize,
    #[arg(long, default_value_t = 41)]
    height: usize,
    /// Number of consecutive levels to generate from one stream
    #[arg(short, long, default_value_t = 1)]
    levels: u32,
    /// TOML or JSON generator config
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    /// Repeat for more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) -> Result<()> {
    log::set_logger(&LOGGER).map_err(|error| anyhow::anyhow!("logger already set: {error}"))?;
    log::set_max_level(match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    });
    Ok(())
}

fn parse_seed(raw: &str) -> SeedInput {
    raw.parse::<u64>().map_or_else(|_| SeedInput::from(raw), SeedInput::Number)
}

fn render_ascii(level: &LevelDescriptor) -> String {
    let mut out = String::with_capacity((level.width + 1) * level.height);
    for y in 0..level.height {
        for x in 0..level.width {
            let pos = Pos::new(x as i32, y as i32);
            let glyph = match level.tile(pos) {
                Some(tile) if tile.kind == TileKind::Solid => '#',
                Some(tile) => match tile.special {
                    Some(Special::StairsUp) => '<',
                    Some(Special::StairsDown) => '>',
                    Some(Special::Door) => '+',
                    Some(Special::Treasure) => '$',
                    None if pos == level.start => '@',
                    None if tile.encounter_zone_id.is_some() => ',',
                    None => '.',
                },
                None => ' ',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load generator config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    let seed = args.seed.as_deref().map(parse_seed);
    let mut generator = LevelGenerator::with_config(args.width, args.height, seed, config)
        .context("Failed to create level generator")?;

    let mut stdout = io::stdout().lock();
    for level_number in 1..=args.levels {
        let level = generator.generate_level(level_number);
        match args.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut stdout, &level)
                    .context("Failed to serialize level descriptor")?;
                writeln!(stdout)?;
            }
            OutputFormat::Ascii => {
                writeln!(
                    stdout,
                    "Level {} ({}x{}) seed '{}' fingerprint {:016x}",
                    level.level_number,
                    level.width,
                    level.height,
                    generator.seed(),
                    level.fingerprint()
                )?;
                writeln!(
                    stdout,
                    "Start {:?} via {:?}, {} rooms, {} zones",
                    level.start,
                    level.start_resolution,
                    level.rooms.len(),
                    level.override_zones.len()
                )?;
                write!(stdout, "{}", render_ascii(&level))?;
            }
        }
    }

    Ok(())
}
