use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use gridfont_engine::editor::EditState;
use gridfont_engine::{
    CANVAS_HEIGHT, CANVAS_WIDTH, FontJson, GlyphPath, MemorySettingsStore, PackedBase64, RasterCanvas, Result as EngineResult, SETTINGS_KEY,
    SaveSink, SettingsStore, render_path, render_sheet,
};

#[derive(Parser)]
#[command(about = "Exports and previews gridfont glyph sets.")]
pub struct Cli {
    #[arg(help = "Persisted editor settings file (JSON).", required = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Json,
    Base64,
    All,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write the export artifacts (font.json / font-base64.json)")]
    Export {
        #[arg(long, default_value = ".", help = "Directory the artifacts are written to.")]
        out_dir: PathBuf,

        #[arg(long, value_enum, default_value = "all", help = "Which artifact to write.")]
        format: ExportFormat,
    },

    #[command(about = "Render one glyph, or the whole character sheet, to PNG")]
    Render {
        #[arg(long = "char", help = "Character to render; defaults to the current one.")]
        glyph: Option<char>,

        #[arg(long, default_value_t = false, help = "Render the full character sheet instead.")]
        sheet: bool,

        #[arg(short, long, help = "Output PNG path.")]
        out: PathBuf,
    },
}

struct FileSink {
    dir: PathBuf,
}

impl SaveSink for FileSink {
    fn save_blob(&mut self, bytes: &[u8], file_name: &str) -> EngineResult<()> {
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let json = fs::read_to_string(&args.settings).with_context(|| format!("reading {}", args.settings.display()))?;
    let mut store = MemorySettingsStore::new();
    store.set(SETTINGS_KEY, &json);
    let state = EditState::new(Box::new(store)).context("loading editor settings")?;

    match args.command {
        Commands::Export { out_dir, format } => {
            fs::create_dir_all(&out_dir)?;
            let mut sink = FileSink { dir: out_dir };
            if matches!(format, ExportFormat::Json | ExportFormat::All) {
                state.export(&FontJson::default(), &mut sink)?;
            }
            if matches!(format, ExportFormat::Base64 | ExportFormat::All) {
                state.export(&PackedBase64::default(), &mut sink)?;
            }
        }
        Commands::Render { glyph, sheet, out } => {
            let canvas = if sheet {
                render_sheet(&state.setting().path_list, state.grid())
            } else {
                let ch = glyph.unwrap_or_else(|| state.current_char());
                let empty = GlyphPath::new();
                let path = state.setting().path_list.get(ch).unwrap_or(&empty);
                let mut canvas = RasterCanvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
                render_path(&mut canvas, path, state.grid());
                canvas
            };
            write_png(&canvas, &out)?;
            log::info!("wrote {}", out.display());
        }
    }
    Ok(())
}

fn write_png(canvas: &RasterCanvas, path: &Path) -> anyhow::Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), canvas.width() as u32, canvas.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.data())?;
    Ok(())
}
