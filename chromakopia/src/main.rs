#![allow(clippy::uninlined_format_args)]

use anyhow::{bail, Context};
use chromakopia_rs::background::load_upload;
use chromakopia_rs::export::{export_date, export_file_name, write_export};
use chromakopia_rs::{
    load_fonts, ColorSource, GeneratorConfig, GeneratorState, JsonLinesSource, Notifier, Renderer,
    Session,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// chromakopia: Render text with three typefaces (first letter, middle, last letter) to PNG
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a single image and write it as PNG
    Render {
        #[clap(flatten)]
        common: CommonArgs,

        /// Text to render (empty falls back to the default text)
        #[clap(short, long)]
        text: Option<String>,

        /// Text color as #rgb or #rrggbb
        #[clap(short, long)]
        color: Option<String>,

        /// Base font size in pixels (clamped to 24-160)
        #[clap(short = 's', long)]
        font_size: Option<u32>,

        /// Lock the text color to the authentic green
        #[clap(long)]
        authentic_green: bool,

        /// Background option: transparent, #hex, or linear-gradient(...)
        #[clap(short, long)]
        background: Option<String>,

        /// Background image (cover-cropped and tinted with the text color)
        #[clap(long)]
        image: Option<PathBuf>,

        /// Output file. Defaults to chromakopia-<text>-<date>.png in the export directory
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Write the preview resolution instead of the high-resolution export
        #[clap(long)]
        preview: bool,
    },

    /// Apply JSON-lines configuration events from stdin, exporting on each download event
    Session {
        #[clap(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON configuration file
    #[clap(long)]
    config: Option<PathBuf>,

    /// Font file for the first letter
    #[clap(long)]
    font1: Option<PathBuf>,

    /// Font file for the middle letters
    #[clap(long)]
    font2: Option<PathBuf>,

    /// Font file for the last letter
    #[clap(long)]
    font3: Option<PathBuf>,

    /// Do not load system fonts for the fallback family
    #[clap(long)]
    no_system_fonts: bool,

    /// Directory exported images are written to
    #[clap(long)]
    export_dir: Option<PathBuf>,

    /// Export scale relative to the preview
    #[clap(long)]
    scale: Option<u32>,

    /// File used to persist recent colors
    #[clap(long)]
    recent_colors: Option<PathBuf>,
}

impl CommonArgs {
    fn load_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if let Some(path) = &self.font1 {
            config.fonts.first = Some(path.clone());
        }
        if let Some(path) = &self.font2 {
            config.fonts.middle = Some(path.clone());
        }
        if let Some(path) = &self.font3 {
            config.fonts.last = Some(path.clone());
        }
        if self.no_system_fonts {
            config.load_system_fonts = false;
        }
        if let Some(dir) = &self.export_dir {
            config.export_dir = dir.clone();
        }
        if let Some(scale) = self.scale {
            config.export_scale = scale;
        }
        if let Some(path) = &self.recent_colors {
            config.recent_colors_path = Some(path.clone());
        }
        Ok(config)
    }
}

/// Prints notifications to stderr.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render {
            common,
            text,
            color,
            font_size,
            authentic_green,
            background,
            image,
            output,
            preview,
        } => {
            let config = common.load_config()?;
            let fonts = load_fonts(
                &config.fonts,
                config.font_load_timeout(),
                config.load_system_fonts,
            )
            .await;

            let mut state = GeneratorState::new(&config);
            if let Some(text) = text {
                state.set_text(&text);
            }
            if let Some(color) = color {
                if authentic_green {
                    bail!("--color cannot be combined with --authentic-green");
                }
                state.set_color(&color, ColorSource::Picker)?;
                state.recent_colors().save().await;
            }
            if let Some(size) = font_size {
                state.set_font_size(size);
            }
            state.set_authentic_green(authentic_green);
            if let Some(background) = background {
                state.select_background(&background);
            }
            if let Some(path) = image {
                let uploaded = load_upload(&path, None)
                    .await
                    .with_context(|| format!("Failed to use background image {}", path.display()))?;
                state.set_uploaded_image(uploaded);
            }

            let mut renderer = Renderer::new(&config, &fonts)?;
            renderer.render_preview(&state)?;
            let png = if preview {
                renderer.preview_png()?
            } else {
                renderer.export_png(&state)?
            };

            let path = match output {
                Some(path) => {
                    std::fs::write(&path, &png)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    path
                }
                None => {
                    let file_name = export_file_name(state.text(), export_date());
                    write_export(&config.export_dir, &file_name, &png).await?
                }
            };
            log::info!("Preview resolution {}", renderer.resolution_label());
            println!("{}", path.display());
        }
        Commands::Session { common } => {
            let config = common.load_config()?;
            let mut session = Session::start(&config, StderrNotifier).await?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(&mut JsonLinesSource::new(stdin)).await;
            for path in session.exports() {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}
