use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use orbital_cloud::{
    config::{ConfigSampleSet, ConfigSettings},
    export::LayoutDocument,
    ColorToken, OrbitalKind, PointCloudLayoutEngine, SampleSet, Selection,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: LayoutCommand,

    /// Log at debug level. Ignored if RUST_LOG is set
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum LayoutCommand {
    /// Lay out a point cloud and write the markers and their animation as JSON
    #[command(name = "layout")]
    Layout {
        /// A JSON file with `x_coords`, `y_coords` and `z_coords` arrays
        #[arg(long, short)]
        samples: PathBuf,
        /// A JSON settings file, defaults are used for anything it leaves out
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Seed for the animation start positions. Random if not given
        #[arg(long)]
        seed: Option<u64>,
        /// Only write the markers
        #[arg(long)]
        no_plan: bool,
        /// Symbol of the element the samples belong to
        #[arg(long, conflicts_with = "molecule")]
        element: Option<String>,
        /// Formula of the molecule the samples belong to
        #[arg(long)]
        molecule: Option<String>,
        /// Which molecular orbital was sampled (homo or lumo)
        #[arg(long, requires = "molecule")]
        orbital: Option<OrbitalKind>,
        /// Where to write the output. Standard output if not given
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the transform a point cloud would be laid out with
    #[command(name = "inspect")]
    Inspect {
        #[arg(long, short)]
        samples: PathBuf,
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        LayoutCommand::Layout {
            samples,
            settings,
            seed,
            no_plan,
            element,
            molecule,
            orbital,
            output,
            pretty,
        } => {
            let engine = load_engine(settings.as_deref())?;
            let samples = load_samples(&samples)?;

            let color = match (element, molecule) {
                (Some(symbol), _) => Selection::element(symbol).color_token(),
                (None, Some(formula)) => {
                    Selection::molecule(formula, orbital.unwrap_or(OrbitalKind::Homo))
                        .color_token()
                }
                (None, None) => ColorToken::default(),
            };

            let start = Instant::now();
            let document = if no_plan {
                let (_, markers) = engine.normalize(&samples, color)?;
                LayoutDocument::new(&markers, None)
            } else {
                LayoutDocument::from(&engine.layout(&samples, color, seed)?)
            };
            log::info!(
                "laid out {} samples in {:0.2?}",
                samples.len(),
                start.elapsed()
            );

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    write_document(&document, BufWriter::new(file), pretty)?;
                }
                None => write_document(&document, io::stdout().lock(), pretty)?,
            }
        }

        LayoutCommand::Inspect { samples, settings } => {
            let engine = load_engine(settings.as_deref())?;
            let samples = load_samples(&samples)?;

            let centroid = engine.compute_centroid(&samples)?;
            let (transform, _) = engine.normalize(&samples, ColorToken::default())?;

            println!("samples: {}", samples.len());
            println!("centroid (raw): {:3.4?}", centroid.as_slice());
            println!("space divisor: {}", transform.space_divisor);
            println!(
                "bounds (divided): {:3.4?} .. {:3.4?}",
                transform.bounds.min.as_slice(),
                transform.bounds.max.as_slice()
            );
            println!("center (divided): {:3.4?}", transform.center.as_slice());
            println!("max dimension: {:3.4}", transform.max_dimension);
            println!("scale factor: {:3.4}", transform.scale_factor);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            });
        }
    }
    builder.init();
}

fn load_samples(path: &Path) -> anyhow::Result<SampleSet> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let config: ConfigSampleSet = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse particle data in {}", path.display()))?;

    SampleSet::try_from(config)
        .with_context(|| format!("invalid particle data in {}", path.display()))
}

fn load_engine(path: Option<&Path>) -> anyhow::Result<PointCloudLayoutEngine> {
    let Some(path) = path else {
        return Ok(PointCloudLayoutEngine::default());
    };

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let settings: ConfigSettings = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse settings in {}", path.display()))?;

    PointCloudLayoutEngine::try_from(settings)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

fn write_document(
    document: &LayoutDocument,
    mut writer: impl Write,
    pretty: bool,
) -> anyhow::Result<()> {
    document
        .to_writer(&mut writer, pretty)
        .context("failed to write layout")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
