mod input;

use crate::input::CachedInput;
use anyhow::Result;
use clap::Parser;
use std::path::Path;
use vkplot::vankrevelen::{self, ChartAppearance, PlotStyle, StyleValue, TableFormat};

#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Args {
    #[clap(help = "ratio table with O/C and H/C columns (use \"-\" for stdin)")]
    pub input: String,

    #[clap(short = 'F', long, help = "force treat the input table in a specific format", default_value = "infer")]
    pub format: TableFormat,

    #[clap(short = 'c', long, help = "point color; a name, \"#rrggbb\", or \"density\"")]
    pub color: Option<String>,

    #[clap(short = 's', long, help = "marker radius in pixels")]
    pub marker_size: Option<f64>,

    #[clap(short = 'a', long, help = "marker opacity in [0, 1]")]
    pub alpha: Option<f64>,

    #[clap(short = 'C', long, help = "appearance config in yaml")]
    pub config: Option<String>,

    #[clap(short = 'W', long, help = "plot width in pixels", default_value = "800")]
    pub width: u32,

    #[clap(short = 'H', long, help = "plot height in pixels", default_value = "600")]
    pub height: u32,

    #[clap(short = 'o', long, help = "output filename (png or svg)", default_value = "out.png")]
    pub output: String,

    #[clap(short = 'f', long, help = "create directory if missing")]
    pub create_missing_dir: bool,
}

fn print_args(args: &[String]) {
    let args = args
        .iter()
        .map(|x| if x.contains(' ') { format!("\"{x}\"") } else { x.to_string() })
        .collect::<Vec<_>>();
    let args = args.join(" ");
    log::info!("args: {args}");
}

fn ensure_dir(name: &str, create_missing: bool) -> Result<()> {
    if !create_missing {
        return Ok(());
    }
    if let Some(dir) = Path::new(name).parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    print_args(&std::env::args().collect::<Vec<_>>());

    let input = CachedInput::new(&args.input)?;
    let ratios = vankrevelen::load_ratio_table(input.name(), args.format)?;
    log::info!("loaded {} ratio records from {}", ratios.len(), args.input);

    let mut style = PlotStyle::new();
    if let Some(color) = &args.color {
        style.insert(vankrevelen::COLOR_KEY, StyleValue::Text(color.clone()));
    }
    if let Some(size) = args.marker_size {
        style.insert("s", StyleValue::Scalar(size));
    }
    if let Some(alpha) = args.alpha {
        style.insert("alpha", StyleValue::Scalar(alpha));
    }

    let appearance = match &args.config {
        Some(file) => vankrevelen::load_appearance(file)?,
        None => ChartAppearance::default(),
    };

    ensure_dir(&args.output, args.create_missing_dir)?;
    vankrevelen::plot(&args.output, &ratios, &style, &appearance, (args.width, args.height))?;
    log::info!("wrote {}", args.output);
    Ok(())
}
