use clap::{Parser, Subcommand, ValueEnum};
use folio::{
    FolioConfig, FolioError, GradientDescriptor, GradientFunction, GraphicsPath, Hyphenator, PathParseOptions,
    Unit, UnitKind,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Inspect folio units, paths, gradients and hyphenation")]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a measurement and convert it
    Unit {
        value: String,
        #[arg(long, value_enum, default_value_t = Target::Pt)]
        to: Target,
    },
    /// Parse SVG path data and print its operations and bounds
    Path {
        data: String,
        /// Skip malformed commands instead of failing
        #[arg(long)]
        lenient: bool,
        /// Replace arcs and quadratic curves with cubics
        #[arg(long)]
        cubic: bool,
    },
    /// Compile a CSS gradient into a shading function, printed as JSON
    Gradient { css: String },
    /// Wrap text at a character width
    Hyphenate {
        text: String,
        length: usize,
        #[arg(long)]
        before: Option<usize>,
        #[arg(long)]
        after: Option<usize>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Target {
    Pt,
    In,
    Mm,
}

impl From<Target> for UnitKind {
    fn from(target: Target) -> Self {
        match target {
            Target::Pt => UnitKind::Points,
            Target::In => UnitKind::Inches,
            Target::Mm => UnitKind::Millimeters,
        }
    }
}

fn main() -> Result<(), FolioError> {
    env_logger::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FolioConfig::from_file(path)?,
        None => FolioConfig::default(),
    };

    match args.command {
        Command::Unit { value, to } => {
            let unit = Unit::parse(&value)?;
            println!("{}", unit.convert(to.into())?);
        }
        Command::Path { data, lenient, cubic } => {
            let options = if lenient {
                PathParseOptions::lenient()
            } else {
                config.path_options()
            };
            let mut path = folio::drawing::parse_path_data_with(&data, options)?;
            if cubic {
                path = path.to_cubic_path()?;
            }
            print_path(&path)?;
        }
        Command::Gradient { css } => {
            let descriptor = GradientDescriptor::parse(&css)?;
            let function = GradientFunction::from_descriptor(&descriptor)?;
            println!("{}", serde_json::to_string_pretty(&function)?);
        }
        Command::Hyphenate {
            text,
            length,
            before,
            after,
        } => {
            let mut layout = config.layout;
            if let Some(before) = before {
                layout.hyphenation.min_chars_before = before;
            }
            if let Some(after) = after {
                layout.hyphenation.min_chars_after = after;
            }
            layout.validate()?;
            for line in Hyphenator::from_config(&layout).wrap(&text, length) {
                println!("{}", line.text);
            }
        }
    }
    Ok(())
}

fn print_path(path: &GraphicsPath) -> Result<(), FolioError> {
    for (i, subpath) in path.subpaths().iter().enumerate() {
        println!("subpath {}:", i);
        for op in &subpath.operations {
            println!("  {}", serde_json::to_string(op)?);
        }
    }
    println!("bounds: {}", path.bounds()?);
    Ok(())
}
