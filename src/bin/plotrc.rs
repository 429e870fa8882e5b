//! Command line front end: inspect styles and resolve colors.
//!
//! ```text
//! plotrc resolve --style dark_background --rc lines.color=white
//! plotrc resolve red 0.5 C3 --style ggplot --output json
//! plotrc styles --styles-dir ./styles
//! plotrc params --style grayscale
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::Style;
use log::debug;
use serde_json::json;

use plotrc::{ColorResolver, ColorSpec, ColorValue, RcContext, RcHost, RcParams, Rgba};

#[derive(Debug, Parser)]
#[command(name = "plotrc", version, about = "Inspect plot styles and resolve line colors")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve the colors a line collection would be drawn with
    Resolve(ResolveArgs),
    /// List the available styles
    Styles(ContextArgs),
    /// Print the effective parameters
    Params(ParamsArgs),
}

#[derive(Debug, Args)]
struct ContextArgs {
    /// Style to activate; repeat to layer several
    #[arg(short, long = "style")]
    styles: Vec<String>,

    /// Directory of additional style sheets
    #[arg(long = "styles-dir")]
    styles_dirs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Explicit colors; when none are given the configured color is used
    colors: Vec<String>,

    #[command(flatten)]
    context: ContextArgs,

    /// Scoped override as KEY=VALUE; repeatable
    #[arg(long = "rc", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,

    /// Color parameter to fall back to
    #[arg(long, default_value = "lines.color")]
    key: String,

    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(Debug, Args)]
struct ParamsArgs {
    #[command(flatten)]
    context: ContextArgs,

    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn build_context(args: &ContextArgs) -> Result<RcContext> {
    let mut ctx = RcContext::new();
    for dir in &args.styles_dirs {
        let count = ctx
            .library_mut()
            .load_dir(dir)
            .with_context(|| format!("failed to load styles from {}", dir.display()))?;
        debug!("loaded {} style(s) from {}", count, dir.display());
    }
    if !args.styles.is_empty() {
        ctx.use_style(&args.styles)
            .with_context(|| format!("failed to activate style {}", args.styles.join(", ")))?;
    }
    Ok(ctx)
}

fn swatch(color: Rgba) -> String {
    Style::new()
        .on_color256(color.to_ansi256())
        .apply_to("    ")
        .to_string()
}

fn resolve(args: ResolveArgs) -> Result<()> {
    let mut ctx = build_context(&args.context)?;
    let overrides =
        RcParams::from_pairs(args.overrides.iter().map(|(k, v)| (k.as_str(), v.clone())))
            .context("invalid --rc override")?;

    let explicit = if args.colors.is_empty() {
        None
    } else {
        Some(ColorSpec::from(
            args.colors
                .iter()
                .map(|c| ColorValue::from(c.as_str()))
                .collect::<Vec<_>>(),
        ))
    };

    let key = args.key.as_str();
    let (source, colors) = ctx.with_rc(overrides, |ctx| {
        let resolver = ColorResolver::for_key(ctx, key);
        let source = resolver.source(explicit.as_ref());
        resolver.resolve(explicit.as_ref()).map(|colors| (source, colors))
    })?;
    let source = source.ok_or_else(|| anyhow!("no color configured for '{}'", key))?;

    match args.output {
        Output::Json => {
            let out = json!({
                "key": key,
                "source": source.as_str(),
                "colors": colors,
                "hex": colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Output::Text => {
            println!("{} ({})", key, Style::new().dim().apply_to(source));
            for color in &colors {
                println!("{} {:<10} {}", swatch(*color), color.to_hex(), color);
            }
        }
    }
    Ok(())
}

fn styles(args: ContextArgs) -> Result<()> {
    let ctx = build_context(&args)?;
    let active = ctx.active_styles();
    for name in ctx.library().names() {
        if active.iter().any(|s| s == name) {
            println!("{} {}", Style::new().green().apply_to("*"), name);
        } else {
            println!("  {}", name);
        }
    }
    Ok(())
}

fn params(args: ParamsArgs) -> Result<()> {
    let ctx = build_context(&args.context)?;
    let effective = ctx.effective();
    match args.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&effective)?),
        Output::Text => {
            let width = effective.keys().map(str::len).max().unwrap_or(0);
            for (key, value) in effective.iter() {
                println!("{:<width$}  {}", key, value, width = width);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Resolve(args) => resolve(args),
        Command::Styles(args) => styles(args),
        Command::Params(args) => params(args),
    }
}
