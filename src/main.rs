use blockscript::cli::{self, CheckOptions, CliError, Emit, Style, report};
use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "blockscript")]
#[command(about = "BlockScript compiler front end - parse a script and print its syntax tree")]
#[command(version)]
struct Cli {
    /// Path of the BlockScript file to compile
    #[arg(long)]
    file: PathBuf,

    /// Write token and syntax tree dumps next to the source file
    #[arg(long)]
    debug: bool,

    /// What to print on success
    #[arg(long, value_enum, default_value_t = Emit::Ast)]
    emit: Emit,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// When to colour diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => atty::is(atty::Stream::Stderr),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "blockscript=warn",
        1 => "blockscript=debug",
        _ => "blockscript=trace",
    }
}

fn main() {
    let cli = Cli::parse();
    let style = Style::new(cli.color.enabled());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(style.color())
        .with_writer(std::io::stderr)
        .init();

    let options = CheckOptions {
        file: cli.file,
        emit: cli.emit,
        pretty: !cli.compact,
        debug: cli.debug,
    };

    match cli::catch_internal(|| cli::execute_check(&options)) {
        Ok(result) => {
            for path in &result.artifacts {
                eprintln!("wrote {}", path.display());
            }
            println!("{}", result.output);
        }
        Err(CliError::Compile {
            error,
            source,
            file,
        }) => {
            eprint!("{}", report::render(&error, &source, &file, &style));
            std::process::exit(1);
        }
        Err(CliError::Internal(fault)) => {
            eprint!("{}", report::render_crash(&fault, &style));
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
