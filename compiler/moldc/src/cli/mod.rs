//! The `mold` command.
//!
//! Arguments are parsed by hand: options, `name=value` bindings, file
//! paths and `-` for standard input, with `--` ending option parsing.
//! [`run`] takes its streams as parameters so it can be driven from tests.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use mold_value::Value;

use crate::{render_file, render_str, Format, MoldError, RenderOptions};

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Render(Invocation),
}

/// Inputs and settings for a rendering run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invocation {
    pub format: Format,
    /// `name=value` arguments, in order. Later bindings win.
    pub bindings: Vec<(String, String)>,
    /// Files to render; `-` is standard input. Empty means standard input.
    pub inputs: Vec<String>,
}

/// Interpret the arguments after the program name.
pub fn parse_args<I, S>(args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut invocation = Invocation::default();
    let mut options = true;
    for arg in args {
        let arg = arg.as_ref();
        if options {
            match arg {
                "--" => {
                    options = false;
                    continue;
                }
                "-h" | "-help" | "--help" => return Command::Help,
                "-v" | "-version" | "--version" => return Command::Version,
                "help" if !Path::new(arg).exists() => return Command::Help,
                "version" if !Path::new(arg).exists() => return Command::Version,
                "-j" | "-json" | "--json" => {
                    invocation.format = Format::Json;
                    continue;
                }
                _ => {}
            }
            if let Some((name, value)) = arg.split_once('=') {
                if !name.is_empty() {
                    invocation.bindings.push((name.to_string(), value.to_string()));
                    continue;
                }
            }
        }
        invocation.inputs.push(arg.to_string());
    }
    Command::Render(invocation)
}

pub fn usage(program: &str) -> String {
    format!(
        "\
{program} [-j] [args...]

...where each argument may be:

  - a filename
  - a dash (to denote reading from standard input)
  - a variable binding of the form \"key=value\"

The following options are recognized:

  -j  --json      Format output as JSON lines

Standalone options:

  -v  --version   Print version information
  -h  --help      Print this help screen

Set RUST_LOG (e.g. RUST_LOG=mold_eval=trace) for diagnostics on stderr.
"
    )
}

pub fn version() -> String {
    format!("mold {}", env!("CARGO_PKG_VERSION"))
}

/// Run a command. Returns the process exit status: 0 when every document
/// rendered, 1 otherwise.
pub fn run(
    command: &Command,
    stdin: &mut dyn Read,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> io::Result<i32> {
    let invocation = match command {
        Command::Help => {
            write!(stdout, "{}", usage("mold"))?;
            return Ok(0);
        }
        Command::Version => {
            writeln!(stdout, "{}", version())?;
            return Ok(0);
        }
        Command::Render(invocation) => invocation,
    };

    let options = RenderOptions::new().format(invocation.format).bindings(
        invocation
            .bindings
            .iter()
            .map(|(name, value)| (name.clone(), Value::string(value.as_str()))),
    );

    let stdin_only = [String::from("-")];
    let inputs = if invocation.inputs.is_empty() {
        &stdin_only[..]
    } else {
        &invocation.inputs[..]
    };

    let mut count = 0_usize;
    let mut failed = false;
    for input in inputs {
        let rendered = if input == "-" {
            let mut text = String::new();
            match stdin.read_to_string(&mut text) {
                Ok(_) => render_str(&text, &options),
                Err(source) => vec![Err(MoldError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })],
            }
        } else {
            render_file(Path::new(input), &options)
        };

        for (index, document) in rendered.into_iter().enumerate() {
            match document {
                Ok(text) => {
                    count += 1;
                    match invocation.format {
                        Format::Json => writeln!(stdout, "{text}")?,
                        Format::Yaml => {
                            if count > 1 {
                                writeln!(stdout, "---")?;
                            }
                            write!(stdout, "{text}")?;
                        }
                    }
                }
                Err(error) => {
                    failed = true;
                    writeln!(stderr, "error: {input} (document {}): {error}", index + 1)?;
                }
            }
        }
    }
    Ok(i32::from(failed))
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber when `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
