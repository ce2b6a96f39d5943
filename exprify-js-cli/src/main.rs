use clap::Parser;
use clap::ValueEnum;
use emit_js::EmitMode;
use exprify_js::exprify_with_stats;
use exprify_js::ExprifyError;
use exprify_js::ExprifyOptions;
use exprify_js::RuleSet;
use exprify_js::WhileForm;
use exprify_js::EXAMPLE_PROGRAM;
use std::fs;
use std::fs::File;
use std::io;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use store::BufferStore;
use store::StoreError;
use store::CODE_KEY;
use thiserror::Error;
use tracing::debug;
use tracing::Level;

mod store;

#[derive(Parser)]
#[command(
  name = "exprify-js",
  about = "Rewrites JavaScript statements into comma and conditional expressions"
)]
struct Cli {
  /// File to rewrite; omit for the stored buffer or stdin.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// JSON file keeping the buffer between runs. Its `code` entry is rewritten and replaced.
  #[arg(long)]
  store: Option<PathBuf>,

  /// Rewrite the built-in example program.
  #[arg(long, conflicts_with = "input")]
  example: bool,

  /// Comma-separated rules to enable: var-decl, for, while, do-while, ternary, if-else, if-assign.
  #[arg(long, value_name = "LIST")]
  rules: Option<RuleSet>,

  /// How a `while` body is folded into its test.
  #[arg(long, value_enum)]
  while_form: Option<WhileFormArg>,

  /// How the result is printed.
  #[arg(long, value_enum)]
  format: Option<FormatArg>,

  /// Maximum number of rewrite passes.
  #[arg(long, value_name = "N")]
  passes: Option<usize>,

  /// JSON file with default options; flags override it.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Print how often each rule applied to stderr as JSON.
  #[arg(long)]
  stats: bool,

  /// Log skipped and applied rules to stderr.
  #[arg(short, long)]
  verbose: bool,

  /// Log as JSON lines.
  #[arg(long)]
  log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WhileFormArg {
  AndTrue,
  Sequence,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
  Preserve,
  Canonical,
  Minified,
}

#[derive(Debug, Error)]
enum CliError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: io::Error,
  },
  #[error("{path} is not valid UTF-8")]
  InvalidUtf8 { path: String },
  #[error("invalid config {path}: {source}")]
  Config {
    path: String,
    #[source]
    source: serde_json::Error,
  },
  #[error("{path}:{line}:{column}: {source}")]
  Syntax {
    path: String,
    line: usize,
    column: usize,
    #[source]
    source: ExprifyError,
  },
  #[error("{path}: {source}")]
  Exprify {
    path: String,
    #[source]
    source: ExprifyError,
  },
  #[error("failed to write {path}: {source}")]
  Write {
    path: String,
    #[source]
    source: io::Error,
  },
  #[error(transparent)]
  Store(#[from] StoreError),
}

fn init_tracing(verbose: bool, json: bool) {
  if !verbose && !json {
    return;
  };
  let builder = tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_ansi(false)
    .with_writer(io::stderr);
  let _ = if json {
    builder.json().try_init()
  } else {
    builder.try_init()
  };
}

// One-based line and column of a byte offset.
fn line_col(source: &str, offset: usize) -> (usize, usize) {
  let before = &source[..offset.min(source.len())];
  let line_start = before.rfind('\n').map_or(0, |i| i + 1);
  (
    before.matches('\n').count() + 1,
    before[line_start..].chars().count() + 1,
  )
}

fn read_input(path: &Path) -> Result<String, CliError> {
  let name = path.display().to_string();
  let mut input = Vec::new();
  File::open(path)
    .and_then(|mut file| file.read_to_end(&mut input))
    .map_err(|source| CliError::Read {
      path: name.clone(),
      source,
    })?;
  String::from_utf8(input).map_err(|_| CliError::InvalidUtf8 { path: name })
}

fn read_stdin() -> Result<String, CliError> {
  let mut input = Vec::new();
  stdin()
    .read_to_end(&mut input)
    .map_err(|source| CliError::Read {
      path: "<stdin>".to_string(),
      source,
    })?;
  String::from_utf8(input).map_err(|_| CliError::InvalidUtf8 {
    path: "<stdin>".to_string(),
  })
}

/// The name and text of the code to rewrite.
fn read_source(args: &Cli, store: Option<&BufferStore>) -> Result<(String, String), CliError> {
  if let Some(path) = &args.input {
    return Ok((path.display().to_string(), read_input(path)?));
  };
  if args.example {
    return Ok(("<example>".to_string(), EXAMPLE_PROGRAM.to_string()));
  };
  match store {
    // An editor opened for the first time shows the example program.
    Some(store) => Ok(match store.get(CODE_KEY) {
      Some(code) => (CODE_KEY.to_string(), code.to_string()),
      None => ("<example>".to_string(), EXAMPLE_PROGRAM.to_string()),
    }),
    None => Ok(("<stdin>".to_string(), read_stdin()?)),
  }
}

fn load_options(args: &Cli) -> Result<ExprifyOptions, CliError> {
  let mut opts = match &args.config {
    Some(path) => {
      let name = path.display().to_string();
      let text = read_input(path)?;
      serde_json::from_str(&text).map_err(|source| CliError::Config { path: name, source })?
    }
    None => ExprifyOptions::default(),
  };
  if let Some(rules) = args.rules {
    opts = opts.with_rules(rules);
  };
  if let Some(while_form) = args.while_form {
    opts = opts.with_while_form(match while_form {
      WhileFormArg::AndTrue => WhileForm::AndTrue,
      WhileFormArg::Sequence => WhileForm::Sequence,
    });
  };
  if let Some(format) = args.format {
    opts = opts.with_emit_mode(match format {
      FormatArg::Preserve => EmitMode::Preserve,
      FormatArg::Canonical => EmitMode::Canonical,
      FormatArg::Minified => EmitMode::Minified,
    });
  };
  if let Some(passes) = args.passes {
    opts = opts.with_passes(passes);
  };
  Ok(opts)
}

fn write_output(dest: Option<&Path>, output: &str) -> Result<(), CliError> {
  match dest {
    Some(path) => fs::write(path, output).map_err(|source| CliError::Write {
      path: path.display().to_string(),
      source,
    }),
    None => stdout()
      .write_all(output.as_bytes())
      .map_err(|source| CliError::Write {
        path: "<stdout>".to_string(),
        source,
      }),
  }
}

fn run(args: &Cli) -> Result<(), CliError> {
  let opts = load_options(args)?;
  let mut store = args.store.as_deref().map(BufferStore::open).transpose()?;
  let (name, source) = read_source(args, store.as_ref())?;
  debug!(input = %name, rules = ?opts.rules, passes = opts.passes, "rewriting");
  let (output, stats) = exprify_with_stats(&source, &opts).map_err(|err| match err {
    ExprifyError::Syntax(syntax) => {
      let (line, column) = line_col(&source, syntax.loc.0);
      CliError::Syntax {
        path: name.clone(),
        line,
        column,
        source: ExprifyError::Syntax(syntax),
      }
    }
    other => CliError::Exprify {
      path: name.clone(),
      source: other,
    },
  })?;
  write_output(args.output.as_deref(), &output)?;
  if let Some(store) = store.as_mut() {
    store.set(CODE_KEY, output);
    store.save()?;
  };
  if args.stats {
    // Serializing a map of counters cannot fail.
    if let Ok(json) = serde_json::to_string(&stats) {
      eprintln!("{json}");
    };
  };
  Ok(())
}

fn main() {
  let args = match Cli::try_parse() {
    Ok(args) => args,
    Err(err) => {
      // Help and version requests are not failures.
      let code = if err.use_stderr() { 1 } else { 0 };
      let _ = err.print();
      process::exit(code);
    }
  };
  init_tracing(args.verbose, args.log_json);
  if let Err(err) = run(&args) {
    eprintln!("error: {err}");
    process::exit(1);
  };
}
