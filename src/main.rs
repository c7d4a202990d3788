//! CLI entry point for listall

use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::Parser;
use env_logger::Env;
use listall::{
    CollectStrategy, Config, Decorator, Decorators, FormatMode, OutputTarget, PathStyle, Renderer,
    SortMode, Sink, build_tree, to_json,
};
use log::{debug, warn};

const SORT_HELP: &str = "\
Order of entries within each directory (files first, then directories):

  name         code-point order
  iname        case-insensitive order
  sequence     digit runs compare as numbers: file2 < file10
  isequence    case-insensitive sequence
  winsequence  like Windows Explorer: punctuation first, then numbers, then letters
  date         oldest modification time first";

const PATH_STYLE_HELP: &str = "\
How each path is written:

  full       absolute path
  rel        relative to the listed directory; the directory itself is '.'
  rel-base   relative, starting with the listed directory's name (or --base-label)
  files-only bare names without any directory part";

#[derive(Parser, Debug)]
#[command(name = "listall")]
#[command(about = "List directory trees with natural sorting and brace summaries")]
#[command(version)]
struct Args {
    /// Directories to list (e.g. -d a b, or -d a -d b)
    #[arg(short = 'd', long = "dir", value_name = "DIR", num_args = 1.., default_value = ".")]
    dirs: Vec<PathBuf>,

    /// Skip entries matching glob pattern (can be used multiple times)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Path style
    #[arg(short = 'p', long = "path-style", default_value = "rel-base", long_help = PATH_STYLE_HELP)]
    path_style: PathStyle,

    /// Output format
    #[arg(short = 'F', long = "format", default_value = "inline")]
    format: FormatMode,

    /// Which entries to collect
    #[arg(short = 'c', long = "collect", default_value = "all")]
    collect: CollectStrategy,

    /// Sort order
    #[arg(short = 's', long = "sort", default_value = "iname", long_help = SORT_HELP)]
    sort: SortMode,

    /// Path decorator (can be used multiple times; defaults to the platform separator)
    #[arg(long = "decorator", value_name = "DECORATOR")]
    decorators: Vec<Decorator>,

    /// Truncate runs of more than N files
    #[arg(long = "collect-limit", value_name = "N")]
    collect_limit: Option<usize>,

    /// Files kept at each end of a truncated run (default: 1)
    #[arg(long = "collect-limit-min", value_name = "N", requires = "collect_limit")]
    collect_limit_min: Option<usize>,

    /// Fail instead of printing absolute paths when a relative path crosses drives
    #[arg(long = "strict-rel")]
    strict_rel: bool,

    /// Name used in place of the directory's own name for rel-base paths
    #[arg(long = "base-label", value_name = "LABEL")]
    base_label: Option<String>,

    /// Spaces per level in summary output
    #[arg(short = 'i', long = "indent", default_value = "2")]
    indent: usize,

    /// Close summary braces on the last child's line
    #[arg(long = "compact-braces")]
    compact_braces: bool,

    /// Descend only N levels deep
    #[arg(long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Do not descend into directories holding at least N files
    #[arg(long = "prune-large-dirs", value_name = "N")]
    prune_large_dirs: Option<usize>,

    /// Where to send the listing (can be used multiple times)
    #[arg(short = 'o', long = "output", value_name = "TARGET")]
    output: Vec<OutputTarget>,

    /// File name for file output (default: listall_YY.MM.DD_HH-MM.txt)
    #[arg(short = 'f', long = "filename", value_name = "FILE")]
    filename: Option<PathBuf>,

    /// Output the collected tree as JSON
    #[arg(long = "json")]
    json: bool,

    /// Log walk decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn config_for(&self, root: &Path, decorators: Decorators) -> Config {
        Config {
            root: root.to_path_buf(),
            max_depth: self.max_depth,
            exclude: self.exclude.clone(),
            sort: self.sort,
            collect: self.collect,
            path_style: self.path_style,
            decorators,
            format: self.format,
            compact_braces: self.compact_braces,
            indent: self.indent,
            collect_limit: self.collect_limit,
            collect_limit_min: self.collect_limit_min,
            strict_rel: self.strict_rel,
            base_label: self.base_label.clone(),
            prune_large_dirs: self.prune_large_dirs,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// List one root, returning its resolved path and payload.
fn run(config: &Config, json: bool) -> listall::Result<(PathBuf, String)> {
    let tree = build_tree(config)?;
    for node in tree.unreadable_dirs() {
        warn!(
            "cannot read '{}': {}",
            node.entry.path.display(),
            node.unreadable.as_deref().unwrap_or_default()
        );
    }
    let text = if json {
        to_json(&tree)?
    } else {
        Renderer::new(config).render(&tree)?
    };
    Ok((tree.entry.path.clone(), text))
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let decorators = if args.decorators.is_empty() {
        Decorators::platform_default()
    } else {
        args.decorators.iter().copied().collect()
    };

    let mut sections = Vec::with_capacity(args.dirs.len());
    for dir in &args.dirs {
        let config = args.config_for(dir, decorators);
        debug!("listing {}", dir.display());
        match run(&config, args.json) {
            Ok(section) => sections.push(section),
            Err(e) => {
                eprintln!("listall: {e}");
                process::exit(1);
            }
        }
    }

    let payload = if let [(_, text)] = sections.as_slice() {
        text.clone()
    } else {
        let mut lumps = Vec::new();
        for (root, text) in sections {
            lumps.push(format!("=== Listing for: {} ===", root.display()));
            lumps.push(text);
            lumps.push(String::new());
        }
        lumps.join("\n")
    };

    for sink in Sink::from_targets(&args.output, args.filename.clone(), Local::now()) {
        if let Err(e) = sink.deliver(&payload) {
            eprintln!("listall: error writing output: {e}");
            process::exit(1);
        }
        if let Sink::File(path) = &sink {
            eprintln!("listall: wrote {}", path.display());
        }
    }
}
