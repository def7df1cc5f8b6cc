use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use itemset_core::core_api::{
    DEFAULT_MAP_CODE, Engine, ItemIdMap, RunOptions, detect_champions_root, flatten_changes,
};
use itemset_render::{render_json_report, render_text_report};
use tracing_subscriber::EnvFilter;

/// Replaces renumbered item IDs in Champions/*/Recommended/*.json item sets.
///
/// Changes are applied by default (a .bak copy is kept next to each modified
/// file); use --dry-run to only report. Launching without arguments from a
/// terminal starts the interactive mode.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Champions folder, e.g. "C:/Riot Games/League of Legends/Config/Champions".
    /// Auto-detected when omitted.
    #[arg(long, value_name = "DIR", env = "ITEMSET_FIX_ROOT")]
    root: Option<PathBuf>,
    /// Do not write files; only report what would change.
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Do not create .bak copies when applying changes.
    #[arg(long = "no-backup")]
    no_backup: bool,
    /// Only item sets whose "map" field equals this code are rewritten.
    #[arg(long = "map", value_name = "CODE", default_value = DEFAULT_MAP_CODE)]
    map_code: String,
    /// JSON array of {old_id, new_id, name_es, name_en} replacing the built-in table.
    #[arg(long = "id-map", value_name = "FILE")]
    id_map: Option<PathBuf>,
    /// Print the report as JSON.
    #[arg(long, conflicts_with = "interactive")]
    json: bool,
    /// Start the interactive mode even when other arguments are given.
    #[arg(long, visible_alias = "gui")]
    interactive: bool,
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let launched_bare = std::env::args_os().len() == 1;
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let id_map = match &cli.id_map {
        Some(path) => ItemIdMap::load_json(path).unwrap_or_else(|e| {
            eprintln!("Error loading ID map {}: {}", path.display(), e.message);
            process::exit(2);
        }),
        None => ItemIdMap::embedded(),
    };
    let engine = Engine::new(id_map);

    if cli.interactive || (launched_bare && io::stdin().is_terminal()) {
        let default_root = cli.root.clone().or_else(detect_champions_root);
        let stdin = io::stdin();
        run_interactive_or_exit(&engine, default_root, &cli.map_code, stdin.lock());
        return;
    }

    let root = cli
        .root
        .clone()
        .or_else(detect_champions_root)
        .unwrap_or_else(|| {
            eprintln!("ERROR: Could not auto-detect Champions folder. Use --root with the correct path.");
            process::exit(2);
        });
    if !root.is_dir() {
        eprintln!("ERROR: Not a folder: {}", root.display());
        process::exit(2);
    }
    tracing::info!("using Champions folder {}", root.display());

    let options = RunOptions {
        apply_changes: !cli.dry_run,
        backup: !cli.no_backup,
        map_code: cli.map_code.clone(),
    };
    let result = engine.run(&root, &options).unwrap_or_else(|e| {
        eprintln!("ERROR: {}", e.message);
        process::exit(2);
    });
    let rows = flatten_changes(&result, engine.id_map());

    if cli.json {
        let json = render_json_report(&result, &rows);
        let rendered = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
            eprintln!("Error rendering JSON output: {e}");
            process::exit(1);
        });
        println!("{rendered}");
        return;
    }

    print!("{}", render_text_report(&result, &rows));
}

fn run_interactive_or_exit<R: io::BufRead>(
    engine: &Engine,
    default_root: Option<PathBuf>,
    map_code: &str,
    input: R,
) {
    let stdout = io::stdout();
    if let Err(e) = itemset_tui::run_interactive(engine, default_root, map_code, input, stdout.lock())
    {
        eprintln!("Error in interactive mode: {e}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
