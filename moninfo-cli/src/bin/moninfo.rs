//! Standalone CLI tool for dumping WMI monitor identification rows.
//!
//! Prints a JSON array (default) or a tab-separated table with one row per
//! monitor.  Warnings from the query go to stderr via `env_logger`.

use clap::Parser;
use moninfo_core::row::COLUMNS;
use moninfo_core::MonitorRow;

#[derive(Parser)]
#[command(name = "moninfo", about = "List connected monitors from WmiMonitorID")]
struct Args {
    /// Compact JSON output (no pretty-printing)
    #[arg(long)]
    compact: bool,

    /// Strip trailing NUL padding from every column
    #[arg(long)]
    trim: bool,

    /// Tab-separated table instead of JSON
    #[arg(long, conflicts_with = "compact")]
    table: bool,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn render_table(rows: &[MonitorRow]) -> String {
    let mut out = COLUMNS.join("\t");
    out.push('\n');
    for row in rows {
        let line: Vec<&str> = row.columns().iter().map(|(_, value)| *value).collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut rows = moninfo_core::collect_monitors();
    if args.trim {
        rows = rows.iter().map(MonitorRow::trimmed).collect();
    }
    log::debug!("moninfo: {} monitor(s)", rows.len());

    if args.table {
        print!("{}", render_table(&rows));
        return;
    }

    let json = if args.compact {
        serde_json::to_string(&rows)
    } else {
        serde_json::to_string_pretty(&rows)
    };

    match json {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("moninfo: failed to serialize rows: {e}");
            std::process::exit(1);
        }
    }
}
