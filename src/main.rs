use std::{env, process::exit};
use symcat::catalog::{self, IndexCatalog, SetCatalog};
use symcat::emit::{self, Declaration};
use symcat::extract;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// The shared object cataloged when no --library is given.
const DEFAULT_LIBRARY: &str = "/usr/lib/x86_64-linux-gnu/libc.so.6";

struct Opts {
    /// The shared object to catalog.
    library: String,

    /// Destination for the indexed catalog header, if requested.
    index_out: Option<String>,

    /// Destination for the set catalog header, if requested.
    set_out: Option<String>,

    /// Variable name declared in the indexed catalog header.
    index_name: String,

    /// Variable name declared in the set catalog header.
    set_name: String,
}

fn main() {
    setup_logging();

    let args: Vec<String> = env::args().collect();
    let opts = parse_opts(&args);

    if let Err(e) = run(&opts) {
        eprintln!("symcat: {e}");
        exit(1);
    }
}

fn run(opts: &Opts) -> symcat::Result<()> {
    let raw = extract::extract_exported_functions(&opts.library)?;
    let canonical = catalog::normalize(raw);
    debug!(
        "{}: {} distinct exported functions",
        opts.library,
        canonical.len()
    );

    if let Some(path) = &opts.index_out {
        let index = IndexCatalog::from_names(canonical.clone());
        let decl = Declaration::cxx_index_map(&opts.index_name);
        emit::write_atomic(path, &emit::render_index(&index, &decl))?;
    }
    if let Some(path) = &opts.set_out {
        let set = SetCatalog::from_names(canonical);
        let decl = Declaration::cxx_name_set(&opts.set_name);
        emit::write_atomic(path, &emit::render_set(&set, &decl))?;
    }
    Ok(())
}

fn parse_opts(args: &[String]) -> Opts {
    let mut opts = Opts {
        library: DEFAULT_LIBRARY.to_string(),
        index_out: None,
        set_out: None,
        index_name: "dummy_syscall_map".to_string(),
        set_name: "libc_callnames".to_string(),
    };

    fn value(args: &[String], i: usize) -> String {
        args.get(i + 1).cloned().unwrap_or_else(|| {
            eprintln!("symcat: {} requires a value", args[i]);
            usage();
        })
    }

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--library" => opts.library = value(args, i),
            "--index-out" => opts.index_out = Some(value(args, i)),
            "--set-out" => opts.set_out = Some(value(args, i)),
            "--index-name" => opts.index_name = value(args, i),
            "--set-name" => opts.set_name = value(args, i),
            _ => {
                eprintln!("symcat: unknown option {}", args[i]);
                usage();
            }
        }
        i += 2;
    }

    if opts.index_out.is_none() && opts.set_out.is_none() {
        eprintln!("symcat: at least one of --index-out or --set-out is required");
        usage();
    }
    opts
}

fn usage() -> ! {
    eprintln!(
        "usage: symcat [--library <shared-object>] [--index-out <path>] [--set-out <path>]\n\
         \x20             [--index-name <ident>] [--set-name <ident>]"
    );
    exit(1);
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
