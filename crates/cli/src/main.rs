use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use depfind_cli::{report, Config, Overrides};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "depfind")]
#[command(about = "Discover the libraries a C/C++ build needs from its includes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (defaults to ./depfind.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the libraries and source files needed by an entry file
    Resolve(ResolveArgs),

    /// List the libraries found in the library roots
    Libraries(LibrariesArgs),
}

#[derive(Args)]
struct CatalogArgs {
    /// Library root folder (repeatable, searched before configured roots)
    #[arg(long = "libraries", value_name = "DIR")]
    library_roots: Vec<PathBuf>,
}

#[derive(Args)]
struct ResolveArgs {
    /// Entry source file
    entry: PathBuf,

    #[command(flatten)]
    catalog: CatalogArgs,

    /// Build output folder (defaults to the entry file's folder)
    #[arg(long)]
    build_path: Option<PathBuf>,

    /// Include folder always on the include path (repeatable)
    #[arg(long = "include", value_name = "DIR")]
    include_folders: Vec<PathBuf>,

    /// Library to import up front (repeatable)
    #[arg(long = "library", value_name = "NAME")]
    libraries: Vec<String>,

    /// Preprocessor command
    #[arg(long)]
    compiler: Option<PathBuf>,

    /// Output JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LibrariesArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers
    let json_output = match &cli.command {
        Commands::Resolve(args) => args.json,
        Commands::Libraries(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve(args) => run_resolve(args, config),
        Commands::Libraries(args) => run_libraries(args, config),
    }
}

fn run_resolve(args: ResolveArgs, config: Config) -> Result<()> {
    let config = config.with_overrides(Overrides {
        build_path: args.build_path,
        library_roots: args.catalog.library_roots,
        include_folders: args.include_folders,
        libraries: args.libraries,
        compiler: args.compiler,
    });

    let resolution = depfind_cli::resolve(&config, &args.entry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print!("{}", report::render_resolution(&resolution));
    }
    Ok(())
}

fn run_libraries(args: LibrariesArgs, config: Config) -> Result<()> {
    let config = config.with_overrides(Overrides {
        library_roots: args.catalog.library_roots,
        ..Default::default()
    });

    let libraries = depfind_cli::list_libraries(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&libraries)?);
    } else {
        print!("{}", report::render_libraries(&libraries));
    }
    Ok(())
}
