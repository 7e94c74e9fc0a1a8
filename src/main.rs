use anyhow::Result;
use banshee_exporter::banshee::{self, DumpFile, DumpSource, Filesystem, SqliteDump};
use banshee_exporter::model::SortOrder;
use banshee_exporter::{ExportConfig, ExportPipeline};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "banshee-exporter")]
#[command(about = "Export playlists from a Banshee library to playlist files", long_about = None)]
struct Args {
    /// Path to the Banshee database (banshee.db)
    #[arg(short = 'd', long, default_value = "~/.config/banshee-1/banshee.db")]
    database: String,

    /// Read an existing SQL dump instead of running sqlite3 on the database
    #[arg(long, value_name = "FILE")]
    dump_file: Option<String>,

    /// sqlite3 binary used to dump the database
    #[arg(long, default_value = "sqlite3")]
    sqlite: String,

    /// Target directory in which to place playlists
    #[arg(short = 'o', long, default_value = "~/playlists/")]
    output: String,

    /// Append a custom postfix to all playlist names
    #[arg(long, default_value = "")]
    postfix: String,

    /// Playlist file extension
    #[arg(long, default_value = "m3u")]
    ext: String,

    /// Remove existing playlists with the same extension before writing
    #[arg(long)]
    clear_dir: bool,

    /// Keep duplicate songs in playlists
    #[arg(long)]
    keep_duplicates: bool,

    /// Sort playlists by this key (leave out to keep entry positions)
    #[arg(long, value_parser = ["pos", "position", "id", "path"])]
    order: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Reject a bad criterion before touching the database
    let sort_order = args
        .order
        .as_deref()
        .map(str::parse::<SortOrder>)
        .transpose()?;

    // Expand ~ in paths
    let output_dir = PathBuf::from(shellexpand::tilde(&args.output).as_ref());

    let dump = match &args.dump_file {
        Some(path) => {
            let path = PathBuf::from(shellexpand::tilde(path).as_ref());
            log::info!("Reading dump from {:?}", path);
            DumpFile::new(path).read_dump()?
        }
        None => {
            let db_path = PathBuf::from(shellexpand::tilde(&args.database).as_ref());
            log::info!("Dumping Banshee database {:?}", db_path);
            SqliteDump::new(db_path)
                .with_program(args.sqlite.as_str())
                .read_dump()?
        }
    };

    let mut library = banshee::parse_library(&dump, &Filesystem)?;

    log::info!(
        "Library loaded: {} songs, {} playlists",
        library.song_count(),
        library.playlist_count()
    );

    let config = ExportConfig::new(output_dir)
        .with_extension(args.ext)
        .with_postfix(args.postfix)
        .with_clear_existing(args.clear_dir)
        .with_keep_duplicates(args.keep_duplicates)
        .with_sort_order(sort_order);

    let sink = config.directory_sink();
    let mut pipeline = ExportPipeline::new(config, sink);
    let written = pipeline.export(&mut library)?;

    log::info!("Wrote {} playlists to {:?}", written, pipeline.sink().dir());
    Ok(())
}
