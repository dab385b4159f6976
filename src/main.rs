mod config;
mod copier;
mod datekey;
mod listing;
mod matcher;
mod mounts;
mod scanner;
mod types;

use chrono::Local;
use clap::Parser;
use config::Config;
use matcher::ArchiveIndex;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(version, about = "Copy new photo folders from an exfat card into the local archive", long_about = None)]
struct Args {
    /// Maximum number of folders to copy per run
    #[arg(long, short = 'c', default_value_t = 1)]
    count: usize,

    /// List card folders instead of copying them
    #[arg(long, short = 'l')]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mount_points = match mounts::exfat_mount_points() {
        Ok(points) => points,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let year = Local::now().format("%Y").to_string();
    let photos_dir = Path::new(&config.photo_path).join(&year);
    let archive = ArchiveIndex::new(&scanner::archive_dirs(&photos_dir));

    for mount_point in &mount_points {
        let dcim_path = Path::new(mount_point).join("DCIM");
        if !dcim_path.is_dir() {
            continue;
        }

        let card_dirs = scanner::card_dirs(&dcim_path);

        if args.list {
            listing::print_card_dirs(&card_dirs);
        } else {
            copier::copy_new_dirs(card_dirs, &archive, &photos_dir, args.count);
        }
    }
}
