use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lead-sift")]
#[command(about = "🧹 Lead Sift: keeps the newest lead per _id and email, and logs every overwrite")]
#[command(version)]
pub struct Args {
    #[arg(help = "Input JSON file holding a top-level \"leads\" array")]
    pub input: PathBuf,

    #[arg(help = "Output file for deduplicated leads")]
    pub output: PathBuf,

    #[arg(help = "Output file for the change log")]
    pub change_log: PathBuf,

    #[arg(short, long, help = "Configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,
}
