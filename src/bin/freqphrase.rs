use clap::Parser;
use freqphrase::cli::{self, Args};

fn main() {
    env_logger::init();
    let args = Args::parse();
    std::process::exit(cli::run(args));
}
