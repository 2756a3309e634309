use std::io;

use bikeshare::app::BikeshareArgs;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = BikeshareArgs::parse();
    match args.run(io::stdin().lock(), io::stdout().lock()) {
        Ok(cycles) => log::info!("finished after {cycles} report cycle(s)."),
        Err(e) => {
            log::error!("failed running bikeshare: {e}");
            std::process::exit(1);
        }
    }
}
