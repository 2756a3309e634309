mod bikeshare_cli;

pub use bikeshare_cli::BikeshareArgs;
