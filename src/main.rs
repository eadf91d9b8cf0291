//! repo-scaffold's entry point: parses arguments, configures logging and
//! hands over to the command runner.

use repo_scaffold::{cli::get_args, error::default_error_handler, runner::run};

fn main() {
    let args = get_args();

    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}
