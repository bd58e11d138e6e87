use std::env;

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

use StoiThe::Balancer::balance_api::compute;
use StoiThe::cli::cli_main::run_interactive_menu;

fn main() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Warn,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu();
        return;
    }
    // equation given on the command line: balance it and exit
    let input = args.join(" ");
    match compute(&input) {
        Ok(result) => println!("{}", result.rendered),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
