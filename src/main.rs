use clap::Parser;
use fincalc::cli::{self, Cli, Command};
use fincalc::{api, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("Logging error: {e}");
        std::process::exit(1);
    }

    match cli.command {
        Command::Serve(args) => {
            if let Err(e) = api::run_http_server(&args.server_config()).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Calculate(calculation) => match cli::render(&calculation) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Calculation error: {e}");
                std::process::exit(1);
            }
        },
    }
}
