use clap::Parser;
use creditreset::adapter::inbound::cli::{self, output, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    let code = match cli::execute(&args).await {
        Ok(code) => code,
        Err(e) => {
            output::error(&e.to_string());
            1
        }
    };

    std::process::exit(code);
}
