use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = dalion::cli::Cli::parse();
    dalion::logging::init_logging(cli.verbose);
    let exit_code = dalion::run(cli).await;
    std::process::exit(exit_code);
}
