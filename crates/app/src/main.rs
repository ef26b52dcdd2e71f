use app::config::{Command, Config, print_usage};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let (command, rest) = Command::parse(argv).inspect_err(|_| print_usage())?;
    match command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Serve => {
            let config = Config::from_env()?
                .apply_args(&mut rest.into_iter())
                .inspect_err(|_| print_usage())?;
            app::serve(config).await
        }
    }
}
