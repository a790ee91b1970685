use namecard::{cli, init_logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    if let Err(error) = cli::run(std::env::args_os()).await {
        eprintln!("{error:#}");
        std::process::exit(1);
    }

    Ok(())
}
