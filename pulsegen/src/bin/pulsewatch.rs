use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pulsegen::subscriber::Subscription;
use pulsegen::WatchArgs;

const GIT_VERSION: &str = git_version::git_version!(fallback = "unknown");

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: WatchArgs = argh::from_env();

    if args.version {
        println!(
            concat!(
                env!("CARGO_BIN_NAME"),
                " ",
                "{}",
            ),
            GIT_VERSION,
        );
        return Ok(())
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let endpoint = format!("tcp://{}", args.addr);
    let mut sub = Subscription::connect(&endpoint, &args.channel).await?;

    loop {
        tokio::select! {
            pulse = sub.recv() => {
                let pulse = pulse?;
                let first = pulse.post_trigger().first().cloned().unwrap_or_default();
                println!(
                    "chan {} presamples {} nsamples {} trigger sample {}",
                    pulse.channel(),
                    pulse.header.presamples,
                    pulse.header.nsamples,
                    first,
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Manual shutdown signal received. Goodbye!");
                break;
            }
        }
    }
    Ok(())
}
