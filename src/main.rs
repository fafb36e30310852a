use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use home_library::interface::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // stdoutは出力専用。ログはstderrへ。
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    let stdout = std::io::stdout();
    cli::run(args, &mut stdout.lock())
}
