use go_eval_host::console::{self, Command};
use go_eval_host::{Driver, HostConfig};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "go_eval=info,go_eval_host=info".into()),
        )
        .init();

    let config = match HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };
    let size = config.eval.board_size;
    tracing::info!(size, komi = config.eval.komi, "Starting offline console");

    let driver = match Driver::offline(config) {
        Ok(driver) => driver,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Command::parse(&line, size) {
            Ok(Command::Quit) => break,
            Ok(command) => match console::execute(&driver, command).await {
                Ok(out) => format!("= {out}"),
                Err(e) => format!("? {e}"),
            },
            Err(e) => format!("? {e}"),
        };

        let written = stdout.write_all(format!("{reply}\n\n").as_bytes()).await;
        if let Err(e) = written.and(stdout.flush().await) {
            tracing::error!("Failed to write stdout: {e}");
            break;
        }
    }
}
