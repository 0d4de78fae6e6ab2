use std::io::{self, BufRead, Write};

use cargotrack_api::HostConfig;
use cargotrack_api::host::{LocalHost, outcome_json, parse_line};

fn main() -> anyhow::Result<()> {
    let config = HostConfig::from_env()?;
    cargotrack_observability::init(config.log_format);

    let host = LocalHost::new(config.context()?);
    tracing::info!(
        namespace = %config.namespace,
        policy = ?config.submission_policy,
        "reading invocations from stdin"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some((function, args)) = parse_line(&line) else {
            continue;
        };
        let outcome = host.submit(function, &args);
        writeln!(stdout, "{}", outcome_json(&outcome))?;
        stdout.flush()?;
    }

    Ok(())
}
