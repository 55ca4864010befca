use std::io::{self, BufRead, Write};

use configs::ClientConfig;
use tracing::{debug, info};

use crate::api::{HttpProductApi, ProductApi};
use crate::availability::{wait_until_available, RetryPolicy};
use crate::error_log::ErrorLog;
use crate::input::Console;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The menu ran and the user left it.
    Finished,
    /// The service never answered; the menu was not entered.
    Unavailable,
}

/// Handshake with the service, then run the menu over `input`/`output`.
pub async fn run_with<A, R, W>(
    api: &A,
    policy: &RetryPolicy,
    log: &ErrorLog,
    input: R,
    mut output: W,
) -> io::Result<Outcome>
where
    A: ProductApi + ?Sized,
    R: BufRead,
    W: Write,
{
    if let Err(e) = wait_until_available(api, policy, log, &mut output).await {
        debug!(attempts = e.attempts, error = %e.last, "giving up on the service");
        return Ok(Outcome::Unavailable);
    }

    let mut session = Session::new(api, log, Console::new(input, output));
    session.run().await?;
    Ok(Outcome::Finished)
}

/// Run the client on the process terminal.
pub async fn run(cfg: &ClientConfig) -> anyhow::Result<Outcome> {
    let log = ErrorLog::open(&cfg.error_log)?;
    let api = HttpProductApi::from_config(cfg)?;
    let policy = RetryPolicy::from_config(cfg);
    info!(base_url = %api.base_url(), max_attempts = policy.max_attempts(), "client starting");

    let stdin = io::stdin();
    let outcome = run_with(&api, &policy, &log, stdin.lock(), io::stdout()).await;
    log.close();
    Ok(outcome?)
}
