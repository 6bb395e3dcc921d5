use std::sync::Arc;

use ledger::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{BufReader, BufWriter};
use tokio_util::sync::CancellationToken;

fn main() {
    init_tracing();
    std::process::exit(CliApp::new("ledger").run(run_ledger));
}

/// Provision the system accounts, then serve the menu over stdin/stdout
async fn run_ledger(token: CancellationToken) -> Result<(), AppError> {
    let config = LedgerConfig::load()?;

    let ledger = Arc::new(InMemoryLedger::<FixedPoint>::new());
    provision_system_accounts(&ledger, &token, &config.system_accounts())?;

    let mut session = MenuSession::new(
        TransferEngine::new(ledger),
        config,
        StdRng::from_entropy(),
        BufReader::new(tokio::io::stdin()),
        BufWriter::new(tokio::io::stdout()),
    );
    session.run(&token).await
}
