use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::config::LedgerConfig;
use super::error::AppError;
use crate::domain::{AmountType, Iban};
use crate::engine::{EngineError, TransferEngine, open_account};
use crate::io::{IoError, encode_account, write_snapshot};
use crate::storage::AccountStore;

const MAIN_MENU: &str = "\
1. Show the issuance account
2. Show the destruction account
3. Issue funds into the issuance account
4. Destroy funds (transfer from an account to the destruction account)
5. Open a new account
6. Transfer funds
7. List all accounts
0. Exit
Enter your choice: ";

const TRANSFER_MENU: &str = "\
1. By parameters
2. As JSON
0. Cancel
Choose transfer type: ";

enum Flow {
    Continue,
    Exit,
}

/// Interactive text menu over a transfer engine.
///
/// Reads one answer per line from `input` and writes prompts and results to
/// `output`. Failed operations are reported and the loop carries on; only
/// output failures, end of input, cancellation or `0` end the session.
pub struct MenuSession<A, S, G, R, W>
where
    A: AmountType,
    S: AccountStore<A>,
{
    engine: TransferEngine<A, S>,
    config: LedgerConfig,
    rng: G,
    input: Lines<R>,
    output: W,
}

impl<A, S, G, R, W> MenuSession<A, S, G, R, W>
where
    A: AmountType,
    S: AccountStore<A>,
    G: Rng,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(
        engine: TransferEngine<A, S>,
        config: LedgerConfig,
        rng: G,
        input: R,
        output: W,
    ) -> Self {
        Self {
            engine,
            config,
            rng,
            input: input.lines(),
            output,
        }
    }

    pub fn engine(&self) -> &TransferEngine<A, S> {
        &self.engine
    }

    /// Run until exit, end of input or cancellation
    pub async fn run(&mut self, token: &CancellationToken) -> Result<(), AppError> {
        loop {
            self.write(MAIN_MENU).await?;
            let Some(choice) = self.next_line().await? else {
                break;
            };

            match self.dispatch(token, &choice).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(AppError::Io(err)) => return Err(AppError::Io(err)),
                Err(AppError::Engine(EngineError::Cancelled)) => {
                    debug!("Menu session cancelled");
                    break;
                }
                Err(err) => self.write(&format!("Error: {err}\n")).await?,
            }
            self.write("\n").await?;
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn dispatch(&mut self, token: &CancellationToken, choice: &str) -> Result<Flow, AppError> {
        match choice {
            "1" => {
                let iban = self.config.issuance_iban.clone();
                self.show_account(token, &iban).await?;
            }
            "2" => {
                let iban = self.config.destruction_iban.clone();
                self.show_account(token, &iban).await?;
            }
            "3" => {
                let Some(amount) = self.prompt_amount("Amount to issue: ").await? else {
                    return Ok(Flow::Exit);
                };
                self.engine
                    .deposit_funds(token, &self.config.issuance_iban, amount)?;
                self.write(&format!("Issued {amount}\n")).await?;
            }
            "4" => {
                let Some(amount) = self.prompt_amount("Amount to destroy: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(sender) = self.prompt_iban("Sender IBAN: ").await? else {
                    return Ok(Flow::Exit);
                };
                self.engine.transfer_funds(
                    token,
                    &sender,
                    &self.config.destruction_iban,
                    amount,
                )?;
                self.write(&format!("Destroyed {amount} from {sender}\n")).await?;
            }
            "5" => {
                let iban = open_account(
                    self.engine.store(),
                    token,
                    &self.config.country_code,
                    &mut self.rng,
                )
                .map_err(EngineError::from)?;
                self.write(&format!("Opened account {iban}\n")).await?;
            }
            "6" => return self.transfer_menu(token).await,
            "7" => {
                write_snapshot(self.engine.store(), token, &mut self.output)
                    .await
                    .map_err(|err| match err {
                        IoError::Storage(err) => AppError::Engine(EngineError::from(err)),
                        other => AppError::Wire(other),
                    })?;
            }
            "0" => return Ok(Flow::Exit),
            other => {
                return Err(AppError::InvalidInput(format!("unknown option {other:?}")));
            }
        }
        Ok(Flow::Continue)
    }

    async fn transfer_menu(&mut self, token: &CancellationToken) -> Result<Flow, AppError> {
        self.write(TRANSFER_MENU).await?;
        let Some(kind) = self.next_line().await? else {
            return Ok(Flow::Exit);
        };

        match kind.as_str() {
            "1" => {
                let Some(amount) = self.prompt_amount("Amount to transfer: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(sender) = self.prompt_iban("Sender IBAN: ").await? else {
                    return Ok(Flow::Exit);
                };
                let Some(receiver) = self.prompt_iban("Receiver IBAN: ").await? else {
                    return Ok(Flow::Exit);
                };
                self.engine
                    .transfer_funds(token, &sender, &receiver, amount)?;
                self.write(&format!("Transferred {amount} from {sender} to {receiver}\n"))
                    .await?;
            }
            "2" => {
                let Some(payload) = self.prompt("Transfer JSON: ").await? else {
                    return Ok(Flow::Exit);
                };
                self.engine
                    .transfer_funds_via_payload(token, payload.as_bytes())?;
                self.write("Transfer completed\n").await?;
            }
            "0" => {}
            other => {
                return Err(AppError::InvalidInput(format!(
                    "unknown transfer type {other:?}"
                )));
            }
        }
        Ok(Flow::Continue)
    }

    async fn show_account(&mut self, token: &CancellationToken, iban: &Iban) -> Result<(), AppError> {
        let account = self.engine.get_account(token, iban)?;
        let line = encode_account(&account)?;
        self.write(&format!("{line}\n")).await
    }

    async fn prompt_amount(&mut self, prompt: &str) -> Result<Option<A>, AppError> {
        match self.prompt(prompt).await? {
            Some(raw) => Ok(Some(A::from_decimal_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn prompt_iban(&mut self, prompt: &str) -> Result<Option<Iban>, AppError> {
        Ok(self.prompt(prompt).await?.map(Iban::from))
    }

    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        self.write(prompt).await?;
        self.next_line().await
    }

    async fn next_line(&mut self) -> Result<Option<String>, AppError> {
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }

    async fn write(&mut self, text: &str) -> Result<(), AppError> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}
