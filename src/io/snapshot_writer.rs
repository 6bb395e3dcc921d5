use tokio::io::AsyncWrite;
use tokio_util::sync::CancellationToken;

use super::error::IoError;
use crate::domain::AmountType;
use crate::storage::AccountStore;

/// Write every account in the store as JSON lines
pub async fn write_snapshot<A, S, W>(
    store: &S,
    token: &CancellationToken,
    writer: W,
) -> Result<(), IoError>
where
    A: AmountType,
    S: AccountStore<A>,
    W: AsyncWrite + Unpin + Send,
{
    store.snapshot(token, writer).await?;
    Ok(())
}
