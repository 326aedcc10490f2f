use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{DocKey, DocumentStore, TxnWrite};
use crate::error::AppError;

/// Outcome of a typed transaction step: what to write and what to return.
#[derive(Debug)]
pub enum TxnStep<T, R> {
    Put(T, R),
    Delete(R),
    Keep(R),
}

/// Load and decode a document.
pub async fn get_doc<S, T>(store: &S, key: &DocKey) -> Result<Option<T>, AppError>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Execute a typed read-modify-write step inside a store transaction.
///
/// 1) The store reads the document; it is decoded into `T`
/// 2) `f` validates against that fresh read and computes the next document
/// 3) The store commits atomically, re-running `f` on a concurrent write
///
/// An `Err` from `f` aborts the transaction with nothing written. When the
/// step is re-run, only the result of the attempt that committed is returned.
pub async fn with_txn<S, T, R, F>(store: &S, key: &DocKey, mut f: F) -> Result<R, AppError>
where
    S: DocumentStore + ?Sized,
    T: Serialize + DeserializeOwned,
    R: Send,
    F: FnMut(Option<T>) -> Result<TxnStep<T, R>, AppError> + Send,
{
    let mut committed: Option<R> = None;
    store
        .transact(key, &mut |current| {
            let doc = match current {
                Some(value) => Some(serde_json::from_value::<T>(value.clone())?),
                None => None,
            };
            match f(doc)? {
                TxnStep::Put(next, out) => {
                    let value = serde_json::to_value(&next)?;
                    committed = Some(out);
                    Ok(TxnWrite::Put(value))
                }
                TxnStep::Delete(out) => {
                    committed = Some(out);
                    Ok(TxnWrite::Delete)
                }
                TxnStep::Keep(out) => {
                    committed = Some(out);
                    Ok(TxnWrite::Keep)
                }
            }
        })
        .await?;

    committed.ok_or_else(|| AppError::internal("transaction committed without a result"))
}
