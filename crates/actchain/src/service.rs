//! Async front for a [`Ledger`].
//!
//! Mining is a blocking, CPU-bound loop. The service runs every ledger
//! operation on tokio's blocking pool so async callers stay responsive, and
//! serialises access through a mutex so there is only ever one writer.

use std::sync::{Arc, Mutex};

use bytes::Bytes;

use actchain_core::{AdmissionPolicy, Block, CancelToken};

use crate::error::{IntegrityError, LedgerError, Result};
use crate::ledger::{Ledger, SubmitOutcome};

/// Shared, cancellable handle to a ledger.
pub struct LedgerService<P> {
    inner: Arc<Mutex<Ledger<P>>>,
    cancel: CancelToken,
}

impl<P> Clone for LedgerService<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel: self.cancel.clone(),
        }
    }
}

impl<P: AdmissionPolicy + 'static> LedgerService<P> {
    /// Wrap `ledger`. The service shares the cancel token from the ledger's
    /// mining config, so cancelling either one stops submissions.
    pub fn new(ledger: Ledger<P>) -> Self {
        let cancel = ledger.config().mining.cancel.clone();
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            cancel,
        }
    }

    /// Token polled by every submission made through this service.
    ///
    /// This is the same token as `LedgerConfig::mining.cancel`. Cancelling
    /// stops the in-flight search and fails queued ones until
    /// [`resume`](Self::resume) is called.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Clear a previous cancellation.
    pub fn resume(&self) {
        self.cancel.reset();
    }

    /// Mine and submit `payload` on the blocking pool.
    pub async fn submit(&self, payload: impl Into<Bytes>) -> Result<SubmitOutcome> {
        let payload = payload.into();
        self.with_ledger(move |ledger| ledger.submit(payload)).await?
    }

    /// Copy of the current chain.
    pub async fn snapshot(&self) -> Result<Vec<Block>> {
        self.with_ledger(|ledger| ledger.blocks().to_vec()).await
    }

    /// Number of blocks, genesis included.
    pub async fn len(&self) -> Result<usize> {
        self.with_ledger(|ledger| ledger.len()).await
    }

    /// Run [`Ledger::validate`] on the blocking pool.
    pub async fn validate(&self) -> Result<std::result::Result<(), IntegrityError>> {
        self.with_ledger(|ledger| ledger.validate()).await
    }

    async fn with_ledger<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Ledger<P>) -> R + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || -> Result<R> {
            let mut ledger = inner
                .lock()
                .map_err(|_| LedgerError::WorkerFailed("ledger lock poisoned".into()))?;
            Ok(f(&mut *ledger))
        })
        .await
        .map_err(|e| LedgerError::WorkerFailed(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use actchain_core::{AcceptAll, MiningControl, MiningError};
    use std::time::Duration;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_submits_are_serialised() {
        let service = LedgerService::new(Ledger::with_config(LedgerConfig::new(1), AcceptAll));

        let mut handles = Vec::new();
        for i in 0..8 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service.submit(format!("payload-{i}")).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_accepted());
        }

        assert_eq!(service.len().await.unwrap(), 9);
        assert!(service.validate().await.unwrap().is_ok());

        let blocks = service.snapshot().await.unwrap();
        for (i, block) in blocks.iter().enumerate() {
            assert_eq!(block.index, i as u64);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cancel_stops_in_flight_search() {
        // 64 leading zeros will not be found before the cancel lands.
        let service = LedgerService::new(Ledger::with_config(LedgerConfig::new(64), AcceptAll));

        let pending = {
            let service = service.clone();
            tokio::spawn(async move { service.submit("never").await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        service.cancel_token().cancel();

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Mining(MiningError::Cancelled { .. })
        ));
        assert_eq!(service.len().await.unwrap(), 1);

        service.resume();
        assert!(!service.cancel_token().is_cancelled());
    }

    #[tokio::test]
    async fn test_config_cancel_token_is_honoured() {
        let token = CancelToken::new();
        token.cancel();
        let config =
            LedgerConfig::new(1).mining(MiningControl::unbounded().cancel_token(token.clone()));

        let mut direct = Ledger::with_config(config.clone(), AcceptAll);
        assert!(matches!(
            direct.submit("abc"),
            Err(LedgerError::Mining(MiningError::Cancelled { .. }))
        ));

        let service = LedgerService::new(Ledger::with_config(config, AcceptAll));
        assert!(service.cancel_token().is_cancelled());
        let err = service.submit("abc").await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Mining(MiningError::Cancelled { .. })
        ));
        assert_eq!(service.len().await.unwrap(), 1);

        // Resuming through the service clears the config token too.
        service.resume();
        assert!(!token.is_cancelled());
        assert!(service.submit("abc").await.unwrap().is_accepted());
    }

    #[tokio::test]
    async fn test_rejection_through_service() {
        let service = LedgerService::new(Ledger::new(1));
        let outcome = service.submit("abcde").await.unwrap();
        assert!(outcome.is_rejected());
        assert_eq!(service.len().await.unwrap(), 1);
    }
}
