//! Debounced quote refresh.
//!
//! Front ends push the current form on every keystroke. The refresher waits
//! for `debounce` of quiet, quotes the latest form and publishes the outcome
//! on a `watch` channel. A form that arrives while a quote is in flight
//! cancels it, so a result is never published for a superseded form.

use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::client::{GatewayClient, SdkError};
use crate::types::{Quote, QuoteParams};
use crate::units::to_base_units;

/// Anything that can produce a quote.
pub trait QuoteSource: Send + Sync + 'static {
    fn quote(&self, params: QuoteParams) -> impl Future<Output = Result<Quote, SdkError>> + Send;
}

impl QuoteSource for GatewayClient {
    fn quote(&self, params: QuoteParams) -> impl Future<Output = Result<Quote, SdkError>> + Send {
        let client = self.clone();
        async move { client.get_quote(&params).await }
    }
}

/// What the user has entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteForm {
    pub chain_key: String,
    pub user_address: String,
    pub input_token: String,
    pub output_token: String,
    /// Human-readable amount, e.g. `"0.5"`.
    pub amount: String,
    /// Decimals of the input token.
    pub decimals: u8,
}

impl QuoteForm {
    /// Quote parameters, or `None` when there is nothing to quote.
    fn params(&self) -> Result<Option<QuoteParams>, String> {
        if self.amount.trim().is_empty() {
            return Ok(None);
        }
        let input_amount = to_base_units(&self.amount, self.decimals).map_err(|e| e.to_string())?;
        if input_amount == "0" {
            return Ok(None);
        }

        Ok(Some(QuoteParams {
            input_token: self.input_token.clone(),
            output_token: self.output_token.clone(),
            input_amount,
            user_address: self.user_address.clone(),
            chain_id: self.chain_key.clone(),
        }))
    }
}

/// Published refresh state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuoteState {
    /// No quote: nothing entered yet, or the amount is empty or zero.
    #[default]
    Idle,
    Loading,
    Ready { form: QuoteForm, quote: Quote },
    Failed { form: QuoteForm, error: String },
}

/// Handle to a running refresh loop. Dropping it stops the loop.
pub struct QuoteRefresher {
    forms: mpsc::UnboundedSender<QuoteForm>,
    state: watch::Receiver<QuoteState>,
    task: JoinHandle<()>,
}

impl QuoteRefresher {
    pub fn spawn<S: QuoteSource>(source: S, debounce: Duration) -> Self {
        let (forms_tx, forms_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(QuoteState::Idle);
        let task = tokio::spawn(run(source, debounce, forms_rx, state_tx));

        Self {
            forms: forms_tx,
            state: state_rx,
            task,
        }
    }

    /// Submit the current form.
    pub fn update(&self, form: QuoteForm) {
        if self.forms.send(form).is_err() {
            tracing::debug!("Quote refresher stopped, update ignored");
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.state.clone()
    }

    pub fn current(&self) -> QuoteState {
        self.state.borrow().clone()
    }
}

impl Drop for QuoteRefresher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<S: QuoteSource>(
    source: S,
    debounce: Duration,
    mut forms: mpsc::UnboundedReceiver<QuoteForm>,
    state: watch::Sender<QuoteState>,
) {
    let mut next: Option<QuoteForm> = None;

    loop {
        let mut form = match next.take() {
            Some(form) => form,
            None => match forms.recv().await {
                Some(form) => form,
                None => return,
            },
        };

        // Debounce: restart the quiet period on every update.
        loop {
            match tokio::time::timeout(debounce, forms.recv()).await {
                Ok(Some(newer)) => form = newer,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        let params = match form.params() {
            Ok(Some(params)) => params,
            Ok(None) => {
                state.send_replace(QuoteState::Idle);
                continue;
            }
            Err(error) => {
                state.send_replace(QuoteState::Failed { form, error });
                continue;
            }
        };

        state.send_replace(QuoteState::Loading);
        tokio::select! {
            result = source.quote(params) => {
                let update = match result {
                    Ok(quote) => QuoteState::Ready { form, quote },
                    Err(e) => QuoteState::Failed { form, error: e.to_string() },
                };
                state.send_replace(update);
            }
            newer = forms.recv() => match newer {
                Some(newer) => {
                    tracing::debug!("Form changed while quoting, dropping stale result");
                    next = Some(newer);
                }
                None => return,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSource {
        calls: Arc<Mutex<Vec<QuoteParams>>>,
        delay: Duration,
    }

    impl QuoteSource for RecordingSource {
        fn quote(
            &self,
            params: QuoteParams,
        ) -> impl Future<Output = Result<Quote, SdkError>> + Send {
            let calls = self.calls.clone();
            let delay = self.delay;
            async move {
                calls.lock().unwrap().push(params.clone());
                tokio::time::sleep(delay).await;
                Ok(Quote {
                    router: "0xrouter".into(),
                    calldata: "0x".into(),
                    output_amount: format!("{}0", params.input_amount),
                    input_amount: params.input_amount,
                })
            }
        }
    }

    fn form(amount: &str) -> QuoteForm {
        QuoteForm {
            chain_key: "base".into(),
            user_address: "0xme".into(),
            input_token: "0xin".into(),
            output_token: "0xout".into(),
            amount: amount.into(),
            decimals: 6,
        }
    }

    async fn settled(state: &mut watch::Receiver<QuoteState>) -> QuoteState {
        loop {
            {
                let current = state.borrow_and_update();
                if matches!(*current, QuoteState::Ready { .. } | QuoteState::Failed { .. }) {
                    return current.clone();
                }
            }
            state.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_quote_once() {
        let source = RecordingSource::default();
        let refresher = QuoteRefresher::spawn(source.clone(), Duration::from_millis(500));
        let mut state = refresher.subscribe();

        for amount in ["1", "1.", "1.5", "2"] {
            refresher.update(form(amount));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        match settled(&mut state).await {
            QuoteState::Ready { form, quote } => {
                assert_eq!(form.amount, "2");
                assert_eq!(quote.input_amount, "2000000");
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_result_is_dropped() {
        let source = RecordingSource {
            delay: Duration::from_secs(2),
            ..Default::default()
        };
        let refresher = QuoteRefresher::spawn(source.clone(), Duration::from_millis(300));
        let mut state = refresher.subscribe();

        refresher.update(form("1"));
        // Past the debounce, while the first quote is in flight.
        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(refresher.current(), QuoteState::Loading);
        refresher.update(form("3"));

        match settled(&mut state).await {
            QuoteState::Ready { form, quote } => {
                assert_eq!(form.amount, "3");
                assert_eq!(quote.input_amount, "3000000");
            }
            other => panic!("unexpected state: {other:?}"),
        }
        assert_eq!(source.calls.lock().unwrap().len(), 2);

        // The superseded quote never lands.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(
            refresher.current(),
            QuoteState::Ready { form, .. } if form.amount == "3"
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_and_empty_amounts_clear_without_request() {
        let source = RecordingSource::default();
        let refresher = QuoteRefresher::spawn(source.clone(), Duration::from_millis(200));
        let mut state = refresher.subscribe();

        refresher.update(form("1"));
        assert!(matches!(settled(&mut state).await, QuoteState::Ready { .. }));

        refresher.update(form("0.000"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(refresher.current(), QuoteState::Idle);

        refresher.update(form(""));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(refresher.current(), QuoteState::Idle);

        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_amount_fails_without_request() {
        let source = RecordingSource::default();
        let refresher = QuoteRefresher::spawn(source.clone(), Duration::from_millis(200));
        let mut state = refresher.subscribe();

        refresher.update(form("1.1234567"));
        match settled(&mut state).await {
            QuoteState::Failed { error, .. } => assert!(error.contains("decimal places")),
            other => panic!("unexpected state: {other:?}"),
        }
        assert!(source.calls.lock().unwrap().is_empty());
    }
}
