use futures::future::{self, Either, LocalBoxFuture};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;
use web_sys::js_sys::Math;

use super::field::ContactPayload;

#[derive(Debug, Error, PartialEq)]
pub enum SubmissionError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server rejected submission with status {status}")]
    Rejected { status: u16 },
    #[error("no response after {after_ms} ms")]
    TimedOut { after_ms: u32 },
    #[error("simulated failure")]
    Simulated,
}

pub type SubmitFuture<'a> = LocalBoxFuture<'a, Result<(), SubmissionError>>;

/// Delivers a contact payload somewhere and reports whether it got there.
pub trait SubmissionChannel {
    fn submit<'a>(&'a self, payload: &'a ContactPayload) -> SubmitFuture<'a>;
}

impl<T: SubmissionChannel + ?Sized> SubmissionChannel for Box<T> {
    fn submit<'a>(&'a self, payload: &'a ContactPayload) -> SubmitFuture<'a> {
        (**self).submit(payload)
    }
}

/// Stand-in for a backend: waits, then fails at `failure_rate`.
pub struct SimulatedChannel {
    pub delay_ms: u32,
    pub failure_rate: f64,
}

impl SubmissionChannel for SimulatedChannel {
    fn submit<'a>(&'a self, _payload: &'a ContactPayload) -> SubmitFuture<'a> {
        Box::pin(async move {
            TimeoutFuture::new(self.delay_ms).await;
            if Math::random() < self.failure_rate {
                Err(SubmissionError::Simulated)
            } else {
                Ok(())
            }
        })
    }
}

/// POSTs the payload as JSON. Any non-2xx status or a timeout is a failure.
pub struct HttpChannel {
    pub endpoint: String,
    pub timeout_ms: u32,
}

impl HttpChannel {
    async fn send(&self, payload: &ContactPayload) -> Result<(), SubmissionError> {
        let response = Request::post(&self.endpoint)
            .json(payload)
            .map_err(|e| SubmissionError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmissionError::Transport(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                status: response.status(),
            })
        }
    }
}

impl SubmissionChannel for HttpChannel {
    fn submit<'a>(&'a self, payload: &'a ContactPayload) -> SubmitFuture<'a> {
        Box::pin(async move {
            let request = Box::pin(self.send(payload));
            let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

            match future::select(request, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(SubmissionError::TimedOut {
                    after_ms: self.timeout_ms,
                }),
            }
        })
    }
}
