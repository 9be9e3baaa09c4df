//! Async driver for console requests.
//!
//! The TUI loop is synchronous; every backend call is spawned onto the
//! runtime and its settled outcome comes back over an unbounded channel,
//! tagged with the sequence number the runner state issued. The tick loop
//! drains the channel and applies outcomes, so overlapping requests settle
//! last-write-wins.

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use dc_admin_api::Envelope;
use dc_admin_client::ApiError;
use dc_admin_state::RunnerOutcome;

pub type OutcomeSender = mpsc::UnboundedSender<RunnerOutcome>;
pub type OutcomeReceiver = mpsc::UnboundedReceiver<RunnerOutcome>;

pub fn outcome_channel() -> (OutcomeSender, OutcomeReceiver) {
    mpsc::unbounded_channel()
}

/// Spawn one request. The future's outcome is mapped to the pane's message
/// policy and delivered with the given sequence number.
pub fn spawn_request<F>(tx: OutcomeSender, seq: u64, label: String, fut: F)
where
    F: Future<Output = Result<Value, ApiError>> + Send + 'static,
{
    tokio::spawn(async move {
        let result = fut.await.map_err(|e| e.user_message());
        // Receiver dropped means the console is shutting down.
        let _ = tx.send(RunnerOutcome { seq, label, result });
    });
}

/// Render an envelope as the runner's success value. A failing logical
/// code on a 2xx response still settles as a success: the pane shows the
/// raw envelope and call sites inspect `code` for their own side effects.
pub fn settle_envelope<T: Serialize>(envelope: Envelope<T>) -> Result<Value, ApiError> {
    serde_json::to_value(envelope).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(code: i64, msg: &str) -> Envelope {
        Envelope {
            code,
            msg: msg.to_string(),
            data: Some(json!([])),
            total: None,
            token: None,
        }
    }

    #[tokio::test]
    async fn test_spawned_outcome_arrives_with_its_seq() {
        let (tx, mut rx) = outcome_channel();
        spawn_request(tx, 7, "load users".into(), async { Ok(json!({"code": 200})) });

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.seq, 7);
        assert_eq!(outcome.label, "load users");
        assert_eq!(outcome.result, Ok(json!({"code": 200})));
    }

    #[tokio::test]
    async fn test_errors_are_user_messages() {
        let (tx, mut rx) = outcome_channel();
        spawn_request(tx, 1, "delete".into(), async {
            Err(ApiError::Http { status: 500, message: Some("user already exists".into()) })
        });

        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.result, Err("user already exists".to_string()));
    }

    #[test]
    fn test_settle_envelope_keeps_soft_failures_as_successes() {
        let value = settle_envelope(envelope(500, "wrong password")).unwrap();
        assert_eq!(value["code"], 500);
        assert_eq!(value["msg"], "wrong password");
    }

    #[test]
    fn test_settle_envelope_success_keeps_the_whole_envelope() {
        let value = settle_envelope(envelope(200, "ok")).unwrap();
        assert_eq!(value["code"], 200);
        assert_eq!(value["msg"], "ok");
    }
}
