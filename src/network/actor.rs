//! Network actor - runs API calls in the Tokio runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::network::ApiAction;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::ApiClient;
use crate::network::error::ApiError;

/// Network actor that processes API commands
pub struct NetworkActor {
    client: ApiClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: ApiClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            // Quitting drops whatever is still in flight
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => {
                            let client = self.client.clone();
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                if let Some(response) = execute(&client, cmd).await {
                                    if let NetworkResponse::Failed { id, action, message } = &response {
                                        tracing::warn!(id, action = action.as_str(), error = %message, "API call failed");
                                    }
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Run one command to completion, including any follow-up reload.
/// `Shutdown` has no response.
pub async fn execute(client: &ApiClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::LoadCatalog { id } => {
            tracing::info!(id, "Loading catalog");
            reload_catalog(client, id).await
        }

        NetworkCommand::SaveWord { id, word_id } => {
            tracing::info!(id, word_id = %word_id, "Saving word");
            if let Err(e) = client.save_word(&word_id).await {
                return Some(failed(id, ApiAction::SaveWord, e));
            }
            reload_catalog(client, id).await
        }

        NetworkCommand::RemoveSaved { id, word_id } => {
            tracing::info!(id, word_id = %word_id, "Removing saved word");
            if let Err(e) = client.remove_saved(&word_id).await {
                return Some(failed(id, ApiAction::RemoveSaved, e));
            }
            reload_catalog(client, id).await
        }

        NetworkCommand::AddWord { id, english, bangla } => {
            tracing::info!(id, english = %english, "Adding word");
            if let Err(e) = client.add_word(&english, &bangla).await {
                return Some(failed(id, ApiAction::AddWord, e));
            }
            reload_catalog(client, id).await
        }

        NetworkCommand::LoadSentences { id, word_id } => {
            tracing::info!(id, word_id = %word_id, "Loading sentences");
            reload_sentences(client, id, word_id).await
        }

        NetworkCommand::AddSentence { id, word_id, content } => {
            tracing::info!(id, word_id = %word_id, "Adding sentence");
            if let Err(e) = client.add_sentence(&word_id, &content).await {
                return Some(failed(id, ApiAction::AddSentence, e));
            }
            reload_sentences(client, id, word_id).await
        }

        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

async fn reload_catalog(client: &ApiClient, id: u64) -> NetworkResponse {
    match client.load_catalog().await {
        Ok(catalog) => {
            tracing::info!(id, words = catalog.words.len(), saved = catalog.saved.len(), "Catalog loaded");
            NetworkResponse::CatalogLoaded { id, catalog }
        }
        Err(e) => failed(id, ApiAction::LoadCatalog, e),
    }
}

async fn reload_sentences(client: &ApiClient, id: u64, word_id: String) -> NetworkResponse {
    match client.list_sentences(&word_id).await {
        Ok(sentences) => NetworkResponse::SentencesLoaded {
            id,
            word_id,
            sentences,
        },
        Err(e) => failed(id, ApiAction::LoadSentences, e),
    }
}

fn failed(id: u64, action: ApiAction, error: ApiError) -> NetworkResponse {
    NetworkResponse::Failed {
        id,
        action,
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_server::{request_lines, route, serve};

    const WORDS: &str = r#"[{"id":"w1","english":"Apple","bangla":"আপেল"},{"id":"w2","english":"Grape","bangla":"আঙুর"}]"#;
    const SAVED: &str = r#"[{"wordId":"w1","savedAt":"2026-10-18T08:00:00Z"}]"#;

    #[tokio::test]
    async fn test_save_word_reloads_catalog() {
        let (base, log) = serve(vec![
            route("POST /api/saved-words", "201 Created", ""),
            route("GET /api/words", "200 OK", WORDS),
            route("GET /api/saved-words", "200 OK", SAVED),
        ])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let cmd = NetworkCommand::SaveWord { id: 7, word_id: "w1".into() };
        match execute(&client, cmd).await {
            Some(NetworkResponse::CatalogLoaded { id, catalog }) => {
                assert_eq!(id, 7);
                assert_eq!(catalog.words.len(), 2);
                assert_eq!(catalog.saved.len(), 1);
            }
            other => panic!("expected catalog, got {:?}", other),
        }

        let lines = request_lines(&log);
        assert_eq!(lines[0], "POST /api/saved-words HTTP/1.1");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_write_skips_reload() {
        let (base, log) = serve(vec![
            route("DELETE /api/saved-words", "500 Internal Server Error", ""),
            route("GET /api/words", "200 OK", WORDS),
            route("GET /api/saved-words", "200 OK", SAVED),
        ])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let cmd = NetworkCommand::RemoveSaved { id: 3, word_id: "w1".into() };
        match execute(&client, cmd).await {
            Some(NetworkResponse::Failed { id, action, .. }) => {
                assert_eq!(id, 3);
                assert_eq!(action, ApiAction::RemoveSaved);
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(request_lines(&log).len(), 1);
    }

    #[tokio::test]
    async fn test_add_sentence_refetches_list() {
        let (base, log) = serve(vec![
            route("POST /api/sentences", "201 Created", ""),
            route(
                "GET /api/sentences",
                "200 OK",
                r#"[{"wordId":"w2","content":"Grapes grow in bunches."}]"#,
            ),
        ])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let cmd = NetworkCommand::AddSentence {
            id: 11,
            word_id: "w2".into(),
            content: "Grapes grow in bunches.".into(),
        };
        match execute(&client, cmd).await {
            Some(NetworkResponse::SentencesLoaded { id, word_id, sentences }) => {
                assert_eq!(id, 11);
                assert_eq!(word_id, "w2");
                assert_eq!(sentences.len(), 1);
            }
            other => panic!("expected sentences, got {:?}", other),
        }
        assert_eq!(
            request_lines(&log),
            vec![
                "POST /api/sentences HTTP/1.1",
                "GET /api/sentences?wordId=w2 HTTP/1.1",
            ]
        );
    }

    #[tokio::test]
    async fn test_shutdown_has_no_response() {
        let client = ApiClient::new("http://127.0.0.1:1/api", None).unwrap();
        assert!(execute(&client, NetworkCommand::Shutdown).await.is_none());
    }

    #[tokio::test]
    async fn test_actor_answers_every_command() {
        let (base, _log) = serve(vec![
            route("GET /api/words", "200 OK", WORDS),
            route("GET /api/saved-words", "200 OK", SAVED),
        ])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let actor = tokio::spawn(NetworkActor::new(client, resp_tx).run(cmd_rx));

        cmd_tx.send(NetworkCommand::LoadCatalog { id: 1 }).unwrap();
        let response = resp_rx.recv().await.unwrap();
        assert_eq!(response.id(), 1);
        assert!(matches!(response, NetworkResponse::CatalogLoaded { .. }));

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        actor.await.unwrap();
    }
}
