//! HTTP client for the vocabulary API

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Catalog, NewSentence, NewWord, SaveWordBody, SavedEntry, Sentence, Word};
use crate::network::error::{ApiError, ApiResult};

/// Thin wrapper over the REST endpoints. No retry and no caching.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl {
                url: base_url,
                reason: "not a base URL".to_string(),
            });
        }

        Ok(ApiClient {
            http: create_client(timeout),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ========================
    // Words
    // ========================

    pub async fn list_words(&self) -> ApiResult<Vec<Word>> {
        let url = self.endpoint("words", &[])?;
        self.get_list(url).await
    }

    pub async fn add_word(&self, english: &str, bangla: &str) -> ApiResult<Option<Word>> {
        let url = self.endpoint("words", &[])?;
        let body = NewWord {
            english: english.to_string(),
            bangla: bangla.to_string(),
        };
        self.post_json(url, &body).await
    }

    // ========================
    // Saved words
    // ========================

    pub async fn list_saved(&self) -> ApiResult<Vec<SavedEntry>> {
        let url = self.endpoint("saved-words", &[])?;
        self.get_list(url).await
    }

    pub async fn save_word(&self, word_id: &str) -> ApiResult<Option<SavedEntry>> {
        let url = self.endpoint("saved-words", &[])?;
        let body = SaveWordBody {
            word_id: word_id.to_string(),
        };
        self.post_json(url, &body).await
    }

    pub async fn remove_saved(&self, word_id: &str) -> ApiResult<()> {
        let url = self.endpoint("saved-words", &[("id", word_id)])?;
        let resp = self.http.delete(url.clone()).send().await?;
        read_body(resp, &url).await.map(|_| ())
    }

    // ========================
    // Sentences
    // ========================

    pub async fn list_sentences(&self, word_id: &str) -> ApiResult<Vec<Sentence>> {
        let url = self.endpoint("sentences", &[("wordId", word_id)])?;
        self.get_list(url).await
    }

    pub async fn add_sentence(&self, word_id: &str, content: &str) -> ApiResult<Option<Sentence>> {
        let url = self.endpoint("sentences", &[])?;
        let body = NewSentence {
            word_id: word_id.to_string(),
            content: content.to_string(),
        };
        self.post_json(url, &body).await
    }

    /// Fetch words and saved entries together; fails as a whole
    pub async fn load_catalog(&self) -> ApiResult<Catalog> {
        let (words, saved) = tokio::try_join!(self.list_words(), self.list_saved())?;
        Ok(Catalog { words, saved })
    }

    // ========================
    // Helpers
    // ========================

    async fn get_list<T: DeserializeOwned>(&self, url: Url) -> ApiResult<Vec<T>> {
        let resp = self.http.get(url.clone()).send().await?;
        let body = read_body(resp, &url).await?;
        if body.trim().is_empty() {
            return Err(ApiError::EmptyBody { url: url.to_string() });
        }
        // `null` stands for an empty list
        let list: Option<Vec<T>> = serde_json::from_str(&body).map_err(|source| {
            ApiError::Malformed {
                url: url.to_string(),
                source,
            }
        })?;
        Ok(list.unwrap_or_default())
    }

    /// POST a JSON body. An empty success body is an acknowledgement.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> ApiResult<Option<T>> {
        let resp = self.http.post(url.clone()).json(body).send().await?;
        let text = read_body(resp, &url).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| ApiError::Malformed {
                url: url.to_string(),
                source,
            })
    }
}

/// Check the status and read the whole body
async fn read_body(resp: reqwest::Response, url: &Url) -> ApiResult<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp.text().await?)
}

/// Create an HTTP client. Without a timeout the platform defaults apply.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default HTTP client");
        reqwest::Client::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_server::{request_lines, route, serve};

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", None),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let client = ApiClient::new("http://localhost:8080/api/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        let url = client.endpoint("saved-words", &[("id", "w 1&x")]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/saved-words?id=w+1%26x");
    }

    #[tokio::test]
    async fn test_list_words() {
        let (base, log) = serve(vec![route(
            "GET /api/words",
            "200 OK",
            r#"[{"id":"w1","english":"Apple","bangla":"আপেল"}]"#,
        )])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let words = client.list_words().await.unwrap();
        assert_eq!(words, vec![Word::new("w1", "Apple", "আপেল")]);
        assert_eq!(request_lines(&log), vec!["GET /api/words HTTP/1.1"]);
    }

    #[tokio::test]
    async fn test_null_list_is_empty() {
        let (base, _log) = serve(vec![route("GET /api/saved-words", "200 OK", "null")]).await;
        let client = ApiClient::new(&base, None).unwrap();
        assert!(client.list_saved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_body_is_error() {
        let (base, _log) = serve(vec![route("GET /api/words", "200 OK", "")]).await;
        let client = ApiClient::new(&base, None).unwrap();
        assert!(matches!(
            client.list_words().await,
            Err(ApiError::EmptyBody { .. })
        ));
    }

    #[tokio::test]
    async fn test_sentences_query_uses_word_id() {
        let (base, log) = serve(vec![route(
            "GET /api/sentences",
            "200 OK",
            r#"[{"wordId":"w2","content":"Grapes are sour."}]"#,
        )])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let sentences = client.list_sentences("w2").await.unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].word_id, "w2");
        assert_eq!(
            request_lines(&log),
            vec!["GET /api/sentences?wordId=w2 HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_save_word_accepts_empty_ack() {
        let (base, log) = serve(vec![route("POST /api/saved-words", "201 Created", "")]).await;
        let client = ApiClient::new(&base, None).unwrap();

        let saved = client.save_word("w3").await.unwrap();
        assert!(saved.is_none());

        let raw = log.lock().unwrap()[0].clone();
        assert!(raw.starts_with("POST /api/saved-words HTTP/1.1"));
        assert!(raw.ends_with(r#"{"wordId":"w3"}"#));
    }

    #[tokio::test]
    async fn test_add_word_parses_created_word() {
        let (base, _log) = serve(vec![route(
            "POST /api/words",
            "201 Created",
            r#"{"id":"w9","english":"Ephemeral","bangla":"ক্ষণস্থায়ী"}"#,
        )])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        let word = client.add_word("Ephemeral", "ক্ষণস্থায়ী").await.unwrap();
        assert_eq!(word.map(|w| w.id), Some("w9".to_string()));
    }

    #[tokio::test]
    async fn test_remove_saved_sends_delete() {
        let (base, log) = serve(vec![route("DELETE /api/saved-words", "200 OK", "")]).await;
        let client = ApiClient::new(&base, None).unwrap();

        client.remove_saved("w4").await.unwrap();
        assert_eq!(
            request_lines(&log),
            vec!["DELETE /api/saved-words?id=w4 HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (base, _log) = serve(vec![route(
            "GET /api/words",
            "500 Internal Server Error",
            "boom",
        )])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        match client.list_words().await {
            Err(ApiError::Status { status, .. }) => assert_eq!(status, 500),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let (base, _log) = serve(vec![route("GET /api/words", "200 OK", "{not json")]).await;
        let client = ApiClient::new(&base, None).unwrap();
        assert!(matches!(
            client.list_words().await,
            Err(ApiError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_catalog_fails_as_a_whole() {
        let (base, _log) = serve(vec![route(
            "GET /api/words",
            "200 OK",
            r#"[{"id":"w1","english":"Apple","bangla":"আপেল"}]"#,
        )])
        .await;
        let client = ApiClient::new(&base, None).unwrap();

        // saved-words falls through to 404
        assert!(client.load_catalog().await.is_err());
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}/api", addr), None).unwrap();
        assert!(client.list_words().await.is_err());
    }
}
