//! [`Engine`] over the game server's JSON API.
//!
//! The server keeps the running game in its session, so the client holds on
//! to cookies between calls.

use async_trait::async_trait;
use famsim_game::{
    ActivityRequest, ActivityResponse, CharacterCreated, CharacterForm, ClientConfig, DayAdvanced,
    Engine, EngineError, GameState, LoadResponse, SaveList, SaveResponse, StatusResponse,
};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const GAME_STATE: &str = "/api/game_state";
const NEW_GAME: &str = "/api/new_game";
const CREATE_CHARACTER: &str = "/api/create_character";
const ACTIVITY: &str = "/api/activity";
const NEXT_DAY: &str = "/api/next_day";
const SAVE_GAME: &str = "/api/save_game";
const LOAD_GAME: &str = "/api/load_game";
const GET_SAVES: &str = "/api/get_saves";

pub struct HttpEngine {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpEngine {
    /// Build a client with the configured timeout and a cookie jar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Transport`] when the HTTP client cannot be
    /// initialized.
    pub fn new(config: ClientConfig) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .cookie_store(true)
            .build()
            .map_err(transport)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.engine_url
    }

    async fn get(&self, path: &str) -> Result<Response, EngineError> {
        let url = self.config.endpoint(path);
        log::debug!("GET {url}");
        self.client.get(&url).send().await.map_err(transport)
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, EngineError> {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");
        self.client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)
    }
}

fn transport(err: reqwest::Error) -> EngineError {
    EngineError::transport(err.to_string())
}

fn status_error(status: StatusCode) -> EngineError {
    EngineError::transport(format!("HTTP error! Status: {}", status.as_u16()))
}

/// Decode a 2xx JSON body; anything else is a transport failure.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, EngineError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        log::debug!("engine answered {status}: {body}");
        return Err(status_error(status));
    }
    let body = resp.text().await.map_err(transport)?;
    Ok(serde_json::from_str(&body)?)
}

/// Lift the fields of a nested `result` object to the top level. Top-level
/// fields such as `game_state` win over nested ones.
#[must_use]
pub fn flatten_activity(mut body: Value) -> Value {
    if let Value::Object(map) = &mut body
        && let Some(Value::Object(result)) = map.remove("result")
    {
        for (key, value) in result {
            map.entry(key).or_insert(value);
        }
    }
    body
}

#[async_trait]
impl Engine for HttpEngine {
    async fn probe_state(&self) -> Result<Option<GameState>, EngineError> {
        let resp = self.get(GAME_STATE).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            log::debug!("engine has no active game");
            return Ok(None);
        }
        decode(resp).await.map(Some)
    }

    async fn new_game(&self) -> Result<StatusResponse, EngineError> {
        decode(self.post(NEW_GAME, &json!({})).await?).await
    }

    async fn create_character(
        &self,
        form: &CharacterForm,
    ) -> Result<CharacterCreated, EngineError> {
        decode(self.post(CREATE_CHARACTER, form).await?).await
    }

    async fn run_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, EngineError> {
        let body: Value = decode(self.post(ACTIVITY, request).await?).await?;
        Ok(serde_json::from_value(flatten_activity(body))?)
    }

    async fn advance_day(&self) -> Result<DayAdvanced, EngineError> {
        decode(self.post(NEXT_DAY, &json!({})).await?).await
    }

    async fn save(&self, filename: &str) -> Result<SaveResponse, EngineError> {
        decode(self.post(SAVE_GAME, &json!({ "filename": filename })).await?).await
    }

    async fn load(&self, filename: &str) -> Result<LoadResponse, EngineError> {
        let resp = self.post(LOAD_GAME, &json!({ "filename": filename })).await?;
        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            // A refused load still carries the engine's explanation.
            let body = resp.text().await.map_err(transport)?;
            return serde_json::from_str::<LoadResponse>(&body).map_err(|_| status_error(status));
        }
        decode(resp).await
    }

    async fn list_saves(&self) -> Result<SaveList, EngineError> {
        decode(self.get(GET_SAVES).await?).await
    }
}
