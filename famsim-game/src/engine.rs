//! Request/response contract with the remote game engine.
//!
//! The engine owns every rule of the simulation. The client only submits
//! requests and replaces its snapshot with whatever comes back. This module
//! holds the payload types and the [`Engine`] trait that
//! transports implement.

use crate::activity::ActivityRequest;
use crate::character::CharacterForm;
use crate::error::EngineError;
use crate::state::{GameState, Player};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// `status` field of the engine's envelope responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFlag {
    Success,
    #[serde(alias = "error")]
    Failure,
}

impl StatusFlag {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Plain `{status, message}` envelope used by new game and save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: StatusFlag,
    #[serde(default)]
    pub message: String,
}

impl StatusResponse {
    /// Turn a failure envelope into an application error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Application`] when the status is not success.
    pub fn into_result(self) -> Result<String, EngineError> {
        if self.status.is_success() {
            Ok(self.message)
        } else {
            Err(EngineError::Application(self.message))
        }
    }
}

/// Save acknowledgements share the plain envelope.
pub type SaveResponse = StatusResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterCreated {
    pub status: StatusFlag,
    #[serde(default)]
    pub message: String,
    pub character: Option<Player>,
    pub game_state: Option<GameState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAdvanced {
    #[serde(default = "success_flag")]
    pub status: StatusFlag,
    #[serde(default)]
    pub message: String,
    pub game_state: GameState,
}

const fn success_flag() -> StatusFlag {
    StatusFlag::Success
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResponse {
    pub status: StatusFlag,
    #[serde(default)]
    pub message: String,
    pub game_state: Option<GameState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SaveList {
    #[serde(default)]
    pub saves: Vec<String>,
}

/// Explicit result discriminator for activities whose dialog text branches on
/// the engine's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    WorkOutstanding,
    WorkPoor,
    WorkStandard,
    JobHired,
    JobChanged,
    JobHuntFailed,
    #[serde(other)]
    Unspecified,
}

impl OutcomeKind {
    /// Map the message literals of engines that predate the discriminator.
    #[must_use]
    pub fn from_legacy_message(message: &str) -> Option<Self> {
        match message {
            "工作表现出色" => Some(Self::WorkOutstanding),
            "工作表现不佳" => Some(Self::WorkPoor),
            "正常工作" => Some(Self::WorkStandard),
            "求职成功" => Some(Self::JobHired),
            "换工作成功" | "换工作成功，薪资提升" => Some(Self::JobChanged),
            "求职失败" => Some(Self::JobHuntFailed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PartnerSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub job: String,
}

/// Response of `run activity`: success flag, the activity-specific result
/// fields and, on success, the new snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ActivityResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub outcome_kind: Option<OutcomeKind>,
    #[serde(default)]
    pub game_state: Option<GameState>,

    #[serde(default)]
    pub energy_gain: Option<f64>,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub bonus: Option<f64>,
    #[serde(default)]
    pub health_gain: Option<f64>,
    #[serde(default)]
    pub mental_health_improvement: Option<f64>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub met_partner: bool,
    #[serde(default)]
    pub partner: Option<PartnerSummary>,
    #[serde(default)]
    pub new_job: Option<String>,
    #[serde(default)]
    pub salary: Option<f64>,
    #[serde(default)]
    pub old_job: Option<String>,
    #[serde(default)]
    pub old_salary: Option<f64>,
    #[serde(default)]
    pub new_salary: Option<f64>,
    #[serde(default)]
    pub relationship: Option<String>,

    /// Result fields this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ActivityResponse {
    /// The discriminator, falling back to the legacy message literal.
    #[must_use]
    pub fn resolved_outcome(&self) -> Option<OutcomeKind> {
        self.outcome_kind
            .filter(|kind| *kind != OutcomeKind::Unspecified)
            .or_else(|| OutcomeKind::from_legacy_message(&self.message))
    }

    #[must_use]
    pub fn partner_name(&self) -> Option<&str> {
        self.partner.as_ref().map(|p| p.name.as_str())
    }
}

/// The remote game engine as seen by the client.
///
/// Every mutating call that succeeds returns the complete new [`GameState`].
#[async_trait]
pub trait Engine: Send + Sync {
    /// Fetch the engine's current snapshot, `None` when no game is active.
    async fn probe_state(&self) -> Result<Option<GameState>, EngineError>;

    async fn new_game(&self) -> Result<StatusResponse, EngineError>;

    async fn create_character(&self, form: &CharacterForm)
    -> Result<CharacterCreated, EngineError>;

    async fn run_activity(&self, request: &ActivityRequest)
    -> Result<ActivityResponse, EngineError>;

    async fn advance_day(&self) -> Result<DayAdvanced, EngineError>;

    async fn save(&self, filename: &str) -> Result<SaveResponse, EngineError>;

    async fn load(&self, filename: &str) -> Result<LoadResponse, EngineError>;

    async fn list_saves(&self) -> Result<SaveList, EngineError>;
}

#[async_trait]
impl<E: Engine + ?Sized> Engine for std::sync::Arc<E> {
    async fn probe_state(&self) -> Result<Option<GameState>, EngineError> {
        (**self).probe_state().await
    }

    async fn new_game(&self) -> Result<StatusResponse, EngineError> {
        (**self).new_game().await
    }

    async fn create_character(
        &self,
        form: &CharacterForm,
    ) -> Result<CharacterCreated, EngineError> {
        (**self).create_character(form).await
    }

    async fn run_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, EngineError> {
        (**self).run_activity(request).await
    }

    async fn advance_day(&self) -> Result<DayAdvanced, EngineError> {
        (**self).advance_day().await
    }

    async fn save(&self, filename: &str) -> Result<SaveResponse, EngineError> {
        (**self).save(filename).await
    }

    async fn load(&self, filename: &str) -> Result<LoadResponse, EngineError> {
        (**self).load(filename).await
    }

    async fn list_saves(&self) -> Result<SaveList, EngineError> {
        (**self).list_saves().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_messages_resolve_to_discriminators() {
        let response: ActivityResponse = serde_json::from_value(json!({
            "success": true,
            "message": "工作表现出色",
            "income": 5000,
            "bonus": 800
        }))
        .unwrap();
        assert_eq!(response.resolved_outcome(), Some(OutcomeKind::WorkOutstanding));
        assert_eq!(response.income, Some(5000.0));
        assert!(response.game_state.is_none());

        let raise: ActivityResponse = serde_json::from_value(json!({
            "success": true,
            "message": "换工作成功，薪资提升"
        }))
        .unwrap();
        assert_eq!(raise.resolved_outcome(), Some(OutcomeKind::JobChanged));
    }

    #[test]
    fn explicit_discriminator_wins_over_message() {
        let response: ActivityResponse = serde_json::from_value(json!({
            "success": true,
            "message": "求职尝试",
            "outcome_kind": "job_hunt_failed"
        }))
        .unwrap();
        assert_eq!(response.resolved_outcome(), Some(OutcomeKind::JobHuntFailed));

        let unknown: ActivityResponse = serde_json::from_value(json!({
            "success": true,
            "message": "求职成功",
            "outcome_kind": "promoted_to_ceo"
        }))
        .unwrap();
        assert_eq!(unknown.resolved_outcome(), Some(OutcomeKind::JobHired));
    }

    #[test]
    fn unknown_fields_are_kept_aside() {
        let response: ActivityResponse = serde_json::from_value(json!({
            "success": true,
            "message": "整容手术",
            "surgery_type": "微整形",
            "cost": 20000,
            "partner": {"name": "王芳", "age": 26}
        }))
        .unwrap();
        assert_eq!(response.extra.get("cost"), Some(&json!(20000)));
        assert_eq!(response.partner_name(), Some("王芳"));
        assert_eq!(response.resolved_outcome(), None);
    }

    #[test]
    fn status_flags_accept_error_alias() {
        let failed: StatusResponse =
            serde_json::from_value(json!({"status": "error", "message": "保存失败: 磁盘已满"}))
                .unwrap();
        assert_eq!(
            failed.into_result(),
            Err(EngineError::Application("保存失败: 磁盘已满".into()))
        );
        let ok: StatusResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert_eq!(ok.into_result(), Ok(String::new()));
    }
}
