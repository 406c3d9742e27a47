#![allow(dead_code)]

use async_trait::async_trait;
use famsim_game::{
    ActivityRequest, ActivityResponse, CharacterCreated, CharacterForm, DayAdvanced, Engine,
    EngineError, GameState, LoadResponse, Player, SaveList, SaveResponse, StatusFlag,
    StatusResponse,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Engine call recorded by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe,
    NewGame,
    Create(CharacterForm),
    Activity(ActivityRequest),
    AdvanceDay,
    Save(String),
    Load(String),
    ListSaves,
}

/// Scripted engine: answers from queues, falls back to plausible defaults.
#[derive(Default)]
pub struct FakeEngine {
    state: Mutex<Option<GameState>>,
    probe_error: Mutex<Option<EngineError>>,
    activities: Mutex<VecDeque<Result<ActivityResponse, EngineError>>>,
    days: Mutex<VecDeque<Result<DayAdvanced, EngineError>>>,
    loads: Mutex<VecDeque<Result<LoadResponse, EngineError>>>,
    saves: Mutex<Vec<String>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_state(state: GameState) -> Arc<Self> {
        let engine = Self::default();
        *engine.state.lock().unwrap() = Some(state);
        Arc::new(engine)
    }

    pub fn fail_probe(&self, err: EngineError) {
        *self.probe_error.lock().unwrap() = Some(err);
    }

    pub fn push_activity(&self, response: Result<ActivityResponse, EngineError>) {
        self.activities.lock().unwrap().push_back(response);
    }

    pub fn push_day(&self, response: Result<DayAdvanced, EngineError>) {
        self.days.lock().unwrap().push_back(response);
    }

    pub fn push_load(&self, response: Result<LoadResponse, EngineError>) {
        self.loads.lock().unwrap().push_back(response);
    }

    pub fn set_saves(&self, saves: &[&str]) {
        *self.saves.lock().unwrap() = saves.iter().map(|s| (*s).to_string()).collect();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn activity_calls(&self) -> Vec<ActivityRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Activity(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Engine for FakeEngine {
    async fn probe_state(&self) -> Result<Option<GameState>, EngineError> {
        self.record(Call::Probe);
        if let Some(err) = self.probe_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.state.lock().unwrap().clone())
    }

    async fn new_game(&self) -> Result<StatusResponse, EngineError> {
        self.record(Call::NewGame);
        Ok(StatusResponse {
            status: StatusFlag::Success,
            message: String::new(),
        })
    }

    async fn create_character(
        &self,
        form: &CharacterForm,
    ) -> Result<CharacterCreated, EngineError> {
        self.record(Call::Create(form.clone()));
        let name = if form.trimmed_name().is_empty() {
            "李娜".to_string()
        } else {
            form.trimmed_name().to_string()
        };
        let player = Player {
            name,
            age: form.age,
            ..sample_player()
        };
        let state = GameState {
            player: Some(player.clone()),
            ..GameState::default()
        };
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(CharacterCreated {
            status: StatusFlag::Success,
            message: String::new(),
            character: Some(player),
            game_state: Some(state),
        })
    }

    async fn run_activity(
        &self,
        request: &ActivityRequest,
    ) -> Result<ActivityResponse, EngineError> {
        self.record(Call::Activity(request.clone()));
        self.activities.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(ActivityResponse {
                success: true,
                game_state: self.state.lock().unwrap().clone(),
                ..ActivityResponse::default()
            })
        })
    }

    async fn advance_day(&self) -> Result<DayAdvanced, EngineError> {
        self.record(Call::AdvanceDay);
        if let Some(scripted) = self.days.lock().unwrap().pop_front() {
            return scripted;
        }
        let mut state = self.state.lock().unwrap().clone().unwrap_or_default();
        state.current_day += 1;
        Ok(DayAdvanced {
            status: StatusFlag::Success,
            message: String::new(),
            game_state: state,
        })
    }

    async fn save(&self, filename: &str) -> Result<SaveResponse, EngineError> {
        self.record(Call::Save(filename.to_string()));
        Ok(StatusResponse {
            status: StatusFlag::Success,
            message: format!("游戏已保存为 {filename}"),
        })
    }

    async fn load(&self, filename: &str) -> Result<LoadResponse, EngineError> {
        self.record(Call::Load(filename.to_string()));
        self.loads.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(LoadResponse {
                status: StatusFlag::Failure,
                message: "存档不存在".into(),
                game_state: None,
            })
        })
    }

    async fn list_saves(&self) -> Result<SaveList, EngineError> {
        self.record(Call::ListSaves);
        Ok(SaveList {
            saves: self.saves.lock().unwrap().clone(),
        })
    }
}

pub fn sample_player() -> Player {
    Player {
        name: "张伟".into(),
        gender: "男性".into(),
        age: 28,
        health: 80.0,
        energy: 90.0,
        appearance: 60.0,
        intelligence: 70.0,
        emotional_intelligence: 55.0,
        financial_intelligence: 40.0,
        job: "程序员".into(),
        salary: 12_000.0,
        assets: 10_000.0,
        education_level: "本科".into(),
        relationship_status: "单身".into(),
        ..Player::default()
    }
}

pub fn sample_state() -> GameState {
    GameState {
        family_fortune: 10_000.0,
        family_prestige: 10.0,
        player: Some(sample_player()),
        ..GameState::default()
    }
}

pub fn state_with(player: Player) -> GameState {
    GameState {
        player: Some(player),
        ..sample_state()
    }
}
