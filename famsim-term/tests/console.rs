use async_trait::async_trait;
use famsim_game::{
    ActivityRequest, ActivityResponse, CharacterCreated, CharacterForm, DayAdvanced, Engine,
    EngineError, GameState, LoadResponse, Orchestrator, Player, SaveList, SaveResponse, Screen,
    StatusFlag, StatusResponse,
};
use famsim_term::Console;
use std::sync::Mutex;

/// In-memory engine that keeps one game and echoes it back.
#[derive(Default)]
struct MemoryEngine {
    state: Mutex<Option<GameState>>,
    activities: Mutex<Vec<ActivityRequest>>,
}

impl MemoryEngine {
    fn snapshot(&self) -> Option<GameState> {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl Engine for MemoryEngine {
    async fn probe_state(&self) -> Result<Option<GameState>, EngineError> {
        Ok(self.snapshot())
    }

    async fn new_game(&self) -> Result<StatusResponse, EngineError> {
        Ok(StatusResponse {
            status: StatusFlag::Success,
            message: "New game created".into(),
        })
    }

    async fn create_character(
        &self,
        form: &CharacterForm,
    ) -> Result<CharacterCreated, EngineError> {
        let player = Player {
            name: form.trimmed_name().to_string(),
            age: form.age,
            job: "初级白领".into(),
            energy: 100.0,
            health: 100.0,
            ..Player::default()
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
        self.activities.lock().unwrap().push(request.clone());
        Ok(ActivityResponse {
            success: true,
            message: "休息".into(),
            energy_gain: Some(30.0),
            game_state: self.snapshot(),
            ..ActivityResponse::default()
        })
    }

    async fn advance_day(&self) -> Result<DayAdvanced, EngineError> {
        let mut state = self.snapshot().unwrap_or_default();
        state.current_day += 1;
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(DayAdvanced {
            status: StatusFlag::Success,
            message: String::new(),
            game_state: state,
        })
    }

    async fn save(&self, filename: &str) -> Result<SaveResponse, EngineError> {
        Ok(StatusResponse {
            status: StatusFlag::Success,
            message: format!("游戏已保存为 {filename}"),
        })
    }

    async fn load(&self, _filename: &str) -> Result<LoadResponse, EngineError> {
        Err(EngineError::transport("HTTP error! Status: 400"))
    }

    async fn list_saves(&self) -> Result<SaveList, EngineError> {
        Ok(SaveList::default())
    }
}

async fn run_script(script: &str) -> String {
    let mut out = Vec::new();
    let mut console = Console::new(
        Orchestrator::new(MemoryEngine::default()),
        script.as_bytes(),
        &mut out,
    );
    console.run().await.unwrap();
    drop(console);
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn new_character_rest_and_end_day() {
    colored::control::set_override(false);
    let script = [
        "1",    // new game
        "1",    // fill the form
        "王芳", // name
        "2",    // female
        "30",   // age
        "3",    // bachelor
        "",     // dismiss welcome
        "1",    // rest
        "",     // dismiss result
        "e",    // end day
        "",     // dismiss new day
        "q",
    ]
    .join("\n");
    let mut out = Vec::new();
    let mut console = Console::new(
        Orchestrator::new(MemoryEngine::default()),
        script.as_bytes(),
        &mut out,
    );
    console.run().await.unwrap();
    let orchestrator = console.orchestrator();
    assert_eq!(orchestrator.screen(), Screen::Game);
    assert_eq!(orchestrator.state().map(|s| s.current_day), Some(2));
    let activities = orchestrator.engine().activities.lock().unwrap().clone();
    assert_eq!(activities.len(), 1);
    drop(console);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("你将扮演王芳"), "{text}");
    assert!(text.contains("第2天"));
    assert!(text.trim_end().ends_with("再见！"));
}

#[tokio::test]
async fn unknown_commands_and_empty_load_screen() {
    colored::control::set_override(false);
    let text = run_script("x\n2\n1\n4\n").await;
    assert!(text.contains("无法识别的指令"));
    assert!(text.contains("没有找到任何存档"));
    assert!(text.contains("再见！"));
}

#[tokio::test]
async fn end_of_input_stops_the_session() {
    let text = run_script("3\n").await;
    assert!(text.contains("游戏介绍"));
    assert!(text.contains("再见！"));
}
