//! Interaction orchestrator: ties the engine, the state store, the screen
//! manager, the dialog controller and the activity flow together.
//!
//! Every operation runs to completion before the next one can start, since
//! they all borrow the orchestrator mutably. Engine failures never escape as
//! errors; they become dialogs and leave the state untouched. The
//! [`OrchestratorError`]s returned here only report front-end misuse.

use crate::activity::{ActivityKind, ActivityRequest};
use crate::character::CharacterForm;
use crate::config::{DEFAULT_SAVE_NAME, validate_save_name};
use crate::dialog::{Continuation, DialogBody, DialogButton, DialogController, DialogSpec, Pressed};
use crate::engine::Engine;
use crate::error::{EngineError, OrchestratorError};
use crate::flow::{ActivityFlow, FlowState, FlowStep};
use crate::i18n::{t, tr_pairs};
use crate::outcome::{describe_error, describe_failure, describe_result};
use crate::projection::{self, DetailView, GameView};
use crate::screen::{Screen, ScreenManager, screen_for_probe};
use crate::state::GameState;
use crate::store::GameStateStore;

/// Continuations carried by the orchestrator's dialog buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Menu entry of the running activity flow.
    Choose(usize),
    /// Abort the running activity flow without an engine call.
    CancelFlow,
    /// Submit the amount or business-name prompt of the running flow.
    SubmitPrompt,
    /// Submit the save-name prompt.
    SubmitSaveName,
}

pub struct Orchestrator<E> {
    engine: E,
    store: GameStateStore,
    screens: ScreenManager,
    dialogs: DialogController<UiAction>,
    flow: ActivityFlow,
    view: Option<GameView>,
    saves: Vec<String>,
    default_save_name: String,
}

impl<E: Engine> Orchestrator<E> {
    /// Orchestrator with fresh services.
    pub fn new(engine: E) -> Self {
        Self::with_services(
            engine,
            GameStateStore::new(),
            ScreenManager::new(),
            DialogController::new(),
        )
    }

    /// Orchestrator over injected services.
    pub fn with_services(
        engine: E,
        store: GameStateStore,
        screens: ScreenManager,
        dialogs: DialogController<UiAction>,
    ) -> Self {
        let view = store.current().and_then(projection::project);
        Self {
            engine,
            store,
            screens,
            dialogs,
            flow: ActivityFlow::new(),
            view,
            saves: Vec::new(),
            default_save_name: DEFAULT_SAVE_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_default_save_name(mut self, name: impl Into<String>) -> Self {
        self.default_save_name = name.into();
        self
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn store(&self) -> &GameStateStore {
        &self.store
    }

    pub const fn screen(&self) -> Screen {
        self.screens.active()
    }

    pub const fn screens(&self) -> &ScreenManager {
        &self.screens
    }

    pub const fn dialog(&self) -> Option<&DialogSpec<UiAction>> {
        self.dialogs.active()
    }

    /// Projection of the current snapshot, refreshed on every replacement.
    pub const fn view(&self) -> Option<&GameView> {
        self.view.as_ref()
    }

    pub const fn state(&self) -> Option<&GameState> {
        self.store.current()
    }

    /// Save names fetched for the load screen.
    pub fn saves(&self) -> &[String] {
        &self.saves
    }

    pub const fn flow_state(&self) -> &FlowState {
        self.flow.state()
    }

    pub fn default_save_name(&self) -> &str {
        &self.default_save_name
    }

    /// Probe the engine and pick the initial screen.
    pub async fn boot(&mut self) -> Screen {
        match self.engine.probe_state().await {
            Ok(Some(state)) => {
                let screen = screen_for_probe(Some(&state));
                if screen == Screen::Game {
                    log::info!("resuming game on day {}", state.current_day);
                    self.replace_state(state);
                }
                self.screens.show(screen);
            }
            Ok(None) => self.screens.show(Screen::Start),
            Err(err) => {
                log::warn!("state probe failed: {err}");
                self.screens.show(Screen::Start);
            }
        }
        self.screens.active()
    }

    /// Start-screen "new game": reset the engine, then open the form.
    pub async fn begin_new_game(&mut self) {
        let result = self.engine.new_game().await.and_then(|r| r.into_result());
        match result {
            Ok(_) => self.screens.show(Screen::CreateCharacter),
            Err(err) => self.error_dialog(tr_pairs(
                "dialog.new_game_failed",
                &[("error", &err.to_string())],
            )),
        }
    }

    pub async fn create_character(&mut self, form: &CharacterForm) {
        log::info!("creating character '{}'", form.trimmed_name());
        match self.engine.create_character(form).await {
            Ok(created) if created.status.is_success() => match created.game_state {
                Some(state) if state.has_player() => {
                    let name = created
                        .character
                        .map(|c| c.name)
                        .or_else(|| state.player.as_ref().map(|p| p.name.clone()))
                        .unwrap_or_default();
                    self.replace_state(state);
                    self.screens.show(Screen::Game);
                    self.dialogs.alert(
                        t("dialog.welcome.title"),
                        tr_pairs("dialog.welcome.body", &[("name", &name)]),
                        vec![DialogButton::new(t("common.start_game"), Continuation::Dismiss).primary()],
                    );
                }
                _ => self.error_dialog(t("dialog.create_failed")),
            },
            Ok(_) => self.error_dialog(t("dialog.create_failed")),
            Err(err) => self.error_dialog(tr_pairs(
                "dialog.create_failed_with",
                &[("error", &err.to_string())],
            )),
        }
    }

    /// Fetch the save list and show the load screen.
    pub async fn open_load_screen(&mut self) {
        match self.engine.list_saves().await {
            Ok(list) => {
                self.saves = list.saves;
                self.screens.show(Screen::LoadGame);
            }
            Err(err) => self.error_dialog(tr_pairs(
                "dialog.saves_failed",
                &[("error", &err.to_string())],
            )),
        }
    }

    pub async fn load_save(&mut self, filename: &str) {
        log::info!("loading save '{filename}'");
        let loaded = match self.engine.load(filename).await {
            Ok(response) if response.status.is_success() => response
                .game_state
                .filter(GameState::has_player)
                .ok_or_else(|| EngineError::application(response.message)),
            Ok(response) => Err(EngineError::Application(response.message)),
            Err(err) => Err(err),
        };
        match loaded {
            Ok(state) => {
                self.replace_state(state);
                self.screens.show(Screen::Game);
                self.dialogs.notice(
                    t("dialog.load_ok.title"),
                    tr_pairs("dialog.load_ok.body", &[("name", filename)]),
                );
            }
            Err(err) => self.error_dialog(tr_pairs(
                "dialog.load_failed",
                &[("error", &err.to_string())],
            )),
        }
    }

    /// Ask for a save name, seeded with the configured default.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::NoGameLoaded`] outside the game screen and
    /// [`OrchestratorError::FlowInProgress`] while an activity flow waits.
    pub fn prompt_save(&mut self) -> Result<(), OrchestratorError> {
        self.ensure_in_game()?;
        self.ensure_no_flow()?;
        self.dialogs.prompt_text(
            t("prompt.save_name.title"),
            t("prompt.save_name.body"),
            self.default_save_name.clone(),
            UiAction::SubmitSaveName,
            Continuation::Dismiss,
        );
        Ok(())
    }

    /// Save under `filename`, or the default name when blank. Invalid names
    /// are reported in a dialog without contacting the engine.
    ///
    /// # Errors
    ///
    /// Same guards as [`Self::prompt_save`].
    pub async fn save_game(&mut self, filename: &str) -> Result<(), OrchestratorError> {
        self.ensure_in_game()?;
        self.ensure_no_flow()?;
        let name = match validate_save_name(filename, &self.default_save_name) {
            Ok(name) => name,
            Err(err) => {
                log::debug!("{err}");
                self.dialogs
                    .notice(t("dialog.save_failed_title"), t("validation.invalid_save_name"));
                return Ok(());
            }
        };
        log::info!("saving as '{name}'");
        match self.engine.save(&name).await.and_then(|r| r.into_result()) {
            Ok(message) => self.dialogs.notice(t("dialog.save_ok_title"), message),
            Err(err) => self
                .dialogs
                .notice(t("dialog.save_failed_title"), err.to_string()),
        }
        Ok(())
    }

    /// Advance the simulation by one day.
    ///
    /// # Errors
    ///
    /// Same guards as [`Self::prompt_save`].
    pub async fn end_day(&mut self) -> Result<(), OrchestratorError> {
        self.ensure_in_game()?;
        self.ensure_no_flow()?;
        match self.engine.advance_day().await {
            Ok(advanced) if advanced.status.is_success() => {
                self.replace_state(advanced.game_state);
                self.dialogs
                    .notice(t("dialog.new_day.title"), t("dialog.new_day.body"));
            }
            Ok(advanced) => self.error_dialog(tr_pairs(
                "dialog.end_day_failed",
                &[("error", &advanced.message)],
            )),
            Err(err) => self.error_dialog(tr_pairs(
                "dialog.end_day_failed",
                &[("error", &err.to_string())],
            )),
        }
        Ok(())
    }

    pub fn show_intro(&mut self) {
        self.screens.show(Screen::GameIntro);
    }

    /// Return to the start screen, dropping any open dialog or waiting flow.
    pub fn back_to_start(&mut self) {
        if self.flow.cancel() {
            log::debug!("flow aborted by navigation");
        }
        self.dialogs.close();
        self.screens.show(Screen::Start);
    }

    /// Handle a click on an activity button.
    ///
    /// # Errors
    ///
    /// Refused outside the game screen, for disabled activities and while
    /// another flow is waiting.
    pub async fn trigger_activity(&mut self, activity: ActivityKind) -> Result<(), OrchestratorError> {
        self.ensure_in_game()?;
        let enabled = self
            .store
            .player()
            .is_some_and(|player| projection::is_enabled(activity, player));
        if !enabled {
            log::warn!("activity {activity} is disabled");
            return Err(OrchestratorError::ActivityDisabled(activity));
        }
        let step = self.flow.begin(activity)?;
        self.run_step(step).await;
        Ok(())
    }

    /// Type into the open prompt.
    ///
    /// # Errors
    ///
    /// Fails when no prompt is open.
    pub fn set_prompt_input(&mut self, text: &str) -> Result<(), OrchestratorError> {
        self.dialogs.set_input(text)
    }

    /// Press button `index` of the open dialog and run its continuation.
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or the button does not exist.
    pub async fn press_button(&mut self, index: usize) -> Result<(), OrchestratorError> {
        match self.dialogs.press(index)? {
            Pressed::Dismissed => Ok(()),
            Pressed::Resumed(action) => self.resume(action, None).await,
            Pressed::Submitted(action, text) => self.resume(action, Some(text)).await,
        }
    }

    async fn resume(&mut self, action: UiAction, input: Option<String>) -> Result<(), OrchestratorError> {
        match action {
            UiAction::Choose(index) => {
                let player_name = self
                    .store
                    .player()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let step = self.flow.choose(index, &player_name)?;
                self.run_step(step).await;
                Ok(())
            }
            UiAction::CancelFlow => {
                self.flow.cancel();
                Ok(())
            }
            UiAction::SubmitPrompt => {
                let step = self.flow.submit_input(input.as_deref().unwrap_or_default())?;
                self.run_step(step).await;
                Ok(())
            }
            UiAction::SubmitSaveName => {
                self.save_game(input.as_deref().unwrap_or_default()).await
            }
        }
    }

    async fn run_step(&mut self, step: FlowStep) {
        match step {
            FlowStep::ShowDetail(activity) => self.show_detail(activity),
            FlowStep::ShowMenu(menu) => {
                let options = menu
                    .options
                    .iter()
                    .enumerate()
                    .map(|(index, option)| (option.label.clone(), UiAction::Choose(index)))
                    .collect();
                self.dialogs
                    .select_option(menu.title, menu.prompt, options, UiAction::CancelFlow);
            }
            FlowStep::PromptAmount { activity, default } => {
                let body = match activity {
                    ActivityKind::Charity => t("prompt.amount.charity"),
                    _ => t("prompt.amount.investment"),
                };
                self.dialogs.prompt_text(
                    t("prompt.amount.title"),
                    body,
                    default,
                    UiAction::SubmitPrompt,
                    Continuation::Resume(UiAction::CancelFlow),
                );
            }
            FlowStep::PromptName { default, .. } => {
                self.dialogs.prompt_text(
                    t("prompt.business_name.title"),
                    t("prompt.business_name.body"),
                    default,
                    UiAction::SubmitPrompt,
                    Continuation::Resume(UiAction::CancelFlow),
                );
            }
            FlowStep::Submit(request) => self.submit_activity(request).await,
            FlowStep::Rejected(err) => {
                log::debug!("input rejected: {err}");
                self.error_dialog(t("validation.invalid_amount"));
            }
            FlowStep::Aborted => {}
        }
    }

    async fn submit_activity(&mut self, request: ActivityRequest) {
        let activity = request.activity_type;
        log::info!("running activity {activity}");
        let result = self.engine.run_activity(&request).await;
        if let Err(err) = self.flow.finish() {
            log::warn!("activity {activity} finished outside a flow: {err}");
        }
        let message = match result {
            Ok(response) if response.success => {
                let message = describe_result(activity, &response);
                if let Some(state) = response.game_state {
                    self.replace_state(state);
                } else {
                    log::warn!("activity {activity} succeeded without a state");
                }
                message
            }
            Ok(response) => describe_failure(&response.message),
            Err(err) => {
                log::warn!("activity {activity} failed: {err}");
                describe_error(&err)
            }
        };
        self.dialogs.notice(message.title, message.body);
    }

    fn show_detail(&mut self, activity: ActivityKind) {
        let detail = self.store.current().and_then(|state| match activity {
            ActivityKind::Family => projection::family_tree(state),
            _ => projection::character_details(state),
        });
        if let Some(DetailView { title, sections }) = detail {
            self.dialogs.alert(
                title,
                DialogBody::Sections(sections),
                vec![DialogButton::new(t("common.close"), Continuation::Dismiss)],
            );
        }
    }

    fn replace_state(&mut self, state: GameState) {
        self.store.replace(state);
        self.view = self.store.current().and_then(projection::project);
    }

    fn error_dialog(&mut self, body: String) {
        self.dialogs.notice(t("common.error"), body);
    }

    fn ensure_in_game(&self) -> Result<(), OrchestratorError> {
        if self.screens.is_visible(Screen::Game) && self.store.has_player() {
            Ok(())
        } else {
            Err(OrchestratorError::NoGameLoaded)
        }
    }

    fn ensure_no_flow(&self) -> Result<(), OrchestratorError> {
        if self.flow.is_active() {
            Err(OrchestratorError::FlowInProgress)
        } else {
            Ok(())
        }
    }
}
