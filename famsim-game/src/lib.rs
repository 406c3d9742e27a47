//! Famsim Interaction Core
//!
//! Platform-agnostic client side of the famsim family life-simulation game.
//! The remote engine owns every rule; this crate holds the authoritative
//! snapshot it returns, drives screens, dialogs and multi-step activity flows,
//! and projects the snapshot into a view. Front ends supply an [`Engine`]
//! transport and render what the [`Orchestrator`] exposes.

pub mod activity;
pub mod character;
pub mod config;
pub mod dialog;
pub mod engine;
pub mod error;
pub mod flow;
pub mod i18n;
pub mod orchestrator;
pub mod outcome;
pub mod projection;
pub mod screen;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use activity::{
    ActivityKind, ActivityMenu, ActivityParams, ActivityRequest, Behavior, BusinessType,
    CharityProgram, InvestmentType, ManagementFocus, MentalHealthCare, MenuOption, ParamValue,
    StudyFocus, SurgeryTier, menu_for,
};
pub use character::{CharacterForm, Education, Gender};
pub use config::{ClientConfig, ConfigError, validate_save_name};
pub use dialog::{
    Continuation, DetailSection, DialogBody, DialogButton, DialogController, DialogSpec, Pressed,
};
pub use engine::{
    ActivityResponse, CharacterCreated, DayAdvanced, Engine, LoadResponse, OutcomeKind,
    PartnerSummary, SaveList, SaveResponse, StatusFlag, StatusResponse,
};
pub use error::{EngineError, OrchestratorError, ValidationError};
pub use flow::{ActivityFlow, FlowState, FlowStep, parse_amount};
pub use orchestrator::{Orchestrator, UiAction};
pub use outcome::{ResultMessage, describe_result};
pub use projection::{
    ActivityButton, AttributeBar, DetailView, FamilyBucket, FamilyPartition, GameView, Severity,
    categorize_family, format_money, project,
};
pub use screen::{Screen, ScreenManager};
pub use state::{
    Business, EconomyStatus, EventRecord, FamilyMember, GameState, Player, Season, SpouseSummary,
};
pub use store::GameStateStore;
