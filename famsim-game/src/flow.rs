//! Per-activity flow: menu, optional follow-up prompt, submission.
//!
//! One [`ActivityFlow`] lives in the orchestrator and is reused. Each
//! triggered activity walks it through
//! `Idle -> MenuShown -> (AmountPrompt | NamePrompt) -> Submitting -> Done`,
//! with `Aborted` reachable from every waiting state.

use crate::activity::{ActivityKind, ActivityMenu, ActivityParams, ActivityRequest, Behavior, menu_for};
use crate::error::{OrchestratorError, ValidationError};
use crate::i18n::tr_pairs;

/// Seed value of the amount prompt.
pub const DEFAULT_AMOUNT: &str = "1000";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    MenuShown {
        menu: ActivityMenu,
    },
    AmountPrompt {
        activity: ActivityKind,
        params: ActivityParams,
    },
    NamePrompt {
        activity: ActivityKind,
        params: ActivityParams,
        default_name: String,
    },
    Submitting {
        request: ActivityRequest,
    },
    Done,
    Aborted,
}

impl FlowState {
    /// Whether a flow is waiting on the user or the engine.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(
            self,
            Self::MenuShown { .. }
                | Self::AmountPrompt { .. }
                | Self::NamePrompt { .. }
                | Self::Submitting { .. }
        )
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::MenuShown { .. } => "menu-shown",
            Self::AmountPrompt { .. } => "amount-prompt",
            Self::NamePrompt { .. } => "name-prompt",
            Self::Submitting { .. } => "submitting",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

/// What the caller has to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// Render a read-only view; the flow is already done.
    ShowDetail(ActivityKind),
    ShowMenu(ActivityMenu),
    PromptAmount {
        activity: ActivityKind,
        default: String,
    },
    PromptName {
        activity: ActivityKind,
        default: String,
    },
    /// Send the request, then call [`ActivityFlow::finish`].
    Submit(ActivityRequest),
    /// Input failed validation; the flow has been aborted.
    Rejected(ValidationError),
    Aborted,
}

/// Parse an amount typed into the prompt.
///
/// # Errors
///
/// Anything other than a whole number greater than zero is rejected.
pub fn parse_amount(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| ValidationError::InvalidAmount(input.to_string()))
}

/// Name proposed for a new business, e.g. "张伟的科技公司".
#[must_use]
pub fn default_business_name(player: &str, business_type: &str) -> String {
    tr_pairs(
        "prompt.business_name.default",
        &[("player", player), ("type", business_type)],
    )
}

#[derive(Debug, Clone, Default)]
pub struct ActivityFlow {
    state: FlowState,
}

impl ActivityFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &FlowState {
        &self.state
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Start a flow for `activity`.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::FlowInProgress`] while another flow is active.
    pub fn begin(&mut self, activity: ActivityKind) -> Result<FlowStep, OrchestratorError> {
        if self.is_active() {
            log::warn!(
                "refusing {activity}: flow already {}",
                self.state.name()
            );
            return Err(OrchestratorError::FlowInProgress);
        }
        let step = match activity.behavior() {
            Behavior::Detail => {
                self.transition(FlowState::Done);
                FlowStep::ShowDetail(activity)
            }
            Behavior::Immediate => {
                let request = ActivityRequest::immediate(activity);
                self.transition(FlowState::Submitting {
                    request: request.clone(),
                });
                FlowStep::Submit(request)
            }
            Behavior::Parameterized => match menu_for(activity) {
                Some(menu) => {
                    self.transition(FlowState::MenuShown { menu: menu.clone() });
                    FlowStep::ShowMenu(menu)
                }
                None => {
                    self.transition(FlowState::Aborted);
                    FlowStep::Aborted
                }
            },
        };
        Ok(step)
    }

    /// Pick entry `index` of the shown menu.
    ///
    /// # Errors
    ///
    /// Fails when no menu is shown or the index is out of range.
    pub fn choose(
        &mut self,
        index: usize,
        player_name: &str,
    ) -> Result<FlowStep, OrchestratorError> {
        let FlowState::MenuShown { menu } = &self.state else {
            return Err(OrchestratorError::NoPendingStep);
        };
        let option = menu
            .option(index)
            .ok_or(OrchestratorError::NoSuchButton { index })?;
        let activity = menu.activity;
        let params = option.params.clone();

        let step = if activity.needs_amount() {
            self.transition(FlowState::AmountPrompt { activity, params });
            FlowStep::PromptAmount {
                activity,
                default: DEFAULT_AMOUNT.to_string(),
            }
        } else if activity.needs_business_name() {
            let business_type = params.text("type").unwrap_or_default().to_string();
            let default_name = default_business_name(player_name, &business_type);
            self.transition(FlowState::NamePrompt {
                activity,
                params,
                default_name: default_name.clone(),
            });
            FlowStep::PromptName {
                activity,
                default: default_name,
            }
        } else {
            self.submit(ActivityRequest::new(activity, params))
        };
        Ok(step)
    }

    /// Feed the text of the open prompt.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::NoPendingStep`] when no prompt is waiting.
    pub fn submit_input(&mut self, text: &str) -> Result<FlowStep, OrchestratorError> {
        match std::mem::take(&mut self.state) {
            FlowState::AmountPrompt { activity, params } => match parse_amount(text) {
                Ok(amount) => Ok(self.submit(ActivityRequest::new(
                    activity,
                    params.with("amount", amount),
                ))),
                Err(err) => {
                    log::debug!("{activity}: {err}");
                    self.transition(FlowState::Aborted);
                    Ok(FlowStep::Rejected(err))
                }
            },
            FlowState::NamePrompt {
                activity,
                params,
                default_name,
            } => {
                let trimmed = text.trim();
                let name = if trimmed.is_empty() {
                    default_name
                } else {
                    trimmed.to_string()
                };
                Ok(self.submit(ActivityRequest::new(activity, params.with("name", name))))
            }
            other => {
                self.state = other;
                Err(OrchestratorError::NoPendingStep)
            }
        }
    }

    /// Abort a flow that is waiting on the user. Returns whether anything was
    /// aborted; a submitted request cannot be called back.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            FlowState::MenuShown { .. }
            | FlowState::AmountPrompt { .. }
            | FlowState::NamePrompt { .. } => {
                self.transition(FlowState::Aborted);
                true
            }
            _ => false,
        }
    }

    /// Mark the submitted request as answered.
    ///
    /// # Errors
    ///
    /// [`OrchestratorError::NoPendingStep`] unless a request is being submitted.
    pub fn finish(&mut self) -> Result<(), OrchestratorError> {
        if matches!(self.state, FlowState::Submitting { .. }) {
            self.transition(FlowState::Done);
            Ok(())
        } else {
            Err(OrchestratorError::NoPendingStep)
        }
    }

    fn submit(&mut self, request: ActivityRequest) -> FlowStep {
        self.transition(FlowState::Submitting {
            request: request.clone(),
        });
        FlowStep::Submit(request)
    }

    fn transition(&mut self, next: FlowState) {
        log::debug!("flow {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}
