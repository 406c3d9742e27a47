//! Result dialogs derived from activity responses.

use crate::activity::ActivityKind;
use crate::engine::{ActivityResponse, OutcomeKind};
use crate::error::EngineError;
use crate::i18n::{fmt_number, fmt_yuan, t, tr_pairs};
use crate::state::RELATIONSHIP_DATING;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMessage {
    pub title: String,
    pub body: String,
}

impl ResultMessage {
    fn new(title: String, body: String) -> Self {
        Self { title, body }
    }
}

/// Title and body of the dialog shown after a successful activity.
#[must_use]
pub fn describe_result(activity: ActivityKind, response: &ActivityResponse) -> ResultMessage {
    match activity {
        ActivityKind::Rest => ResultMessage::new(
            t("result.rest.title"),
            tr_pairs(
                "result.rest.body",
                &[("energy", &fmt_number(response.energy_gain.unwrap_or_default()))],
            ),
        ),
        ActivityKind::Work => ResultMessage::new(t("result.work.title"), work_body(response)),
        ActivityKind::Exercise => {
            let mut body = tr_pairs(
                "result.exercise.body",
                &[("health", &fmt_number(response.health_gain.unwrap_or_default()))],
            );
            if response.mental_health_improvement.is_some_and(|gain| gain > 0.0) {
                body.push('\n');
                body.push_str(&t("result.exercise.mental"));
            }
            ResultMessage::new(t("result.exercise.title"), body)
        }
        ActivityKind::Socialize => {
            let mut body = response.event.clone().unwrap_or_default();
            if response.met_partner {
                let name = response.partner_name().unwrap_or_default();
                append_paragraph(&mut body, &tr_pairs("result.socialize.partner", &[("name", name)]));
            }
            if body.is_empty() {
                body = t("result.default.body");
            }
            ResultMessage::new(t("result.socialize.title"), body)
        }
        ActivityKind::JobHunting => {
            ResultMessage::new(t("result.job_hunting.title"), job_hunting_body(response))
        }
        ActivityKind::Date => {
            let mut body = response
                .event
                .clone()
                .filter(|event| !event.is_empty())
                .unwrap_or_else(|| t("result.date.default"));
            if response.relationship.as_deref() == Some(RELATIONSHIP_DATING) {
                let name = response.partner_name().unwrap_or_default();
                append_paragraph(&mut body, &tr_pairs("result.date.relationship", &[("name", name)]));
            }
            ResultMessage::new(t("result.date.title"), body)
        }
        _ => ResultMessage::new(t("result.default.title"), t("result.default.body")),
    }
}

/// Dialog for `success: false`: the engine's message, verbatim.
#[must_use]
pub fn describe_failure(message: &str) -> ResultMessage {
    ResultMessage::new(t("result.failure_title"), message.to_string())
}

/// Dialog for an engine error raised while running an activity.
#[must_use]
pub fn describe_error(err: &EngineError) -> ResultMessage {
    match err {
        EngineError::Application(message) => describe_failure(message),
        EngineError::Transport(message) => ResultMessage::new(
            t("common.error"),
            tr_pairs("result.transport_failure", &[("error", message)]),
        ),
    }
}

fn work_body(response: &ActivityResponse) -> String {
    let income = fmt_yuan(response.income.unwrap_or_default(), 2);
    match response.resolved_outcome() {
        Some(OutcomeKind::WorkOutstanding) => tr_pairs(
            "result.work.outstanding",
            &[
                ("income", &income),
                ("bonus", &fmt_yuan(response.bonus.unwrap_or_default(), 2)),
            ],
        ),
        Some(OutcomeKind::WorkPoor) => tr_pairs("result.work.poor", &[("income", &income)]),
        _ => tr_pairs("result.work.standard", &[("income", &income)]),
    }
}

fn job_hunting_body(response: &ActivityResponse) -> String {
    match response.resolved_outcome() {
        Some(OutcomeKind::JobHired) => tr_pairs(
            "result.job_hunting.hired",
            &[
                ("job", response.new_job.as_deref().unwrap_or_default()),
                ("salary", &money(response.salary.unwrap_or_default())),
            ],
        ),
        Some(OutcomeKind::JobChanged) => {
            let old_salary = response.old_salary.unwrap_or_default();
            let new_salary = response.new_salary.unwrap_or_default();
            let change = new_salary - old_salary;
            let change_text = if change > 0.0 {
                tr_pairs("result.job_hunting.increase", &[("amount", &money(change))])
            } else {
                tr_pairs("result.job_hunting.decrease", &[("amount", &money(change.abs()))])
            };
            tr_pairs(
                "result.job_hunting.changed",
                &[
                    ("old_job", response.old_job.as_deref().unwrap_or_default()),
                    ("new_job", response.new_job.as_deref().unwrap_or_default()),
                    ("change", &change_text),
                    ("salary", &money(new_salary)),
                ],
            )
        }
        Some(OutcomeKind::JobHuntFailed) => t("result.job_hunting.failed"),
        _ => t("result.default.body"),
    }
}

fn money(amount: f64) -> String {
    format!("¥{}", fmt_number(amount))
}

fn append_paragraph(body: &mut String, paragraph: &str) {
    if !body.is_empty() {
        body.push_str("\n\n");
    }
    body.push_str(paragraph);
}
