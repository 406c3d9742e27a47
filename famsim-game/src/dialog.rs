//! Single-slot modal dialog controller.
//!
//! Continuations are plain data handed back to the caller once the dialog has
//! closed, so the next step may freely open another dialog.

use crate::error::OrchestratorError;
use crate::i18n::t;

/// What a button does once pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation<A> {
    /// Close the dialog and do nothing else.
    Dismiss,
    /// Close and hand the action back.
    Resume(A),
    /// Close, read the text field and hand both back.
    SubmitInput(A),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogButton<A> {
    pub text: String,
    pub primary: bool,
    pub continuation: Continuation<A>,
}

impl<A> DialogButton<A> {
    pub fn new(text: impl Into<String>, continuation: Continuation<A>) -> Self {
        Self {
            text: text.into(),
            primary: false,
            continuation,
        }
    }

    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Plain "OK" button that only closes the dialog.
    pub fn ok() -> Self {
        Self::new(t("common.ok"), Continuation::Dismiss).primary()
    }
}

/// Headed block of lines inside a structured dialog body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogBody {
    Text(String),
    Sections(Vec<DetailSection>),
}

impl DialogBody {
    /// Flattened text form, sections separated by blank lines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Sections(sections) => sections
                .iter()
                .map(|section| {
                    let mut block = section.heading.clone();
                    for line in &section.lines {
                        block.push('\n');
                        block.push_str(line);
                    }
                    block
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

impl From<String> for DialogBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for DialogBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSpec<A> {
    pub title: String,
    pub body: DialogBody,
    pub buttons: Vec<DialogButton<A>>,
    /// Present only for text prompts.
    pub input: Option<String>,
}

/// Result of pressing a button: the dialog is already closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pressed<A> {
    Dismissed,
    Resumed(A),
    Submitted(A, String),
}

/// Holds at most one [`DialogSpec`]. Opening a dialog replaces whatever was
/// shown before; there is no queue.
#[derive(Debug, Clone)]
pub struct DialogController<A> {
    active: Option<DialogSpec<A>>,
}

impl<A> Default for DialogController<A> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<A: Clone> DialogController<A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active(&self) -> Option<&DialogSpec<A>> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn alert(
        &mut self,
        title: impl Into<String>,
        body: impl Into<DialogBody>,
        buttons: Vec<DialogButton<A>>,
    ) {
        self.open(DialogSpec {
            title: title.into(),
            body: body.into(),
            buttons,
            input: None,
        });
    }

    /// Alert with a single OK button.
    pub fn notice(&mut self, title: impl Into<String>, body: impl Into<DialogBody>) {
        self.alert(title, body, vec![DialogButton::ok()]);
    }

    /// One button per option; `cancel` becomes a trailing cancel button.
    pub fn select_option(
        &mut self,
        title: impl Into<String>,
        body: impl Into<DialogBody>,
        options: Vec<(String, A)>,
        cancel: A,
    ) {
        let mut buttons: Vec<_> = options
            .into_iter()
            .map(|(text, action)| DialogButton::new(text, Continuation::Resume(action)))
            .collect();
        buttons.push(DialogButton::new(t("common.cancel"), Continuation::Resume(cancel)));
        self.alert(title, body, buttons);
    }

    /// Text field seeded with `default`, plus OK and Cancel.
    pub fn prompt_text(
        &mut self,
        title: impl Into<String>,
        body: impl Into<DialogBody>,
        default: impl Into<String>,
        on_submit: A,
        on_cancel: Continuation<A>,
    ) {
        self.open(DialogSpec {
            title: title.into(),
            body: body.into(),
            buttons: vec![
                DialogButton::new(t("common.ok"), Continuation::SubmitInput(on_submit)).primary(),
                DialogButton::new(t("common.cancel"), on_cancel),
            ],
            input: Some(default.into()),
        });
    }

    /// Replace the text of the open prompt.
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or the open dialog has no text field.
    pub fn set_input(&mut self, text: impl Into<String>) -> Result<(), OrchestratorError> {
        let spec = self.active.as_mut().ok_or(OrchestratorError::NoDialog)?;
        let field = spec.input.as_mut().ok_or(OrchestratorError::NoInputField)?;
        *field = text.into();
        Ok(())
    }

    /// Press the button at `index`, closing the dialog first.
    ///
    /// # Errors
    ///
    /// Fails when no dialog is open or the index is out of range; the dialog
    /// stays open in that case.
    pub fn press(&mut self, index: usize) -> Result<Pressed<A>, OrchestratorError> {
        let spec = self.active.as_ref().ok_or(OrchestratorError::NoDialog)?;
        if index >= spec.buttons.len() {
            return Err(OrchestratorError::NoSuchButton { index });
        }
        let Some(mut spec) = self.active.take() else {
            return Err(OrchestratorError::NoDialog);
        };
        let button = spec.buttons.swap_remove(index);
        Ok(match button.continuation {
            Continuation::Dismiss => Pressed::Dismissed,
            Continuation::Resume(action) => Pressed::Resumed(action),
            Continuation::SubmitInput(action) => {
                Pressed::Submitted(action, spec.input.unwrap_or_default())
            }
        })
    }

    fn open(&mut self, spec: DialogSpec<A>) {
        if let Some(previous) = &self.active {
            log::debug!("dialog '{}' replaced by '{}'", previous.title, spec.title);
        }
        self.active = Some(spec);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Pick(u8),
        Abort,
        Name,
    }

    #[test]
    fn pressing_closes_before_continuing() {
        let mut dialogs = DialogController::new();
        dialogs.select_option(
            "菜单",
            "选择",
            vec![("一".into(), Step::Pick(1)), ("二".into(), Step::Pick(2))],
            Step::Abort,
        );
        assert_eq!(dialogs.active().map(|d| d.buttons.len()), Some(3));
        assert_eq!(dialogs.press(1), Ok(Pressed::Resumed(Step::Pick(2))));
        assert!(!dialogs.is_open());
    }

    #[test]
    fn cancel_is_the_last_button() {
        let mut dialogs = DialogController::new();
        dialogs.select_option("菜单", "选择", vec![("一".into(), Step::Pick(1))], Step::Abort);
        let cancel = dialogs.active().and_then(|d| d.buttons.last()).cloned();
        assert_eq!(cancel.map(|b| b.text), Some("取消".to_string()));
        assert_eq!(dialogs.press(1), Ok(Pressed::Resumed(Step::Abort)));
    }

    #[test]
    fn prompt_returns_edited_text() {
        let mut dialogs = DialogController::new();
        dialogs.prompt_text("名称", "输入", "默认", Step::Name, Continuation::Dismiss);
        dialogs.set_input("新名字").unwrap();
        assert_eq!(
            dialogs.press(0),
            Ok(Pressed::Submitted(Step::Name, "新名字".into()))
        );

        dialogs.prompt_text("名称", "输入", "默认", Step::Name, Continuation::Dismiss);
        assert_eq!(dialogs.press(1), Ok(Pressed::Dismissed));
    }

    #[test]
    fn invalid_presses_keep_dialog_open() {
        let mut dialogs: DialogController<Step> = DialogController::new();
        assert_eq!(dialogs.press(0), Err(OrchestratorError::NoDialog));
        dialogs.notice("提示", "内容");
        assert_eq!(
            dialogs.press(5),
            Err(OrchestratorError::NoSuchButton { index: 5 })
        );
        assert!(dialogs.is_open());
        assert_eq!(dialogs.set_input("x"), Err(OrchestratorError::NoInputField));
    }

    #[test]
    fn opening_replaces_previous_dialog() {
        let mut dialogs: DialogController<Step> = DialogController::new();
        dialogs.notice("第一个", "a");
        dialogs.notice("第二个", "b");
        assert_eq!(dialogs.active().map(|d| d.title.as_str()), Some("第二个"));
    }

    #[test]
    fn sections_flatten_to_text() {
        let body = DialogBody::Sections(vec![
            DetailSection {
                heading: "A".into(),
                lines: vec!["1".into(), "2".into()],
            },
            DetailSection {
                heading: "B".into(),
                lines: vec![],
            },
        ]);
        assert_eq!(body.to_plain_text(), "A\n1\n2\n\nB");
    }
}
