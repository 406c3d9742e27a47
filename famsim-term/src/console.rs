//! Line-oriented driver: reads one command per line and forwards it to the
//! orchestrator, then redraws whatever is on screen.

use crate::render;
use anyhow::Result;
use colored::Colorize;
use famsim_game::character::MIN_AGE;
use famsim_game::i18n::t;
use famsim_game::{
    CharacterForm, Education, Engine, Gender, Orchestrator, OrchestratorError, Screen,
};
use std::io::{BufRead, Write};

/// 1-based menu input to a 0-based index below `len`.
#[must_use]
pub fn parse_choice(line: &str, len: usize) -> Option<usize> {
    line.trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

pub struct Console<E, R, W> {
    orchestrator: Orchestrator<E>,
    input: R,
    out: W,
}

impl<E: Engine, R: BufRead, W: Write> Console<E, R, W> {
    pub const fn new(orchestrator: Orchestrator<E>, input: R, out: W) -> Self {
        Self {
            orchestrator,
            input,
            out,
        }
    }

    pub const fn orchestrator(&self) -> &Orchestrator<E> {
        &self.orchestrator
    }

    /// Boot the orchestrator and serve commands until quit or end of input.
    ///
    /// # Errors
    ///
    /// Fails when reading input or writing output fails.
    pub async fn run(&mut self) -> Result<()> {
        let screen = self.orchestrator.boot().await;
        log::info!("console started on {screen}");
        loop {
            let keep_going = if self.orchestrator.dialog().is_some() {
                self.dialog_turn().await?
            } else {
                match self.orchestrator.screen() {
                    Screen::Start => self.start_turn().await?,
                    Screen::CreateCharacter => self.create_turn().await?,
                    Screen::LoadGame => self.load_turn().await?,
                    Screen::GameIntro => self.intro_turn()?,
                    Screen::Game => self.game_turn().await?,
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.out, "{}", t("console.bye"))?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{} ", format!("{prompt}>").bright_green())?;
        self.out.flush()?;
        self.read_line()
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message.yellow())?;
        Ok(())
    }

    fn refused(&mut self, err: &OrchestratorError) -> Result<()> {
        log::warn!("{err}");
        let message = match err {
            OrchestratorError::ActivityDisabled(_) => t("console.disabled"),
            OrchestratorError::FlowInProgress => t("console.busy"),
            other => other.to_string(),
        };
        self.warn(&message)
    }

    async fn dialog_turn(&mut self) -> Result<bool> {
        let Some(spec) = self.orchestrator.dialog() else {
            return Ok(true);
        };
        render::dialog(&mut self.out, spec)?;
        let has_input = spec.input.is_some();
        let buttons = spec.buttons.len();

        if has_input {
            let Some(text) = self.ask(&t("console.enter_text"))? else {
                return Ok(false);
            };
            if !text.is_empty() {
                self.orchestrator.set_prompt_input(&text)?;
            }
        }
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(false);
        };
        let index = if line.is_empty() && (has_input || buttons == 1) {
            Some(0)
        } else {
            parse_choice(&line, buttons)
        };
        match index {
            Some(index) => {
                if let Err(err) = self.orchestrator.press_button(index).await {
                    self.refused(&err)?;
                }
            }
            None => self.warn(&t("console.unknown"))?,
        }
        Ok(true)
    }

    async fn start_turn(&mut self) -> Result<bool> {
        render::title(&mut self.out, &t("app.title"))?;
        render::numbered(
            &mut self.out,
            &[
                t("start.new_game"),
                t("start.load_game"),
                t("start.intro"),
                t("start.quit"),
            ],
        )?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(false);
        };
        match line.as_str() {
            "1" => self.orchestrator.begin_new_game().await,
            "2" => self.orchestrator.open_load_screen().await,
            "3" => self.orchestrator.show_intro(),
            "4" | "q" => return Ok(false),
            _ => self.warn(&t("console.unknown"))?,
        }
        Ok(true)
    }

    async fn create_turn(&mut self) -> Result<bool> {
        render::title(&mut self.out, &t("create.title"))?;
        render::numbered(
            &mut self.out,
            &[t("create.submit"), t("create.random"), t("load.back")],
        )?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(false);
        };
        match line.as_str() {
            "1" => {
                let Some(form) = self.fill_form()? else {
                    return Ok(false);
                };
                self.orchestrator.create_character(&form).await;
            }
            "2" => {
                let form = CharacterForm::random(&mut rand::thread_rng());
                self.orchestrator.create_character(&form).await;
            }
            "3" => self.orchestrator.back_to_start(),
            _ => self.warn(&t("console.unknown"))?,
        }
        Ok(true)
    }

    /// Ask for every form field; blank answers keep the defaults.
    fn fill_form(&mut self) -> Result<Option<CharacterForm>> {
        let mut form = CharacterForm::default();
        let Some(name) = self.ask(&t("create.name"))? else {
            return Ok(None);
        };
        form.name = name;

        writeln!(self.out, "{}", t("create.gender"))?;
        let genders: Vec<String> = Gender::ALL.iter().map(|g| g.label()).collect();
        render::numbered(&mut self.out, &genders)?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(None);
        };
        if let Some(index) = parse_choice(&line, Gender::ALL.len()) {
            form.gender = Gender::ALL[index];
        }

        let Some(line) = self.ask(&t("create.age"))? else {
            return Ok(None);
        };
        if let Some(age) = line.parse::<u32>().ok().filter(|age| *age >= MIN_AGE) {
            form.age = age;
        }

        writeln!(self.out, "{}", t("create.education"))?;
        let levels: Vec<String> = Education::ALL.iter().map(|e| e.label()).collect();
        render::numbered(&mut self.out, &levels)?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(None);
        };
        if let Some(index) = parse_choice(&line, Education::ALL.len()) {
            form.education = Education::ALL[index];
        }
        Ok(Some(form))
    }

    async fn load_turn(&mut self) -> Result<bool> {
        render::title(&mut self.out, &t("load.title"))?;
        let saves = self.orchestrator.saves().to_vec();
        if saves.is_empty() {
            writeln!(self.out, "{}", t("load.empty").dimmed())?;
        }
        let mut items = saves.clone();
        items.push(t("load.back"));
        render::numbered(&mut self.out, &items)?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(false);
        };
        match parse_choice(&line, items.len()) {
            Some(index) if index == saves.len() => self.orchestrator.back_to_start(),
            Some(index) => self.orchestrator.load_save(&saves[index]).await,
            None => self.warn(&t("console.unknown"))?,
        }
        Ok(true)
    }

    fn intro_turn(&mut self) -> Result<bool> {
        render::title(&mut self.out, &t("intro.title"))?;
        writeln!(self.out, "{}", t("intro.body"))?;
        render::numbered(&mut self.out, &[t("load.back")])?;
        if self.ask(&t("console.choose"))?.is_none() {
            return Ok(false);
        }
        self.orchestrator.back_to_start();
        Ok(true)
    }

    async fn game_turn(&mut self) -> Result<bool> {
        let activities: Vec<_> = match self.orchestrator.view() {
            Some(view) => {
                render::game_view(&mut self.out, view)?;
                view.activities.iter().map(|button| button.kind).collect()
            }
            None => Vec::new(),
        };
        writeln!(
            self.out,
            "  e) {}  s) {}  m) {}  q) {}",
            t("console.end_day"),
            t("console.save"),
            t("console.menu"),
            t("start.quit")
        )?;
        let Some(line) = self.ask(&t("console.choose"))? else {
            return Ok(false);
        };
        let outcome = match line.as_str() {
            "e" => self.orchestrator.end_day().await,
            "s" => self.orchestrator.prompt_save(),
            "m" => {
                self.orchestrator.back_to_start();
                Ok(())
            }
            "q" => return Ok(false),
            other => match parse_choice(other, activities.len()) {
                Some(index) => self.orchestrator.trigger_activity(activities[index]).await,
                None => {
                    self.warn(&t("console.unknown"))?;
                    Ok(())
                }
            },
        };
        if let Err(err) = outcome {
            self.refused(&err)?;
        }
        Ok(true)
    }
}
