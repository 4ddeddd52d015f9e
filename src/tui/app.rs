// src/tui/app.rs
use crate::config::AppConfig;
use crate::core::advisory::{advise, Advisory};
use crate::core::engine::compute;
use crate::error::InputError;
use crate::types::{AddOnBasis, AddOnCapPolicy, Side, SizingInput, SizingReport};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Entry,
    Stop,
    Shares,
    Current,
    Goal,
    TargetStop,
    AddOnStop,
    Multiplier,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Entry => "entry price",
            FieldId::Stop => "initial stop",
            FieldId::Shares => "total shares",
            FieldId::Current => "current price",
            FieldId::Goal => "profit goal",
            FieldId::TargetStop => "trailing stop",
            FieldId::AddOnStop => "add-on stop",
            FieldId::Multiplier => "unit multiplier",
        }
    }

    /// Optional fields may stay empty; an empty optional disables its feature.
    pub fn optional(self) -> bool {
        matches!(self, FieldId::Goal | FieldId::TargetStop | FieldId::AddOnStop)
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub input: SizingInput,
    pub report: SizingReport,
    pub advisories: Vec<Advisory>,
}

pub struct App {
    pub fields: Vec<Field>,
    pub selected: usize,
    pub side: Side,
    pub add_on_cap: AddOnCapPolicy,
    pub add_on_basis: AddOnBasis,
    pub crash_shock: Decimal,
    pub outcome: Option<Outcome>,
    pub error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let form = &config.form;
        let field = |id, value: String| Field { id, value };

        Self {
            fields: vec![
                field(FieldId::Entry, form.entry_price.to_string()),
                field(FieldId::Stop, form.initial_stop.to_string()),
                field(FieldId::Shares, form.total_shares.to_string()),
                field(FieldId::Current, form.current_price.to_string()),
                field(FieldId::Goal, String::new()),
                field(FieldId::TargetStop, String::new()),
                field(FieldId::AddOnStop, String::new()),
                field(FieldId::Multiplier, config.sizing.unit_multiplier.to_string()),
            ],
            selected: 0,
            side: config.sizing.side,
            add_on_cap: config.sizing.add_on_cap,
            add_on_basis: config.sizing.add_on_basis,
            crash_shock: config.sizing.crash_shock,
            outcome: None,
            error: None,
            should_quit: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => self.submit(),
            KeyCode::Down | KeyCode::Tab => {
                self.selected = (self.selected + 1) % self.fields.len();
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
            }
            KeyCode::Left | KeyCode::Right => self.side = self.side.flip(),
            KeyCode::Char('p') => self.cycle_cap(),
            KeyCode::Char('b') => self.toggle_basis(),
            KeyCode::Backspace => {
                self.fields[self.selected].value.pop();
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() || ch == '.' || ch == '-' => {
                self.fields[self.selected].value.push(ch);
            }
            _ => {}
        }
    }

    fn cycle_cap(&mut self) {
        self.add_on_cap = match self.add_on_cap {
            AddOnCapPolicy::MatchOriginal => AddOnCapPolicy::DoubleOriginal,
            AddOnCapPolicy::DoubleOriginal => AddOnCapPolicy::Uncapped,
            AddOnCapPolicy::Uncapped => AddOnCapPolicy::MatchOriginal,
        };
    }

    fn toggle_basis(&mut self) {
        self.add_on_basis = match self.add_on_basis {
            AddOnBasis::Original => AddOnBasis::AfterSell,
            AddOnBasis::AfterSell => AddOnBasis::Original,
        };
    }

    fn raw(&self, id: FieldId) -> &str {
        self.fields
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.value.trim())
            .unwrap_or_default()
    }

    fn decimal(&self, id: FieldId) -> Result<Option<Decimal>, InputError> {
        let raw = self.raw(id);
        if raw.is_empty() && id.optional() {
            return Ok(None);
        }
        Decimal::from_str(raw)
            .map(Some)
            .map_err(|_| InputError::InvalidNumber {
                field: id.label(),
                raw: raw.to_string(),
            })
    }

    fn required(&self, id: FieldId) -> Result<Decimal, InputError> {
        self.decimal(id)?.ok_or_else(|| InputError::InvalidNumber {
            field: id.label(),
            raw: String::new(),
        })
    }

    pub fn build_input(&self) -> Result<SizingInput, InputError> {
        let shares_raw = self.raw(FieldId::Shares);
        let total_shares = shares_raw
            .parse::<u64>()
            .map_err(|_| InputError::InvalidQuantity {
                field: FieldId::Shares.label(),
                raw: shares_raw.to_string(),
            })?;

        let input = SizingInput {
            side: self.side,
            entry_price: self.required(FieldId::Entry)?,
            initial_stop: self.required(FieldId::Stop)?,
            total_shares,
            current_price: self.required(FieldId::Current)?,
            target_stop: self.decimal(FieldId::TargetStop)?,
            profit_goal: self.decimal(FieldId::Goal)?.unwrap_or(Decimal::ZERO),
            add_on_stop: self.decimal(FieldId::AddOnStop)?,
            unit_multiplier: self.required(FieldId::Multiplier)?,
            add_on_cap: self.add_on_cap,
            add_on_basis: self.add_on_basis,
            crash_shock: self.crash_shock,
        };
        input.validate()?;
        Ok(input)
    }

    /// Form submission: recompute from whatever the fields hold now.
    pub fn submit(&mut self) {
        match self.build_input() {
            Ok(input) => {
                let report = compute(&input);
                let advisories = advise(&input, &report);
                info!(
                    "Calculated {:?}: sell {} / add {} (advisories: {})",
                    input.side,
                    report.sell,
                    report.add_on,
                    advisories.len()
                );
                self.error = None;
                self.outcome = Some(Outcome {
                    input,
                    report,
                    advisories,
                });
            }
            Err(e) => {
                warn!("Rejected form input: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }
}
