//! Date picker inputs.

use super::{value_as_text, TextInput, Widget, WidgetKind};
use crate::browser::Browser;
use crate::locator::{Locator, Selector};
use crate::result::{ViewError, ViewResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Format the date picker displays and accepts
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y";

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Date picker backed by a text input
#[derive(Debug, Clone)]
pub struct Calendar {
    input: TextInput,
}

impl Calendar {
    /// Date picker on the input with the given `name`
    #[must_use]
    pub fn by_name(name: &str) -> Self {
        Self {
            input: TextInput::new(Selector::name(name)),
        }
    }

    /// Current date, `None` when empty
    pub async fn date(&self, browser: &Browser) -> ViewResult<Option<NaiveDate>> {
        let raw = self.input.value(browser).await?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        parse_date(raw.trim()).map(Some).ok_or_else(|| {
            ViewError::driver(format!("unparseable date {raw:?} in {}", self.locator()))
        })
    }

    /// Set the date; returns whether it changed
    pub async fn set_date(&self, browser: &Browser, date: NaiveDate) -> ViewResult<bool> {
        let text = date.format(DISPLAY_FORMAT).to_string();
        self.input.fill_text(browser, &text).await
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, DISPLAY_FORMAT))
        .ok()
}

/// Strict `YYYY-MM-DD`; anything looser is not an ISO date here
fn parse_iso(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, ISO_FORMAT).ok()
}

#[async_trait]
impl Widget for Calendar {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Calendar
    }

    fn locator(&self) -> &Locator {
        self.input.locator()
    }

    async fn read(&self, browser: &Browser) -> ViewResult<Value> {
        self.input.read(browser).await
    }

    /// ISO dates are rewritten in the picker format; other text is typed as is
    async fn fill(&self, browser: &Browser, value: &Value) -> ViewResult<bool> {
        let text = value_as_text(self.locator(), value)?;
        match parse_iso(text.trim()) {
            Some(date) => self.set_date(browser, date).await,
            None => self.input.fill_text(browser, &text).await,
        }
    }
}
