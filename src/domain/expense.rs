//! Expense records: identity, title, amount, and creation/update timestamps.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::common::{Displayable, Identifiable};
use crate::errors::{ExpenseError, Result};
use crate::time::{Clock, SystemClock};

/// A single expense entry.
///
/// `id` and `created_at` are fixed at construction; `updated_at` only moves forward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    id: Uuid,
    title: String,
    /// Non-finite amounts are accepted but serialize as JSON `null`.
    amount: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    updated_at: DateTime<Utc>,
}

impl Expense {
    /// Creates an expense stamped with the system clock. No validation is applied.
    pub fn new(title: impl Into<String>, amount: f64) -> Self {
        Self::new_with_clock(&SystemClock, title, amount)
    }

    pub fn new_with_clock(clock: &dyn Clock, title: impl Into<String>, amount: f64) -> Self {
        let now = clock.now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the supplied fields and refreshes `updated_at`, even when both are `None`.
    pub fn update(&mut self, title: Option<String>, amount: Option<f64>) {
        self.update_with_clock(&SystemClock, title, amount);
    }

    pub fn update_with_clock(
        &mut self,
        clock: &dyn Clock,
        title: Option<String>,
        amount: Option<f64>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(amount) = amount {
            self.amount = amount;
        }
        self.touch(clock.now());
        tracing::trace!(id = %self.id, updated_at = %self.updated_at, "expense updated");
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Mapping of `id`, `title`, `amount`, `created_at`, `updated_at`; timestamps as RFC 3339 text.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(ExpenseError::Serde(serde::ser::Error::custom(format!(
                "expense serialized to non-object value: {other}"
            )))),
        }
    }

    /// Multi-line summary using the default presentation settings.
    pub fn render(&self) -> String {
        self.render_with(&Config::default())
    }

    pub fn render_with(&self, config: &Config) -> String {
        format!(
            "Expense ID: {}\nTitle: {}\nAmount: {}\nCreated At: {}\nLast Updated At: {}",
            self.id,
            self.title,
            config.format_amount(self.amount),
            config.format_timestamp(self.created_at),
            config.format_timestamp(self.updated_at),
        )
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        // Wall clocks can step backwards; `updated_at` never does.
        self.updated_at = now.max(self.updated_at);
    }
}

fn serialize_timestamp<S>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("expense:{} {} ({:.2})", self.id, self.title, self.amount)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
