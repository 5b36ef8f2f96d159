pub mod json;
pub mod md;

use crate::error::Result;
use chrono::{DateTime, Utc};
use md::Markdown;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

/// Display metadata wrapped around an advisory. The advisory itself carries no
/// timestamps, so equal inputs always produce equal payloads.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<'a, T> {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
    pub advisory: &'a T,
}

impl<'a, T> Envelope<'a, T> {
    pub fn new(advisory: &'a T) -> Self {
        Self::at(advisory, Utc::now())
    }

    pub fn at(advisory: &'a T, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            version: env!("CARGO_PKG_VERSION"),
            advisory,
        }
    }
}

pub fn render<T>(envelope: &Envelope<'_, T>, format: OutputFormat) -> Result<String>
where
    T: Serialize + Markdown,
{
    match format {
        OutputFormat::Json => Ok(json::to_json(envelope)?),
        OutputFormat::Md => Ok(md::to_markdown(envelope)),
    }
}
