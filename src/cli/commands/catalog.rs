//! `catalog` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::table::format_catalog;
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Category, QuestionCatalog};

/// One numbered catalog question with both statements
#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    /// One-based question number
    pub number: usize,
    /// Category behind statement A
    pub category_a: Category,
    /// Category behind statement B
    pub category_b: Category,
    /// Text of statement A
    pub statement_a: &'static str,
    /// Text of statement B
    pub statement_b: &'static str,
}

/// Rendered stage-1 catalog
#[derive(Debug, Serialize)]
pub struct CatalogOutput {
    #[serde(skip)]
    catalog: QuestionCatalog,
    /// Questions in catalog order
    pub questions: Vec<CatalogEntry>,
}

impl CatalogOutput {
    /// Number every question in `catalog`
    pub fn new(catalog: QuestionCatalog) -> Self {
        let questions = catalog
            .questions()
            .iter()
            .enumerate()
            .map(|(i, q)| CatalogEntry {
                number: i + 1,
                category_a: q.category_a(),
                category_b: q.category_b(),
                statement_a: q.category_a().statement(),
                statement_b: q.category_b().statement(),
            })
            .collect();
        Self { catalog, questions }
    }
}

impl CommandOutput for CatalogOutput {
    fn to_human(&self) -> String {
        format!(
            "Forced-choice catalog ({} questions)\n{}",
            self.catalog.len(),
            format_catalog(self.catalog.questions())
        )
    }
}

/// Handle catalog command
pub fn execute(catalog: &QuestionCatalog, json: bool) -> Result<()> {
    output(&CatalogOutput::new(catalog.clone()), json);
    Ok(())
}
