//! One-shot and batch driver: parse, then classify and analyze.
//!
//! ```text
//! xml ──parse──► Module ──┬──► convert_with ──► Conversion
//!                         └──► analyze      ──► TriggerSectionReport
//! ```
//!
//! Documents are independent, so a batch is processed in parallel. Output
//! order always matches input order and one bad document never affects
//! the others.

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convert::{Conversion, ConverterConfig, convert_with};
use crate::error::Result;
use crate::model::Module;
use crate::parser::parse;
use crate::triggers::{TriggerSectionReport, analyze};

/// Everything produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineOutput {
    pub module: Module,
    pub conversion: Conversion,
    pub triggers: TriggerSectionReport,
}

#[cfg(feature = "serde")]
impl PipelineOutput {
    /// Pretty-printed JSON of the whole result.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: ConverterConfig,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Process one document.
    pub fn run(&self, xml: &str) -> Result<PipelineOutput> {
        let module = parse(xml)?;
        let (conversion, triggers) = rayon::join(
            || convert_with(&module, &self.config),
            || analyze(&module),
        );
        tracing::debug!(
            module = %module.name,
            fields = conversion.fields.len(),
            triggers = triggers.statistics.total_count,
            "processed form"
        );
        Ok(PipelineOutput {
            module,
            conversion,
            triggers,
        })
    }

    /// Process many documents in parallel. Results line up with `documents`.
    pub fn run_batch<S>(&self, documents: &[S]) -> Vec<Result<PipelineOutput>>
    where
        S: AsRef<str> + Sync,
    {
        let results: Vec<_> = documents
            .par_iter()
            .map(|doc| self.run(doc.as_ref()))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            tracing::warn!(total = results.len(), failed, "some forms could not be read");
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"<Module><FormModule Name="F1">
        <Block Name="B1" QueryDataSourceName="T1">
            <Item Name="A" ItemType="Text Item" CanvasName="CANVAS_BODY"/>
        </Block>
        <Canvas Name="CANVAS_BODY"/>
    </FormModule></Module>"#;

    #[test]
    fn test_run_produces_all_parts() {
        let output = Pipeline::new().run(SMALL).unwrap();
        assert_eq!(output.module.name, "F1");
        assert!(!output.conversion.fields.is_empty());
        assert_eq!(output.triggers.statistics.total_count, 0);
    }

    #[test]
    fn test_run_propagates_parse_errors() {
        assert!(Pipeline::new().run("<Form/>").is_err());
    }
}
