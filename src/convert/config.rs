//! Converter options

/// A block-name convention matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockPattern {
    Exact(String),
    Prefix(String),
    Suffix(String),
}

impl BlockPattern {
    pub fn matches(&self, block_name: &str) -> bool {
        let name = block_name.to_ascii_uppercase();
        match self {
            Self::Exact(p) => name == p.to_ascii_uppercase(),
            Self::Prefix(p) => name.starts_with(&p.to_ascii_uppercase()),
            Self::Suffix(p) => name.ends_with(&p.to_ascii_uppercase()),
        }
    }
}

/// Options for field classification.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Canvas whose items are header fields.
    pub body_canvas: String,
    /// Generic tab canvas whose tabbed items are detail fields.
    pub tab_canvas: String,
    /// Toolbar, control and hidden blocks that never produce fields.
    pub skip_blocks: Vec<BlockPattern>,
    /// Rollup tables whose detail items are dropped.
    pub summary_tables: Vec<String>,
    /// Max length used when the item does not declare one.
    pub default_max_length: u32,
    /// How many fields are copied into the list area.
    pub list_field_limit: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            body_canvas: "CANVAS_BODY".to_string(),
            tab_canvas: "CANVAS_TAB".to_string(),
            skip_blocks: vec![
                BlockPattern::Exact("TOOLBAR".to_string()),
                BlockPattern::Exact("CONTROL".to_string()),
                BlockPattern::Exact("B_TOOLBAR".to_string()),
                BlockPattern::Exact("B_CONTROL".to_string()),
                BlockPattern::Prefix("TOOLBAR_".to_string()),
                BlockPattern::Suffix("_HIDDEN".to_string()),
            ],
            summary_tables: vec!["TB_SUMMARY".to_string()],
            default_max_length: 100,
            list_field_limit: 10,
        }
    }
}

impl ConverterConfig {
    pub fn with_body_canvas(mut self, name: impl Into<String>) -> Self {
        self.body_canvas = name.into();
        self
    }

    pub fn with_tab_canvas(mut self, name: impl Into<String>) -> Self {
        self.tab_canvas = name.into();
        self
    }

    pub fn with_skip_block(mut self, pattern: BlockPattern) -> Self {
        self.skip_blocks.push(pattern);
        self
    }

    pub fn with_summary_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.summary_tables = tables.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_max_length(mut self, length: u32) -> Self {
        self.default_max_length = length;
        self
    }

    pub fn with_list_field_limit(mut self, limit: usize) -> Self {
        self.list_field_limit = limit;
        self
    }

    /// True if the block is excluded by a naming convention.
    pub fn is_skipped_block(&self, block_name: &str) -> bool {
        self.skip_blocks.iter().any(|p| p.matches(block_name))
    }

    /// True if the table is a rollup that must not become a detail table.
    pub fn is_summary_table(&self, table: &str) -> bool {
        self.summary_tables
            .iter()
            .any(|t| t.eq_ignore_ascii_case(table))
    }

    pub fn is_body_canvas(&self, canvas: &str) -> bool {
        canvas.eq_ignore_ascii_case(&self.body_canvas)
    }

    pub fn is_default_tab_canvas(&self, canvas: &str) -> bool {
        canvas.eq_ignore_ascii_case(&self.tab_canvas)
    }
}
