//! # fmb-convert
//!
//! Reads Oracle Forms (FMB) XML exports and turns them into field
//! definitions and a trigger report for a target business platform.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → one-shot and parallel batch driver
//!   ↓
//! convert   → field classifier (header / detail / list areas)
//! triggers  → trigger analyzer (SQL extraction, business rules)
//!   ↓
//! model     → immutable Module / Block / Item tree
//!   ↓
//! parser    → FMB XML → model
//!   ↓
//! xml       → element tree, layered attribute resolution
//!   ↓
//! error     → FormsError, Result
//! ```
//!
//! ## Example
//!
//! ```
//! let xml = r#"<Module><FormModule Name="ORDERS">
//!     <Block Name="B_HEAD" QueryDataSourceName="ORDERS">
//!         <Item Name="ORDER_NO" Prompt="Order" CanvasName="CANVAS_BODY"/>
//!     </Block>
//!     <Canvas Name="CANVAS_BODY"/>
//! </FormModule></Module>"#;
//!
//! let module = fmb::parse(xml).unwrap();
//! let conversion = fmb::convert(&module);
//! assert_eq!(conversion.fields[0].name, "ORDER_NO");
//! ```

// ============================================================================
// MODULES (dependency order: error → xml → parser → model → convert/triggers → pipeline)
// ============================================================================

/// Error type shared by the reading layers
pub mod error;

/// XML element tree and attribute resolver
pub mod xml;

/// Structural parser: XML text → Module
pub mod parser;

/// Forms object model
pub mod model;

/// Field classifier
pub mod convert;

/// Trigger analyzer
pub mod triggers;

/// Parse → {convert, analyze} driver
pub mod pipeline;

// Re-export the entry points
pub use convert::{Conversion, ConverterConfig, FieldDefinition, convert, convert_with};
pub use error::{FormsError, Result};
pub use model::Module;
pub use parser::{parse, parse_bytes};
pub use pipeline::{Pipeline, PipelineOutput};
pub use triggers::{TriggerSectionReport, analyze};
