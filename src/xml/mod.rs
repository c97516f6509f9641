//! XML element tree for FMB exports.
//!
//! The parser never touches quick-xml directly. Documents are read once
//! into an owned [`XmlElement`] tree and navigated through a small view
//! API:
//!
//! - [`XmlElement::local_name`] - tag name without namespace prefix
//! - [`XmlElement::children_named`] - prefix-agnostic child lookup, document order
//! - [`XmlElement::attr`] - layered attribute resolution (see [`resolve`])
//!
//! ```text
//! <Module>                                   XmlElement { name: "Module", .. }
//!   <FormModule f_overridden:Name="ORDERS">    ├── attr("Name") == Some("ORDERS")
//!     <Block Name="B_HEAD"/>                   └── children_named("Block")
//!   </FormModule>
//! </Module>
//! ```

mod element;
mod reader;
pub mod resolve;

pub use element::{XmlElement, local_part};
pub use reader::read_document;
pub use resolve::{AttributeLayer, resolve_attribute, resolve_bool, resolve_int};
