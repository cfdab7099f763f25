#![forbid(unsafe_code)]

//! Form fields: configuration, widgets, and validation.
//!
//! A form is described by an ordered list of [`FieldConfig`]s supplied by the
//! host. The [`FieldRegistry`] turns each config into a [`Field`], a tagged
//! union over the built-in widget kinds plus host-provided custom widgets.
//! Every widget implements [`FieldWidget`]: it can report its current
//! [`FieldValue`], validate itself, and describe the lines it displays.
//!
//! # Example
//!
//! ```
//! use iform_fields::{FieldRegistry, FieldWidget, parse_config};
//!
//! let configs = parse_config(
//!     r#"[{"key": "age", "type": "NumberBox", "title": "Age", "required": true}]"#,
//! )
//! .unwrap();
//! let mut fields = FieldRegistry::default().build_all(&configs).unwrap();
//! assert!(!fields[0].validate());
//! assert_eq!(fields[0].error(), Some("Please insert a valid number"));
//! ```

pub mod config;
pub mod countries;
pub mod mask;
pub mod registry;
pub mod validation;
pub mod widgets;

pub use config::{
    ConfigError, FieldConfig, FieldType, OptionItem, OptionValue, SUBMIT_KEY, check_configs,
    parse_config,
};
pub use registry::{FieldConstructor, FieldRegistry};
pub use validation::{ValidationError, ValidationResult};
pub use widgets::{BodyLine, Field, FieldValue, FieldWidget, Tone};
