#![forbid(unsafe_code)]

//! Field-type registry.
//!
//! Maps type names to constructors. The built-in types are registered by
//! [`FieldRegistry::default`]; hosts add their own with
//! [`FieldRegistry::register`]. A config whose `type` is unknown falls back
//! to its `primitiveType`, so a form authored for a richer host still loads
//! with plain widgets.

use std::collections::HashMap;

use crate::config::{ConfigError, FieldConfig, FieldType, check_configs};
use crate::widgets::{DateField, DropdownField, Field, OptionsField, OptionsKind, TextField};

/// Builds a field from its config.
pub type FieldConstructor = fn(&FieldConfig) -> Result<Field, ConfigError>;

/// Type-name to constructor table.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    constructors: HashMap<String, FieldConstructor>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for field_type in FieldType::ALL {
            registry.register(field_type.name(), builtin_constructor(field_type));
        }
        registry
    }
}

impl FieldRegistry {
    /// A registry with no types at all.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, constructor: FieldConstructor) {
        self.constructors.insert(type_name.into(), constructor);
    }

    /// Whether `type_name` has a constructor.
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Build one field: `type` first, then `primitiveType`.
    pub fn build(&self, config: &FieldConfig) -> Result<Field, ConfigError> {
        if let Some(constructor) = self.constructors.get(&config.field_type) {
            return constructor(config);
        }
        if let Some(fallback) = config.primitive_type.as_deref()
            && let Some(constructor) = self.constructors.get(fallback)
        {
            iform_core::debug!(
                key = %config.key,
                type_name = %config.field_type,
                fallback,
                "field type unknown; using primitive type"
            );
            return constructor(config);
        }
        Err(ConfigError::UnknownType {
            key: config.key.clone(),
            type_name: config.field_type.clone(),
        })
    }

    /// Check keys and build every field in order.
    pub fn build_all(&self, configs: &[FieldConfig]) -> Result<Vec<Field>, ConfigError> {
        check_configs(configs)?;
        configs.iter().map(|c| self.build(c)).collect()
    }
}

fn builtin_constructor(field_type: FieldType) -> FieldConstructor {
    match field_type {
        FieldType::TextBox => |c| text(c, FieldType::TextBox),
        FieldType::TextArea => |c| text(c, FieldType::TextArea),
        FieldType::EmailBox => |c| text(c, FieldType::EmailBox),
        FieldType::NumberBox => |c| text(c, FieldType::NumberBox),
        FieldType::TelephoneBox => |c| text(c, FieldType::TelephoneBox),
        FieldType::DateField => |c| Ok(Field::Date(DateField::new(c.clone()))),
        FieldType::Dropdown => |c| {
            check_options(c)?;
            Ok(Field::Dropdown(DropdownField::new(c.clone())))
        },
        FieldType::CountryDropdown => {
            |c| Ok(Field::Dropdown(DropdownField::countries(c.clone())))
        }
        FieldType::RadioButtons => |c| {
            check_options(c)?;
            Ok(Field::Options(OptionsField::new(c.clone(), OptionsKind::Radio)))
        },
        FieldType::Checkboxes => |c| {
            check_options(c)?;
            Ok(Field::Options(OptionsField::new(c.clone(), OptionsKind::Checkbox)))
        },
    }
}

fn text(config: &FieldConfig, field_type: FieldType) -> Result<Field, ConfigError> {
    TextField::new(config.clone(), field_type).map(Field::Text)
}

fn check_options(config: &FieldConfig) -> Result<(), ConfigError> {
    let len = config.options().len();
    if len == 0 {
        return Err(ConfigError::MissingOptions {
            key: config.key.clone(),
        });
    }
    if let Some(&index) = config.disabled_indexes().iter().find(|&&i| i >= len) {
        return Err(ConfigError::DisabledIndexOutOfRange {
            key: config.key.clone(),
            index,
            len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OptionItem;
    use crate::validation::REQUIRED_MESSAGE;
    use crate::widgets::{BodyLine, ErrorSlot, FieldValue, FieldWidget, Tone};
    use iform_core::event::KeyEvent;

    #[derive(Debug)]
    struct Rating {
        config: FieldConfig,
        stars: String,
        error: ErrorSlot,
    }

    impl FieldWidget for Rating {
        fn config(&self) -> &FieldConfig {
            &self.config
        }
        fn value(&self) -> FieldValue {
            FieldValue::Text(self.stars.clone())
        }
        fn error_slot(&self) -> &ErrorSlot {
            &self.error
        }
        fn error_slot_mut(&mut self) -> &mut ErrorSlot {
            &mut self.error
        }
        fn handle_key(&mut self, _key: &KeyEvent) -> bool {
            false
        }
        fn body_lines(&self, _focused: bool) -> Vec<BodyLine> {
            vec![BodyLine::new(self.stars.clone(), Tone::Normal)]
        }
    }

    fn rating(c: &FieldConfig) -> Result<Field, ConfigError> {
        Ok(Field::Custom(Box::new(Rating {
            config: c.clone(),
            stars: c.placeholder.clone().unwrap_or_default(),
            error: ErrorSlot::default(),
        })))
    }

    fn cfg(key: &str, type_name: &str) -> FieldConfig {
        let mut c = FieldConfig::new(key, FieldType::TextBox, "Q", false);
        c.field_type = type_name.to_string();
        c
    }

    #[test]
    fn builds_every_builtin_type() {
        let registry = FieldRegistry::default();
        for t in FieldType::ALL {
            let mut c = FieldConfig::new("k", t, "Q", true);
            if matches!(
                t,
                FieldType::Dropdown | FieldType::RadioButtons | FieldType::Checkboxes
            ) {
                c = c.with_options(vec![OptionItem::caption("A")]);
            }
            let field = registry.build(&c).expect("builtin");
            assert_eq!(field.key(), "k");
            assert!(field.is_required());
        }
    }

    #[test]
    fn unknown_type_without_fallback_fails() {
        let err = FieldRegistry::default()
            .build(&cfg("x", "StarRating"))
            .expect_err("unknown");
        assert!(matches!(err, ConfigError::UnknownType { ref type_name, .. } if type_name == "StarRating"));
    }

    #[test]
    fn primitive_type_fallback() {
        let c = cfg("x", "StarRating").with_primitive_type(FieldType::NumberBox);
        let field = FieldRegistry::default().build(&c).expect("fallback");
        assert!(matches!(field, Field::Text(_)));
    }

    #[test]
    fn custom_constructor_wins_over_fallback() {
        let mut registry = FieldRegistry::default();
        registry.register("StarRating", rating);
        assert!(registry.contains("StarRating"));
        let c = cfg("x", "StarRating")
            .with_primitive_type(FieldType::NumberBox)
            .with_placeholder("*****");
        let field = registry.build(&c).expect("custom");
        assert!(matches!(field, Field::Custom(_)));
        assert_eq!(field.value(), FieldValue::Text("*****".into()));
    }

    #[test]
    fn custom_widgets_fall_back_to_the_generic_rule() {
        let mut registry = FieldRegistry::default();
        registry.register("StarRating", rating);

        let mut empty = cfg("x", "StarRating");
        empty.required = true;
        let mut field = registry.build(&empty).expect("custom");
        assert!(!field.validate());
        assert_eq!(field.error(), Some(REQUIRED_MESSAGE));
        assert_eq!(REQUIRED_MESSAGE, "Field must be filled.");

        let rated = empty.with_placeholder("***");
        let mut field = registry.build(&rated).expect("custom");
        assert!(field.validate());
        assert_eq!(field.error(), None);
    }

    #[test]
    fn option_types_need_options() {
        let c = FieldConfig::new("c", FieldType::Checkboxes, "Q", false);
        assert!(matches!(
            FieldRegistry::default().build(&c),
            Err(ConfigError::MissingOptions { .. })
        ));
    }

    #[test]
    fn disabled_index_must_be_in_range() {
        let c = FieldConfig::new("d", FieldType::Dropdown, "Q", false)
            .with_options(vec![OptionItem::caption("A")])
            .with_disabled_indexes(vec![3]);
        assert!(matches!(
            FieldRegistry::default().build(&c),
            Err(ConfigError::DisabledIndexOutOfRange { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn build_all_checks_keys() {
        let configs = vec![
            FieldConfig::new("a", FieldType::TextBox, "A", false),
            FieldConfig::new("a", FieldType::TextBox, "B", false),
        ];
        assert!(matches!(
            FieldRegistry::default().build_all(&configs),
            Err(ConfigError::DuplicateKey(_))
        ));
    }
}
