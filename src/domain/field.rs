//! Typed input declarations placed into a [`Form`](super::Form).
//!
//! A [`Field`] is a closed set of variants. Renderers dispatch with `match`, so
//! adding a variant is a compile error at every rendering site until it is
//! handled.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Discriminant of a [`Field`], used as the `type` attribute in markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Select,
    Reference,
    Other,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Select => "select",
            FieldKind::Reference => "reference",
            FieldKind::Other => "other",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes shared by every variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBase {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl FieldBase {
    fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            icon: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    #[serde(flatten)]
    pub base: FieldBase,
    pub value: Option<String>,
    /// Advisory only; nothing in this crate enforces it.
    pub max_length: Option<u32>,
}

impl TextField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(name, label),
            value: None,
            max_length: None,
        }
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.base.icon = Some(icon.into());
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn set_max_length(&mut self, max_length: u32) -> &mut Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(icon);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.set_max_length(max_length);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberField {
    #[serde(flatten)]
    pub base: FieldBase,
    pub value: Option<i64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NumberField {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Self {
        Self {
            base: FieldBase::new(name, label),
            value: None,
            min,
            max,
        }
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.base.icon = Some(icon.into());
        self
    }

    pub fn set_value(&mut self, value: i64) -> &mut Self {
        self.value = Some(value);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(icon);
        self
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.set_value(value);
        self
    }

    /// `true` unless both bounds are set and `min > max`.
    pub fn bounds_are_consistent(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateField {
    #[serde(flatten)]
    pub base: FieldBase,
    /// ISO `YYYY-MM-DD` text; never parsed here.
    pub value: Option<String>,
}

impl DateField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(name, label),
            value: None,
        }
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.base.icon = Some(icon.into());
        self
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    pub fn set_date(&mut self, date: NaiveDate) -> &mut Self {
        self.value = Some(date.format("%Y-%m-%d").to_string());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(icon);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.set_date(date);
        self
    }
}

/// One `(id, label)` entry of a [`SelectField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub id: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectField {
    #[serde(flatten)]
    pub base: FieldBase,
    options: Vec<SelectOption>,
    pub selected_id: Option<String>,
}

impl SelectField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(name, label),
            options: Vec::new(),
            selected_id: None,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Replaces the option list. A repeated id keeps its first occurrence.
    pub fn set_options<I>(&mut self, options: I) -> &mut Self
    where
        I: IntoIterator<Item = SelectOption>,
    {
        let mut seen = HashSet::new();
        self.options = options
            .into_iter()
            .filter(|option| seen.insert(option.id.clone()))
            .collect();
        self
    }

    pub fn set_selected(&mut self, id: impl Into<String>) -> &mut Self {
        self.selected_id = Some(id.into());
        self
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.base.icon = Some(icon.into());
        self
    }

    pub fn with_options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = SelectOption>,
    {
        self.set_options(options);
        self
    }

    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.set_selected(id);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.set_icon(icon);
        self
    }

    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.selected_id.as_deref() == Some(option.id.as_str())
    }
}

/// Composite field: a typed code, the resolved display name, and the hidden
/// identifier, resolved against `lookup_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceField {
    #[serde(flatten)]
    pub base: FieldBase,
    pub id_value: Option<String>,
    pub code: Option<String>,
    pub display_name: Option<String>,
    pub lookup_url: Option<String>,
}

impl ReferenceField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            base: FieldBase::new(name, label),
            id_value: None,
            code: None,
            display_name: None,
            lookup_url: None,
        }
    }

    /// Name of the visible code input, `<field>_code`.
    pub fn code_input_name(&self) -> String {
        format!("{}_code", self.base.name)
    }

    /// Element id of the display-name span, `<field>_name`.
    pub fn name_element_id(&self) -> String {
        format!("{}_name", self.base.name)
    }

    pub fn set_id_value(&mut self, id: impl Into<String>) -> &mut Self {
        self.id_value = Some(id.into());
        self
    }

    pub fn set_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.code = Some(code.into());
        self
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn set_lookup_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.lookup_url = Some(url.into());
        self
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) -> &mut Self {
        self.base.icon = Some(icon.into());
        self
    }

    pub fn with_id_value(mut self, id: impl Into<String>) -> Self {
        self.set_id_value(id);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.set_code(code);
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.set_display_name(name);
        self
    }

    pub fn with_lookup_url(mut self, url: impl Into<String>) -> Self {
        self.set_lookup_url(url);
        self
    }
}

/// An input type without dedicated markup; rendered as a plain text input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtherField {
    #[serde(flatten)]
    pub base: FieldBase,
    pub type_name: String,
}

impl OtherField {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            base: FieldBase::new(name, label),
            type_name: type_name.into(),
        }
    }
}

/// One input declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Field {
    Text(TextField),
    Number(NumberField),
    Date(DateField),
    Select(SelectField),
    Reference(ReferenceField),
    Other(OtherField),
}

impl Field {
    fn base(&self) -> &FieldBase {
        match self {
            Field::Text(field) => &field.base,
            Field::Number(field) => &field.base,
            Field::Date(field) => &field.base,
            Field::Select(field) => &field.base,
            Field::Reference(field) => &field.base,
            Field::Other(field) => &field.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn label(&self) -> &str {
        &self.base().label
    }

    pub fn icon(&self) -> Option<&str> {
        self.base().icon.as_deref()
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextField> {
        match self {
            Field::Text(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut NumberField> {
        match self {
            Field::Number(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_date_mut(&mut self) -> Option<&mut DateField> {
        match self {
            Field::Date(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectField> {
        match self {
            Field::Select(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_reference_mut(&mut self) -> Option<&mut ReferenceField> {
        match self {
            Field::Reference(field) => Some(field),
            _ => None,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Text(_) => FieldKind::Text,
            Field::Number(_) => FieldKind::Number,
            Field::Date(_) => FieldKind::Date,
            Field::Select(_) => FieldKind::Select,
            Field::Reference(_) => FieldKind::Reference,
            Field::Other(_) => FieldKind::Other,
        }
    }
}

impl From<TextField> for Field {
    fn from(field: TextField) -> Self {
        Field::Text(field)
    }
}

impl From<NumberField> for Field {
    fn from(field: NumberField) -> Self {
        Field::Number(field)
    }
}

impl From<DateField> for Field {
    fn from(field: DateField) -> Self {
        Field::Date(field)
    }
}

impl From<SelectField> for Field {
    fn from(field: SelectField) -> Self {
        Field::Select(field)
    }
}

impl From<ReferenceField> for Field {
    fn from(field: ReferenceField) -> Self {
        Field::Reference(field)
    }
}

impl From<OtherField> for Field {
    fn from(field: OtherField) -> Self {
        Field::Other(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capability_set_is_uniform_across_variants() {
        let fields: Vec<Field> = vec![
            TextField::new("naam", "Naam").with_icon("user").into(),
            NumberField::new("leeftijd", "Leeftijd", Some(0), Some(150)).into(),
            DateField::new("geboorteDatum", "Geboorte datum").into(),
            SelectField::new("geslacht", "Geslacht").into(),
            ReferenceField::new("postcode", "Postcode").into(),
            OtherField::new("email", "E-mail", "email").into(),
        ];

        let kinds: Vec<&str> = fields.iter().map(|f| f.kind().as_str()).collect();
        assert_eq!(
            kinds,
            vec!["text", "number", "date", "select", "reference", "other"]
        );
        assert_eq!(fields[0].name(), "naam");
        assert_eq!(fields[0].label(), "Naam");
        assert_eq!(fields[0].icon(), Some("user"));
        assert_eq!(fields[1].icon(), None);
    }

    #[test]
    fn select_options_keep_first_occurrence_of_an_id() {
        let field = SelectField::new("geslacht", "Geslacht").with_options([
            SelectOption::new("M", "Man"),
            SelectOption::new("V", "Vrouw"),
            SelectOption::new("M", "Duplicate"),
        ]);

        let labels: Vec<&str> = field.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Man", "Vrouw"]);
    }

    #[test]
    fn number_bounds_consistency() {
        assert!(NumberField::new("a", "A", Some(0), Some(150)).bounds_are_consistent());
        assert!(NumberField::new("a", "A", None, Some(-5)).bounds_are_consistent());
        assert!(!NumberField::new("a", "A", Some(10), Some(1)).bounds_are_consistent());
    }

    #[test]
    fn date_value_is_iso_formatted() {
        let date = NaiveDate::from_ymd_opt(1990, 3, 7).unwrap();
        let field = DateField::new("geboorteDatum", "Geboorte datum").with_date(date);
        assert_eq!(field.value.as_deref(), Some("1990-03-07"));
    }

    #[test]
    fn reference_derived_names() {
        let field = ReferenceField::new("postcode", "Postcode");
        assert_eq!(field.code_input_name(), "postcode_code");
        assert_eq!(field.name_element_id(), "postcode_name");
    }

    #[test]
    fn serialized_field_carries_type_tag() {
        let field: Field = TextField::new("naam", "Naam").with_max_length(50).into();
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["name"], "naam");
        assert_eq!(json["max_length"], 50);
    }

    #[test]
    fn typed_projections_match_only_their_variant() {
        let mut text: Field = TextField::new("naam", "Naam").into();
        let mut reference: Field = ReferenceField::new("postcode", "Postcode").into();

        text.as_text_mut().unwrap().set_value("Peeters");
        assert!(text.as_reference_mut().is_none());
        assert!(text.as_select_mut().is_none());
        reference.as_reference_mut().unwrap().set_code("8500");
        assert!(reference.as_number_mut().is_none());
        assert!(reference.as_date_mut().is_none());

        match (&text, &reference) {
            (Field::Text(t), Field::Reference(r)) => {
                assert_eq!(t.value.as_deref(), Some("Peeters"));
                assert_eq!(r.code.as_deref(), Some("8500"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
