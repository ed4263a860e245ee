//! The record the fallback page assembles on submit.

use serde_json::{json, Map, Value};

use crate::domain::{Field, Form};

/// A named control as the submit handler sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Any input or select contributing `name = value`.
    Value { name: String, value: String },
    /// The three controls of a reference field, reported together.
    Reference {
        name: String,
        id: String,
        code: String,
        display: String,
    },
}

/// Controls of `form` carrying the values the page starts with.
///
/// A select without a selection reports its first option, as a browser does.
pub fn controls_of(form: &Form) -> Vec<Control> {
    form.fields()
        .map(|field| match field {
            Field::Text(text) => value(field, text.value.clone()),
            Field::Number(number) => value(field, number.value.map(|v| v.to_string())),
            Field::Date(date) => value(field, date.value.clone()),
            Field::Select(select) => {
                let chosen = select
                    .options()
                    .iter()
                    .find(|option| select.is_selected(option))
                    .or_else(|| select.options().first())
                    .map(|option| option.id.clone());
                value(field, chosen)
            }
            Field::Reference(reference) => Control::Reference {
                name: reference.base.name.clone(),
                id: reference.id_value.clone().unwrap_or_default(),
                code: reference.code.clone().unwrap_or_default(),
                display: reference.display_name.clone().unwrap_or_default(),
            },
            Field::Other(_) => value(field, None),
        })
        .collect()
}

fn value(field: &Field, value: Option<String>) -> Control {
    Control::Value {
        name: field.name().to_string(),
        value: value.unwrap_or_default(),
    }
}

/// Builds the key→value record. Reference fields become `{id, code, name}`
/// objects under their own name; unnamed controls are skipped.
pub fn assemble(controls: &[Control]) -> Map<String, Value> {
    let mut record = Map::new();
    for control in controls {
        if let Control::Reference {
            name,
            id,
            code,
            display,
        } = control
        {
            if !name.is_empty() {
                record.insert(
                    name.clone(),
                    json!({ "id": id, "code": code, "name": display }),
                );
            }
        }
    }
    for control in controls {
        if let Control::Value { name, value } = control {
            let shadowed = record.contains_key(name)
                || name
                    .strip_suffix("_code")
                    .is_some_and(|base| matches!(record.get(base), Some(Value::Object(_))));
            if !name.is_empty() && !shadowed {
                record.insert(name.clone(), Value::String(value.clone()));
            }
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ReferenceField, SelectField, SelectOption, TextField};

    #[test]
    fn reference_fields_nest_their_parts() {
        let controls = vec![
            Control::Value {
                name: "naam".into(),
                value: "Peeters".into(),
            },
            Control::Reference {
                name: "postcode".into(),
                id: "8500".into(),
                code: "8500".into(),
                display: "Kortrijk".into(),
            },
            Control::Value {
                name: "postcode_code".into(),
                value: "8500".into(),
            },
            Control::Value {
                name: String::new(),
                value: "ignored".into(),
            },
        ];

        let record = assemble(&controls);
        assert_eq!(record.len(), 2);
        assert_eq!(record["naam"], "Peeters");
        assert_eq!(
            record["postcode"],
            json!({ "id": "8500", "code": "8500", "name": "Kortrijk" })
        );
    }

    #[test]
    fn controls_reflect_initial_values() {
        let mut form = Form::new(2);
        form.add(TextField::new("naam", "Naam").with_value("Peeters"));
        form.add(SelectField::new("geslacht", "Geslacht").with_options([
            SelectOption::new("M", "Man"),
            SelectOption::new("V", "Vrouw"),
        ]));
        form.add(ReferenceField::new("postcode", "Postcode").with_code("85"));

        let record = assemble(&controls_of(&form));
        assert_eq!(record["naam"], "Peeters");
        assert_eq!(record["geslacht"], "M");
        assert_eq!(
            record["postcode"],
            json!({ "id": "", "code": "85", "name": "" })
        );
    }
}
