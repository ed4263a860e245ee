use tracing::warn;

use crate::domain::{
    DateField, Field, Form, NumberField, ReferenceField, SelectField, TextField,
};
use crate::errors::FormError;

/// Fluent constructor for a [`Form`].
///
/// A builder is scoped to one render: [`FormBuilder::create`] starts the form
/// under construction and every later `add*`/`new_line` call targets it.
#[derive(Debug, Default)]
pub struct FormBuilder {
    current: Option<Form>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new current form, replacing any previous one.
    pub fn create(&mut self, columns: usize) -> &mut Form {
        self.current.insert(Form::new(columns))
    }

    pub fn current_form(&self) -> Option<&Form> {
        self.current.as_ref()
    }

    /// Takes the form under construction out of the builder.
    pub fn build(&mut self) -> Result<Form, FormError> {
        self.current.take().ok_or(FormError::NoCurrentForm("build"))
    }

    fn form_mut(&mut self, operation: &'static str) -> Result<&mut Form, FormError> {
        self.current
            .as_mut()
            .ok_or(FormError::NoCurrentForm(operation))
    }

    /// Appends `field` to the last row of the current form.
    pub fn add(&mut self, field: impl Into<Field>) -> Result<&mut Field, FormError> {
        let field = field.into();
        if let Field::Number(number) = &field {
            if !number.bounds_are_consistent() {
                warn!(
                    field = %number.base.name,
                    min = ?number.min,
                    max = ?number.max,
                    "number field declares min greater than max"
                );
            }
        }
        Ok(self.form_mut("add")?.add(field))
    }

    /// Closes the current row; consecutive calls never produce empty rows.
    pub fn new_line(&mut self) -> Result<(), FormError> {
        self.form_mut("new_line")?.new_line();
        Ok(())
    }

    pub fn text(&self, name: &str, label: &str) -> TextField {
        TextField::new(name, label)
    }

    pub fn number(&self, name: &str, label: &str, min: Option<i64>, max: Option<i64>) -> NumberField {
        NumberField::new(name, label, min, max)
    }

    pub fn date(&self, name: &str, label: &str) -> DateField {
        DateField::new(name, label)
    }

    pub fn select(&self, name: &str, label: &str) -> SelectField {
        SelectField::new(name, label)
    }

    pub fn reference(&self, name: &str, label: &str) -> ReferenceField {
        ReferenceField::new(name, label)
    }

    pub fn add_text(&mut self, name: &str, label: &str) -> Result<&mut TextField, FormError> {
        self.place(TextField::new(name, label), Field::as_text_mut)
    }

    pub fn add_number(
        &mut self,
        name: &str,
        label: &str,
        min: Option<i64>,
        max: Option<i64>,
    ) -> Result<&mut NumberField, FormError> {
        self.place(NumberField::new(name, label, min, max), Field::as_number_mut)
    }

    pub fn add_date(&mut self, name: &str, label: &str) -> Result<&mut DateField, FormError> {
        self.place(DateField::new(name, label), Field::as_date_mut)
    }

    pub fn add_select(&mut self, name: &str, label: &str) -> Result<&mut SelectField, FormError> {
        self.place(SelectField::new(name, label), Field::as_select_mut)
    }

    pub fn add_reference(
        &mut self,
        name: &str,
        label: &str,
    ) -> Result<&mut ReferenceField, FormError> {
        self.place(ReferenceField::new(name, label), Field::as_reference_mut)
    }

    /// Adds `field` and hands back the stored variant.
    fn place<T>(
        &mut self,
        field: T,
        typed: fn(&mut Field) -> Option<&mut T>,
    ) -> Result<&mut T, FormError>
    where
        T: Into<Field>,
    {
        match typed(self.add(field)?) {
            Some(placed) => Ok(placed),
            // `Form::add` stores the converted field as given, so `typed` always matches it.
            None => unreachable!("placed field changed variant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_sizes(form: &Form) -> Vec<usize> {
        form.rows().iter().map(Vec::len).collect()
    }

    #[test]
    fn rows_and_new_line() {
        let mut builder = FormBuilder::new();
        builder.create(3);

        builder.add_text("a", "A").unwrap();
        builder.add_text("b", "B").unwrap();
        builder.new_line().unwrap();
        builder.add_text("c", "C").unwrap();

        let form = builder.current_form().unwrap();
        assert_eq!(row_sizes(form), vec![2, 1]);
        assert_eq!(form.fields().count(), 3);
    }

    #[test]
    fn fluent_decoration_reaches_the_placed_field() {
        let mut builder = FormBuilder::new();
        builder.create(2);
        builder
            .add_text("naam", "Naam")
            .unwrap()
            .set_icon("user")
            .set_max_length(50);
        builder
            .add_reference("postcode", "Postcode")
            .unwrap()
            .set_code("8500")
            .set_lookup_url("/persoon/findPostCodeById");

        let form = builder.build().unwrap();
        match form.field("naam") {
            Some(Field::Text(text)) => {
                assert_eq!(text.base.icon.as_deref(), Some("user"));
                assert_eq!(text.max_length, Some(50));
            }
            other => panic!("unexpected field: {:?}", other),
        }
        match form.field("postcode") {
            Some(Field::Reference(reference)) => {
                assert_eq!(reference.code.as_deref(), Some("8500"));
            }
            other => panic!("unexpected field: {:?}", other),
        }
    }

    #[test]
    fn operations_without_create_are_illegal() {
        let mut builder = FormBuilder::new();

        assert_eq!(
            builder.add(TextField::new("a", "A")).unwrap_err(),
            FormError::NoCurrentForm("add")
        );
        assert_eq!(builder.new_line().unwrap_err(), FormError::NoCurrentForm("new_line"));
        assert!(builder.add_select("s", "S").is_err());
        assert_eq!(builder.build().unwrap_err(), FormError::NoCurrentForm("build"));
    }

    #[test]
    fn detached_constructors_do_not_place_fields() {
        let mut builder = FormBuilder::new();
        builder.create(1);
        let _ = builder.text("a", "A");
        let _ = builder.number("n", "N", Some(0), None);
        let _ = builder.date("d", "D");

        assert!(builder.current_form().unwrap().is_empty());
    }

    #[test]
    fn create_replaces_previous_form() {
        let mut builder = FormBuilder::new();
        builder.create(2).add(TextField::new("old", "Old"));
        builder.create(4);

        let form = builder.build().unwrap();
        assert_eq!(form.columns(), 4);
        assert!(form.is_empty());
    }

    #[test]
    fn row_count_tracks_breaks_after_populated_rows() {
        let mut builder = FormBuilder::new();
        builder.create(3);
        builder.new_line().unwrap();
        builder.add_text("a", "A").unwrap();
        builder.new_line().unwrap();
        builder.new_line().unwrap();
        builder.add_date("b", "B").unwrap();
        builder.new_line().unwrap();

        let form = builder.build().unwrap();
        assert_eq!(row_sizes(&form), vec![1, 1]);
    }

    #[test]
    fn every_typed_adder_returns_the_placed_variant() {
        use crate::domain::FieldKind;

        let mut builder = FormBuilder::new();
        builder.create(5);
        builder.add_text("t", "T").unwrap().set_value("tekst");
        builder.add_number("n", "N", None, None).unwrap().set_value(7);
        builder.add_date("d", "D").unwrap().set_value("2024-01-31");
        builder.add_select("s", "S").unwrap().set_selected("x");
        builder.add_reference("r", "R").unwrap().set_code("8500");

        let mut form = builder.build().unwrap();
        let kinds: Vec<FieldKind> = form.fields().map(Field::kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Text,
                FieldKind::Number,
                FieldKind::Date,
                FieldKind::Select,
                FieldKind::Reference,
            ]
        );
        let number = form.add(NumberField::new("m", "M", None, None));
        assert_eq!(number.as_number_mut().map(|n| n.value), Some(None));
        assert!(form.add(DateField::new("e", "E")).as_text_mut().is_none());
    }
}
