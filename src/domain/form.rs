use super::field::Field;

/// An ordered grid of fields.
///
/// `columns` is only a hint for the renderer's grid; rows are broken
/// explicitly with [`Form::new_line`], never by wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    columns: usize,
    rows: Vec<Vec<Field>>,
}

impl Form {
    /// Creates a form with one empty row. A column hint of `0` is raised to `1`.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            rows: vec![Vec::new()],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Appends `field` to the last row.
    pub fn add(&mut self, field: impl Into<Field>) -> &mut Field {
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        let last = self.rows.len() - 1;
        let row = &mut self.rows[last];
        row.push(field.into());
        let index = row.len() - 1;
        &mut row[index]
    }

    /// Opens a new row unless the current one is still empty.
    pub fn new_line(&mut self) {
        if self.rows.last().map_or(true, |row| !row.is_empty()) {
            self.rows.push(Vec::new());
        }
    }

    /// Populated rows in order. An unpopulated trailing row is not reported.
    pub fn rows(&self) -> &[Vec<Field>] {
        match self.rows.last() {
            Some(last) if last.is_empty() => &self.rows[..self.rows.len() - 1],
            _ => &self.rows,
        }
    }

    /// All fields, row by row, each row in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.rows().iter().flatten()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::TextField;

    fn names(row: &[Field]) -> Vec<&str> {
        row.iter().map(|f| f.name()).collect()
    }

    #[test]
    fn new_line_is_idempotent() {
        let mut form = Form::new(2);
        form.add(TextField::new("a", "A"));
        form.new_line();
        form.new_line();
        form.new_line();
        form.add(TextField::new("b", "B"));

        assert_eq!(form.rows().len(), 2);
        assert_eq!(names(&form.rows()[0]), vec!["a"]);
        assert_eq!(names(&form.rows()[1]), vec!["b"]);
    }

    #[test]
    fn trailing_empty_row_is_absent() {
        let mut form = Form::new(3);
        assert!(form.is_empty());
        assert!(form.rows().is_empty());

        form.add(TextField::new("a", "A"));
        form.new_line();
        assert_eq!(form.rows().len(), 1);
    }

    #[test]
    fn flattened_view_preserves_order() {
        let mut form = Form::new(3);
        form.add(TextField::new("a", "A"));
        form.add(TextField::new("b", "B"));
        form.new_line();
        form.add(TextField::new("c", "C"));

        let flat: Vec<&str> = form.fields().map(|f| f.name()).collect();
        assert_eq!(flat, vec!["a", "b", "c"]);
        assert_eq!(form.field("b").map(|f| f.label()), Some("B"));
    }

    #[test]
    fn zero_columns_is_raised_to_one() {
        assert_eq!(Form::new(0).columns(), 1);
    }
}
