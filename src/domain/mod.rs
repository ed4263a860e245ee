pub mod field;
pub mod form;
pub mod lookup;

pub use field::{
    DateField, Field, FieldBase, FieldKind, NumberField, OtherField, ReferenceField, SelectField,
    SelectOption, TextField,
};
pub use form::Form;
pub use lookup::LookupRecord;
