use crate::domain::Form;
use crate::errors::FormError;

use super::FormBuilder;

/// A titled, form-producing unit: the only thing a caller hands to a renderer.
///
/// `create_form` must be deterministic: the same dto and builder behaviour
/// always yield the same form shape.
pub trait Screen {
    type Dto;

    fn title(&self) -> &str;

    fn dto(&self) -> &Self::Dto;

    fn create_form(&self, builder: &mut FormBuilder, dto: &Self::Dto) -> Result<Form, FormError>;
}

/// A [`Screen`] assembled from a title, a dto and a building function.
pub struct ScreenDef<T, F> {
    title: String,
    dto: T,
    build: F,
}

impl<T, F> ScreenDef<T, F>
where
    F: Fn(&mut FormBuilder, &T) -> Result<Form, FormError>,
{
    pub fn new(title: impl Into<String>, dto: T, build: F) -> Self {
        Self {
            title: title.into(),
            dto,
            build,
        }
    }
}

impl<T, F> Screen for ScreenDef<T, F>
where
    F: Fn(&mut FormBuilder, &T) -> Result<Form, FormError>,
{
    type Dto = T;

    fn title(&self) -> &str {
        &self.title
    }

    fn dto(&self) -> &T {
        &self.dto
    }

    fn create_form(&self, builder: &mut FormBuilder, dto: &T) -> Result<Form, FormError> {
        (self.build)(builder, dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_def_is_deterministic() {
        let screen = ScreenDef::new("Adres", "Kerkstraat".to_string(), |builder, street| {
            builder.create(2);
            builder.add_text("straat", "Straat")?.set_value(street.clone());
            builder.add_text("nummer", "Nummer")?;
            builder.build()
        });

        let first = screen.create_form(&mut FormBuilder::new(), screen.dto()).unwrap();
        let second = screen.create_form(&mut FormBuilder::new(), screen.dto()).unwrap();
        assert_eq!(first, second);
        assert_eq!(screen.title(), "Adres");
        assert_eq!(first.fields().count(), 2);
    }
}
