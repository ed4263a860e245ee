use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Form, LookupRecord, SelectOption};
use crate::errors::FormError;
use crate::form::{FormBuilder, Screen};

pub const TITLE: &str = "Persoon scherm";
pub const POSTCODE_LOOKUP_URL: &str = "/persoon/findPostCodeById";
pub const POSTCODE_ITEMS_URL: &str = "/persoon/lookup/postcodes";
pub const POSTCODE_SELECT_URL: &str = "/persoon/lookup/select";

/// Person record edited by [`PersoonScreen`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersoonDto {
    pub naam: Option<String>,
    pub voornaam: Option<String>,
    pub geboorte_datum: Option<NaiveDate>,
    pub leeftijd: Option<i64>,
    pub geslacht: Option<String>,
    pub postcode: Option<LookupRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct PersoonScreen {
    dto: PersoonDto,
}

impl PersoonScreen {
    pub fn new(dto: PersoonDto) -> Self {
        Self { dto }
    }
}

impl Screen for PersoonScreen {
    type Dto = PersoonDto;

    fn title(&self) -> &str {
        TITLE
    }

    fn dto(&self) -> &PersoonDto {
        &self.dto
    }

    fn create_form(&self, builder: &mut FormBuilder, dto: &PersoonDto) -> Result<Form, FormError> {
        builder.create(3);

        let naam = builder.add_text("naam", "Naam")?;
        naam.set_max_length(50).set_icon("user");
        if let Some(value) = &dto.naam {
            naam.set_value(value.as_str());
        }

        let voornaam = builder.add_text("voornaam", "Voornaam")?;
        voornaam.set_max_length(50).set_icon("user");
        if let Some(value) = &dto.voornaam {
            voornaam.set_value(value.as_str());
        }

        let geboorte = builder.add_date("geboorteDatum", "Geboorte datum")?;
        geboorte.set_icon("calendar");
        if let Some(date) = dto.geboorte_datum {
            geboorte.set_date(date);
        }

        let leeftijd = builder.add_number("leeftijd", "Leeftijd", Some(0), Some(150))?;
        leeftijd.set_icon("hash");
        if let Some(value) = dto.leeftijd {
            leeftijd.set_value(value);
        }

        builder.new_line()?;

        let geslacht = builder.add_select("geslacht", "Geslacht")?;
        geslacht.set_options([SelectOption::new("M", "Man"), SelectOption::new("V", "Vrouw")]);
        if let Some(id) = &dto.geslacht {
            geslacht.set_selected(id.as_str());
        }

        let postcode = builder.add_reference("postcode", "Postcode")?;
        postcode.set_lookup_url(POSTCODE_LOOKUP_URL);
        if let Some(record) = &dto.postcode {
            postcode
                .set_code(record.code.as_str())
                .set_display_name(record.name.as_str())
                .set_id_value(record.effective_id());
        }

        builder.build()
    }
}
