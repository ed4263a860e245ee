//! Hand-built HTML for when the template engine cannot be used.

use std::fmt::{self, Write};

use crate::config::RenderConfig;
use crate::domain::{Field, Form, ReferenceField, SelectField};
use crate::errors::RenderError;
use crate::lookup::client::{dom, LOOKUP_SCRIPT};
use crate::utils::html::{escape_html, push_attr, push_opt_attr};

use super::{icons, FormRenderer};

/// Renders a complete page, lookup modal and script included, straight from
/// a [`Form`]. Never fails.
#[derive(Debug, Clone, Default)]
pub struct FallbackRenderer {
    config: RenderConfig,
}

impl FallbackRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn document(&self, title: &str, form: &Form) -> String {
        let mut out = String::with_capacity(16 * 1024);
        // Writing into a String cannot fail.
        let _ = self.write_document(&mut out, title, form);
        out
    }

    fn write_document(&self, out: &mut String, title: &str, form: &Form) -> fmt::Result {
        let title = escape_html(title);

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n");
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        writeln!(out, "<title>{title}</title>")?;
        out.push_str("<link rel=\"stylesheet\"");
        push_attr(out, "href", &self.config.stylesheet_href);
        out.push_str(">\n</head>\n<body>\n");

        writeln!(out, "<header class=\"page-header\"><h1>{title}</h1></header>")?;
        out.push_str("<main class=\"container\">\n<div class=\"form-card\">\n");
        out.push_str("<form class=\"form-body\" method=\"post\" novalidate>\n");
        out.push_str("<div class=\"form-rows\">\n");
        for row in form.rows() {
            writeln!(
                out,
                "<div class=\"form-row\" style=\"display:grid;grid-template-columns:repeat({}, 1fr);gap:1rem\">",
                form.columns()
            )?;
            for field in row {
                write_field(out, field)?;
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n<div class=\"form-actions\">\n");
        writeln!(
            out,
            "<button type=\"submit\" class=\"btn primary\">{}</button>",
            escape_html(&self.config.submit_label)
        )?;
        out.push_str("</div>\n</form>\n</div>\n</main>\n");

        self.write_lookup_modal(out)?;

        out.push_str("<script>\n");
        out.push_str(LOOKUP_SCRIPT);
        out.push_str("</script>\n</body>\n</html>\n");
        Ok(())
    }

    fn write_lookup_modal(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "<div id=\"{}\" class=\"lookup-overlay\" hidden aria-hidden=\"true\"></div>",
            dom::OVERLAY_ID
        )?;
        writeln!(
            out,
            "<div id=\"{}\" class=\"lookup-modal\" role=\"dialog\" aria-modal=\"true\" aria-labelledby=\"lookup-title\" {}=\"{}\" hidden aria-hidden=\"true\">",
            dom::MODAL_ID,
            dom::DEBOUNCE_ATTR,
            self.config.lookup_debounce_ms
        )?;
        out.push_str("<div class=\"lookup-header\">\n<h2 id=\"lookup-title\">Zoeken</h2>\n");
        writeln!(
            out,
            "<button type=\"button\" class=\"{}\" aria-label=\"Sluiten\">&times;</button>",
            dom::CLOSE_CLASS
        )?;
        out.push_str("</div>\n");
        writeln!(
            out,
            "<input id=\"{}\" class=\"input\" type=\"search\" name=\"code\" autocomplete=\"off\">",
            dom::INPUT_ID
        )?;
        writeln!(
            out,
            "<ul id=\"{}\" class=\"lookup-list\" role=\"listbox\"></ul>",
            dom::LIST_ID
        )?;
        out.push_str("<div class=\"lookup-actions\">\n");
        writeln!(
            out,
            "<button type=\"button\" class=\"btn {}\">Annuleren</button>",
            dom::CANCEL_CLASS
        )?;
        writeln!(
            out,
            "<button type=\"button\" class=\"btn primary {}\">Kiezen</button>",
            dom::CONFIRM_CLASS
        )?;
        out.push_str("</div>\n</div>\n");
        Ok(())
    }
}

impl FormRenderer for FallbackRenderer {
    fn render_form(&self, title: &str, form: &Form) -> Result<String, RenderError> {
        Ok(self.document(title, form))
    }
}

fn write_field(out: &mut String, field: &Field) -> fmt::Result {
    out.push_str("<div class=\"form-item\">\n");
    let target = match field {
        Field::Reference(reference) => reference.code_input_name(),
        _ => field.name().to_string(),
    };
    writeln!(
        out,
        "<label for=\"{}\">{}</label>",
        escape_html(&target),
        escape_html(field.label())
    )?;

    match field {
        Field::Text(text) => {
            let mut input = open_input("text", field.name());
            push_opt_attr(&mut input, "value", text.value.as_deref());
            input.push('>');
            write_with_icon(out, field.icon(), &input)?;
        }
        Field::Number(number) => {
            let mut input = open_input("number", field.name());
            push_opt_attr(&mut input, "value", number.value);
            push_opt_attr(&mut input, "min", number.min);
            push_opt_attr(&mut input, "max", number.max);
            input.push('>');
            write_with_icon(out, field.icon(), &input)?;
        }
        Field::Date(date) => {
            let mut input = open_input("date", field.name());
            push_opt_attr(&mut input, "value", date.value.as_deref());
            input.push('>');
            write_with_icon(out, field.icon(), &input)?;
        }
        Field::Select(select) => write_select(out, select)?,
        Field::Reference(reference) => write_reference(out, reference)?,
        Field::Other(_) => {
            let mut input = open_input("text", field.name());
            input.push('>');
            writeln!(out, "{input}")?;
        }
    }

    out.push_str("</div>\n");
    Ok(())
}

fn open_input(kind: &str, name: &str) -> String {
    let mut input = String::from("<input class=\"input\"");
    push_attr(&mut input, "type", kind);
    push_attr(&mut input, "id", name);
    push_attr(&mut input, "name", name);
    input
}

fn write_with_icon(out: &mut String, icon: Option<&str>, control: &str) -> fmt::Result {
    match icon {
        Some(key) => writeln!(
            out,
            "<div class=\"input-with-icon\"><span class=\"input-icon\" aria-hidden=\"true\">{}</span>{}</div>",
            icons::glyph(key),
            control
        ),
        None => writeln!(out, "{control}"),
    }
}

fn write_select(out: &mut String, select: &SelectField) -> fmt::Result {
    out.push_str("<select class=\"input\"");
    push_attr(out, "id", &select.base.name);
    push_attr(out, "name", &select.base.name);
    out.push_str(">\n");
    for option in select.options() {
        out.push_str("<option");
        push_attr(out, "value", &option.id);
        if select.is_selected(option) {
            out.push_str(" selected");
        }
        writeln!(out, ">{}</option>", escape_html(&option.label))?;
    }
    out.push_str("</select>\n");
    Ok(())
}

fn write_reference(out: &mut String, reference: &ReferenceField) -> fmt::Result {
    let name = &reference.base.name;
    let lookup_url = reference.lookup_url.as_deref();

    out.push_str("<div");
    push_attr(out, "class", dom::REFERENCE_CLASS);
    push_attr(out, dom::REF_ATTR, name);
    out.push_str(">\n");

    let mut code = open_input("text", &reference.code_input_name());
    push_opt_attr(&mut code, "value", reference.code.as_deref());
    push_opt_attr(&mut code, dom::LOOKUP_URL_ATTR, lookup_url);
    code.push_str(" autocomplete=\"off\">");
    writeln!(out, "{code}")?;

    out.push_str("<span");
    push_attr(out, "class", dom::REFERENCE_NAME_CLASS);
    push_attr(out, "id", &reference.name_element_id());
    writeln!(
        out,
        ">{}</span>",
        escape_html(reference.display_name.as_deref().unwrap_or_default())
    )?;

    out.push_str("<button type=\"button\" class=\"btn icon\"");
    push_opt_attr(out, dom::LOOKUP_URL_ATTR, lookup_url);
    writeln!(out, " aria-label=\"Zoeken\">{}</button>", icons::SEARCH)?;

    out.push_str("<input type=\"hidden\"");
    push_attr(out, "id", name);
    push_attr(out, "name", name);
    push_attr(out, "value", reference.id_value.as_deref().unwrap_or_default());
    out.push_str(">\n</div>\n");
    Ok(())
}
