//! HTML fragments served by the lookup endpoints when the page drives them
//! through htmx instead of the JSON endpoint.

use std::fmt::Write;

use serde_json::json;

use crate::domain::LookupRecord;
use crate::utils::html::{escape_html, push_attr, push_opt_attr};

/// Display text of a candidate: `code - name`, or just the name without a code.
pub fn candidate_label(record: &LookupRecord) -> String {
    if record.code.is_empty() {
        record.name.clone()
    } else if record.name.is_empty() {
        record.code.clone()
    } else {
        format!("{} - {}", record.code, record.name)
    }
}

/// One `<li class="lookup-item">` per record.
///
/// With `ref_field` set every item posts its selection to `select_url` so the
/// server can answer with [`selection_fragment`].
pub fn items_fragment(records: &[LookupRecord], ref_field: Option<&str>, select_url: &str) -> String {
    let ref_field = ref_field.map(str::trim).filter(|name| !name.is_empty());
    let mut out = String::new();
    for record in records {
        out.push_str("<li class=\"lookup-item\" role=\"option\" tabindex=\"0\"");
        push_attr(&mut out, "data-id", record.effective_id());
        push_attr(&mut out, "data-code", &record.code);
        push_attr(&mut out, "data-name", &record.name);
        if let Some(field) = ref_field {
            let vals = json!({
                "id": record.effective_id(),
                "code": record.code,
                "name": record.name,
                "ref": field,
            });
            push_attr(&mut out, "hx-post", select_url);
            push_attr(&mut out, "hx-vals", &vals.to_string());
            push_attr(&mut out, "hx-swap", "none");
        }
        let _ = write!(out, ">{}</li>", escape_html(&candidate_label(record)));
        out.push('\n');
    }
    out
}

/// Out-of-band swap replacing the code input, name span and hidden input of
/// the reference field `ref_field`. Returns an empty string without a field.
pub fn selection_fragment(record: &LookupRecord, ref_field: &str, lookup_url: Option<&str>) -> String {
    let field = ref_field.trim();
    if field.is_empty() {
        tracing::warn!(code = %record.code, "selection without a reference field; nothing to swap");
        return String::new();
    }

    let code_name = format!("{}_code", field);
    let mut out = String::new();

    out.push_str("<input class=\"input\" type=\"text\"");
    push_attr(&mut out, "id", &code_name);
    push_attr(&mut out, "name", &code_name);
    push_attr(&mut out, "value", &record.code);
    push_opt_attr(&mut out, "data-lookup-url", lookup_url);
    push_attr(&mut out, "data-ref-code", field);
    out.push_str(" autocomplete=\"off\" hx-swap-oob=\"true\">\n");

    out.push_str("<span class=\"reference-name\"");
    push_attr(&mut out, "id", &format!("{}_name", field));
    let _ = writeln!(out, " hx-swap-oob=\"true\">{}</span>", escape_html(&record.name));

    out.push_str("<input type=\"hidden\"");
    push_attr(&mut out, "id", field);
    push_attr(&mut out, "name", field);
    push_attr(&mut out, "value", record.effective_id());
    out.push_str(" hx-swap-oob=\"true\">\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_carry_data_attributes() {
        let records = vec![
            LookupRecord::new("8500", "8500", "Kortrijk"),
            LookupRecord::new("8501", "8501", "Bissegem"),
        ];
        let html = items_fragment(&records, None, "/persoon/lookup/select");

        assert_eq!(html.matches("<li class=\"lookup-item\"").count(), 2);
        assert!(html.contains(r#"data-id="8500" data-code="8500" data-name="Kortrijk">8500 - Kortrijk</li>"#));
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn items_post_selection_when_ref_is_known() {
        let records = vec![LookupRecord::new("8500", "8500", "Kortrijk")];
        let html = items_fragment(&records, Some("postcode"), "/persoon/lookup/select");

        assert!(html.contains(r#"hx-post="/persoon/lookup/select""#));
        assert!(html.contains("&quot;ref&quot;:&quot;postcode&quot;"));
    }

    #[test]
    fn blank_ref_is_ignored() {
        let records = vec![LookupRecord::new("8500", "8500", "Kortrijk")];
        let html = items_fragment(&records, Some("  "), "/persoon/lookup/select");
        assert!(!html.contains("hx-post"));
    }

    #[test]
    fn unresolved_label_is_the_code() {
        assert_eq!(candidate_label(&LookupRecord::unresolved("9999")), "9999");
    }

    #[test]
    fn selection_swaps_the_three_controls() {
        let record = LookupRecord::new("", "8500", "Kortrijk & Co");
        let html = selection_fragment(&record, "postcode", Some("/persoon/findPostCodeById"));

        assert!(html.contains(r#"id="postcode_code" name="postcode_code" value="8500""#));
        assert!(html.contains(r#"id="postcode_name" hx-swap-oob="true">Kortrijk &amp; Co</span>"#));
        assert!(html.contains(r#"id="postcode" name="postcode" value="8500" hx-swap-oob="true""#));
        assert_eq!(html.matches("hx-swap-oob").count(), 3);
    }

    #[test]
    fn selection_without_ref_is_empty() {
        let record = LookupRecord::new("8500", "8500", "Kortrijk");
        assert!(selection_fragment(&record, " ", None).is_empty());
    }
}
