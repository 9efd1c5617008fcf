//! XPath expressions for form controls
//!
//! Human-readable locators such as a label text, an id or a field name are
//! translated into XPath that the driver can evaluate relative to a scope.

use soulbrowser_core_types::Query;

/// Builds XPath expressions for form controls from a human-readable locator.
pub trait XPathTranslator: Send + Sync {
    /// Text inputs, textareas and selects matched by id, name, placeholder or label.
    fn fillable_field(&self, locator: &str) -> String;

    /// Radio buttons matched by id, name, value or label.
    fn radio_button(&self, locator: &str) -> String;

    /// Checkboxes matched by id, name, value or label.
    fn checkbox(&self, locator: &str) -> String;
}

/// XPath rules for plain HTML forms.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlXPath;

const NON_FILLABLE_TYPES: &str = " submit image radio checkbox hidden file button reset ";

impl XPathTranslator for HtmlXPath {
    fn fillable_field(&self, locator: &str) -> String {
        let element = format!(
            "self::input[not(@type) or not(contains('{}', concat(' ', translate(@type, \
             'ABCDEFGHIJKLMNOPQRSTUVWXYZ', 'abcdefghijklmnopqrstuvwxyz'), ' ')))] \
             or self::textarea or self::select",
            NON_FILLABLE_TYPES
        );
        labelled_control(&element, locator, &["id", "name", "placeholder"])
    }

    fn radio_button(&self, locator: &str) -> String {
        labelled_control("self::input[@type='radio']", locator, &["id", "name", "value"])
    }

    fn checkbox(&self, locator: &str) -> String {
        labelled_control("self::input[@type='checkbox']", locator, &["id", "name", "value"])
    }
}

/// Helpers turning translator output into queries.
pub fn fillable_field_query(translator: &dyn XPathTranslator, locator: &str) -> Query {
    Query::xpath(translator.fillable_field(locator))
}

pub fn radio_button_query(translator: &dyn XPathTranslator, locator: &str) -> Query {
    Query::xpath(translator.radio_button(locator))
}

pub fn checkbox_query(translator: &dyn XPathTranslator, locator: &str) -> Query {
    Query::xpath(translator.checkbox(locator))
}

/// Controls matching `element`, identified by one of `attributes` or by a
/// label, either through `label[@for]` or by nesting inside the label.
///
/// The `label[@for]` lookup searches the whole document, so a control inside
/// the scope may be named by a label outside it. The control itself must
/// still be inside the scope.
fn labelled_control(element: &str, locator: &str, attributes: &[&str]) -> String {
    let literal = literal(locator);
    let label = format!("label[normalize-space(string(.))={}]", literal);

    let mut conditions: Vec<String> = attributes
        .iter()
        .map(|attr| format!("@{}={}", attr, literal))
        .collect();
    conditions.push(format!("@id=//{}/@for", label));

    format!(
        ".//*[{element}][{conditions}] | .//{label}//*[{element}]",
        element = element,
        conditions = conditions.join(" or "),
        label = label,
    )
}

/// Quote `value` as an XPath string literal.
///
/// XPath 1.0 has no escape sequences, so values holding both quote kinds are
/// split and rejoined with `concat()`.
pub fn literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}
