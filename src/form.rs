//! Field sanitation and validation for form-driven mutations.
//!
//! Rules are plain data applied in a fixed order; every rule runs even when
//! an earlier one failed, so a submission comes back with its complete list
//! of violations. Sanitized values are returned on both paths, which is what
//! lets a rejected form redisplay exactly what the user typed.

use uuid::Uuid;

/// Raw submitted fields in submission order. Repeated keys are how HTML
/// forms encode multi-valued fields.
#[derive(Debug, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First occurrence of a field, or empty when absent.
    pub fn value(&self, name: &str) -> String {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Every occurrence of a field, preserving the scalar/sequence shape.
    pub fn multi(&self, name: &str) -> MultiValue {
        let mut values: Vec<String> = self
            .0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect();
        match values.len() {
            0 => MultiValue::Absent,
            1 => MultiValue::One(values.remove(0)),
            _ => MultiValue::Many(values),
        }
    }
}

/// A field that may arrive absent, as a scalar, or as a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MultiValue {
    #[default]
    Absent,
    One(String),
    Many(Vec<String>),
}

impl MultiValue {
    /// Normalize into an ordered sequence: absent becomes empty, a scalar
    /// becomes a single-element list, a sequence is left as-is. Runs before
    /// any validation.
    pub fn normalize(self) -> Vec<String> {
        match self {
            MultiValue::Absent => Vec::new(),
            MultiValue::One(value) => vec![value],
            MultiValue::Many(values) => values,
        }
    }
}

/// One rejected field, in rule-evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Escape markup-significant characters so stored values can be embedded in
/// rendered output as-is.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Required free-text field: trim, reject if empty, escape.
pub struct TextRule {
    pub field: &'static str,
    pub message: &'static str,
}

impl TextRule {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn apply(&self, raw: &str, violations: &mut Vec<Violation>) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            violations.push(Violation::new(self.field, self.message));
        }
        escape_html(trimmed)
    }
}

/// Required non-negative decimal field. Yields the sanitized text for
/// redisplay and the parsed value when the rule holds.
pub struct NumberRule {
    pub field: &'static str,
    pub message: &'static str,
}

impl NumberRule {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn apply(&self, raw: &str, violations: &mut Vec<Violation>) -> (String, Option<f64>) {
        let trimmed = raw.trim();
        let sanitized = escape_html(trimmed);
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => (sanitized, Some(value)),
            _ => {
                violations.push(Violation::new(self.field, self.message));
                (sanitized, None)
            }
        }
    }
}

/// Required non-negative integer field.
pub struct IntegerRule {
    pub field: &'static str,
    pub message: &'static str,
}

impl IntegerRule {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn apply(&self, raw: &str, violations: &mut Vec<Violation>) -> (String, Option<i32>) {
        let trimmed = raw.trim();
        let sanitized = escape_html(trimmed);
        match trimmed.parse::<i32>() {
            Ok(value) if value >= 0 => (sanitized, Some(value)),
            _ => {
                violations.push(Violation::new(self.field, self.message));
                (sanitized, None)
            }
        }
    }
}

/// Multi-valued reference field: each element is escaped independently and
/// must parse as an identifier.
pub struct ReferenceRule {
    pub field: &'static str,
    pub message: &'static str,
}

impl ReferenceRule {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }

    pub fn apply(&self, values: Vec<String>, violations: &mut Vec<Violation>) -> Vec<Uuid> {
        let mut refs = Vec::with_capacity(values.len());
        for value in values {
            let escaped = escape_html(value.trim());
            match escaped.parse::<Uuid>() {
                Ok(id) => refs.push(id),
                Err(_) => violations.push(Violation::new(self.field, self.message)),
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_value_normalization() {
        assert_eq!(MultiValue::Absent.normalize(), Vec::<String>::new());
        assert_eq!(
            MultiValue::One("a".to_string()).normalize(),
            vec!["a".to_string()]
        );
        assert_eq!(
            MultiValue::Many(vec!["a".to_string(), "b".to_string()]).normalize(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn form_fields_preserve_scalar_and_sequence_shapes() {
        let fields = FormFields::new(vec![
            ("name".to_string(), "Bread".to_string()),
            ("category".to_string(), "x".to_string()),
            ("category".to_string(), "y".to_string()),
        ]);
        assert_eq!(fields.value("name"), "Bread");
        assert_eq!(fields.value("missing"), "");
        assert_eq!(fields.multi("missing"), MultiValue::Absent);
        assert_eq!(
            fields.multi("name"),
            MultiValue::One("Bread".to_string())
        );
        assert_eq!(
            fields.multi("category"),
            MultiValue::Many(vec!["x".to_string(), "y".to_string()])
        );
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#x27;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn text_rule_trims_escapes_and_rejects_empty() {
        let rule = TextRule::new("name", "Name must be specified");
        let mut violations = Vec::new();

        assert_eq!(rule.apply("  <Fresh>  ", &mut violations), "&lt;Fresh&gt;");
        assert!(violations.is_empty());

        assert_eq!(rule.apply("   ", &mut violations), "");
        assert_eq!(
            violations,
            vec![Violation::new("name", "Name must be specified")]
        );
    }

    #[test]
    fn number_rule_rejects_negatives_and_garbage() {
        let rule = NumberRule::new("price", "Price must be a non-negative number");
        let mut violations = Vec::new();

        assert_eq!(rule.apply(" 1.50 ", &mut violations), ("1.50".to_string(), Some(1.5)));
        assert_eq!(rule.apply("-2", &mut violations).1, None);
        assert_eq!(rule.apply("abc", &mut violations).1, None);
        assert_eq!(rule.apply("", &mut violations).1, None);
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn integer_rule_rejects_fractions() {
        let rule = IntegerRule::new("number_in_stock", "Number in stock must be a non-negative integer");
        let mut violations = Vec::new();

        assert_eq!(rule.apply("40", &mut violations), ("40".to_string(), Some(40)));
        assert_eq!(rule.apply("1.5", &mut violations).1, None);
        assert_eq!(rule.apply("-1", &mut violations).1, None);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn reference_rule_escapes_each_element_and_flags_bad_ids() {
        let rule = ReferenceRule::new("category", "Invalid category reference");
        let mut violations = Vec::new();
        let id = Uuid::new_v4();

        let refs = rule.apply(
            vec![id.to_string(), "<script>".to_string()],
            &mut violations,
        );
        assert_eq!(refs, vec![id]);
        assert_eq!(
            violations,
            vec![Violation::new("category", "Invalid category reference")]
        );
    }

    #[test]
    fn violations_accumulate_across_rules_in_order() {
        let name = TextRule::new("name", "Name must be specified");
        let price = NumberRule::new("price", "Price must be a non-negative number");
        let mut violations = Vec::new();

        name.apply("", &mut violations);
        price.apply("nope", &mut violations);

        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["name", "price"]);
    }
}
