//! Modal form state: a minimal line editor per field.

use crossterm::event::KeyCode;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }
}

/// One open modal form. Tab cycles fields, typed characters edit the
/// focused one, a failed submit leaves the error on screen.
#[derive(Debug, Clone)]
pub struct Form {
    pub title: &'static str,
    pub fields: Vec<Field>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    #[must_use]
    pub fn new(title: &'static str, labels: &[&'static str]) -> Self {
        Self {
            title,
            fields: labels.iter().copied().map(Field::new).collect(),
            focus: 0,
            error: None,
        }
    }

    /// Trimmed text of the field at `index`.
    #[must_use]
    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", |f| f.value.trim())
    }

    /// Field text as an amount. `None` when it is not a number.
    #[must_use]
    pub fn amount(&self, index: usize) -> Option<f64> {
        self.value(index).parse().ok()
    }

    /// Field text as an optional file reference. Empty stays `None`.
    #[must_use]
    pub fn file_ref(&self, index: usize) -> Option<PathBuf> {
        let value = self.value(index);
        if value.is_empty() {
            None
        } else {
            Some(PathBuf::from(value))
        }
    }

    /// Field text as an optional string. Empty stays `None`.
    #[must_use]
    pub fn optional(&self, index: usize) -> Option<String> {
        let value = self.value(index);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
    }

    /// Routes a key to the focused field. Returns false for keys the
    /// form does not consume (Enter, Esc) so the caller can act on them.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Tab => {
                self.next_field();
                true
            }
            KeyCode::BackTab => {
                self.previous_field();
                true
            }
            KeyCode::Char(c) => {
                self.fields[self.focus].value.push(c);
                self.error = None;
                true
            }
            KeyCode::Backspace => {
                self.fields[self.focus].value.pop();
                self.error = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_edits_the_focused_field() {
        let mut form = Form::new("Add Company", &["Company name", "PO number"]);
        form.handle_key(KeyCode::Char('A'));
        form.handle_key(KeyCode::Tab);
        form.handle_key(KeyCode::Char('7'));
        form.handle_key(KeyCode::Char('8'));
        form.handle_key(KeyCode::Backspace);

        assert_eq!(form.value(0), "A");
        assert_eq!(form.value(1), "7");
    }

    #[test]
    fn tab_wraps_around() {
        let mut form = Form::new("Add Floor", &["Floor name"]);
        form.next_field();
        assert_eq!(form.focus, 0);
        form.previous_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn amount_parses_or_declines() {
        let mut form = Form::new("Add Invoice", &["Invoice value"]);
        for c in "12.5".chars() {
            form.handle_key(KeyCode::Char(c));
        }
        assert_eq!(form.amount(0), Some(12.5));

        form.handle_key(KeyCode::Char('x'));
        assert_eq!(form.amount(0), None);
    }

    #[test]
    fn empty_optional_fields_stay_none() {
        let form = Form::new("Add Bill", &["Bill value", "File (optional)"]);
        assert_eq!(form.file_ref(1), None);
        assert_eq!(form.optional(1), None);
    }
}
