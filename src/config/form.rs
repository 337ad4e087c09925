use crate::core::FormSource;
use crate::domain::model::{BREADTH_FIELD, HEIGHT_FIELD, LENGTH_FIELD};
use std::collections::HashMap;

pub const DEFAULT_FORM_ID: &str = "box-dimensions-form";

/// A form whose field values are fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticForm {
    fields: HashMap<String, String>,
}

impl StaticForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions(
        length: impl Into<String>,
        breadth: impl Into<String>,
        height: impl Into<String>,
    ) -> Self {
        Self::new()
            .with_field(LENGTH_FIELD, length)
            .with_field(BREADTH_FIELD, breadth)
            .with_field(HEIGHT_FIELD, height)
    }

    pub fn with_field(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(id.into(), value.into());
        self
    }
}

impl FormSource for StaticForm {
    fn field_value(&self, id: &str) -> Option<String> {
        self.fields.get(id).cloned()
    }
}

/// Splits `"10 5 3"` or `"10,5,3"` into a dimension form. Blank lines give
/// `None`. Missing trailing values are left out of the form; anything past the
/// third value is ignored.
pub fn parse_form_line(line: &str) -> Option<StaticForm> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let values: Vec<&str> = if line.contains(',') {
        line.split(',').collect()
    } else {
        line.split_whitespace().collect()
    };

    let mut form = StaticForm::new();
    for (id, value) in [LENGTH_FIELD, BREADTH_FIELD, HEIGHT_FIELD]
        .into_iter()
        .zip(values)
    {
        form = form.with_field(id, value);
    }
    Some(form)
}
