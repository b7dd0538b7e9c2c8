//! The public "Contact Sales" form and the validation scenario run against it

use crate::error::{E2eError, E2eResult};
use crate::spec::{AriaRole, Check, Locator, TestSpec, TestStep, Viewport};

/// Text of the per-field alert shown for a blank required field
pub const REQUIRED_FIELD_MESSAGE: &str = "Please complete this required field.";

/// Start of the summary shown above the submit button after a rejected submission
pub const SUMMARY_MESSAGE: &str = "Please complete all required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Textbox,
    Select,
    TextArea,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Form property name, for fields whose label is found by element id
    pub property: Option<&'static str>,
}

impl FormField {
    const fn new(label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self { label, kind, required, property: None }
    }

    const fn with_property(mut self, property: &'static str) -> Self {
        self.property = Some(property);
        self
    }

    /// Label as rendered, with the `*` marker on required fields
    pub fn label_text(&self) -> String {
        if self.required {
            format!("{}*", self.label)
        } else {
            self.label.to_string()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    pub site_url: &'static str,
    /// Link on the landing page that opens the form
    pub entry_link: &'static str,
    pub submit_button: &'static str,
    /// `data-test-id` of the form element
    pub form_id: &'static str,
    pub fields: Vec<FormField>,
}

impl ContactForm {
    pub fn prometheus_group() -> Self {
        use FieldKind::*;

        Self {
            site_url: "https://www.prometheusgroup.com/",
            entry_link: "Contact Sales",
            submit_button: "Contact Us",
            form_id: "hsForm_fe70f03d-5bac-4ad3-a698-3e130182d674_7317",
            fields: vec![
                FormField::new("First Name", Textbox, true),
                FormField::new("Last Name", Textbox, true),
                FormField::new("Business Email Address", Textbox, true),
                FormField::new("Phone number", Textbox, true),
                FormField::new("Company name", Textbox, true),
                FormField::new("Global Region", Select, true).with_property("global_region"),
                FormField::new("My Primary System", Select, true).with_property("my_primary_system"),
                FormField::new("What product are you interested in?", Select, true),
                FormField::new("Additional Comments or Questions:", TextArea, false)
                    .with_property("additional_comments_or_questions"),
            ],
        }
    }

    pub fn field(&self, label: &str) -> E2eResult<&FormField> {
        self.fields
            .iter()
            .find(|f| f.label == label || f.label_text() == label)
            .ok_or_else(|| E2eError::UnknownField(label.to_string()))
    }

    /// The input element of a field
    pub fn field_locator(&self, field: &FormField) -> Locator {
        match field.kind {
            FieldKind::Textbox | FieldKind::TextArea => {
                Locator::role(AriaRole::Textbox, Some(&field.label_text()))
            }
            FieldKind::Select => Locator::label(field.label_text()),
        }
    }

    /// The wrapper holding a field's label, input and alerts
    pub fn field_container(&self, field: &FormField) -> Locator {
        Locator::css(format!("[data-test-id=\"{}\"] .hs-form-field", self.form_id))
            .has_text(field.label_text())
    }

    fn form(&self) -> Locator {
        Locator::css(format!("[data-test-id=\"{}\"]", self.form_id))
    }

    /// The `*` marker in a field's label
    pub fn marker_locator(&self, field: &FormField) -> Locator {
        match field.property {
            Some(property) => Locator::css(format!(
                "#label-{}-{}",
                property,
                self.form_id.trim_start_matches("hsForm_")
            ))
            .get_by_text("*"),
            None if field.required => Locator::css("label")
                .has_text(field.label_text())
                .locator("span")
                .nth(1),
            None => Locator::css("label").has_text(field.label_text()).get_by_text("*"),
        }
    }

    fn marker_checks(&self, field: &FormField) -> Vec<TestStep> {
        let marker = self.marker_locator(field);
        if field.required {
            vec![
                TestStep::expect(marker, Check::visible()),
                TestStep::expect(self.field_locator(field), Check::attribute("required", "")),
            ]
        } else {
            vec![
                TestStep::expect(marker, Check::count(0)),
                TestStep::expect(self.field_locator(field), Check::no_attribute("required", "")),
            ]
        }
    }

    fn input_step(&self, field: &FormField, value: &str) -> TestStep {
        let target = self.field_locator(field);
        match field.kind {
            FieldKind::Select => TestStep::Select { target, value: value.to_string() },
            FieldKind::Textbox | FieldKind::TextArea => {
                TestStep::Fill { target, value: value.to_string() }
            }
        }
    }

    fn value_check(&self, field: &FormField, value: Option<&str>) -> TestStep {
        let check = match (field.kind, value) {
            (_, Some(v)) => Check::value(v),
            (FieldKind::Select, None) => Check::value(""),
            (FieldKind::Textbox | FieldKind::TextArea, None) => Check::empty(),
        };
        TestStep::expect(self.field_locator(field), check)
    }

    /// Submit the form with only `filled` completed and check that it is
    /// rejected field by field.
    ///
    /// `filled` pairs a field label (with or without the `*`) with the value
    /// to enter.
    pub fn validation_spec(&self, filled: &[(&str, &str)]) -> E2eResult<TestSpec> {
        let filled = filled
            .iter()
            .map(|(label, value)| Ok((self.field(label)?, *value)))
            .collect::<E2eResult<Vec<_>>>()?;
        let value_of = |field: &FormField| {
            filled
                .iter()
                .find(|(f, _)| f.label == field.label)
                .map(|(_, v)| *v)
        };

        let mut steps = vec![
            TestStep::Navigate {
                url: self.site_url.to_string(),
                wait_for: None,
            },
            TestStep::Click {
                target: Locator::role(AriaRole::Link, Some(self.entry_link)),
                timeout_ms: None,
            },
            TestStep::Wait {
                target: self.form(),
                timeout_ms: 15_000,
                state: Default::default(),
            },
        ];

        for field in &self.fields {
            steps.extend(self.marker_checks(field));
        }

        for (field, value) in &filled {
            if field.kind != FieldKind::Select {
                steps.push(TestStep::Click {
                    target: self.field_locator(field),
                    timeout_ms: None,
                });
            }
            steps.push(self.input_step(field, value));
        }

        for field in &self.fields {
            steps.push(self.value_check(field, value_of(field)));
        }

        steps.push(TestStep::expect(
            self.form().get_by_role(AriaRole::Alert, None),
            Check::count(0),
        ));
        steps.push(TestStep::Click {
            target: Locator::role(AriaRole::Button, Some(self.submit_button)),
            timeout_ms: None,
        });
        steps.push(TestStep::expect(Locator::text(SUMMARY_MESSAGE), Check::visible()));

        for field in &self.fields {
            let alerts = self
                .field_container(field)
                .get_by_role(AriaRole::Alert, None);
            if field.required && value_of(field).is_none() {
                steps.push(TestStep::expect(
                    alerts,
                    Check {
                        visible: Some(true),
                        text: Some(REQUIRED_FIELD_MESSAGE.to_string()),
                        count: Some(1),
                        ..Default::default()
                    },
                ));
            } else {
                steps.push(TestStep::expect(alerts, Check::count(0)));
            }
        }

        for field in &self.fields {
            steps.push(self.value_check(field, value_of(field)));
        }

        steps.push(TestStep::Screenshot {
            name: "contact-us-rejected".to_string(),
            full_page: true,
        });

        Ok(TestSpec {
            name: "contact-us-required-fields".to_string(),
            description: format!(
                "Submit the {} form with only {} filled in",
                self.entry_link,
                filled
                    .iter()
                    .map(|(f, _)| f.label)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            tags: vec!["contact".to_string(), "validation".to_string()],
            viewport: Viewport { width: 1280, height: 720 },
            steps,
        })
    }
}
