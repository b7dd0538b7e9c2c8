//! Declarative YAML test specification

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

use crate::error::{E2eError, E2eResult};

/// A complete test specification parsed from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps to execute in order, in one browser session
    pub steps: Vec<TestStep>,
}

fn default_viewport() -> Viewport {
    Viewport { width: 1280, height: 720 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Accessible roles used to find elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AriaRole {
    Alert,
    Button,
    Checkbox,
    Combobox,
    Heading,
    Link,
    Listbox,
    Textbox,
}

impl AriaRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AriaRole::Alert => "alert",
            AriaRole::Button => "button",
            AriaRole::Checkbox => "checkbox",
            AriaRole::Combobox => "combobox",
            AriaRole::Heading => "heading",
            AriaRole::Link => "link",
            AriaRole::Listbox => "listbox",
            AriaRole::Textbox => "textbox",
        }
    }
}

/// One refinement in a locator chain, applied left to right
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorPart {
    /// Descendants matching a CSS selector
    Css(String),
    /// Descendants with an accessible role and optional accessible name
    Role {
        role: AriaRole,
        #[serde(default)]
        name: Option<String>,
    },
    /// Form control associated with a label
    Label(String),
    /// Elements containing text
    Text(String),
    /// Keep only matches containing text somewhere inside
    HasText(String),
    /// Keep only the n-th match (zero based)
    Nth(usize),
}

/// Element query, written in YAML as a list of single-key [`LocatorPart`] maps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator(pub Vec<LocatorPart>);

impl Serialize for Locator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_yaml::with::singleton_map_recursive::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Locator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_yaml::with::singleton_map_recursive::deserialize(deserializer).map(Locator)
    }
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self(vec![LocatorPart::Css(selector.into())])
    }

    pub fn role(role: AriaRole, name: Option<&str>) -> Self {
        Self(vec![LocatorPart::Role {
            role,
            name: name.map(String::from),
        }])
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self(vec![LocatorPart::Label(text.into())])
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self(vec![LocatorPart::Text(text.into())])
    }

    pub fn locator(mut self, selector: impl Into<String>) -> Self {
        self.0.push(LocatorPart::Css(selector.into()));
        self
    }

    pub fn get_by_role(mut self, role: AriaRole, name: Option<&str>) -> Self {
        self.0.push(LocatorPart::Role {
            role,
            name: name.map(String::from),
        });
        self
    }

    pub fn get_by_text(mut self, text: impl Into<String>) -> Self {
        self.0.push(LocatorPart::Text(text.into()));
        self
    }

    pub fn has_text(mut self, text: impl Into<String>) -> Self {
        self.0.push(LocatorPart::HasText(text.into()));
        self
    }

    pub fn nth(mut self, index: usize) -> Self {
        self.0.push(LocatorPart::Nth(index));
        self
    }

    /// Short human-readable form used in step names
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|part| match part {
                LocatorPart::Css(s) => s.clone(),
                LocatorPart::Role { role, name: Some(n) } => format!("{}[{}]", role.as_str(), n),
                LocatorPart::Role { role, name: None } => role.as_str().to_string(),
                LocatorPart::Label(l) => format!("label={}", l),
                LocatorPart::Text(t) => format!("text={}", t),
                LocatorPart::HasText(t) => format!("has={}", t),
                LocatorPart::Nth(n) => format!("nth={}", n),
            })
            .collect::<Vec<_>>()
            .join(" >> ")
    }
}

/// What an `expect` step checks about its target.
/// Every populated field becomes one assertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Check {
    pub visible: Option<bool>,
    pub text: Option<String>,
    pub contains_text: Option<String>,
    pub attribute: Option<AttributeAssertion>,
    pub not_attribute: Option<AttributeAssertion>,
    pub value: Option<String>,
    pub empty: Option<bool>,
    pub count: Option<usize>,
}

impl Check {
    pub fn visible() -> Self {
        Self { visible: Some(true), ..Default::default() }
    }

    pub fn attribute(name: &str, value: &str) -> Self {
        Self { attribute: Some(AttributeAssertion::new(name, value)), ..Default::default() }
    }

    pub fn no_attribute(name: &str, value: &str) -> Self {
        Self { not_attribute: Some(AttributeAssertion::new(name, value)), ..Default::default() }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self { value: Some(value.into()), ..Default::default() }
    }

    pub fn empty() -> Self {
        Self { empty: Some(true), ..Default::default() }
    }

    pub fn count(count: usize) -> Self {
        Self { count: Some(count), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self == &Check::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAssertion {
    pub name: String,
    pub value: String,
}

impl AttributeAssertion {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// A single step in a test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (absolute, or relative to the base URL)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for: Option<Locator>,
    },

    /// Click an element
    Click {
        target: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Fill an input field
    Fill {
        target: Locator,
        value: String,
    },

    /// Press a key, on an element or the page
    Press {
        #[serde(default)]
        target: Option<Locator>,
        key: String,
    },

    /// Select an option from a dropdown
    Select {
        target: Locator,
        value: String,
    },

    /// Wait for an element to reach a state
    Wait {
        target: Locator,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep {
        ms: u64,
    },

    /// Assert something about an element
    Expect {
        target: Locator,
        check: Check,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        full_page: bool,
    },

    /// Log a message (for debugging)
    Log {
        message: String,
    },
}

fn default_wait_timeout() -> u64 {
    5000 // 5 seconds default
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

impl TestStep {
    pub fn expect(target: Locator, check: Check) -> Self {
        TestStep::Expect { target, check }
    }

    /// Name used in logs and step results
    pub fn name(&self) -> String {
        match self {
            TestStep::Navigate { url, .. } => format!("navigate:{}", url),
            TestStep::Click { target, .. } => format!("click:{}", target.describe()),
            TestStep::Fill { target, .. } => format!("fill:{}", target.describe()),
            TestStep::Press { key, .. } => format!("press:{}", key),
            TestStep::Select { target, .. } => format!("select:{}", target.describe()),
            TestStep::Wait { target, .. } => format!("wait:{}", target.describe()),
            TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
            TestStep::Expect { target, .. } => format!("expect:{}", target.describe()),
            TestStep::Screenshot { name, .. } => format!("screenshot:{}", name),
            TestStep::Log { message } => {
                format!("log:{}", message.chars().take(30).collect::<String>())
            }
        }
    }
}

impl TestSpec {
    /// Parse a test spec from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let spec: Self = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> E2eResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load all test specs from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut specs = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let spec = Self::from_file(entry.path())?;
            specs.push(spec);
        }

        Ok(specs)
    }

    /// Filter specs by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.tags.iter().any(|t| t == tag)).collect()
    }

    fn validate(&self) -> E2eResult<()> {
        if self.steps.is_empty() {
            return Err(E2eError::SpecParse(format!("{}: no steps", self.name)));
        }
        for (i, step) in self.steps.iter().enumerate() {
            let locator = match step {
                TestStep::Click { target, .. }
                | TestStep::Fill { target, .. }
                | TestStep::Select { target, .. }
                | TestStep::Wait { target, .. } => Some(target),
                TestStep::Expect { target, check } => {
                    if check.is_empty() {
                        return Err(E2eError::SpecParse(format!(
                            "{}: step {} checks nothing",
                            self.name,
                            i + 1
                        )));
                    }
                    Some(target)
                }
                _ => None,
            };
            if locator.map(|l| l.0.is_empty()).unwrap_or(false) {
                return Err(E2eError::SpecParse(format!(
                    "{}: step {} has an empty target",
                    self.name,
                    i + 1
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_spec() {
        let yaml = r#"
name: contact-entry
description: Reach the contact form
tags:
  - contact
  - smoke
steps:
  - action: navigate
    url: https://www.example.com/
  - action: click
    target:
      - role: { role: link, name: Contact Sales }
  - action: expect
    target:
      - css: label
      - has_text: First Name*
      - css: span
      - nth: 1
    check:
      visible: true
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(spec.name, "contact-entry");
        assert_eq!(spec.steps.len(), 3);
        assert_eq!(spec.viewport.width, 1280);

        match &spec.steps[2] {
            TestStep::Expect { target, check } => {
                assert_eq!(
                    target,
                    &Locator::css("label").has_text("First Name*").locator("span").nth(1)
                );
                assert_eq!(check, &Check::visible());
            }
            other => panic!("unexpected step {:?}", other),
        }
    }

    #[test]
    fn test_parse_combobox_fill() {
        let yaml = r#"
name: search-box
steps:
  - action: fill
    target:
      - role: { role: combobox, name: Search }
    value: Prometheus Group
"#;
        let spec = TestSpec::from_yaml(yaml).unwrap();
        assert_eq!(
            spec.steps[0],
            TestStep::Fill {
                target: Locator::role(AriaRole::Combobox, Some("Search")),
                value: "Prometheus Group".to_string(),
            }
        );
        assert_eq!(spec.steps[0].name(), "fill:combobox[Search]");
    }

    #[test]
    fn test_expect_without_checks_rejected() {
        let yaml = r#"
name: broken
steps:
  - action: expect
    target:
      - css: form
    check: {}
"#;
        let err = TestSpec::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("checks nothing"));
    }

    #[test]
    fn test_yaml_round_trip_of_built_spec() {
        let spec = TestSpec {
            name: "built".to_string(),
            description: String::new(),
            tags: vec!["contact".to_string()],
            viewport: default_viewport(),
            steps: vec![
                TestStep::Fill {
                    target: Locator::role(AriaRole::Textbox, Some("First Name*")),
                    value: "First".to_string(),
                },
                TestStep::expect(Locator::label("Global Region*"), Check::value("")),
            ],
        };
        let parsed = TestSpec::from_yaml(&spec.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_describe_locator() {
        let locator = Locator::css("form div")
            .has_text("Phone number*")
            .get_by_role(AriaRole::Alert, None);
        assert_eq!(locator.describe(), "form div >> has=Phone number* >> alert");
    }
}
