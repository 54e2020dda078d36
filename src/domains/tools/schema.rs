//! Typed parameter descriptors and argument validation.
//!
//! Each tool declares a [`ToolSchema`]: a description plus an ordered list of
//! [`ParamSpec`]s. Validation is a pure function from the raw JSON arguments
//! to either [`ValidatedArguments`] or a [`ValidationError`] listing every
//! violated constraint. The same descriptors render the JSON Schema that
//! clients see in `tools/list`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value, json};

use super::arguments::ValidatedArguments;

/// Canonical date format accepted and produced by [`ParamKind::Date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// Parameter descriptors
// ============================================================================

/// The type of a parameter together with its bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    String {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
    /// A calendar date, given as `YYYY-MM-DD` or an RFC 3339 timestamp.
    /// Normalized to `YYYY-MM-DD` (UTC) during validation.
    Date,
    /// A string restricted to a fixed set of values (matched case-insensitively).
    OneOf(Vec<String>),
}

impl ParamKind {
    fn json_type(&self) -> &'static str {
        match self {
            Self::String { .. } | Self::Date | Self::OneOf(_) => "string",
            Self::Number { .. } => "number",
            Self::Integer { .. } => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// A single named parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    description: Option<String>,
    required: bool,
    default: Option<Value>,
}

impl ParamSpec {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            required: true,
            default: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ParamKind::String {
                min_len: None,
                max_len: None,
            },
        )
    }

    /// A string that must contain at least one character.
    pub fn non_empty_string(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ParamKind::String {
                min_len: Some(1),
                max_len: None,
            },
        )
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Number { min: None, max: None })
    }

    /// A number within the inclusive range `[min, max]`.
    pub fn number_in(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::new(
            name,
            ParamKind::Number {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    /// An integer within the inclusive range `[min, max]`.
    pub fn integer_in(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::new(
            name,
            ParamKind::Integer {
                min: Some(min),
                max: Some(max),
            },
        )
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Date)
    }

    pub fn one_of<I, S>(name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ParamKind::OneOf(allowed.into_iter().map(Into::into).collect()),
        )
    }

    /// Set the description shown to clients.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the parameter as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Provide a default value; implies [`optional`](Self::optional).
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Check a present value, returning its normalized form.
    fn check(&self, value: &Value) -> Result<Value, ViolationKind> {
        match &self.kind {
            ParamKind::String { min_len, max_len } => {
                let s = value.as_str().ok_or_else(|| wrong_type("string", value))?;
                let len = s.chars().count();
                if let Some(min) = min_len.filter(|min| len < *min) {
                    return Err(ViolationKind::TooShort { min });
                }
                if let Some(max) = max_len.filter(|max| len > *max) {
                    return Err(ViolationKind::TooLong { max });
                }
                Ok(value.clone())
            }
            ParamKind::Number { min, max } => {
                let n = match value {
                    Value::Number(n) => n.as_f64().ok_or_else(|| wrong_type("number", value))?,
                    _ => return Err(wrong_type("number", value)),
                };
                check_range(n, *min, *max)?;
                Ok(value.clone())
            }
            ParamKind::Integer { min, max } => {
                let n = value.as_i64().ok_or_else(|| wrong_type("integer", value))?;
                check_range(n as f64, min.map(|m| m as f64), max.map(|m| m as f64))?;
                Ok(value.clone())
            }
            ParamKind::Boolean => {
                value.as_bool().ok_or_else(|| wrong_type("boolean", value))?;
                Ok(value.clone())
            }
            ParamKind::Date => {
                let s = value.as_str().ok_or_else(|| wrong_type("date string", value))?;
                let date = parse_date(s).ok_or_else(|| ViolationKind::InvalidDate {
                    value: s.to_string(),
                })?;
                Ok(Value::String(date.format(DATE_FORMAT).to_string()))
            }
            ParamKind::OneOf(allowed) => {
                let s = value.as_str().ok_or_else(|| wrong_type("string", value))?;
                allowed
                    .iter()
                    .find(|a| a.eq_ignore_ascii_case(s))
                    .map(|a| Value::String(a.clone()))
                    .ok_or_else(|| ViolationKind::NotAllowed {
                        allowed: allowed.clone(),
                    })
            }
        }
    }

    fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert("type".into(), json!(self.kind.json_type()));
        if let Some(description) = &self.description {
            prop.insert("description".into(), json!(description));
        }
        match &self.kind {
            ParamKind::String { min_len, max_len } => {
                if let Some(min) = min_len {
                    prop.insert("minLength".into(), json!(min));
                }
                if let Some(max) = max_len {
                    prop.insert("maxLength".into(), json!(max));
                }
            }
            ParamKind::Number { min, max } => {
                if let Some(min) = min {
                    prop.insert("minimum".into(), json!(min));
                }
                if let Some(max) = max {
                    prop.insert("maximum".into(), json!(max));
                }
            }
            ParamKind::Integer { min, max } => {
                if let Some(min) = min {
                    prop.insert("minimum".into(), json!(min));
                }
                if let Some(max) = max {
                    prop.insert("maximum".into(), json!(max));
                }
            }
            ParamKind::Date => {
                prop.insert("format".into(), json!("date"));
            }
            ParamKind::OneOf(allowed) => {
                prop.insert("enum".into(), json!(allowed));
            }
            ParamKind::Boolean => {}
        }
        if let Some(default) = &self.default {
            prop.insert("default".into(), default.clone());
        }
        Value::Object(prop)
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp into a UTC calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok().or_else(|| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn wrong_type(expected: &'static str, value: &Value) -> ViolationKind {
    ViolationKind::WrongType {
        expected,
        found: json_type_name(value),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_range(value: f64, min: Option<f64>, max: Option<f64>) -> Result<(), ViolationKind> {
    let below = min.is_some_and(|min| value < min);
    let above = max.is_some_and(|max| value > max);
    if below || above {
        return Err(ViolationKind::OutOfRange { value, min, max });
    }
    Ok(())
}

// ============================================================================
// Tool schema
// ============================================================================

/// Description and parameter list of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    description: String,
    params: Vec<ParamSpec>,
}

impl ToolSchema {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter. Later specs with the same name replace earlier ones.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.retain(|p| p.name != spec.name);
        self.params.push(spec);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Validate raw arguments against this schema.
    ///
    /// `null` counts as an empty argument object. All violations are
    /// collected before returning.
    pub fn validate(&self, tool: &str, raw: &Value) -> Result<ValidatedArguments, ValidationError> {
        let empty = Map::new();
        let input = match raw {
            Value::Null => &empty,
            Value::Object(map) => map,
            other => {
                return Err(ValidationError::new(
                    tool,
                    vec![FieldViolation::new(
                        "arguments",
                        ViolationKind::NotAnObject {
                            found: json_type_name(other),
                        },
                    )],
                ));
            }
        };

        let mut values = Map::new();
        let mut violations = Vec::new();

        for spec in &self.params {
            match input.get(&spec.name) {
                None | Some(Value::Null) => {
                    if let Some(default) = &spec.default {
                        values.insert(spec.name.clone(), default.clone());
                    } else if spec.required {
                        violations.push(FieldViolation::new(&spec.name, ViolationKind::Missing));
                    }
                }
                Some(value) => match spec.check(value) {
                    Ok(normalized) => {
                        values.insert(spec.name.clone(), normalized);
                    }
                    Err(kind) => violations.push(FieldViolation::new(&spec.name, kind)),
                },
            }
        }

        if violations.is_empty() {
            Ok(ValidatedArguments::new(values))
        } else {
            Err(ValidationError::new(tool, violations))
        }
    }

    /// Render the parameter list as a JSON Schema object.
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }
}

// ============================================================================
// Validation errors
// ============================================================================

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    OutOfRange {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    TooShort {
        min: usize,
    },
    TooLong {
        max: usize,
    },
    InvalidDate {
        value: String,
    },
    NotAllowed {
        allowed: Vec<String>,
    },
    NotAnObject {
        found: &'static str,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing required field"),
            Self::WrongType { expected, found } => write!(f, "expected {}, got {}", expected, found),
            Self::OutOfRange { value, min, max } => match (min, max) {
                (Some(min), Some(max)) => {
                    write!(f, "must be between {} and {} (got {})", min, max, value)
                }
                (Some(min), None) => write!(f, "must be at least {} (got {})", min, value),
                (None, Some(max)) => write!(f, "must be at most {} (got {})", max, value),
                (None, None) => write!(f, "out of range (got {})", value),
            },
            Self::TooShort { min } => write!(f, "must be at least {} character(s) long", min),
            Self::TooLong { max } => write!(f, "must be at most {} character(s) long", max),
            Self::InvalidDate { value } => write!(
                f,
                "expected a date (YYYY-MM-DD or RFC 3339), got \"{}\"",
                value
            ),
            Self::NotAllowed { allowed } => write!(f, "must be one of: {}", allowed.join(", ")),
            Self::NotAnObject { found } => write!(f, "must be an object, got {}", found),
        }
    }
}

/// A rejected field and the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

/// Every constraint an argument set violated for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub tool: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(tool: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self {
            tool: tool.into(),
            violations,
        }
    }

    /// Names of the offending fields, in schema order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid arguments for tool \"{}\":", self.tool)?;
        for violation in &self.violations {
            write!(f, "\n- {}", violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
