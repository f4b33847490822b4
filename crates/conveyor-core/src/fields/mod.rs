//! Extraction of resource edits from edit forms.
//!
//! Each resource kind has a table of [`FieldDescriptor`]s. [`process`] walks
//! the table of a kind against a [`FormSnapshot`] and collects the fields
//! whose value changed into an [`EditResult`]. A changed substitution control
//! turns the result into a substitution, with the chosen resource id stored
//! under `data["id"]`.
//!
//! ```rust
//! use conveyor_core::fields::{process, FormSnapshot};
//! use conveyor_core::models::ResourceType;
//!
//! let form = FormSnapshot::new()
//!     .value("name", "web", "default")
//!     .value("cidr", "10.0.0.0/24", "10.0.0.0/24")
//!     .value("subnets", "sub-2", "sub-1");
//!
//! let edit = process(&ResourceType::Subnet, &form).unwrap();
//! assert!(edit.needs_submission);
//! assert_eq!(edit.destination_id(), Some("sub-2"));
//! assert_eq!(edit.data["name"], "web");
//! ```

use serde_json::{Map, Value};

use crate::{
    error::{ConveyorError, Result},
    models::{EditResult, ResourceType},
};

mod address;
mod form;
mod table;


pub use address::{check_cidr, ip_in_pools};
pub use form::{AllocationPool, FieldInput, FixedIpInput, FormSnapshot};
pub use table::field_table;

/// Rejects a text value with a reason.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// Reads a field that does not fit the generic controls. Returns the value
/// to store under the field name, or `None` when nothing changed.
pub type Extractor = fn(&FormSnapshot) -> Result<Option<Value>>;

/// How one property of a resource is edited.
#[derive(Debug, Clone, Copy)]
pub enum FieldDescriptor {
    Text {
        name: &'static str,
        validator: Option<Validator>,
    },
    Checkbox {
        name: &'static str,
    },
    Select {
        name: &'static str,
    },
    /// Choice of an existing resource replacing the edited one
    Substitution {
        control: &'static str,
    },
    MetadataTable {
        name: &'static str,
    },
    Custom {
        name: &'static str,
        extract: Extractor,
    },
}

impl FieldDescriptor {
    pub const fn text(name: &'static str) -> Self {
        Self::Text {
            name,
            validator: None,
        }
    }

    pub const fn validated(name: &'static str, validator: Validator) -> Self {
        Self::Text {
            name,
            validator: Some(validator),
        }
    }

    /// Name of the form control the descriptor reads.
    pub fn control(&self) -> &'static str {
        match *self {
            Self::Text { name, .. }
            | Self::Checkbox { name }
            | Self::Select { name }
            | Self::MetadataTable { name }
            | Self::Custom { name, .. } => name,
            Self::Substitution { control } => control,
        }
    }

    /// Adds this field to `result` if its control changed.
    pub fn extract(&self, form: &FormSnapshot, result: &mut EditResult) -> Result<()> {
        match *self {
            Self::Text { name, validator } => {
                let Some((current, original)) = form.text(name) else {
                    return Ok(());
                };
                if let Some(validate) = validator {
                    validate(current)
                        .map_err(|reason| ConveyorError::invalid_input(name).with_reason(reason))?;
                }
                if current != original {
                    result.data.insert(name.to_string(), Value::String(current.to_string()));
                }
            }
            Self::Select { name } => {
                if let Some((current, original)) = form.text(name) {
                    if current != original {
                        result.data.insert(name.to_string(), Value::String(current.to_string()));
                    }
                }
            }
            Self::Checkbox { name } => {
                if let Some(FieldInput::Checked { checked, original }) = form.get(name) {
                    if checked != original {
                        result.data.insert(name.to_string(), Value::Bool(*checked));
                    }
                }
            }
            Self::Substitution { control } => {
                if let Some((current, original)) = form.text(control) {
                    if !current.is_empty() && current != original {
                        result.data.insert("id".to_string(), Value::String(current.to_string()));
                        result.needs_submission = true;
                    }
                }
            }
            Self::MetadataTable { name } => {
                if let Some(FieldInput::Rows { rows, dirty: true }) = form.get(name) {
                    let metadata: Map<String, Value> = rows
                        .iter()
                        .map(|(key, value)| (key.trim().to_string(), Value::String(value.trim().to_string())))
                        .collect();
                    result.data.insert(name.to_string(), Value::Object(metadata));
                }
            }
            Self::Custom { name, extract } => {
                if let Some(value) = extract(form)? {
                    result.data.insert(name.to_string(), value);
                }
            }
        }
        Ok(())
    }
}

/// Builds the form of a `resource_type` resource from `name=value`
/// assignments typed by the user.
///
/// `current` holds the values the resource has now; assigning the same value
/// again is no change. Checkboxes take `true` or `false`, metadata tables
/// take `key:value` pairs separated by commas.
pub fn form_from_assignments(
    resource_type: &ResourceType,
    assignments: &[(String, String)],
    current: &Map<String, Value>,
) -> Result<FormSnapshot> {
    let table = field_table(resource_type);
    let mut form = FormSnapshot::new();

    for (name, value) in assignments {
        let descriptor = table
            .iter()
            .find(|field| field.control() == name)
            .ok_or_else(|| {
                ConveyorError::invalid_input(name)
                    .with_reason(format!("not an editable field of {resource_type}"))
            })?;

        form = match descriptor {
            FieldDescriptor::Text { .. } | FieldDescriptor::Select { .. } => {
                let original = match current.get(name) {
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                    None => String::new(),
                };
                form.value(name, value, original)
            }
            FieldDescriptor::Checkbox { .. } => {
                let checked = value.parse::<bool>().map_err(|_| {
                    ConveyorError::invalid_input(name).with_reason(format!("'{value}' is not true or false"))
                })?;
                let original = current.get(name).and_then(Value::as_bool).unwrap_or(!checked);
                form.checked(name, checked, original)
            }
            FieldDescriptor::MetadataTable { .. } => {
                let rows = value
                    .split(',')
                    .filter(|pair| !pair.trim().is_empty())
                    .map(|pair| {
                        pair.split_once(':').ok_or_else(|| {
                            ConveyorError::invalid_input(name)
                                .with_reason(format!("'{pair}' is not a key:value pair"))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                form.rows(name, rows, true)
            }
            FieldDescriptor::Substitution { .. } => {
                return Err(ConveyorError::invalid_input(name)
                    .with_reason("is a substitution; replace the resource instead"));
            }
            FieldDescriptor::Custom { .. } => {
                return Err(ConveyorError::invalid_input(name).with_reason("cannot be set from a single value"));
            }
        };
    }
    Ok(form)
}

/// Reads the edit of a `resource_type` resource from its form.
///
/// Kinds without editable fields produce an empty result.
pub fn process(resource_type: &ResourceType, form: &FormSnapshot) -> Result<EditResult> {
    let mut result = EditResult::default();
    for field in field_table(resource_type) {
        field.extract(form, &mut result)?;
    }
    Ok(result)
}
