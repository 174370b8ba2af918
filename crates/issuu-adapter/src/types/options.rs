/*
[INPUT]:  Caller option mappings (pairs or JSON objects)
[OUTPUT]: Validated Options with named-field lookup
[POS]:    Data layer - persistent request parameters for every call
[UPDATE]: When the API adds or retires a request option
*/

use serde::Serialize;

use crate::http::{IssuuError, Result};

use super::params::ParamValue;

const DEFAULT_RESPONSE_TYPE: &str = "full";

/// The closed set of option names understood by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionField {
    Access,
    Action,
    DocumentStates,
    Format,
    JsonCallback,
    Origins,
    OrgDocTypes,
    OrgDocName,
    ResultOrder,
    StartIndex,
    PageSize,
    DocumentSortBy,
    ResponseParams,
    ResponseType,
}

impl OptionField {
    pub const ALL: [OptionField; 14] = [
        OptionField::Access,
        OptionField::Action,
        OptionField::DocumentStates,
        OptionField::Format,
        OptionField::JsonCallback,
        OptionField::Origins,
        OptionField::OrgDocTypes,
        OptionField::OrgDocName,
        OptionField::ResultOrder,
        OptionField::StartIndex,
        OptionField::PageSize,
        OptionField::DocumentSortBy,
        OptionField::ResponseParams,
        OptionField::ResponseType,
    ];

    /// Wire name of the field (camelCase)
    pub fn name(self) -> &'static str {
        match self {
            OptionField::Access => "access",
            OptionField::Action => "action",
            OptionField::DocumentStates => "documentStates",
            OptionField::Format => "format",
            OptionField::JsonCallback => "jsonCallback",
            OptionField::Origins => "origins",
            OptionField::OrgDocTypes => "orgDocTypes",
            OptionField::OrgDocName => "orgDocName",
            OptionField::ResultOrder => "resultOrder",
            OptionField::StartIndex => "startIndex",
            OptionField::PageSize => "pageSize",
            OptionField::DocumentSortBy => "documentSortBy",
            OptionField::ResponseParams => "responseParams",
            OptionField::ResponseType => "responseType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, OptionField::StartIndex | OptionField::PageSize)
    }

    /// `responseType` only steers response unwrapping and never goes on the wire
    pub fn is_wire_field(self) -> bool {
        self != OptionField::ResponseType
    }
}

/// Request options sent with every call.
///
/// Every field starts out empty (or zero); `responseType` starts as `"full"`
/// and only decides how the response envelope is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    access: String,
    action: String,
    document_states: String,
    format: String,
    json_callback: Option<String>,
    origins: String,
    org_doc_types: String,
    org_doc_name: String,
    result_order: String,
    start_index: i64,
    page_size: i64,
    document_sort_by: String,
    response_params: String,
    response_type: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            access: String::new(),
            action: String::new(),
            document_states: String::new(),
            format: String::new(),
            json_callback: None,
            origins: String::new(),
            org_doc_types: String::new(),
            org_doc_name: String::new(),
            result_order: String::new(),
            start_index: 0,
            page_size: 0,
            document_sort_by: String::new(),
            response_params: String::new(),
            response_type: DEFAULT_RESPONSE_TYPE.to_string(),
        }
    }
}

impl Options {
    /// Build options from name/value pairs.
    ///
    /// Fails with [`IssuuError::InvalidOption`] on the first name outside the
    /// recognized set, or when an integer field receives non-numeric text.
    pub fn new<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<ParamValue>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let field = OptionField::from_name(key).ok_or_else(|| IssuuError::InvalidOption {
                field: key.to_string(),
                reason: "not a recognized option".to_string(),
            })?;
            options.assign(field, value.into())?;
        }
        Ok(options)
    }

    /// Build options from a JSON object of scalars
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| IssuuError::InvalidOption {
            field: String::new(),
            reason: "options must be a JSON object".to_string(),
        })?;

        let mut pairs = Vec::with_capacity(object.len());
        for (key, value) in object {
            let value = match value {
                serde_json::Value::Null => ParamValue::Null,
                serde_json::Value::String(text) => ParamValue::Text(text.clone()),
                serde_json::Value::Number(number) => match number.as_i64() {
                    Some(n) => ParamValue::Integer(n),
                    None => {
                        return Err(IssuuError::InvalidOption {
                            field: key.clone(),
                            reason: format!("expected an integer, got {number}"),
                        });
                    }
                },
                other => {
                    return Err(IssuuError::InvalidOption {
                        field: key.clone(),
                        reason: format!("unsupported value {other}"),
                    });
                }
            };
            pairs.push((key.as_str(), value));
        }
        Self::new(pairs)
    }

    /// Current value of a field
    pub fn get(&self, field: OptionField) -> ParamValue {
        match field {
            OptionField::Access => self.access.clone().into(),
            OptionField::Action => self.action.clone().into(),
            OptionField::DocumentStates => self.document_states.clone().into(),
            OptionField::Format => self.format.clone().into(),
            OptionField::JsonCallback => self.json_callback.clone().into(),
            OptionField::Origins => self.origins.clone().into(),
            OptionField::OrgDocTypes => self.org_doc_types.clone().into(),
            OptionField::OrgDocName => self.org_doc_name.clone().into(),
            OptionField::ResultOrder => self.result_order.clone().into(),
            OptionField::StartIndex => self.start_index.into(),
            OptionField::PageSize => self.page_size.into(),
            OptionField::DocumentSortBy => self.document_sort_by.clone().into(),
            OptionField::ResponseParams => self.response_params.clone().into(),
            OptionField::ResponseType => self.response_type.clone().into(),
        }
    }

    /// Look a field up by wire name; `None` when the name was never declared.
    pub fn field(&self, name: &str) -> Option<ParamValue> {
        OptionField::from_name(name).map(|field| self.get(field))
    }

    /// Whether `name` is a declared field, regardless of its value
    pub fn has_field(&self, name: &str) -> bool {
        OptionField::from_name(name).is_some()
    }

    /// Fields sent to the API as name/value pairs, in declaration order
    pub fn wire_params(&self) -> impl Iterator<Item = (&'static str, ParamValue)> + '_ {
        OptionField::ALL
            .into_iter()
            .filter(|field| field.is_wire_field())
            .map(|field| (field.name(), self.get(field)))
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn response_type(&self) -> &str {
        &self.response_type
    }

    /// `true` when responses are returned as the whole envelope
    pub fn is_full_response(&self) -> bool {
        self.response_type == DEFAULT_RESPONSE_TYPE
    }

    /// Copy of these options with one field replaced
    pub(crate) fn with_field(&self, field: OptionField, value: impl Into<ParamValue>) -> Result<Self> {
        let mut options = self.clone();
        options.assign(field, value.into())?;
        Ok(options)
    }

    fn assign(&mut self, field: OptionField, value: ParamValue) -> Result<()> {
        match field {
            OptionField::StartIndex => self.start_index = integer_value(field, value)?,
            OptionField::PageSize => self.page_size = integer_value(field, value)?,
            OptionField::JsonCallback => {
                self.json_callback = (!value.is_null()).then(|| value.to_string());
            }
            OptionField::Access => self.access = value.to_string(),
            OptionField::Action => self.action = value.to_string(),
            OptionField::DocumentStates => self.document_states = value.to_string(),
            OptionField::Format => self.format = value.to_string(),
            OptionField::Origins => self.origins = value.to_string(),
            OptionField::OrgDocTypes => self.org_doc_types = value.to_string(),
            OptionField::OrgDocName => self.org_doc_name = value.to_string(),
            OptionField::ResultOrder => self.result_order = value.to_string(),
            OptionField::DocumentSortBy => self.document_sort_by = value.to_string(),
            OptionField::ResponseParams => self.response_params = value.to_string(),
            OptionField::ResponseType => self.response_type = value.to_string(),
        }
        Ok(())
    }
}

fn integer_value(field: OptionField, value: ParamValue) -> Result<i64> {
    match value {
        ParamValue::Null => Ok(0),
        ParamValue::Integer(n) => Ok(n),
        ParamValue::Text(text) => text.trim().parse().map_err(|_| IssuuError::InvalidOption {
            field: field.name().to_string(),
            reason: format!("expected an integer, got {text:?}"),
        }),
    }
}

impl TryFrom<serde_json::Value> for Options {
    type Error = IssuuError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        Self::from_json(&value)
    }
}
