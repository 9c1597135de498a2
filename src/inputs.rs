//! Named candidate columns, for evaluating selectors looked up by name

use crate::{
    array::Column,
    error::{Error, Result},
    numeric::{Float, IdValue},
};

use serde_json::Value;

use std::{collections::BTreeMap, fmt};

/// Kind of values held by an input column
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    /// Floating-point attribute (kinematics, isolation, energy fractions...)
    Float,
    /// Integer ID level or bitmask
    Int,
    /// Boolean ID flag
    Bool,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Float => "floating-point",
            InputKind::Int => "integer",
            InputKind::Bool => "boolean",
        })
    }
}

/// Input column expected by a selector
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InputSpec {
    /// Column name
    pub name: &'static str,

    /// Kind of values
    pub kind: InputKind,
}
//
impl InputSpec {
    /// Floating-point column
    pub const fn float(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Float,
        }
    }

    /// Integer column
    pub const fn int(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Int,
        }
    }

    /// Boolean column
    pub const fn bool(name: &'static str) -> Self {
        Self {
            name,
            kind: InputKind::Bool,
        }
    }
}

/// Input column of any supported kind
#[derive(Clone, Debug, PartialEq)]
pub enum AnyColumn {
    /// Floating-point values
    Float(Column<Float>),
    /// Integer values
    Int(Column<IdValue>),
    /// Boolean values
    Bool(Column<bool>),
}

impl From<Column<Float>> for AnyColumn {
    fn from(column: Column<Float>) -> Self {
        AnyColumn::Float(column)
    }
}

impl From<Column<IdValue>> for AnyColumn {
    fn from(column: Column<IdValue>) -> Self {
        AnyColumn::Int(column)
    }
}

impl From<Column<bool>> for AnyColumn {
    fn from(column: Column<bool>) -> Self {
        AnyColumn::Bool(column)
    }
}

/// Candidate columns, indexed by name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs {
    columns: BTreeMap<String, AnyColumn>,
}
//
impl Inputs {
    /// Start with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a column
    pub fn insert(&mut self, name: impl Into<String>, column: impl Into<AnyColumn>) {
        self.columns.insert(name.into(), column.into());
    }

    /// Builder-style version of `insert`
    pub fn with(mut self, name: impl Into<String>, column: impl Into<AnyColumn>) -> Self {
        self.insert(name, column);
        self
    }

    /// Look up a column, whatever its kind
    fn get(&self, name: &str) -> Result<&AnyColumn> {
        self.columns
            .get(name)
            .ok_or_else(|| Error::MissingInput(name.to_owned()))
    }

    /// Look up a floating-point column
    pub fn float(&self, name: &str) -> Result<&Column<Float>> {
        match self.get(name)? {
            AnyColumn::Float(column) => Ok(column),
            _ => Err(kind_error(name, InputKind::Float)),
        }
    }

    /// Look up an integer column
    pub fn int(&self, name: &str) -> Result<&Column<IdValue>> {
        match self.get(name)? {
            AnyColumn::Int(column) => Ok(column),
            _ => Err(kind_error(name, InputKind::Int)),
        }
    }

    /// Look up a boolean column
    pub fn bool(&self, name: &str) -> Result<&Column<bool>> {
        match self.get(name)? {
            AnyColumn::Bool(column) => Ok(column),
            _ => Err(kind_error(name, InputKind::Bool)),
        }
    }

    /// Decode the columns listed in `schema` from a JSON object
    ///
    /// Each column is either an array of values (flat) or an array of
    /// per-event arrays (jagged). A `null` floating-point value stands for a
    /// missing measurement and becomes NaN. Fields not listed in `schema` are
    /// ignored.
    ///
    pub fn from_json(json: &Value, schema: &[InputSpec]) -> Result<Self> {
        let object = json.as_object().ok_or_else(|| Error::MalformedInput {
            name: "<root>".into(),
            reason: "expected an object of named columns".into(),
        })?;
        let mut inputs = Inputs::new();
        for spec in schema {
            let value = object
                .get(spec.name)
                .ok_or_else(|| Error::MissingInput(spec.name.to_owned()))?;
            let column = match spec.kind {
                InputKind::Float => AnyColumn::Float(decode_column(spec.name, value, float_value)?),
                InputKind::Int => AnyColumn::Int(decode_column(spec.name, value, int_value)?),
                InputKind::Bool => AnyColumn::Bool(decode_column(spec.name, value, Value::as_bool)?),
            };
            inputs.insert(spec.name, column);
        }
        Ok(inputs)
    }
}

/// Report a column of the wrong kind
fn kind_error(name: &str, expected: InputKind) -> Error {
    Error::InputKind {
        name: name.to_owned(),
        expected,
    }
}

/// Decode a floating-point JSON value (null means missing, hence NaN)
fn float_value(value: &Value) -> Option<Float> {
    match value {
        Value::Null => Some(Float::NAN),
        _ => value.as_f64().map(|x| x as Float),
    }
}

/// Decode an integer JSON value
fn int_value(value: &Value) -> Option<IdValue> {
    value.as_i64().and_then(|x| IdValue::try_from(x).ok())
}

/// Decode a flat or jagged JSON column using a per-value decoder
fn decode_column<T>(
    name: &str,
    value: &Value,
    decode: impl Fn(&Value) -> Option<T>,
) -> Result<Column<T>> {
    let malformed = |reason: String| Error::MalformedInput {
        name: name.to_owned(),
        reason,
    };
    let items = value
        .as_array()
        .ok_or_else(|| malformed("expected an array".into()))?;
    let decode_all = |items: &[Value]| -> Result<Vec<T>> {
        items
            .iter()
            .map(|item| {
                decode(item).ok_or_else(|| malformed(format!("unexpected value {item}")))
            })
            .collect()
    };
    if !items.is_empty() && items.iter().all(Value::is_array) {
        let events = items
            .iter()
            .map(|event| decode_all(event.as_array().map_or(&[][..], Vec::as_slice)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Column::jagged(events))
    } else {
        Ok(Column::flat(decode_all(items)?))
    }
}
