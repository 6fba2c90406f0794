//! Arrow schema inference and row to Arrow conversion
//!
//! Infers a schema from flat records and builds a RecordBatch whose
//! columns follow the sorted union of record keys.

use crate::error::{Error, Result};
use crate::types::{FlatRecord, JsonValue};
use arrow::array::{
    ArrayRef, BooleanArray, Float64Array, Int64Array, ListArray, NullArray, StringArray,
    StructArray,
};
use arrow::buffer::OffsetBuffer;
use arrow::datatypes::{DataType, Field, Fields, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Infer an Arrow schema from flat records
///
/// Every field is nullable. Fields are ordered by name.
pub fn infer_schema(rows: &[FlatRecord]) -> Schema {
    let mut field_types: BTreeMap<&str, DataType> = BTreeMap::new();

    for row in rows {
        for (key, value) in row {
            let inferred = infer_type(value);
            field_types
                .entry(key.as_str())
                .and_modify(|existing| *existing = merge_types(existing, &inferred))
                .or_insert(inferred);
        }
    }

    let fields: Vec<Field> = field_types
        .into_iter()
        .map(|(name, dtype)| Field::new(name, dtype, true))
        .collect();

    Schema::new(fields)
}

/// Convert flat records to an Arrow RecordBatch
pub fn rows_to_arrow(rows: &[FlatRecord]) -> Result<RecordBatch> {
    let schema = Arc::new(infer_schema(rows));

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let values: Vec<Option<&JsonValue>> = rows.iter().map(|r| r.get(field.name())).collect();
        columns.push(build_array(&values, field.data_type())?);
    }

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    RecordBatch::try_new_with_options(schema, columns, &options)
        .map_err(|e| Error::output(format!("Failed to create RecordBatch: {e}")))
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &JsonValue) -> DataType {
    match value {
        JsonValue::Null => DataType::Null,
        JsonValue::Bool(_) => DataType::Boolean,
        JsonValue::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        JsonValue::String(_) => DataType::Utf8,
        JsonValue::Array(arr) => {
            let element_type = arr
                .iter()
                .filter(|v| !v.is_null())
                .map(infer_type)
                .reduce(|a, b| merge_types(&a, &b))
                .unwrap_or(DataType::Null);
            DataType::List(Arc::new(Field::new("item", element_type, true)))
        }
        // a struct needs at least one child to carry its length
        JsonValue::Object(obj) if obj.is_empty() => DataType::Utf8,
        JsonValue::Object(obj) => {
            let fields: Vec<Field> = obj
                .iter()
                .map(|(k, v)| Field::new(k, infer_type(v), true))
                .collect();
            DataType::Struct(Fields::from(fields))
        }
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        (DataType::List(a), DataType::List(b)) => {
            let item = merge_types(a.data_type(), b.data_type());
            DataType::List(Arc::new(Field::new("item", item, true)))
        }

        // Different types -> fall back to String (most flexible)
        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&JsonValue>], data_type: &DataType) -> Result<ArrayRef> {
    match data_type {
        DataType::Null => Ok(Arc::new(NullArray::new(values.len()))),

        DataType::Boolean => {
            let arr: BooleanArray = values
                .iter()
                .map(|v| v.and_then(JsonValue::as_bool))
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(JsonValue::as_i64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(JsonValue::as_f64)).collect();
            Ok(Arc::new(arr))
        }

        DataType::Utf8 => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.and_then(|v| match v {
                        JsonValue::Null => None,
                        JsonValue::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    })
                })
                .collect();
            Ok(Arc::new(arr))
        }

        DataType::List(field) => build_list_array(values, field),

        DataType::Struct(fields) => build_struct_array(values, fields),

        _ => {
            let arr: StringArray = values.iter().map(|v| v.map(ToString::to_string)).collect();
            Ok(Arc::new(arr))
        }
    }
}

/// Build a list array from JSON arrays
fn build_list_array(values: &[Option<&JsonValue>], field: &Arc<Field>) -> Result<ArrayRef> {
    let mut all_items: Vec<Option<&JsonValue>> = Vec::new();
    let mut offsets: Vec<i32> = vec![0];

    for value in values {
        if let Some(JsonValue::Array(arr)) = value {
            all_items.extend(arr.iter().map(Some));
        }
        // Both array and non-array cases need an offset
        let offset = i32::try_from(all_items.len())
            .map_err(|_| Error::output("Array too large for i32 offset"))?;
        offsets.push(offset);
    }

    let items_array = build_array(&all_items, field.data_type())?;
    let offset_buffer = OffsetBuffer::new(offsets.into());

    let list_array = ListArray::try_new(Arc::clone(field), offset_buffer, items_array, None)?;
    Ok(Arc::new(list_array))
}

/// Build a struct array from JSON objects
fn build_struct_array(values: &[Option<&JsonValue>], fields: &Fields) -> Result<ArrayRef> {
    let mut child_arrays: Vec<ArrayRef> = Vec::with_capacity(fields.len());

    for field in fields {
        let child_values: Vec<Option<&JsonValue>> = values
            .iter()
            .map(|v| v.and_then(|v| v.as_object()).and_then(|obj| obj.get(field.name())))
            .collect();

        child_arrays.push(build_array(&child_values, field.data_type())?);
    }

    let struct_array = StructArray::try_new(fields.clone(), child_arrays, None)?;
    Ok(Arc::new(struct_array))
}
