use crate::Mappers;

use indexmap::IndexMap;
use sqlmapper_core::{
    mapper::{NestedKind, ResultMap, ResultMapping},
    stmt::{Value, ValueMap, ValueRecord},
    Result,
};
use std::collections::HashSet;

/// A flat row as returned by a driver: column name to value.
pub type Row = ValueMap;

/// Shapes rows into records following result maps.
pub(crate) struct Projector<'a> {
    mappers: &'a Mappers,
    camel_case: bool,
}

/// Columns already claimed by an explicit mapping of the record being built,
/// so auto-mapping leaves them alone.
type Consumed = HashSet<String>;

/// Result maps being built on the current path, each with its column prefix.
type Chain = Vec<(String, String)>;

enum GroupKey {
    /// The row carries the id columns; rows with equal keys fold together
    Id(String),

    /// The map has no id columns in this row; every row stands alone
    Row,

    /// Every id column is null: nothing to project (an unmatched outer join)
    Absent,
}

impl<'a> Projector<'a> {
    pub(crate) fn new(mappers: &'a Mappers) -> Projector<'a> {
        Projector {
            mappers,
            camel_case: mappers.settings().map_underscore_to_camel_case,
        }
    }

    pub(crate) fn project(&self, row: &Row, result_map: &ResultMap) -> Result<Value> {
        let (record, _) = self.record(
            &[row],
            result_map,
            "",
            &mut Consumed::new(),
            &mut Chain::new(),
        )?;
        Ok(Value::Record(record))
    }

    pub(crate) fn project_rows(&self, rows: &[Row], result_map: &ResultMap) -> Result<Vec<Value>> {
        let rows: Vec<&Row> = rows.iter().collect();
        self.group(
            &rows,
            result_map,
            "",
            &mut Consumed::new(),
            &mut Chain::new(),
            true,
        )
    }

    fn group(
        &self,
        rows: &[&Row],
        result_map: &ResultMap,
        prefix: &str,
        consumed: &mut Consumed,
        chain: &mut Chain,
        top_level: bool,
    ) -> Result<Vec<Value>> {
        let mut groups: IndexMap<String, Vec<&Row>> = IndexMap::new();

        for (i, &row) in rows.iter().enumerate() {
            let key = match group_key(row, result_map, prefix) {
                GroupKey::Id(key) => key,
                GroupKey::Absent if !top_level => continue,
                GroupKey::Absent | GroupKey::Row => format!("#{i}"),
            };
            groups.entry(key).or_default().push(row);
        }

        let mut ret = vec![];

        for rows in groups.values() {
            let (record, present) = self.record(rows, result_map, prefix, consumed, chain)?;
            if present || top_level {
                ret.push(Value::Record(record));
            }
        }

        Ok(ret)
    }

    /// Builds one record from rows that share the same id. Plain mappings
    /// read the first row; collections gather across all of them.
    ///
    /// Also returns whether any mapped column held a non-null value.
    fn record(
        &self,
        rows: &[&Row],
        result_map: &ResultMap,
        prefix: &str,
        consumed: &mut Consumed,
        chain: &mut Chain,
    ) -> Result<(ValueRecord, bool)> {
        chain.push((chain_id(result_map), prefix.to_string()));
        let ret = self.record_in_chain(rows, result_map, prefix, consumed, chain);
        chain.pop();
        ret
    }

    fn record_in_chain(
        &self,
        rows: &[&Row],
        result_map: &ResultMap,
        prefix: &str,
        consumed: &mut Consumed,
        chain: &mut Chain,
    ) -> Result<(ValueRecord, bool)> {
        let mut record = ValueRecord {
            ty: result_map.ty.clone(),
            ..ValueRecord::default()
        };
        let mut present = false;

        let Some(first) = rows.first() else {
            return Ok((record, present));
        };

        for mapping in result_map.mappings() {
            if let Some(value) = self.mapped(first, mapping, prefix, consumed) {
                present |= !value.is_null();
                record.insert(mapping.property.clone(), value);
            }
        }

        for nested in &result_map.nested {
            let Some(target) = self.mappers.nested_result_map(&nested.target)? else {
                tracing::debug!(
                    property = %nested.property,
                    "skipping nested select mapping"
                );
                continue;
            };

            let prefix = format!("{prefix}{}", nested.column_prefix.as_deref().unwrap_or(""));

            // A prefix no column carries cannot produce anything, and a map
            // already being built under the same prefix would never finish.
            let unmatched = nested.column_prefix.is_some() && !has_prefixed_column(rows, &prefix);
            let repeated = chain
                .iter()
                .any(|(id, seen)| *id == chain_id(&target) && *seen == prefix);

            if unmatched || repeated {
                tracing::trace!(
                    property = %nested.property,
                    prefix = %prefix,
                    repeated,
                    "nested mapping has no columns"
                );
                let value = match nested.kind {
                    NestedKind::Association => Value::Null,
                    NestedKind::Collection => Value::List(vec![]),
                };
                record.insert(nested.property.clone(), value);
                continue;
            }

            let value = match nested.kind {
                NestedKind::Association => {
                    let (nested_record, nested_present) =
                        self.record(&rows[..1], &target, &prefix, consumed, chain)?;
                    if nested_present {
                        Value::Record(nested_record)
                    } else {
                        Value::Null
                    }
                }
                NestedKind::Collection => {
                    Value::List(self.group(rows, &target, &prefix, consumed, chain, false)?)
                }
            };

            record.insert(nested.property.clone(), value);
        }

        if result_map.auto_mapping {
            for (column, value) in first.iter() {
                if consumed.contains(column) {
                    continue;
                }

                let Some(name) = strip_prefix(column, prefix) else {
                    continue;
                };

                let property = if self.camel_case {
                    camel_case(name)
                } else {
                    name.to_string()
                };

                if !record.contains_key(&property) {
                    present |= !value.is_null();
                    record.insert(property, value.clone());
                }
            }
        }

        Ok((record, present))
    }

    fn mapped(
        &self,
        row: &Row,
        mapping: &ResultMapping,
        prefix: &str,
        consumed: &mut Consumed,
    ) -> Option<Value> {
        let column = format!("{prefix}{}", mapping.column);
        let (name, value) = lookup(row, &column)?;
        consumed.insert(name.clone());

        Some(match &mapping.java_type {
            Some(ty) => value.clone().coerce(ty),
            None => value.clone(),
        })
    }
}

fn group_key(row: &Row, result_map: &ResultMap, prefix: &str) -> GroupKey {
    let values: Vec<&Value> = result_map
        .ids
        .iter()
        .filter_map(|id| lookup(row, &format!("{prefix}{}", id.column)))
        .map(|(_, value)| value)
        .collect();

    if values.is_empty() {
        return GroupKey::Row;
    }

    if values.iter().all(|value| value.is_null()) {
        return GroupKey::Absent;
    }

    let key: Vec<_> = values.iter().map(|value| value.to_json()).collect();
    GroupKey::Id(serde_json::Value::Array(key).to_string())
}

fn chain_id(result_map: &ResultMap) -> String {
    format!("{}.{}", result_map.namespace, result_map.id)
}

fn has_prefixed_column(rows: &[&Row], prefix: &str) -> bool {
    rows.iter()
        .any(|row| row.keys().any(|column| strip_prefix(column, prefix).is_some()))
}

/// Finds a column by exact name, then ignoring ASCII case.
fn lookup<'r>(row: &'r Row, column: &str) -> Option<(&'r String, &'r Value)> {
    row.get_key_value(column).or_else(|| {
        row.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
    })
}

fn strip_prefix<'c>(column: &'c str, prefix: &str) -> Option<&'c str> {
    if prefix.is_empty() {
        return Some(column);
    }

    let head = column.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &column[prefix.len()..])
        .filter(|rest| !rest.is_empty())
}

/// `created_at` and `CREATED_AT` both become `createdAt`.
fn camel_case(column: &str) -> String {
    let mut ret = String::with_capacity(column.len());
    let mut upper = false;

    for ch in column.chars() {
        if ch == '_' {
            upper = !ret.is_empty();
            continue;
        }

        if upper {
            ret.extend(ch.to_uppercase());
            upper = false;
        } else {
            ret.extend(ch.to_lowercase());
        }
    }

    ret
}
