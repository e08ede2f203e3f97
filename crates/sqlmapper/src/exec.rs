use crate::{BoundStatement, Params, Settings};

use sqlmapper_core::{
    bail,
    mapper::Statement,
    stmt::{Path, Value},
    template::{
        placeholder::{self, Piece},
        Context,
    },
    Error, Result,
};

/// Applies a statement's template to `param` and binds its placeholders.
pub(crate) fn bind(stmt: &Statement, param: &Value, settings: &Settings) -> Result<BoundStatement> {
    let mut cx = Context::with_options(param, settings.template_options());
    let sql = stmt.root.render(&mut cx)?;

    let mut args = Vec::<Value>::new();
    let mut dst = String::with_capacity(sql.len());

    for piece in placeholder::scan(&sql) {
        match piece {
            Piece::Sql(sql) => dst.push_str(sql),
            Piece::Placeholder(inner) => {
                let (property, _) = placeholder::split_options(inner);
                let Some(path) = Path::parse(property) else {
                    bail!("invalid placeholder `#{{{inner}}}`");
                };
                // Absent properties bind as null
                let value = cx.resolve_bound(&path).cloned().unwrap_or_default();
                let placeholder = Params::push(&mut args, &value);
                settings.flavor.write_placeholder(placeholder, &mut dst);
            }
            Piece::Raw(inner) => {
                return Err(Error::unsupported_feature(format!(
                    "raw substitution `${{{inner}}}`"
                )));
            }
            Piece::Unterminated(rest) => bail!("unterminated placeholder `{rest}`"),
        }
    }

    let sql = if settings.shrink_whitespace {
        dst.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        dst.trim().to_string()
    };

    let (key_properties, key_columns) = match &stmt.generated_keys {
        Some(keys) => (keys.properties.clone(), keys.columns.clone()),
        None => (vec![], vec![]),
    };

    Ok(BoundStatement {
        sql,
        args,
        kind: stmt.kind,
        statement_id: stmt.qualified_id(),
        result_map: stmt.result_map.clone(),
        result_type: stmt.result_type.clone(),
        timeout: stmt.timeout,
        key_properties,
        key_columns,
    })
}
