use crate::{
    body,
    element::{self, to_markup, Element},
    include::Includes,
    parse_bool, result_map, FragmentSource,
};

use indexmap::IndexMap;
use sqlmapper_core::{
    bail,
    mapper::{self, Fragment, GeneratedKeys, Mapper, Statement, StatementKind},
    Error, Location, Result,
};
use std::sync::Arc;

/// Mapper-level elements accepted and skipped; caching and parameter maps
/// are left to the host.
const IGNORED: &[&str] = &["cache", "cache-ref", "parameterMap"];

pub(crate) fn parse(
    src: &str,
    file: Option<&str>,
    external: Option<&dyn FragmentSource>,
) -> Result<Mapper> {
    let base = Location {
        file: file.map(str::to_string),
        ..Location::default()
    };

    let root = element::parse(src).map_err(|e| Error::invalid_mapper(base.clone(), e.to_string()))?;

    if root.name != "mapper" {
        return Err(Error::invalid_mapper(
            base,
            format!("expected a `<mapper>` root element, found `{}`", root.snippet()),
        ));
    }

    let namespace = match root.attr("namespace").map(str::trim) {
        Some(namespace) if !namespace.is_empty() => namespace.to_string(),
        _ => {
            return Err(Error::invalid_mapper(
                base,
                "`<mapper>` requires a `namespace` attribute",
            ))
        }
    };

    let location = Location {
        namespace: Some(namespace.clone()),
        ..base
    };

    // Fragments first: statements may include fragments declared after them
    let mut sql = IndexMap::new();
    for el in root.elements().filter(|el| el.name == "sql") {
        let id = el
            .require("id")
            .map_err(|e| Error::invalid_mapper(location.clone(), e.to_string()))?;
        if sql.insert(id.to_string(), el.clone()).is_some() {
            return Err(Error::invalid_mapper(
                location.clone().statement(id),
                "duplicate fragment id",
            ));
        }
    }

    let includes = Includes::new(&namespace, &sql, external);
    let mut ret = Mapper::new(&namespace);

    for (id, el) in &sql {
        let expanded = includes
            .expand(&el.children)
            .map_err(|e| Error::invalid_mapper(location.clone().statement(id), e.to_string()))?;
        ret.fragments.insert(
            id.clone(),
            Fragment {
                id: id.clone(),
                body: to_markup(&expanded),
            },
        );
    }

    if let Some(text) = root.stray_text() {
        return Err(Error::invalid_mapper(
            location,
            format!("text directly inside `<mapper>`: `{}`", element::abbreviate(text)),
        ));
    }

    for el in root.elements() {
        if let Some(kind) = StatementKind::from_tag(&el.name) {
            let statement = statement(el, kind, &namespace, &includes, &location)?;
            let id = statement.id.clone();
            if ret.statements.insert(id.clone(), Arc::new(statement)).is_some() {
                return Err(Error::invalid_mapper(
                    location.clone().statement(id),
                    "duplicate statement id",
                ));
            }
            continue;
        }

        match el.name.as_str() {
            "sql" => {}
            "resultMap" => {
                let result_map = result_map::parse(el, &namespace).map_err(|e| {
                    let location = match el.attr("id") {
                        Some(id) => location.clone().statement(id),
                        None => location.clone(),
                    };
                    Error::invalid_mapper(location, e.to_string())
                })?;
                let id = result_map.id.clone();
                if ret.result_maps.insert(id.clone(), Arc::new(result_map)).is_some() {
                    return Err(Error::invalid_mapper(
                        location.clone().statement(id),
                        "duplicate result map id",
                    ));
                }
            }
            name if IGNORED.contains(&name) => {
                tracing::debug!(namespace = %namespace, element = name, "ignoring mapper element");
            }
            _ => {
                return Err(Error::invalid_mapper(
                    location,
                    format!("unknown element `{}`", el.snippet()),
                ))
            }
        }
    }

    tracing::debug!(
        namespace = %namespace,
        statements = ret.statements.len(),
        result_maps = ret.result_maps.len(),
        fragments = ret.fragments.len(),
        "parsed mapper"
    );

    Ok(ret)
}

fn statement(
    el: &Element,
    kind: StatementKind,
    namespace: &str,
    includes: &Includes<'_>,
    location: &Location,
) -> Result<Statement> {
    let id = el
        .require("id")
        .map_err(|e| Error::invalid_mapper(location.clone(), e.to_string()))?;
    let location = location.clone().statement(id);

    statement_at(el, kind, namespace, id, includes).map_err(|e| {
        // Keep the kind of a rejected feature visible under the load error
        if e.any(Error::is_unsupported_feature) {
            e.context(Error::invalid_mapper(location, "rejected statement body"))
        } else {
            Error::invalid_mapper(location, e.to_string())
        }
    })
}

fn statement_at(
    el: &Element,
    kind: StatementKind,
    namespace: &str,
    id: &str,
    includes: &Includes<'_>,
) -> Result<Statement> {
    if id.contains('.') {
        bail!("statement ids cannot contain `.`");
    }

    let expanded = includes.expand(&el.children)?;
    let root = body::compile(&expanded)?;

    let generated_keys = generated_keys(el, kind)?;

    Ok(Statement {
        namespace: namespace.to_string(),
        id: id.to_string(),
        kind,
        body: to_markup(&el.children),
        root,
        parameter_type: el.attr("parameterType").map(str::to_string),
        result_type: el.attr("resultType").map(str::to_string),
        result_map: el
            .attr("resultMap")
            .map(|reference| mapper::resolve_ref(namespace, reference)),
        use_cache: match el.attr("useCache") {
            Some(value) => parse_bool("useCache", value)?,
            None => kind.is_select(),
        },
        timeout: number(el, "timeout")?,
        fetch_size: number(el, "fetchSize")?,
        statement_type: el.attr("statementType").map(str::to_string),
        generated_keys,
    })
}

fn generated_keys(el: &Element, kind: StatementKind) -> Result<Option<GeneratedKeys>> {
    let use_generated_keys = match el.attr("useGeneratedKeys") {
        Some(value) => parse_bool("useGeneratedKeys", value)?,
        None => false,
    };

    if !matches!(kind, StatementKind::Insert | StatementKind::Update) {
        if use_generated_keys {
            bail!("`useGeneratedKeys` is only valid on `<insert>` and `<update>`");
        }
        return Ok(None);
    }

    let properties = list(el.attr("keyProperty"));
    if !use_generated_keys && properties.is_empty() {
        return Ok(None);
    }

    Ok(Some(GeneratedKeys {
        properties,
        columns: list(el.attr("keyColumn")),
    }))
}

fn list(value: Option<&str>) -> Vec<String> {
    value
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn number(el: &Element, name: &str) -> Result<Option<u64>> {
    match el.attr(name) {
        Some(value) => match value.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => bail!("`{name}` must be a non-negative integer, found `{value}`"),
        },
        None => Ok(None),
    }
}
