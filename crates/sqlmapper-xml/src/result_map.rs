use crate::{element::Element, parse_bool};

use sqlmapper_core::{
    bail,
    mapper::{self, NestedKind, NestedMapping, NestedTarget, ResultMap, ResultMapping},
};
use std::sync::Arc;

pub(crate) fn parse(el: &Element, namespace: &str) -> sqlmapper_core::Result<ResultMap> {
    let id = el.require("id")?;
    parse_with_id(el, namespace, id.to_string())
}

fn parse_with_id(
    el: &Element,
    namespace: &str,
    id: String,
) -> sqlmapper_core::Result<ResultMap> {
    let mut result_map = ResultMap {
        namespace: namespace.to_string(),
        id,
        ty: el
            .attr("type")
            .or_else(|| el.attr("ofType"))
            .or_else(|| el.attr("javaType"))
            .map(str::to_string),
        extends: el
            .attr("extends")
            .map(|parent| mapper::resolve_ref(namespace, parent)),
        auto_mapping: el
            .attr("autoMapping")
            .map(|value| parse_bool("autoMapping", value))
            .transpose()?
            .unwrap_or(false),
        ..ResultMap::default()
    };

    for child in el.elements() {
        match child.name.as_str() {
            "id" => result_map.ids.push(mapping(child)?),
            "result" => result_map.results.push(mapping(child)?),
            "constructor" => {
                for arg in child.elements() {
                    match arg.name.as_str() {
                        "idArg" => result_map.ids.push(mapping(arg)?),
                        "arg" => result_map.results.push(mapping(arg)?),
                        _ => bail!("unexpected `{}` inside `<constructor>`", arg.snippet()),
                    }
                }
            }
            "association" => {
                let nested = nested(child, NestedKind::Association, &result_map, namespace)?;
                result_map.nested.push(nested);
            }
            "collection" => {
                let nested = nested(child, NestedKind::Collection, &result_map, namespace)?;
                result_map.nested.push(nested);
            }
            "discriminator" => {
                tracing::debug!(
                    result_map = %result_map.qualified_id(),
                    "ignoring `<discriminator>`"
                );
            }
            _ => bail!("unexpected `{}` inside `<resultMap>`", child.snippet()),
        }
    }

    Ok(result_map)
}

fn mapping(el: &Element) -> sqlmapper_core::Result<ResultMapping> {
    // Constructor args may be named by `name`; the column doubles as the
    // property when neither is given.
    let property = el
        .attr("property")
        .or_else(|| el.attr("name"))
        .or_else(|| el.attr("column"));

    let Some(property) = property else {
        bail!("`{}` requires a `property` or `column` attribute", el.snippet());
    };

    Ok(ResultMapping {
        property: property.to_string(),
        column: el.attr("column").unwrap_or(property).to_string(),
        java_type: el.attr("javaType").map(str::to_string),
        jdbc_type: el.attr("jdbcType").map(str::to_string),
    })
}

fn nested(
    el: &Element,
    kind: NestedKind,
    parent: &ResultMap,
    namespace: &str,
) -> sqlmapper_core::Result<NestedMapping> {
    let property = el.require("property")?;

    let target = if let Some(select) = el.attr("select") {
        NestedTarget::Select {
            statement: mapper::resolve_ref(namespace, select),
            column: el.attr("column").map(str::to_string),
        }
    } else if let Some(reference) = el.attr("resultMap") {
        NestedTarget::Ref(mapper::resolve_ref(namespace, reference))
    } else {
        let id = format!("{}[{property}]", parent.id);
        let mut inline = parse_with_id(el, namespace, id)?;
        // Inline maps inherit the enclosing map's auto-mapping unless set
        if el.attr("autoMapping").is_none() {
            inline.auto_mapping = parent.auto_mapping;
        }
        NestedTarget::Inline(Arc::new(inline))
    };

    let ty = match kind {
        NestedKind::Association => el.attr("javaType"),
        NestedKind::Collection => el.attr("ofType").or_else(|| el.attr("javaType")),
    };

    Ok(NestedMapping {
        kind,
        property: property.to_string(),
        target,
        column_prefix: el.attr("columnPrefix").map(str::to_string),
        ty: ty.map(str::to_string),
    })
}
