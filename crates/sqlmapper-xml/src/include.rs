use crate::element::{self, Content, Element};

use indexmap::IndexMap;
use sqlmapper_core::{bail, err, mapper, Result};

/// Looks up fragments that live in other, already loaded, namespaces.
pub trait FragmentSource {
    /// Returns the markup of the fragment `qualified_id`, with its own
    /// includes already expanded.
    fn fragment(&self, qualified_id: &str) -> Option<String>;
}

impl<T: FragmentSource + ?Sized> FragmentSource for &T {
    fn fragment(&self, qualified_id: &str) -> Option<String> {
        (**self).fragment(qualified_id)
    }
}

/// Substitutes `<include refid>` elements with the fragment they name.
///
/// Expansion is a pass over the markup tree run before any statement body is
/// compiled, so compiled templates never see an `include`.
pub(crate) struct Includes<'a> {
    namespace: &'a str,
    local: &'a IndexMap<String, Element>,
    external: Option<&'a dyn FragmentSource>,
}

/// `<property name value>` values passed down by an `include`.
type Properties = Vec<(String, String)>;

impl<'a> Includes<'a> {
    pub(crate) fn new(
        namespace: &'a str,
        local: &'a IndexMap<String, Element>,
        external: Option<&'a dyn FragmentSource>,
    ) -> Includes<'a> {
        Includes {
            namespace,
            local,
            external,
        }
    }

    pub(crate) fn expand(&self, contents: &[Content]) -> Result<Vec<Content>> {
        let mut ret = vec![];
        self.expand_into(contents, &mut vec![], &Properties::new(), &mut ret)?;
        Ok(ret)
    }

    fn expand_into(
        &self,
        contents: &[Content],
        chain: &mut Vec<String>,
        properties: &Properties,
        dst: &mut Vec<Content>,
    ) -> Result<()> {
        for content in contents {
            match content {
                Content::Text(text) => dst.push(Content::Text(substitute(text, properties))),
                Content::Element(el) if el.name == "include" => {
                    self.include(el, chain, properties, dst)?;
                }
                Content::Element(el) => {
                    let mut expanded = Element::new(&el.name);
                    expanded.attrs = el
                        .attrs
                        .iter()
                        .map(|(key, value)| (key.clone(), substitute(value, properties)))
                        .collect();
                    self.expand_into(&el.children, chain, properties, &mut expanded.children)?;
                    dst.push(Content::Element(expanded));
                }
            }
        }

        Ok(())
    }

    fn include(
        &self,
        el: &Element,
        chain: &mut Vec<String>,
        properties: &Properties,
        dst: &mut Vec<Content>,
    ) -> Result<()> {
        let refid = substitute(el.require("refid")?, properties);
        let qualified = mapper::resolve_ref(self.namespace, &refid);

        if chain.contains(&qualified) {
            chain.push(qualified);
            bail!("include cycle: {}", chain.join(" -> "));
        }

        // Properties declared on the include are themselves substituted with
        // the properties in scope.
        let mut scoped = properties.clone();
        for property in el.elements() {
            if property.name != "property" {
                bail!("unexpected `{}` inside `<include>`", property.snippet());
            }
            let name = property.require("name")?.to_string();
            let value = substitute(property.attr("value").unwrap_or_default(), properties);
            scoped.retain(|(key, _)| *key != name);
            scoped.push((name, value));
        }

        let body = self.lookup(&qualified)?;

        chain.push(qualified);
        self.expand_into(&body, chain, &scoped, dst)?;
        chain.pop();

        Ok(())
    }

    fn lookup(&self, qualified: &str) -> Result<Vec<Content>> {
        let local = mapper::split_qualified(qualified)
            .filter(|(namespace, _)| *namespace == self.namespace)
            .and_then(|(_, id)| self.local.get(id));

        if let Some(fragment) = local {
            return Ok(fragment.children.clone());
        }

        let markup = self
            .external
            .and_then(|external| external.fragment(qualified))
            .ok_or_else(|| err!("unknown fragment `{qualified}`"))?;

        let wrapper = element::parse(&format!("<sql>{markup}</sql>"))?;
        Ok(wrapper.children)
    }
}

/// Replaces `${name}` with include properties. Unknown names are left as is.
fn substitute(text: &str, properties: &Properties) -> String {
    if properties.is_empty() || !text.contains("${") {
        return text.to_string();
    }

    let mut ret = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };

        let name = rest[start + 2..start + len].trim();
        ret.push_str(&rest[..start]);

        match properties.iter().find(|(key, _)| key == name) {
            Some((_, value)) => ret.push_str(value),
            None => ret.push_str(&rest[start..start + len + 1]),
        }

        rest = &rest[start + len + 1..];
    }

    ret.push_str(rest);
    ret
}
