//! Template rendering for generated artifacts.
//!
//! Uses Handlebars with HTML escaping turned off (the output is source code)
//! and two custom helpers:
//! - quote: render one string as a double-quoted literal
//! - quoted: render a string array as `"a", "b"` with source-level escaping

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};
use serde::Serialize;

use crate::templates::TemplateSet;
use crate::RenderError;

/// Compiled renderer with registered helpers
pub struct TemplateRenderer<'a> {
    handlebars: Handlebars<'a>,
    templates: TemplateSet,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(templates: TemplateSet) -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("quote", Box::new(QuoteHelper));
        handlebars.register_helper("quoted", Box::new(QuotedHelper));

        for (name, template) in templates.iter() {
            handlebars
                .register_template_string(name, template)
                .map_err(|e| RenderError::Template(format!("{}: {}", name, e)))?;
        }

        Ok(TemplateRenderer {
            handlebars,
            templates,
        })
    }

    /// Renderer over the templates compiled into the crate.
    pub fn builtin() -> Result<Self, RenderError> {
        Self::new(TemplateSet::builtin())
    }

    /// Render a named template with data
    pub fn render<T: Serialize>(
        &self,
        template_name: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        if !self.templates.contains(template_name) {
            return Err(RenderError::Template(format!(
                "unknown template '{}'",
                template_name
            )));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| RenderError::Render(e.to_string()))
    }

    pub fn list_templates(&self) -> Vec<&str> {
        self.templates.names()
    }
}

/// `a"b` -> `"a\"b"`
struct QuoteHelper;

impl HelperDef for QuoteHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).map(|v| v.value());
        let text = match value.and_then(|v| v.as_str()) {
            Some(s) => s.to_string(),
            None => value.map(|v| v.to_string()).unwrap_or_default(),
        };
        out.write(&quote(&text))?;
        Ok(())
    }
}

/// `["7.4", "8.0"]` -> `"7.4", "8.0"`; empty or missing arrays render nothing.
struct QuotedHelper;

impl HelperDef for QuotedHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let items = h
            .param(0)
            .and_then(|v| v.value().as_array())
            .map(|arr| {
                arr.iter()
                    .map(|v| match v.as_str() {
                        Some(s) => quote(s),
                        None => quote(&v.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        out.write(&items.join(", "))?;
        Ok(())
    }
}

/// Double-quoted literal, valid in both Go and Rust sources.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
