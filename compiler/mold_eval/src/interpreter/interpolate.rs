//! `<<name>>` placeholders.

use std::sync::OnceLock;

use mold_ir::{NodeId, Path};
use mold_value::{Map, Value};
use regex::Regex;

use super::Interpreter;
use crate::{undefined_dynamic, EvalError, EvalResult, Environment};

// Literal pattern; compiling it cannot fail.
#[allow(clippy::expect_used)]
fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"<<(\$?[a-zA-Z0-9_-]+(?:\.[a-zA-Z0-9_-]+)*)>>").expect("literal pattern")
    })
}

impl Interpreter<'_> {
    /// Substitute placeholders in every string leaf and map key of `value`.
    /// Other scalars are returned unchanged.
    pub(super) fn interpolate(&self, scope: NodeId, value: &Value, env: &Environment) -> EvalResult {
        match value {
            Value::String(text) => self.interpolate_str(scope, text, env).map(Value::String),
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.interpolate(scope, item, env))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Value::Map(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    let key = self.interpolate_str(scope, key, env)?;
                    out.insert(key, self.interpolate(scope, item, env)?);
                }
                Ok(Value::Map(out))
            }
            other => Ok(other.clone()),
        }
    }

    /// Replace each `<<path>>` in `text` with the text form of what `path`
    /// resolves to from `scope`.
    pub(super) fn interpolate_str(
        &self,
        scope: NodeId,
        text: &str,
        env: &Environment,
    ) -> Result<String, EvalError> {
        if !text.contains("<<") {
            return Ok(text.to_string());
        }
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for captures in placeholder().captures_iter(text) {
            let (Some(whole), Some(path)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            let value = self.resolve_placeholder(scope, path.as_str(), env)?;
            out.push_str(&value.to_text());
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    fn resolve_placeholder(&self, scope: NodeId, placeholder: &str, env: &Environment) -> EvalResult {
        let path = Path::parse_dotted(placeholder);
        match path.name.strip_prefix('$') {
            Some(name) => {
                let value = env.get_dynamic(name).ok_or_else(|| undefined_dynamic(name))?;
                Ok(self.select(value, &path.select))
            }
            None => {
                let value = self.lookup_lexical(scope, &path.name, env)?;
                Ok(self.select_owned(value, &path.select))
            }
        }
    }
}
