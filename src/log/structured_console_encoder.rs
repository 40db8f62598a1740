//! Console encoder that appends `log` key/values to the formatted message.
//!
//! Records logged as `debug!(status = 200, url = "..."; "msg")` render as
//! `<pattern output> status=200 url=...`. Values under keys that can carry
//! credentials are replaced, and values containing whitespace are quoted so
//! lines stay splittable.

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

const DEFAULT_PATTERN: &str = "{d} {l} {t} - {m}";

/// Keys whose values are never written out.
const REDACTED_KEYS: &[&str] = &["api_key", "apikey", "secret", "password"];

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
}

#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    delegate: PatternEncoder,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            delegate: PatternEncoder::new(pattern),
        }
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.delegate.encode(w, record)?;

        let mut fields = FieldCollector::default();
        let kv_result = record.key_values().visit(&mut fields);

        for (key, value) in &fields.pairs {
            w.set_style(Style::new().text(Color::Cyan))?;
            write!(w, " {}=", key)?;
            w.set_style(&Style::default())?;
            w.write_all(value.as_bytes())?;
        }
        if let Err(kv_err) = kv_result {
            write!(w, " [kv error: {}]", kv_err)?;
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

fn render_value(key: &str, value: &Value<'_>) -> String {
    if REDACTED_KEYS.iter().any(|k| key.eq_ignore_ascii_case(k)) {
        return "<REDACTED>".to_string();
    }
    let text = value.to_string();
    if text.is_empty() || text.contains(char::is_whitespace) {
        format!("{:?}", text)
    } else {
        text
    }
}

/// Renders every key/value of a record before anything is written.
#[derive(Default)]
struct FieldCollector {
    pairs: Vec<(String, String)>,
}

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        let rendered = render_value(key.as_str(), &value);
        self.pairs.push((key.as_str().to_string(), rendered));
        Ok(())
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
        Ok(Box::new(StructuredConsoleEncoder::new(pattern)))
    }
}
