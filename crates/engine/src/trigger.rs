// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger probes: external conditions that gate a schedule's fire. Both
//! kinds share a 10s timeout and report back a canonical string the
//! scheduler compares against `trigger.last_trigger_value`.

use crate::error::{EngineError, EngineResult};
use quick_xml::events::Event as XmlEvent;
use quick_xml::reader::Reader;
use relay_core::{KernelError, TriggerKind, TriggerSpec};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch and extract the current trigger value. `None` means the probe ran
/// but found nothing to compare (e.g. an empty feed).
pub async fn probe(trigger: &TriggerSpec) -> EngineResult<Option<String>> {
    match trigger.kind {
        TriggerKind::HttpJson => probe_http_json(trigger).await,
        TriggerKind::Rss => probe_rss(trigger).await,
    }
}

async fn build_client() -> reqwest::Client {
    reqwest::Client::builder().timeout(PROBE_TIMEOUT).build().unwrap_or_default()
}

async fn probe_http_json(trigger: &TriggerSpec) -> EngineResult<Option<String>> {
    let path = trigger
        .path
        .as_deref()
        .ok_or_else(|| EngineError::Kernel(KernelError::invalid("http_json trigger requires a path")))?;

    let client = build_client().await;
    let mut req = client.get(&trigger.url);
    for (key, value) in &trigger.headers {
        req = req.header(key, value);
    }
    let response = req.send().await.map_err(|e| {
        EngineError::Kernel(KernelError::Aborted { reason: format!("trigger probe request failed: {e}") })
    })?;
    let body: serde_json::Value = response.json().await.map_err(|e| {
        EngineError::Kernel(KernelError::Aborted { reason: format!("trigger probe returned non-JSON body: {e}") })
    })?;

    let matches = jsonpath_lib::select(&body, path).map_err(|e| {
        EngineError::Kernel(KernelError::invalid(format!("invalid JSONPath '{path}': {e}")))
    })?;
    match matches.first() {
        Some(value) => Ok(Some(canonical_json(value))),
        None => Ok(None),
    }
}

fn canonical_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn probe_rss(trigger: &TriggerSpec) -> EngineResult<Option<String>> {
    let client = build_client().await;
    let mut req = client.get(&trigger.url);
    for (key, value) in &trigger.headers {
        req = req.header(key, value);
    }
    let response = req.send().await.map_err(|e| {
        EngineError::Kernel(KernelError::Aborted { reason: format!("trigger probe request failed: {e}") })
    })?;
    let body = response.text().await.map_err(|e| {
        EngineError::Kernel(KernelError::Aborted { reason: format!("trigger probe body read failed: {e}") })
    })?;
    Ok(first_item_identity(&body))
}

/// `guid -> link -> title` fallback chain over the first `<item>` in the feed.
fn first_item_identity(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    let mut in_item = false;
    let mut current_tag = String::new();
    let (mut guid, mut link, mut title) = (None::<String>, None::<String>, None::<String>);

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    in_item = true;
                }
                current_tag = name;
            }
            Ok(XmlEvent::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if name == "item" {
                    break;
                }
            }
            Ok(XmlEvent::Text(text)) if in_item => {
                if let Ok(unescaped) = text.unescape() {
                    let trimmed = unescaped.trim().to_string();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match current_tag.as_str() {
                        "guid" if guid.is_none() => guid = Some(trimmed),
                        "link" if link.is_none() => link = Some(trimmed),
                        "title" if title.is_none() => title = Some(trimmed),
                        _ => {}
                    }
                }
            }
            Ok(XmlEvent::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    guid.or(link).or(title)
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
