use std::collections::HashMap;

use client::session::{ADMIN_KEYS, GENERAL_KEYS, STUDENT_KEYS};
use client::{KeyValueStore, MemoryStore};
use dioxus::prelude::*;

/// `localStorage`-backed store.
///
/// Reads come from an in-memory mirror so they stay synchronous; writes go
/// to the mirror and are pushed to the browser. [`hydrate`] fills the mirror
/// once at startup.
#[derive(Clone, Default)]
pub struct BrowserStore {
    mirror: MemoryStore,
}

impl BrowserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the session keys from `localStorage` into the mirror.
    pub async fn hydrate(&self) {
        let keys: Vec<&str> = [GENERAL_KEYS, ADMIN_KEYS, STUDENT_KEYS]
            .iter()
            .flat_map(|k| [k.token, k.user, k.refresh_token])
            .collect();
        let keys_json = serde_json::to_string(&keys).unwrap_or_else(|_| "[]".to_string());
        let eval = document::eval(&format!(
            r#"
            var out = {{}};
            {keys_json}.forEach(function(k) {{
                var v = localStorage.getItem(k);
                if (v !== null) {{ out[k] = v; }}
            }});
            return out;
            "#
        ));
        match eval.join::<HashMap<String, String>>().await {
            Ok(pairs) => {
                tracing::debug!(keys = pairs.len(), "Session storage hydrated");
                for (k, v) in pairs {
                    self.mirror.set(&k, &v);
                }
            }
            Err(e) => tracing::warn!(error = ?e, "Could not read localStorage"),
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        self.mirror.get(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.mirror.set(key, value);
        push(&format!(
            "localStorage.setItem({}, {});",
            js_literal(key),
            js_literal(value)
        ));
    }

    fn remove(&self, key: &str) {
        self.mirror.remove(key);
        push(&format!("localStorage.removeItem({});", js_literal(key)));
    }
}

fn push(script: &str) {
    let _ = document::eval(script);
}

fn js_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
