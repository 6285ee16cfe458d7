//! In-page scripts that resolve locators and act on the matches.
//!
//! Every script is a self-contained expression returning
//! `{ found: bool, value: any }` so results deserialize the same way
//! whether or not the element exists.

use crate::locator::Locator;
use serde::Deserialize;

/// Operation performed on the resolved element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DomOp {
    Count,
    Visible(usize),
    Enabled(usize),
    Text(usize),
    Click(usize),
}

impl DomOp {
    fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Visible(_) => "visible",
            Self::Enabled(_) => "enabled",
            Self::Text(_) => "text",
            Self::Click(_) => "click",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Count => 0,
            Self::Visible(i) | Self::Enabled(i) | Self::Text(i) | Self::Click(i) => i,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DomReply {
    pub found: bool,
    #[serde(default)]
    pub value: serde_json::Value,
}

fn js_string(value: &str) -> String {
    // serde_json string encoding is valid JavaScript string literal syntax
    serde_json::Value::String(value.to_string()).to_string()
}

pub(crate) fn script(locator: &Locator, op: DomOp) -> String {
    let (kind, arg, flags) = match locator {
        Locator::Css(selector) => ("css", selector.as_str(), ""),
        Locator::Text(text) => ("text", text.as_str(), ""),
        Locator::ExactText(text) => ("exact", text.as_str(), ""),
        Locator::Pattern {
            source,
            case_insensitive,
        } => ("pattern", source.as_str(), if *case_insensitive { "i" } else { "" }),
    };

    format!(
        r#"(() => {{
    const kind = {kind};
    const arg = {arg};
    const flags = {flags};
    const op = {op};
    const index = {index};
    const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
    let nodes = [];
    if (kind === 'css') {{
        nodes = Array.from(document.querySelectorAll(arg));
    }} else {{
        let test;
        if (kind === 'text') {{
            const needle = norm(arg).toLowerCase();
            test = (t) => t.toLowerCase().includes(needle);
        }} else if (kind === 'exact') {{
            const wanted = norm(arg);
            test = (t) => t === wanted;
        }} else {{
            const re = new RegExp(arg, flags);
            test = (t) => re.test(t);
        }}
        const skip = ['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE', 'HEAD'];
        const all = document.body ? Array.from(document.body.querySelectorAll('*')) : [];
        nodes = all.filter((el) => !skip.includes(el.tagName)
            && test(norm(el.textContent))
            && !Array.from(el.children).some((c) => test(norm(c.textContent))));
    }}
    if (op === 'count') {{
        return {{ found: true, value: nodes.length }};
    }}
    const el = nodes[index];
    if (!el) {{
        return {{ found: false, value: null }};
    }}
    if (op === 'visible') {{
        const rect = el.getBoundingClientRect();
        const style = window.getComputedStyle(el);
        const shown = rect.width > 0 && rect.height > 0
            && style.visibility !== 'hidden' && style.display !== 'none';
        return {{ found: true, value: shown }};
    }}
    if (op === 'enabled') {{
        const enabled = !el.disabled && el.getAttribute('aria-disabled') !== 'true'
            && !el.classList.contains('disabled');
        return {{ found: true, value: enabled }};
    }}
    if (op === 'text') {{
        return {{ found: true, value: el.textContent }};
    }}
    el.scrollIntoView({{ block: 'center', inline: 'center' }});
    if (typeof el.click === 'function') {{
        el.click();
    }} else {{
        el.dispatchEvent(new MouseEvent('click', {{ bubbles: true, cancelable: true, view: window }}));
    }}
    return {{ found: true, value: true }};
}})()"#,
        kind = js_string(kind),
        arg = js_string(arg),
        flags = js_string(flags),
        op = js_string(op.name()),
        index = op.index(),
    )
}

/// Resource-count heuristic for network idle: the page is idle once
/// `document.readyState` is complete and no new resource entries appear
/// for `idle_ms`.
pub(crate) fn network_idle_script(timeout_ms: u64, idle_ms: u64) -> String {
    format!(
        r#"(async () => {{
    const timeoutMs = {timeout_ms};
    const idleMs = {idle_ms};
    const interval = 100;
    const count = () => {{
        try {{ return performance.getEntriesByType('resource').length; }} catch (_) {{ return 0; }}
    }};
    const start = Date.now();
    let last = count();
    let stable = 0;
    while (Date.now() - start < timeoutMs) {{
        await new Promise((r) => setTimeout(r, interval));
        const current = count();
        if (document.readyState === 'complete' && current === last) {{
            stable += interval;
            if (stable >= idleMs) {{
                return {{ found: true, value: Date.now() - start }};
            }}
        }} else {{
            stable = 0;
        }}
        last = current;
    }}
    return {{ found: false, value: Date.now() - start }};
}})()"#
    )
}
