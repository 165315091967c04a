use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLES: &str = r#"
:root { --accent: #0052ff; --accent-light: #e8efff; --muted: #6b7280; --border: #e5e7eb; --card: #ffffff; --bg: #f7f8fa; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: #111827; }
.app { max-width: 960px; margin: 0 auto; padding: 24px 16px; }
.nav { display: flex; gap: 16px; align-items: center; margin-bottom: 24px; }
.nav .brand { font-weight: 700; color: var(--accent); text-decoration: none; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 16px; margin-bottom: 16px; }
.muted { color: var(--muted); }
.error { background: #fef2f2; color: #b91c1c; padding: 12px; border-radius: 8px; }
.search { display: flex; gap: 8px; }
.input { flex: 1; padding: 8px 12px; border: 1px solid var(--border); border-radius: 8px; }
.btn { padding: 8px 16px; border: 0; border-radius: 8px; background: var(--accent); color: #fff; cursor: pointer; text-decoration: none; }
.pill { display: inline-block; padding: 2px 10px; border-radius: 999px; background: var(--accent-light); color: var(--accent); font-size: 12px; }
.avatar { width: 40px; height: 40px; border-radius: 50%; object-fit: cover; background: #e5e7eb; display: inline-flex; align-items: center; justify-content: center; }
.avatar.large { width: 64px; height: 64px; }
.list { list-style: none; padding: 0; margin: 0; }
.list li { display: flex; gap: 12px; align-items: center; padding: 8px 0; border-bottom: 1px solid var(--border); }
.address { word-break: break-all; padding: 8px; border: 1px solid var(--border); border-radius: 8px; margin-bottom: 8px; font-size: 14px; }
.address.primary { border-color: var(--accent); background: var(--accent-light); }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(160px, 1fr)); gap: 16px; }
.nft-card { display: block; color: inherit; text-decoration: none; }
.nft-image { aspect-ratio: 1; width: 100%; object-fit: cover; border-radius: 8px; background: #e5e7eb; display: flex; align-items: center; justify-content: center; }
.value { font-weight: 600; color: var(--accent); }
.pager { display: flex; gap: 12px; justify-content: center; margin-top: 16px; }
.attributes { display: grid; grid-template-columns: repeat(auto-fill, minmax(120px, 1fr)); gap: 8px; }
.attributes div { background: var(--accent-light); padding: 8px; border-radius: 6px; font-size: 12px; }
.versus { display: flex; justify-content: space-between; align-items: center; gap: 16px; flex-wrap: wrap; }
"#;

/// Fills `loading` panels from their fragment URL and follows in-panel links.
const PANEL_SCRIPT: &str = r#"
(function () {
  function hydrate(root) {
    root.querySelectorAll('[data-state="loading"][data-src]').forEach(load);
  }
  function fail(panel, message) {
    panel.dataset.state = 'error';
    panel.removeAttribute('data-src');
    var box = document.createElement('div');
    box.className = 'error';
    box.textContent = 'Error: ' + message;
    panel.replaceChildren(box);
  }
  function load(panel) {
    fetch(panel.dataset.src, { headers: { Accept: 'text/html' } })
      .then(function (resp) { return resp.text(); })
      .then(function (body) {
        var tpl = document.createElement('template');
        tpl.innerHTML = body.trim();
        var next = tpl.content.firstElementChild;
        if (!next) { fail(panel, 'empty response'); return; }
        panel.replaceWith(next);
        hydrate(next);
      })
      .catch(function (err) { fail(panel, err.message); });
  }
  document.addEventListener('click', function (ev) {
    var link = ev.target.closest('a[data-panel-link]');
    if (!link) return;
    var panel = link.closest('[data-panel]');
    if (!panel) return;
    ev.preventDefault();
    panel.dataset.state = 'loading';
    panel.dataset.src = link.getAttribute('href');
    load(panel);
  });
  document.addEventListener('DOMContentLoaded', function () { hydrate(document); });
})();
"#;

pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Base Profile" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                div class="app" {
                    nav class="nav" {
                        a class="brand" href="/" { "Base Profile" }
                        a href="/" { "Search" }
                        a href="/compare" { "Compare" }
                    }
                    main { (content) }
                }
                script { (PreEscaped(PANEL_SCRIPT)) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_wraps_content_and_script() {
        let page = layout("Profile", html! { p { "hello" } }).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Profile · Base Profile</title>"));
        assert!(page.contains("<p>hello</p>"));
        assert!(page.contains("data-panel-link"));
    }
}
