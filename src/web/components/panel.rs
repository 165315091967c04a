use maud::{Markup, html};

/// Lifecycle of one independently loaded section of a page.
///
/// A `Loading` panel renders a placeholder carrying the fragment URL it is
/// filled from; the layout script fetches that URL and swaps the placeholder
/// for the returned `Error` or `Ready` markup. Every panel starts in `Loading`
/// again whenever the page is rendered for a different identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Loading { src: String },
    Error(String),
    Ready(T),
}

impl<T> Panel<T> {
    pub fn loading(src: impl Into<String>) -> Self {
        Self::Loading { src: src.into() }
    }

    pub fn state(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "loading",
            Self::Error(_) => "error",
            Self::Ready(_) => "ready",
        }
    }

    /// Renders the panel shell; `ready` draws the content once data is present.
    pub fn render(
        &self,
        name: &str,
        loading_text: &str,
        ready: impl FnOnce(&T) -> Markup,
    ) -> Markup {
        match self {
            Self::Loading { src } => html! {
                div class="panel" data-panel=(name) data-state=(self.state()) data-src=(src) {
                    p class="muted" { (loading_text) }
                }
            },
            Self::Error(message) => html! {
                div class="panel" data-panel=(name) data-state=(self.state()) {
                    div class="error" { "Error: " (message) }
                }
            },
            Self::Ready(value) => html! {
                div class="panel" data-panel=(name) data-state=(self.state()) {
                    (ready(value))
                }
            },
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Panel<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(panel: &Panel<u32>) -> String {
        panel
            .render("count", "Loading count...", |n| html! { span { (n) } })
            .into_string()
    }

    #[test]
    fn loading_carries_fragment_source() {
        let html = render(&Panel::loading("/panels/tokens?addresses=0xa"));
        assert!(html.contains(r#"data-state="loading""#));
        assert!(html.contains(r#"data-src="/panels/tokens?addresses=0xa""#));
        assert!(html.contains("Loading count..."));
    }

    #[test]
    fn error_is_rendered_inline() {
        let html = render(&Panel::Error("upstream down".to_string()));
        assert!(html.contains(r#"data-state="error""#));
        assert!(html.contains("Error: upstream down"));
        assert!(!html.contains("data-src"));
    }

    #[test]
    fn ready_renders_content() {
        let panel: Panel<u32> = Ok::<_, String>(7).into();
        assert_eq!(panel.state(), "ready");
        assert!(render(&panel).contains("<span>7</span>"));
    }
}
