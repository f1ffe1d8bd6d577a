//! Bulk include - display a list of passages through the host.

use story_state::{ContentStore, Passage};

use crate::deck::Deck;
use crate::error::{QbnError, Result};

/// Argument handed to a host widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetArg<'a> {
    /// Wrapper widgets receive the passage title.
    Title(&'a str),
    /// Separator widgets learn whether the next passage is the last one.
    IsLast(bool),
}

/// Output side of the host: renders passages and runs named widgets.
pub trait RenderHost {
    /// Check whether a widget is registered.
    fn has_widget(&self, name: &str) -> bool;

    /// Run a registered widget.
    fn invoke_widget(&mut self, name: &str, arg: WidgetArg<'_>);

    /// Render a passage body.
    fn render_passage(&mut self, passage: &Passage);

    /// Append literal text to the output.
    fn append_text(&mut self, text: &str);
}

/// What goes between two included passages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Separator {
    Widget(String),
    Text(String),
}

impl Separator {
    /// A registered widget name becomes a widget separator, anything else literal text.
    pub fn detect(arg: &str, host: &dyn RenderHost) -> Self {
        if host.has_widget(arg) {
            Separator::Widget(arg.to_string())
        } else {
            Separator::Text(arg.to_string())
        }
    }
}

/// Display every passage in `titles`, consuming single-use cards as they are shown.
///
/// Each passage goes through the `wrap` widget if given, otherwise the host
/// renders it directly. Widgets and titles are all checked before anything
/// is consumed or rendered.
pub fn include_all(
    deck: &mut Deck,
    content: &dyn ContentStore,
    host: &mut dyn RenderHost,
    titles: &[String],
    wrap: Option<&str>,
    separator: Option<&Separator>,
) -> Result<()> {
    if let Some(wrap) = wrap {
        if !host.has_widget(wrap) {
            return Err(QbnError::UnknownWidget(wrap.to_string()));
        }
    }
    if let Some(Separator::Widget(name)) = separator {
        if !host.has_widget(name) {
            return Err(QbnError::UnknownSeparator(name.clone()));
        }
    }
    let passages = titles
        .iter()
        .map(|title| {
            content
                .passage(title)
                .ok_or_else(|| QbnError::UnknownFragment(title.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let last = passages.len().saturating_sub(1);
    for (i, passage) in passages.iter().enumerate() {
        deck.consume(&passage.title);
        match wrap {
            Some(wrap) => host.invoke_widget(wrap, WidgetArg::Title(&passage.title)),
            None => host.render_passage(passage),
        }

        if i < last {
            match separator {
                Some(Separator::Widget(name)) => {
                    host.invoke_widget(name, WidgetArg::IsLast(i + 1 == last))
                }
                Some(Separator::Text(text)) => host.append_text(text),
                None => {}
            }
        }
    }

    tracing::debug!(count = passages.len(), wrapped = wrap.is_some(), "included passages");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Stickiness;
    use story_state::PassageLibrary;

    /// Host double that records everything it is asked to do.
    #[derive(Default)]
    struct RecordingHost {
        widgets: Vec<String>,
        output: Vec<String>,
    }

    impl RenderHost for RecordingHost {
        fn has_widget(&self, name: &str) -> bool {
            self.widgets.iter().any(|w| w == name)
        }

        fn invoke_widget(&mut self, name: &str, arg: WidgetArg<'_>) {
            let arg = match arg {
                WidgetArg::Title(t) => format!("{t:?}"),
                WidgetArg::IsLast(b) => b.to_string(),
            };
            self.output.push(format!("<<{name} {arg}>>"));
        }

        fn render_passage(&mut self, passage: &Passage) {
            self.output.push(passage.text.clone());
        }

        fn append_text(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    fn setup() -> (PassageLibrary, Deck) {
        let library = PassageLibrary::new()
            .with_passage(Passage::new("A").with_text("alpha"))
            .with_passage(Passage::new("B").with_text("beta"))
            .with_passage(Passage::new("C").with_text("gamma"));
        let mut deck = Deck::new();
        deck.insert("A", Stickiness::SingleUse);
        deck.insert("B", Stickiness::Sticky);
        (library, deck)
    }

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_renders_with_text_separator() {
        let (library, mut deck) = setup();
        let mut host = RecordingHost::default();
        let sep = Separator::Text(", ".to_string());

        include_all(&mut deck, &library, &mut host, &titles(&["A", "B", "C"]), None, Some(&sep))
            .unwrap();

        assert_eq!(host.output, vec!["alpha", ", ", "beta", ", ", "gamma"]);
        assert!(!deck.contains("A"));
        assert!(deck.contains("B"));
    }

    #[test]
    fn test_wrapper_and_widget_separator() {
        let (library, mut deck) = setup();
        let mut host = RecordingHost {
            widgets: vec!["card".to_string(), "sep".to_string()],
            ..Default::default()
        };
        let sep = Separator::detect("sep", &host);
        assert_eq!(sep, Separator::Widget("sep".to_string()));

        include_all(
            &mut deck,
            &library,
            &mut host,
            &titles(&["A", "B", "C"]),
            Some("card"),
            Some(&sep),
        )
        .unwrap();

        assert_eq!(
            host.output,
            vec![
                "<<card \"A\">>",
                "<<sep false>>",
                "<<card \"B\">>",
                "<<sep true>>",
                "<<card \"C\">>",
            ]
        );
    }

    #[test]
    fn test_detect_falls_back_to_text() {
        let host = RecordingHost::default();
        assert_eq!(Separator::detect(" | ", &host), Separator::Text(" | ".to_string()));
    }

    #[test]
    fn test_unknown_widgets_fail_before_consuming() {
        let (library, mut deck) = setup();
        let mut host = RecordingHost::default();

        let err = include_all(&mut deck, &library, &mut host, &titles(&["A"]), Some("nope"), None)
            .unwrap_err();
        assert!(matches!(err, QbnError::UnknownWidget(w) if w == "nope"));

        let sep = Separator::Widget("gone".to_string());
        let err = include_all(&mut deck, &library, &mut host, &titles(&["A"]), None, Some(&sep))
            .unwrap_err();
        assert!(matches!(err, QbnError::UnknownSeparator(w) if w == "gone"));

        let err = include_all(&mut deck, &library, &mut host, &titles(&["A", "Z"]), None, None)
            .unwrap_err();
        assert!(matches!(err, QbnError::UnknownFragment(t) if t == "Z"));

        assert!(deck.contains("A"));
        assert!(host.output.is_empty());
    }

    #[test]
    fn test_empty_list() {
        let (library, mut deck) = setup();
        let mut host = RecordingHost::default();
        include_all(&mut deck, &library, &mut host, &[], None, None).unwrap();
        assert!(host.output.is_empty());
    }
}
