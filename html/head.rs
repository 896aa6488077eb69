use maud::{html, Markup, Render};

/// Renders into a `<head>` tag with builder-like interface
pub struct Head<'a> {
    title: &'a str,
    stylesheets: Vec<&'a str>,
    viewport: Option<&'a str>,
    theme_color: Option<&'a str>,
}

impl<'a> Head<'a> {
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
    pub fn css(mut self, path: &'a str) -> Self {
        self.stylesheets.push(path);
        self
    }
    pub fn theme_color(mut self, color: &'a str) -> Self {
        self.theme_color = Some(color);
        self
    }
}

impl<'a> Default for Head<'a> {
    fn default() -> Self {
        Self {
            title: "Tasks",
            stylesheets: vec![],
            viewport: Some("width=device-width, initial-scale=1.0"),
            theme_color: None,
        }
    }
}

impl<'a> Render for Head<'a> {
    fn render(&self) -> Markup {
        html!(
            head {
                meta charset="UTF-8";
                title {(self.title)}
                @if let Some(viewport) = self.viewport { meta name="viewport" content=(viewport); }
                @if let Some(color) = self.theme_color { meta name="theme-color" content=(color); }
                @for href in &self.stylesheets { link rel="stylesheet" href=(href); }
            }
        )
    }
}
