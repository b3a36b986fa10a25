use dioxus::prelude::*;

/// Colour schemes offered by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    /// Larger text and stronger borders for projector screens.
    HighContrast,
}

pub const ALL_SCHEMES: &[ColorScheme] = &[
    ColorScheme::Light,
    ColorScheme::Dark,
    ColorScheme::HighContrast,
];

impl ColorScheme {
    /// Value of the `data-theme` attribute and of the stored preference.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::HighContrast => "high-contrast",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ColorScheme::Light => "Light",
            ColorScheme::Dark => "Dark",
            ColorScheme::HighContrast => "High contrast",
        }
    }

    /// Parse a stored key, falling back to Light.
    pub fn from_key(s: &str) -> Self {
        match s {
            "dark" => ColorScheme::Dark,
            "high-contrast" => ColorScheme::HighContrast,
            _ => ColorScheme::Light,
        }
    }

    /// Next scheme for the header toggle.
    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::HighContrast,
            ColorScheme::HighContrast => ColorScheme::Light,
        }
    }
}

/// Apply the stored scheme on startup. Mount once in the root component.
#[component]
pub fn ThemeSeed() -> Element {
    use_effect(|| {
        document::eval(
            r#"
            (function() {
                var theme = localStorage.getItem('theme') || 'light';
                document.documentElement.setAttribute('data-theme', theme);
            })();
            "#,
        );
    });

    rsx! {}
}

/// Persist and apply a scheme.
pub fn set_theme(scheme: ColorScheme) {
    let theme = scheme.as_str();
    document::eval(&format!(
        r#"
        (function() {{
            localStorage.setItem('theme', '{theme}');
            document.documentElement.setAttribute('data-theme', '{theme}');
        }})();
        "#,
    ));
}
