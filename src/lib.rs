#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::RenderError;
pub use hierarchy::{Hierarchy, build_hierarchy};
pub use ir::{EdgeKind, OutputValue, Payload, TreeNode};
pub use layout::{Layout, compute_layout};
pub use parser::{parse_output, parse_payload};
pub use render::render_svg;
pub use theme::Theme;

/// Theme and geometry used by [`render_with_options`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            theme: config.theme.clone(),
            layout: config.layout.clone(),
        }
    }
}

/// Render a serialized payload to an SVG document with the default options.
///
/// ```no_run
/// let svg = decision_tree_svg::render(
///     r#"{"branches":[],"leaves":[{"uid":"l","typ":"int"}],"edges":[],"highlights":[]}"#,
/// )?;
/// assert!(svg.starts_with("<svg"));
/// # Ok::<(), decision_tree_svg::RenderError>(())
/// ```
pub fn render(payload: &str) -> Result<String, RenderError> {
    render_with_options(payload, &RenderOptions::default())
}

pub fn render_with_options(payload: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let payload = parse_payload(payload)?;
    let hierarchy = build_hierarchy(&payload)?;
    let layout = compute_layout(&hierarchy, &payload, &options.layout);
    Ok(render_svg(&layout, &options.theme, &options.layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_default_options() {
        let svg = render(
            r#"{"branches":[],"leaves":[{"uid":"l","typ":"int"}],"edges":[],"highlights":[]}"#,
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">int</text>"));
    }

    #[test]
    fn classic_options_change_colours() {
        let payload = r#"{"branches":[],"leaves":[{"uid":"l","typ":"int"}],"edges":[],"highlights":[]}"#;
        let modern = render_with_options(payload, &RenderOptions::modern()).unwrap();
        let classic = render_with_options(payload, &RenderOptions::classic()).unwrap();
        assert!(classic.contains(&Theme::classic().leaf_fill));
        assert_ne!(modern, classic);
    }

    #[test]
    fn fatal_errors_produce_no_document() {
        assert!(matches!(
            render(r#"{"branches":[],"leaves":[],"edges":[],"highlights":[]}"#),
            Err(RenderError::EmptyInput)
        ));
        assert!(matches!(
            render(r#"{"branches":[],"leaves":[]}"#),
            Err(RenderError::MalformedPayload(_))
        ));
        assert!(matches!(
            render(
                r#"{"branches":[],"leaves":[{"uid":"a","typ":"x"},{"uid":"b","typ":"y"}],"edges":[],"highlights":[]}"#
            ),
            Err(RenderError::MultipleOrNoRoot { count: 2 })
        ));
    }
}
