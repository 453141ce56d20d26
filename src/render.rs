use crate::config::{LayoutConfig, RenderConfig};
use crate::ir::{EdgeKind, LeafNode, OutputValue, TreeNode};
use crate::layout::sizing::{OutputSegments, output_segments};
use crate::layout::text::{estimate_width, truncate_middle};
use crate::layout::{EdgeLayout, InputLayout, Layout, NodeLayout, quoted};
use crate::parser::parse_output;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

// (stdDeviation, opacity) per shadow layer, innermost first.
const GLOW_LAYERS: [(f32, f32); 3] = [(2.0, 0.8), (5.0, 0.5), (10.0, 0.25)];
const LABEL_HALO_WIDTH: f32 = 4.0;
const CONNECTOR_DASH: &str = "4 3";
const SEGMENT_RADIUS: f32 = 4.0;
const ARROW_SIZE: f32 = 10.0;
const ARROW_HIGHLIGHT_SIZE: f32 = 13.0;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&marker_svg("arrow", &theme.line_color, ARROW_SIZE));
    svg.push_str(&marker_svg(
        "arrow-highlight",
        &theme.highlight_line_color,
        ARROW_HIGHLIGHT_SIZE,
    ));
    if layout.highlight_active {
        svg.push_str(&glow_filter_svg(theme));
    }
    svg.push_str("</defs>");

    svg.push_str("<g class=\"edges\">");
    for edge in &layout.edges {
        svg.push_str(&edge_svg(edge, theme, config));
    }
    svg.push_str("</g>");

    svg.push_str("<g class=\"nodes\">");
    for node in &layout.nodes {
        match &node.node {
            TreeNode::Branch(branch) => {
                svg.push_str(&branch_svg(node, &branch.label, theme, config));
            }
            TreeNode::Leaf(leaf) => {
                svg.push_str(&leaf_svg(node, leaf, layout.highlight_active, theme, config));
            }
        }
    }
    svg.push_str("</g>");

    if let Some(input) = &layout.input {
        svg.push_str(&input_svg(input, layout.highlight_active, theme, config));
    }

    svg.push_str("</svg>");
    log::debug!(
        "rendered {} nodes into {} bytes of svg",
        layout.nodes.len(),
        svg.len()
    );
    svg
}

fn marker_svg(id: &str, color: &str, size: f32) -> String {
    format!(
        "<marker id=\"{id}\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerUnits=\"userSpaceOnUse\" markerWidth=\"{size}\" markerHeight=\"{size}\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{color}\"/></marker>"
    )
}

fn glow_filter_svg(theme: &Theme) -> String {
    let mut filter = String::from(
        "<filter id=\"glow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">",
    );
    for (deviation, opacity) in GLOW_LAYERS {
        filter.push_str(&format!(
            "<feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{deviation}\" flood-color=\"{}\" flood-opacity=\"{opacity}\"/>",
            theme.glow_color
        ));
    }
    filter.push_str("</filter>");
    filter
}

fn edge_svg(edge: &EdgeLayout, theme: &Theme, config: &LayoutConfig) -> String {
    let (sx, sy) = edge.start;
    let (tx, ty) = edge.end;
    let my = (sy + ty) / 2.0;
    let (stroke, stroke_width, marker, class) = if edge.highlighted {
        (
            theme.highlight_line_color.as_str(),
            config.edge_highlight_stroke_width,
            "arrow-highlight",
            "edge highlighted",
        )
    } else {
        (
            theme.line_color.as_str(),
            config.edge_stroke_width,
            "arrow",
            "edge",
        )
    };

    let mut out = format!(
        "<g class=\"{class}\" data-source=\"{}\" data-target=\"{}\">",
        escape_xml(&edge.from),
        escape_xml(&edge.to)
    );
    out.push_str(&format!(
        "<path d=\"M {sx:.2} {sy:.2} C {sx:.2} {my:.2}, {tx:.2} {my:.2}, {tx:.2} {ty:.2}\" fill=\"none\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\" marker-end=\"url(#{marker})\"/>"
    ));

    if let Some(label) = edge.kind.display_label() {
        let color = match edge.kind {
            EdgeKind::True => theme.true_color.as_str(),
            EdgeKind::False => theme.false_color.as_str(),
            _ => theme.custom_label_color.as_str(),
        };
        let (x, y) = edge.midpoint();
        // Halo first so the coloured text stays readable over crossing lines.
        out.push_str(&text_svg(
            x,
            y,
            label,
            theme.font_size,
            "none",
            theme,
            &format!(
                "class=\"edge-label-halo\" stroke=\"{}\" stroke-width=\"{LABEL_HALO_WIDTH}\" stroke-linejoin=\"round\"",
                theme.label_halo
            ),
        ));
        out.push_str(&text_svg(
            x,
            y,
            label,
            theme.font_size,
            color,
            theme,
            "class=\"edge-label\" font-weight=\"bold\"",
        ));
    }

    out.push_str("</g>");
    out
}

fn branch_svg(node: &NodeLayout, label: &str, theme: &Theme, config: &LayoutConfig) -> String {
    let top = node.top();
    let half_w = node.width / 2.0;
    let half_h = node.shape_height / 2.0;
    let (fill, stroke, text_color, stroke_width) = if node.highlighted {
        (
            theme.branch_stroke.as_str(),
            theme.branch_fill.as_str(),
            theme.highlight_text.as_str(),
            config.highlight_stroke_width,
        )
    } else {
        (
            theme.branch_fill.as_str(),
            theme.branch_stroke.as_str(),
            theme.branch_text.as_str(),
            config.node_stroke_width,
        )
    };

    let mut out = format!(
        "<g class=\"node branch{}\" data-uid=\"{}\">",
        if node.highlighted { " highlighted" } else { "" },
        escape_xml(node.uid())
    );
    out.push_str(&format!(
        "<polygon points=\"{:.2},{:.2} {:.2},{:.2} {:.2},{:.2} {:.2},{:.2}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\"/>",
        node.x,
        top,
        node.x + half_w,
        top + half_h,
        node.x,
        top + node.shape_height,
        node.x - half_w,
        top + half_h,
    ));
    let shown = truncate_middle(label, node.width - config.label_padding, config.char_width);
    out.push_str(&text_svg(
        node.x,
        top + half_h,
        &shown,
        theme.font_size,
        text_color,
        theme,
        "class=\"branch-label\"",
    ));
    out.push_str("</g>");
    out
}

fn leaf_svg(
    node: &NodeLayout,
    leaf: &LeafNode,
    glow: bool,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let top = node.top();
    let left = node.left();
    let width = node.width;
    let stroke_width = if node.highlighted {
        config.highlight_stroke_width
    } else {
        config.node_stroke_width
    };

    let mut out = format!(
        "<g class=\"node leaf{}\" data-uid=\"{}\">",
        if node.highlighted { " highlighted" } else { "" },
        escape_xml(node.uid())
    );
    out.push_str(&format!(
        "<rect x=\"{left:.2}\" y=\"{top:.2}\" width=\"{width:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
        node.shape_height,
        theme.leaf_fill,
        theme.leaf_stroke,
        r = config.corner_radius,
    ));
    let typ = truncate_middle(&leaf.typ, width - config.label_padding, config.char_width);
    out.push_str(&text_svg(
        node.x,
        top + node.shape_height / 2.0,
        &typ,
        theme.font_size,
        &theme.leaf_text,
        theme,
        "class=\"leaf-type\"",
    ));

    let mut previous_bottom = node.shape_bottom();
    let mut cursor = top + config.node_base_height;

    for (idx, example) in leaf.examples.iter().enumerate() {
        if idx == 0 {
            out.push_str(&dashed_line(
                node.x,
                previous_bottom,
                node.x,
                cursor,
                &theme.example_stroke,
            ));
        }
        out.push_str(&format!(
            "<rect class=\"example\" x=\"{left:.2}\" y=\"{cursor:.2}\" width=\"{width:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            config.example_box_height, theme.example_fill, theme.example_stroke
        ));
        let inner = truncate_middle(
            example,
            width - config.label_padding - 2.0 * config.char_width,
            config.char_width,
        );
        out.push_str(&text_svg(
            node.x,
            cursor + config.example_box_height / 2.0,
            &quoted(&inner),
            theme.font_size,
            &theme.example_text,
            theme,
            "class=\"example-text\"",
        ));
        cursor += config.example_box_height;
        previous_bottom = cursor;
    }

    if let Some(parser) = leaf.parser.as_deref() {
        let box_width = (estimate_width(parser, config.parser_char_width) + config.label_padding)
            .min(width);
        let gap = (config.parser_band_height - config.parser_box_height) / 2.0;
        let box_top = cursor + gap;
        out.push_str(&dashed_line(
            node.x,
            previous_bottom,
            node.x,
            box_top,
            &theme.parser_stroke,
        ));
        out.push_str(&format!(
            "<rect class=\"parser\" x=\"{:.2}\" y=\"{box_top:.2}\" width=\"{box_width:.2}\" height=\"{:.2}\" rx=\"{SEGMENT_RADIUS}\" ry=\"{SEGMENT_RADIUS}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"{CONNECTOR_DASH}\"/>",
            node.x - box_width / 2.0,
            config.parser_box_height,
            theme.parser_stroke
        ));
        let shown = truncate_middle(
            parser,
            box_width - config.label_padding,
            config.parser_char_width,
        );
        out.push_str(&text_svg(
            node.x,
            box_top + config.parser_box_height / 2.0,
            &shown,
            theme.parser_font_size,
            &theme.parser_text,
            theme,
            "class=\"parser-text\"",
        ));
        cursor += config.parser_band_height;
        previous_bottom = box_top + config.parser_box_height;
    }

    if let Some(output) = leaf.output.as_deref() {
        let box_top = cursor + config.output_band_height - config.output_box_height;
        out.push_str(&dashed_line(
            node.x,
            previous_bottom,
            node.x,
            box_top,
            &theme.line_color,
        ));
        out.push_str(&output_svg(
            node,
            &parse_output(output),
            box_top,
            glow,
            theme,
            config,
        ));
    }

    out.push_str("</g>");
    out
}

fn output_svg(
    node: &NodeLayout,
    output: &OutputValue,
    top: f32,
    glow: bool,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let height = config.output_box_height;
    let center_y = top + height / 2.0;
    match output {
        OutputValue::Plain(text) => {
            let shown = truncate_middle(text, node.width - config.label_padding, config.char_width);
            text_svg(
                node.x,
                center_y,
                &shown,
                theme.font_size,
                &theme.output_text,
                theme,
                "class=\"output-plain\"",
            )
        }
        OutputValue::Typed { typ, value } => {
            let OutputSegments {
                typ,
                value,
                type_width,
                value_width,
                paren_width: paren,
            } = output_segments(typ, value, node.width, config);
            let total = type_width + paren + value_width + paren;
            let mut x = node.x - total / 2.0;

            let mut out = String::from("<g class=\"output\"");
            if glow {
                out.push_str(" filter=\"url(#glow)\"");
            }
            out.push('>');

            out.push_str(&segment_rect(x, top, type_width, height, &theme.output_type_fill));
            out.push_str(&text_svg(
                x + type_width / 2.0,
                center_y,
                &typ,
                theme.font_size,
                &theme.output_text,
                theme,
                "class=\"output-type\"",
            ));
            x += type_width;
            out.push_str(&text_svg(
                x + paren / 2.0,
                center_y,
                "(",
                theme.font_size,
                &theme.output_text,
                theme,
                "class=\"output-paren\"",
            ));
            x += paren;
            out.push_str(&segment_rect(x, top, value_width, height, &theme.output_value_fill));
            out.push_str(&text_svg(
                x + value_width / 2.0,
                center_y,
                &value,
                theme.font_size,
                &theme.output_text,
                theme,
                "class=\"output-value\"",
            ));
            x += value_width;
            out.push_str(&text_svg(
                x + paren / 2.0,
                center_y,
                ")",
                theme.font_size,
                &theme.output_text,
                theme,
                "class=\"output-paren\"",
            ));
            out.push_str("</g>");
            out
        }
    }
}

fn input_svg(input: &InputLayout, glow: bool, theme: &Theme, config: &LayoutConfig) -> String {
    let (from, to) = input.connector;
    let mut out = String::from("<g class=\"input\">");
    out.push_str(&dashed_line(from.0, from.1, to.0, to.1, &theme.input_stroke));
    out.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"{}/>",
        input.x - input.width / 2.0,
        input.y,
        input.width,
        input.height,
        theme.input_fill,
        theme.input_stroke,
        if glow { " filter=\"url(#glow)\"" } else { "" },
        r = config.corner_radius,
    ));
    let inner = truncate_middle(
        &input.text,
        input.width - config.label_padding - 2.0 * config.char_width,
        config.char_width,
    );
    out.push_str(&text_svg(
        input.x,
        input.y + input.height / 2.0,
        &quoted(&inner),
        theme.font_size,
        &theme.input_text,
        theme,
        "class=\"input-text\"",
    ));
    out.push_str("</g>");
    out
}

fn segment_rect(x: f32, y: f32, width: f32, height: f32, fill: &str) -> String {
    format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{SEGMENT_RADIUS}\" ry=\"{SEGMENT_RADIUS}\" fill=\"{fill}\"/>"
    )
}

fn dashed_line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str) -> String {
    format!(
        "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{stroke}\" stroke-width=\"1\" stroke-dasharray=\"{CONNECTOR_DASH}\"/>"
    )
}

fn text_svg(
    x: f32,
    y: f32,
    text: &str,
    font_size: f32,
    fill: &str,
    theme: &Theme,
    extra: &str,
) -> String {
    format!(
        "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{font_size}\" fill=\"{fill}\" {extra}>{}</text>",
        escape_xml(&theme.font_family),
        escape_xml(text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

/// Pixel size of the PNG and the scale applied to the drawing: the canvas is
/// fitted inside `render_cfg.width` x `render_cfg.height`, keeping its aspect
/// ratio.
pub fn raster_size(svg_width: f32, svg_height: f32, render_cfg: &RenderConfig) -> (u32, u32, f32) {
    if svg_width <= 0.0 || svg_height <= 0.0 {
        return (1, 1, 1.0);
    }
    let scale = (render_cfg.width / svg_width).min(render_cfg.height / svg_height);
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let width = (svg_width * scale).round().max(1.0) as u32;
    let height = (svg_height * scale).round().max(1.0) as u32;
    (width, height, scale)
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "monospace".to_string();
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size();
    let (width, height, scale) = raster_size(size.width(), size.height(), render_cfg);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
