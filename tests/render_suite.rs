use std::path::Path;

use decision_tree_svg::{
    Layout, LayoutConfig, RenderError, Theme, build_hierarchy, compute_layout, parse_payload,
    render, render_svg,
};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.starts_with("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.ends_with("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<g").count(),
        svg.matches("</g>").count(),
        "{fixture}: unbalanced groups"
    );
}

fn render_fixture(name: &str) -> (Layout, String) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let payload = parse_payload(&input).expect("parse failed");
    let hierarchy = build_hierarchy(&payload).expect("hierarchy failed");
    let theme = Theme::modern();
    let layout_config = LayoutConfig::default();
    let layout = compute_layout(&hierarchy, &payload, &layout_config);
    let svg = render_svg(&layout, &theme, &layout_config);
    (layout, svg)
}

fn attr(tag: &str, name: &str) -> Option<f32> {
    let key = format!(" {name}=\"");
    let start = tag.find(&key)? + key.len();
    let end = start + tag[start..].find('"')?;
    tag[start..end].parse().ok()
}

/// Every positioned rectangle lies inside the canvas.
fn assert_rects_inside(svg: &str, width: f32, height: f32, fixture: &str) {
    for rect in svg.split("<rect").skip(1) {
        let tag = &rect[..rect.find('>').unwrap()];
        let (Some(x), Some(y), Some(w), Some(h)) = (
            attr(tag, "x"),
            attr(tag, "y"),
            attr(tag, "width"),
            attr(tag, "height"),
        ) else {
            continue;
        };
        assert!(x >= -1e-2 && x + w <= width + 1e-2, "{fixture}: rect {x}+{w} outside {width}");
        assert!(y >= -1e-2 && y + h <= height + 1e-2, "{fixture}: rect {y}+{h} outside {height}");
    }
}

fn x_of(layout: &Layout, uid: &str) -> f32 {
    layout.node(uid).unwrap_or_else(|| panic!("missing {uid}")).x
}

#[test]
fn render_all_fixtures() {
    let config = LayoutConfig::default();
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "scenario.json",
        "false_chain.json",
        "multi_branch.json",
        "no_highlight.json",
        "examples_parser.json",
        "wide_output.json",
    ];

    for name in candidates {
        let (layout, svg) = render_fixture(name);
        assert_valid_svg(&svg, name);
        assert_rects_inside(&svg, layout.width, layout.height, name);
        assert!(
            svg.contains(&format!(
                "width=\"{:.2}\" height=\"{:.2}\"",
                layout.width, layout.height
            )),
            "{name}: canvas size not reflected"
        );
        for node in &layout.nodes {
            assert!(node.left() >= config.margin - 1e-3, "{name}: {} clipped", node.uid());
            assert!(
                node.right() <= layout.width - config.margin + 1e-3,
                "{name}: {} clipped",
                node.uid()
            );
            assert!(
                node.top() + node.height <= layout.height - config.margin + 1e-3,
                "{name}: {} clipped",
                node.uid()
            );
        }
        for a in &layout.nodes {
            for b in &layout.nodes {
                if a.id != b.id && a.depth == b.depth {
                    assert!(
                        a.right() <= b.left() + 1e-3 || b.right() <= a.left() + 1e-3,
                        "{name}: {} overlaps {}",
                        a.uid(),
                        b.uid()
                    );
                }
            }
        }
    }
}

#[test]
fn scenario_matches_expected_drawing() {
    let theme = Theme::modern();
    let (layout, svg) = render_fixture("scenario.json");
    assert_eq!(layout.nodes.len(), 3);
    assert!(x_of(&layout, "l2") < x_of(&layout, "l1"));
    assert!(svg.contains("<g class=\"edge highlighted\" data-source=\"b1\" data-target=\"l1\">"));
    assert!(svg.contains("<g class=\"edge\" data-source=\"b1\" data-target=\"l2\">"));
    assert!(svg.contains(&format!("fill=\"{}\" class=\"edge-label\"", theme.true_color)));
    assert!(svg.contains(&format!("fill=\"{}\" class=\"edge-label\"", theme.false_color)));
    assert!(svg.contains("class=\"output-type\">float</text>"));
    assert!(svg.contains("class=\"output-value\">3.14</text>"));
    assert!(svg.contains("class=\"input-text\">&quot;3.14&quot;</text>"));
    assert!(svg.contains("<filter id=\"glow\""));
}

#[test]
fn false_chain_descends_to_the_left() {
    let (layout, svg) = render_fixture("false_chain.json");
    assert_eq!(layout.nodes.len(), 9);
    for (false_child, true_child) in [
        ("is_int", "bool"),
        ("is_float", "int"),
        ("is_date", "float"),
        ("text", "date"),
    ] {
        assert!(x_of(&layout, false_child) < x_of(&layout, true_child));
    }
    let depth = layout.nodes.iter().map(|n| n.depth).max().unwrap();
    assert_eq!(depth, 4);
    assert_eq!(svg.matches("class=\"edge highlighted\"").count(), 2);
    assert!(layout.edge("is_bool", "is_int").unwrap().highlighted);
    assert!(layout.edge("is_int", "int").unwrap().highlighted);
    assert!(!layout.edge("is_bool", "bool").unwrap().highlighted);
    assert!(svg.contains("class=\"output-value\">42</text>"));
}

#[test]
fn custom_labels_keep_edge_order() {
    let theme = Theme::modern();
    let (layout, svg) = render_fixture("multi_branch.json");
    assert!(x_of(&layout, "num") < x_of(&layout, "temporal"));
    assert!(x_of(&layout, "temporal") < x_of(&layout, "other"));
    assert!(x_of(&layout, "date") < x_of(&layout, "datetime"));
    assert!(svg.contains(">Numeric</text>"));
    assert!(svg.contains(">Temporal</text>"));
    assert!(svg.contains(&format!(
        "fill=\"{}\" class=\"edge-label\"",
        theme.custom_label_color
    )));
    let unlabeled = layout.edge("kind", "other").unwrap();
    assert!(unlabeled.kind.display_label().is_none());
    assert!(layout.input.is_none());
    assert!(!svg.contains("class=\"input\""));
}

#[test]
fn no_highlight_means_no_glow() {
    let (layout, svg) = render_fixture("no_highlight.json");
    assert!(!layout.highlight_active);
    assert!(!svg.contains("<filter"));
    assert!(!svg.contains("url(#glow)"));
    assert!(!svg.contains("edge highlighted"));
    assert!(svg.contains("class=\"output-plain\""));
    assert!(svg.contains("class=\"output-type\">NoneType</text>"));
    assert!(svg.contains("class=\"input-text\">&quot;&quot;</text>"));
}

#[test]
fn leaf_stack_truncates_and_escapes() {
    let (layout, svg) = render_fixture("examples_parser.json");
    let leaf = layout.node("uuid").unwrap();
    let config = LayoutConfig::default();
    assert_eq!(leaf.width, config.node_base_width * 2.0);
    assert_eq!(svg.matches("class=\"example\"").count(), 3);
    assert!(svg.contains("&quot;&lt;tag&gt; &amp; &apos;quotes&apos;&quot;"));
    assert!(svg.contains("class=\"parser-text\">uuid.UUID.fro"));
    assert!(!svg.contains("123e4567-e89b-12d3-a456-426614174000)"));
    assert!(svg.contains("class=\"output-type\">UUID</text>"));
    assert!(svg.matches('…').count() >= 2);
}

#[test]
fn fatal_errors_are_reported_by_kind() {
    assert!(matches!(
        render("not json"),
        Err(RenderError::MalformedPayload(_))
    ));
    assert!(matches!(
        render(r#"{"branches":[],"leaves":[],"edges":[]}"#),
        Err(RenderError::MalformedPayload(_))
    ));
    assert!(matches!(
        render(r#"{"branches":[],"leaves":[],"edges":[],"highlights":[]}"#),
        Err(RenderError::EmptyInput)
    ));
    assert!(matches!(
        render(
            r#"{"branches":[{"uid":"a","name":"a?"},{"uid":"b","name":"b?"}],"leaves":[],
                "edges":[{"source":"a","target":"b"},{"source":"b","target":"a"}],"highlights":[]}"#
        ),
        Err(RenderError::MultipleOrNoRoot { count: 0 })
    ));
}

#[test]
fn wide_outputs_widen_their_leaves() {
    let config = LayoutConfig::default();
    let (layout, svg) = render_fixture("wide_output.json");
    for uid in ["datetime", "decimal"] {
        assert_eq!(layout.node(uid).unwrap().width, config.node_base_width * 2.0);
    }
    assert!(x_of(&layout, "decimal") < x_of(&layout, "datetime"));
    assert!(svg.contains("class=\"output-type\">datetime.datetime</text>"));
    assert_eq!(svg.matches("<g class=\"output\" filter=\"url(#glow)\">").count(), 2);
}
