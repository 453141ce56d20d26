//! Bounding box and translation into a margined canvas.

use crate::config::LayoutConfig;

/// A footprint centered on `(x, y)` in layout coordinates.
#[derive(Debug, Clone, Copy)]
pub struct NodeBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Horizontal extent of the input header box, centered over the root.
#[derive(Debug, Clone, Copy)]
pub struct InputBand {
    pub center_x: f32,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFrame {
    pub bounds: Bounds,
    /// Added to every layout coordinate to reach canvas coordinates.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Height reserved above the tree for the input box (0 without one).
    pub band: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasFrame {
    pub fn apply(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (x + self.offset_x, y + self.offset_y)
    }
}

pub fn bounds(boxes: &[NodeBox]) -> Bounds {
    let mut bounds = Bounds {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_y: f32::INFINITY,
        max_y: f32::NEG_INFINITY,
    };
    for b in boxes {
        bounds.min_x = bounds.min_x.min(b.x - b.width / 2.0);
        bounds.max_x = bounds.max_x.max(b.x + b.width / 2.0);
        bounds.min_y = bounds.min_y.min(b.y - b.height / 2.0);
        bounds.max_y = bounds.max_y.max(b.y + b.height / 2.0);
    }
    if boxes.is_empty() {
        bounds = Bounds {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        };
    }
    bounds
}

pub fn normalize(boxes: &[NodeBox], input: Option<InputBand>, config: &LayoutConfig) -> CanvasFrame {
    let mut bounds = bounds(boxes);
    let band = match input {
        Some(input) => {
            bounds.min_x = bounds.min_x.min(input.center_x - input.width / 2.0);
            bounds.max_x = bounds.max_x.max(input.center_x + input.width / 2.0);
            config.input_band_height
        }
        None => 0.0,
    };
    let margin = config.margin;
    CanvasFrame {
        bounds,
        offset_x: margin - bounds.min_x,
        offset_y: margin + band - bounds.min_y,
        band,
        width: bounds.width() + margin * 2.0,
        height: bounds.height() + margin * 2.0 + band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxes() -> Vec<NodeBox> {
        vec![
            NodeBox {
                x: 0.0,
                y: 0.0,
                width: 140.0,
                height: 56.0,
            },
            NodeBox {
                x: -100.0,
                y: 120.0,
                width: 160.0,
                height: 48.0,
            },
            NodeBox {
                x: 100.0,
                y: 120.0,
                width: 140.0,
                height: 140.0,
            },
        ]
    }

    #[test]
    fn computes_bounds_over_box_edges() {
        let b = bounds(&boxes());
        assert_eq!(b.min_x, -180.0);
        assert_eq!(b.max_x, 170.0);
        assert_eq!(b.min_y, -28.0);
        assert_eq!(b.max_y, 190.0);
    }

    #[test]
    fn moves_min_corner_to_margin() {
        let config = LayoutConfig::default();
        let frame = normalize(&boxes(), None, &config);
        assert_eq!(frame.apply((-180.0, -28.0)), (config.margin, config.margin));
        assert_eq!(frame.width, 350.0 + 2.0 * config.margin);
        assert_eq!(frame.height, 218.0 + 2.0 * config.margin);
        assert_eq!(frame.band, 0.0);
    }

    #[test]
    fn input_reserves_a_band_above_the_root() {
        let config = LayoutConfig::default();
        let plain = normalize(&boxes(), None, &config);
        let frame = normalize(
            &boxes(),
            Some(InputBand {
                center_x: 0.0,
                width: 140.0,
            }),
            &config,
        );
        assert_eq!(frame.band, config.input_band_height);
        assert_eq!(frame.height, plain.height + config.input_band_height);
        assert_eq!(frame.offset_y, plain.offset_y + config.input_band_height);
        assert_eq!(frame.width, plain.width);
    }

    #[test]
    fn wide_input_widens_the_canvas() {
        let config = LayoutConfig::default();
        let single = [NodeBox {
            x: 0.0,
            y: 0.0,
            width: 140.0,
            height: 48.0,
        }];
        let frame = normalize(
            &single,
            Some(InputBand {
                center_x: 0.0,
                width: 280.0,
            }),
            &config,
        );
        assert_eq!(frame.width, 280.0 + 2.0 * config.margin);
        assert_eq!(frame.apply((-140.0, 0.0)).0, config.margin);
    }
}
