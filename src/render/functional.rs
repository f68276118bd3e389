//! Single unit symbols: functional and physical.
//!
//! Both variants centre one body on the origin and attach the four rails of
//! the holder around it. The functional variant also draws the contours
//! recorded in the layout outline.

use tracing::debug;

use super::stack::{stack_of_pins, StackStyle};
use super::{package_fields, Metrics, Rect, SymbolDrawing, SymbolGenerator, Unit};
use crate::layout::{
    Holder, LayoutResult, LayoutStrategy, Outline, PhysicalLayout, PinOrder, Side, SingleUnitLayout,
};
use crate::package::Package;

/// Body of a single unit symbol, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CentredBody {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl CentredBody {
    fn of(holder: &Holder<'_>, metrics: &Metrics) -> Self {
        let width = metrics.grid(holder.width());
        let height = metrics.grid(holder.height());
        Self {
            x: -(width / 2),
            y: height / 2,
            width,
            height,
        }
    }

    const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y - self.height)
    }

    /// X where the text fields start: left of the body, or past the north pins.
    fn text_x(&self, holder: &Holder<'_>, metrics: &Metrics) -> i32 {
        if holder.north.is_empty() {
            self.x
        } else {
            self.x + metrics.grid(holder.padding_west() + holder.north.len() + 1)
        }
    }
}

/// Renders the four rails of `holder` around a centred body.
fn centred_unit(holder: &Holder<'_>, metrics: &Metrics, style: StackStyle, title: String) -> Unit {
    let body = CentredBody::of(holder, metrics);
    let pad_north = metrics.grid(holder.padding_north());
    let pad_west = metrics.grid(holder.padding_west());

    let origins = [
        (Side::West, body.x, body.y - pad_north),
        (Side::North, body.x + pad_west, body.y),
        (Side::East, body.x + body.width, body.y - pad_north),
        (Side::South, body.x + pad_west, body.y - body.height),
    ];
    let pins = origins
        .into_iter()
        .flat_map(|(side, x, y)| stack_of_pins(holder.rail(side), side, x, y, metrics, style))
        .collect();

    Unit {
        index: style.unit,
        title,
        body: body.rect(),
        contours: Vec::new(),
        pins,
        texts: Vec::new(),
    }
}

/// Contour rectangles between consecutive outline checkpoints.
fn outline_contours(holder: &Holder<'_>, outline: &Outline, metrics: &Metrics) -> Vec<Rect> {
    if outline.is_empty() {
        return Vec::new();
    }
    let body = CentredBody::of(holder, metrics);
    let y0 = body.y - metrics.grid(holder.padding_north());
    let right = body.x + body.width;
    let west_right = body.x + metrics.grid(holder.padding_west());
    let east_left = right - metrics.grid(holder.padding_east());

    let spans = [
        (&outline.through, body.x, right),
        (&outline.west, body.x, west_right),
        (&outline.east, east_left, right),
    ];

    let mut contours = Vec::new();
    for (checkpoints, x1, x2) in spans {
        for pair in checkpoints.windows(2) {
            let y1 = y0 - metrics.grid(pair[0]) - metrics.spacing;
            let y2 = y0 - metrics.grid(pair[1]) - metrics.spacing;
            contours.push(Rect::new(x1, y1, x2, y2));
        }
    }
    contours
}

/// Whole package in one unit, pins grouped by function.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionalGenerator {
    metrics: Metrics,
}

impl FunctionalGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new(metrics: Metrics) -> Self {
        Self { metrics }
    }
}

impl SymbolGenerator for FunctionalGenerator {
    fn suffix(&self) -> &'static str {
        ""
    }

    fn title(&self, package: &Package) -> String {
        format!("{} -- Functional, single unit symbol", package.name)
    }

    fn generate(&self, package: &Package) -> LayoutResult<SymbolDrawing> {
        let mut layout = SingleUnitLayout::new(package);
        let holder = layout.apply()?;
        let metrics = &self.metrics;

        let mut unit = centred_unit(&holder, metrics, StackStyle::default(), self.title(package));
        unit.contours = outline_contours(&holder, layout.outline(), metrics);

        let body = CentredBody::of(&holder, metrics);
        let drawing = SymbolDrawing {
            name: self.symbol_name(package),
            title: self.title(package),
            aliases: self.aliases(package),
            fields: package_fields(package, body.text_x(&holder, metrics), body.y),
            units: vec![unit],
            warnings: layout.diagnostics().iter().map(ToString::to_string).collect(),
        };

        debug!(
            symbol = %drawing.name,
            pins = drawing.pins().count(),
            contours = drawing.units[0].contours.len(),
            "Rendered functional symbol"
        );
        Ok(drawing)
    }
}

/// Whole package in one unit, pins in physical order.
///
/// The socket flavour uses passive pins sorted by designator full name.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhysicalGenerator {
    metrics: Metrics,
    socket: bool,
}

impl PhysicalGenerator {
    /// Creates the generator for the component itself.
    #[must_use]
    pub const fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            socket: false,
        }
    }

    /// Creates the generator for a socket of the component.
    #[must_use]
    pub const fn socket(metrics: Metrics) -> Self {
        Self {
            metrics,
            socket: true,
        }
    }

    const fn order(&self) -> PinOrder {
        if self.socket {
            PinOrder::FullName
        } else {
            PinOrder::Rank
        }
    }
}

impl SymbolGenerator for PhysicalGenerator {
    fn suffix(&self) -> &'static str {
        if self.socket { "_socket" } else { "_phy" }
    }

    fn title(&self, package: &Package) -> String {
        if self.socket {
            format!("{} -- Physical socket, single unit symbol", package.name)
        } else {
            format!("{} -- Physical, single unit symbol", package.name)
        }
    }

    fn generate(&self, package: &Package) -> LayoutResult<SymbolDrawing> {
        let holder = PhysicalLayout::new(package, self.order()).apply()?;
        let metrics = &self.metrics;
        let style = StackStyle {
            unit: 0,
            force_passive: self.socket,
        };

        let unit = centred_unit(&holder, metrics, style, self.title(package));
        let body = CentredBody::of(&holder, metrics);

        Ok(SymbolDrawing {
            name: self.symbol_name(package),
            title: self.title(package),
            aliases: self.aliases(package),
            fields: package_fields(package, body.text_x(&holder, metrics), body.y),
            units: vec![unit],
            warnings: Vec::new(),
        })
    }
}
