//! The boundary to the host's curve creation. The host fits splines and adds lines; everything
//! about which points go into which curve is decided here.

use crate::airfoil::SplitProfile;
use crate::geom2::Point2;
use crate::pipeline::PlacedProfile;
use tracing::debug;

/// Something which can turn ordered point sequences into curves, such as a sketch in a CAD host.
/// Points are in the local coordinates of the plane the sink draws on.
pub trait CurveSink {
    /// The host's handle to a created curve
    type Curve;

    /// Fit a spline through the points, in the order given
    fn fit_spline(&mut self, points: &[Point2]) -> Self::Curve;

    /// Add a straight line between two points
    fn add_line(&mut self, a: &Point2, b: &Point2) -> Self::Curve;
}

/// The curves created for one profile
#[derive(Debug, Clone)]
pub struct DrawnProfile<C> {
    pub lower: C,
    pub upper: C,
    pub leading_edge: Option<C>,
    pub trailing_edge: Option<C>,
}

fn draw_split<S: CurveSink>(sink: &mut S, split: &SplitProfile) -> DrawnProfile<S::Curve> {
    let lower = sink.fit_spline(&split.lower);
    let upper = sink.fit_spline(&split.upper);
    let leading_edge = split
        .leading_edge_bridge()
        .map(|(a, b)| sink.add_line(&a, &b));
    let trailing_edge = split
        .trailing_edge_bridge()
        .map(|(a, b)| sink.add_line(&a, &b));

    DrawnProfile {
        lower,
        upper,
        leading_edge,
        trailing_edge,
    }
}

/// Draw a placed profile into a sink: a spline for each surface, then closing lines at the
/// leading and trailing edges where the two surfaces do not meet. The sink is expected to draw on
/// the profile's `plane`.
pub fn draw_placed<S: CurveSink>(sink: &mut S, placed: &PlacedProfile) -> DrawnProfile<S::Curve> {
    let drawn = draw_split(sink, &placed.split);
    debug!(
        name = placed.name,
        leading_edge_bridge = drawn.leading_edge.is_some(),
        trailing_edge_bridge = drawn.trailing_edge.is_some(),
        "drew profile"
    );
    drawn
}
