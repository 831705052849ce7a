//! Helper functions shared by the profile repair and splitting algorithms, mostly concerned with
//! grouping samples into stations of (approximately) equal x.

use crate::geom2::Point2;

/// Returns the strictly positive gaps between consecutive x values of points already sorted by x,
/// themselves sorted in ascending order.
pub fn positive_x_gaps(sorted: &[Point2]) -> Vec<f64> {
    let mut gaps = sorted
        .windows(2)
        .map(|w| w[1].x - w[0].x)
        .filter(|dx| *dx > 0.0)
        .collect::<Vec<_>>();
    gaps.sort_by(f64::total_cmp);
    gaps
}

/// Returns the median of the positive x gaps of points already sorted by x. For an even count the
/// upper of the two middle values is used. Returns `None` if there are no positive gaps.
pub fn median_x_gap(sorted: &[Point2]) -> Option<f64> {
    let gaps = positive_x_gaps(sorted);
    gaps.get(gaps.len() / 2).copied()
}

/// Groups points already sorted by x into stations. A point joins the current station if its x
/// is within `tol` of the last point added to the station, so a station can drift along x when
/// samples are densely spaced.
///
/// # Arguments
///
/// * `sorted`: the points, sorted by ascending x
/// * `tol`: the largest x step allowed between consecutive members of a station
///
/// returns: Vec<Vec<OPoint<f64, Const<2>>, Global>, Global>
pub fn group_stations(sorted: &[Point2], tol: f64) -> Vec<Vec<Point2>> {
    let mut groups: Vec<Vec<Point2>> = Vec::new();
    for p in sorted {
        let joins = groups
            .last()
            .and_then(|g| g.last())
            .is_some_and(|l| (p.x - l.x).abs() <= tol);

        if let (true, Some(current)) = (joins, groups.last_mut()) {
            current.push(*p);
        } else {
            groups.push(vec![*p]);
        }
    }
    groups
}

/// Groups points already sorted by x into stations that cannot drift. A point joins the current
/// station only if its x is within `tol` of the first member of that station.
pub fn group_stations_anchored(sorted: &[Point2], tol: f64) -> Vec<Vec<Point2>> {
    let mut groups: Vec<Vec<Point2>> = Vec::new();
    for p in sorted {
        match groups.last_mut() {
            Some(current) if (p.x - current[0].x).abs() <= tol => current.push(*p),
            _ => groups.push(vec![*p]),
        }
    }
    groups
}

/// Returns the points of a station with the smallest and largest y values, as (lowest, highest).
/// Ties resolve to the first occurrence for the lowest and the last occurrence for the highest.
pub fn station_extremes(station: &[Point2]) -> Option<(Point2, Point2)> {
    let low = station.iter().min_by(|a, b| a.y.total_cmp(&b.y))?;
    let high = station.iter().max_by(|a, b| a.y.total_cmp(&b.y))?;
    Some((*low, *high))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::points_from;

    #[test]
    fn gaps_skip_repeated_x() {
        let sorted = points_from(&[(0.0, 0.0), (0.5, 0.1), (0.5, -0.1), (0.75, 0.0), (1.0, 0.0)]);
        assert_eq!(positive_x_gaps(&sorted), vec![0.25, 0.25, 0.5]);
        assert_eq!(median_x_gap(&sorted), Some(0.25));
    }

    #[test]
    fn median_of_nothing() {
        let sorted = points_from(&[(0.5, 0.1), (0.5, -0.1)]);
        assert_eq!(median_x_gap(&sorted), None);
    }

    #[test]
    fn stations_chain_small_steps() {
        let sorted = points_from(&[
            (0.0, 0.0),
            (0.49, 0.1),
            (0.5, -0.1),
            (0.51, 0.0),
            (1.0, 0.0),
        ]);
        let groups = group_stations(&sorted, 0.015);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].len(), 3);
    }

    #[test]
    fn anchored_stations_do_not_chain() {
        let sorted = points_from(&[
            (0.0, 0.0),
            (0.49, 0.1),
            (0.5, -0.1),
            (0.51, 0.0),
            (1.0, 0.0),
        ]);
        let groups = group_stations_anchored(&sorted, 0.015);
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[1], points_from(&[(0.49, 0.1), (0.5, -0.1)]));
        assert_eq!(groups[2], points_from(&[(0.51, 0.0)]));
    }

    #[test]
    fn extremes_of_station() {
        let station = points_from(&[(0.5, 0.1), (0.5, -0.2), (0.5, 0.0)]);
        let (low, high) = station_extremes(&station).unwrap();
        assert_eq!(low, Point2::new(0.5, -0.2));
        assert_eq!(high, Point2::new(0.5, 0.1));
        assert!(station_extremes(&[]).is_none());
    }
}
