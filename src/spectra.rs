//! Point-indexed spectral wave datasets.

use crate::error::ValidationError;
use crate::geometry::Point2;
use crate::grid::fgr;
use chrono::NaiveDateTime;

/// Parametric wave time series at a single site.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveSeries {
    times: Vec<NaiveDateTime>,
    hs: Vec<fgr>,
    tp: Vec<fgr>,
    dp: Vec<fgr>,
}

impl WaveSeries {
    /// Creates a time series of significant wave height, peak period and
    /// peak direction. All sequences must have the same length.
    pub fn new(
        times: Vec<NaiveDateTime>,
        hs: Vec<fgr>,
        tp: Vec<fgr>,
        dp: Vec<fgr>,
    ) -> Result<Self, ValidationError> {
        let len = times.len();
        if hs.len() != len || tp.len() != len || dp.len() != len {
            return Err(ValidationError::InconsistentSeriesLengths);
        }
        Ok(Self { times, hs, tp, dp })
    }

    /// Returns the number of time steps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series holds no time steps.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Whether any wave height value is missing.
    pub fn has_gaps(&self) -> bool {
        self.hs.iter().any(|value| !value.is_finite())
    }

    /// Iterates over (time, hs, tp, dp) records.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, fgr, fgr, fgr)> + '_ {
        self.times
            .iter()
            .zip(&self.hs)
            .zip(&self.tp)
            .zip(&self.dp)
            .map(|(((&time, &hs), &tp), &dp)| (time, hs, tp, dp))
    }
}

/// A spectral output site with a geographic location and optionally a
/// parametric wave time series.
#[derive(Clone, Debug)]
pub struct SpectralSite {
    id: String,
    lon: fgr,
    lat: fgr,
    boundary_point: Option<Point2<fgr>>,
    series: Option<WaveSeries>,
}

impl SpectralSite {
    /// Creates a site at the given longitude and latitude.
    pub fn new<S: Into<String>>(id: S, lon: fgr, lat: fgr) -> Self {
        Self {
            id: id.into(),
            lon,
            lat,
            boundary_point: None,
            series: None,
        }
    }

    /// Attaches a parametric wave time series to the site.
    pub fn with_series(mut self, series: WaveSeries) -> Self {
        self.series = Some(series);
        self
    }

    /// Returns the site identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the original site location.
    pub fn location(&self) -> Point2<fgr> {
        Point2::new(self.lon, self.lat)
    }

    /// Returns the wave time series, if any.
    pub fn series(&self) -> Option<&WaveSeries> {
        self.series.as_ref()
    }

    /// Returns the location projected onto a grid boundary, set when the
    /// site was selected by [`Grid2::nearby_spectra`](crate::grid::Grid2).
    pub fn boundary_point(&self) -> Option<Point2<fgr>> {
        self.boundary_point
    }

    /// Records the projection of the site location onto a grid boundary.
    pub fn projected_onto(mut self, point: Point2<fgr>) -> Self {
        self.boundary_point = Some(point);
        self
    }
}

/// An ordered collection of spectral sites, as produced by the catalog layer.
#[derive(Clone, Debug, Default)]
pub struct SpectralSites {
    sites: Vec<SpectralSite>,
}

impl SpectralSites {
    /// Creates a collection from the given sites, preserving their order.
    pub fn from_sites(sites: Vec<SpectralSite>) -> Self {
        Self { sites }
    }

    /// Returns the number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the collection holds no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Iterates over the sites in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &SpectralSite> {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use chrono::NaiveDate;

    fn time(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 2, 21)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn series_construction_requires_equal_lengths() {
        let result = WaveSeries::new(vec![time(0), time(1)], vec![1.0], vec![8.0, 9.0], vec![
            270.0, 280.0,
        ]);
        assert!(matches!(
            result,
            Err(ValidationError::InconsistentSeriesLengths)
        ));
    }

    #[test]
    fn series_gap_detection_uses_wave_height() {
        let series = WaveSeries::new(
            vec![time(0), time(1)],
            vec![1.0, fgr::NAN],
            vec![8.0, 9.0],
            vec![270.0, 280.0],
        )
        .unwrap();
        assert!(series.has_gaps());
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn site_projection_keeps_original_location() {
        let site = SpectralSite::new("site_0", 1.5, 2.5).projected_onto(Point2::new(1.0, 2.0));
        assert_eq!(site.location(), Point2::new(1.5, 2.5));
        assert_eq!(site.boundary_point(), Some(Point2::new(1.0, 2.0)));
    }
}
