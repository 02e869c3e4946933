//! # Plan report
//!
//! Two outputs for an [`ObservationPlan`]:
//!
//! - [`PlanDisplay`] – a [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/)
//!   table of the bodies in **visit order**, built lazily from a borrowed plan and
//!   rendered through [`std::fmt::Display`];
//! - [`write_csv`] / [`write_csv_to`] – the same rows as CSV, with the visit rank.
//!
//! Columns
//! -----------------
//! `#` (visit rank, 1-based), `Name`, `RA [deg]`, `Dec [deg]`, `Alt [deg]`,
//! `Az [deg]`, `Time to set [h]` (`inf` when the body never sets or is already down),
//! `Observable`.
use std::fmt;
use std::io;

use camino::Utf8Path;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use serde::Serialize;

use crate::celestsp_errors::CelestspError;
use crate::planner::ObservationPlan;

/// Table adaptor for an [`ObservationPlan`].
///
/// ```rust,ignore
/// println!("{}", PlanDisplay::new(&plan).with_precision(3));
/// ```
pub struct PlanDisplay<'a> {
    plan: &'a ObservationPlan,
    /// Fixed-point digits for angles and hours (default = 2).
    precision: usize,
}

impl<'a> PlanDisplay<'a> {
    pub fn new(plan: &'a ObservationPlan) -> Self {
        Self { plan, precision: 2 }
    }

    /// Set the number of fractional digits for every numeric column.
    pub fn with_precision(mut self, p: usize) -> Self {
        self.precision = p;
        self
    }
}

impl fmt::Display for PlanDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.precision;
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Name"),
            Cell::new("RA [deg]"),
            Cell::new("Dec [deg]"),
            Cell::new("Alt [deg]"),
            Cell::new("Az [deg]"),
            Cell::new("Time to set [h]"),
            Cell::new("Observable"),
        ]);

        for (rank, (body, state)) in self.plan.visits().enumerate() {
            table.add_row(Row::from(vec![
                Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                Cell::new(body.name()),
                Cell::new(format!("{:.dp$}", body.ra())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.dp$}", body.dec())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.dp$}", state.altitude())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.dp$}", state.azimuth())).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.dp$}", state.time_to_set()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(if state.observable() { "yes" } else { "no" }),
            ]));
        }

        write!(f, "{table}")
    }
}

/// One CSV record.
#[derive(Debug, Serialize)]
struct PlanRecord<'a> {
    rank: usize,
    name: &'a str,
    ra_deg: f64,
    dec_deg: f64,
    altitude_deg: f64,
    azimuth_deg: f64,
    /// `inf` when no crossing was sampled.
    time_to_set_h: f64,
    observable: bool,
}

/// Write the plan as CSV to any writer, header included, rows in visit order.
pub fn write_csv_to<W: io::Write>(plan: &ObservationPlan, writer: W) -> Result<(), CelestspError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (rank, (body, state)) in plan.visits().enumerate() {
        csv_writer.serialize(PlanRecord {
            rank: rank + 1,
            name: body.name(),
            ra_deg: body.ra(),
            dec_deg: body.dec(),
            altitude_deg: state.altitude(),
            azimuth_deg: state.azimuth(),
            time_to_set_h: state.time_to_set().hours().unwrap_or(f64::INFINITY),
            observable: state.observable(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the plan as CSV at `path`, replacing any existing file.
///
/// Errors
/// ----------
/// * [`CelestspError::CsvError`] or [`CelestspError::IoError`] on write failure.
pub fn write_csv(plan: &ObservationPlan, path: &Utf8Path) -> Result<(), CelestspError> {
    let file = std::fs::File::create(path)?;
    write_csv_to(plan, io::BufWriter::new(file))
}

#[cfg(test)]
mod report_test {
    use super::*;
    use crate::bodies::BodyCatalog;
    use crate::observers::{ObservationContext, ObserverSite};
    use crate::planner::start::StartStrategy;
    use crate::planner::{ObservationPlanner, PlannerParams};
    use crate::unit_test_global::{ScriptedSky, Track};
    use hifitime::{Epoch, TimeScale};

    fn plan() -> ObservationPlan {
        let epoch = Epoch::from_mjd_in_time_scale(60310.5, TimeScale::UTC);
        let sky = ScriptedSky::new(epoch)
            .with("Mizar", Track::linear(40.0, 1.0, 20.0))
            .with("Alcor", Track::linear(10.0, -4.0, 300.0))
            .with("Rigel", Track::linear(-12.0, 3.0, 120.0));
        let catalog =
            BodyCatalog::new(["Mizar", "Alcor", "Rigel"].iter().map(|n| sky.body(n)).collect())
                .unwrap();
        let ctx = ObservationContext::new(ObserverSite::new(35.0, 139.0, 0.0).unwrap(), epoch);
        ObservationPlanner::new(&sky, PlannerParams::default())
            .plan(&catalog, &ctx, &StartStrategy::SoonestSetting)
            .unwrap()
    }

    #[test]
    fn test_table_lists_every_body_in_tour_order() {
        let plan = plan();
        assert_eq!(plan.tour().order(), &[1, 2, 0]);

        let rendered = PlanDisplay::new(&plan).to_string();
        for header in ["Name", "Alt [deg]", "Time to set [h]", "Observable"] {
            assert!(rendered.contains(header), "missing header {header}");
        }

        let alcor = rendered.find("Alcor").unwrap();
        let rigel = rendered.find("Rigel").unwrap();
        let mizar = rendered.find("Mizar").unwrap();
        assert!(alcor < rigel && rigel < mizar);
        assert!(rendered.contains("inf"));
        assert!(rendered.contains("-12.00"));
    }

    #[test]
    fn test_table_precision() {
        let plan = plan();
        let rendered = PlanDisplay::new(&plan).with_precision(4).to_string();
        assert!(rendered.contains("40.0000"));
    }

    #[test]
    fn test_csv_rows() {
        let plan = plan();
        let mut buffer = Vec::new();
        write_csv_to(&plan, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "rank,name,ra_deg,dec_deg,altitude_deg,azimuth_deg,time_to_set_h,observable"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,Alcor,"));
        assert!(lines[1].ends_with(",true"));
        assert!(lines[2].starts_with("2,Rigel,"));
        assert!(lines[2].ends_with(",inf,false"));
        assert!(lines[3].starts_with("3,Mizar,"));
    }
}
