mod common;

use std::io::Write;

use camino::Utf8Path;
use celestsp::bodies::name_resolver::NameResolver;
use celestsp::bodies::target_file::read_target_file;
use celestsp::celestsp_errors::CelestspError;
use celestsp::constants::Degree;
use celestsp::planner::start::StartStrategy;
use celestsp::planner::{ObservationPlanner, PlannerParams};
use celestsp::report::write_csv;
use celestsp::transform::MeanHorizontal;
use common::tokyo_context;

/// Resolver for the tests: knows nothing.
struct Offline;

impl NameResolver for Offline {
    fn resolve(&self, name: &str) -> Result<(Degree, Degree), CelestspError> {
        Err(CelestspError::NameResolution(name.to_string()))
    }
}

const TARGETS: &str = "\
# Winter hexagon
Sirius     | 101.287155 | -16.716116
Procyon    | 114.825498 |   5.224988
Pollux     | 116.328958 |  28.026199
Capella    |  79.172328 |  45.997991
Aldebaran  |  68.980163 |  16.509302
Rigel      |  78.634467 |  -8.201638

Mystery Object
";

fn target_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TARGETS.as_bytes()).unwrap();
    file
}

#[test]
fn test_plan_from_target_file_and_export_csv() {
    let file = target_file();
    let path = Utf8Path::from_path(file.path()).unwrap();

    let catalog = read_target_file(path, &Offline).unwrap();
    assert_eq!(catalog.len(), 6);
    assert_eq!(catalog.index_of("Mystery Object"), None);
    assert_eq!(catalog.index_of("Capella"), Some(3));

    let plan = ObservationPlanner::new(MeanHorizontal, PlannerParams::default())
        .plan(&catalog, &tokyo_context(), &StartStrategy::Override("Rigel".into()))
        .unwrap();
    assert_eq!(plan.tour().start(), 5);

    let dir = tempfile::tempdir().unwrap();
    let csv_path = Utf8Path::from_path(dir.path()).unwrap().join("plan.csv");
    write_csv(&plan, &csv_path).unwrap();

    let content = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[1].starts_with("1,Rigel,"));
}

#[test]
fn test_only_unresolved_names_is_fatal() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"# nothing usable\nFoo\nBar\n").unwrap();
    let path = Utf8Path::from_path(file.path()).unwrap();

    assert!(matches!(
        read_target_file(path, &Offline),
        Err(CelestspError::InvalidInput(_))
    ));
}
