// tests/sourcing.rs
mod common;

use common::{fixture_source, output, scripted, tmp_dir};
use nba_viz::aspects::AspectCatalog;
use nba_viz::config::options::{AppOptions, ExportOptions};
use nba_viz::error::VizError;
use nba_viz::progress::RecordProgress;
use nba_viz::query::{Query, QueryCollector};
use nba_viz::runner;
use nba_viz::sourcing::{Dataset, Sourced, Sourcing};
use nba_viz::teams::TeamDirectory;

fn source_data(query: &Query, progress: &mut RecordProgress) -> Result<Sourced, VizError> {
    let source = fixture_source();
    let (aspects, dir) = (AspectCatalog::new(), TeamDirectory::new());
    Sourcing::new(&aspects, &dir, &source).get_data(query, progress)
}

#[test]
fn points_end_to_end_up_to_the_file_name() {
    let source = fixture_source();
    let (aspects, dir) = (AspectCatalog::new(), TeamDirectory::new());
    let mut console = scripted("pts\n2022\nMIA, BOS\n");
    let mut query = QueryCollector::new(&aspects, &dir, &source).collect(&mut console).unwrap();

    let mut progress = RecordProgress::default();
    let sourced = Sourcing::new(&aspects, &dir, &source).get_data(&query, &mut progress).unwrap();
    query.retain_teams(&sourced.teams);

    let Dataset::Season(frame) = &sourced.data else { panic!("expected season totals") };
    assert_eq!(frame.len(), 2);
    assert_eq!(frame.names(), &["PTS"]);
    assert_eq!(frame.index(), &["MIA", "BOS"]);
    assert_eq!(frame.value("MIA", "PTS"), Some(9025.0));
    assert_eq!(frame.value("BOS", "PTS"), Some(9057.0));
    assert_eq!(query.teams, vec!["MIA", "BOS"]);
    assert_eq!(progress.done, vec!["MIA", "BOS"]);

    assert_eq!(ExportOptions::file_name(&aspects, &query), "plot-points-MIA_BOS-2021_2022.png");
}

#[test]
fn season_rows_follow_query_order() {
    let mut progress = RecordProgress::default();
    let sourced = source_data(&Query::new("a/t", &["BOS", "MIA"], 2022), &mut progress).unwrap();
    let frame = sourced.data.frame();
    assert_eq!(frame.index(), &["BOS", "MIA"]);
    assert_eq!(frame.names(), &["AST", "TOV"]);
    assert_eq!(frame.value("BOS", "TOV"), Some(1149.0));
}

#[test]
fn team_with_missing_value_is_dropped() {
    let mut progress = RecordProgress::default();
    let sourced = source_data(&Query::new("drb", &["MIA", "DAL"], 2022), &mut progress).unwrap();
    assert_eq!(sourced.teams, vec!["MIA"]);
    assert_eq!(sourced.data.frame().index(), &["MIA"]);
    assert!(
        progress
            .lines
            .iter()
            .any(|l| l.contains("Dallas Mavericks (DAL) is missing a value for DRB"))
    );
}

#[test]
fn team_without_a_row_is_dropped() {
    let mut progress = RecordProgress::default();
    let sourced = source_data(&Query::new("acc", &["LAL", "BOS"], 2022), &mut progress).unwrap();
    assert_eq!(sourced.teams, vec!["BOS"]);
    assert_eq!(sourced.data.frame().value("BOS", "3P%"), Some(0.356));
}

#[test]
fn margins_keep_teams_at_three_quarters_coverage() {
    let mut progress = RecordProgress::default();
    let sourced = source_data(&Query::new("mar", &["MIA", "BOS", "DAL"], 2022), &mut progress).unwrap();

    assert_eq!(sourced.teams, vec!["MIA", "BOS"]);
    let Dataset::Margins(frame) = &sourced.data else { panic!("expected margins") };
    assert_eq!(frame.index(), &["1", "2", "3", "4"]);
    assert_eq!(frame.names(), &["MIA_margin", "MIA_smoothed", "BOS_margin", "BOS_smoothed"]);
    assert_eq!(
        frame.numeric("BOS_margin").unwrap(),
        vec![Some(-3.0), Some(24.0), None, Some(-16.0)]
    );
    let smoothed = frame.numeric("BOS_smoothed").unwrap();
    assert!(smoothed[2].is_none());
    assert!(smoothed.iter().flatten().all(|v| v.abs() < 24.0));

    assert!(progress.lines.iter().any(|l| l.contains("DAL") && l.contains("50%")));
    assert_eq!(progress.done, vec!["MIA", "BOS", "DAL"]);
}

#[test]
fn unreachable_game_log_drops_the_team() {
    let mut progress = RecordProgress::default();
    let sourced = source_data(&Query::new("mar", &["LAL", "MIA"], 2022), &mut progress).unwrap();
    assert_eq!(sourced.teams, vec!["MIA"]);
    assert!(progress.lines.iter().any(|l| l.contains("LAL")));
}

#[test]
fn nothing_left_is_no_data() {
    let mut progress = RecordProgress::default();
    let err = source_data(&Query::new("mar", &["DAL"], 2022), &mut progress).unwrap_err();
    assert!(matches!(err, VizError::NoDataAvailable));
}

#[test]
fn runner_writes_no_image_without_data() {
    let out_dir = tmp_dir("no_data");
    let mut opts = AppOptions::default();
    opts.export.out_dir = out_dir.clone();

    let source = fixture_source();
    let mut console = scripted("mar\n2022\nDAL\n");
    let mut progress = RecordProgress::default();
    let err = runner::run(&opts, &source, &mut console, &mut progress).unwrap_err();

    assert!(matches!(err, VizError::NoDataAvailable));
    assert_eq!(err.to_string(), "No data available for visualization. Terminating program.");
    assert!(progress.finished);
    assert_eq!(std::fs::read_dir(&out_dir).unwrap().count(), 0);
    assert!(output(console).contains("Visualizing margins data of Dallas Mavericks (DAL)"));
}
