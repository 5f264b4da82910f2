use chrono::NaiveDate;
use timeline_engine::persistence::PersistenceError;
use timeline_engine::{
    GraphError, JsonFileStore, ProjectError, ProjectStore, load_project_from_csv,
    load_project_from_json, sample_project, save_project_to_csv, save_project_to_json,
};

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

#[test]
fn json_round_trip_preserves_the_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    let project = sample_project(anchor());

    save_project_to_json(&project, &path).unwrap();
    let loaded = load_project_from_json(&path).unwrap();
    assert_eq!(loaded, project);
}

#[test]
fn csv_round_trip_preserves_the_project() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.csv");
    let project = sample_project(anchor());

    save_project_to_csv(&project, &path).unwrap();
    let loaded = load_project_from_csv(&path).unwrap();
    assert_eq!(loaded, project);
}

#[test]
fn store_loads_none_before_the_first_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("store.json"));
    assert!(store.load_project().unwrap().is_none());

    let project = sample_project(anchor());
    store.save_project(&project).unwrap();
    assert_eq!(store.load_project().unwrap(), Some(project));
}

#[test]
fn json_dates_are_iso_8601_strings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.json");
    save_project_to_json(&sample_project(anchor()), &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"2026-03-02\""), "start date on the wire: {raw}");
}

#[test]
fn loading_a_cyclic_project_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cyclic.json");
    let raw = r#"{
        "metadata": {
            "name": "Broken",
            "description": "",
            "start_date": "2026-01-01",
            "end_date": "2026-12-31",
            "status": "Planning"
        },
        "tasks": [
            {
                "id": "x", "name": "X",
                "start": "2026-01-05", "end": "2026-01-09",
                "progress": 0, "priority": "Medium", "status": "NotStarted",
                "dependencies": ["y"], "color": ""
            },
            {
                "id": "y", "name": "Y",
                "start": "2026-01-05", "end": "2026-01-09",
                "progress": 0, "priority": "Medium", "status": "NotStarted",
                "dependencies": ["x"], "color": ""
            }
        ]
    }"#;
    std::fs::write(&path, raw).unwrap();

    match load_project_from_json(&path) {
        Err(PersistenceError::Project(ProjectError::Graph(GraphError::Cycle { task_ids }))) => {
            assert!(task_ids.contains(&"x".to_string()));
            assert!(task_ids.contains(&"y".to_string()));
        }
        other => panic!("expected cycle rejection, got {other:?}"),
    }
}

#[test]
fn csv_without_metadata_row_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("headerless.csv");
    std::fs::write(
        &path,
        "id,name,start,end,progress,priority,status,dependencies,parent,assignee,color,description,milestone,metadata_json,resources_json,milestones_json\n\
         a,A,2026-01-05,2026-01-09,0,medium,not_started,,,,,,,,,\n",
    )
    .unwrap();

    match load_project_from_csv(&path) {
        Err(PersistenceError::InvalidData(msg)) => assert!(msg.contains("__metadata__")),
        other => panic!("expected InvalidData, got {other:?}"),
    }
}
