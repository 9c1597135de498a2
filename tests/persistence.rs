//! Round trips of the selector table through its persisted form

use physics_ids::{
    selectors::{self, NAMES},
    Column, Error, Float, IdValue, Inputs, SelectorTable, Year,
};

use serde_json::Value;

use std::fs;

#[test]
fn build_and_persist_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("ids.json");

    let built = SelectorTable::build_and_persist(&path).unwrap();
    let loaded = SelectorTable::load(&path).unwrap();
    assert_eq!(built, loaded);
    assert_eq!(loaded, SelectorTable::standard());

    let mut names = loaded.names().collect::<Vec<_>>();
    names.sort_unstable();
    let mut expected = NAMES.to_vec();
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[test]
fn persisting_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.json");
    fs::write(&path, "stale contents which are not even JSON").unwrap();

    SelectorTable::build_and_persist(&path).unwrap();
    SelectorTable::build_and_persist(&path).unwrap();
    assert_eq!(SelectorTable::load(&path).unwrap(), SelectorTable::standard());
}

#[test]
fn artifact_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.json");
    SelectorTable::standard().save(&path).unwrap();

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["format_version"], 1);
    assert!(json["created"].is_string());
    let selectors = json["selectors"].as_object().unwrap();
    assert_eq!(selectors.len(), 11);
    assert_eq!(selectors["isHEMJet"]["object"], "hem_jet");
    assert_eq!(
        selectors["isLoosePhoton"]["cuts"]["2016"]["id"]["encoding"],
        "ordinal"
    );
    assert_eq!(
        selectors["isLoosePhoton"]["cuts"]["2017"]["id"]["encoding"],
        "bitmask"
    );
}

/// Rewrite a persisted table through a JSON transformation
fn tamper(path: &std::path::Path, edit: impl FnOnce(&mut Value)) {
    let mut json: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    edit(&mut json);
    fs::write(path, serde_json::to_string(&json).unwrap()).unwrap();
}

#[test]
fn incomplete_tables_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.json");

    SelectorTable::standard().save(&path).unwrap();
    tamper(&path, |json| {
        json["selectors"].as_object_mut().unwrap().remove("isSoftMuon");
    });
    assert!(matches!(
        SelectorTable::load(&path),
        Err(Error::MissingSelector("isSoftMuon"))
    ));

    SelectorTable::standard().save(&path).unwrap();
    tamper(&path, |json| {
        let selectors = json["selectors"].as_object_mut().unwrap();
        let loose = selectors["isLooseMuon"].clone();
        selectors.insert("isVeryLooseMuon".into(), loose);
    });
    assert!(matches!(
        SelectorTable::load(&path),
        Err(Error::UnknownSelector(name)) if name == "isVeryLooseMuon"
    ));

    SelectorTable::standard().save(&path).unwrap();
    tamper(&path, |json| json["format_version"] = 99.into());
    assert!(matches!(SelectorTable::load(&path), Err(Error::FormatVersion(99))));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        SelectorTable::load(dir.path().join("nothing.json")),
        Err(Error::Io { .. })
    ));
}

#[test]
fn loaded_table_reproduces_predicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.json");
    SelectorTable::build_and_persist(&path).unwrap();
    let table = SelectorTable::load(&path).unwrap();

    let pt = Column::<Float>::jagged(vec![vec![10.0, 10.0001, 45.0], vec![], vec![35.0]]);
    let eta = Column::<Float>::jagged(vec![vec![0.5, 0.5, 2.0], vec![], vec![-1.52]]);
    let dxy = Column::<Float>::jagged(vec![vec![0.0, 0.0, 0.01], vec![], vec![0.0]]);
    let dz = dxy.clone();
    let id = Column::<IdValue>::jagged(vec![vec![2, 2, 4], vec![], vec![4]]);
    let inputs = Inputs::new()
        .with("pt", pt.clone())
        .with("eta", eta.clone())
        .with("dxy", dxy.clone())
        .with("dz", dz.clone())
        .with("id", id.clone());

    for year in Year::ALL {
        let by_name = table
            .evaluate(selectors::IS_LOOSE_ELECTRON, &inputs, Some(year.tag()))
            .unwrap();
        let direct = selectors::is_loose_electron(&pt, &eta, &dxy, &dz, &id, year).unwrap();
        assert_eq!(by_name, direct);
        assert_eq!(by_name.values(), &[false, true, true, false]);

        let by_name = table
            .evaluate(selectors::IS_TIGHT_ELECTRON, &inputs, Some(year.tag()))
            .unwrap();
        let direct = selectors::is_tight_electron(&pt, &eta, &dxy, &dz, &id, year).unwrap();
        assert_eq!(by_name, direct);
        assert_eq!(by_name.values(), &[false, false, true, false]);
    }
}
