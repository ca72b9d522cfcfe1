//! End-to-end tests for `worldsynth generate`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use synth_core::EntityType;
use synth_output::{GenerateArgs, KeyPolicyChoice};
use tempfile::TempDir;
use worldsynth::run_generate;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn args(output_dir: &Path, schema: &str) -> GenerateArgs {
    GenerateArgs {
        schema: fixture(schema),
        catalog: Some(fixture("catalog.yaml")),
        output_dir: output_dir.to_path_buf(),
        event_count: 300,
        min_records: 5,
        max_records: 12,
        seed: Some(42),
        key_policy: KeyPolicyChoice::Counter,
        max_draws_per_event: 1000,
        max_total_draws: None,
        window_start: "2021-01-01T00:00:00".to_string(),
        window_end: "2023-09-14T23:59:59".to_string(),
        print_summary: true,
        audit_logs: false,
        audit_base_count: 200,
    }
}

/// Split the entity dump into (header, field lines) blocks.
fn entity_blocks(content: &str) -> Vec<(String, Vec<String>)> {
    content
        .split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let mut lines = block.lines();
            let header = lines.next().unwrap_or_default().to_string();
            (header, lines.map(str::to_string).collect())
        })
        .collect()
}

/// Split the event dump into blocks of `[Key]: value` pairs.
fn event_blocks(content: &str) -> Vec<Vec<(String, String)>> {
    content
        .split("=====\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            block
                .lines()
                .map(|line| {
                    let (key, value) = line.split_once("]: ").unwrap();
                    (key.trim_start_matches('[').to_string(), value.to_string())
                })
                .collect()
        })
        .collect()
}

fn value<'a>(block: &'a [(String, String)], key: &str) -> Option<&'a str> {
    block
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_generate_writes_both_files() {
    let dir = TempDir::new().unwrap();
    let summary = run_generate(args(dir.path(), "entities.yaml")).unwrap();

    assert!(summary.entities_path.exists());
    assert!(summary.events_path.exists());
    assert!(!dir.path().join("generated_entities.txt.tmp").exists());
    assert!(!dir.path().join("generated_events.txt.tmp").exists());

    // 8 definitions with 5..=12 records each
    assert!((40..=96).contains(&summary.records_written));
    let entities = std::fs::read_to_string(&summary.entities_path).unwrap();
    assert_eq!(entity_blocks(&entities).len() as u64, summary.records_written);

    // all eight pools are populated, so no attempt is dropped
    assert_eq!(summary.sampler.emitted, 300);
    assert_eq!(summary.sampler.dropped_empty_pool, 0);
    assert_eq!(summary.events_written, 300);
}

#[test]
fn test_entity_dump_blocks() {
    let dir = TempDir::new().unwrap();
    let summary = run_generate(args(dir.path(), "entities.yaml")).unwrap();
    let content = std::fs::read_to_string(&summary.entities_path).unwrap();

    let headers: HashSet<String> = entity_blocks(&content)
        .into_iter()
        .map(|(header, lines)| {
            let last = lines.len() - 1;
            for (i, line) in lines.iter().enumerate() {
                assert!(line.starts_with('"'), "bad field line {line}");
                assert!(line.contains("\"="), "bad field line {line}");
                assert_eq!(line.ends_with(','), i < last, "comma rule broken: {line}");
            }
            header
        })
        .collect();

    for name in [
        "Players",
        "WorldEvents",
        "Items",
        "Enemies",
        "Teams",
        "Merchants",
        "Guilds",
        "Dialogues",
    ] {
        assert!(headers.contains(&format!("--- {name} ---")), "missing {name}");
    }
}

#[test]
fn test_player_names_come_from_catalog() {
    let dir = TempDir::new().unwrap();
    let summary = run_generate(args(dir.path(), "entities.yaml")).unwrap();
    let content = std::fs::read_to_string(&summary.entities_path).unwrap();

    let mut ids = HashSet::new();
    for (_, lines) in entity_blocks(&content)
        .into_iter()
        .filter(|(header, _)| header == "--- Players ---")
    {
        assert_eq!(lines[0].split_once('=').unwrap().0, "\"id\"");
        let id = lines[0]
            .trim_end_matches(',')
            .split_once('=')
            .unwrap()
            .1
            .to_string();
        assert!(ids.insert(id), "duplicate player id");

        let name = lines[1].trim_end_matches(',');
        assert!(
            name == "\"name\"=\"Ada\"" || name == "\"name\"=\"Bo\"",
            "unexpected {name}"
        );
    }
    assert!(ids.len() >= 5);
}

#[test]
fn test_event_dump_blocks() {
    let dir = TempDir::new().unwrap();
    let summary = run_generate(args(dir.path(), "entities.yaml")).unwrap();
    let content = std::fs::read_to_string(&summary.events_path).unwrap();

    let blocks = event_blocks(&content);
    assert_eq!(blocks.len() as u64, summary.events_written);
    assert!(!blocks.is_empty());

    let mut with_additional = 0;
    for block in &blocks {
        let label = value(block, "Event Type").unwrap();
        let (a, b) = label.split_once("_with_").unwrap();
        let a: EntityType = a.parse().unwrap();
        let b: EntityType = b.parse().unwrap();
        assert_ne!(a, b);
        // quest is a relation-only tag and never drawn
        assert_ne!(b, EntityType::Quest);

        let verb = value(block, "Value").unwrap();
        assert!(synth_events::verbs(a, b).contains(&verb));

        let timestamp = value(block, "Timestamp").unwrap();
        assert!(timestamp.as_bytes()[10] == b'T' && timestamp.len() == 19);
        assert!(("2021".."2024").contains(&&timestamp[..4]));

        assert!(value(block, "Entity1").unwrap().starts_with("{'id': "));
        assert!(value(block, "Entity2").unwrap().starts_with("{'id': "));

        match (
            value(block, "Additional Entity Type"),
            value(block, "Additional Entity"),
        ) {
            (Some(t), Some(_)) => {
                with_additional += 1;
                let expected = match verb {
                    "Talked" => "dialogue",
                    "Bought From" | "Sold To" => "item",
                    other => panic!("verb {other} has no additional entity"),
                };
                assert_eq!(t, expected);
            }
            (None, None) => {
                // dialogue and item pools are populated, so these always carry one
                if label == "player_with_npc" {
                    assert!(!matches!(verb, "Talked" | "Bought From" | "Sold To"));
                }
            }
            _ => panic!("additional entity lines must come in pairs"),
        }
    }
    assert!(with_additional > 0);
}

#[test]
fn test_same_seed_same_output() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let a = run_generate(args(first.path(), "entities.yaml")).unwrap();
    let b = run_generate(args(second.path(), "entities.yaml")).unwrap();

    assert_eq!(
        std::fs::read(&a.entities_path).unwrap(),
        std::fs::read(&b.entities_path).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.events_path).unwrap(),
        std::fs::read(&b.events_path).unwrap()
    );
}

#[test]
fn test_uuid_key_policy() {
    let dir = TempDir::new().unwrap();
    let mut args = args(dir.path(), "entities.yaml");
    args.key_policy = KeyPolicyChoice::Uuid;
    args.event_count = 10;

    let summary = run_generate(args).unwrap();
    let content = std::fs::read_to_string(&summary.entities_path).unwrap();

    for (_, lines) in entity_blocks(&content) {
        let id = lines[0].trim_end_matches(',').split_once('=').unwrap().1;
        // "xxxxxxxx-xxxx-4xxx-...", quoted
        assert_eq!(id.len(), 38, "not a uuid: {id}");
        assert_eq!(id.as_bytes()[15], b'4');
    }
}

#[test]
fn test_zero_events() {
    let dir = TempDir::new().unwrap();
    let mut args = args(dir.path(), "entities.yaml");
    args.event_count = 0;

    let summary = run_generate(args).unwrap();

    assert_eq!(summary.events_written, 0);
    assert_eq!(std::fs::read_to_string(&summary.events_path).unwrap(), "");
    assert!(summary.records_written > 0);
}

#[test]
fn test_unknown_value_source_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let err = run_generate(args(&out, "entities_unknown_source.json")).unwrap_err();
    let message = format!("{err:#}");

    assert!(message.contains("last_names"), "{message}");
    assert!(message.contains("surname"), "{message}");
    assert!(!out.exists());
}

#[test]
fn test_missing_entity_types_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    let err = run_generate(args(&out, "entities_missing_types.yaml")).unwrap_err();
    let message = format!("{err:#}");

    assert!(message.contains("missing in the entity definitions"), "{message}");
    assert!(message.contains("dialogue"), "{message}");
    assert!(!out.exists());
}

#[test]
fn test_missing_catalog_file_fails() {
    let dir = TempDir::new().unwrap();
    let mut args = args(dir.path(), "entities.yaml");
    args.catalog = Some(fixture("no_such_catalog.yaml"));

    let err = run_generate(args).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to load value catalog"));
    assert!(!dir.path().join("generated_entities.txt").exists());
}

#[test]
fn test_sampling_exhaustion_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut args = args(&out, "entities.yaml");
    args.max_draws_per_event = 1;
    args.event_count = 5000;

    // one draw per event cannot find a related pair 5000 times in a row
    let err = run_generate(args).unwrap_err();
    assert!(format!("{err:#}").contains("no related entity types"));
    assert!(!out.exists());
}

#[test]
fn test_failed_event_dump_leaves_no_entity_dump() {
    let dir = TempDir::new().unwrap();
    // a directory in the way of the event dump's temp file
    std::fs::create_dir(dir.path().join("generated_events.txt.tmp")).unwrap();

    let err = run_generate(args(dir.path(), "entities.yaml")).unwrap_err();

    assert!(format!("{err:#}").contains("generated_events.txt"));
    assert!(!dir.path().join("generated_entities.txt").exists());
    assert!(!dir.path().join("generated_entities.txt.tmp").exists());
    assert!(!dir.path().join("generated_events.txt").exists());
}

#[test]
fn test_audit_logs() {
    let dir = TempDir::new().unwrap();
    let mut args = args(dir.path(), "entities.yaml");
    args.audit_logs = true;
    args.audit_base_count = 20;

    let summary = run_generate(args).unwrap();
    let path = summary.audit_path.unwrap();
    assert_eq!(path, dir.path().join("generated_audit_logs.json"));
    assert!(!dir.path().join("generated_audit_logs.json.tmp").exists());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["player_logs"].as_array().unwrap().len(), 20);
    assert_eq!(value["guild_logs"].as_array().unwrap().len(), 10);
    assert_eq!(value["quest_progress"].as_array().unwrap().len(), 40);
    assert_eq!(summary.audit_entries_written, 200);
}

#[test]
fn test_audit_logs_leave_dumps_unchanged() {
    let plain = TempDir::new().unwrap();
    let audited = TempDir::new().unwrap();
    let mut with_audit = args(audited.path(), "entities.yaml");
    with_audit.audit_logs = true;

    let a = run_generate(args(plain.path(), "entities.yaml")).unwrap();
    let b = run_generate(with_audit).unwrap();

    assert!(a.audit_path.is_none());
    assert!(!plain.path().join("generated_audit_logs.json").exists());
    assert_eq!(
        std::fs::read(&a.entities_path).unwrap(),
        std::fs::read(&b.entities_path).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.events_path).unwrap(),
        std::fs::read(&b.events_path).unwrap()
    );
}
