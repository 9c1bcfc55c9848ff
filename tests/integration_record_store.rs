//! Record store integration tests
//!
//! Exercises the public store API end to end against real files.

use eyre::Result;
use pipestore::store::{lock_path, temp_path};
use pipestore::{LenientStore, LineEnding, Record, RecordStore, StoreOptions};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn lf_store(temp: &TempDir, name: &str) -> RecordStore {
    let options = StoreOptions {
        line_ending: LineEnding::Lf,
        ..StoreOptions::default()
    };
    RecordStore::with_options(temp.path().join(name), options)
}

fn fields(rows: &[&[&str]]) -> Vec<Record> {
    rows.iter().map(|row| Record::from_fields(row.iter().copied())).collect()
}

/// Integration test: the full append/read/find/update/delete walk-through
#[test]
fn test_basic_scenario() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "scenario.txt");

    store.append("a|b|c")?;
    store.append("d|e|f")?;

    assert_eq!(store.read_all()?, fields(&[&["a", "b", "c"], &["d", "e", "f"]]));
    assert_eq!(store.count_elements()?, 2);
    assert_eq!(store.read_last_line()?, Some("d|e|f".to_string()));
    assert_eq!(store.find_by_value("e")?, Some("d|e|f".to_string()));

    store.update("e", "E")?;
    assert_eq!(store.read_all()?, fields(&[&["a", "b", "c"], &["d", "E", "f"]]));

    store.delete("a")?;
    assert_eq!(store.count_elements()?, 1);

    Ok(())
}

/// Integration test: count tracks appends since the last clear
#[test]
fn test_count_follows_appends_and_clear() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "count.txt");

    for n in 1..=10 {
        store.append(&format!("{n}|value"))?;
        assert_eq!(store.count_elements()?, n);
    }

    store.clear()?;
    assert_eq!(store.count_elements()?, 0);
    assert_eq!(store.read_last_line()?, None);

    store.append("after|clear")?;
    assert_eq!(store.count_elements()?, 1);

    Ok(())
}

/// Integration test: update leaves non-matching lines byte-identical
#[test]
fn test_update_preserves_other_lines() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "update.txt");

    let lines = ["1|Ana|Madrid", "2|Luis|  spaced  |", "3|Ana Maria|Lima", "4|||"];
    for line in lines {
        store.append(line)?;
    }

    assert_eq!(store.update("Ana", "Eva")?, 2);

    let content = fs::read_to_string(store.path())?;
    assert_eq!(content, "1|Eva|Madrid\n2|Luis|  spaced  |\n3|Eva Maria|Lima\n4|||\n");
    Ok(())
}

/// Integration test: delete keeps survivors in their original order
#[test]
fn test_delete_preserves_survivor_order() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "delete.txt");

    for i in 0..20 {
        let tag = if i % 3 == 0 { "drop" } else { "keep" };
        store.append(&format!("{i}|{tag}"))?;
    }

    let removed = store.delete("drop")?;
    assert_eq!(removed, 7);

    let ids: Vec<String> = store
        .read_all()?
        .into_iter()
        .map(|r| r.get(0).unwrap_or_default().to_string())
        .collect();
    let expected: Vec<String> = (0..20).filter(|i| i % 3 != 0).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
    Ok(())
}

/// Integration test: find_by_value wants a whole field, not a substring
#[test]
fn test_find_requires_exact_field() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "find.txt");

    store.append("10|ana@example.com")?;
    store.append("11|ana")?;

    assert_eq!(store.find_by_value("ana")?, Some("11|ana".to_string()));
    assert_eq!(store.find_by_value("example")?, None);
    Ok(())
}

/// Integration test: rewrites never leave the temp file behind
#[test]
fn test_atomic_rewrite_cleans_up() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "atomic.txt");

    store.append("a|1")?;
    store.append("b|2")?;
    store.update("1", "one")?;
    store.delete("b")?;
    store.clear()?;

    assert!(!temp_path(store.path()).exists());
    assert!(lock_path(store.path()).exists());
    Ok(())
}

/// Integration test: a file written by another tool is readable
#[test]
fn test_reads_foreign_file() -> Result<()> {
    let temp = TempDir::new()?;
    let store = lf_store(&temp, "foreign.txt");
    fs::write(store.path(), "x|y\r\nz\r\n\r\nlast|line")?;

    assert_eq!(store.count_elements()?, 4);
    assert_eq!(store.read_all()?, fields(&[&["x", "y"], &["z"], &[""], &["last", "line"]]));
    assert_eq!(store.read_last_line()?, Some("last|line".to_string()));
    Ok(())
}

/// Integration test: concurrent appends all land as whole lines
#[test]
fn test_concurrent_appends_are_serialized() -> Result<()> {
    let temp = TempDir::new()?;
    let store = Arc::new(lf_store(&temp, "concurrent.txt"));

    let workers = 8;
    let per_worker = 25;
    let handles: Vec<_> = (0..workers)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..per_worker {
                    store.append(&format!("{w}|{i}|payload")).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = store.read_all()?;
    assert_eq!(records.len(), workers * per_worker);
    assert!(records.iter().all(|r| r.len() == 3 && r.get(2) == Some("payload")));
    Ok(())
}

/// Integration test: concurrent updates under the lock lose nothing
#[test]
fn test_concurrent_updates_do_not_lose_lines() -> Result<()> {
    let temp = TempDir::new()?;
    let store = Arc::new(lf_store(&temp, "updates.txt"));
    for i in 0..4 {
        store.append(&format!("key{i}|old"))?;
    }

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.update(&format!("key{i}|old"), &format!("key{i}|new")).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = store.read_all()?;
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| r.get(1) == Some("new")));
    Ok(())
}

/// Integration test: the lenient front end never surfaces errors
#[test]
fn test_lenient_store_over_strict_store() {
    let temp = TempDir::new().unwrap();
    let lenient = LenientStore::from(lf_store(&temp, "lenient.txt"));

    assert_eq!(lenient.count_elements(), 0);
    assert!(lenient.read_all().is_empty());
    assert!(lenient.inner().count_elements().unwrap_err().is_not_found());

    assert!(lenient.append("a|b"));
    assert_eq!(lenient.count_elements(), 1);
}
