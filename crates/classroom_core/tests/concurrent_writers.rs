use classroom_core::db::open_db;
use classroom_core::{Class, ClassRepository, SqliteClassStore};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Barrier;
use std::thread;

fn count(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}

fn shared_db(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("classes.sqlite3");
    drop(open_db(&path).unwrap());
    path
}

#[test]
fn racing_inserts_of_same_class_leave_exactly_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = shared_db(dir.path());
    let barrier = Barrier::new(2);
    let (db_path, barrier) = (path.as_path(), &barrier);

    let results: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = ["t-alice", "t-bob"]
            .into_iter()
            .map(|teacher_id| {
                scope.spawn(move || {
                    let mut conn = open_db(db_path).unwrap();
                    let mut store = SqliteClassStore::try_new(&mut conn).unwrap();
                    let class = Class::new("c-shared", "Shared", "Science", "Physics");
                    barrier.wait();
                    store.insert_class(teacher_id, &class).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(results.iter().filter(|ok| **ok).count(), 1);

    let conn = open_db(&path).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM t_class;"), 1);
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM t_teacher_class;"), 1);
}

#[test]
fn racing_deletes_from_two_owners_both_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let path = shared_db(dir.path());
    {
        let mut conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO t_teacher_class (class_id, teacher_id, is_valid)
             VALUES ('c-shared', 't-bob', 1);",
            [],
        )
        .unwrap();
        let mut store = SqliteClassStore::try_new(&mut conn).unwrap();
        store
            .insert_class("t-alice", &Class::new("c-shared", "Shared", "Science", "Physics"))
            .unwrap();
    }
    let barrier = Barrier::new(2);
    let (db_path, barrier) = (path.as_path(), &barrier);

    thread::scope(|scope| {
        for teacher_id in ["t-alice", "t-bob"] {
            scope.spawn(move || {
                let mut conn = open_db(db_path).unwrap();
                let mut store = SqliteClassStore::try_new(&mut conn).unwrap();
                barrier.wait();
                store.delete_class(teacher_id, "c-shared").unwrap();
            });
        }
    });

    let mut conn = open_db(&path).unwrap();
    assert_eq!(count(&conn, "SELECT COUNT(*) FROM t_class;"), 0);
    assert_eq!(
        count(&conn, "SELECT COUNT(*) FROM t_teacher_class WHERE is_valid = 0;"),
        2
    );
    let store = SqliteClassStore::try_new(&mut conn).unwrap();
    assert!(!store.check_teacher_class("t-alice", "c-shared").unwrap());
    assert!(!store.check_teacher_class("t-bob", "c-shared").unwrap());
}
