#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtutorlog::core::state::AppState;
use std::env;
use std::fs;
use std::path::PathBuf;

/// The binary, with HOME pointed at a private directory so a real user
/// config never leaks into the tests.
pub fn rtl() -> Command {
    let home = env::temp_dir().join("rtutorlog_test_home");
    fs::create_dir_all(&home).ok();

    let mut cmd = cargo_bin_cmd!("rtutorlog");
    cmd.env("HOME", &home);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtutorlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init(db_path: &str) {
    rtl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Collections as stored in the database file.
pub fn stored_state(db_path: &str) -> AppState {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    rtutorlog::db::initialize::init_db(&conn).expect("init db");
    rtutorlog::db::storage::load_state(&conn).expect("load state")
}

/// Add student Amy (Math, 10:00-12:00, rate 150) and return her id.
pub fn add_amy(db_path: &str) -> i64 {
    rtl()
        .args([
            "--db", db_path, "student", "add", "--name", "Amy", "--grade", "G5", "--course",
            "Math", "--in", "10:00", "--out", "12:00", "--rate", "150",
        ])
        .assert()
        .success();

    stored_state(db_path)
        .students
        .iter()
        .find(|s| s.name == "Amy")
        .map(|s| s.id)
        .expect("Amy stored")
}

/// Add class "Group A" (Physics, 14:00-16:00, size 4, rate 300) and return its id.
pub fn add_group_a(db_path: &str) -> i64 {
    rtl()
        .args([
            "--db", db_path, "class", "add", "--name", "Group A", "--course", "Physics", "--in",
            "14:00", "--out", "16:00", "--size", "4", "--rate", "300",
        ])
        .assert()
        .success();

    stored_state(db_path)
        .classes
        .iter()
        .find(|c| c.name == "Group A")
        .map(|c| c.id)
        .expect("Group A stored")
}
