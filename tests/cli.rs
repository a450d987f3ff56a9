//! End-to-end tests of the `folio` binary against a site in a temp dir.

use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const CATALOGUE: &str = r#"[
  {"id": "fe-1", "title": "Dashboard", "type": "Frontend", "date": "2023-05-10",
   "tags": ["react", "charts"], "difficulty": "Hard"},
  {"id": "ux-1", "title": "Onboarding", "type": "UX Design", "date": "2024-02-01",
   "tags": ["research", "mobile"]},
  {"id": "fe-2", "title": "checkout", "type": "Frontend", "date": "2024-08-20",
   "tags": ["react", "payments"],
   "gallery": ["https://img.example/1.png", "https://img.example/2.png", "https://img.example/3.png"]},
  {"id": "ux-2", "title": "Banking App", "type": "UX Design", "date": "not a date",
   "tags": ["mobile", "fintech"]},
  {"id": "fe-3", "title": "Landing Page", "type": "Frontend", "date": "2022-11-30",
   "tags": ["css"]}
]"#;

// ===========================================================================
// Helpers
// ===========================================================================

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("projects.json"), CATALOGUE).unwrap();
    tmp
}

fn command(site: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.arg("--site")
        .arg(site)
        .arg("--state")
        .arg(site.join(".state"))
        .args(args)
        .env_remove("RUST_LOG");
    cmd
}

fn folio(site: &Path, args: &[&str]) -> Output {
    command(site, args).output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn lines(out: &Output) -> Vec<String> {
    stdout(out).lines().map(str::to_string).collect()
}

/// Run the gallery browser with `input` on stdin.
fn gallery(site: &Path, id: &str, touch: bool, input: &str) -> Output {
    let mut args = vec!["gallery", id];
    if touch {
        args.push("--touch");
    }
    let mut child = command(site, &args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn catalogue_titles(site: &Path) -> Vec<String> {
    let json = fs::read_to_string(site.join("projects.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

// ===========================================================================
// Browsing
// ===========================================================================

#[test]
fn list_defaults_to_frontend_newest_first() {
    let site = site();
    let out = folio(site.path(), &["list"]);
    assert!(out.status.success());
    let titles: Vec<String> = lines(&out)
        .into_iter()
        .filter(|l| l.starts_with('0'))
        .collect();
    assert_eq!(
        titles,
        vec!["001 checkout", "002 Dashboard", "003 Landing Page"]
    );
    assert_eq!(lines(&out)[0], "Frontend (3 projects)");
}

#[test]
fn list_filters_by_tag_and_sorts_by_title() {
    let site = site();
    let out = folio(
        site.path(),
        &["list", "--tag", "react", "--sort", "title-desc"],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Frontend (2 projects)"));
    assert!(text.contains("001 Dashboard"));
    assert!(text.contains("002 checkout"));
    assert!(!text.contains("Landing Page"));
}

#[test]
fn list_search_is_case_insensitive_over_tags() {
    let site = site();
    let out = folio(
        site.path(),
        &["list", "--type", "ux-design", "--search", "MOBILE", "--sort", "oldest"],
    );
    let l = lines(&out);
    assert_eq!(l[0], "UX Design (2 projects)");
    // Malformed date sorts as the epoch, so it is oldest.
    assert_eq!(l[1], "001 Banking App");
}

#[test]
fn list_with_no_matches_shows_empty_state() {
    let site = site();
    let out = folio(site.path(), &["list", "--search", "zzz"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No projects match"));
}

#[test]
fn missing_catalogue_is_an_empty_portfolio() {
    let tmp = TempDir::new().unwrap();
    let out = folio(tmp.path(), &["list"]);
    assert!(out.status.success());
    assert_eq!(lines(&out)[0], "Frontend (0 projects)");
}

#[test]
fn tags_are_sorted_and_deduplicated() {
    let site = site();
    let out = folio(site.path(), &["tags", "--type", "frontend"]);
    assert_eq!(
        lines(&out),
        vec!["Frontend (4 tags)", "    charts", "    css", "    payments", "    react"]
    );
}

#[test]
fn show_prints_detail_or_fails() {
    let site = site();
    let out = folio(site.path(), &["show", "fe-1"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("Dashboard"));
    assert!(text.contains("Difficulty: Hard"));

    assert!(!folio(site.path(), &["show", "nope"]).status.success());
}

#[test]
fn unknown_sort_order_is_rejected() {
    let site = site();
    assert!(!folio(site.path(), &["list", "--sort", "random"]).status.success());
}

// ===========================================================================
// Check / render / export
// ===========================================================================

#[test]
fn check_warns_on_bad_dates_but_passes() {
    let site = site();
    let out = folio(site.path(), &["check"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("(5 projects)"));
    assert!(text.contains("warning: project 'ux-2'"));
    assert!(text.contains("Catalogue is valid"));
}

#[test]
fn check_fails_on_duplicate_ids() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("projects.json"),
        r#"[{"id":"1","title":"A","type":"Frontend"},{"id":"1","title":"B","type":"Frontend"}]"#,
    )
    .unwrap();
    let out = folio(tmp.path(), &["check"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("error: duplicate id '1'"));
}

#[test]
fn render_writes_site() {
    let site = site();
    let dist = site.path().join("dist");
    let out = folio(site.path(), &["render", "--output", dist.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    for rel in [
        "index.html",
        "frontend/index.html",
        "ux-design/index.html",
        "projects/fe-2.html",
        "projects.json",
    ] {
        assert!(dist.join(rel).exists(), "missing {rel}");
    }
    let detail = fs::read_to_string(dist.join("projects/fe-2.html")).unwrap();
    assert!(detail.contains(r#"data-count="3""#));
    assert!(stdout(&out).contains("Rendered 8 pages"));
}

#[test]
fn export_requires_login() {
    let site = site();
    let dir = site.path().join("out");
    let dir_arg = dir.to_str().unwrap();
    assert!(!folio(site.path(), &["export", "--output", dir_arg]).status.success());

    assert!(folio(site.path(), &["login", "admin"]).status.success());
    let out = folio(site.path(), &["export", "--output", dir_arg]);
    assert!(out.status.success());

    let original: serde_json::Value = serde_json::from_str(CATALOGUE).unwrap();
    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("projects.json")).unwrap()).unwrap();
    assert_eq!(
        original.as_array().unwrap().len(),
        exported.as_array().unwrap().len()
    );
    assert_eq!(exported[2]["gallery"][1], "https://img.example/2.png");
}

#[test]
fn gen_config_prints_stock_config() {
    let tmp = TempDir::new().unwrap();
    let out = folio(tmp.path(), &["gen-config"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("[site]"));
    assert!(text.contains("[admin]"));
}

// ===========================================================================
// Admin
// ===========================================================================

#[test]
fn mutations_require_login() {
    let site = site();
    let out = folio(site.path(), &["add", "--type", "frontend", "--title", "New"]);
    assert!(!out.status.success());
    assert!(!folio(site.path(), &["login", "wrong"]).status.success());
    assert!(!folio(site.path(), &["delete", "fe-1"]).status.success());
    assert_eq!(catalogue_titles(site.path()).len(), 5);
}

#[test]
fn add_edit_move_delete_round_trip() {
    let site = site();
    assert!(folio(site.path(), &["login", "admin"]).status.success());

    let out = folio(
        site.path(),
        &[
            "add", "--type", "ux", "--title", "Research Ops", "--tags", "research, ops",
            "--date", "2025-01-15", "--process", "Interview,Synthesize",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let id = stdout(&out).trim().strip_prefix("Created ").unwrap().to_string();
    assert_eq!(catalogue_titles(site.path()).last().unwrap(), "Research Ops");

    let show = stdout(&folio(site.path(), &["show", &id]));
    assert!(show.contains("Tags: research, ops"));
    assert!(show.contains("002 Synthesize"));

    assert!(folio(site.path(), &["edit", &id, "--title", "Research Operations"])
        .status
        .success());
    let show = stdout(&folio(site.path(), &["show", &id]));
    assert!(show.starts_with("Research Operations"));
    assert!(show.contains("Tags: research, ops"));

    assert!(folio(site.path(), &["move", "5", "0"]).status.success());
    assert_eq!(catalogue_titles(site.path())[0], "Research Operations");

    assert!(folio(site.path(), &["delete", &id]).status.success());
    assert_eq!(catalogue_titles(site.path()).len(), 5);
    assert!(!folio(site.path(), &["delete", &id]).status.success());
}

#[test]
fn edit_without_title_is_rejected() {
    let site = site();
    folio(site.path(), &["login", "admin"]);
    let out = folio(site.path(), &["edit", "fe-1", "--title", "  "]);
    assert!(!out.status.success());
    assert_eq!(catalogue_titles(site.path())[0], "Dashboard");
}

#[test]
fn password_change_validates_and_persists() {
    let site = site();
    assert!(!folio(site.path(), &["passwd", "secret1", "secret1"]).status.success());
    folio(site.path(), &["login", "admin"]);

    assert!(!folio(site.path(), &["passwd", "short", "short"]).status.success());
    assert!(!folio(site.path(), &["passwd", "secret1", "secret2"]).status.success());
    assert!(folio(site.path(), &["passwd", "secret1", "secret1"]).status.success());

    assert!(folio(site.path(), &["logout"]).status.success());
    assert!(!folio(site.path(), &["login", "admin"]).status.success());
    assert!(folio(site.path(), &["login", "secret1"]).status.success());

    assert!(folio(site.path(), &["reset"]).status.success());
    assert!(folio(site.path(), &["login", "admin"]).status.success());
}

// ===========================================================================
// Gallery
// ===========================================================================

#[test]
fn gallery_navigates_with_wraparound() {
    let site = site();
    let out = gallery(site.path(), "fe-2", false, "open 2\nnext\nnext\nprev\nesc\nquit\n");
    assert!(out.status.success());
    assert_eq!(
        lines(&out),
        vec![
            "open 2/3 https://img.example/2.png",
            "open 3/3 https://img.example/3.png",
            "open 1/3 https://img.example/1.png",
            "open 3/3 https://img.example/3.png",
            "closed",
        ]
    );
}

#[test]
fn gallery_swipes_past_threshold_only() {
    let site = site();
    let out = gallery(site.path(), "fe-2", true, "open 1\nswipe -20\nswipe -80\nswipe 60\nclose\n");
    assert_eq!(
        lines(&out),
        vec![
            "open 1/3 https://img.example/1.png",
            "open 1/3 https://img.example/1.png",
            "open 2/3 https://img.example/2.png",
            "open 1/3 https://img.example/1.png",
            "closed",
        ]
    );
}

#[test]
fn gallery_closes_when_platform_leaves_fullscreen() {
    let site = site();
    let out = gallery(site.path(), "fe-2", true, "open 3\nleave\n");
    assert_eq!(lines(&out), vec!["open 3/3 https://img.example/3.png", "closed"]);
}

#[test]
fn gallery_without_images() {
    let site = site();
    let out = gallery(site.path(), "fe-1", false, "");
    assert!(out.status.success());
    assert!(stdout(&out).contains("has no gallery images"));
}
