//! End-to-end CLI test suite.
//!
//! Tests organized by command group. Each test verifies CLI behavior
//! through the public interface.

mod common;

use common::harness::{NotegraphCommand, TestEnv, TestNote};
use predicates::prelude::*;
use serde_json::Value;

/// Two notes linking each other plus a nested note linking to the first.
fn linked_env() -> TestEnv {
    let env = TestEnv::new();
    env.add_note(&TestNote::new("a.md").title("Alpha").tag("go").link("B", "b.md"));
    env.add_note(&TestNote::new("b.md").title("Beta").tag("GO").tag("tools").link("A", "a.md"));
    env.add_note(
        &TestNote::new("guides/c.md")
            .title("Gamma")
            .body("Concurrency in practice.")
            .link("A", "../a.md"),
    );
    env
}

// ===========================================
// build command tests
// ===========================================
mod build_tests {
    use super::*;

    #[test]
    fn test_build_writes_site() {
        let env = linked_env();

        env.cmd()
            .build(&env.output_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Generated site with 3 notes and 2 tag pages",
            ));

        for file in [
            "a.html",
            "b.html",
            "guides/c.html",
            "index.html",
            "search.html",
            "search-index.json",
            "tags/index.html",
            "tags/go.html",
            "tags/tools.html",
            "assets/style.css",
            "assets/search.js",
        ] {
            assert!(env.output_dir().join(file).is_file(), "missing {file}");
        }
    }

    #[test]
    fn test_build_json_summary() {
        let env = linked_env();

        let json: Value = env
            .cmd()
            .build(&env.output_dir())
            .format_json()
            .output_json();

        assert_eq!(json["data"]["notes"], 3);
        assert_eq!(json["data"]["tag_pages"], 2);
        assert_eq!(json["data"]["broken_links"], 0);
    }

    #[test]
    fn test_build_reports_broken_links() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("a.md").link("gone", "ghost.md"));

        env.cmd()
            .build(&env.output_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains("1 broken link(s)"))
            .stderr(predicate::str::contains("broken link"));
    }

    #[test]
    fn test_build_uses_config_file() {
        let env = linked_env();
        env.write_config("site_title = \"Config Wiki\"\ntheme = \"dark\"\n");

        env.cmd().build(&env.output_dir()).assert().success();

        assert!(env.read_output("index.html").contains("Config Wiki"));
        assert!(env.read_output("assets/style.css").contains("color-scheme: dark"));
    }

    #[test]
    fn test_build_flag_overrides_config() {
        let env = linked_env();
        env.write_config("site_title = \"Config Wiki\"\n");

        env.cmd()
            .build(&env.output_dir())
            .args(["--site-title", "Flag Wiki"])
            .assert()
            .success();

        let index = env.read_output("index.html");
        assert!(index.contains("Flag Wiki"));
        assert!(!index.contains("Config Wiki"));
    }

    #[test]
    fn test_build_config_dir_used_without_flag() {
        let env = linked_env();
        env.write_config(&format!(
            "dir = \"{}\"\n",
            env.notes_dir().display().to_string().replace('\\', "\\\\")
        ));

        NotegraphCommand::new()
            .config_home(&env.config_home())
            .build(&env.output_dir())
            .assert()
            .success()
            .stdout(predicate::str::contains("3 notes"));
    }

    #[test]
    fn test_build_invalid_config_fails() {
        let env = linked_env();
        env.write_config("broken_links = \"sometimes\"\n");

        env.cmd()
            .build(&env.output_dir())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn test_build_unknown_theme_fails() {
        let env = linked_env();

        env.cmd()
            .build(&env.output_dir())
            .args(["--theme", "neon"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown theme"));
    }

    #[test]
    fn test_build_missing_notes_dir_fails() {
        let env = TestEnv::new();

        NotegraphCommand::new()
            .config_home(&env.config_home())
            .dir(&env.notes_dir().join("nope"))
            .build(&env.output_dir())
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to compile notes"));
    }
}

// ===========================================
// check command tests
// ===========================================
mod check_tests {
    use super::*;

    #[test]
    fn test_check_clean_notes() {
        let env = linked_env();

        env.cmd()
            .check()
            .assert()
            .success()
            .stdout(predicate::str::contains("All 3 notes OK."));
    }

    #[test]
    fn test_check_empty_directory() {
        let env = TestEnv::new();

        env.cmd()
            .check()
            .assert()
            .success()
            .stdout(predicate::str::contains("No notes found."));
    }

    #[test]
    fn test_check_broken_links_fail() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("a.md").link("x", "ghost.md"));

        env.cmd()
            .check()
            .assert()
            .failure()
            .stdout(predicate::str::contains("error: a.md: broken link to 'ghost.md'"))
            .stderr(predicate::str::contains("check failed"));
    }

    #[test]
    fn test_check_json_lists_broken_links() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("a.md").link("x", "ghost.md").link("y", "../up.md"));

        let output = env.cmd().check().format_json().assert().failure();
        let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
        let json: Value = serde_json::from_str(&stdout).unwrap();

        assert_eq!(
            json["data"],
            serde_json::json!([
                {"source": "a.md", "target": "ghost.md"},
                {"source": "a.md", "target": "../up.md"},
            ])
        );
    }
}

// ===========================================
// graph and backlinks command tests
// ===========================================
mod graph_tests {
    use super::*;

    #[test]
    fn test_graph_human() {
        let env = linked_env();

        env.cmd()
            .graph()
            .assert()
            .success()
            .stdout(predicate::str::contains("a.md  (Alpha)"))
            .stdout(predicate::str::contains("  -> b.md"))
            .stdout(predicate::str::contains("  <- guides/c.md"))
            .stdout(predicate::str::contains("3 notes, 3 links"));
    }

    #[test]
    fn test_graph_json() {
        let env = linked_env();

        let json: Value = env.cmd().graph().format_json().output_json();
        let notes = json["data"].as_array().unwrap();

        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0]["path"], "a.md");
        assert_eq!(notes[0]["links"], serde_json::json!(["b.md"]));
        assert_eq!(notes[0]["backlinks"], serde_json::json!(["b.md", "guides/c.md"]));
    }

    #[test]
    fn test_backlinks_lists_sources() {
        let env = linked_env();

        env.cmd()
            .backlinks("a.md")
            .assert()
            .success()
            .stdout(predicate::str::contains("Beta"))
            .stdout(predicate::str::contains("Gamma"))
            .stdout(predicate::str::contains("2 backlink(s)"));
    }

    #[test]
    fn test_backlinks_accepts_path_without_extension() {
        let env = linked_env();

        let json: Value = env.cmd().backlinks("b").format_json().output_json();
        assert_eq!(
            json["data"],
            serde_json::json!([{"path": "a.md", "title": "Alpha"}])
        );
    }

    #[test]
    fn test_backlinks_none() {
        let env = linked_env();

        env.cmd()
            .backlinks("guides/c.md")
            .assert()
            .success()
            .stdout(predicate::str::contains("No backlinks found."));
    }

    #[test]
    fn test_backlinks_unknown_note_fails() {
        let env = linked_env();

        env.cmd()
            .backlinks("missing.md")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Note not found: missing.md"));
    }
}

// ===========================================
// tags command tests
// ===========================================
mod tags_tests {
    use super::*;

    #[test]
    fn test_tags_with_counts() {
        let env = linked_env();

        env.cmd()
            .tags()
            .assert()
            .success()
            .stdout(predicate::str::contains("go (2)"))
            .stdout(predicate::str::contains("tools (1)"));
    }

    #[test]
    fn test_tags_json() {
        let env = linked_env();

        let json: Value = env.cmd().tags().format_json().output_json();
        assert_eq!(
            json["data"],
            serde_json::json!([
                {"name": "go", "count": 2},
                {"name": "tools", "count": 1},
            ])
        );
    }

    #[test]
    fn test_tags_empty() {
        let env = TestEnv::new();
        env.add_note(&TestNote::new("a.md"));

        env.cmd()
            .tags()
            .assert()
            .success()
            .stdout(predicate::str::contains("No tags found."));
    }
}

// ===========================================
// search command tests
// ===========================================
mod search_tests {
    use super::*;

    #[test]
    fn test_search_matches_body_text() {
        let env = linked_env();

        env.cmd()
            .search("concurrency")
            .assert()
            .success()
            .stdout(predicate::str::contains("Gamma  (guides/c.md)"))
            .stdout(predicate::str::contains("1 result(s)"));
    }

    #[test]
    fn test_search_requires_every_word() {
        let env = linked_env();

        let json: Value = env.cmd().search("go beta").format_json().output_json();
        let hits = json["data"].as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["path"], "b.md");
    }

    #[test]
    fn test_search_limit() {
        let env = linked_env();

        let json: Value = env
            .cmd()
            .search("go")
            .args(["--limit", "1"])
            .format_json()
            .output_json();
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_search_no_results() {
        let env = linked_env();

        env.cmd()
            .search("nonexistent")
            .assert()
            .success()
            .stdout(predicate::str::contains("No results found."));
    }
}

// ===========================================
// global options and completions
// ===========================================
mod global_tests {
    use super::*;

    #[test]
    fn test_version() {
        NotegraphCommand::new()
            .args(["--version"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("notegraph "));
    }

    #[test]
    fn test_completions_bash() {
        NotegraphCommand::new()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("notegraph"));
    }

    #[test]
    fn test_quiet_suppresses_info_logs() {
        let env = linked_env();

        env.cmd()
            .args(["-q"])
            .check()
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn test_default_logs_compile_summary() {
        let env = linked_env();

        env.cmd()
            .check()
            .assert()
            .success()
            .stderr(predicate::str::contains("compiled notes"));
    }

    #[test]
    fn test_verbose_logs_stages() {
        let env = linked_env();

        env.cmd()
            .args(["-v"])
            .tags()
            .assert()
            .success()
            .stderr(predicate::str::contains("parsed notes"));
    }
}
