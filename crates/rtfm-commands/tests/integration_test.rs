//! Integration tests for rtfm-commands crate.
//!
//! These exercise the public surface the bot binary relies on: prefix
//! resolution, loading the shipped cogs, and the error sink.

use poise::serenity_prelude::UserId;
use rtfm_commands::prefix::{accepted_prefixes, matched_prefix, resolve_prefix};
use rtfm_commands::{builtin_catalog, DispatchOutcome, ErrorSink, PluginLoader};
use rtfm_common::test_utils::{create_temp_dir, init_test_logging, write_manifest};
use rtfm_common::RtfmError;

#[test]
fn test_prefix_examples() {
    let bot = Some(UserId::new(1234));

    let accepted = accepted_prefixes("RTFM* ping", bot);
    assert!(accepted.contains(&"RTFM*".to_string()));
    assert!(accepted.contains(&"<@1234> ".to_string()));

    assert_eq!(
        accepted_prefixes("hello world", bot),
        vec!["<@1234> ".to_string(), "<@!1234> ".to_string()]
    );

    let accepted = accepted_prefixes("r* foo", bot);
    assert_eq!(accepted.last().map(String::as_str), Some("r*"));
}

#[test]
fn test_prefix_is_exact_leading_substring() {
    for content in ["rTfM* x", "RM*y", "R*", "rtfm*rtfm*"] {
        let prefix = matched_prefix(content).expect("should match");
        assert!(content.starts_with(prefix));
        let (head, rest) = resolve_prefix(content, None).unwrap();
        assert_eq!(format!("{head}{rest}"), content);
    }
}

#[test]
fn test_shipped_manifests_load_builtin_cogs() {
    init_test_logging();
    let dir = create_temp_dir();
    write_manifest(dir.path(), "meta.toml", "name = \"meta\"\n");
    write_manifest(
        dir.path(),
        "rtfm.toml",
        "name = \"rtfm\"\ndescription = \"Documentation lookups\"\n",
    );
    write_manifest(dir.path(), "_example.toml", "name = \"example\"\n");

    let loaded = PluginLoader::new(dir.path())
        .load(&builtin_catalog())
        .unwrap();

    assert_eq!(loaded.report.loaded, vec!["meta", "rtfm"]);
    assert!(loaded.report.is_clean());
    let names: Vec<_> = loaded.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ping", "about", "rtfm"]);
}

#[tokio::test]
async fn test_error_sink_keeps_dispatching() {
    let sink = ErrorSink::new();

    let failed = sink
        .guard("message", async { Err::<(), _>(RtfmError::new("bad handler")) })
        .await;
    let next = sink.guard("message", async { Ok::<(), RtfmError>(()) }).await;

    assert_eq!(failed, DispatchOutcome::Failed);
    assert_eq!(next, DispatchOutcome::Completed);
    assert_eq!(sink.reported(), 1);
}
