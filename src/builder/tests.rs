use color_eyre::eyre::eyre;
use mockall::predicate::eq;

use super::*;
use crate::{
    changelog::Section,
    config::Config,
    forge::traits::MockGitHub,
    markdown::{MarkdownParser, writer},
    repo::MockGit,
    test_helpers::{create_test_pr, date},
};

fn mock_git(lines: Vec<&'static str>) -> MockGit {
    let mut git = MockGit::new();
    git.expect_tags()
        .returning(move || Ok(lines.iter().map(|l| l.to_string()).collect()));
    git.expect_first_commit().returning(|| Ok("root".into()));
    git.expect_date_of_commit()
        .with(eq("root"))
        .returning(|_| Ok(date("2023-12-01")));
    git
}

fn mock_github() -> MockGitHub {
    let mut github = MockGitHub::new();
    github.expect_repo_owner().returning(|| "owner".into());
    github.expect_repo_name().returning(|| "repo".into());
    github
}

fn builder(
    git: MockGit,
    github: MockGitHub,
    options: BuildOptions,
) -> ChangelogBuilder {
    let classifier =
        PullRequestClassifier::from_config(&Config::default()).unwrap();

    ChangelogBuilder::new(Box::new(git), Box::new(github), classifier, options)
        .with_now(date("2024-06-01"))
}

fn line(number: u64, title: &str) -> String {
    format!(
        "{title} [#{number}](https://github.com/owner/repo/pull/{number}) ([user](https://github.com/user))"
    )
}

#[test_log::test(tokio::test)]
async fn builds_entries_between_tags() {
    let git = mock_git(vec![
        "v1.0.0 aaa 2024-01-01T00:00:00Z",
        "v2.0.0 bbb 2024-02-01T00:00:00Z",
    ]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2024-01-01")), eq(date("2024-02-01")))
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                create_test_pr(3, "Add export", &["feature"]),
                create_test_pr(4, "Fix crash", &["bug"]),
                create_test_pr(5, "Bump deps", &["dependencies"]),
                create_test_pr(6, "Tidy", &[]),
            ])
        });
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2023-12-01")), eq(date("2024-01-01")))
        .times(1)
        .returning(|_, _| Ok(vec![create_test_pr(1, "Initial", &["feature"])]));

    let store = builder(git, github, BuildOptions::default())
        .build()
        .await
        .unwrap();

    assert_eq!(store.repo_owner(), "owner");
    assert_eq!(store.repo_name(), "repo");
    assert_eq!(store.base_ref(), Some("root"));
    assert!(store.unreleased().is_empty());

    let newest = store.tail().unwrap();
    assert_eq!(newest.tag, "v2.0.0");
    assert_eq!(newest.date, date("2024-02-01"));
    assert_eq!(newest.section(Section::Added), [line(3, "Add export")]);
    assert_eq!(newest.section(Section::Fixed), [line(4, "Fix crash")]);
    assert_eq!(newest.section(Section::Other), [line(6, "Tidy")]);
    assert_eq!(newest.compare_base(), Some("v1.0.0"));

    let oldest = store.head().unwrap();
    assert_eq!(oldest.tag, "v1.0.0");
    assert_eq!(oldest.added, vec![line(1, "Initial")]);
    assert_eq!(oldest.compare_base(), Some("root"));
}

#[tokio::test]
async fn collects_unreleased_work_after_latest_tag() {
    let git = mock_git(vec!["v1.0.0 aaa 2024-01-01T00:00:00Z"]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2024-01-01")), eq(date("2024-06-01")))
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                create_test_pr(7, "Pending feature", &["feature"]),
                create_test_pr(8, "Housekeeping", &["maintenance"]),
                create_test_pr(9, "Unlabelled", &[]),
            ])
        });
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2023-12-01")), eq(date("2024-01-01")))
        .returning(|_, _| Ok(vec![]));

    let options = BuildOptions {
        show_unreleased: true,
        ..BuildOptions::default()
    };

    let store = builder(git, github, options).build().await.unwrap();

    assert_eq!(
        store.unreleased(),
        [line(7, "Pending feature"), line(9, "Unlabelled")]
    );
    assert_eq!(store.len(), 1);
    assert!(store.tail().unwrap().is_empty());
}

#[tokio::test]
async fn next_version_replaces_unreleased() {
    let mut git = mock_git(vec!["v1.0.0 aaa 2024-01-01T00:00:00Z"]);
    git.expect_last_commit().returning(|| Ok("head".into()));

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2024-01-01")), eq(date("2024-06-01")))
        .times(1)
        .returning(|_, _| Ok(vec![create_test_pr(7, "Shiny", &["feature"])]));
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2023-12-01")), eq(date("2024-01-01")))
        .returning(|_, _| Ok(vec![]));

    let options = BuildOptions {
        show_unreleased: true,
        next_version: Some("v1.1.0".into()),
        ..BuildOptions::default()
    };

    let store = builder(git, github, options).build().await.unwrap();

    assert!(store.unreleased().is_empty());

    let next = store.tail().unwrap();
    assert_eq!(next.tag, "v1.1.0");
    assert_eq!(next.date, date("2024-06-01"));
    assert_eq!(next.added, vec![line(7, "Shiny")]);
}

#[tokio::test]
async fn latest_only_pairs_with_first_commit() {
    let git = mock_git(vec![
        "v1.0.0 aaa 2024-01-01T00:00:00Z",
        "v2.0.0 bbb 2024-02-01T00:00:00Z",
    ]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .with(eq(date("2023-12-01")), eq(date("2024-02-01")))
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let options = BuildOptions {
        latest_only: true,
        ..BuildOptions::default()
    };

    let store = builder(git, github, options).build().await.unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.tail().unwrap().tag, "v2.0.0");
    assert_eq!(store.tail().unwrap().compare_base(), Some("root"));
}

#[tokio::test]
async fn no_tags_is_terminal() {
    let git = mock_git(vec![]);
    let github = mock_github();

    let result = builder(git, github, BuildOptions::default()).build().await;

    assert!(matches!(result, Err(ChangelogError::NoTagsFound)));
}

#[tokio::test]
async fn upstream_failures_are_wrapped() {
    let git = mock_git(vec!["v1.0.0 aaa 2024-01-01T00:00:00Z"]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .returning(|_, _| Err(eyre!("rate limited")));

    let result = builder(git, github, BuildOptions::default()).build().await;

    match result {
        Err(ChangelogError::UpstreamFetch { context, source }) => {
            assert!(context.contains("root and v1.0.0"), "{context}");
            assert_eq!(source.to_string(), "rate limited");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unreleased_failures_name_latest_tag() {
    let git = mock_git(vec!["v1.0.0 aaa 2024-01-01T00:00:00Z"]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .returning(|_, _| Err(eyre!("rate limited")));

    let options = BuildOptions {
        show_unreleased: true,
        ..BuildOptions::default()
    };

    let result = builder(git, github, options).build().await;

    match result {
        Err(ChangelogError::UpstreamFetch { context, .. }) => {
            assert!(context.contains("v1.0.0 and now"), "{context}");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn two_tags_render_compare_link_and_added_lines() {
    let git = mock_git(vec![
        "v1.0.0 aaa 2024-01-01T10:15:00Z",
        "v2.0.0 bbb 2024-02-01T18:30:00Z",
    ]);

    let mut github = mock_github();
    github
        .expect_pull_requests_merged_between()
        .with(
            eq(date("2024-01-01") + chrono::Duration::minutes(615)),
            eq(date("2024-02-01") + chrono::Duration::minutes(1110)),
        )
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                create_test_pr(1, "First feature", &["enhancement"]),
                create_test_pr(2, "Second feature", &["enhancement"]),
            ])
        });
    github
        .expect_pull_requests_merged_between()
        .with(
            eq(date("2023-12-01")),
            eq(date("2024-01-01") + chrono::Duration::minutes(615)),
        )
        .times(1)
        .returning(|_, _| Ok(vec![]));

    let store = builder(git, github, BuildOptions::default())
        .build()
        .await
        .unwrap();

    let newest = store.tail().unwrap();
    assert_eq!(newest.tag, "v2.0.0");
    assert_eq!(
        newest.added,
        vec![line(1, "First feature"), line(2, "Second feature")]
    );

    let markdown = writer::write(&store).unwrap();
    assert!(markdown.contains(
        "## [v2.0.0](https://github.com/owner/repo/tree/v2.0.0) - 2024-02-01"
    ));
    assert!(markdown.contains(
        "[Full Changelog](https://github.com/owner/repo/compare/v1.0.0...v2.0.0)"
    ));

    let parsed = MarkdownParser::new("owner", "repo").parse(&markdown).unwrap();
    assert_eq!(parsed, store);
}

#[tokio::test]
async fn tag_listing_failure_is_wrapped() {
    let mut git = MockGit::new();
    git.expect_tags().returning(|| Err(eyre!("not a repository")));

    let result =
        builder(git, mock_github(), BuildOptions::default()).build().await;

    assert!(matches!(result, Err(ChangelogError::UpstreamFetch { .. })));
}
