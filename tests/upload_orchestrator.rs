use std::fs::{create_dir_all, read, write};
use std::path::{Path, PathBuf};

use clg::config::{Settings, UploadConfig};
use clg::contract::{CommandOutput, MockPrompter, MockVcsRunner};
use clg::upload::{upload_images, UploadOutcome};
use clg::ClgError;
use tempfile::{tempdir, TempDir};

const ONE_GITHUB_REMOTE: &str = "\
origin\tgit@github.com:EthanGeekFan/OurMemories-ImgHosting.git (fetch)
origin\tgit@github.com:EthanGeekFan/OurMemories-ImgHosting.git (push)
";

/// Source dir with two dated images and some noise, plus an empty git working copy.
fn fixture() -> (TempDir, UploadConfig) {
    let tmp = tempdir().unwrap();
    let source = tmp.path().join("source");
    let repo = tmp.path().join("hosting");
    create_dir_all(&source).unwrap();
    create_dir_all(repo.join(".git")).unwrap();
    write(source.join("2023-05-01-Alice.jpg"), b"alice").unwrap();
    write(source.join("20230502.png"), b"plain").unwrap();
    write(source.join("holiday.jpg"), b"undated").unwrap();
    write(source.join("notes.txt"), b"text").unwrap();

    let config = UploadConfig {
        source_dir: source,
        repo,
        img_dir: PathBuf::from("img/"),
    };
    (tmp, config)
}

fn image_path(config: &UploadConfig, date: &str, file: &str) -> PathBuf {
    config.repo.join("img").join(format!("Log-{date}")).join(file)
}

/// Runner that succeeds at staging and committing.
fn staging_runner() -> MockVcsRunner {
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().times(1).returning(|| true);
    runner
        .expect_stage_all()
        .times(1)
        .returning(|| CommandOutput::ok(""));
    runner
        .expect_commit()
        .times(1)
        .returning(|message| {
            assert_eq!(message, "Auto Update Images");
            CommandOutput::ok("[main 1a2b3c4] Auto Update Images")
        });
    runner
}

/// [`staging_runner`] that also lists `remotes`.
fn committing_runner(remotes: &'static str) -> MockVcsRunner {
    let mut runner = staging_runner();
    runner
        .expect_list_remotes()
        .times(1)
        .returning(move || CommandOutput::ok(remotes));
    runner
}

/// Successful push that had nothing to send; git reports this on stderr.
fn up_to_date() -> CommandOutput {
    CommandOutput {
        code: 0,
        stdout: String::new(),
        stderr: "Everything up-to-date\n".into(),
    }
}

fn assert_not_copied(repo: &Path) {
    assert!(!repo.join("img").join("Log-2023-05-01").exists());
}

#[tokio::test]
async fn copies_commits_pushes_and_releases() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner.expect_push().times(1).returning(|remote| {
        assert_eq!(remote, "origin");
        CommandOutput {
            code: 0,
            stdout: String::new(),
            stderr: "To github.com:EthanGeekFan/OurMemories-ImgHosting.git\n   1a2b3c4..5d6e7f8  main -> main\n".into(),
        }
    });
    runner
        .expect_list_tags()
        .times(1)
        .returning(|| CommandOutput::ok("v1.0.0\nv1.0.1\n"));
    runner.expect_create_tag().times(1).returning(|tag| {
        assert_eq!(tag, "v1.0.2");
        CommandOutput::ok("")
    });
    runner.expect_push_tag().times(1).returning(|remote, tag| {
        assert_eq!(remote, "origin");
        assert_eq!(tag, "v1.0.2");
        CommandOutput::ok("")
    });
    let prompter = MockPrompter::new();

    let report = upload_images(&config, &Settings::default(), &runner, &prompter)
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        UploadOutcome::Released {
            remote: "origin".into(),
            tag: "v1.0.2".into()
        }
    );
    assert!(report.committed);
    assert_eq!(report.copied.len(), 2);
    assert_eq!(
        read(image_path(&config, "2023-05-01", "2023-05-01-Alice.jpg")).unwrap(),
        b"alice"
    );
    assert_eq!(
        read(image_path(&config, "2023-05-02", "20230502.png")).unwrap(),
        b"plain"
    );
    assert!(!config.repo.join("img/holiday.jpg").exists());
    assert!(!config.repo.join("img/notes.txt").exists());
}

#[tokio::test]
async fn up_to_date_push_skips_release() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .times(1)
        .returning(|_| up_to_date());
    runner.expect_list_tags().never();
    runner.expect_create_tag().never();
    runner.expect_push_tag().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        UploadOutcome::UpToDate {
            remote: "origin".into()
        }
    );
}

#[tokio::test]
async fn no_github_remote_stops_without_pushing() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner("gitee\thttps://gitee.com/someone/hosting.git (fetch)\n");
    runner.expect_push().never();
    runner.expect_list_tags().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert_eq!(report.outcome, UploadOutcome::NoRemote);
    assert_eq!(report.copied.len(), 2);
}

#[tokio::test]
async fn several_github_remotes_ask_the_operator() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(
        "origin\thttps://github.com/a/hosting.git (fetch)\n\
         origin\thttps://github.com/a/hosting.git (push)\n\
         mirror\thttps://github.com/b/hosting.git (fetch)\n\
         mirror\thttps://github.com/b/hosting.git (push)\n",
    );
    runner.expect_push().times(1).returning(|remote| {
        assert_eq!(remote, "mirror");
        up_to_date()
    });

    let mut prompter = MockPrompter::new();
    prompter.expect_select().times(1).returning(|_, choices| {
        Ok(choices.iter().position(|c| c == "mirror").unwrap())
    });

    let report = upload_images(&config, &Settings::default(), &runner, &prompter)
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        UploadOutcome::UpToDate {
            remote: "mirror".into()
        }
    );
}

#[tokio::test]
async fn failed_staging_aborts_before_commit() {
    let (_tmp, config) = fixture();
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().returning(|| true);
    runner
        .expect_stage_all()
        .times(1)
        .returning(|| CommandOutput::failed(128, "fatal: index.lock exists"));
    runner.expect_commit().never();
    runner.expect_list_remotes().never();
    runner.expect_push().never();

    let err = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap_err();

    match err {
        ClgError::StageFailed(message) => assert!(message.contains("index.lock")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn failed_commit_is_tolerated() {
    let (_tmp, config) = fixture();
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().returning(|| true);
    runner
        .expect_stage_all()
        .returning(|| CommandOutput::ok(""));
    runner
        .expect_commit()
        .times(1)
        .returning(|_| CommandOutput {
            code: 1,
            stdout: "nothing to commit, working tree clean\n".into(),
            stderr: String::new(),
        });
    runner
        .expect_list_remotes()
        .returning(|| CommandOutput::ok(ONE_GITHUB_REMOTE));
    runner
        .expect_push()
        .times(1)
        .returning(|_| up_to_date());

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert!(!report.committed);
    assert_eq!(
        report.outcome,
        UploadOutcome::UpToDate {
            remote: "origin".into()
        }
    );
}

#[tokio::test]
async fn failed_push_skips_release() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .times(1)
        .returning(|_| CommandOutput::failed(1, "fatal: Could not read from remote repository."));
    runner.expect_list_tags().never();
    runner.expect_create_tag().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    match report.outcome {
        UploadOutcome::PushFailed { remote, message } => {
            assert_eq!(remote, "origin");
            assert!(message.contains("Could not read"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn first_release_starts_from_default_tag() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .returning(|_| CommandOutput::ok(""));
    runner
        .expect_list_tags()
        .returning(|| CommandOutput::ok(""));
    runner.expect_create_tag().times(1).returning(|tag| {
        assert_eq!(tag, "v0.1.1");
        CommandOutput::ok("")
    });
    runner
        .expect_push_tag()
        .times(1)
        .returning(|_, _| CommandOutput::failed(1, "rejected"));

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        UploadOutcome::ReleaseFailed {
            remote: "origin".into(),
            message: "rejected".into()
        }
    );
}

#[tokio::test]
async fn failed_remote_listing_means_no_remote() {
    let (_tmp, config) = fixture();
    let mut runner = staging_runner();
    runner
        .expect_list_remotes()
        .times(1)
        .returning(|| CommandOutput::failed(128, "fatal: not a git repository"));
    runner.expect_push().never();
    runner.expect_list_tags().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert!(report.committed);
    assert_eq!(report.copied.len(), 2);
    assert_eq!(report.outcome, UploadOutcome::NoRemote);
}

#[tokio::test]
async fn out_of_range_remote_choice_is_an_error() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(
        "origin\thttps://github.com/a/hosting.git (fetch)\n\
         mirror\thttps://github.com/b/hosting.git (fetch)\n",
    );
    runner.expect_push().never();

    let mut prompter = MockPrompter::new();
    prompter.expect_select().times(1).returning(|_, _| Ok(7));

    let err = upload_images(&config, &Settings::default(), &runner, &prompter)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClgError::InvalidSelection {
            index: 7,
            choices: 2
        }
    ));
}

#[tokio::test]
async fn failed_tag_listing_fails_release() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .times(1)
        .returning(|_| CommandOutput::ok(""));
    runner
        .expect_list_tags()
        .times(1)
        .returning(|| CommandOutput::failed(128, "fatal: bad object"));
    runner.expect_create_tag().never();
    runner.expect_push_tag().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert_eq!(
        report.outcome,
        UploadOutcome::ReleaseFailed {
            remote: "origin".into(),
            message: "fatal: bad object".into()
        }
    );
}

#[tokio::test]
async fn failed_tag_creation_skips_tag_push() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .times(1)
        .returning(|_| CommandOutput::ok(""));
    runner
        .expect_list_tags()
        .times(1)
        .returning(|| CommandOutput::ok("v1.0.0\nv1.0.1\n"));
    runner.expect_create_tag().times(1).returning(|tag| {
        assert_eq!(tag, "v1.0.2");
        CommandOutput::failed(128, "fatal: tag 'v1.0.2' already exists")
    });
    runner.expect_push_tag().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    match report.outcome {
        UploadOutcome::ReleaseFailed { remote, message } => {
            assert_eq!(remote, "origin");
            assert!(message.contains("already exists"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn tag_without_number_fails_only_the_release() {
    let (_tmp, config) = fixture();
    let mut runner = committing_runner(ONE_GITHUB_REMOTE);
    runner
        .expect_push()
        .times(1)
        .returning(|_| CommandOutput::ok(""));
    runner
        .expect_list_tags()
        .times(1)
        .returning(|| CommandOutput::ok("release\n"));
    runner.expect_create_tag().never();
    runner.expect_push_tag().never();

    let report = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap();

    assert!(report.committed);
    assert_eq!(report.copied.len(), 2);
    match report.outcome {
        UploadOutcome::ReleaseFailed { remote, message } => {
            assert_eq!(remote, "origin");
            assert!(message.contains("release"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn missing_git_is_fatal() {
    let (_tmp, config) = fixture();
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().times(1).returning(|| false);
    runner.expect_stage_all().never();

    let err = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClgError::GitMissing));
}

#[tokio::test]
async fn working_copy_without_git_metadata_is_rejected() {
    let (_tmp, config) = fixture();
    std::fs::remove_dir_all(config.repo.join(".git")).unwrap();
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().returning(|| true);
    runner.expect_stage_all().never();

    let err = upload_images(&config, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClgError::NotARepository(_)));
}

#[tokio::test]
async fn missing_repo_or_source_fails_fast() {
    let (_tmp, config) = fixture();
    let mut runner = MockVcsRunner::new();
    runner.expect_check_installed().never();

    let missing_repo = UploadConfig {
        repo: config.repo.join("does-not-exist"),
        ..config.clone()
    };
    let err = upload_images(&missing_repo, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClgError::RepoMissing(_)));

    let missing_source = UploadConfig {
        source_dir: config.source_dir.join("does-not-exist"),
        ..config.clone()
    };
    let err = upload_images(&missing_source, &Settings::default(), &runner, &MockPrompter::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ClgError::SourceMissing(_)));
    assert_not_copied(&config.repo);
}
